use approx::assert_abs_diff_eq;
use chart_line::ChartError;
use chart_line::api::{
    ChartLine, ChartLineProps, CROSSHAIR_STROKE_OPACITY, Curve, FixedClock, SERIES_STROKE_WIDTH,
    TimeLabelPattern,
};
use chart_line::core::{DataPoint, Interval, IntervalStore, ScaleBound, Series};
use chart_line::interaction::{CrosshairType, SliceAxis};
use chart_line::render::{Color, FontWeight, NullRenderer};
use chrono::{DateTime, TimeZone, Utc};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 10, 15, 0, 0)
        .single()
        .expect("timestamp")
}

fn queries() -> Series {
    Series::from_values("queries", &[1.0, 2.0, 3.0, 4.0])
}

#[test]
fn props_default_to_black_275_by_64() {
    let props = ChartLineProps::new(vec![queries()]);
    assert_eq!(props.color, "black");
    assert_eq!(props.width, 275);
    assert_eq!(props.height, 64);
}

#[test]
fn empty_data_renders_without_error() {
    let chart = ChartLine::new(ChartLineProps::new(Vec::new())).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");

    assert!(rendered.series().is_empty());
    assert!(rendered.slices().is_empty());
    assert!(rendered.hover(100.0).is_none());

    let frame = rendered.build_render_frame(None).expect("frame");
    assert!(frame.is_empty());

    let mut renderer = NullRenderer::default();
    rendered.draw(&mut renderer, None).expect("draw");
    assert_eq!(renderer.frames_rendered, 1);
}

#[test]
fn series_without_points_renders_without_error() {
    let chart = ChartLine::new(ChartLineProps::new(vec![Series::new("empty", Vec::new())]))
        .expect("chart");
    let rendered = chart.render(&Interval::WEEK, &now()).expect("render");

    assert_eq!(rendered.series().len(), 1);
    assert!(rendered.build_render_frame(None).expect("frame").lines.is_empty());
}

#[test]
fn rendered_points_carry_formatted_labels() {
    let chart = ChartLine::new(ChartLineProps::new(vec![queries()])).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");

    let points = &rendered.series()[0].points;
    assert_eq!(points.len(), 4);
    assert_eq!(points[0].x_formatted, "9 Jan 15:00");
    assert_eq!(points[3].x_formatted, "9 Jan 18:00");
    assert_eq!(points[0].y_formatted, "1");
    assert_eq!(points[3].y_formatted, "4");
    assert_eq!(rendered.format_x(5.0).expect("label"), "9 Jan 20:00");
}

#[test]
fn options_keep_fixed_widget_configuration() {
    let props = ChartLineProps::new(vec![queries()])
        .with_color("#ff0000")
        .with_size(300, 80);
    let chart = ChartLine::new(props).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");
    let options = rendered.options();

    assert!(!options.enable_area);
    assert!(options.animate);
    assert_eq!(options.enable_slices, SliceAxis::X);
    assert_eq!(options.curve, Curve::Linear);
    assert!(options.debug_mesh);
    assert_eq!(options.colors, vec!["#ff0000".to_owned()]);
    assert_eq!((options.width, options.height), (300, 80));
    assert_eq!(options.x_scale.min, ScaleBound::Fixed(0.0));
    assert_eq!(options.x_scale.max, ScaleBound::Auto);
    assert_eq!(options.crosshair_type, CrosshairType::X);
    assert_eq!(options.theme.crosshair.line.stroke, "black");
    assert_eq!(options.theme.crosshair.line.stroke_width, 1.0);
    assert_eq!(options.theme.crosshair.line.stroke_opacity, 0.35);
    assert!(!options.axis_left);
    assert!(!options.axis_bottom);
    assert!(!options.enable_grid_x);
    assert!(!options.enable_grid_y);
    assert!(!options.enable_points);
}

#[test]
fn x_scale_starts_at_zero_and_ends_at_max_x() {
    let series = Series::new(
        "sparse",
        vec![DataPoint::new(2.0, 5.0), DataPoint::new(6.0, 10.0)],
    );
    let chart = ChartLine::new(ChartLineProps::new(vec![series])).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");

    assert_eq!(rendered.x_scale().domain(), (0.0, 6.0));
    assert_eq!(rendered.y_scale().domain(), (0.0, 10.0));
}

#[test]
fn frame_draws_one_segment_per_point_pair_without_area_or_markers() {
    let chart = ChartLine::new(ChartLineProps::new(vec![queries()])).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");
    let frame = rendered.build_render_frame(None).expect("frame");

    assert_eq!(frame.lines.len(), 3);
    assert!(frame.texts.is_empty());
    for line in &frame.lines {
        assert_eq!(line.color, Color::BLACK);
        assert_eq!(line.stroke_width, SERIES_STROKE_WIDTH);
    }

    // x domain 0..3 over 275px, y domain 0..4 over 64px.
    let first = frame.lines[0];
    assert_abs_diff_eq!(first.x1, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.y1, 48.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.x2, 275.0 / 3.0, epsilon = 1e-9);
    assert_abs_diff_eq!(first.y2, 32.0, epsilon = 1e-9);
    let last = frame.lines[2];
    assert_abs_diff_eq!(last.x2, 275.0, epsilon = 1e-9);
    assert_abs_diff_eq!(last.y2, 0.0, epsilon = 1e-9);
}

#[test]
fn debug_mesh_outlines_every_slice() {
    let chart = ChartLine::new(ChartLineProps::new(vec![queries()])).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");
    let frame = rendered.build_render_frame(None).expect("frame");

    assert_eq!(frame.rects.len(), 4);
    let total_width: f64 = frame.rects.iter().map(|rect| rect.width).sum();
    assert_abs_diff_eq!(total_width, 275.0, epsilon = 1e-9);
}

#[test]
fn hover_picks_nearest_slice_and_builds_tooltip() {
    let chart = ChartLine::new(ChartLineProps::new(vec![queries()])).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");

    // x=2 sits at 183.33px.
    let hover = rendered.hover(180.0).expect("hover");
    assert_eq!(hover.slice.x, 2.0);
    let tooltip = hover.tooltip.as_ref().expect("tooltip");
    assert_eq!(tooltip.value, "3");
    assert_eq!(tooltip.label, "9 Jan 17:00");

    assert!(rendered.hover(-1.0).is_none());
    assert!(rendered.hover(276.0).is_none());
    assert!(rendered.hover(f64::NAN).is_none());
}

#[test]
fn hovered_frame_adds_vertical_crosshair_and_tooltip_text() {
    let chart = ChartLine::new(ChartLineProps::new(vec![queries()])).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");
    let hover = rendered.hover(0.0).expect("hover");
    let frame = rendered.build_render_frame(Some(&hover)).expect("frame");

    assert_eq!(frame.lines.len(), 4);
    let crosshair = frame.lines[3];
    assert_abs_diff_eq!(crosshair.x1, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(crosshair.x2, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(crosshair.y1, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(crosshair.y2, 64.0, epsilon = 1e-9);
    assert_eq!(crosshair.stroke_width, 1.0);
    assert_eq!(crosshair.color, Color::BLACK.with_alpha(CROSSHAIR_STROKE_OPACITY));

    assert_eq!(frame.texts.len(), 2);
    assert_eq!(frame.texts[0].text, "1");
    assert_eq!(frame.texts[0].font_weight, FontWeight::Bold);
    assert_eq!(frame.texts[1].text, "9 Jan 15:00");
    assert_eq!(frame.texts[1].font_weight, FontWeight::Normal);
}

#[test]
fn tooltip_uses_only_first_point_of_multi_series_slice() {
    let props = ChartLineProps::new(vec![
        Series::from_values("allowed", &[10.0, 20.0]),
        Series::from_values("blocked", &[1.0, 2.0]),
    ]);
    let chart = ChartLine::new(props).expect("chart");
    let rendered = chart.render(&Interval::new(30).expect("interval"), &now())
        .expect("render");

    let hover = rendered.hover(275.0).expect("hover");
    assert_eq!(hover.slice.points.len(), 2);
    assert_eq!(hover.slice.points[0].series_id, "allowed");
    let tooltip = hover.tooltip.expect("tooltip");
    assert_eq!(tooltip.value, "20");
    assert_eq!(tooltip.label, "13 Dec 2023");
}

#[test]
fn tooltip_markup_wraps_value_and_label() {
    let chart = ChartLine::new(ChartLineProps::new(vec![queries()])).expect("chart");
    let rendered = chart.render(&Interval::DAY, &now()).expect("render");
    let tooltip = rendered.hover(0.0).and_then(|hover| hover.tooltip).expect("tooltip");

    assert_eq!(
        tooltip.to_html(),
        "<div class=\"line__tooltip\"><span class=\"line__tooltip-text\"><strong>1</strong><br /><small>9 Jan 15:00</small></span></div>"
    );
}

#[test]
fn interval_is_read_fresh_on_every_render() {
    let store = IntervalStore::new(Interval::DAY);
    let chart = ChartLine::new(ChartLineProps::new(vec![queries()])).expect("chart");

    let hourly = chart.render(&store, &now()).expect("render");
    assert_eq!(hourly.formatter().pattern(), TimeLabelPattern::DayMonthHour);
    assert_eq!(hourly.series()[0].points[0].x_formatted, "9 Jan 15:00");

    store.set(Interval::new(30).expect("interval"));
    let daily = chart.render(&store, &now()).expect("render");
    assert_eq!(daily.formatter().pattern(), TimeLabelPattern::DayMonthYear);
    assert_eq!(daily.series()[0].points[0].x_formatted, "12 Dec 2023");
}

#[test]
fn render_now_reads_time_from_clock() {
    let chart = ChartLine::new(ChartLineProps::new(vec![queries()])).expect("chart");
    let rendered = chart
        .render_now(&Interval::DAY, &FixedClock(now()))
        .expect("render");

    assert_eq!(rendered.format_x(0.0).expect("label"), "9 Jan 15:00");
}

#[test]
fn css_named_and_functional_colors_are_accepted() {
    for (input, expected) in [
        ("cyan", Color::rgb(0.0, 1.0, 1.0)),
        ("steelblue", Color::rgb(70.0 / 255.0, 130.0 / 255.0, 180.0 / 255.0)),
        ("rgb(0, 0, 0)", Color::BLACK),
    ] {
        let props = ChartLineProps::new(vec![queries()]).with_color(input);
        let chart = ChartLine::new(props).expect(input);
        let rendered = chart.render(&Interval::DAY, &now()).expect("render");

        assert_eq!(rendered.options().colors, vec![input.to_owned()]);
        let frame = rendered.build_render_frame(None).expect("frame");
        assert!(frame.lines.iter().all(|line| line.color == expected), "{input}");
    }
}

#[test]
fn invalid_props_are_rejected() {
    let zero_size = ChartLineProps::new(vec![queries()]).with_size(0, 64);
    assert!(matches!(
        ChartLine::new(zero_size),
        Err(ChartError::InvalidViewport { width: 0, height: 64 })
    ));

    let bad_color = ChartLineProps::new(vec![queries()]).with_color("not-a-color");
    assert!(matches!(
        ChartLine::new(bad_color),
        Err(ChartError::InvalidInput(_))
    ));

    let duplicate = ChartLineProps::new(vec![queries(), queries()]);
    assert!(matches!(
        ChartLine::new(duplicate),
        Err(ChartError::InvalidInput(_))
    ));

    let unordered = ChartLineProps::new(vec![Series::new(
        "unordered",
        vec![DataPoint::new(2.0, 1.0), DataPoint::new(1.0, 1.0)],
    )]);
    assert!(matches!(
        ChartLine::new(unordered),
        Err(ChartError::InvalidInput(_))
    ));

    let non_finite = ChartLineProps::new(vec![Series::new(
        "nan",
        vec![DataPoint::new(0.0, f64::NAN)],
    )]);
    assert!(matches!(
        ChartLine::new(non_finite),
        Err(ChartError::InvalidInput(_))
    ));
}

use serde::{Deserialize, Serialize};

use crate::interaction::Slice;
use crate::render::{Color, TextHAlign, TextPrimitive};

pub const TOOLTIP_CLASS: &str = "line__tooltip";
pub const TOOLTIP_TEXT_CLASS: &str = "line__tooltip-text";

const VALUE_FONT_SIZE_PX: f64 = 12.0;
const LABEL_FONT_SIZE_PX: f64 = 10.0;
const LINE_GAP_PX: f64 = 2.0;

/// Tooltip body: the hovered value in bold above its time label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub value: String,
    pub label: String,
}

impl TooltipContent {
    /// Markup for HTML hosts. Both strings are escaped.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!(
            "<div class=\"{TOOLTIP_CLASS}\"><span class=\"{TOOLTIP_TEXT_CLASS}\"><strong>{}</strong><br /><small>{}</small></span></div>",
            escape_html(&self.value),
            escape_html(&self.label),
        )
    }

    /// Text primitives stacked at the top of the chart, centered on `x_px`.
    #[must_use]
    pub fn text_primitives(&self, x_px: f64) -> [TextPrimitive; 2] {
        let value_y = VALUE_FONT_SIZE_PX;
        let label_y = value_y + LINE_GAP_PX + LABEL_FONT_SIZE_PX;
        [
            TextPrimitive::new(
                self.value.clone(),
                x_px,
                value_y,
                VALUE_FONT_SIZE_PX,
                Color::BLACK,
                TextHAlign::Center,
            )
            .bold(),
            TextPrimitive::new(
                self.label.clone(),
                x_px,
                label_y,
                LABEL_FONT_SIZE_PX,
                Color::BLACK,
                TextHAlign::Center,
            ),
        ]
    }
}

/// Builds the tooltip of a hovered slice from its first point only.
///
/// Other points of a multi-series slice are ignored. Returns `None` when the
/// slice holds no points.
#[must_use]
pub fn render_slice_tooltip(slice: &Slice) -> Option<TooltipContent> {
    let first = slice.points.first()?;
    Some(TooltipContent {
        value: first.data.y_formatted.clone(),
        label: first.data.x_formatted.clone(),
    })
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

use std::fmt;

use chrono::TimeZone;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ChartError, ChartResult};
use crate::interaction::FormattedSeries;

use super::{ChartLineOptions, ChartLineProps, RenderedChart};

pub const WIDGET_PAYLOAD_JSON_SCHEMA_V1: u32 = 1;

/// Options plus formatted data, as handed to an out-of-process widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetPayloadJsonContractV1 {
    pub schema_version: u32,
    pub options: ChartLineOptions,
    pub data: Vec<FormattedSeries>,
}

impl ChartLineProps {
    /// Parses and validates props from JSON.
    ///
    /// A missing `data` field, a non-array `data`, or points that are not
    /// `{x, y}` number pairs yield [`ChartError::InvalidInput`].
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let value: Value = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidInput(format!("failed to parse props json: {e}")))?;
        Self::from_json_value(value)
    }

    pub fn from_json_value(value: Value) -> ChartResult<Self> {
        match value.get("data") {
            None | Some(Value::Null) => {
                return Err(ChartError::InvalidInput(
                    "props field `data` is required".to_owned(),
                ));
            }
            Some(Value::Array(_)) => {}
            Some(other) => {
                return Err(ChartError::InvalidInput(format!(
                    "props field `data` must be an array of series, got {}",
                    json_kind(other)
                )));
            }
        }

        let props: Self = serde_json::from_value(value)
            .map_err(|e| ChartError::InvalidInput(format!("malformed props: {e}")))?;
        props.validate()?;
        Ok(props)
    }
}

impl ChartLineOptions {
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize chart options json: {e}"))
        })
    }
}

impl<Tz> RenderedChart<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    #[must_use]
    pub fn widget_payload(&self) -> WidgetPayloadJsonContractV1 {
        WidgetPayloadJsonContractV1 {
            schema_version: WIDGET_PAYLOAD_JSON_SCHEMA_V1,
            options: self.options().clone(),
            data: self.series().to_vec(),
        }
    }

    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self.widget_payload()).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize widget payload v1: {e}"))
        })
    }
}

impl WidgetPayloadJsonContractV1 {
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse widget payload json: {e}"))
        })?;
        if payload.schema_version != WIDGET_PAYLOAD_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported widget payload schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

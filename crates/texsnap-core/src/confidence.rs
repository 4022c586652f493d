//! Confidence scores reported by the recognition service
//!
//! Scores arrive either as JSON numbers or as numeric strings. They are parsed
//! as plain decimals; anything else is an error, never evaluated.

use serde_json::Value;

use crate::error::ParseError;

pub fn parse_confidence(text: &str) -> Result<f32, ParseError> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ParseError::NotANumber(trimmed.to_string()))?;
    check_range(value)
}

pub fn confidence_from_json(value: &Value) -> Result<f32, ParseError> {
    match value {
        Value::Number(number) => number
            .as_f64()
            .ok_or_else(|| ParseError::NotANumber(number.to_string()))
            .and_then(check_range),
        Value::String(text) => parse_confidence(text),
        other => Err(ParseError::NotANumber(other.to_string())),
    }
}

fn check_range(value: f64) -> Result<f32, ParseError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(ParseError::OutOfRange(value));
    }
    Ok(value as f32)
}

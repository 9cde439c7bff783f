// backend error bodies look like:
// {"detail":"Time slot not available"}
// {"detail":[{"loc":["body","start_at"],"msg":"invalid datetime format","type":"value_error.datetime"}]}

use core::fmt;
use std::{convert::Infallible, str::FromStr};

use serde::Deserialize;
use serde_json::Value;

const SLOT_UNAVAILABLE: &str = "Time slot not available";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectionInfo {
    SlotUnavailable,
    Detail(String),
    Validation(Vec<FieldViolation>),
    UnParsed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FromStr for RejectionInfo {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(parsed) = s.parse::<ParsedBody>() {
            if let Ok(info) = Self::try_from(parsed) {
                return Ok(info);
            }
        }
        Ok(Self::UnParsed(s.to_string()))
    }
}

impl fmt::Display for RejectionInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectionInfo::SlotUnavailable => write!(f, "{}", SLOT_UNAVAILABLE),
            RejectionInfo::Detail(s) | RejectionInfo::UnParsed(s) => write!(f, "{}", s),
            RejectionInfo::Validation(violations) => {
                let joined = violations
                    .iter()
                    .map(|v| format!("{}: {}", v.field, v.message))
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "{}", joined)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ParsedBody {
    detail: Value,
}

impl FromStr for ParsedBody {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(|_| ())
    }
}

impl TryFrom<ParsedBody> for RejectionInfo {
    type Error = ();

    fn try_from(value: ParsedBody) -> Result<Self, Self::Error> {
        match value.detail {
            Value::String(s) if s == SLOT_UNAVAILABLE => Ok(Self::SlotUnavailable),
            Value::String(s) => Ok(Self::Detail(s)),
            Value::Array(items) => Ok(Self::Validation(
                items
                    .iter()
                    .map(FieldViolation::try_from)
                    .collect::<Result<_, _>>()?,
            )),
            _ => Err(()),
        }
    }
}

impl TryFrom<&Value> for FieldViolation {
    type Error = ();

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        let message = value.get("msg").and_then(Value::as_str).ok_or(())?;
        // the last loc segment names the offending field
        let field = match value.get("loc").and_then(Value::as_array).and_then(|l| l.last()) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        };

        Ok(Self {
            field,
            message: message.to_string(),
        })
    }
}

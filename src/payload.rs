use std::io::BufRead;

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("no input line on stdin")]
    InputAbsent,

    #[error("input is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("unexpected payload shape: {0}")]
    ShapeMismatch(&'static str),

    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Reads a single line, leaving anything after it unread.
pub fn read_first_line<R: BufRead>(mut reader: R) -> Result<String, PayloadError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PayloadError::InputAbsent);
    }
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

/// A request/response pair as handed to middleware. Only `response` is
/// required to exist; everything else passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    root: Map<String, Value>,
}

impl Payload {
    pub fn parse(line: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(line).map_err(PayloadError::Malformed)?;
        Self::try_from(value)
    }

    pub fn response_status(&self) -> Option<&Value> {
        self.root.get("response")?.get("status")
    }

    pub fn set_response_status(&mut self, code: u16) {
        // shape is checked on construction
        if let Some(Value::Object(response)) = self.root.get_mut("response") {
            response.insert("status".to_string(), Value::from(code));
        }
    }

    pub fn to_line(&self) -> Result<String, PayloadError> {
        serde_json::to_string(&self.root).map_err(PayloadError::Encode)
    }
}

impl TryFrom<Value> for Payload {
    type Error = PayloadError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Object(root) = value else {
            return Err(PayloadError::ShapeMismatch("top level is not an object"));
        };
        match root.get("response") {
            Some(Value::Object(_)) => Ok(Self { root }),
            Some(_) => Err(PayloadError::ShapeMismatch("`response` is not an object")),
            None => Err(PayloadError::ShapeMismatch("missing `response`")),
        }
    }
}

//! Opaque caller-supplied values carried by records.
//!
//! Neither type is ever interpreted by the chain. They exist so the record
//! API can say what it accepts and so both serialize losslessly into
//! exports.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::canonical::to_canonical_string;
use crate::error::ChainResult;

// ---------------------------------------------------------------------------
// Timestamp
// ---------------------------------------------------------------------------

/// When a record claims to have been created.
///
/// Either free text (`"02/10/2024"`) or any JSON number: Unix milliseconds,
/// fractional seconds, whatever the caller uses. Serialized untagged, so
/// exports show a plain string or number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Timestamp {
    Numeric(Number),
    Text(String),
}

impl Timestamp {
    /// Current wall-clock time as Unix milliseconds.
    pub fn now() -> Self {
        Timestamp::Numeric(Number::from(chrono::Utc::now().timestamp_millis()))
    }

    /// Numeric timestamp from a float. `None` for NaN and infinities, which
    /// JSON cannot carry.
    pub fn from_f64(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Timestamp::Numeric)
    }

    /// JSON form used in the digest preimage.
    pub fn to_value(&self) -> Value {
        match self {
            Timestamp::Numeric(n) => Value::Number(n.clone()),
            Timestamp::Text(s) => Value::String(s.clone()),
        }
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Timestamp::Numeric(n) => write!(f, "{}", n),
            Timestamp::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Timestamp {
    fn from(s: &str) -> Self {
        Timestamp::Text(s.to_string())
    }
}

impl From<String> for Timestamp {
    fn from(s: String) -> Self {
        Timestamp::Text(s)
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Timestamp::Numeric(Number::from(ms))
    }
}

impl From<u64> for Timestamp {
    fn from(ms: u64) -> Self {
        Timestamp::Numeric(Number::from(ms))
    }
}

impl From<Number> for Timestamp {
    fn from(n: Number) -> Self {
        Timestamp::Numeric(n)
    }
}

// ---------------------------------------------------------------------------
// Payload
// ---------------------------------------------------------------------------

/// Arbitrary structured or scalar data stored in a record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(Value);

impl Payload {
    pub fn new(value: Value) -> Self {
        Payload(value)
    }

    /// Convert any serializable value into a payload.
    ///
    /// # Errors
    ///
    /// Fails when `value` has no JSON representation, e.g. a map keyed by
    /// tuples.
    pub fn from_serializable<T: Serialize>(value: &T) -> ChainResult<Self> {
        Ok(Payload(serde_json::to_value(value)?))
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Canonical JSON text of the payload, as hashed.
    pub fn canonical_string(&self) -> String {
        to_canonical_string(&self.0)
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        Payload(value)
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload(Value::String(s.to_string()))
    }
}

impl From<String> for Payload {
    fn from(s: String) -> Self {
        Payload(Value::String(s))
    }
}

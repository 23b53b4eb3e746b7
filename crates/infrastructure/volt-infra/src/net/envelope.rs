use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use volt_core::{ApiError, ResourceResult};

/// `{"status": "success"|"error", "message"?: ..., ...payload}` as every endpoint returns it.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub status: Option<String>,
    pub message: Option<String>,
    pub body: Map<String, Value>,
}

impl Envelope {
    pub fn parse(bytes: &[u8]) -> ResourceResult<Self> {
        let value: Value = serde_json::from_slice(bytes)
            .map_err(|e| ApiError::Decode(format!("response is not JSON: {e}")))?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> ResourceResult<Self> {
        let Value::Object(body) = value else {
            return Err(ApiError::Decode("response is not a JSON object".into()));
        };
        let status = body.get("status").and_then(Value::as_str).map(str::to_owned);
        let message = body.get("message").and_then(Value::as_str).map(str::to_owned);
        Ok(Self {
            status,
            message,
            body,
        })
    }

    /// Success envelopes pass through; `status:"error"` and a missing discriminator do not.
    pub fn into_result(self) -> ResourceResult<Value> {
        match self.status.as_deref() {
            Some("success") => Ok(Value::Object(self.body)),
            Some("error") => Err(ApiError::application(self.message)),
            Some(other) => Err(ApiError::Decode(format!("unexpected status {other:?}"))),
            None => Err(ApiError::Decode("response missing status field".into())),
        }
    }
}

/// Decode the whole envelope object (extra keys such as `status` are ignored by the target type).
pub fn decode_envelope<T: DeserializeOwned>(value: Value) -> ResourceResult<T> {
    serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode one payload key, e.g. `rides` out of `{"status":"success","rides":[...]}`.
pub fn decode_field<T: DeserializeOwned>(mut value: Value, key: &str) -> ResourceResult<T> {
    let field = value
        .get_mut(key)
        .map(Value::take)
        .ok_or_else(|| ApiError::Decode(format!("response missing `{key}`")))?;
    serde_json::from_value(field).map_err(|e| ApiError::Decode(format!("`{key}`: {e}")))
}

/// Like [`decode_field`] but an absent or null key yields `T::default()`.
pub fn decode_field_or_default<T: DeserializeOwned + Default>(
    mut value: Value,
    key: &str,
) -> ResourceResult<T> {
    match value.get_mut(key).map(Value::take) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(field) => {
            serde_json::from_value(field).map_err(|e| ApiError::Decode(format!("`{key}`: {e}")))
        }
    }
}

//! Response envelope shared by the HTTP layer and its clients.

use serde::{Serialize, Serializer};

/// Payload sent when the requested data has not been produced yet.
pub const WAITING: &str = "waiting";

/// `{statusCode, data, message, success}` with `success = statusCode < 400`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiEnvelope<T> {
    pub status_code: u16,
    pub data: Option<T>,
    pub message: String,
    pub success: bool,
}

impl<T> ApiEnvelope<T> {
    pub fn new(status_code: u16, data: Option<T>, message: impl Into<String>) -> Self {
        Self {
            status_code,
            data,
            message: message.into(),
            success: status_code < 400,
        }
    }

    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(200, Some(data), message)
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(201, Some(data), message)
    }

    pub fn error(status_code: u16, message: impl Into<String>) -> Self {
        Self::new(status_code, None, message)
    }
}

/// Data that may still be pending. `Waiting` serializes as the literal
/// string `"waiting"`.
#[derive(Debug, Clone, PartialEq)]
pub enum Availability<T> {
    Ready(T),
    Waiting,
}

impl<T> Availability<T> {
    pub fn is_waiting(&self) -> bool {
        matches!(self, Availability::Waiting)
    }
}

impl<T> From<Option<T>> for Availability<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Availability::Waiting, Availability::Ready)
    }
}

impl<T: Serialize> Serialize for Availability<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Availability::Ready(value) => value.serialize(serializer),
            Availability::Waiting => serializer.serialize_str(WAITING),
        }
    }
}

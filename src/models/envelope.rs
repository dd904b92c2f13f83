//! Response envelope shared by all endpoints.
//!
//! Every response body has the shape `{status, message?, data?}` where
//! `status` is `"success"` or `"fail"`.

use serde::Serialize;
use utoipa::ToSchema;

/// Envelope carrying a data payload
#[derive(Serialize, ToSchema)]
pub struct Envelope<T>
where
    T: for<'a> ToSchema<'a>,
{
    /// "success" or "fail"
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
}

impl<T> Envelope<T>
where
    T: for<'a> ToSchema<'a>,
{
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            message: None,
            data,
        }
    }

    pub fn success_with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            status: "success",
            message: Some(message.into()),
            data,
        }
    }
}

/// Envelope for outcomes that carry only a message: update and delete
/// successes, and every failure
#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    /// "success" or "fail"
    pub status: &'static str,
    pub message: String,
}

impl MessageResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self {
            status: "fail",
            message: message.into(),
        }
    }
}

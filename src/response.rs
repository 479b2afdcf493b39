use std::fmt;

/// Result of a successful invocation
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Response {
    /// Id of the process serving the invocation
    #[serde(rename = "PID")]
    pub process_id: u32,
    /// Number of invocations this process has handled, including this one
    #[serde(rename = "Count")]
    pub count: u64,
    /// Request id provided by the lambda runtime
    #[serde(rename = "AwsRequestID")]
    pub request_id: String,
}

/// Renders the response as its JSON wire representation. Used as error
/// message for [`ErrorResponse`] and [`PanicResponse`].
impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Returned as error when the event requests a failure via `DoError`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
#[error("{0}")]
pub struct ErrorResponse(pub Response);

/// Payload of the panic raised when the event requests it via `DoPanic`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
#[error("{0}")]
pub struct PanicResponse(pub Response);

impl PanicResponse {
    /// Recovers a [`PanicResponse`] from a caught panic payload. Returns
    /// the payload unchanged if the panic was raised for another reason.
    pub fn from_panic(
        payload: Box<dyn std::any::Any + Send>,
    ) -> Result<Self, Box<dyn std::any::Any + Send>> {
        payload.downcast::<Self>().map(|panic| *panic)
    }
}

/// Failed invocation, as reported back to the lambda runtime
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    /// Handler returned an [`ErrorResponse`]
    #[error(transparent)]
    Error(#[from] ErrorResponse),
    /// Handler panicked with a [`PanicResponse`]
    #[error(transparent)]
    Panic(#[from] PanicResponse),
}

impl Failure {
    /// `errorType` reported to the runtime
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Error(_) => "errorResponse",
            Self::Panic(_) => "panicResponse",
        }
    }

    /// Response which was assembled before the invocation failed
    pub const fn response(&self) -> &Response {
        match self {
            Self::Error(ErrorResponse(response)) | Self::Panic(PanicResponse(response)) => response,
        }
    }
}

impl From<Failure> for lambda_runtime::Diagnostic {
    fn from(failure: Failure) -> Self {
        Self {
            error_type: failure.error_type().to_owned(),
            error_message: failure.to_string(),
        }
    }
}

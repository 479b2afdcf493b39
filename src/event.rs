/// `Event` which is send to the lambda on every invocation.
///
/// All fields are optional on the wire and fall back to their
/// defaults, so `{}` is a valid event which returns immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Event {
    /// Seconds to sleep before producing an outcome
    #[serde(rename = "WaitSeconds", default)]
    pub wait_seconds: u64,
    /// Return an [`crate::ErrorResponse`] instead of a plain response
    #[serde(rename = "DoError", default)]
    pub do_error: bool,
    /// Panic with a [`crate::PanicResponse`]. Takes precedence over `do_error`
    #[serde(rename = "DoPanic", default)]
    pub do_panic: bool,
}

impl Event {
    /// Simulated work duration of this event
    pub const fn wait(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.wait_seconds)
    }
}

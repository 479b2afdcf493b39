use crate::{ErrorResponse, Event, PanicResponse, Response};
use std::sync::atomic::{AtomicU64, Ordering};

/// Source of the per invocation request id.
///
/// Implemented for [`lambda_runtime::Context`] and plain request ids
/// (`str`). An empty id counts as missing.
pub trait InvocationContext {
    /// Request id of the current invocation, if the runtime provided one
    fn request_id(&self) -> Option<&str>;
}

impl InvocationContext for lambda_runtime::Context {
    fn request_id(&self) -> Option<&str> {
        Some(self.request_id.as_str()).filter(|id| !id.is_empty())
    }
}

impl InvocationContext for str {
    fn request_id(&self) -> Option<&str> {
        Some(self).filter(|id| !id.is_empty())
    }
}

/// Handles invocations of a single execution environment.
///
/// Create exactly one instance per process. The invocation counter lives
/// inside the handler, so its lifetime matches the process serving the
/// lambda.
#[derive(Debug)]
pub struct Handler {
    process_id: u32,
    invocations: AtomicU64,
}

impl Default for Handler {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler {
    /// Creates a handler for the current process with a zero counter
    pub fn new() -> Self {
        Self {
            process_id: std::process::id(),
            invocations: AtomicU64::new(0),
        }
    }

    /// Number of invocations counted so far
    pub fn invocations(&self) -> u64 {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Handles a single invocation.
    ///
    /// Sleeps for `event.wait_seconds` and afterwards either returns the
    /// [`Response`], an [`ErrorResponse`] if `event.do_error` is set, or
    /// panics with a [`PanicResponse`] if `event.do_panic` is set.
    ///
    /// # Panics
    ///
    /// Panics with a [`PanicResponse`] payload if requested by the event,
    /// and with a plain message if `context` carries no request id. In the
    /// latter case the counter is left untouched.
    pub async fn handle<C>(&self, context: &C, event: Event) -> Result<Response, ErrorResponse>
    where
        C: InvocationContext + ?Sized,
    {
        let request_id = match context.request_id() {
            Some(request_id) => request_id.to_owned(),
            None => panic!("failed to get Lambda context"),
        };
        let count = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;

        log::info!(
            "PID {} received event. AwsRequestID: {}",
            self.process_id,
            request_id
        );
        let response = Response {
            process_id: self.process_id,
            count,
            request_id,
        };

        // Simulated work
        tokio::time::sleep(event.wait()).await;

        if event.do_panic {
            std::panic::panic_any(PanicResponse(response));
        }
        if event.do_error {
            return Err(ErrorResponse(response));
        }
        Ok(response)
    }
}

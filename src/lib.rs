//! This crate provides a lambda function which reports which execution
//! environment served an invocation. Every response contains the process
//! id, the number of invocations this process has handled so far and the
//! request id. It is meant to make cold starts, environment reuse and the
//! error reporting of the lambda runtime visible.
//!
//! # Event
//!
//! ```json
//! { "WaitSeconds": 2, "DoError": false, "DoPanic": false }
//! ```
//!
//! All fields are optional. `WaitSeconds` simulates work by sleeping before
//! the outcome is produced. `DoError` makes the lambda return an
//! [`ErrorResponse`], `DoPanic` makes it panic with a [`PanicResponse`].
//! If both are set, the lambda panics.
//!
//! # Response
//!
//! ```json
//! { "PID": 8, "Count": 1, "AwsRequestID": "5bd3e7f1-4b3a-4e5c-9a9c-5f0e2a4c1c1d" }
//! ```
//!
//! Failures carry the same document as `errorMessage`. The `errorType` is
//! either `errorResponse` or `panicResponse`, so callers can tell which
//! path was taken.
//!
//! # Usage
//!
//! ```no_run
//! pub fn main() -> anyhow::Result<()> {
//!     lambda_pid_counter::exec_tokio()
//! }
//! ```
//!
//! # Cold start
//!
//! Before the runtime starts polling for events, [`exec`] sleeps for
//! [`COLD_START`]. This happens once per execution environment.
//!
//! # Local testing
//!
//! With the `test` feature enabled, `exec_test` runs a list of events
//! through a fresh [`Handler`] without any lambda runtime involved:
//!
//! ```ignore
//! let outcomes = lambda_pid_counter::exec_test(
//!     r#"{ "invocations": [{ "WaitSeconds": 1 }, { "DoError": true }] }"#,
//! )?;
//! assert_eq!(outcomes.len(), 2);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!

#![warn(
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    deprecated_in_future,
    elided_lifetimes_in_paths,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    non_ascii_idents,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unstable_features,
    unused_crate_dependencies,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications,
    unused_results,
    variant_size_differences
)]
#![warn(
    clippy::correctness,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cargo,
    clippy::nursery
)]
#![allow(clippy::multiple_crate_versions, clippy::future_not_send)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod event;
mod handler;
mod response;

pub use config::{Config, COLD_START, LOG_LEVEL_ENV};
pub use event::Event;
pub use handler::{Handler, InvocationContext};
pub use response::{ErrorResponse, Failure, PanicResponse, Response};

/// Lambda entrypoint. This function sets up a tokio
/// multi-thread runtime and executes [`exec`]. If you
/// already have your own runtime, use the [`exec`]
/// function.
pub fn exec_tokio() -> anyhow::Result<()> {
    use anyhow::Context;
    use tokio::runtime::Builder;

    Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Unable to build tokio runtime")?
        .block_on(exec())
}

/// Lambda entrypoint. This function requires a
/// running tokio runtime. Alternativly use [`exec_tokio`]
/// which creates one.
///
/// Sets up logging, waits for the cold start to pass and
/// then serves invocations until the runtime shuts down.
pub async fn exec() -> anyhow::Result<()> {
    use anyhow::anyhow;
    use lambda_runtime::{service_fn, LambdaEvent};

    let config = Config::from_env()?;
    setup(&config)?;
    let handler = bootstrap(&config).await;

    log::info!("Starting lambda runtime");
    let handler_ref = &handler;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Event>| async move {
        run(handler_ref, &event.context, event.payload).await
    }))
    .await
    .map_err(|e| anyhow!(e))
}

/// Prepares the execution environment: waits for the cold start
/// and creates the [`Handler`] serving all invocations of this
/// process. Call exactly once per process.
pub async fn bootstrap(config: &Config) -> Handler {
    log::info!("Simulating cold start of {:?}", config.cold_start);
    tokio::time::sleep(config.cold_start).await;
    Handler::new()
}

fn setup(config: &Config) -> anyhow::Result<()> {
    use anyhow::Context;

    simple_logger::SimpleLogger::new()
        .with_level(config.log_level)
        .init()
        .context("Unable to setup logging")
}

/// Runs a single invocation on `handler` and turns its outcome into the
/// result reported to the lambda runtime.
///
/// A panic carrying a [`PanicResponse`] is caught and returned as
/// [`Failure::Panic`]. Any other panic is resumed.
pub async fn run<C>(handler: &Handler, context: &C, event: Event) -> Result<Response, Failure>
where
    C: InvocationContext + ?Sized,
{
    use futures::FutureExt;
    use std::panic::{self, AssertUnwindSafe};

    log::debug!("Received lambda invocation with event: {:?}", event);
    let res = match AssertUnwindSafe(handler.handle(context, event))
        .catch_unwind()
        .await
    {
        Ok(res) => res.map_err(Failure::from),
        Err(payload) => match PanicResponse::from_panic(payload) {
            Ok(panic) => Err(Failure::from(panic)),
            Err(payload) => panic::resume_unwind(payload),
        },
    };
    log::debug!("Completed lambda invocation");
    if let Err(err) = &res {
        log::error!("{}: {}", err.error_type(), err);
    }
    res
}

/// TestData which can be used to test lambda invocations
/// locally in combination with [`exec_test`].
#[derive(serde::Deserialize, Clone, Debug)]
#[cfg(feature = "test")]
#[cfg_attr(docsrs, doc(cfg(feature = "test")))]
pub struct TestData {
    invocations: Vec<Event>,
}

/// Lambda entrypoint for local tests. Runs all invocations
/// of `test_data` in order on a single fresh [`Handler`],
/// as if they were served by the same execution environment.
///
/// Neither logging nor the cold start are set up. Every
/// invocation gets a random request id.
#[cfg(feature = "test")]
#[cfg_attr(docsrs, doc(cfg(feature = "test")))]
pub fn exec_test(test_data: &str) -> anyhow::Result<Vec<Result<Response, Failure>>> {
    use anyhow::Context;
    use tokio::runtime::Builder;

    log::info!("Creating tokio runtime");
    Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Unable to build tokio runtime")?
        .block_on(async {
            log::info!("Starting lambda test runtime");
            let test_data: TestData =
                serde_json::from_str(test_data).context("Unable to deserialize test_data")?;
            let handler = Handler::new();

            let mut outcomes = Vec::with_capacity(test_data.invocations.len());
            for (i, event) in test_data.invocations.into_iter().enumerate() {
                let request_id = uuid::Uuid::new_v4().to_string();
                log::info!("Invocation: {}", i);
                let res = run(&handler, request_id.as_str(), event).await;
                log::info!("{:?}", res);
                outcomes.push(res);
            }
            Ok(outcomes)
        })
}

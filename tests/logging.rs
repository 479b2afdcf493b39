use lambda_pid_counter::{Event, Handler};
use std::sync::Mutex;
use std::time::{Duration, Instant};

const MOCKED_UUID: &str = "00000000-0000-0000-0000-000000000000";

struct Record {
    level: log::Level,
    message: String,
    at: Instant,
}

struct CaptureLogger {
    records: Mutex<Vec<Record>>,
}

impl log::Log for CaptureLogger {
    fn enabled(&self, _metadata: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        if !record.target().starts_with("lambda_pid_counter::handler") {
            return;
        }
        self.records
            .lock()
            .expect("Poisoned log capture")
            .push(Record {
                level: record.level(),
                message: record.args().to_string(),
                at: Instant::now(),
            });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger {
    records: Mutex::new(Vec::new()),
};

fn take_records() -> Vec<Record> {
    std::mem::take(&mut *LOGGER.records.lock().expect("Poisoned log capture"))
}

// Single test, as the logger is process wide
#[tokio::test]
async fn test_one_info_record_before_work() {
    use futures::FutureExt;
    use std::panic::AssertUnwindSafe;

    log::set_logger(&LOGGER).expect("Unable to setup logging");
    log::set_max_level(log::LevelFilter::Trace);

    let handler = Handler::new();
    let event = Event {
        wait_seconds: 1,
        ..Event::default()
    };
    let start = Instant::now();
    let _response = handler
        .handle(MOCKED_UUID, event)
        .await
        .expect("Unable to handle invocation");
    assert!(start.elapsed() >= Duration::from_secs(1));

    let records = take_records();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.level, log::Level::Info);
    assert!(record.message.contains(&std::process::id().to_string()));
    assert!(record.message.contains(MOCKED_UUID));
    assert!(record.at < start + Duration::from_secs(1));

    let payload = AssertUnwindSafe(handler.handle("", Event::default()))
        .catch_unwind()
        .await
        .expect_err("Expected a panic");
    drop(payload);
    assert!(take_records().is_empty());
    assert_eq!(handler.invocations(), 1);
}

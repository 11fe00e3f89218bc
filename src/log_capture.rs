//! Per-thread capture of `log` records for unit tests
//!
//! The logger is installed once for the whole test binary. Records are kept
//! in a thread-local buffer, so tests running in parallel only see what
//! their own thread emitted.

use std::cell::RefCell;
use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};

thread_local! {
    static RECORDS: RefCell<Vec<(Level, String)>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl Log for CaptureLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        RECORDS.with(|records| {
            records
                .borrow_mut()
                .push((record.level(), record.args().to_string()))
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INSTALL: Once = Once::new();

/// Run `f` and return the warning messages it logged on this thread
pub(crate) fn warnings_from<F: FnOnce()>(f: F) -> Vec<String> {
    INSTALL.call_once(|| {
        if log::set_logger(&LOGGER).is_ok() {
            log::set_max_level(LevelFilter::Warn);
        }
    });

    RECORDS.with(|records| records.borrow_mut().clear());
    f();

    RECORDS.with(|records| {
        records
            .borrow_mut()
            .drain(..)
            .filter(|(level, _)| *level == Level::Warn)
            .map(|(_, message)| message)
            .collect()
    })
}

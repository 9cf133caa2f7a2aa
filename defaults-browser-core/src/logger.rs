//! Bridge from the `log` facade to a host-supplied logger.
//!
//! The inspector logs through the `log` crate. Embedding apps install a
//! [`Logger`] once with [`set_logger`] to receive those records in their own
//! logging system (e.g. `os_log` on iOS).

use std::sync::{Arc, OnceLock};

/// Receiver for log messages emitted by the inspector.
///
/// # Examples
///
/// ```rust
/// use defaults_browser_core::logger::{LogLevel, Logger};
///
/// struct ConsoleLogger;
///
/// impl Logger for ConsoleLogger {
///     fn log(&self, level: LogLevel, message: String) {
///         println!("[{level:?}] {message}");
///     }
/// }
/// ```
#[cfg_attr(feature = "ffi", uniffi::export(with_foreign))]
pub trait Logger: Sync + Send {
    /// Logs `message` at `level`.
    fn log(&self, level: LogLevel, message: String);
}

/// Severity of a forwarded log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "ffi", derive(uniffi::Enum))]
pub enum LogLevel {
    /// Very detailed tracing output.
    Trace,
    /// Debugging information.
    Debug,
    /// Progress of the inspector, such as exported rows.
    Info,
    /// Potentially surprising situations, such as unsupported value types.
    Warn,
    /// Failures.
    Error,
}

impl From<log::Level> for LogLevel {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Self::Error,
            log::Level::Warn => Self::Warn,
            log::Level::Info => Self::Info,
            log::Level::Debug => Self::Debug,
            log::Level::Trace => Self::Trace,
        }
    }
}

static LOGGER_INSTANCE: OnceLock<Arc<dyn Logger>> = OnceLock::new();

struct ForeignLogger;

/// Debug and Trace records are only forwarded when they originate from this crate.
fn should_forward(module_path: Option<&str>, level: log::Level) -> bool {
    let is_verbose = matches!(level, log::Level::Debug | log::Level::Trace);
    let is_own_record = module_path.is_some_and(|path| path.starts_with("defaults_browser"));
    !is_verbose || is_own_record
}

impl log::Log for ForeignLogger {
    fn enabled(&self, _metadata: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        if !should_forward(record.module_path(), record.level()) {
            return;
        }

        if let Some(logger) = LOGGER_INSTANCE.get() {
            logger.log(record.level().into(), record.args().to_string());
        } else {
            eprintln!("Logger not set: {}", record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs the host logger and routes `log` records to it.
///
/// Only the first call has an effect; later calls are ignored.
#[cfg_attr(feature = "ffi", uniffi::export)]
pub fn set_logger(logger: Arc<dyn Logger>) {
    if LOGGER_INSTANCE.set(logger).is_err() {
        eprintln!("Logger already set");
        return;
    }

    if let Err(e) = init_logger() {
        eprintln!("Failed to set logger: {e}");
    }
}

fn init_logger() -> Result<(), log::SetLoggerError> {
    static LOGGER: ForeignLogger = ForeignLogger;
    log::set_logger(&LOGGER)?;
    log::set_max_level(log::LevelFilter::Trace);
    Ok(())
}

//! Injected diagnostics sink, replacing a process-global Tracer singleton
//! with a callback owned by the `Decoder` instance.

/// Severity, preserving the wire-compatible 0..4 numeric mapping of the
/// legacy Tracer even though only `Silent` and `Error` are currently
/// produced by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Silent = 0,
    Error = 1,
    Warning = 2,
    Info = 3,
    Debug = 4,
}

const MAX_MESSAGE_LEN: usize = 1024;

/// A diagnostics sink. Implementations that are not internally
/// synchronized must not be shared across threads without external
/// serialization.
pub trait Diagnostics {
    fn log(&self, level: LogLevel, message: &str);
}

/// Forwards to the `log` crate's `warn!`/`error!` macros, the ambient
/// logging idiom used elsewhere in this codebase.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogCrateDiagnostics;

impl Diagnostics for LogCrateDiagnostics {
    fn log(&self, level: LogLevel, message: &str) {
        let truncated = truncate(message);
        match level {
            LogLevel::Silent => {}
            LogLevel::Error => log::error!("{truncated}"),
            LogLevel::Warning => log::warn!("{truncated}"),
            LogLevel::Info => log::info!("{truncated}"),
            LogLevel::Debug => log::debug!("{truncated}"),
        }
    }
}

fn truncate(message: &str) -> &str {
    if message.len() <= MAX_MESSAGE_LEN {
        message
    } else {
        let mut end = MAX_MESSAGE_LEN;
        while !message.is_char_boundary(end) {
            end -= 1;
        }
        &message[..end]
    }
}

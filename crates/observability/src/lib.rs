//! Process-wide logging setup.

pub mod subscriber;

pub use subscriber::LogFormat;

/// Initialize logging with the format named by `LOG_FORMAT` (JSON by default).
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    subscriber::init(LogFormat::from_env());
}

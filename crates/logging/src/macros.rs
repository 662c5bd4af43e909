//! crates/logging/src/macros.rs
//! Level-gated diagnostic macros.
//!
//! The flag is checked against the current thread's configuration before the
//! message is formatted, so disabled diagnostics cost one thread-local read.

/// Record a debug diagnostic when `flag` is enabled at `level` or higher.
///
/// ```
/// use logging::{DebugFlag, VerbosityConfig, debug_log, drain_events, init};
///
/// let mut config = VerbosityConfig::default();
/// config.debug.matching = 1;
/// init(config);
///
/// debug_log!(Match, 1, "matched {} blocks", 3);
/// debug_log!(Match, 2, "suppressed");
/// assert_eq!(drain_events().len(), 1);
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::debug_gte($crate::DebugFlag::$flag, $level) {
            $crate::emit_debug($crate::DebugFlag::$flag, $level, ::std::format!($($arg)+));
        }
    };
}

/// Record an info diagnostic when `flag` is enabled at `level` or higher.
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::info_gte($crate::InfoFlag::$flag, $level) {
            $crate::emit_info($crate::InfoFlag::$flag, $level, ::std::format!($($arg)+));
        }
    };
}

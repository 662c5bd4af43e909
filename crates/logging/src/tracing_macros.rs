//! crates/logging/src/tracing_macros.rs
//! Convenience macros wrapping tracing with the workspace's targets.
//!
//! Each target is understood by [`SyncLayer`](crate::SyncLayer).

/// Emit a checksum table trace.
///
/// # Example
/// ```ignore
/// trace_deltasum!("built {} entries", len);
/// ```
#[macro_export]
macro_rules! trace_deltasum {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "blocksync::deltasum", $($arg)*);
    };
}

/// Emit a block matching trace.
///
/// # Example
/// ```ignore
/// trace_match!("weak hit at offset {}", begin);
/// ```
#[macro_export]
macro_rules! trace_match {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "blocksync::match", $($arg)*);
    };
}

/// Emit a reassembly trace.
///
/// # Example
/// ```ignore
/// trace_recv!("committed {} bytes", len);
/// ```
#[macro_export]
macro_rules! trace_recv {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "blocksync::recv", $($arg)*);
    };
}

/// Emit a negotiation trace.
///
/// # Example
/// ```ignore
/// trace_proto!("restart: {}", reason);
/// ```
#[macro_export]
macro_rules! trace_proto {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "blocksync::proto", $($arg)*);
    };
}

/// Emit a statistics trace.
///
/// # Example
/// ```ignore
/// trace_stats!("transferred {} bytes", bytes);
/// ```
#[macro_export]
macro_rules! trace_stats {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "blocksync::stats", $($arg)*);
    };
}

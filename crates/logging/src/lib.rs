#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` implements the flag-based verbosity system shared by the
//! synchronization crates. Diagnostics are grouped into [`InfoFlag`] and
//! [`DebugFlag`] categories, each with its own level, and are recorded as
//! [`DiagnosticEvent`]s on the emitting thread.
//!
//! # Design
//!
//! - [`VerbosityConfig`] holds per-flag levels. It can be derived from a `-v`
//!   count with [`VerbosityConfig::from_verbose_level`] and refined with
//!   tokens such as `match2` or `all0`.
//! - The active configuration and the event buffer are thread-local; see
//!   [`init`], [`debug_gte`] and [`drain_events`].
//! - [`debug_log!`] and [`info_log!`] check the level before formatting.
//! - With the `tracing` feature, [`SyncLayer`] routes `tracing` events with
//!   `blocksync::<flag>` targets into the same buffer.
//!
//! # Examples
//!
//! ```
//! use logging::{DiagnosticEvent, VerbosityConfig, drain_events, info_log, init};
//!
//! init(VerbosityConfig::from_verbose_level(1));
//! info_log!(Stats, 1, "sent {} bytes", 512);
//!
//! let events = drain_events();
//! assert!(matches!(&events[..], [DiagnosticEvent::Info { .. }]));
//! assert_eq!(events[0].message(), "sent 512 bytes");
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;

#[cfg(feature = "tracing")]
mod tracing_bridge;
#[cfg(feature = "tracing")]
mod tracing_macros;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, MAX_BUFFERED_EVENTS, apply_debug_flag, apply_info_flag, current, debug_gte,
    drain_events, emit_debug, emit_info, info_gte, init,
};

#[cfg(feature = "tracing")]
pub use tracing_bridge::{SyncLayer, TARGET_PREFIX, init_tracing, init_tracing_with_filter};

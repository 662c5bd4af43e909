//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the verbosity flag system.
//!
//! [`SyncLayer`] is a tracing-subscriber layer that maps events to info and
//! debug flags by target. Events whose flag is enabled at the level implied
//! by their tracing level are recorded as [`DiagnosticEvent`]s on the current
//! thread, exactly as if they had been emitted through `debug_log!`.
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(VerbosityConfig::from_verbose_level(3));
//! tracing::debug!(target: "blocksync::match", "scanned window");
//! ```
//!
//! [`DiagnosticEvent`]: crate::DiagnosticEvent

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use super::thread_local::{debug_gte, emit_debug, emit_info, info_gte};
use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Target prefix shared by every diagnostic emitted from this workspace.
pub const TARGET_PREFIX: &str = "blocksync::";

/// A tracing layer that routes events into the verbosity flag system.
pub struct SyncLayer {
    config: VerbosityConfig,
}

impl SyncLayer {
    /// Create a layer carrying the given verbosity configuration.
    #[must_use]
    pub const fn new(config: VerbosityConfig) -> Self {
        Self { config }
    }

    /// Returns the configuration the layer was built with.
    #[must_use]
    pub const fn config(&self) -> &VerbosityConfig {
        &self.config
    }

    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> Option<InfoFlag> {
        let name = target.strip_prefix(TARGET_PREFIX).unwrap_or(target);
        InfoFlag::ALL.into_iter().find(|flag| flag.name() == name)
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        let name = target.strip_prefix(TARGET_PREFIX).unwrap_or(target);
        match name {
            "delta" | "signature" => Some(DebugFlag::Deltasum),
            "receiver" | "reassemble" => Some(DebugFlag::Recv),
            "sender" | "diff" => Some(DebugFlag::Send),
            "protocol" | "session" => Some(DebugFlag::Proto),
            other => DebugFlag::ALL.into_iter().find(|flag| flag.name() == other),
        }
    }

    /// Map a tracing level to a verbosity level.
    const fn level_to_verbosity_level(level: &Level) -> u8 {
        match *level {
            Level::ERROR | Level::WARN | Level::INFO => 1,
            Level::DEBUG => 2,
            Level::TRACE => 3,
        }
    }
}

impl<S> Layer<S> for SyncLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let target = metadata.target();
        let verbosity_level = Self::level_to_verbosity_level(metadata.level());

        if let Some(debug_flag) = Self::target_to_debug_flag(target) {
            if debug_gte(debug_flag, verbosity_level) {
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    emit_debug(debug_flag, verbosity_level, message);
                }
            }
            return;
        }

        if let Some(info_flag) = Self::target_to_info_flag(target) {
            if info_gte(info_flag, verbosity_level) {
                let mut visitor = MessageVisitor::default();
                event.record(&mut visitor);
                if let Some(message) = visitor.message {
                    emit_info(info_flag, verbosity_level, message);
                }
            }
        }
    }
}

/// Visitor to extract the message from a tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Install a global subscriber that routes events through [`SyncLayer`].
///
/// Also initializes the calling thread's verbosity configuration.
pub fn init_tracing(config: VerbosityConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    tracing_subscriber::registry()
        .with(SyncLayer::new(config))
        .init();
}

/// Install a global subscriber combining a tracing filter with [`SyncLayer`].
///
/// ```rust,ignore
/// use logging::{VerbosityConfig, init_tracing_with_filter};
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(VerbosityConfig::from_verbose_level(2), EnvFilter::from_default_env());
/// ```
pub fn init_tracing_with_filter<F>(config: VerbosityConfig, filter: F)
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    super::thread_local::init(config.clone());

    tracing_subscriber::registry()
        .with(filter)
        .with(SyncLayer::new(config))
        .init();
}

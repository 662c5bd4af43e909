//! Serialization of verbosity configuration.

#![cfg(feature = "serde")]

use logging::{DebugFlag, VerbosityConfig};

#[test]
fn config_round_trips_through_json() {
    let config = VerbosityConfig::from_verbose_level(3);
    let json = serde_json::to_string(&config).expect("serialize");
    let back: VerbosityConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back, config);
    assert_eq!(back.debug.get(DebugFlag::Match), 1);
}

//! crates/logging/src/config.rs
//! Verbosity configuration combining info and debug levels.

use super::levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};

/// Combined verbosity configuration for info and debug flags.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VerbosityConfig {
    /// Info flag levels.
    pub info: InfoLevels,
    /// Debug flag levels.
    pub debug: DebugLevels,
}

impl VerbosityConfig {
    /// Create a new configuration from a `-v` count.
    ///
    /// Level 0 is silent, 1 reports statistics, 2 adds progress and the
    /// coarse debug categories, 3 and above enable every debug flag at
    /// increasing detail.
    pub fn from_verbose_level(level: u8) -> Self {
        let mut config = Self::default();

        match level {
            0 => {}
            1 => {
                config.info.misc = 1;
                config.info.stats = 1;
            }
            2 => {
                config.info.misc = 2;
                config.info.stats = 1;
                config.info.progress = 1;
                config.debug.deltasum = 1;
                config.debug.proto = 1;
            }
            3 => {
                config.info.misc = 2;
                config.info.stats = 2;
                config.info.progress = 1;
                config.debug.deltasum = 2;
                config.debug.hash = 1;
                config.debug.matching = 1;
                config.debug.proto = 2;
                config.debug.recv = 1;
                config.debug.send = 1;
            }
            _ => {
                // Level 4+
                config.info.misc = 2;
                config.info.stats = 2;
                config.info.progress = 2;
                config.debug.deltasum = 3;
                config.debug.hash = 2;
                config.debug.matching = 2;
                config.debug.proto = 3;
                config.debug.recv = 2;
                config.debug.send = 2;
            }
        }

        config
    }

    /// Apply an info flag token such as `stats2`, `progress` or `all0`.
    pub fn apply_info_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        if name == "all" {
            self.info.set_all(level);
            return Ok(());
        }
        let flag = InfoFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown info flag: {name}"))?;
        self.info.set(flag, level);
        Ok(())
    }

    /// Apply a debug flag token such as `match2`, `recv` or `all`.
    pub fn apply_debug_flag(&mut self, token: &str) -> Result<(), String> {
        let (name, level) = parse_flag_token(token)?;
        if name == "all" {
            self.debug.set_all(level);
            return Ok(());
        }
        let flag = DebugFlag::ALL
            .into_iter()
            .find(|flag| flag.name() == name)
            .ok_or_else(|| format!("unknown debug flag: {name}"))?;
        self.debug.set(flag, level);
        Ok(())
    }
}

/// Parse a flag token like "match2" into ("match", 2) or "recv" into ("recv", 1).
fn parse_flag_token(token: &str) -> Result<(&str, u8), String> {
    if token.is_empty() {
        return Err("empty flag token".to_string());
    }

    match token.find(|c: char| c.is_ascii_digit()) {
        Some(0) => Err(format!("missing flag name in: {token}")),
        Some(pos) => {
            let level = token[pos..]
                .parse::<u8>()
                .map_err(|_| format!("invalid level in flag: {token}"))?;
            Ok((&token[..pos], level))
        }
        None => Ok((token, 1)),
    }
}

//! crates/logging/src/levels.rs
//! Flag enums and level structures for info and debug verbosity.

/// Info flags for user-facing diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InfoFlag {
    /// Session milestones such as convergence or identical content.
    Misc,
    /// Per-round progress of a synchronization session.
    Progress,
    /// Transfer statistics.
    Stats,
}

impl InfoFlag {
    /// All info flags in declaration order.
    pub const ALL: [Self; 3] = [Self::Misc, Self::Progress, Self::Stats];

    /// Returns the token used on the command line and in tracing targets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Misc => "misc",
            Self::Progress => "progress",
            Self::Stats => "stats",
        }
    }
}

/// Debug flags for internal diagnostic categories.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DebugFlag {
    /// Block checksum table generation.
    Deltasum,
    /// Strong checksum computation.
    Hash,
    /// Rolling block matching.
    Match,
    /// Negotiation state transitions.
    Proto,
    /// Reassembly on the receiving side.
    Recv,
    /// Diff extraction on the sending side.
    Send,
}

impl DebugFlag {
    /// All debug flags in declaration order.
    pub const ALL: [Self; 6] = [
        Self::Deltasum,
        Self::Hash,
        Self::Match,
        Self::Proto,
        Self::Recv,
        Self::Send,
    ];

    /// Returns the token used on the command line and in tracing targets.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deltasum => "deltasum",
            Self::Hash => "hash",
            Self::Match => "match",
            Self::Proto => "proto",
            Self::Recv => "recv",
            Self::Send => "send",
        }
    }
}

/// Info verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InfoLevels {
    /// Session milestone level.
    pub misc: u8,
    /// Progress reporting level.
    pub progress: u8,
    /// Transfer statistics level.
    pub stats: u8,
}

impl InfoLevels {
    /// Get the level for a specific flag.
    pub const fn get(&self, flag: InfoFlag) -> u8 {
        match flag {
            InfoFlag::Misc => self.misc,
            InfoFlag::Progress => self.progress,
            InfoFlag::Stats => self.stats,
        }
    }

    /// Set the level for a specific flag.
    pub const fn set(&mut self, flag: InfoFlag, level: u8) {
        match flag {
            InfoFlag::Misc => self.misc = level,
            InfoFlag::Progress => self.progress = level,
            InfoFlag::Stats => self.stats = level,
        }
    }

    /// Set all flags to the specified level.
    pub const fn set_all(&mut self, level: u8) {
        self.misc = level;
        self.progress = level;
        self.stats = level;
    }
}

/// Debug verbosity levels for each flag.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DebugLevels {
    /// Checksum table generation level.
    pub deltasum: u8,
    /// Strong checksum level.
    pub hash: u8,
    /// Block matching level.
    pub matching: u8,
    /// Negotiation level.
    pub proto: u8,
    /// Reassembly level.
    pub recv: u8,
    /// Diff extraction level.
    pub send: u8,
}

impl DebugLevels {
    /// Get the level for a specific flag.
    pub const fn get(&self, flag: DebugFlag) -> u8 {
        match flag {
            DebugFlag::Deltasum => self.deltasum,
            DebugFlag::Hash => self.hash,
            DebugFlag::Match => self.matching,
            DebugFlag::Proto => self.proto,
            DebugFlag::Recv => self.recv,
            DebugFlag::Send => self.send,
        }
    }

    /// Set the level for a specific flag.
    pub const fn set(&mut self, flag: DebugFlag, level: u8) {
        match flag {
            DebugFlag::Deltasum => self.deltasum = level,
            DebugFlag::Hash => self.hash = level,
            DebugFlag::Match => self.matching = level,
            DebugFlag::Proto => self.proto = level,
            DebugFlag::Recv => self.recv = level,
            DebugFlag::Send => self.send = level,
        }
    }

    /// Set all flags to the specified level.
    pub const fn set_all(&mut self, level: u8) {
        self.deltasum = level;
        self.hash = level;
        self.matching = level;
        self.proto = level;
        self.recv = level;
        self.send = level;
    }
}

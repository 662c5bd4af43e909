//! crates/transfer/src/peer.rs
//!
//! The seam between the negotiation driver and wherever the target lives.

use std::sync::Arc;

use engine::{DiffRequest, DiffResponse, FileState, Properties};

/// A holder of authoritative content that a source converges onto.
///
/// In-process targets are plain [`FileState`]s; a remote target implements
/// this trait on top of its transport.
pub trait TargetPeer {
    /// Current block length, whole-buffer checksum and table.
    fn properties(&self) -> Properties;

    /// Natural bytes of the requested blocks plus the values needed to detect
    /// a change since [`properties`](Self::properties) was called.
    fn diff_chunks(&self, request: &DiffRequest) -> DiffResponse;
}

impl TargetPeer for FileState {
    fn properties(&self) -> Properties {
        Self::properties(self)
    }

    fn diff_chunks(&self, request: &DiffRequest) -> DiffResponse {
        Self::diff_chunks(self, request)
    }
}

impl<T: TargetPeer + ?Sized> TargetPeer for &T {
    fn properties(&self) -> Properties {
        (**self).properties()
    }

    fn diff_chunks(&self, request: &DiffRequest) -> DiffResponse {
        (**self).diff_chunks(request)
    }
}

impl<T: TargetPeer + ?Sized> TargetPeer for Arc<T> {
    fn properties(&self) -> Properties {
        (**self).properties()
    }

    fn diff_chunks(&self, request: &DiffRequest) -> DiffResponse {
        (**self).diff_chunks(request)
    }
}

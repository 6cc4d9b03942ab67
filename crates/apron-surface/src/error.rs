//! Surface-subsystem error type.

use thiserror::Error;

use apron_core::NodeId;

/// Errors produced by `apron-surface`.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found on the surface")]
    NodeNotFound(NodeId),

    #[error("no {kind} named {name:?}")]
    UnknownName { kind: &'static str, name: String },
}

pub type SurfaceResult<T> = Result<T, SurfaceError>;

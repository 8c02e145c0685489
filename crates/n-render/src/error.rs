//! Errors raised by tree construction.
//!
//! Flattening and cursor constraints never fail. Only structural edits can,
//! and only when the caller breaks the leaf/interior contract or holds an id
//! whose component was already removed.

use thiserror::Error;

use crate::component::ComponentId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum TreeError {
    #[error("component {0:?} does not exist in this tree")]
    UnknownComponent(ComponentId),

    #[error("component {name:?} has children and cannot hold lines or highlights")]
    NotALeaf { id: ComponentId, name: String },

    #[error("component {name:?} already holds lines or highlights and cannot take children")]
    LeafHasContent { id: ComponentId, name: String },
}

pub type Result<T> = std::result::Result<T, TreeError>;

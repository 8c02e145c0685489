//! # n-render — Render-tree engine for n-diffview
//!
//! Panels (file list, commit log, options) describe their content as a tree
//! of named components. This crate turns that tree into buffer lines and
//! keeps the cursor on the parts of it that hold real content.
//!
//! - **[`span`]** — `HighlightSpan`, one colored region of one line
//! - **[`component`]** — `Component`, `NodeKind` (leaf or interior), `LineRange`
//! - **[`tree`]** — `RenderTree`, the arena owning a panel's components
//! - **[`schema`]** — `Schema` bulk construction and the `Lookup` it returns
//! - **[`flatten`]** — the depth-first pass producing lines and highlights
//! - **[`constraint`]** — `CursorConstraint`, cursor motion over components
//! - **[`host`]** — the `Host` trait and the `render` sink operation
//!
//! # Pipeline
//!
//! ```text
//! panel builder ──▶ RenderTree ──flatten──▶ Flattened ──render──▶ Host buffer
//!                       │                                          │
//!                       └── ranges ──▶ CursorConstraint ◀── cursor ┘
//! ```
//!
//! Everything runs synchronously on the caller's thread. The only shared
//! state is the atomic counter behind auto-generated component names.

pub mod component;
pub mod constraint;
pub mod error;
pub mod flatten;
pub mod host;
pub mod schema;
pub mod span;
pub mod tree;

pub use component::{Component, ComponentId, LineRange, NodeKind, Parent, next_id};
pub use constraint::{CursorConstraint, Motion, create_cursor_constraint};
pub use error::TreeError;
pub use flatten::Flattened;
pub use host::{BufferHandle, Host, NamespaceId, WindowHandle, render};
pub use schema::{Lookup, Schema};
pub use span::HighlightSpan;
pub use tree::RenderTree;

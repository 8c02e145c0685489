//! # n-panels — Diff panels built on n-render
//!
//! Each panel owns a [`RenderTree`](n_render::RenderTree), builds its static
//! layout from a schema once, and rewrites only the components whose data
//! changed.
//!
//! - **[`file_panel`]** — changed files split into working and staged sections
//! - **[`log_panel`]** — commits with foldable file lists
//! - **[`option_panel`]** — toggleable flags
//! - **[`status`]** — `git status --porcelain` parsing into `FileEntry`
//! - **[`config`]** — `PanelConfig`, loaded from TOML
//! - **[`hl`]** — highlight group names and their fallback colors
//! - **[`text`]** — display-width truncation and padding
//! - **[`panel`]** — the `Panel` trait the viewer drives panels through

pub mod config;
pub mod error;
pub mod file_panel;
pub mod hl;
pub mod log_panel;
pub mod option_panel;
pub mod panel;
pub mod status;
pub mod text;

pub use config::PanelConfig;
pub use error::{ConfigError, StatusError};
pub use file_panel::FilePanel;
pub use log_panel::{LogEntry, LogPanel, parse_log};
pub use option_panel::{OptionPanel, OptionValue, PanelOption};
pub use panel::Panel;
pub use status::{FileEntry, parse_porcelain};

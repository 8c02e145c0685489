//! Highlight group names used by the panels.
//!
//! These are the names a colorscheme targets, so they never change with the
//! panel layout. Each group has a fallback ANSI palette index used when the
//! configuration does not override it.

pub const FILE_PANEL_TITLE: &str = "DiffviewFilePanelTitle";
pub const FILE_PANEL_COUNTER: &str = "DiffviewFilePanelCounter";
pub const FILE_PANEL_FILE_NAME: &str = "DiffviewFilePanelFileName";
pub const FILE_PANEL_PATH: &str = "DiffviewFilePanelPath";

pub const STATUS_ADDED: &str = "DiffviewStatusAdded";
pub const STATUS_UNTRACKED: &str = "DiffviewStatusUntracked";
pub const STATUS_MODIFIED: &str = "DiffviewStatusModified";
pub const STATUS_RENAMED: &str = "DiffviewStatusRenamed";
pub const STATUS_COPIED: &str = "DiffviewStatusCopied";
pub const STATUS_TYPE_CHANGE: &str = "DiffviewStatusTypeChange";
pub const STATUS_UNMERGED: &str = "DiffviewStatusUnmerged";
pub const STATUS_DELETED: &str = "DiffviewStatusDeleted";
pub const STATUS_UNKNOWN: &str = "DiffviewStatusUnknown";

pub const LOG_HASH: &str = "DiffviewHash";
pub const LOG_SUBJECT: &str = "DiffviewLogSubject";
pub const FOLD_MARKER: &str = "DiffviewFolderSign";

pub const OPTION_KEY: &str = "DiffviewOptionKey";
pub const OPTION_VALUE: &str = "DiffviewOptionValue";
pub const DIM: &str = "DiffviewDim1";

/// Group for a porcelain status letter.
#[must_use]
pub const fn status_group(status: char) -> &'static str {
    match status {
        'A' => STATUS_ADDED,
        '?' => STATUS_UNTRACKED,
        'M' => STATUS_MODIFIED,
        'R' => STATUS_RENAMED,
        'C' => STATUS_COPIED,
        'T' => STATUS_TYPE_CHANGE,
        'U' => STATUS_UNMERGED,
        'D' => STATUS_DELETED,
        _ => STATUS_UNKNOWN,
    }
}

/// Fallback ANSI palette index for `group`.
#[must_use]
pub fn default_color(group: &str) -> Option<u8> {
    let color = match group {
        FILE_PANEL_TITLE | OPTION_KEY => 12,
        FILE_PANEL_COUNTER | LOG_HASH => 3,
        FILE_PANEL_PATH | DIM | FOLD_MARKER => 8,
        STATUS_ADDED | STATUS_UNTRACKED => 2,
        STATUS_MODIFIED | STATUS_RENAMED | STATUS_COPIED | STATUS_TYPE_CHANGE => 4,
        STATUS_UNMERGED | STATUS_DELETED => 1,
        OPTION_VALUE => 6,
        _ => return None,
    };
    Some(color)
}

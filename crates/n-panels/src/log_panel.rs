//! Log panel — commits with their changed files, each foldable.
//!
//! ```text
//! log_panel
//! ├── title                 "Commits (2)"
//! └── entries
//!     ├── entry_0
//!     │   ├── commit        "▾ 1a2b3c4 Fix flatten offsets"
//!     │   └── files         "    M src/flatten.rs"
//!     └── entry_1
//!         ├── commit        "▸ 9f8e7d6 Add schema lookup"
//!         └── files         (folded: no lines)
//! ```
//!
//! Commit and files components are both registered with the cursor
//! constraint. A folded entry's `files` leaf has height 0, so the cursor
//! moves from one commit line straight to the next.

use std::sync::OnceLock;

use n_render::{
    BufferHandle, CursorConstraint, HighlightSpan, Host, Lookup, Parent, RenderTree, Schema,
    TreeError, render,
};
use regex::Regex;

use crate::config::PanelConfig;
use crate::error::StatusError;
use crate::hl;
use crate::panel::Panel;
use crate::status::FileEntry;
use crate::text::truncate;

const OPEN: char = '▾';
const FOLDED: char = '▸';
const SHORT_HASH: usize = 7;
const TITLE: &str = "Commits";

// ---------------------------------------------------------------------------
// Entries
// ---------------------------------------------------------------------------

/// One commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub hash: String,
    pub subject: String,
    pub files: Vec<FileEntry>,
    pub folded: bool,
}

impl LogEntry {
    #[must_use]
    pub fn new(hash: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            subject: subject.into(),
            files: Vec::new(),
            folded: true,
        }
    }

    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..SHORT_HASH).unwrap_or(&self.hash)
    }
}

static COMMIT_LINE: OnceLock<Regex> = OnceLock::new();
static FILE_LINE: OnceLock<Regex> = OnceLock::new();

/// Parse `git log --oneline --name-status` output. Every entry starts
/// folded.
///
/// # Errors
///
/// [`StatusError::Malformed`] for a line that is neither a commit nor a file
/// line, or a file line before the first commit.
pub fn parse_log(text: &str) -> Result<Vec<LogEntry>, StatusError> {
    let commit_line = COMMIT_LINE.get_or_init(|| {
        Regex::new(r"^([0-9a-f]{4,64}) (.*)$").expect("commit line pattern compiles")
    });
    let file_line = FILE_LINE.get_or_init(|| {
        Regex::new(r"^([MADRCTU])[0-9]*\t(?:[^\t]+\t)?([^\t]+)$").expect("file line pattern compiles")
    });

    let mut entries: Vec<LogEntry> = Vec::new();
    for (n, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let malformed = || StatusError::Malformed {
            line: n + 1,
            text: line.to_string(),
        };

        if let Some(caps) = file_line.captures(line) {
            let entry = entries.last_mut().ok_or_else(malformed)?;
            let status = caps[1].chars().next().unwrap_or('M');
            entry.files.push(FileEntry::new(&caps[2], status, true));
        } else if let Some(caps) = commit_line.captures(line) {
            entries.push(LogEntry::new(&caps[1], &caps[2]));
        } else {
            return Err(malformed());
        }
    }
    Ok(entries)
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

pub struct LogPanel {
    tree: RenderTree<usize>,
    layout: Lookup,
    rows: Vec<Lookup>,
    entries: Vec<LogEntry>,
    config: PanelConfig,
    constraint: CursorConstraint,
}

impl LogPanel {
    pub const NAME: &'static str = "DiffviewLogPanel";

    /// Create an empty panel with its own namespace from `host`.
    ///
    /// # Errors
    ///
    /// Tree errors while building the static layout.
    pub fn new<H: Host>(host: &mut H, config: PanelConfig) -> Result<Self, TreeError> {
        let mut tree = RenderTree::for_host(host, Self::NAME);
        let layout = tree.create_schema(
            Parent::Root,
            Schema::named("log_panel")
                .child(Schema::named("title"))
                .child(Schema::named("entries")),
        )?;
        let mut panel = Self {
            tree,
            layout,
            rows: Vec::new(),
            entries: Vec::new(),
            config,
            constraint: CursorConstraint::default(),
        };
        panel.write_title()?;
        Ok(panel)
    }

    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// The commit under the 1-based cursor `line`, folded or not.
    #[must_use]
    pub fn entry_at_line(&self, line: usize) -> Option<&LogEntry> {
        self.entries.get(self.item_index_at(line)?)
    }

    /// Replace all commits. Takes effect on the next render.
    ///
    /// # Errors
    ///
    /// Tree errors while rebuilding entries.
    pub fn set_entries(&mut self, entries: Vec<LogEntry>) -> Result<(), TreeError> {
        let list = self.layout["entries"].comp();
        for row in self.rows.drain(..) {
            self.tree.remove_component(list, row.comp());
        }

        self.entries = entries;
        for i in 0..self.entries.len() {
            let row = self.tree.create_schema(
                list,
                Schema::named(format!("entry_{i}"))
                    .context(i)
                    .child(Schema::named("commit").context(i))
                    .child(Schema::named("files").context(i)),
            )?;
            self.rows.push(row);
            self.write_entry(i)?;
        }
        self.write_title()
    }

    /// Flip the fold state of entry `index`. Returns the new state, or `None`
    /// for an index past the end.
    ///
    /// # Errors
    ///
    /// Tree errors while rewriting the entry.
    pub fn toggle_fold(&mut self, index: usize) -> Result<Option<bool>, TreeError> {
        let Some(entry) = self.entries.get_mut(index) else {
            return Ok(None);
        };
        entry.folded = !entry.folded;
        let folded = entry.folded;
        self.write_entry(index)?;
        Ok(Some(folded))
    }

    fn write_title(&mut self) -> Result<(), TreeError> {
        let title = self.layout["title"].comp();
        self.tree.clear_component(title);
        self.tree
            .add_line(title, format!("{TITLE} ({})", self.entries.len()))?;
        self.tree.add_highlight(title, hl::FILE_PANEL_TITLE, 0, 0, TITLE.len())
    }

    fn write_entry(&mut self, index: usize) -> Result<(), TreeError> {
        let (Some(entry), Some(row)) = (self.entries.get(index), self.rows.get(index)) else {
            return Ok(());
        };
        let commit = row["commit"].comp();
        let files = row["files"].comp();
        let tree = &mut self.tree;

        tree.clear_component(commit);
        tree.clear_component(files);

        let marker = if entry.folded { FOLDED } else { OPEN };
        let short = entry.short_hash();
        let prefix = format!("{marker} {short} ");
        let room = self.config.width.saturating_sub(prefix.chars().count());
        tree.add_line(commit, format!("{prefix}{}", truncate(&entry.subject, room)))?;
        tree.add_highlight(commit, hl::FOLD_MARKER, 0, 0, marker.len_utf8())?;
        let hash_start = marker.len_utf8() + 1;
        tree.add_highlight(commit, hl::LOG_HASH, 0, hash_start, hash_start + short.len())?;
        tree.push_span(commit, HighlightSpan::until_end(hl::LOG_SUBJECT, 0, prefix.len()))?;

        if entry.folded {
            return Ok(());
        }
        for (n, file) in entry.files.iter().enumerate() {
            let room = self.config.width.saturating_sub(6);
            tree.add_line(files, format!("    {} {}", file.status, truncate(&file.path, room)))?;
            tree.add_highlight(files, hl::status_group(file.status), n, 4, 5)?;
        }
        Ok(())
    }
}

impl Panel for LogPanel {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn tree(&self) -> &RenderTree<usize> {
        &self.tree
    }

    fn constraint(&self) -> &CursorConstraint {
        &self.constraint
    }

    fn render<H: Host>(&mut self, host: &mut H, buffer: BufferHandle) -> Result<(), H::Error> {
        render(host, buffer, &mut self.tree)?;
        let selectable = self
            .rows
            .iter()
            .flat_map(|row| [row["commit"].comp(), row["files"].comp()]);
        self.constraint = CursorConstraint::new(&self.tree, selectable);
        Ok(())
    }

    fn toggle_at(&mut self, line: usize) -> Result<bool, TreeError> {
        match self.item_index_at(line) {
            Some(index) => Ok(self.toggle_fold(index)?.is_some()),
            None => Ok(false),
        }
    }
}

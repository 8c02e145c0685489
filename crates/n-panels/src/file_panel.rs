//! File panel — the list of changed files.
//!
//! # Layout
//!
//! ```text
//! file_panel
//! ├── title               "Files (3)"
//! ├── working
//! │   ├── header          "Changes (2)"        empty when no working files
//! │   └── files
//! │       ├── file_0      "M lib.rs src"
//! │       └── file_1      "? notes.txt"
//! └── staged
//!     ├── header          "Staged changes (1)"
//!     └── files
//!         └── file_2      "A README.md"
//! ```
//!
//! The static part is built once from a [`Schema`]. Every update drops the
//! file rows and recreates them, one leaf per [`FileEntry`], each carrying
//! the entry's index as its context. The cursor is constrained to the two
//! `files` components, so it never rests on the title or a header, and an
//! empty section is skipped entirely.

use n_render::{
    BufferHandle, ComponentId, CursorConstraint, HighlightSpan, Host, Lookup, Parent, RenderTree,
    Schema, TreeError, render,
};

use crate::config::PanelConfig;
use crate::hl;
use crate::panel::Panel;
use crate::status::FileEntry;
use crate::text::{ELLIPSIS, truncate};

const SECTIONS: [(&str, bool, &str); 2] = [
    ("working", false, "Changes"),
    ("staged", true, "Staged changes"),
];

pub struct FilePanel {
    tree: RenderTree<usize>,
    layout: Lookup,
    entries: Vec<FileEntry>,
    config: PanelConfig,
    constraint: CursorConstraint,
}

impl FilePanel {
    pub const NAME: &'static str = "DiffviewFilePanel";

    /// Create an empty panel with its own namespace from `host`.
    ///
    /// # Errors
    ///
    /// Tree errors while building the static layout.
    pub fn new<H: Host>(host: &mut H, config: PanelConfig) -> Result<Self, TreeError> {
        let mut tree = RenderTree::for_host(host, Self::NAME);
        let layout = tree.create_schema(Parent::Root, Self::schema())?;
        let mut panel = Self {
            tree,
            layout,
            entries: Vec::new(),
            config,
            constraint: CursorConstraint::default(),
        };
        panel.update_components()?;
        Ok(panel)
    }

    fn schema() -> Schema<usize> {
        let section = |name: &str| {
            Schema::named(name)
                .child(Schema::named("header"))
                .child(Schema::named("files"))
        };
        Schema::named("file_panel")
            .child(Schema::named("title"))
            .children(SECTIONS.iter().map(|&(name, _, _)| section(name)))
    }

    // -- Accessors ----------------------------------------------------------

    #[must_use]
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    #[must_use]
    pub const fn layout(&self) -> &Lookup {
        &self.layout
    }

    #[must_use]
    pub const fn config(&self) -> &PanelConfig {
        &self.config
    }

    /// The entry under the 1-based cursor `line`.
    #[must_use]
    pub fn item_at_line(&self, line: usize) -> Option<&FileEntry> {
        self.entries.get(self.item_index_at(line)?)
    }

    /// Row component showing `entries()[index]`.
    #[must_use]
    pub fn row_of(&self, index: usize) -> Option<ComponentId> {
        let entry = self.entries.get(index)?;
        let section = if entry.staged { "staged" } else { "working" };
        let files = self.layout.child(section)?.child("files")?.comp();
        self.tree
            .children_of(Parent::Component(files))
            .iter()
            .copied()
            .find(|&id| self.tree.get(id).and_then(|c| c.context()) == Some(&index))
    }

    // -- Updates ------------------------------------------------------------

    /// Replace the listed files. Takes effect on the next render.
    ///
    /// # Errors
    ///
    /// Tree errors while rebuilding rows.
    pub fn set_entries(&mut self, entries: Vec<FileEntry>) -> Result<(), TreeError> {
        self.entries = entries;
        self.update_components()
    }

    fn update_components(&mut self) -> Result<(), TreeError> {
        let Self {
            tree,
            layout,
            entries,
            config,
            ..
        } = self;

        let title = layout["title"].comp();
        tree.clear_component(title);
        tree.add_line(title, format!("{} ({})", config.title, entries.len()))?;
        tree.add_highlight(title, hl::FILE_PANEL_TITLE, 0, 0, config.title.len())?;
        tree.push_span(
            title,
            HighlightSpan::until_end(hl::FILE_PANEL_COUNTER, 0, config.title.len() + 1),
        )?;

        for (section, staged, label) in SECTIONS {
            let header = layout[section]["header"].comp();
            let files = layout[section]["files"].comp();

            tree.clear_component(header);
            for row in tree.children_of(Parent::Component(files)).to_vec() {
                tree.remove_component(files, row);
            }

            let indices: Vec<usize> = entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.staged == staged)
                .map(|(i, _)| i)
                .collect();
            if indices.is_empty() {
                continue;
            }

            if config.show_headers {
                tree.add_line(header, format!("{label} ({})", indices.len()))?;
                tree.add_highlight(header, hl::FILE_PANEL_TITLE, 0, 0, label.len())?;
                tree.push_span(
                    header,
                    HighlightSpan::until_end(hl::FILE_PANEL_COUNTER, 0, label.len() + 1),
                )?;
            }

            for i in indices {
                let row = tree.create_named(files, format!("file_{i}"), Some(i))?;
                write_row(tree, row, &entries[i], config.width)?;
            }
        }

        log::trace!("file panel: rebuilt {} rows", entries.len());
        Ok(())
    }
}

/// `S name dir`, fitted to `width` columns.
fn write_row(
    tree: &mut RenderTree<usize>,
    row: ComponentId,
    entry: &FileEntry,
    width: usize,
) -> Result<(), TreeError> {
    let name = entry.file_name();
    let full = match entry.parent_dir() {
        Some(dir) => format!("{name} {dir}"),
        None => name.to_string(),
    };
    let body = truncate(&full, width.saturating_sub(2));

    tree.add_line(row, format!("{} {body}", entry.status))?;
    tree.add_highlight(row, hl::status_group(entry.status), 0, 0, entry.status.len_utf8())?;

    // When the cut falls inside the name, only the kept prefix is the name.
    let whole_name = body.starts_with(name);
    let shown = if whole_name {
        name.len()
    } else {
        body.trim_end_matches(ELLIPSIS).len()
    };
    let start = entry.status.len_utf8() + 1;
    tree.add_highlight(row, hl::FILE_PANEL_FILE_NAME, 0, start, start + shown)?;
    if whole_name && body.len() > name.len() + 1 {
        tree.push_span(
            row,
            HighlightSpan::until_end(hl::FILE_PANEL_PATH, 0, start + name.len() + 1),
        )?;
    }
    Ok(())
}

impl Panel for FilePanel {
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
        let files = SECTIONS.map(|(section, _, _)| self.layout[section]["files"].comp());
        self.constraint = CursorConstraint::new(&self.tree, files);
        Ok(())
    }
}

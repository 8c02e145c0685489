//! Option panel — a list of flags the user can flip.
//!
//! One leaf per option under `options`, so toggling a flag rewrites a single
//! component and leaves the rest of the tree alone.

use n_render::{
    BufferHandle, ComponentId, CursorConstraint, HighlightSpan, Host, Lookup, Parent, RenderTree,
    Schema, TreeError, render,
};

use crate::hl;
use crate::panel::Panel;
use crate::text::pad;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    Flag(bool),
    Text(String),
}

/// One row of the option panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelOption {
    pub key: String,
    pub description: String,
    pub value: OptionValue,
}

impl PanelOption {
    #[must_use]
    pub fn flag(key: impl Into<String>, description: impl Into<String>, on: bool) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            value: OptionValue::Flag(on),
        }
    }

    #[must_use]
    pub fn text(
        key: impl Into<String>,
        description: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            description: description.into(),
            value: OptionValue::Text(value.into()),
        }
    }
}

pub struct OptionPanel {
    tree: RenderTree<usize>,
    layout: Lookup,
    rows: Vec<ComponentId>,
    options: Vec<PanelOption>,
    constraint: CursorConstraint,
}

impl OptionPanel {
    pub const NAME: &'static str = "DiffviewOptionPanel";

    /// Build the panel for `options`.
    ///
    /// # Errors
    ///
    /// Tree errors while creating rows.
    pub fn new<H: Host>(host: &mut H, options: Vec<PanelOption>) -> Result<Self, TreeError> {
        let mut tree = RenderTree::for_host(host, Self::NAME);
        let layout = tree.create_schema(
            Parent::Root,
            Schema::named("option_panel")
                .child(Schema::named("title"))
                .child(Schema::named("options").children(
                    (0..options.len()).map(|i| Schema::named(format!("option_{i}")).context(i)),
                )),
        )?;

        let title = layout["title"].comp();
        tree.add_line_highlighted(title, "Options", hl::FILE_PANEL_TITLE)?;

        let rows = layout["options"].iter().map(Lookup::comp).collect();
        let mut panel = Self {
            tree,
            layout,
            rows,
            options,
            constraint: CursorConstraint::default(),
        };
        for i in 0..panel.options.len() {
            panel.write_row(i)?;
        }
        Ok(panel)
    }

    #[must_use]
    pub fn options(&self) -> &[PanelOption] {
        &self.options
    }

    #[must_use]
    pub const fn layout(&self) -> &Lookup {
        &self.layout
    }

    /// The option under the 1-based cursor `line`.
    #[must_use]
    pub fn option_at_line(&self, line: usize) -> Option<&PanelOption> {
        self.options.get(self.item_index_at(line)?)
    }

    /// Flip the flag at `index`. Returns the new value, or `None` when the
    /// index is past the end or the option is not a flag.
    ///
    /// # Errors
    ///
    /// Tree errors while rewriting the row.
    pub fn toggle(&mut self, index: usize) -> Result<Option<bool>, TreeError> {
        let Some(PanelOption {
            value: OptionValue::Flag(on),
            ..
        }) = self.options.get_mut(index)
        else {
            return Ok(None);
        };
        *on = !*on;
        let on = *on;
        self.write_row(index)?;
        log::debug!("option panel: {} = {on}", self.options[index].key);
        Ok(Some(on))
    }

    fn key_width(&self) -> usize {
        self.options.iter().map(|o| o.key.len()).max().unwrap_or(0)
    }

    fn write_row(&mut self, index: usize) -> Result<(), TreeError> {
        let width = self.key_width();
        let (Some(option), Some(&row)) = (self.options.get(index), self.rows.get(index)) else {
            return Ok(());
        };
        let value = match &option.value {
            OptionValue::Flag(true) => "[x]".to_string(),
            OptionValue::Flag(false) => "[ ]".to_string(),
            OptionValue::Text(text) => format!("= {text}"),
        };
        let key = pad(&option.key, width);
        let line = format!("{key} {value}  {}", option.description);

        self.tree.clear_component(row);
        self.tree.add_line(row, line)?;
        self.tree.add_highlight(row, hl::OPTION_KEY, 0, 0, option.key.len())?;
        let value_start = key.len() + 1;
        self.tree
            .add_highlight(row, hl::OPTION_VALUE, 0, value_start, value_start + value.len())?;
        self.tree.push_span(
            row,
            HighlightSpan::until_end(hl::DIM, 0, value_start + value.len() + 2),
        )
    }
}

impl Panel for OptionPanel {
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
        self.constraint = CursorConstraint::new(&self.tree, self.rows.iter().copied());
        Ok(())
    }

    fn toggle_at(&mut self, line: usize) -> Result<bool, TreeError> {
        match self.item_index_at(line) {
            Some(index) => Ok(self.toggle(index)?.is_some()),
            None => Ok(false),
        }
    }
}

//! The `Panel` trait — what the viewer needs from any panel.
//!
//! Every panel owns a `RenderTree<usize>` whose contexts are indices into
//! the panel's item list, and a cursor constraint rebuilt after each render
//! (the constraint sorts by line start, which only a flatten can change).

use n_render::{BufferHandle, CursorConstraint, Host, Motion, RenderTree, TreeError};

pub trait Panel {
    /// Highlight namespace name, also used as the buffer name.
    fn name(&self) -> &'static str;

    fn tree(&self) -> &RenderTree<usize>;

    fn constraint(&self) -> &CursorConstraint;

    /// Write the panel into `buffer` and refresh the cursor constraint.
    ///
    /// # Errors
    ///
    /// Propagates the host's error.
    fn render<H: Host>(&mut self, host: &mut H, buffer: BufferHandle) -> Result<(), H::Error>;

    /// Index of the item under the 1-based cursor `line`.
    fn item_index_at(&self, line: usize) -> Option<usize> {
        let id = self.tree().component_at_line(line.checked_sub(1)?)?;
        self.tree().get(id)?.context().copied()
    }

    /// Act on the item under the 1-based cursor `line` (fold a commit, flip
    /// a flag). Returns whether anything changed; the caller re-renders.
    ///
    /// # Errors
    ///
    /// Tree errors while rewriting the item.
    fn toggle_at(&mut self, _line: usize) -> Result<bool, TreeError> {
        Ok(false)
    }

    /// Where a motion lands, as a 1-based line.
    fn constrain(&self, motion: Motion) -> usize {
        self.constraint().constrain(self.tree(), motion)
    }

    /// First selectable line.
    fn first_line(&self) -> usize {
        self.constrain(Motion::Span { from: 0, to: 0 })
    }

    /// Last selectable line.
    fn last_line(&self) -> usize {
        let last = self
            .constraint()
            .components()
            .iter()
            .filter_map(|&id| self.tree().get(id)?.line_end())
            .max()
            .map_or(0, |e| isize::try_from(e).unwrap_or(isize::MAX));
        self.constrain(Motion::Span { from: last, to: last })
    }
}

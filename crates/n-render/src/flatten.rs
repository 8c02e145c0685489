//! Flatten pass — turn a component tree into buffer lines.
//!
//! Walks the tree depth-first with a running line cursor:
//!
//! ```text
//! interior:  start = cursor ─▶ children advance cursor ─▶ end = cursor
//! leaf:      start = cursor,  end = start + lines.len()
//!            lines appended, spans copied with line += start
//! ```
//!
//! Every visited component gets its [`LineRange`] rewritten, so the pass is
//! also what makes ranges valid for [`CursorConstraint`](crate::CursorConstraint)
//! and [`component_at_line`](RenderTree::component_at_line). Nothing is
//! cached between passes: each call recomputes everything from the current
//! tree.

use crate::component::{ComponentId, LineRange, NodeKind};
use crate::span::HighlightSpan;
use crate::tree::RenderTree;

/// Output of a flatten pass: the buffer's lines and absolute highlights.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Flattened {
    pub lines: Vec<String>,
    pub highlights: Vec<HighlightSpan>,
}

impl Flattened {
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl<C> RenderTree<C> {
    /// Flatten every root in order, starting at line 0.
    pub fn flatten(&mut self) -> Flattened {
        let mut out = Flattened::default();
        let roots = self.roots.clone();
        let mut cursor = 0;
        for id in roots {
            cursor = self.flatten_node(id, cursor, &mut out);
        }
        out
    }

    /// Flatten only the subtree at `id`, placing it at line 0.
    ///
    /// Returns `None` if `id` is dead. Ranges outside the subtree keep
    /// whatever the last full pass assigned.
    pub fn flatten_component(&mut self, id: ComponentId) -> Option<Flattened> {
        self.get(id)?;
        let mut out = Flattened::default();
        self.flatten_node(id, 0, &mut out);
        Some(out)
    }

    /// Flatten `id` at `start` and return the cursor after it.
    fn flatten_node(&mut self, id: ComponentId, start: usize, out: &mut Flattened) -> usize {
        let Some(node) = self.nodes.get(id) else {
            return start;
        };

        let end = match &node.kind {
            NodeKind::Leaf { lines, highlights } => {
                out.lines.extend(lines.iter().cloned());
                out.highlights
                    .extend(highlights.iter().map(|span| span.offset(start)));
                start + lines.len()
            }
            NodeKind::Interior { children } => {
                let children = children.clone();
                let mut cursor = start;
                for child in children {
                    cursor = self.flatten_node(child, cursor, out);
                }
                cursor
            }
        };

        self.set_range(id, LineRange::new(start, end));
        end
    }
}

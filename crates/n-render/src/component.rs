//! Render components — the nodes of a [`RenderTree`](crate::RenderTree).
//!
//! A component is either a **leaf** holding literal lines plus highlight
//! spans, or an **interior** node holding an ordered list of children. The
//! two roles are separate variants of [`NodeKind`], so a node can never
//! carry both at once:
//!
//! ```text
//! Interior(title_bar?)          Leaf
//! ├── Leaf   "Changes (2)"      ┌───────────────────────┐
//! └── Interior(files)           │ lines:      Vec<String>│
//!     ├── Leaf "M src/lib.rs"   │ highlights: Vec<Span>  │
//!     └── Leaf "A README.md"    └───────────────────────┘
//! ```
//!
//! Components live in the tree's arena and refer to each other by
//! [`ComponentId`]. The parent link is one of those ids (or the tree root),
//! never an owning edge.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::span::HighlightSpan;

slotmap::new_key_type! {
    /// Handle to a component inside its tree's arena.
    ///
    /// Ids are generational: once a component is removed its id stops
    /// resolving, even if the slot is reused.
    pub struct ComponentId;
}

// ---------------------------------------------------------------------------
// Auto names
// ---------------------------------------------------------------------------

/// Process-wide counter behind the `comp_<n>` auto names.
static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Take the next value of the process-wide component counter.
///
/// Values are unique for the lifetime of the process and strictly
/// increasing, across every tree.
#[inline]
pub fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Generate a fresh `comp_<n>` name.
pub(crate) fn auto_name() -> String {
    format!("comp_{}", next_id())
}

// ---------------------------------------------------------------------------
// Parent
// ---------------------------------------------------------------------------

/// Where a component hangs: directly under the tree root, or under another
/// component.
///
/// Every structural operation on the tree takes a `Parent`, so callers build
/// schemas the same way whether they attach to the root or to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parent {
    Root,
    Component(ComponentId),
}

impl From<ComponentId> for Parent {
    fn from(id: ComponentId) -> Self {
        Self::Component(id)
    }
}

// ---------------------------------------------------------------------------
// LineRange
// ---------------------------------------------------------------------------

/// Absolute line range `[start, end)` assigned by the last flatten pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    #[inline]
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines in the range.
    #[inline]
    #[must_use]
    pub const fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// True if the 0-based `line` falls inside the range.
    #[inline]
    #[must_use]
    pub const fn contains(self, line: usize) -> bool {
        self.start <= line && line < self.end
    }
}

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Content of a component: literal lines, or children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf {
        lines: Vec<String>,
        /// Spans relative to this leaf's first line.
        highlights: Vec<HighlightSpan>,
    },
    Interior {
        children: Vec<ComponentId>,
    },
}

impl NodeKind {
    pub(crate) const fn empty_leaf() -> Self {
        Self::Leaf {
            lines: Vec::new(),
            highlights: Vec::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Component
// ---------------------------------------------------------------------------

/// One node of the render tree.
///
/// Components are created and edited through the owning
/// [`RenderTree`](crate::RenderTree); this type only exposes reads. `C` is
/// the caller's context payload, which the tree stores but never inspects.
#[derive(Debug, Clone)]
pub struct Component<C = ()> {
    pub(crate) name: String,
    pub(crate) parent: Parent,
    pub(crate) kind: NodeKind,
    pub(crate) range: Option<LineRange>,
    pub(crate) context: Option<C>,
}

impl<C> Component<C> {
    pub(crate) fn new(name: String, parent: Parent, context: Option<C>) -> Self {
        Self {
            name,
            parent,
            kind: NodeKind::empty_leaf(),
            range: None,
            context,
        }
    }

    // -- Identity -----------------------------------------------------------

    /// Explicit name, or the `comp_<n>` name assigned at creation.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The node this component hangs from. Navigation only.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Parent {
        self.parent
    }

    #[inline]
    #[must_use]
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    #[inline]
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    // -- Content ------------------------------------------------------------

    /// Leaf lines. Empty for interior nodes.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        match &self.kind {
            NodeKind::Leaf { lines, .. } => lines,
            NodeKind::Interior { .. } => &[],
        }
    }

    /// Leaf highlight spans, relative to the leaf. Empty for interior nodes.
    #[must_use]
    pub fn highlights(&self) -> &[HighlightSpan] {
        match &self.kind {
            NodeKind::Leaf { highlights, .. } => highlights,
            NodeKind::Interior { .. } => &[],
        }
    }

    /// Children in render order. Empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[ComponentId] {
        match &self.kind {
            NodeKind::Interior { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// True for a leaf without lines or highlights.
    #[must_use]
    pub fn has_no_content(&self) -> bool {
        match &self.kind {
            NodeKind::Leaf { lines, highlights } => lines.is_empty() && highlights.is_empty(),
            NodeKind::Interior { .. } => false,
        }
    }

    #[inline]
    #[must_use]
    pub const fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    #[inline]
    pub const fn context_mut(&mut self) -> Option<&mut C> {
        self.context.as_mut()
    }

    // -- Position -----------------------------------------------------------

    /// Range from the last flatten pass. `None` before the first flatten and
    /// after [`clear`](crate::RenderTree::clear).
    #[inline]
    #[must_use]
    pub const fn range(&self) -> Option<LineRange> {
        self.range
    }

    #[inline]
    #[must_use]
    pub fn line_start(&self) -> Option<usize> {
        self.range.map(|r| r.start)
    }

    #[inline]
    #[must_use]
    pub fn line_end(&self) -> Option<usize> {
        self.range.map(|r| r.end)
    }

    /// Lines this component produced in the last flatten pass. Zero is a
    /// normal state: the component rendered nothing.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.range.map_or(0, LineRange::len)
    }

    /// Drop leaf content and position. Children stay attached.
    pub(crate) fn clear_content(&mut self) {
        if let NodeKind::Leaf { lines, highlights } = &mut self.kind {
            lines.clear();
            highlights.clear();
        }
        self.range = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_names_are_unique_and_increasing() {
        let a = next_id();
        let b = next_id();
        assert!(b > a);

        let n1 = auto_name();
        let n2 = auto_name();
        assert!(n1.starts_with("comp_"));
        assert_ne!(n1, n2);
    }

    #[test]
    fn line_range_basics() {
        let r = LineRange::new(2, 5);
        assert_eq!(r.len(), 3);
        assert!(!r.is_empty());
        assert!(r.contains(2));
        assert!(r.contains(4));
        assert!(!r.contains(5));
        assert!(LineRange::new(3, 3).is_empty());
    }

    #[test]
    fn fresh_component_is_unpositioned_empty_leaf() {
        let c: Component = Component::new("x".into(), Parent::Root, None);
        assert!(c.is_leaf());
        assert!(c.has_no_content());
        assert_eq!(c.range(), None);
        assert_eq!(c.line_start(), None);
        assert_eq!(c.height(), 0);
        assert!(c.children().is_empty());
    }

    #[test]
    fn clear_content_keeps_children() {
        let mut c: Component = Component::new("x".into(), Parent::Root, None);
        c.kind = NodeKind::Interior {
            children: vec![ComponentId::default()],
        };
        c.range = Some(LineRange::new(0, 4));
        c.clear_content();
        assert_eq!(c.children().len(), 1);
        assert_eq!(c.range(), None);
        assert_eq!(c.height(), 0);
    }
}

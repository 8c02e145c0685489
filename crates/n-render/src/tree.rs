//! Render tree — the arena that owns every component of one panel.
//!
//! A panel creates one `RenderTree` for its whole lifetime. The tree owns an
//! ordered list of root components and the highlight namespace that scopes
//! this panel's highlights inside a shared buffer.
//!
//! # Ownership
//!
//! All components live in a [`SlotMap`] owned by the tree. Children are
//! listed by id in their parent's [`NodeKind::Interior`]; each component's
//! parent link is a plain [`Parent`] value. Removing a component frees its
//! whole subtree from the arena, so stale ids simply stop resolving.
//!
//! # Leaf / interior
//!
//! A new component is an empty leaf. Adding a child to an empty leaf turns it
//! into an interior node. Adding a child to a leaf that already holds lines,
//! or adding lines to an interior node, is rejected with a [`TreeError`].

use slotmap::SlotMap;

use crate::component::{Component, ComponentId, LineRange, NodeKind, Parent, auto_name};
use crate::error::{Result, TreeError};
use crate::host::NamespaceId;
use crate::span::HighlightSpan;

/// Root container of a component tree.
#[derive(Debug, Clone)]
pub struct RenderTree<C = ()> {
    pub(crate) nodes: SlotMap<ComponentId, Component<C>>,
    pub(crate) roots: Vec<ComponentId>,
    namespace: NamespaceId,
}

impl<C> RenderTree<C> {
    /// Create an empty tree whose highlights live in `namespace`.
    #[must_use]
    pub fn new(namespace: NamespaceId) -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
            namespace,
        }
    }

    // -- Queries ------------------------------------------------------------

    /// Highlight namespace owned by this tree.
    #[inline]
    #[must_use]
    pub const fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    /// Root components in render order.
    #[inline]
    #[must_use]
    pub fn roots(&self) -> &[ComponentId] {
        &self.roots
    }

    /// Look up a component. `None` once it has been removed.
    #[inline]
    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Component<C>> {
        self.nodes.get(id)
    }

    /// Like [`get`](Self::get) but reports a dead id as an error.
    ///
    /// # Errors
    ///
    /// [`TreeError::UnknownComponent`] if `id` does not resolve.
    pub fn component(&self, id: ComponentId) -> Result<&Component<C>> {
        self.nodes.get(id).ok_or(TreeError::UnknownComponent(id))
    }

    fn component_mut(&mut self, id: ComponentId) -> Result<&mut Component<C>> {
        self.nodes.get_mut(id).ok_or(TreeError::UnknownComponent(id))
    }

    /// Total number of live components.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Weak back-reference to the owner of `id`.
    #[must_use]
    pub fn parent(&self, id: ComponentId) -> Option<Parent> {
        self.nodes.get(id).map(Component::parent)
    }

    /// Ordered children of `parent`.
    #[must_use]
    pub fn children_of(&self, parent: Parent) -> &[ComponentId] {
        match parent {
            Parent::Root => &self.roots,
            Parent::Component(id) => match self.nodes.get(id) {
                Some(node) => node.children(),
                None => &[],
            },
        }
    }

    /// Mutable access to the caller's context payload on `id`.
    pub fn context_mut(&mut self, id: ComponentId) -> Option<&mut C> {
        self.nodes.get_mut(id).and_then(Component::context_mut)
    }

    /// First component named `name`, searching depth-first from the roots.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ComponentId> {
        self.descendants(Parent::Root)
            .into_iter()
            .find(|&id| self.nodes[id].name == name)
    }

    /// Every component below `parent`, depth-first pre-order.
    #[must_use]
    pub fn descendants(&self, parent: Parent) -> Vec<ComponentId> {
        let mut out = Vec::new();
        let mut stack: Vec<ComponentId> = self.children_of(parent).iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(id) {
                stack.extend(node.children().iter().rev());
            }
        }
        out
    }

    /// Leaves of the subtree rooted at `id` (including `id` itself when it is
    /// a leaf), in render order.
    #[must_use]
    pub fn leaves(&self, id: ComponentId) -> Vec<ComponentId> {
        let Some(node) = self.nodes.get(id) else {
            return Vec::new();
        };
        if node.is_leaf() {
            return vec![id];
        }
        self.descendants(Parent::Component(id))
            .into_iter()
            .filter(|&c| self.nodes[c].is_leaf())
            .collect()
    }

    /// All leaves of the tree, in render order.
    #[must_use]
    pub fn leaves_of_tree(&self) -> Vec<ComponentId> {
        self.descendants(Parent::Root)
            .into_iter()
            .filter(|&c| self.nodes[c].is_leaf())
            .collect()
    }

    /// True when the subtree at `id` renders no lines.
    ///
    /// Reads content, not the last flatten, so it is accurate even before the
    /// tree has been flattened.
    #[must_use]
    pub fn is_subtree_empty(&self, id: ComponentId) -> bool {
        self.leaves(id)
            .into_iter()
            .all(|leaf| self.nodes[leaf].lines().is_empty())
    }

    /// Deepest component whose last-flatten range contains the 0-based
    /// `line`. Zero-height components never match.
    #[must_use]
    pub fn component_at_line(&self, line: usize) -> Option<ComponentId> {
        let mut level: &[ComponentId] = &self.roots;
        let mut found = None;
        'descend: loop {
            for &id in level {
                let node = &self.nodes[id];
                if node.range.is_some_and(|r| r.contains(line)) {
                    found = Some(id);
                    level = node.children();
                    continue 'descend;
                }
            }
            return found;
        }
    }

    // -- Construction -------------------------------------------------------

    /// Append an anonymous child under `parent` and return its id.
    ///
    /// # Errors
    ///
    /// Fails if `parent` is dead or is a leaf that already holds content.
    pub fn create_component(&mut self, parent: impl Into<Parent>) -> Result<ComponentId> {
        self.insert(parent.into(), None, None)
    }

    /// Append a named child under `parent`, optionally carrying a context.
    ///
    /// # Errors
    ///
    /// Same conditions as [`create_component`](Self::create_component).
    pub fn create_named(
        &mut self,
        parent: impl Into<Parent>,
        name: impl Into<String>,
        context: Option<C>,
    ) -> Result<ComponentId> {
        self.insert(parent.into(), Some(name.into()), context)
    }

    pub(crate) fn insert(
        &mut self,
        parent: Parent,
        name: Option<String>,
        context: Option<C>,
    ) -> Result<ComponentId> {
        // Validate and promote the parent before touching the arena so a
        // rejected insert leaves no orphan behind.
        if let Parent::Component(pid) = parent {
            let node = self.component_mut(pid)?;
            if node.is_leaf() {
                if !node.has_no_content() {
                    return Err(TreeError::LeafHasContent {
                        id: pid,
                        name: node.name.clone(),
                    });
                }
                node.kind = NodeKind::Interior {
                    children: Vec::new(),
                };
            }
        }

        let name = name.unwrap_or_else(auto_name);
        let id = self.nodes.insert(Component::new(name, parent, context));
        match parent {
            Parent::Root => self.roots.push(id),
            Parent::Component(pid) => {
                if let NodeKind::Interior { children } = &mut self.nodes[pid].kind {
                    children.push(id);
                }
            }
        }
        Ok(id)
    }

    /// Detach the direct child `id` from `parent` and free its subtree.
    ///
    /// Returns `false` if `id` is not a direct child of `parent`. Nothing
    /// else in the tree changes.
    pub fn remove_component(&mut self, parent: impl Into<Parent>, id: ComponentId) -> bool {
        let list = match parent.into() {
            Parent::Root => &mut self.roots,
            Parent::Component(pid) => match self.nodes.get_mut(pid).map(|n| &mut n.kind) {
                Some(NodeKind::Interior { children }) => children,
                _ => return false,
            },
        };
        let Some(pos) = list.iter().position(|&c| c == id) else {
            return false;
        };
        list.remove(pos);
        self.free_subtree(id);
        true
    }

    fn free_subtree(&mut self, id: ComponentId) {
        let mut stack = vec![id];
        while let Some(cur) = stack.pop() {
            if let Some(node) = self.nodes.remove(cur) {
                if let NodeKind::Interior { children } = node.kind {
                    stack.extend(children);
                }
            }
        }
    }

    // -- Content ------------------------------------------------------------

    /// Append one literal line to the leaf `id`.
    ///
    /// # Errors
    ///
    /// Fails if `id` is dead or is an interior node.
    pub fn add_line(&mut self, id: ComponentId, text: impl Into<String>) -> Result<()> {
        let (lines, _) = self.leaf_content(id)?;
        lines.push(text.into());
        Ok(())
    }

    /// Append a highlight span on the leaf-relative line `line`, covering
    /// byte columns `first..last`.
    ///
    /// # Errors
    ///
    /// Fails if `id` is dead or is an interior node.
    pub fn add_highlight(
        &mut self,
        id: ComponentId,
        group: impl Into<String>,
        line: usize,
        first: usize,
        last: usize,
    ) -> Result<()> {
        self.push_span(id, HighlightSpan::new(group, line, first, last))
    }

    /// Append a prebuilt span (relative to the leaf).
    ///
    /// # Errors
    ///
    /// Fails if `id` is dead or is an interior node.
    pub fn push_span(&mut self, id: ComponentId, span: HighlightSpan) -> Result<()> {
        let (_, highlights) = self.leaf_content(id)?;
        highlights.push(span);
        Ok(())
    }

    /// Append a line highlighted from column 0 to its end.
    ///
    /// # Errors
    ///
    /// Fails if `id` is dead or is an interior node.
    pub fn add_line_highlighted(
        &mut self,
        id: ComponentId,
        text: impl Into<String>,
        group: impl Into<String>,
    ) -> Result<()> {
        let (lines, highlights) = self.leaf_content(id)?;
        highlights.push(HighlightSpan::whole_line(group, lines.len()));
        lines.push(text.into());
        Ok(())
    }

    fn leaf_content(
        &mut self,
        id: ComponentId,
    ) -> Result<(&mut Vec<String>, &mut Vec<HighlightSpan>)> {
        let node = self.component_mut(id)?;
        match &mut node.kind {
            NodeKind::Leaf { lines, highlights } => Ok((lines, highlights)),
            NodeKind::Interior { .. } => Err(TreeError::NotALeaf {
                id,
                name: node.name.clone(),
            }),
        }
    }

    // -- Clearing -----------------------------------------------------------

    /// Reset content and positions of every component. Shape is kept.
    pub fn clear(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_content();
        }
    }

    /// Reset content and positions of `id` and all its descendants.
    pub fn clear_component(&mut self, id: ComponentId) {
        let mut targets = self.descendants(Parent::Component(id));
        targets.push(id);
        for target in targets {
            if let Some(node) = self.nodes.get_mut(target) {
                node.clear_content();
            }
        }
    }

    pub(crate) fn set_range(&mut self, id: ComponentId, range: LineRange) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.range = Some(range);
        }
    }
}

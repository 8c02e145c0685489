//! Schemas — build a whole subtree in one call.
//!
//! A [`Schema`] is a declarative description of nested components. Feeding it
//! to [`RenderTree::create_schema`] creates every node and returns a
//! [`Lookup`] with the same shape, so callers can reach any created node
//! later either by position or by name:
//!
//! ```
//! use n_render::{NamespaceId, Parent, RenderTree, Schema};
//!
//! let mut tree: RenderTree = RenderTree::new(NamespaceId(1));
//! let panel = tree
//!     .create_schema(
//!         Parent::Root,
//!         Schema::named("panel")
//!             .child(Schema::named("title"))
//!             .child(Schema::named("files").child(Schema::named("list"))),
//!     )
//!     .unwrap();
//!
//! assert_eq!(panel["files"]["list"].comp(), panel[1][0].comp());
//! ```
//!
//! The lookup is a snapshot taken at creation time. The tree stays the source
//! of truth: removing a node does not update lookups that mention it.

use std::collections::HashMap;
use std::ops::Index;

use crate::component::{ComponentId, Parent};
use crate::error::Result;
use crate::tree::RenderTree;

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// Declarative description of a component subtree.
///
/// Nodes without a name get an auto-generated `comp_<n>` name, which is not
/// stable across rebuilds. Give explicit names to anything you need to find
/// again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema<C = ()> {
    pub name: Option<String>,
    pub context: Option<C>,
    pub children: Vec<Self>,
}

impl<C> Default for Schema<C> {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl<C> Schema<C> {
    /// A node with an auto-generated name.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self {
            name: None,
            context: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            context: None,
            children: Vec::new(),
        }
    }

    /// Attach a context payload to this node.
    #[must_use]
    pub fn context(mut self, context: C) -> Self {
        self.context = Some(context);
        self
    }

    /// Append one child.
    #[must_use]
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }

    /// Append several children.
    #[must_use]
    pub fn children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children.extend(children);
        self
    }
}

// ---------------------------------------------------------------------------
// Lookup
// ---------------------------------------------------------------------------

/// Shape-mirroring index over a subtree created from a [`Schema`].
///
/// Children are addressable by 0-based position (`lookup[1]`) and by name
/// (`lookup["files"]`). When two siblings share a name, the name resolves to
/// the later one. Indexing panics on a miss; use [`get`](Self::get) and
/// [`child`](Self::child) for fallible access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lookup {
    comp: ComponentId,
    name: String,
    children: Vec<Self>,
    by_name: HashMap<String, usize>,
}

impl Lookup {
    fn new(comp: ComponentId, name: String) -> Self {
        Self {
            comp,
            name,
            children: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    fn push(&mut self, child: Self) {
        self.by_name.insert(child.name.clone(), self.children.len());
        self.children.push(child);
    }

    /// The component created for this schema node.
    #[inline]
    #[must_use]
    pub const fn comp(&self) -> ComponentId {
        self.comp
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Self> {
        self.children.get(index)
    }

    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.by_name.get(name).map(|&i| &self.children[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Self> {
        self.children.iter()
    }
}

impl Index<usize> for Lookup {
    type Output = Self;

    fn index(&self, index: usize) -> &Self {
        &self.children[index]
    }
}

impl Index<&str> for Lookup {
    type Output = Self;

    fn index(&self, name: &str) -> &Self {
        match self.child(name) {
            Some(child) => child,
            None => panic!("no child named {name:?} under {:?}", self.name),
        }
    }
}

impl<'a> IntoIterator for &'a Lookup {
    type Item = &'a Lookup;
    type IntoIter = std::slice::Iter<'a, Lookup>;

    fn into_iter(self) -> Self::IntoIter {
        self.children.iter()
    }
}

// ---------------------------------------------------------------------------
// Materialization
// ---------------------------------------------------------------------------

impl<C> RenderTree<C> {
    /// Create the subtree described by `schema` under `parent`.
    ///
    /// # Errors
    ///
    /// Fails only if `parent` itself cannot take children (dead id, or a leaf
    /// with content). In that case nothing is created.
    pub fn create_schema(&mut self, parent: impl Into<Parent>, schema: Schema<C>) -> Result<Lookup> {
        self.materialize(parent.into(), schema)
    }

    fn materialize(&mut self, parent: Parent, schema: Schema<C>) -> Result<Lookup> {
        let Schema {
            name,
            context,
            children,
        } = schema;
        let id = self.insert(parent, name, context)?;
        let mut lookup = Lookup::new(id, self.nodes[id].name.clone());
        for child in children {
            let sub = self.materialize(Parent::Component(id), child)?;
            lookup.push(sub);
        }
        Ok(lookup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::NamespaceId;

    #[test]
    fn anonymous_nodes_get_auto_names() {
        let mut t: RenderTree = RenderTree::new(NamespaceId(0));
        let l = t
            .create_schema(Parent::Root, Schema::anonymous().child(Schema::anonymous()))
            .unwrap();
        assert!(l.name().starts_with("comp_"));
        assert!(l[0].name().starts_with("comp_"));
        assert_ne!(l.name(), l[0].name());
        assert_eq!(t.get(l[0].comp()).unwrap().name(), l[0].name());
    }

    #[test]
    fn rebuilt_subtree_gets_new_auto_names() {
        let mut t: RenderTree = RenderTree::new(NamespaceId(0));
        let first = t.create_schema(Parent::Root, Schema::anonymous()).unwrap();
        t.remove_component(Parent::Root, first.comp());
        let second = t.create_schema(Parent::Root, Schema::anonymous()).unwrap();
        assert_ne!(first.name(), second.name());
    }

    #[test]
    fn context_moves_into_tree() {
        let mut t: RenderTree<&str> = RenderTree::new(NamespaceId(0));
        let l = t
            .create_schema(
                Parent::Root,
                Schema::named("row").context("payload"),
            )
            .unwrap();
        assert_eq!(t.get(l.comp()).unwrap().context(), Some(&"payload"));
    }

    #[test]
    fn duplicate_sibling_names_resolve_to_last() {
        let mut t: RenderTree = RenderTree::new(NamespaceId(0));
        let l = t
            .create_schema(
                Parent::Root,
                Schema::named("p")
                    .child(Schema::named("dup"))
                    .child(Schema::named("dup")),
            )
            .unwrap();
        assert_eq!(l["dup"].comp(), l[1].comp());
        assert_eq!(l.len(), 2);
    }

    #[test]
    fn missing_lookups_are_none() {
        let mut t: RenderTree = RenderTree::new(NamespaceId(0));
        let l = t.create_schema(Parent::Root, Schema::named("p")).unwrap();
        assert!(l.get(0).is_none());
        assert!(l.child("nope").is_none());
        assert!(l.is_empty());
    }

    #[test]
    fn schema_under_existing_component() {
        let mut t: RenderTree = RenderTree::new(NamespaceId(0));
        let holder = t.create_named(Parent::Root, "holder", None).unwrap();
        let l = t
            .create_schema(holder, Schema::named("a").child(Schema::named("b")))
            .unwrap();
        assert_eq!(t.get(holder).unwrap().children(), &[l.comp()]);
        assert_eq!(t.parent(l["b"].comp()), Some(Parent::Component(l.comp())));
    }

    #[test]
    fn schema_under_filled_leaf_creates_nothing() {
        let mut t: RenderTree = RenderTree::new(NamespaceId(0));
        let leaf = t.create_component(Parent::Root).unwrap();
        t.add_line(leaf, "x").unwrap();
        let before = t.len();
        assert!(t.create_schema(leaf, Schema::named("a")).is_err());
        assert_eq!(t.len(), before);
    }
}

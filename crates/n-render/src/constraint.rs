//! Cursor constraints — keep the cursor on real content lines.
//!
//! A panel registers the components whose lines are selectable (file rows,
//! commit entries). Every cursor motion then goes through
//! [`CursorConstraint::constrain`], which returns the line the cursor should
//! actually land on:
//!
//! - Zero-height components are never targets, so collapsed or empty
//!   sections are skipped.
//! - A motion that overlaps registered components lands inside the first
//!   (moving up) or last (moving down) of them. Stepping past that one's edge
//!   moves into the next non-empty component in the direction of travel, so
//!   `j`/`k` feel continuous across titles and separators.
//! - A motion that touches no component snaps to the nearest one.
//! - With nothing to land on, the cursor stays where it was.
//!
//! ```text
//!   0  Changes          ← title (not registered)
//!   1  M src/lib.rs  ┐
//!   2  A README.md   ┘ files.working
//!      (empty)         files.conflicts, height 0
//!   3  Staged           ← title
//!   4  M Cargo.toml  ┐ files.staged
//! ```
//!
//! Ranges are read live from the tree, so the tree must have been flattened
//! since its last structural change.

use crate::component::{Component, ComponentId, LineRange};
use crate::host::{Host, WindowHandle};
use crate::tree::RenderTree;

/// A requested cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Move `delta` lines from the 1-based `cursor` line.
    Delta { cursor: usize, delta: isize },
    /// Explicit 0-based endpoints, for direct jumps.
    Span { from: isize, to: isize },
}

impl Motion {
    /// 0-based `(from, to)` endpoints of the motion.
    #[must_use]
    pub fn endpoints(self) -> (isize, isize) {
        match self {
            Self::Delta { cursor, delta } => {
                let from = signed(cursor) - 1;
                (from, from.saturating_add(delta))
            }
            Self::Span { from, to } => (from, to),
        }
    }
}

/// Restricts cursor placement to a fixed set of components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CursorConstraint {
    /// Sorted by line start as of construction.
    components: Vec<ComponentId>,
}

impl CursorConstraint {
    /// Register `components`, sorted (stably) by their current line start.
    ///
    /// Flatten the tree first: components that were never flattened sort to
    /// the front and are ignored until they get a range.
    #[must_use]
    pub fn new<C>(tree: &RenderTree<C>, components: impl IntoIterator<Item = ComponentId>) -> Self {
        let mut components: Vec<ComponentId> = components.into_iter().collect();
        components.sort_by_key(|&id| tree.get(id).and_then(Component::line_start));
        Self { components }
    }

    /// Registered components in sorted order.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[ComponentId] {
        &self.components
    }

    /// Resolve `motion` to a 1-based target line.
    #[must_use]
    pub fn constrain<C>(&self, tree: &RenderTree<C>, motion: Motion) -> usize {
        let (from, to) = motion.endpoints();
        let (min, max) = (from.min(to), from.max(to));

        // Non-empty ranges in sorted order; `top`/`bottom`/`nearest` index it.
        let mut live: Vec<LineRange> = Vec::with_capacity(self.components.len());
        let mut top: Option<usize> = None;
        let mut bottom: Option<usize> = None;
        let mut nearest: Option<(usize, usize)> = None;

        for &id in &self.components {
            let Some(range) = tree.get(id).and_then(Component::range) else {
                continue;
            };
            if range.is_empty() {
                continue;
            }
            let idx = live.len();
            live.push(range);

            let (start, end) = (signed(range.start), signed(range.end));
            if min <= end && max >= start {
                if top.is_none() {
                    top = Some(idx);
                }
                bottom = Some(idx);
            }

            let dist = to.abs_diff(start).min(to.abs_diff(end));
            if nearest.is_none_or(|(_, best)| dist < best) {
                nearest = Some((idx, dist));
            }
        }

        let target = match (top, bottom) {
            (Some(top), Some(bottom)) => {
                if to < from {
                    // Leaving the top region upward enters the one above.
                    if to < signed(live[top].start) && top > 0 {
                        top - 1
                    } else {
                        top
                    }
                } else if to >= signed(live[bottom].end) && bottom + 1 < live.len() {
                    bottom + 1
                } else {
                    bottom
                }
            }
            _ => match nearest {
                Some((idx, _)) => idx,
                None => {
                    let stay = from.saturating_add(1).max(1);
                    log::trace!("cursor constraint: no target, staying at {stay}");
                    return stay.unsigned_abs();
                }
            },
        };

        let line = clamp_into(to, live[target]);
        log::trace!("cursor constraint: {from}->{to} lands on {line}");
        line
    }

    /// Resolve a `delta` motion from the cursor of `window`.
    ///
    /// # Errors
    ///
    /// Propagates the host's error if the window cursor cannot be read.
    pub fn constrain_window<C, H: Host>(
        &self,
        tree: &RenderTree<C>,
        host: &H,
        window: WindowHandle,
        delta: isize,
    ) -> Result<usize, H::Error> {
        let cursor = host.cursor(window)?;
        Ok(self.constrain(tree, Motion::Delta { cursor, delta }))
    }
}

/// Shortcut for [`CursorConstraint::new`].
#[must_use]
pub fn create_cursor_constraint<C>(
    tree: &RenderTree<C>,
    components: impl IntoIterator<Item = ComponentId>,
) -> CursorConstraint {
    CursorConstraint::new(tree, components)
}

/// 1-based line for 0-based `to`, forced into `range`.
fn clamp_into(to: isize, range: LineRange) -> usize {
    to.saturating_add(1)
        .max(signed(range.start) + 1)
        .min(signed(range.end))
        .unsigned_abs()
}

fn signed(n: usize) -> isize {
    isize::try_from(n).unwrap_or(isize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::component::Parent;
    use crate::host::NamespaceId;

    /// Build root leaves with the given line counts and flatten.
    fn layout(heights: &[usize]) -> (RenderTree, Vec<ComponentId>) {
        let mut t = RenderTree::new(NamespaceId(0));
        let mut ids = Vec::new();
        for (i, &h) in heights.iter().enumerate() {
            let id = t.create_component(Parent::Root).unwrap();
            for n in 0..h {
                t.add_line(id, format!("{i}:{n}")).unwrap();
            }
            ids.push(id);
        }
        t.flatten();
        (t, ids)
    }

    #[test]
    fn delta_endpoints_are_zero_based() {
        assert_eq!(Motion::Delta { cursor: 3, delta: 2 }.endpoints(), (2, 4));
        assert_eq!(Motion::Delta { cursor: 1, delta: -1 }.endpoints(), (0, -1));
        assert_eq!(Motion::Span { from: 5, to: 1 }.endpoints(), (5, 1));
    }

    #[test]
    fn sorts_by_line_start() {
        let (t, ids) = layout(&[1, 2, 3]);
        let c = CursorConstraint::new(&t, [ids[2], ids[0], ids[1]]);
        assert_eq!(c.components(), &[ids[0], ids[1], ids[2]]);
    }

    #[test]
    fn skips_collapsed_component_moving_down() {
        // A: lines 0..2, B: empty, C: lines 2..5.
        let (t, ids) = layout(&[2, 0, 3]);
        let c = CursorConstraint::new(&t, ids.clone());
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 2, delta: 1 }), 3);
    }

    #[test]
    fn steps_within_a_component() {
        let (t, ids) = layout(&[5]);
        let c = CursorConstraint::new(&t, ids);
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 2, delta: 1 }), 3);
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 4, delta: -2 }), 2);
    }

    #[test]
    fn clamps_at_tree_edges() {
        let (t, ids) = layout(&[3]);
        let c = CursorConstraint::new(&t, ids);
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 3, delta: 10 }), 3);
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 1, delta: -10 }), 1);
    }

    #[test]
    fn jumps_over_unregistered_title_moving_up() {
        // title(1) | files(2) | title(1) | staged(2)
        let (t, ids) = layout(&[1, 2, 1, 2]);
        let c = CursorConstraint::new(&t, [ids[1], ids[3]]);
        // From first staged row (line 5, 1-based) one up: lands in files.
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 5, delta: -1 }), 3);
    }

    #[test]
    fn jumps_over_unregistered_title_moving_down() {
        let (t, ids) = layout(&[1, 2, 1, 2]);
        let c = CursorConstraint::new(&t, [ids[1], ids[3]]);
        // Last files row is line 3; one down crosses the title.
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 3, delta: 1 }), 5);
    }

    #[test]
    fn snaps_to_nearest_when_nothing_overlaps() {
        // title(3) | files(2) | footer(4)
        let (t, ids) = layout(&[3, 2, 4]);
        let c = CursorConstraint::new(&t, [ids[1]]);
        assert_eq!(c.constrain(&t, Motion::Span { from: 0, to: 0 }), 4);
        assert_eq!(c.constrain(&t, Motion::Span { from: 8, to: 8 }), 5);
    }

    #[test]
    fn empty_set_does_not_move() {
        let (t, _) = layout(&[3]);
        let c = CursorConstraint::new(&t, Vec::new());
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 2, delta: 1 }), 2);

        let (t, ids) = layout(&[0, 0]);
        let c = CursorConstraint::new(&t, ids);
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 1, delta: 1 }), 1);
    }

    #[test]
    fn unflattened_components_are_ignored() {
        let mut t: RenderTree = RenderTree::new(NamespaceId(0));
        let a = t.create_component(Parent::Root).unwrap();
        t.add_line(a, "x").unwrap();
        let c = CursorConstraint::new(&t, [a]);
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 4, delta: 1 }), 4);
        // Flattening makes it a target without rebuilding the constraint.
        t.flatten();
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 4, delta: 1 }), 1);
    }

    #[test]
    fn extreme_targets_do_not_overflow() {
        let (t, ids) = layout(&[2]);
        let c = CursorConstraint::new(&t, ids);
        let down = Motion::Delta { cursor: 1, delta: isize::MAX };
        assert_eq!(c.constrain(&t, down), 2);
        assert_eq!(c.constrain(&t, Motion::Span { from: 0, to: isize::MIN }), 1);
        assert_eq!(c.constrain(&t, Motion::Span { from: isize::MAX, to: isize::MAX }), 2);

        let empty = CursorConstraint::default();
        let stay = Motion::Span { from: isize::MAX, to: isize::MAX };
        assert_eq!(empty.constrain(&t, stay), isize::MAX.unsigned_abs());
    }

    #[test]
    fn removed_components_are_ignored() {
        let (mut t, ids) = layout(&[2, 2]);
        let c = CursorConstraint::new(&t, ids.clone());
        t.remove_component(Parent::Root, ids[1]);
        t.flatten();
        assert_eq!(c.constrain(&t, Motion::Delta { cursor: 2, delta: 1 }), 2);
    }
}

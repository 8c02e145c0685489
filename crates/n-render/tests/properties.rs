//! Whole-tree properties of the flatten pass and the cursor constraint.

use n_render::{
    ComponentId, CursorConstraint, HighlightSpan, LineRange, Motion, NamespaceId, Parent,
    RenderTree, Schema,
};
use pretty_assertions::assert_eq;

/// A panel-shaped tree:
///
/// ```text
/// title            "Changes"
/// files
/// ├── row_a        "M a.rs" + status highlight
/// ├── row_b        (empty)
/// └── group
///     ├── row_c    "A c.rs", "  detail"
///     └── row_d    "D d.rs"
/// footer           "2 files"
/// ```
fn panel() -> (RenderTree, Vec<ComponentId>) {
    let mut t = RenderTree::new(NamespaceId(1));
    let title = t.create_named(Parent::Root, "title", None).unwrap();
    let files = t.create_named(Parent::Root, "files", None).unwrap();
    let row_a = t.create_named(files, "row_a", None).unwrap();
    let row_b = t.create_named(files, "row_b", None).unwrap();
    let group = t.create_named(files, "group", None).unwrap();
    let row_c = t.create_named(group, "row_c", None).unwrap();
    let row_d = t.create_named(group, "row_d", None).unwrap();
    let footer = t.create_named(Parent::Root, "footer", None).unwrap();

    t.add_line_highlighted(title, "Changes", "Title").unwrap();
    t.add_line(row_a, "M a.rs").unwrap();
    t.add_highlight(row_a, "StatusModified", 0, 0, 1).unwrap();
    t.add_line(row_c, "A c.rs").unwrap();
    t.add_line(row_c, "  detail").unwrap();
    t.add_highlight(row_c, "Dim", 1, 2, 8).unwrap();
    t.add_line(row_d, "D d.rs").unwrap();
    t.add_line(footer, "2 files").unwrap();

    (t, vec![title, files, row_a, row_b, group, row_c, row_d, footer])
}

#[test]
fn total_length_is_sum_of_leaves_in_order() {
    let (mut t, _) = panel();
    let expected: Vec<String> = t
        .leaves_of_tree()
        .into_iter()
        .flat_map(|id| t.get(id).unwrap().lines().to_vec())
        .collect();
    let flat = t.flatten();
    assert_eq!(flat.lines, expected);
    assert_eq!(
        flat.lines,
        vec!["Changes", "M a.rs", "A c.rs", "  detail", "D d.rs", "2 files"]
    );
}

#[test]
fn interior_ranges_match_children() {
    let (mut t, ids) = panel();
    t.flatten();
    for &id in &ids {
        let node = t.get(id).unwrap();
        let range = node.range().unwrap();
        assert!(range.start <= range.end);
        if let (Some(first), Some(last)) = (node.children().first(), node.children().last()) {
            assert_eq!(range.start, t.get(*first).unwrap().line_start().unwrap());
            assert_eq!(range.end, t.get(*last).unwrap().line_end().unwrap());
        }
    }
    let files = t.find("files").unwrap();
    assert_eq!(t.get(files).unwrap().range(), Some(LineRange::new(1, 5)));
    let row_b = t.find("row_b").unwrap();
    assert_eq!(t.get(row_b).unwrap().range(), Some(LineRange::new(2, 2)));
}

#[test]
fn highlights_are_offset_by_leaf_start() {
    let (mut t, _) = panel();
    let flat = t.flatten();
    assert_eq!(
        flat.highlights,
        vec![
            HighlightSpan::whole_line("Title", 0),
            HighlightSpan::new("StatusModified", 1, 0, 1),
            HighlightSpan::new("Dim", 3, 2, 8),
        ]
    );
    for leaf in t.leaves_of_tree() {
        let node = t.get(leaf).unwrap();
        let base = node.line_start().unwrap();
        for span in node.highlights() {
            assert!(flat.highlights.contains(&span.offset(base)));
        }
    }
}

#[test]
fn reflatten_is_idempotent() {
    let (mut t, ids) = panel();
    let first = t.flatten();
    let ranges: Vec<_> = ids.iter().map(|&id| t.get(id).unwrap().range()).collect();
    let second = t.flatten();
    let again: Vec<_> = ids.iter().map(|&id| t.get(id).unwrap().range()).collect();
    assert_eq!(first, second);
    assert_eq!(ranges, again);
}

#[test]
fn clear_resets_every_range() {
    let (mut t, ids) = panel();
    t.flatten();
    t.clear();
    for &id in &ids {
        let node = t.get(id).unwrap();
        assert_eq!(node.range(), None);
        assert_eq!(node.line_start(), None);
        assert_eq!(node.height(), 0);
    }
    let flat = t.flatten();
    assert!(flat.is_empty());
    assert!(flat.highlights.is_empty());
}

#[test]
fn constraint_clamps_far_targets_into_range() {
    let (mut t, _) = panel();
    t.flatten();
    let group = t.find("group").unwrap();
    let c = CursorConstraint::new(&t, [group]);
    let node = t.get(group).unwrap();
    let (s, h) = (node.line_start().unwrap(), node.height());

    for (from, to) in [(0, -50), (0, 100), (100, 0), (-5, -5), (50, 50)] {
        let line = c.constrain(&t, Motion::Span { from, to });
        assert!(
            (s + 1..=s + h).contains(&line),
            "{from}->{to} gave {line}, outside {}..={}",
            s + 1,
            s + h
        );
    }

    let far_down = c.constrain(&t, Motion::Delta { cursor: s + 1, delta: isize::MAX });
    assert_eq!(far_down, s + h);
    let far_up = c.constrain(&t, Motion::Span { from: 0, to: isize::MIN });
    assert_eq!(far_up, s + 1);
}

#[test]
fn collapsed_component_is_skipped() {
    // A: 2 lines, B: collapsed, C: 3 lines.
    let mut t: RenderTree = RenderTree::new(NamespaceId(1));
    let a = t.create_component(Parent::Root).unwrap();
    let b = t.create_component(Parent::Root).unwrap();
    let c = t.create_component(Parent::Root).unwrap();
    t.add_line(a, "a0").unwrap();
    t.add_line(a, "a1").unwrap();
    for n in 0..3 {
        t.add_line(c, format!("c{n}")).unwrap();
    }
    t.flatten();
    assert_eq!(t.get(a).unwrap().range(), Some(LineRange::new(0, 2)));
    assert_eq!(t.get(b).unwrap().height(), 0);
    assert_eq!(t.get(c).unwrap().range(), Some(LineRange::new(2, 5)));

    let constraint = CursorConstraint::new(&t, [a, b, c]);
    let line = constraint.constrain(&t, Motion::Delta { cursor: 2, delta: 1 });
    assert_eq!(line, 3);
    assert!(!t.get(b).unwrap().range().unwrap().contains(line - 1));
}

#[test]
fn schema_lookup_by_name_and_position() {
    let mut t: RenderTree = RenderTree::new(NamespaceId(1));
    let result = t
        .create_schema(
            Parent::Root,
            Schema::named("root")
                .child(Schema::named("x"))
                .child(Schema::named("y").child(Schema::named("z"))),
        )
        .unwrap();

    assert_eq!(result.name(), "root");
    assert_eq!(result["x"].comp(), result[0].comp());
    assert_eq!(result["y"].comp(), result[1].comp());
    assert_eq!(result["y"]["z"].comp(), result[1][0].comp());

    let root = t.get(result.comp()).unwrap();
    assert_eq!(root.children(), &[result["x"].comp(), result["y"].comp()]);
    assert_eq!(t.get(result["y"]["z"].comp()).unwrap().name(), "z");
    assert_eq!(t.len(), 4);
}

#[test]
fn cursor_maps_back_to_deepest_component() {
    let (mut t, _) = panel();
    t.flatten();
    assert_eq!(t.component_at_line(0), t.find("title"));
    assert_eq!(t.component_at_line(1), t.find("row_a"));
    assert_eq!(t.component_at_line(3), t.find("row_c"));
    assert_eq!(t.component_at_line(4), t.find("row_d"));
    assert_eq!(t.component_at_line(99), None);
}

#[test]
fn rebuild_cycle_recreates_dynamic_rows() {
    let (mut t, _) = panel();
    let files = t.find("files").unwrap();
    for child in t.get(files).unwrap().children().to_vec() {
        assert!(t.remove_component(files, child));
    }
    let row = t.create_component(files).unwrap();
    t.add_line(row, "M new.rs").unwrap();

    let flat = t.flatten();
    assert_eq!(flat.lines, vec!["Changes", "M new.rs", "2 files"]);
    assert_eq!(t.find("row_a"), None);
}

//! Host buffer — the text a panel renders into.
//!
//! A `Buffer` wraps a [`ropey::Rope`] with the handful of operations a panel
//! host needs: whole-content replacement, line access, an editable flag, a
//! loaded flag, and highlights grouped by namespace.
//!
//! # Lines
//!
//! Lines are joined with `\n` and stored without a trailing newline, so a
//! buffer always has at least one line. Replacing the content with no lines
//! leaves a single empty line, the same as a fresh editor buffer.

use std::collections::BTreeMap;

use n_render::{HighlightSpan, NamespaceId};
use ropey::Rope;

/// A text buffer backed by a rope.
#[derive(Debug, Clone)]
pub struct Buffer {
    rope: Rope,
    name: String,
    loaded: bool,
    editable: bool,
    highlights: BTreeMap<NamespaceId, Vec<HighlightSpan>>,
}

impl Buffer {
    // -- Construction -------------------------------------------------------

    /// Create an empty, loaded, editable buffer.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            rope: Rope::new(),
            name: name.into(),
            loaded: true,
            editable: true,
            highlights: BTreeMap::new(),
        }
    }

    // -- Flags --------------------------------------------------------------

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub const fn set_loaded(&mut self, loaded: bool) {
        self.loaded = loaded;
    }

    #[inline]
    #[must_use]
    pub const fn is_editable(&self) -> bool {
        self.editable
    }

    pub const fn set_editable(&mut self, editable: bool) {
        self.editable = editable;
    }

    // -- Text access --------------------------------------------------------

    /// The underlying rope.
    #[inline]
    #[must_use]
    pub const fn rope(&self) -> &Rope {
        &self.rope
    }

    /// Number of lines. Never less than 1.
    #[inline]
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line `line` without its line ending, or `None` past the end.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        Some(text)
    }

    /// All lines, without line endings.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).filter_map(|i| self.line(i)).collect()
    }

    /// Whole content as one string.
    #[must_use]
    pub fn contents(&self) -> String {
        self.rope.to_string()
    }

    /// Replace all text. Callers check the editable flag and reject lines
    /// containing `\n` before getting here.
    pub fn replace_lines(&mut self, lines: &[String]) {
        self.rope = Rope::from_str(&lines.join("\n"));
    }

    // -- Highlights ---------------------------------------------------------

    /// Spans stored in `namespace`, in insertion order.
    #[must_use]
    pub fn highlights(&self, namespace: NamespaceId) -> &[HighlightSpan] {
        match self.highlights.get(&namespace) {
            Some(spans) => spans,
            None => &[],
        }
    }

    /// Spans from every namespace that touch `line`, namespaces in id order.
    #[must_use]
    pub fn highlights_on_line(&self, line: usize) -> Vec<&HighlightSpan> {
        self.highlights
            .values()
            .flatten()
            .filter(|span| span.line == line)
            .collect()
    }

    /// Namespaces that currently hold at least one span.
    #[must_use]
    pub fn namespaces(&self) -> Vec<NamespaceId> {
        self.highlights
            .iter()
            .filter(|(_, spans)| !spans.is_empty())
            .map(|(&ns, _)| ns)
            .collect()
    }

    pub fn push_highlight(&mut self, namespace: NamespaceId, span: HighlightSpan) {
        self.highlights.entry(namespace).or_default().push(span);
    }

    pub fn clear_namespace(&mut self, namespace: NamespaceId) {
        self.highlights.remove(&namespace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn new_buffer_has_one_empty_line() {
        let buf = Buffer::new("panel");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(0), Some(String::new()));
        assert_eq!(buf.line(1), None);
        assert!(buf.is_loaded());
        assert!(buf.is_editable());
    }

    #[test]
    fn replace_and_read_back() {
        let mut buf = Buffer::new("panel");
        buf.replace_lines(&lines(&["one", "two", "three"]));
        assert_eq!(buf.line_count(), 3);
        assert_eq!(buf.lines(), vec!["one", "two", "three"]);
        assert_eq!(buf.contents(), "one\ntwo\nthree");
    }

    #[test]
    fn replace_with_nothing_leaves_one_line() {
        let mut buf = Buffer::new("panel");
        buf.replace_lines(&lines(&["a", "b"]));
        buf.replace_lines(&[]);
        assert_eq!(buf.lines(), vec![""]);
    }

    #[test]
    fn trailing_empty_line_is_kept() {
        let mut buf = Buffer::new("panel");
        buf.replace_lines(&lines(&["a", ""]));
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.lines(), vec!["a", ""]);
    }

    #[test]
    fn unicode_lines() {
        let mut buf = Buffer::new("panel");
        buf.replace_lines(&lines(&["café", "日本"]));
        assert_eq!(buf.line(0).as_deref(), Some("café"));
        assert_eq!(buf.line(1).as_deref(), Some("日本"));
    }

    #[test]
    fn namespaces_are_independent() {
        let mut buf = Buffer::new("panel");
        buf.replace_lines(&lines(&["a", "b"]));
        buf.push_highlight(NamespaceId(1), HighlightSpan::whole_line("A", 0));
        buf.push_highlight(NamespaceId(2), HighlightSpan::whole_line("B", 0));
        buf.push_highlight(NamespaceId(2), HighlightSpan::whole_line("B", 1));

        assert_eq!(buf.highlights_on_line(0).len(), 2);
        buf.clear_namespace(NamespaceId(2));
        assert!(buf.highlights(NamespaceId(2)).is_empty());
        assert_eq!(buf.highlights(NamespaceId(1)).len(), 1);
        assert_eq!(buf.namespaces(), vec![NamespaceId(1)]);
    }
}

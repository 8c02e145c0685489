//! Host boundary — what the render engine needs from the editor.
//!
//! The engine never touches a live editor directly. Everything it needs
//! (buffer state, line replacement, namespaced highlights, window cursors)
//! goes through the [`Host`] trait, and [`render`] is the one operation that
//! writes a flattened tree into a host buffer.
//!
//! # Render contract
//!
//! 1. A buffer that is not loaded is skipped silently. Hidden panels are
//!    normal, not an error.
//! 2. The buffer is made editable for the write and its previous editable
//!    flag is put back afterwards, whether or not the write succeeded.
//! 3. All lines are replaced with the flattened lines.
//! 4. Only the tree's own highlight namespace is cleared before the new spans
//!    are applied. Other namespaces on the same buffer are left alone.

use std::fmt;
use std::time::Instant;

use crate::span::HighlightSpan;
use crate::tree::RenderTree;

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Host buffer handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BufferHandle(pub u32);

/// Host window handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowHandle(pub u32);

/// Highlight namespace. One per [`RenderTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NamespaceId(pub u32);

impl fmt::Display for BufferHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "buf#{}", self.0)
    }
}

impl fmt::Display for WindowHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "win#{}", self.0)
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ns#{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Host
// ---------------------------------------------------------------------------

/// Editor operations the render engine depends on.
pub trait Host {
    type Error: std::error::Error;

    /// Whether the buffer exists and is currently loaded.
    fn buffer_is_loaded(&self, buffer: BufferHandle) -> bool;

    /// Current editable flag of the buffer.
    ///
    /// # Errors
    ///
    /// Fails for an unknown buffer.
    fn editable(&self, buffer: BufferHandle) -> Result<bool, Self::Error>;

    /// # Errors
    ///
    /// Fails for an unknown buffer.
    fn set_editable(&mut self, buffer: BufferHandle, editable: bool) -> Result<(), Self::Error>;

    /// Replace every line of the buffer.
    ///
    /// # Errors
    ///
    /// Fails for an unknown buffer or one that is not editable.
    fn set_lines(&mut self, buffer: BufferHandle, lines: &[String]) -> Result<(), Self::Error>;

    /// Remove every highlight in `namespace` from the buffer.
    ///
    /// # Errors
    ///
    /// Fails for an unknown buffer.
    fn clear_namespace(
        &mut self,
        buffer: BufferHandle,
        namespace: NamespaceId,
    ) -> Result<(), Self::Error>;

    /// Apply one span (absolute line) in `namespace`.
    ///
    /// # Errors
    ///
    /// Fails for an unknown buffer or a line past the end of the buffer.
    fn add_highlight(
        &mut self,
        buffer: BufferHandle,
        namespace: NamespaceId,
        span: &HighlightSpan,
    ) -> Result<(), Self::Error>;

    /// Create (or look up) the namespace called `name`.
    fn create_namespace(&mut self, name: &str) -> NamespaceId;

    /// 1-based cursor line of the window.
    ///
    /// # Errors
    ///
    /// Fails for an unknown window.
    fn cursor(&self, window: WindowHandle) -> Result<usize, Self::Error>;
}

impl<C> RenderTree<C> {
    /// Create a tree drawing into the namespace named `name` on `host`. Hosts
    /// that intern namespaces hand two trees with the same name one namespace.
    pub fn for_host<H: Host>(host: &mut H, name: &str) -> Self {
        Self::new(host.create_namespace(name))
    }
}

// ---------------------------------------------------------------------------
// Render
// ---------------------------------------------------------------------------

/// Flatten `tree` and write it into `buffer`.
///
/// See the module docs for the exact contract. The flatten pass runs only
/// when the buffer is loaded, so component ranges of a hidden panel keep
/// their previous values.
///
/// # Errors
///
/// Propagates host errors. If both the write and the flag restore fail, the
/// write error is returned.
pub fn render<H: Host, C>(
    host: &mut H,
    buffer: BufferHandle,
    tree: &mut RenderTree<C>,
) -> Result<(), H::Error> {
    if !host.buffer_is_loaded(buffer) {
        log::trace!("render: {buffer} not loaded, skipping");
        return Ok(());
    }

    let started = Instant::now();
    let flat = tree.flatten();
    let namespace = tree.namespace();

    let was_editable = host.editable(buffer)?;
    host.set_editable(buffer, true)?;

    let written = write_flattened(host, buffer, namespace, &flat.lines, &flat.highlights);
    let restored = host.set_editable(buffer, was_editable);
    written.and(restored)?;

    log::debug!(
        "render: {buffer} {} lines, {} highlights in {:?}",
        flat.lines.len(),
        flat.highlights.len(),
        started.elapsed()
    );
    Ok(())
}

fn write_flattened<H: Host>(
    host: &mut H,
    buffer: BufferHandle,
    namespace: NamespaceId,
    lines: &[String],
    highlights: &[HighlightSpan],
) -> Result<(), H::Error> {
    host.set_lines(buffer, lines)?;
    host.clear_namespace(buffer, namespace)?;
    for span in highlights {
        host.add_highlight(buffer, namespace, span)?;
    }
    Ok(())
}

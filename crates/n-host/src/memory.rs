//! `MemoryHost` — an editor host that lives entirely in memory.
//!
//! It implements [`n_render::Host`] over a set of [`Buffer`]s and windows.
//! The binary paints from it, and tests use it to observe exactly what a
//! render wrote.
//!
//! Handles are small integers handed out in creation order and never reused.
//! Namespaces are interned by name: asking for the same name twice returns
//! the same id.

use std::collections::BTreeMap;

use n_render::{BufferHandle, HighlightSpan, Host, NamespaceId, WindowHandle};

use crate::buffer::Buffer;
use crate::error::{HostError, Result};

/// A window showing one buffer, with a 1-based cursor line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub buffer: BufferHandle,
    pub cursor: usize,
}

/// In-memory buffers, windows, and highlight namespaces.
#[derive(Debug, Default)]
pub struct MemoryHost {
    buffers: BTreeMap<BufferHandle, Buffer>,
    windows: BTreeMap<WindowHandle, Window>,
    namespaces: Vec<String>,
    next_buffer: u32,
    next_window: u32,
}

impl MemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // -- Buffers ------------------------------------------------------------

    /// Create a loaded, read-only buffer. Panel buffers are not editable by
    /// the user; [`n_render::render`] lifts the flag while it writes.
    pub fn create_buffer(&mut self, name: impl Into<String>) -> BufferHandle {
        self.next_buffer += 1;
        let handle = BufferHandle(self.next_buffer);
        let mut buffer = Buffer::new(name);
        buffer.set_editable(false);
        self.buffers.insert(handle, buffer);
        log::trace!("host: created {handle}");
        handle
    }

    #[must_use]
    pub fn buffer(&self, handle: BufferHandle) -> Option<&Buffer> {
        self.buffers.get(&handle)
    }

    fn buffer_mut(&mut self, handle: BufferHandle) -> Result<&mut Buffer> {
        self.buffers
            .get_mut(&handle)
            .ok_or(HostError::UnknownBuffer(handle))
    }

    /// Mark a buffer loaded or unloaded (a hidden panel).
    ///
    /// # Errors
    ///
    /// [`HostError::UnknownBuffer`] for a bad handle.
    pub fn set_loaded(&mut self, handle: BufferHandle, loaded: bool) -> Result<()> {
        self.buffer_mut(handle)?.set_loaded(loaded);
        Ok(())
    }

    /// Lines of a buffer. Empty for an unknown handle.
    #[must_use]
    pub fn lines(&self, handle: BufferHandle) -> Vec<String> {
        self.buffers.get(&handle).map(Buffer::lines).unwrap_or_default()
    }

    // -- Windows ------------------------------------------------------------

    /// Open a window on `buffer` with the cursor on line 1.
    ///
    /// # Errors
    ///
    /// [`HostError::UnknownBuffer`] for a bad handle.
    pub fn open_window(&mut self, buffer: BufferHandle) -> Result<WindowHandle> {
        if !self.buffers.contains_key(&buffer) {
            return Err(HostError::UnknownBuffer(buffer));
        }
        self.next_window += 1;
        let handle = WindowHandle(self.next_window);
        self.windows.insert(handle, Window { buffer, cursor: 1 });
        Ok(handle)
    }

    #[must_use]
    pub fn window(&self, handle: WindowHandle) -> Option<&Window> {
        self.windows.get(&handle)
    }

    /// Move the cursor, clamped to the window buffer's lines. Returns the
    /// line the cursor ended up on.
    ///
    /// # Errors
    ///
    /// Fails for an unknown window, or a window whose buffer is gone.
    pub fn set_cursor(&mut self, handle: WindowHandle, line: usize) -> Result<usize> {
        let window = self
            .windows
            .get_mut(&handle)
            .ok_or(HostError::UnknownWindow(handle))?;
        let count = self
            .buffers
            .get(&window.buffer)
            .ok_or(HostError::UnknownBuffer(window.buffer))?
            .line_count();
        window.cursor = line.clamp(1, count);
        Ok(window.cursor)
    }

    // -- Namespaces ---------------------------------------------------------

    /// Name a namespace was created with.
    #[must_use]
    pub fn namespace_name(&self, id: NamespaceId) -> Option<&str> {
        self.namespaces.get(id.0 as usize).map(String::as_str)
    }
}

impl Host for MemoryHost {
    type Error = HostError;

    fn buffer_is_loaded(&self, buffer: BufferHandle) -> bool {
        self.buffers.get(&buffer).is_some_and(Buffer::is_loaded)
    }

    fn editable(&self, buffer: BufferHandle) -> Result<bool> {
        self.buffers
            .get(&buffer)
            .map(Buffer::is_editable)
            .ok_or(HostError::UnknownBuffer(buffer))
    }

    fn set_editable(&mut self, buffer: BufferHandle, editable: bool) -> Result<()> {
        self.buffer_mut(buffer)?.set_editable(editable);
        Ok(())
    }

    fn set_lines(&mut self, buffer: BufferHandle, lines: &[String]) -> Result<()> {
        if let Some(index) = lines.iter().position(|l| l.contains('\n')) {
            return Err(HostError::NewlineInLine { buffer, index });
        }
        let buf = self.buffer_mut(buffer)?;
        if !buf.is_editable() {
            return Err(HostError::NotEditable(buffer));
        }
        buf.replace_lines(lines);

        // Keep window cursors inside the new content.
        let count = buf.line_count();
        for window in self.windows.values_mut().filter(|w| w.buffer == buffer) {
            window.cursor = window.cursor.clamp(1, count);
        }
        Ok(())
    }

    fn clear_namespace(&mut self, buffer: BufferHandle, namespace: NamespaceId) -> Result<()> {
        self.buffer_mut(buffer)?.clear_namespace(namespace);
        Ok(())
    }

    fn add_highlight(
        &mut self,
        buffer: BufferHandle,
        namespace: NamespaceId,
        span: &HighlightSpan,
    ) -> Result<()> {
        let buf = self.buffer_mut(buffer)?;
        let count = buf.line_count();
        if span.line >= count {
            return Err(HostError::LineOutOfRange {
                buffer,
                line: span.line,
                count,
            });
        }
        buf.push_highlight(namespace, span.clone());
        Ok(())
    }

    fn create_namespace(&mut self, name: &str) -> NamespaceId {
        let index = match self.namespaces.iter().position(|n| n == name) {
            Some(index) => index,
            None => {
                self.namespaces.push(name.to_string());
                self.namespaces.len() - 1
            }
        };
        NamespaceId(u32::try_from(index).unwrap_or(u32::MAX))
    }

    fn cursor(&self, window: WindowHandle) -> Result<usize> {
        self.windows
            .get(&window)
            .map(|w| w.cursor)
            .ok_or(HostError::UnknownWindow(window))
    }
}

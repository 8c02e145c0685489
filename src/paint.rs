// SPDX-License-Identifier: MIT
//
// ANSI painting of a rendered panel buffer.
//
// The host buffer already holds the final lines and highlight spans; this
// module only turns spans into SGR foreground changes. Spans later in the
// buffer's order win where they overlap. The cursor line is drawn in reverse
// video, or marked with `>` when colors are off.

use std::io::{self, Write};

use n_host::Buffer;
use n_panels::PanelConfig;

/// Foreground color from a 256-color palette index.
///
/// Compact codes for the 16 standard colors, `38;5` for the rest.
fn fg(w: &mut impl Write, idx: u8) -> io::Result<()> {
    if idx < 8 {
        write!(w, "\x1b[{}m", 30 + u16::from(idx))
    } else if idx < 16 {
        write!(w, "\x1b[{}m", 82 + u16::from(idx))
    } else {
        write!(w, "\x1b[38;5;{idx}m")
    }
}

/// Palette index per byte of `line`, `None` for the default foreground.
fn line_colors(buffer: &Buffer, config: &PanelConfig, line: usize, len: usize) -> Vec<Option<u8>> {
    let mut colors = vec![None; len];
    for span in buffer.highlights_on_line(line) {
        let Some(color) = config.color(&span.group) else {
            continue;
        };
        let end = span.last.unwrap_or(len).min(len);
        for slot in colors.iter_mut().take(end).skip(span.first) {
            *slot = Some(color);
        }
    }
    colors
}

/// Write every line of `buffer`. `cursor` is the 1-based cursor line.
pub fn paint(
    w: &mut impl Write,
    buffer: &Buffer,
    config: &PanelConfig,
    cursor: Option<usize>,
    color: bool,
) -> io::Result<()> {
    for (i, line) in buffer.lines().iter().enumerate() {
        let selected = cursor == Some(i + 1);

        if !color {
            let mark = if selected { "> " } else { "  " };
            writeln!(w, "{mark}{line}")?;
            continue;
        }

        if selected {
            w.write_all(b"\x1b[7m")?;
        }
        let colors = line_colors(buffer, config, i, line.len());
        let mut current = None;
        for (at, ch) in line.char_indices() {
            let wanted = colors[at];
            if wanted != current {
                match wanted {
                    Some(idx) => fg(w, idx)?,
                    None => w.write_all(b"\x1b[39m")?,
                }
                current = wanted;
            }
            write!(w, "{ch}")?;
        }
        w.write_all(b"\x1b[0m\n")?;
    }
    w.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use n_render::{HighlightSpan, NamespaceId};
    use pretty_assertions::assert_eq;

    fn buffer() -> Buffer {
        let mut buf = Buffer::new("panel");
        buf.replace_lines(&["ab".to_string(), "cd".to_string()]);
        buf.push_highlight(
            NamespaceId(0),
            HighlightSpan::new(n_panels::hl::STATUS_ADDED, 0, 0, 1),
        );
        buf
    }

    fn painted(cursor: Option<usize>, color: bool) -> String {
        let mut out = Vec::new();
        paint(&mut out, &buffer(), &PanelConfig::default(), cursor, color).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn plain_output_marks_cursor() {
        assert_eq!(painted(Some(2), false), "  ab\n> cd\n");
    }

    #[test]
    fn colored_output() {
        assert_eq!(
            painted(Some(2), true),
            "\x1b[32ma\x1b[39mb\x1b[0m\n\x1b[7mcd\x1b[0m\n"
        );
    }

    #[test]
    fn bright_and_extended_palette() {
        let mut out = Vec::new();
        fg(&mut out, 9).unwrap();
        fg(&mut out, 200).unwrap();
        assert_eq!(out, b"\x1b[91m\x1b[38;5;200m");
    }
}

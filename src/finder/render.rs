//! In-place frame drawing with plain ANSI control sequences.

use super::row::Row;
use crate::config::FinderConfig;
use crate::formatting::FormatContext;
use crate::shared::text::truncate_display;
use std::io::{self, Write};

const CLEAR_LINE: &str = "\x1b[K";
const CURSOR_UP: &str = "\x1b[1A";
const PROMPT: &str = "> ";
const SELECTED_MARKER: &str = "> ";
const UNSELECTED_MARKER: &str = "  ";

pub struct Renderer<'a> {
    cfg: &'a FinderConfig,
    fmt: FormatContext,
}

impl<'a> Renderer<'a> {
    pub fn new(cfg: &'a FinderConfig, use_color: bool) -> Self {
        Self { cfg, fmt: FormatContext::new(use_color) }
    }

    /// Build the frame: a fixed-height viewport with the best row at the
    /// bottom, then the prompt. Every line fits in `width`.
    pub fn compose(
        &self,
        rows: &[Row],
        selected: usize,
        query: &str,
        width: usize,
    ) -> Vec<String> {
        let visible = rows.len().min(self.cfg.rows_to_show);
        let mut lines = Vec::with_capacity(self.cfg.rows_to_show + 1);
        lines.extend(
            std::iter::repeat_n(String::new(), self.cfg.rows_to_show - visible),
        );
        for i in (0..visible).rev() {
            lines.push(truncate_display(&self.row_line(&rows[i], i == selected), width));
        }
        let prompt = format!("{PROMPT}{query}");
        lines.push(truncate_display(&self.fmt.format_prompt(&prompt), width));
        lines
    }

    fn row_line(&self, row: &Row, selected: bool) -> String {
        let marker = if selected { SELECTED_MARKER } else { UNSELECTED_MARKER };
        let mut line = self.fmt.format_marker(marker, selected);
        line.push_str(&row.compose(|kind, text| self.fmt.paint_cell(kind, text, selected)));
        line
    }

    /// Draw a frame and return how many line breaks it emitted; the prompt
    /// line is left open so the cursor sits after the query.
    pub fn render<W: Write>(
        &self,
        out: &mut W,
        rows: &[Row],
        selected: usize,
        query: &str,
        width: usize,
    ) -> io::Result<usize> {
        let lines = self.compose(rows, selected, query, width);
        let Some((prompt, body)) = lines.split_last() else {
            return Ok(0);
        };
        for line in body {
            writeln!(out, "{line}")?;
        }
        write!(out, "{prompt}")?;
        out.flush()?;
        Ok(body.len())
    }
}

/// Clear the prompt line and the `lines` lines above it, leaving the cursor
/// where the erased frame started.
pub fn erase<W: Write>(out: &mut W, lines: usize) -> io::Result<()> {
    write!(out, "\r{CLEAR_LINE}")?;
    for _ in 0..lines {
        write!(out, "{CURSOR_UP}{CLEAR_LINE}")?;
    }
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finder::row::{CellKind, RowComponent};
    use crate::shared::text::display_len;

    fn rows(titles: &[&str]) -> Vec<Row> {
        titles
            .iter()
            .map(|t| Row { cells: vec![RowComponent::new(*t, CellKind::Title)] })
            .collect()
    }

    #[test]
    fn test_viewport_is_padded_and_best_row_is_last() {
        let cfg = FinderConfig::default();
        let renderer = Renderer::new(&cfg, false);
        let lines = renderer.compose(&rows(&["best", "second"]), 0, "qu", 80);
        assert_eq!(lines.len(), 16);
        assert!(lines[..13].iter().all(|l| l.is_empty()));
        assert_eq!(lines[13], "  second");
        assert_eq!(lines[14], "> best");
        assert_eq!(lines[15], "> qu");
    }

    #[test]
    fn test_viewport_caps_rows() {
        let cfg = FinderConfig::default();
        let renderer = Renderer::new(&cfg, false);
        let many: Vec<String> = (0..40).map(|i| format!("row{i}")).collect();
        let titles: Vec<&str> = many.iter().map(String::as_str).collect();
        let lines = renderer.compose(&rows(&titles), 3, "", 80);
        assert_eq!(lines.len(), 16);
        assert_eq!(lines[0], "  row14");
        assert_eq!(lines[11], "> row3");
        assert_eq!(lines[14], "  row0");
    }

    #[test]
    fn test_lines_never_exceed_width() {
        let cfg = FinderConfig::default();
        for use_color in [false, true] {
            let renderer = Renderer::new(&cfg, use_color);
            let long = "x".repeat(200);
            let lines = renderer.compose(&rows(&[&long, "short"]), 1, &long, 30);
            for line in &lines {
                assert!(display_len(line) <= 30, "{line:?}");
            }
        }
    }

    #[test]
    fn test_render_is_idempotent_and_counts_breaks() {
        let cfg = FinderConfig::default();
        let renderer = Renderer::new(&cfg, true);
        let rows = rows(&["a", "b"]);
        let mut first = Vec::new();
        let mut second = Vec::new();
        let n1 = renderer.render(&mut first, &rows, 1, "q", 50).unwrap();
        let n2 = renderer.render(&mut second, &rows, 1, "q", 50).unwrap();
        assert_eq!(first, second);
        assert_eq!(n1, 15);
        assert_eq!(n2, 15);
        let text = String::from_utf8(first).unwrap();
        assert_eq!(text.matches('\n').count(), 15);
        assert!(!text.ends_with('\n'));
    }

    #[test]
    fn test_erase_moves_up_per_line() {
        let mut out = Vec::new();
        erase(&mut out, 3).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "\r\x1b[K\x1b[1A\x1b[K\x1b[1A\x1b[K\x1b[1A\x1b[K");
    }
}

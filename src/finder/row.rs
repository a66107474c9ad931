//! Renderer-agnostic rows: typed, width-constrained text cells.

use super::matcher::SubsequenceMatch;
use crate::config::FinderConfig;
use crate::note::Note;
use crate::shared::text::{ELLIPSIS, pad_display, truncate_display};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Title,
    PlainText,
    HighlightedText,
    Date,
    Decoration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowComponent {
    pub text: String,
    pub kind: CellKind,
    /// `None` means unbounded.
    pub min_width: Option<usize>,
    pub max_width: Option<usize>,
}

impl RowComponent {
    pub fn new(text: impl Into<String>, kind: CellKind) -> Self {
        Self { text: text.into(), kind, min_width: None, max_width: None }
    }

    pub fn fixed(text: impl Into<String>, kind: CellKind, width: usize) -> Self {
        Self {
            text: text.into(),
            kind,
            min_width: Some(width),
            max_width: Some(width),
        }
    }

    /// Cell text after applying the max (ellipsis) and min (padding) bounds.
    pub fn laid_out(&self) -> String {
        let text = match self.max_width {
            Some(max) => truncate_display(&self.text, max),
            None => self.text.clone(),
        };
        match self.min_width {
            Some(min) => pad_display(&text, min),
            None => text,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<RowComponent>,
}

impl Row {
    /// Lay out every cell and join them, letting `paint` style each piece.
    /// Decoration cells are framed by one space on each side.
    pub fn compose(&self, mut paint: impl FnMut(CellKind, &str) -> String) -> String {
        let mut out = String::new();
        for cell in &self.cells {
            let text = cell.laid_out();
            if cell.kind == CellKind::Decoration {
                out.push(' ');
                out.push_str(&paint(cell.kind, &text));
                out.push(' ');
            } else {
                out.push_str(&paint(cell.kind, &text));
            }
        }
        out
    }

    pub fn plain(&self) -> String {
        self.compose(|_, text| text.to_string())
    }
}

const SEPARATOR: &str = "│";

fn title_cell(title: &str, cfg: &FinderConfig) -> RowComponent {
    RowComponent::fixed(sanitize(title), CellKind::Title, cfg.title_column_width)
}

fn separator() -> RowComponent {
    RowComponent::fixed(SEPARATOR, CellKind::Decoration, 1)
}

/// `[Title | Date]` row for note search.
pub fn note_row(note: &Note, cfg: &FinderConfig) -> Row {
    Row {
        cells: vec![
            title_cell(&note.title, cfg),
            separator(),
            RowComponent::new(
                note.modified.format(cfg.date_format).to_string(),
                CellKind::Date,
            ),
        ],
    }
}

/// `[Title | runs...]` row for content search. The line is split into
/// alternating plain and highlighted runs at the matched positions.
pub fn line_row(
    note_title: &str,
    line: &str,
    matched: &SubsequenceMatch,
    cfg: &FinderConfig,
) -> Row {
    let mut cells = vec![title_cell(note_title, cfg), separator()];
    let mut hits = matched.positions.iter().peekable();
    let mut run = String::new();
    let mut run_highlighted = false;

    for (i, c) in sanitize(line).chars().enumerate() {
        let hit = hits.next_if(|&&p| p == i).is_some();
        if hit != run_highlighted && !run.is_empty() {
            cells.push(text_cell(std::mem::take(&mut run), run_highlighted));
        }
        run_highlighted = hit;
        run.push(c);
    }
    if !run.is_empty() {
        cells.push(text_cell(run, run_highlighted));
    }

    // Long unmatched lead-in collapses to a marker.
    if let Some(first) = cells.get_mut(2) {
        if first.kind == CellKind::PlainText
            && first.text.chars().count() > cfg.line_context_width
        {
            first.text = ELLIPSIS.to_string();
        }
    }
    Row { cells }
}

fn text_cell(text: String, highlighted: bool) -> RowComponent {
    let kind = if highlighted { CellKind::HighlightedText } else { CellKind::PlainText };
    RowComponent::new(text, kind)
}

/// One printable char per input char, so match positions stay valid.
fn sanitize(s: &str) -> String {
    s.chars().map(|c| if c.is_control() { ' ' } else { c }).collect()
}

use crate::finder::row::CellKind;
use yansi::Paint;

/// Color palette for consistent theming
pub struct ColorPalette {
    pub title: (u8, u8, u8),
    pub muted: (u8, u8, u8),     // separators, empty states
    pub timestamp: (u8, u8, u8), // dates
    pub highlight: (u8, u8, u8), // matched characters
    /// 256-color indices for the selected row.
    pub selected_fg: u8,
    pub selected_bg: u8,
}

impl ColorPalette {
    pub const CATPPUCCIN: Self = Self {
        title: (205, 214, 244),     // Text
        muted: (108, 112, 134),     // Gray
        timestamp: (137, 180, 250), // Blue
        highlight: (243, 139, 168), // Pink
        selected_fg: 15,
        selected_bg: 8,
    };
}

/// Formatting context passed through rendering pipeline
pub struct FormatContext {
    pub use_color: bool,
    pub palette: ColorPalette,
}

impl FormatContext {
    pub fn new(use_color: bool) -> Self {
        Self { use_color, palette: ColorPalette::CATPPUCCIN }
    }

    /// Style one finder cell. Highlighted text keeps its own foreground
    /// even on the selected row.
    pub fn paint_cell(&self, kind: CellKind, text: &str, selected: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }
        let p = &self.palette;
        let (r, g, b) = match kind {
            CellKind::Title | CellKind::PlainText => p.title,
            CellKind::HighlightedText => p.highlight,
            CellKind::Date => p.timestamp,
            CellKind::Decoration => p.muted,
        };
        match (kind, selected) {
            (CellKind::HighlightedText, true) => {
                Paint::rgb(text, r, g, b).bold().on_fixed(p.selected_bg).to_string()
            }
            (_, true) => Paint::fixed(text, p.selected_fg)
                .bold()
                .on_fixed(p.selected_bg)
                .to_string(),
            (CellKind::HighlightedText, false) => {
                Paint::rgb(text, r, g, b).bold().to_string()
            }
            (_, false) => Paint::rgb(text, r, g, b).to_string(),
        }
    }

    pub fn format_marker(&self, text: &str, selected: bool) -> String {
        if self.use_color && selected {
            let p = &self.palette;
            Paint::fixed(text, p.selected_fg).bold().on_fixed(p.selected_bg).to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_prompt(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.highlight;
            Paint::rgb(text, r, g, b).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn format_tag(&self, tag: &str) -> String {
        if self.use_color {
            let (r, g, b) = crate::tags::color_for_tag(tag);
            Paint::rgb(tag, r, g, b).bold().to_string()
        } else {
            tag.to_string()
        }
    }

    pub fn format_muted(&self, text: &str) -> String {
        if self.use_color {
            let (r, g, b) = self.palette.muted;
            Paint::rgb(text, r, g, b).to_string()
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::text::display_len;

    #[test]
    fn test_format_context_no_color() {
        let ctx = FormatContext::new(false);
        assert_eq!(ctx.paint_cell(CellKind::Title, "Plan", true), "Plan");
        assert_eq!(ctx.format_tag("work"), "work");
        assert_eq!(ctx.format_prompt("> q"), "> q");
    }

    #[test]
    fn test_format_context_with_color() {
        let ctx = FormatContext::new(true);
        let cell = ctx.paint_cell(CellKind::Date, "2024/01/01", false);
        assert!(cell.contains("2024/01/01"));
        assert!(cell.len() > "2024/01/01".len());
        assert_eq!(display_len(&cell), "2024/01/01".len());
    }

    #[test]
    fn test_selected_and_highlighted_differ() {
        let ctx = FormatContext::new(true);
        let plain = ctx.paint_cell(CellKind::PlainText, "x", true);
        let hit = ctx.paint_cell(CellKind::HighlightedText, "x", true);
        let unselected = ctx.paint_cell(CellKind::PlainText, "x", false);
        assert_ne!(plain, hit);
        assert_ne!(plain, unselected);
    }
}

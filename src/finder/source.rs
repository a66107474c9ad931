//! The two searches the finder can run, behind one capability trait.

use super::matcher::{SubsequenceMatch, full_match, matches};
use super::ranker::{RankKey, rank_by, rank_notes};
use super::row::{Row, line_row, note_row};
use crate::config::FinderConfig;
use crate::note::{Note, NoteSource};
use chrono::{DateTime, Local};

/// Supplies rows for a query and maps a chosen row back to a note title.
pub trait RowSource {
    fn compute_rows(&mut self, query: &str) -> Vec<Row>;

    /// Title behind the row at `index` of the last computed list.
    fn resolve(&self, index: usize) -> Option<String>;
}

/// Ranks note titles. Every pass starts again from the incoming order, so
/// ties never depend on earlier keystrokes.
pub struct NoteSearch<'a> {
    notes: Vec<Note>,
    ranked: Vec<Note>,
    cfg: &'a FinderConfig,
    now: DateTime<Local>,
}

impl<'a> NoteSearch<'a> {
    pub fn new(notes: Vec<Note>, cfg: &'a FinderConfig) -> Self {
        Self::at(notes, cfg, Local::now())
    }

    /// Score recency against a fixed instant.
    pub fn at(notes: Vec<Note>, cfg: &'a FinderConfig, now: DateTime<Local>) -> Self {
        Self { notes, ranked: Vec::new(), cfg, now }
    }
}

impl RowSource for NoteSearch<'_> {
    fn compute_rows(&mut self, query: &str) -> Vec<Row> {
        self.ranked = self.notes.clone();
        rank_notes(&mut self.ranked, query, self.now, self.cfg);
        self.ranked.iter().map(|n| note_row(n, self.cfg)).collect()
    }

    fn resolve(&self, index: usize) -> Option<String> {
        self.ranked.get(index).map(|n| n.title.clone())
    }
}

/// One matched line of note content.
#[derive(Debug, Clone, PartialEq)]
pub struct LineEntry {
    pub note_title: String,
    pub line_index: usize,
    pub line_text: String,
    matched: SubsequenceMatch,
    key: RankKey,
}

/// Ranks individual lines of every candidate note.
pub struct ContentSearch<'a, S: NoteSource> {
    notes: Vec<Note>,
    store: &'a S,
    cfg: &'a FinderConfig,
    now: DateTime<Local>,
    entries: Vec<LineEntry>,
}

impl<'a, S: NoteSource> ContentSearch<'a, S> {
    pub fn new(notes: Vec<Note>, store: &'a S, cfg: &'a FinderConfig) -> Self {
        Self { notes, store, cfg, now: Local::now(), entries: Vec::new() }
    }

    pub fn entries(&self) -> &[LineEntry] {
        &self.entries
    }

    /// Walk notes in ranked order collecting matching lines, up to the cap.
    /// Unreadable notes are skipped.
    fn scan(&mut self, query: &str) {
        self.entries.clear();
        if query.is_empty() {
            return;
        }
        let mut notes = self.notes.clone();
        rank_notes(&mut notes, query, self.now, self.cfg);
        'notes: for note in &notes {
            let lines = match self.store.read_lines(note) {
                Ok(lines) => lines,
                Err(err) => {
                    log::warn!("skipping {}: {err}", note.path.display());
                    continue;
                }
            };
            let title_match = full_match(&note.title, query);
            for (line_index, text) in lines.into_iter().enumerate() {
                let Some(matched) = matches(&text, query) else {
                    continue;
                };
                let end = matched.end().unwrap_or(0);
                self.entries.push(LineEntry {
                    note_title: note.title.clone(),
                    line_index,
                    line_text: text,
                    matched,
                    key: RankKey { full_match: title_match, score: -(end as f64) },
                });
                if self.entries.len() >= self.cfg.max_search_rows {
                    log::debug!("line search capped at {} rows", self.entries.len());
                    break 'notes;
                }
            }
        }
        rank_by(&mut self.entries, |e| e.key);
    }
}

impl<S: NoteSource> RowSource for ContentSearch<'_, S> {
    fn compute_rows(&mut self, query: &str) -> Vec<Row> {
        self.scan(query);
        self.entries
            .iter()
            .map(|e| line_row(&e.note_title, &e.line_text, &e.matched, self.cfg))
            .collect()
    }

    fn resolve(&self, index: usize) -> Option<String> {
        self.entries.get(index).map(|e| e.note_title.clone())
    }
}

//! The interactive loop: recompute, redraw, read one key, repeat.

use super::FinderError;
use super::input::{KeyEvent, decode_keys};
use super::render::{Renderer, erase};
use super::row::Row;
use super::source::RowSource;
use super::terminal::Terminal;
use crate::config::FinderConfig;

/// Longest byte sequence a single key produces that the decoder knows.
const READ_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Confirmed,
    Cancelled,
}

/// Per-search state; created fresh for each run and dropped afterwards.
#[derive(Debug, Default)]
pub struct SessionState {
    pub query: String,
    pub rows: Vec<Row>,
    pub selected: usize,
    pub previous_lines: usize,
}

impl SessionState {
    /// Keep the selection on a drawable row: below the row count and inside
    /// the viewport. Empty lists pin it to 0.
    pub fn clamp_selection(&mut self, rows_to_show: usize) {
        let visible = self.rows.len().min(rows_to_show);
        self.selected = self.selected.min(visible.saturating_sub(1));
    }

    /// Apply one key. Returns the terminal outcome when the key ends the
    /// session.
    pub fn apply(&mut self, key: KeyEvent, rows_to_show: usize) -> Option<Outcome> {
        match key {
            KeyEvent::Confirm => return Some(Outcome::Confirmed),
            KeyEvent::Cancel => return Some(Outcome::Cancelled),
            KeyEvent::Backspace => {
                self.query.pop();
            }
            KeyEvent::Character(c) => self.query.push(c),
            KeyEvent::MoveUp => {
                let last = self.rows.len().min(rows_to_show).saturating_sub(1);
                self.selected = (self.selected + 1).min(last);
            }
            KeyEvent::MoveDown => self.selected = self.selected.saturating_sub(1),
            KeyEvent::Unknown => {}
        }
        None
    }
}

pub struct Session<'a, S: RowSource> {
    source: S,
    cfg: &'a FinderConfig,
    renderer: Renderer<'a>,
    state: SessionState,
}

impl<'a, S: RowSource> Session<'a, S> {
    pub fn new(source: S, cfg: &'a FinderConfig, use_color: bool) -> Self {
        Self {
            source,
            cfg,
            renderer: Renderer::new(cfg, use_color),
            state: SessionState::default(),
        }
    }

    /// Drive the search on `term` until the user confirms or cancels.
    /// Returns the chosen title, or `None` on cancel or an empty list.
    pub fn run<T: Terminal>(mut self, term: &mut T) -> Result<Option<String>, FinderError> {
        let mut buf = [0u8; READ_SIZE];
        let outcome = loop {
            self.refresh();
            let width = term.width().ok_or(FinderError::TerminalSize)?;
            erase(term, self.state.previous_lines)?;
            self.state.previous_lines = self.renderer.render(
                term,
                &self.state.rows,
                self.state.selected,
                &self.state.query,
                width,
            )?;

            let n = term.read_key(&mut buf)?;
            let keys = decode_keys(&buf[..n]);
            log::trace!("read {:?} -> {keys:?}", &buf[..n]);
            if let Some(outcome) = self.apply_keys(&keys) {
                break outcome;
            }
        };
        erase(term, self.state.previous_lines)?;

        log::debug!(
            "search ended {outcome:?} with query {:?} at row {}",
            self.state.query,
            self.state.selected
        );
        Ok(match outcome {
            Outcome::Confirmed if self.state.selected < self.state.rows.len() => {
                self.source.resolve(self.state.selected)
            }
            _ => None,
        })
    }

    /// Keys after the first refresh the rows before applying, so a move
    /// is clamped against the list the preceding keys produced.
    fn apply_keys(&mut self, keys: &[KeyEvent]) -> Option<Outcome> {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                self.refresh();
            }
            if let Some(outcome) = self.state.apply(*key, self.cfg.rows_to_show) {
                return Some(outcome);
            }
        }
        None
    }

    fn refresh(&mut self) {
        self.state.rows = self.source.compute_rows(&self.state.query);
        self.state.clamp_selection(self.cfg.rows_to_show);
    }
}

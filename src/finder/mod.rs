//! Incremental fuzzy finder drawn directly on the terminal.
//!
//! Every keystroke runs filter → score → sort → render: a [`RowSource`]
//! produces ranked [`row::Row`]s for the query, the [`render::Renderer`]
//! redraws the previous frame in place, and the [`Session`] blocks on the
//! next key.

pub mod input;
pub mod matcher;
pub mod ranker;
pub mod render;
pub mod row;
pub mod session;
pub mod source;
pub mod terminal;

use crate::config::FinderConfig;
use crate::note::{Note, NoteSource};
use std::io;
use thiserror::Error;

pub use session::Session;
pub use source::{ContentSearch, NoteSearch, RowSource};

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[cfg(unix)]
    #[error("could not change terminal mode: {0}")]
    Mode(#[from] nix::Error),
    #[error("could not determine the terminal width")]
    TerminalSize,
    #[error("interactive search needs a unix terminal")]
    Unsupported,
}

/// Pick a note by title.
pub fn search_notes(
    notes: Vec<Note>,
    cfg: &FinderConfig,
    use_color: bool,
) -> Result<Option<String>, FinderError> {
    let mut term = terminal::open()?;
    Session::new(NoteSearch::new(notes, cfg), cfg, use_color).run(&mut term)
}

/// Pick a note by one of its lines.
pub fn search_content<S: NoteSource>(
    notes: Vec<Note>,
    store: &S,
    cfg: &FinderConfig,
    use_color: bool,
) -> Result<Option<String>, FinderError> {
    let mut term = terminal::open()?;
    Session::new(ContentSearch::new(notes, store, cfg), cfg, use_color).run(&mut term)
}

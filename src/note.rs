use crate::tags::{Header, format_header, note_has_any_tag, parse_header};
use chrono::{DateTime, Local};
use std::cmp::Reverse;
use std::fs;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

pub const NOTE_EXT: &str = "md";
pub const MAX_DUPLICATES: usize = 10000;

#[derive(Debug, Clone)]
pub struct Note {
    pub id: Option<i64>,
    pub title: String,
    pub tags: Vec<String>,
    pub path: PathBuf,
    pub modified: DateTime<Local>,
}

/// Anything that can hand the finder a note's content line by line.
pub trait NoteSource {
    fn read_lines(&self, note: &Note) -> io::Result<Vec<String>>;
}

/// Notes stored as `<title>.md` files in a single directory.
#[derive(Debug, Clone)]
pub struct NoteStore {
    dir: PathBuf,
}

impl NoteStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All notes carrying at least one of `tags` (every note when empty),
    /// ordered by file name so callers start from a stable order.
    pub fn list_notes(&self, tags: &[String]) -> io::Result<Vec<Note>> {
        let mut notes = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type()?.is_file()
                || path.extension().and_then(|s| s.to_str()) != Some(NOTE_EXT)
            {
                continue;
            }
            let Some(title) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let header = match read_header(&path) {
                Ok(header) => header.unwrap_or_default(),
                Err(err) => {
                    log::warn!("skipping {}: {err}", path.display());
                    continue;
                }
            };
            let note = Note {
                id: header.id,
                title: title.to_string(),
                tags: header.tags,
                modified: DateTime::from(entry.metadata()?.modified()?),
                path,
            };
            if note_has_any_tag(&note, tags) {
                notes.push(note);
            }
        }
        notes.sort_by(|a, b| a.title.cmp(&b.title));
        log::debug!("listed {} notes from {}", notes.len(), self.dir.display());
        Ok(notes)
    }

    pub fn note_path(&self, title: &str) -> PathBuf {
        self.dir.join(file_name(title, NOTE_EXT, 0))
    }

    /// Path of an existing note, or a `NotFound` error naming the title.
    pub fn existing_path(&self, title: &str) -> io::Result<PathBuf> {
        let path = self.note_path(title);
        if path.is_file() {
            Ok(path)
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("Note '{title}' not found"),
            ))
        }
    }

    /// First free `name.ext`, `name(2).ext`, `name(3).ext`, ...
    pub fn available_path(&self, name: &str, ext: &str) -> io::Result<PathBuf> {
        for duplicates in 0..=MAX_DUPLICATES {
            let path = self.dir.join(file_name(name, ext, duplicates));
            if !path.exists() {
                return Ok(path);
            }
        }
        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "All file names had conflicts",
        ))
    }

    pub fn next_id(&self) -> io::Result<i64> {
        let notes = self.list_notes(&[])?;
        Ok(notes.iter().filter_map(|n| n.id).max().unwrap_or(0) + 1)
    }

    /// Write a fresh note containing only its header and return its path.
    pub fn create(&self, title: &str, tags: &[String]) -> io::Result<PathBuf> {
        let id = self.next_id()?;
        let path = self.available_path(title, NOTE_EXT)?;
        fs::write(&path, format_header(id, tags))?;
        log::info!("created note {} with id {id}", path.display());
        Ok(path)
    }

    /// Move an outside file into the notes directory under `title`,
    /// keeping its extension.
    pub fn import(&self, src: &Path, title: &str) -> io::Result<PathBuf> {
        let ext = src.extension().and_then(|s| s.to_str()).unwrap_or("");
        let dest = self.available_path(title, ext)?;
        if fs::rename(src, &dest).is_err() {
            fs::copy(src, &dest)?;
            fs::remove_file(src)?;
        }
        Ok(dest)
    }

    pub fn delete(&self, title: &str) -> io::Result<()> {
        fs::remove_file(self.existing_path(title)?)
    }

    /// Whole note as text; invalid UTF-8 is replaced rather than rejected.
    pub fn read_content(&self, note: &Note) -> io::Result<String> {
        Ok(String::from_utf8_lossy(&fs::read(&note.path)?).into_owned())
    }
}

impl NoteSource for NoteStore {
    fn read_lines(&self, note: &Note) -> io::Result<Vec<String>> {
        Ok(self
            .read_content(note)?
            .split('\n')
            .map(|l| l.trim_end_matches('\r').to_string())
            .collect())
    }
}

/// Highest id first; notes without an id go last.
pub fn sort_by_id(notes: &mut [Note]) {
    notes.sort_by_key(|n| Reverse(n.id.unwrap_or(-1)));
}

fn file_name(name: &str, ext: &str, duplicates: usize) -> String {
    let ext = if ext.is_empty() { String::new() } else { format!(".{ext}") };
    if duplicates == 0 {
        format!("{name}{ext}")
    } else {
        format!("{name}({}){ext}", duplicates + 1)
    }
}

fn read_header(path: &Path) -> io::Result<Option<Header>> {
    let mut first = Vec::new();
    BufReader::new(fs::File::open(path)?).read_until(b'\n', &mut first)?;
    Ok(parse_header(&String::from_utf8_lossy(&first)))
}

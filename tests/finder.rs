use chrono::{Duration, Local};
use note_taker::config::FinderConfig;
use note_taker::finder::terminal::Scripted;
use note_taker::finder::{ContentSearch, NoteSearch, Session};
use note_taker::note::NoteStore;
use std::fs;
use tempfile::TempDir;

fn store_with(notes: &[(&str, &str)]) -> (TempDir, NoteStore) {
    let temp = TempDir::new().unwrap();
    for (title, content) in notes {
        fs::write(temp.path().join(format!("{title}.md")), content).unwrap();
    }
    let store = NoteStore::new(temp.path());
    (temp, store)
}

#[test]
fn title_search_moves_to_second_row_and_confirms() {
    let (_temp, store) = store_with(&[
        ("Project Plan", "[@1]\n"),
        ("Grocery List", "[@2]\n"),
        ("Project Retro", "[@3]\n"),
    ]);
    let mut notes = store.list_notes(&[]).unwrap();
    let now = Local::now();
    for note in &mut notes {
        note.modified = match note.title.as_str() {
            "Project Plan" => now - Duration::days(10),
            "Grocery List" => now - Duration::days(2),
            _ => now - Duration::days(1),
        };
    }

    let cfg = FinderConfig::default();
    let mut term = Scripted::new(Some(100))
        .typed("proj")
        .key(&[27, 91, 66])
        .key(&[10]);
    let chosen = Session::new(NoteSearch::at(notes, &cfg, now), &cfg, false)
        .run(&mut term)
        .unwrap();
    assert_eq!(chosen.as_deref(), Some("Project Plan"));

    let out = term.output_text();
    assert!(out.contains("> proj"));
    assert!(out.contains("> Project Plan"));
}

#[test]
fn content_search_returns_note_of_chosen_line() {
    let (_temp, store) = store_with(&[
        ("Shopping", "[@1, #home]\neggs\nbuy milk today\n"),
        ("Work", "[@2]\nmy list is long, k\n"),
    ]);
    let notes = store.list_notes(&[]).unwrap();
    let cfg = FinderConfig::default();
    let mut term = Scripted::new(Some(120)).typed("milk").key(&[10]);
    let chosen = Session::new(ContentSearch::new(notes, &store, &cfg), &cfg, false)
        .run(&mut term)
        .unwrap();
    // Both lines match; the one whose match ends first wins.
    assert_eq!(chosen.as_deref(), Some("Shopping"));
}

#[test]
fn cancel_leaves_nothing_selected() {
    let (_temp, store) = store_with(&[("Only", "text\n")]);
    let notes = store.list_notes(&[]).unwrap();
    let cfg = FinderConfig::default();
    let mut term = Scripted::new(Some(80)).typed("on").key(&[3]);
    let chosen = Session::new(NoteSearch::new(notes, &cfg), &cfg, false)
        .run(&mut term)
        .unwrap();
    assert_eq!(chosen, None);
}

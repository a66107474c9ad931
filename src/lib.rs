//! Note management in a directory of markdown files, driven by an
//! incremental fuzzy finder drawn straight on the terminal.

pub mod args;
pub mod config;
pub mod finder;
pub mod formatting;
pub mod html;
pub mod note;
pub mod operations;
pub mod shared;
pub mod tags;

use args::CommonFlags;
use config::{Config, LOG_ENV};
use finder::{NoteSearch, RowSource};
use formatting::FormatContext;
use note::{NoteStore, sort_by_id};
use std::env;
use std::error::Error;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

const DEFAULT_TITLE: &str = "Untitled";

pub fn entry() -> Result<(), Box<dyn Error>> {
    init_logging();
    let mut args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        print_help();
        return Ok(());
    }

    let cmd = args.remove(0);
    match cmd.as_str() {
        "new" => new_note(CommonFlags::parse(args, "new")?)?,
        "mv" => move_note(CommonFlags::parse(args, "mv")?)?,
        "edit" => edit_note(CommonFlags::parse(args, "edit")?)?,
        "find" => find_note(CommonFlags::parse(args, "find")?)?,
        "delete" => delete_note(CommonFlags::parse(args, "delete")?)?,
        "concat" => concat_notes(CommonFlags::parse(args, "concat")?)?,
        "html" => export_html(CommonFlags::parse(args, "html")?)?,
        "list" => list_notes(CommonFlags::parse(args, "list")?)?,
        "tags" => list_tags(CommonFlags::parse(args, "tags")?)?,
        "git" => git(args)?,
        "push" => {
            let cfg = Config::resolve(CommonFlags::parse(args, "push")?.path.as_deref())?;
            operations::push(&cfg.notes_dir)?
        }
        "init-repo" => init_repo(CommonFlags::parse(args, "init-repo")?)?,
        "path" => {
            let cfg = Config::resolve(CommonFlags::parse(args, "path")?.path.as_deref())?;
            println!("{}", cfg.notes_dir.display())
        }
        "help" => print_help(),
        other => {
            eprintln!("Unknown command: {other}");
            print_help();
        }
    }

    Ok(())
}

fn init_logging() {
    let env = env_logger::Env::default().filter_or(LOG_ENV, "warn");
    // A second call in the same process keeps the first logger.
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn print_help() {
    println!(
        "\
Note Taker CLI
Usage:
  nt new [--title <title>] [-t|--tag <tag>]...
                                  Create a note with a tag header and open it in $EDITOR
  nt mv --src <file> [--title <title>]
                                  Move a file into the notes directory
  nt edit [--title <title>] [-t|--tag <tag>]...
                                  Edit a note (pick interactively when no title is given)
  nt find [-t|--tag <tag>]...     Search note contents line by line and edit the match
  nt delete --title <title>       Delete a note after confirmation
  nt concat [-t|--tag <tag>]...   Open all matching notes joined into one document
  nt html [-t|--tag <tag>]... [--file <out>]
                                  Export matching notes to a single HTML page
  nt list [-t|--tag <tag>]... [-s|--search <query>]
                                  Print notes ranked for a query
  nt tags                         List tags with counts
  nt git <args...>                Run git in the notes directory
  nt push                         Commit everything and push
  nt init-repo <origin>           Initialise the notes directory as a git repo
  nt path                         Show the notes directory
  nt help                         Show this message

Every command accepts --path <dir> to use another notes directory.

Finder keys:
  type to filter, Backspace to erase, Down/Shift-Tab and Up/Tab to move,
  Enter to pick, Ctrl-C to cancel

Environment:
  NOTE_TAKER_DIR                  Notes directory (default: ~/.note-taker)
  EDITOR                          Editor command (default: vim)
  NO_COLOR                        Disable colors
  NOTE_TAKER_LOG                  Log filter (default: warn)
"
    );
}

fn store_for(cfg: &Config) -> NoteStore {
    NoteStore::new(&cfg.notes_dir)
}

fn check_title(title: &str) -> Result<(), Box<dyn Error>> {
    if title.contains('_') {
        return Err("Titles cannot contain '_'".into());
    }
    Ok(())
}

fn new_note(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let title = flags.title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    check_title(&title)?;
    let path = store_for(&cfg).create(&title, &flags.tags)?;
    operations::launch_editor(&cfg.editor, &path)
}

fn move_note(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let src = flags.src.ok_or("Usage: nt mv --src <file> [--title <title>]")?;
    let src = Path::new(&src);
    if !src.is_file() {
        return Err(format!("No file at {}", src.display()).into());
    }
    let title = match flags.title {
        Some(t) => t,
        None => src
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or("Could not derive a title from the source file")?
            .to_string(),
    };
    check_title(&title)?;
    let dest = store_for(&cfg).import(src, &title)?;
    println!("Moved to {}", dest.display());
    Ok(())
}

fn edit_note(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let store = store_for(&cfg);
    let title = match flags.title {
        Some(t) => t,
        None => {
            let notes = store.list_notes(&flags.tags)?;
            if notes.is_empty() {
                return Err("No notes found".into());
            }
            finder::search_notes(notes, &cfg.finder, cfg.use_color)?
                .ok_or("No note selected")?
        }
    };
    operations::launch_editor(&cfg.editor, &store.existing_path(&title)?)
}

fn find_note(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let store = store_for(&cfg);
    let notes = store.list_notes(&flags.tags)?;
    if notes.is_empty() {
        return Err("No notes found".into());
    }
    let title = finder::search_content(notes, &store, &cfg.finder, cfg.use_color)?
        .ok_or("No note selected")?;
    operations::launch_editor(&cfg.editor, &store.existing_path(&title)?)
}

fn delete_note(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let title = flags.title.ok_or("Usage: nt delete --title <title>")?;
    let store = store_for(&cfg);
    store.existing_path(&title)?;

    let question = format!("Are you sure you want to delete {title}");
    let mut stdout = io::stdout();
    if operations::confirm(&mut io::stdin().lock(), &mut stdout, &question)? {
        store.delete(&title)?;
        println!("Deleted {title}");
    } else {
        println!("Did not delete {title}");
    }
    Ok(())
}

fn concat_notes(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let store = store_for(&cfg);
    let mut notes = store.list_notes(&flags.tags)?;
    if notes.is_empty() {
        return Err("No notes found".into());
    }
    sort_by_id(&mut notes);
    operations::concat_and_edit(&store, &notes, &cfg.editor)
}

fn export_html(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let store = store_for(&cfg);
    let mut notes = store.list_notes(&flags.tags)?;
    sort_by_id(&mut notes);
    let page = html::generate(&store, &notes)?;
    match flags.file {
        Some(file) => {
            fs::write(&file, page)?;
            println!("Wrote {} notes to {file}", notes.len());
        }
        None => io::stdout().write_all(page.as_bytes())?,
    }
    Ok(())
}

fn list_notes(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let notes = store_for(&cfg).list_notes(&flags.tags)?;
    if notes.is_empty() {
        println!("No notes found");
        return Ok(());
    }

    let query = flags.search.unwrap_or_default();
    let fmt = FormatContext::new(cfg.use_color);
    let mut search = NoteSearch::new(notes, &cfg.finder);
    let mut stdout = io::stdout().lock();
    for row in search.compute_rows(&query) {
        writeln!(stdout, "{}", row.compose(|kind, text| fmt.paint_cell(kind, text, false)))?;
    }
    Ok(())
}

fn list_tags(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let notes = store_for(&cfg).list_notes(&[])?;
    let counts = tags::tag_counts(&notes);
    if counts.is_empty() {
        println!("No tags found");
        return Ok(());
    }
    let fmt = FormatContext::new(cfg.use_color);
    for (tag, count) in counts {
        println!("{} {}", fmt.format_tag(&format!("#{tag}")), fmt.format_muted(&count.to_string()));
    }
    Ok(())
}

/// Everything after the command goes to git untouched, except a leading
/// `--path <dir>`.
fn git(mut args: Vec<String>) -> Result<(), Box<dyn Error>> {
    let path = if args.first().map(String::as_str) == Some("--path") {
        if args.len() < 2 {
            return Err("Provide a value after --path for git".into());
        }
        args.remove(0);
        Some(args.remove(0))
    } else {
        None
    };
    let cfg = Config::resolve(path.as_deref())?;
    operations::git(&cfg.notes_dir, &args)
}

fn init_repo(flags: CommonFlags) -> Result<(), Box<dyn Error>> {
    let cfg = Config::resolve(flags.path.as_deref())?;
    let origin = flags
        .positional
        .first()
        .ok_or("Usage: nt init-repo <origin>")?;
    operations::init_repo(&cfg.notes_dir, origin)
}

use crate::note::{Note, NoteStore};
use chrono::Local;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::{Command, Stdio};

const README: &str = "This is a repository of markdown-formatted notes. A note should start \
with a header of the form [@id, #tag1, #tag2,...].\n";

/// Open `path` in the user's editor and wait for it to exit.
pub fn launch_editor(editor: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    let mut parts = editor.split_whitespace();
    let program = parts.next().ok_or("EDITOR is empty")?;
    log::debug!("launching {editor} on {}", path.display());
    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .status()
        .map_err(|e| format!("Could not launch editor '{program}': {e}"))?;
    if !status.success() {
        return Err("Editor exited with non-zero status".into());
    }
    Ok(())
}

/// Notes joined into one document: each under its own `# title`, with the
/// tag header dropped and its own headings pushed down a level.
pub fn concat_markdown(store: &NoteStore, notes: &[Note]) -> io::Result<String> {
    let mut out = String::new();
    for (i, note) in notes.iter().enumerate() {
        if i != 0 {
            out.push('\n');
        }
        out.push_str(&format!("# {}\n\n", note.title));
        let content = store.read_content(note)?;
        for line in strip_header(&content).lines() {
            if line.starts_with('#') {
                out.push('#');
            }
            out.push_str(line);
            out.push('\n');
        }
    }
    Ok(out)
}

/// Content with a leading `[...]` header line removed.
pub fn strip_header(content: &str) -> &str {
    let (first, rest) = content.split_once('\n').unwrap_or((content, ""));
    if crate::tags::parse_header(first).is_some() { rest } else { content }
}

/// Write the concatenation to a temporary file, edit it, then discard it.
pub fn concat_and_edit(
    store: &NoteStore,
    notes: &[Note],
    editor: &str,
) -> Result<(), Box<dyn Error>> {
    let mut file = tempfile::Builder::new().suffix(".md").tempfile()?;
    file.write_all(concat_markdown(store, notes)?.as_bytes())?;
    file.flush()?;
    launch_editor(editor, file.path())
}

/// Ask `question` and accept only a lone `y`.
pub fn confirm<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    question: &str,
) -> io::Result<bool> {
    write!(out, "{question} (y/n): ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer)?;
    Ok(answer.trim_end_matches(['\n', '\r']) == "y")
}

fn run_git(dir: &Path, args: &[&str]) -> Result<(), Box<dyn Error>> {
    log::debug!("git {}", args.join(" "));
    let status = Command::new("git").arg("-C").arg(dir).args(args).status()?;
    if !status.success() {
        return Err(format!("git {} failed", args.first().unwrap_or(&"")).into());
    }
    Ok(())
}

pub fn git(dir: &Path, args: &[String]) -> Result<(), Box<dyn Error>> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    run_git(dir, &args)
}

/// Commit everything with a timestamp message and push.
pub fn push(dir: &Path) -> Result<(), Box<dyn Error>> {
    let message = Local::now().format("%Y.%m.%d %H:%M:%S").to_string();
    run_git(dir, &["add", "."])?;
    run_git(dir, &["commit", "-m", &message])?;
    run_git(dir, &["push"])
}

pub fn init_repo(dir: &Path, origin: &str) -> Result<(), Box<dyn Error>> {
    run_git(dir, &["init"])?;
    run_git(dir, &["remote", "add", "origin", origin])?;
    std::fs::write(dir.join("README.txt"), README)?;
    run_git(dir, &["add", "."])?;
    run_git(dir, &["commit", "-m", "Init repo"])?;
    run_git(dir, &["push", "-u", "origin", "HEAD"])
}

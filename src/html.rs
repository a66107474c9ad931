//! Single-file HTML export with per-tag visibility toggles.

use crate::note::{Note, NoteStore};
use crate::operations::strip_header;
use crate::tags::tag_counts;
use pulldown_cmark::{Parser, html};
use std::io;

const UNTAGGED: &str = "untagged";
const NOTES_DIR_KEY: &str = "$NOTES";

/// CSS-safe class for a tag: lowercase alphanumerics, spaces as `_`.
pub fn tag_class(tag: &str) -> String {
    tag.chars()
        .filter_map(|c| match c {
            'a'..='z' | '0'..='9' => Some(c),
            'A'..='Z' => Some(c.to_ascii_lowercase()),
            ' ' => Some('_'),
            _ => None,
        })
        .collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_markdown(md: &str) -> String {
    let mut out = String::new();
    html::push_html(&mut out, Parser::new(md));
    out
}

fn note_html(note: &Note, content: &str, notes_dir: &str) -> String {
    let tags: Vec<String> = if note.tags.is_empty() {
        vec![UNTAGGED.to_string()]
    } else {
        note.tags.iter().map(|t| t.to_lowercase()).collect()
    };
    let classes: Vec<String> = tags.iter().map(|t| tag_class(t)).collect();
    let labels: String = note
        .tags
        .iter()
        .map(|t| format!("<p>{}</p>", escape(&t.to_lowercase())))
        .collect();
    let body = render_markdown(&strip_header(content).replace(NOTES_DIR_KEY, notes_dir));
    format!(
        "<div class=\"__note__ {}\" id=\"{}\"><div class=\"header\">\
         <p class=\"note-header\">{}</p><div class=\"tag\">{labels}</div></div>{body}</div>",
        classes.join(" "),
        escape(&note.title),
        escape(&note.title),
    )
}

fn toggles(tags: &[String]) -> String {
    let mut out = String::new();
    for tag in tags {
        let class = tag_class(tag);
        out.push_str(&format!("<input id=\"__id_{class}\" class=\"{class}\" type=\"checkbox\"/>"));
    }
    out.push_str("<input id=\"dark-mode\" type=\"checkbox\"/><div class=\"tag-selector\">");
    for tag in tags {
        out.push_str(&format!("<label for=\"__id_{}\">{}</label>", tag_class(tag), escape(tag)));
    }
    out.push_str("<label id=\"dark-mode-toggle\" for=\"dark-mode\">☀</label></div>");
    out
}

const BASE_CSS: &str = "\
body{margin:0;font-family:Arial,Helvetica,sans-serif;color:#2E2E2E;background:#F4EFE5}
#body{min-height:100%}
#content{margin:0 auto;max-width:800px}
p{margin:5px 0;font-size:.9em}
a{color:#6D9D99}
input{display:none}
label{margin:0 10px 0 0;padding:3px 7px;border-radius:3px;white-space:nowrap;cursor:pointer;color:#F4EFE5;background:#6D9D99}
div.tag-selector{display:flex;overflow-x:auto;padding:5px 10px;margin:10px auto 0;max-width:800px}
#dark-mode-toggle{margin-left:auto;margin-right:0;color:#2E2E2E;background:#FAF8F3}
.__note__{margin:10px 0;padding:10px;border-radius:3px;box-shadow:0 0 5px rgba(0,0,0,.5);background:#FAF8F3}
.__note__ *{max-width:100%}
.__note__ img{max-height:450px;margin:auto;display:block;padding:5px}
.header{overflow:auto;padding:0 5px 7px 0;border-bottom:1px solid #2E2E2E}
.note-header{font-weight:bold;margin:1px 0;font-size:1em;display:inline-block}
.tag{display:inline-block;float:right;font-size:.8em}
.tag p{display:inline-block;margin:0 0 0 10px;padding:1px 5px;border-radius:3px;border:2px solid #6D9D99}
#dark-mode:checked~#body{color:#D1D1D1;background:#05070C}
#dark-mode:checked~#body .__note__{background:#2E2E2E}
#dark-mode:checked~#body .header{border-bottom-color:#FAF8F3}
#dark-mode:checked~.tag-selector #dark-mode-toggle{color:#D1D1D1;background:#2E2E2E}
";

fn style(tags: &[String]) -> String {
    let mut css = BASE_CSS.to_string();
    for tag in tags {
        let c = tag_class(tag);
        css.push_str(&format!(
            "input.{c}:checked~#body div.{c}{{display:none}}\n\
             input.{c}:checked~div>label[for=__id_{c}]{{background:#BFC9BC}}\n"
        ));
    }
    format!("<style>{css}</style>")
}

/// Render `notes` (already in display order) into one HTML page.
pub fn generate(store: &NoteStore, notes: &[Note]) -> io::Result<String> {
    let notes_dir = store.dir().to_string_lossy();
    let mut body = String::new();
    for note in notes {
        body.push_str(&note_html(note, &store.read_content(note)?, &notes_dir));
    }

    let mut tags: Vec<String> = tag_counts(notes).into_iter().map(|(t, _)| t).collect();
    if notes.iter().any(|n| n.tags.is_empty()) {
        tags.push(UNTAGGED.to_string());
    }

    Ok(format!(
        "<html><head><meta charset=\"utf-8\">{}</head><body>{}<div id=\"body\"><div id=\"content\">{body}</div></div></body></html>",
        style(&tags),
        toggles(&tags),
    ))
}

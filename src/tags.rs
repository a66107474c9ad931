use crate::note::Note;
use std::collections::HashMap;

/// Parsed `[@id, #tag, ...]` header line.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Header {
    pub id: Option<i64>,
    pub tags: Vec<String>,
}

/// Parse the first line of a note. Lines that are not wrapped in brackets
/// carry no header and yield `None`.
pub fn parse_header(line: &str) -> Option<Header> {
    let inner = line.trim().strip_prefix('[')?.strip_suffix(']')?;
    let mut header = Header::default();
    for item in inner.split(',').map(str::trim) {
        if let Some(tag) = item.strip_prefix('#') {
            if !tag.is_empty() {
                header.tags.push(tag.to_string());
            }
        } else if let Some(id) = item.strip_prefix('@') {
            if let Ok(id) = id.parse() {
                header.id = Some(id);
            }
        }
    }
    Some(header)
}

pub fn format_header(id: i64, tags: &[String]) -> String {
    let mut out = format!("[@{id}");
    for tag in tags {
        out.push_str(", #");
        out.push_str(tag);
    }
    out.push_str("]\n");
    out
}

/// Strip a leading `#` and surrounding whitespace; tags are stored bare.
pub fn normalize_tag(t: &str) -> String {
    let trimmed = t.trim();
    trimmed.strip_prefix('#').unwrap_or(trimmed).trim().to_string()
}

/// OR semantics: a note qualifies when any requested tag is present.
pub fn note_has_any_tag(note: &Note, wanted: &[String]) -> bool {
    if wanted.is_empty() {
        return true;
    }
    wanted
        .iter()
        .any(|w| note.tags.iter().any(|t| t.eq_ignore_ascii_case(w)))
}

/// Lowercased tag counts, most used first; ties keep first-seen order.
pub fn tag_counts(notes: &[Note]) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for note in notes {
        for tag in &note.tags {
            let tag = tag.to_lowercase();
            let count = counts.entry(tag.clone()).or_insert_with(|| {
                order.push(tag.clone());
                0
            });
            *count += 1;
        }
    }
    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|t| {
            let c = counts[&t];
            (t, c)
        })
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

pub fn hash_tag(tag: &str) -> u64 {
    let mut h: u64 = 5381;
    for b in tag.bytes() {
        h = (h.wrapping_shl(5)).wrapping_add(h) ^ u64::from(b);
    }
    h
}

pub fn color_for_tag(tag: &str) -> (u8, u8, u8) {
    const PALETTE: &[(u8, u8, u8)] = &[
        (137, 180, 250),
        (166, 227, 161),
        (249, 226, 175),
        (245, 194, 231),
        (255, 169, 167),
        (148, 226, 213),
        (198, 160, 246),
        (240, 198, 198),
        (181, 232, 224),
        (183, 189, 248),
        (255, 214, 165),
        (196, 222, 255),
    ];
    PALETTE[(hash_tag(tag) as usize) % PALETTE.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;
    use std::path::PathBuf;

    fn note_with_tags(tags: &[&str]) -> Note {
        Note {
            id: None,
            title: "t".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            path: PathBuf::from("t.md"),
            modified: Local::now(),
        }
    }

    #[test]
    fn test_parse_header() {
        let header = parse_header("[@12, #work, #Plan ]").unwrap();
        assert_eq!(header.id, Some(12));
        assert_eq!(header.tags, vec!["work", "Plan"]);

        let header = parse_header("  [#solo]  ").unwrap();
        assert_eq!(header.id, None);
        assert_eq!(header.tags, vec!["solo"]);
    }

    #[test]
    fn test_parse_header_rejects_plain_lines() {
        assert!(parse_header("# Heading").is_none());
        assert!(parse_header("[unterminated").is_none());
        assert!(parse_header("").is_none());
    }

    #[test]
    fn test_parse_header_ignores_bad_id() {
        let header = parse_header("[@abc, #x]").unwrap();
        assert_eq!(header.id, None);
        assert_eq!(header.tags, vec!["x"]);
    }

    #[test]
    fn test_format_header_round_trips() {
        let line = format_header(3, &["a".to_string(), "b".to_string()]);
        assert_eq!(line, "[@3, #a, #b]\n");
        let parsed = parse_header(line.trim_end()).unwrap();
        assert_eq!(parsed.id, Some(3));
        assert_eq!(parsed.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_normalize_tag() {
        assert_eq!(normalize_tag("#todo"), "todo");
        assert_eq!(normalize_tag("  work "), "work");
        assert_eq!(normalize_tag("#"), "");
    }

    #[test]
    fn test_note_has_any_tag_is_or() {
        let note = note_with_tags(&["work", "Plan"]);
        assert!(note_has_any_tag(&note, &[]));
        assert!(note_has_any_tag(&note, &["plan".to_string()]));
        assert!(note_has_any_tag(
            &note,
            &["missing".to_string(), "work".to_string()]
        ));
        assert!(!note_has_any_tag(&note, &["missing".to_string()]));
    }

    #[test]
    fn test_tag_counts_orders_by_usage() {
        let notes = vec![
            note_with_tags(&["a"]),
            note_with_tags(&["b", "A"]),
            note_with_tags(&["b"]),
            note_with_tags(&["b", "c"]),
        ];
        let counts = tag_counts(&notes);
        assert_eq!(
            counts,
            vec![
                ("b".to_string(), 3),
                ("a".to_string(), 2),
                ("c".to_string(), 1)
            ]
        );
    }

    #[test]
    fn test_color_for_tag_consistent() {
        assert_eq!(color_for_tag("todo"), color_for_tag("todo"));
        assert_eq!(hash_tag("work"), hash_tag("work"));
        assert_ne!(hash_tag("todo"), hash_tag("work"));
    }
}

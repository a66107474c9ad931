//! Case-insensitive subsequence matching and note relevance scoring.

use crate::config::FinderConfig;
use chrono::{DateTime, Local};

const SECONDS_IN_DAY: f64 = 86_400.0;

/// Character positions (code-point indices into the text) consumed by a
/// successful subsequence walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubsequenceMatch {
    pub positions: Vec<usize>,
}

impl SubsequenceMatch {
    /// Position of the last matched character; `None` for an empty query.
    pub fn end(&self) -> Option<usize> {
        self.positions.last().copied()
    }
}

fn fold(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

/// Greedy left-to-right walk. Succeeds when every query character is found
/// in order; an empty query matches anything with no positions.
pub fn matches(text: &str, query: &str) -> Option<SubsequenceMatch> {
    let mut wanted = query.chars().map(fold).peekable();
    let mut positions = Vec::new();
    for (i, c) in text.chars().enumerate() {
        let Some(&next) = wanted.peek() else { break };
        if fold(c) == next {
            positions.push(i);
            wanted.next();
        }
    }
    if wanted.peek().is_some() {
        None
    } else {
        Some(SubsequenceMatch { positions })
    }
}

/// How many query characters the greedy walk consumes before the text runs
/// out. A complete match returns the query length.
pub fn matched_count(text: &str, query: &str) -> usize {
    let wanted: Vec<char> = query.chars().map(fold).collect();
    let mut matched = 0;
    for c in text.chars() {
        if matched >= wanted.len() {
            break;
        }
        if fold(c) == wanted[matched] {
            matched += 1;
        }
    }
    matched
}

/// Case-insensitive literal prefix test.
pub fn full_match(title: &str, query: &str) -> bool {
    let mut title = title.chars().map(fold);
    query.chars().map(fold).all(|q| title.next() == Some(q))
}

/// Relevance of a note title: coverage bonus interpolated against a
/// non-match penalty, minus a capped staleness penalty.
pub fn score(
    title: &str,
    modified: DateTime<Local>,
    query: &str,
    now: DateTime<Local>,
    cfg: &FinderConfig,
) -> f64 {
    let len = title.chars().count();
    let percent = if len == 0 {
        0.0
    } else {
        matched_count(title, query) as f64 / len as f64
    };
    let match_score = percent * cfg.max_match_score
        + (1.0 - percent) * cfg.max_non_match_penalty;
    match_score - date_penalty(modified, now, cfg)
}

/// Age in days times the weight, capped. Timestamps in the future carry no
/// penalty.
pub fn date_penalty(
    modified: DateTime<Local>,
    now: DateTime<Local>,
    cfg: &FinderConfig,
) -> f64 {
    let age = now.signed_duration_since(modified);
    let days = age.num_milliseconds() as f64 / 1000.0 / SECONDS_IN_DAY;
    (days * cfg.date_weight).clamp(0.0, cfg.date_penalty_ceil)
}

//! Pure aggregation over the registration list.

use shared::domain::{Registration, StatsSummary};

/// Substrings (case-folded) that mark a registrant as a beginner. Note
/// "no" also matches words that merely contain it, e.g. "know"; that
/// over-match is the documented production behavior.
const BEGINNER_MARKERS: [&str; 3] = ["beginner", "none", "no"];

pub fn is_beginner(knowledge: &str) -> bool {
    let folded = knowledge.to_lowercase();
    BEGINNER_MARKERS.iter().any(|marker| folded.contains(marker))
}

/// Single pass over the list: a major tally in first-occurrence order and
/// the beginner count. Ties on the top major go to whichever major was
/// seen first.
pub fn summarize(rows: &[Registration]) -> StatsSummary {
    if rows.is_empty() {
        return StatsSummary::default();
    }

    let mut tally: Vec<(&str, usize)> = Vec::new();
    let mut beginners = 0usize;

    for row in rows {
        match tally.iter_mut().find(|(major, _)| *major == row.major) {
            Some((_, count)) => *count += 1,
            None => tally.push((&row.major, 1)),
        }
        if is_beginner(&row.programming_knowledge) {
            beginners += 1;
        }
    }

    // strictly-greater comparison over the first-occurrence-ordered
    // tally, so ties resolve to the earliest major
    let mut top: Option<(&str, usize)> = None;
    for (major, count) in &tally {
        if top.map_or(true, |(_, best)| *count > best) {
            top = Some((major, *count));
        }
    }
    let top_major = top
        .map(|(major, _)| major.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let beginners_pct = ((beginners as f64 / rows.len() as f64) * 100.0).round() as u8;

    StatsSummary {
        total: rows.len(),
        top_major,
        beginners_pct,
    }
}

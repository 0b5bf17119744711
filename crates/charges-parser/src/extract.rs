//! Right-anchored label/amount extraction.
//!
//! Report lines have no column alignment and labels may contain digits, so
//! each matcher anchors on the trailing numeric tokens and treats everything
//! before them as the label. Matchers are tried in order and the first one
//! that produces a pair wins.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::classifier::normalize_whitespace;
use crate::model::ExtractedPair;
use crate::money::parse_money;

pub trait LineExtractor: Send + Sync {
    fn name(&self) -> &'static str;
    fn extract(&self, line: &str) -> Option<ExtractedPair>;
}

static TWO_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(.*?)\s+(-?[0-9.,]+)\s+(-?[0-9.,]+)\s*$").expect("valid two-amount regex")
});

static ONE_AMOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.*?)\s+(-?[0-9.,]+)\s*$").expect("valid one-amount regex"));

fn clean_label(raw: &str) -> Option<String> {
    let label = normalize_whitespace(raw);
    if label.is_empty() {
        None
    } else {
        Some(label)
    }
}

/// `<label> <month amount> <prior total>`; one of the two may be malformed.
pub struct TwoAmountExtractor;

impl LineExtractor for TwoAmountExtractor {
    fn name(&self) -> &'static str {
        "two_amount"
    }

    fn extract(&self, line: &str) -> Option<ExtractedPair> {
        let caps = TWO_AMOUNT_RE.captures(line)?;
        let label = clean_label(&caps[1])?;
        let primary = parse_money(&caps[2]);
        let secondary = parse_money(&caps[3]);
        if primary.is_none() && secondary.is_none() {
            return None;
        }
        Some(ExtractedPair::new(label, primary, secondary))
    }
}

/// `<label> <month amount>`.
pub struct OneAmountExtractor;

impl LineExtractor for OneAmountExtractor {
    fn name(&self) -> &'static str {
        "one_amount"
    }

    fn extract(&self, line: &str) -> Option<ExtractedPair> {
        let caps = ONE_AMOUNT_RE.captures(line)?;
        let label = clean_label(&caps[1])?;
        let primary = parse_money(&caps[2])?;
        Some(ExtractedPair::new(label, Some(primary), None))
    }
}

static EXTRACTORS: Lazy<Vec<&'static dyn LineExtractor>> = Lazy::new(|| {
    vec![
        &TwoAmountExtractor as &dyn LineExtractor,
        &OneAmountExtractor as &dyn LineExtractor,
    ]
});

pub fn all_extractors() -> &'static [&'static dyn LineExtractor] {
    EXTRACTORS.as_slice()
}

/// Splits a non-noise line into a label and its trailing amounts.
pub fn extract_pair(line: &str) -> Option<ExtractedPair> {
    extract_pair_with(line, all_extractors())
}

pub fn extract_pair_with(line: &str, extractors: &[&dyn LineExtractor]) -> Option<ExtractedPair> {
    extractors
        .iter()
        .find_map(|extractor| extractor.extract(line))
}

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    Blank,
    Noise(&'static str),
    /// Recognized footer that is deliberately left for the extractor to judge.
    PassThrough,
    Content,
}

impl LineClass {
    pub fn is_noise(&self) -> bool {
        matches!(self, LineClass::Blank | LineClass::Noise(_))
    }
}

struct NoiseRule {
    name: &'static str,
    pattern: Regex,
}

impl NoiseRule {
    fn new(name: &'static str, pattern: &str) -> Self {
        Self {
            name,
            pattern: Regex::new(pattern).expect("valid noise pattern"),
        }
    }
}

// Patterns run against the uppercased, whitespace-normalized line.
static NOISE_RULES: Lazy<Vec<NoiseRule>> = Lazy::new(|| {
    vec![
        NoiseRule::new("report_code", r"^RPT[-/ ]?[0-9]+"),
        // banner-only: a trailing amount means the line is a charge, not a heading
        NoiseRule::new("institution_banner", r"\bBANK (?:LTD|LIMITED|PLC)\b[^0-9]*$"),
        NoiseRule::new("institution_banner", r"\bCO-?OPERATIVE BANK\b[^0-9]*$"),
        NoiseRule::new("branch_banner", r"^BRANCH\s*(?:CODE|NAME)?\s*[:\-]"),
        NoiseRule::new("branch_banner", r"^BRANCH\s+(?:CODE|NAME)\b"),
        NoiseRule::new("column_header", r"^PARTICULARS\b"),
        NoiseRule::new("column_header", r"^HEADS? OF ACCOUNTS?\b"),
        NoiseRule::new("column_header", r"^SL\.? ?NO\b"),
        NoiseRule::new("separator", r"^[-=_ ]{3,}$"),
        NoiseRule::new("disclaimer", r"I HEREBY CERTIFY"),
        NoiseRule::new("disclaimer", r"^NOTES?\b"),
        NoiseRule::new("disclaimer", r"^REMARKS?\b"),
        NoiseRule::new("disclaimer", r"COMPUTER GENERATED"),
        NoiseRule::new("run_date", r"\bRUN DATE\b"),
        NoiseRule::new("page_banner", r"^PAGE(?: NO\.?)? ?:? ?[0-9]+(?: OF [0-9]+)?$"),
        NoiseRule::new("title_banner", r"\bAS AT [A-Z]{3} [0-9]{1,2}, ?[0-9]{4}$"),
    ]
});

static PASS_THROUGH: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\bEND OF REPORT\b").expect("valid pass-through pattern"));

static WHITESPACE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Collapses whitespace runs to a single space and trims the ends.
pub fn normalize_whitespace(value: &str) -> String {
    WHITESPACE_RE.replace_all(value.trim(), " ").into_owned()
}

pub fn classify_line(line: &str) -> LineClass {
    let normalized = normalize_whitespace(line).to_uppercase();
    if normalized.is_empty() {
        return LineClass::Blank;
    }
    if PASS_THROUGH.is_match(&normalized) {
        return LineClass::PassThrough;
    }
    NOISE_RULES
        .iter()
        .find(|rule| rule.pattern.is_match(&normalized))
        .map(|rule| LineClass::Noise(rule.name))
        .unwrap_or(LineClass::Content)
}

/// True for boilerplate that must be dropped before amount extraction.
///
/// Ambiguous lines are not noise: a content line that slips through is
/// rejected later when no trailing amount parses, while a false positive
/// here would silently lose a row.
pub fn is_noise(line: &str) -> bool {
    classify_line(line).is_noise()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_whitespace_lines_are_noise() {
        assert_eq!(classify_line(""), LineClass::Blank);
        assert_eq!(classify_line(" \t  "), LineClass::Blank);
        assert!(is_noise("   "));
    }

    #[test]
    fn banners_and_headers_are_noise() {
        assert_eq!(classify_line("BRANCH: 12345"), LineClass::Noise("branch_banner"));
        assert_eq!(classify_line("branch code 0042"), LineClass::Noise("branch_banner"));
        assert_eq!(classify_line("RPT-1107 MONTHLY ABSTRACT"), LineClass::Noise("report_code"));
        assert_eq!(
            classify_line("  THE  UNITED   bank limited  "),
            LineClass::Noise("institution_banner")
        );
        assert_eq!(
            classify_line("PARTICULARS   FOR THE MONTH   UPTO PREVIOUS MONTH"),
            LineClass::Noise("column_header")
        );
        assert_eq!(classify_line("----------------------"), LineClass::Noise("separator"));
        assert_eq!(classify_line("=== === ==="), LineClass::Noise("separator"));
        assert_eq!(classify_line("Run Date : 08/03/2024"), LineClass::Noise("run_date"));
        assert_eq!(classify_line("Page 2 of 3"), LineClass::Noise("page_banner"));
        assert_eq!(
            classify_line("ABSTRACT OF CHARGES AS AT MAR 7, 2024"),
            LineClass::Noise("title_banner")
        );
    }

    #[test]
    fn disclaimers_are_noise() {
        assert!(is_noise("I hereby certify that the above figures are correct"));
        assert!(is_noise("NOTE: figures in rupees"));
        assert!(is_noise("Remarks - nil"));
        assert!(is_noise("This is a computer generated statement"));
    }

    #[test]
    fn end_of_report_passes_through() {
        assert_eq!(classify_line("*** END OF REPORT ***"), LineClass::PassThrough);
        assert!(!is_noise("end of report"));
    }

    #[test]
    fn ambiguous_content_is_kept() {
        assert!(!is_noise("Rent 1,250.50 3,000"));
        assert!(!is_noise("Bank charges 120.00"));
        assert!(!is_noise("Branch renovation 5,000"));
        assert!(!is_noise("Notebooks and stationery 310"));
        assert!(!is_noise("TOTAL CHARGES FOR THE MONTH 9,999.00"));
    }

    #[test]
    fn charge_lines_mentioning_a_date_or_bank_are_kept() {
        assert_eq!(
            classify_line("Interest accrued as at Mar 31, 2024 1,200.00 3,400.00"),
            LineClass::Content
        );
        assert_eq!(classify_line("Commission paid to State Bank Ltd 250.00"), LineClass::Content);
        assert_eq!(classify_line("Dues to Co-operative Bank 75"), LineClass::Content);

        assert_eq!(
            classify_line("THE UNITED CO-OPERATIVE BANK LIMITED"),
            LineClass::Noise("institution_banner")
        );
        assert_eq!(
            classify_line("State Bank Ltd, Main Branch"),
            LineClass::Noise("institution_banner")
        );
    }

    #[test]
    fn normalizes_whitespace_runs() {
        assert_eq!(normalize_whitespace("  Rent \t and   rates "), "Rent and rates");
    }
}

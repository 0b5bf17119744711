use once_cell::sync::Lazy;
use regex::Regex;

static MONEY_RE: Lazy<Regex> = Lazy::new(|| {
    // ASCII digits only; `\d` would also accept other scripts' digits
    Regex::new(r"^-?(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)(?:\.[0-9]{1,2})?$")
        .expect("valid money regex")
});

/// Parses a strict money token such as `1,250.50` or `-300`.
///
/// Anything that is not an exact match (three decimals, stray letters,
/// misplaced grouping commas) yields `None` rather than an error.
pub fn parse_money(token: &str) -> Option<f64> {
    if !MONEY_RE.is_match(token) {
        return None;
    }
    token.replace(',', "").parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::parse_money;

    #[test]
    fn accepts_grouped_and_plain_amounts() {
        assert_eq!(parse_money("1,250.50"), Some(1250.5));
        assert_eq!(parse_money("3,000"), Some(3000.0));
        assert_eq!(parse_money("1234567"), Some(1234567.0));
        assert_eq!(parse_money("-42.5"), Some(-42.5));
        assert_eq!(parse_money("0"), Some(0.0));
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert_eq!(parse_money("12.345"), None);
        assert_eq!(parse_money("12,34"), None);
        assert_eq!(parse_money("7,"), None);
        assert_eq!(parse_money(".50"), None);
        assert_eq!(parse_money("1.2.3"), None);
        assert_eq!(parse_money("--5"), None);
        assert_eq!(parse_money("12a"), None);
        assert_eq!(parse_money(""), None);
    }

    #[test]
    fn rejects_non_ascii_digits() {
        assert_eq!(parse_money("١٢"), None);
        assert_eq!(parse_money("१,२५०"), None);
        assert_eq!(parse_money("１００"), None);
    }
}

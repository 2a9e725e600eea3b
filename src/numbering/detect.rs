//! Printed page number detection
//!
//! A page's printed number is hunted in the first few lines of its extracted
//! text with an ordered ladder of patterns: strict, labelled forms first so
//! they win over stray numerals, a bare standalone-number fallback last.

use regex::Regex;
use std::sync::OnceLock;

use super::MAX_PRINTED_NUMBER;

/// Page numbers are expected near the top of the page. Scanning further down
/// picks up too many body-text numerals.
const SCAN_LINES: usize = 5;

/// Pattern classes in priority order. Each captures the candidate number in
/// group 1.
fn patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        vec![
            // Line consisting solely of a number
            Regex::new(r"^\s*(\d+)\s*$").expect("valid bare number pattern"),
            // Number flanked by optional dashes: "- 12 -"
            Regex::new(r"^\s*-?\s*(\d+)\s*-?\s*$").expect("valid dashed number pattern"),
            // "Page 12"
            Regex::new(r"(?i)\bpage\s+(\d+)\b").expect("valid page label pattern"),
            // "P. 12", "P 12", "p12"
            Regex::new(r"(?i)\bp\.?\s*(\d+)\b").expect("valid abbreviated label pattern"),
            // Fallback: a short standalone numeral anywhere in the line
            Regex::new(r"(?:^|\s)(\d{1,4})(?:\s|$)").expect("valid standalone number pattern"),
        ]
    })
}

/// Find the printed page number in a page's text, if any.
///
/// Only the first [`SCAN_LINES`] lines are considered. The first matching
/// line wins; within a line, patterns are tried in priority order. A captured
/// integer outside `[1, MAX_PRINTED_NUMBER]` is rejected as implausible and
/// the scan moves on to the next pattern or line.
pub fn detect_printed_number(text: &str) -> Option<u32> {
    for line in text.lines().take(SCAN_LINES) {
        for pattern in patterns() {
            if let Some(captures) = pattern.captures(line) {
                if let Some(number) = plausible_number(captures.get(1)) {
                    return Some(number);
                }
            }
        }
    }

    None
}

fn plausible_number(capture: Option<regex::Match>) -> Option<u32> {
    let number: u32 = capture?.as_str().parse().ok()?;
    if (1..=MAX_PRINTED_NUMBER).contains(&number) {
        Some(number)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("42", Some(42))]
    #[case("   7   ", Some(7))]
    #[case("9999", Some(9999))]
    #[case("- 12 -", Some(12))]
    #[case("-3-", Some(3))]
    #[case("- 8", Some(8))]
    #[case("Page 99", Some(99))]
    #[case("page 3 of 120", Some(3))]
    #[case("P. 15", Some(15))]
    #[case("p 21", Some(21))]
    #[case("Appendix B 17", Some(17))]
    #[case("0", None)]
    #[case("10000", None)]
    #[case("no numerals at all", None)]
    #[case("", None)]
    fn single_line_detection(#[case] line: &str, #[case] expected: Option<u32>) {
        assert_eq!(detect_printed_number(line), expected);
    }

    #[test]
    fn first_matching_line_wins() {
        let text = "Annual Report\n- 17 -\nPage 99";
        assert_eq!(detect_printed_number(text), Some(17));
    }

    #[test]
    fn labelled_form_beats_earlier_bare_numeral_on_the_same_line() {
        // The standalone fallback is the lowest-priority pattern, so the
        // labelled number wins even though 2024 appears first in the line.
        let text = "2024 edition, Page 7";
        assert_eq!(detect_printed_number(text), Some(7));
    }

    #[test]
    fn implausible_capture_falls_through_to_later_patterns() {
        // "Page 10000" is rejected by the range check; the fallback then
        // finds nothing short enough, so the second line decides.
        let text = "Page 10000\n25";
        assert_eq!(detect_printed_number(text), Some(25));
    }

    #[test]
    fn long_numerals_are_invisible_to_the_fallback() {
        assert_eq!(detect_printed_number("report ref 123456 internal"), None);
    }

    #[test]
    fn ignores_numbers_beyond_the_scanned_prefix() {
        let text = "alpha\nbeta\ngamma\ndelta\nepsilon\n42";
        assert_eq!(detect_printed_number(text), None);
    }

    #[test]
    fn fifth_line_is_still_scanned() {
        let text = "alpha\nbeta\ngamma\ndelta\n42\nomega";
        assert_eq!(detect_printed_number(text), Some(42));
    }
}

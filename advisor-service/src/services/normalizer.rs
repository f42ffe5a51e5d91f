//! Strips markdown artifacts from generated text.
//!
//! Rules run in a fixed order: asterisks, then line markers, then blank-line
//! collapsing, then trimming. Marker stripping can leave empty lines behind,
//! so collapsing has to come after it.

use once_cell::sync::Lazy;
use regex::Regex;

static ASTERISKS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\*+").expect("valid regex"));

/// Any stack of bullet (`-`, `•`), numbering (`12.`) and heading (`##`) markers
/// at the start of a line. Each marker must be followed by horizontal
/// whitespace or the end of the line.
static LINE_MARKERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:(?:[-•]|\d+\.|#+)(?:[ \t]+|$))+").expect("valid regex")
});

static EXCESS_NEWLINES: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Remove markdown formatting and tidy whitespace. Never fails; empty in, empty out.
///
/// Absent text is the caller's `Option`: `text.map(normalize).unwrap_or_default()`.
pub fn normalize(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let text = text.replace("\r\n", "\n");
    let text = ASTERISKS.replace_all(&text, "");
    let text = LINE_MARKERS.replace_all(&text, "");
    let text = EXCESS_NEWLINES.replace_all(&text, "\n\n");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_marker_line(text: &str) -> bool {
        text.lines().any(|line| LINE_MARKERS.is_match(line))
    }

    #[test]
    fn empty_and_absent_input_yield_empty_string() {
        assert_eq!(normalize(""), "");
        assert_eq!(None::<&str>.map(normalize).unwrap_or_default(), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn removes_emphasis_asterisks() {
        assert_eq!(
            normalize("**Raise pH** to *6.5* now"),
            "Raise pH to 6.5 now"
        );
    }

    #[test]
    fn strips_bullets_numbers_and_headings() {
        let raw = "## Summary\n- Check the pump\n• Flush the tank\n1. Add buffer\n12. Retest";
        assert_eq!(
            normalize(raw),
            "Summary\nCheck the pump\nFlush the tank\nAdd buffer\nRetest"
        );
    }

    #[test]
    fn strips_indented_and_stacked_markers() {
        assert_eq!(normalize("   - 1. ## Deep item"), "Deep item");
        assert_eq!(normalize("- - nested"), "nested");
    }

    #[test]
    fn keeps_values_that_look_like_markers() {
        assert_eq!(normalize("6.5 is ideal"), "6.5 is ideal");
        assert_eq!(normalize("-5°C overnight"), "-5°C overnight");
        assert_eq!(normalize("#hydroponics"), "#hydroponics");
    }

    #[test]
    fn collapses_runs_of_blank_lines() {
        assert_eq!(normalize("one\n\n\n\n\ntwo"), "one\n\ntwo");
        assert_eq!(normalize("one\r\n\r\n\r\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn marker_only_lines_collapse_with_neighbours() {
        assert_eq!(normalize("intro\n\n-\n\nbody"), "intro\n\nbody");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(normalize("\n\n  advice  \n\n"), "advice");
    }

    #[test]
    fn output_has_no_markers_or_long_newline_runs() {
        let samples = [
            "# Title\n\n\n\n* **Bold** item\n- bullet\n\n\n3. third\n#### deep",
            "***\n\n\n\n- \n• x\n2.\n###",
            "plain text with no markup",
            "  10. ten\n\t- tabbed\n",
        ];

        for sample in samples {
            let cleaned = normalize(sample);
            assert!(!cleaned.contains('*'), "asterisk left in {cleaned:?}");
            assert!(!cleaned.contains("\n\n\n"), "newline run in {cleaned:?}");
            assert!(!has_marker_line(&cleaned), "marker left in {cleaned:?}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        let samples = [
            "## Heading\n\n\n- a\n- b\n\n\n\n1. c",
            "Keep pH between 5.5 and 6.5.\n\nTop up nutrients.",
            "",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once);
        }
    }
}

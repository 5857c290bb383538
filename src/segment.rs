//! Positional splitting of a raw problem description into question,
//! examples, constraints, and follow-up, keyed on label markers.

use std::sync::LazyLock;

use regex::Regex;

static EXAMPLES_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bexamples?\s*:").unwrap());
static EXAMPLE_N_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bexample\s*\d+\s*:").unwrap());
static CONSTRAINTS_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bconstraints?\s*:").unwrap());
static FOLLOWUP_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bfollow[-\s]*up\s*:").unwrap());

static EXAMPLES_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*(examples?\s*:|example\s*\d+\s*:)\s*").unwrap());
static CONSTRAINTS_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*constraints?\s*:\s*").unwrap());
static FOLLOWUP_STRIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*follow[-\s]*up\s*:\s*").unwrap());

// Scraped constraint text loses superscripts: "10^4" arrives as "104".
// Only a single trailing nonzero digit is rewritten, so a literal 100 survives.
static NEG_EXPONENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b-10([1-9])\b").unwrap());
static POS_EXPONENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b10([1-9])\b").unwrap());

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Segments {
    pub question: String,
    pub examples: String,
    pub constraints: String,
    pub follow_up: String,
}

/// Split a description into its four segments.
///
/// Markers are matched case-insensitively but the returned text keeps the
/// input's casing. The split is purely positional: each segment runs from
/// its marker to the next later marker (or the end), so descriptions with
/// markers in an unusual order still partition deterministically. Only the
/// leading label of each segment is stripped; each segment's whitespace is
/// collapsed to single spaces.
pub fn segment_description(desc: &str) -> Segments {
    if desc.trim().is_empty() {
        return Segments::default();
    }

    let ex_start = [
        first_start(&EXAMPLES_LABEL, desc),
        first_start(&EXAMPLE_N_LABEL, desc),
    ]
    .into_iter()
    .flatten()
    .min();
    let cons_start = first_start(&CONSTRAINTS_LABEL, desc);
    let fol_start = first_start(&FOLLOWUP_LABEL, desc);
    let n = desc.len();

    let q_end = [ex_start, cons_start, fol_start]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(n);
    let question = &desc[..q_end];

    let examples = match ex_start {
        Some(start) => {
            let end = [cons_start, fol_start]
                .into_iter()
                .flatten()
                .filter(|&p| p > start)
                .min()
                .unwrap_or(n);
            strip_label(&EXAMPLES_STRIP, &desc[start..end])
        }
        None => String::new(),
    };

    let constraints = match cons_start {
        Some(start) => {
            let end = match fol_start {
                Some(f) if f > start => f,
                _ => n,
            };
            fix_exponents(&strip_label(&CONSTRAINTS_STRIP, &desc[start..end]))
        }
        None => String::new(),
    };

    let follow_up = match fol_start {
        Some(start) => strip_label(&FOLLOWUP_STRIP, &desc[start..]),
        None => String::new(),
    };

    Segments {
        question: collapse_ws(question),
        examples: collapse_ws(&examples),
        constraints: collapse_ws(&constraints),
        follow_up: collapse_ws(&follow_up),
    }
}

/// Rewrite flattened exponents (`109`, `-105`) back to caret form.
pub fn fix_exponents(text: &str) -> String {
    let step = NEG_EXPONENT.replace_all(text, "-10^${1}");
    POS_EXPONENT.replace_all(&step, "10^${1}").into_owned()
}

fn first_start(re: &Regex, s: &str) -> Option<usize> {
    re.find(s).map(|m| m.start())
}

fn strip_label(re: &Regex, s: &str) -> String {
    re.replace(s, "").into_owned()
}

fn collapse_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_SUM: &str = "Given an array of integers nums and an integer target, \
        return indices of the two numbers such that they add up to target.\n\n\
        Example 1:\nInput: nums = [2,7,11,15], target = 9\nOutput: [0,1]\n\n\
        Example 2:\nInput: nums = [3,2,4], target = 6\nOutput: [1,2]\n\n\
        Constraints:\n2 <= nums.length <= 104\n-109 <= nums[i] <= 109\n\n\
        Follow-up: Can you come up with an algorithm that is less than O(n2) \
        time complexity?";

    #[test]
    fn splits_all_four_segments() {
        let seg = segment_description(TWO_SUM);
        assert!(seg.question.starts_with("Given an array of integers"));
        assert!(seg.question.ends_with("add up to target."));
        assert!(seg.examples.starts_with("Input: nums = [2,7,11,15]"));
        assert!(seg.constraints.starts_with("2 <= nums.length"));
        assert!(seg.follow_up.starts_with("Can you come up"));
    }

    #[test]
    fn leading_label_stripped_later_labels_kept() {
        let seg = segment_description(TWO_SUM);
        assert!(!seg.examples.to_lowercase().starts_with("example"));
        assert!(seg.examples.contains("Example 2:"));
    }

    #[test]
    fn output_keeps_original_casing() {
        let seg = segment_description("ReTurn THE answer. CONSTRAINTS: N <= 50");
        assert_eq!(seg.question, "ReTurn THE answer.");
        assert_eq!(seg.constraints, "N <= 50");
    }

    #[test]
    fn no_markers_means_everything_is_question() {
        let seg = segment_description("Just a plain   description\nwith no markers");
        assert_eq!(seg.question, "Just a plain description with no markers");
        assert_eq!(seg.examples, "");
        assert_eq!(seg.constraints, "");
        assert_eq!(seg.follow_up, "");
    }

    #[test]
    fn blank_input_yields_empty_segments() {
        assert_eq!(segment_description(""), Segments::default());
        assert_eq!(segment_description("   \n\t "), Segments::default());
    }

    #[test]
    fn marker_at_start_leaves_question_empty() {
        let seg = segment_description("Constraints: 1 <= n <= 10");
        assert_eq!(seg.question, "");
        assert_eq!(seg.constraints, "1 <= n <= 10");
    }

    #[test]
    fn out_of_order_markers_split_positionally() {
        let seg = segment_description("Constraints: n <= 5. Example 1: Input: n = 3");
        assert_eq!(seg.question, "");
        assert_eq!(seg.examples, "Input: n = 3");
        // the constraints span runs to the end when no later marker follows it
        assert!(seg.constraints.starts_with("n <= 5."));
    }

    #[test]
    fn follow_up_label_variants() {
        for label in ["Follow-up:", "Follow up:", "follow  up :"] {
            let seg = segment_description(&format!("Sum the array. {} Do it in O(1) space.", label));
            assert_eq!(seg.follow_up, "Do it in O(1) space.", "label {:?}", label);
        }
    }

    #[test]
    fn exponents_rewritten_in_constraints() {
        let seg = segment_description("Add. Constraints: 1 <= n <= 104, -109 <= x <= 109");
        assert_eq!(seg.constraints, "1 <= n <= 10^4, -10^9 <= x <= 10^9");
    }

    #[test]
    fn exponent_fixup_leaves_round_numbers_alone() {
        assert_eq!(fix_exponents("109"), "10^9");
        assert_eq!(fix_exponents("-105"), "-10^5");
        assert_eq!(fix_exponents("100"), "100");
        assert_eq!(fix_exponents("0 <= n <= 100"), "0 <= n <= 100");
        assert_eq!(fix_exponents("2104"), "2104");
    }

    #[test]
    fn exponent_fixup_not_applied_outside_constraints() {
        let seg = segment_description("Count to 109. Example: 109 steps.");
        assert_eq!(seg.question, "Count to 109.");
        assert_eq!(seg.examples, "109 steps.");
    }

    #[test]
    fn question_segment_is_stable_under_resplit() {
        let first = segment_description(TWO_SUM);
        let second = segment_description(&first.question);
        assert_eq!(second.question, first.question);
        assert_eq!(second.examples, "");
    }

    #[test]
    fn resegmenting_rejoined_output_is_stable() {
        let first = segment_description(TWO_SUM);
        let rejoined = format!(
            "{} Examples: {} Constraints: {} Follow-up: {}",
            first.question, first.examples, first.constraints, first.follow_up
        );
        let second = segment_description(&rejoined);
        assert_eq!(second, first);
    }
}

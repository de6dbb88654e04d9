use regex::Regex;
use std::sync::OnceLock;

/// A word character and a period, followed by the whitespace that ends the sentence.
fn sentence_boundary() -> &'static Regex {
    static BOUNDARY: OnceLock<Regex> = OnceLock::new();
    BOUNDARY.get_or_init(|| Regex::new(r"(\w\.)\s+").expect("sentence boundary pattern is valid"))
}

/// Splits after `.` only when preceded by a word character, so "3.5" stays
/// whole while "U.S. economy" is split after "U.S.".
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    for caps in sentence_boundary().captures_iter(text) {
        let (Some(terminator), Some(whole)) = (caps.get(1), caps.get(0)) else {
            continue;
        };
        sentences.push(&text[start..terminator.end()]);
        start = whole.end();
    }
    sentences.push(&text[start..]);
    sentences
}

/// Splits `text` into `num_parts` sentence-aligned parts joined by single spaces.
///
/// Each part nominally covers `len / num_parts` sentences; its end is pushed
/// forward while the sentence there does not end with a period. Sentences
/// past the last nominal end are dropped and parts may come back empty when
/// more parts than sentences are requested. `num_parts == 0` yields nothing.
pub fn split_into_parts(text: &str, num_parts: usize) -> Vec<String> {
    if num_parts == 0 {
        return Vec::new();
    }

    let sentences = split_sentences(text);
    let sentences_per_part = sentences.len() / num_parts;

    (0..num_parts)
        .map(|i| {
            let start = i * sentences_per_part;
            let mut end = (i + 1) * sentences_per_part;
            while end < sentences.len() && !sentences[end].ends_with('.') {
                end += 1;
            }
            sentences[start..end].join(" ")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sentences_on_word_period_whitespace() {
        let sentences = split_sentences("Growth slowed.  Inflation rose.\nRates held.");
        assert_eq!(sentences, vec!["Growth slowed.", "Inflation rose.", "Rates held."]);
    }

    #[test]
    fn test_split_sentences_abbreviations_and_decimals() {
        let sentences = split_sentences("The U.S. economy grew 3.5 percent. Markets cheered. ... Then.");
        assert_eq!(sentences, vec!["The U.S.", "economy grew 3.5 percent.", "Markets cheered.", "... Then."]);
    }

    #[test]
    fn test_split_sentences_keeps_trailing_empty() {
        assert_eq!(split_sentences("A. B. "), vec!["A.", "B.", ""]);
        assert_eq!(split_sentences(""), vec![""]);
    }

    #[test]
    fn test_returns_requested_number_of_parts() {
        let text = "One. Two. Three. Four. Five. Six. Seven";
        for num_parts in 1..=10 {
            assert_eq!(split_into_parts(text, num_parts).len(), num_parts);
        }
        assert_eq!(split_into_parts("", 3).len(), 3);
    }

    #[test]
    fn test_single_part_is_rejoined_text() {
        let parts = split_into_parts("First one.   Second one.\n\nThird", 1);
        assert_eq!(parts, vec!["First one. Second one. Third"]);
    }

    #[test]
    fn test_zero_parts() {
        assert!(split_into_parts("Anything.", 0).is_empty());
    }

    #[test]
    fn test_trailing_sentences_are_dropped() {
        let parts = split_into_parts("A. B. C. D. E.", 2);
        assert_eq!(parts, vec!["A. B.", "C. D."]);
    }

    #[test]
    fn test_end_extends_past_unterminated_sentence() {
        let parts = split_into_parts("A. B. C. ", 3);
        assert_eq!(parts, vec!["A.", "B.", "C. "]);

        let parts = split_into_parts("A. B. C. D tail", 2);
        assert_eq!(parts, vec!["A. B.", "C. D tail"]);
    }

    #[test]
    fn test_more_parts_than_sentences() {
        let parts = split_into_parts("Only one. Two.", 5);
        assert_eq!(parts.len(), 5);
        assert!(parts.iter().all(String::is_empty));

        // every part starts at zero and extends over the same sentence
        let parts = split_into_parts("Unterminated", 2);
        assert_eq!(parts, vec!["Unterminated", "Unterminated"]);
    }
}

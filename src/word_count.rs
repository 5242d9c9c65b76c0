const WORDS_PER_PAGE: usize = 250;
const WORDS_PER_MINUTE_READ: usize = 200;

/// Number of whitespace-delimited, non-empty tokens in `text`.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Manuscript pages at 250 words a page, rounded up.
pub fn pages(words: usize) -> usize {
    words.div_ceil(WORDS_PER_PAGE)
}

/// Minutes to read `words` at 200 words a minute, rounded up.
pub fn reading_minutes(words: usize) -> usize {
    words.div_ceil(WORDS_PER_MINUTE_READ)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_words_sentence() {
        assert_eq!(count_words("The quick brown fox"), 4);
    }

    #[test]
    fn test_count_words_empty_and_blank() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
        assert_eq!(count_words("\n\t \r\n"), 0);
    }

    #[test]
    fn test_trailing_whitespace_is_not_a_word() {
        for s in ["", "one", "one two", "  padded  ", "line\nbreak", "tab\tsep"] {
            assert_eq!(count_words(s), count_words(&format!("{} ", s)));
        }
    }

    #[test]
    fn test_count_words_mixed_whitespace() {
        assert_eq!(count_words("  It was\ta dark\n\nand stormy   night. "), 7);
    }

    #[test]
    fn test_count_words_punctuation_stays_attached() {
        assert_eq!(count_words("\"Hello,\" she said -- quietly."), 5);
    }

    #[test]
    fn test_pages_rounds_up() {
        assert_eq!(pages(0), 0);
        assert_eq!(pages(1), 1);
        assert_eq!(pages(250), 1);
        assert_eq!(pages(251), 2);
    }

    #[test]
    fn test_reading_minutes_rounds_up() {
        assert_eq!(reading_minutes(0), 0);
        assert_eq!(reading_minutes(199), 1);
        assert_eq!(reading_minutes(200), 1);
        assert_eq!(reading_minutes(401), 3);
    }
}

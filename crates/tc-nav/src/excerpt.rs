//! Short previews of topic descriptions for the management table.

use serde::{Deserialize, Serialize};

/// Words kept in an excerpt.
pub const DEFAULT_TAKE_WORDS: usize = 8;

/// Word count above which an ellipsis is appended.
///
/// Differs from [`DEFAULT_TAKE_WORDS`]: descriptions of 9 to 25 words are cut
/// without an ellipsis. Use [`ExcerptConfig::uniform`] to align both cutoffs.
pub const DEFAULT_ELLIPSIS_AFTER: usize = 25;

const ELLIPSIS: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcerptConfig {
    /// How many space-separated tokens to keep
    pub take_words: usize,
    /// Append an ellipsis when the original has more tokens than this
    pub ellipsis_after: usize,
}

impl Default for ExcerptConfig {
    fn default() -> Self {
        Self {
            take_words: DEFAULT_TAKE_WORDS,
            ellipsis_after: DEFAULT_ELLIPSIS_AFTER,
        }
    }
}

impl ExcerptConfig {
    /// Truncate and mark truncation at the same word count.
    pub const fn uniform(words: usize) -> Self {
        Self {
            take_words: words,
            ellipsis_after: words,
        }
    }
}

/// Build the excerpt of `text`, or `None` when there is no text at all.
///
/// Tokens are split on single spaces, so runs of spaces count as empty
/// tokens. The text is not parsed as HTML.
pub fn excerpt(text: &str, config: ExcerptConfig) -> Option<String> {
    if text.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = text.split(' ').collect();
    let mut out = tokens
        .iter()
        .take(config.take_words)
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    if tokens.len() > config.ellipsis_after {
        out.push_str(ELLIPSIS);
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        (1..=n).map(|i| format!("w{i}")).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_text_is_untouched() {
        for n in 1..=8 {
            let text = words(n);
            assert_eq!(excerpt(&text, ExcerptConfig::default()), Some(text.clone()));
        }
    }

    #[test]
    fn test_medium_text_is_cut_without_ellipsis() {
        for n in 9..=25 {
            let out = excerpt(&words(n), ExcerptConfig::default()).unwrap();
            assert_eq!(out, words(8));
        }
    }

    #[test]
    fn test_long_text_is_cut_with_ellipsis() {
        let out = excerpt(&words(26), ExcerptConfig::default()).unwrap();
        assert_eq!(out, format!("{}...", words(8)));

        let out = excerpt(&words(200), ExcerptConfig::default()).unwrap();
        assert!(out.ends_with("w8..."));
    }

    #[test]
    fn test_uniform_cutoff() {
        let config = ExcerptConfig::uniform(8);
        assert_eq!(excerpt(&words(8), config).unwrap(), words(8));
        assert_eq!(excerpt(&words(9), config).unwrap(), format!("{}...", words(8)));
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(excerpt("", ExcerptConfig::default()), None);
    }

    #[test]
    fn test_html_is_split_on_spaces_only() {
        let html = "<p>Hello <strong>bright</strong> world</p>";
        assert_eq!(excerpt(html, ExcerptConfig::default()).unwrap(), html);
    }

    #[test]
    fn test_double_spaces_count_as_tokens() {
        // "a", "", "b" is three tokens
        let out = excerpt("a  b c d e f g h", ExcerptConfig::uniform(3)).unwrap();
        assert_eq!(out, "a  b...");
    }
}

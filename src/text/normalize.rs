//! Message text cleaning
//!
//! `clean_text` is pure and total: every input, including the empty string,
//! maps to a (possibly empty) string of lowercase Latin words longer than two
//! characters separated by single spaces. Applying it twice changes nothing.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// URLs, @mentions and #hashtags
static NOISE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"http\S+|www\S+|@\w+|#\w+").expect("valid noise pattern"));

/// Tokens this short carry no topic information
pub const MIN_TOKEN_CHARS: usize = 3;

/// Clean raw message text for context comparison
pub fn clean_text(text: &str) -> String {
    let composed: String = text.nfc().collect();
    let lowered = composed.to_lowercase();
    let without_noise = NOISE_PATTERN.replace_all(&lowered, "");

    let letters_only: String = without_noise
        .chars()
        .filter(|c| is_latin_letter(*c) || c.is_whitespace())
        .collect();

    // Removing punctuation can splice a link back together ("ht.tp" -> "http")
    let letters_only = NOISE_PATTERN.replace_all(&letters_only, "");

    letters_only
        .split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .collect::<Vec<&str>>()
        .join(" ")
}

/// Basic Latin and Latin-1 letters, accented ones included
pub fn is_latin_letter(c: char) -> bool {
    c.is_ascii_alphabetic()
        || (('\u{00C0}'..='\u{00FF}').contains(&c) && c != '\u{00D7}' && c != '\u{00F7}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_removes_urls_mentions_hashtags() {
        let cleaned = clean_text("Veja https://exemplo.com/x e www.site.org com @maria sobre #ajuda");
        assert_eq!(cleaned, "veja com sobre");
    }

    #[test]
    fn test_clean_keeps_accented_letters() {
        assert_eq!(
            clean_text("Ajuda URGENTE, necessária!!!"),
            "ajuda urgente necessária"
        );
        assert_eq!(clean_text("Violência doméstica"), "violência doméstica");
    }

    #[test]
    fn test_clean_composes_decomposed_accents() {
        // "e" followed by a combining acute accent
        let decomposed = "cafe\u{0301} forte";
        assert_eq!(clean_text(decomposed), "café forte");
    }

    #[test]
    fn test_clean_drops_short_tokens_and_digits() {
        assert_eq!(clean_text("eu vi 3 vezes em 2024"), "vezes");
    }

    #[test]
    fn test_clean_collapses_whitespace() {
        assert_eq!(clean_text("  muito\t\tcansada \n hoje  "), "muito cansada hoje");
    }

    #[test]
    fn test_clean_empty_and_symbol_only() {
        assert_eq!(clean_text(""), "");
        assert_eq!(clean_text("!!! ??? 123 ..."), "");
        assert_eq!(clean_text("×÷ 😀"), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let samples = [
            "",
            "Preciso de ajuda",
            "Ajuda urgente necessária",
            "Quero denunciar violência",
            "ht.tpabc normal",
            "w.w.w.exemplo palavra",
            "HTTP://EXEMPLO.COM e Www.Teste",
            "a@b.c texto#tag fim",
            "CAFE\u{0301} ÇÃO ÀÉÎÕÜ",
            "İstanbul ſtrange ﬁnal",
            "mistura de   espaços\u{00A0}não\u{2003}quebráveis",
        ];
        for sample in samples {
            let once = clean_text(sample);
            let twice = clean_text(&once);
            assert_eq!(once, twice, "not idempotent for {sample:?}");
        }
    }

    #[test]
    fn test_spliced_link_is_removed() {
        assert_eq!(clean_text("ht.tpabc normal"), "normal");
    }

    #[test]
    fn test_is_latin_letter() {
        assert!(is_latin_letter('a'));
        assert!(is_latin_letter('Ç'));
        assert!(is_latin_letter('ú'));
        assert!(!is_latin_letter('×'));
        assert!(!is_latin_letter('÷'));
        assert!(!is_latin_letter('1'));
        assert!(!is_latin_letter('ł'));
    }
}

use lazy_static::lazy_static;
use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

// A grapheme cluster is an emoji if it starts with a pictographic code point or
// a regional indicator (flags), or if it is a keycap sequence.
const EMOJI_GRAPHEME_PATTERN: &str =
    r"^(?:\p{Extended_Pictographic}|\p{Regional_Indicator}|[0-9#*]\x{FE0F}?\x{20E3})";

/// Every emoji in the text, in order and with repeats.
///
/// Multi-code-point emoji (ZWJ sequences, skin tones, flags) are returned as a
/// single glyph.
pub fn extract_emoji(text: &str) -> impl Iterator<Item = &str> {
    lazy_static! {
        static ref EMOJI_GRAPHEME_RE: Regex = Regex::new(EMOJI_GRAPHEME_PATTERN).unwrap();
    }

    text.graphemes(true)
        .filter(|grapheme| EMOJI_GRAPHEME_RE.is_match(grapheme))
}

#[cfg(test)]
mod tests {
    use super::extract_emoji;

    #[test]
    fn test_extract_emoji() {
        let pairs = vec![
            ("😀😀 hi", vec!["😀", "😀"]),
            ("no emoji here, 123 # *", vec![]),
            ("Farmers 🙏🏽 #FarmersProtest 🚜🇮🇳", vec!["🙏🏽", "🚜", "🇮🇳"]),
            ("family: 👨‍👩‍👧‍👦!", vec!["👨‍👩‍👧‍👦"]),
            ("keycap 1️⃣ and ❤️", vec!["1️⃣", "❤️"]),
            ("", vec![]),
        ];

        for (text, expected) in pairs {
            assert_eq!(extract_emoji(text).collect::<Vec<_>>(), expected);
        }
    }
}

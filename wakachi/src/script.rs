//! Script classification and folding of Japanese characters.

/// Checks if the character is a CJK ideograph.
pub(crate) fn is_kanji(c: char) -> bool {
    matches!(c,
        '\u{4E00}'..='\u{9FFF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{3005}' // 々
    )
}

/// Checks if the character is hiragana.
pub(crate) fn is_hiragana(c: char) -> bool {
    matches!(c, '\u{3041}'..='\u{3096}' | '\u{309D}' | '\u{309E}')
}

/// Checks if the character is katakana, excluding the long vowel mark.
pub(crate) fn is_katakana(c: char) -> bool {
    matches!(c, '\u{30A1}'..='\u{30FA}' | '\u{30FD}' | '\u{30FE}' | '\u{31F0}'..='\u{31FF}')
}

/// Checks if every character is kana (or the long vowel mark).
pub(crate) fn is_all_kana(s: &str) -> bool {
    !s.is_empty()
        && s.chars()
            .all(|c| is_hiragana(c) || is_katakana(c) || c == LONG_VOWEL_MARK)
}

/// Checks if any character is a CJK ideograph.
pub(crate) fn has_kanji(s: &str) -> bool {
    s.chars().any(is_kanji)
}

/// The katakana-hiragana prolonged sound mark.
pub(crate) const LONG_VOWEL_MARK: char = 'ー';

/// The hiragana and katakana geminate consonant marks.
pub(crate) const SOKUON_HIRAGANA: char = 'っ';
pub(crate) const SOKUON_KATAKANA: char = 'ッ';

/// Checks if the character is punctuation in either Japanese or ASCII
/// conventions, including the full-width forms.
pub(crate) fn is_punctuation(c: char) -> bool {
    matches!(c,
        '、' | '。' | '，' | '．' | '・' | '！' | '？' | '…' | '‥'
        | '「' | '」' | '『' | '』' | '（' | '）' | '【' | '】'
        | '〜' | '～' | '―'
    ) || (c.is_ascii() && !c.is_ascii_alphanumeric() && !c.is_ascii_whitespace())
}

/// Checks if every character of the surface is punctuation.
pub(crate) fn is_all_punctuation(s: &str) -> bool {
    !s.is_empty() && s.chars().all(is_punctuation)
}

/// Maps a full-width ASCII character to its half-width equivalent.
///
/// Other characters pass through unchanged.
pub(crate) fn to_half_width(c: char) -> char {
    match c {
        '\u{FF01}'..='\u{FF5E}' => {
            // The full-width block mirrors the ASCII graphic block at a
            // fixed offset.
            char::from_u32(c as u32 - 0xFEE0).unwrap_or(c)
        }
        '\u{3000}' => ' ',
        _ => c,
    }
}

/// Maps a half-width ASCII letter or digit to its full-width equivalent.
///
/// Other characters pass through unchanged.
pub(crate) fn to_full_width(c: char) -> char {
    if c.is_ascii_alphanumeric() {
        char::from_u32(c as u32 + 0xFEE0).unwrap_or(c)
    } else {
        c
    }
}

/// Folds full-width ASCII to half-width across a string.
pub(crate) fn fold_width(s: &str) -> String {
    s.chars().map(to_half_width).collect()
}

/// Maps katakana to hiragana, leaving every other character unchanged.
pub(crate) fn katakana_to_hiragana(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '\u{30A1}'..='\u{30F6}' => {
                char::from_u32(c as u32 - 0x60).unwrap_or(c)
            }
            _ => c,
        })
        .collect()
}

/// Folds a reading to its canonical comparison form: half-width, hiragana,
/// with ぢ and づ standardized to じ and ず.
pub(crate) fn fold_reading(s: &str) -> String {
    katakana_to_hiragana(&fold_width(s))
        .chars()
        .map(|c| match c {
            'ぢ' => 'じ',
            'づ' => 'ず',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_kanji() {
        assert!(is_kanji('表'));
        assert!(is_kanji('々'));
        assert!(!is_kanji('あ'));
        assert!(!is_kanji('ア'));
    }

    #[test]
    fn test_kana_classification() {
        assert!(is_hiragana('あ'));
        assert!(!is_hiragana('ア'));
        assert!(is_katakana('ア'));
        assert!(!is_katakana('ー'));
        assert!(is_all_kana("ラーメン"));
        assert!(is_all_kana("らーめん"));
        assert!(!is_all_kana("表ざた"));
    }

    #[test]
    fn test_width_folding() {
        assert_eq!(fold_width("ＡＢＣ１２３"), "ABC123");
        assert_eq!(to_full_width('a'), 'ａ');
        assert_eq!(to_full_width('7'), '７');
        assert_eq!(to_full_width('あ'), 'あ');
    }

    #[test]
    fn test_katakana_to_hiragana() {
        assert_eq!(katakana_to_hiragana("オレンジ"), "おれんじ");
        assert_eq!(katakana_to_hiragana("スーパー"), "すーぱー");
    }

    #[test]
    fn test_fold_reading() {
        assert_eq!(fold_reading("ハナヂ"), "はなじ");
        assert_eq!(fold_reading("ツヅキ"), "つずき");
        assert_eq!(fold_reading("おもて"), "おもて");
    }

    #[test]
    fn test_punctuation() {
        assert!(is_all_punctuation("、"));
        assert!(is_all_punctuation("「」"));
        assert!(!is_all_punctuation("うさぎ。"));
    }
}

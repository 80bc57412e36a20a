//! Normalization of raw text ahead of analysis.

use std::sync::LazyLock;

use regex::Regex;

use crate::script;

static ROMAJI_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("[ａ-ｚ]+").unwrap());

static LONG_VOWEL_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("ーー+").unwrap());

/// Colloquial contractions expanded before analysis, applied in order.
const CONTRACTIONS: &[(&str, &str)] = &[
    ("なくちゃ", "なくては"),
    ("なきゃ", "なければ"),
    ("っつー", "という"),
    ("こないだ", "このあいだ"),
    ("どっか", "どこか"),
];

/// Syllable table for kana transliteration, checked longest first.
const SYLLABLES: &[(&str, &str)] = &[
    ("kya", "きゃ"), ("kyu", "きゅ"), ("kyo", "きょ"),
    ("sha", "しゃ"), ("shu", "しゅ"), ("sho", "しょ"), ("shi", "し"),
    ("cha", "ちゃ"), ("chu", "ちゅ"), ("cho", "ちょ"), ("chi", "ち"),
    ("tsu", "つ"),
    ("nya", "にゃ"), ("nyu", "にゅ"), ("nyo", "にょ"),
    ("hya", "ひゃ"), ("hyu", "ひゅ"), ("hyo", "ひょ"),
    ("mya", "みゃ"), ("myu", "みゅ"), ("myo", "みょ"),
    ("rya", "りゃ"), ("ryu", "りゅ"), ("ryo", "りょ"),
    ("gya", "ぎゃ"), ("gyu", "ぎゅ"), ("gyo", "ぎょ"),
    ("bya", "びゃ"), ("byu", "びゅ"), ("byo", "びょ"),
    ("pya", "ぴゃ"), ("pyu", "ぴゅ"), ("pyo", "ぴょ"),
    ("ka", "か"), ("ki", "き"), ("ku", "く"), ("ke", "け"), ("ko", "こ"),
    ("sa", "さ"), ("si", "し"), ("su", "す"), ("se", "せ"), ("so", "そ"),
    ("ta", "た"), ("ti", "ち"), ("tu", "つ"), ("te", "て"), ("to", "と"),
    ("na", "な"), ("ni", "に"), ("nu", "ぬ"), ("ne", "ね"), ("no", "の"),
    ("ha", "は"), ("hi", "ひ"), ("hu", "ふ"), ("fu", "ふ"), ("he", "へ"),
    ("ho", "ほ"),
    ("ma", "ま"), ("mi", "み"), ("mu", "む"), ("me", "め"), ("mo", "も"),
    ("ya", "や"), ("yu", "ゆ"), ("yo", "よ"),
    ("ra", "ら"), ("ri", "り"), ("ru", "る"), ("re", "れ"), ("ro", "ろ"),
    ("wa", "わ"), ("wo", "を"),
    ("ga", "が"), ("gi", "ぎ"), ("gu", "ぐ"), ("ge", "げ"), ("go", "ご"),
    ("za", "ざ"), ("zi", "じ"), ("zu", "ず"), ("ze", "ぜ"), ("zo", "ぞ"),
    ("ja", "じゃ"), ("ju", "じゅ"), ("jo", "じょ"), ("ji", "じ"),
    ("da", "だ"), ("di", "ぢ"), ("du", "づ"), ("de", "で"), ("do", "ど"),
    ("ba", "ば"), ("bi", "び"), ("bu", "ぶ"), ("be", "べ"), ("bo", "ぼ"),
    ("pa", "ぱ"), ("pi", "ぴ"), ("pu", "ぷ"), ("pe", "ぺ"), ("po", "ぽ"),
    ("a", "あ"), ("i", "い"), ("u", "う"), ("e", "え"), ("o", "お"),
];

fn syllable(s: &str) -> Option<&'static str> {
    SYLLABLES
        .iter()
        .find(|(romaji, _)| *romaji == s)
        .map(|(_, kana)| *kana)
}

const fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'i' | b'u' | b'e' | b'o')
}

/// Transliterates a lowercase romaji run to hiragana.
///
/// Returns `None` unless the whole run transliterates cleanly, in which
/// case the caller keeps the run unchanged.
fn romaji_run_to_hiragana(run: &str) -> Option<String> {
    let ascii = script::fold_width(run);
    let bytes = ascii.as_bytes();
    let mut out = String::new();
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        if !b.is_ascii_lowercase() {
            return None;
        }
        // Syllabic n, unless it opens na/ni/nu/ne/no or a nya-row
        // syllable.
        if b == b'n'
            && (i + 1 == bytes.len()
                || (!is_vowel(bytes[i + 1]) && bytes[i + 1] != b'y'))
        {
            out.push('ん');
            i += 1;
            continue;
        }
        // Geminate consonant.
        if !is_vowel(b) && b != b'n' && i + 1 < bytes.len() && bytes[i + 1] == b {
            out.push('っ');
            i += 1;
            continue;
        }
        let mut len = 3.min(bytes.len() - i);
        loop {
            if let Some(kana) = syllable(&ascii[i..i + len]) {
                out.push_str(kana);
                i += len;
                break;
            }
            if len == 1 {
                return None;
            }
            len -= 1;
        }
    }
    Some(out)
}

/// Normalizes raw text ahead of analysis.
///
/// The rewrite is total and deterministic, and consults no lexicon.
/// Four steps apply in fixed order:
///
/// 1. half-width ASCII letters and digits widen to their full-width
///    equivalents;
/// 2. runs of full-width lowercase romaji transliterate to hiragana when
///    the whole run transliterates cleanly, and stay unchanged otherwise;
/// 3. runs of the long vowel mark ー collapse to a single mark;
/// 4. colloquial contractions expand through a fixed rewrite table.
///
/// # Examples
///
/// ```
/// assert_eq!(wakachi::normalize("ラーーーメン"), "ラーメン");
/// assert_eq!(wakachi::normalize("kawaii"), "かわいい");
/// ```
pub fn normalize(text: &str) -> String {
    let widened: String = text.chars().map(script::to_full_width).collect();

    let transliterated =
        ROMAJI_RUN.replace_all(&widened, |caps: &regex::Captures| {
            let run = &caps[0];
            romaji_run_to_hiragana(run).unwrap_or_else(|| run.to_string())
        });

    let collapsed = LONG_VOWEL_RUN.replace_all(&transliterated, "ー");

    let mut out = collapsed.into_owned();
    for (from, to) in CONTRACTIONS {
        if out.contains(from) {
            out = out.replace(from, to);
        }
    }
    out
}

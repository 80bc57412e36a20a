//! Adapter over the external morphological analyzer.

use std::io::Write;
use std::ops::Range;
use std::process::{Command, Stdio};

use crate::common;
use crate::errors::{Result, WakachiError};
use crate::token::{PosClass, Token};
use crate::utils;

/// A raw segment emitted by the external analyzer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RawSegment {
    /// Surface text of the segment.
    pub surface: String,

    /// Coarse part-of-speech tag.
    pub pos_tag: String,

    /// Fine-grained part-of-speech subtags.
    pub pos_details: Vec<String>,

    /// Dictionary (citation) form. Empty when the analyzer reports none.
    pub dictionary_form: String,

    /// Kana reading. Empty when the analyzer reports none.
    pub reading: String,
}

/// The black-box segmentation contract.
///
/// The analyzer is consulted once per parse and never retried; a failure
/// surfaces to the caller as
/// [`WakachiError::Analyzer`](crate::errors::WakachiError).
pub trait Analyzer: Send + Sync {
    /// Segments the text, returning segments in input order.
    fn analyze(&self, text: &str) -> Result<Vec<RawSegment>>;
}

/// An [`Analyzer`] wrapping a MeCab-style external command.
///
/// Each call spawns one process, writes the text to its standard input,
/// and parses the tab-separated output, one `surface\tfeatures` line per
/// segment with `EOS` terminators.
pub struct ProcessAnalyzer {
    program: String,
    args: Vec<String>,
}

impl ProcessAnalyzer {
    /// Creates an adapter spawning the given program.
    pub fn new<S>(program: S) -> Self
    where
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: vec![],
        }
    }

    /// Appends an argument to the command line.
    pub fn arg<S>(mut self, arg: S) -> Self
    where
        S: Into<String>,
    {
        self.args.push(arg.into());
        self
    }
}

impl Analyzer for ProcessAnalyzer {
    fn analyze(&self, text: &str) -> Result<Vec<RawSegment>> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                WakachiError::analyzer(
                    format!("failed to spawn {}", self.program),
                    e.to_string(),
                )
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(text.as_bytes()).map_err(|e| {
                WakachiError::analyzer(
                    "failed to write to analyzer stdin",
                    e.to_string(),
                )
            })?;
        }

        let output = child.wait_with_output().map_err(|e| {
            WakachiError::analyzer("failed to wait for analyzer", e.to_string())
        })?;
        if !output.status.success() {
            return Err(WakachiError::analyzer(
                format!("{} exited with failure", self.program),
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }

        let stdout = std::str::from_utf8(&output.stdout)?;
        parse_analyzer_output(stdout)
    }
}

/// Parses MeCab-style tab-separated output into segments.
pub(crate) fn parse_analyzer_output(out: &str) -> Result<Vec<RawSegment>> {
    let mut segments = vec![];
    for line in out.lines() {
        if line.is_empty() || line == "EOS" {
            continue;
        }
        let (surface, feature) = line.split_once('\t').ok_or_else(|| {
            WakachiError::invalid_format(
                "analyzer output",
                format!("missing feature field: {line}"),
            )
        })?;
        let features = utils::parse_csv_row(feature);
        let field = |i: usize| {
            features
                .get(i)
                .map(String::as_str)
                .filter(|f| *f != "*")
                .unwrap_or("")
        };
        let pos_details = (1..=3)
            .map(field)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        segments.push(RawSegment {
            surface: surface.to_string(),
            pos_tag: field(0).to_string(),
            pos_details,
            dictionary_form: field(6).to_string(),
            reading: field(7).to_string(),
        });
    }
    Ok(segments)
}

/// Assigns each segment its exact char span in `text`.
///
/// Whitespace the analyzer swallowed is skipped between segments; a
/// segment whose surface does not occur at the scan position is
/// malformed analyzer output.
pub(crate) fn align_segments(text: &str, segments: &[RawSegment]) -> Result<Vec<Token>> {
    let chars: Vec<char> = text.chars().collect();
    let mut pos = 0;
    let mut tokens = Vec::with_capacity(segments.len());

    for seg in segments {
        let leads_with_separator =
            seg.surface.starts_with(common::RECORD_SEPARATOR);
        while pos < chars.len() {
            let c = chars[pos];
            let skippable = c.is_whitespace()
                || (c == common::RECORD_SEPARATOR && !leads_with_separator);
            if !skippable {
                break;
            }
            pos += 1;
        }

        let seg_chars: Vec<char> = seg.surface.chars().collect();
        let end = pos + seg_chars.len();
        if seg_chars.is_empty() || end > chars.len() || chars[pos..end] != seg_chars[..] {
            return Err(WakachiError::invalid_format(
                "analyzer output",
                format!("segment {:?} does not align at char {pos}", seg.surface),
            ));
        }

        let dictionary_form = if seg.dictionary_form.is_empty() {
            seg.surface.clone()
        } else {
            seg.dictionary_form.clone()
        };
        tokens.push(Token::new(
            pos,
            end,
            seg.surface.clone(),
            PosClass::from_tag(&seg.pos_tag),
            seg.pos_details.clone(),
            dictionary_form,
            seg.reading.clone(),
        ));
        pos = end;
    }
    Ok(tokens)
}

/// Joins texts with the record separator, returning the joined string
/// and the char range each text occupies in it.
pub(crate) fn join_texts(texts: &[&str]) -> (String, Vec<Range<usize>>) {
    let mut joined = String::new();
    let mut ranges = Vec::with_capacity(texts.len());
    let mut offset = 0;
    for (i, text) in texts.iter().enumerate() {
        if i > 0 {
            joined.push(common::RECORD_SEPARATOR);
            offset += 1;
        }
        let len = text.chars().count();
        joined.push_str(text);
        ranges.push(offset..offset + len);
        offset += len;
    }
    (joined, ranges)
}

/// Splits batch tokens back out per text, rebasing spans to each text's
/// own char offsets.
///
/// Tokens not fully inside one text's range cover a separator, so they
/// are dropped rather than shifting a neighbor's offsets.
pub(crate) fn demux_tokens(
    tokens: Vec<Token>,
    ranges: &[Range<usize>],
) -> Vec<Vec<Token>> {
    let mut per_text: Vec<Vec<Token>> = ranges.iter().map(|_| vec![]).collect();
    for mut token in tokens {
        let home = ranges
            .iter()
            .position(|r| r.start <= token.start && token.end <= r.end);
        if let Some(i) = home {
            token.start -= ranges[i].start;
            token.end -= ranges[i].start;
            per_text[i].push(token);
        }
    }
    per_text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_analyzer_output() {
        let out = "注文\t名詞,サ変接続,*,*,*,*,注文,チュウモン,チューモン\nEOS\n";
        let segments = parse_analyzer_output(out).unwrap();
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].surface, "注文");
        assert_eq!(segments[0].pos_tag, "名詞");
        assert_eq!(segments[0].pos_details, vec!["サ変接続"]);
        assert_eq!(segments[0].dictionary_form, "注文");
        assert_eq!(segments[0].reading, "チュウモン");
    }

    #[test]
    fn test_parse_analyzer_output_short_features() {
        let out = "、\t記号,読点,*,*\n";
        let segments = parse_analyzer_output(out).unwrap();
        assert_eq!(segments[0].pos_tag, "記号");
        assert!(segments[0].dictionary_form.is_empty());
        assert!(segments[0].reading.is_empty());
    }

    #[test]
    fn test_parse_analyzer_output_missing_tab() {
        assert!(parse_analyzer_output("注文").is_err());
    }

    fn seg(surface: &str) -> RawSegment {
        RawSegment {
            surface: surface.to_string(),
            pos_tag: "名詞".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_align_skips_whitespace() {
        let tokens =
            align_segments("猫 と犬", &[seg("猫"), seg("と"), seg("犬")]).unwrap();
        assert_eq!(tokens[0].range_char(), 0..1);
        assert_eq!(tokens[1].range_char(), 2..3);
        assert_eq!(tokens[2].range_char(), 3..4);
    }

    #[test]
    fn test_align_rejects_mismatch() {
        assert!(align_segments("猫と犬", &[seg("犬")]).is_err());
    }

    #[test]
    fn test_join_and_demux() {
        let (joined, ranges) = join_texts(&["ママ", "パパ"]);
        assert_eq!(joined, "ママ\u{241E}パパ");
        assert_eq!(ranges, vec![0..2, 3..5]);

        let tokens = align_segments(
            &joined,
            &[seg("ママ"), seg("\u{241E}"), seg("パパ")],
        )
        .unwrap();
        let split = demux_tokens(tokens, &ranges);
        assert_eq!(split.len(), 2);
        assert_eq!(split[0].len(), 1);
        assert_eq!(split[0][0].surface(), "ママ");
        assert_eq!(split[0][0].range_char(), 0..2);
        assert_eq!(split[1].len(), 1);
        assert_eq!(split[1][0].surface(), "パパ");
        assert_eq!(split[1][0].range_char(), 0..2);
    }

    #[test]
    fn test_demux_drops_swallowed_separator() {
        let (joined, ranges) = join_texts(&["ママ", "パパ"]);
        // The analyzer swallowed the separator entirely.
        let tokens =
            align_segments(&joined, &[seg("ママ"), seg("パパ")]).unwrap();
        let split = demux_tokens(tokens, &ranges);
        assert_eq!(split[0][0].surface(), "ママ");
        assert_eq!(split[1][0].surface(), "パパ");
    }
}

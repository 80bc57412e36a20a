use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use wakachi::analyzer::ProcessAnalyzer;
use wakachi::lexicon::MemoryLexicon;
use wakachi::{MediaKind, Parser as Wakachi};

use clap::Parser;

#[derive(Clone, Debug)]
enum OutputMode {
    Surface,
    Detail,
    Diagnostic,
}

impl FromStr for OutputMode {
    type Err = &'static str;

    fn from_str(mode: &str) -> Result<Self, Self::Err> {
        match mode {
            "surface" => Ok(Self::Surface),
            "detail" => Ok(Self::Detail),
            "diagnostic" => Ok(Self::Diagnostic),
            _ => Err("Could not parse a mode"),
        }
    }
}

fn media_kind(kind: &str) -> Result<MediaKind, &'static str> {
    match kind {
        "book" => Ok(MediaKind::Book),
        "subtitle" => Ok(MediaKind::Subtitle),
        "web" => Ok(MediaKind::WebText),
        _ => Err("Could not parse a media kind"),
    }
}

#[derive(Parser, Debug)]
#[clap(name = "parse", about = "Parses text into lexicon words")]
struct Args {
    /// Lexicon CSV file.
    #[clap(short = 'l', long)]
    lexicon: PathBuf,

    /// External analyzer command.
    #[clap(short = 'a', long, default_value = "mecab")]
    analyzer: String,

    /// Extra arguments passed to the analyzer command.
    #[clap(short = 'A', long)]
    analyzer_arg: Vec<String>,

    /// Output mode. Choices are surface, detail, and diagnostic.
    #[clap(short = 'O', long, default_value = "surface")]
    output_mode: OutputMode,

    /// Media kind. Choices are book, subtitle, and web.
    #[clap(short = 'm', long, default_value = "book", value_parser = media_kind)]
    media: MediaKind,

    /// Reports the sentence count of each input line.
    #[clap(short = 'c', long)]
    count_sentences: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    eprintln!("Loading the lexicon...");
    let lexicon = Arc::new(MemoryLexicon::from_reader(File::open(args.lexicon)?)?);

    let mut analyzer = ProcessAnalyzer::new(args.analyzer);
    for arg in args.analyzer_arg {
        analyzer = analyzer.arg(arg);
    }
    let parser =
        Wakachi::new(Box::new(analyzer), lexicon).with_media_kind(args.media);

    eprintln!("Ready to parse");

    let is_tty = atty::is(atty::Stream::Stdout);

    let out = std::io::stdout();
    let mut out = BufWriter::new(out.lock());
    for line in std::io::stdin().lock().lines() {
        let line = line?;
        match args.output_mode {
            OutputMode::Surface => {
                let words = parser.parse_text(&line)?;
                for (i, word) in words.iter().enumerate() {
                    if i != 0 {
                        out.write_all(b" ")?;
                    }
                    out.write_all(word.surface().as_bytes())?;
                }
                out.write_all(b"\n")?;
            }
            OutputMode::Detail => {
                for word in parser.parse_text(&line)? {
                    let id = match word.word() {
                        Some(idx) => {
                            format!("{}/{}", idx.word_id, idx.reading_index)
                        }
                        None => "OOV".to_string(),
                    };
                    writeln!(
                        &mut out,
                        "{}\t{}\t{}",
                        word.surface(),
                        id,
                        word.inflections().join(";"),
                    )?;
                }
                out.write_all(b"EOS\n")?;
            }
            OutputMode::Diagnostic => {
                let diagnostics = parser.parse_text_diagnostic(&line)?;
                for stage in &diagnostics.stages {
                    writeln!(
                        &mut out,
                        "#stage {}\t{} -> {}",
                        stage.stage, stage.tokens_in, stage.tokens_out,
                    )?;
                    for edit in &stage.edits {
                        writeln!(&mut out, "#edit {}\t{}", edit.stage, edit.reason)?;
                    }
                }
                for token in &diagnostics.tokens {
                    writeln!(&mut out, "{}", token.surface)?;
                    for candidate in &token.candidates {
                        writeln!(
                            &mut out,
                            "  {}/{}\ttotal={}\tselected={}",
                            candidate.idx.word_id,
                            candidate.idx.reading_index,
                            candidate.total,
                            candidate.selected,
                        )?;
                    }
                }
                out.write_all(b"EOS\n")?;
            }
        }
        if args.count_sentences {
            writeln!(&mut out, "#sentences\t{}", parser.count_sentences(&line))?;
        }
        if is_tty {
            out.flush()?;
        }
    }

    Ok(())
}

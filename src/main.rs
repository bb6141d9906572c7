use clap::{ArgAction, Parser, ValueEnum};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use rayon::prelude::*;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{filter::LevelFilter, fmt};

use khmer_lexseg::capabilities::TesseractOcr;
use khmer_lexseg::{
    capabilities, filter_stop_words, load_stop_words, syllables, Dictionary, KhmerSegmenter,
    OcrExtractor,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Longest dictionary match
    Words,
    /// Syllable shape, no dictionary
    Syllables,
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to dictionary file (one word per line)
    #[arg(short, long, env = "KHMER_LEXSEG_DICT", default_value = "data/khmer_dictionary_words.txt")]
    dict: PathBuf,

    /// Input text file, one document per line
    #[arg(
        short,
        long,
        required_unless_present_any = ["capabilities", "ocr_image"],
        conflicts_with = "ocr_image"
    )]
    input: Option<PathBuf>,

    /// Image to OCR; its recognised lines are segmented instead of --input
    #[arg(long)]
    ocr_image: Option<PathBuf>,

    /// Tesseract language model(s) used with --ocr-image
    #[arg(long, default_value = "khm")]
    ocr_lang: String,

    /// Output file (JSONL); stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Limit number of lines to process
    #[arg(short, long)]
    limit: Option<usize>,

    /// Segmentation granularity
    #[arg(short, long, value_enum, default_value_t = Mode::Words)]
    mode: Mode,

    /// CSV file whose first column lists stop words to drop from the output
    #[arg(short, long, env = "KHMER_LEXSEG_STOP_WORDS")]
    stop_words: Option<PathBuf>,

    /// Print detected optional capabilities as JSON and exit
    #[arg(long)]
    capabilities: bool,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Record<'a> {
    id: usize,
    input: &'a str,
    segments: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let caps = capabilities();
    tracing::debug!(pos_tagging = caps.pos_tagging, ocr = caps.ocr, "capabilities");
    if args.capabilities {
        println!("{}", serde_json::to_string(caps)?);
        return Ok(());
    }

    let stop_words = args
        .stop_words
        .as_deref()
        .map(load_stop_words)
        .unwrap_or_default();
    if !stop_words.is_empty() {
        info!(count = stop_words.len(), "stop words loaded");
    }

    let segmenter = match args.mode {
        Mode::Words => {
            let start_load = Instant::now();
            let dictionary = Dictionary::load(&args.dict)
                .with_context(|| format!("failed to load dictionary {}", args.dict.display()))?;
            let segmenter = KhmerSegmenter::new(dictionary);
            info!(
                words = segmenter.dictionary().len(),
                max_word_length = segmenter.dictionary().max_word_length(),
                elapsed = ?start_load.elapsed(),
                "dictionary loaded from {}",
                args.dict.display()
            );
            Some(segmenter)
        }
        Mode::Syllables => None,
    };

    let raw_lines: Vec<String> = match (&args.ocr_image, &args.input) {
        (Some(image), _) => {
            let ocr = TesseractOcr::detect()
                .context("--ocr-image needs tesseract on PATH (or KHMER_LEXSEG_TESSERACT)")?
                .with_language(args.ocr_lang.as_str());
            let bytes = std::fs::read(image)
                .with_context(|| format!("failed to read image {}", image.display()))?;
            let text = ocr
                .extract_text(&bytes)
                .with_context(|| format!("OCR failed for {}", image.display()))?;
            text.lines().map(str::to_string).collect()
        }
        (None, Some(input)) => {
            let file = File::open(input)
                .with_context(|| format!("failed to open input {}", input.display()))?;
            BufReader::new(file).lines().collect::<Result<_, _>>()?
        }
        (None, None) => anyhow::bail!("--input or --ocr-image is required"),
    };
    let mut lines: Vec<String> = raw_lines
        .into_iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();

    if let Some(limit) = args.limit {
        lines.truncate(limit);
    }

    info!("processing {} lines", lines.len());
    let start_process = Instant::now();

    let records: Vec<String> = lines
        .par_iter()
        .enumerate()
        .map(|(id, line)| {
            let segments = match &segmenter {
                Some(segmenter) => segmenter.segment(line),
                None => syllables(line).into_iter().map(str::to_string).collect(),
            };
            let record = Record {
                id,
                input: line,
                segments: filter_stop_words(segments, &stop_words),
            };
            serde_json::to_string(&record)
        })
        .collect::<Result<_, _>>()?;

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create output {}", path.display()))?;
            Box::new(BufWriter::with_capacity(262144, file))
        }
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };
    for record in &records {
        writeln!(writer, "{}", record)?;
    }
    writer.flush()?;

    let duration = start_process.elapsed();
    if let Some(path) = &args.output {
        info!("saved to {}", path.display());
    }
    info!(
        elapsed = ?duration,
        lines_per_sec = lines.len() as f64 / duration.as_secs_f64().max(f64::EPSILON),
        "done"
    );

    Ok(())
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    let subscriber = fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::warn!("tracing subscriber already set; skipping re-initialization");
    }
}

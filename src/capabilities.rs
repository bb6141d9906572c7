//! Optional collaborators: part-of-speech tagging and OCR.
//!
//! Both are backed by external programs. Whether they exist is decided once per
//! process and exposed through [`capabilities`]; a missing program only turns
//! the feature off.

use std::env;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::sync::LazyLock;
use std::thread;

use serde::Serialize;
use tracing::debug;

use crate::error::{Error, Result};

pub const TAGGER_ENV: &str = "KHMER_LEXSEG_TAGGER";
pub const TESSERACT_ENV: &str = "KHMER_LEXSEG_TESSERACT";

const DEFAULT_TAGGER: &str = "khmer-pos-tagger";
const DEFAULT_TESSERACT: &str = "tesseract";
const OCR_LANGUAGE: &str = "khm";

#[derive(Debug, Clone, Default, Serialize)]
pub struct Capabilities {
    pub pos_tagging: bool,
    pub ocr: bool,
    #[serde(skip)]
    tagger_path: Option<PathBuf>,
    #[serde(skip)]
    tesseract_path: Option<PathBuf>,
}

static CAPABILITIES: LazyLock<Capabilities> = LazyLock::new(Capabilities::detect);

/// Capabilities detected for this process. Detection runs on first call;
/// the binary calls this once at startup.
pub fn capabilities() -> &'static Capabilities {
    &CAPABILITIES
}

impl Capabilities {
    fn detect() -> Self {
        let tagger_path = resolve_program(TAGGER_ENV, DEFAULT_TAGGER);
        let tesseract_path = resolve_program(TESSERACT_ENV, DEFAULT_TESSERACT);
        debug!(
            tagger = ?tagger_path,
            tesseract = ?tesseract_path,
            "optional collaborators detected"
        );

        Capabilities {
            pos_tagging: tagger_path.is_some(),
            ocr: tesseract_path.is_some(),
            tagger_path,
            tesseract_path,
        }
    }
}

fn resolve_program(var: &str, default: &str) -> Option<PathBuf> {
    let name = env::var_os(var).unwrap_or_else(|| OsString::from(default));
    find_executable(Path::new(&name))
}

/// Looks `program` up the way a shell would: as given when it contains a path
/// separator, otherwise in each `PATH` entry.
pub fn find_executable(program: &Path) -> Option<PathBuf> {
    if program.as_os_str().is_empty() {
        return None;
    }
    if program.components().count() > 1 {
        return program.is_file().then(|| program.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .flat_map(|dir| executable_candidates(&dir, program))
        .find(|candidate| candidate.is_file())
}

fn executable_candidates(dir: &Path, program: &Path) -> Vec<PathBuf> {
    let plain = dir.join(program);
    if cfg!(windows) && program.extension().is_none() {
        vec![plain.with_extension("exe"), plain]
    } else {
        vec![plain]
    }
}

/// Tags `text` with the detected tagger.
pub fn pos_tag(text: &str) -> Result<Vec<(String, String)>> {
    CommandTagger::detect()
        .ok_or(Error::Unavailable("part-of-speech tagger"))?
        .tag(text)
}

/// Runs OCR over an encoded image with the detected tesseract.
pub fn extract_text(image: &[u8]) -> Result<String> {
    TesseractOcr::detect()
        .ok_or(Error::Unavailable("OCR"))?
        .extract_text(image)
}

/// Tags Khmer text with part-of-speech labels.
pub trait PosTagger {
    fn tag(&self, text: &str) -> Result<Vec<(String, String)>>;
}

/// Extracts text from an encoded image (PNG, JPEG, TIFF...).
pub trait OcrExtractor {
    fn extract_text(&self, image: &[u8]) -> Result<String>;
}

/// Tagger backed by an external program that reads UTF-8 text on stdin and
/// prints one `token<TAB>label` pair per line.
#[derive(Debug, Clone)]
pub struct CommandTagger {
    program: PathBuf,
}

impl CommandTagger {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandTagger {
            program: program.into(),
        }
    }

    pub fn detect() -> Option<Self> {
        capabilities().tagger_path.clone().map(Self::new)
    }
}

impl PosTagger for CommandTagger {
    fn tag(&self, text: &str) -> Result<Vec<(String, String)>> {
        let stdout = run_with_stdin(&self.program, &[], text.as_bytes())?;
        let stdout = String::from_utf8(stdout).map_err(|err| Error::InvalidOutput {
            program: self.program.display().to_string(),
            reason: err.to_string(),
        })?;
        parse_tagged_lines(&stdout).map_err(|reason| Error::InvalidOutput {
            program: self.program.display().to_string(),
            reason,
        })
    }
}

fn parse_tagged_lines(output: &str) -> std::result::Result<Vec<(String, String)>, String> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.split_once('\t') {
            Some((token, label)) => Ok((token.to_string(), label.trim().to_string())),
            None => Err(format!("missing tab separator in line {line:?}")),
        })
        .collect()
}

/// OCR through the `tesseract` command line, using the Khmer language model.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    program: PathBuf,
    language: String,
}

impl TesseractOcr {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        TesseractOcr {
            program: program.into(),
            language: OCR_LANGUAGE.to_string(),
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    pub fn detect() -> Option<Self> {
        capabilities().tesseract_path.clone().map(Self::new)
    }
}

impl OcrExtractor for TesseractOcr {
    fn extract_text(&self, image: &[u8]) -> Result<String> {
        let stdout = run_with_stdin(
            &self.program,
            &["stdin", "stdout", "-l", &self.language],
            image,
        )?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }
}

fn run_with_stdin(program: &Path, args: &[&str], input: &[u8]) -> Result<Vec<u8>> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    let mut stdin = child.stdin.take();
    // stdin is written from a second thread while stdout is drained here.
    let (output, written) = thread::scope(|scope| {
        let writer = scope.spawn(move || match stdin.as_mut() {
            Some(pipe) => pipe.write_all(input),
            None => Ok(()),
        });
        let output = child.wait_with_output();
        (output, writer.join().unwrap_or(Ok(())))
    });
    let output = output?;

    // A failed exit status takes precedence over a broken stdin pipe.
    if !output.status.success() {
        return Err(Error::Collaborator {
            program: program.display().to_string(),
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    written?;
    Ok(output.stdout)
}

//! Reference corpus download and parsing
//!
//! Corpora are XML files with one `<seg>` element per sentence. They are
//! fetched once from a fixed remote location and cached locally by
//! filename. A download failing with a non-200 status is fatal for the
//! evaluation run; a parse failure is recovered by treating that corpus as
//! empty so the run can continue with degraded data.

use std::path::{Path, PathBuf};

use quick_xml::events::Event;
use quick_xml::Reader;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::core::errors::{Result, TranslationError};

/// Remote location of the reference corpora
pub const CORPUS_BASE_URL: &str =
    "https://raw.githubusercontent.com/christos-c/bible-corpus/refs/heads/master/bibles/";

/// Local filename and remote filename for each reference corpus
const CORPUS_FILES: &[(&str, &str)] = &[
    ("english.xml", "English.xml"),
    ("french.xml", "French.xml"),
    ("chinese.xml", "Chinese.xml"),
];

/// The three reference corpora, one sentence list per language
#[derive(Debug, Default)]
pub struct Corpora {
    /// English source sentences
    pub english: Vec<String>,
    /// French reference translations
    pub french: Vec<String>,
    /// Chinese reference translations
    pub chinese: Vec<String>,
}

impl Corpora {
    /// Reference sentences for a destination language, if it is one of the
    /// evaluated languages.
    pub fn reference_for(&self, language: &str) -> Option<&[String]> {
        match language {
            "French" => Some(&self.french),
            "Chinese" => Some(&self.chinese),
            _ => None,
        }
    }
}

/// Local cache of reference corpora under a directory
#[derive(Debug, Clone)]
pub struct CorpusStore {
    /// Directory holding the cached XML files
    dir: PathBuf,
}

impl CorpusStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Download any corpus file that is not already cached.
    pub async fn ensure_all(&self) -> Result<()> {
        for (local, remote) in CORPUS_FILES {
            let path = self.dir.join(local);
            if path.exists() {
                continue;
            }
            let url = format!("{CORPUS_BASE_URL}{remote}");
            info!("Downloading reference translations: {}", url);
            download_file(&url, &path).await?;
        }
        Ok(())
    }

    /// Load all three corpora, recovering parse failures as empty lists.
    pub fn load_all(&self) -> Corpora {
        Corpora {
            english: load_corpus(&self.dir.join("english.xml")),
            french: load_corpus(&self.dir.join("french.xml")),
            chinese: load_corpus(&self.dir.join("chinese.xml")),
        }
    }
}

/// Download a file from a URL to a destination, streaming the body to disk.
/// Fails if the HTTP status is not 200.
pub async fn download_file(url: &str, destination: &Path) -> Result<()> {
    let mut response = reqwest::get(url).await?;
    if response.status() != reqwest::StatusCode::OK {
        return Err(TranslationError::DownloadError {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    if let Some(parent) = destination.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let mut file = tokio::fs::File::create(destination).await?;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;

    info!("Downloaded: {}", destination.display());
    Ok(())
}

/// Parse a corpus file, returning the trimmed text of every `<seg>` element
/// in document order. Empty segments are dropped.
pub fn parse_corpus(path: &Path) -> Result<Vec<String>> {
    let mut reader = Reader::from_file(path)?;
    let mut buf = Vec::new();
    let mut sentences = Vec::new();
    let mut in_seg = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) if e.name().as_ref() == b"seg" => in_seg = true,
            Event::End(e) if e.name().as_ref() == b"seg" => in_seg = false,
            Event::Text(t) if in_seg => {
                let text = t.unescape()?;
                let text = text.trim();
                if !text.is_empty() {
                    sentences.push(text.to_string());
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(sentences)
}

/// Load a corpus file, logging and recovering a parse failure as an empty
/// sentence list.
pub fn load_corpus(path: &Path) -> Vec<String> {
    match parse_corpus(path) {
        Ok(sentences) => {
            info!("Loaded {} sentences from {}", sentences.len(), path.display());
            sentences
        }
        Err(e) => {
            warn!("Error parsing {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_extracts_seg_text_in_order() {
        let file = write_temp(
            "<bible><book><seg>In the beginning</seg><seg> was the word </seg><seg></seg></book></bible>",
        );
        let sentences = parse_corpus(file.path()).unwrap();
        assert_eq!(sentences, vec!["In the beginning", "was the word"]);
    }

    #[test]
    fn test_parse_ignores_text_outside_seg() {
        let file = write_temp("<doc>preamble<seg>kept</seg>trailer</doc>");
        let sentences = parse_corpus(file.path()).unwrap();
        assert_eq!(sentences, vec!["kept"]);
    }

    #[test]
    fn test_parse_unescapes_entities() {
        let file = write_temp("<doc><seg>fish &amp; chips</seg></doc>");
        let sentences = parse_corpus(file.path()).unwrap();
        assert_eq!(sentences, vec!["fish & chips"]);
    }

    #[test]
    fn test_parse_error_on_malformed_xml() {
        let file = write_temp("<doc><seg>bad</sg></doc>");
        assert!(parse_corpus(file.path()).is_err());
    }

    #[test]
    fn test_load_recovers_malformed_xml_as_empty() {
        let file = write_temp("<doc><seg>bad</sg></doc>");
        assert!(load_corpus(file.path()).is_empty());
    }

    #[test]
    fn test_reference_for_known_languages() {
        let corpora = Corpora {
            english: vec!["a".to_string()],
            french: vec!["b".to_string()],
            chinese: vec!["c".to_string()],
        };
        assert_eq!(corpora.reference_for("French").unwrap(), &["b".to_string()]);
        assert_eq!(corpora.reference_for("Chinese").unwrap(), &["c".to_string()]);
        assert!(corpora.reference_for("German").is_none());
    }
}

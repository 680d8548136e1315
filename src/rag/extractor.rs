//! Document text extraction.
//!
//! Sources are either HTTP(S) URLs or local paths. The format is inferred
//! from the URL / `Content-Type` for downloads and from the file extension
//! for local files. Parsing is CPU-bound and runs on the blocking pool.

use crate::types::{AppError, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::header::CONTENT_TYPE;
use std::io::{Cursor, Read, Seek};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Msg,
}

impl DocumentFormat {
    /// Infer the format of a local file from its (case-insensitive) extension.
    pub fn from_extension(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
            .unwrap_or_default();

        match ext.as_str() {
            ".pdf" => Ok(DocumentFormat::Pdf),
            ".docx" => Ok(DocumentFormat::Docx),
            ".msg" => Ok(DocumentFormat::Msg),
            _ => Err(AppError::UnsupportedFormat(format!(
                "Unsupported file format: {}",
                ext
            ))),
        }
    }

    /// Infer the format of a download from its URL and `Content-Type`.
    ///
    /// PDF wins when both PDF and Word markers are present.
    pub fn from_url(url: &str, content_type: &str) -> Result<Self> {
        let url_lower = url.to_lowercase();
        let content_type = content_type.to_lowercase();

        if url_lower.contains("pdf") || content_type.contains("pdf") {
            Ok(DocumentFormat::Pdf)
        } else if url_lower.contains("docx") || content_type.contains("word") {
            Ok(DocumentFormat::Docx)
        } else {
            Err(AppError::UnsupportedFormat(format!(
                "Unsupported file format from URL: {}",
                url
            )))
        }
    }
}

/// Where a document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    Url(String),
    Path(PathBuf),
}

impl DocumentSource {
    /// Anything starting with `http` is fetched; everything else is a path.
    pub fn parse(source: &str) -> Self {
        if source.starts_with("http") {
            DocumentSource::Url(source.to_string())
        } else {
            DocumentSource::Path(PathBuf::from(source))
        }
    }
}

/// Extracts raw text from PDF, DOCX and MSG documents.
#[derive(Clone)]
pub struct Extractor {
    client: reqwest::Client,
}

impl Extractor {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Extract the full text of `source` (URL or local path).
    pub async fn extract(&self, source: &str) -> Result<String> {
        let source = source.trim();
        if source.is_empty() {
            return Err(AppError::InvalidInput("Document source is empty".into()));
        }

        let (format, bytes) = match DocumentSource::parse(source) {
            DocumentSource::Url(url) => self.fetch(&url).await?,
            DocumentSource::Path(path) => {
                let format = DocumentFormat::from_extension(&path)?;
                let bytes = tokio::fs::read(&path).await?;
                (format, bytes)
            }
        };

        let size = bytes.len();
        let text = tokio::task::spawn_blocking(move || extract_bytes(format, &bytes))
            .await
            .map_err(|e| AppError::Extraction(format!("{:?} parser failed: {}", format, e)))??;

        info!(?format, bytes = size, chars = text.chars().count(), "Extracted document text");
        Ok(text)
    }

    async fn fetch(&self, url: &str) -> Result<(DocumentFormat, Vec<u8>)> {
        debug!(url, "Downloading document");
        let response = self.client.get(url).send().await?.error_for_status()?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let format = DocumentFormat::from_url(url, &content_type)?;

        let bytes = response.bytes().await?;
        Ok((format, bytes.to_vec()))
    }
}

/// Extract text from an in-memory document of a known format.
pub fn extract_bytes(format: DocumentFormat, bytes: &[u8]) -> Result<String> {
    match format {
        DocumentFormat::Pdf => extract_pdf(bytes),
        DocumentFormat::Docx => extract_docx(bytes),
        DocumentFormat::Msg => extract_msg(bytes),
    }
}

// ============================================================================
// PDF
// ============================================================================

fn extract_pdf(bytes: &[u8]) -> Result<String> {
    // Pages are emitted in document order.
    pdf_extract::extract_text_from_mem(bytes)
        .map_err(|e| AppError::Extraction(format!("Failed to parse PDF: {}", e)))
}

// ============================================================================
// DOCX
// ============================================================================

fn extract_docx(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("Failed to open DOCX archive: {}", e)))?;

    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::Extraction(format!("DOCX has no main document part: {}", e)))?
        .read_to_string(&mut xml)?;

    Ok(docx_paragraphs(&xml)?.join("\n"))
}

/// Collect the text of top-level body paragraphs in document order.
///
/// Paragraphs nested in tables or text boxes are skipped. Inside runs,
/// `w:tab` becomes `\t` and `w:br` / `w:cr` become `\n`.
fn docx_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut nested = 0usize;
    let mut in_run = false;
    let mut in_text = false;

    let xml_err = |e: quick_xml::Error| AppError::Extraction(format!("Malformed DOCX XML: {}", e));

    loop {
        match reader.read_event().map_err(xml_err)? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" => nested += 1,
                b"w:p" if nested == 0 => current = Some(String::new()),
                b"w:r" => in_run = true,
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => {
                let para = current.as_mut().filter(|_| nested == 0 && in_run);
                match (e.name().as_ref(), para) {
                    (b"w:p", _) if nested == 0 => paragraphs.push(String::new()),
                    (b"w:tab", Some(p)) => p.push('\t'),
                    (b"w:br" | b"w:cr", Some(p)) => p.push('\n'),
                    _ => {}
                }
            }
            Event::Text(t) if in_text && nested == 0 => {
                if let Some(p) = current.as_mut() {
                    let text = t.unescape().map_err(xml_err)?;
                    p.push_str(&text);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:tbl" | b"w:txbxContent" => nested = nested.saturating_sub(1),
                b"w:p" if nested == 0 => {
                    if let Some(p) = current.take() {
                        paragraphs.push(p);
                    }
                }
                b"w:r" => in_run = false,
                b"w:t" => in_text = false,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

// ============================================================================
// MSG (Outlook compound file)
// ============================================================================

const PR_SUBJECT: &str = "0037";
const PR_BODY: &str = "1000";

fn extract_msg(bytes: &[u8]) -> Result<String> {
    let mut file = cfb::CompoundFile::open(Cursor::new(bytes))
        .map_err(|e| AppError::Extraction(format!("Failed to open MSG file: {}", e)))?;

    let subject = read_msg_property(&mut file, PR_SUBJECT)?.unwrap_or_default();
    let body = read_msg_property(&mut file, PR_BODY)?.unwrap_or_default();

    Ok(format!("Subject: {}\n\n{}", subject, body))
}

/// Read a string property stream, preferring the UTF-16 variant.
fn read_msg_property<F: Read + Seek>(
    file: &mut cfb::CompoundFile<F>,
    property: &str,
) -> Result<Option<String>> {
    let unicode = format!("/__substg1.0_{}001F", property);
    if file.is_stream(&unicode) {
        let raw = read_stream(file, &unicode)?;
        let units: Vec<u16> = raw
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();
        return Ok(Some(
            String::from_utf16_lossy(&units)
                .trim_end_matches('\0')
                .to_string(),
        ));
    }

    let ansi = format!("/__substg1.0_{}001E", property);
    if file.is_stream(&ansi) {
        let raw = read_stream(file, &ansi)?;
        return Ok(Some(
            String::from_utf8_lossy(&raw)
                .trim_end_matches('\0')
                .to_string(),
        ));
    }

    Ok(None)
}

fn read_stream<F: Read + Seek>(file: &mut cfb::CompoundFile<F>, path: &str) -> Result<Vec<u8>> {
    let mut stream = file.open_stream(path)?;
    let mut raw = Vec::new();
    stream.read_to_end(&mut raw)?;
    Ok(raw)
}

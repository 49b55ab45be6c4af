//! Raw text extraction from uploaded PDF and DOCX files.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::reader::Reader;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unsupported file format '{0}': must be a .pdf or .docx")]
    UnsupportedFormat(String),

    #[error("PDF text extraction failed: {0}")]
    Pdf(String),

    #[error("DOCX container error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("DOCX read error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DOCX XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("decoding task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileFormat {
    Pdf,
    Docx,
}

impl FileFormat {
    /// Accepts `pdf`, `.PDF`, `docx`, ... Anything else is unsupported.
    pub fn from_extension(extension: &str) -> Result<Self, DecodeError> {
        match extension.trim().trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Ok(FileFormat::Pdf),
            "docx" => Ok(FileFormat::Docx),
            other => Err(DecodeError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_file_name(file_name: &str) -> Result<Self, DecodeError> {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .ok_or_else(|| DecodeError::UnsupportedFormat(file_name.to_string()))?;
        Self::from_extension(extension)
    }
}

/// Extracts plain text from a document. CPU-bound; call from `spawn_blocking`.
pub fn decode_document(bytes: &[u8], format: FileFormat) -> Result<String, DecodeError> {
    match format {
        FileFormat::Pdf => decode_pdf(bytes),
        FileFormat::Docx => decode_docx(bytes),
    }
}

fn decode_pdf(bytes: &[u8]) -> Result<String, DecodeError> {
    let text =
        pdf_extract::extract_text_from_mem(bytes).map_err(|e| DecodeError::Pdf(format!("{e:?}")))?;
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        out.push_str(line);
        out.push('\n');
    }
    Ok(out)
}

fn decode_docx(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name("word/document.xml")?.read_to_string(&mut xml)?;
    document_xml_to_text(&xml)
}

/// One output line per `<w:p>` paragraph. Text comes only from `<w:t>` runs;
/// tab stops declared in paragraph properties are not tabs.
fn document_xml_to_text(xml: &str) -> Result<String, DecodeError> {
    let mut reader = Reader::from_str(xml);
    let mut out = String::new();
    let mut in_run_text = false;
    let mut in_properties = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = true,
                b"w:pPr" => in_properties = true,
                _ => {}
            },
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_run_text = false,
                b"w:pPr" => in_properties = false,
                b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:tab" if !in_properties => out.push('\t'),
                b"w:br" | b"w:cr" | b"w:p" => out.push('\n'),
                _ => {}
            },
            Event::Text(text) if in_run_text => out.push_str(&text.unescape()?),
            Event::CData(data) if in_run_text => out.push_str(&String::from_utf8_lossy(&data)),
            Event::Eof => break,
            _ => {}
        }
    }
    Ok(out)
}

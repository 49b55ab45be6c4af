//! Resume parsing: file decoding, text normalization, section splitting and
//! entity extraction. Data flows one way: bytes -> text -> `ParsedResume`.

pub mod decode;
pub mod extractor;
pub mod ner;
pub mod normalize;
pub mod sections;

use bytes::Bytes;

pub use decode::{decode_document, DecodeError, FileFormat};
pub use extractor::EntityExtractor;
pub use ner::{EntitySpan, HttpEntityRecognizer, NamedEntityRecognizer, NoopRecognizer};
pub use normalize::clean_text;

/// Resolves the format from the file name, decodes on the blocking pool and
/// normalizes the result.
pub async fn read_document(file_name: &str, bytes: Bytes) -> Result<(FileFormat, String), DecodeError> {
    let format = FileFormat::from_file_name(file_name)?;
    let raw = tokio::task::spawn_blocking(move || decode_document(&bytes, format))
        .await
        .map_err(|e| DecodeError::Task(e.to_string()))??;
    Ok((format, clean_text(&raw)))
}

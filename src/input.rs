use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;
use crate::geometry::{ImageSize, RecognizedWord};

/// One OCR call: the image it ran on and the words it recognized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub image: ImageSize,
    #[serde(default)]
    pub words: Vec<RecognizedWord>,
}

pub fn parse_ocr_document(json: &str) -> Result<OcrDocument, ConvertError> {
    let document: OcrDocument = serde_json::from_str(json)?;
    if !document.image.is_valid() {
        return Err(ConvertError::InvalidImageSize {
            width: document.image.width,
            height: document.image.height,
        });
    }
    Ok(document)
}

pub fn read_ocr_document(path: &Path) -> Result<OcrDocument, ConvertError> {
    let json = std::fs::read_to_string(path)?;
    parse_ocr_document(&json)
}

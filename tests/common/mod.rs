#![allow(dead_code)]

use std::path::Path;

use wordgrid::{ImageSize, NormalizedBox, OcrDocument, RecognizedWord};

pub const IMAGE: ImageSize = ImageSize {
    width: 1000.0,
    height: 1000.0,
};

pub const WORD_WIDTH: f64 = 30.0;
pub const WORD_HEIGHT: f64 = 14.0;

/// OCR word centered at a top-left pixel position on [`IMAGE`].
pub fn word(text: &str, mid_x: f64, mid_y: f64) -> RecognizedWord {
    sized_word(text, mid_x, mid_y, WORD_WIDTH, WORD_HEIGHT)
}

pub fn sized_word(text: &str, mid_x: f64, mid_y: f64, width: f64, height: f64) -> RecognizedWord {
    let top = mid_y - height / 2.0;
    RecognizedWord::new(
        text,
        NormalizedBox {
            min_x: (mid_x - width / 2.0) / IMAGE.width,
            min_y: (IMAGE.height - top - height) / IMAGE.height,
            width: width / IMAGE.width,
            height: height / IMAGE.height,
        },
    )
}

pub fn write_document(
    path: &Path,
    words: Vec<RecognizedWord>,
) -> Result<(), Box<dyn std::error::Error>> {
    let document = OcrDocument {
        source: Some("fixture.png".to_string()),
        image: IMAGE,
        words,
    };
    std::fs::write(path, serde_json::to_string_pretty(&document)?)?;
    Ok(())
}

pub fn to_rows(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| (*cell).to_string()).collect())
        .collect()
}

use serde::{Deserialize, Serialize};

/// Word box as reported by the OCR engine: unit-normalized, origin bottom-left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedBox {
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: f64,
    pub height: f64,
}

impl ImageSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Pixel-space rectangle, origin top-left.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.x
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[must_use]
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }
}

/// One recognized token as it leaves the OCR engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedWord {
    pub text: String,
    #[serde(rename = "box")]
    pub bbox: NormalizedBox,
}

impl RecognizedWord {
    #[must_use]
    pub fn new(text: impl Into<String>, bbox: NormalizedBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }
}

/// A word placed in image pixel space.
#[derive(Debug, Clone, PartialEq)]
pub struct WordObservation {
    pub text: String,
    pub rect: Rect,
}

impl WordObservation {
    #[must_use]
    pub fn new(text: impl Into<String>, rect: Rect) -> Self {
        Self {
            text: text.into(),
            rect,
        }
    }
}

/// Maps a normalized bottom-left box into a top-left pixel rectangle.
#[must_use]
pub fn to_image_space(bbox: &NormalizedBox, image: ImageSize) -> Rect {
    let x = bbox.min_x * image.width;
    let y = bbox.min_y * image.height;
    let width = bbox.width * image.width;
    let height = bbox.height * image.height;

    Rect {
        x,
        y: image.height - (y + height),
        width,
        height,
    }
}

#[must_use]
pub fn words_in_image_space(words: &[RecognizedWord], image: ImageSize) -> Vec<WordObservation> {
    words
        .iter()
        .map(|word| WordObservation {
            text: word.text.clone(),
            rect: to_image_space(&word.bbox, image),
        })
        .collect()
}

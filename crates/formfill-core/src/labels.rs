//! Visual text lines of a PDF, used as candidate labels for form fields
//!
//! Glyph positions come from `pdf-extract`'s layout pass; this module only
//! decides which glyphs belong to the same line.

use crate::error::FormError;
use pdf_extract::{MediaBox, OutputDev, OutputError, Transform};
use serde::{Deserialize, Serialize};

// Fractions of the font size
const BASELINE_TOLERANCE: f64 = 0.5;
const MAX_GAP: f64 = 2.0;
const SPACE_GAP: f64 = 0.1;
const DESCENT: f64 = 0.2;
const ASCENT: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelDescriptor {
    pub text: String,
    pub page: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Extract text lines from every page of a PDF held in memory.
pub fn extract_labels(bytes: &[u8]) -> Result<Vec<LabelDescriptor>, FormError> {
    let doc =
        pdf_extract::Document::load_mem(bytes).map_err(|e| FormError::Parse(e.to_string()))?;

    let mut collector = LineCollector::default();
    pdf_extract::output_doc(&doc, &mut collector)
        .map_err(|e| FormError::Layout(e.to_string()))?;
    collector.flush();

    tracing::debug!("Collected {} text lines", collector.labels.len());
    Ok(collector.labels)
}

#[derive(Debug, Clone, Copy)]
struct Glyph {
    x: f64,
    baseline: f64,
    advance: f64,
    size: f64,
}

impl Glyph {
    fn end(&self) -> f64 {
        self.x + self.advance
    }
}

#[derive(Debug)]
struct Line {
    text: String,
    last: Glyph,
    x0: f64,
    y0: f64,
    x1: f64,
    y1: f64,
}

impl Line {
    fn start(glyph: Glyph, ch: &str) -> Self {
        let mut line = Line {
            text: String::new(),
            last: glyph,
            x0: f64::INFINITY,
            y0: f64::INFINITY,
            x1: f64::NEG_INFINITY,
            y1: f64::NEG_INFINITY,
        };
        line.push(glyph, ch);
        line
    }

    fn accepts(&self, glyph: &Glyph) -> bool {
        let size = self.last.size.max(glyph.size);
        if (glyph.baseline - self.last.baseline).abs() > BASELINE_TOLERANCE * size {
            return false;
        }
        let gap = glyph.x - self.last.end();
        // A leftward jump past the previous glyph's origin means a new line.
        glyph.x >= self.last.x && gap <= MAX_GAP * size
    }

    fn push(&mut self, glyph: Glyph, ch: &str) {
        let gap = glyph.x - self.last.end();
        if !self.text.is_empty() && gap > SPACE_GAP * glyph.size && !self.text.ends_with(' ') {
            self.text.push(' ');
        }
        self.text.push_str(ch);

        self.x0 = self.x0.min(glyph.x).min(glyph.end());
        self.x1 = self.x1.max(glyph.x).max(glyph.end());
        self.y0 = self.y0.min(glyph.baseline - DESCENT * glyph.size);
        self.y1 = self.y1.max(glyph.baseline + ASCENT * glyph.size);
        self.last = glyph;
    }

    fn into_label(self, page: u32) -> Option<LabelDescriptor> {
        let text = self.text.trim();
        if text.is_empty() {
            return None;
        }
        Some(LabelDescriptor {
            text: text.to_string(),
            page,
            x: self.x0,
            y: self.y0,
            width: self.x1 - self.x0,
            height: self.y1 - self.y0,
        })
    }
}

/// `OutputDev` sink that groups glyphs into lines
#[derive(Debug, Default)]
struct LineCollector {
    page: u32,
    current: Option<Line>,
    labels: Vec<LabelDescriptor>,
}

impl LineCollector {
    fn glyph(&mut self, glyph: Glyph, ch: &str) {
        match self.current.as_mut() {
            Some(line) if line.accepts(&glyph) => line.push(glyph, ch),
            _ => {
                self.flush();
                self.current = Some(Line::start(glyph, ch));
            }
        }
    }

    fn flush(&mut self) {
        if let Some(line) = self.current.take() {
            if let Some(label) = line.into_label(self.page) {
                self.labels.push(label);
            }
        }
    }
}

impl OutputDev for LineCollector {
    fn begin_page(
        &mut self,
        page_num: u32,
        _media_box: &MediaBox,
        _art_box: Option<(f64, f64, f64, f64)>,
    ) -> Result<(), OutputError> {
        self.flush();
        self.page = page_num;
        Ok(())
    }

    fn end_page(&mut self) -> Result<(), OutputError> {
        self.flush();
        Ok(())
    }

    fn output_character(
        &mut self,
        trm: &Transform,
        width: f64,
        _spacing: f64,
        font_size: f64,
        ch: &str,
    ) -> Result<(), OutputError> {
        // Effective size after the text rendering matrix is applied
        let vx = font_size * trm.m11 + font_size * trm.m21;
        let vy = font_size * trm.m12 + font_size * trm.m22;
        let size = (vx * vy).abs().sqrt();

        let glyph = Glyph {
            x: trm.m31,
            baseline: trm.m32,
            advance: width * size,
            size,
        };
        self.glyph(glyph, ch);
        Ok(())
    }

    fn begin_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_word(&mut self) -> Result<(), OutputError> {
        Ok(())
    }

    fn end_line(&mut self) -> Result<(), OutputError> {
        Ok(())
    }
}

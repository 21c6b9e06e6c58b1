//! Widget rectangle parsing and normalization

use crate::error::RectError;
use crate::pdf::resolve;
use lopdf::{Document, Object};
use serde::{Deserialize, Serialize};

/// Box used for appearances when a widget's rectangle is unusable
pub const DEFAULT_WIDTH: f64 = 100.0;
pub const DEFAULT_HEIGHT: f64 = 20.0;

/// A `/Rect` as stored in the annotation: two opposite corners in page units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// Rectangle normalized to its lower-left corner and positive extents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PdfRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Parse a `/Rect` entry, following indirect references for the array
    /// and for each of its elements.
    pub fn from_object(doc: &Document, rect: Option<&Object>) -> Result<Self, RectError> {
        let rect = rect.and_then(|obj| resolve(doc, obj)).ok_or(RectError::Missing)?;
        let items = match rect {
            Object::Array(items) => items,
            _ => return Err(RectError::WrongLength(0)),
        };
        if items.len() != 4 {
            return Err(RectError::WrongLength(items.len()));
        }

        let mut coords = [0.0f64; 4];
        for (i, item) in items.iter().enumerate() {
            coords[i] = match resolve(doc, item) {
                Some(Object::Integer(v)) => *v as f64,
                Some(Object::Real(v)) => *v as f64,
                _ => return Err(RectError::NotNumeric(i)),
            };
        }

        Ok(Self::new(coords[0], coords[1], coords[2], coords[3]))
    }

    pub fn width(&self) -> f64 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> f64 {
        (self.y1 - self.y0).abs()
    }

    pub fn normalized(&self) -> PdfRect {
        PdfRect {
            x: self.x0.min(self.x1),
            y: self.y0.min(self.y1),
            width: self.width(),
            height: self.height(),
        }
    }
}

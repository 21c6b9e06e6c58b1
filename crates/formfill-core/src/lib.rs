//! PDF AcroForm filling and field extraction
//!
//! This crate fills interactive form fields from a flat JSON value map using
//! lopdf, synthesizing a fresh appearance stream for every filled widget so
//! the values render without viewer support. Filled documents can optionally
//! be flattened (fields locked read-only, `/AcroForm` removed).
//!
//! The extraction side lists every named widget with its geometry, collects
//! nearby text lines through pdf-extract, and derives an example value map
//! that can be edited and fed back to the filler.

pub mod appearance;
pub mod error;
pub mod extract;
pub mod fill;
pub mod flags;
pub mod geometry;
pub mod labels;
pub mod output;
mod pdf;
pub mod reconcile;
pub mod text;
pub mod value_map;
pub mod widget;

pub use appearance::{synthesize, Appearance, ButtonState, StoredValue, CHECKED};
pub use error::{FormError, RectError};
pub use extract::{extract_bytes, extract_file, Extraction, FieldDescriptor, FieldsAndLabels};
pub use fill::{fill_document, fill_file, FillOptions, FillReport};
pub use labels::{extract_labels, LabelDescriptor};
pub use reconcile::{log_path_for, ReconciliationLog};
pub use text::TextPolicy;
pub use value_map::ValueMap;
pub use widget::{collect_widgets, FieldKind, Widget};


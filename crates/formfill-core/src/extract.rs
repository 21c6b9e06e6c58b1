//! Field metadata extraction and the example value template

use crate::appearance::CHECKED;
use crate::error::FormError;
use crate::labels::{extract_labels, LabelDescriptor};
use crate::output::write_json;
use crate::pdf::load_document;
use crate::widget::{collect_widgets, Widget};
use indexmap::IndexMap;
use lopdf::Document;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One widget's name, page and geometry. Geometry is `null` when the
/// widget's rectangle is missing or malformed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub field: String,
    pub page: u32,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// PDF field type name with its slash, e.g. `/Btn`
    #[serde(rename = "type")]
    pub field_type: Option<String>,
}

impl FieldDescriptor {
    fn from_widget(widget: &Widget, name: &str) -> Self {
        let geometry = widget.rect.as_ref().ok().map(|rect| rect.normalized());
        Self {
            field: name.to_string(),
            page: widget.page,
            x: geometry.map(|g| g.x),
            y: geometry.map(|g| g.y),
            width: geometry.map(|g| g.width),
            height: geometry.map(|g| g.height),
            field_type: widget.field_kind().map(|kind| kind.pdf_name()),
        }
    }

    pub fn is_button(&self) -> bool {
        self.field_type.as_deref() == Some("/Btn")
    }
}

/// Fields and labels as written to the combined JSON file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldsAndLabels {
    pub fields: Vec<FieldDescriptor>,
    pub labels: Vec<LabelDescriptor>,
}

/// Everything the extractor produces for one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Extraction {
    pub combined: FieldsAndLabels,
    /// Example value per field name, ready to be edited and fed to the filler
    pub example: IndexMap<String, String>,
}

impl Extraction {
    pub fn write(&self, combined_path: &Path, example_path: &Path) -> Result<(), FormError> {
        write_json(combined_path, &self.combined)?;
        tracing::info!(
            "Combined JSON written to {} (fields: {}, labels: {})",
            combined_path.display(),
            self.combined.fields.len(),
            self.combined.labels.len()
        );

        write_json(example_path, &self.example)?;
        tracing::info!(
            "Example JSON written to {} (fields: {})",
            example_path.display(),
            self.example.len()
        );
        Ok(())
    }
}

/// Run both passes over a PDF file.
pub fn extract_file(input: &Path) -> Result<Extraction, FormError> {
    let bytes = std::fs::read(input).map_err(|e| FormError::io(input, e))?;
    extract_bytes(&bytes)
}

pub fn extract_bytes(bytes: &[u8]) -> Result<Extraction, FormError> {
    let doc = load_document(bytes)?;
    let fields = extract_fields(&doc);
    let example = example_values(&fields);
    let labels = extract_labels(bytes)?;

    Ok(Extraction {
        combined: FieldsAndLabels { fields, labels },
        example,
    })
}

/// Named widgets in page order, one descriptor per widget.
pub fn extract_fields(doc: &Document) -> Vec<FieldDescriptor> {
    collect_widgets(doc)
        .iter()
        .filter_map(|widget| {
            widget
                .field_name()
                .map(|name| FieldDescriptor::from_widget(widget, name))
        })
        .collect()
}

/// Buttons get the checked sentinel, every other field a placeholder text.
pub fn example_values(fields: &[FieldDescriptor]) -> IndexMap<String, String> {
    let mut example = IndexMap::new();
    for field in fields {
        let value = if field.is_button() {
            CHECKED.to_string()
        } else {
            format!("Example of {}", field.field)
        };
        example.insert(field.field.clone(), value);
    }
    example
}

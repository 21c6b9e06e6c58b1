//! Fill AcroForm fields from a value map, optionally flattening them

use crate::appearance::synthesize;
use crate::error::FormError;
use crate::flags::FieldFlags;
use crate::pdf::{catalog_id, load_document, save_document};
use crate::reconcile::{log_path_for, ReconciliationLog};
use crate::text::TextPolicy;
use crate::value_map::ValueMap;
use crate::widget::{collect_widgets, KindSource, Widget};
use lopdf::{Document, Object, ObjectId};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub struct FillOptions {
    /// Make every filled field read-only and drop the document's `/AcroForm`
    pub flatten: bool,
    pub text_policy: TextPolicy,
    /// Write `<output>_log.json` next to the output PDF
    pub write_log: bool,
    /// Base for relative input and output paths
    pub working_dir: PathBuf,
}

impl Default for FillOptions {
    fn default() -> Self {
        Self {
            flatten: false,
            text_policy: TextPolicy::default(),
            write_log: true,
            working_dir: PathBuf::from("."),
        }
    }
}

impl FillOptions {
    pub fn new(working_dir: impl Into<PathBuf>) -> Self {
        Self {
            working_dir: working_dir.into(),
            ..Self::default()
        }
    }

    pub fn flatten(mut self, flatten: bool) -> Self {
        self.flatten = flatten;
        self
    }

    pub fn text_policy(mut self, policy: TextPolicy) -> Self {
        self.text_policy = policy;
        self
    }

    pub fn write_log(mut self, write_log: bool) -> Self {
        self.write_log = write_log;
        self
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.working_dir.join(path)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FillReport {
    /// Widget annotations that received a value (several per shared name)
    pub widgets_filled: usize,
    pub flattened: bool,
    /// Whether a `/AcroForm` entry was found and removed
    pub acroform_removed: bool,
    pub log: ReconciliationLog,
    pub log_path: Option<PathBuf>,
}

/// Fill `input` with the values in `values` and write the result to `output`.
///
/// The output is serialized in memory first, so a failure never leaves a
/// partially written PDF behind.
pub fn fill_file(
    input: &Path,
    values: &Path,
    output: &Path,
    options: &FillOptions,
) -> Result<FillReport, FormError> {
    let input = options.resolve(input);
    let values_path = options.resolve(values);
    let output = options.resolve(output);

    tracing::debug!("Working directory: {}", options.working_dir.display());
    tracing::debug!("Input PDF: {}", input.display());
    tracing::debug!("Input JSON: {}", values_path.display());
    tracing::debug!("Output PDF: {}", output.display());

    let values = ValueMap::load(&values_path)?;
    tracing::info!("Loaded {} values to fill", values.len());

    let bytes = std::fs::read(&input).map_err(|e| FormError::io(&input, e))?;
    let mut doc = load_document(&bytes)?;

    let mut report = fill_document(&mut doc, &values, options)?;

    // Replaced appearance streams and the detached form tree are unreachable now.
    let pruned = doc.prune_objects();
    tracing::debug!("Pruned {} unreachable objects", pruned.len());

    let pdf = save_document(&mut doc)?;
    std::fs::write(&output, pdf).map_err(|e| FormError::io(&output, e))?;

    if options.write_log {
        let log_path = log_path_for(&output);
        report.log.write(&log_path)?;
        tracing::info!("Field log written to {}", log_path.display());
        report.log_path = Some(log_path);
    }

    if report.flattened {
        tracing::info!("Flattened PDF written to {}", output.display());
    } else {
        tracing::info!("Editable PDF written to {}", output.display());
    }

    Ok(report)
}

/// Fill an already parsed document in place.
pub fn fill_document(
    doc: &mut Document,
    values: &ValueMap,
    options: &FillOptions,
) -> Result<FillReport, FormError> {
    let widgets = collect_widgets(doc);
    let mut pdf_names = Vec::new();
    let mut widgets_filled = 0;

    for widget in &widgets {
        let name = match widget.field_name() {
            Some(name) => name,
            None => continue,
        };
        pdf_names.push(name);

        let value = match values.get(name) {
            Some(value) => value,
            None => {
                tracing::debug!("No value for field '{}'", name);
                continue;
            }
        };
        let widget_id = match widget.id {
            Some(id) => id,
            None => {
                tracing::warn!("Field '{}' is an inline annotation and cannot be filled", name);
                continue;
            }
        };

        let appearance = synthesize(
            name,
            &widget.rect,
            value,
            widget.field_kind(),
            options.text_policy,
        );
        appearance.apply(doc, widget_id)?;

        if options.flatten {
            lock_widget(doc, widget_id, widget)?;
        } else {
            unlock_widget(doc, widget_id, widget)?;
        }
        widgets_filled += 1;
    }

    let acroform_removed = if options.flatten {
        remove_acroform(doc)?
    } else {
        false
    };

    let log = ReconciliationLog::new(values.names(), pdf_names);
    tracing::info!(
        "Filled {} widgets: {} matched, {} only in JSON, {} only in PDF",
        widgets_filled,
        log.fields_in_json_and_pdf.len(),
        log.fields_in_json_not_in_pdf.len(),
        log.fields_in_pdf_not_in_json.len()
    );

    Ok(FillReport {
        widgets_filled,
        flattened: options.flatten,
        acroform_removed,
        log,
        log_path: None,
    })
}

/// Set the read-only flag and detach the widget from its field group.
fn lock_widget(
    doc: &mut Document,
    widget_id: ObjectId,
    widget: &Widget,
) -> Result<(), FormError> {
    let flags = widget.field_flags.unwrap_or(FieldFlags::empty()) | FieldFlags::READ_ONLY;
    let dict = widget_dict_mut(doc, widget_id)?;
    dict.set("Ff", Object::Integer(flags.to_pdf()));

    if let Some(parent_id) = widget.parent {
        detach_from_parent(doc, widget_id, parent_id, widget)?;
    }
    Ok(())
}

/// Clear the read-only flag so the field stays editable.
fn unlock_widget(
    doc: &mut Document,
    widget_id: ObjectId,
    widget: &Widget,
) -> Result<(), FormError> {
    let flags = match widget.field_flags {
        Some(flags) => flags - FieldFlags::READ_ONLY,
        None => return Ok(()),
    };
    let dict = widget_dict_mut(doc, widget_id)?;
    if flags.is_empty() {
        dict.remove(b"Ff");
    } else {
        dict.set("Ff", Object::Integer(flags.to_pdf()));
    }
    Ok(())
}

fn detach_from_parent(
    doc: &mut Document,
    widget_id: ObjectId,
    parent_id: ObjectId,
    widget: &Widget,
) -> Result<(), FormError> {
    let dict = widget_dict_mut(doc, widget_id)?;
    dict.remove(b"Parent");
    // Keep the type the widget used to inherit from the group.
    if let Some((kind, KindSource::Inherited)) = &widget.kind {
        dict.set("FT", Object::Name(kind.name().as_bytes().to_vec()));
    }

    if let Ok(Object::Dictionary(parent)) = doc.get_object_mut(parent_id) {
        if let Ok(Object::Array(kids)) = parent.get_mut(b"Kids") {
            kids.retain(|kid| !matches!(kid, Object::Reference(id) if *id == widget_id));
        }
    }
    tracing::debug!("Detached widget {:?} from parent {:?}", widget_id, parent_id);
    Ok(())
}

/// Drop `/AcroForm` from the catalog. Returns whether it was present.
fn remove_acroform(doc: &mut Document) -> Result<bool, FormError> {
    let root_id = catalog_id(doc)?;
    let catalog = doc
        .get_object_mut(root_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| FormError::Operation(format!("Catalog: {}", e)))?;
    Ok(catalog.remove(b"AcroForm").is_some())
}

fn widget_dict_mut(
    doc: &mut Document,
    widget_id: ObjectId,
) -> Result<&mut lopdf::Dictionary, FormError> {
    doc.get_object_mut(widget_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| FormError::Operation(format!("Widget {:?}: {}", widget_id, e)))
}

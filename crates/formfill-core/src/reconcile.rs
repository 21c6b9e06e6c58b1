//! Matched / unmatched field name report written next to a filled PDF

use crate::error::FormError;
use crate::output::write_json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Three disjoint, sorted name sets comparing the value map with the PDF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationLog {
    pub fields_in_json_and_pdf: BTreeSet<String>,
    pub fields_in_json_not_in_pdf: BTreeSet<String>,
    pub fields_in_pdf_not_in_json: BTreeSet<String>,
}

impl ReconciliationLog {
    pub fn new<'a>(
        json_names: impl IntoIterator<Item = &'a str>,
        pdf_names: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let json: BTreeSet<String> = json_names.into_iter().map(str::to_string).collect();
        let pdf: BTreeSet<String> = pdf_names.into_iter().map(str::to_string).collect();

        Self {
            fields_in_json_and_pdf: json.intersection(&pdf).cloned().collect(),
            fields_in_json_not_in_pdf: json.difference(&pdf).cloned().collect(),
            fields_in_pdf_not_in_json: pdf.difference(&json).cloned().collect(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<(), FormError> {
        write_json(path, self)
    }
}

/// `out/form.pdf` → `out/form_log.json`
pub fn log_path_for(output_pdf: &Path) -> PathBuf {
    let stem = output_pdf
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    output_pdf.with_file_name(format!("{}_log.json", stem))
}

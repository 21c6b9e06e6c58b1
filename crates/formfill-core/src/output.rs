//! JSON writers shared by the fill log and the extractor outputs

use crate::error::FormError;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::path::Path;

/// Pretty-print with four-space indentation; non-ASCII text is kept verbatim.
pub fn to_json_pretty<T: Serialize>(value: &T) -> Result<String, FormError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| FormError::Serialization(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| FormError::Serialization(e.to_string()))
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), FormError> {
    let json = to_json_pretty(value)?;
    std::fs::write(path, json).map_err(|e| FormError::io(path, e))
}

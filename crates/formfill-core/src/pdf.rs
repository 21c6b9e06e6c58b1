//! Small helpers over the lopdf object graph

use crate::error::FormError;
use lopdf::{Dictionary, Document, Object, ObjectId};

// Guards against reference cycles in broken files.
const MAX_REFERENCE_DEPTH: usize = 32;

/// Follow indirect references until a direct object is reached.
pub(crate) fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    let mut current = obj;
    for _ in 0..MAX_REFERENCE_DEPTH {
        match current {
            Object::Reference(id) => current = doc.get_object(*id).ok()?,
            other => return Some(other),
        }
    }
    None
}

/// Name value of an entry, resolved through references
pub(crate) fn name_of<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a [u8]> {
    match resolve(doc, obj)? {
        Object::Name(name) => Some(name.as_slice()),
        _ => None,
    }
}

pub(crate) fn integer_of(doc: &Document, obj: &Object) -> Option<i64> {
    match resolve(doc, obj)? {
        Object::Integer(v) => Some(*v),
        Object::Real(v) => Some(*v as i64),
        _ => None,
    }
}

/// Direct name entry of a dictionary
#[cfg(test)]
pub(crate) fn dict_name<'a>(dict: &'a Dictionary, key: &[u8]) -> Option<&'a [u8]> {
    match dict.get(key) {
        Ok(Object::Name(name)) => Some(name.as_slice()),
        _ => None,
    }
}

#[cfg(test)]
pub(crate) fn dict_int(dict: &Dictionary, key: &[u8]) -> Option<i64> {
    match dict.get(key) {
        Ok(Object::Integer(v)) => Some(*v),
        _ => None,
    }
}

/// Indirect reference entry of a dictionary
pub(crate) fn dict_ref(dict: &Dictionary, key: &[u8]) -> Option<ObjectId> {
    match dict.get(key) {
        Ok(Object::Reference(id)) => Some(*id),
        _ => None,
    }
}

/// Object id of the document catalog
pub(crate) fn catalog_id(doc: &Document) -> Result<ObjectId, FormError> {
    dict_ref(&doc.trailer, b"Root")
        .ok_or_else(|| FormError::Operation("Trailer has no indirect /Root catalog".into()))
}

/// Load a document from memory, mapping the parser error.
pub(crate) fn load_document(bytes: &[u8]) -> Result<Document, FormError> {
    Document::load_mem(bytes).map_err(|e| FormError::Parse(e.to_string()))
}

/// Serialize a document fully into memory.
pub(crate) fn save_document(doc: &mut Document) -> Result<Vec<u8>, FormError> {
    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| FormError::Serialization(e.to_string()))?;
    Ok(output)
}

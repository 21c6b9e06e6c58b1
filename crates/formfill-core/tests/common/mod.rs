//! Fixture documents shared by the integration tests

#![allow(dead_code)]

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

/// A label drawn in Helvetica 12 at the given position
pub struct Label {
    pub text: &'static str,
    pub x: i64,
    pub y: i64,
}

/// A terminal widget placed directly in the page's `/Annots`
pub struct Field {
    pub name: &'static str,
    pub field_type: &'static str,
    pub rect: Object,
}

impl Field {
    pub fn new(name: &'static str, field_type: &'static str, rect: [i64; 4]) -> Self {
        Self {
            name,
            field_type,
            rect: Object::Array(rect.iter().map(|v| Object::Integer(*v)).collect()),
        }
    }

    pub fn with_rect(name: &'static str, field_type: &'static str, rect: Object) -> Self {
        Self { name, field_type, rect }
    }
}

fn label_content(labels: &[Label]) -> Vec<u8> {
    let mut operations = Vec::new();
    for label in labels {
        operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![Object::Name(b"F1".to_vec()), Object::Integer(12)]),
            Operation::new("Td", vec![Object::Integer(label.x), Object::Integer(label.y)]),
            Operation::new(
                "Tj",
                vec![Object::String(label.text.as_bytes().to_vec(), StringFormat::Literal)],
            ),
            Operation::new("ET", vec![]),
        ]);
    }
    Content { operations }.encode().unwrap()
}

/// Build a single-page form with the given labels and fields.
pub fn form_pdf(labels: &[Label], fields: Vec<Field>) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let content_id = doc.add_object(Stream::new(Dictionary::new(), label_content(labels)));

    let field_ids: Vec<ObjectId> = fields
        .into_iter()
        .map(|field| {
            doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => Object::Name(field.field_type.as_bytes().to_vec()),
                "T" => Object::string_literal(field.name),
                "Rect" => field.rect,
            })
        })
        .collect();
    let refs: Vec<Object> = field_ids.iter().map(|id| Object::Reference(*id)).collect();

    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => Object::Reference(pages_id),
        "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        "Resources" => dictionary! {
            "Font" => dictionary! { "F1" => Object::Reference(font_id) },
        },
        "Contents" => Object::Reference(content_id),
        "Annots" => refs.clone(),
    });
    for id in &field_ids {
        if let Ok(Object::Dictionary(dict)) = doc.get_object_mut(*id) {
            dict.set("P", Object::Reference(page_id));
        }
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => 1,
        }),
    );
    let acroform_id = doc.add_object(dictionary! { "Fields" => refs });
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
        "AcroForm" => Object::Reference(acroform_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// "Name:" text field and "I agree" checkbox
pub fn sample_form() -> Vec<u8> {
    form_pdf(
        &[
            Label { text: "Name:", x: 72, y: 700 },
            Label { text: "I agree", x: 72, y: 650 },
        ],
        vec![
            Field::new("Name", "Tx", [150, 695, 350, 715]),
            Field::new("Agree", "Btn", [150, 645, 164, 659]),
        ],
    )
}

/// Find a widget dictionary by its `/T`.
pub fn widget<'a>(doc: &'a Document, name: &str) -> &'a Dictionary {
    doc.objects
        .values()
        .filter_map(|obj| obj.as_dict().ok())
        .find(|dict| match dict.get(b"T") {
            Ok(Object::String(bytes, _)) => bytes == name.as_bytes(),
            _ => false,
        })
        .unwrap_or_else(|| panic!("no widget named {}", name))
}

/// Decoded `/AP /N` stream content of a widget
pub fn appearance_content(doc: &Document, widget: &Dictionary) -> Vec<u8> {
    let ap = widget.get(b"AP").unwrap().as_dict().unwrap();
    let id = ap.get(b"N").unwrap().as_reference().unwrap();
    doc.get_object(id).unwrap().as_stream().unwrap().content.clone()
}

pub fn has_acroform(doc: &Document) -> bool {
    let root = doc.trailer.get(b"Root").unwrap().as_reference().unwrap();
    doc.get_object(root).unwrap().as_dict().unwrap().has(b"AcroForm")
}

pub fn int_entry(dict: &Dictionary, key: &[u8]) -> Option<i64> {
    match dict.get(key) {
        Ok(Object::Integer(v)) => Some(*v),
        _ => None,
    }
}

pub fn name_entry<'a>(dict: &'a Dictionary, key: &[u8]) -> Option<&'a [u8]> {
    match dict.get(key) {
        Ok(Object::Name(v)) => Some(v.as_slice()),
        _ => None,
    }
}

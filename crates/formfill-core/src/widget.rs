//! Snapshot of the widget annotations in a document
//!
//! Walking the page tree and mutating annotations at the same time fights the
//! borrow checker, so filling and extraction both start from a read-only table
//! of [`Widget`] records and go back to the document by object id.

use crate::error::RectError;
use crate::flags::FieldFlags;
use crate::geometry::Rect;
use crate::pdf::{dict_ref, integer_of, name_of, resolve};
use crate::text::decode_text_string;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// Form field type, from the `/FT` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// `/Btn`: checkboxes, radio buttons and push buttons
    Button,
    /// `/Tx`
    Text,
    /// `/Ch`: list and combo boxes
    Choice,
    /// `/Sig`
    Signature,
    Other(String),
}

impl FieldKind {
    pub fn from_name(name: &[u8]) -> Self {
        match name {
            b"Btn" => FieldKind::Button,
            b"Tx" => FieldKind::Text,
            b"Ch" => FieldKind::Choice,
            b"Sig" => FieldKind::Signature,
            other => FieldKind::Other(String::from_utf8_lossy(other).into_owned()),
        }
    }

    /// Name without the leading slash, as stored in the dictionary
    pub fn name(&self) -> &str {
        match self {
            FieldKind::Button => "Btn",
            FieldKind::Text => "Tx",
            FieldKind::Choice => "Ch",
            FieldKind::Signature => "Sig",
            FieldKind::Other(name) => name,
        }
    }

    /// Name as written in PDF syntax, e.g. `/Btn`
    pub fn pdf_name(&self) -> String {
        format!("/{}", self.name())
    }

    pub fn is_button(&self) -> bool {
        matches!(self, FieldKind::Button)
    }
}

/// Where a widget's `/FT` came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindSource {
    Own,
    Inherited,
}

/// One widget annotation, in page order.
#[derive(Debug, Clone)]
pub struct Widget {
    /// `None` for annotations written inline in `/Annots`
    pub id: Option<ObjectId>,
    /// 1-based page number
    pub page: u32,
    /// Partial field name from the widget's own `/T`
    pub name: Option<String>,
    pub kind: Option<(FieldKind, KindSource)>,
    pub rect: Result<Rect, RectError>,
    /// Parent field, looked up through the document's object table
    pub parent: Option<ObjectId>,
    pub field_flags: Option<FieldFlags>,
}

impl Widget {
    pub fn field_kind(&self) -> Option<&FieldKind> {
        self.kind.as_ref().map(|(kind, _)| kind)
    }

    pub fn is_button(&self) -> bool {
        self.field_kind().is_some_and(FieldKind::is_button)
    }

    /// Name if present and non-empty
    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }
}

/// Collect every widget annotation, page by page, in `/Annots` order.
pub fn collect_widgets(doc: &Document) -> Vec<Widget> {
    let mut widgets = Vec::new();

    for (page_num, page_id) in doc.get_pages() {
        let page = match doc.get_object(page_id).and_then(Object::as_dict) {
            Ok(page) => page,
            Err(_) => continue,
        };
        let annots = match page.get(b"Annots").ok().and_then(|a| resolve(doc, a)) {
            Some(Object::Array(annots)) => annots,
            _ => continue,
        };

        for entry in annots {
            let (id, dict) = match entry {
                Object::Reference(id) => match doc.get_object(*id).and_then(Object::as_dict) {
                    Ok(dict) => (Some(*id), dict),
                    Err(_) => continue,
                },
                Object::Dictionary(dict) => (None, dict),
                _ => continue,
            };

            if !is_widget(doc, dict) {
                continue;
            }

            widgets.push(read_widget(doc, id, page_num, dict));
        }
    }

    widgets
}

fn is_widget(doc: &Document, dict: &Dictionary) -> bool {
    dict.get(b"Subtype")
        .ok()
        .and_then(|subtype| name_of(doc, subtype))
        .is_some_and(|subtype| subtype == b"Widget")
}

fn read_widget(
    doc: &Document,
    id: Option<ObjectId>,
    page: u32,
    dict: &Dictionary,
) -> Widget {
    let name = match dict.get(b"T").ok().and_then(|t| resolve(doc, t)) {
        Some(Object::String(bytes, _)) => Some(decode_text_string(bytes)),
        _ => None,
    };

    let parent = dict_ref(dict, b"Parent");

    let kind = own_kind(doc, dict)
        .map(|kind| (kind, KindSource::Own))
        .or_else(|| inherited_kind(doc, parent).map(|kind| (kind, KindSource::Inherited)));

    let field_flags = dict
        .get(b"Ff")
        .ok()
        .and_then(|ff| integer_of(doc, ff))
        .map(FieldFlags::from_pdf);

    Widget {
        id,
        page,
        name,
        kind,
        rect: Rect::from_object(doc, dict.get(b"Rect").ok()),
        parent,
        field_flags,
    }
}

fn own_kind(doc: &Document, dict: &Dictionary) -> Option<FieldKind> {
    dict.get(b"FT")
        .ok()
        .and_then(|ft| name_of(doc, ft))
        .map(FieldKind::from_name)
}

// Field types are inheritable; walk up the parent chain.
fn inherited_kind(doc: &Document, mut parent: Option<ObjectId>) -> Option<FieldKind> {
    for _ in 0..16 {
        let dict = doc.get_object(parent?).and_then(Object::as_dict).ok()?;
        if let Some(kind) = own_kind(doc, dict) {
            return Some(kind);
        }
        parent = dict_ref(dict, b"Parent");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::dictionary;
    use pretty_assertions::assert_eq;

    fn single_page_doc(build: impl FnOnce(&mut Document) -> Vec<Object>) -> Document {
        let mut doc = Document::with_version("1.7");
        let annots = build(&mut doc);
        let pages_id = doc.new_object_id();
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            "Annots" => annots,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![Object::Reference(page_id)],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        doc.trailer.set("Root", Object::Reference(catalog_id));
        doc
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(FieldKind::from_name(b"Btn"), FieldKind::Button);
        assert_eq!(FieldKind::from_name(b"Tx").pdf_name(), "/Tx");
        assert_eq!(
            FieldKind::from_name(b"Custom"),
            FieldKind::Other("Custom".to_string())
        );
    }

    #[test]
    fn test_collects_only_widgets() {
        let mut widget_id = None;
        let doc = single_page_doc(|doc| {
            let widget = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Widget",
                "FT" => "Tx",
                "T" => Object::string_literal("Name"),
                "Rect" => vec![10.into(), 10.into(), 110.into(), 30.into()],
            });
            let link = doc.add_object(dictionary! {
                "Type" => "Annot",
                "Subtype" => "Link",
                "Rect" => vec![0.into(), 0.into(), 1.into(), 1.into()],
            });
            widget_id = Some(widget);
            vec![Object::Reference(widget), Object::Reference(link)]
        });

        let widgets = collect_widgets(&doc);
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].field_name(), Some("Name"));
        assert_eq!(widgets[0].page, 1);
        assert_eq!(widgets[0].id, widget_id);
        assert_eq!(widgets[0].kind, Some((FieldKind::Text, KindSource::Own)));
        assert!(widgets[0].field_flags.is_none());
    }

    #[test]
    fn test_kind_inherited_from_parent() {
        let doc = single_page_doc(|doc| {
            let parent = doc.new_object_id();
            let kid = doc.add_object(dictionary! {
                "Subtype" => "Widget",
                "T" => Object::string_literal("Color"),
                "Parent" => Object::Reference(parent),
                "Ff" => 1 << 15,
            });
            doc.objects.insert(
                parent,
                Object::Dictionary(dictionary! {
                    "FT" => "Btn",
                    "Kids" => vec![Object::Reference(kid)],
                }),
            );
            vec![Object::Reference(kid)]
        });

        let widget = &collect_widgets(&doc)[0];
        assert_eq!(widget.kind, Some((FieldKind::Button, KindSource::Inherited)));
        assert!(widget.parent.is_some());
        assert_eq!(widget.field_flags, Some(FieldFlags::from_pdf(1 << 15)));
    }

    #[test]
    fn test_inline_widget_has_no_id() {
        let inline = Object::Dictionary(dictionary! {
            "Subtype" => "Widget",
            "T" => Object::string_literal("Inline"),
        });
        let doc = single_page_doc(|_| vec![inline]);
        let widgets = collect_widgets(&doc);
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].id, None);
        assert_eq!(widgets[0].rect, Err(RectError::Missing));
        assert!(widgets[0].kind.is_none());
    }

    #[test]
    fn test_empty_name_is_not_a_field_name() {
        let inline = Object::Dictionary(dictionary! {
            "Subtype" => "Widget",
            "T" => Object::string_literal(""),
        });
        let doc = single_page_doc(|_| vec![inline]);
        assert_eq!(collect_widgets(&doc)[0].field_name(), None);
    }
}

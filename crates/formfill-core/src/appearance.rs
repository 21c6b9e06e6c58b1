//! Appearance stream synthesis for filled fields
//!
//! Every filled widget gets a fresh `/AP /N` form XObject; whatever appearance
//! the field carried before is replaced, not merged.

use crate::error::{FormError, RectError};
use crate::flags::AnnotFlags;
use crate::geometry::{Rect, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::pdf::integer_of;
use crate::text::{encode_text_string, encode_win_ansi, escape_literal_bytes, TextPolicy};
use crate::widget::FieldKind;
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

/// Input value that turns a button on
pub const CHECKED: &str = "/";

/// Resource name of the single font used by text appearances
pub const FONT_RESOURCE: &str = "F1";

const FONT_SCALE: f64 = 0.6;
const MIN_FONT_SIZE: f64 = 8.0;
const MAX_FONT_SIZE: f64 = 12.0;
const TEXT_INSET: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    On,
    Off,
}

impl ButtonState {
    pub fn from_value(value: &str) -> Self {
        if value == CHECKED {
            ButtonState::On
        } else {
            ButtonState::Off
        }
    }

    /// Appearance state name written to `/V` and `/AS`
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ButtonState::On => "Yes",
            ButtonState::Off => "Off",
        }
    }
}

/// Value stored back into the field alongside the appearance
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Button(ButtonState),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub content: Vec<u8>,
    pub width: f64,
    pub height: f64,
    /// Set for text appearances only
    pub font_size: Option<f64>,
    pub value: StoredValue,
}

/// Build the appearance for one field.
///
/// A rectangle that cannot be parsed falls back to a 100×20 box with a
/// warning; synthesis itself never fails. Every field type other than
/// `/Btn` is drawn as a single line of text.
pub fn synthesize(
    field_name: &str,
    rect: &Result<Rect, RectError>,
    value: &str,
    kind: Option<&FieldKind>,
    policy: TextPolicy,
) -> Appearance {
    let (width, height) = match rect {
        Ok(rect) => (rect.width(), rect.height()),
        Err(e) => {
            tracing::warn!(
                "Could not use rectangle of field '{}' ({}); using {}x{}",
                field_name,
                e,
                DEFAULT_WIDTH,
                DEFAULT_HEIGHT
            );
            (DEFAULT_WIDTH, DEFAULT_HEIGHT)
        }
    };

    if kind.is_some_and(FieldKind::is_button) {
        let state = ButtonState::from_value(value);
        let content = match state {
            ButtonState::On => checkmark(width, height).into_bytes(),
            ButtonState::Off => b"q Q".to_vec(),
        };
        return Appearance {
            content,
            width,
            height,
            font_size: None,
            value: StoredValue::Button(state),
        };
    }

    let text = policy.apply(value);
    let font_size = font_size_for(height);
    let y_offset = (height - font_size) / 2.0;

    let mut content = format!(
        "q 0 0 0 rg BT /{} {} Tf {} {} Td (",
        FONT_RESOURCE,
        fmt_num(font_size),
        fmt_num(TEXT_INSET),
        fmt_num(y_offset)
    )
    .into_bytes();
    content.extend(escape_literal_bytes(&encode_win_ansi(&text)));
    content.extend_from_slice(b") Tj ET Q");

    Appearance {
        content,
        width,
        height,
        font_size: Some(font_size),
        value: StoredValue::Text(text),
    }
}

/// Font size for a single text line: 60% of the box height, kept within 8..=12.
pub fn font_size_for(height: f64) -> f64 {
    (height * FONT_SCALE).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE)
}

fn checkmark(width: f64, height: f64) -> String {
    format!(
        "q 0 0 0 RG 0 0 0 rg 2 w {} {} m {} {} l {} {} l S Q",
        fmt_num(width / 4.0),
        fmt_num(height / 4.0),
        fmt_num(width / 2.0),
        fmt_num(height / 8.0),
        fmt_num(3.0 * width / 4.0),
        fmt_num(3.0 * height / 4.0)
    )
}

/// Shortest decimal form with at most four fractional digits
pub(crate) fn fmt_num(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

impl Appearance {
    pub fn bbox(&self) -> [f64; 4] {
        [0.0, 0.0, self.width, self.height]
    }

    /// Font resources: a single standard Helvetica under [`FONT_RESOURCE`]
    pub fn resources() -> Dictionary {
        dictionary! {
            "Font" => dictionary! {
                FONT_RESOURCE => dictionary! {
                    "Type" => "Font",
                    "Subtype" => "Type1",
                    "BaseFont" => "Helvetica",
                    "Encoding" => "WinAnsiEncoding",
                },
            },
        }
    }

    pub fn to_stream(&self) -> Stream {
        let dict = dictionary! {
            "Type" => "XObject",
            "Subtype" => "Form",
            "FormType" => 1,
            "BBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(self.width as f32),
                Object::Real(self.height as f32),
            ],
            "Resources" => Self::resources(),
        };
        Stream::new(dict, self.content.clone())
    }

    /// Attach the appearance to a widget: `/AP`, the stored value, and the
    /// print flag. Returns the id of the new appearance stream.
    pub fn apply(&self, doc: &mut Document, widget_id: ObjectId) -> Result<ObjectId, FormError> {
        let stream_id = doc.add_object(self.to_stream());

        let current_flags = doc
            .get_object(widget_id)
            .and_then(Object::as_dict)
            .ok()
            .and_then(|dict| dict.get(b"F").ok())
            .and_then(|f| integer_of(doc, f));
        let flags = AnnotFlags::from_pdf(current_flags) | AnnotFlags::PRINT;

        let widget = doc
            .get_object_mut(widget_id)
            .and_then(Object::as_dict_mut)
            .map_err(|e| FormError::Operation(format!("Widget {:?}: {}", widget_id, e)))?;

        widget.set("AP", dictionary! { "N" => Object::Reference(stream_id) });
        match &self.value {
            StoredValue::Button(state) => {
                widget.set("V", Object::Name(state.pdf_name().as_bytes().to_vec()));
                widget.set("AS", Object::Name(state.pdf_name().as_bytes().to_vec()));
            }
            StoredValue::Text(text) => {
                widget.set("V", encode_text_string(text));
            }
        }
        widget.set("F", Object::Integer(flags.to_pdf()));

        Ok(stream_id)
    }
}

//! Text handling for field values
//!
//! Covers the three encodings a field value passes through:
//! - PDF text strings (`/T`, `/V`): UTF-16BE with BOM, or a single-byte encoding
//! - WinAnsi bytes shown by the appearance stream's Helvetica font
//! - Literal-string escaping inside the content stream

use lopdf::{Object, StringFormat};
use serde::{Deserialize, Serialize};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// How text values are normalized before they are stored and drawn
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextPolicy {
    /// Keep the value exactly as supplied
    #[default]
    Preserve,
    /// Fold to plain ASCII, stripping diacritics (including ñ/Ñ)
    Ascii,
}

impl TextPolicy {
    /// Parse a policy name as used in configuration (`preserve` or `ascii`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "preserve" | "none" => Some(TextPolicy::Preserve),
            "ascii" | "fold" => Some(TextPolicy::Ascii),
            _ => None,
        }
    }

    pub fn apply(&self, value: &str) -> String {
        match self {
            TextPolicy::Preserve => value.to_string(),
            TextPolicy::Ascii => fold_to_ascii(value),
        }
    }
}

/// Reduce text to plain ASCII: "Peña Straße" becomes "Pena Strasse".
///
/// Compatibility decomposition strips accents, a few letters without a
/// decomposition are spelled out, and whatever is left outside ASCII is
/// dropped.
pub fn fold_to_ascii(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.nfkd().filter(|c| !is_combining_mark(*c)) {
        if c.is_ascii() {
            out.push(c);
        } else if let Some(spelled) = ascii_spelling(c) {
            out.push_str(spelled);
        }
    }
    out
}

fn ascii_spelling(c: char) -> Option<&'static str> {
    let spelled = match c {
        'ß' => "ss",
        'ẞ' => "SS",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' | 'ð' => "d",
        'Đ' | 'Ð' => "D",
        'þ' => "th",
        'Þ' => "Th",
        'ı' => "i",
        '‘' | '’' | '‚' => "'",
        '“' | '”' | '„' => "\"",
        '–' | '—' => "-",
        _ => return None,
    };
    Some(spelled)
}

/// Escape `\`, `(` and `)` in encoded bytes for use inside a PDF literal string.
pub fn escape_literal_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    for &b in bytes {
        if matches!(b, b'\\' | b'(' | b')') {
            out.push(b'\\');
        }
        out.push(b);
    }
    out
}

/// Convert text to Windows-1252 (WinAnsiEncoding); unmapped characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let mut result = Vec::with_capacity(text.len());
    for ch in text.chars() {
        let byte = match ch as u32 {
            0x00..=0x7F => ch as u8,
            0xA0..=0xFF => ch as u8,
            0x20AC => 0x80, // Euro sign
            0x201A => 0x82, // Single low quotation mark
            0x0192 => 0x83, // Latin small letter f with hook
            0x201E => 0x84, // Double low quotation mark
            0x2026 => 0x85, // Horizontal ellipsis
            0x2020 => 0x86, // Dagger
            0x2021 => 0x87, // Double dagger
            0x02C6 => 0x88, // Circumflex accent
            0x2030 => 0x89, // Per mille sign
            0x0160 => 0x8A, // Latin capital letter S with caron
            0x2039 => 0x8B, // Single left angle quotation mark
            0x0152 => 0x8C, // Latin capital ligature OE
            0x017D => 0x8E, // Latin capital letter Z with caron
            0x2018 => 0x91, // Left single quotation mark
            0x2019 => 0x92, // Right single quotation mark
            0x201C => 0x93, // Left double quotation mark
            0x201D => 0x94, // Right double quotation mark
            0x2022 => 0x95, // Bullet
            0x2013 => 0x96, // En dash
            0x2014 => 0x97, // Em dash
            0x02DC => 0x98, // Small tilde
            0x2122 => 0x99, // Trade mark sign
            0x0161 => 0x9A, // Latin small letter s with caron
            0x203A => 0x9B, // Single right angle quotation mark
            0x0153 => 0x9C, // Latin small ligature oe
            0x017E => 0x9E, // Latin small letter z with caron
            0x0178 => 0x9F, // Latin capital letter Y with diaeresis
            _ => b'?',
        };
        result.push(byte);
    }
    result
}

/// Decode a PDF text string (UTF-16BE with BOM, UTF-8, Latin-1 fallback).
pub fn decode_text_string(bytes: &[u8]) -> String {
    if bytes.len() >= 2 && bytes[0] == 0xFE && bytes[1] == 0xFF {
        let units: Vec<u16> = bytes[2..]
            .chunks(2)
            .filter_map(|chunk| {
                if chunk.len() == 2 {
                    Some(u16::from_be_bytes([chunk[0], chunk[1]]))
                } else {
                    None
                }
            })
            .collect();
        return String::from_utf16_lossy(&units);
    }
    if let Ok(s) = std::str::from_utf8(bytes) {
        return s.to_string();
    }
    bytes.iter().map(|&b| b as char).collect()
}

/// Encode text as a PDF text string object.
///
/// Single-byte text is stored as-is; anything wider is written as UTF-16BE
/// with a byte order mark.
pub fn encode_text_string(text: &str) -> Object {
    if text.chars().all(|c| (c as u32) <= 0xFF) {
        let bytes = text.chars().map(|c| c as u8).collect();
        return Object::String(bytes, StringFormat::Literal);
    }

    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_parentheses() {
        assert_eq!(escape_literal_bytes(b"O'Brien (Jr.)"), br"O'Brien \(Jr.\)".to_vec());
    }

    #[test]
    fn test_escape_backslash_once() {
        assert_eq!(escape_literal_bytes(br"C:\tmp (x)"), br"C:\\tmp \(x\)".to_vec());
    }

    #[test]
    fn test_fold_diacritics_and_enye() {
        assert_eq!(fold_to_ascii("Peña Núñez"), "Pena Nunez");
        assert_eq!(fold_to_ascii("ÑANDÚ"), "NANDU");
        assert_eq!(fold_to_ascii("plain"), "plain");
    }

    #[test]
    fn test_fold_leaves_only_ascii() {
        let folded = fold_to_ascii("Straße Øster Æon €5 Ñandú");
        assert_eq!(folded, "Strasse Oster AEon 5 Nandu");
        assert!(folded.is_ascii());

        assert_eq!(fold_to_ascii("“Łódź” – ﬁne"), "\"Lodz\" - fine");
        assert_eq!(fold_to_ascii("日本"), "");
    }

    #[test]
    fn test_policy_names() {
        assert_eq!(TextPolicy::from_name("ASCII"), Some(TextPolicy::Ascii));
        assert_eq!(TextPolicy::from_name(" preserve "), Some(TextPolicy::Preserve));
        assert_eq!(TextPolicy::from_name("latin"), None);
        assert_eq!(TextPolicy::Preserve.apply("José"), "José");
        assert_eq!(TextPolicy::Ascii.apply("José"), "Jose");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Añ€"), vec![b'A', 0xF1, 0x80]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }

    #[test]
    fn test_text_string_round_trip_utf16() {
        let obj = encode_text_string("Ünïcödé ✓");
        match obj {
            Object::String(bytes, _) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(decode_text_string(&bytes), "Ünïcödé ✓");
            }
            other => panic!("unexpected object {:?}", other),
        }
    }

    #[test]
    fn test_text_string_latin1() {
        match encode_text_string("Peña") {
            Object::String(bytes, StringFormat::Literal) => {
                assert_eq!(bytes, vec![b'P', b'e', 0xF1, b'a']);
                assert_eq!(decode_text_string(&bytes), "Peña");
            }
            other => panic!("unexpected object {:?}", other),
        }
    }
}

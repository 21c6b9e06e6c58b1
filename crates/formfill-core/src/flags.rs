//! Annotation (`/F`) and field (`/Ff`) flag words

use bitflags::bitflags;

bitflags! {
    /// Annotation flags, ISO 32000-1 Table 165.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AnnotFlags: u32 {
        const INVISIBLE = 1 << 0;
        const HIDDEN = 1 << 1;
        /// Bit 3: print the annotation when the page is printed
        const PRINT = 1 << 2;
        const NO_ZOOM = 1 << 3;
        const NO_ROTATE = 1 << 4;
        const NO_VIEW = 1 << 5;
        const READ_ONLY = 1 << 6;
        const LOCKED = 1 << 7;
        const TOGGLE_NO_VIEW = 1 << 8;
        const LOCKED_CONTENTS = 1 << 9;
    }
}

bitflags! {
    /// Field flags common to all field types, ISO 32000-1 Table 221.
    ///
    /// Type-specific bits (multiline, radio, combo, ...) are carried through
    /// untouched as unknown bits.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldFlags: u32 {
        /// Bit 1: the user may not change the value
        const READ_ONLY = 1 << 0;
        const REQUIRED = 1 << 1;
        const NO_EXPORT = 1 << 2;
    }
}

impl AnnotFlags {
    pub fn from_pdf(value: Option<i64>) -> Self {
        Self::from_bits_retain(value.unwrap_or(0) as u32)
    }

    pub fn to_pdf(self) -> i64 {
        self.bits() as i64
    }
}

impl FieldFlags {
    pub fn from_pdf(value: i64) -> Self {
        Self::from_bits_retain(value as u32)
    }

    pub fn to_pdf(self) -> i64 {
        self.bits() as i64
    }
}

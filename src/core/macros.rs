//! Core Macros
//!
//! This module defines utility macros used by the characteristic decoders.

/// `bit_field` macro.
///
/// Extracts the field of `width` bits starting at bit `pos` of a byte.
#[macro_export]
macro_rules! bit_field {
    ($byte:expr, $pos:expr, $width:expr) => {
        ($byte >> $pos) & ((1u8 << $width) - 1)
    };
}

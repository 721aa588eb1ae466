//! Hexadecimal message arguments.
//!
//! Any [`Display`](std::fmt::Display) type can be a message argument; these
//! wrappers cover the common register and buffer dumps.
//!
//! ```rust
//! use enxlog::{Hex, HexBytes};
//!
//! assert_eq!(format!("{}", Hex(0xA5u8)), "A5");
//! assert_eq!(format!("{}", Hex(0x1u16)), "0001");
//! assert_eq!(format!("{}", HexBytes(&[0xA5, 0x01, 0xFF])), "A5 01 FF");
//! ```

use std::fmt;

/// Fixed-width upper-case hexadecimal: two digits per byte of `T`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hex<T>(pub T);

macro_rules! hex_display {
    ($($ty:ty),+) => {$(
        impl fmt::Display for Hex<$ty> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{:0width$X}", self.0, width = ::std::mem::size_of::<$ty>() * 2)
            }
        }
    )+};
}

hex_display!(u8, u16, u32, u64);

/// Space-separated upper-case byte dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexBytes<'a>(pub &'a [u8]);

impl fmt::Display for HexBytes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

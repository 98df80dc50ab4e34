//! Binary Netpbm header synthesis and header/data boundary detection.
//!
//! A binary Netpbm file is the ASCII header
//! `"<magic>\n<width> <height>\n<max_value>\n"` followed immediately by raw
//! pixel bytes. The header carries the only copy of the image dimensions;
//! the raw pixel formats have none.

#[cfg(feature = "alloc")]
use crate::Dimensions;
#[cfg(feature = "alloc")]
use alloc::{format, vec::Vec};
use core::fmt;
#[cfg(feature = "alloc")]
use snafu::OptionExt;
use snafu::Snafu;

/// Largest value a single 8-bit channel can hold, as declared in headers
/// written by this crate.
pub const MAX_PIXEL_VALUE: u8 = 255;

/// Netpbm magic numbers for the binary sub-formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Magic {
    /// `P4`: binary bitmap (PBM).
    Pbm,
    /// `P5`: binary grayscale (PGM).
    Pgm,
    /// `P6`: binary RGB (PPM).
    Ppm,
}

impl Magic {
    /// The two-byte ASCII tag opening the header.
    pub const fn tag(self) -> &'static str {
        match self {
            Magic::Pbm => "P4",
            Magic::Pgm => "P5",
            Magic::Ppm => "P6",
        }
    }
}

impl fmt::Display for Magic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum HeaderError {
    /// The `"<max_value>\n"` terminator was not found anywhere in the buffer.
    #[snafu(display("no netpbm header terminator `{max_value}\\n` found in the input"))]
    HeaderNotFound { max_value: u8 },
}

/// Formats a binary Netpbm header.
///
/// Produces the exact byte sequence
/// `"<magic>\n<width> <height>\n<max_value>\n"`: ASCII decimal fields,
/// single LF separators, trailing LF terminator, no padding.
///
/// Dimensions are plain parameters here; asking a user for them is the
/// caller's concern (see [`crate::pipeline::DimensionsSource`]).
#[cfg(feature = "alloc")]
pub fn build_header(magic: Magic, max_value: u8, dimensions: Dimensions) -> Vec<u8> {
    let Dimensions { width, height } = dimensions;
    format!("{magic}\n{width} {height}\n{max_value}\n").into_bytes()
}

/// Locates the first byte of pixel data in a buffer that starts with a binary
/// Netpbm header.
///
/// The end of the header is found textually: the literal ASCII bytes of
/// `max_value` followed by LF are searched for, and the offset just past the
/// first occurrence is returned. This matches how these headers are commonly
/// terminated, but it is a substring search over the whole buffer: pixel data
/// that happens to reproduce the same byte sequence *before* the real
/// terminator will be misdetected as the boundary. Callers needing an
/// unambiguous boundary should use a length-prefixed container instead; this
/// function deliberately preserves the textual-search behavior.
#[cfg(feature = "alloc")]
pub fn locate_data_start(buffer: &[u8], max_value: u8) -> Result<usize, HeaderError> {
    let token = format!("{max_value}\n");
    let token = token.as_bytes();

    buffer
        .windows(token.len())
        .position(|window| window == token)
        .map(|start| start + token.len())
        .context(header_error::HeaderNotFoundSnafu { max_value })
}

//! Transcoding between fixed-bit-depth raw pixel buffers and a minimal subset
//! of the binary Netpbm container formats.
//!
//! Three raw pixel layouts are supported:
//!
//! - RGB888: 24-bit color, three packed bytes per pixel (`R G B`)
//! - RGB565: 16-bit packed color, one `u16` word per pixel
//! - Grayscale: one byte per pixel, luminosity-weighted
//!
//! # RGB565 word layout
//!
//! ```plain
//! .- RGB565 --------------------------------------------.
//! | 15 14 13 12 11 | 10  9  8  7  6  5 |  4  3  2  1  0 |
//! |----------------+-------------------+----------------|
//! |      red       |       green       |      blue      |
//! `-----------------------------------------------------`
//! ```
//!
//! The byte order of RGB565 words in a buffer is chosen by the caller through
//! a [`byteorder::ByteOrder`] type parameter on the buffer-level entry points;
//! the conversion math itself is endian-free.
//!
//! # Netpbm containers
//!
//! The supported container flavor is the binary Netpbm family (PBM `P4`,
//! PGM `P5`, PPM `P6`) with the short ASCII header
//! `"<magic>\n<width> <height>\n<max_value>\n"` followed by raw pixel bytes.
//! The ASCII variants (`P1`/`P2`/`P3`) are not supported.
//!
//! # Modules
//!
//! - [`color`]: pure per-pixel transforms (RGB888↔RGB565, RGB888→grayscale)
//! - [`netpbm`]: header synthesis and header/data boundary detection
//! - [`plan`]: resolves an (input, output) format pair to a conversion plan
//! - [`pipeline`]: runs a plan over a whole in-memory buffer
//! - [`hex`]: legacy tolerant hex-digit parsing for textual pixel dumps
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod color;
pub mod hex;
pub mod netpbm;
#[cfg(feature = "alloc")]
pub mod pipeline;
pub mod plan;

pub use byteorder;
pub use plan::FormatKind;

/// Image dimensions in pixels, as carried by a Netpbm header.
///
/// The raw pixel formats do not record dimensions, so these must be supplied
/// externally whenever a container header has to be synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

//! Resolves an (input, output) format pair into a conversion plan.
//!
//! A plan is the static shape of one conversion: whether a container header
//! must be stripped from the input, which per-pixel transform runs over the
//! pixel bytes, and whether a synthesized header is prepended to the output.
//! The buffer arithmetic lives here too: every transform maps a fixed-size
//! input group to a fixed-size output group, so output sizes are exact
//! integer ratios of input sizes.

use crate::netpbm::Magic;
use core::fmt;
use snafu::Snafu;

/// The pixel formats and containers this crate can name.
///
/// Resolved once from CLI input at process start, immutable thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatKind {
    /// Raw packed 16-bit RGB565 words.
    Rgb565,
    /// Raw packed 24-bit RGB888 triples.
    Rgb888,
    /// Raw 8-bit grayscale bytes.
    Grayscale,
    /// Netpbm binary bitmap container (`P4`).
    Pbm,
    /// Netpbm binary grayscale container (`P5`).
    Pgm,
    /// Netpbm binary RGB container (`P6`).
    Ppm,
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormatKind::Rgb565 => "rgb565",
            FormatKind::Rgb888 => "rgb888",
            FormatKind::Grayscale => "grayscale",
            FormatKind::Pbm => "pbm",
            FormatKind::Pgm => "pgm",
            FormatKind::Ppm => "ppm",
        };
        f.write_str(name)
    }
}

/// The per-pixel transform a plan applies over the pixel bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transform {
    /// Bytes pass through unchanged (1:1).
    Copy,
    /// 3-byte RGB888 triple to one RGB565 word (3:2).
    Rgb888ToRgb565,
    /// 3-byte RGB888 triple to one grayscale byte (3:1).
    Rgb888ToGrayscale,
    /// One RGB565 word to a 3-byte RGB888 triple (2:3).
    Rgb565ToRgb888,
    /// One RGB565 word to one grayscale byte (2:1).
    Rgb565ToGrayscale,
}

impl Transform {
    /// Input bytes consumed per transform step.
    pub const fn input_group(self) -> usize {
        match self {
            Transform::Copy => 1,
            Transform::Rgb888ToRgb565 | Transform::Rgb888ToGrayscale => 3,
            Transform::Rgb565ToRgb888 | Transform::Rgb565ToGrayscale => 2,
        }
    }

    /// Output bytes produced per transform step.
    pub const fn output_group(self) -> usize {
        match self {
            Transform::Copy => 1,
            Transform::Rgb888ToRgb565 => 2,
            Transform::Rgb888ToGrayscale | Transform::Rgb565ToGrayscale => 1,
            Transform::Rgb565ToRgb888 => 3,
        }
    }

    /// Output size for `input_len` pixel bytes.
    ///
    /// Exact only when `input_len` is a whole number of input groups; the
    /// pipeline rejects buffers where it is not.
    pub const fn output_len(self, input_len: usize) -> usize {
        input_len / self.input_group() * self.output_group()
    }
}

/// The resolved shape of one conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plan {
    /// Input and output kinds coincide; there is nothing to do and no output
    /// is produced.
    Identity,
    Convert {
        /// Input is a Netpbm container; locate and drop its header first.
        strip_container: bool,
        /// Per-pixel transform over the (effective) pixel bytes.
        transform: Transform,
        /// Synthesize and prepend a header with this magic.
        wrap: Option<Magic>,
    },
}

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum PlanError {
    /// No conversion rule exists for this pair of kinds.
    #[snafu(display("unsupported conversion from '{input}' to '{output}'"))]
    UnsupportedConversion {
        input: FormatKind,
        output: FormatKind,
    },
}

/// Resolves the (input, output) kind pair to a [`Plan`].
///
/// PPM input is handled by stripping the header and then treating the rest as
/// RGB888, so every RGB888 target is reachable from PPM as well. PBM and PGM
/// inputs have no rule (their pixel layouts are never parsed), and no rule
/// targets PBM: there is no defined transform to 1-bit pixels.
pub fn resolve(input: FormatKind, output: FormatKind) -> Result<Plan, PlanError> {
    use FormatKind::*;

    if input == output {
        return Ok(Plan::Identity);
    }

    let from_ppm = input == Ppm;
    let plan = match (input, output) {
        (Rgb888 | Ppm, Rgb565) => Plan::Convert {
            strip_container: from_ppm,
            transform: Transform::Rgb888ToRgb565,
            wrap: None,
        },
        (Rgb888 | Ppm, Grayscale) => Plan::Convert {
            strip_container: from_ppm,
            transform: Transform::Rgb888ToGrayscale,
            wrap: None,
        },
        (Rgb888 | Ppm, Pgm) => Plan::Convert {
            strip_container: from_ppm,
            transform: Transform::Rgb888ToGrayscale,
            wrap: Some(Magic::Pgm),
        },
        (Ppm, Rgb888) => Plan::Convert {
            strip_container: true,
            transform: Transform::Copy,
            wrap: None,
        },
        (Rgb888, Ppm) => Plan::Convert {
            strip_container: false,
            transform: Transform::Copy,
            wrap: Some(Magic::Ppm),
        },
        (Rgb565, Rgb888) => Plan::Convert {
            strip_container: false,
            transform: Transform::Rgb565ToRgb888,
            wrap: None,
        },
        (Rgb565, Grayscale) => Plan::Convert {
            strip_container: false,
            transform: Transform::Rgb565ToGrayscale,
            wrap: None,
        },
        (Rgb565, Pgm) => Plan::Convert {
            strip_container: false,
            transform: Transform::Rgb565ToGrayscale,
            wrap: Some(Magic::Pgm),
        },
        (Rgb565, Ppm) => Plan::Convert {
            strip_container: false,
            transform: Transform::Rgb565ToRgb888,
            wrap: Some(Magic::Ppm),
        },
        _ => return plan_error::UnsupportedConversionSnafu { input, output }.fail(),
    };

    Ok(plan)
}

//! Runs a resolved conversion plan over a whole in-memory buffer.
//!
//! One conversion is strictly sequential: strip the container header if the
//! input has one, run the per-pixel transform across the remaining bytes,
//! prepend a synthesized header if the output is a container. The pipeline
//! owns its output buffer exclusively and sizes it from the actual input
//! length; there is no fixed capacity ceiling.

use crate::{
    color::{rgb565_to_rgb888, rgb888_to_grayscale, rgb888_to_rgb565, Rgb888},
    netpbm::{self, HeaderError, MAX_PIXEL_VALUE},
    plan::{self, FormatKind, Plan, PlanError, Transform},
    Dimensions,
};
use alloc::vec::Vec;
use byteorder::ByteOrder;
use itertools::Itertools;
use snafu::{ensure, OptionExt, Snafu};

/// Supplies image dimensions when a Netpbm header must be synthesized.
///
/// The raw formats carry no dimensions, so they must come from outside the
/// conversion: an interactive prompt, a config value, a test fixture. The
/// pipeline calls this at most once per conversion, and only for plans that
/// wrap the output in a container.
pub trait DimensionsSource {
    /// Returns the dimensions of the image being wrapped, or `None` if they
    /// could not be obtained.
    fn dimensions(&mut self) -> Option<Dimensions>;
}

/// Fixed, known-up-front dimensions.
impl DimensionsSource for Dimensions {
    fn dimensions(&mut self) -> Option<Dimensions> {
        Some(*self)
    }
}

/// Result of one conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The finished output buffer, ready to be written.
    Converted(Vec<u8>),
    /// Input and output kinds coincide; nothing was done and nothing should
    /// be written.
    Identity,
}

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum ConvertError {
    #[snafu(display("{source}"), context(false))]
    Plan { source: PlanError },

    #[snafu(display("{source}"), context(false))]
    Header { source: HeaderError },

    /// The pixel data is not a whole number of input groups.
    #[snafu(display(
        "input of {len} pixel bytes is not a whole number of {group}-byte groups"
    ))]
    TruncatedInput { len: usize, group: usize },

    /// A header had to be synthesized but no dimensions were provided.
    #[snafu(display("image dimensions are required to write a netpbm header"))]
    MissingDimensions,
}

/// Converts one whole in-memory buffer from `input_kind` to `output_kind`.
///
/// `B` selects the byte order of RGB565 words on both the input and output
/// side. `dims` is consulted only when the plan wraps the output in a Netpbm
/// container.
///
/// Identity conversions short-circuit to [`Outcome::Identity`] without
/// touching the buffer.
pub fn convert<B: ByteOrder>(
    input: &[u8],
    input_kind: FormatKind,
    output_kind: FormatKind,
    dims: &mut dyn DimensionsSource,
) -> Result<Outcome, ConvertError> {
    let Plan::Convert {
        strip_container,
        transform,
        wrap,
    } = plan::resolve(input_kind, output_kind)?
    else {
        return Ok(Outcome::Identity);
    };

    let pixels = if strip_container {
        let start = netpbm::locate_data_start(input, MAX_PIXEL_VALUE)?;
        &input[start..]
    } else {
        input
    };

    let group = transform.input_group();
    ensure!(
        pixels.len() % group == 0,
        convert_error::TruncatedInputSnafu {
            len: pixels.len(),
            group,
        }
    );

    let header = match wrap {
        Some(magic) => {
            let dims = dims
                .dimensions()
                .context(convert_error::MissingDimensionsSnafu)?;
            Some(netpbm::build_header(magic, MAX_PIXEL_VALUE, dims))
        }
        None => None,
    };

    let header_len = header.as_ref().map_or(0, Vec::len);
    let mut output = Vec::with_capacity(header_len + transform.output_len(pixels.len()));
    if let Some(header) = header {
        output.extend_from_slice(&header);
    }
    run_transform::<B>(transform, pixels, &mut output);

    Ok(Outcome::Converted(output))
}

fn run_transform<B: ByteOrder>(transform: Transform, pixels: &[u8], output: &mut Vec<u8>) {
    match transform {
        Transform::Copy => output.extend_from_slice(pixels),
        Transform::Rgb888ToRgb565 => {
            for (r, g, b) in pixels.iter().copied().tuples() {
                let word = rgb888_to_rgb565(Rgb888::new(r, g, b));
                let mut bytes = [0; 2];
                B::write_u16(&mut bytes, word);
                output.extend_from_slice(&bytes);
            }
        }
        Transform::Rgb888ToGrayscale => {
            for (r, g, b) in pixels.iter().copied().tuples() {
                output.push(rgb888_to_grayscale(Rgb888::new(r, g, b)));
            }
        }
        Transform::Rgb565ToRgb888 => {
            for word in pixels.chunks_exact(2) {
                let pixel = rgb565_to_rgb888(B::read_u16(word));
                output.extend_from_slice(&[pixel.r, pixel.g, pixel.b]);
            }
        }
        Transform::Rgb565ToGrayscale => {
            for word in pixels.chunks_exact(2) {
                let pixel = rgb565_to_rgb888(B::read_u16(word));
                output.push(rgb888_to_grayscale(pixel));
            }
        }
    }
}

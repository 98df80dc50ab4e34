//! Tolerant parsing of ASCII hex digit groups into pixel words.
//!
//! Legacy input path for textual pixel dumps (four hex digits per RGB565
//! word). Invalid digits do not abort a parse: [`concat_digits`] substitutes
//! zero for them, so a damaged dump still yields a buffer of the right size.

use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(module)]
pub enum HexError {
    #[snafu(display("invalid hexadecimal digit: '{}'", *digit as char))]
    InvalidHexDigit { digit: u8 },
}

/// Parses one ASCII hex digit (`0-9`, `a-f`, `A-F`) to its value.
pub const fn hex_digit(digit: u8) -> Result<u8, HexError> {
    match digit {
        b'0'..=b'9' => Ok(digit - b'0'),
        b'a'..=b'f' => Ok(digit - b'a' + 10),
        b'A'..=b'F' => Ok(digit - b'A' + 10),
        _ => Err(HexError::InvalidHexDigit { digit }),
    }
}

/// Folds up to four ASCII hex digits, most significant first, into a 16-bit
/// word. Invalid digits contribute zero instead of failing the whole group.
pub fn concat_digits(digits: &[u8]) -> u16 {
    digits
        .iter()
        .take(4)
        .enumerate()
        .fold(0, |word, (i, &digit)| {
            let nibble = hex_digit(digit).unwrap_or(0);
            word | u16::from(nibble) << (12 - i * 4)
        })
}

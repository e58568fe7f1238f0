// Rust Segwit Address Library
// Written by
//   The segwit-addr developers
//
// To the extent possible under law, the author(s) have dedicated all
// copyright and related and neighboring rights to this software to
// the public domain worldwide. This software is distributed without
// any warranty.
//
// You should have received a copy of the CC0 Public Domain Dedication
// along with this software.
// If not, see <http://creativecommons.org/publicdomain/zero/1.0/>.
//

//! # Segwit addresses
//!
//! Encoding and decoding of the `(hrp, witness version, witness program)`
//! triple carried by a bech32 address.
//!
//! A segwit address is at most 90 characters long and consists of:
//!
//! - The human-readable part (HRP), which names the network. It is made of
//!   printable US-ASCII characters and may itself contain "1".
//! - The separator, which is the last "1" of the string.
//! - The data part: one character for the witness version, the witness program
//!   regrouped into 5-bit values, and six checksum characters.
//!
//! [`encode`] and [`decode`] checksum every witness version with
//! [`Variant::Bech32`]. A different constant is only used when it is passed
//! explicitly to [`encode_with_variant`] or [`decode_with_variant`].

use std::fmt;

use crate::charset::U5;
use crate::checksum::{self, Variant, CHECKSUM_LENGTH};
use crate::convert::{self, PaddingError};
use crate::error::write_err;

/// Human-readable part and data part separator
pub const SEP: char = '1';

/// Maximum length of an address string.
pub const MAX_LENGTH: usize = 90;

/// Highest witness version.
pub const MAX_WITNESS_VERSION: u8 = 16;

/// Minimum length of a witness program in bytes.
pub const MIN_PROGRAM_LENGTH: usize = 2;

/// Maximum length of a witness program in bytes.
pub const MAX_PROGRAM_LENGTH: usize = 40;

/// Errors when encoding or decoding a segwit address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The string mixes uppercase and lowercase characters.
    MixedCase,
    /// The string does not contain the separator character.
    MissingSeparator,
    /// The human-readable part is empty or contains a character outside `!`..=`~`.
    InvalidPrefix,
    /// The string is too short to hold a witness version and a checksum, or
    /// longer than [`MAX_LENGTH`] characters.
    InvalidLength(usize),
    /// A character of the data part is not in the bech32 alphabet.
    InvalidCharacter(char),
    /// The checksum does not match the rest of the string.
    InvalidChecksum,
    /// The witness version is above 16.
    InvalidWitnessVersion(u8),
    /// The witness program is not padded correctly.
    InvalidPadding(PaddingError),
    /// The witness program has a length not allowed for its witness version.
    InvalidWitnessProgram(usize),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MixedCase => f.write_str("mixed-case strings not allowed"),
            Error::MissingSeparator => write!(f, "missing human-readable separator, \"{}\"", SEP),
            Error::InvalidPrefix => f.write_str("invalid human-readable part"),
            Error::InvalidLength(len) => write!(f, "invalid address length: {}", len),
            Error::InvalidCharacter(c) => write!(f, "invalid character (code={})", c),
            Error::InvalidChecksum => f.write_str("invalid checksum"),
            Error::InvalidWitnessVersion(v) => write!(f, "invalid witness script version: {}", v),
            Error::InvalidPadding(ref e) => write_err!(f, "invalid padding on the witness data"; e),
            Error::InvalidWitnessProgram(len) => {
                write!(f, "invalid witness program length: {}", len)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::InvalidPadding(ref e) => Some(e),
            _ => None,
        }
    }
}

impl From<PaddingError> for Error {
    fn from(e: PaddingError) -> Error {
        Error::InvalidPadding(e)
    }
}

/// Encodes a witness program as a segwit address using the bech32 checksum.
///
/// The HRP may be given in either case, the address is always lowercase.
pub fn encode(hrp: &str, version: u8, program: &[u8]) -> Result<String, Error> {
    encode_with_variant(hrp, version, program, Variant::Bech32)
}

/// Encodes a witness program as a segwit address using the given checksum
/// variant.
pub fn encode_with_variant(
    hrp: &str,
    version: u8,
    program: &[u8],
    variant: Variant,
) -> Result<String, Error> {
    let (hrp, version) = validate(hrp, version, program.len())?;

    let mut s = String::with_capacity(encoded_length(&hrp, program.len()));
    encode_to_fmt(&mut s, &hrp, version, program, variant)
        .expect("writing to a String doesn't fail");
    Ok(s)
}

/// Writes a segwit address to a [fmt::Write].
///
/// No validation is done on the inputs: the HRP must be lowercase and the
/// program length must be valid for `version`. Use [`encode`] for untrusted
/// inputs.
pub fn encode_to_fmt<W: fmt::Write>(
    fmt: &mut W,
    hrp: &str,
    version: U5,
    program: &[u8],
    variant: Variant,
) -> fmt::Result {
    let mut data = Vec::with_capacity(1 + (program.len() * 8 + 4) / 5);
    data.push(version);
    data.extend(convert::to_base32(program));
    let checksum = checksum::create_checksum(hrp.as_bytes(), &data, variant);

    fmt.write_str(hrp)?;
    fmt.write_char(SEP)?;
    for value in data.iter().chain(checksum.iter()) {
        fmt.write_char(value.to_char())?;
    }
    Ok(())
}

/// Decodes a segwit address checksummed with bech32.
///
/// Returns the lowercase HRP, the witness version and the witness program.
pub fn decode(s: &str) -> Result<(String, u8, Vec<u8>), Error> {
    decode_with_variant(s, Variant::Bech32)
}

/// Decodes a segwit address checksummed with the given variant.
///
/// Checks are done in this order, the first failing one is reported: casing,
/// separator, HRP, length, characters, checksum, witness version, padding and
/// program length.
pub fn decode_with_variant(s: &str, variant: Variant) -> Result<(String, u8, Vec<u8>), Error> {
    let has_lower = s.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = s.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }
    let s = s.to_ascii_lowercase();

    // Split at the last occurrence of the separator.
    let (hrp, raw_data) = match s.rfind(SEP) {
        None => return Err(Error::MissingSeparator),
        Some(sep) => {
            let (hrp, data) = s.split_at(sep);
            (hrp, &data[1..])
        }
    };
    check_hrp(hrp)?;

    // Lengths are in characters, so a stray multi-byte character is reported
    // as such below. Need at least the witness version and the checksum.
    let len = s.chars().count();
    if len > MAX_LENGTH || raw_data.chars().count() < 1 + CHECKSUM_LENGTH {
        return Err(Error::InvalidLength(len));
    }

    let data = raw_data
        .chars()
        .map(|c| U5::from_char(c).ok_or(Error::InvalidCharacter(c)))
        .collect::<Result<Vec<U5>, Error>>()?;

    if !checksum::verify_checksum(hrp.as_bytes(), &data, variant) {
        return Err(Error::InvalidChecksum);
    }

    // Remove checksum from data payload
    let payload = &data[..data.len() - CHECKSUM_LENGTH];
    let (version, program) = match payload.split_first() {
        Some((version, program)) => (*version, program),
        None => return Err(Error::InvalidLength(len)),
    };
    if version.to_u8() > MAX_WITNESS_VERSION {
        return Err(Error::InvalidWitnessVersion(version.to_u8()));
    }
    let program = convert::from_base32(program)?;
    check_program_length(version, program.len())?;

    Ok((hrp.to_owned(), version.to_u8(), program))
}

/// Checks that the HRP is non-empty and made of printable US-ASCII.
fn check_hrp(hrp: &str) -> Result<(), Error> {
    if hrp.is_empty() || hrp.bytes().any(|b| b < 33 || b > 126) {
        return Err(Error::InvalidPrefix);
    }
    Ok(())
}

/// Checks the inputs of an encoding, returning the lowercase HRP and the
/// witness version as a 5-bit value.
pub(crate) fn validate(hrp: &str, version: u8, program_len: usize) -> Result<(String, U5), Error> {
    let hrp = normalize_hrp(hrp)?;
    let version = check_witness_version(version)?;
    check_program_length(version, program_len)?;

    let len = encoded_length(&hrp, program_len);
    if len > MAX_LENGTH {
        return Err(Error::InvalidLength(len));
    }
    Ok((hrp, version))
}

// HRP, separator, witness version, program values and checksum.
fn encoded_length(hrp: &str, program_len: usize) -> usize {
    hrp.len() + 1 + 1 + (program_len * 8 + 4) / 5 + CHECKSUM_LENGTH
}

fn normalize_hrp(hrp: &str) -> Result<String, Error> {
    check_hrp(hrp)?;
    let has_lower = hrp.bytes().any(|b| b.is_ascii_lowercase());
    let has_upper = hrp.bytes().any(|b| b.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(Error::MixedCase);
    }
    Ok(hrp.to_ascii_lowercase())
}

fn check_witness_version(version: u8) -> Result<U5, Error> {
    if version > MAX_WITNESS_VERSION {
        return Err(Error::InvalidWitnessVersion(version));
    }
    U5::try_from_u8(version).map_err(|_| Error::InvalidWitnessVersion(version))
}

/// Checks the program length rules: 2 to 40 bytes, and for version 0 either
/// 20 or 32 bytes.
fn check_program_length(version: U5, len: usize) -> Result<(), Error> {
    if len < MIN_PROGRAM_LENGTH || len > MAX_PROGRAM_LENGTH {
        return Err(Error::InvalidWitnessProgram(len));
    }
    if version == U5::Q && len != 20 && len != 32 {
        return Err(Error::InvalidWitnessProgram(len));
    }
    Ok(())
}

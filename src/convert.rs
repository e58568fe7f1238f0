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

//! # Bit conversion
//!
//! Regrouping of bits between bytes and 5-bit values. Bits are taken most
//! significant first in both directions.

use std::fmt;

use crate::charset::U5;

/// Error validating the padding bits when converting 5-bit values to bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddingError {
    /// The data payload has too many bits of padding.
    TooMuch,
    /// The data payload is padded with non-zero bits.
    NonZero,
}

impl fmt::Display for PaddingError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            PaddingError::TooMuch => write!(f, "the data payload has too many bits of padding"),
            PaddingError::NonZero => write!(f, "the data payload is padded with non-zero bits"),
        }
    }
}

impl std::error::Error for PaddingError {}

/// Converts bytes to 5-bit values, padding the last value with zero bits.
pub fn to_base32(data: &[u8]) -> Vec<U5> {
    let mut ret = Vec::with_capacity((data.len() * 8 + 4) / 5);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for &byte in data {
        acc = (acc << 8) | u32::from(byte);
        bits += 8;
        while bits >= 5 {
            bits -= 5;
            ret.push(u5(acc >> bits));
        }
        acc &= (1 << bits) - 1;
    }
    if bits > 0 {
        ret.push(u5(acc << (5 - bits)));
    }
    ret
}

/// Converts 5-bit values back to bytes.
///
/// The bits left over after the last full byte are padding: there must be at
/// most four of them and they must all be zero.
pub fn from_base32(data: &[U5]) -> Result<Vec<u8>, PaddingError> {
    let mut ret = Vec::with_capacity(data.len() * 5 / 8);
    let mut acc: u32 = 0;
    let mut bits: u32 = 0;
    for value in data {
        acc = (acc << 5) | u32::from(value.to_u8());
        bits += 5;
        if bits >= 8 {
            bits -= 8;
            ret.push((acc >> bits) as u8);
            acc &= (1 << bits) - 1;
        }
    }
    if bits >= 5 {
        return Err(PaddingError::TooMuch);
    }
    if acc != 0 {
        return Err(PaddingError::NonZero);
    }
    Ok(ret)
}

// Keeps the low five bits.
fn u5(value: u32) -> U5 {
    U5::try_from_u8((value & 0x1f) as u8).expect("can't be out of range, max. 31")
}

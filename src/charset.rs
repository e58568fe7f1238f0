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

//! # Charset
//!
//! The 32-character alphabet of bech32 strings and the 5-bit values it stands
//! for. The alphabet leaves out "1", "b", "i" and "o", which are easily
//! confused with other characters.

use std::fmt;

/// Encoding character set. Maps data value -> char
pub const CHARSET: [char; 32] = [
    'q', 'p', 'z', 'r', 'y', '9', 'x', '8', 'g', 'f', '2', 't', 'v', 'd', 'w', '0', 's', '3', 'j',
    'n', '5', '4', 'k', 'h', 'c', 'e', '6', 'm', 'u', 'a', '7', 'l',
];

// Reverse character set. Maps ASCII byte -> CHARSET index on [0,31]
const CHARSET_REV: [i8; 128] = [
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1, -1,
    15, -1, 10, 17, 21, 20, 26, 30, 7, 5, -1, -1, -1, -1, -1, -1, -1, 29, -1, 24, 13, 25, 9, 8, 23,
    -1, 18, 22, 31, 27, 19, -1, 1, 0, 3, 16, 11, 28, 12, 14, 6, 4, 2, -1, -1, -1, -1, -1, -1, 29,
    -1, 24, 13, 25, 9, 8, 23, -1, 18, 22, 31, 27, 19, -1, 1, 0, 3, 16, 11, 28, 12, 14, 6, 4, 2, -1,
    -1, -1, -1, -1,
];

/// A 5-bit value, the unit every character of a bech32 data part encodes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct U5(u8);

impl U5 {
    /// The zero value, rendered as 'q'.
    pub const Q: U5 = U5(0);

    /// Converts a `u8` to a [`U5`] if it is in range [0, 31].
    pub fn try_from_u8(value: u8) -> Result<U5, TryFromU8Error> {
        if value > 31 {
            Err(TryFromU8Error(value))
        } else {
            Ok(U5(value))
        }
    }

    /// Looks up the value of a character of the alphabet. Both lowercase and
    /// uppercase characters are accepted.
    pub fn from_char(c: char) -> Option<U5> {
        if !c.is_ascii() {
            return None;
        }
        // c is ASCII so it indexes into CHARSET_REV, which covers the whole ASCII range.
        let num_value = CHARSET_REV[c as usize];
        if num_value < 0 {
            None
        } else {
            Some(U5(num_value as u8))
        }
    }

    /// Returns the lowercase character of the alphabet for this value.
    pub fn to_char(self) -> char {
        CHARSET[usize::from(self.0)]
    }

    /// Returns the value as a `u8` in range [0, 31].
    pub fn to_u8(self) -> u8 {
        self.0
    }
}

impl From<U5> for u8 {
    fn from(v: U5) -> u8 {
        v.0
    }
}

impl AsRef<u8> for U5 {
    fn as_ref(&self) -> &u8 {
        &self.0
    }
}

impl fmt::Display for U5 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A value did not fit in five bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TryFromU8Error(pub u8);

impl fmt::Display for TryFromU8Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} is out of range for a 5-bit value", self.0)
    }
}

impl std::error::Error for TryFromU8Error {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn charset_is_inverse_of_reverse_table() {
        for (value, ch) in CHARSET.iter().enumerate() {
            let u = U5::from_char(*ch).unwrap();
            assert_eq!(usize::from(u.to_u8()), value);
            assert_eq!(U5::from_char(ch.to_ascii_uppercase()), Some(u));
            assert_eq!(u.to_char(), *ch);
        }
    }

    #[test]
    fn excluded_characters() {
        for ch in ['1', 'b', 'i', 'o', 'B', 'I', 'O', ' ', '\u{7f}', '\u{ff}', 'é'] {
            assert_eq!(U5::from_char(ch), None, "{:?} must not be in the alphabet", ch);
        }
        let accepted = (0u8..128).filter(|b| U5::from_char(char::from(*b)).is_some()).count();
        // 32 symbols plus the uppercase forms of the 23 letters among them.
        assert_eq!(accepted, 32 + 23);
    }

    #[test]
    fn range_check() {
        assert_eq!(U5::try_from_u8(31).map(U5::to_u8), Ok(31));
        assert_eq!(U5::try_from_u8(32), Err(TryFromU8Error(32)));
        assert_eq!(U5::Q.to_char(), 'q');
    }
}

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

//! # Addresses
//!
//! A segwit address bound to the network parameters it was created for, and
//! the output script it pays to.

use std::error;
use std::fmt;
use std::str::FromStr;

use bitcoin::hashes::{hash160, sha256, Hash};
use bitcoin::opcodes::all::{OP_PUSHBYTES_0, OP_PUSHNUM_1};
use bitcoin::secp256k1;
use bitcoin::{Script, ScriptBuf};

use crate::charset::U5;
use crate::checksum::Variant;
use crate::error::write_err;
use crate::segwit;

/// Address error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressError {
    /// The string is not a valid segwit address.
    Segwit(segwit::Error),
    /// No known network uses the human-readable part of the address.
    UnknownHrp(String),
    /// The address belongs to another network than the one requested.
    NetworkMismatch {
        /// The HRP of the requested network.
        expected: &'static str,
        /// The HRP found in the address.
        found: String,
    },
}

impl fmt::Display for AddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            AddressError::Segwit(ref e) => write_err!(f, "segwit error: {}", e; e),
            AddressError::UnknownHrp(ref hrp) => {
                write!(f, "unknown human-readable part: {}", hrp)
            }
            AddressError::NetworkMismatch { expected, ref found } => {
                write!(f, "address is for network \"{}\", expected \"{}\"", found, expected)
            }
        }
    }
}

impl error::Error for AddressError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            AddressError::Segwit(ref e) => Some(e),
            AddressError::UnknownHrp(_) | AddressError::NetworkMismatch { .. } => None,
        }
    }
}

#[doc(hidden)]
impl From<segwit::Error> for AddressError {
    fn from(e: segwit::Error) -> AddressError {
        AddressError::Segwit(e)
    }
}

/// The parameters to derive addresses.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AddressParams {
    /// The bech32 HRP for segwit addresses, in lowercase.
    pub bech_hrp: &'static str,
}

impl AddressParams {
    /// The Bitcoin main network address parameters.
    pub const BITCOIN: AddressParams = AddressParams {
        bech_hrp: "bc",
    };

    /// The Bitcoin test network address parameters. Signet uses the same HRP.
    pub const TESTNET: AddressParams = AddressParams {
        bech_hrp: "tb",
    };

    /// The default regtest network address parameters.
    pub const REGTEST: AddressParams = AddressParams {
        bech_hrp: "bcrt",
    };
}

/// A segwit address.
///
/// Only constructed through checked paths, so every value displays as a
/// string [`segwit::decode`] accepts.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address {
    params: &'static AddressParams,
    version: U5,
    program: Vec<u8>,
}

impl Address {
    /// Creates an address from a witness version and program, checking the
    /// same rules as [`segwit::encode`].
    pub fn new(
        version: u8,
        program: Vec<u8>,
        params: &'static AddressParams,
    ) -> Result<Address, AddressError> {
        let (hrp, version) = segwit::validate(params.bech_hrp, version, program.len())?;
        if hrp != params.bech_hrp {
            return Err(segwit::Error::InvalidPrefix.into());
        }
        Ok(Address { params, version, program })
    }

    /// Create a witness pay to public key address from a public key
    /// This is the native segwit address type for an output redeemable with a single signature
    pub fn p2wpkh(pk: &secp256k1::PublicKey, params: &'static AddressParams) -> Address {
        let hash = hash160::Hash::hash(&pk.serialize());
        Address {
            params,
            version: U5::Q,
            program: hash.to_byte_array().to_vec(),
        }
    }

    /// Create a witness pay to script hash address
    pub fn p2wsh(script: &Script, params: &'static AddressParams) -> Address {
        let hash = sha256::Hash::hash(script.as_bytes());
        Address {
            params,
            version: U5::Q,
            program: hash.to_byte_array().to_vec(),
        }
    }

    /// Get an [Address] from an output script.
    ///
    /// Returns `None` if the script is not a witness program output.
    pub fn from_script(script: &Script, params: &'static AddressParams) -> Option<Address> {
        let bytes = script.as_bytes();
        if bytes.len() < 4 {
            return None;
        }
        let version = match bytes[0] {
            0 => 0,
            op if op >= OP_PUSHNUM_1.to_u8() && op <= OP_PUSHNUM_1.to_u8() + 15 => {
                op - OP_PUSHNUM_1.to_u8() + 1
            }
            _ => return None,
        };
        // The program must be a single direct push spanning the rest of the script.
        if usize::from(bytes[1]) != bytes.len() - 2 {
            return None;
        }
        Address::new(version, bytes[2..].to_vec(), params).ok()
    }

    /// Generates a script pubkey spending to this address
    pub fn script_pubkey(&self) -> ScriptBuf {
        let mut bytes = Vec::with_capacity(2 + self.program.len());
        bytes.push(match self.version.to_u8() {
            0 => OP_PUSHBYTES_0.to_u8(),
            v => OP_PUSHNUM_1.to_u8() + v - 1,
        });
        // Programs are at most 40 bytes so the push length is its own opcode.
        bytes.push(self.program.len() as u8);
        bytes.extend_from_slice(&self.program);
        ScriptBuf::from_bytes(bytes)
    }

    /// The witness version as a number in range [0, 16].
    pub fn witness_version(&self) -> u8 {
        self.version.to_u8()
    }

    /// The witness program.
    pub fn program(&self) -> &[u8] {
        &self.program
    }

    /// The network parameters the address was created for.
    pub fn params(&self) -> &'static AddressParams {
        self.params
    }

    /// Parse the address using the given parameters.
    /// When using the built-in parameters, you can use [FromStr].
    pub fn parse_with_params(
        s: &str,
        params: &'static AddressParams,
    ) -> Result<Address, AddressError> {
        let (hrp, version, program) = segwit::decode(s)?;
        if hrp != params.bech_hrp {
            return Err(AddressError::NetworkMismatch {
                expected: params.bech_hrp,
                found: hrp,
            });
        }
        Address::new(version, program, params)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        segwit::encode_to_fmt(fmt, self.params.bech_hrp, self.version, &self.program, Variant::Bech32)
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, fmt)
    }
}

/// Extract the bech32 prefix.
/// Returns the same slice when no prefix is found.
fn find_prefix(bech32: &str) -> &str {
    // Split at the last occurrence of the separator character '1'.
    match bech32.rfind(segwit::SEP) {
        None => bech32,
        Some(sep) => bech32.split_at(sep).0,
    }
}

/// Checks if both prefixes match, regardless of case.
/// The first prefix can be mixed case, but the second one is expected in
/// lower case.
fn match_prefix(prefix_mixed: &str, prefix_lower: &str) -> bool {
    prefix_lower.len() == prefix_mixed.len()
        && prefix_lower
            .chars()
            .zip(prefix_mixed.chars())
            .all(|(char_lower, char_mixed)| char_lower == char_mixed.to_ascii_lowercase())
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Address, AddressError> {
        let net_arr = [&AddressParams::BITCOIN, &AddressParams::TESTNET, &AddressParams::REGTEST];

        let prefix = find_prefix(s);
        for net in net_arr.iter() {
            if match_prefix(prefix, net.bech_hrp) {
                return Address::parse_with_params(s, net);
            }
        }

        // Report malformed strings as such before complaining about the network.
        let (hrp, _, _) = segwit::decode(s)?;
        Err(AddressError::UnknownHrp(hrp))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Address {
    #[inline]
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use std::fmt::Formatter;

        struct Visitor;
        impl<'de> serde::de::Visitor<'de> for Visitor {
            type Value = Address;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("a segwit address")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                Address::from_str(v).map_err(E::custom)
            }

            fn visit_borrowed_str<E>(self, v: &'de str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(v)
            }

            fn visit_string<E>(self, v: String) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                self.visit_str(&v)
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

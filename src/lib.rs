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

//! # Rust Segwit Address Library
//!
//! Conversion between bech32 segwit address strings and the witness version
//! and witness program they carry.
//!
//! ```
//! let (hrp, version, program) =
//!     segwit_addr::decode("bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4").unwrap();
//! assert_eq!(hrp, "bc");
//! assert_eq!(version, 0);
//! assert_eq!(program.len(), 20);
//! assert_eq!(
//!     segwit_addr::encode(&hrp, version, &program).unwrap(),
//!     "bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4",
//! );
//! ```
//!

// Coding conventions
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]
#![deny(missing_docs)]

pub extern crate bitcoin;
#[cfg(feature = "serde")]
extern crate actual_serde as serde;

mod error;
pub mod address;
pub mod charset;
pub mod checksum;
pub mod convert;
pub mod segwit;

// export everything at the top level so it can be used as `segwit_addr::Address` etc.
pub use crate::address::{Address, AddressError, AddressParams};
pub use crate::charset::U5;
pub use crate::checksum::Variant;
pub use crate::segwit::{decode, decode_with_variant, encode, encode_with_variant, Error};

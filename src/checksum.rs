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

//! # Checksum
//!
//! The BCH code that protects a bech32 string. The checksum covers the
//! human-readable part as well as the data, so swapping the prefix of a valid
//! address for another one is detected just like a typo in the data part.

use crate::charset::U5;

/// Number of 5-bit values in a checksum.
pub const CHECKSUM_LENGTH: usize = 6;

/// Generator coefficients
const GEN: [u32; 5] = [0x3b6a_57b2, 0x2650_8e6d, 0x1ea1_19fa, 0x3d42_33dd, 0x2a14_62b3];

/// The constant a checksum is finalized against.
///
/// Segwit addresses are checksummed with [`Variant::Bech32`] regardless of
/// their witness version unless the caller explicitly asks for
/// [`Variant::Bech32m`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Variant {
    /// The original checksum, target residue 1 (BIP-173).
    Bech32,
    /// The modified checksum, target residue 0x2bc830a3 (BIP-350).
    Bech32m,
}

impl Variant {
    /// The target residue of a valid checksum of this variant.
    pub fn constant(self) -> u32 {
        match self {
            Variant::Bech32 => 1,
            Variant::Bech32m => 0x2bc8_30a3,
        }
    }
}

impl Default for Variant {
    fn default() -> Variant {
        Variant::Bech32
    }
}

/// Expands the human-readable part into values for checksum computation:
/// the high three bits of every character, a zero, then the low five bits of
/// every character.
///
/// The HRP is expected to be lowercase already.
pub fn hrp_expand(hrp: &[u8]) -> Vec<U5> {
    let mut v: Vec<U5> = Vec::with_capacity(hrp.len() * 2 + 1);
    for b in hrp {
        v.push(u5(*b >> 5));
    }
    v.push(U5::Q);
    for b in hrp {
        v.push(u5(*b & 0x1f));
    }
    v
}

/// Computes the checksum of `data` under `hrp`.
///
/// Appending the returned values to `data` yields a sequence for which
/// [`verify_checksum`] returns `true`.
pub fn create_checksum(hrp: &[u8], data: &[U5], variant: Variant) -> [U5; CHECKSUM_LENGTH] {
    let mut values: Vec<U5> = hrp_expand(hrp);
    values.extend_from_slice(data);
    // Pad with 6 zeros
    values.extend_from_slice(&[U5::Q; CHECKSUM_LENGTH]);
    let plm: u32 = polymod(&values) ^ variant.constant();
    let mut checksum = [U5::Q; CHECKSUM_LENGTH];
    for (p, value) in checksum.iter_mut().enumerate() {
        *value = u5((plm >> (5 * (5 - p))) as u8);
    }
    checksum
}

/// Checks that `data`, including its trailing checksum, is valid under `hrp`.
pub fn verify_checksum(hrp: &[u8], data: &[U5], variant: Variant) -> bool {
    let mut exp = hrp_expand(hrp);
    exp.extend_from_slice(data);
    polymod(&exp) == variant.constant()
}

fn polymod(values: &[U5]) -> u32 {
    let mut chk: u32 = 1;
    for v in values {
        let b = (chk >> 25) as u8;
        chk = (chk & 0x1ff_ffff) << 5 ^ u32::from(v.to_u8());
        for (i, gen) in GEN.iter().enumerate() {
            if (b >> i) & 1 == 1 {
                chk ^= gen;
            }
        }
    }
    chk
}

// Masks to five bits, so the conversion cannot fail.
fn u5(value: u8) -> U5 {
    U5::try_from_u8(value & 0x1f).expect("can't be out of range, max. 31")
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::convert::to_base32;

    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    /// Splits a bech32 string into lowercase hrp and data values.
    fn parse(s: &str) -> (Vec<u8>, Vec<U5>) {
        let s = s.to_ascii_lowercase();
        let sep = s.rfind('1').unwrap();
        let hrp = s[..sep].as_bytes().to_vec();
        let data = s[sep + 1..].chars().map(|c| U5::from_char(c).unwrap()).collect();
        (hrp, data)
    }

    #[test]
    fn bip173_valid_checksums() {
        let valid = [
            "A12UEL5L",
            "a12uel5l",
            "an83characterlonghumanreadablepartthatcontainsthenumber1andtheexcludedcharactersbio1tt5tgs",
            "abcdef1qpzry9x8gf2tvdw0s3jn54khce6mua7lmqqqxw",
            "11qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqc8247j",
            "split1checkupstagehandshakeupstreamerranterredcaperred2y9e3w",
            "?1ezyfcl",
        ];
        for s in &valid {
            let (hrp, data) = parse(s);
            assert!(verify_checksum(&hrp, &data, Variant::Bech32), "vector: {}", s);
            assert!(!verify_checksum(&hrp, &data, Variant::Bech32m), "vector: {}", s);
        }
    }

    #[test]
    fn bip350_valid_checksums() {
        let valid = [
            "A1LQFN3A",
            "a1lqfn3a",
            "abcdef1l7aum6echk45nj3s0wdvt2fg8x9yrzpqzd3ryx",
            "split1checkupstagehandshakeupstreamerranterredcaperredlc445v",
            "?1v759aa",
        ];
        for s in &valid {
            let (hrp, data) = parse(s);
            assert!(verify_checksum(&hrp, &data, Variant::Bech32m), "vector: {}", s);
            assert!(!verify_checksum(&hrp, &data, Variant::Bech32), "vector: {}", s);
        }
    }

    #[test]
    fn checksum_of_known_address() {
        // bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4
        let program = [
            0x75, 0x1e, 0x76, 0xe8, 0x19, 0x91, 0x96, 0xd4, 0x54, 0x94, 0x1c, 0x45, 0xd1, 0xb3,
            0xa3, 0x23, 0xf1, 0x43, 0x3b, 0xd6,
        ];
        let mut data = vec![U5::Q];
        data.extend(to_base32(&program));
        let cs = create_checksum(b"bc", &data, Variant::Bech32);
        let rendered: String = cs.iter().map(|u| u.to_char()).collect();
        assert_eq!(rendered, "v8f3t4");
    }

    #[test]
    fn hrp_expansion() {
        let expanded: Vec<u8> = hrp_expand(b"bc").into_iter().map(u8::from).collect();
        assert_eq!(expanded, vec![3, 3, 0, 2, 3]);
        assert_eq!(hrp_expand(b"").len(), 1);
    }

    #[test]
    fn high_bits_are_masked() {
        assert_eq!(u5(0xff).to_u8(), 31);
        assert_eq!(u5(0x20), U5::Q);
        // '~' is 0x7e: three high bits 3, five low bits 30.
        let expanded: Vec<u8> = hrp_expand(b"~").into_iter().map(u8::from).collect();
        assert_eq!(expanded, vec![3, 0, 30]);
    }

    #[test]
    fn created_checksums_verify() {
        let mut rng = ChaCha20Rng::seed_from_u64(173);
        for variant in [Variant::Bech32, Variant::Bech32m] {
            for len in 0..64 {
                let data: Vec<U5> =
                    (0..len).map(|_| U5::try_from_u8(rng.gen_range(0..32)).unwrap()).collect();
                let cs = create_checksum(b"tb", &data, variant);
                let mut full = data.clone();
                full.extend_from_slice(&cs);
                assert!(verify_checksum(b"tb", &full, variant));
                // The checksum is bound to the prefix.
                assert!(!verify_checksum(b"bc", &full, variant));
            }
        }
    }

    #[test]
    fn single_substitution_is_detected() {
        let mut rng = ChaCha20Rng::seed_from_u64(350);
        let data: Vec<U5> = (0..40).map(|_| U5::try_from_u8(rng.gen_range(0..32)).unwrap()).collect();
        let mut full = data.clone();
        full.extend_from_slice(&create_checksum(b"bc", &data, Variant::Bech32));

        for pos in 0..full.len() {
            for delta in 1..32u8 {
                let mut corrupt = full.clone();
                corrupt[pos] = U5::try_from_u8(corrupt[pos].to_u8() ^ delta).unwrap();
                assert!(!verify_checksum(b"bc", &corrupt, Variant::Bech32));
            }
        }
    }

    #[test]
    fn matches_reference_implementation() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x5e6);
        let hrp = bech32::Hrp::parse("bc").unwrap();
        for len in 0..48 {
            let bytes: Vec<u8> = (0..len).map(|_| rng.gen()).collect();
            let data = to_base32(&bytes);

            for variant in [Variant::Bech32, Variant::Bech32m] {
                let ours: String = data
                    .iter()
                    .chain(create_checksum(b"bc", &data, variant).iter())
                    .map(|u| u.to_char())
                    .collect();
                let theirs = match variant {
                    Variant::Bech32 => bech32::encode::<bech32::Bech32>(hrp, &bytes).unwrap(),
                    Variant::Bech32m => bech32::encode::<bech32::Bech32m>(hrp, &bytes).unwrap(),
                };
                assert_eq!(format!("bc1{}", ours), theirs);
            }
        }
    }
}

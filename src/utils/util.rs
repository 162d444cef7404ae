// This file is part of MIDNIGHT-ZK.
// Copyright (C) 2025 Midnight Foundation
// SPDX-License-Identifier: Apache-2.0
// Licensed under the Apache License, Version 2.0 (the "License");
// You may not use this file except in compliance with the License.
// You may obtain a copy of the License at
// http://www.apache.org/licenses/LICENSE-2.0
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Conversions between native field elements and big integers.

use ff::PrimeField;
use num_bigint::{BigInt as BI, BigUint, Sign};
use num_traits::{Num, Signed};

/// The modulus of the given prime field.
pub fn modulus<F: PrimeField>() -> BigUint {
    // `F::MODULUS` is a "0x"-prefixed hexadecimal string by the ff contract.
    BigUint::from_str_radix(F::MODULUS.trim_start_matches("0x"), 16)
        .expect("PrimeField::MODULUS is a valid hexadecimal string")
}

/// The field element congruent to the given integer.
pub fn big_to_fe<F: PrimeField>(e: &BigUint) -> F {
    let e = e % modulus::<F>();
    let bytes = e.to_bytes_le();
    let mut repr = F::Repr::default();
    let view = repr.as_mut();
    // Little-endian representations are assumed, as for every field in
    // halo2curves.
    view[..bytes.len()].copy_from_slice(&bytes);
    F::from_repr(repr).expect("a reduced integer is a canonical representation")
}

/// The (canonical) integer representing the given field element.
pub fn fe_to_big<F: PrimeField>(fe: F) -> BigUint {
    BigUint::from_bytes_le(fe.to_repr().as_ref())
}

/// The field element congruent to the given (possibly negative) integer.
pub fn bigint_to_fe<F: PrimeField>(value: &BI) -> F {
    let f = big_to_fe::<F>(value.magnitude());
    if value.is_negative() {
        -f
    } else {
        f
    }
}

/// The (non-negative) integer representing the given field element.
pub fn fe_to_bigint<F: PrimeField>(value: &F) -> BI {
    BI::from_bytes_le(Sign::Plus, value.to_repr().as_ref())
}

/// Decompose the given field element into little-endian bits.
///
/// - If `nb_bits = None`, the output will have as many bits as necessary to
///   represent the given element, but no more.
/// - If `nb_bits` is provided, the output will have the specified length,
///   possibly with trailing zeros, or will be truncated to that length.
pub fn fe_to_le_bits<F: PrimeField>(value: &F, nb_bits: Option<usize>) -> Vec<bool> {
    let big = fe_to_big(*value);
    let len = nb_bits.unwrap_or(big.bits() as usize);
    (0..len as u64).map(|i| big.bit(i)).collect()
}

#[cfg(test)]
mod tests {
    use ff::Field;
    use halo2curves::{bn256::Fr, secp256k1::Fq};
    use num_traits::One;

    use super::*;

    #[test]
    fn test_big_fe_conversions() {
        let m = modulus::<Fr>();
        assert_eq!(big_to_fe::<Fr>(&(&m + 5u32)), Fr::from(5));
        assert_eq!(fe_to_big(-Fr::ONE), &m - BigUint::one());
        assert_eq!(bigint_to_fe::<Fr>(&BI::from(-3)), -Fr::from(3));
        assert_eq!(fe_to_bigint(&Fr::from(77)), BI::from(77));

        let m = modulus::<Fq>();
        assert_eq!(m.bits(), 256);
        assert_eq!(fe_to_big(big_to_fe::<Fq>(&(&m - 1u32))), m - 1u32);
    }

    #[test]
    fn test_fe_to_le_bits() {
        let bits = fe_to_le_bits(&Fr::from(6), None);
        assert_eq!(bits, vec![false, true, true]);
        let bits = fe_to_le_bits(&Fr::from(6), Some(5));
        assert_eq!(bits, vec![false, true, true, false, false]);
        assert!(fe_to_le_bits(&Fr::ZERO, None).is_empty());
    }
}

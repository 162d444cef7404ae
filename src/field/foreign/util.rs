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

// Util functions of the foreign arithmetic module

use ff::PrimeField;
use num_bigint::{BigInt as BI, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::utils::util::fe_to_big;

/// Like .rem, but gives positive answers only.
pub fn urem(value: &BI, modulus: &BI) -> BI {
    let mut output = value % modulus;
    if output.is_negative() {
        output += modulus;
    }
    output
}

/// Computes the logarithm in base 2 of the given value, rounded up.
/// By convention, `ceil_log2(0) = ceil_log2(1) = 0`.
pub fn ceil_log2(value: usize) -> u32 {
    match value {
        0 | 1 => 0,
        v => usize::BITS - (v - 1).leading_zeros(),
    }
}

/// Breaks the given `value` into `nb_limbs` limbs of `log2_base` bits (in
/// little-endian). The value must fit in `nb_limbs * log2_base` bits.
pub fn big_to_limbs(nb_limbs: u32, log2_base: u32, value: &BigUint) -> Vec<BigUint> {
    debug_assert!(value.bits() <= (nb_limbs as u64) * (log2_base as u64));
    let mask = (BigUint::one() << log2_base) - 1u32;
    (0..nb_limbs)
        .map(|i| (value >> (i * log2_base)) & &mask)
        .collect()
}

/// Returns the BigUint represented by the given `limbs` of `log2_base` bits,
/// in little-endian. Limbs may exceed `log2_base` bits.
pub fn big_from_limbs(log2_base: u32, limbs: &[BigUint]) -> BigUint {
    limbs
        .iter()
        .rev()
        .fold(BigUint::zero(), |acc, limb| (acc << log2_base) + limb)
}

/// The integer represented by the given native limb values.
pub fn big_from_fe_limbs<F: PrimeField>(log2_base: u32, limbs: &[F]) -> BigUint {
    let limbs: Vec<BigUint> = limbs.iter().map(|x| fe_to_big(*x)).collect();
    big_from_limbs(log2_base, &limbs)
}

/// The inverse of `x` modulo `m`, if it exists.
pub fn mod_inverse(x: &BigUint, m: &BigUint) -> Option<BigUint> {
    let (x, m) = (BI::from(x.clone()), BI::from(m.clone()));
    let egcd = urem(&x, &m).extended_gcd(&m);
    if !egcd.gcd.is_one() {
        return None;
    }
    urem(&egcd.x, &m).to_biguint()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceil_log2() {
        let expected = [(0, 0), (1, 0), (2, 1), (3, 2), (4, 2), (5, 3), (10, 4), (12, 4), (23, 5)];
        for (value, log) in expected {
            assert_eq!(ceil_log2(value), log, "ceil_log2({value})");
        }
    }

    #[test]
    fn test_limbs() {
        let value = BigUint::from(0x0123_4567_89ab_cdefu64);
        let limbs = big_to_limbs(4, 16, &value);
        assert_eq!(
            limbs,
            [0xcdefu32, 0x89ab, 0x4567, 0x0123].map(BigUint::from).to_vec()
        );
        assert_eq!(big_from_limbs(16, &limbs), value);

        // Overflowed limbs are carried over.
        let limbs = [0x1_0001u32, 0x2].map(BigUint::from);
        assert_eq!(big_from_limbs(16, &limbs), BigUint::from(0x3_0001u32));
    }

    #[test]
    fn test_mod_inverse() {
        let m = BigUint::from(101u32);
        for x in 1u32..101 {
            let inv = mod_inverse(&BigUint::from(x), &m).unwrap();
            assert_eq!((inv * x) % &m, BigUint::one());
        }
        assert_eq!(mod_inverse(&BigUint::zero(), &m), None);
        assert_eq!(mod_inverse(&BigUint::from(202u32), &m), None);
        assert_eq!(mod_inverse(&BigUint::from(6u32), &BigUint::from(9u32)), None);
        assert_eq!(urem(&BI::from(-3), &BI::from(7)), BI::from(4));
    }
}

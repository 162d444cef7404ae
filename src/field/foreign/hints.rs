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

//! Hints of the foreign arithmetic module.
//!
//! Limb values are read as the integers in `[0, native modulus)` their native
//! field elements represent. Every hint is a pure function of its inputs and
//! of the parameters it is created with.

use ff::PrimeField;
use num_bigint::{BigInt as BI, BigUint};
use num_integer::Integer;

use super::util::{big_from_fe_limbs, big_to_limbs, mod_inverse};
use crate::{
    circuit::Hint,
    error::HintError,
    utils::util::{big_to_fe, bigint_to_fe, fe_to_bigint},
};

fn check_arity<F>(inputs: &[F], expected: usize) -> Result<(), HintError> {
    if inputs.len() != expected {
        return Err(HintError::InputArity {
            expected,
            got: inputs.len(),
        });
    }
    Ok(())
}

fn limbs_to_fe<F: PrimeField>(nb_limbs: usize, log2_base: u32, value: &BigUint) -> Vec<F> {
    big_to_limbs(nb_limbs as u32, log2_base, value)
        .iter()
        .map(big_to_fe)
        .collect()
}

/// On input the limbs of `x`, outputs the limbs of `q`, `r` and `d` where
/// `x = q * modulus + r`, `0 <= r < modulus` and `d = modulus - 1 - r`.
#[derive(Debug)]
pub(crate) struct QuotientRemainder {
    pub modulus: BigUint,
    pub log2_base: u32,
    pub nb_limbs: usize,
    pub nb_quotient_limbs: usize,
}

impl<F: PrimeField> Hint<F> for QuotientRemainder {
    fn name(&self) -> &'static str {
        "quotient_remainder"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        let x = big_from_fe_limbs(self.log2_base, inputs);
        let (q, r) = x.div_rem(&self.modulus);
        if q.bits() > (self.nb_quotient_limbs as u64) * (self.log2_base as u64) {
            return Err(HintError::Malformed(format!(
                "the quotient has {} bits, at most {} limbs of {} bits were expected",
                q.bits(),
                self.nb_quotient_limbs,
                self.log2_base
            )));
        }
        let d = &self.modulus - 1u32 - &r;

        let mut outputs = limbs_to_fe(self.nb_quotient_limbs, self.log2_base, &q);
        outputs.extend(limbs_to_fe::<F>(self.nb_limbs, self.log2_base, &r));
        outputs.extend(limbs_to_fe::<F>(self.nb_limbs, self.log2_base, &d));
        Ok(outputs)
    }
}

/// On input the limbs of `x`, outputs the limbs of the inverse of `x` modulo
/// `modulus`, or zeros if `x` is not invertible.
#[derive(Debug)]
pub(crate) struct ModularInverse {
    pub modulus: BigUint,
    pub log2_base: u32,
    pub nb_limbs: usize,
}

impl<F: PrimeField> Hint<F> for ModularInverse {
    fn name(&self) -> &'static str {
        "modular_inverse"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        let x = big_from_fe_limbs(self.log2_base, inputs);
        let inv = mod_inverse(&x, &self.modulus).unwrap_or_default();
        Ok(limbs_to_fe(self.nb_limbs, self.log2_base, &inv))
    }
}

/// On input `a_0, ..., a_{n-1}, b_0, ..., b_{m-1}`, outputs the `n + m - 1`
/// limbs of the schoolbook product `c_k = sum_{i + j = k} a_i * b_j`.
#[derive(Debug)]
pub(crate) struct ProductLimbs {
    pub nb_a: usize,
    pub nb_b: usize,
}

impl<F: PrimeField> Hint<F> for ProductLimbs {
    fn name(&self) -> &'static str {
        "product_limbs"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        check_arity(inputs, self.nb_a + self.nb_b)?;
        let (a, b) = inputs.split_at(self.nb_a);
        let mut c = vec![F::ZERO; self.nb_a + self.nb_b - 1];
        for (i, ai) in a.iter().enumerate() {
            for (j, bj) in b.iter().enumerate() {
                c[i + j] += *ai * bj;
            }
        }
        Ok(c)
    }
}

/// The carries of a limb-wise integer identity `sum_k 2^(k * log2_base) D_k = 0`,
/// where every `D_k` is a linear combination of the inputs. The inputs are the
/// variables of `D_0`, then those of `D_1`, and so on.
///
/// Outputs, for every position `k` but the last one, `c_k - c_min_k` where
/// `c_k = (D_k + c_{k-1}) / 2^log2_base` and `c_{-1} = 0`.
#[derive(Debug)]
pub(crate) struct Carries {
    pub log2_base: u32,
    /// Coefficients of the inputs of every position, and its constant term.
    pub positions: Vec<(Vec<BI>, BI)>,
    pub carry_min: Vec<BI>,
}

impl<F: PrimeField> Hint<F> for Carries {
    fn name(&self) -> &'static str {
        "carries"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        let expected = self.positions.iter().map(|(coeffs, _)| coeffs.len()).sum();
        check_arity(inputs, expected)?;

        let base = BI::from(1) << self.log2_base;
        let mut inputs = inputs.iter();
        let mut carry = BI::from(0);
        let mut outputs = Vec::with_capacity(self.carry_min.len());
        for ((coeffs, constant), c_min) in self.positions.iter().zip(self.carry_min.iter()) {
            let d = (coeffs.iter().zip(&mut inputs))
                .fold(constant.clone(), |acc, (c, x)| acc + c * fe_to_bigint(x));
            carry = (d + &carry).div_floor(&base);
            outputs.push(bigint_to_fe(&(&carry - c_min)));
        }
        Ok(outputs)
    }
}

#[cfg(test)]
mod tests {
    use halo2curves::bn256::Fr;
    use num_traits::{One, Zero};

    use super::*;
    use crate::utils::util::fe_to_big;

    fn limbs(values: &[u64]) -> Vec<Fr> {
        values.iter().map(|v| Fr::from(*v)).collect()
    }

    #[test]
    fn test_quotient_remainder() {
        let hint = QuotientRemainder {
            modulus: BigUint::from(1000u32),
            log2_base: 8,
            nb_limbs: 2,
            nb_quotient_limbs: 1,
        };
        // 0x0301 + 0x02 * 2^16 = 131841 = 131 * 1000 + 841
        let outputs = Hint::<Fr>::compute(&hint, &limbs(&[0x01, 0x03, 0x02])).unwrap();
        let values: Vec<BigUint> = outputs.into_iter().map(fe_to_big).collect();
        let expected = [131u32, 841 % 256, 841 / 256, 158 % 256, 158 / 256];
        assert_eq!(values, expected.map(BigUint::from).to_vec());

        // A quotient of 2^16 / 1000 = 65 fits, 2^24 / 1000 does not.
        assert!(Hint::<Fr>::compute(&hint, &limbs(&[0, 0, 0, 1])).is_err());
    }

    #[test]
    fn test_modular_inverse() {
        let hint = ModularInverse {
            modulus: BigUint::from(65521u32),
            log2_base: 8,
            nb_limbs: 2,
        };
        let outputs = Hint::<Fr>::compute(&hint, &limbs(&[7, 1])).unwrap();
        let inv = big_from_fe_limbs(8, &outputs);
        assert_eq!((inv * 263u32) % 65521u32, BigUint::one());

        // 65521 = 0xfff1 is not invertible.
        let outputs = Hint::<Fr>::compute(&hint, &limbs(&[0xf1, 0xff])).unwrap();
        assert!(big_from_fe_limbs(8, &outputs).is_zero());
    }

    #[test]
    fn test_product_limbs() {
        let hint = ProductLimbs { nb_a: 2, nb_b: 3 };
        let outputs = Hint::<Fr>::compute(&hint, &limbs(&[1, 2, 3, 4, 5])).unwrap();
        assert_eq!(outputs, limbs(&[3, 10, 13, 10]));
        assert!(Hint::<Fr>::compute(&hint, &limbs(&[1, 2, 3])).is_err());
    }

    #[test]
    fn test_carries() {
        // 0x1ff + 0x01 - 0x200 = 0, in base 2^8:
        //   D_0 = 0xff + 0x01 - 0x00 = 0x100, carry 1,
        //   D_1 = 0x01 + 0x00 - 0x02 = -1, total 0.
        let hint = Carries {
            log2_base: 8,
            positions: vec![
                (vec![BI::one(), BI::one()], BI::zero()),
                (vec![BI::one()], BI::from(-2)),
            ],
            carry_min: vec![BI::from(-1)],
        };
        let outputs = Hint::<Fr>::compute(&hint, &limbs(&[0xff, 0x01, 0x01])).unwrap();
        assert_eq!(outputs, limbs(&[2]));
    }
}

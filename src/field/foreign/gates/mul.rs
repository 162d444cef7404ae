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

use std::sync::Arc;

use ff::PrimeField;
use num_bigint::{BigInt as BI, BigUint};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

use crate::{
    circuit::{AssignedNative, ConstraintBuilder, Expression},
    error::Error,
    field::foreign::hints::{Carries, ProductLimbs},
    instructions::NativeInstructions,
    utils::util::{bigint_to_fe, modulus},
};

/// One limb `D_k` of an integer identity `sum_k 2^(k * LOG2_BASE) D_k = 0`:
/// a linear combination of native variables with integer coefficients,
/// together with bounds on the values it may take.
#[derive(Clone, Debug)]
pub(crate) struct LimbExpr<F: PrimeField> {
    terms: Vec<(BI, AssignedNative<F>)>,
    constant: BI,
    min: BI,
    max: BI,
}

impl<F: PrimeField> Default for LimbExpr<F> {
    fn default() -> Self {
        LimbExpr {
            terms: vec![],
            constant: BI::zero(),
            min: BI::zero(),
            max: BI::zero(),
        }
    }
}

impl<F: PrimeField> LimbExpr<F> {
    /// Adds `coeff * x`, for a variable `x` in `[0, x_max]`.
    pub fn term(mut self, coeff: BI, x: &AssignedNative<F>, x_max: &BigUint) -> Self {
        if coeff.is_zero() {
            return self;
        }
        let extreme = &coeff * BI::from(x_max.clone());
        if coeff.is_negative() {
            self.min += extreme;
        } else {
            self.max += extreme;
        }
        self.terms.push((coeff, *x));
        self
    }

    /// Adds the constant `k`.
    pub fn constant(mut self, k: BI) -> Self {
        self.min += &k;
        self.max += &k;
        self.constant += k;
        self
    }
}

// An identity evaluated over the native field, with integer value in
// [lo, hi], only implies the identity over the integers if the interval
// does not contain two multiples of the native modulus.
fn check_span<F: PrimeField>(lo: &BI, hi: &BI, position: usize) -> Result<(), Error> {
    if hi - lo >= BI::from(modulus::<F>()) {
        return Err(Error::NativeWrapAround(format!(
            "the identity of limb {position} spans [{lo}, {hi}]"
        )));
    }
    Ok(())
}

/// Enforces `sum_k 2^(k * log2_base) D_k = 0` over the integers, where `D_k`
/// are the given limb expressions.
///
/// The identity is split into one native relation per limb,
///   `D_k + c_{k-1} - 2^log2_base * c_k = 0`,
/// where the carries `c_k` are hinted. Since the bounds of every `D_k` are
/// known, so are the ones of the carries: we write `c_k = u_k + c_min_k` and
/// range-check `u_k` in `[0, 2^t_k)` where `2^t_k` is the smallest power of
/// two above `c_max_k - c_min_k`. Every relation must then span less than the
/// native modulus, or [Error::NativeWrapAround] is returned.
pub(crate) fn assert_limbs_zero<F, N>(
    builder: &mut impl ConstraintBuilder<F>,
    native_gadget: &N,
    log2_base: u32,
    exprs: &[LimbExpr<F>],
) -> Result<(), Error>
where
    F: PrimeField,
    N: NativeInstructions<F>,
{
    let m = exprs.len();
    if m == 0 {
        return Ok(());
    }
    let base = BI::one() << log2_base;

    let mut carry_min = Vec::with_capacity(m - 1);
    let mut carry_bits = Vec::with_capacity(m - 1);
    let (mut prev_min, mut prev_max) = (BI::zero(), BI::zero());
    for (k, expr) in exprs.iter().enumerate() {
        let lo = &expr.min + &prev_min;
        let hi = &expr.max + &prev_max;
        if k == m - 1 {
            check_span::<F>(&lo, &hi, k)?;
            break;
        }
        let c_min = lo.div_ceil(&base);
        let c_max = hi.div_floor(&base).max(c_min.clone());
        let nb_bits = (&c_max - &c_min).bits() as u32;
        let c_max = &c_min + (BI::one() << nb_bits) - 1;
        check_span::<F>(&(&lo - &base * &c_max), &(&hi - &base * &c_min), k)?;

        prev_min = c_min.clone();
        prev_max = c_max;
        carry_min.push(c_min);
        carry_bits.push(nb_bits);
    }

    let carries = if m > 1 {
        let inputs: Vec<AssignedNative<F>> =
            exprs.iter().flat_map(|e| e.terms.iter().map(|(_, x)| *x)).collect();
        let positions = exprs
            .iter()
            .map(|e| {
                let coeffs = e.terms.iter().map(|(c, _)| c.clone()).collect();
                (coeffs, e.constant.clone())
            })
            .collect();
        let hint = Carries {
            log2_base,
            positions,
            carry_min: carry_min.clone(),
        };
        builder.hint(Arc::new(hint), &inputs, m - 1)?
    } else {
        vec![]
    };
    for (u, nb_bits) in carries.iter().zip(carry_bits.iter()) {
        native_gadget.assert_lower_than_pow2(builder, u, *nb_bits)?;
    }

    let base_fe: F = bigint_to_fe(&base);
    for (k, expr) in exprs.iter().enumerate() {
        let mut terms: Vec<(F, AssignedNative<F>)> =
            expr.terms.iter().map(|(c, x)| (bigint_to_fe(c), *x)).collect();
        let mut constant = expr.constant.clone();
        if k > 0 {
            terms.push((F::ONE, carries[k - 1]));
            constant += &carry_min[k - 1];
        }
        if k < m - 1 {
            terms.push((-base_fe, carries[k]));
            constant -= &base * &carry_min[k];
        }
        builder.assert_zero(&Expression::linear(&terms, bigint_to_fe(&constant)))?;
    }

    Ok(())
}

/// Assigns the limbs of the schoolbook product of `a` and `b`, i.e.
/// `c_k = sum_{i + j = k} a_i * b_j` for `k < |a| + |b| - 1`, with one
/// quadratic relation per limb. The caller is responsible for the limbs of
/// `c` not wrapping around the native modulus.
pub(crate) fn assign_product_limbs<F: PrimeField>(
    builder: &mut impl ConstraintBuilder<F>,
    a: &[AssignedNative<F>],
    b: &[AssignedNative<F>],
) -> Result<Vec<AssignedNative<F>>, Error> {
    let inputs = [a, b].concat();
    let hint = ProductLimbs {
        nb_a: a.len(),
        nb_b: b.len(),
    };
    let c = builder.hint(Arc::new(hint), &inputs, a.len() + b.len() - 1)?;

    for (k, ck) in c.iter().enumerate() {
        let expr = (0..a.len())
            .filter(|i| k >= *i && k - i < b.len())
            .fold(Expression::default(), |expr, i| {
                expr.product(F::ONE, &a[i], &b[k - i])
            });
        builder.assert_zero(&expr.term(-F::ONE, ck))?;
    }

    Ok(c)
}

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
use num_traits::One;

use super::mul::{assert_limbs_zero, LimbExpr};
use crate::{
    circuit::{AssignedNative, ConstraintBuilder},
    error::Error,
    field::foreign::{
        hints::QuotientRemainder,
        params::{EmulationParams, FieldEmulationParams},
        util::{big_from_limbs, big_to_limbs},
        AssignedField,
    },
    instructions::NativeInstructions,
};

/// Reduces AssignedField x, returning the limbs of the canonical integer
/// congruent to it modulo the foreign modulus `m`.
///
/// Let `x = sum_i 2^(i * LOG2_BASE) x_i`, with every limb `x_i` in
/// `[0, x_max]`. A hint provides `q`, `r` and `d` (in limbs) such that:
///
///  `x - q * m - r = 0`       (over the integers),
///  `r + d - (m - 1) = 0`     (over the integers),
///
/// with all the limbs of `r`, `d` and `q` range-checked. The second identity,
/// with `d >= 0`, guarantees that `r < m`. The number of limbs of `q` is
/// derived from the largest value `x` may take.
pub(crate) fn reduce<F, P, N>(
    builder: &mut impl ConstraintBuilder<F>,
    x: &AssignedField<F, P>,
    params: &EmulationParams,
    native_gadget: &N,
) -> Result<Vec<AssignedNative<F>>, Error>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    let m = params.modulus();
    let log2_base = params.log2_base();
    let nb_limbs = params.nb_limbs() as usize;
    let limb_max = (BigUint::one() << log2_base) - 1u32;

    let x_limbs = x.limbs();
    let x_max = x.limb_bound().max();
    let max_value = big_from_limbs(log2_base, &vec![x_max.clone(); x_limbs.len()]);
    let q_max = &max_value / m;
    let q_bits = q_max.bits() as u32;
    let nb_q_limbs = q_bits.div_ceil(log2_base) as usize;

    let hint = QuotientRemainder {
        modulus: m.clone(),
        log2_base,
        nb_limbs,
        nb_quotient_limbs: nb_q_limbs,
    };
    let outputs = builder.hint(Arc::new(hint), x_limbs, nb_q_limbs + 2 * nb_limbs)?;
    let (q, rest) = outputs.split_at(nb_q_limbs);
    let (r, d) = rest.split_at(nb_limbs);

    // The most significant limb of q is bounded by what remains of q_max.
    let q_limb_bits: Vec<u32> = (0..nb_q_limbs)
        .map(|i| {
            if i + 1 == nb_q_limbs {
                q_bits - log2_base * i as u32
            } else {
                log2_base
            }
        })
        .collect();
    for (qi, nb_bits) in q.iter().zip(q_limb_bits.iter()) {
        native_gadget.assert_lower_than_pow2(builder, qi, *nb_bits)?;
    }
    for limb in r.iter().chain(d.iter()) {
        native_gadget.assert_lower_than_pow2(builder, limb, log2_base)?;
    }

    // x - q * m - r = 0
    let m_limbs = params.modulus_limbs();
    let nb_positions = x_limbs.len().max(nb_limbs).max(nb_q_limbs + nb_limbs - 1);
    let exprs: Vec<LimbExpr<F>> = (0..nb_positions)
        .map(|k| {
            let mut expr = LimbExpr::default();
            if let Some(xk) = x_limbs.get(k) {
                expr = expr.term(BI::one(), xk, x_max);
            }
            for (i, (qi, nb_bits)) in q.iter().zip(q_limb_bits.iter()).enumerate() {
                if let Some(mj) = k.checked_sub(i).and_then(|j| m_limbs.get(j)) {
                    let qi_max = (BigUint::one() << *nb_bits) - 1u32;
                    expr = expr.term(-BI::from(mj.clone()), qi, &qi_max);
                }
            }
            if let Some(rk) = r.get(k) {
                expr = expr.term(-BI::one(), rk, &limb_max);
            }
            expr
        })
        .collect();
    assert_limbs_zero(builder, native_gadget, log2_base, &exprs)?;

    // r + d - (m - 1) = 0
    let m_minus_one = big_to_limbs(nb_limbs as u32, log2_base, &(m - 1u32));
    let exprs: Vec<LimbExpr<F>> = (r.iter().zip(d.iter()).zip(m_minus_one.iter()))
        .map(|((rk, dk), ck)| {
            LimbExpr::default()
                .term(BI::one(), rk, &limb_max)
                .term(BI::one(), dk, &limb_max)
                .constant(-BI::from(ck.clone()))
        })
        .collect();
    assert_limbs_zero(builder, native_gadget, log2_base, &exprs)?;

    Ok(r.to_vec())
}

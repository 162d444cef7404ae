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

//! A chip implementing arithmetic modulo a foreign prime, emulated over the
//! native field with limbs.
//!
//! Elements are represented in base `2^LOG2_BASE` by native limbs. Reduced
//! elements have `NB_LIMBS` limbs of at most `LOG2_BASE` bits, but additions,
//! subtractions and multiplications are performed limb-wise without reducing
//! their result: the limbs of an [AssignedField] grow (in magnitude and, for
//! products, in number) until the chip decides a reduction is necessary.
//! Every element keeps an upper bound on its limbs, from which its overflow
//! (the number of bits a limb may hold beyond `LOG2_BASE`) is derived.
//!
//! Modular equalities are enforced by proving integer identities limb by limb
//! with hinted carries, see [gates](super::gates).

use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use ff::PrimeField;
use log::debug;
use num_bigint::BigUint;
#[cfg(any(test, feature = "testing"))]
use num_bigint::RandBigInt;
use num_traits::{One, Zero};
#[cfg(any(test, feature = "testing"))]
use rand::RngCore;

use super::{
    gates::{mul::assign_product_limbs, norm},
    hints::ModularInverse,
    overflow::{
        add_overflow, mul_overflow, must_reduce, scalar_mul_overflow, sub_overflow, LimbBound,
    },
    params::{EmulationParams, FieldEmulationParams},
    util::{big_from_limbs, big_to_limbs},
};
#[cfg(any(test, feature = "testing"))]
use crate::utils::types::Sampleable;
use crate::{
    circuit::{AssignedNative, ConstraintBuilder},
    error::Error,
    field::native::AssignedBit,
    instructions::{
        ArithInstructions, AssertionInstructions, AssignmentInstructions,
        ControlFlowInstructions, DecompositionInstructions, NativeInstructions,
        ZeroInstructions,
    },
    types::{InnerConstants, InnerValue},
    utils::util::big_to_fe,
};

/// Type for assigned emulated field elements of modulus `P::modulus()`.
///
/// The represented integer is `sum_i limbs[i] * 2^(i * P::LOG2_BASE)`, which
/// is congruent to the element modulo the foreign modulus but not necessarily
/// lower than it.
#[derive(Clone, Debug)]
#[must_use]
pub struct AssignedField<F: PrimeField, P: FieldEmulationParams> {
    limbs: Vec<AssignedNative<F>>,
    bound: LimbBound,
    // The bound of the limbs is guaranteed by construction. External elements
    // have range-checked limbs instead.
    internal: bool,
    // The represented integer is known to be lower than the modulus.
    canonical: bool,
    _marker: PhantomData<P>,
}

impl<F: PrimeField, P: FieldEmulationParams> AssignedField<F, P> {
    fn new(limbs: Vec<AssignedNative<F>>, bound: LimbBound, internal: bool) -> Self {
        AssignedField {
            limbs,
            bound,
            internal,
            canonical: false,
            _marker: PhantomData,
        }
    }

    fn reduced(limbs: Vec<AssignedNative<F>>) -> Self {
        AssignedField {
            limbs,
            bound: LimbBound::from_bits(P::LOG2_BASE),
            internal: true,
            canonical: true,
            _marker: PhantomData,
        }
    }

    /// The limbs of the element, in little-endian.
    pub fn limbs(&self) -> &[AssignedNative<F>] {
        &self.limbs
    }

    /// Number of limbs of the element.
    pub fn nb_limbs(&self) -> usize {
        self.limbs.len()
    }

    /// An upper bound on every limb.
    pub fn limb_bound(&self) -> &LimbBound {
        &self.bound
    }

    /// The overflow of the limbs, i.e. the number of bits they may have
    /// beyond `P::LOG2_BASE`.
    pub fn overflow(&self) -> u32 {
        self.bound.overflow(P::LOG2_BASE)
    }

    /// Whether the element was produced by the chip, as opposed to assigned
    /// from external limbs.
    pub fn is_internal(&self) -> bool {
        self.internal
    }

    /// Whether the element is known to be reduced modulo the foreign modulus.
    pub fn is_canonical(&self) -> bool {
        self.canonical
    }
}

impl<F: PrimeField, P: FieldEmulationParams> InnerValue for AssignedField<F, P> {
    type Element = BigUint;
}

impl<F: PrimeField, P: FieldEmulationParams> InnerConstants for AssignedField<F, P> {
    fn inner_zero() -> BigUint {
        BigUint::zero()
    }

    fn inner_one() -> BigUint {
        BigUint::one()
    }
}

#[cfg(any(test, feature = "testing"))]
impl<F: PrimeField, P: FieldEmulationParams> Sampleable for AssignedField<F, P> {
    fn sample_inner(mut rng: impl RngCore) -> BigUint {
        rng.gen_biguint_below(&P::modulus())
    }
}

/// A chip for arithmetic over the foreign field `P`, emulated over the native
/// field `F` with the help of a native gadget `N`.
#[derive(Clone, Debug)]
pub struct FieldChip<F, P, N>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    params: EmulationParams,
    native_gadget: N,
    _marker: PhantomData<(F, P)>,
}

impl<F, P, N> FieldChip<F, P, N>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    /// Creates a new chip, validating the emulation parameters of `P` over
    /// the native field.
    pub fn new(native_gadget: &N) -> Result<Self, Error> {
        let params = P::params::<F>()?;
        debug!(
            "emulating {} with {} limbs of {} bits (max overflow {})",
            P::NAME,
            params.nb_limbs(),
            params.log2_base(),
            params.max_overflow()
        );
        Ok(FieldChip {
            params,
            native_gadget: native_gadget.clone(),
            _marker: PhantomData,
        })
    }

    /// The emulation parameters.
    pub fn params(&self) -> &EmulationParams {
        &self.params
    }

    fn log2_base(&self) -> u32 {
        self.params.log2_base()
    }

    fn nb_limbs(&self) -> usize {
        self.params.nb_limbs() as usize
    }

    fn check_nb_limbs(&self, x: &AssignedField<F, P>) -> Result<(), Error> {
        let expected = self.params.max_element_limbs();
        if x.limbs.is_empty() || x.limbs.len() > expected {
            return Err(Error::LimbCountMismatch {
                expected,
                got: x.limbs.len(),
            });
        }
        Ok(())
    }

    fn native_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        constant: F,
    ) -> Result<AssignedNative<F>, Error> {
        AssignmentInstructions::<F, AssignedNative<F>>::assign_fixed(
            &self.native_gadget,
            builder,
            constant,
        )
    }

    /// Reduces `x` modulo the foreign modulus. The result has `NB_LIMBS`
    /// limbs of `LOG2_BASE` bits and is canonical. Canonical inputs are
    /// returned as they are.
    pub fn reduce(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
    ) -> Result<AssignedField<F, P>, Error> {
        self.check_nb_limbs(x)?;
        if x.canonical {
            return Ok(x.clone());
        }
        let limbs = norm::reduce(builder, x, &self.params, &self.native_gadget)?;
        Ok(AssignedField::reduced(limbs))
    }

    /// Asserts that the integer represented by `x` is lower than the foreign
    /// modulus.
    pub fn assert_canonical(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
    ) -> Result<(), Error> {
        if x.canonical {
            return Ok(());
        }
        let r = self.reduce(builder, x)?;
        self.assert_limbs_equal(builder, &x.limbs, &r.limbs)
    }

    /// Creates an element out of already assigned native limbs, which are
    /// assumed to have at most `LOG2_BASE + overflow` bits. Unless `internal`
    /// is set, this is enforced with range checks.
    pub fn assign_from_limbs(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        limbs: &[AssignedNative<F>],
        overflow: u32,
        internal: bool,
    ) -> Result<AssignedField<F, P>, Error> {
        let expected = self.params.max_element_limbs();
        if limbs.is_empty() || limbs.len() > expected {
            return Err(Error::LimbCountMismatch {
                expected,
                got: limbs.len(),
            });
        }
        if must_reduce(overflow, self.params.max_overflow()) {
            return Err(Error::InvalidParams(format!(
                "an overflow of {overflow} exceeds the maximum overflow ({}) of {}",
                self.params.max_overflow(),
                P::NAME
            )));
        }
        let nb_bits = self.log2_base() + overflow;
        if !internal {
            for limb in limbs {
                self.native_gadget.assert_lower_than_pow2(builder, limb, nb_bits)?;
            }
        }
        Ok(AssignedField::new(
            limbs.to_vec(),
            LimbBound::from_bits(nb_bits),
            internal,
        ))
    }

    /// The foreign modulus as an (unreduced) element, congruent to zero.
    pub fn modulus_element(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
    ) -> Result<AssignedField<F, P>, Error> {
        let (limbs, bound) = self.fixed_limbs(builder, self.params.modulus())?;
        Ok(AssignedField::new(limbs, bound, true))
    }

    /// The constant 0.
    pub fn zero(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
    ) -> Result<AssignedField<F, P>, Error> {
        self.assign_fixed(builder, BigUint::zero())
    }

    /// The constant 1.
    pub fn one(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
    ) -> Result<AssignedField<F, P>, Error> {
        self.assign_fixed(builder, BigUint::one())
    }

    // Fixed limbs of the given value, which must fit in `NB_LIMBS` limbs, and
    // the exact bound of those limbs.
    fn fixed_limbs(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        value: &BigUint,
    ) -> Result<(Vec<AssignedNative<F>>, LimbBound), Error> {
        let values = big_to_limbs(self.params.nb_limbs(), self.log2_base(), value);
        let bound = LimbBound::new(values.iter().max().cloned().unwrap_or_default());
        let limbs = values
            .iter()
            .map(|v| self.native_fixed(builder, big_to_fe(v)))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok((limbs, bound))
    }

    // Limb-wise equality, missing limbs being zero.
    fn assert_limbs_equal(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &[AssignedNative<F>],
        y: &[AssignedNative<F>],
    ) -> Result<(), Error> {
        for k in 0..x.len().max(y.len()) {
            match (x.get(k), y.get(k)) {
                (Some(a), Some(b)) => self.native_gadget.assert_equal(builder, a, b)?,
                (Some(a), None) | (None, Some(a)) => {
                    self.native_gadget.assert_equal_to_fixed(builder, a, F::ZERO)?
                }
                (None, None) => (),
            }
        }
        Ok(())
    }

    // Reduces operands until the bound of the result of `op`, given by
    // `result_bound`, is within the maximum overflow. The non-canonical
    // operand with the largest bound is reduced first.
    fn reduce_until(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        op: &str,
        x: &AssignedField<F, P>,
        y: &AssignedField<F, P>,
        result_bound: impl Fn(&AssignedField<F, P>, &AssignedField<F, P>) -> LimbBound,
    ) -> Result<(AssignedField<F, P>, AssignedField<F, P>), Error> {
        let max_overflow = self.params.max_overflow();
        let (mut x, mut y) = (x.clone(), y.clone());
        loop {
            let overflow = result_bound(&x, &y).overflow(self.log2_base());
            if !must_reduce(overflow, max_overflow) {
                return Ok((x, y));
            }
            debug!(
                "{op} over {}: overflow {overflow} exceeds {max_overflow}, reducing an operand",
                P::NAME
            );
            let reduce_x = match (x.canonical, y.canonical) {
                (true, true) => {
                    return Err(Error::InvalidParams(format!(
                        "{op} of reduced {} elements exceeds the maximum overflow",
                        P::NAME
                    )))
                }
                (false, true) => true,
                (true, false) => false,
                (false, false) => x.bound >= y.bound,
            };
            if reduce_x {
                x = self.reduce(builder, &x)?;
            } else {
                y = self.reduce(builder, &y)?;
            }
        }
    }

    // The given limbs, completed with zeros up to `nb_limbs`.
    fn pad_limbs(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        limbs: &[AssignedNative<F>],
        nb_limbs: usize,
    ) -> Result<Vec<AssignedNative<F>>, Error> {
        let mut padded = limbs.to_vec();
        if padded.len() < nb_limbs {
            let zero = self.native_fixed(builder, F::ZERO)?;
            padded.resize(nb_limbs, zero);
        }
        Ok(padded)
    }

    fn sub_width(&self, x: &AssignedField<F, P>, y: &AssignedField<F, P>) -> usize {
        x.limbs.len().max(y.limbs.len()).max(self.nb_limbs())
    }

    // A padding for subtracting an element whose limbs are bounded by
    // `subtrahend`: every limb is at least `2^t > subtrahend`, and the padding
    // represents a multiple of the modulus.
    fn sub_padding(&self, subtrahend: &LimbBound, nb_limbs: usize) -> Vec<BigUint> {
        let log2_base = self.log2_base();
        let m = self.params.modulus();
        let mut padding = vec![BigUint::one() << subtrahend.nb_bits(); nb_limbs];
        let excess = big_from_limbs(log2_base, &padding) % m;
        let compensation = (m - excess) % m;
        let compensation = big_to_limbs(self.params.nb_limbs(), log2_base, &compensation);
        for (limb, c) in padding.iter_mut().zip(compensation) {
            *limb += c;
        }
        padding
    }

    fn sub_bound(&self, x: &AssignedField<F, P>, y: &AssignedField<F, P>) -> LimbBound {
        let padding = self.sub_padding(&y.bound, self.sub_width(x, y));
        x.bound.add(&LimbBound::new(padding.into_iter().max().unwrap_or_default()))
    }
}

// Assignment Instructions.
impl<F, P, N> AssignmentInstructions<F, AssignedField<F, P>> for FieldChip<F, P, N>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    fn assign(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        value: Option<BigUint>,
    ) -> Result<AssignedField<F, P>, Error> {
        let log2_base = self.log2_base();
        let values: Vec<Option<F>> = match value {
            Some(v) => big_to_limbs(self.params.nb_limbs(), log2_base, &(v % self.params.modulus()))
                .iter()
                .map(|limb| Some(big_to_fe(limb)))
                .collect(),
            None => vec![None; self.nb_limbs()],
        };
        let limbs = values
            .into_iter()
            .map(|v| self.native_gadget.assign_lower_than_pow2(builder, v, log2_base))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(AssignedField::new(limbs, LimbBound::from_bits(log2_base), false))
    }

    fn assign_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        constant: BigUint,
    ) -> Result<AssignedField<F, P>, Error> {
        let constant = constant % self.params.modulus();
        let (limbs, bound) = self.fixed_limbs(builder, &constant)?;
        Ok(AssignedField {
            limbs,
            bound,
            internal: true,
            canonical: true,
            _marker: PhantomData,
        })
    }
}

// Assertion Instructions.
impl<F, P, N> AssertionInstructions<F, AssignedField<F, P>> for FieldChip<F, P, N>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    fn assert_equal(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
        y: &AssignedField<F, P>,
    ) -> Result<(), Error> {
        let x = self.reduce(builder, x)?;
        let y = self.reduce(builder, y)?;
        self.assert_limbs_equal(builder, &x.limbs, &y.limbs)
    }

    fn assert_equal_to_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
        constant: BigUint,
    ) -> Result<(), Error> {
        let x = self.reduce(builder, x)?;
        let constant = constant % self.params.modulus();
        let limbs = big_to_limbs(self.params.nb_limbs(), self.log2_base(), &constant);
        for (limb, c) in x.limbs.iter().zip(limbs.iter()) {
            self.native_gadget.assert_equal_to_fixed(builder, limb, big_to_fe(c))?;
        }
        Ok(())
    }
}

// Arithmetic Instructions.
impl<F, P, N> ArithInstructions<F, AssignedField<F, P>> for FieldChip<F, P, N>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    fn linear_combination(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        terms: &[(BigUint, AssignedField<F, P>)],
        constant: BigUint,
    ) -> Result<AssignedField<F, P>, Error> {
        let m = self.params.modulus();
        let mut acc: Option<AssignedField<F, P>> = None;
        for (coeff, x) in terms.iter().filter(|(c, _)| !(c % m).is_zero()) {
            let term = self.mul_by_constant(builder, x, coeff.clone())?;
            acc = Some(match acc {
                None => term,
                Some(acc) => self.add(builder, &acc, &term)?,
            });
        }
        let constant = constant % m;
        match acc {
            None => self.assign_fixed(builder, constant),
            Some(acc) if constant.is_zero() => Ok(acc),
            Some(acc) => {
                let constant = self.assign_fixed(builder, constant)?;
                self.add(builder, &acc, &constant)
            }
        }
    }

    fn add(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
        y: &AssignedField<F, P>,
    ) -> Result<AssignedField<F, P>, Error> {
        self.check_nb_limbs(x)?;
        self.check_nb_limbs(y)?;
        let (x, y) = self.reduce_until(builder, "add", x, y, |x, y| x.bound.add(&y.bound))?;
        let (long, short) = if x.limbs.len() >= y.limbs.len() {
            (&x, &y)
        } else {
            (&y, &x)
        };
        let mut limbs = Vec::with_capacity(long.limbs.len());
        for (k, a) in long.limbs.iter().enumerate() {
            limbs.push(match short.limbs.get(k) {
                Some(b) => self.native_gadget.add(builder, a, b)?,
                None => *a,
            });
        }
        let sum = AssignedField::new(limbs, x.bound.add(&y.bound), true);
        debug_assert!(sum.overflow() <= add_overflow(x.overflow(), y.overflow()));
        Ok(sum)
    }

    fn sub(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
        y: &AssignedField<F, P>,
    ) -> Result<AssignedField<F, P>, Error> {
        self.check_nb_limbs(x)?;
        self.check_nb_limbs(y)?;
        let (x, y) = self.reduce_until(builder, "sub", x, y, |x, y| self.sub_bound(x, y))?;
        let nb_limbs = self.sub_width(&x, &y);
        let padding = self.sub_padding(&y.bound, nb_limbs);
        let limbs = padding
            .iter()
            .enumerate()
            .map(|(k, pad)| {
                let mut terms = vec![];
                if let Some(xk) = x.limbs.get(k) {
                    terms.push((F::ONE, *xk));
                }
                if let Some(yk) = y.limbs.get(k) {
                    terms.push((-F::ONE, *yk));
                }
                self.native_gadget.linear_combination(builder, &terms, big_to_fe(pad))
            })
            .collect::<Result<Vec<_>, Error>>()?;
        let difference = AssignedField::new(limbs, self.sub_bound(&x, &y), true);
        debug_assert!(difference.overflow() <= sub_overflow(x.overflow(), y.overflow()));
        Ok(difference)
    }

    fn neg(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
    ) -> Result<AssignedField<F, P>, Error> {
        let zero = self.zero(builder)?;
        self.sub(builder, &zero, x)
    }

    fn mul(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
        y: &AssignedField<F, P>,
        multiplying_constant: Option<BigUint>,
    ) -> Result<AssignedField<F, P>, Error> {
        self.check_nb_limbs(x)?;
        self.check_nb_limbs(y)?;
        // Products are at most as wide as the product of reduced elements.
        let x = if x.limbs.len() > self.nb_limbs() {
            self.reduce(builder, x)?
        } else {
            x.clone()
        };
        let y = if y.limbs.len() > self.nb_limbs() {
            self.reduce(builder, y)?
        } else {
            y.clone()
        };
        let product_bound = |x: &AssignedField<F, P>, y: &AssignedField<F, P>| {
            x.bound.mul(&y.bound, x.limbs.len().min(y.limbs.len()))
        };
        let (x, y) = self.reduce_until(builder, "mul", &x, &y, product_bound)?;

        let limbs = assign_product_limbs(builder, &x.limbs, &y.limbs)?;
        let product = AssignedField::new(limbs, product_bound(&x, &y), true);
        debug_assert!(
            product.overflow()
                <= mul_overflow(
                    x.overflow(),
                    y.overflow(),
                    self.log2_base(),
                    x.limbs.len().min(y.limbs.len())
                )
        );
        match multiplying_constant {
            Some(k) => self.mul_by_constant(builder, &product, k),
            None => Ok(product),
        }
    }

    fn div(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
        y: &AssignedField<F, P>,
    ) -> Result<AssignedField<F, P>, Error> {
        let y_inv = self.inv(builder, y)?;
        let quotient = self.mul(builder, x, &y_inv, None)?;
        self.reduce(builder, &quotient)
    }

    fn inv(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
    ) -> Result<AssignedField<F, P>, Error> {
        self.check_nb_limbs(x)?;
        let hint = ModularInverse {
            modulus: self.params.modulus().clone(),
            log2_base: self.log2_base(),
            nb_limbs: self.nb_limbs(),
        };
        let limbs = builder.hint(Arc::new(hint), &x.limbs, self.nb_limbs())?;
        for limb in limbs.iter() {
            self.native_gadget.assert_lower_than_pow2(builder, limb, self.log2_base())?;
        }
        let x_inv = AssignedField::new(limbs, LimbBound::from_bits(self.log2_base()), true);

        // x * x_inv = 1 has no solution for x = 0.
        let should_be_one = self.mul(builder, x, &x_inv, None)?;
        self.assert_equal_to_fixed(builder, &should_be_one, BigUint::one())?;
        Ok(x_inv)
    }

    fn mul_by_constant(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
        constant: BigUint,
    ) -> Result<AssignedField<F, P>, Error> {
        self.check_nb_limbs(x)?;
        let k = constant % self.params.modulus();
        if k.is_zero() {
            return self.zero(builder);
        }
        if k.is_one() {
            return Ok(x.clone());
        }

        let fits = |x: &AssignedField<F, P>| {
            let overflow = x.bound.scale(&k).overflow(self.log2_base());
            !must_reduce(overflow, self.params.max_overflow())
        };
        let mut x = x.clone();
        if !fits(&x) && !x.canonical {
            debug!("scaling a {} element requires a reduction", P::NAME);
            x = self.reduce(builder, &x)?;
        }
        if !fits(&x) {
            // Large constants are multiplied as foreign elements.
            let k = self.assign_fixed(builder, k)?;
            return self.mul(builder, &x, &k, None);
        }

        let k_fe: F = big_to_fe(&k);
        let limbs = x
            .limbs
            .iter()
            .map(|limb| self.native_gadget.mul_by_constant(builder, limb, k_fe))
            .collect::<Result<Vec<_>, Error>>()?;
        let scaled = AssignedField::new(limbs, x.bound.scale(&k), true);
        debug_assert!(scaled.overflow() <= scalar_mul_overflow(x.overflow(), &k));
        Ok(scaled)
    }
}

impl<F, P, N> ZeroInstructions<F, AssignedField<F, P>> for FieldChip<F, P, N>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    fn is_zero(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
    ) -> Result<AssignedBit<F>, Error> {
        let x = self.reduce(builder, x)?;
        let mut acc: Option<AssignedNative<F>> = None;
        for limb in x.limbs.iter() {
            let limb_is_zero: AssignedNative<F> = self.native_gadget.is_zero(builder, limb)?.into();
            acc = Some(match acc {
                None => limb_is_zero,
                Some(acc) => self.native_gadget.mul(builder, &acc, &limb_is_zero, None)?,
            });
        }
        match acc {
            Some(acc) => Ok(AssignedBit(acc)),
            None => Err(Error::LimbCountMismatch {
                expected: self.nb_limbs(),
                got: 0,
            }),
        }
    }
}

impl<F, P, N> ControlFlowInstructions<F, AssignedField<F, P>> for FieldChip<F, P, N>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    fn select(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        cond: &AssignedBit<F>,
        x: &AssignedField<F, P>,
        y: &AssignedField<F, P>,
    ) -> Result<AssignedField<F, P>, Error> {
        self.check_nb_limbs(x)?;
        self.check_nb_limbs(y)?;
        let nb_limbs = x.limbs.len().max(y.limbs.len());
        let x_limbs = self.pad_limbs(builder, &x.limbs, nb_limbs)?;
        let y_limbs = self.pad_limbs(builder, &y.limbs, nb_limbs)?;
        let limbs = (x_limbs.iter().zip(y_limbs.iter()))
            .map(|(a, b)| self.native_gadget.select(builder, cond, a, b))
            .collect::<Result<Vec<_>, Error>>()?;
        Ok(AssignedField {
            limbs,
            bound: x.bound.clone().max(y.bound.clone()),
            internal: x.internal && y.internal,
            canonical: x.canonical && y.canonical,
            _marker: PhantomData,
        })
    }
}

impl<F, P, N> DecompositionInstructions<F, AssignedField<F, P>> for FieldChip<F, P, N>
where
    F: PrimeField,
    P: FieldEmulationParams,
    N: NativeInstructions<F>,
{
    /// The decomposition is always performed on the reduced element, so it is
    /// canonical regardless of `enforce_canonical`. If `nb_bits` is lower than
    /// the size of the modulus, the element is asserted to fit in `nb_bits`.
    fn assigned_to_le_bits(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedField<F, P>,
        nb_bits: Option<usize>,
        _enforce_canonical: bool,
    ) -> Result<Vec<AssignedBit<F>>, Error> {
        let modulus_bits = self.params.modulus().bits() as usize;
        let nb_bits = nb_bits.unwrap_or(modulus_bits);
        if nb_bits > modulus_bits {
            return Err(Error::TooManyBits {
                max: modulus_bits,
                got: nb_bits,
            });
        }

        let x = self.reduce(builder, x)?;
        let log2_base = self.log2_base() as usize;
        let mut bits = Vec::with_capacity(modulus_bits);
        for (i, limb) in x.limbs.iter().enumerate() {
            let limb_bits = log2_base.min(modulus_bits.saturating_sub(i * log2_base));
            bits.extend(self.native_gadget.assigned_to_le_bits(
                builder,
                limb,
                Some(limb_bits),
                false,
            )?);
        }
        for bit in bits.drain(nb_bits..) {
            self.native_gadget.assert_equal_to_fixed(builder, &bit.into(), F::ZERO)?;
        }
        Ok(bits)
    }

    /// Every chunk of `LOG2_BASE` bits becomes a limb. The result is not
    /// reduced.
    fn assigned_from_le_bits(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        bits: &[AssignedBit<F>],
    ) -> Result<AssignedField<F, P>, Error> {
        let log2_base = self.log2_base() as usize;
        let max = log2_base * self.nb_limbs();
        if bits.len() > max {
            return Err(Error::TooManyBits {
                max,
                got: bits.len(),
            });
        }
        if bits.is_empty() {
            return self.zero(builder);
        }
        let limbs = bits
            .chunks(log2_base)
            .map(|chunk| self.native_gadget.assigned_from_le_bits(builder, chunk))
            .collect::<Result<Vec<_>, Error>>()?;
        let bound = LimbBound::from_bits(log2_base.min(bits.len()) as u32);
        Ok(AssignedField::new(limbs, bound, true))
    }
}

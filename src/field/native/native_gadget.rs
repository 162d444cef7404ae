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

//! A gadget that implements all basic operations in the native field, i.e.
//! basic field operations, decompositions and range checks.

use std::{marker::PhantomData, sync::Arc};

use ff::PrimeField;

use super::AssignedBit;
use crate::{
    circuit::{AssignedNative, ConstraintBuilder, Expression, Hint},
    error::{Error, HintError},
    instructions::{
        ArithInstructions, AssertionInstructions, AssignmentInstructions,
        ControlFlowInstructions, DecompositionInstructions, RangeCheckInstructions,
        ZeroInstructions,
    },
    utils::util::{fe_to_le_bits, modulus},
};

/// How [NativeGadget] enforces range checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RangeCheckMode {
    /// Delegate to [ConstraintBuilder::assert_range], e.g. a lookup argument
    /// of the underlying proof system.
    #[default]
    Native,
    /// Decompose into constrained bits. Only relations of degree two are
    /// required from the builder.
    Plain,
}

#[derive(Clone, Debug, Default)]
/// A gadget that implements all basic operations on the native field:
/// - Assignments
/// - Assertions
/// - Arithmetic
/// - ControlFlow
/// - Decomposition
/// - RangeCheck
/// - Zero
pub struct NativeGadget<F: PrimeField> {
    range_check_mode: RangeCheckMode,
    _marker: PhantomData<F>,
}

impl<F: PrimeField> NativeGadget<F> {
    /// Create a new gadget.
    pub fn new(range_check_mode: RangeCheckMode) -> Self {
        Self {
            range_check_mode,
            _marker: PhantomData,
        }
    }

    /// The way range checks are enforced.
    pub fn range_check_mode(&self) -> RangeCheckMode {
        self.range_check_mode
    }

    // A fresh variable constrained to be `constant + sum_i c_i * x_i`.
    fn linear_hinted(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        terms: &[(F, AssignedNative<F>)],
        constant: F,
    ) -> Result<AssignedNative<F>, Error> {
        let coeffs = terms.iter().map(|(c, _)| *c).collect();
        let inputs: Vec<_> = terms.iter().map(|(_, x)| *x).collect();
        let out = builder.hint(
            Arc::new(LinearCombination { coeffs, constant }),
            &inputs,
            1,
        )?[0];
        builder.assert_zero(&Expression::linear(terms, constant).term(-F::ONE, &out))?;
        Ok(out)
    }

    // Asserts that the given bits represent an integer strictly lower than
    // the native modulus. The bits are scanned from the most significant one,
    // keeping track of whether all of them have been equal to the ones of
    // `p - 1` so far (`None` stands for the constant 1).
    fn assert_canonical_bits(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        bits: &[AssignedBit<F>],
    ) -> Result<(), Error> {
        let bound = modulus::<F>() - 1u32;
        let mut eq: Option<AssignedNative<F>> = None;
        for (i, bit) in bits.iter().enumerate().rev() {
            let b: AssignedNative<F> = bit.into();
            match (bound.bit(i as u64), eq) {
                (false, None) => builder.assert_zero(&Expression::linear(&[(F::ONE, b)], F::ZERO))?,
                (false, Some(e)) => {
                    builder.assert_zero(&Expression::default().product(F::ONE, &e, &b))?
                }
                (true, None) => eq = Some(b),
                (true, Some(e)) => eq = Some(self.mul(builder, &e, &b, None)?),
            }
        }
        Ok(())
    }
}

// Assignment Instructions.
impl<F: PrimeField> AssignmentInstructions<F, AssignedNative<F>> for NativeGadget<F> {
    fn assign(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        value: Option<F>,
    ) -> Result<AssignedNative<F>, Error> {
        builder.assign(value)
    }

    fn assign_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        constant: F,
    ) -> Result<AssignedNative<F>, Error> {
        builder.assign_fixed(constant)
    }
}

impl<F: PrimeField> AssignmentInstructions<F, AssignedBit<F>> for NativeGadget<F> {
    fn assign(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        value: Option<bool>,
    ) -> Result<AssignedBit<F>, Error> {
        let x = builder.assign(value.map(|b| F::from(b as u64)))?;
        builder.assert_zero(&Expression::default().product(F::ONE, &x, &x).term(-F::ONE, &x))?;
        Ok(AssignedBit(x))
    }

    fn assign_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        constant: bool,
    ) -> Result<AssignedBit<F>, Error> {
        Ok(AssignedBit(builder.assign_fixed(F::from(constant as u64))?))
    }
}

// Assertion Instructions.
impl<F: PrimeField> AssertionInstructions<F, AssignedNative<F>> for NativeGadget<F> {
    fn assert_equal(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
        y: &AssignedNative<F>,
    ) -> Result<(), Error> {
        builder.assert_equal(x, y)
    }

    fn assert_equal_to_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
        constant: F,
    ) -> Result<(), Error> {
        builder.assert_zero(&Expression::linear(&[(F::ONE, *x)], -constant))
    }
}

impl<F: PrimeField> AssertionInstructions<F, AssignedBit<F>> for NativeGadget<F> {
    fn assert_equal(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedBit<F>,
        y: &AssignedBit<F>,
    ) -> Result<(), Error> {
        builder.assert_equal(&x.0, &y.0)
    }

    fn assert_equal_to_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedBit<F>,
        constant: bool,
    ) -> Result<(), Error> {
        self.assert_equal_to_fixed(builder, &x.0, F::from(constant as u64))
    }
}

// Arithmetic Instructions.
impl<F: PrimeField> ArithInstructions<F, AssignedNative<F>> for NativeGadget<F> {
    fn linear_combination(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        terms: &[(F, AssignedNative<F>)],
        constant: F,
    ) -> Result<AssignedNative<F>, Error> {
        match terms {
            [] => builder.assign_fixed(constant),
            [(c, x)] if *c == F::ONE && constant == F::ZERO => Ok(*x),
            _ => self.linear_hinted(builder, terms, constant),
        }
    }

    fn sub(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
        y: &AssignedNative<F>,
    ) -> Result<AssignedNative<F>, Error> {
        self.linear_combination(builder, &[(F::ONE, *x), (-F::ONE, *y)], F::ZERO)
    }

    fn neg(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
    ) -> Result<AssignedNative<F>, Error> {
        self.linear_combination(builder, &[(-F::ONE, *x)], F::ZERO)
    }

    fn mul(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
        y: &AssignedNative<F>,
        multiplying_constant: Option<F>,
    ) -> Result<AssignedNative<F>, Error> {
        let k = multiplying_constant.unwrap_or(F::ONE);
        let out = builder.hint(Arc::new(Product { k }), &[*x, *y], 1)?[0];
        builder.assert_zero(&Expression::default().product(k, x, y).term(-F::ONE, &out))?;
        Ok(out)
    }

    fn div(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
        y: &AssignedNative<F>,
    ) -> Result<AssignedNative<F>, Error> {
        let y_inv = self.inv(builder, y)?;
        self.mul(builder, x, &y_inv, None)
    }

    fn inv(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
    ) -> Result<AssignedNative<F>, Error> {
        let out = builder.hint(Arc::new(Inverse), &[*x], 1)?[0];
        builder.assert_zero(&Expression::default().product(F::ONE, x, &out).constant(-F::ONE))?;
        Ok(out)
    }
}

// Zero Instructions.
impl<F: PrimeField> ZeroInstructions<F, AssignedNative<F>> for NativeGadget<F> {
    fn is_zero(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
    ) -> Result<AssignedBit<F>, Error> {
        let outputs = builder.hint(Arc::new(IsZero), &[*x], 2)?;
        let (inv, b) = (outputs[0], outputs[1]);
        // x * inv = 1 - b and x * b = 0 force b = (x == 0).
        builder.assert_zero(
            &Expression::linear(&[(F::ONE, b)], -F::ONE).product(F::ONE, x, &inv),
        )?;
        builder.assert_zero(&Expression::default().product(F::ONE, x, &b))?;
        Ok(AssignedBit(b))
    }
}

// ControlFlow Instructions.
impl<F: PrimeField> ControlFlowInstructions<F, AssignedNative<F>> for NativeGadget<F> {
    fn select(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        cond: &AssignedBit<F>,
        x: &AssignedNative<F>,
        y: &AssignedNative<F>,
    ) -> Result<AssignedNative<F>, Error> {
        let c = cond.0;
        let out = builder.hint(Arc::new(Select), &[c, *x, *y], 1)?[0];
        builder.assert_zero(
            &Expression::linear(&[(F::ONE, *y), (-F::ONE, out)], F::ZERO)
                .product(F::ONE, &c, x)
                .product(-F::ONE, &c, y),
        )?;
        Ok(out)
    }
}

// Decomposition Instructions.
impl<F: PrimeField> DecompositionInstructions<F, AssignedNative<F>> for NativeGadget<F> {
    fn assigned_to_le_bits(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
        nb_bits: Option<usize>,
        enforce_canonical: bool,
    ) -> Result<Vec<AssignedBit<F>>, Error> {
        let max = F::NUM_BITS as usize;
        let nb_bits = nb_bits.unwrap_or(max);
        if nb_bits > max {
            return Err(Error::TooManyBits { max, got: nb_bits });
        }

        let outputs = builder.hint(Arc::new(Bits { nb_bits }), &[*x], nb_bits)?;
        let mut terms = Vec::with_capacity(nb_bits);
        let mut pow = F::ONE;
        for b in outputs.iter() {
            builder.assert_zero(&Expression::default().product(F::ONE, b, b).term(-F::ONE, b))?;
            terms.push((pow, *b));
            pow = pow.double();
        }
        builder.assert_zero(&Expression::linear(&terms, F::ZERO).term(-F::ONE, x))?;

        let bits: Vec<AssignedBit<F>> = outputs.into_iter().map(AssignedBit).collect();
        if enforce_canonical && nb_bits == max {
            self.assert_canonical_bits(builder, &bits)?;
        }
        Ok(bits)
    }

    fn assigned_from_le_bits(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        bits: &[AssignedBit<F>],
    ) -> Result<AssignedNative<F>, Error> {
        let max = F::NUM_BITS as usize;
        if bits.len() > max {
            return Err(Error::TooManyBits {
                max,
                got: bits.len(),
            });
        }
        let mut pow = F::ONE;
        let terms: Vec<_> = bits
            .iter()
            .map(|b| {
                let term = (pow, b.0);
                pow = pow.double();
                term
            })
            .collect();
        self.linear_combination(builder, &terms, F::ZERO)
    }
}

// RangeCheck Instructions.
impl<F: PrimeField> RangeCheckInstructions<F, AssignedNative<F>> for NativeGadget<F> {
    fn assign_lower_than_pow2(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        value: Option<F>,
        nb_bits: u32,
    ) -> Result<AssignedNative<F>, Error> {
        let x = builder.assign(value)?;
        self.assert_lower_than_pow2(builder, &x, nb_bits)?;
        Ok(x)
    }

    fn assert_lower_than_pow2(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &AssignedNative<F>,
        nb_bits: u32,
    ) -> Result<(), Error> {
        if nb_bits >= F::NUM_BITS {
            return Ok(());
        }
        if nb_bits == 0 {
            return self.assert_equal_to_fixed(builder, x, F::ZERO);
        }
        match self.range_check_mode {
            RangeCheckMode::Native => builder.assert_range(x, nb_bits),
            RangeCheckMode::Plain => self
                .assigned_to_le_bits(builder, x, Some(nb_bits as usize), false)
                .map(|_| ()),
        }
    }
}

fn check_arity<F>(inputs: &[F], expected: usize) -> Result<(), HintError> {
    if inputs.len() != expected {
        return Err(HintError::InputArity {
            expected,
            got: inputs.len(),
        });
    }
    Ok(())
}

#[derive(Debug)]
struct LinearCombination<F: PrimeField> {
    coeffs: Vec<F>,
    constant: F,
}

impl<F: PrimeField> Hint<F> for LinearCombination<F> {
    fn name(&self) -> &'static str {
        "linear_combination"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        check_arity(inputs, self.coeffs.len())?;
        let sum = (inputs.iter().zip(self.coeffs.iter()))
            .fold(self.constant, |acc, (x, c)| acc + *c * x);
        Ok(vec![sum])
    }
}

#[derive(Debug)]
struct Product<F: PrimeField> {
    k: F,
}

impl<F: PrimeField> Hint<F> for Product<F> {
    fn name(&self) -> &'static str {
        "product"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        check_arity(inputs, 2)?;
        Ok(vec![self.k * inputs[0] * inputs[1]])
    }
}

#[derive(Debug)]
struct Inverse;

impl<F: PrimeField> Hint<F> for Inverse {
    fn name(&self) -> &'static str {
        "inverse"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        check_arity(inputs, 1)?;
        // Zero has no inverse; the constraint on the output is then
        // unsatisfiable whatever it is.
        Ok(vec![inputs[0].invert().unwrap_or(F::ZERO)])
    }
}

#[derive(Debug)]
struct IsZero;

impl<F: PrimeField> Hint<F> for IsZero {
    fn name(&self) -> &'static str {
        "is_zero"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        check_arity(inputs, 1)?;
        let x = inputs[0];
        Ok(if x.is_zero_vartime() {
            vec![F::ZERO, F::ONE]
        } else {
            vec![x.invert().unwrap_or(F::ZERO), F::ZERO]
        })
    }
}

#[derive(Debug)]
struct Select;

impl<F: PrimeField> Hint<F> for Select {
    fn name(&self) -> &'static str {
        "select"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        check_arity(inputs, 3)?;
        let (cond, x, y) = (inputs[0], inputs[1], inputs[2]);
        Ok(vec![cond * x - cond * y + y])
    }
}

#[derive(Debug)]
struct Bits {
    nb_bits: usize,
}

impl<F: PrimeField> Hint<F> for Bits {
    fn name(&self) -> &'static str {
        "bits"
    }

    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError> {
        check_arity(inputs, 1)?;
        Ok(fe_to_le_bits(&inputs[0], Some(self.nb_bits))
            .into_iter()
            .map(|b| F::from(b as u64))
            .collect())
    }
}

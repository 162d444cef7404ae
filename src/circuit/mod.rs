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

//! The constraint-system interface the gadgets of this crate are built on.
//!
//! A [ConstraintBuilder] allocates native variables, records native relations
//! of degree at most two among them, registers hints (non-deterministic
//! witness computations) and enforces equality and range checks. Nothing else
//! is required from the underlying proof system.
//!
//! Circuit construction is sequential: the order in which gadgets call the
//! builder is the order in which variables and constraints are indexed.

use std::{fmt::Debug, marker::PhantomData, sync::Arc};

use ff::PrimeField;

use crate::error::{Error, HintError};

/// A variable of the native field, allocated by a [ConstraintBuilder].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct AssignedNative<F: PrimeField> {
    index: usize,
    _marker: PhantomData<F>,
}

impl<F: PrimeField> AssignedNative<F> {
    /// Creates a handle to the variable with the given index. Only meant to
    /// be called by [ConstraintBuilder] implementors.
    pub fn from_index(index: usize) -> Self {
        AssignedNative {
            index,
            _marker: PhantomData,
        }
    }

    /// The index of the variable in its builder.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// A native relation of degree at most two:
///
/// `sum_i c_i * x_i * y_i + sum_j d_j * z_j + k`.
///
/// Used as the argument of [ConstraintBuilder::assert_zero].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Expression<F: PrimeField> {
    products: Vec<(F, AssignedNative<F>, AssignedNative<F>)>,
    terms: Vec<(F, AssignedNative<F>)>,
    constant: F,
}

impl<F: PrimeField> Default for Expression<F> {
    fn default() -> Self {
        Expression {
            products: vec![],
            terms: vec![],
            constant: F::ZERO,
        }
    }
}

impl<F: PrimeField> Expression<F> {
    /// The linear expression `constant + sum_i c_i * x_i`.
    pub fn linear(terms: &[(F, AssignedNative<F>)], constant: F) -> Self {
        Expression {
            products: vec![],
            terms: terms.to_vec(),
            constant,
        }
    }

    /// Adds `coeff * x * y` to the expression.
    pub fn product(mut self, coeff: F, x: &AssignedNative<F>, y: &AssignedNative<F>) -> Self {
        self.products.push((coeff, *x, *y));
        self
    }

    /// Adds `coeff * x` to the expression.
    pub fn term(mut self, coeff: F, x: &AssignedNative<F>) -> Self {
        self.terms.push((coeff, *x));
        self
    }

    /// Adds `k` to the constant of the expression.
    pub fn constant(mut self, k: F) -> Self {
        self.constant += k;
        self
    }

    /// The quadratic terms `(c_i, x_i, y_i)`.
    pub fn products(&self) -> &[(F, AssignedNative<F>, AssignedNative<F>)] {
        &self.products
    }

    /// The linear terms `(d_j, z_j)`.
    pub fn terms(&self) -> &[(F, AssignedNative<F>)] {
        &self.terms
    }

    /// The constant term.
    pub fn constant_term(&self) -> F {
        self.constant
    }

    /// All the variables involved in the expression, possibly with
    /// repetitions.
    pub fn variables(&self) -> impl Iterator<Item = &AssignedNative<F>> + '_ {
        self.products
            .iter()
            .flat_map(|(_, x, y)| [x, y])
            .chain(self.terms.iter().map(|(_, z)| z))
    }

    /// Evaluates the expression, given a way of reading variables.
    pub fn evaluate(
        &self,
        value: impl Fn(&AssignedNative<F>) -> Result<F, Error>,
    ) -> Result<F, Error> {
        let mut acc = self.constant;
        for (c, x, y) in self.products.iter() {
            acc += *c * value(x)? * value(y)?;
        }
        for (d, z) in self.terms.iter() {
            acc += *d * value(z)?;
        }
        Ok(acc)
    }
}

/// A hint: a function computing witness values out of other witness values.
///
/// Hints are only evaluated while solving the witness, and their outputs are
/// fresh unconstrained variables: the gadget that registers a hint is
/// responsible for constraining its outputs.
///
/// Implementors must be pure: the outputs may only depend on the inputs and on
/// data captured when the hint was created. Hints may be evaluated several
/// times, or in parallel, and must always return the same outputs.
pub trait Hint<F: PrimeField>: Debug + Send + Sync {
    /// A name identifying the hint in logs and error messages.
    fn name(&self) -> &'static str;

    /// Computes the outputs of the hint on the given inputs.
    fn compute(&self, inputs: &[F]) -> Result<Vec<F>, HintError>;
}

/// Constraint-system capabilities required by the gadgets of this crate.
pub trait ConstraintBuilder<F: PrimeField> {
    /// Allocates a witness variable. The value may be `None` when only the
    /// shape of the circuit is being built.
    fn assign(&mut self, value: Option<F>) -> Result<AssignedNative<F>, Error>;

    /// Allocates a variable fixed to the given constant.
    fn assign_fixed(&mut self, constant: F) -> Result<AssignedNative<F>, Error>;

    /// Registers a hint call on the given inputs, returning `nb_outputs` fresh
    /// unconstrained variables that will be assigned the hint outputs.
    fn hint(
        &mut self,
        hint: Arc<dyn Hint<F>>,
        inputs: &[AssignedNative<F>],
        nb_outputs: usize,
    ) -> Result<Vec<AssignedNative<F>>, Error>;

    /// Enforces that the given expression evaluates to zero.
    fn assert_zero(&mut self, expression: &Expression<F>) -> Result<(), Error>;

    /// Enforces that the two variables are equal.
    fn assert_equal(&mut self, x: &AssignedNative<F>, y: &AssignedNative<F>)
        -> Result<(), Error>;

    /// Enforces that `0 <= x < 2^nb_bits`.
    fn assert_range(&mut self, x: &AssignedNative<F>, nb_bits: u32) -> Result<(), Error>;
}

/// A circuit: a description of the constraints to be built.
pub trait Circuit<F: PrimeField> {
    /// Builds the constraints of the circuit.
    fn synthesize(&self, builder: &mut impl ConstraintBuilder<F>) -> Result<(), Error>;
}

#[cfg(test)]
mod tests {
    use ff::Field;
    use halo2curves::bn256::Fr;

    use super::*;

    #[test]
    fn test_expression_evaluation() {
        let x = AssignedNative::<Fr>::from_index(0);
        let y = AssignedNative::<Fr>::from_index(1);
        let values = [Fr::from(3), Fr::from(5)];
        let read = |v: &AssignedNative<Fr>| Ok(values[v.index()]);

        // 2 * x * y - 4 * y + 7 = 30 - 20 + 7
        let expr = Expression::linear(&[(-Fr::from(4), y)], Fr::from(7)).product(Fr::from(2), &x, &y);
        assert_eq!(expr.evaluate(read).unwrap(), Fr::from(17));
        assert_eq!(expr.variables().count(), 3);

        let expr = expr.constant(-Fr::from(17));
        assert_eq!(expr.evaluate(read).unwrap(), Fr::ZERO);
    }
}

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

//! Arithmetic instructions interface.
//!
//! It provides functions for performing arithmetic operations between assigned
//! values in the circuit.
//!
//! This trait is parametrized by a generic `Assigned` (required to implement
//! [InnerValue]) which defines the type over which the arithmetic operations
//! take place.

use std::fmt::Debug;

use ff::PrimeField;

use crate::{
    circuit::ConstraintBuilder,
    error::Error,
    instructions::{AssertionInstructions, AssignmentInstructions},
    types::InnerValue,
};

/// The set of circuit instructions for arithmetic operations.
pub trait ArithInstructions<F, Assigned>:
    Clone + Debug + AssignmentInstructions<F, Assigned> + AssertionInstructions<F, Assigned>
where
    F: PrimeField,
    Assigned::Element: From<u64>,
    Assigned: InnerValue,
{
    /// Addition of many elements, given a slice of terms of the form
    /// `(coeff_i, x_i)` and a constant `k`, returns
    /// `k + (sum_i coeff_i * x_i)`.
    ///
    /// This function is potentially more efficient than folding over
    /// [add](ArithInstructions::add) and
    /// [mul_by_constant](ArithInstructions::mul_by_constant).
    fn linear_combination(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        terms: &[(Assigned::Element, Assigned)],
        constant: Assigned::Element,
    ) -> Result<Assigned, Error>;

    /// Addition.
    fn add(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        y: &Assigned,
    ) -> Result<Assigned, Error> {
        self.linear_combination(
            builder,
            &[
                (Assigned::Element::from(1), x.clone()),
                (Assigned::Element::from(1), y.clone()),
            ],
            Assigned::Element::from(0),
        )
    }

    /// Subtraction.
    fn sub(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        y: &Assigned,
    ) -> Result<Assigned, Error>;

    /// Negation.
    fn neg(&self, builder: &mut impl ConstraintBuilder<F>, x: &Assigned)
        -> Result<Assigned, Error>;

    /// Multiplication, possibly with an additional multiplying constant.
    fn mul(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        y: &Assigned,
        multiplying_constant: Option<Assigned::Element>,
    ) -> Result<Assigned, Error>;

    /// Division. The circuit is unsatisfiable if the divisor is zero.
    fn div(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        y: &Assigned,
    ) -> Result<Assigned, Error>;

    /// Multiplicative inverse. The circuit is unsatisfiable if the input is
    /// zero.
    fn inv(&self, builder: &mut impl ConstraintBuilder<F>, x: &Assigned)
        -> Result<Assigned, Error>;

    /// Addition of a constant.
    fn add_constant(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        constant: Assigned::Element,
    ) -> Result<Assigned, Error> {
        self.linear_combination(builder, &[(Assigned::Element::from(1), x.clone())], constant)
    }

    /// Multiplication by a constant.
    fn mul_by_constant(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        constant: Assigned::Element,
    ) -> Result<Assigned, Error> {
        self.linear_combination(
            builder,
            &[(constant, x.clone())],
            Assigned::Element::from(0),
        )
    }

    /// Squaring.
    fn square(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
    ) -> Result<Assigned, Error> {
        self.mul(builder, x, x, None)
    }
}

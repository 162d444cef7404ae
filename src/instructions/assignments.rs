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

//! Assignment instructions interface.
//!
//! It provides functions for assigning fixed and secret values into the
//! circuit.
//!
//! This trait is parametrized by the resulting `Assigned` type (a generic of
//! this trait that implements [InnerValue]). The assignment functions take an
//! `Assigned::Element` as input and return an `Assigned` value.

use ff::PrimeField;

use crate::{circuit::ConstraintBuilder, error::Error, types::InnerValue};

/// The set of circuit instructions for assignment operations.
pub trait AssignmentInstructions<F, Assigned>
where
    F: PrimeField,
    Assigned: InnerValue,
{
    /// Assigns an element as a private input to the circuit. The value is
    /// `None` when the circuit is built without a witness.
    ///
    /// Implementations must constrain the result to be a well-formed
    /// `Assigned` (e.g. booleanity for bits, limb ranges for emulated
    /// field elements).
    fn assign(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        value: Option<Assigned::Element>,
    ) -> Result<Assigned, Error>;

    /// Assigns a fixed (constant) element.
    fn assign_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        constant: Assigned::Element,
    ) -> Result<Assigned, Error>;

    /// Assigns several elements as private inputs to the circuit.
    fn assign_many(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        values: &[Option<Assigned::Element>],
    ) -> Result<Vec<Assigned>, Error> {
        values
            .iter()
            .map(|v| self.assign(builder, v.clone()))
            .collect::<Result<Vec<Assigned>, Error>>()
    }

    /// Assigns several fixed elements to the circuit.
    fn assign_many_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        constants: &[Assigned::Element],
    ) -> Result<Vec<Assigned>, Error> {
        constants
            .iter()
            .map(|c| self.assign_fixed(builder, c.clone()))
            .collect::<Result<Vec<Assigned>, Error>>()
    }
}

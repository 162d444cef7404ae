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

//! Assertion instructions interface.
//!
//! It provides functions for equality assertions between values of type
//! `Assigned` (a generic of this trait that implements [InnerValue]), and
//! between `Assigned` elements and fixed values of type `Assigned::Element`.
//!
//! For emulated field elements equality is equality modulo the foreign
//! modulus, which is why implementors may need to canonicalize their inputs
//! first.

use ff::PrimeField;

use crate::{circuit::ConstraintBuilder, error::Error, types::InnerValue};

/// The set of circuit instructions for assertion operations.
pub trait AssertionInstructions<F, Assigned>
where
    F: PrimeField,
    Assigned: InnerValue,
{
    /// Ensures that the given assigned elements are the same.
    fn assert_equal(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        y: &Assigned,
    ) -> Result<(), Error>;

    /// Ensures that the given assigned element is equal to the given constant.
    fn assert_equal_to_fixed(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        constant: Assigned::Element,
    ) -> Result<(), Error>;
}

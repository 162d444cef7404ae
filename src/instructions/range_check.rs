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

//! Range-check instructions interface.

use ff::PrimeField;

use crate::{circuit::ConstraintBuilder, error::Error, types::InnerValue};

/// The set of circuit instructions for range checks against powers of two.
pub trait RangeCheckInstructions<F, Assigned>
where
    F: PrimeField,
    Assigned: InnerValue,
{
    /// Assigns a value that is asserted to be in the range `[0, 2^nb_bits)`.
    fn assign_lower_than_pow2(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        value: Option<Assigned::Element>,
        nb_bits: u32,
    ) -> Result<Assigned, Error>;

    /// Asserts that the given assigned value is in the range `[0, 2^nb_bits)`.
    fn assert_lower_than_pow2(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        nb_bits: u32,
    ) -> Result<(), Error>;
}

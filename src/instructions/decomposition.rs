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

//! Decomposition instructions interface.
//!
//! It provides functions for converting assigned values to and from their
//! little-endian bit representation.

use ff::PrimeField;

use crate::{
    circuit::ConstraintBuilder,
    error::Error,
    types::{AssignedBit, InnerValue},
};

/// The set of circuit instructions for bit decompositions.
pub trait DecompositionInstructions<F, Assigned>
where
    F: PrimeField,
    Assigned: InnerValue,
{
    /// Decomposes the given element into little-endian bits.
    ///
    /// If `nb_bits` is `None`, the output has as many bits as necessary to
    /// represent any element of the underlying field. Otherwise the output has
    /// exactly `nb_bits` bits and the circuit is unsatisfiable if the value
    /// does not fit in them.
    ///
    /// When the decomposition uses as many bits as the modulus of the
    /// underlying field, several bit strings may represent the same element;
    /// `enforce_canonical` restricts the result to the one representing an
    /// integer below the modulus.
    fn assigned_to_le_bits(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        x: &Assigned,
        nb_bits: Option<usize>,
        enforce_canonical: bool,
    ) -> Result<Vec<AssignedBit<F>>, Error>;

    /// The element represented by the given little-endian bits.
    fn assigned_from_le_bits(
        &self,
        builder: &mut impl ConstraintBuilder<F>,
        bits: &[AssignedBit<F>],
    ) -> Result<Assigned, Error>;
}

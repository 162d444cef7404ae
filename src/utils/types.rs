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

use core::fmt::Debug;

use ff::PrimeField;
#[cfg(any(test, feature = "testing"))]
use rand::RngCore;

use crate::{circuit::AssignedNative, field::native::AssignedBit};

/// Trait relating assigned circuit elements to their off-circuit type.
///
/// Values are only known while solving the witness, so assigned elements do
/// not carry them; this trait only fixes the type instructions use for
/// witness values and constants.
pub trait InnerValue: Clone + Debug {
    /// Represents the unassigned type corresponding to the [InnerValue]
    type Element: Clone + Debug;
}

/// Trait for accessing constant values of the inner value type of an assigned
/// element.
pub trait InnerConstants: InnerValue {
    /// The zero of Self::Element (additive identity).
    fn inner_zero() -> Self::Element;

    /// The unit of Self::Element (multiplicative identity and/or additive
    /// generator).
    fn inner_one() -> Self::Element;
}

impl<F: PrimeField> InnerValue for AssignedNative<F> {
    type Element = F;
}

impl<F: PrimeField> InnerConstants for AssignedNative<F> {
    fn inner_zero() -> F {
        F::ZERO
    }

    fn inner_one() -> F {
        F::ONE
    }
}

impl<F: PrimeField> InnerValue for AssignedBit<F> {
    type Element = bool;
}

impl<F: PrimeField> InnerConstants for AssignedBit<F> {
    fn inner_zero() -> bool {
        false
    }

    fn inner_one() -> bool {
        true
    }
}

#[cfg(any(test, feature = "testing"))]
/// A trait for types that can be sampled at random. This should only
/// be used for testing.
pub trait Sampleable: InnerValue {
    /// Returns a random inner element, given a random number generator.
    fn sample_inner(rng: impl RngCore) -> Self::Element;
}

#[cfg(any(test, feature = "testing"))]
impl<F: PrimeField> Sampleable for AssignedNative<F> {
    fn sample_inner(rng: impl RngCore) -> F {
        F::random(rng)
    }
}

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

//! Implementation of the native field gadget. The [NativeGadget] implements
//! every instruction over native values out of the relations, hints and range
//! checks offered by a [ConstraintBuilder](crate::circuit::ConstraintBuilder).
mod native_gadget;

use ff::PrimeField;
pub use native_gadget::*;

use crate::circuit::AssignedNative;

/// This wrapper type on `AssignedNative<F>` is designed to enforce type safety
/// on assigned bits. It prevents the user from creating an `AssignedBit`
/// without using the designated entry points, which guarantee (with
/// constraints) that the assigned value is indeed 0 or 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[must_use]
pub struct AssignedBit<F: PrimeField>(pub(crate) AssignedNative<F>);

impl<F: PrimeField> From<AssignedBit<F>> for AssignedNative<F> {
    fn from(bit: AssignedBit<F>) -> Self {
        bit.0
    }
}

impl<F: PrimeField> From<&AssignedBit<F>> for AssignedNative<F> {
    fn from(bit: &AssignedBit<F>) -> Self {
        bit.0
    }
}

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

//! Native instructions interface.
//!
//! The umbrella trait of every instruction over native values. Emulated
//! field chips are generic over an implementor of this trait.

use std::fmt::Debug;

use ff::PrimeField;

use crate::{
    instructions::{
        ArithInstructions, AssertionInstructions, AssignmentInstructions,
        ControlFlowInstructions, DecompositionInstructions, RangeCheckInstructions,
        ZeroInstructions,
    },
    types::{AssignedBit, AssignedNative},
};

/// The set of all native instructions.
pub trait NativeInstructions<F>:
    AssignmentInstructions<F, AssignedNative<F>>
    + AssignmentInstructions<F, AssignedBit<F>>
    + AssertionInstructions<F, AssignedNative<F>>
    + ArithInstructions<F, AssignedNative<F>>
    + ZeroInstructions<F, AssignedNative<F>>
    + ControlFlowInstructions<F, AssignedNative<F>>
    + DecompositionInstructions<F, AssignedNative<F>>
    + RangeCheckInstructions<F, AssignedNative<F>>
    + Clone
    + Debug
where
    F: PrimeField,
{
}

impl<F, T> NativeInstructions<F> for T
where
    F: PrimeField,
    T: AssignmentInstructions<F, AssignedNative<F>>
        + AssignmentInstructions<F, AssignedBit<F>>
        + AssertionInstructions<F, AssignedNative<F>>
        + ArithInstructions<F, AssignedNative<F>>
        + ZeroInstructions<F, AssignedNative<F>>
        + ControlFlowInstructions<F, AssignedNative<F>>
        + DecompositionInstructions<F, AssignedNative<F>>
        + RangeCheckInstructions<F, AssignedNative<F>>
        + Clone
        + Debug,
{
}

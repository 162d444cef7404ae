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

//! Set of instructions interfaces.
//!
//! Every instruction takes the [ConstraintBuilder](crate::circuit::ConstraintBuilder)
//! constraints are recorded into, and is implemented both for native values
//! ([AssignedNative](crate::types::AssignedNative)) and, where it makes sense,
//! for emulated foreign-field values
//! ([AssignedField](crate::types::AssignedField)).
pub mod arithmetic;
pub mod assertions;
pub mod assignments;
pub mod control_flow;
pub mod decomposition;
pub mod native;
pub mod range_check;
pub mod zero;

pub use arithmetic::ArithInstructions;
pub use assertions::AssertionInstructions;
pub use assignments::AssignmentInstructions;
pub use control_flow::ControlFlowInstructions;
pub use decomposition::DecompositionInstructions;
pub use native::NativeInstructions;
pub use range_check::RangeCheckInstructions;
pub use zero::ZeroInstructions;

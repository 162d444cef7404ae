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

//! Emulated (non-native) field arithmetic for Midnight circuits.

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod circuit;
pub mod dev;
mod error;
pub mod field;
pub mod instructions;
mod utils;

pub use error::{Error, HintError};
// Re-exporting the curves crate so that callers use the same field types.
pub use halo2curves;

/// Tools useful for testing.
#[cfg(any(test, feature = "testing"))]
pub mod testing_utils {
    pub use crate::utils::types::Sampleable;
}

/// Types for assigned circuit values and traits for treating with them
/// generically.
pub mod types {
    pub use crate::{
        circuit::AssignedNative,
        field::{foreign::AssignedField, native::AssignedBit},
        utils::types::{InnerConstants, InnerValue},
    };
}

/// Conversions between field elements and big integers.
pub mod conversions {
    pub use crate::utils::util::{
        big_to_fe, bigint_to_fe, fe_to_big, fe_to_bigint, fe_to_le_bits, modulus,
    };
}

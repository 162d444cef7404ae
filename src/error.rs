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

//! Error types.

use thiserror::Error;

/// Errors raised while building a circuit or while solving its witness.
///
/// A circuit that is built successfully but has no satisfying witness is *not*
/// reported through this type: unsatisfiability is detected by verifying the
/// constraint system (see [crate::dev::MockBuilder::verify]).
#[derive(Debug, Error)]
pub enum Error {
    /// The foreign field cannot be emulated over the native field with the
    /// requested (or any) limb layout.
    #[error("invalid emulation parameters: {0}")]
    InvalidParams(String),

    /// An element has a number of limbs that is incompatible with the
    /// emulation parameters of the chip it was given to.
    #[error("limb count mismatch: at most {expected} limbs are supported, got {got}")]
    LimbCountMismatch {
        /// Largest number of limbs supported by the chip.
        expected: usize,
        /// Number of limbs of the offending element.
        got: usize,
    },

    /// A bit decomposition (or recomposition) involves more bits than the
    /// target can represent.
    #[error("too many bits: at most {max} are supported, got {got}")]
    TooManyBits {
        /// Maximum number of bits.
        max: usize,
        /// Requested number of bits.
        got: usize,
    },

    /// A limb identity could wrap around the native modulus.
    #[error("native wrap-around: {0}")]
    NativeWrapAround(String),

    /// A variable that was not allocated by this builder.
    #[error("unknown variable {0}")]
    UnknownVariable(usize),

    /// A witness input was allocated without a value and the circuit is being
    /// solved.
    #[error("missing witness value for variable {0}")]
    MissingWitness(usize),

    /// A hint could not be evaluated during witness solving.
    #[error("hint {name} failed: {source}")]
    Hint {
        /// Name of the failing hint.
        name: &'static str,
        /// Reason of the failure.
        source: HintError,
    },
}

/// Errors raised by hint functions.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HintError {
    /// The hint received an unexpected number of inputs.
    #[error("expected {expected} inputs, got {got}")]
    InputArity {
        /// Expected number of inputs.
        expected: usize,
        /// Number of inputs given.
        got: usize,
    },

    /// The hint produced an unexpected number of outputs.
    #[error("expected {expected} outputs, got {got}")]
    OutputArity {
        /// Number of outputs requested by the caller.
        expected: usize,
        /// Number of outputs produced.
        got: usize,
    },

    /// The inputs do not have the magnitude the hint was registered for.
    #[error("malformed input: {0}")]
    Malformed(String),
}

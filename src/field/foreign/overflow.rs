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

//! Overflow accounting.
//!
//! The overflow of an element is the number of bits its limbs may hold beyond
//! the limb width `LOG2_BASE`. This module offers the closed-form rules
//! describing how overflows grow through arithmetic, and [LimbBound], the
//! exact bound tracked by [AssignedField](super::AssignedField) from which
//! the overflow of an element is derived.
//!
//! Tracking the exact bound rather than the closed-form overflow delays
//! reductions: summing `k` reduced elements yields an overflow of
//! `ceil(log2(k))` instead of `k - 1`. The derived overflow is never larger
//! than the one given by the closed-form rules.

use num_bigint::BigUint;
use num_traits::One;

use super::util::ceil_log2;

/// Overflow of `a + b`, for `a` and `b` of overflows `o1` and `o2`.
pub fn add_overflow(o1: u32, o2: u32) -> u32 {
    o1.max(o2) + 1
}

/// Overflow of `a - b`, for `a` and `b` of overflows `o1` and `o2`. The
/// subtrahend is compensated by a padding of `2^(LOG2_BASE + o2)` per limb,
/// which costs one more bit than an addition.
pub fn sub_overflow(o1: u32, o2: u32) -> u32 {
    o1.max(o2 + 1) + 1
}

/// Overflow of `k * a`, for `a` of overflow `o`.
pub fn scalar_mul_overflow(o: u32, k: &BigUint) -> u32 {
    o + k.bits() as u32
}

/// Overflow of the schoolbook product of `a` and `b`, of overflows `o1` and
/// `o2` and at most `nb_limbs` limbs each.
pub fn mul_overflow(o1: u32, o2: u32, log2_base: u32, nb_limbs: usize) -> u32 {
    o1 + o2 + log2_base + ceil_log2(nb_limbs)
}

/// Whether an element of overflow `o` must be reduced before it is used.
pub fn must_reduce(o: u32, max_overflow: u32) -> bool {
    o > max_overflow
}

/// An inclusive upper bound on the limbs of an element.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LimbBound(BigUint);

impl LimbBound {
    /// The bound `max`.
    pub fn new(max: BigUint) -> Self {
        LimbBound(max)
    }

    /// The bound of limbs of `nb_bits` bits, `2^nb_bits - 1`.
    pub fn from_bits(nb_bits: u32) -> Self {
        LimbBound((BigUint::one() << nb_bits) - 1u32)
    }

    /// The largest value a limb may take.
    pub fn max(&self) -> &BigUint {
        &self.0
    }

    /// Number of bits needed by the largest limb.
    pub fn nb_bits(&self) -> u32 {
        self.0.bits() as u32
    }

    /// The overflow of limbs bounded by `self`: the smallest `o` such that
    /// every limb is lower than `2^(log2_base + o)`.
    pub fn overflow(&self, log2_base: u32) -> u32 {
        self.nb_bits().saturating_sub(log2_base)
    }

    /// Bound of the sum of limbs bounded by `self` and `other`.
    pub fn add(&self, other: &Self) -> Self {
        LimbBound(&self.0 + &other.0)
    }

    /// Bound of limbs bounded by `self` multiplied by `k`.
    pub fn scale(&self, k: &BigUint) -> Self {
        LimbBound(&self.0 * k)
    }

    /// Bound of the limbs of a schoolbook product where every result limb
    /// accumulates at most `fan_in` products.
    pub fn mul(&self, other: &Self, fan_in: usize) -> Self {
        LimbBound(&self.0 * &other.0 * BigUint::from(fan_in))
    }
}

#[cfg(test)]
mod tests {
    use num_traits::Zero;

    use super::*;

    #[test]
    fn test_closed_form_rules() {
        assert_eq!(add_overflow(0, 0), 1);
        assert_eq!(add_overflow(3, 1), 4);
        assert_eq!(sub_overflow(0, 0), 2);
        assert_eq!(sub_overflow(5, 1), 6);
        assert_eq!(scalar_mul_overflow(2, &BigUint::from(5u32)), 5);
        assert_eq!(mul_overflow(0, 0, 16, 4), 18);
        assert_eq!(mul_overflow(1, 2, 64, 12), 71);
        assert!(!must_reduce(185, 185));
        assert!(must_reduce(186, 185));
    }

    #[test]
    fn test_exact_bounds_never_exceed_closed_forms() {
        let b = 16;
        let reduced = LimbBound::from_bits(b);
        assert_eq!(reduced.overflow(b), 0);

        // Summing k reduced elements.
        let mut acc = reduced.clone();
        let mut closed_form = 0;
        for k in 2..=64usize {
            acc = acc.add(&reduced);
            closed_form = add_overflow(closed_form, 0);
            assert_eq!(acc.overflow(b), ceil_log2(k));
            assert!(acc.overflow(b) <= closed_form);
        }

        let k = BigUint::from(1000u32);
        assert!(reduced.scale(&k).overflow(b) <= scalar_mul_overflow(0, &k));

        let product = reduced.mul(&reduced, 4);
        assert_eq!(product.overflow(b), mul_overflow(0, 0, b, 4));

        let zero = LimbBound::new(BigUint::zero());
        assert_eq!(zero.nb_bits(), 0);
        assert_eq!(zero.overflow(b), 0);
    }
}

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

//! Parameters of the emulation of a foreign field over a native one.
//!
//! A foreign element is represented by `NB_LIMBS` native limbs of
//! `LOG2_BASE` bits each (in little-endian), possibly exceeding that width
//! by an *overflow* that accumulates with unreduced arithmetic. The
//! parameters are sound for a native field when:
//!  - the foreign modulus fits in `NB_LIMBS * LOG2_BASE` bits, and
//!  - the product of two reduced elements can be accumulated limb-wise
//!    without exceeding the maximum overflow, which leaves 4 bits of
//!    head-room below the native capacity for carry identities.

use std::fmt::Debug;

use ff::PrimeField;
use num_bigint::BigUint;
use num_traits::Num;

use super::util::{big_to_limbs, ceil_log2};
use crate::{error::Error, utils::util::modulus};

/// Largest number of limbs supported for a (reduced) foreign element.
pub const MAX_NB_LIMBS: u32 = 64;

/// Bits of native capacity reserved for the carries of limb identities.
const CARRY_HEADROOM: u32 = 4;

/// A foreign field emulated with a fixed limb layout. Implementors are
/// zero-sized marker types, one per foreign field.
pub trait FieldEmulationParams: Clone + Debug + Send + Sync + 'static {
    /// Name of the foreign field, for logs.
    const NAME: &'static str;

    /// Number of bits of a (non-overflowed) limb.
    const LOG2_BASE: u32;

    /// Number of limbs of a reduced element.
    const NB_LIMBS: u32;

    /// The foreign modulus.
    fn modulus() -> BigUint;

    /// The emulation parameters over the native field `F`, validated.
    fn params<F: PrimeField>() -> Result<EmulationParams, Error> {
        EmulationParams::new::<F>(Self::modulus(), Self::LOG2_BASE, Self::NB_LIMBS)
    }
}

/// Validated parameters for emulating a foreign field over a given native
/// field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmulationParams {
    modulus: BigUint,
    log2_base: u32,
    nb_limbs: u32,
    max_overflow: u32,
}

impl EmulationParams {
    /// Validates the given limb layout for emulating arithmetic modulo
    /// `modulus` over the native field `F`.
    pub fn new<F: PrimeField>(
        modulus: BigUint,
        log2_base: u32,
        nb_limbs: u32,
    ) -> Result<Self, Error> {
        if modulus < BigUint::from(2u32) {
            return Err(Error::InvalidParams(format!(
                "the modulus must be at least 2, got {modulus}"
            )));
        }
        if log2_base == 0 || nb_limbs == 0 || nb_limbs > MAX_NB_LIMBS {
            return Err(Error::InvalidParams(format!(
                "{nb_limbs} limbs of {log2_base} bits (at most {MAX_NB_LIMBS} limbs)"
            )));
        }
        let modulus_bits = modulus.bits();
        if (log2_base as u64) * (nb_limbs as u64) < modulus_bits {
            return Err(Error::InvalidParams(format!(
                "a {modulus_bits}-bit modulus does not fit in {nb_limbs} limbs of {log2_base} bits"
            )));
        }
        let max_overflow = F::CAPACITY
            .checked_sub(CARRY_HEADROOM + log2_base)
            .ok_or_else(|| {
                Error::InvalidParams(format!(
                    "{log2_base}-bit limbs do not fit in a {}-bit native field",
                    F::NUM_BITS
                ))
            })?;
        // A product of reduced elements must not need a reduction.
        if log2_base + ceil_log2(nb_limbs as usize) > max_overflow {
            return Err(Error::InvalidParams(format!(
                "products of {nb_limbs} limbs of {log2_base} bits exceed the maximum overflow \
                 ({max_overflow}) of a {}-bit native field",
                F::NUM_BITS
            )));
        }

        Ok(EmulationParams {
            modulus,
            log2_base,
            nb_limbs,
            max_overflow,
        })
    }

    /// The canonical limb layout for the given modulus: the smallest number
    /// of limbs (up to [MAX_NB_LIMBS]) for which a sound limb width exists.
    pub fn from_modulus<F: PrimeField>(modulus: BigUint) -> Result<Self, Error> {
        let modulus_bits = modulus.bits() as u32;
        (1..=MAX_NB_LIMBS)
            .find_map(|nb_limbs| {
                let log2_base = modulus_bits.div_ceil(nb_limbs);
                Self::new::<F>(modulus.clone(), log2_base, nb_limbs).ok()
            })
            .ok_or_else(|| {
                Error::InvalidParams(format!(
                    "no sound limb layout for a {modulus_bits}-bit modulus over a {}-bit native \
                     field",
                    F::NUM_BITS
                ))
            })
    }

    /// The foreign modulus.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of bits of a (non-overflowed) limb.
    pub fn log2_base(&self) -> u32 {
        self.log2_base
    }

    /// Number of limbs of a reduced element.
    pub fn nb_limbs(&self) -> u32 {
        self.nb_limbs
    }

    /// Largest overflow a limb may have before a reduction is needed.
    pub fn max_overflow(&self) -> u32 {
        self.max_overflow
    }

    /// Largest number of limbs of an element, i.e. the width of a product.
    pub fn max_element_limbs(&self) -> usize {
        2 * self.nb_limbs as usize - 1
    }

    /// The limbs of the modulus.
    pub fn modulus_limbs(&self) -> Vec<BigUint> {
        big_to_limbs(self.nb_limbs, self.log2_base, &self.modulus)
    }
}

macro_rules! curve_field {
    ($(#[$doc:meta])* $name:ident, $field:ty) => {
        $(#[$doc])*
        #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
        pub struct $name;

        impl FieldEmulationParams for $name {
            const NAME: &'static str = stringify!($name);
            const LOG2_BASE: u32 = 64;
            const NB_LIMBS: u32 = 4;
            fn modulus() -> BigUint {
                modulus::<$field>()
            }
        }
    };
}

curve_field!(
    /// Base field of secp256k1.
    Secp256k1Fp,
    halo2curves::secp256k1::Fp
);
curve_field!(
    /// Scalar field of secp256k1.
    Secp256k1Fq,
    halo2curves::secp256k1::Fq
);
curve_field!(
    /// Base field of P-256 (secp256r1).
    P256Fp,
    halo2curves::secp256r1::Fp
);
curve_field!(
    /// Scalar field of P-256 (secp256r1).
    P256Fq,
    halo2curves::secp256r1::Fq
);
curve_field!(
    /// Base field of BN254.
    BN254Fp,
    halo2curves::bn256::Fq
);
curve_field!(
    /// Scalar field of BN254.
    BN254Fr,
    halo2curves::bn256::Fr
);

/// Base field of BLS12-381.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BLS12381Fp;

impl FieldEmulationParams for BLS12381Fp {
    const NAME: &'static str = "BLS12381Fp";
    const LOG2_BASE: u32 = 64;
    const NB_LIMBS: u32 = 6;
    fn modulus() -> BigUint {
        BigUint::from_str_radix(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab",
            16,
        )
        .expect("valid hexadecimal constant")
    }
}

/// Base field of BW6-761.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BW6761Fp;

impl FieldEmulationParams for BW6761Fp {
    const NAME: &'static str = "BW6761Fp";
    const LOG2_BASE: u32 = 64;
    const NB_LIMBS: u32 = 12;
    fn modulus() -> BigUint {
        BigUint::from_str_radix(
            "122e824fb83ce0ad187c94004faff3eb926186a81d14688528275ef8087be41707ba638e584e91903cebaff25b423048689c8ed12f9fd9071dcd3dc73ebff2e98a116c25667a8f8160cf8aeeaf0a437e6913e6870000082f49d00000000008b",
            16,
        )
        .expect("valid hexadecimal constant")
    }
}

/// The Goldilocks field, of modulus `2^64 - 2^32 + 1`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Goldilocks;

impl FieldEmulationParams for Goldilocks {
    const NAME: &'static str = "Goldilocks";
    const LOG2_BASE: u32 = 64;
    const NB_LIMBS: u32 = 1;
    fn modulus() -> BigUint {
        BigUint::from(0xffff_ffff_0000_0001u64)
    }
}

/// A small field of modulus `2^64 - 59` split in 4 limbs of 16 bits, which
/// exercises multi-limb arithmetic with small values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Toy64;

impl FieldEmulationParams for Toy64 {
    const NAME: &'static str = "Toy64";
    const LOG2_BASE: u32 = 16;
    const NB_LIMBS: u32 = 4;
    fn modulus() -> BigUint {
        BigUint::from(0xffff_ffff_ffff_ffc5u64)
    }
}

#[cfg(test)]
mod tests {
    use halo2curves::bn256::Fr;
    use num_traits::One;

    use super::*;

    fn check<P: FieldEmulationParams>(expected_bits: u64) {
        let params = P::params::<Fr>().unwrap();
        assert_eq!(params.modulus().bits(), expected_bits, "{}", P::NAME);
        assert_eq!(params.max_overflow(), 253 - 4 - P::LOG2_BASE);
        assert_eq!(params.modulus_limbs().len(), P::NB_LIMBS as usize);
    }

    #[test]
    fn test_named_fields() {
        check::<Secp256k1Fp>(256);
        check::<Secp256k1Fq>(256);
        check::<P256Fp>(256);
        check::<P256Fq>(256);
        check::<BN254Fp>(254);
        check::<BN254Fr>(254);
        check::<BLS12381Fp>(381);
        check::<BW6761Fp>(761);
        check::<Goldilocks>(64);
        check::<Toy64>(64);

        assert_eq!(
            Toy64::modulus() + BigUint::from(59u32),
            BigUint::one() << 64
        );
    }

    #[test]
    fn test_invalid_params() {
        let p = Toy64::modulus();
        let invalid = [
            (BigUint::one(), 16, 4),
            (p.clone(), 0, 4),
            (p.clone(), 16, 0),
            (p.clone(), 1, 65),
            // 48 bits are not enough for a 64-bit modulus.
            (p.clone(), 16, 3),
            // Limbs wider than the native field.
            (p.clone(), 254, 1),
            // Products of 128-bit limbs exceed the maximum overflow (121).
            (p, 128, 1),
        ];
        for (modulus, log2_base, nb_limbs) in invalid {
            assert!(matches!(
                EmulationParams::new::<Fr>(modulus, log2_base, nb_limbs),
                Err(Error::InvalidParams(_))
            ));
        }
    }

    #[test]
    fn test_from_modulus() {
        let params = EmulationParams::from_modulus::<Fr>(Toy64::modulus()).unwrap();
        assert_eq!((params.nb_limbs(), params.log2_base()), (1, 64));

        // One limb of 256 bits and two limbs of 128 bits are both too wide.
        let params = EmulationParams::from_modulus::<Fr>(Secp256k1Fp::modulus()).unwrap();
        assert_eq!((params.nb_limbs(), params.log2_base()), (3, 86));

        let params = EmulationParams::from_modulus::<Fr>(BW6761Fp::modulus()).unwrap();
        assert!(params.log2_base() * params.nb_limbs() >= 761);

        // No layout of at most 64 limbs can hold an 8000-bit modulus.
        let huge = (BigUint::one() << 7999) + BigUint::one();
        assert!(matches!(
            EmulationParams::from_modulus::<Fr>(huge),
            Err(Error::InvalidParams(_))
        ));
    }
}

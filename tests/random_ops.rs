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

//! Random sequences of operations over secp256k1's base field, and operations
//! on elements of extreme magnitude, checked against the same computation over
//! big integers.

use halo2curves::bn256::Fr;
use midnight_emulated::{
    conversions::{big_to_fe, fe_to_big},
    dev::MockBuilder,
    field::{
        foreign::params::{BW6761Fp, FieldEmulationParams, Secp256k1Fp, Toy64},
        native::RangeCheckMode,
        FieldChip, NativeGadget,
    },
    instructions::*,
    types::{AssignedBit, AssignedField, AssignedNative},
};
use num_bigint::{BigUint, RandBigInt};
use num_traits::{One, Zero};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

type Element = AssignedField<Fr, Secp256k1Fp>;

// Builds `nb_ops` random operations on a pool of elements, returning the
// builder together with every element and its expected value.
fn random_ops(
    mode: RangeCheckMode,
    nb_ops: usize,
    seed: u64,
) -> (MockBuilder<Fr>, Vec<(Element, BigUint)>) {
    let p = Secp256k1Fp::modulus();
    let gadget = NativeGadget::new(mode);
    let chip = FieldChip::<Fr, Secp256k1Fp, NativeGadget<Fr>>::new(&gadget).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut builder = MockBuilder::new();

    let mut pool: Vec<(Element, BigUint)> = (0..4)
        .map(|_| {
            let v = rng.gen_biguint_below(&p);
            (chip.assign(&mut builder, Some(v.clone())).unwrap(), v)
        })
        .collect();

    for _ in 0..nb_ops {
        let (x, vx) = pool[rng.gen_range(0..pool.len())].clone();
        let (y, vy) = pool[rng.gen_range(0..pool.len())].clone();
        let b = &mut builder;
        let next = match rng.gen_range(0..7) {
            0 => (chip.add(b, &x, &y).unwrap(), (&vx + &vy) % &p),
            1 => (chip.sub(b, &x, &y).unwrap(), (&p + &vx - &vy) % &p),
            2 => (chip.mul(b, &x, &y, None).unwrap(), (&vx * &vy) % &p),
            3 => (chip.neg(b, &x).unwrap(), (&p - &vx) % &p),
            4 => {
                let k = rng.gen_biguint(70);
                let expected = (&vx * &k) % &p;
                (chip.mul_by_constant(b, &x, k).unwrap(), expected)
            }
            5 => {
                if vy.is_zero() {
                    continue;
                }
                let y_inv = vy.modpow(&(&p - 2u32), &p);
                (chip.div(b, &x, &y).unwrap(), (&vx * y_inv) % &p)
            }
            _ => {
                let c = rng.gen_bool(0.5);
                let cond: AssignedBit<Fr> =
                    AssignmentInstructions::<Fr, AssignedBit<Fr>>::assign(&gadget, b, Some(c))
                        .unwrap();
                let expected = if c { vx.clone() } else { vy.clone() };
                (chip.select(b, &cond, &x, &y).unwrap(), expected)
            }
        };
        pool.push(next);
    }
    (builder, pool)
}

fn check_pool(builder: &MockBuilder<Fr>, pool: &[(Element, BigUint)]) {
    let p = Secp256k1Fp::modulus();
    builder.assert_satisfied();
    let witness = builder.solve().unwrap();
    for (x, expected) in pool {
        assert!(x.nb_limbs() <= 7);
        assert_eq!(&(witness.field_value(x) % &p), expected);
        for limb in x.limbs() {
            assert!(fe_to_big(witness.value(limb)) <= *x.limb_bound().max());
        }
    }
}

#[test]
fn random_operations() {
    let (builder, pool) = random_ops(RangeCheckMode::Native, 80, 0xc0ffee);
    check_pool(&builder, &pool);

    // Both unreduced and reduced elements appear along the way.
    assert!(pool.iter().any(|(x, _)| x.overflow() > 0));
    assert!(pool.iter().any(|(x, _)| x.is_canonical()));
}

#[test]
fn random_operations_with_plain_range_checks() {
    let (builder, pool) = random_ops(RangeCheckMode::Plain, 15, 0xc0ffee);
    check_pool(&builder, &pool);
    assert_eq!(builder.cost().nb_range_checks, 0);
}

#[test]
fn circuits_are_deterministic() {
    let (first, _) = random_ops(RangeCheckMode::Native, 30, 0xc0ffee);
    let (second, _) = random_ops(RangeCheckMode::Native, 30, 0xc0ffee);
    assert_eq!(first.constraint_log(), second.constraint_log());
    assert_eq!(first.cost(), second.cost());
}

#[test]
fn forged_product_is_rejected() {
    let p = Secp256k1Fp::modulus();
    let gadget = NativeGadget::default();
    let chip = FieldChip::<Fr, Secp256k1Fp, NativeGadget<Fr>>::new(&gadget).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0xc0ffee);
    let mut builder = MockBuilder::new();
    let vx = rng.gen_biguint_below(&p);
    let vy = rng.gen_biguint_below(&p);
    let x = chip.assign(&mut builder, Some(vx.clone())).unwrap();
    let y = chip.assign(&mut builder, Some(vy.clone())).unwrap();
    let z = chip.mul(&mut builder, &x, &y, None).unwrap();
    chip.assert_equal_to_fixed(&mut builder, &z, (&vx * &vy) % &p).unwrap();
    builder.assert_satisfied();

    // Shifting one limb of the product by one breaks the product relations.
    let mut witness = builder.solve().unwrap();
    let limb = z.limbs()[1];
    witness.set(&limb, witness.value(&limb) + Fr::from(1));
    assert!(builder.check(&witness).is_err());
}

// Combines elements whose limbs all sit at the largest value the maximum
// overflow allows, at widths `NB_LIMBS` and `2 * NB_LIMBS - 1`, with `p - 1`.
// Every operation must reduce its operands to stay within the maximum
// overflow.
fn extreme_operands<P: FieldEmulationParams>() {
    let p = P::modulus();
    let gadget = NativeGadget::default();
    let chip = FieldChip::<Fr, P, NativeGadget<Fr>>::new(&gadget).unwrap();
    let log2_base = chip.params().log2_base();
    let max_overflow = chip.params().max_overflow();
    let nb_limbs = chip.params().nb_limbs() as usize;
    let limb_max = (BigUint::one() << (log2_base + max_overflow)) - 1u32;

    let mut builder = MockBuilder::new();
    let y = chip.assign(&mut builder, Some(&p - 1u32)).unwrap();
    let vy = &p - 1u32;

    let mut results: Vec<(AssignedField<Fr, P>, BigUint)> = vec![];
    for width in [nb_limbs, 2 * nb_limbs - 1] {
        let limbs: Vec<AssignedNative<Fr>> = (0..width)
            .map(|_| {
                AssignmentInstructions::<Fr, AssignedNative<Fr>>::assign(
                    &gadget,
                    &mut builder,
                    Some(big_to_fe(&limb_max)),
                )
                .unwrap()
            })
            .collect();
        let x = chip.assign_from_limbs(&mut builder, &limbs, max_overflow, true).unwrap();
        assert_eq!((x.nb_limbs(), x.overflow()), (width, max_overflow));
        let vx = (0..width).fold(BigUint::zero(), |acc, _| (acc << log2_base) + &limb_max) % &p;

        // Without a reduction, the sum would not fit.
        assert!(x.limb_bound().add(y.limb_bound()).overflow(log2_base) > max_overflow);

        let vy_inv = vy.modpow(&(&p - 2u32), &p);
        let b = &mut builder;
        results.push((chip.add(b, &x, &y).unwrap(), (&vx + &vy) % &p));
        results.push((chip.add(b, &x, &x).unwrap(), (&vx + &vx) % &p));
        results.push((chip.sub(b, &x, &y).unwrap(), (&p + &vx - &vy) % &p));
        results.push((chip.sub(b, &y, &x).unwrap(), (&p + &vy - &vx) % &p));
        results.push((chip.mul(b, &x, &y, None).unwrap(), (&vx * &vy) % &p));
        results.push((chip.mul(b, &x, &x, None).unwrap(), (&vx * &vx) % &p));
        results.push((
            chip.mul_by_constant(b, &x, &p - 1u32).unwrap(),
            (&vx * &vy) % &p,
        ));
        results.push((chip.div(b, &x, &y).unwrap(), (&vx * &vy_inv) % &p));
        if !vx.is_zero() {
            let vx_inv = vx.modpow(&(&p - 2u32), &p);
            results.push((chip.div(b, &y, &x).unwrap(), (&vy * vx_inv) % &p));
        }
    }

    builder.assert_satisfied();
    let witness = builder.solve().unwrap();
    for (z, expected) in results.iter() {
        assert!(z.overflow() <= max_overflow, "{}", P::NAME);
        assert!(z.nb_limbs() <= 2 * nb_limbs - 1);
        assert_eq!(&(witness.field_value(z) % &p), expected, "{}", P::NAME);
    }
}

#[test]
fn operations_on_extreme_operands() {
    extreme_operands::<Toy64>();
    extreme_operands::<Secp256k1Fp>();
    extreme_operands::<BW6761Fp>();
}

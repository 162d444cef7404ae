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

//! Benchmark the synthesis and witness solving of foreign arithmetic.
//! It measures a multiplication followed by a reduction of secp256k1's base
//! field elements over the scalar field of BN254.
//!
//! To run this benchmark:
//!
//!     cargo bench --bench field_ops

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use halo2curves::bn256::Fr;
use midnight_emulated::{
    circuit::ConstraintBuilder,
    dev::MockBuilder,
    field::{
        foreign::params::{FieldEmulationParams, Secp256k1Fp},
        FieldChip, NativeGadget,
    },
    instructions::*,
};
use num_bigint::{BigUint, RandBigInt};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

type Chip = FieldChip<Fr, Secp256k1Fp, NativeGadget<Fr>>;

fn mul_reduce(chip: &Chip, builder: &mut impl ConstraintBuilder<Fr>, x: &BigUint, y: &BigUint) {
    let x = chip.assign(builder, Some(x.clone())).unwrap();
    let y = chip.assign(builder, Some(y.clone())).unwrap();
    let z = chip.mul(builder, &x, &y, None).unwrap();
    black_box(chip.reduce(builder, &z).unwrap());
}

fn bench_mul_reduce(c: &mut Criterion) {
    let chip = Chip::new(&NativeGadget::default()).unwrap();
    let mut rng = ChaCha8Rng::seed_from_u64(0xf007ba11);
    let p = Secp256k1Fp::modulus();
    let (x, y) = (rng.gen_biguint_below(&p), rng.gen_biguint_below(&p));

    let mut group = c.benchmark_group("secp256k1-over-bn254");

    group.bench_function("mul_reduce_synthesis", |b| {
        b.iter(|| {
            let mut builder = MockBuilder::new();
            mul_reduce(&chip, &mut builder, &x, &y);
            black_box(builder)
        });
    });

    let mut builder = MockBuilder::new();
    mul_reduce(&chip, &mut builder, &x, &y);
    group.bench_function("mul_reduce_solve", |b| {
        b.iter(|| black_box(builder.solve().unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_mul_reduce);
criterion_main!(benches);

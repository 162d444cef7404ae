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

//! Regression circuits for limb layouts that used to break the emulation.

use halo2curves::bn256::Fr;
use midnight_emulated::{
    circuit::{Circuit, ConstraintBuilder},
    conversions::big_to_fe,
    dev::MockBuilder,
    field::{
        foreign::params::{BN254Fp, BW6761Fp},
        FieldChip, NativeGadget,
    },
    instructions::*,
    types::AssignedNative,
    Error,
};
use num_bigint::BigUint;
use num_traits::Num;

// Overflowed limbs of two internal BW6-761 elements (23 limbs, as produced by
// a product), with overflows 72 and 118 respectively.
const ISSUE_867_A: [&str; 23] = [
    "42152055455558239410918856365347934987",
    "284096672345318884331906744025751994436",
    "614038234500395071520584452045854556036",
    "650791570547517983681540124631549305906",
    "1015426967328780486983265586758233548314",
    "1547576981782048968201287533960518281592",
    "2241388874175174864705300518494392715473",
    "2272776063523064079117175149406828917348",
    "2108034997939354830629994253650658395093",
    "2496638612325105562443710658519436256202",
    "2516535160396097216063035076559950097396",
    "2851622448053604742119299279390439519900",
    "1745307545739213351161058618528459959073",
    "1611333894983919176759905895818287768762",
    "1466950300593143231048571873514528370337",
    "1413148907163753703359561383721137311278",
    "1106632639185048629298472160281839189795",
    "223485414995874678448933378505248108260",
    "498894012096407228249522197291620119508",
    "66456820497382616360969181916422224388",
    "418687747092845373939573067221695941200",
    "929739253206827109560966422852970160",
    "516235675893857489524743064330668",
];

const ISSUE_867_B: [&str; 23] = [
    "1225996432692727976601767167989361746138121889728902418",
    "1225996432692726898457503589717765703850589432813740752",
    "1225996432692727601202002035504082609034686265426224534",
    "1225996432692727863800627065585502400025688697839624688",
    "1225996432692726895840280725330019244557638565515208816",
    "1225996432692728388244995609757388577021081951481986580",
    "1225996432692726531118348372019113404206525154000451880",
    "1225996432692726447731005019972770765499945195971883848",
    "1225996432692727744357066134208375801833920991141279930",
    "1225996432692726890371778721001659042419189436317645960",
    "1225996432692724521956555855212298329189894636085023472",
    "1225996432692727669349649012761793837315979800575415838",
    "1225996432692728342310921852357706757313945745570174496",
    "1225996432692727633381606696459772297983693097833527678",
    "1225996432692727495940982271275341035852610611137245606",
    "1225996432692728288709439232109402555258221126516325320",
    "1225996432692726848720378195875416806833757401249877456",
    "1225996432692727083894468774663851695073095308036985598",
    "1225996432692728230861854324679838743877597377148752472",
    "1225996432692726866241709451789414581782249958783970800",
    "1225996432692728208615724450642876467256539219504282232",
    "1225996432692728509987163825647123386984338675020339462",
    "1225996432692728509159175754185978068065410668081643970",
];

#[derive(Clone, Debug)]
struct Issue867Circuit;

impl Circuit<Fr> for Issue867Circuit {
    fn synthesize(&self, builder: &mut impl ConstraintBuilder<Fr>) -> Result<(), Error> {
        let gadget = NativeGadget::default();
        let chip = FieldChip::<Fr, BW6761Fp, NativeGadget<Fr>>::new(&gadget)?;
        let mut assign_limbs = |limbs: &[&str]| {
            limbs
                .iter()
                .map(|limb| {
                    let value = BigUint::from_str_radix(limb, 10)
                        .map_err(|e| Error::InvalidParams(e.to_string()))?;
                    AssignmentInstructions::<Fr, AssignedNative<Fr>>::assign(
                        &gadget,
                        builder,
                        Some(big_to_fe(&value)),
                    )
                })
                .collect::<Result<Vec<_>, Error>>()
        };
        let a_limbs = assign_limbs(&ISSUE_867_A)?;
        let b_limbs = assign_limbs(&ISSUE_867_B)?;

        let a = chip.assign_from_limbs(builder, &a_limbs, 72, true)?;
        let b = chip.assign_from_limbs(builder, &b_limbs, 118, true)?;
        assert_eq!((a.nb_limbs(), a.overflow()), (23, 72));
        assert_eq!((b.nb_limbs(), b.overflow()), (23, 118));

        chip.div(builder, &a, &b)?;
        Ok(())
    }
}

#[test]
fn issue_867_division_of_overflowed_products() {
    MockBuilder::run(&Issue867Circuit).unwrap().assert_satisfied();
}

#[derive(Clone, Debug)]
struct Issue1021Circuit {
    a: u64,
}

impl Circuit<Fr> for Issue1021Circuit {
    fn synthesize(&self, builder: &mut impl ConstraintBuilder<Fr>) -> Result<(), Error> {
        let chip = FieldChip::<Fr, BN254Fp, NativeGadget<Fr>>::new(&NativeGadget::default())?;
        let a = chip.assign(builder, Some(BigUint::from(self.a)))?;
        let p = chip.modulus_element(builder)?;
        let mut b = a.clone();
        for _ in 0..188 {
            b = chip.add(builder, &b, &p)?;
        }
        chip.assert_equal(builder, &b, &a)
    }
}

#[test]
fn issue_1021_many_additions_of_the_modulus() {
    MockBuilder::run(&Issue1021Circuit { a: 10 }).unwrap().assert_satisfied();
}

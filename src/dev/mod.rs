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

//! Tools for developing and testing circuits.
//!
//! [MockBuilder] is a [ConstraintBuilder] that records everything it is asked
//! to do, solves the witness by evaluating the hints in order, and checks
//! every recorded constraint, reporting all the violated ones. It has no
//! notion of proving; it plays the role a mock prover plays for a real proof
//! system.

use std::{fmt, sync::Arc};

use ff::PrimeField;
use log::trace;
use num_bigint::BigUint;
use num_traits::Zero;

use crate::{
    circuit::{AssignedNative, Circuit, ConstraintBuilder, Expression, Hint},
    error::{Error, HintError},
    field::foreign::{params::FieldEmulationParams, AssignedField},
    utils::util::fe_to_big,
};

#[derive(Clone, Debug)]
enum Source<F: PrimeField> {
    Input(Option<F>),
    Fixed(F),
    HintOutput { call: usize, position: usize },
}

#[derive(Clone, Debug)]
struct HintCall<F: PrimeField> {
    hint: Arc<dyn Hint<F>>,
    inputs: Vec<AssignedNative<F>>,
    nb_outputs: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Constraint<F: PrimeField> {
    Zero(Expression<F>),
    Equal(AssignedNative<F>, AssignedNative<F>),
    Range(AssignedNative<F>, u32),
}

#[derive(Clone, Copy, Debug)]
enum Event {
    Variable(usize),
    HintCall(usize),
    Constraint(usize),
}

/// A recording constraint builder, see the [module documentation](self).
#[derive(Clone, Debug)]
pub struct MockBuilder<F: PrimeField> {
    variables: Vec<Source<F>>,
    hint_calls: Vec<HintCall<F>>,
    constraints: Vec<Constraint<F>>,
    events: Vec<Event>,
}

impl<F: PrimeField> Default for MockBuilder<F> {
    fn default() -> Self {
        MockBuilder {
            variables: vec![],
            hint_calls: vec![],
            constraints: vec![],
            events: vec![],
        }
    }
}

/// A solved witness: one value per variable of a [MockBuilder].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness<F: PrimeField> {
    values: Vec<F>,
}

impl<F: PrimeField> Witness<F> {
    /// The value of the given variable.
    ///
    /// # Panics
    ///
    /// If the variable does not belong to the builder this witness was solved
    /// for.
    pub fn value(&self, x: &AssignedNative<F>) -> F {
        self.values[x.index()]
    }

    /// Overwrites the value of the given variable. This is useful for
    /// checking that a circuit rejects a dishonest witness.
    pub fn set(&mut self, x: &AssignedNative<F>, value: F) {
        self.values[x.index()] = value;
    }

    /// The integer `sum_i limb_i * 2^(i * LOG2_BASE)` represented by the given
    /// foreign element. It is congruent to the value of the element modulo
    /// the foreign modulus, but it is not necessarily reduced.
    pub fn field_value<P: FieldEmulationParams>(&self, x: &AssignedField<F, P>) -> BigUint {
        x.limbs().iter().rev().fold(BigUint::zero(), |acc, limb| {
            (acc << P::LOG2_BASE) + fe_to_big(self.value(limb))
        })
    }
}

/// A violated constraint, as reported by [MockBuilder::verify].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum VerifyFailure {
    /// The witness could not be solved.
    Unsolvable(String),
    /// A relation did not evaluate to zero.
    Zero {
        /// Index of the constraint.
        index: usize,
    },
    /// Two variables that must be equal are not.
    Equality {
        /// Index of the constraint.
        index: usize,
        /// Index of the left variable.
        left: usize,
        /// Index of the right variable.
        right: usize,
    },
    /// A variable is out of its range.
    Range {
        /// Index of the constraint.
        index: usize,
        /// Index of the variable.
        variable: usize,
        /// Number of bits the variable should fit in.
        nb_bits: u32,
    },
}

impl fmt::Display for VerifyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyFailure::Unsolvable(e) => write!(f, "the witness could not be solved: {e}"),
            VerifyFailure::Zero { index } => write!(f, "constraint {index} is not satisfied"),
            VerifyFailure::Equality { index, left, right } => write!(
                f,
                "constraint {index}: variables {left} and {right} are not equal"
            ),
            VerifyFailure::Range {
                index,
                variable,
                nb_bits,
            } => write!(
                f,
                "constraint {index}: variable {variable} does not fit in {nb_bits} bits"
            ),
        }
    }
}

/// Size metrics of a circuit built with a [MockBuilder].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CircuitCost {
    /// Total number of variables.
    pub nb_variables: usize,
    /// Number of witness inputs.
    pub nb_witness_inputs: usize,
    /// Number of fixed variables.
    pub nb_fixed: usize,
    /// Number of hint calls.
    pub nb_hint_calls: usize,
    /// Number of variables produced by hints.
    pub nb_hint_outputs: usize,
    /// Number of relations of degree at most two.
    pub nb_relations: usize,
    /// Number of equality constraints.
    pub nb_equalities: usize,
    /// Number of range checks.
    pub nb_range_checks: usize,
    /// Sum of the number of bits of all range checks.
    pub nb_range_checked_bits: u64,
}

impl<F: PrimeField> MockBuilder<F> {
    /// An empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the given circuit.
    pub fn run(circuit: &impl Circuit<F>) -> Result<Self, Error> {
        let mut builder = Self::new();
        circuit.synthesize(&mut builder)?;
        Ok(builder)
    }

    fn check_variable(&self, x: &AssignedNative<F>) -> Result<(), Error> {
        if x.index() < self.variables.len() {
            Ok(())
        } else {
            Err(Error::UnknownVariable(x.index()))
        }
    }

    fn new_variable(&mut self, source: Source<F>) -> AssignedNative<F> {
        let index = self.variables.len();
        self.variables.push(source);
        self.events.push(Event::Variable(index));
        AssignedNative::from_index(index)
    }

    fn new_constraint(&mut self, constraint: Constraint<F>) {
        self.events.push(Event::Constraint(self.constraints.len()));
        self.constraints.push(constraint);
    }

    /// Computes the value of every variable, evaluating hints in the order in
    /// which they were registered.
    pub fn solve(&self) -> Result<Witness<F>, Error> {
        let mut values = Vec::with_capacity(self.variables.len());
        let mut hint_outputs: Vec<Option<Vec<F>>> = vec![None; self.hint_calls.len()];

        for (index, source) in self.variables.iter().enumerate() {
            let value = match source {
                Source::Input(v) => v.ok_or(Error::MissingWitness(index))?,
                Source::Fixed(c) => *c,
                Source::HintOutput { call, position } => {
                    if hint_outputs[*call].is_none() {
                        let HintCall {
                            hint,
                            inputs,
                            nb_outputs,
                        } = &self.hint_calls[*call];
                        // Hint inputs are always allocated before the outputs.
                        let inputs: Vec<F> = inputs.iter().map(|x| values[x.index()]).collect();
                        trace!("solving hint {} (call {call})", hint.name());
                        let outputs = hint.compute(&inputs).map_err(|source| Error::Hint {
                            name: hint.name(),
                            source,
                        })?;
                        if outputs.len() != *nb_outputs {
                            return Err(Error::Hint {
                                name: hint.name(),
                                source: HintError::OutputArity {
                                    expected: *nb_outputs,
                                    got: outputs.len(),
                                },
                            });
                        }
                        hint_outputs[*call] = Some(outputs);
                    }
                    hint_outputs[*call].as_ref().map(|outputs| outputs[*position]).unwrap_or(F::ZERO)
                }
            };
            values.push(value);
        }

        Ok(Witness { values })
    }

    /// Checks every constraint against the given witness.
    pub fn check(&self, witness: &Witness<F>) -> Result<(), Vec<VerifyFailure>> {
        let read = |x: &AssignedNative<F>| Ok(witness.value(x));
        let failures: Vec<VerifyFailure> = self
            .constraints
            .iter()
            .enumerate()
            .filter_map(|(index, constraint)| match constraint {
                Constraint::Zero(expr) => match expr.evaluate(read) {
                    Ok(v) if v.is_zero_vartime() => None,
                    _ => Some(VerifyFailure::Zero { index }),
                },
                Constraint::Equal(x, y) => (witness.value(x) != witness.value(y)).then_some(
                    VerifyFailure::Equality {
                        index,
                        left: x.index(),
                        right: y.index(),
                    },
                ),
                Constraint::Range(x, nb_bits) => (fe_to_big(witness.value(x)).bits()
                    > *nb_bits as u64)
                    .then_some(VerifyFailure::Range {
                        index,
                        variable: x.index(),
                        nb_bits: *nb_bits,
                    }),
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }

    /// Solves the witness and checks every constraint.
    pub fn verify(&self) -> Result<(), Vec<VerifyFailure>> {
        let witness = self
            .solve()
            .map_err(|e| vec![VerifyFailure::Unsolvable(e.to_string())])?;
        self.check(&witness)
    }

    /// Panics, listing every violated constraint, if the circuit is not
    /// satisfied.
    pub fn assert_satisfied(&self) {
        if let Err(failures) = self.verify() {
            let report: Vec<String> = failures.iter().map(|f| f.to_string()).collect();
            panic!("circuit is not satisfied:\n{}", report.join("\n"));
        }
    }

    /// Size metrics of the circuit.
    pub fn cost(&self) -> CircuitCost {
        let mut cost = CircuitCost {
            nb_variables: self.variables.len(),
            nb_hint_calls: self.hint_calls.len(),
            ..CircuitCost::default()
        };
        for source in self.variables.iter() {
            match source {
                Source::Input(_) => cost.nb_witness_inputs += 1,
                Source::Fixed(_) => cost.nb_fixed += 1,
                Source::HintOutput { .. } => cost.nb_hint_outputs += 1,
            }
        }
        for constraint in self.constraints.iter() {
            match constraint {
                Constraint::Zero(_) => cost.nb_relations += 1,
                Constraint::Equal(..) => cost.nb_equalities += 1,
                Constraint::Range(_, nb_bits) => {
                    cost.nb_range_checks += 1;
                    cost.nb_range_checked_bits += *nb_bits as u64;
                }
            }
        }
        cost
    }

    /// A textual rendering of everything recorded by the builder, in order.
    /// Building the same circuit twice must produce the same log.
    pub fn constraint_log(&self) -> Vec<String> {
        self.events
            .iter()
            .map(|event| match event {
                Event::Variable(i) => match &self.variables[*i] {
                    Source::Input(_) => format!("v{i} = input"),
                    Source::Fixed(c) => format!("v{i} = fixed {c:?}"),
                    Source::HintOutput { call, position } => {
                        format!("v{i} = hint#{call}[{position}]")
                    }
                },
                Event::HintCall(i) => {
                    let call = &self.hint_calls[*i];
                    let inputs: Vec<usize> = call.inputs.iter().map(|x| x.index()).collect();
                    format!("hint#{i} {}{inputs:?} -> {}", call.hint.name(), call.nb_outputs)
                }
                Event::Constraint(i) => match &self.constraints[*i] {
                    Constraint::Zero(expr) => format!("c{i}: {expr:?} = 0"),
                    Constraint::Equal(x, y) => format!("c{i}: v{} = v{}", x.index(), y.index()),
                    Constraint::Range(x, n) => format!("c{i}: v{} < 2^{n}", x.index()),
                },
            })
            .collect()
    }
}

impl<F: PrimeField> ConstraintBuilder<F> for MockBuilder<F> {
    fn assign(&mut self, value: Option<F>) -> Result<AssignedNative<F>, Error> {
        Ok(self.new_variable(Source::Input(value)))
    }

    fn assign_fixed(&mut self, constant: F) -> Result<AssignedNative<F>, Error> {
        Ok(self.new_variable(Source::Fixed(constant)))
    }

    fn hint(
        &mut self,
        hint: Arc<dyn Hint<F>>,
        inputs: &[AssignedNative<F>],
        nb_outputs: usize,
    ) -> Result<Vec<AssignedNative<F>>, Error> {
        inputs.iter().try_for_each(|x| self.check_variable(x))?;
        let call = self.hint_calls.len();
        trace!(
            "hint#{call} {} on {} inputs, {nb_outputs} outputs",
            hint.name(),
            inputs.len()
        );
        self.events.push(Event::HintCall(call));
        self.hint_calls.push(HintCall {
            hint,
            inputs: inputs.to_vec(),
            nb_outputs,
        });
        Ok((0..nb_outputs)
            .map(|position| self.new_variable(Source::HintOutput { call, position }))
            .collect())
    }

    fn assert_zero(&mut self, expression: &Expression<F>) -> Result<(), Error> {
        expression.variables().try_for_each(|x| self.check_variable(x))?;
        self.new_constraint(Constraint::Zero(expression.clone()));
        Ok(())
    }

    fn assert_equal(
        &mut self,
        x: &AssignedNative<F>,
        y: &AssignedNative<F>,
    ) -> Result<(), Error> {
        self.check_variable(x)?;
        self.check_variable(y)?;
        self.new_constraint(Constraint::Equal(*x, *y));
        Ok(())
    }

    fn assert_range(&mut self, x: &AssignedNative<F>, nb_bits: u32) -> Result<(), Error> {
        self.check_variable(x)?;
        self.new_constraint(Constraint::Range(*x, nb_bits));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use ff::Field;
    use halo2curves::bn256::Fr;

    use super::*;

    #[derive(Debug)]
    struct Square;

    impl Hint<Fr> for Square {
        fn name(&self) -> &'static str {
            "square"
        }

        fn compute(&self, inputs: &[Fr]) -> Result<Vec<Fr>, HintError> {
            match inputs {
                [x] => Ok(vec![x.square()]),
                _ => Err(HintError::InputArity {
                    expected: 1,
                    got: inputs.len(),
                }),
            }
        }
    }

    #[test]
    fn test_solve_and_verify() -> Result<(), Error> {
        let mut builder = MockBuilder::<Fr>::new();
        let x = builder.assign(Some(Fr::from(12)))?;
        let y = builder.hint(Arc::new(Square), &[x], 1)?[0];
        builder.assert_zero(&Expression::default().product(Fr::ONE, &x, &x).term(-Fr::ONE, &y))?;
        builder.assert_range(&y, 8)?;
        let k = builder.assign_fixed(Fr::from(144))?;
        builder.assert_equal(&y, &k)?;

        let witness = builder.solve()?;
        assert_eq!(witness.value(&y), Fr::from(144));
        assert_eq!(builder.verify(), Ok(()));

        let cost = builder.cost();
        assert_eq!(cost.nb_variables, 3);
        assert_eq!(cost.nb_hint_calls, 1);
        assert_eq!(cost.nb_relations, 1);
        assert_eq!(cost.nb_equalities, 1);
        assert_eq!(cost.nb_range_checked_bits, 8);
        Ok(())
    }

    #[test]
    fn test_all_failures_are_reported() -> Result<(), Error> {
        let mut builder = MockBuilder::<Fr>::new();
        let x = builder.assign(Some(Fr::from(300)))?;
        let y = builder.assign(Some(Fr::from(301)))?;
        builder.assert_range(&x, 8)?;
        builder.assert_equal(&x, &y)?;
        builder.assert_zero(&Expression::linear(&[(Fr::ONE, x)], -Fr::from(300)))?;

        let failures = builder.verify().unwrap_err();
        assert_eq!(
            failures,
            vec![
                VerifyFailure::Range {
                    index: 0,
                    variable: 0,
                    nb_bits: 8
                },
                VerifyFailure::Equality {
                    index: 1,
                    left: 0,
                    right: 1
                },
            ]
        );

        // A dishonest witness is caught by the relation.
        let mut witness = builder.solve()?;
        witness.set(&y, Fr::from(300));
        witness.set(&x, Fr::from(300));
        assert_eq!(
            builder.check(&witness).unwrap_err(),
            vec![VerifyFailure::Range {
                index: 0,
                variable: 0,
                nb_bits: 8
            }]
        );
        Ok(())
    }

    #[test]
    fn test_solving_errors() -> Result<(), Error> {
        let mut builder = MockBuilder::<Fr>::new();
        let x = builder.assign(None)?;
        builder.hint(Arc::new(Square), &[x], 1)?;
        assert!(matches!(builder.solve(), Err(Error::MissingWitness(0))));

        let mut builder = MockBuilder::<Fr>::new();
        let x = builder.assign(Some(Fr::ONE))?;
        builder.hint(Arc::new(Square), &[x, x], 1)?;
        assert!(matches!(
            builder.solve(),
            Err(Error::Hint {
                name: "square",
                source: HintError::InputArity {
                    expected: 1,
                    got: 2
                }
            })
        ));
        assert!(matches!(builder.verify(), Err(f) if matches!(f[0], VerifyFailure::Unsolvable(_))));

        let unknown = AssignedNative::from_index(42);
        assert!(matches!(
            builder.assert_equal(&x, &unknown),
            Err(Error::UnknownVariable(42))
        ));
        Ok(())
    }

    #[test]
    fn test_constraint_log_is_deterministic() -> Result<(), Error> {
        let build = || -> Result<MockBuilder<Fr>, Error> {
            let mut builder = MockBuilder::<Fr>::new();
            let x = builder.assign(Some(Fr::from(3)))?;
            let y = builder.hint(Arc::new(Square), &[x], 1)?[0];
            builder.assert_range(&y, 4)?;
            Ok(builder)
        };
        let log = build()?.constraint_log();
        assert_eq!(log, build()?.constraint_log());
        assert_eq!(
            log,
            vec!["v0 = input", "hint#0 square[0] -> 1", "v1 = hint#0[0]", "c0: v1 < 2^4"]
        );
        Ok(())
    }
}

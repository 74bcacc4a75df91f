//! Reference scenarios with known resulting order.
//!
//! Each scenario is a short scripted sequence of list operations and the
//! domain sets the list must hold afterwards, head to tail. Any change to
//! splicing or unlinking that reorders nodes shows up here.

use permit_chain_core::Domain::*;
use permit_chain_core::{Domain, PermitId};
use permit_chain_list::{ListError, PermitSnapshot};

use crate::fixtures::{domain_set, PermitFixture};

/// One scripted operation.
///
/// Steps that create a permit remember its id; `DeleteCreated`, `Revoke`
/// and `Restore` refer back to those ids by creation index.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    Create(&'static [Domain]),
    InsertAt(&'static [Domain], usize),
    DeleteAt(usize),
    DeleteCreated(usize),
    Revoke(usize),
    Restore(usize),
}

/// A scenario and its expected final order.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub steps: &'static [Step],
    pub expected: &'static [&'static [Domain]],
    pub expected_active: usize,
}

/// Get all reference scenarios.
pub fn all_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "insert at head then delete position 1",
            steps: &[
                Step::Create(&[Finance, AiMl]),
                Step::Create(&[Finance]),
                Step::Create(&[AiMl]),
                Step::InsertAt(&[Hr, It], 0),
                Step::DeleteAt(1),
            ],
            expected: &[&[Hr, It], &[Finance], &[AiMl]],
            expected_active: 3,
        },
        Scenario {
            name: "head, middle and tail inserts then deletes",
            steps: &[
                Step::Create(&[Finance, AiMl]),
                Step::Create(&[Finance]),
                Step::Create(&[AiMl]),
                Step::InsertAt(&[Hr, It], 0),
                Step::InsertAt(&[Marketing], 2),
                Step::InsertAt(&[Legal], 5),
                Step::DeleteCreated(4),
                Step::DeleteAt(1),
            ],
            expected: &[&[Hr, It], &[Finance], &[AiMl], &[Legal]],
            expected_active: 4,
        },
        Scenario {
            name: "delete tail then head leaves the middle",
            steps: &[
                Step::Create(&[Sales]),
                Step::Create(&[Operations]),
                Step::Create(&[Research]),
                Step::DeleteAt(2),
                Step::DeleteAt(0),
            ],
            expected: &[&[Operations]],
            expected_active: 1,
        },
        Scenario {
            name: "revocation keeps position",
            steps: &[
                Step::Create(&[Development]),
                Step::Create(&[Legal, Research]),
                Step::Create(&[Marketing]),
                Step::Revoke(1),
                Step::Revoke(2),
                Step::Restore(2),
            ],
            expected: &[&[Development], &[Legal, Research], &[Marketing]],
            expected_active: 2,
        },
        Scenario {
            name: "drain to empty then refill",
            steps: &[
                Step::Create(&[Finance]),
                Step::DeleteCreated(0),
                Step::InsertAt(&[It], 0),
                Step::InsertAt(&[Hr], 0),
            ],
            expected: &[&[Hr], &[It]],
            expected_active: 2,
        },
    ]
}

/// Run a scenario on a fresh fixture and return the final list.
pub fn run_scenario(scenario: &Scenario) -> Result<PermitFixture, ListError> {
    let mut fixture = PermitFixture::new();
    let mut created: Vec<PermitId> = Vec::new();

    for step in scenario.steps {
        fixture.clock.advance(1.0);
        match *step {
            Step::Create(domains) => created.push(fixture.list.create_permit(domain_set(domains))?),
            Step::InsertAt(domains, position) => {
                created.push(fixture.list.insert_at(domain_set(domains), position)?)
            }
            Step::DeleteAt(position) => {
                fixture.list.delete_at(position)?;
            }
            Step::DeleteCreated(n) => {
                fixture.list.delete(&created[n])?;
            }
            Step::Revoke(n) => fixture.list.revoke(&created[n])?,
            Step::Restore(n) => fixture.list.restore(&created[n])?,
        }
    }

    Ok(fixture)
}

/// Run every scenario and report `(name, passed, final snapshot)`.
pub fn verify_all_scenarios() -> Vec<(String, bool, Vec<PermitSnapshot>)> {
    all_scenarios()
        .iter()
        .map(|scenario| match run_scenario(scenario) {
            Ok(fixture) => {
                let expected: Vec<_> = scenario.expected.iter().map(|d| domain_set(d)).collect();
                let passed = fixture.domain_order() == expected
                    && fixture.list.list_active().count() == scenario.expected_active
                    && fixture.list.check_invariants().is_ok();
                (scenario.name.to_string(), passed, fixture.list.snapshot())
            }
            Err(_) => (scenario.name.to_string(), false, Vec::new()),
        })
        .collect()
}

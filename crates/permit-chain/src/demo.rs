//! The walkthrough the `permit-demo` binary runs.
//!
//! Exercises every list operation in a fixed order, printing the list
//! between stages. Expected failures (unknown ids, out-of-range positions)
//! are printed and the walkthrough continues; unexpected ones abort it.

use std::io::Write;

use serde::{Deserialize, Serialize};
use tracing::info;

use permit_chain_core::{Clock, Domain, DomainSet, DomainSetSource, EntropySource, PermitId};
use permit_chain_list::{PermitList, PermitSnapshot, Statistics};

use crate::error::Result;
use crate::report::{ListReport, StatisticsReport};

/// Permits drawn from the random generator in stage 1.
pub const RANDOM_PERMITS: usize = 2;
/// Permits drawn from the department generator in stage 1.
pub const DEPARTMENT_PERMITS: usize = 1;
/// A position no demo list reaches.
const OUT_OF_RANGE: usize = 100;

/// Final state of a demo run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoOutcome {
    pub permits: Vec<PermitSnapshot>,
    pub statistics: Statistics,
}

/// Run the walkthrough on `list`, writing the narration to `out`.
pub fn run_demo<E, C, W>(
    list: &mut PermitList<E, C>,
    random: &mut dyn DomainSetSource,
    departments: &mut dyn DomainSetSource,
    out: &mut W,
) -> Result<DemoOutcome>
where
    E: EntropySource,
    C: Clock,
    W: Write,
{
    writeln!(out, "=== DEMONSTRATING ALL CRUD OPERATIONS ===")?;

    stage(out, 1, "CREATE OPERATIONS")?;
    writeln!(out, "Creating initial permits...")?;
    list.create_permit(set(&[Domain::Finance, Domain::AiMl])?)?;
    let finance = list.create_permit(set(&[Domain::Finance])?)?;
    let ai_ml = list.create_permit(set(&[Domain::AiMl])?)?;
    let random_ids = list.create_many(random, RANDOM_PERMITS)?;
    list.create_many(departments, DEPARTMENT_PERMITS)?;
    writeln!(out, "Created {} total permits", list.len())?;
    info!(size = list.len(), "create stage done");
    write!(out, "{}", ListReport::new(list, false))?;

    stage(out, 2, "INSERT OPERATIONS")?;
    writeln!(out, "Inserting at position 0 (beginning)...")?;
    let head = list.insert_at(set(&[Domain::Hr, Domain::It])?, 0)?;
    writeln!(out, "Inserting at position 2 (middle)...")?;
    let middle = list.insert_at(set(&[Domain::Marketing])?, 2)?;
    writeln!(out, "Inserting at the end...")?;
    list.insert_at(set(&[Domain::Legal])?, list.len())?;
    info!(size = list.len(), "insert stage done");
    write!(out, "{}", ListReport::new(list, false))?;

    stage(out, 3, "READ OPERATIONS")?;
    let permit = list.read(&head)?;
    writeln!(out, "Read permit {}: {}", head, permit.domains())?;
    match list.read_hex("nonexistent") {
        Ok(permit) => writeln!(out, "Reading non-existent permit: {:?}", permit)?,
        Err(e) => writeln!(out, "Reading non-existent permit: {}", e)?,
    }
    let missing = PermitId::from_bytes([0xff; 8]);
    if let Err(e) = list.read(&missing) {
        writeln!(out, "Reading unknown id: {}", e)?;
    }

    stage(out, 4, "UPDATE OPERATIONS")?;
    list.update_domains(
        &finance,
        set(&[Domain::Finance, Domain::Sales, Domain::Operations])?,
    )?;
    writeln!(out, "Updated {} domains", finance)?;
    list.rotate_key(&ai_ml)?;
    writeln!(out, "Rotated key of {}", ai_ml)?;
    if let Some(first) = random_ids.first() {
        list.revoke(first)?;
        writeln!(out, "Revoked {}", first)?;
        if let Err(e) = list.rotate_key(first) {
            writeln!(out, "Rotating a revoked key: {}", e)?;
        }
    }
    info!("update stage done");
    write!(out, "{}", ListReport::new(list, true))?;

    stage(out, 5, "DELETE OPERATIONS")?;
    writeln!(out, "Deleting by node ID...")?;
    list.delete(&middle)?;
    writeln!(out, "Deleting at position 1...")?;
    let (removed, _) = list.delete_at(1)?;
    writeln!(out, "Deleted {}", removed)?;
    writeln!(out, "Attempting to delete non-existent permit...")?;
    if let Err(e) = list.delete(&missing) {
        writeln!(out, "  {}", e)?;
    }
    writeln!(out, "Attempting to delete at invalid position...")?;
    if let Err(e) = list.delete_at(OUT_OF_RANGE) {
        writeln!(out, "  {}", e)?;
    }
    info!(size = list.len(), "delete stage done");
    write!(out, "{}", ListReport::new(list, true))?;

    stage(out, 6, "RESTORE OPERATION")?;
    if let Some(first) = random_ids.first() {
        writeln!(out, "Restoring revoked permit...")?;
        list.restore(first)?;
    }

    stage(out, 7, "QUERY OPERATIONS")?;
    let finance_ids: Vec<String> = list
        .find_by_domain(Domain::Finance)
        .map(|entry| entry.id.to_hex())
        .collect();
    writeln!(out, "Active finance permits: {:?}", finance_ids)?;
    let rotated = list.bulk_rotate_keys(Some(Domain::Finance));
    writeln!(out, "Rotated {} finance keys", rotated)?;
    writeln!(out, "Active permits: {}", list.list_active().count())?;

    let statistics = list.statistics();
    writeln!(out, "\n=== FINAL STATISTICS ===")?;
    write!(out, "{}", StatisticsReport(&statistics))?;
    info!(
        total = statistics.total_permits,
        active = statistics.active_permits,
        "demo finished"
    );

    Ok(DemoOutcome {
        permits: list.snapshot(),
        statistics,
    })
}

fn stage<W: Write>(out: &mut W, number: usize, title: &str) -> std::io::Result<()> {
    writeln!(out, "\n{}. {}", number, title)?;
    writeln!(out, "{}", "-".repeat(30))
}

fn set(domains: &[Domain]) -> permit_chain_core::Result<DomainSet> {
    DomainSet::new(domains.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use permit_chain_core::{FakeDepartments, RandomDomains};
    use permit_chain_testkit::PermitFixture;

    fn run() -> (PermitFixture, DemoOutcome, String) {
        let mut fixture = PermitFixture::new();
        let mut out = Vec::new();
        let outcome = run_demo(
            &mut fixture.list,
            &mut RandomDomains::seeded(7),
            &mut FakeDepartments::seeded(7),
            &mut out,
        )
        .unwrap();
        (fixture, outcome, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_demo_final_shape() {
        let (fixture, outcome, _) = run();

        // 6 created + 3 inserted - 2 deleted
        assert_eq!(outcome.statistics.total_permits, 7);
        assert_eq!(outcome.statistics.revoked_permits, 0);
        assert_eq!(outcome.permits.len(), 7);
        assert_eq!(outcome.statistics, fixture.list.statistics());
        fixture.list.check_invariants().unwrap();

        let head = fixture.list.front().unwrap().permit;
        assert_eq!(head.domains().names(), vec!["hr", "it"]);
        let tail = fixture.list.back().unwrap().permit;
        assert_eq!(tail.domains().names(), vec!["legal"]);
    }

    #[test]
    fn test_demo_narration() {
        let (_, _, text) = run();

        for number in 1..=7 {
            assert!(text.contains(&format!("\n{}. ", number)));
        }
        assert!(text.contains("Reading non-existent permit: core error:"));
        assert!(text.contains("permit not found: ffffffffffffffff"));
        assert!(text.contains("invalid position 100: list size is 7"));
        assert!(text.contains("Status: REVOKED"));
        assert!(text.contains("=== FINAL STATISTICS ===\nTotal permits: 7\n"));
    }

    #[test]
    fn test_demo_is_reproducible() {
        let (_, a, _) = run();
        let (_, b, _) = run();
        assert_eq!(a, b);
    }
}

//! End-to-end scenarios through the facade.

use std::sync::Arc;
use std::thread;

use permit_chain::core::{FakeDepartments, RandomDomains, SeededEntropy, SystemClock};
use permit_chain::report::{render_list, render_statistics};
use permit_chain::{
    run_demo, Domain, DomainSet, ListConfig, ListError, PermitList, PermitSnapshot,
    SharedPermitList,
};
use permit_chain_testkit::{domain_set, verify_all_scenarios, PermitFixture, SequentialEntropy};

#[test]
fn reference_scenarios_hold() {
    for (name, passed, snapshot) in verify_all_scenarios() {
        assert!(passed, "scenario '{}' ended as {:?}", name, snapshot);
    }
}

#[test]
fn insert_at_head_then_delete_second() {
    let mut fixture = PermitFixture::with_permits(&[
        &[Domain::Finance, Domain::AiMl],
        &[Domain::Finance],
        &[Domain::AiMl],
    ]);

    let head = fixture
        .list
        .insert_at(domain_set(&[Domain::Hr, Domain::It]), 0)
        .unwrap();
    let (removed, permit) = fixture.list.delete_at(1).unwrap();

    assert_eq!(removed, SequentialEntropy::nth_id(1));
    assert_eq!(permit.domains(), &domain_set(&[Domain::Finance, Domain::AiMl]));
    assert_eq!(fixture.list.front().unwrap().id, head);
    assert_eq!(
        fixture.domain_order(),
        vec![
            domain_set(&[Domain::Hr, Domain::It]),
            domain_set(&[Domain::Finance]),
            domain_set(&[Domain::AiMl]),
        ]
    );
    fixture.list.check_invariants().unwrap();
}

#[test]
fn revoked_permit_lifecycle() {
    let mut fixture = PermitFixture::with_permits(&[&[Domain::Legal]]);
    let id = SequentialEntropy::nth_id(1);

    fixture.list.revoke(&id).unwrap();
    let frozen = fixture.list.read(&id).unwrap().clone();

    fixture.clock.advance(5.0);
    assert_eq!(fixture.list.rotate_key(&id), Err(ListError::Immutable(id)));
    assert_eq!(
        fixture.list.update_domains(&id, DomainSet::single(Domain::Hr)),
        Err(ListError::Immutable(id))
    );
    assert_eq!(fixture.list.revoke(&id), Err(ListError::AlreadyRevoked(id)));
    assert_eq!(fixture.list.read(&id).unwrap(), &frozen);

    fixture.list.restore(&id).unwrap();
    assert!(fixture.list.read(&id).unwrap().timestamp() > frozen.timestamp());
    fixture.list.rotate_key(&id).unwrap();
    assert_ne!(fixture.list.read(&id).unwrap().key(), frozen.key());
}

#[test]
fn failed_calls_leave_list_untouched() {
    let mut fixture = PermitFixture::with_permits(&[&[Domain::Sales], &[Domain::Research]]);
    let before = fixture.list.snapshot();
    let unknown = SequentialEntropy::nth_id(99);

    assert!(fixture.list.insert_at(DomainSet::single(Domain::Hr), 3).is_err());
    assert!(fixture.list.delete_at(2).is_err());
    assert!(fixture.list.delete(&unknown).is_err());
    assert!(fixture.list.restore(&SequentialEntropy::nth_id(1)).is_err());
    assert!(fixture.list.read_hex("zz").is_err());

    assert_eq!(fixture.list.snapshot(), before);
}

#[test]
fn snapshot_serializes_to_json() {
    let mut fixture = PermitFixture::with_permits(&[&[Domain::AiMl, Domain::Development]]);
    fixture.list.revoke(&SequentialEntropy::nth_id(1)).unwrap();

    let json = serde_json::to_value(fixture.list.snapshot()).unwrap();
    let record = &json[0];
    assert_eq!(record["node_id"], "0000000000000001");
    assert_eq!(record["domains"], serde_json::json!(["ai_ml", "development"]));
    assert_eq!(record["revoked"], true);
    assert_eq!(record["key"].as_str().unwrap().len(), 32);

    let back: Vec<PermitSnapshot> = serde_json::from_value(json).unwrap();
    assert_eq!(back, fixture.list.snapshot());
}

#[test]
fn empty_domain_set_is_rejected_on_decode() {
    let result: Result<PermitSnapshot, _> = serde_json::from_value(serde_json::json!({
        "node_id": "0000000000000001",
        "domains": [],
        "key": "00",
        "timestamp": 0.0,
        "revoked": false,
    }));
    assert!(result.is_err());
}

#[test]
fn reports_reflect_list() {
    let mut fixture = PermitFixture::with_permits(&[&[Domain::Finance], &[Domain::It]]);
    fixture.list.revoke(&SequentialEntropy::nth_id(2)).unwrap();

    let listing = render_list(&fixture.list, false);
    assert!(listing.contains("Permit Linked List (Size: 2)"));
    assert_eq!(listing.matches("Node ID:").count(), 1);

    let stats = render_statistics(&fixture.list.statistics());
    assert!(stats.contains("Active permits: 1"));
    assert!(stats.contains("Domain distribution: {finance:1 it:1}"));
}

#[test]
fn shared_list_across_threads() {
    let list = PermitList::with_config(
        SeededEntropy::new(11),
        SystemClock,
        ListConfig::default().with_verify_invariants(true),
    );
    let shared = Arc::new(SharedPermitList::from(list));

    let handles: Vec<_> = Domain::ALL
        .iter()
        .map(|&domain| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let id = shared.create_permit(DomainSet::single(domain)).unwrap();
                shared.insert_at(DomainSet::single(domain), 0).unwrap();
                shared.revoke(&id).unwrap();
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let stats = shared.statistics();
    assert_eq!(stats.total_permits, 20);
    assert_eq!(stats.revoked_permits, 10);
    for domain in Domain::ALL {
        assert_eq!(stats.count_for(domain), 2);
    }
    shared.read(|list| list.check_invariants()).unwrap();
}

#[test]
fn seeded_demo_is_reproducible_apart_from_time() {
    let run = |seed: u64| {
        let mut list = PermitList::with_sources(SeededEntropy::new(seed), SystemClock);
        let outcome = run_demo(
            &mut list,
            &mut RandomDomains::seeded(seed + 1),
            &mut FakeDepartments::seeded(seed + 2),
            &mut std::io::sink(),
        )
        .unwrap();
        outcome
            .permits
            .into_iter()
            .map(|p| (p.node_id, p.domains, p.key))
            .collect::<Vec<_>>()
    };

    assert_eq!(run(42), run(42));
    assert_eq!(run(42).len(), 7);
}

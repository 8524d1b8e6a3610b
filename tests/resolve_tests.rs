mod common;
use common::{FakeApi, adjustable, default_snapshot, entry, lookup};
use rworklog::config::MappingRule;
use rworklog::core::resolve::IdentifierResolver;
use rworklog::errors::{AppError, EntryRef, ResolveFailure};
use rworklog::models::name_tuple::{NameTuple, ResolvedIds};

fn rule(mapper: Option<&str>) -> MappingRule {
    MappingRule {
        mapper: mapper.map(str::to_string),
        project: "Apollo".into(),
        activity: "Development".into(),
        skill: "Rust".into(),
        project_id: 11,
        activity_id: 12,
        skill_id: 13,
    }
}

fn reason(err: AppError) -> ResolveFailure {
    match err {
        AppError::Resolution { reason, .. } => reason,
        other => panic!("expected a resolution error, got {other:?}"),
    }
}

#[test]
fn test_rules_never_touch_the_network() {
    let api = FakeApi::new();
    let mut resolver = IdentifierResolver::new(&[rule(None)]);

    let all = resolver
        .resolve_all(&[entry(1, "2025-03-03", "09:00", "10:00")], &api)
        .expect("resolved by rule");

    assert_eq!(
        all.values().next().copied(),
        Some(ResolvedIds {
            project_id: 11,
            activity_id: 12,
            skill_id: 13
        })
    );
    assert_eq!(api.lookup_calls.get(), 0);
    assert_eq!(resolver.snapshot_fetches(), 0);
}

#[test]
fn test_mapper_specific_rule_beats_snapshot() {
    let api = FakeApi::new();
    let mut resolver = IdentifierResolver::new(&[rule(Some("Daily_Totals"))]);

    let imported = adjustable(1, "2025-03-03", "09:00", "10:00");
    let manual = entry(2, "2025-03-03", "10:00", "11:00");

    let ids = resolver.resolve(&imported.name_tuple(), &api).expect("rule");
    assert_eq!(ids.project_id, 11);

    // The manual entry has no mapper: the rule does not apply, the snapshot does.
    let ids = resolver.resolve(&manual.name_tuple(), &api).expect("snapshot");
    assert_eq!(ids.project_id, 1);
    assert_eq!(api.lookup_calls.get(), 1);
}

#[test]
fn test_snapshot_is_fetched_once() {
    let mut api = FakeApi::new();
    api.snapshot.skills.push(lookup(4, "Go"));
    let mut resolver = IdentifierResolver::new(&[]);

    let rust = NameTuple::new("", "Apollo", "Development", "Rust");
    let go = NameTuple::new("", "apollo", "DEVELOPMENT", "  go ");

    assert_eq!(resolver.resolve(&rust, &api).expect("rust").skill_id, 3);
    assert_eq!(resolver.resolve(&go, &api).expect("go").skill_id, 4);
    assert_eq!(resolver.resolve(&go, &api).expect("cached").skill_id, 4);

    assert_eq!(api.lookup_calls.get(), 1);
    assert_eq!(resolver.snapshot_fetches(), 1);
}

#[test]
fn test_unmatched_name() {
    let api = FakeApi::new();
    let mut resolver = IdentifierResolver::new(&[]);
    let tuple = NameTuple::new("", "Hermes", "Development", "Rust");

    let err = resolver.resolve(&tuple, &api).unwrap_err();
    assert_eq!(
        reason(err),
        ResolveFailure::Unmatched {
            kind: "project",
            name: "hermes".into()
        }
    );
}

#[test]
fn test_ambiguous_name() {
    let mut api = FakeApi::new();
    api.snapshot.activities.push(lookup(22, "development"));
    let mut resolver = IdentifierResolver::new(&[]);

    let err = resolver
        .resolve(&NameTuple::new("", "Apollo", "Development", "Rust"), &api)
        .unwrap_err();
    assert!(matches!(
        reason(err),
        ResolveFailure::Ambiguous {
            kind: "activity",
            count: 2,
            ..
        }
    ));
}

#[test]
fn test_archived_and_locked_names() {
    let tuple = NameTuple::new("", "Apollo", "Development", "Rust");

    let mut api = FakeApi::new();
    api.snapshot.projects[0].archived = true;
    let err = IdentifierResolver::new(&[]).resolve(&tuple, &api).unwrap_err();
    assert!(matches!(reason(err), ResolveFailure::Archived { .. }));

    let mut api = FakeApi::new();
    api.snapshot.skills[0].locked = true;
    let err = IdentifierResolver::new(&[]).resolve(&tuple, &api).unwrap_err();
    assert!(matches!(reason(err), ResolveFailure::Locked { kind: "skill", .. }));
}

#[test]
fn test_archived_duplicate_does_not_make_a_name_ambiguous() {
    let mut api = FakeApi::new();
    let mut old = lookup(99, "Apollo");
    old.archived = true;
    api.snapshot.projects.push(old);

    let ids = IdentifierResolver::new(&[])
        .resolve(&NameTuple::new("", "Apollo", "Development", "Rust"), &api)
        .expect("single active project");
    assert_eq!(ids.project_id, 1);
}

#[test]
fn test_preloaded_snapshot_skips_the_fetch() {
    let api = FakeApi::new();
    let mut resolver = IdentifierResolver::new(&[]).with_snapshot(default_snapshot());

    let tuple = NameTuple::new("", "Apollo", "Development", "Rust");
    let ids = resolver.resolve(&tuple, &api).expect("resolved from snapshot");

    assert_eq!(ids.project_id, 1);
    assert_eq!(api.lookup_calls.get(), 0);
    assert_eq!(resolver.snapshot_fetches(), 0);
}

#[test]
fn test_resolution_error_names_the_first_offending_entry() {
    let api = FakeApi::new();
    let mut resolver = IdentifierResolver::new(&[]);

    let ok = entry(7, "2025-03-03", "08:00", "09:00");
    let mut hermes = entry(42, "2025-03-03", "09:00", "10:00");
    hermes.project = "Hermes".into();
    let mut again = entry(43, "2025-03-04", "09:00", "10:00");
    again.project = "Hermes".into();

    let err = resolver
        .resolve_all(&[ok, hermes, again], &api)
        .expect_err("Hermes is not in the snapshot");

    let message = err.to_string();
    assert!(message.contains("#42"), "{message}");
    assert!(message.contains("hermes"), "{message}");
    match err {
        AppError::Resolution { entry, reason, .. } => {
            assert_eq!(entry, EntryRef(Some(42)));
            assert!(matches!(reason, ResolveFailure::Unmatched { kind: "project", .. }));
        }
        other => panic!("expected a resolution error, got {other:?}"),
    }
}

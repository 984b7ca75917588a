//! End-to-end resolution scenarios through the engine facade

use std::sync::Arc;

use rank_engine::{InMemorySink, PlayerId};

use crate::common::EngineFactory;
use crate::common::fixtures::{in_one_hour, just_expired};

#[test]
fn test_vip_lifecycle_scenario() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();

    // first contact defaults to the member rank, held permanently
    engine.attach(player, Arc::new(InMemorySink::new()));
    assert_eq!(engine.primary_rank(player), "member");
    assert!(engine.all_permissions(player).contains("chat.send"));

    engine.add_role(player, "vip", None);
    assert!(engine.all_permissions(player).contains("chat.color"));
    assert_eq!(engine.primary_rank(player), "vip");

    assert!(engine.remove_role(player, "vip"));
    assert!(!engine.all_permissions(player).contains("chat.color"));
    assert_eq!(engine.primary_rank(player), "member");
}

#[test]
fn test_moderator_inherits_member_permissions() {
    let engine = EngineFactory::seeded();

    let effective = engine.ranks().effective_permissions("moderator");
    assert!(effective.contains("kick.use"));
    assert!(effective.contains("chat.send"));

    let player = PlayerId::new_v4();
    engine.add_role(player, "moderator", None);
    assert!(engine.has_permission(player, "kick.use"));
    assert!(engine.has_permission(player, "chat.send"));
}

#[test]
fn test_grant_then_deny_same_string() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();

    engine.grant(player, "fly.use");
    engine.deny(player, "fly.use");

    assert!(!engine.has_permission(player, "fly.use"));
    assert!(!engine.players().get(player).unwrap().allow.contains("fly.use"));
}

#[test]
fn test_wildcard_deny_beats_everything() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();

    engine.grant(player, "a.b.c");
    engine.add_role(player, "vip", None);
    engine.deny(player, "a.*");

    assert!(!engine.has_permission(player, "a.b.c"));
    // unrelated permissions are untouched
    assert!(engine.has_permission(player, "chat.color"));
}

#[test]
fn test_expired_grant_is_inert_but_stored() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();

    engine.add_role(player, "vip", Some(just_expired()));

    assert!(!engine.has_permission(player, "chat.color"));
    assert!(!engine.all_permissions(player).contains("chat.color"));
    assert_eq!(engine.primary_rank(player), "member");
    assert_eq!(engine.players().expired_roles(player).len(), 1);
}

#[test]
fn test_future_grant_resolves_until_swept() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();

    engine.add_role(player, "vip", Some(in_one_hour()));
    assert!(engine.has_permission(player, "chat.color"));
    assert_eq!(engine.primary_rank(player), "vip");
}

#[test]
fn test_sweep_removes_expired_grants_and_refreshes() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();
    let sink = Arc::new(InMemorySink::new());

    engine.attach(player, sink.clone());
    engine.add_role(player, "vip", Some(just_expired()));

    assert_eq!(engine.sweep(), 1);
    assert!(engine.players().expired_roles(player).is_empty());
    assert_eq!(engine.primary_rank(player), "member");
    assert!(!sink.is_granted("chat.color"));
}

#[test]
fn test_delete_rank_reassigns_attached_players() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();
    let sink = Arc::new(InMemorySink::new());

    engine.attach(player, sink.clone());
    engine.add_role(player, "vip", None);
    assert_eq!(engine.primary_rank(player), "vip");
    assert!(sink.is_granted("chat.color"));

    assert!(engine.delete_rank("vip"));

    assert_eq!(engine.primary_rank(player), "member");
    assert!(!sink.is_granted("chat.color"));
    assert!(sink.is_granted("chat.send"));
}

#[test]
fn test_delete_rank_rejects_default_and_unknown() {
    let engine = EngineFactory::seeded();

    assert!(!engine.delete_rank("member"));
    assert!(!engine.delete_rank("ghost"));
    assert!(engine.rank("member").is_some());
}

#[test]
fn test_graph_edit_propagates_to_attached_players() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();
    let sink = Arc::new(InMemorySink::new());

    engine.attach(player, sink.clone());
    assert!(!sink.is_granted("home.set"));

    assert!(engine.add_rank_permission("member", "home.set"));
    assert!(sink.is_granted("home.set"));

    assert!(engine.remove_rank_permission("member", "home.set"));
    assert!(!sink.is_granted("home.set"));
}

#[test]
fn test_parent_edge_propagates_to_attached_players() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();
    let sink = Arc::new(InMemorySink::new());

    engine.attach(player, sink.clone());
    engine.add_role(player, "vip", None);
    assert!(!sink.is_granted("kick.use"));

    assert!(engine.add_parent("vip", "moderator"));
    assert!(sink.is_granted("kick.use"));

    assert!(engine.remove_parent("vip", "moderator"));
    assert!(!sink.is_granted("kick.use"));
}

#[test]
fn test_cycle_rejection_through_facade() {
    let engine = EngineFactory::seeded();

    // moderator already inherits member
    assert!(!engine.add_parent("member", "moderator"));
    assert!(engine.rank("member").unwrap().parents.is_empty());
}

#[test]
fn test_detach_stops_updates_but_keeps_record() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();
    let sink = Arc::new(InMemorySink::new());

    engine.attach(player, sink.clone());
    assert!(engine.detach(player));

    engine.grant(player, "fly.use");
    assert!(!sink.is_granted("fly.use"));
    // the record itself still resolves
    assert!(engine.has_permission(player, "fly.use"));
}

#[test]
fn test_check_path_agrees_with_live_cache() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();
    let sink = Arc::new(InMemorySink::new());

    engine.attach(player, sink.clone());
    engine.add_role(player, "moderator", None);
    engine.grant(player, "fly.use");
    engine.deny(player, "chat.send");

    for permission in ["kick.use", "fly.use", "chat.send", "ban.use"] {
        assert_eq!(
            engine.has_permission(player, permission),
            sink.is_granted(permission),
            "check path and live cache disagree on {permission}"
        );
    }
}

#[test]
fn test_list_ranks_sorted_and_unsorted() {
    let engine = EngineFactory::seeded();

    let sorted: Vec<String> = engine
        .list_ranks(true)
        .into_iter()
        .map(|r| r.name)
        .collect();
    assert_eq!(sorted, vec!["vip", "moderator", "member"]);

    assert_eq!(engine.list_ranks(false).len(), 3);
}

#[test]
fn test_readding_role_resets_expiry() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();

    engine.add_role(player, "vip", Some(just_expired()));
    assert!(!engine.has_permission(player, "chat.color"));

    engine.add_role(player, "VIP", Some(in_one_hour()));
    assert!(engine.has_permission(player, "chat.color"));
    // replaced, not stacked: default rank plus one vip grant
    assert_eq!(engine.players().get(player).unwrap().role_count(), 2);
}

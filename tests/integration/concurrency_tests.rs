//! Concurrent access across the check and mutation paths

use std::sync::Arc;
use std::thread;

use rank_engine::{InMemorySink, PlayerId};

use crate::common::EngineFactory;

#[test]
fn test_checks_run_while_overrides_mutate() {
    let engine = Arc::new(EngineFactory::seeded());
    let player = PlayerId::new_v4();
    engine.attach(player, Arc::new(InMemorySink::new()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..500 {
                    // never panics, always resolves to a definite answer
                    let _ = engine.has_permission(player, "chat.send");
                    let _ = engine.all_permissions(player);
                }
            })
        })
        .collect();

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for i in 0..500 {
                let permission = format!("perk.{}", i % 8);
                engine.grant(player, &permission);
                engine.revoke(player, &permission);
            }
        })
    };

    for reader in readers {
        reader.join().unwrap();
    }
    writer.join().unwrap();

    // the writer's final state is visible afterwards
    engine.grant(player, "perk.final");
    assert!(engine.has_permission(player, "perk.final"));
}

#[test]
fn test_walks_run_while_graph_mutates() {
    let engine = Arc::new(EngineFactory::seeded());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..500 {
                    let effective = engine.ranks().effective_permissions("moderator");
                    // a moderator's own permission is present in every snapshot
                    assert!(effective.contains("kick.use"));
                }
            })
        })
        .collect();

    let writer = {
        let engine = Arc::clone(&engine);
        thread::spawn(move || {
            for _ in 0..200 {
                assert!(engine.add_parent("vip", "moderator"));
                assert!(engine.remove_parent("vip", "moderator"));
            }
        })
    };

    for reader in readers {
        reader.join().unwrap();
    }
    writer.join().unwrap();
}

#[test]
fn test_mutation_visible_to_same_thread_immediately() {
    let engine = EngineFactory::seeded();
    let player = PlayerId::new_v4();

    engine.grant(player, "fly.use");
    assert!(engine.has_permission(player, "fly.use"));

    engine.deny(player, "fly.use");
    assert!(!engine.has_permission(player, "fly.use"));

    assert!(engine.add_rank_permission("member", "home.set"));
    engine.add_role(player, "member", None);
    assert!(engine.has_permission(player, "home.set"));
}

#[test]
fn test_many_players_attach_concurrently() {
    let engine = Arc::new(EngineFactory::seeded());

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..50 {
                    let id = PlayerId::new_v4();
                    let sink = Arc::new(InMemorySink::new());
                    engine.attach(id, sink.clone());
                    assert!(sink.is_granted("chat.send"));
                    assert!(engine.detach(id));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert!(engine.permissions().attached_players().is_empty());
}

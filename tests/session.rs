//! Tests for the two-phase edit protocol.
mod common;
use common::*;
use kusari::prelude::*;

#[test]
fn test_apply_commits_immediately_and_defers_settle() {
    let catalog = test_catalog();
    let mut session = EditSession::new(MemoryStore::default());
    assert_eq!(session.state(), SessionState::Idle);

    session
        .apply(ChainEdit::Insert {
            template: template(&catalog, "Fetch"),
            at: None,
        })
        .expect("insert should apply");
    session.settle();
    session
        .apply(ChainEdit::Insert {
            template: template(&catalog, "Store"),
            at: None,
        })
        .expect("insert should apply");
    session
        .apply(ChainEdit::Move { from: 1, to: 0 })
        .expect("move should apply");
    assert_eq!(session.state(), SessionState::PendingSettle);

    // The move is already committed, but linkage still reflects the old
    // order until the deferred pass fires.
    let committed = session.chain();
    assert_eq!(names_of(&committed), vec!["Store", "Fetch"]);
    assert_eq!(committed.nodes[0].previous_node, "Fetch");

    session.settle();
    assert_eq!(session.state(), SessionState::Idle);
    let settled = session.chain();
    assert_eq!(settled.nodes[0].previous_node, "");
    assert_eq!(settled.nodes[1].previous_node, "Store");
}

#[test]
fn test_settle_without_pending_edit_is_a_no_op() {
    let mut session = session_with(&["Fetch", "Transform"]);
    assert_eq!(session.state(), SessionState::Idle);

    let before = session.chain();
    session.settle();
    assert_eq!(session.chain(), before);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_edits_during_pending_settle_fold_into_one_pass() {
    let catalog = test_catalog();
    let mut session = EditSession::new(MemoryStore::default());

    // Three rapid edits, no settle in between: the single deferred pass
    // reconciles whatever the store holds when it fires.
    for name in ["Fetch", "Fetch", "Transform"] {
        session
            .apply(ChainEdit::Insert {
                template: template(&catalog, name),
                at: None,
            })
            .expect("insert should apply");
    }
    assert_eq!(session.state(), SessionState::PendingSettle);
    session.settle();

    let chain = session.chain();
    assert_eq!(names_of(&chain), vec!["Fetch1", "Fetch2", "Transform"]);
    assert_eq!(chain.nodes[1].previous_node, "Fetch1");
    assert_eq!(chain.nodes[2].previous_node, "Fetch2");
    assert_eq!(
        chain.nodes[2].parameters["rows"],
        ParamValue::reference("Fetch2", ".output")
    );
}

#[test]
fn test_rejected_edit_commits_nothing_and_owes_no_settle() {
    let mut session = session_with(&["Fetch"]);
    let before = session.chain();

    let result = session.apply(ChainEdit::Remove { index: 4 });
    assert!(matches!(result, Err(EditError::IndexOutOfRange { .. })));
    assert_eq!(session.chain(), before);
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn test_insert_returns_stable_node_id() {
    let catalog = test_catalog();
    let mut session = EditSession::new(MemoryStore::default());

    let first = session
        .apply_and_settle(ChainEdit::Insert {
            template: template(&catalog, "Fetch"),
            at: None,
        })
        .expect("insert should apply")
        .expect("insert returns an id");
    let second = session
        .apply_and_settle(ChainEdit::Insert {
            template: template(&catalog, "Fetch"),
            at: None,
        })
        .expect("insert should apply")
        .expect("insert returns an id");
    assert_ne!(first, second);

    // Renames and moves do not disturb identity.
    session
        .apply_and_settle(ChainEdit::Rename {
            index: 0,
            name: "Ingest".to_string(),
        })
        .expect("rename should apply");
    session
        .apply_and_settle(ChainEdit::Move { from: 0, to: 1 })
        .expect("move should apply");
    let chain = session.chain();
    assert_eq!(chain.nodes[1].id, first);
    assert_eq!(chain.nodes[0].id, second);
}

#[test]
fn test_end_to_end_insert_insert_move_scenario() {
    let catalog = test_catalog();
    let mut session = EditSession::new(MemoryStore::default());

    // First "Fetch" keeps its bare name.
    session
        .apply_and_settle(ChainEdit::Insert {
            template: template(&catalog, "Fetch"),
            at: None,
        })
        .expect("insert should apply");
    assert_eq!(names_of(&session.chain()), vec!["Fetch"]);

    // A second "Fetch" forces canonical numbering of the whole group.
    session
        .apply_and_settle(ChainEdit::Insert {
            template: template(&catalog, "Fetch"),
            at: None,
        })
        .expect("insert should apply");
    let chain = session.chain();
    assert_eq!(names_of(&chain), vec!["Fetch1", "Fetch2"]);
    assert_eq!(chain.nodes[1].previous_node, "Fetch1");

    // Moving the tail to the front renumbers in the new chain order; the
    // set of names is stable and stays globally unique.
    session
        .apply_and_settle(ChainEdit::Move { from: 1, to: 0 })
        .expect("move should apply");
    let chain = session.chain();
    assert_eq!(names_of(&chain), vec!["Fetch1", "Fetch2"]);
    assert_eq!(chain.nodes[0].previous_node, "");
    assert_eq!(chain.nodes[1].previous_node, "Fetch1");
    assert_eq!(chain.names().len(), 2);

    // Removing one collapses the survivor to the bare root.
    session
        .apply_and_settle(ChainEdit::Remove { index: 0 })
        .expect("remove should apply");
    assert_eq!(names_of(&session.chain()), vec!["Fetch"]);
    assert_eq!(session.chain().nodes[0].previous_node, "");
}

// tests/trip_board.rs

mod common;
use crate::common::builders::{CollectionBuilder, TaskBuilder, chain_abc, id};
use crate::common::{init_tracing, test_manager};

use std::error::Error;

use tripcheck::board::{BoardOutcome, TaskCommand, TripBoard, execute};
use tripcheck::errors::{Rejection, TripcheckError};
use tripcheck::store::{CollectionStore, MemoryStore, TripKey};
use tripcheck::task::TaskFields;
use tripcheck::types::GatingDepth;

type TestResult = Result<(), Box<dyn Error>>;

fn board_with(
    collection: tripcheck::task::TaskCollection,
) -> Result<(TripBoard<MemoryStore>, MemoryStore, TripKey), Box<dyn Error>> {
    let trip = TripKey::new("iceland")?;
    let store = MemoryStore::new().with_trip(&trip, collection)?;
    let (manager, _) = test_manager(GatingDepth::Transitive);
    let board = TripBoard::new(store.clone(), trip.clone(), manager);
    Ok((board, store, trip))
}

#[test]
fn applied_commands_are_saved_with_a_new_revision() -> TestResult {
    init_tracing();
    let (board, store, trip) = board_with(chain_abc())?;

    let outcome = board.apply(TaskCommand::ToggleCompletion { id: id(3) })?;

    match outcome {
        BoardOutcome::Applied {
            revision,
            collection,
        } => {
            assert_eq!(revision, 2);
            assert!(collection.get(id(3)).unwrap().completed);
        }
        other => panic!("expected Applied, got {other:?}"),
    }
    let saved = store.load(&trip)?;
    assert_eq!(saved.revision, 2);
    assert!(saved.collection.get(id(3)).unwrap().completed);
    Ok(())
}

#[test]
fn rejected_commands_leave_the_store_alone() -> TestResult {
    init_tracing();
    let (board, store, trip) = board_with(chain_abc())?;

    let outcome = board.apply(TaskCommand::AddDependency {
        id: id(3),
        depends_on: id(1),
    })?;

    assert!(matches!(
        outcome,
        BoardOutcome::Rejected(Rejection::WouldCreateCycle { .. })
    ));
    let saved = store.load(&trip)?;
    assert_eq!(saved.revision, 1);
    assert_eq!(saved.collection, chain_abc());
    Ok(())
}

#[test]
fn no_op_commands_do_not_bump_the_revision() -> TestResult {
    init_tracing();
    let (board, store, trip) = board_with(chain_abc())?;

    let outcome = board.apply(TaskCommand::AddDependency {
        id: id(1),
        depends_on: id(2),
    })?;

    assert!(matches!(outcome, BoardOutcome::Applied { revision: 1, .. }));
    assert_eq!(store.load(&trip)?.revision, 1);
    Ok(())
}

#[test]
fn two_phase_delete_through_the_board() -> TestResult {
    init_tracing();
    let (board, store, trip) = board_with(chain_abc())?;

    let first = board.apply(TaskCommand::Delete {
        id: id(2),
        confirmed: false,
    })?;
    match first {
        BoardOutcome::Rejected(r) => assert!(r.needs_confirmation()),
        other => panic!("expected confirmation request, got {other:?}"),
    }

    board.apply(TaskCommand::Delete {
        id: id(2),
        confirmed: true,
    })?;

    let saved = store.load(&trip)?.collection;
    assert!(!saved.contains(id(2)));
    assert!(saved.get(id(1)).unwrap().dependencies.is_empty());
    Ok(())
}

#[test]
fn stale_copy_cannot_resurrect_a_deleted_edge() -> TestResult {
    init_tracing();
    let (board, store, trip) = board_with(chain_abc())?;

    // Another view read the collection before the delete...
    let stale = store.load(&trip)?;

    board.apply(TaskCommand::Delete {
        id: id(2),
        confirmed: true,
    })?;

    // ...and now tries to write back its edited copy, which still has A -> B.
    let (manager, _) = test_manager(GatingDepth::Transitive);
    let edited = execute(
        &manager,
        &stale.collection,
        &TaskCommand::Add {
            text: "Buy travel insurance".into(),
            fields: TaskFields::default(),
        },
    )?;

    let result = store.save(&trip, stale.revision, &edited);
    assert!(matches!(result, Err(TripcheckError::StaleSnapshot { .. })));
    assert!(!store.load(&trip)?.collection.contains(id(2)));
    Ok(())
}

#[test]
fn corrupt_snapshots_are_refused() -> TestResult {
    init_tracing();
    let self_loop = CollectionBuilder::new()
        .with(TaskBuilder::new(1, "A").depends_on(1))
        .build();
    let (board, _, _) = board_with(self_loop)?;
    assert!(matches!(
        board.apply(TaskCommand::ToggleCompletion { id: id(1) }),
        Err(TripcheckError::CorruptCollection(_))
    ));

    let cycle = CollectionBuilder::new()
        .with(TaskBuilder::new(1, "A").depends_on(2))
        .with(TaskBuilder::new(2, "B").depends_on(1))
        .build();
    let (board, _, _) = board_with(cycle)?;
    assert!(matches!(board.snapshot(), Err(TripcheckError::DependencyCycle(_))));

    let dangling = CollectionBuilder::new()
        .with(TaskBuilder::new(1, "A").depends_on(9))
        .build();
    let (board, _, _) = board_with(dangling)?;
    assert!(matches!(board.snapshot(), Err(TripcheckError::CorruptCollection(_))));
    Ok(())
}

// tests/completion_gate.rs

mod common;
use crate::common::builders::{CollectionBuilder, TaskBuilder, chain_abc, id};
use crate::common::{init_tracing, test_manager};

use chrono::{Duration, Utc};
use tripcheck::errors::Rejection;
use tripcheck::gate::{CompletionState, Progress, TaskStatus, Transition, check_transition, status_of};
use tripcheck::manager::TaskManager;
use tripcheck::task::TaskCollection;
use tripcheck::types::GatingDepth;

fn book_flight_then_pack() -> TaskCollection {
    CollectionBuilder::new()
        .with(TaskBuilder::new(1, "Book flight"))
        .with(TaskBuilder::new(2, "Pack bags").depends_on(1))
        .build()
}

#[test]
fn task_with_incomplete_dependency_cannot_complete() {
    init_tracing();
    let (manager, _) = test_manager(GatingDepth::Transitive);
    let coll = book_flight_then_pack();

    let result = manager.toggle_completion(&coll, id(2));

    assert_eq!(
        result,
        Err(Rejection::DependenciesIncomplete {
            task: id(2),
            open: vec![id(1)],
        })
    );
    assert_eq!(coll, book_flight_then_pack());
}

#[test]
fn book_flight_then_pack_bags() {
    init_tracing();
    let (manager, _) = test_manager(GatingDepth::Transitive);
    let coll = book_flight_then_pack();

    assert!(manager.toggle_completion(&coll, id(2)).is_err());

    let coll = manager.toggle_completion(&coll, id(1)).unwrap();
    assert!(coll.get(id(1)).unwrap().completed);

    let coll = manager.toggle_completion(&coll, id(2)).unwrap();
    assert!(coll.get(id(2)).unwrap().completed);
}

#[test]
fn completing_sets_completed_at_no_earlier_than_the_call() {
    init_tracing();
    let manager = TaskManager::default();
    let coll = book_flight_then_pack();

    let before = Utc::now();
    let coll = manager.toggle_completion(&coll, id(1)).unwrap();

    let task = coll.get(id(1)).unwrap();
    assert!(task.completed);
    let at = task.completed_at.expect("completed_at set");
    assert!(at >= before);
}

#[test]
fn completed_at_comes_from_the_manager_clock() {
    init_tracing();
    let (manager, clock) = test_manager(GatingDepth::Transitive);
    clock.advance(Duration::minutes(5));
    let expected = tripcheck::manager::Clock::now(&clock);

    let coll = manager.toggle_completion(&book_flight_then_pack(), id(1)).unwrap();

    assert_eq!(coll.get(id(1)).unwrap().completed_at, Some(expected));
}

#[test]
fn reopening_is_unconditional_and_clears_completed_at() {
    init_tracing();
    let (manager, _) = test_manager(GatingDepth::Transitive);
    let coll = CollectionBuilder::new()
        .with(TaskBuilder::new(1, "Book flight").completed())
        .with(TaskBuilder::new(2, "Pack bags").depends_on(1).completed())
        .build();

    // Reopen the prerequisite while its dependent is still done.
    let coll = manager.toggle_completion(&coll, id(1)).unwrap();

    let prereq = coll.get(id(1)).unwrap();
    assert!(!prereq.completed);
    assert_eq!(prereq.completed_at, None);
    // Dependents are not reopened along with it.
    assert!(coll.get(id(2)).unwrap().completed);

    // And the dependent itself can always be reopened.
    let coll = manager.toggle_completion(&coll, id(2)).unwrap();
    assert!(!coll.get(id(2)).unwrap().completed);
}

#[test]
fn transitive_gating_looks_past_completed_intermediates() {
    init_tracing();
    // A -> B -> C where B is done but C was reopened afterwards.
    let coll = CollectionBuilder::new()
        .with(TaskBuilder::new(1, "A").depends_on(2))
        .with(TaskBuilder::new(2, "B").depends_on(3).completed())
        .with(TaskBuilder::new(3, "C"))
        .build();

    assert_eq!(
        check_transition(&coll, id(1), GatingDepth::Transitive),
        Err(Rejection::DependenciesIncomplete {
            task: id(1),
            open: vec![id(3)],
        })
    );
    assert_eq!(
        check_transition(&coll, id(1), GatingDepth::Direct),
        Ok(Transition::Complete)
    );

    let (direct, _) = test_manager(GatingDepth::Direct);
    assert!(direct.toggle_completion(&coll, id(1)).is_ok());
}

#[test]
fn transitive_gating_lists_every_open_prerequisite() {
    init_tracing();
    let coll = chain_abc();

    match check_transition(&coll, id(1), GatingDepth::Transitive) {
        Err(Rejection::DependenciesIncomplete { mut open, .. }) => {
            open.sort();
            assert_eq!(open, vec![id(2), id(3)]);
        }
        other => panic!("expected DependenciesIncomplete, got {other:?}"),
    }
}

#[test]
fn toggling_an_unknown_task_is_task_not_found() {
    init_tracing();
    let (manager, _) = test_manager(GatingDepth::Transitive);

    assert_eq!(
        manager.toggle_completion(&chain_abc(), id(7)),
        Err(Rejection::TaskNotFound(id(7)))
    );
}

#[test]
fn derived_status_and_progress() {
    init_tracing();
    let coll = CollectionBuilder::new()
        .with(TaskBuilder::new(1, "A").depends_on(2))
        .with(TaskBuilder::new(2, "B"))
        .with(TaskBuilder::new(3, "C").completed())
        .build();

    assert_eq!(
        status_of(&coll, id(1), GatingDepth::Transitive),
        Some(TaskStatus::Blocked { open: vec![id(2)] })
    );
    assert_eq!(status_of(&coll, id(2), GatingDepth::Transitive), Some(TaskStatus::Ready));
    assert_eq!(status_of(&coll, id(3), GatingDepth::Transitive), Some(TaskStatus::Done));
    assert_eq!(status_of(&coll, id(9), GatingDepth::Transitive), None);

    let p = Progress::of(&coll, GatingDepth::Transitive);
    assert_eq!((p.total, p.done, p.ready, p.blocked), (3, 1, 1, 1));
    assert_eq!(p.percent_done(), 33);

    assert_eq!(Progress::of(&TaskCollection::new(), GatingDepth::Direct).percent_done(), 0);
}

#[test]
fn completion_state_mirrors_the_flag() {
    let done = TaskBuilder::new(1, "A").completed().build();
    let open = TaskBuilder::new(2, "B").build();

    assert_eq!(CompletionState::of(&done), CompletionState::Complete);
    assert_eq!(CompletionState::of(&open), CompletionState::Incomplete);
}

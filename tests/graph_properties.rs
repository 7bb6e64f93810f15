// tests/graph_properties.rs

mod common;
use crate::common::builders::{CollectionBuilder, TaskBuilder, id};
use crate::common::test_manager;

use proptest::prelude::*;
use tripcheck::errors::Rejection;
use tripcheck::gate::check_transition;
use tripcheck::graph::{DependencyView, validate_collection};
use tripcheck::task::TaskCollection;
use tripcheck::types::GatingDepth;

fn tasks(n: usize) -> TaskCollection {
    let mut builder = CollectionBuilder::new();
    for i in 0..n {
        builder = builder.with(TaskBuilder::new(i as u128, &format!("task_{i}")));
    }
    builder.build()
}

proptest! {
    // Arbitrary edge requests, applied one after another, must never leave a
    // cycle behind, and a refused request must never change the collection.
    #[test]
    fn random_edges_never_create_a_cycle(
        n in 2usize..8,
        edges in proptest::collection::vec((0usize..8, 0usize..8), 0..40),
    ) {
        let (manager, _) = test_manager(GatingDepth::Transitive);
        let mut coll = tasks(n);

        for (a, b) in edges {
            let (a, b) = (id((a % n) as u128), id((b % n) as u128));
            let reachable = DependencyView::build(&coll).reaches(b, a);

            match manager.add_dependency(&coll, a, b) {
                Ok(next) => {
                    prop_assert!(a != b);
                    prop_assert!(!reachable || coll.get(a).unwrap().depends_on(b));
                    coll = next;
                }
                Err(Rejection::SelfDependency { .. }) => prop_assert_eq!(a, b),
                Err(Rejection::WouldCreateCycle { path, .. }) => {
                    prop_assert!(reachable);
                    prop_assert_eq!(path.first().copied(), Some(b));
                    prop_assert_eq!(path.last().copied(), Some(a));
                }
                Err(other) => prop_assert!(false, "unexpected rejection {other:?}"),
            }

            prop_assert!(validate_collection(&coll).is_ok());
        }
    }

    // Completing tasks in any order only ever succeeds once everything
    // upstream is done.
    #[test]
    fn completion_respects_every_upstream_task(
        n in 2usize..8,
        raw_deps in proptest::collection::vec(proptest::collection::vec(any::<usize>(), 0..4), 8),
        order in proptest::collection::vec(0usize..8, 0..30),
    ) {
        // Acyclic by construction: task i may only depend on tasks < i.
        let mut builder = CollectionBuilder::new();
        for i in 0..n {
            let mut task = TaskBuilder::new(i as u128, &format!("task_{i}"));
            if i > 0 {
                let mut seen = std::collections::BTreeSet::new();
                for d in &raw_deps[i] {
                    seen.insert(d % i);
                }
                for d in seen {
                    task = task.depends_on(d as u128);
                }
            }
            builder = builder.with(task);
        }
        let mut coll = builder.build();
        let (manager, _) = test_manager(GatingDepth::Transitive);

        for i in order {
            let target = id((i % n) as u128);
            let allowed = check_transition(&coll, target, GatingDepth::Transitive).is_ok();
            match manager.toggle_completion(&coll, target) {
                Ok(next) => {
                    prop_assert!(allowed);
                    let now_done = next.get(target).unwrap().completed;
                    if now_done {
                        let view = DependencyView::build(&next);
                        for up in view.all_prerequisites_of(target) {
                            prop_assert!(next.get(up).unwrap().completed);
                        }
                    }
                    coll = next;
                }
                Err(_) => prop_assert!(!allowed),
            }
        }
    }
}

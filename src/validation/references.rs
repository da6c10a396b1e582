//! Reference checks across a definition and its nested graphs.

use crate::core::{Definition, State};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A state name that does not resolve within its enclosing graph.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReferenceError {
    #[error("{graph}: StartAt names unknown state `{target}`")]
    UnknownStart { graph: String, target: String },

    #[error("{graph}: `{state}` transitions to unknown state `{target}`")]
    UnknownTarget {
        graph: String,
        state: String,
        target: String,
    },
}

/// Check that every `StartAt`, `Next`, Choice rule target and `Default`
/// names a state of the graph it appears in, descending into Parallel
/// branches and Map iterators.
///
/// All problems are reported, not just the first.
pub fn check_references(definition: &Definition) -> Validation<(), NonEmptyVec<ReferenceError>> {
    let mut checks = Vec::new();
    collect(definition, "StateMachine", &mut checks);
    Validation::all_vec(checks).map(|_| ())
}

fn collect(
    graph: &Definition,
    path: &str,
    checks: &mut Vec<Validation<(), NonEmptyVec<ReferenceError>>>,
) {
    checks.push(if graph.states.contains(&graph.start_at) {
        Validation::success(())
    } else {
        Validation::fail(ReferenceError::UnknownStart {
            graph: path.to_string(),
            target: graph.start_at.clone(),
        })
    });

    for (name, state) in graph.states.iter() {
        for target in state.successors() {
            checks.push(if graph.states.contains(target) {
                Validation::success(())
            } else {
                Validation::fail(ReferenceError::UnknownTarget {
                    graph: path.to_string(),
                    state: name.to_string(),
                    target: target.to_string(),
                })
            });
        }

        match state {
            State::Parallel(parallel) => {
                for (i, branch) in parallel.branches.iter().enumerate() {
                    collect(branch, &format!("{path}.{name}.Branches[{i}]"), checks);
                }
            }
            State::Map(map) => {
                collect(&map.iterator, &format!("{path}.{name}.Iterator"), checks);
            }
            State::Pass(_)
            | State::Task(_)
            | State::Choice(_)
            | State::Fail(_)
            | State::Succeed(_)
            | State::Wait(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{choice, map, parallel, succeed, task, DefinitionBuilder};

    fn graph(start: &str, states: Vec<(&str, State)>) -> Definition {
        DefinitionBuilder::new()
            .start_at(start)
            .states(states)
            .build()
            .unwrap()
    }

    #[test]
    fn well_formed_definition_passes() {
        let definition = graph(
            "A",
            vec![
                ("A", task(Some("B"))),
                ("B", choice(&["A", "C"], Some("C"))),
                ("C", succeed()),
            ],
        );

        assert!(check_references(&definition).is_success());
    }

    #[test]
    fn accumulates_all_dangling_references() {
        let definition = graph(
            "Start",
            vec![
                ("A", task(Some("Missing"))),
                ("B", choice(&["A", "Gone"], Some("Lost"))),
            ],
        );

        match check_references(&definition) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 4);
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ReferenceError::UnknownStart { target, .. } if target == "Start"
                )));
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ReferenceError::UnknownTarget { state, target, .. }
                        if state == "A" && target == "Missing"
                )));
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ReferenceError::UnknownTarget { target, .. } if target == "Gone"
                )));
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ReferenceError::UnknownTarget { target, .. } if target == "Lost"
                )));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn nested_graphs_are_checked_in_their_own_scope() {
        // `Outer` exists at the root but not inside the branch.
        let branch = graph("Inner", vec![("Inner", task(Some("Outer")))]);
        let iterator = graph("Item", vec![("Item", succeed())]);
        let definition = graph(
            "Fan",
            vec![
                ("Fan", parallel(vec![iterator.clone(), branch], Some("Each"))),
                ("Each", map(iterator, Some("Outer"))),
                ("Outer", succeed()),
            ],
        );

        match check_references(&definition) {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 1);
                let error = errors.iter().next().unwrap();
                assert_eq!(
                    error.to_string(),
                    "StateMachine.Fan.Branches[1]: `Inner` transitions to unknown state `Outer`"
                );
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }

    #[test]
    fn map_iterator_path_is_reported() {
        let iterator = graph("Nope", vec![("Item", succeed())]);
        let definition = graph("Each", vec![("Each", map(iterator, None))]);

        match check_references(&definition) {
            Validation::Failure(errors) => {
                assert!(errors.iter().any(|e| matches!(
                    e,
                    ReferenceError::UnknownStart { graph, .. } if graph == "StateMachine.Each.Iterator"
                )));
            }
            Validation::Success(_) => panic!("Expected failure, got success"),
        }
    }
}

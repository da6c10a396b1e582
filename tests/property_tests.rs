//! Property-based tests for compilation and history correlation.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated definitions and event logs.

use proptest::prelude::*;
use std::collections::BTreeSet;
use stepchart::builder::{choice, parallel, pass, succeed, task, DefinitionBuilder, HistoryBuilder};
use stepchart::core::{Category, Definition, State, Status};
use stepchart::diagram::compile;
use stepchart::history::History;

/// A straight chain `S0 -> S1 -> ... -> Sn` ending in a Succeed.
fn chain(len: usize) -> Definition {
    let mut builder = DefinitionBuilder::new().start_at("S0");
    for i in 0..len {
        let next = format!("S{}", i + 1);
        builder = builder.state(format!("S{i}"), task(Some(&next)));
    }
    builder.state(format!("S{len}"), succeed()).build().unwrap()
}

prop_compose! {
    fn arbitrary_chain()(len in 0..6usize) -> Definition {
        chain(len)
    }
}

prop_compose! {
    fn state_name()(name in "[A-Z][a-z]{0,5}") -> String {
        name
    }
}

proptest! {
    #[test]
    fn compilation_is_deterministic(len in 0..6usize, branches in 1..4usize) {
        let definition = DefinitionBuilder::new()
            .start_at("Fan")
            .state("Fan", parallel(vec![chain(len); branches], Some("Done")))
            .state("Done", succeed())
            .build()
            .unwrap();

        let first = compile(&definition, None).unwrap();
        let second = compile(&definition, None).unwrap();
        prop_assert_eq!(first.text, second.text);
    }

    #[test]
    fn branch_nodes_never_collide(branch in arbitrary_chain(), branches in 1..5usize) {
        let definition = DefinitionBuilder::new()
            .start_at("Fan")
            .state("Fan", parallel(vec![branch.clone(); branches], None))
            .build()
            .unwrap();

        let chart = compile(&definition, None).unwrap();

        // One node per state, across the root and every branch.
        prop_assert_eq!(chart.context.states().count(), 1 + branches * branch.states.len());
        prop_assert_eq!(chart.context.frames(), 1 + branches);
    }

    #[test]
    fn choice_edges_are_unique(
        picks in prop::collection::vec(0..4usize, 1..10),
        default in prop::option::of(0..4usize),
    ) {
        let names = ["A", "B", "C", "D"];
        let targets: Vec<&str> = picks.iter().map(|&i| names[i]).collect();

        let mut builder = DefinitionBuilder::new()
            .start_at("Pick")
            .state("Pick", choice(&targets, default.map(|i| names[i])));
        for name in names {
            builder = builder.state(name, succeed());
        }
        let definition = builder.build().unwrap();

        let chart = compile(&definition, None).unwrap();
        let edges: Vec<&str> = chart
            .text
            .lines()
            .filter(|line| line.starts_with("s0-Pick -->"))
            .collect();

        let distinct: BTreeSet<usize> = picks.iter().copied().chain(default).collect();
        prop_assert_eq!(edges.len(), distinct.len());
        prop_assert_eq!(edges.iter().collect::<BTreeSet<_>>().len(), edges.len());
    }

    #[test]
    fn states_never_entered_never_ran(
        entered in prop::collection::vec(state_name(), 0..8),
        queried in state_name(),
    ) {
        prop_assume!(!entered.contains(&queried));

        let mut builder = HistoryBuilder::new().execution_started("{}");
        for name in &entered {
            builder = builder
                .entered(Category::Pass, name, "{}")
                .exited(Category::Pass, name, "{}");
        }
        let log = builder.build();
        let history = History::new(&log);

        prop_assert_eq!(history.status_of(&queried).unwrap(), Status::NeverRun);
    }

    #[test]
    fn entered_states_have_run(entered in prop::collection::vec(state_name(), 1..8)) {
        let mut builder = HistoryBuilder::new().execution_started("{}");
        for name in &entered {
            builder = builder.entered(Category::Task, name, "{}");
        }
        let log = builder.build();
        let history = History::new(&log);

        for name in &entered {
            prop_assert!(history.status_of(name).unwrap().has_run());
        }
    }

    #[test]
    fn nothing_after_a_failure_is_considered(
        failed in state_name(),
        later in prop::collection::vec(state_name(), 1..6),
    ) {
        prop_assume!(!later.contains(&failed));

        let mut builder = HistoryBuilder::new()
            .execution_started("{}")
            .entered(Category::Task, &failed, "{}")
            .lambda_failed("Boom", "broken");
        for name in &later {
            builder = builder
                .entered(Category::Task, name, "{}")
                .lambda_succeeded("{}");
        }
        let log = builder.build();
        let history = History::new(&log);

        prop_assert_eq!(history.status_of(&failed).unwrap(), Status::Fail);
        for name in &later {
            prop_assert_eq!(history.status_of(name).unwrap(), Status::NeverRun);
        }
    }

    #[test]
    fn chain_statuses_follow_the_log(len in 1..6usize, ran in 0..6usize) {
        let ran = ran.min(len);
        let definition = chain(len);

        let mut builder = HistoryBuilder::new().execution_started("{}");
        for i in 0..ran {
            let name = format!("S{i}");
            builder = builder
                .entered(Category::Task, &name, "{}")
                .lambda_succeeded("{}")
                .exited(Category::Task, &name, "{}");
        }
        let log = builder.build();
        let history = History::new(&log);
        let chart = compile(&definition, Some(&history)).unwrap();

        for (i, (name, state)) in definition.states.iter().enumerate() {
            let expected = if i < ran { "lightgreen" } else { "gainsboro" };
            prop_assert!(matches!(state, State::Task(_) | State::Succeed(_)));
            let fill = format!("style s0-{name} fill:{expected}\n");
            prop_assert!(chart.text.contains(&fill), "missing `{}`", fill.trim_end());
        }
    }

    #[test]
    fn pass_chain_compiles_with_one_edge_per_state(len in 1..8usize) {
        let mut builder = DefinitionBuilder::new().start_at("P0");
        for i in 0..len {
            let next = (i + 1 < len).then(|| format!("P{}", i + 1));
            builder = builder.state(format!("P{i}"), pass(next.as_deref()));
        }
        let definition = builder.build().unwrap();

        let chart = compile(&definition, None).unwrap();
        let edges = chart.text.lines().filter(|line| line.contains(" --> ")).count();
        prop_assert_eq!(edges, len - 1);
    }
}

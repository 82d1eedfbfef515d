//! Cycle decomposition, rendering and permutation helpers on hand-built graphs.

use super::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn graph(next: &[Config]) -> TransitionGraph {
    TransitionGraph::new(next.to_vec()).expect("valid graph")
}

#[test]
fn new_rejects_non_power_of_two_and_dangling_targets() {
    assert!(matches!(
        TransitionGraph::new(vec![0, 1, 2]),
        Err(CaError::MalformedGraph { .. })
    ));
    assert!(matches!(
        TransitionGraph::new(vec![]),
        Err(CaError::MalformedGraph { .. })
    ));
    assert!(matches!(
        TransitionGraph::new(vec![0, 4, 1, 2]),
        Err(CaError::MalformedGraph { .. })
    ));
}

#[test]
fn cycles_of_identity_are_fixed_points() {
    let g = graph(&[0, 1, 2, 3]);
    let cs = g.cycles();
    assert_eq!(cs.len(), 4);
    assert!(cs.iter().all(|c| c.len() == 1 && c.is_trivial()));
    assert!(g.is_bijective());
}

#[test]
fn cycles_follow_discovery_order() {
    // [3,57,204] under a null boundary.
    let g = graph(&[6, 5, 4, 7, 2, 3, 0, 1]);
    let cs: Vec<Vec<Config>> = g.cycles().iter().map(|c| c.nodes().to_vec()).collect();
    assert_eq!(cs, vec![vec![0, 6], vec![1, 5, 3, 7], vec![2, 4]]);
}

#[test]
fn tails_do_not_form_cycles() {
    // 0 -> 1 -> 2 -> 1, 3 -> 0
    let g = graph(&[1, 2, 1, 0]);
    let cs = g.cycles();
    assert_eq!(cs.len(), 1);
    assert_eq!(cs[0].nodes(), &[1, 2]);
    assert!(!g.is_bijective());
}

#[test]
fn render_lists_cycles_then_tails() {
    let g = graph(&[1, 2, 1, 0]);
    assert_eq!(g.render(), "1 --> 2 --> 1\n0 --> 1\n3 --> 0");
}

#[test]
fn differing_configs_lists_changed_successors() {
    let g = graph(&[0, 1, 2, 3]);
    let h = graph(&[0, 2, 1, 3]);
    assert_eq!(g.differing_configs(&h), vec![1, 2]);
    assert!(g.differing_configs(&g).is_empty());
}

#[test]
fn next_permutation_walks_lexicographically() {
    let mut p = vec![0, 1, 2];
    let mut seen = vec![p.clone()];
    while next_permutation(&mut p) {
        seen.push(p.clone());
    }
    assert_eq!(
        seen,
        vec![
            vec![0, 1, 2],
            vec![0, 2, 1],
            vec![1, 0, 2],
            vec![1, 2, 0],
            vec![2, 0, 1],
            vec![2, 1, 0],
        ]
    );
    // wraps back to sorted
    assert_eq!(p, vec![0, 1, 2]);
}

#[test]
fn rotated_identity_puts_head_first() {
    let mut p = Vec::new();
    rotated_identity(5, 3, &mut p);
    assert_eq!(p, vec![3, 0, 1, 2, 4]);
}

#[test]
fn permute_into_matches_equals_under() {
    let g = graph(&[1, 0, 3, 3]);
    let perm = vec![2, 3, 0, 1];
    let mut out = vec![0; 4];
    g.permute_into(&perm, &mut out);
    let h = graph(&out);
    assert!(g.equals_under(&perm, &h));
    assert!(are_isomorphic_graphs(&g, &h));
}

#[test]
fn bare_isomorphism_distinguishes_cycle_shapes() {
    let two_swaps = graph(&[1, 0, 3, 2]);
    let four_cycle = graph(&[1, 2, 3, 0]);
    let relabeled = graph(&[2, 3, 0, 1]);
    assert!(!are_isomorphic_graphs(&two_swaps, &four_cycle));
    assert!(are_isomorphic_graphs(&two_swaps, &relabeled));
}

fn arb_graph() -> impl Strategy<Value = Vec<Config>> {
    (1usize..=6).prop_flat_map(|bits| {
        let n = 1 << bits;
        proptest::collection::vec(0..n, n)
    })
}

proptest! {
    #[test]
    fn cycles_partition_recurrent_nodes(next in arb_graph()) {
        let g = TransitionGraph::new(next.clone()).unwrap();
        let cs = g.cycles();
        let mut on_cycle = HashSet::new();
        for c in &cs {
            prop_assert!(!c.is_empty());
            for &node in c.nodes() {
                prop_assert!(on_cycle.insert(node), "node {} in two cycles", node);
            }
            // successor order
            for (k, &node) in c.nodes().iter().enumerate() {
                prop_assert_eq!(next[node], c.nodes()[(k + 1) % c.len()]);
            }
        }
        for start in 0..next.len() {
            // recurrent iff reachable from itself within len steps
            let mut cur = next[start];
            let mut recurrent = cur == start;
            for _ in 0..next.len() {
                if recurrent {
                    break;
                }
                cur = next[cur];
                recurrent = cur == start;
            }
            prop_assert_eq!(recurrent, on_cycle.contains(&start));
        }
        let covered: usize = cs.iter().map(Cycle::len).sum();
        prop_assert_eq!(covered == next.len(), g.is_bijective());
    }

    #[test]
    fn render_mentions_every_node(next in arb_graph()) {
        let g = TransitionGraph::new(next).unwrap();
        let text = g.render();
        let first_tokens: HashSet<Config> = text
            .lines()
            .flat_map(|l| l.split(" --> "))
            .map(|t| t.parse().unwrap())
            .collect();
        prop_assert_eq!(first_tokens.len(), g.len());
    }
}

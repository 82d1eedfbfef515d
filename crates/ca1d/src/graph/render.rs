//! Plain-text picture of a transition graph.

use std::fmt::Write;

use super::TransitionGraph;

pub(super) fn render(graph: &TransitionGraph) -> String {
    let mut out = String::new();
    let mut printed = vec![false; graph.len()];

    for cycle in graph.cycles() {
        if !out.is_empty() {
            out.push('\n');
        }
        for &node in cycle.nodes() {
            printed[node] = true;
            let _ = write!(out, "{node} --> ");
        }
        let _ = write!(out, "{}", cycle.nodes()[0]);
    }

    for start in 0..graph.len() {
        if printed[start] {
            continue;
        }
        if !out.is_empty() {
            out.push('\n');
        }
        let _ = write!(out, "{start}");
        let mut cur = start;
        while !printed[cur] {
            printed[cur] = true;
            cur = graph.next(cur);
            let _ = write!(out, " --> {cur}");
        }
    }
    out
}

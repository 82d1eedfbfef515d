//! Cycle-reversal explorer.
//!
//! A candidate graph reverses the arcs of a chosen subset of cycles
//! (`candidate[next[c]] = c` for `c` on a chosen cycle) and copies every other
//! arc forward. A subset is a reversed isomorphism iff some rule vector on
//! the same geometry produces the candidate.

use rayon::prelude::*;

use super::RuleExtractor;
use crate::automaton::{Automaton, Config};
use crate::cfg::SearchCfg;
use crate::error::CaError;
use crate::graph::{Cycle, TransitionGraph};
use crate::linear::RuleVector;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReversalOutcome {
    /// Bit `i` set: cycle `i` is reversed.
    pub subset: u64,
    /// `subset` in binary, one digit per cycle, last cycle first.
    pub pattern: String,
    /// Some reversed cycle has more than two nodes.
    pub non_trivial: bool,
    pub rules: RuleVector,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReversalReport {
    pub cycles: Vec<Cycle>,
    pub candidates_tested: u64,
    /// Extractable subsets, ascending.
    pub outcomes: Vec<ReversalOutcome>,
}

/// Reversal behaviour restricted to cycles of more than two nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReversalSummary {
    pub has_reversed_isomorphisms: bool,
    /// Reversing all of them at once is extractable.
    pub trivial_partition: bool,
    /// Some proper, non-empty subset is extractable.
    pub non_trivial_partitions: bool,
}

/// Candidate graph for `subset` over `cycles`, written into `out`.
pub fn reversed_graph(graph: &TransitionGraph, cycles: &[Cycle], subset: u64, out: &mut [Config]) {
    out.copy_from_slice(graph.as_slice());
    for (i, cycle) in cycles.iter().enumerate() {
        if (subset >> i) & 1 == 1 {
            for &c in cycle.nodes() {
                out[graph.next(c)] = c;
            }
        }
    }
}

/// Try every non-empty subset of `cycles`; `Some` for the extractable ones.
fn scan_subsets(
    graph: &TransitionGraph,
    extractor: &RuleExtractor,
    cycles: &[Cycle],
    cfg: &SearchCfg,
) -> Result<Vec<(u64, RuleVector)>, CaError> {
    let total = 1u64 << cycles.len();
    let probe = |subset: u64| {
        let mut candidate = vec![0; graph.len()];
        reversed_graph(graph, cycles, subset, &mut candidate);
        extractor.extract(&candidate).map(|rules| (subset, rules))
    };
    if cfg.parallel {
        cfg.install(|| (1..total).into_par_iter().filter_map(probe).collect())
    } else {
        Ok((1..total).filter_map(probe).collect())
    }
}

fn check_cycle_count(count: usize, cfg: &SearchCfg) -> Result<(), CaError> {
    if count > cfg.max_reversal_cycles || count >= u64::BITS as usize {
        return Err(CaError::TooManyCycles {
            cycles: count,
            max: cfg.max_reversal_cycles,
        });
    }
    Ok(())
}

/// Every extractable non-empty subset of the automaton's cycles.
pub fn explore_reversals(a: &Automaton, cfg: &SearchCfg) -> Result<ReversalReport, CaError> {
    let cycles = a.cycles();
    let k = cycles.len();
    check_cycle_count(k, cfg)?;
    let extractor = RuleExtractor::new(a);
    let found = scan_subsets(a.graph(), &extractor, &cycles, cfg)?;
    let candidates_tested = (1u64 << k) - 1;
    tracing::debug!(cycles = k, candidates_tested, extractable = found.len(), "reversal scan");

    let outcomes = found
        .into_iter()
        .map(|(subset, rules)| ReversalOutcome {
            subset,
            pattern: format!("{subset:0k$b}"),
            non_trivial: cycles
                .iter()
                .enumerate()
                .any(|(i, c)| (subset >> i) & 1 == 1 && !c.is_trivial()),
            rules,
        })
        .collect();
    Ok(ReversalReport {
        cycles,
        candidates_tested,
        outcomes,
    })
}

/// Reversal summary over the cycles of more than two nodes.
pub fn reversal_summary(a: &Automaton, cfg: &SearchCfg) -> Result<ReversalSummary, CaError> {
    let cycles: Vec<Cycle> = a.cycles().into_iter().filter(|c| !c.is_trivial()).collect();
    if cycles.is_empty() {
        return Ok(ReversalSummary::default());
    }
    check_cycle_count(cycles.len(), cfg)?;
    let all = (1u64 << cycles.len()) - 1;
    let found = scan_subsets(a.graph(), &RuleExtractor::new(a), &cycles, cfg)?;
    let trivial_partition = found.iter().any(|&(s, _)| s == all);
    let non_trivial_partitions = found.iter().any(|&(s, _)| s != all);
    Ok(ReversalSummary {
        has_reversed_isomorphisms: trivial_partition || non_trivial_partitions,
        trivial_partition,
        non_trivial_partitions,
    })
}

//! Brute-force isomorphism search over configuration permutations.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;

use super::RuleExtractor;
use crate::automaton::{Automaton, Config, Rule};
use crate::cfg::SearchCfg;
use crate::error::CaError;
use crate::graph::{next_permutation, rotated_identity};
use crate::linear::RuleVector;

/// A relabeling of the configuration space and the rules that realize the
/// relabeled graph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Isomorphism {
    pub permutation: Vec<Config>,
    pub rules: RuleVector,
}

/// Run `scan` once per head `0..n`, on rayon workers when `cfg.parallel`.
fn for_each_head<F>(n: usize, cfg: &SearchCfg, scan: F) -> Result<(), CaError>
where
    F: Fn(Config) + Sync + Send,
{
    if cfg.parallel {
        cfg.install(|| (0..n).into_par_iter().for_each(&scan))
    } else {
        (0..n).for_each(scan);
        Ok(())
    }
}

/// Visit every permutation with `perm[0] == head` until `visit` returns false.
fn scan_head(n: usize, head: Config, mut visit: impl FnMut(&[Config]) -> bool) {
    let mut perm = Vec::with_capacity(n);
    rotated_identity(n, head, &mut perm);
    loop {
        if !visit(&perm) {
            return;
        }
        if !next_permutation(&mut perm[1..]) {
            return;
        }
    }
}

/// Is there a permutation `p` with `p(a[c]) == b[p(c)]` for every `c`?
///
/// Different sizes and different cycle-length multisets answer `false`
/// without searching. Otherwise workers scan disjoint heads and poll one
/// shared flag between probes, so at most one probe per worker runs after
/// a match.
pub fn exists_isomorphism(a: &Automaton, b: &Automaton, cfg: &SearchCfg) -> Result<bool, CaError> {
    if a.num_configs() != b.num_configs() || !a.has_cycle_structure_as(b) {
        return Ok(false);
    }
    let n = a.num_configs();
    let (ga, gb) = (a.graph(), b.graph());
    let found = AtomicBool::new(false);
    for_each_head(n, cfg, |head| {
        scan_head(n, head, |perm| {
            if found.load(Ordering::Relaxed) {
                return false;
            }
            if ga.equals_under(perm, gb) {
                tracing::debug!(head, "isomorphism found");
                found.store(true, Ordering::Relaxed);
                return false;
            }
            true
        });
    })?;
    Ok(found.load(Ordering::Relaxed))
}

/// Call `sink` for every permutation whose relabeled graph is realized by
/// some rule vector on the same geometry.
///
/// In parallel mode `sink` runs under a mutex, in no particular order.
pub fn for_each_isomorphism<F>(a: &Automaton, cfg: &SearchCfg, sink: F) -> Result<(), CaError>
where
    F: FnMut(&[Config], RuleVector) + Send,
{
    let n = a.num_configs();
    let graph = a.graph();
    let extractor = RuleExtractor::new(a);
    let sink = Mutex::new(sink);
    for_each_head(n, cfg, |head| {
        let mut image = vec![0; n];
        let mut seen = vec![0 as Rule; a.num_cells()];
        let mut ones = vec![0 as Rule; a.num_cells()];
        let mut matches = 0usize;
        scan_head(n, head, |perm| {
            graph.permute_into(perm, &mut image);
            if extractor.extract_into(&image, &mut seen, &mut ones) {
                matches += 1;
                if let Ok(mut emit) = sink.lock() {
                    (*emit)(perm, RuleVector::new(ones.clone()));
                }
            }
            true
        });
        tracing::trace!(head, matches, "head scanned");
    })
}

/// Every `(permutation, rules)` pair, sorted by permutation.
pub fn isomorphic_rule_vectors(a: &Automaton, cfg: &SearchCfg) -> Result<Vec<Isomorphism>, CaError> {
    let mut out = Vec::new();
    for_each_isomorphism(a, cfg, |perm, rules| {
        out.push(Isomorphism {
            permutation: perm.to_vec(),
            rules,
        })
    })?;
    out.sort_unstable_by(|x, y| x.permutation.cmp(&y.permutation));
    tracing::debug!(count = out.len(), "isomorphic rule vectors");
    Ok(out)
}

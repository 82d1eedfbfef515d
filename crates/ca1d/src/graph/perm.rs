//! Permutations of the configuration space.

use super::TransitionGraph;
use crate::automaton::Config;

/// Rearrange `xs` into the next lexicographically greater permutation.
/// Returns `false` (leaving `xs` sorted ascending) after the last one.
pub fn next_permutation(xs: &mut [Config]) -> bool {
    if xs.len() < 2 {
        return false;
    }
    let mut i = xs.len() - 1;
    while i > 0 && xs[i - 1] >= xs[i] {
        i -= 1;
    }
    if i == 0 {
        xs.reverse();
        return false;
    }
    let mut j = xs.len() - 1;
    while xs[j] <= xs[i - 1] {
        j -= 1;
    }
    xs.swap(i - 1, j);
    xs[i..].reverse();
    true
}

/// Identity permutation of `0..n` with `head` rotated to the front:
/// `[head, 0, 1, .., head - 1, head + 1, ..]`. The tail is sorted, so
/// `next_permutation` over it visits every permutation with `perm[0] == head`.
pub fn rotated_identity(n: usize, head: Config, perm: &mut Vec<Config>) {
    perm.clear();
    perm.push(head);
    perm.extend((0..n).filter(|&c| c != head));
}

/// Brute-force isomorphism test of two bare graphs (serial, no pruning).
pub fn are_isomorphic_graphs(g: &TransitionGraph, h: &TransitionGraph) -> bool {
    if g.len() != h.len() {
        return false;
    }
    let mut perm: Vec<Config> = (0..g.len()).collect();
    loop {
        if g.equals_under(&perm, h) {
            return true;
        }
        if !next_permutation(&mut perm) {
            return false;
        }
    }
}

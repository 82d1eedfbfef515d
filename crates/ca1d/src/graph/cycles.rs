//! Cycle decomposition of a functional graph.
//!
//! Walk forward from every unvisited node. A walk ends either on a node seen
//! by an earlier walk (it is a tail feeding a known component, no new cycle),
//! or on a node of the current walk (the suffix from that node is a new
//! cycle). Each node joins exactly one walk, so the pass is linear and no node
//! is ever claimed by two cycles.

use crate::automaton::Config;

/// Nodes of one directed cycle, in successor order starting at the node
/// where the discovering walk closed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cycle {
    nodes: Vec<Config>,
}

impl Cycle {
    pub fn nodes(&self) -> &[Config] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, config: Config) -> bool {
        self.nodes.contains(&config)
    }

    /// Fixed points and 2-cycles: reversing them yields the same graph.
    pub fn is_trivial(&self) -> bool {
        self.nodes.len() <= 2
    }
}

const UNSEEN: u32 = u32::MAX;

pub(super) fn decompose(next: &[Config]) -> Vec<Cycle> {
    // walk_of[c]: index of the walk that first reached c.
    let mut walk_of = vec![UNSEEN; next.len()];
    let mut cycles = Vec::new();
    let mut walk: Vec<Config> = Vec::new();
    for (walk_id, start) in (0..next.len()).enumerate() {
        if walk_of[start] != UNSEEN {
            continue;
        }
        let walk_id = walk_id as u32;
        walk.clear();
        let mut cur = start;
        while walk_of[cur] == UNSEEN {
            walk_of[cur] = walk_id;
            walk.push(cur);
            cur = next[cur];
        }
        if walk_of[cur] == walk_id {
            let from = walk.iter().position(|&c| c == cur).unwrap_or(0);
            cycles.push(Cycle {
                nodes: walk[from..].to_vec(),
            });
        }
    }
    cycles
}

//! Random reversible ECA candidates from rule-group tables.
//!
//! Purpose
//! - Supply rule vectors for the "random reversible / single-cycle /
//!   reversed-isomorphable ECA" listings without enumerating `256^n` vectors.
//!
//! Why this design
//! - Each table entry is a group of rules plus the index of the group table
//!   the next cell draws from: a finite-state chain over rule groups, walked
//!   left to right. Null boundaries close with a dedicated last-cell table;
//!   periodic ones draw the last cell from the regular tables.
//! - Randomness is always an explicit `Rng`. Every sample carries the seed
//!   that regenerates it (`draw_seeded`).
//! - The tables are data, not a proof: callers that need reversibility use
//!   `draw_reversible`, which checks the transition graph and redraws.

use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::automaton::{Automaton, Boundary, Rule};
use crate::cfg::MAX_SIZE;
use crate::error::CaError;

/// Smallest size the tables cover (first, regular and last cell).
pub const MIN_SIZE: usize = 3;

/// Rules of one group and the group table index for the next cell.
type RuleGroup = (&'static [Rule], usize);

const NULL_FIRST: &[RuleGroup] = &[(&[3, 12], 0), (&[5, 10], 1), (&[6, 9], 2)];

const PERIODIC_FIRST: &[RuleGroup] = &[
    (&[51, 204], 3),
    (&[85, 170], 4),
    (&[102, 153], 5),
    (&[23, 53, 83, 113, 142, 172, 202, 232], 6),
    (&[27, 57, 78, 108, 147, 177, 198, 228], 7),
    (&[89, 106, 149, 166], 8),
    (&[86, 101, 154, 169], 9),
    (&[43, 58, 77, 92, 163, 178, 197, 212], 10),
    (&[39, 54, 99, 114, 141, 156, 201, 216], 11),
];

const NULL_REGULAR: &[&[RuleGroup]] = &[
    &[
        (&[51, 60, 195, 204], 0),
        (&[85, 90, 165, 170], 1),
        (&[102, 105, 150, 153], 2),
        (&[53, 58, 83, 92, 163, 172, 197, 202], 3),
        (&[54, 57, 99, 108, 147, 156, 198, 201], 4),
        (&[86, 89, 101, 106, 149, 154, 166, 169], 5),
    ],
    &[(
        &[15, 30, 45, 60, 75, 90, 105, 120, 135, 150, 165, 180, 195, 210, 225, 240],
        0,
    )],
    &[
        (&[15, 51, 204, 240], 0),
        (&[85, 105, 150, 170], 1),
        (&[90, 102, 153, 165], 2),
        (&[23, 43, 77, 113, 142, 178, 212, 232], 3),
        (&[27, 39, 78, 114, 141, 177, 216, 228], 4),
        (&[86, 89, 101, 106, 149, 154, 166, 169], 5),
    ],
    &[(&[60, 195], 0), (&[90, 165], 3), (&[105, 150], 4)],
    &[
        (&[51, 204], 0),
        (&[85, 170], 1),
        (&[102, 153], 2),
        (&[86, 89, 90, 101, 105, 106, 149, 150, 154, 165, 166, 169], 5),
    ],
    &[(&[15, 240], 0), (&[105, 150], 3), (&[90, 165], 4)],
];

const NULL_LAST: &[&[Rule]] = &[
    &[17, 20, 65, 68],
    &[5, 20, 65, 80],
    &[5, 17, 68, 80],
    &[20, 65],
    &[17, 68],
    &[5, 80],
];

const PERIODIC_REGULAR: &[&[RuleGroup]] = &[
    &[(
        &[
            53, 54, 57, 58, 85, 86, 89, 90, 101, 102, 105, 106, 149, 150, 153, 154, 165, 166, 169,
            170, 197, 198, 201, 202,
        ],
        2,
    )],
    &[(
        &[
            83, 85, 86, 89, 90, 92, 99, 101, 102, 105, 106, 108, 147, 149, 150, 153, 154, 156, 163,
            165, 166, 169, 170, 172,
        ],
        2,
    )],
    &[(
        &[85, 86, 89, 90, 101, 102, 105, 106, 149, 150, 153, 154, 165, 166, 169, 170],
        2,
    )],
    &[
        (&[51, 60, 195, 204], 3),
        (&[85, 90, 165, 170], 4),
        (&[102, 105, 150, 153], 5),
        (&[53, 58, 83, 92, 163, 172, 197, 202], 12),
        (&[54, 57, 99, 108, 147, 156, 198, 201], 13),
        (&[86, 89, 101, 106, 149, 154, 166, 169], 14),
    ],
    &[
        (&[29, 46, 89, 106, 149, 166, 209, 226], 0),
        (&[71, 86, 101, 116, 139, 154, 169, 184], 1),
        (&[85, 102, 153, 170], 2),
        (
            &[15, 30, 45, 60, 75, 90, 105, 120, 135, 150, 165, 180, 195, 210, 225, 240],
            3,
        ),
    ],
    &[
        (&[15, 51, 204, 240], 3),
        (&[85, 105, 150, 170], 4),
        (&[90, 102, 153, 165], 5),
        (&[23, 43, 77, 113, 142, 178, 212, 232], 12),
        (&[27, 39, 78, 114, 141, 177, 216, 228], 13),
        (&[86, 89, 101, 106, 149, 154, 166, 169], 14),
    ],
    &[
        (
            &[
                77, 78, 85, 86, 89, 101, 102, 106, 113, 114, 141, 142, 149, 153, 154, 166, 169,
                170, 177, 178,
            ],
            2,
        ),
        (&[60, 195], 3),
        (&[90, 165], 12),
        (&[105, 150], 13),
    ],
    &[
        (&[85, 170], 4),
        (&[102, 153], 5),
        (
            &[
                29, 30, 45, 46, 51, 89, 90, 105, 106, 149, 150, 165, 166, 204, 209, 210, 225, 226,
            ],
            8,
        ),
        (&[86, 101, 154, 169], 14),
    ],
    &[
        (
            &[
                53, 54, 57, 58, 85, 86, 89, 101, 102, 106, 149, 153, 154, 166, 169, 170, 197, 198,
                201, 202,
            ],
            2,
        ),
        (&[15, 240], 3),
        (&[105, 150], 12),
        (&[90, 165], 13),
    ],
    &[
        (
            &[
                83, 85, 89, 92, 99, 101, 102, 106, 108, 147, 149, 153, 154, 156, 163, 166, 170, 172,
            ],
            2,
        ),
        (&[15, 240], 3),
        (&[105, 150], 12),
        (&[86, 90, 165, 169], 13),
    ],
    &[
        (
            &[
                23, 27, 39, 43, 85, 86, 89, 101, 102, 106, 149, 153, 154, 166, 169, 170, 212, 216,
                228, 232,
            ],
            2,
        ),
        (&[60, 195], 3),
        (&[90, 165], 12),
        (&[105, 150], 13),
    ],
    &[
        (&[51, 204], 3),
        (&[85, 170], 4),
        (&[102, 153], 5),
        (
            &[71, 75, 86, 90, 101, 105, 116, 120, 135, 139, 150, 154, 165, 169, 180, 184],
            9,
        ),
        (&[89, 106, 149, 166], 14),
    ],
    &[
        (&[85, 86, 89, 101, 102, 106, 149, 153, 154, 166, 169, 170], 2),
        (&[60, 195], 3),
        (&[90, 165], 12),
        (&[105, 150], 13),
    ],
    &[
        (&[51, 204], 3),
        (&[85, 170], 4),
        (&[102, 153], 5),
        (&[86, 89, 90, 101, 105, 106, 149, 150, 154, 165, 166, 169], 14),
    ],
    &[
        (&[85, 86, 89, 101, 102, 106, 149, 153, 154, 166, 169, 170], 2),
        (&[15, 240], 3),
        (&[105, 150], 12),
        (&[90, 165], 13),
    ],
];

/// Error type of the generator.
#[derive(Debug)]
pub enum GeneratorError {
    InvalidParams { reason: String },
    /// No accepted sample within the attempt budget.
    Exhausted { attempts: usize },
    Automaton(CaError),
}

impl GeneratorError {
    fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidParams {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidParams { reason } => write!(f, "invalid generator params: {reason}"),
            Self::Exhausted { attempts } => {
                write!(f, "no matching ECA found in {attempts} attempts")
            }
            Self::Automaton(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Automaton(err) => Some(err),
            _ => None,
        }
    }
}

impl From<CaError> for GeneratorError {
    fn from(err: CaError) -> Self {
        Self::Automaton(err)
    }
}

/// Size and boundary of the generated ECAs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReversibleEcaParams {
    pub size: usize,
    pub boundary: Boundary,
}

impl ReversibleEcaParams {
    pub fn new(size: usize, boundary: Boundary) -> Result<Self, GeneratorError> {
        let params = Self { size, boundary };
        params.validate()?;
        Ok(params)
    }

    fn validate(&self) -> Result<(), GeneratorError> {
        if self.size < MIN_SIZE {
            return Err(GeneratorError::invalid(format!(
                "minimum size of ECA is {MIN_SIZE}, got {}",
                self.size
            )));
        }
        if self.size > MAX_SIZE {
            return Err(GeneratorError::invalid(format!(
                "unsupported cellular automaton size {} (max {MAX_SIZE})",
                self.size
            )));
        }
        Ok(())
    }
}

/// A generated automaton and the seed that regenerates it.
#[derive(Clone, Debug)]
pub struct EcaSample {
    pub automaton: Automaton,
    pub seed: u64,
}

fn pick_group<'t, R: Rng + ?Sized>(groups: &'t [RuleGroup], rng: &mut R) -> &'t RuleGroup {
    // tables are non-empty constants
    &groups[rng.gen_range(0..groups.len())]
}

fn pick_rule<R: Rng + ?Sized>(rules: &[Rule], rng: &mut R) -> Rule {
    rules.choose(rng).copied().unwrap_or_default()
}

/// Walk the group chain once. `params` must be valid.
pub fn draw_rules<R: Rng + ?Sized>(params: &ReversibleEcaParams, rng: &mut R) -> Vec<Rule> {
    let (first, regular) = match params.boundary {
        Boundary::Null => (NULL_FIRST, NULL_REGULAR),
        Boundary::Periodic => (PERIODIC_FIRST, PERIODIC_REGULAR),
    };
    let mut rules = Vec::with_capacity(params.size);

    let (group, mut next) = *pick_group(first, rng);
    rules.push(pick_rule(group, rng));
    for _ in 1..params.size - 1 {
        let (group, after) = *pick_group(regular[next], rng);
        rules.push(pick_rule(group, rng));
        next = after;
    }
    let last = match params.boundary {
        Boundary::Null => pick_rule(NULL_LAST[next], rng),
        Boundary::Periodic => pick_rule(pick_group(regular[next], rng).0, rng),
    };
    rules.push(last);
    rules
}

/// One candidate automaton (not checked for reversibility).
pub fn draw<R: Rng + ?Sized>(
    params: &ReversibleEcaParams,
    rng: &mut R,
) -> Result<Automaton, GeneratorError> {
    params.validate()?;
    let rules = draw_rules(params, rng);
    Ok(Automaton::elementary(params.boundary, rules)?)
}

/// Regenerate the candidate identified by `seed`.
pub fn draw_seeded(params: &ReversibleEcaParams, seed: u64) -> Result<Automaton, GeneratorError> {
    draw(params, &mut StdRng::seed_from_u64(seed))
}

/// First candidate that is reversible and satisfies `accept`.
pub fn find<R, P>(
    params: &ReversibleEcaParams,
    rng: &mut R,
    attempts: usize,
    mut accept: P,
) -> Result<EcaSample, GeneratorError>
where
    R: Rng + ?Sized,
    P: FnMut(&Automaton) -> Result<bool, CaError>,
{
    params.validate()?;
    for attempt in 0..attempts {
        let seed = rng.next_u64();
        let automaton = draw_seeded(params, seed)?;
        if !automaton.is_reversible() {
            tracing::trace!(attempt, seed, "rejected irreversible draw");
            continue;
        }
        if accept(&automaton)? {
            tracing::debug!(attempt, seed, rules = %automaton.rules(), "accepted draw");
            return Ok(EcaSample { automaton, seed });
        }
    }
    Err(GeneratorError::Exhausted { attempts })
}

/// Rejection-sample until the drawn automaton is reversible.
pub fn draw_reversible<R: Rng + ?Sized>(
    params: &ReversibleEcaParams,
    rng: &mut R,
    attempts: usize,
) -> Result<EcaSample, GeneratorError> {
    find(params, rng, attempts, |_| Ok(true))
}

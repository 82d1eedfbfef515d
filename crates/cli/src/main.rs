use anyhow::{bail, Context, Result};
use ca1d::api::*;
use clap::{Args, Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use serde_json::{json, Value};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::SubscriberBuilder;

#[derive(Parser, Debug)]
#[command(name = "cli")]
#[command(about = "Transition-graph analysis of binary 1D cellular automata")]
struct Cmd {
    /// Run permutation and reversal searches on the calling thread
    #[arg(long, global = true)]
    serial: bool,

    /// Size of a dedicated worker pool (default: rayon's global pool)
    #[arg(long, global = true)]
    threads: Option<usize>,

    #[command(subcommand)]
    action: Action,
}

/// One automaton: geometry plus one rule per cell.
#[derive(Args, Clone, Debug)]
struct CaArgs {
    /// Number of cells (defaults to the number of rules)
    #[arg(long)]
    cells: Option<usize>,
    #[arg(long, default_value_t = 1)]
    left: usize,
    #[arg(long, default_value_t = 1)]
    right: usize,
    /// n (null) or p (periodic)
    #[arg(long, default_value = "n")]
    boundary: Boundary,
    /// Comma-separated rule numbers, cell 0 first
    #[arg(long, value_delimiter = ',', required = true)]
    rules: Vec<Rule>,
}

impl CaArgs {
    fn build(&self) -> Result<Automaton> {
        let cells = self.cells.unwrap_or(self.rules.len());
        Automaton::new(cells, self.left, self.right, self.boundary, self.rules.clone())
            .context("invalid automaton")
    }
}

#[derive(Args, Clone, Debug)]
struct RandomArgs {
    #[arg(long)]
    cells: usize,
    #[arg(long, default_value = "n")]
    boundary: Boundary,
    /// How many automata to list
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Master seed; each listed automaton reports its own replay seed
    #[arg(long)]
    seed: Option<u64>,
    /// Draws per listed automaton before giving up
    #[arg(long, default_value_t = 1000)]
    attempts: usize,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Geometry, rules and headline properties
    Details(CaArgs),
    /// Successor of every configuration, plus the text rendering
    Graph(CaArgs),
    /// Cycle decomposition
    Cycles(CaArgs),
    /// Every (permutation, rule vector) pair realizing a relabeled graph
    Isomorphisms {
        #[command(flatten)]
        ca: CaArgs,
        /// Print at most this many pairs (the count is always exact)
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Is the automaton isomorphic to one with other rules?
    CheckIsomorphism {
        #[command(flatten)]
        ca: CaArgs,
        /// Rules of the other automaton (same geometry)
        #[arg(long, value_delimiter = ',', required = true)]
        other: Vec<Rule>,
    },
    /// Subset-complemented rule vectors of an additive ECA
    Complemented(CaArgs),
    /// Cycle subsets whose reversal is realized by some rule vector
    Reversed(CaArgs),
    /// Reversal summary over cycles longer than two
    ReversalSummary(CaArgs),
    /// GF(2) characteristic matrix of an additive ECA
    Matrix(CaArgs),
    /// GF(2) characteristic polynomial and complementability
    Polynomial(CaArgs),
    /// Single-bit rule tweaks of a reversible ECA
    Tweak(CaArgs),
    /// RMT-pair complements of a reversible ECA
    RmtComplements(CaArgs),
    /// State/next-neighborhood maps
    SnMaps(CaArgs),
    /// Complementable vectors over the linear ECA rules
    Complementable {
        #[arg(long)]
        cells: usize,
        #[arg(long, default_value = "n")]
        boundary: Boundary,
    },
    /// Random reversible ECAs
    RandomReversible(RandomArgs),
    /// Random reversible ECAs with reversed isomorphisms
    ReversedIsomorphable(RandomArgs),
    /// Random reversible ECAs whose graph is a single cycle
    SingleCycle(RandomArgs),
}

fn main() -> Result<()> {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|s| s.parse::<LevelFilter>().ok())
        .unwrap_or(LevelFilter::INFO);
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let out = execute(&cmd)?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn search_cfg(cmd: &Cmd) -> SearchCfg {
    SearchCfg {
        parallel: !cmd.serial,
        max_threads: cmd.threads,
        ..SearchCfg::default()
    }
}

fn execute(cmd: &Cmd) -> Result<Value> {
    let cfg = search_cfg(cmd);
    match &cmd.action {
        Action::Details(ca) => details(&ca.build()?),
        Action::Graph(ca) => graph(&ca.build()?),
        Action::Cycles(ca) => cycles(&ca.build()?),
        Action::Isomorphisms { ca, limit } => isomorphisms(&ca.build()?, *limit, &cfg),
        Action::CheckIsomorphism { ca, other } => {
            let a = ca.build()?;
            let b = a.with_rules(other.clone()).context("invalid other automaton")?;
            tracing::info!(rules = %a.rules(), other = %b.rules(), "check-isomorphism");
            let isomorphic = exists_isomorphism(&a, &b, &cfg)?;
            Ok(json!({
                "rules": a.rules().as_slice(),
                "other": b.rules().as_slice(),
                "same_cycle_structure": a.has_cycle_structure_as(&b),
                "isomorphic": isomorphic,
            }))
        }
        Action::Complemented(ca) => complemented(&ca.build()?),
        Action::Reversed(ca) => reversed(&ca.build()?, &cfg),
        Action::ReversalSummary(ca) => {
            let a = ca.build()?;
            tracing::info!(rules = %a.rules(), "reversal-summary");
            let s = reversal_summary(&a, &cfg)?;
            Ok(json!({
                "rules": a.rules().as_slice(),
                "has_reversed_isomorphisms": s.has_reversed_isomorphisms,
                "trivial_partition": s.trivial_partition,
                "non_trivial_partitions": s.non_trivial_partitions,
            }))
        }
        Action::Matrix(ca) => matrix(&ca.build()?),
        Action::Polynomial(ca) => polynomial(&ca.build()?),
        Action::Tweak(ca) => tweak(&ca.build()?),
        Action::RmtComplements(ca) => rmt_complements(&ca.build()?),
        Action::SnMaps(ca) => sn_maps(&ca.build()?),
        Action::Complementable { cells, boundary } => complementable(*cells, *boundary),
        Action::RandomReversible(args) => random_listing(args, "random-reversible", |_| Ok(true)),
        Action::ReversedIsomorphable(args) => {
            random_listing(args, "reversed-isomorphable", |a| {
                Ok(reversal_summary(a, &cfg)?.has_reversed_isomorphisms)
            })
        }
        Action::SingleCycle(args) => {
            random_listing(args, "single-cycle", |a| Ok(a.cycles().len() == 1))
        }
    }
}

fn details(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), boundary = %a.boundary(), "details");
    let cycles = a.cycles();
    Ok(json!({
        "cells": a.num_cells(),
        "left_radius": a.left_radius(),
        "right_radius": a.right_radius(),
        "boundary": a.boundary().name(),
        "rules": a.rules().as_slice(),
        "canonical_rules": a.canonical_rules().as_slice(),
        "configurations": a.num_configs(),
        "elementary": a.is_elementary(),
        "reversible": a.is_reversible(),
        "cycles": cycles.len(),
        "one_to_one_or_one_to_many_sn_maps": a.has_one_to_one_or_one_to_many_maps(),
    }))
}

fn graph(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "graph");
    Ok(json!({
        "next": a.graph().as_slice(),
        "text": a.graph().render(),
    }))
}

fn cycles(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "cycles");
    let cycles = a.cycles();
    Ok(json!({
        "reversible": a.is_reversible(),
        "count": cycles.len(),
        "lengths": cycles.iter().map(Cycle::len).collect::<Vec<_>>(),
        "cycles": cycles.iter().map(Cycle::nodes).collect::<Vec<_>>(),
    }))
}

#[derive(Serialize)]
struct IsomorphismRow<'a> {
    permutation: &'a [Config],
    rules: &'a [Rule],
}

fn isomorphisms(a: &Automaton, limit: Option<usize>, cfg: &SearchCfg) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "isomorphisms");
    let found = isomorphic_rule_vectors(a, cfg)?;
    let distinct: std::collections::BTreeSet<&[Rule]> =
        found.iter().map(|iso| iso.rules.as_slice()).collect();
    let rows: Vec<IsomorphismRow<'_>> = found
        .iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|iso| IsomorphismRow {
            permutation: &iso.permutation,
            rules: iso.rules.as_slice(),
        })
        .collect();
    Ok(json!({
        "count": found.len(),
        "distinct_rule_vectors": distinct.len(),
        "isomorphisms": rows,
    }))
}

fn complemented(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "complemented");
    let variants = a.complemented_variants()?;
    let rows: Vec<Value> = variants
        .iter()
        .map(|v| json!({ "rules": v.rules, "same_cycle_structure": v.same_cycle_structure }))
        .collect();
    Ok(json!({
        "complementable": !variants.is_empty(),
        "variants": rows,
    }))
}

fn reversed(a: &Automaton, cfg: &SearchCfg) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "reversed");
    let report = explore_reversals(a, cfg)?;
    let rows: Vec<Value> = report
        .outcomes
        .iter()
        .map(|o| {
            json!({
                "pattern": o.pattern,
                "non_trivial": o.non_trivial,
                "rules": o.rules.as_slice(),
            })
        })
        .collect();
    Ok(json!({
        "cycles": report.cycles.iter().map(Cycle::nodes).collect::<Vec<_>>(),
        "candidates_tested": report.candidates_tested,
        "reversed_isomorphisms": rows,
    }))
}

fn matrix(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "matrix");
    let m = a.characteristic_matrix()?;
    let rows: Vec<Vec<i64>> = m
        .row_iter()
        .map(|row| row.iter().copied().collect())
        .collect();
    Ok(json!({ "rules": a.rules().as_slice(), "matrix": rows }))
}

fn polynomial(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "polynomial");
    let p = a.characteristic_polynomial()?;
    Ok(json!({
        "rules": a.rules().as_slice(),
        "coefficients": p.coefficients(),
        "polynomial": p.to_string(),
        "complementable": p.value_at_one_mod2(),
    }))
}

#[derive(Serialize)]
struct TweakRow<'a> {
    cell: usize,
    rmt: u8,
    rules: &'a [Rule],
    isomorphic: bool,
    configs_affected: usize,
    cycles_affected: usize,
}

fn tweak(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "tweak");
    let tweaks = a.tweaked_variants()?;
    let rows: Vec<TweakRow<'_>> = tweaks
        .iter()
        .map(|t| TweakRow {
            cell: t.cell,
            rmt: t.rmt,
            rules: &t.rules,
            isomorphic: t.same_cycle_structure,
            configs_affected: t.configs_affected,
            cycles_affected: t.cycles_affected,
        })
        .collect();
    Ok(json!({ "rules": a.rules().as_slice(), "tweaks": rows }))
}

fn rmt_complements(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "rmt-complements");
    let rows: Vec<Value> = a
        .rmt_complements()?
        .iter()
        .map(|r| {
            json!({
                "cell": r.cell,
                "rmts": r.rmts,
                "rules": r.rules,
                "isomorphic": r.same_cycle_structure,
            })
        })
        .collect();
    Ok(json!({ "rules": a.rules().as_slice(), "rmt_complements": rows }))
}

fn sn_maps(a: &Automaton) -> Result<Value> {
    tracing::info!(rules = %a.rules(), "sn-maps");
    let render = |set: &std::collections::BTreeSet<Neighborhood>| -> Vec<String> {
        set.iter().map(ToString::to_string).collect()
    };
    let rows: Vec<Value> = a
        .sn_maps()
        .iter()
        .map(|m| {
            json!({
                "cell": m.cell,
                "0": render(&m.from_zero),
                "1": render(&m.from_one),
                "one_to_one_or_one_to_many": m.is_one_to_one_or_one_to_many(),
            })
        })
        .collect();
    Ok(json!({
        "rules": a.rules().as_slice(),
        "sn_maps": rows,
        "all_one_to_one_or_one_to_many": a.has_one_to_one_or_one_to_many_maps(),
    }))
}

fn complementable(cells: usize, boundary: Boundary) -> Result<Value> {
    tracing::info!(cells, %boundary, "complementable");
    let rows: Vec<Value> = complementable_rule_vectors(cells, boundary)?
        .iter()
        .map(|(rv, p)| json!({ "rules": rv.as_slice(), "polynomial": p.to_string() }))
        .collect();
    Ok(json!({ "count": rows.len(), "rule_vectors": rows }))
}

fn random_listing<P>(args: &RandomArgs, what: &str, mut accept: P) -> Result<Value>
where
    P: FnMut(&Automaton) -> Result<bool, CaError>,
{
    tracing::info!(cells = args.cells, boundary = %args.boundary, count = args.count, what, "random");
    if args.count == 0 {
        bail!("--count must be at least 1");
    }
    let params = ReversibleEcaParams::new(args.cells, args.boundary)?;
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut rows = Vec::with_capacity(args.count);
    for _ in 0..args.count {
        let sample = find_reversible(&params, &mut rng, args.attempts, &mut accept)?;
        rows.push(json!({
            "rules": sample.automaton.rules().as_slice(),
            "cycles": sample.automaton.cycles().len(),
            "seed": sample.seed,
        }));
    }
    Ok(json!({ "boundary": args.boundary.name(), "automata": rows }))
}

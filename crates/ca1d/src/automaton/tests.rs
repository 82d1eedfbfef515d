//! Construction, graph building, stepping and per-automaton reports.

use super::*;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn eca(boundary: Boundary, rules: &[Rule]) -> Automaton {
    Automaton::elementary(boundary, rules.to_vec()).expect("valid ECA")
}

#[test]
fn constructor_rejects_domain_violations() {
    assert!(matches!(
        Automaton::new(0, 0, 0, Boundary::Null, vec![]),
        Err(CaError::UnsupportedSize { .. })
    ));
    assert!(matches!(
        Automaton::new(11, 1, 1, Boundary::Null, vec![204; 11]),
        Err(CaError::UnsupportedSize { num_cells: 11, .. })
    ));
    assert!(matches!(
        Automaton::new(8, 3, 1, Boundary::Null, vec![0; 8]),
        Err(CaError::UnsupportedLeftRadius { radius: 3, .. })
    ));
    assert!(matches!(
        Automaton::new(8, 1, 3, Boundary::Null, vec![0; 8]),
        Err(CaError::UnsupportedRightRadius { radius: 3, .. })
    ));
    assert!(matches!(
        Automaton::new(2, 1, 1, Boundary::Periodic, vec![0; 2]),
        Err(CaError::NeighborhoodTooLarge {
            num_cells: 2,
            neighborhood: 3
        })
    ));
    assert!(matches!(
        Automaton::new(3, 1, 1, Boundary::Null, vec![0; 2]),
        Err(CaError::RuleCountMismatch {
            expected: 3,
            found: 2
        })
    ));
    assert_eq!(
        Automaton::new(3, 1, 1, Boundary::Null, vec![0, 256, 0]).unwrap_err(),
        CaError::RuleOutOfRange {
            cell: 1,
            rule: 256,
            max: 255
        }
    );
}

#[test]
fn wide_neighborhoods_accept_full_rule_range() {
    // 2/2 radius: 32-entry tables.
    let a = Automaton::new(5, 2, 2, Boundary::Periodic, vec![u32::MAX as Rule; 5]).unwrap();
    assert_eq!(a.max_rule(), u32::MAX as Rule);
    assert!(a.graph().as_slice().iter().all(|&n| n == 31));
}

#[test]
fn boundary_parses_symbols() {
    assert_eq!("n".parse::<Boundary>().unwrap(), Boundary::Null);
    assert_eq!(" Periodic ".parse::<Boundary>().unwrap(), Boundary::Periodic);
    assert!(matches!(
        "x".parse::<Boundary>(),
        Err(CaError::InvalidBoundary(_))
    ));
}

#[test]
fn neighborhoods_respect_boundary() {
    let null = eca(Boundary::Null, &[0, 0, 0]);
    let periodic = eca(Boundary::Periodic, &[0, 0, 0]);
    // config 100: cell 0 is set
    assert_eq!(null.resolver().resolve(0, 0b100).to_string(), "010");
    assert_eq!(null.resolver().resolve(2, 0b100).to_string(), "000");
    assert_eq!(periodic.resolver().resolve(2, 0b100).to_string(), "001");
    assert_eq!(periodic.resolver().resolve(1, 0b100).to_string(), "100");
    assert_eq!(null.resolver().fixed_zero_bits(0), 0b100);
    assert_eq!(null.resolver().fixed_zero_bits(2), 0b001);
    assert_eq!(periodic.resolver().fixed_zero_bits(0), 0);
}

#[test]
fn identity_rules_give_fixed_points() {
    let a = eca(Boundary::Null, &[204, 204, 204]);
    assert!((0..8).all(|c| a.graph().next(c) == c));
    assert_eq!(a.cycles().len(), 8);
    assert!(a.is_reversible());
}

#[test]
fn rule_51_lifts_the_zero_configuration() {
    // 51 outputs 1 on the all-zero neighborhood, so 000 -> 010.
    let a = eca(Boundary::Null, &[204, 51, 204]);
    assert_eq!(a.graph().next(0), 2);
    assert_eq!(a.graph().as_slice(), &[2, 3, 0, 1, 6, 7, 4, 5]);
    assert!(a.is_reversible());
}

#[test]
fn known_graphs() {
    let a = eca(Boundary::Null, &[3, 57, 204]);
    assert_eq!(a.graph().as_slice(), &[6, 5, 4, 7, 2, 3, 0, 1]);

    let b = eca(Boundary::Periodic, &[60, 90, 150]);
    assert_eq!(b.graph().as_slice(), &[0, 7, 1, 6, 7, 0, 6, 1]);
    assert!(!b.is_reversible());

    let c = eca(Boundary::Null, &[90, 90, 90]);
    assert_eq!(c.graph().as_slice(), &[0, 2, 5, 7, 2, 0, 7, 5]);

    let d = eca(Boundary::Periodic, &[51, 85, 102]);
    assert_eq!(d.graph().as_slice(), &[6, 5, 6, 5, 3, 0, 3, 0]);
    assert_eq!(d.cycles().len(), 1);
}

#[test]
fn four_cell_hybrid_cycles() {
    let a = eca(Boundary::Periodic, &[90, 150, 150, 90]);
    assert_eq!(
        a.graph().as_slice(),
        &[0, 10, 7, 13, 14, 4, 9, 3, 5, 15, 2, 8, 11, 1, 12, 6]
    );
    let cs: Vec<Vec<Config>> = a.cycles().iter().map(|c| c.nodes().to_vec()).collect();
    assert_eq!(
        cs,
        vec![
            vec![0],
            vec![1, 10, 2, 7, 3, 13],
            vec![4, 14, 12, 11, 8, 5],
            vec![6, 9, 15]
        ]
    );
}

#[test]
fn stepping_follows_the_graph() {
    let mut a = eca(Boundary::Null, &[3, 57, 204]);
    a.set_config(1).unwrap();
    assert_eq!(a.current_config(), 1);
    assert_eq!(a.step(), 5);
    assert_eq!(a.step(), 3);
    assert_eq!(a.step(), 7);
    assert_eq!(a.step(), 1);
    assert_eq!(
        a.set_config(8),
        Err(CaError::ConfigOutOfRange {
            config: 8,
            num_configs: 8
        })
    );
}

#[test]
fn randomize_config_is_seed_replayable() {
    let mut a = eca(Boundary::Periodic, &[90, 150, 150, 90]);
    let mut b = a.clone();
    let x = a.randomize_config(&mut StdRng::seed_from_u64(7));
    let y = b.randomize_config(&mut StdRng::seed_from_u64(7));
    assert_eq!(x, y);
    assert!(x < 16);
    assert_eq!(a.step(), a.graph().next(x));
}

#[test]
fn cycle_structure_comparison() {
    let a = eca(Boundary::Null, &[3, 57, 204]);
    let b = eca(Boundary::Null, &[3, 147, 68]);
    let id = eca(Boundary::Null, &[204, 204, 204]);
    assert!(a.has_cycle_structure_as(&b));
    assert!(!a.has_cycle_structure_as(&id));
}

#[test]
fn canonical_rules_clear_unobservable_bits() {
    let a = eca(Boundary::Null, &[204, 204, 204]);
    assert_eq!(a.canonical_rules().as_slice(), &[12, 204, 68]);
    let p = eca(Boundary::Periodic, &[204, 51, 204]);
    assert_eq!(p.canonical_rules(), *p.rules());
    // clearing never changes the dynamics
    let c = a.with_rules(a.canonical_rules().to_vec()).unwrap();
    assert_eq!(c.graph(), a.graph());
}

#[test]
fn affected_configs_counts_touched_cycles() {
    let a = eca(Boundary::Null, &[3, 57, 204]);
    let id = a.with_rules(vec![204, 204, 204]).unwrap();
    let affected = a.affected_configs(&id);
    assert_eq!(affected.configs, (0..8).collect::<Vec<_>>());
    assert_eq!(affected.cycles_affected, 3);
    let same = a.affected_configs(&a);
    assert!(same.configs.is_empty());
    assert_eq!(same.cycles_affected, 0);
}

#[test]
fn complemented_variants_of_complementable_rules() {
    let a = eca(Boundary::Null, &[90, 90, 90]);
    let variants = a.complemented_variants().unwrap();
    assert_eq!(variants.len(), 8);
    assert_eq!(variants[0].rules, vec![90, 90, 90]);
    assert_eq!(variants[1].rules, vec![165, 90, 90]);
    assert_eq!(variants[7].rules, vec![165, 165, 165]);
    // x + 1 is not a factor, so every affine shift is conjugate to the linear map
    assert!(variants.iter().all(|v| v.same_cycle_structure));
}

#[test]
fn complemented_variants_domain() {
    let id = eca(Boundary::Null, &[204, 204, 204]);
    assert!(id.complemented_variants().unwrap().is_empty());
    let nonlinear = eca(Boundary::Null, &[3, 57, 204]);
    assert_eq!(
        nonlinear.complemented_variants(),
        Err(CaError::NotAdditive { rule: 3 })
    );
    let wide = Automaton::new(5, 2, 2, Boundary::Null, vec![0; 5]).unwrap();
    assert!(matches!(
        wide.complemented_variants(),
        Err(CaError::NotElementary { .. })
    ));
}

#[test]
fn rmt_complements_enumerate_sixteen_per_cell() {
    let a = eca(Boundary::Null, &[204, 204, 204]);
    let rows = a.rmt_complements().unwrap();
    assert_eq!(rows.len(), 48);
    assert_eq!(rows[0].cell, 0);
    assert_eq!(rows[0].rmts, [4, 5, 6, 7]);
    assert_eq!(rows[0].rules, vec![204 ^ 0xF0, 204, 204]);
    assert_eq!(rows[15].rmts, [0, 1, 2, 3]);
    assert_eq!(rows[16].cell, 1);
}

#[test]
fn reversible_only_reports_reject_irreversible_automata() {
    let a = eca(Boundary::Periodic, &[51, 85, 102]);
    assert!(matches!(
        a.rmt_complements(),
        Err(CaError::NotReversible { .. })
    ));
    assert!(matches!(
        a.tweaked_variants(),
        Err(CaError::NotReversible { .. })
    ));
}

#[test]
fn tweaks_flip_highest_rmt_first() {
    let a = eca(Boundary::Null, &[204, 204, 204]);
    let rows = a.tweaked_variants().unwrap();
    assert_eq!(rows.len(), 24);
    assert_eq!((rows[0].cell, rows[0].rmt), (0, 7));
    assert_eq!(rows[0].rules, vec![204 ^ 0x80, 204, 204]);
    // cell 0 never sees a 1 on its left under a null boundary
    for row in rows.iter().filter(|r| r.cell == 0 && r.rmt >= 4) {
        assert_eq!(row.configs_affected, 0);
        assert_eq!(row.cycles_affected, 0);
        assert!(row.same_cycle_structure);
    }
    // flipping RMT 2 (010) of the middle cell of the identity breaks it
    let middle = rows.iter().find(|r| r.cell == 1 && r.rmt == 2).unwrap();
    assert!(middle.configs_affected > 0);
    assert!(!middle.same_cycle_structure);
}

#[test]
fn sn_maps_of_identity_split_on_own_state() {
    let a = eca(Boundary::Null, &[204, 204, 204]);
    let maps = a.sn_maps();
    assert_eq!(maps.len(), 3);
    let rendered: Vec<String> = maps[1].from_one.iter().map(|n| n.to_string()).collect();
    assert_eq!(rendered, vec!["010", "011", "110", "111"]);
    assert!(a.has_one_to_one_or_one_to_many_maps());

    let zero = eca(Boundary::Periodic, &[0, 0, 0]);
    assert!(!zero.sn_maps()[0].is_one_to_one_or_one_to_many());
    assert!(!zero.has_one_to_one_or_one_to_many_maps());
}

fn arb_eca() -> impl Strategy<Value = (Vec<Rule>, Boundary)> {
    (3usize..=6).prop_flat_map(|n| {
        (
            proptest::collection::vec(0..=255 as Rule, n),
            prop_oneof![Just(Boundary::Null), Just(Boundary::Periodic)],
        )
    })
}

proptest! {
    #[test]
    fn graph_is_total_and_steps_agree((rules, boundary) in arb_eca(), start in 0usize..64) {
        let mut a = Automaton::elementary(boundary, rules).unwrap();
        prop_assert!(a.graph().as_slice().iter().all(|&n| n < a.num_configs()));
        let start = start % a.num_configs();
        a.set_config(start).unwrap();
        prop_assert_eq!(a.step(), a.graph().next(start));
    }

    #[test]
    fn reversible_iff_bijective((rules, boundary) in arb_eca()) {
        let a = Automaton::elementary(boundary, rules).unwrap();
        prop_assert_eq!(a.is_reversible(), a.graph().is_bijective());
    }
}

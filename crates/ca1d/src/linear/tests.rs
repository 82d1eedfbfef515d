use super::*;
use crate::automaton::Automaton;
use nalgebra::DMatrix;
use proptest::prelude::*;

fn rv(rules: &[Rule]) -> RuleVector {
    RuleVector::new(rules.to_vec())
}

#[test]
fn periodic_matrix_wraps() {
    let m = rv(&[60, 90, 150])
        .characteristic_matrix(Boundary::Periodic)
        .unwrap();
    let expected = DMatrix::from_row_slice(3, 3, &[1, 0, 1, 1, 0, 1, 1, 1, 1]);
    assert_eq!(m, expected);
}

#[test]
fn null_matrix_drops_wrap_entries() {
    let m = rv(&[90, 90, 90])
        .characteristic_matrix(Boundary::Null)
        .unwrap();
    let expected = DMatrix::from_row_slice(3, 3, &[0, 1, 0, 1, 0, 1, 0, 1, 0]);
    assert_eq!(m, expected);
    let hybrid = rv(&[90, 150, 150, 90])
        .characteristic_matrix(Boundary::Null)
        .unwrap();
    assert_eq!(
        hybrid,
        DMatrix::from_row_slice(4, 4, &[0, 1, 0, 0, 1, 1, 1, 0, 0, 1, 1, 1, 0, 0, 1, 0])
    );
}

#[test]
fn complemented_rules_share_dependencies() {
    for (&linear, complement) in LINEAR_RULES.iter().zip([195, 165, 153, 105, 85, 51, 15]) {
        assert_eq!(
            additive_dependencies(linear),
            additive_dependencies(complement)
        );
        assert_eq!(linear + complement, 255);
    }
    assert_eq!(additive_dependencies(30), None);
}

#[test]
fn non_additive_rule_is_reported() {
    assert_eq!(
        rv(&[90, 30, 90]).characteristic_matrix(Boundary::Null),
        Err(CaError::NotAdditive { rule: 30 })
    );
    assert!(!rv(&[90, 30, 90]).is_additive());
    assert!(rv(&[90, 165, 51]).is_additive());
}

#[test]
fn integer_recurrence_before_parity() {
    let m = rv(&[60, 90, 150])
        .characteristic_matrix(Boundary::Periodic)
        .unwrap();
    let p = characteristic_polynomial(&m);
    assert_eq!(p.coefficients(), &[0, -1, -2, 1]);
    assert_eq!(p.reduce_mod2().coefficients(), &[0, 1, 0, 1]);

    // The x term is -2: even, although an early mod-2 reduction would make it odd.
    let m = rv(&[90, 90, 90]).characteristic_matrix(Boundary::Null).unwrap();
    let p = characteristic_polynomial(&m);
    assert_eq!(p.coefficients(), &[0, -2, 0, 1]);
    assert_eq!(p.reduce_mod2().coefficients(), &[0, 0, 0, 1]);

    let m = rv(&[150, 150, 150, 150])
        .characteristic_matrix(Boundary::Periodic)
        .unwrap();
    assert_eq!(characteristic_polynomial(&m).coefficients(), &[-3, 4, 2, -4, 1]);
}

#[test]
fn complementability() {
    // x^3 + x vanishes at 1
    assert!(!rv(&[60, 90, 150]).is_complementable(Boundary::Periodic).unwrap());
    // x^3
    assert!(rv(&[90, 90, 90]).is_complementable(Boundary::Null).unwrap());
    // (x + 1)^3
    let id = rv(&[204, 204, 204]);
    assert_eq!(
        id.characteristic_polynomial(Boundary::Null).unwrap().coefficients(),
        &[1, 1, 1, 1]
    );
    assert!(!id.is_complementable(Boundary::Null).unwrap());
}

#[test]
fn automaton_requires_elementary_geometry() {
    let wide = Automaton::new(5, 2, 2, Boundary::Null, vec![0; 5]).unwrap();
    assert!(matches!(
        wide.characteristic_polynomial(),
        Err(CaError::NotElementary { .. })
    ));
    let a = Automaton::elementary(Boundary::Periodic, vec![60, 90, 150]).unwrap();
    assert_eq!(a.characteristic_polynomial().unwrap().to_string(), "x³ + x");
    assert!(!a.is_complementable().unwrap());
}

#[test]
fn polynomial_display() {
    assert_eq!(Polynomial::new(vec![0, -1, -2, 1]).to_string(), "x³ - 2x² - x");
    assert_eq!(Polynomial::new(vec![1, 1, 1, 1]).to_string(), "x³ + x² + x + 1");
    assert_eq!(Polynomial::new(vec![-1, 3, -3, 1]).to_string(), "x³ - 3x² + 3x - 1");
    assert_eq!(Polynomial::new(vec![0, 0, 0]).to_string(), "Zero polynomial");
    let mut big = vec![0; 11];
    big[10] = 1;
    big[0] = 1;
    assert_eq!(Polynomial::new(big).to_string(), "x¹⁰ + 1");
}

#[test]
fn polynomial_degree_and_value() {
    let p = Polynomial::new(vec![1, 0, 1, 0]);
    assert_eq!(p.degree(), 2);
    assert!(!p.value_at_one_mod2());
    assert!(Polynomial::new(vec![1, 1, 1]).value_at_one_mod2());
    assert_eq!(Polynomial::new(vec![0, 0]).degree(), 0);
}

#[test]
fn rule_vector_display() {
    assert_eq!(rv(&[3, 57, 204]).to_string(), "[ 3 57 204 ]");
}

#[test]
fn complementable_vectors_of_three_cells() {
    let null = complementable_rule_vectors(3, Boundary::Null).unwrap();
    assert_eq!(null.len(), 75);
    assert_eq!(null[0].0.as_slice(), &[90, 60, 90]);
    assert_eq!(null[0].1.coefficients(), &[0, 1, 1, 1]);
    assert_eq!(null[74].0.as_slice(), &[240, 240, 240]);

    let periodic = complementable_rule_vectors(3, Boundary::Periodic).unwrap();
    assert_eq!(periodic.len(), 107);
    assert_eq!(periodic[0].0.as_slice(), &[60, 60, 60]);
    assert_eq!(periodic[1].0.as_slice(), &[60, 60, 90]);
    assert!(periodic.iter().all(|(_, p)| p.value_at_one_mod2()));

    assert!(matches!(
        complementable_rule_vectors(0, Boundary::Null),
        Err(CaError::UnsupportedSize { .. })
    ));
}

fn arb_linear() -> impl Strategy<Value = (Vec<Rule>, Boundary)> {
    (3usize..=8).prop_flat_map(|n| {
        (
            proptest::collection::vec(proptest::sample::select(LINEAR_RULES.to_vec()), n),
            prop_oneof![Just(Boundary::Null), Just(Boundary::Periodic)],
        )
    })
}

proptest! {
    #[test]
    fn polynomial_is_monic_of_full_degree((rules, boundary) in arb_linear()) {
        let n = rules.len();
        let p = RuleVector::new(rules).characteristic_polynomial(boundary).unwrap();
        prop_assert_eq!(p.degree(), n);
        prop_assert_eq!(p.coefficient(n), 1);
        prop_assert!(p.coefficients().iter().all(|&c| c == 0 || c == 1));
    }
}

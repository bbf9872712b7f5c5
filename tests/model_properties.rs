#![expect(missing_docs, reason = "test file")]
#![expect(clippy::expect_used, reason = "test assertions")]

//! Combinatorial properties of generated models.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rstest::rstest;
use symbolon::{
    combinations::binomial,
    model::{
        SectionKind,
        declarations::combine_signature,
        equation::{clauses, equation},
        queries::ThresholdQuery,
    },
    params::Parameters,
    synth::synthesize,
};

/// Every valid tuple with all components at most `max`.
fn valid_tuples(max: usize) -> Vec<Parameters> {
    let mut out = Vec::new();
    for n in 0..=max {
        for np in 0..=max {
            for t in 0..=max {
                for tp in 0..=max {
                    if let Ok(params) = Parameters::new(n, np, t, tp) {
                        out.push(params);
                    }
                }
            }
        }
    }
    out
}

fn expected_clauses(params: &Parameters) -> usize {
    let regular = binomial(params.n(), params.t()).expect("no overflow");
    let consentful = binomial(params.n_consentful(), params.t_consentful()).expect("no overflow");
    regular * consentful
}

fn arb_params() -> impl Strategy<Value = Parameters> {
    (2usize..=6)
        .prop_flat_map(|n| (Just(n), 0..=n, 1..n))
        .prop_flat_map(|(n, np, t)| (Just(n), Just(np), Just(t), 0..=t.min(np)))
        .prop_filter_map("t + t' must be positive", |(n, np, t, tp)| {
            Parameters::new(n, np, t, tp).ok()
        })
}

#[rstest]
fn every_reachable_tuple_generates() {
    let tuples = valid_tuples(7);
    assert!(!tuples.is_empty());
    for params in tuples {
        let artifact = synthesize(&params).expect("valid tuple must generate");
        let text = artifact
            .section(SectionKind::Equation)
            .expect("equation")
            .text();
        assert!(text.starts_with("reduc\n"), "{params}");
        assert!(text.ends_with(" = true.\n\n"), "{params}");
    }
}

#[rstest]
#[case(3, 1, 2, 1, 3, 3, 1)]
#[case(1, 1, 1, 1, 1, 1, 1)]
#[case(5, 2, 3, 1, 20, 10, 2)]
#[case(4, 0, 2, 0, 6, 6, 1)]
fn counts_match_binomials(
    #[case] n: usize,
    #[case] np: usize,
    #[case] t: usize,
    #[case] tp: usize,
    #[case] eq_clauses: usize,
    #[case] regular: usize,
    #[case] consentful: usize,
) {
    let params = Parameters::structural(n, np, t, tp).expect("valid");
    assert_eq!(clauses(&params).expect("clauses").len(), eq_clauses);
    assert_eq!(
        ThresholdQuery::regular(&params)
            .expect("regular")
            .disjuncts()
            .len(),
        regular
    );
    assert_eq!(
        ThresholdQuery::consentful(&params)
            .expect("consentful")
            .disjuncts()
            .len(),
        consentful
    );
}

#[rstest]
fn five_two_three_one_matches_reference_equation_head() {
    let params = Parameters::new(5, 2, 3, 1).expect("valid");
    let text = equation(&params).expect("equation");
    let first = text.lines().nth(1).expect("first clause");
    assert_eq!(
        first,
        "forall sk:secretkey, m:bitstring; verify(pk(sk), m, combine(sign(ksh0(sk), m), \
         sign(ksh1(sk), m), sign(ksh2(sk), m), csign(cksh0(sk), m))) = true;"
    );
    let last = text.lines().nth(20).expect("last clause");
    assert!(last.contains("sign(ksh2(sk), m), sign(ksh3(sk), m), sign(ksh4(sk), m), csign(cksh1(sk), m)"));
    assert!(last.ends_with(" = true."));
}

proptest! {
    #[test]
    fn equation_clauses_are_distinct_and_counted(params in arb_params()) {
        let got = clauses(&params).expect("clauses");
        prop_assert_eq!(got.len(), expected_clauses(&params));
        let unique: BTreeSet<_> = got.iter().collect();
        prop_assert_eq!(unique.len(), got.len());
        prop_assert!(got.windows(2).all(|w| w.first() < w.last()));
        prop_assert!(got.iter().all(|c| c.arity() == params.combine_arity()));
    }

    #[test]
    fn rendered_equation_has_one_line_per_clause(params in arb_params()) {
        let text = equation(&params).expect("equation");
        let lines: Vec<&str> = text.lines().filter(|l| l.starts_with("forall")).collect();
        prop_assert_eq!(lines.len(), expected_clauses(&params));
        let unique: BTreeSet<_> = lines.iter().collect();
        prop_assert_eq!(unique.len(), lines.len());
    }

    #[test]
    fn queries_have_binomial_disjuncts(params in arb_params()) {
        let regular = ThresholdQuery::regular(&params).expect("regular");
        let consentful = ThresholdQuery::consentful(&params).expect("consentful");
        prop_assert_eq!(Some(regular.disjuncts().len()), binomial(params.n(), params.t()));
        prop_assert_eq!(
            Some(consentful.disjuncts().len()),
            binomial(params.n_consentful(), params.t_consentful())
        );
        let rendered = regular.render();
        prop_assert_eq!(rendered.matches(" ||\n").count() + 1, regular.disjuncts().len());
    }

    #[test]
    fn combine_arity_matches_signature_count(params in arb_params()) {
        let artifact = synthesize(&params).expect("model");
        let declarations = artifact
            .section(SectionKind::Declarations)
            .expect("declarations")
            .text();
        let signature = combine_signature(params.combine_arity());
        prop_assert!(declarations.contains(&signature));
        let inner = signature
            .strip_prefix("fun combine(")
            .and_then(|rest| rest.strip_suffix("): bitstring."))
            .expect("combine parameter list");
        prop_assert_eq!(inner.split(", ").count(), params.combine_arity());
    }

    #[test]
    fn generation_is_deterministic(params in arb_params()) {
        let first = synthesize(&params).expect("model").render();
        let second = synthesize(&params).expect("model").render();
        prop_assert_eq!(first, second);
    }
}

use proptest::prelude::*;
use sprob_core::{and_of, discrete, interval, negate, or_of, Energy, PredicateDef};

fn leaf() -> impl Strategy<Value = PredicateDef> {
    prop_oneof![
        (-20i32..20).prop_map(|value| PredicateDef::Discrete { value }),
        (-20i32..20, -20i32..20).prop_map(|(lo, hi)| PredicateDef::Interval { lo, hi }),
    ]
}

fn tree() -> impl Strategy<Value = PredicateDef> {
    leaf().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(|base| PredicateDef::Not {
                base: Some(Box::new(base))
            }),
            (inner.clone(), inner.clone())
                .prop_map(|(a, b)| PredicateDef::And { terms: vec![a, b] }),
            (inner.clone(), inner).prop_map(|(a, b)| PredicateDef::Or { terms: vec![a, b] }),
        ]
    })
}

fn reference(def: &PredicateDef, s: Energy) -> bool {
    match def {
        PredicateDef::Discrete { value } => s == *value,
        PredicateDef::Interval { lo, hi } => *lo <= s && s <= *hi,
        PredicateDef::Not { base } => !reference(base.as_deref().unwrap(), s),
        PredicateDef::And { terms } => terms.iter().all(|t| reference(t, s)),
        PredicateDef::Or { terms } => terms.iter().any(|t| reference(t, s)),
        PredicateDef::Scattered { .. } => unreachable!("not generated"),
    }
}

proptest! {
    #[test]
    fn discrete_matches_only_its_value(s in any::<i32>(), s0 in any::<i32>()) {
        prop_assert_eq!(discrete(s0).contains(s), s == s0);
    }

    #[test]
    fn interval_matches_closed_range(s in -100i32..100, lo in -100i32..100, hi in -100i32..100) {
        let expected = lo <= s && s <= hi;
        prop_assert_eq!(interval(lo, hi).contains(s), expected);
        if lo > hi {
            prop_assert!(!interval(lo, hi).contains(s));
        }
    }

    #[test]
    fn built_trees_agree_with_reference(def in tree(), s in -25i32..25) {
        let built = def.build().unwrap();
        prop_assert_eq!(built.contains(s), reference(&def, s));
    }

    #[test]
    fn negation_and_double_negation(def in tree(), s in -25i32..25) {
        let p = def.build().unwrap();
        prop_assert_eq!(negate(p.clone()).contains(s), !p.contains(s));
        prop_assert_eq!(negate(negate(p.clone())).contains(s), p.contains(s));
    }

    #[test]
    fn and_or_commute_and_associate(a in tree(), b in tree(), c in tree(), s in -25i32..25) {
        let (a, b, c) = (a.build().unwrap(), b.build().unwrap(), c.build().unwrap());
        prop_assert_eq!(
            and_of(a.clone(), b.clone()).contains(s),
            and_of(b.clone(), a.clone()).contains(s)
        );
        prop_assert_eq!(
            or_of(a.clone(), b.clone()).contains(s),
            or_of(b.clone(), a.clone()).contains(s)
        );
        prop_assert_eq!(
            or_of(or_of(a.clone(), b.clone()), c.clone()).contains(s),
            or_of(a.clone(), or_of(b.clone(), c.clone())).contains(s)
        );
        prop_assert_eq!(
            and_of(and_of(a.clone(), b.clone()), c.clone()).contains(s),
            and_of(a.clone(), and_of(b.clone(), c.clone())).contains(s)
        );
        prop_assert_eq!(
            and_of(a.clone(), or_of(b.clone(), c.clone())).contains(s),
            or_of(and_of(a.clone(), b.clone()), and_of(a, c)).contains(s)
        );
    }

    #[test]
    fn de_morgan_holds(a in tree(), b in tree(), s in -25i32..25) {
        let (a, b) = (a.build().unwrap(), b.build().unwrap());
        prop_assert_eq!(
            negate(and_of(a.clone(), b.clone())).contains(s),
            or_of(negate(a.clone()), negate(b.clone())).contains(s)
        );
        prop_assert_eq!(
            negate(or_of(a.clone(), b.clone())).contains(s),
            and_of(negate(a), negate(b)).contains(s)
        );
    }

    #[test]
    fn operators_match_factories(a in tree(), b in tree(), s in -25i32..25) {
        let (a, b) = (a.build().unwrap(), b.build().unwrap());
        prop_assert_eq!((a.clone() & b.clone()).contains(s), and_of(a.clone(), b.clone()).contains(s));
        prop_assert_eq!((a.clone() | b.clone()).contains(s), or_of(a.clone(), b.clone()).contains(s));
        prop_assert_eq!((!a.clone()).contains(s), negate(a).contains(s));
    }
}

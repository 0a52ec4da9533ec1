//! Property tests for the control-identifier comparator.

use oscal_insights::compare_control_ids;
use proptest::prelude::*;
use std::cmp::Ordering;

/// Well-formed control ids: two-letter group, numeric suffix, optional
/// single-digit enhancement (`ac-2`, `ac-2.1`).
fn control_id() -> impl Strategy<Value = String> {
    ("[a-z]{2}", 1u32..=30, proptest::option::of(1u32..=9)).prop_map(
        |(group, major, minor)| match minor {
            Some(minor) => format!("{group}-{major}.{minor}"),
            None => format!("{group}-{major}"),
        },
    )
}

fn cmp(a: &str, b: &str) -> Ordering {
    compare_control_ids(a, b).expect("generated ids are well-formed")
}

proptest! {
    #[test]
    fn prop_reflexive(id in control_id()) {
        prop_assert_eq!(cmp(&id, &id), Ordering::Equal);
    }

    #[test]
    fn prop_antisymmetric(a in control_id(), b in control_id()) {
        prop_assert_eq!(cmp(&a, &b), cmp(&b, &a).reverse());
    }

    #[test]
    fn prop_transitive(a in control_id(), b in control_id(), c in control_id()) {
        if cmp(&a, &b) != Ordering::Greater && cmp(&b, &c) != Ordering::Greater {
            prop_assert_ne!(cmp(&a, &c), Ordering::Greater);
        }
    }

    #[test]
    fn prop_group_prefix_dominates(
        a in control_id(),
        b in control_id(),
    ) {
        let group_a = a.split('-').next().expect("group prefix");
        let group_b = b.split('-').next().expect("group prefix");
        if group_a != group_b {
            prop_assert_eq!(cmp(&a, &b), group_a.cmp(group_b));
        }
    }
}

//! Property-based tests for core domain types.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use std::collections::BTreeSet;

use proptest::prelude::*;

use veneer::core::model::{short_message, Changes};
use veneer::core::types::{Oid, RefName};

/// Strategy for generating ref name components that pass validation.
fn component() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9_-]{0,11}"
}

fn short_names() -> impl Strategy<Value = String> {
    prop::collection::vec(component(), 1..4).prop_map(|parts| parts.join("/"))
}

fn paths() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[a-z]{1,6}(/[a-z]{1,6}){0,2}", 0..6)
}

proptest! {
    #[test]
    fn oid_accepts_any_case_and_normalizes(hex in "[0-9a-fA-F]{40}") {
        let oid = Oid::new(hex.clone()).unwrap();
        prop_assert_eq!(oid.as_str(), hex.to_ascii_lowercase());
        prop_assert_eq!(oid.short(7), &hex.to_ascii_lowercase()[..7]);
    }

    #[test]
    fn oid_rejects_wrong_lengths(hex in "[0-9a-f]{1,39}") {
        prop_assert!(Oid::new(hex).is_err());
    }

    #[test]
    fn oid_rejects_non_hex(prefix in "[0-9a-f]{39}", bad in "[g-z]") {
        let candidate = format!("{}{}", prefix, bad);
        prop_assert!(Oid::new(candidate).is_err());
    }

    #[test]
    fn short_name_strips_exactly_one_known_prefix(name in short_names()) {
        for prefix in ["refs/heads/", "refs/tags/", "refs/remotes/"] {
            let refname = RefName::new(format!("{prefix}{name}")).unwrap();
            prop_assert_eq!(refname.short_name(), name.as_str());
        }
    }

    #[test]
    fn short_name_leaves_other_namespaces_alone(name in short_names()) {
        let full = format!("refs/notes/{name}");
        let refname = RefName::new(full.clone()).unwrap();
        prop_assert_eq!(refname.short_name(), full.as_str());
    }

    #[test]
    fn short_message_is_a_single_line(message in "[ a-z\n]{0,80}") {
        let short = short_message(&message);
        prop_assert!(!short.contains('\n'));
        prop_assert_eq!(short.trim().is_empty(), message.trim().is_empty());
    }

    #[test]
    fn short_message_ignores_everything_after_the_first_paragraph(
        subject in "[a-z]{1,10}( [a-z]{1,10}){0,3}",
        body in "[a-z \n]{0,40}",
    ) {
        let message = format!("\n{subject}\n\n{body}");
        prop_assert_eq!(short_message(&message), subject);
    }

    #[test]
    fn changes_all_is_the_union(added in paths(), modified in paths(), removed in paths()) {
        let expected: BTreeSet<String> = added
            .iter()
            .chain(&modified)
            .chain(&removed)
            .cloned()
            .collect();
        let changes = Changes::new(added, modified, removed);
        prop_assert_eq!(changes.is_empty(), expected.is_empty());
        prop_assert_eq!(changes.all(), expected);
    }
}

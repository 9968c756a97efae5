//! Listing store property-based tests
//!
//! Covers:
//! - Creation assigns a fresh id and the pending status
//! - Invalid submissions leave the store unchanged
//! - Deleting an unknown id is a no-op
//! - Approve touches only the targeted record's status
//! - The public listing only ever shows approved records
//! - The admin partition covers every record exactly once

use std::collections::HashSet;

use proptest::prelude::*;
use shared::{Category, CategoryFilter, ListingStatus, ListingStore, NewListingInput};

// ============================================================================
// Property Test Strategies
// ============================================================================

fn category_strategy() -> impl Strategy<Value = Category> {
    prop::sample::select(Category::ALL.to_vec())
}

fn valid_input_strategy() -> impl Strategy<Value = NewListingInput> {
    (
        "[A-Za-z][A-Za-z ]{0,20}",
        category_strategy(),
        -90.0..90.0f64,
        -180.0..180.0f64,
        prop::collection::vec("http://img/[a-z]{1,8}\\.jpg", 1..4),
        prop::option::of("0[0-9]{9}"),
    )
        .prop_map(|(name, category, lat, lng, photos, phone)| NewListingInput {
            name,
            category,
            description: "Deskripsi usaha".into(),
            address: "Jl. Contoh No. 1".into(),
            latitude: lat.to_string(),
            longitude: lng.to_string(),
            photos,
            phone,
            whatsapp: None,
        })
}

/// A valid submission with exactly one required field broken
fn invalid_input_strategy() -> impl Strategy<Value = NewListingInput> {
    (valid_input_strategy(), 0..7usize, "[a-z]{1,6}").prop_map(|(mut input, which, junk)| {
        match which {
            0 => input.name = String::new(),
            1 => input.description = "  ".into(),
            2 => input.address = String::new(),
            3 => input.latitude = junk,
            4 => input.longitude = String::new(),
            5 => input.photos.clear(),
            _ => input.latitude = "NaN".into(),
        }
        input
    })
}

/// Moderation action applied to the record at an index (modulo store size)
#[derive(Debug, Clone)]
enum Action {
    Approve(usize),
    Reject(usize),
    Delete(usize),
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..16usize).prop_map(Action::Approve),
        (0..16usize).prop_map(Action::Reject),
        (0..16usize).prop_map(Action::Delete),
    ]
}

fn build_store(inputs: Vec<NewListingInput>, actions: Vec<Action>) -> ListingStore {
    let mut store = ListingStore::new();
    for input in inputs {
        store.create(input).expect("valid input");
    }
    for action in actions {
        if store.is_empty() {
            break;
        }
        let pick = |i: usize, store: &ListingStore| store.snapshot()[i % store.len()].id.to_string();
        match action {
            Action::Approve(i) => {
                let id = pick(i, &store);
                store.approve(&id);
            }
            Action::Reject(i) => {
                let id = pick(i, &store);
                store.reject(&id);
            }
            Action::Delete(i) => {
                let id = pick(i, &store);
                store.delete(&id);
            }
        }
    }
    store
}

// ============================================================================
// Property-Based Tests
// ============================================================================

proptest! {
    #[test]
    fn test_create_assigns_fresh_id_and_pending(
        inputs in prop::collection::vec(valid_input_strategy(), 1..10)
    ) {
        let mut store = ListingStore::new();
        let mut seen = HashSet::new();
        for input in inputs {
            let listing = store.create(input).unwrap();
            prop_assert!(!listing.id.as_str().is_empty());
            prop_assert!(seen.insert(listing.id.clone()), "id reused");
            prop_assert_eq!(listing.status, ListingStatus::Pending);
        }
        prop_assert_eq!(store.len(), seen.len());
    }

    #[test]
    fn test_invalid_create_leaves_store_unchanged(
        inputs in prop::collection::vec(valid_input_strategy(), 0..5),
        bad in invalid_input_strategy()
    ) {
        let mut store = build_store(inputs, Vec::new());
        let before = store.snapshot().to_vec();

        prop_assert!(store.create(bad).is_err());
        prop_assert_eq!(store.snapshot(), before.as_slice());
    }

    #[test]
    fn test_delete_unknown_id_is_noop(
        inputs in prop::collection::vec(valid_input_strategy(), 0..6),
        actions in prop::collection::vec(action_strategy(), 0..10)
    ) {
        let mut store = build_store(inputs, actions);
        let before = store.snapshot().to_vec();

        prop_assert!(!store.delete("no-such-listing"));
        prop_assert_eq!(store.snapshot(), before.as_slice());
    }

    #[test]
    fn test_approve_changes_only_target_status(
        inputs in prop::collection::vec(valid_input_strategy(), 1..8),
        actions in prop::collection::vec(action_strategy(), 0..8),
        target in 0..8usize
    ) {
        let mut store = build_store(inputs, actions);
        prop_assume!(!store.is_empty());
        let before = store.snapshot().to_vec();
        let index = target % before.len();
        let id = before[index].id.to_string();

        store.approve(&id);

        let after = store.snapshot();
        prop_assert_eq!(after.len(), before.len());
        for (i, (old, new)) in before.iter().zip(after).enumerate() {
            if i == index {
                let mut expected = old.clone();
                expected.status = ListingStatus::Approved;
                prop_assert_eq!(new, &expected);
            } else {
                prop_assert_eq!(new, old);
            }
        }
    }

    #[test]
    fn test_public_view_shows_only_approved(
        inputs in prop::collection::vec(valid_input_strategy(), 0..10),
        actions in prop::collection::vec(action_strategy(), 0..15)
    ) {
        let store = build_store(inputs, actions);
        let visible: Vec<_> = store.public_query("", CategoryFilter::All)
            .into_iter()
            .map(|l| l.id.clone())
            .collect();
        let approved: Vec<_> = store.snapshot()
            .iter()
            .filter(|l| l.status == ListingStatus::Approved)
            .map(|l| l.id.clone())
            .collect();
        prop_assert_eq!(visible, approved);
    }

    #[test]
    fn test_public_query_results_satisfy_both_predicates(
        inputs in prop::collection::vec(valid_input_strategy(), 0..10),
        actions in prop::collection::vec(action_strategy(), 0..15),
        search in "[a-zA-Z]{0,2}",
        category in prop::option::of(category_strategy())
    ) {
        let store = build_store(inputs, actions);
        let filter = category.map(CategoryFilter::Only).unwrap_or(CategoryFilter::All);
        let results = store.public_query(&search, filter);

        for listing in &results {
            prop_assert_eq!(listing.status, ListingStatus::Approved);
            prop_assert!(listing.name.to_lowercase().contains(&search.to_lowercase()));
            prop_assert!(filter.matches(listing.category));
        }
        let expected = store.snapshot().iter().filter(|l| {
            l.status == ListingStatus::Approved
                && filter.matches(l.category)
                && l.name.to_lowercase().contains(&search.to_lowercase())
        }).count();
        prop_assert_eq!(results.len(), expected);
    }

    #[test]
    fn test_admin_partition_is_complete(
        inputs in prop::collection::vec(valid_input_strategy(), 0..10),
        actions in prop::collection::vec(action_strategy(), 0..15)
    ) {
        let store = build_store(inputs, actions);
        let partition = store.admin_partition();

        let mut ids = HashSet::new();
        for (status, group) in [
            (ListingStatus::Pending, &partition.pending),
            (ListingStatus::Approved, &partition.approved),
            (ListingStatus::Rejected, &partition.rejected),
        ] {
            for listing in group {
                prop_assert_eq!(listing.status, status);
                prop_assert!(ids.insert(listing.id.clone()), "listed twice");
            }
        }
        let all: HashSet<_> = store.snapshot().iter().map(|l| l.id.clone()).collect();
        prop_assert_eq!(ids, all);
        prop_assert_eq!(partition.pending_count(), store.pending_count());
    }
}

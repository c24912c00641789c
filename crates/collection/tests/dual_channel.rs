//! Plain and explicit forms agree for every variant
//!
//! On success the plain form returns exactly what the explicit form wraps in
//! `Ok`. On failure the plain form returns the documented zero value, and a
//! chained call carries the explicit form's error.

use nebula_collection::prelude::*;
use nebula_collection::{Predicate, Variant};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

fn base() -> BoxedCollection {
    collect(json!("scalar"))
}

fn items() -> BoxedCollection {
    collect(json!([3, 1, 2]))
}

fn map() -> BoxedCollection {
    collect(json!({"a": 1, "b": 2}))
}

fn records() -> BoxedCollection {
    collect(json!([{"id": 1, "n": 2}, {"id": 2, "n": 4}]))
}

fn matrix() -> BoxedCollection {
    collect(json!([[1, 2], [3]]))
}

#[rstest]
#[case::base(base(), Variant::Base)]
#[case::items(items(), Variant::Items)]
#[case::map(map(), Variant::Map)]
#[case::records(records(), Variant::Records)]
#[case::matrix(matrix(), Variant::Matrix)]
fn collect_picks_the_variant(#[case] collection: BoxedCollection, #[case] expected: Variant) {
    assert_eq!(collection.variant(), expected);
    assert_eq!(collection.length(), collection.count());
    assert!(collection.pending_error().is_none());
}

#[rstest]
#[case::base(base())]
#[case::items(items())]
#[case::map(map())]
#[case::records(records())]
#[case::matrix(matrix())]
fn reverse_agrees(#[case] collection: BoxedCollection) {
    let plain = collection.reverse();
    match collection.try_reverse() {
        Ok(explicit) => {
            assert_eq!(plain.value(), explicit.value());
            assert!(plain.pending_error().is_none());
        }
        Err(error) => {
            assert_eq!(plain.value(), collection.value());
            assert_eq!(plain.pending_error(), Some(&error));
        }
    }
}

#[rstest]
#[case::base(base())]
#[case::items(items())]
#[case::map(map())]
#[case::records(records())]
#[case::matrix(matrix())]
fn sum_agrees(#[case] collection: BoxedCollection) {
    let key = (collection.variant() == Variant::Records).then_some("n");
    let plain = collection.sum(key);
    match collection.try_sum(key) {
        Ok(explicit) => assert_eq!(plain, explicit),
        Err(_) => assert_eq!(plain, Decimal::ZERO),
    }
}

#[rstest]
#[case::base(base())]
#[case::items(items())]
#[case::map(map())]
#[case::records(records())]
#[case::matrix(matrix())]
fn search_agrees(#[case] collection: BoxedCollection) {
    let needle = json!(2);
    let plain = collection.search(&needle);
    match collection.try_search(&needle) {
        Ok(explicit) => assert_eq!(plain, explicit),
        Err(error) => {
            assert!(error.is_not_implemented());
            assert_eq!(plain, None);
        }
    }
}

#[rstest]
#[case::base(base())]
#[case::items(items())]
#[case::map(map())]
#[case::records(records())]
#[case::matrix(matrix())]
fn to_json_agrees(#[case] collection: BoxedCollection) {
    assert_eq!(collection.to_json(), collection.try_to_json().unwrap());
}

#[rstest]
#[case::base(base())]
#[case::items(items())]
#[case::map(map())]
#[case::records(records())]
#[case::matrix(matrix())]
fn first_agrees(#[case] collection: BoxedCollection) {
    let predicate: Predicate<'_> = &|_, _| true;
    let plain = collection.first(Some(predicate));
    match collection.try_first(Some(predicate)) {
        Ok(explicit) => assert_eq!(plain, explicit),
        Err(_) => assert_eq!(plain, None),
    }
}

#[rstest]
#[case::base(base())]
#[case::items(items())]
#[case::map(map())]
#[case::records(records())]
#[case::matrix(matrix())]
fn pop_agrees(#[case] collection: BoxedCollection) {
    let (rest, removed) = collection.pop();
    match collection.try_pop() {
        Ok((explicit_rest, explicit_removed)) => {
            assert_eq!(rest.value(), explicit_rest.value());
            assert_eq!(removed, explicit_removed);
        }
        Err(error) => {
            assert_eq!(removed, None);
            assert_eq!(rest.pending_error(), Some(&error));
        }
    }
}

#[rstest]
#[case::base(base(), false)]
#[case::items(items(), true)]
#[case::map(map(), true)]
#[case::records(records(), true)]
#[case::matrix(matrix(), true)]
fn dd_agrees(#[case] collection: BoxedCollection, #[case] dumps: bool) {
    let plain = collection.dd();
    match collection.try_dd() {
        Ok(explicit) => {
            assert!(dumps);
            assert_eq!(plain, Some(explicit));
        }
        Err(error) => {
            assert!(!dumps);
            assert_eq!(error, CollectionError::not_implemented("dd"));
            assert_eq!(plain, None);
        }
    }
}

#[rstest]
#[case::base(base())]
#[case::items(items())]
#[case::map(map())]
#[case::records(records())]
#[case::matrix(matrix())]
fn dump_agrees(#[case] collection: BoxedCollection) {
    let mut plain = Vec::<u8>::new();
    let mut explicit = Vec::<u8>::new();
    collection.dump_to(&mut plain);
    match collection.try_dump_to(&mut explicit) {
        Ok(()) => assert_eq!(plain, explicit),
        Err(error) => {
            assert!(error.is_not_implemented());
            assert!(plain.is_empty());
        }
    }
}

#[test]
fn genuinely_empty_results_are_not_errors() {
    let empty = collect(json!([]));
    assert_eq!(empty.try_sum(None), Ok(Decimal::ZERO));
    assert_eq!(empty.try_first(None), Ok(None));
    assert_eq!(empty.try_search(&json!(1)), Ok(None));
    assert_eq!(empty.try_join(","), Ok(String::new()));
    assert!(empty.take(3).pending_error().is_none());
}

#[test]
fn unimplemented_error_text_names_the_operation() {
    let err = base().try_take(2).unwrap_err();
    assert_eq!(
        err.to_string(),
        "operation not implemented for this collection variant: take"
    );
}

#[test]
fn chained_failures_keep_the_first_error() {
    let chained = map().take(1).sort().reverse();
    assert_eq!(
        chained.pending_error(),
        Some(&CollectionError::not_implemented("take"))
    );
    assert_eq!(chained.value(), map().value());
}

#[test]
fn explicit_form_ignores_earlier_pending_errors() {
    let failed = items().pull("a");
    assert!(failed.pending_error().is_some());
    let reversed = failed.try_reverse().unwrap();
    assert!(reversed.pending_error().is_none());
    assert_eq!(reversed.all(), vec![json!(2), json!(1), json!(3)]);
}

#[test]
fn plain_scalar_forms_return_zero_values() {
    let b = base();
    assert_eq!(b.sum(None), Decimal::ZERO);
    assert_eq!(b.mode(None), Vec::<Value>::new());
    assert!(!b.contains(&json!(1)));
    assert!(!b.every(&|_, _| true));
    assert_eq!(b.join(","), "");
    assert_eq!(b.get("a"), None);
    assert_eq!(b.reduce(&|acc, _| acc, json!(1)), Value::Null);
    assert!(b.to_map().is_empty());
    assert!(b.to_int_array().is_empty());
}

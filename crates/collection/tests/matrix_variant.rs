//! Two-dimensional collections

use nebula_collection::prelude::*;
use nebula_collection::{BaseCollection, MatrixCollection, Variant};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[test]
fn collapse_flattens_row_major() {
    let collapsed = collect(json!([[1, 2], [3]])).collapse();
    assert_eq!(collapsed.variant(), Variant::Items);
    assert_eq!(collapsed.value(), Payload::from(json!([1, 2, 3])));
    assert_eq!(collapsed.length(), 3);
}

#[test]
fn collapse_short_circuits_on_an_empty_first_row() {
    let collapsed = collect(json!([[], [3]])).collapse();
    assert_eq!(collapsed.count(), 0);
    assert!(collapsed.pending_error().is_none());
}

#[test]
fn collapse_of_object_rows_yields_records() {
    let collapsed = collect(json!([[{"a": 1}], [{"a": 2}]])).collapse();
    assert_eq!(collapsed.variant(), Variant::Records);
    assert_eq!(collapsed.try_sum(Some("a")), Ok(Decimal::from(3)));
    assert_eq!(collapsed.value(), collect(json!([{"a": 1}, {"a": 2}])).value());
}

#[test]
fn concat_appends_rows() {
    let joined = collect(json!([[1, 2]])).concat(&Payload::from(json!([[3, 4], [5]])));
    assert_eq!(joined.value(), Payload::from(json!([[1, 2], [3, 4], [5]])));
    assert_eq!(joined.length(), 3);
}

#[test]
fn concat_of_an_empty_batch_keeps_the_rows() {
    let matrix = collect(json!([[1, 2]]));
    let joined = matrix.try_concat(&Payload::from(json!([]))).unwrap();
    assert_eq!(joined.variant(), Variant::Matrix);
    assert_eq!(joined.value(), matrix.value());
}

#[test]
fn concat_with_another_shape_is_a_type_mismatch() {
    let matrix = collect(json!([[1]]));
    let err = matrix.try_concat(&Payload::from(json!({"a": 1}))).unwrap_err();
    assert_eq!(err, CollectionError::type_mismatch("concat", "matrix", "map"));

    let plain = matrix.concat(&Payload::from(json!({"a": 1})));
    assert_eq!(plain.pending_error(), Some(&err));
    assert_eq!(plain.value(), matrix.value());
}

#[test]
fn converts_to_rows_and_json() {
    let matrix = collect(json!([[1, "a"], [null]]));
    assert_eq!(
        matrix.to_multi_dimensional_array(),
        vec![vec![json!(1), json!("a")], vec![json!(null)]]
    );
    assert_eq!(matrix.to_json(), r#"[[1,"a"],[null]]"#);
}

#[rstest]
#[case::take("take")]
#[case::reverse("reverse")]
#[case::sum("sum")]
#[case::first("first")]
#[case::push("push")]
#[case::all("all")]
#[case::diff("diff")]
#[case::flip("flip")]
fn stubs_report_the_same_error_as_base(#[case] operation: &str) {
    let matrix: BoxedCollection = Box::new(MatrixCollection::new(vec![vec![json!(1)]]));
    let base: BoxedCollection = Box::new(BaseCollection::new(json!("x")));

    let run = |c: &BoxedCollection| match operation {
        "take" => c.try_take(1).map(|_| ()),
        "reverse" => c.try_reverse().map(|_| ()),
        "sum" => c.try_sum(None).map(|_| ()),
        "first" => c.try_first(None).map(|_| ()),
        "push" => c.try_push(json!(1)).map(|_| ()),
        "all" => c.try_all().map(|_| ()),
        "diff" => c.try_diff(&[]).map(|_| ()),
        "flip" => c.try_flip().map(|_| ()),
        _ => Ok(()),
    };

    let from_matrix = run(&matrix).unwrap_err();
    assert_eq!(from_matrix, run(&base).unwrap_err());
    assert!(from_matrix.is_not_implemented());
    assert_eq!(from_matrix.operation(), Some(operation));
}

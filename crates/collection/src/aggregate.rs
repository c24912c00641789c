//! Decimal aggregation over extracted operands
//!
//! Variants pull their numeric operands out (whole items for flat sequences,
//! one field per record for record sequences) and hand them to these
//! functions. All arithmetic is `rust_decimal`, never `f64`.
//!
//! - **Sum**: checked addition, an empty input sums to zero.
//! - **Average**: sum divided by count.
//! - **Median**: sort, then the midpoint or the mean of the two midpoints.
//! - **Mode**: every most-frequent value, first occurrence first.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{CollectionError, CollectionResult};
use crate::value_utils::{canonical_key, to_decimal, value_type_name};

/// Convert operands to decimals, failing on the first non-numeric one
pub fn decimals<'a, I>(operation: &'static str, operands: I) -> CollectionResult<Vec<Decimal>>
where
    I: IntoIterator<Item = &'a Value>,
{
    operands
        .into_iter()
        .map(|value| {
            to_decimal(value).ok_or_else(|| {
                CollectionError::type_mismatch(operation, "number", value_type_name(value))
            })
        })
        .collect()
}

/// Checked sum, zero for no input
pub fn sum(operation: &'static str, numbers: &[Decimal]) -> CollectionResult<Decimal> {
    numbers.iter().try_fold(Decimal::ZERO, |acc, n| {
        acc.checked_add(*n)
            .ok_or(CollectionError::overflow(operation))
    })
}

/// Arithmetic mean
pub fn mean(operation: &'static str, numbers: &[Decimal]) -> CollectionResult<Decimal> {
    if numbers.is_empty() {
        return Err(CollectionError::empty(operation));
    }
    let total = sum(operation, numbers)?;
    total
        .checked_div(Decimal::from(numbers.len()))
        .ok_or(CollectionError::overflow(operation))
}

/// Smallest value
pub fn min(operation: &'static str, numbers: &[Decimal]) -> CollectionResult<Decimal> {
    numbers
        .iter()
        .copied()
        .min()
        .ok_or(CollectionError::empty(operation))
}

/// Largest value
pub fn max(operation: &'static str, numbers: &[Decimal]) -> CollectionResult<Decimal> {
    numbers
        .iter()
        .copied()
        .max()
        .ok_or(CollectionError::empty(operation))
}

/// Median, mean of the two midpoints for even counts
pub fn median(operation: &'static str, numbers: &[Decimal]) -> CollectionResult<Decimal> {
    if numbers.is_empty() {
        return Err(CollectionError::empty(operation));
    }
    let mut sorted = numbers.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n % 2 == 1 {
        Ok(sorted[n / 2])
    } else {
        sorted[n / 2 - 1]
            .checked_add(sorted[n / 2])
            .and_then(|pair| pair.checked_div(Decimal::TWO))
            .ok_or(CollectionError::overflow(operation))
    }
}

/// Occurrence counts keyed by [`canonical_key`], first occurrence first
pub fn tally<'a, I>(values: I) -> Vec<(Value, usize)>
where
    I: IntoIterator<Item = &'a Value>,
{
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(Value, usize)> = Vec::new();
    for value in values {
        let key = canonical_key(value);
        if let Some(&position) = positions.get(&key) {
            counts[position].1 += 1;
        } else {
            positions.insert(key, counts.len());
            counts.push((value.clone(), 1));
        }
    }
    counts
}

/// Every value sharing the highest occurrence count
pub fn mode<'a, I>(values: I) -> Vec<Value>
where
    I: IntoIterator<Item = &'a Value>,
{
    let counts = tally(values);
    let Some(highest) = counts.iter().map(|(_, count)| *count).max() else {
        return Vec::new();
    };
    counts
        .into_iter()
        .filter(|(_, count)| *count == highest)
        .map(|(value, _)| value)
        .collect()
}

//! Conversion family

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{CollectionCore, settle};
use crate::error::{CollectionError, CollectionResult};

/// Conversions out of the collection
pub trait Convert: CollectionCore {
    /// Items as JSON values (records as objects)
    fn try_all(&self) -> CollectionResult<Vec<Value>> {
        Err(CollectionError::not_implemented("all"))
    }

    fn all(&self) -> Vec<Value> {
        settle(self.try_all(), Vec::new())
    }

    /// Items as machine-width integers
    fn try_to_int_array(&self) -> CollectionResult<Vec<isize>> {
        Err(CollectionError::not_implemented("to_int_array"))
    }

    fn to_int_array(&self) -> Vec<isize> {
        settle(self.try_to_int_array(), Vec::new())
    }

    fn try_to_int64_array(&self) -> CollectionResult<Vec<i64>> {
        Err(CollectionError::not_implemented("to_int64_array"))
    }

    fn to_int64_array(&self) -> Vec<i64> {
        settle(self.try_to_int64_array(), Vec::new())
    }

    fn try_to_number_array(&self) -> CollectionResult<Vec<Decimal>> {
        Err(CollectionError::not_implemented("to_number_array"))
    }

    fn to_number_array(&self) -> Vec<Decimal> {
        settle(self.try_to_number_array(), Vec::new())
    }

    /// Scalar items as strings
    fn try_to_string_array(&self) -> CollectionResult<Vec<String>> {
        Err(CollectionError::not_implemented("to_string_array"))
    }

    fn to_string_array(&self) -> Vec<String> {
        settle(self.try_to_string_array(), Vec::new())
    }

    fn try_to_map(&self) -> CollectionResult<Map<String, Value>> {
        Err(CollectionError::not_implemented("to_map"))
    }

    fn to_map(&self) -> Map<String, Value> {
        settle(self.try_to_map(), Map::new())
    }

    fn try_to_map_array(&self) -> CollectionResult<Vec<Map<String, Value>>> {
        Err(CollectionError::not_implemented("to_map_array"))
    }

    fn to_map_array(&self) -> Vec<Map<String, Value>> {
        settle(self.try_to_map_array(), Vec::new())
    }

    fn try_to_multi_dimensional_array(&self) -> CollectionResult<Vec<Vec<Value>>> {
        Err(CollectionError::not_implemented("to_multi_dimensional_array"))
    }

    fn to_multi_dimensional_array(&self) -> Vec<Vec<Value>> {
        settle(self.try_to_multi_dimensional_array(), Vec::new())
    }

    /// JSON text of the payload
    ///
    /// Shared by every variant; fails only when the payload holds a value
    /// with no JSON form.
    fn try_to_json(&self) -> CollectionResult<String> {
        serde_json::to_string(&self.value()).map_err(|e| CollectionError::serialization(&e))
    }

    fn to_json(&self) -> String {
        settle(self.try_to_json(), String::new())
    }

    /// Items joined with `delimiter`
    fn try_join(&self, delimiter: &str) -> CollectionResult<String> {
        let _ = delimiter;
        Err(CollectionError::not_implemented("join"))
    }

    fn join(&self, delimiter: &str) -> String {
        settle(self.try_join(delimiter), String::new())
    }

    /// Values of `key` across records, joined with `delimiter`
    fn try_implode(&self, key: &str, delimiter: &str) -> CollectionResult<String> {
        let _ = (key, delimiter);
        Err(CollectionError::not_implemented("implode"))
    }

    fn implode(&self, key: &str, delimiter: &str) -> String {
        settle(self.try_implode(key, delimiter), String::new())
    }

    /// JSON value fed to [`ConvertExt::try_to_struct`]
    fn try_mapping_source(&self) -> CollectionResult<Value> {
        Err(CollectionError::not_implemented("to_struct"))
    }
}

/// Generic conversions, kept off [`Convert`] so it stays object safe
pub trait ConvertExt: Convert {
    /// Deserialize the payload into `T`
    fn try_to_struct<T: DeserializeOwned>(&self) -> CollectionResult<T> {
        let source = self.try_mapping_source()?;
        serde_json::from_value(source).map_err(|e| CollectionError::mapping(&e))
    }

    /// Deserialize the payload into `T`, or `T::default()` on failure
    fn to_struct<T: DeserializeOwned + Default>(&self) -> T {
        settle(self.try_to_struct(), T::default())
    }
}

impl<C: Convert + ?Sized> ConvertExt for C {}

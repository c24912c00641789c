//! Transformation family: reshape, reorder, and subset the payload

use rand::RngCore;
use serde_json::Value;

use super::{
    BoxedCollection, CollectionCore, KeyedMapper, Mapper, Predicate, Visitor, recover, recover_pair,
};
use crate::config;
use crate::error::{CollectionError, CollectionResult};

/// Operations producing a reshaped collection
pub trait Transform: CollectionCore {
    // ==================== Field selection ====================

    /// Keep only `keys` (per record for record sequences)
    fn try_select(&self, keys: &[&str]) -> CollectionResult<BoxedCollection> {
        let _ = keys;
        Err(CollectionError::not_implemented("select"))
    }

    fn select(&self, keys: &[&str]) -> BoxedCollection {
        recover(self, self.try_select(keys))
    }

    /// Values of `key` across records, `null` where missing
    fn try_column(&self, key: &str) -> CollectionResult<BoxedCollection> {
        let _ = key;
        Err(CollectionError::not_implemented("column"))
    }

    fn column(&self, key: &str) -> BoxedCollection {
        recover(self, self.try_column(key))
    }

    /// Entries whose key is in `keys`
    fn try_only(&self, keys: &[&str]) -> CollectionResult<BoxedCollection> {
        let _ = keys;
        Err(CollectionError::not_implemented("only"))
    }

    fn only(&self, keys: &[&str]) -> BoxedCollection {
        recover(self, self.try_only(keys))
    }

    /// Entries whose key is not in `keys`
    fn try_except(&self, keys: &[&str]) -> CollectionResult<BoxedCollection> {
        let _ = keys;
        Err(CollectionError::not_implemented("except"))
    }

    fn except(&self, keys: &[&str]) -> BoxedCollection {
        recover(self, self.try_except(keys))
    }

    /// Values of `key` across records, skipping records without it
    fn try_pluck(&self, key: &str) -> CollectionResult<BoxedCollection> {
        let _ = key;
        Err(CollectionError::not_implemented("pluck"))
    }

    fn pluck(&self, key: &str) -> BoxedCollection {
        recover(self, self.try_pluck(key))
    }

    /// Keys of a map as items
    fn try_keys(&self) -> CollectionResult<BoxedCollection> {
        Err(CollectionError::not_implemented("keys"))
    }

    fn keys(&self) -> BoxedCollection {
        recover(self, self.try_keys())
    }

    // ==================== Filtering ====================

    /// Items passing `predicate`
    fn try_filter(&self, predicate: Predicate<'_>) -> CollectionResult<BoxedCollection> {
        let _ = predicate;
        Err(CollectionError::not_implemented("filter"))
    }

    fn filter(&self, predicate: Predicate<'_>) -> BoxedCollection {
        recover(self, self.try_filter(predicate))
    }

    /// Items failing `predicate`
    fn try_reject(&self, predicate: Predicate<'_>) -> CollectionResult<BoxedCollection> {
        let _ = predicate;
        Err(CollectionError::not_implemented("reject"))
    }

    fn reject(&self, predicate: Predicate<'_>) -> BoxedCollection {
        recover(self, self.try_reject(predicate))
    }

    /// Items passing `predicate` and items failing it, order kept in both
    fn try_partition(
        &self,
        predicate: Predicate<'_>,
    ) -> CollectionResult<(BoxedCollection, BoxedCollection)> {
        let _ = predicate;
        Err(CollectionError::not_implemented("partition"))
    }

    fn partition(&self, predicate: Predicate<'_>) -> (BoxedCollection, BoxedCollection) {
        recover_pair(self, self.try_partition(predicate))
    }

    /// Unique items, first occurrence kept
    fn try_unique(&self) -> CollectionResult<BoxedCollection> {
        Err(CollectionError::not_implemented("unique"))
    }

    fn unique(&self) -> BoxedCollection {
        recover(self, self.try_unique())
    }

    // ==================== Mapping ====================

    /// Items replaced by `mapper`'s result
    fn try_map(&self, mapper: Mapper<'_>) -> CollectionResult<BoxedCollection> {
        let _ = mapper;
        Err(CollectionError::not_implemented("map"))
    }

    fn map(&self, mapper: Mapper<'_>) -> BoxedCollection {
        recover(self, self.try_map(mapper))
    }

    /// Map built from `mapper`'s entries; the last entry for a key wins
    fn try_map_with_keys(&self, mapper: KeyedMapper<'_>) -> CollectionResult<BoxedCollection> {
        let _ = mapper;
        Err(CollectionError::not_implemented("map_with_keys"))
    }

    fn map_with_keys(&self, mapper: KeyedMapper<'_>) -> BoxedCollection {
        recover(self, self.try_map_with_keys(mapper))
    }

    /// Map of arrays, grouping `mapper`'s values by its keys
    fn try_map_to_groups(&self, mapper: KeyedMapper<'_>) -> CollectionResult<BoxedCollection> {
        let _ = mapper;
        Err(CollectionError::not_implemented("map_to_groups"))
    }

    fn map_to_groups(&self, mapper: KeyedMapper<'_>) -> BoxedCollection {
        recover(self, self.try_map_to_groups(mapper))
    }

    /// Like [`map`](Self::map), with array results flattened one level
    fn try_flat_map(&self, mapper: Mapper<'_>) -> CollectionResult<BoxedCollection> {
        let _ = mapper;
        Err(CollectionError::not_implemented("flat_map"))
    }

    fn flat_map(&self, mapper: Mapper<'_>) -> BoxedCollection {
        recover(self, self.try_flat_map(mapper))
    }

    /// Visit items in order until `visitor` returns `false`
    fn try_each(&self, visitor: Visitor<'_>) -> CollectionResult<BoxedCollection> {
        let _ = visitor;
        Err(CollectionError::not_implemented("each"))
    }

    fn each(&self, visitor: Visitor<'_>) -> BoxedCollection {
        recover(self, self.try_each(visitor))
    }

    /// Map of record arrays keyed by the value of `key`
    fn try_group_by(&self, key: &str) -> CollectionResult<BoxedCollection> {
        let _ = key;
        Err(CollectionError::not_implemented("group_by"))
    }

    fn group_by(&self, key: &str) -> BoxedCollection {
        recover(self, self.try_group_by(key))
    }

    /// Map of records keyed by the value of `key`; the last record wins
    fn try_key_by(&self, key: &str) -> CollectionResult<BoxedCollection> {
        let _ = key;
        Err(CollectionError::not_implemented("key_by"))
    }

    fn key_by(&self, key: &str) -> BoxedCollection {
        recover(self, self.try_key_by(key))
    }

    /// Swap keys and values
    fn try_flip(&self) -> CollectionResult<BoxedCollection> {
        Err(CollectionError::not_implemented("flip"))
    }

    fn flip(&self) -> BoxedCollection {
        recover(self, self.try_flip())
    }

    /// Flatten a sequence of sequences
    fn try_collapse(&self) -> CollectionResult<BoxedCollection> {
        Err(CollectionError::not_implemented("collapse"))
    }

    fn collapse(&self) -> BoxedCollection {
        recover(self, self.try_collapse())
    }

    /// Cartesian product of the items with each of `arrays`
    fn try_cross_join(&self, arrays: &[Vec<Value>]) -> CollectionResult<BoxedCollection> {
        let _ = arrays;
        Err(CollectionError::not_implemented("cross_join"))
    }

    fn cross_join(&self, arrays: &[Vec<Value>]) -> BoxedCollection {
        recover(self, self.try_cross_join(arrays))
    }

    // ==================== Ordering ====================

    /// Stable ascending sort of records by `key`
    fn try_sort_by(&self, key: &str) -> CollectionResult<BoxedCollection> {
        let _ = key;
        Err(CollectionError::not_implemented("sort_by"))
    }

    fn sort_by(&self, key: &str) -> BoxedCollection {
        recover(self, self.try_sort_by(key))
    }

    /// Stable descending sort of records by `key`
    fn try_sort_by_desc(&self, key: &str) -> CollectionResult<BoxedCollection> {
        let _ = key;
        Err(CollectionError::not_implemented("sort_by_desc"))
    }

    fn sort_by_desc(&self, key: &str) -> BoxedCollection {
        recover(self, self.try_sort_by_desc(key))
    }

    /// Stable ascending sort of items
    fn try_sort(&self) -> CollectionResult<BoxedCollection> {
        Err(CollectionError::not_implemented("sort"))
    }

    fn sort(&self) -> BoxedCollection {
        recover(self, self.try_sort())
    }

    /// Stable descending sort of items
    fn try_sort_desc(&self) -> CollectionResult<BoxedCollection> {
        Err(CollectionError::not_implemented("sort_desc"))
    }

    fn sort_desc(&self) -> BoxedCollection {
        recover(self, self.try_sort_desc())
    }

    /// Items in reverse order
    fn try_reverse(&self) -> CollectionResult<BoxedCollection> {
        Err(CollectionError::not_implemented("reverse"))
    }

    fn reverse(&self) -> BoxedCollection {
        recover(self, self.try_reverse())
    }

    /// Items in an order drawn from `rng`
    fn try_shuffle_with(&self, rng: &mut dyn RngCore) -> CollectionResult<BoxedCollection> {
        let _ = rng;
        Err(CollectionError::not_implemented("shuffle"))
    }

    fn shuffle_with(&self, rng: &mut dyn RngCore) -> BoxedCollection {
        recover(self, self.try_shuffle_with(rng))
    }

    /// Items in random order, seeded from the configuration when set
    fn try_shuffle(&self) -> CollectionResult<BoxedCollection> {
        let mut rng = config::global().rng();
        self.try_shuffle_with(&mut rng)
    }

    fn shuffle(&self) -> BoxedCollection {
        recover(self, self.try_shuffle())
    }

    /// `count` distinct items drawn with `rng`
    fn try_random_with(
        &self,
        count: usize,
        rng: &mut dyn RngCore,
    ) -> CollectionResult<BoxedCollection> {
        let _ = (count, rng);
        Err(CollectionError::not_implemented("random"))
    }

    fn random_with(&self, count: usize, rng: &mut dyn RngCore) -> BoxedCollection {
        recover(self, self.try_random_with(count, rng))
    }

    /// `count` distinct random items, seeded from the configuration when set
    fn try_random(&self, count: usize) -> CollectionResult<BoxedCollection> {
        let mut rng = config::global().rng();
        self.try_random_with(count, &mut rng)
    }

    fn random(&self, count: usize) -> BoxedCollection {
        recover(self, self.try_random(count))
    }

    // ==================== Windows ====================

    /// Rows of at most `size` items
    fn try_chunk(&self, size: usize) -> CollectionResult<BoxedCollection> {
        let _ = size;
        Err(CollectionError::not_implemented("chunk"))
    }

    fn chunk(&self, size: usize) -> BoxedCollection {
        recover(self, self.try_chunk(size))
    }

    /// Up to `groups` rows, sizes differing by at most one
    fn try_split(&self, groups: usize) -> CollectionResult<BoxedCollection> {
        let _ = groups;
        Err(CollectionError::not_implemented("split"))
    }

    fn split(&self, groups: usize) -> BoxedCollection {
        recover(self, self.try_split(groups))
    }

    /// Remove `length` items (all remaining when `None`) at `offset`, insert
    /// `replacement` there, and return `(spliced, removed)`
    fn try_splice(
        &self,
        offset: usize,
        length: Option<usize>,
        replacement: &[Value],
    ) -> CollectionResult<(BoxedCollection, BoxedCollection)> {
        let _ = (offset, length, replacement);
        Err(CollectionError::not_implemented("splice"))
    }

    fn splice(
        &self,
        offset: usize,
        length: Option<usize>,
        replacement: &[Value],
    ) -> (BoxedCollection, BoxedCollection) {
        recover_pair(self, self.try_splice(offset, length, replacement))
    }

    /// `length` items (all remaining when `None`) from `offset`
    fn try_slice(&self, offset: usize, length: Option<usize>) -> CollectionResult<BoxedCollection> {
        let _ = (offset, length);
        Err(CollectionError::not_implemented("slice"))
    }

    fn slice(&self, offset: usize, length: Option<usize>) -> BoxedCollection {
        recover(self, self.try_slice(offset, length))
    }

    /// First `limit` items, or the last `|limit|` when negative
    fn try_take(&self, limit: isize) -> CollectionResult<BoxedCollection> {
        let _ = limit;
        Err(CollectionError::not_implemented("take"))
    }

    fn take(&self, limit: isize) -> BoxedCollection {
        recover(self, self.try_take(limit))
    }

    /// Items on 1-based `page` of `per_page` items; page 0 reads as page 1
    fn try_for_page(&self, page: usize, per_page: usize) -> CollectionResult<BoxedCollection> {
        let _ = (page, per_page);
        Err(CollectionError::not_implemented("for_page"))
    }

    fn for_page(&self, page: usize, per_page: usize) -> BoxedCollection {
        recover(self, self.try_for_page(page, per_page))
    }

    /// Pad with `fill` to `|size|` items, on the left when `size` is negative
    fn try_pad(&self, size: isize, fill: Value) -> CollectionResult<BoxedCollection> {
        let _ = (size, fill);
        Err(CollectionError::not_implemented("pad"))
    }

    fn pad(&self, size: isize, fill: Value) -> BoxedCollection {
        recover(self, self.try_pad(size, fill))
    }

    /// Every `step`-th item starting at `offset`
    fn try_nth(&self, step: usize, offset: usize) -> CollectionResult<BoxedCollection> {
        let _ = (step, offset);
        Err(CollectionError::not_implemented("nth"))
    }

    fn nth(&self, step: usize, offset: usize) -> BoxedCollection {
        recover(self, self.try_nth(step, offset))
    }
}

//! Positive/negative/neutral attribute matching.
//!
//! A [`FilterItem`] holds criteria for one attribute type in three
//! independent channels. Each channel answers `Some(true)`, `Some(false)`,
//! or `None` when it has no opinion; combining the answers into an
//! include/exclude decision is left to the caller (see [`EntryFilter`]).

use std::cell::RefCell;
use std::collections::HashMap;

use regex::{Regex, RegexBuilder};

use crate::entry::{CatalogEntry, ItemStatus, ItemType};

/// An attribute type a [`FilterItem`] can match on.
pub trait Filterable: Clone + PartialEq {
    /// Flag-like types match a single criterion by bit containment instead of equality.
    const FLAG_LIKE: bool = false;

    /// Bitset view of a flag-like value.
    fn bits(&self) -> u64 {
        0
    }

    /// Whether `value` matches one element of a criteria set.
    fn matches_element(element: &Self, value: &Self) -> bool {
        element == value
    }
}

impl Filterable for String {
    fn matches_element(element: &Self, value: &Self) -> bool {
        matches_pattern(element, value)
    }
}

impl Filterable for i64 {}

impl Filterable for bool {}

impl Filterable for ItemType {}

impl Filterable for ItemStatus {
    const FLAG_LIKE: bool = true;

    fn bits(&self) -> u64 {
        ItemStatus::bits(self)
    }
}

/// Characters that turn a set element into a regular expression.
const REGEX_META: &[char] = &[
    '\\', '.', '+', '*', '?', '(', ')', '|', '[', ']', '{', '}', '^', '$',
];

thread_local! {
    /// Compiled set elements, keyed by pattern. Invalid patterns cache as `None`.
    static PATTERN_CACHE: RefCell<HashMap<String, Option<Regex>>> = RefCell::new(HashMap::new());
}

/// Match a string against a set element.
///
/// Elements without regex metacharacters are compared as whole strings,
/// ignoring case. Anything else is compiled once per thread as a
/// case-insensitive regular expression; an invalid expression matches nothing.
pub fn matches_pattern(pattern: &str, value: &str) -> bool {
    if !pattern.contains(REGEX_META) {
        return pattern.to_lowercase() == value.to_lowercase();
    }
    PATTERN_CACHE.with(|cache| {
        if let Some(compiled) = cache.borrow().get(pattern) {
            return compiled.as_ref().is_some_and(|re| re.is_match(value));
        }
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .ok();
        let matched = compiled.as_ref().is_some_and(|re| re.is_match(value));
        cache.borrow_mut().insert(pattern.to_string(), compiled);
        matched
    })
}

/// Number of patterns compiled on the current thread.
pub(crate) fn cached_pattern_count() -> usize {
    PATTERN_CACHE.with(|cache| cache.borrow().len())
}

/// Criteria for one attribute, split into three polarity channels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterItem<T> {
    pub positive: T,
    pub positive_set: Vec<T>,
    pub negative: T,
    pub negative_set: Vec<T>,
    pub neutral: T,
    pub neutral_set: Vec<T>,
}

impl<T: Filterable + Default> FilterItem<T> {
    /// An empty filter item; every channel reports no opinion.
    pub fn new() -> Self {
        Self {
            positive: T::default(),
            positive_set: Vec::new(),
            negative: T::default(),
            negative_set: Vec::new(),
            neutral: T::default(),
            neutral_set: Vec::new(),
        }
    }
}

impl<T: Filterable> FilterItem<T> {
    pub fn matches_positive(&self, default: &T, value: &T) -> Option<bool> {
        matches_single(&self.positive, default, value)
    }

    pub fn matches_negative(&self, default: &T, value: &T) -> Option<bool> {
        matches_single(&self.negative, default, value)
    }

    pub fn matches_neutral(&self, default: &T, value: &T) -> Option<bool> {
        matches_single(&self.neutral, default, value)
    }

    pub fn matches_positive_set(&self, value: &T) -> Option<bool> {
        matches_set(&self.positive_set, value)
    }

    pub fn matches_negative_set(&self, value: &T) -> Option<bool> {
        matches_set(&self.negative_set, value)
    }

    pub fn matches_neutral_set(&self, value: &T) -> Option<bool> {
        matches_set(&self.neutral_set, value)
    }

    /// Whether any channel holds a criterion other than `default`.
    pub fn is_set(&self, default: &T) -> bool {
        self.positive != *default
            || self.negative != *default
            || self.neutral != *default
            || !self.positive_set.is_empty()
            || !self.negative_set.is_empty()
            || !self.neutral_set.is_empty()
    }
}

fn matches_single<T: Filterable>(criterion: &T, default: &T, value: &T) -> Option<bool> {
    if criterion == default {
        return None;
    }
    if T::FLAG_LIKE {
        let bits = criterion.bits();
        return Some(value.bits() & bits == bits);
    }
    Some(criterion == value)
}

fn matches_set<T: Filterable>(set: &[T], value: &T) -> Option<bool> {
    if set.is_empty() {
        return None;
    }
    Some(set.iter().any(|element| T::matches_element(element, value)))
}

/// Combine the three channels of one item using the type's default as the unset value.
///
/// Excludes on a neutral mismatch, a positive mismatch, or a negative match.
fn passes<T: Filterable + Default>(item: &FilterItem<T>, value: &T) -> bool {
    let unset = T::default();
    let rejected = item.matches_neutral(&unset, value) == Some(false)
        || item.matches_neutral_set(value) == Some(false)
        || item.matches_positive(&unset, value) == Some(false)
        || item.matches_positive_set(value) == Some(false)
        || item.matches_negative(&unset, value) == Some(true)
        || item.matches_negative_set(value) == Some(true);
    !rejected
}

/// Include/exclude decision over the common entry attributes.
///
/// Single criteria use the attribute type's default as "unset" (empty
/// string, size 0, `ItemType::Rom`, `ItemStatus::None`); use the set
/// channels to select on those values.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub machine_name: FilterItem<String>,
    pub machine_description: FilterItem<String>,
    pub item_name: FilterItem<String>,
    pub item_type: FilterItem<ItemType>,
    pub status: FilterItem<ItemStatus>,
    /// Only consulted for Roms.
    pub size: FilterItem<i64>,
}

impl EntryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn passes(&self, entry: &CatalogEntry) -> bool {
        let description = entry.machine.description.clone().unwrap_or_default();
        passes(&self.machine_name, &entry.machine.name)
            && passes(&self.machine_description, &description)
            && passes(&self.item_name, &entry.name)
            && passes(&self.item_type, &entry.item_type())
            && passes(&self.status, &entry.status)
            && entry.size().is_none_or(|size| passes(&self.size, &size))
    }

    /// Entries that pass, in their original order.
    pub fn apply<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        entries.iter().filter(|e| self.passes(e)).collect()
    }
}

#[cfg(test)]
#[path = "tests/filter_tests.rs"]
mod tests;

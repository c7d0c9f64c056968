// Copyright 2025 the vigil developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Tag maps and the merge step applied to every observation.
//!
//! Tags are ephemeral value objects: a fresh merged map is produced for
//! each recording call and never mutated afterwards. Keys are kept in
//! sorted order so formatting and hashing are deterministic, the same
//! reason metric labels are sorted elsewhere in this workspace.

use std::collections::btree_map;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metric::MetricDefinition;

/// An ordered mapping from tag key to tag value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagMap(BTreeMap<String, String>);

impl TagMap {
    /// Creates an empty tag map.
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserts a tag, replacing any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Returns the number of tags.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the map holds no tags.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over `(key, value)` pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a TagMap {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<(String, String)> for TagMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Builds a literal [`TagMap`].
///
/// ```
/// use vigil_core::tags;
///
/// let map = tags! { "env" => "prod", "region" => "us" };
/// assert_eq!(map.get("env"), Some("prod"));
/// assert!(tags! {}.is_empty());
/// ```
#[macro_export]
macro_rules! tags {
    () => { $crate::tags::TagMap::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::tags::TagMap::new();
        $( map.insert($key, $value); )+
        map
    }};
}

/// Merges call-site tags over a definition's default tags.
///
/// Pure function of its inputs: neither map is mutated, and the result is a
/// fresh map. Call-site values win on key collision. Merging two empty maps
/// yields an empty map, never an absent value.
///
/// Keys outside the definition's permitted set pass through unchanged; a
/// debug-level note is emitted so misconfigured call sites can be found.
pub fn build(call_tags: &TagMap, definition: &MetricDefinition) -> TagMap {
    if !definition.tags.is_empty() {
        for (key, _) in call_tags {
            if !definition.permits_tag(key) {
                log::debug!(
                    "metric {} received undeclared tag key '{}'",
                    definition.id,
                    key
                );
            }
        }
    }

    let mut merged = definition.default_tags.clone();
    for (key, value) in call_tags {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricKind;

    fn definition_with_defaults(default_tags: TagMap) -> MetricDefinition {
        let mut def = MetricDefinition::new("sample", MetricKind::Summary);
        def.default_tags = default_tags;
        def
    }

    #[test]
    fn call_site_wins_on_collision() {
        let def = definition_with_defaults(tags! { "env" => "prod" });
        let call = tags! { "env" => "staging", "region" => "us" };

        let merged = build(&call, &def);
        assert_eq!(merged.get("env"), Some("staging"));
        assert_eq!(merged.get("region"), Some("us"));
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn defaults_apply_when_caller_is_silent() {
        let def = definition_with_defaults(tags! { "env" => "prod" });

        let merged = build(&TagMap::new(), &def);
        assert_eq!(merged.get("env"), Some("prod"));
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn empty_merges_to_empty() {
        let def = definition_with_defaults(TagMap::new());
        let merged = build(&TagMap::new(), &def);
        assert!(merged.is_empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let def = definition_with_defaults(tags! { "env" => "prod" });
        let call = tags! { "env" => "staging" };

        let _ = build(&call, &def);
        assert_eq!(def.default_tags.get("env"), Some("prod"));
        assert_eq!(call.get("env"), Some("staging"));
    }

    #[test]
    fn undeclared_keys_pass_through() {
        let mut def = definition_with_defaults(TagMap::new());
        def.tags = vec!["env".to_string()];

        let merged = build(&tags! { "host" => "a1" }, &def);
        assert_eq!(merged.get("host"), Some("a1"));
    }

    #[test]
    fn iteration_is_key_ordered() {
        let map = tags! { "zone" => "1", "app" => "web", "env" => "prod" };
        let keys: Vec<&str> = map.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["app", "env", "zone"]);
    }
}

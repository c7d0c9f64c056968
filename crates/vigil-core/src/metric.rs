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

//! Metric identity, kind, and the immutable definition descriptor.

use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::tags::TagMap;

/// A unique identifier for a metric: an optional group plus a name.
///
/// Grouped metrics display as `group.name`, ungrouped ones as the bare
/// `name`. Identity is structural, so two definitions with the same group
/// and name collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MetricId {
    /// The group this metric was declared under, if any.
    pub group: Option<String>,
    /// The metric name, unique within its group.
    pub name: String,
}

impl MetricId {
    /// Creates an ungrouped metric id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            group: None,
            name: name.into(),
        }
    }

    /// Creates a metric id scoped under a group.
    pub fn grouped(group: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            group: Some(group.into()),
            name: name.into(),
        }
    }
}

impl Display for MetricId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.group {
            Some(group) => write!(f, "{}.{}", group, self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl From<&str> for MetricId {
    fn from(name: &str) -> Self {
        MetricId::new(name)
    }
}

impl From<(&str, &str)> for MetricId {
    fn from((group, name): (&str, &str)) -> Self {
        MetricId::grouped(group, name)
    }
}

/// The fundamental kind of a metric, fixed at definition time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricKind {
    /// A value that only ever increases (e.g., total requests).
    Counter,
    /// A value that can go up or down (e.g., current queue depth).
    Gauge,
    /// A value that tracks the distribution of samples across buckets.
    Histogram,
    /// A value that tracks samples or measured durations as quantiles.
    Summary,
}

impl MetricKind {
    /// Returns the lowercase name of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetricKind::Counter => "counter",
            MetricKind::Gauge => "gauge",
            MetricKind::Histogram => "histogram",
            MetricKind::Summary => "summary",
        }
    }
}

impl Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The immutable descriptor of a declared metric.
///
/// A definition is created once, at configuration time, and is read-only
/// afterwards; runtime handles hold it behind an `Arc` and never mutate it.
/// Value storage is entirely an adapter concern, so the definition carries
/// metadata only.
#[derive(Debug, Clone, Serialize)]
pub struct MetricDefinition {
    /// The metric's unique identifier.
    pub id: MetricId,
    /// The kind of the metric.
    pub kind: MetricKind,
    /// A human-readable description of what the metric measures.
    pub comment: String,
    /// The unit of measurement (e.g., "seconds", "bytes").
    pub unit: String,
    /// The permitted tag keys, in declaration order.
    pub tags: Vec<String>,
    /// Fixed tag values merged into every observation of this metric.
    pub default_tags: TagMap,
    /// Explicit adapter routing. `None` fans out to every registered
    /// adapter.
    pub adapter: Option<String>,
    /// Histogram bucket upper bounds, carried for adapters that need them.
    pub buckets: Option<Vec<f64>>,
}

impl MetricDefinition {
    /// Creates a definition with the given identity and kind and empty
    /// metadata.
    pub fn new(id: impl Into<MetricId>, kind: MetricKind) -> Self {
        Self {
            id: id.into(),
            kind,
            comment: String::new(),
            unit: String::new(),
            tags: Vec::new(),
            default_tags: TagMap::new(),
            adapter: None,
            buckets: None,
        }
    }

    /// Returns true if `key` is in the permitted tag-key set.
    ///
    /// An empty permitted set means the definition does not constrain keys
    /// at all.
    pub fn permits_tag(&self, key: &str) -> bool {
        self.tags.is_empty() || self.tags.iter().any(|k| k == key)
    }
}

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

//! The definition registry and the options metrics are declared with.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use vigil_core::{MetricDefinition, MetricId, MetricKind, MetricsError, MetricsResult, TagMap};

/// Declaration-time options for a metric.
///
/// Everything beyond id and kind is optional; the plain `register_*`
/// methods on [`MetricsService`](crate::MetricsService) only set the
/// comment, while the `*_with` variants accept a full `MetricOpts`.
#[derive(Debug, Clone, Default)]
pub struct MetricOpts {
    comment: String,
    unit: String,
    tags: Vec<String>,
    default_tags: TagMap,
    adapter: Option<String>,
    buckets: Option<Vec<f64>>,
}

impl MetricOpts {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the human-readable comment.
    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }

    /// Sets the unit of measurement.
    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    /// Declares the permitted tag keys.
    pub fn tag_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a fixed tag merged into every observation of this metric.
    pub fn default_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_tags.insert(key, value);
        self
    }

    /// Routes this metric to one named adapter instead of fanning out to
    /// all of them.
    pub fn adapter(mut self, name: impl Into<String>) -> Self {
        self.adapter = Some(name.into());
        self
    }

    /// Sets histogram bucket upper bounds.
    pub fn buckets(mut self, bounds: Vec<f64>) -> Self {
        self.buckets = Some(bounds);
        self
    }

    pub(crate) fn build(self, id: MetricId, kind: MetricKind) -> MetricDefinition {
        let mut def = MetricDefinition::new(id, kind);
        def.comment = self.comment;
        def.unit = self.unit;
        def.tags = self.tags;
        def.default_tags = self.default_tags;
        def.adapter = self.adapter;
        def.buckets = self.buckets;
        def
    }
}

#[derive(Debug, Default)]
struct Definitions {
    by_id: HashMap<MetricId, Arc<MetricDefinition>>,
    order: Vec<MetricId>,
    configured: bool,
}

/// The owned set of metric definitions, keyed by id.
///
/// Populated during bootstrap; [`freeze`](DefinitionRegistry::freeze)
/// transitions it to read-only, after which any further definition is
/// rejected. Metric ids are strictly unique — unlike adapter names, a
/// collision here is an error, because dashboards and alerts are built
/// against stable metric identity.
#[derive(Debug, Clone, Default)]
pub struct DefinitionRegistry {
    inner: Arc<RwLock<Definitions>>,
}

impl DefinitionRegistry {
    /// Creates an empty, unfrozen registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a definition, returning the shared descriptor handles bind to.
    pub fn define(&self, def: MetricDefinition) -> MetricsResult<Arc<MetricDefinition>> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| MetricsError::Internal("definition registry lock poisoned".into()))?;
        if inner.configured {
            return Err(MetricsError::AlreadyConfigured);
        }
        if inner.by_id.contains_key(&def.id) {
            return Err(MetricsError::DuplicateMetric(def.id));
        }

        let id = def.id.clone();
        let def = Arc::new(def);
        inner.by_id.insert(id.clone(), def.clone());
        inner.order.push(id.clone());
        log::debug!("defined {} metric: {}", def.kind, id);
        Ok(def)
    }

    /// Returns the definition for `id`, if present.
    pub fn get(&self, id: &MetricId) -> Option<Arc<MetricDefinition>> {
        self.inner.read().ok()?.by_id.get(id).cloned()
    }

    /// Returns true if `id` is defined.
    pub fn contains(&self, id: &MetricId) -> bool {
        self.get(id).is_some()
    }

    /// Returns every definition, in declaration order.
    pub fn list(&self) -> Vec<Arc<MetricDefinition>> {
        if let Ok(inner) = self.inner.read() {
            inner
                .order
                .iter()
                .filter_map(|id| inner.by_id.get(id).cloned())
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize {
        self.inner.read().map(|i| i.by_id.len()).unwrap_or(0)
    }

    /// Returns true if nothing is defined.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Freezes the registry. Further definitions (and a second freeze) are
    /// rejected with [`MetricsError::AlreadyConfigured`].
    pub fn freeze(&self) -> MetricsResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| MetricsError::Internal("definition registry lock poisoned".into()))?;
        if inner.configured {
            return Err(MetricsError::AlreadyConfigured);
        }
        inner.configured = true;
        log::info!("metrics configured: {} definition(s) frozen", inner.by_id.len());
        Ok(())
    }

    /// Reports whether the registry has been frozen.
    pub fn configured(&self) -> bool {
        self.inner.read().map(|i| i.configured).unwrap_or(false)
    }
}

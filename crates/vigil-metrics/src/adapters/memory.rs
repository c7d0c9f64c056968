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

//! An in-memory recording adapter.
//!
//! Stores every received callback as a normalized [`ObservationEvent`].
//! This is the stub backend used by this crate's own tests and a ready-made
//! sink for downstream test suites; production sinks live outside the core.

use std::sync::RwLock;

use vigil_core::{
    MetricAdapter, MetricDefinition, MetricId, MetricsError, MetricsResult, ObservationEvent,
    TagMap,
};

/// A thread-safe adapter that records observations instead of exporting
/// them.
#[derive(Debug, Default)]
pub struct MemoryAdapter {
    events: RwLock<Vec<ObservationEvent>>,
}

impl MemoryAdapter {
    /// Creates an empty recording adapter.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        value: f64,
    ) -> MetricsResult<()> {
        let mut events = self.events.write().map_err(|_| MetricsError::Adapter {
            name: "memory".to_string(),
            message: "event log lock poisoned".to_string(),
        })?;
        events.push(ObservationEvent {
            metric: metric.id.clone(),
            kind: metric.kind,
            tags: tags.clone(),
            value,
        });
        Ok(())
    }

    /// Returns a copy of every recorded event, in arrival order.
    pub fn events(&self) -> Vec<ObservationEvent> {
        if let Ok(events) = self.events.read() {
            events.clone()
        } else {
            Vec::new()
        }
    }

    /// Returns the recorded events for one metric, in arrival order.
    pub fn events_for(&self, id: &MetricId) -> Vec<ObservationEvent> {
        self.events()
            .into_iter()
            .filter(|event| event.metric == *id)
            .collect()
    }

    /// Returns the recorded values for one metric, in arrival order.
    pub fn values_for(&self, id: &MetricId) -> Vec<f64> {
        self.events_for(id)
            .into_iter()
            .map(|event| event.value)
            .collect()
    }

    /// Returns the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Discards all recorded events.
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.write() {
            events.clear();
        }
    }

    /// Serializes the recorded events to a JSON array.
    pub fn to_json(&self) -> MetricsResult<String> {
        serde_json::to_string(&self.events()).map_err(|err| MetricsError::Adapter {
            name: "memory".to_string(),
            message: err.to_string(),
        })
    }
}

impl MetricAdapter for MemoryAdapter {
    fn counter_increment(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        by: u64,
    ) -> MetricsResult<()> {
        self.record(metric, tags, by as f64)
    }

    fn gauge_set(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        value: f64,
    ) -> MetricsResult<()> {
        self.record(metric, tags, value)
    }

    fn histogram_observe(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        value: f64,
    ) -> MetricsResult<()> {
        self.record(metric, tags, value)
    }

    fn summary_observe(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        value: f64,
    ) -> MetricsResult<()> {
        self.record(metric, tags, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vigil_core::{tags, MetricKind};

    #[test]
    fn records_normalized_events() {
        let adapter = MemoryAdapter::new();
        let def = MetricDefinition::new(("http", "requests"), MetricKind::Counter);
        let merged = tags! { "code" => "200" };

        adapter.counter_increment(&def, &merged, 2).unwrap();

        let events = adapter.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].metric, MetricId::grouped("http", "requests"));
        assert_eq!(events[0].kind, MetricKind::Counter);
        assert_eq!(events[0].tags, merged);
        assert_eq!(events[0].value, 2.0);
    }

    #[test]
    fn filters_by_metric() {
        let adapter = MemoryAdapter::new();
        let requests = MetricDefinition::new("requests", MetricKind::Counter);
        let depth = MetricDefinition::new("depth", MetricKind::Gauge);

        adapter.counter_increment(&requests, &TagMap::new(), 1).unwrap();
        adapter.gauge_set(&depth, &TagMap::new(), 7.0).unwrap();
        adapter.counter_increment(&requests, &TagMap::new(), 3).unwrap();

        assert_eq!(adapter.values_for(&MetricId::new("requests")), vec![1.0, 3.0]);
        assert_eq!(adapter.values_for(&MetricId::new("depth")), vec![7.0]);
    }

    #[test]
    fn clear_discards_events() {
        let adapter = MemoryAdapter::new();
        let def = MetricDefinition::new("samples", MetricKind::Summary);
        adapter.summary_observe(&def, &TagMap::new(), 0.5).unwrap();
        assert!(!adapter.is_empty());

        adapter.clear();
        assert!(adapter.is_empty());
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let adapter = MemoryAdapter::new();
        let def = MetricDefinition::new("samples", MetricKind::Summary);
        adapter
            .summary_observe(&def, &tags! { "env" => "prod" }, 0.5)
            .unwrap();

        let json = adapter.to_json().unwrap();
        assert!(json.contains("\"samples\""));
        assert!(json.contains("\"env\""));
    }
}

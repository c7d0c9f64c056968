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

//! The typed recording handles applications call.
//!
//! A handle is a thin, stateless binding of one [`MetricDefinition`] to the
//! shared dispatch engine. Handles store no observed values; every call
//! merges its own tags, dispatches, and returns the recorded value to the
//! caller. All handles are cheap to clone and safe to share across
//! threads.

use std::sync::Arc;

use vigil_core::{
    measure, tags, MetricDefinition, MetricId, MetricsError, MetricsResult, Sample, TagMap,
};

use crate::dispatch::Dispatcher;

fn ensure_finite(def: &MetricDefinition, value: f64) -> MetricsResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(MetricsError::InvalidValue {
            metric: def.id.clone(),
            reason: format!("{value} is not a finite number"),
        })
    }
}

/// A handle to a monotonically increasing counter.
#[derive(Debug, Clone)]
pub struct Counter {
    def: Arc<MetricDefinition>,
    dispatcher: Dispatcher,
}

impl Counter {
    pub(crate) fn new(def: Arc<MetricDefinition>, dispatcher: Dispatcher) -> Self {
        Self { def, dispatcher }
    }

    /// Returns the metric's id.
    pub fn id(&self) -> &MetricId {
        &self.def.id
    }

    /// Returns the metric's immutable definition.
    pub fn definition(&self) -> &MetricDefinition {
        &self.def
    }

    /// Increments the counter by one. Returns the recorded increment.
    pub fn increment(&self, call_tags: &TagMap) -> MetricsResult<u64> {
        self.increment_by(call_tags, 1)
    }

    /// Increments the counter by `by`. Returns the recorded increment.
    ///
    /// Decrements are unrepresentable; counters only go up.
    pub fn increment_by(&self, call_tags: &TagMap, by: u64) -> MetricsResult<u64> {
        let merged = tags::build(call_tags, &self.def);
        self.dispatcher
            .dispatch(&self.def, &merged, Sample::Increment(by))?;
        Ok(by)
    }
}

/// A handle to a gauge holding a last-known value.
#[derive(Debug, Clone)]
pub struct Gauge {
    def: Arc<MetricDefinition>,
    dispatcher: Dispatcher,
}

impl Gauge {
    pub(crate) fn new(def: Arc<MetricDefinition>, dispatcher: Dispatcher) -> Self {
        Self { def, dispatcher }
    }

    /// Returns the metric's id.
    pub fn id(&self) -> &MetricId {
        &self.def.id
    }

    /// Returns the metric's immutable definition.
    pub fn definition(&self) -> &MetricDefinition {
        &self.def
    }

    /// Overwrites the gauge's value. Returns the recorded value.
    pub fn set(&self, call_tags: &TagMap, value: f64) -> MetricsResult<f64> {
        ensure_finite(&self.def, value)?;
        let merged = tags::build(call_tags, &self.def);
        self.dispatcher
            .dispatch(&self.def, &merged, Sample::Set(value))?;
        Ok(value)
    }
}

/// A handle to a bucketed distribution.
#[derive(Debug, Clone)]
pub struct Histogram {
    def: Arc<MetricDefinition>,
    dispatcher: Dispatcher,
}

impl Histogram {
    pub(crate) fn new(def: Arc<MetricDefinition>, dispatcher: Dispatcher) -> Self {
        Self { def, dispatcher }
    }

    /// Returns the metric's id.
    pub fn id(&self) -> &MetricId {
        &self.def.id
    }

    /// Returns the metric's immutable definition.
    pub fn definition(&self) -> &MetricDefinition {
        &self.def
    }

    /// Records one sample. Returns the recorded value.
    pub fn observe(&self, call_tags: &TagMap, value: f64) -> MetricsResult<f64> {
        ensure_finite(&self.def, value)?;
        let merged = tags::build(call_tags, &self.def);
        self.dispatcher
            .dispatch(&self.def, &merged, Sample::Observe(value))?;
        Ok(value)
    }
}

/// A handle to a summary, recording explicit samples or measured
/// durations.
#[derive(Debug, Clone)]
pub struct Summary {
    def: Arc<MetricDefinition>,
    dispatcher: Dispatcher,
}

impl Summary {
    pub(crate) fn new(def: Arc<MetricDefinition>, dispatcher: Dispatcher) -> Self {
        Self { def, dispatcher }
    }

    /// Returns the metric's id.
    pub fn id(&self) -> &MetricId {
        &self.def.id
    }

    /// Returns the metric's immutable definition.
    pub fn definition(&self) -> &MetricDefinition {
        &self.def
    }

    /// Records an explicit sample. Returns the recorded value.
    pub fn observe(&self, call_tags: &TagMap, value: f64) -> MetricsResult<f64> {
        self.record(call_tags, Some(value), None::<fn()>)
    }

    /// Runs `block` exactly once and records its wall-clock duration in
    /// fractional seconds. Returns the duration; the block's own result is
    /// discarded.
    pub fn time<T, F: FnOnce() -> T>(&self, call_tags: &TagMap, block: F) -> MetricsResult<f64> {
        self.record(call_tags, None, Some(block))
    }

    /// The single funnel both [`observe`](Summary::observe) and
    /// [`time`](Summary::time) delegate to.
    ///
    /// Exactly one of `value` or `block` must be supplied; both or neither
    /// fail with [`MetricsError::InvalidArgument`] before any tag merge or
    /// dispatch happens. On the block path a panic in the block unwinds
    /// before dispatch, so no adapter sees a partial observation. Every
    /// successful call dispatches exactly once per target adapter.
    pub fn record<T, F: FnOnce() -> T>(
        &self,
        call_tags: &TagMap,
        value: Option<f64>,
        block: Option<F>,
    ) -> MetricsResult<f64> {
        match (value, block) {
            (Some(_), Some(_)) => Err(MetricsError::InvalidArgument(
                "value and block are mutually exclusive",
            )),
            (None, None) => Err(MetricsError::InvalidArgument(
                "must provide either a value or a block",
            )),
            (Some(value), None) => {
                ensure_finite(&self.def, value)?;
                let merged = tags::build(call_tags, &self.def);
                self.dispatcher
                    .dispatch(&self.def, &merged, Sample::Observe(value))?;
                Ok(value)
            }
            (None, Some(block)) => {
                let merged = tags::build(call_tags, &self.def);
                let (_, elapsed) = measure(block);
                self.dispatcher
                    .dispatch(&self.def, &merged, Sample::Observe(elapsed))?;
                Ok(elapsed)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AdapterRegistry, MemoryAdapter};
    use vigil_core::MetricKind;

    fn summary_with_sink(def: MetricDefinition) -> (Summary, Arc<MemoryAdapter>) {
        let registry = AdapterRegistry::new();
        let sink = Arc::new(MemoryAdapter::new());
        registry.register("memory", sink.clone()).unwrap();
        let summary = Summary::new(Arc::new(def), Dispatcher::new(registry));
        (summary, sink)
    }

    #[test]
    fn observe_returns_the_recorded_value() {
        let (summary, sink) = summary_with_sink(MetricDefinition::new("s", MetricKind::Summary));
        let recorded = summary.observe(&TagMap::new(), 10.0).unwrap();
        assert_eq!(recorded, 10.0);
        assert_eq!(sink.values_for(&MetricId::new("s")), vec![10.0]);
    }

    #[test]
    fn both_value_and_block_is_rejected_without_dispatch() {
        let (summary, sink) = summary_with_sink(MetricDefinition::new("s", MetricKind::Summary));
        let err = summary
            .record(&TagMap::new(), Some(1.0), Some(|| ()))
            .unwrap_err();
        assert!(matches!(err, MetricsError::InvalidArgument(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn neither_value_nor_block_is_rejected_without_dispatch() {
        let (summary, sink) = summary_with_sink(MetricDefinition::new("s", MetricKind::Summary));
        let err = summary
            .record(&TagMap::new(), None, None::<fn()>)
            .unwrap_err();
        assert!(matches!(err, MetricsError::InvalidArgument(_)));
        assert!(sink.is_empty());
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let (summary, sink) = summary_with_sink(MetricDefinition::new("s", MetricKind::Summary));
        let err = summary.observe(&TagMap::new(), f64::NAN).unwrap_err();
        assert!(matches!(err, MetricsError::InvalidValue { .. }));
        assert!(sink.is_empty());
    }

    #[test]
    fn block_result_is_discarded_and_duration_returned() {
        let (summary, sink) = summary_with_sink(MetricDefinition::new("s", MetricKind::Summary));
        let duration = summary
            .time(&TagMap::new(), || "ignored result")
            .unwrap();
        assert!(duration >= 0.0);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink.events()[0].value, duration);
    }

    #[test]
    fn counter_increments_reach_the_adapter() {
        let registry = AdapterRegistry::new();
        let sink = Arc::new(MemoryAdapter::new());
        registry.register("memory", sink.clone()).unwrap();
        let counter = Counter::new(
            Arc::new(MetricDefinition::new("c", MetricKind::Counter)),
            Dispatcher::new(registry),
        );

        assert_eq!(counter.increment(&TagMap::new()).unwrap(), 1);
        assert_eq!(counter.increment_by(&TagMap::new(), 5).unwrap(), 5);
        assert_eq!(sink.values_for(&MetricId::new("c")), vec![1.0, 5.0]);
    }
}

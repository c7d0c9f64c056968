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

//! The observation-dispatch engine.

use std::sync::Arc;

use vigil_core::{MetricAdapter, MetricDefinition, MetricsError, MetricsResult, Sample, TagMap};

use crate::adapters::AdapterRegistry;

/// Resolves the target adapter set for a metric and fans one observation
/// out to it.
///
/// Stateless between calls: each dispatch resolves targets afresh, invokes
/// them synchronously in registration order, and stops at the first
/// adapter error (fail fast, no isolation, no retry). Callers wanting
/// per-adapter isolation must wrap each adapter themselves.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    adapters: AdapterRegistry,
}

impl Dispatcher {
    /// Creates a dispatcher reading targets from `adapters`.
    pub fn new(adapters: AdapterRegistry) -> Self {
        Self { adapters }
    }

    /// Dispatches one observation to the metric's resolved adapter set.
    ///
    /// The target set is the definition's explicit adapter when one is
    /// named (propagating [`MetricsError::AdapterNotFound`]), otherwise
    /// every registered adapter. The `sample` shape must match the
    /// metric's kind; the typed handles guarantee this.
    pub fn dispatch(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        sample: Sample,
    ) -> MetricsResult<()> {
        let targets = self.resolve_targets(metric)?;
        for adapter in targets {
            self.invoke(&*adapter, metric, tags, sample)?;
        }
        Ok(())
    }

    fn resolve_targets(
        &self,
        metric: &MetricDefinition,
    ) -> MetricsResult<Vec<Arc<dyn MetricAdapter>>> {
        match &metric.adapter {
            Some(name) => Ok(vec![self.adapters.lookup(name)?]),
            None => Ok(self.adapters.all()),
        }
    }

    fn invoke(
        &self,
        adapter: &dyn MetricAdapter,
        metric: &MetricDefinition,
        tags: &TagMap,
        sample: Sample,
    ) -> MetricsResult<()> {
        use vigil_core::MetricKind::*;

        match (metric.kind, sample) {
            (Counter, Sample::Increment(by)) => adapter.counter_increment(metric, tags, by),
            (Gauge, Sample::Set(value)) => adapter.gauge_set(metric, tags, value),
            (Histogram, Sample::Observe(value)) => adapter.histogram_observe(metric, tags, value),
            (Summary, Sample::Observe(value)) => adapter.summary_observe(metric, tags, value),
            (kind, sample) => Err(MetricsError::KindMismatch {
                metric: metric.id.clone(),
                kind,
                operation: sample.operation(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryAdapter;
    use vigil_core::{tags, MetricKind};

    fn registry_with_memory() -> (AdapterRegistry, Arc<MemoryAdapter>) {
        let registry = AdapterRegistry::new();
        let memory = Arc::new(MemoryAdapter::new());
        registry.register("memory", memory.clone()).unwrap();
        (registry, memory)
    }

    #[test]
    fn fans_out_to_all_when_no_explicit_adapter() {
        let (registry, first) = registry_with_memory();
        let second = Arc::new(MemoryAdapter::new());
        registry.register("second", second.clone()).unwrap();

        let dispatcher = Dispatcher::new(registry);
        let def = MetricDefinition::new("requests", MetricKind::Counter);
        dispatcher
            .dispatch(&def, &TagMap::new(), Sample::Increment(1))
            .unwrap();

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
    }

    #[test]
    fn explicit_adapter_scopes_the_target_set() {
        let (registry, targeted) = registry_with_memory();
        let bystander = Arc::new(MemoryAdapter::new());
        registry.register("bystander", bystander.clone()).unwrap();

        let dispatcher = Dispatcher::new(registry);
        let mut def = MetricDefinition::new("requests", MetricKind::Counter);
        def.adapter = Some("memory".to_string());

        dispatcher
            .dispatch(&def, &TagMap::new(), Sample::Increment(1))
            .unwrap();
        dispatcher
            .dispatch(&def, &TagMap::new(), Sample::Increment(1))
            .unwrap();

        assert_eq!(targeted.len(), 2);
        assert!(bystander.is_empty());
    }

    #[test]
    fn missing_explicit_adapter_is_an_error() {
        let (registry, memory) = registry_with_memory();
        let dispatcher = Dispatcher::new(registry);
        let mut def = MetricDefinition::new("requests", MetricKind::Counter);
        def.adapter = Some("statsd".to_string());

        let err = dispatcher
            .dispatch(&def, &TagMap::new(), Sample::Increment(1))
            .unwrap_err();
        assert!(matches!(err, MetricsError::AdapterNotFound(name) if name == "statsd"));
        assert!(memory.is_empty());
    }

    #[test]
    fn sample_shape_must_match_kind() {
        let (registry, memory) = registry_with_memory();
        let dispatcher = Dispatcher::new(registry);
        let def = MetricDefinition::new("depth", MetricKind::Gauge);

        let err = dispatcher
            .dispatch(&def, &TagMap::new(), Sample::Increment(1))
            .unwrap_err();
        assert!(matches!(err, MetricsError::KindMismatch { .. }));
        assert!(memory.is_empty());
    }

    #[test]
    fn tags_reach_the_adapter_unchanged() {
        let (registry, memory) = registry_with_memory();
        let dispatcher = Dispatcher::new(registry);
        let def = MetricDefinition::new("latency", MetricKind::Summary);
        let merged = tags! { "env" => "staging" };

        dispatcher.dispatch(&def, &merged, Sample::Observe(0.25)).unwrap();

        let events = memory.events();
        assert_eq!(events[0].tags, merged);
        assert_eq!(events[0].value, 0.25);
    }
}

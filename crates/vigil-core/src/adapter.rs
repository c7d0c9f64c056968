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

//! The interface implemented by every monitoring backend.

use std::fmt::Debug;

use crate::error::MetricsResult;
use crate::metric::MetricDefinition;
use crate::tags::TagMap;

/// A backend integration that turns normalized observation events into
/// calls against a specific monitoring system.
///
/// Every callback receives the metric's [`MetricDefinition`] (for name and
/// metadata), the fully merged [`TagMap`], and the numeric value already
/// resolved by the core — for timed summaries that is the elapsed duration
/// in fractional seconds.
///
/// Adapters are expected to be fast, non-blocking instrumentation sinks.
/// Errors they return are propagated to the recording caller untranslated;
/// the dispatch engine performs no retry, rollback, or isolation.
pub trait MetricAdapter: Send + Sync + Debug {
    /// Activation hook, invoked when the adapter is registered.
    ///
    /// Must be idempotent: re-registering an adapter under the same name
    /// calls this again.
    fn register(&self) -> MetricsResult<()> {
        Ok(())
    }

    /// Records a monotonic counter increment of `by`.
    fn counter_increment(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        by: u64,
    ) -> MetricsResult<()>;

    /// Overwrites a gauge's last-known value.
    fn gauge_set(&self, metric: &MetricDefinition, tags: &TagMap, value: f64)
        -> MetricsResult<()>;

    /// Records a sample into a bucketed distribution.
    fn histogram_observe(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        value: f64,
    ) -> MetricsResult<()>;

    /// Records a summary sample (an explicit value or a measured duration).
    fn summary_observe(
        &self,
        metric: &MetricDefinition,
        tags: &TagMap,
        value: f64,
    ) -> MetricsResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metric::MetricKind;

    #[derive(Debug)]
    struct NullAdapter;

    impl MetricAdapter for NullAdapter {
        fn counter_increment(
            &self,
            _metric: &MetricDefinition,
            _tags: &TagMap,
            _by: u64,
        ) -> MetricsResult<()> {
            Ok(())
        }

        fn gauge_set(
            &self,
            _metric: &MetricDefinition,
            _tags: &TagMap,
            _value: f64,
        ) -> MetricsResult<()> {
            Ok(())
        }

        fn histogram_observe(
            &self,
            _metric: &MetricDefinition,
            _tags: &TagMap,
            _value: f64,
        ) -> MetricsResult<()> {
            Ok(())
        }

        fn summary_observe(
            &self,
            _metric: &MetricDefinition,
            _tags: &TagMap,
            _value: f64,
        ) -> MetricsResult<()> {
            Ok(())
        }
    }

    #[test]
    fn default_register_is_ok_and_idempotent() {
        let adapter = NullAdapter;
        assert!(adapter.register().is_ok());
        assert!(adapter.register().is_ok());
    }

    #[test]
    fn trait_is_object_safe() {
        let adapter: Box<dyn MetricAdapter> = Box::new(NullAdapter);
        let def = MetricDefinition::new("requests", MetricKind::Counter);
        assert!(adapter.counter_increment(&def, &TagMap::new(), 1).is_ok());
    }
}

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

//! The process-scoped instrumentation context.
//!
//! Rather than process-wide singletons, all shared state lives in an
//! explicit [`MetricsService`]: construct one at bootstrap, register
//! adapters, declare metrics, freeze with [`configure`], and hand clones
//! (or the returned handles) to the code that records. Independent
//! services can coexist, which is what keeps test suites isolated.
//!
//! [`configure`]: MetricsService::configure

use std::sync::Arc;

use vigil_core::{
    MetricAdapter, MetricDefinition, MetricId, MetricKind, MetricsResult,
};

use crate::adapters::AdapterRegistry;
use crate::dispatch::Dispatcher;
use crate::instrument::{Counter, Gauge, Histogram, Summary};
use crate::registry::{DefinitionRegistry, MetricOpts};

/// The central entry point of the facade.
///
/// Owns the adapter registry and the definition registry; cheap to clone
/// (all state is shared behind `Arc`s). Adapters are expected to be
/// registered during bootstrap, before observations start flowing; the
/// definition set is frozen by [`configure`](MetricsService::configure).
#[derive(Debug, Clone, Default)]
pub struct MetricsService {
    adapters: AdapterRegistry,
    definitions: DefinitionRegistry,
}

impl MetricsService {
    /// Creates an empty, unconfigured service.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a backend adapter under `name`.
    ///
    /// Silently overwrites a previous adapter of the same name (last
    /// writer wins — a deliberate affordance for hot-swapping a backend)
    /// and invokes the adapter's activation hook.
    pub fn register_adapter(
        &self,
        name: impl Into<String>,
        adapter: Arc<dyn MetricAdapter>,
    ) -> MetricsResult<()> {
        self.adapters.register(name, adapter)
    }

    /// Returns the adapter registry.
    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    /// Returns the definition for `id`, if declared.
    pub fn definition(&self, id: &MetricId) -> Option<Arc<MetricDefinition>> {
        self.definitions.get(id)
    }

    /// Returns every declared definition, in declaration order.
    pub fn definitions(&self) -> Vec<Arc<MetricDefinition>> {
        self.definitions.list()
    }

    /// Returns the number of declared metrics.
    pub fn metric_count(&self) -> usize {
        self.definitions.len()
    }

    /// Freezes the definition set. Declaring a metric afterwards fails
    /// with `AlreadyConfigured`, as does a second `configure` call.
    pub fn configure(&self) -> MetricsResult<()> {
        self.definitions.freeze()
    }

    /// Reports whether [`configure`](MetricsService::configure) has run.
    pub fn configured(&self) -> bool {
        self.definitions.configured()
    }

    /// Returns a declaration proxy scoped under `group`.
    pub fn group(&self, name: impl Into<String>) -> MetricGroup<'_> {
        MetricGroup {
            service: self,
            name: name.into(),
        }
    }

    /// Declares a counter with a comment and default options.
    pub fn register_counter(
        &self,
        id: impl Into<MetricId>,
        comment: &str,
    ) -> MetricsResult<Counter> {
        self.register_counter_with(id, MetricOpts::new().comment(comment))
    }

    /// Declares a counter with full options.
    pub fn register_counter_with(
        &self,
        id: impl Into<MetricId>,
        opts: MetricOpts,
    ) -> MetricsResult<Counter> {
        let def = self
            .definitions
            .define(opts.build(id.into(), MetricKind::Counter))?;
        Ok(Counter::new(def, self.dispatcher()))
    }

    /// Declares a gauge with a comment and default options.
    pub fn register_gauge(&self, id: impl Into<MetricId>, comment: &str) -> MetricsResult<Gauge> {
        self.register_gauge_with(id, MetricOpts::new().comment(comment))
    }

    /// Declares a gauge with full options.
    pub fn register_gauge_with(
        &self,
        id: impl Into<MetricId>,
        opts: MetricOpts,
    ) -> MetricsResult<Gauge> {
        let def = self
            .definitions
            .define(opts.build(id.into(), MetricKind::Gauge))?;
        Ok(Gauge::new(def, self.dispatcher()))
    }

    /// Declares a histogram with a comment and default options.
    pub fn register_histogram(
        &self,
        id: impl Into<MetricId>,
        comment: &str,
    ) -> MetricsResult<Histogram> {
        self.register_histogram_with(id, MetricOpts::new().comment(comment))
    }

    /// Declares a histogram with full options (typically including
    /// buckets).
    pub fn register_histogram_with(
        &self,
        id: impl Into<MetricId>,
        opts: MetricOpts,
    ) -> MetricsResult<Histogram> {
        let def = self
            .definitions
            .define(opts.build(id.into(), MetricKind::Histogram))?;
        Ok(Histogram::new(def, self.dispatcher()))
    }

    /// Declares a summary with a comment and default options.
    pub fn register_summary(
        &self,
        id: impl Into<MetricId>,
        comment: &str,
    ) -> MetricsResult<Summary> {
        self.register_summary_with(id, MetricOpts::new().comment(comment))
    }

    /// Declares a summary with full options.
    pub fn register_summary_with(
        &self,
        id: impl Into<MetricId>,
        opts: MetricOpts,
    ) -> MetricsResult<Summary> {
        let def = self
            .definitions
            .define(opts.build(id.into(), MetricKind::Summary))?;
        Ok(Summary::new(def, self.dispatcher()))
    }

    fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.adapters.clone())
    }
}

/// A declaration proxy that scopes metric names under a group.
///
/// The boundary of the configuration surface: it only shapes ids, all
/// declaration rules live in the service it borrows from.
#[derive(Debug)]
pub struct MetricGroup<'a> {
    service: &'a MetricsService,
    name: String,
}

impl MetricGroup<'_> {
    /// Returns the group name.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn id(&self, name: &str) -> MetricId {
        MetricId::grouped(self.name.clone(), name)
    }

    /// Declares a grouped counter.
    pub fn counter(&self, name: &str, comment: &str) -> MetricsResult<Counter> {
        self.service.register_counter(self.id(name), comment)
    }

    /// Declares a grouped counter with full options.
    pub fn counter_with(&self, name: &str, opts: MetricOpts) -> MetricsResult<Counter> {
        self.service.register_counter_with(self.id(name), opts)
    }

    /// Declares a grouped gauge.
    pub fn gauge(&self, name: &str, comment: &str) -> MetricsResult<Gauge> {
        self.service.register_gauge(self.id(name), comment)
    }

    /// Declares a grouped gauge with full options.
    pub fn gauge_with(&self, name: &str, opts: MetricOpts) -> MetricsResult<Gauge> {
        self.service.register_gauge_with(self.id(name), opts)
    }

    /// Declares a grouped histogram.
    pub fn histogram(&self, name: &str, comment: &str) -> MetricsResult<Histogram> {
        self.service.register_histogram(self.id(name), comment)
    }

    /// Declares a grouped histogram with full options.
    pub fn histogram_with(&self, name: &str, opts: MetricOpts) -> MetricsResult<Histogram> {
        self.service.register_histogram_with(self.id(name), opts)
    }

    /// Declares a grouped summary.
    pub fn summary(&self, name: &str, comment: &str) -> MetricsResult<Summary> {
        self.service.register_summary(self.id(name), comment)
    }

    /// Declares a grouped summary with full options.
    pub fn summary_with(&self, name: &str, opts: MetricOpts) -> MetricsResult<Summary> {
        self.service.register_summary_with(self.id(name), opts)
    }
}

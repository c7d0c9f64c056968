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

//! # Vigil Core
//!
//! Foundational crate containing the contracts of the vigil metrics facade:
//! metric definitions, tag handling, the adapter interface, the error
//! taxonomy, and the scoped-timing utility.
//!
//! This crate defines the abstract "what" of instrumentation, while
//! `vigil-metrics` provides the registries and the dispatch engine that put
//! it to work. Backend adapters (push gateways, exposition formats, test
//! stubs) implement [`MetricAdapter`] and are never referenced here by name.

#![warn(missing_docs)]

pub mod adapter;
pub mod error;
pub mod event;
pub mod metric;
pub mod tags;
pub mod timer;

pub use adapter::MetricAdapter;
pub use error::{MetricsError, MetricsResult};
pub use event::{ObservationEvent, Sample};
pub use metric::{MetricDefinition, MetricId, MetricKind};
pub use tags::TagMap;
pub use timer::{measure, Stopwatch};

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

//! # Vigil Metrics
//!
//! The registry and dispatch half of the vigil facade: a process-scoped
//! [`MetricsService`] owns the adapter registry and the frozen set of
//! metric definitions, hands out typed recording handles, and dispatches
//! every observation synchronously to the resolved adapters.
//!
//! ```
//! use std::sync::Arc;
//! use vigil_core::tags;
//! use vigil_metrics::adapters::MemoryAdapter;
//! use vigil_metrics::MetricsService;
//!
//! # fn main() -> vigil_core::MetricsResult<()> {
//! let service = MetricsService::new();
//! let sink = Arc::new(MemoryAdapter::new());
//! service.register_adapter("memory", sink.clone())?;
//!
//! let requests = service.register_counter(("http", "requests_total"), "Served requests")?;
//! service.configure()?;
//!
//! requests.increment(&tags! { "code" => "200" })?;
//! assert_eq!(sink.events().len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod adapters;
pub mod dispatch;
pub mod instrument;
pub mod registry;
pub mod service;
pub mod timer;

pub use dispatch::Dispatcher;
pub use instrument::{Counter, Gauge, Histogram, Summary};
pub use registry::MetricOpts;
pub use service::{MetricGroup, MetricsService};
pub use timer::ScopedTimer;

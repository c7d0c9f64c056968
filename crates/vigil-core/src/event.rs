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

//! Observation values as they travel through the dispatch engine.

use serde::Serialize;

use crate::metric::{MetricId, MetricKind};
use crate::tags::TagMap;

/// The value carried by one recording call, shaped by the operation that
/// produced it.
///
/// A closed set rather than one open method per metric type: the dispatch
/// engine matches a `Sample` against the metric's [`MetricKind`] in a
/// single place, which also centralizes the fan-out and error-propagation
/// policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Sample {
    /// A counter increment.
    Increment(u64),
    /// A gauge overwrite.
    Set(f64),
    /// A histogram or summary sample.
    Observe(f64),
}

impl Sample {
    /// Returns the name of the recording operation this sample encodes.
    pub fn operation(&self) -> &'static str {
        match self {
            Sample::Increment(_) => "increment",
            Sample::Set(_) => "set",
            Sample::Observe(_) => "observe",
        }
    }

    /// Returns the sample's numeric value widened to `f64`.
    pub fn as_f64(&self) -> f64 {
        match self {
            Sample::Increment(by) => *by as f64,
            Sample::Set(value) | Sample::Observe(value) => *value,
        }
    }
}

/// A normalized record of one adapter callback.
///
/// The dispatch engine itself keeps no such state; this is the shape
/// recording adapters store and test suites assert against.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObservationEvent {
    /// The metric the observation was recorded against.
    pub metric: MetricId,
    /// The metric's kind.
    pub kind: MetricKind,
    /// The fully merged tag map.
    pub tags: TagMap,
    /// The resolved numeric value.
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_operations() {
        assert_eq!(Sample::Increment(3).operation(), "increment");
        assert_eq!(Sample::Set(1.5).operation(), "set");
        assert_eq!(Sample::Observe(0.02).operation(), "observe");
    }

    #[test]
    fn sample_widening() {
        assert_eq!(Sample::Increment(3).as_f64(), 3.0);
        assert_eq!(Sample::Set(-2.5).as_f64(), -2.5);
        assert_eq!(Sample::Observe(0.25).as_f64(), 0.25);
    }
}

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

//! The error taxonomy shared by the registries and the dispatch engine.

use std::fmt::{self, Display};

use crate::metric::{MetricId, MetricKind};

/// A specialized `Result` type for metric operations.
pub type MetricsResult<T> = Result<T, MetricsError>;

/// An error surfaced synchronously to the caller of a recording or
/// registration operation.
#[derive(Debug, Clone)]
pub enum MetricsError {
    /// A recording-call precondition was violated (e.g., a summary given
    /// both a value and a block). Raised before any tag merge or dispatch.
    InvalidArgument(&'static str),
    /// A definition routes to an adapter name that is not registered at
    /// dispatch time.
    AdapterNotFound(String),
    /// Two definitions were registered under the same metric id.
    DuplicateMetric(MetricId),
    /// A definition was added, or `configure` called again, after the
    /// registry was frozen.
    AlreadyConfigured,
    /// A type-specific value constraint was violated (e.g., a non-finite
    /// sample).
    InvalidValue {
        /// The metric the value was recorded against.
        metric: MetricId,
        /// What was wrong with the value.
        reason: String,
    },
    /// A sample shape that does not match the metric's kind was handed to
    /// the dispatcher directly.
    KindMismatch {
        /// The metric being recorded.
        metric: MetricId,
        /// The kind the metric was defined with.
        kind: MetricKind,
        /// The recording operation that was attempted.
        operation: &'static str,
    },
    /// An adapter signalled a failure. Propagated untranslated, fail-fast.
    Adapter {
        /// The registered name of the failing adapter.
        name: String,
        /// The adapter's own description of the failure.
        message: String,
    },
    /// A shared registry structure was unusable (e.g., a poisoned lock).
    Internal(String),
}

impl Display for MetricsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricsError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            MetricsError::AdapterNotFound(name) => write!(f, "adapter not found: {name}"),
            MetricsError::DuplicateMetric(id) => write!(f, "metric already defined: {id}"),
            MetricsError::AlreadyConfigured => write!(f, "metrics are already configured"),
            MetricsError::InvalidValue { metric, reason } => {
                write!(f, "invalid value for metric {metric}: {reason}")
            }
            MetricsError::KindMismatch {
                metric,
                kind,
                operation,
            } => write!(
                f,
                "metric {metric} is a {kind} and does not support {operation}"
            ),
            MetricsError::Adapter { name, message } => {
                write!(f, "adapter {name} failed: {message}")
            }
            MetricsError::Internal(msg) => write!(f, "internal error: {msg}"),
        }
    }
}

impl std::error::Error for MetricsError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        let err = MetricsError::AdapterNotFound("statsd".to_string());
        assert_eq!(err.to_string(), "adapter not found: statsd");

        let err = MetricsError::DuplicateMetric(MetricId::grouped("http", "requests"));
        assert_eq!(err.to_string(), "metric already defined: http.requests");

        let err = MetricsError::KindMismatch {
            metric: MetricId::new("depth"),
            kind: MetricKind::Gauge,
            operation: "increment",
        };
        assert_eq!(
            err.to_string(),
            "metric depth is a gauge and does not support increment"
        );
    }
}

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

//! An RAII timer that records a duration when dropped.

use vigil_core::{Stopwatch, TagMap};

use crate::instrument::Summary;

/// Times a scope and records the elapsed seconds into a [`Summary`] when
/// dropped.
///
/// Useful when the timed region is a lexical scope rather than a closure
/// handed to [`Summary::time`]. The measurement is recorded on every exit
/// path, early returns included. Dispatch failure on the drop path is
/// logged, not propagated, since `drop` has no way to surface an error.
pub struct ScopedTimer<'a> {
    stopwatch: Stopwatch,
    summary: &'a Summary,
    tags: TagMap,
}

impl<'a> ScopedTimer<'a> {
    /// Starts a timer recording into `summary` with the given call tags.
    pub fn new(summary: &'a Summary, tags: TagMap) -> Self {
        Self {
            stopwatch: Stopwatch::new(),
            summary,
            tags,
        }
    }
}

impl Drop for ScopedTimer<'_> {
    fn drop(&mut self) {
        if let Some(elapsed) = self.stopwatch.elapsed_secs_f64() {
            if let Err(err) = self.summary.observe(&self.tags, elapsed) {
                log::warn!("scoped timer failed to record {}: {err}", self.summary.id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryAdapter;
    use crate::MetricsService;
    use std::sync::Arc;
    use std::time::Duration;
    use vigil_core::tags;

    #[test]
    fn records_on_scope_exit() {
        let service = MetricsService::new();
        let sink = Arc::new(MemoryAdapter::new());
        service.register_adapter("memory", sink.clone()).unwrap();
        let summary = service.register_summary("span", "Scope wall time").unwrap();

        {
            let _timer = ScopedTimer::new(&summary, tags! { "phase" => "load" });
            std::thread::sleep(Duration::from_millis(5));
        }

        let events = sink.events();
        assert_eq!(events.len(), 1);
        assert!(events[0].value >= 0.005);
        assert_eq!(events[0].tags.get("phase"), Some("load"));
    }

    #[test]
    fn records_on_early_return() {
        let service = MetricsService::new();
        let sink = Arc::new(MemoryAdapter::new());
        service.register_adapter("memory", sink.clone()).unwrap();
        let summary = service.register_summary("span", "Scope wall time").unwrap();

        fn bail_early(summary: &Summary) -> u32 {
            let _timer = ScopedTimer::new(summary, tags! {});
            7
        }

        assert_eq!(bail_early(&summary), 7);
        assert_eq!(sink.len(), 1);
    }
}

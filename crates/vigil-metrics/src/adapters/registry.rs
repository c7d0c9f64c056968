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

//! The process-wide mapping from adapter name to adapter instance.

use std::sync::{Arc, RwLock};

use vigil_core::{MetricAdapter, MetricsError, MetricsResult};

/// A thread-safe, order-preserving registry of backend adapters.
///
/// Registration order is the fan-out order. Re-registering a name silently
/// replaces the instance while keeping its original slot, so a hot-swapped
/// backend keeps its position in the fan-out. Metric names are strictly
/// unique elsewhere; adapter names deliberately are not.
///
/// Writes are expected only during bootstrap; reads may come from any
/// thread afterwards.
#[derive(Debug, Clone, Default)]
pub struct AdapterRegistry {
    entries: Arc<RwLock<Vec<(String, Arc<dyn MetricAdapter>)>>>,
}

impl AdapterRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `adapter` under `name`, overwriting any prior entry for
    /// that name.
    ///
    /// The adapter's activation hook runs first; if it fails, the registry is
    /// left unchanged and any prior entry for `name` stays active.
    pub fn register(
        &self,
        name: impl Into<String>,
        adapter: Arc<dyn MetricAdapter>,
    ) -> MetricsResult<()> {
        let name = name.into();
        adapter.register()?;
        {
            let mut entries = self
                .entries
                .write()
                .map_err(|_| MetricsError::Internal("adapter registry lock poisoned".into()))?;
            match entries.iter_mut().find(|(n, _)| *n == name) {
                Some(entry) => entry.1 = adapter,
                None => entries.push((name.clone(), adapter)),
            }
        }
        log::info!("registered metrics adapter: {name}");
        Ok(())
    }

    /// Returns the adapter registered under `name`.
    pub fn lookup(&self, name: &str) -> MetricsResult<Arc<dyn MetricAdapter>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| MetricsError::Internal("adapter registry lock poisoned".into()))?;
        entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, adapter)| adapter.clone())
            .ok_or_else(|| MetricsError::AdapterNotFound(name.to_string()))
    }

    /// Returns every registered adapter, in registration order.
    pub fn all(&self) -> Vec<Arc<dyn MetricAdapter>> {
        if let Ok(entries) = self.entries.read() {
            entries.iter().map(|(_, adapter)| adapter.clone()).collect()
        } else {
            Vec::new()
        }
    }

    /// Returns the registered adapter names, in registration order.
    pub fn names(&self) -> Vec<String> {
        if let Ok(entries) = self.entries.read() {
            entries.iter().map(|(name, _)| name.clone()).collect()
        } else {
            Vec::new()
        }
    }

    /// Returns the number of registered adapters.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Returns true if no adapter is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

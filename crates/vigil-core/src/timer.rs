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

//! Monotonic wall-clock measurement of caller-supplied work.

use std::time::Instant;

/// A simple monotonic stopwatch.
///
/// A default-constructed stopwatch is not running and reports no elapsed
/// time; [`Stopwatch::new`] starts immediately.
#[derive(Debug, Clone, Default)]
pub struct Stopwatch {
    started: Option<Instant>,
}

impl Stopwatch {
    /// Creates a stopwatch and starts it immediately.
    pub fn new() -> Self {
        Self {
            started: Some(Instant::now()),
        }
    }

    /// Starts (or restarts) the stopwatch.
    pub fn start(&mut self) {
        self.started = Some(Instant::now());
    }

    /// Returns the elapsed time in fractional seconds, or `None` if the
    /// stopwatch was never started.
    pub fn elapsed_secs_f64(&self) -> Option<f64> {
        self.started.map(|at| at.elapsed().as_secs_f64())
    }
}

/// Runs `f` exactly once and returns its result together with the measured
/// wall-clock duration in fractional seconds.
///
/// Only the duration of `f`'s own execution in the calling thread is
/// measured; no ordering guarantee is made relative to concurrent work,
/// and no execution limit is imposed. A panic inside `f` unwinds before
/// any duration is produced.
pub fn measure<T, F: FnOnce() -> T>(f: F) -> (T, f64) {
    let started = Instant::now();
    let value = f();
    (value, started.elapsed().as_secs_f64())
}

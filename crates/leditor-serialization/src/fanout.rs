// Leditor - Lingo level data toolkit
//
// Copyright (c) 2025 Leditor contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Fan-out of independent units of work onto rayon.
//!
//! Two shapes cover every decoder:
//!
//! - [`map_units`] turns unit indices into results (catalog lines,
//!   placements).
//! - [`fill_chunks`] hands each unit its own `&mut` chunk of a pre-sized
//!   output slice (matrix cells), so the writes are disjoint by
//!   construction and need no locking.
//!
//! Both return per-unit results in unit order whatever the schedule was,
//! which is what makes "first failure" in strict mode deterministic. Work
//! is never cancelled: a failed unit does not stop its siblings.
//!
//! Batches below [`DecodeOptions::parallel_threshold`] run on the calling
//! thread. With [`DecodeOptions::max_threads`] set, a dedicated pool of
//! that size runs the batch instead of the global one.

use crate::error::ImportError;
use crate::options::DecodeOptions;
use rayon::prelude::*;
use tracing::debug;

fn parallel(options: &DecodeOptions, units: usize) -> bool {
    units >= options.parallel_threshold.max(2)
}

fn in_pool<R, OP>(options: &DecodeOptions, op: OP) -> Result<R, ImportError>
where
    R: Send,
    OP: FnOnce() -> R + Send,
{
    match options.max_threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .map_err(|e| ImportError::ThreadPool(e.to_string()))?;
            Ok(pool.install(op))
        }
        None => Ok(op()),
    }
}

/// Runs `work(i)` for every `i` in `0..units`, collecting results in order.
pub(crate) fn map_units<R, F>(options: &DecodeOptions, units: usize, work: F) -> Result<Vec<R>, ImportError>
where
    R: Send,
    F: Fn(usize) -> R + Sync,
{
    if !parallel(options, units) {
        debug!(units, "decoding serially");
        return Ok((0..units).map(work).collect());
    }

    debug!(units, threads = ?options.max_threads, "decoding in parallel");
    in_pool(options, || (0..units).into_par_iter().map(&work).collect())
}

/// Splits `slots` into chunks of `chunk` and runs `work(i, chunk_i)` on
/// each, collecting the returned values in chunk order.
pub(crate) fn fill_chunks<T, R, F>(
    options: &DecodeOptions,
    slots: &mut [T],
    chunk: usize,
    work: F,
) -> Result<Vec<R>, ImportError>
where
    T: Send,
    R: Send,
    F: Fn(usize, &mut [T]) -> R + Sync,
{
    let chunk = chunk.max(1);
    let units = (slots.len() + chunk - 1) / chunk;
    if !parallel(options, units) {
        debug!(units, "decoding serially");
        return Ok(slots
            .chunks_mut(chunk)
            .enumerate()
            .map(|(i, c)| work(i, c))
            .collect());
    }

    debug!(units, threads = ?options.max_threads, "decoding in parallel");
    in_pool(options, || {
        slots
            .par_chunks_mut(chunk)
            .enumerate()
            .map(|(i, c)| work(i, c))
            .collect()
    })
}

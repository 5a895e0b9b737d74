//! Memoized pipeline stages.
//!
//! A stage maps keyed items to outputs and remembers what it produced, so the
//! next run can tell which outputs are reused and which are new, modified or
//! gone.
//!
//! # Architecture
//!
//! ```text
//!                 ┌──────────── previous: key → output ───────────┐
//!                 │                                               │
//! items (key, input) ──→ Scheduler::map ──→ results ──→ classify ─┴─→ StageReport
//!                 │          (rayon)                              │
//!                 └──── memo: input → output (MemoStage only) ────┘
//! ```
//!
//! - `TrackedStage` always recomputes. Its inputs are live provider objects
//!   that cannot be compared, so only its outputs are compared by key.
//! - `MemoStage` looks every input up by value first. A hit reuses the cached
//!   output verbatim and is tagged `Cached`; only misses call `compute`.
//!
//! Both caches are owned by the stage and rebuilt after all items finished;
//! workers only read them. After a complete run, entries for inputs and keys
//! that were not seen are dropped. After a cancelled run nothing is dropped
//! and no `Removed` outputs are reported.
//!
//! # Cache Safety
//!
//! Keys, inputs and outputs must implement `Structural`. Types holding `Vec`,
//! `Arc` or provider handles cannot, so they cannot be cached at all.

use std::fmt;
use std::hash::Hash;

use bgen_ir::Structural;
use rayon::prelude::*;
use rustc_hash::{FxBuildHasher, FxHashMap};

use crate::CancellationFlag;

/// Tracking names of the pipeline stages.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StageName {
    InitialExtraction,
    MergingFragments,
    Emission,
}

impl StageName {
    pub fn as_str(self) -> &'static str {
        match self {
            StageName::InitialExtraction => "InitialExtraction",
            StageName::MergingFragments => "MergingFragments",
            StageName::Emission => "Emission",
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a tracked output has its value. Verification only.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum StepReason {
    /// Input was value-equal to a previous input; output reused verbatim.
    Cached,
    /// Recomputed, and equal to the key's previous output.
    Unchanged,
    /// Recomputed, and different from the key's previous output.
    Modified,
    /// The key had no previous output.
    New,
    /// The key had an output last run and has none now.
    Removed,
}

impl StepReason {
    /// Returns `true` for outcomes that leave downstream work unchanged.
    pub fn is_reused(self) -> bool {
        matches!(self, StepReason::Cached | StepReason::Unchanged)
    }
}

/// One output of a stage run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrackedOutput<K, O> {
    pub key: K,
    /// The output, or the last output for `Removed`.
    pub value: O,
    pub reason: StepReason,
}

/// Everything one stage produced in one run, sorted by key.
#[derive(Clone, Debug)]
pub struct StageReport<K, O> {
    pub stage: StageName,
    pub outputs: Vec<TrackedOutput<K, O>>,
    /// Inputs answered from the memo.
    pub hits: usize,
    /// Inputs that had to be computed.
    pub misses: usize,
    /// `false` if the run was cancelled before the stage was committed.
    pub complete: bool,
}

impl<K: PartialEq, O> StageReport<K, O> {
    /// Reason recorded for `key`, if it appears in this run.
    pub fn reason_for(&self, key: &K) -> Option<StepReason> {
        self.outputs
            .iter()
            .find(|output| output.key == *key)
            .map(|output| output.reason)
    }

    /// Number of outputs tagged `reason`.
    pub fn count(&self, reason: StepReason) -> usize {
        self.outputs
            .iter()
            .filter(|output| output.reason == reason)
            .count()
    }

    /// Returns `true` if every output is `Cached` or `Unchanged`.
    pub fn is_fully_reused(&self) -> bool {
        self.outputs.iter().all(|output| output.reason.is_reused())
    }

    /// Outputs that exist in this run (everything except `Removed`).
    pub fn live(&self) -> impl Iterator<Item = &TrackedOutput<K, O>> {
        self.outputs
            .iter()
            .filter(|output| output.reason != StepReason::Removed)
    }
}

/// Runs per-item work, in parallel when a pool is available.
#[derive(Clone, Copy)]
pub struct Scheduler<'a> {
    pool: Option<&'a rayon::ThreadPool>,
    cancel: &'a CancellationFlag,
}

impl<'a> Scheduler<'a> {
    pub fn new(pool: Option<&'a rayon::ThreadPool>, cancel: &'a CancellationFlag) -> Self {
        Scheduler { pool, cancel }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Apply `f` to every item, in item order.
    ///
    /// The flag is checked before each item; items not started when it was
    /// set come back as `None`.
    pub fn map<T, R>(&self, items: &[T], f: impl Fn(&T) -> R + Sync) -> Vec<Option<R>>
    where
        T: Sync,
        R: Send,
    {
        let cancel = self.cancel;
        let work = |item: &T| {
            if cancel.is_cancelled() {
                None
            } else {
                Some(f(item))
            }
        };

        match self.pool {
            Some(pool) => pool.install(|| items.par_iter().map(work).collect()),
            None => items.iter().map(work).collect(),
        }
    }
}

fn classify<K: Eq + Hash, O: PartialEq>(
    previous: &FxHashMap<K, O>,
    key: &K,
    value: &O,
) -> StepReason {
    match previous.get(key) {
        None => StepReason::New,
        Some(old) if old == value => StepReason::Unchanged,
        Some(_) => StepReason::Modified,
    }
}

/// Moves what is left of `previous` into the report (complete run) or back
/// into the cache (cancelled run).
fn settle<K, O>(
    previous: FxHashMap<K, O>,
    next: &mut FxHashMap<K, O>,
    outputs: &mut Vec<TrackedOutput<K, O>>,
    complete: bool,
) where
    K: Eq + Hash,
{
    if complete {
        outputs.extend(previous.into_iter().map(|(key, value)| TrackedOutput {
            key,
            value,
            reason: StepReason::Removed,
        }));
    } else {
        next.extend(previous);
    }
}

/// A stage whose inputs cannot be compared; it always recomputes.
pub struct TrackedStage<K, O> {
    name: StageName,
    previous: FxHashMap<K, O>,
}

impl<K, O> TrackedStage<K, O>
where
    K: Structural + Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync,
    O: Structural + Clone + Eq + Send + Sync,
{
    pub fn new(name: StageName) -> Self {
        TrackedStage {
            name,
            previous: FxHashMap::default(),
        }
    }

    /// Compute every item; `None` drops the item from the run.
    pub fn run<T: Sync>(
        &mut self,
        items: &[(K, T)],
        scheduler: Scheduler<'_>,
        compute: impl Fn(&T) -> Option<O> + Sync,
    ) -> StageReport<K, O> {
        let results = scheduler.map(items, |(_, item)| compute(item));

        let mut previous = std::mem::take(&mut self.previous);
        let mut next = FxHashMap::with_capacity_and_hasher(items.len(), FxBuildHasher);
        let mut outputs = Vec::with_capacity(items.len());
        let complete = !scheduler.is_cancelled();
        let mut misses = 0;

        for ((key, _), result) in items.iter().zip(results) {
            let Some(result) = result else {
                continue;
            };
            misses += 1;
            match result {
                Some(value) => {
                    let reason = classify(&previous, key, &value);
                    previous.remove(key);
                    next.insert(key.clone(), value.clone());
                    outputs.push(TrackedOutput {
                        key: key.clone(),
                        value,
                        reason,
                    });
                }
                None => {
                    tracing::trace!(stage = %self.name, key = ?key, "item dropped");
                    if let Some(value) = previous.remove(key) {
                        outputs.push(TrackedOutput {
                            key: key.clone(),
                            value,
                            reason: StepReason::Removed,
                        });
                    }
                }
            }
        }

        settle(previous, &mut next, &mut outputs, complete);
        self.previous = next;
        finish(self.name, outputs, 0, misses, complete)
    }
}

/// A stage memoized on the value of its input.
pub struct MemoStage<K, I, O> {
    name: StageName,
    memo: FxHashMap<I, O>,
    previous: FxHashMap<K, O>,
}

impl<K, I, O> MemoStage<K, I, O>
where
    K: Structural + Clone + Eq + Hash + Ord + fmt::Debug + Send + Sync,
    I: Structural + Clone + Eq + Hash + Send + Sync,
    O: Structural + Clone + Eq + Send + Sync,
{
    pub fn new(name: StageName) -> Self {
        MemoStage {
            name,
            memo: FxHashMap::default(),
            previous: FxHashMap::default(),
        }
    }

    /// Number of memoized inputs.
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }

    /// Answer every item from the memo, computing only the misses.
    pub fn run(
        &mut self,
        items: &[(K, I)],
        scheduler: Scheduler<'_>,
        compute: impl Fn(&I) -> O + Sync,
    ) -> StageReport<K, O> {
        // Memo hits are answered even after cancellation; only misses are
        // scheduled.
        let memo = &self.memo;
        let pending: Vec<&I> = items
            .iter()
            .map(|(_, input)| input)
            .filter(|input| !memo.contains_key(*input))
            .collect();
        let mut computed = scheduler.map(&pending, |input| compute(*input)).into_iter();
        let results: Vec<Option<(O, bool)>> = items
            .iter()
            .map(|(_, input)| match memo.get(input) {
                Some(cached) => Some((cached.clone(), true)),
                None => computed.next().flatten().map(|value| (value, false)),
            })
            .collect();

        let mut previous = std::mem::take(&mut self.previous);
        let mut next = FxHashMap::with_capacity_and_hasher(items.len(), FxBuildHasher);
        let mut memo_next = FxHashMap::with_capacity_and_hasher(items.len(), FxBuildHasher);
        let mut outputs = Vec::with_capacity(items.len());
        let complete = !scheduler.is_cancelled();
        let (mut hits, mut misses) = (0, 0);

        for ((key, input), result) in items.iter().zip(results) {
            let Some((value, hit)) = result else {
                continue;
            };
            let reason = if hit {
                hits += 1;
                tracing::trace!(stage = %self.name, key = ?key, "cache hit");
                StepReason::Cached
            } else {
                misses += 1;
                tracing::trace!(stage = %self.name, key = ?key, "cache miss");
                classify(&previous, key, &value)
            };
            previous.remove(key);
            memo_next.insert(input.clone(), value.clone());
            next.insert(key.clone(), value.clone());
            outputs.push(TrackedOutput {
                key: key.clone(),
                value,
                reason,
            });
        }

        settle(previous, &mut next, &mut outputs, complete);
        self.previous = next;
        if complete {
            self.memo = memo_next;
        } else {
            self.memo.extend(memo_next);
        }
        finish(self.name, outputs, hits, misses, complete)
    }
}

fn finish<K: Ord, O>(
    stage: StageName,
    mut outputs: Vec<TrackedOutput<K, O>>,
    hits: usize,
    misses: usize,
    complete: bool,
) -> StageReport<K, O> {
    outputs.sort_by(|a, b| a.key.cmp(&b.key));

    let report = StageReport {
        stage,
        outputs,
        hits,
        misses,
        complete,
    };
    tracing::debug!(
        stage = %stage,
        outputs = report.outputs.len(),
        hits,
        misses,
        removed = report.count(StepReason::Removed),
        complete,
        "stage finished"
    );
    report
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

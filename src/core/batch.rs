//! Mutation batching
//!
//! A `MutationBatch` groups any number of writes against one store and
//! reports them to a listener as a single change set, so observers
//! recompute once per logical operation rather than once per written
//! segment.

use log::debug;

use crate::core::access::{delete_value, set_value_in};
use crate::core::coerce::IntoArray;
use crate::core::errors::Result;
use crate::core::list::move_value_at;
use crate::core::merge::merge_recorded;
use crate::core::path::{normalize_path, NamePath, Segment};
use crate::core::value::Value;

/// Receives the paths written by one batch
pub trait ChangeListener {
    fn on_change(&mut self, changed: &[NamePath]);
}

impl<F: FnMut(&[NamePath])> ChangeListener for F {
    fn on_change(&mut self, changed: &[NamePath]) {
        self(changed)
    }
}

/// Configuration for mutation batches
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Drop recorded paths that sit below another recorded path
    pub coalesce_nested: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            coalesce_nested: true,
        }
    }
}

/// Statistics for a committed batch
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchStats {
    /// Write operations applied through the batch
    pub writes: usize,
    /// Paths handed to the listener
    pub notified_paths: usize,
    /// Paths dropped as duplicates or covered by an ancestor
    pub eliminated_paths: usize,
}

/// A group of writes reported to a listener as one change
pub struct MutationBatch<'s, 'l> {
    store: &'s mut Value,
    listener: &'l mut dyn ChangeListener,
    config: BatchConfig,
    pending: Vec<NamePath>,
    writes: usize,
    committed: bool,
}

impl<'s, 'l> MutationBatch<'s, 'l> {
    /// Open a batch with the default configuration
    pub fn new(store: &'s mut Value, listener: &'l mut dyn ChangeListener) -> Self {
        Self::with_config(store, listener, BatchConfig::default())
    }

    pub fn with_config(
        store: &'s mut Value,
        listener: &'l mut dyn ChangeListener,
        config: BatchConfig,
    ) -> Self {
        MutationBatch {
            store,
            listener,
            config,
            pending: Vec::new(),
            writes: 0,
            committed: false,
        }
    }

    /// Read access to the store while the batch is open
    pub fn store(&self) -> &Value {
        &*self.store
    }

    pub fn set<P: IntoArray<Segment>>(&mut self, path: P, value: Value) -> Result<&mut Self> {
        let path = normalize_path(path);
        set_value_in(self.store, &path, value)?;
        self.record(path);
        Ok(self)
    }

    pub fn merge(&mut self, patch: Value) -> Result<&mut Self> {
        let mut changed = Vec::new();
        merge_recorded(self.store, patch, &NamePath::new(), &mut changed)?;
        if !changed.is_empty() {
            self.writes += 1;
            self.pending.extend(changed);
        }
        Ok(self)
    }

    pub fn delete<P: IntoArray<Segment>>(&mut self, path: P) -> Option<Value> {
        let path = normalize_path(path);
        let removed = delete_value(self.store, &path);
        if removed.is_some() {
            self.record(path);
        }
        removed
    }

    pub fn move_at<P: IntoArray<Segment>>(&mut self, path: P, from: isize, to: isize) -> Result<bool> {
        let path = normalize_path(path);
        let moved = move_value_at(self.store, &path, from, to)?;
        if moved {
            self.record(path);
        }
        Ok(moved)
    }

    fn record(&mut self, path: NamePath) {
        self.writes += 1;
        self.pending.push(path);
    }

    /// Notify the listener once and close the batch
    pub fn commit(mut self) -> BatchStats {
        self.flush()
    }

    fn flush(&mut self) -> BatchStats {
        self.committed = true;

        let recorded = std::mem::take(&mut self.pending);
        let total = recorded.len();
        let changed = reduce_paths(recorded, self.config.coalesce_nested);

        let stats = BatchStats {
            writes: self.writes,
            notified_paths: changed.len(),
            eliminated_paths: total - changed.len(),
        };

        if !changed.is_empty() {
            debug!(
                "batch commit: {} writes, {} paths ({} eliminated)",
                stats.writes, stats.notified_paths, stats.eliminated_paths
            );
            self.listener.on_change(&changed);
        }

        stats
    }
}

impl Drop for MutationBatch<'_, '_> {
    fn drop(&mut self) {
        if !self.committed {
            self.flush();
        }
    }
}

/// Remove duplicates, and optionally paths covered by a recorded
/// ancestor, keeping first-seen order
fn reduce_paths(recorded: Vec<NamePath>, coalesce_nested: bool) -> Vec<NamePath> {
    let mut kept: Vec<NamePath> = Vec::with_capacity(recorded.len());

    for path in recorded {
        if kept.contains(&path) {
            continue;
        }
        if coalesce_nested {
            if kept.iter().any(|ancestor| path.starts_with(ancestor)) {
                continue;
            }
            kept.retain(|existing| !existing.starts_with(&path));
        }
        kept.push(path);
    }

    kept
}

/// `set_value_in` wrapped in its own batch: one notification per call
pub fn set_value_batched<P: IntoArray<Segment>>(
    store: &mut Value,
    listener: &mut dyn ChangeListener,
    path: P,
    value: Value,
) -> Result<BatchStats> {
    let mut batch = MutationBatch::new(store, listener);
    batch.set(path, value)?;
    Ok(batch.commit())
}

/// Merge every patch inside one batch: one notification for the whole
/// call
pub fn set_values_batched<I>(
    store: &mut Value,
    listener: &mut dyn ChangeListener,
    patches: I,
) -> Result<BatchStats>
where
    I: IntoIterator<Item = Value>,
{
    let mut batch = MutationBatch::new(store, listener);
    for patch in patches {
        batch.merge(patch)?;
    }
    Ok(batch.commit())
}

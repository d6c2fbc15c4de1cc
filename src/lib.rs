//! formpath: path-addressed form state
//!
//! This crate reads and writes values inside nested key/value stores by
//! path, merges patches into them, copies selected paths out of them and
//! compares paths and shallow values. Every operation is a free function
//! over a caller-owned [`Value`]; [`FormStore`] bundles a root value with
//! change listeners for callers that want notifications.

pub mod core;

use crate::core::coerce::IntoArray;

/// Identifies a listener registered on a [`FormStore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(usize);

struct Subscriber {
    id: SubscriptionId,
    /// Paths the listener cares about; `None` means everything
    watched: Option<Vec<NamePath>>,
    listener: Box<dyn ChangeListener>,
}

impl Subscriber {
    fn interested_in(&self, changed: &NamePath) -> bool {
        match &self.watched {
            None => true,
            Some(watched) => {
                contains_name_path_partial(watched, changed)
                    || watched.iter().any(|path| path.starts_with(changed))
            }
        }
    }
}

/// Hands one batch's change set to every interested subscriber
struct Fanout<'a> {
    subscribers: &'a mut [Subscriber],
}

impl ChangeListener for Fanout<'_> {
    fn on_change(&mut self, changed: &[NamePath]) {
        for subscriber in self.subscribers.iter_mut() {
            let relevant: Vec<NamePath> = changed
                .iter()
                .filter(|path| subscriber.interested_in(path))
                .cloned()
                .collect();
            if !relevant.is_empty() {
                subscriber.listener.on_change(&relevant);
            }
        }
    }
}

/// A caller-owned store with change notification
pub struct FormStore {
    root: Value,
    subscribers: Vec<Subscriber>,
    next_id: usize,
    config: BatchConfig,
}

impl Default for FormStore {
    fn default() -> Self {
        FormStore::new()
    }
}

impl FormStore {
    /// Create an empty store (an empty plain object)
    pub fn new() -> Self {
        FormStore::from_value(Value::object())
    }

    pub fn from_value(root: Value) -> Self {
        FormStore {
            root,
            subscribers: Vec::new(),
            next_id: 0,
            config: BatchConfig::default(),
        }
    }

    pub fn with_config(mut self, config: BatchConfig) -> Self {
        self.config = config;
        self
    }

    /// The whole store
    pub fn value(&self) -> &Value {
        &self.root
    }

    pub fn into_value(self) -> Value {
        self.root
    }

    /// Get a value at the given path
    pub fn get<P: IntoArray<Segment>>(&self, path: P) -> Option<&Value> {
        get_value(&self.root, path)
    }

    /// Check if something is stored at the given path
    pub fn exists<P: IntoArray<Segment>>(&self, path: P) -> bool {
        has_value(&self.root, path)
    }

    /// Set a value at the given path
    pub fn set<P: IntoArray<Segment>>(&mut self, path: P, value: Value) -> Result<BatchStats> {
        self.batch(|batch| {
            batch.set(path, value)?;
            Ok(())
        })
        .map(|(_, stats)| stats)
    }

    /// Merge patches into the store, left to right
    pub fn merge<I>(&mut self, patches: I) -> Result<BatchStats>
    where
        I: IntoIterator<Item = Value>,
    {
        self.batch(|batch| {
            for patch in patches {
                batch.merge(patch)?;
            }
            Ok(())
        })
        .map(|(_, stats)| stats)
    }

    /// Delete the value at the given path
    pub fn delete<P: IntoArray<Segment>>(&mut self, path: P) -> Option<Value> {
        self.batch(|batch| Ok(batch.delete(path)))
            .ok()
            .and_then(|(removed, _)| removed)
    }

    /// Copy out only the given paths
    pub fn pick(&self, paths: &[NamePath]) -> Result<Value> {
        clone_by_name_path_list(&self.root, paths)
    }

    /// All endpoint paths in store order
    pub fn paths(&self) -> Vec<NamePath> {
        leaf_paths(&self.root).into_iter().map(|(path, _)| path).collect()
    }

    /// Run several writes as one batch; subscribers hear about them once.
    ///
    /// Writes made before an error stay applied and are still reported.
    pub fn batch<F, T>(&mut self, f: F) -> Result<(T, BatchStats)>
    where
        F: FnOnce(&mut MutationBatch<'_, '_>) -> Result<T>,
    {
        let mut fanout = Fanout {
            subscribers: &mut self.subscribers,
        };
        let mut batch = MutationBatch::with_config(&mut self.root, &mut fanout, self.config.clone());
        let output = f(&mut batch)?;
        Ok((output, batch.commit()))
    }

    /// Register a listener; `watched` limits it to changes at, above or
    /// below those paths
    pub fn subscribe<L>(&mut self, watched: Option<Vec<NamePath>>, listener: L) -> SubscriptionId
    where
        L: ChangeListener + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push(Subscriber {
            id,
            watched,
            listener: Box::new(listener),
        });
        id
    }

    /// Remove a listener; returns whether it was registered
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|subscriber| subscriber.id != id);
        self.subscribers.len() != before
    }
}

pub use crate::core::access::{
    delete_value, get_value, has_value, set_value, set_value_in, with_value,
};
pub use crate::core::batch::{
    set_value_batched, set_values_batched, BatchConfig, BatchStats, ChangeListener, MutationBatch,
};
pub use crate::core::coerce::to_array;
pub use crate::core::compare::is_similar;
pub use crate::core::errors::{Result, StoreError};
pub use crate::core::event::default_get_value_from_event;
pub use crate::core::list::{move_item, move_value_at};
pub use crate::core::merge::{merge_into, set_values};
pub use crate::core::path::{
    contains_name_path, contains_name_path_partial,
    match_name_path, normalize_path, NamePath, PathError, Segment,
};
pub use crate::core::select::{clone_by_name_path_list, leaf_paths};
pub use crate::core::value::{Callback, Instance, Map, Value};

//! Per-namespace mutual exclusion
//!
//! Mutations are a read-modify-write of the whole namespace document. Holding
//! the namespace's lock across that span keeps concurrent writers of the same
//! namespace from losing each other's updates, while writers of different
//! namespaces never wait for each other.

use dashmap::DashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::prelude::*;

/// Number of table entries above which idle locks are pruned
const PRUNE_THRESHOLD: usize = 1024;

#[derive(Debug)]
pub struct NamespaceLocks {
	locks: DashMap<Box<str>, Arc<Mutex<()>>>,
	/// Table size that triggers the next prune; twice the surviving size
	/// after each prune, never below `PRUNE_THRESHOLD`
	prune_at: AtomicUsize,
}

impl NamespaceLocks {
	pub fn new() -> Self {
		Self { locks: DashMap::new(), prune_at: AtomicUsize::new(PRUNE_THRESHOLD) }
	}

	/// Waits for and takes the lock of `namespace`
	pub async fn lock(&self, namespace: &str) -> OwnedMutexGuard<()> {
		let prune_at = self.prune_at.load(Ordering::Relaxed);
		if self.locks.len() > prune_at
			&& self
				.prune_at
				.compare_exchange(prune_at, usize::MAX, Ordering::AcqRel, Ordering::Relaxed)
				.is_ok()
		{
			self.prune();
			let next = (self.locks.len() * 2).max(PRUNE_THRESHOLD);
			self.prune_at.store(next, Ordering::Release);
		}

		// The map shard guard must be released before awaiting
		let mutex = self
			.locks
			.entry(namespace.into())
			.or_insert_with(|| Arc::new(Mutex::new(())))
			.value()
			.clone();
		mutex.lock_owned().await
	}

	/// Drops entries no task holds or waits for
	pub fn prune(&self) {
		let before = self.locks.len();
		self.locks.retain(|_, mutex| Arc::strong_count(mutex) > 1);
		trace!("Pruned namespace locks: {} -> {}", before, self.locks.len());
	}

	pub fn len(&self) -> usize {
		self.locks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.locks.is_empty()
	}
}

impl Default for NamespaceLocks {
	fn default() -> Self {
		Self::new()
	}
}


// vim: ts=4

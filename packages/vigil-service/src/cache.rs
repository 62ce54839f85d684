/// Lifecycle of a cached result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheState {
	/// Nothing cached and no query has run.
	Empty,
	Cached,
	/// Nothing cached, but a previous cycle did cache a result.
	Detached,
}

#[derive(Debug)]
enum Slot<T> {
	Empty,
	Cached(Vec<T>),
	Detached,
}

/// Holds at most one result set for a single display cycle.
#[derive(Debug)]
pub struct ResultCache<T> {
	slot: Slot<T>,
}
impl<T> ResultCache<T> {
	pub fn new() -> Self {
		Self { slot: Slot::Empty }
	}

	pub fn state(&self) -> CacheState {
		match self.slot {
			Slot::Empty => CacheState::Empty,
			Slot::Cached(_) => CacheState::Cached,
			Slot::Detached => CacheState::Detached,
		}
	}

	pub fn is_cached(&self) -> bool {
		matches!(self.slot, Slot::Cached(_))
	}

	/// The cached items, or an empty slice when nothing is cached.
	pub fn items(&self) -> &[T] {
		match &self.slot {
			Slot::Cached(items) => items.as_slice(),
			Slot::Empty | Slot::Detached => &[],
		}
	}

	/// Stores `items`, replacing anything already cached.
	pub fn fill(&mut self, items: Vec<T>) {
		self.slot = Slot::Cached(items);
	}

	/// Drops the cached items. Safe to call in any state.
	pub fn detach(&mut self) {
		if matches!(self.slot, Slot::Cached(_)) {
			self.slot = Slot::Detached;
		}
	}
}
impl<T> Default for ResultCache<T> {
	fn default() -> Self {
		Self::new()
	}
}

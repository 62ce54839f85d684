use std::num::NonZeroUsize;

const DEFAULT_PAGE_SIZE: NonZeroUsize =
	match NonZeroUsize::new(vigil_config::DEFAULT_PAGE_SIZE as usize) {
		Some(size) => size,
		None => panic!("Default page size must be non-zero."),
	};

/// Fixed-size slicing of an in-memory result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
	page_size: NonZeroUsize,
}
impl Pager {
	pub const fn new(page_size: NonZeroUsize) -> Self {
		Self { page_size }
	}

	/// Builds a pager from configuration, falling back to the default size for zero.
	pub fn from_listing(listing: &vigil_config::Listing) -> Self {
		let page_size = NonZeroUsize::new(listing.page_size as usize).unwrap_or(DEFAULT_PAGE_SIZE);

		Self { page_size }
	}

	pub fn page_size(&self) -> usize {
		self.page_size.get()
	}

	pub fn page_count(&self, len: usize) -> usize {
		len.div_ceil(self.page_size.get())
	}

	/// Returns page `index` (0-based). Pages past the end are empty.
	pub fn page<'a, T>(&self, items: &'a [T], index: usize) -> &'a [T] {
		let size = self.page_size.get();
		let start = index.saturating_mul(size);

		if start >= items.len() {
			return &[];
		}

		let end = start.saturating_add(size).min(items.len());

		&items[start..end]
	}
}
impl Default for Pager {
	fn default() -> Self {
		Self::new(DEFAULT_PAGE_SIZE)
	}
}

use std::sync::Arc;

use tokio::sync::mpsc;

use vigil_domain::{Pager, Permission, PermissionFilter, Session};

use crate::{Backends, Error, Result, ReviewService};

/// Notifications for whoever hosts the picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerEvent {
	/// A row was chosen; the host should dismiss the picker.
	Close { selection: Permission },
}

/// Single-selection list over permission search results.
///
/// Every `load` runs one search with the current filter and resets the selection. Paging
/// works on the loaded set and never searches again.
pub struct PermissionPicker {
	review: Arc<dyn ReviewService>,
	session: Arc<Session>,
	pager: Pager,
	search_val: Option<String>,
	admin: bool,
	items: Vec<Permission>,
	page: usize,
	selection: Option<Permission>,
	events: mpsc::UnboundedSender<PickerEvent>,
	last_error: Option<Error>,
}
impl PermissionPicker {
	pub fn new(
		backends: &Backends,
		session: Arc<Session>,
		admin: bool,
		pager: Pager,
	) -> (Self, mpsc::UnboundedReceiver<PickerEvent>) {
		let (events, rx) = mpsc::unbounded_channel();
		let picker = Self {
			review: backends.review.clone(),
			session,
			pager,
			search_val: None,
			admin,
			items: Vec::new(),
			page: 0,
			selection: None,
			events,
			last_error: None,
		};

		(picker, rx)
	}

	/// Sets the object-name fragment used by the next `load`.
	pub fn set_search_val(&mut self, search_val: impl Into<String>) {
		self.search_val = Some(search_val.into());
	}

	pub fn search_val(&self) -> Option<&str> {
		self.search_val.as_deref()
	}

	/// Switches between administrative and regular permissions for the next `load`.
	pub fn set_admin(&mut self, admin: bool) {
		self.admin = admin;
	}

	pub fn admin(&self) -> bool {
		self.admin
	}

	pub async fn load(&mut self) -> &[Permission] {
		self.selection = None;
		self.page = 0;

		let object_name = self.search_val.get_or_insert_with(String::new).clone();
		let filter = PermissionFilter::by_object(object_name, self.admin);

		self.items = match self.review.find_permissions(&self.session, &filter).await {
			Ok(items) => {
				self.last_error = None;

				items
			},
			Err(err) => {
				tracing::error!(
					object_name = %filter.object_name,
					admin = filter.admin,
					error = %err,
					"Permission search failed."
				);

				self.last_error = Some(err);

				Vec::new()
			},
		};

		tracing::debug!(count = self.items.len(), "Permissions loaded.");

		&self.items
	}

	pub fn items(&self) -> &[Permission] {
		&self.items
	}

	pub fn last_error(&self) -> Option<&Error> {
		self.last_error.as_ref()
	}

	pub fn page_count(&self) -> usize {
		self.pager.page_count(self.items.len())
	}

	pub fn current_page(&self) -> usize {
		self.page
	}

	pub fn page(&self, index: usize) -> &[Permission] {
		self.pager.page(&self.items, index)
	}

	/// Rows on the current page.
	pub fn visible(&self) -> &[Permission] {
		self.page(self.page)
	}

	/// Moves to page `index`, clamped to the last page.
	pub fn set_page(&mut self, index: usize) -> &[Permission] {
		self.page = index.min(self.page_count().saturating_sub(1));

		self.visible()
	}

	pub fn selection(&self) -> Option<&Permission> {
		self.selection.as_ref()
	}

	/// Selects row `index` of the loaded set and asks the host to close the picker.
	pub fn select(&mut self, index: usize) -> Result<&Permission> {
		let loaded = self.items.len();
		let Some(permission) = self.items.get(index).cloned() else {
			return Err(Error::InvalidRequest {
				message: format!("Row {index} is out of range for {loaded} loaded rows."),
			});
		};

		if self.events.send(PickerEvent::Close { selection: permission.clone() }).is_err() {
			tracing::debug!("Picker host stopped listening for events.");
		}

		Ok(&*self.selection.insert(permission))
	}

	/// Selects row `row` of the current page.
	pub fn select_visible(&mut self, row: usize) -> Result<&Permission> {
		if row >= self.visible().len() {
			return Err(Error::InvalidRequest {
				message: format!("Row {row} is not on page {}.", self.page),
			});
		}

		self.select(self.page * self.pager.page_size() + row)
	}
}

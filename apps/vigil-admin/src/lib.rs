use std::{path::PathBuf, sync::Arc};

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use serde::Serialize;
use time::OffsetDateTime;

use vigil_domain::{AuditRecord, Pager, Permission, SearchCriteria, Session};
use vigil_service::{Backends, BindListModel, ModListModel, PermissionPicker, PickerEvent};

#[derive(Debug, Parser)]
#[command(
	version = vigil_cli::VERSION,
	rename_all = "kebab",
	styles = vigil_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Directory user the session is opened for.
	#[arg(long, value_name = "USER", default_value = "vigil-admin")]
	pub operator: String,
	/// Zero-based page of the result to print.
	#[arg(long, value_name = "N", default_value_t = 0, global = true)]
	pub page: usize,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// List authentication (bind) events.
	Binds(CriteriaArgs),
	/// List directory modification events.
	Mods(CriteriaArgs),
	/// Browse permissions and optionally pick one.
	Perms {
		/// Object-name fragment to search for.
		#[arg(long, value_name = "TEXT")]
		search: Option<String>,
		#[arg(long)]
		admin: bool,
		/// Row of the printed page to select.
		#[arg(long, value_name = "ROW")]
		select: Option<usize>,
	},
}

#[derive(Debug, Clone, Default, clap::Args)]
pub struct CriteriaArgs {
	#[arg(long, value_name = "USER")]
	pub user_id: Option<String>,
	#[arg(long, value_name = "NAME")]
	pub object_name: Option<String>,
	#[arg(long, value_name = "NAME")]
	pub operation_name: Option<String>,
	#[arg(long, value_name = "RFC3339", value_parser = vigil_cli::parse_instant)]
	pub begin: Option<OffsetDateTime>,
	#[arg(long, value_name = "RFC3339", value_parser = vigil_cli::parse_instant)]
	pub end: Option<OffsetDateTime>,
	#[arg(long, value_name = "DN")]
	pub dn: Option<String>,
}
impl CriteriaArgs {
	pub fn to_criteria(&self) -> SearchCriteria {
		let mut criteria = SearchCriteria::new();

		criteria.user_id = self.user_id.clone();
		criteria.object_name = self.object_name.clone();
		criteria.operation_name = self.operation_name.clone();
		criteria.begin_date = self.begin;
		criteria.end_date = self.end;
		criteria.dn = self.dn.clone();

		criteria
	}
}

/// One page of a listing as printed to stdout.
#[derive(Debug, Serialize)]
pub struct PageView<T> {
	pub page: usize,
	pub page_count: usize,
	pub total: usize,
	pub items: Vec<T>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub error: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub selection: Option<Permission>,
}
impl<T> PageView<T>
where
	T: Clone,
{
	pub fn new(pager: &Pager, items: &[T], page: usize) -> Self {
		Self {
			page,
			page_count: pager.page_count(items.len()),
			total: items.len(),
			items: pager.page(items, page).to_vec(),
			error: None,
			selection: None,
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = vigil_config::load(&args.config)?;

	vigil_cli::init_tracing(&config.service.log_level);

	let pager = Pager::from_listing(&config.listing);
	let backends = Backends::gateway(config.gateway);
	let session = Arc::new(Session::new(args.operator.as_str(), true));

	tracing::info!(operator = %session.user_id, "Session opened.");

	let output = execute(&args.command, args.page, &backends, session, pager).await?;
	let json = serde_json::to_string_pretty(&output)?;

	println!("{json}");

	Ok(())
}

/// Runs one subcommand against `backends` and returns the JSON document to print.
pub async fn execute(
	command: &Command,
	page: usize,
	backends: &Backends,
	session: Arc<Session>,
	pager: Pager,
) -> color_eyre::Result<serde_json::Value> {
	let value = match command {
		Command::Binds(criteria) => {
			let mut model = BindListModel::with_criteria(criteria.to_criteria(), backends, session);
			let records: Vec<AuditRecord> =
				model.result().await.iter().cloned().map(AuditRecord::from).collect();
			let mut view = PageView::new(&pager, &records, page);

			view.error = model.last_error().map(ToString::to_string);

			serde_json::to_value(view)?
		},
		Command::Mods(criteria) => {
			let mut model = ModListModel::with_criteria(criteria.to_criteria(), backends, session);
			let records: Vec<AuditRecord> =
				model.result().await.iter().cloned().map(AuditRecord::from).collect();
			let mut view = PageView::new(&pager, &records, page);

			view.error = model.last_error().map(ToString::to_string);

			serde_json::to_value(view)?
		},
		Command::Perms { search, admin, select } => {
			let (mut picker, mut events) = PermissionPicker::new(backends, session, *admin, pager);

			if let Some(search) = search {
				picker.set_search_val(search.as_str());
			}

			picker.load().await;
			picker.set_page(page);

			let mut view = PageView::new(&pager, picker.items(), picker.current_page());

			view.error = picker.last_error().map(ToString::to_string);

			if let Some(row) = select {
				picker.select_visible(*row)?;

				match events.try_recv() {
					Ok(PickerEvent::Close { selection }) => view.selection = Some(selection),
					Err(err) => return Err(eyre::eyre!("No close event after selection: {err}.")),
				}
			}

			serde_json::to_value(view)?
		},
	};

	Ok(value)
}

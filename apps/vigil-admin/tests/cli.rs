use std::{num::NonZeroUsize, sync::Arc};

use clap::Parser;

use vigil_admin::{Args, Command, execute};
use vigil_domain::{BindOutcome, Pager};
use vigil_testkit::{Call, SpyBackend, bind_record, permission, session};

fn pager() -> Pager {
	Pager::new(NonZeroUsize::new(2).expect("Page size must be non-zero."))
}

#[test]
fn criteria_flags_parse_into_search_criteria() {
	let args = Args::try_parse_from([
		"vigil-admin",
		"--config",
		"vigil.toml",
		"mods",
		"--user-id",
		"jsmith",
		"--object-name",
		"AdminMgrImpl.addUser",
		"--begin",
		"2024-01-01T00:00:00Z",
		"--page",
		"3",
	])
	.expect("Failed to parse arguments.");
	let Command::Mods(criteria) = &args.command else {
		panic!("Expected the mods subcommand.");
	};
	let criteria = criteria.to_criteria();

	assert_eq!(args.page, 3);
	assert_eq!(criteria.user_id(), Some("jsmith"));
	assert_eq!(criteria.object_name.as_deref(), Some("AdminMgrImpl.addUser"));
	assert!(criteria.begin_date.is_some());
	assert_eq!(criteria.internal_user_id(), None);
}

#[test]
fn malformed_dates_are_rejected() {
	let parsed = Args::try_parse_from([
		"vigil-admin",
		"--config",
		"vigil.toml",
		"binds",
		"--end",
		"yesterday",
	]);

	assert!(parsed.is_err());
}

#[tokio::test]
async fn binds_print_the_requested_page() {
	let backend = Arc::new(SpyBackend::new().with_binds(vec![
		bind_record("jsmith", 0, BindOutcome::Success),
		bind_record("jsmith", 1, BindOutcome::Failure),
		bind_record("jsmith", 2, BindOutcome::Success),
	]));
	let args = Args::try_parse_from([
		"vigil-admin",
		"--config",
		"vigil.toml",
		"binds",
		"--user-id",
		"jsmith",
		"--page",
		"1",
	])
	.expect("Failed to parse arguments.");
	let output = execute(&args.command, args.page, &backend.backends(), session(), pager())
		.await
		.expect("Failed to execute command.");

	assert_eq!(output["total"], 3);
	assert_eq!(output["page_count"], 2);
	assert_eq!(output["items"].as_array().map(Vec::len), Some(1));
	assert_eq!(output["items"][0]["kind"], "bind");
	assert!(output.get("error").is_none());
	assert_eq!(backend.calls(Call::SearchBinds), 1);
}

#[tokio::test]
async fn failed_search_is_reported_alongside_empty_items() {
	let backend = Arc::new(SpyBackend::new());

	backend.fail_searches(true);

	let args = Args::try_parse_from([
		"vigil-admin",
		"--config",
		"vigil.toml",
		"binds",
		"--user-id",
		"jsmith",
	])
	.expect("Failed to parse arguments.");
	let output = execute(&args.command, args.page, &backend.backends(), session(), pager())
		.await
		.expect("Failed to execute command.");

	assert_eq!(output["total"], 0);
	assert!(output["error"].is_string());
}

#[tokio::test]
async fn perms_select_reports_the_closed_selection() {
	let backend = Arc::new(SpyBackend::new().with_permissions(vec![
		permission("AdminMgrImpl", "addUser", true),
		permission("AdminMgrImpl", "deleteUser", true),
		permission("AdminMgrImpl", "updateUser", true),
	]));
	let args = Args::try_parse_from([
		"vigil-admin",
		"--config",
		"vigil.toml",
		"perms",
		"--admin",
		"--search",
		"Admin",
		"--select",
		"0",
		"--page",
		"1",
	])
	.expect("Failed to parse arguments.");
	let output = execute(&args.command, args.page, &backend.backends(), session(), pager())
		.await
		.expect("Failed to execute command.");

	assert_eq!(output["page"], 1);
	assert_eq!(output["selection"]["operation_name"], "updateUser");
	assert_eq!(backend.calls(Call::FindPermissions), 1);
}

#[tokio::test]
async fn perms_select_outside_the_page_fails() {
	let backend = Arc::new(SpyBackend::new().with_permissions(vec![permission(
		"ReviewMgrImpl",
		"readUser",
		false,
	)]));
	let args = Args::try_parse_from([
		"vigil-admin",
		"--config",
		"vigil.toml",
		"perms",
		"--select",
		"4",
	])
	.expect("Failed to parse arguments.");
	let outcome = execute(&args.command, args.page, &backend.backends(), session(), pager()).await;

	assert!(outcome.is_err());
}

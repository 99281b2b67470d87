use std::cell::OnceCell;
use std::path::{Path, PathBuf};

use kvstats::kv::{AchievementReport, KvFile, KvNode, Result, SteamLocator, default_install_root, resolve_report};

use crate::cmd::util::{emit_json, parse_app_id};

#[derive(clap::Args)]
pub struct Args {
	pub app_id: String,
	/// Steam installation root; detected when omitted.
	#[arg(long, env = "STEAM_PATH")]
	pub steam_path: Option<PathBuf>,
	/// Numeric user id naming the `userdata` folder.
	#[arg(long, env = "STEAM_USER_ID")]
	pub user_id: Option<u64>,
	/// Read stats from this file instead of the Steam layout.
	#[arg(long)]
	pub stats: Option<PathBuf>,
	/// Schema file used with `--stats`.
	#[arg(long, requires = "stats")]
	pub schema: Option<PathBuf>,
	#[arg(long)]
	pub json: bool,
}

/// Resolve whether every achievement of an app is unlocked.
pub fn run(args: Args) -> Result<()> {
	let Args {
		app_id,
		steam_path,
		user_id,
		stats,
		schema,
		json,
	} = args;

	let app_id = parse_app_id(&app_id)?;
	let (report, source) = match stats {
		Some(stats_path) => (check_files(&stats_path, schema.as_deref(), app_id)?, stats_path.display().to_string()),
		None => {
			let locator = SteamLocator {
				install_root: steam_path.or_else(default_install_root),
				user_id,
			};
			let source = locator
				.install_root
				.as_ref()
				.map_or_else(|| "-".to_owned(), |root| root.display().to_string());
			(locator.check_report(app_id), source)
		}
	};

	if json {
		let payload = CheckJson {
			app_id,
			source,
			completion: report.completion.as_str(),
			total: report.tally.total,
			achieved: report.tally.achieved,
			strategy: report.strategy.map(|item| item.as_str()),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("app_id: {app_id}");
	println!("source: {source}");
	println!("completion: {}", report.completion.as_str());
	println!("achieved: {}/{}", report.tally.achieved, report.tally.total);
	println!("strategy: {}", report.strategy.map_or("-", |item| item.as_str()));

	Ok(())
}

fn check_files(stats_path: &Path, schema_path: Option<&Path>, app_id: u32) -> Result<AchievementReport> {
	let stats = KvFile::open(stats_path)?;
	let schema: OnceCell<Option<KvNode>> = OnceCell::new();

	let load_schema = || {
		let path = schema_path?;
		match KvFile::open(path) {
			Ok(file) => Some(file.root),
			Err(err) => {
				tracing::warn!(path = %path.display(), error = %err, "schema unreadable");
				None
			}
		}
	};

	Ok(resolve_report(&stats.root, || schema.get_or_init(load_schema).as_ref(), app_id))
}

#[derive(serde::Serialize)]
struct CheckJson {
	app_id: u32,
	source: String,
	completion: &'static str,
	total: usize,
	achieved: usize,
	strategy: Option<&'static str>,
}

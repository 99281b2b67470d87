use std::cell::OnceCell;
use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::kv::{AchievementReport, Completion, KvFile, KvNode, resolve_report};

/// Where to look for per-app stats and schema files.
///
/// Both fields are optional; a missing root yields no candidates and a missing
/// (or zero) user id skips the per-user remote copy.
#[derive(Debug, Clone, Default)]
pub struct SteamLocator {
	/// Steam installation root.
	pub install_root: Option<PathBuf>,
	/// Numeric id of the signed-in user, naming the `userdata` folder.
	pub user_id: Option<u64>,
}

impl SteamLocator {
	/// Locator for an explicit root and optional user.
	pub fn new(install_root: impl Into<PathBuf>, user_id: Option<u64>) -> Self {
		Self {
			install_root: Some(install_root.into()),
			user_id,
		}
	}

	/// Locator using [`default_install_root`] and no user.
	pub fn detect() -> Self {
		Self {
			install_root: default_install_root(),
			user_id: None,
		}
	}

	/// Stats file paths in lookup order: shared cache first, then per-user remote.
	pub fn stats_candidates(&self, app_id: u32) -> Vec<PathBuf> {
		let Some(root) = &self.install_root else {
			return Vec::new();
		};

		let file_name = format!("UserGameStats_{app_id}.bin");
		let mut out = vec![root.join("appcache").join("stats").join(&file_name)];
		if let Some(user_id) = self.user_id.filter(|id| *id != 0) {
			out.push(
				root.join("userdata")
					.join(user_id.to_string())
					.join(app_id.to_string())
					.join("remote")
					.join(&file_name),
			);
		}
		out
	}

	/// Schema file path, when a root is known.
	pub fn schema_path(&self, app_id: u32) -> Option<PathBuf> {
		let root = self.install_root.as_ref()?;
		Some(root.join("appcache").join("stats").join(format!("UserGameStatsSchema_{app_id}.bin")))
	}

	/// Resolve completion for `app_id` from the first candidate that yields an answer.
	pub fn check_completion(&self, app_id: u32) -> Completion {
		self.check_report(app_id).completion
	}

	/// Like [`SteamLocator::check_completion`], keeping the tally and strategy.
	///
	/// Unreadable or undecodable candidates are skipped, as are candidates whose
	/// resolution is `Unknown`. The schema is read at most once.
	pub fn check_report(&self, app_id: u32) -> AchievementReport {
		self.check_report_with(app_id, || self.load_schema(app_id))
	}

	fn check_report_with(&self, app_id: u32, mut load_schema: impl FnMut() -> Option<KvNode>) -> AchievementReport {
		let schema: OnceCell<Option<KvNode>> = OnceCell::new();
		let mut last = None;

		for path in self.stats_candidates(app_id) {
			let Some(stats) = load_tree(&path) else {
				continue;
			};

			let report = resolve_report(&stats, || schema.get_or_init(&mut load_schema).as_ref(), app_id);
			if report.completion.is_known() {
				debug!(app_id, path = %path.display(), completion = report.completion.as_str(), "resolved completion");
				return report;
			}
			debug!(app_id, path = %path.display(), "stats candidate had no achievement data");
			last = Some(report);
		}

		last.unwrap_or_else(AchievementReport::unknown)
	}

	fn load_schema(&self, app_id: u32) -> Option<KvNode> {
		load_tree(&self.schema_path(app_id)?)
	}
}

/// Best-guess Steam installation root: the first existing directory among
/// `$STEAM_PATH`, the Linux and macOS locations under `$HOME`, and
/// `%ProgramFiles(x86)%\Steam` on Windows.
pub fn default_install_root() -> Option<PathBuf> {
	install_root_candidates(|key| env::var_os(key)).into_iter().find(|path| path.is_dir())
}

fn install_root_candidates(var: impl Fn(&str) -> Option<OsString>) -> Vec<PathBuf> {
	let mut out = Vec::new();
	if let Some(path) = var("STEAM_PATH") {
		out.push(PathBuf::from(path));
	}
	if let Some(home) = var("HOME").map(PathBuf::from) {
		out.push(home.join(".steam").join("steam"));
		out.push(home.join(".local").join("share").join("Steam"));
		out.push(home.join("Library").join("Application Support").join("Steam"));
	}
	let program_files = var("ProgramFiles(x86)").map_or_else(|| PathBuf::from(r"C:\Program Files (x86)"), PathBuf::from);
	out.push(program_files.join("Steam"));
	out
}

fn load_tree(path: &Path) -> Option<KvNode> {
	if !path.is_file() {
		debug!(path = %path.display(), "skipping absent file");
		return None;
	}

	match KvFile::open(path) {
		Ok(file) => Some(file.root),
		Err(err) => {
			warn!(path = %path.display(), error = %err, "skipping unreadable file");
			None
		}
	}
}

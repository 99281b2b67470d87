//! Shared test helpers for workspace crates.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Wire kind bytes used by [`KvBytes`].
pub mod kind {
	/// Container opener.
	pub const CONTAINER: u8 = 0;
	/// Narrow string.
	pub const STRING: u8 = 1;
	/// Little-endian `i32`.
	pub const INT32: u8 = 2;
	/// Little-endian `f32`.
	pub const FLOAT32: u8 = 3;
	/// Little-endian `i32` pointer.
	pub const POINTER: u8 = 4;
	/// Wide string.
	pub const WIDE_STRING: u8 = 5;
	/// Little-endian `u32` color.
	pub const COLOR: u8 = 6;
	/// Little-endian `u64`.
	pub const UINT64: u8 = 7;
	/// Child list terminator.
	pub const END: u8 = 8;
}

/// Append-only builder for hand-made keyed value byte streams.
#[derive(Debug, Default, Clone)]
pub struct KvBytes {
	buf: Vec<u8>,
}

impl KvBytes {
	/// Start an empty stream.
	pub fn new() -> Self {
		Self::default()
	}

	/// Open a container; close it with [`KvBytes::end`].
	pub fn begin(self, name: &str) -> Self {
		self.head(kind::CONTAINER, name)
	}

	/// Write an `End` byte.
	pub fn end(mut self) -> Self {
		self.buf.push(kind::END);
		self
	}

	/// Write a narrow string leaf.
	pub fn string(self, name: &str, value: &str) -> Self {
		let mut out = self.head(kind::STRING, name);
		out.buf.extend_from_slice(value.as_bytes());
		out.buf.push(0);
		out
	}

	/// Write a wide string leaf.
	pub fn wide(self, name: &str, value: &str) -> Self {
		let mut out = self.head(kind::WIDE_STRING, name);
		for unit in value.encode_utf16() {
			out.buf.extend_from_slice(&unit.to_le_bytes());
		}
		out.buf.extend_from_slice(&[0, 0]);
		out
	}

	/// Write an `i32` leaf.
	pub fn int32(self, name: &str, value: i32) -> Self {
		self.head(kind::INT32, name).raw(&value.to_le_bytes())
	}

	/// Write an `f32` leaf.
	pub fn float32(self, name: &str, value: f32) -> Self {
		self.head(kind::FLOAT32, name).raw(&value.to_le_bytes())
	}

	/// Write a pointer leaf.
	pub fn pointer(self, name: &str, value: i32) -> Self {
		self.head(kind::POINTER, name).raw(&value.to_le_bytes())
	}

	/// Write a color leaf.
	pub fn color(self, name: &str, value: u32) -> Self {
		self.head(kind::COLOR, name).raw(&value.to_le_bytes())
	}

	/// Write a `u64` leaf.
	pub fn uint64(self, name: &str, value: u64) -> Self {
		self.head(kind::UINT64, name).raw(&value.to_le_bytes())
	}

	/// Append raw bytes verbatim.
	pub fn raw(mut self, bytes: &[u8]) -> Self {
		self.buf.extend_from_slice(bytes);
		self
	}

	/// Finish and return the stream bytes.
	pub fn build(self) -> Vec<u8> {
		self.buf
	}

	fn head(mut self, kind: u8, name: &str) -> Self {
		self.buf.push(kind);
		self.buf.extend_from_slice(name.as_bytes());
		self.buf.push(0);
		self
	}
}

/// Stats file with one achievements stat per group, laid out as
/// `<app_id>/stats/<n>/bits/<m>/achieved`, closed with a trailing top-level `End`.
pub fn achievement_stats(app_id: u32, groups: &[&[bool]]) -> Vec<u8> {
	let mut out = KvBytes::new().begin(&app_id.to_string()).begin("stats");
	for (group_idx, bits) in groups.iter().enumerate() {
		out = out.begin(&(group_idx + 1).to_string()).int32("type_int", 4).begin("bits");
		for (bit_idx, achieved) in bits.iter().enumerate() {
			out = out
				.begin(&bit_idx.to_string())
				.int32("achieved", i32::from(*achieved))
				.int32("unlock_time", if *achieved { 1_600_000_000 } else { 0 })
				.end();
		}
		out = out.end().end();
	}
	out.end().end().end().build()
}

/// Schema file listing `names` as bits of a single achievements stat.
pub fn achievement_schema(app_id: u32, names: &[&str]) -> Vec<u8> {
	let mut out = KvBytes::new()
		.begin(&app_id.to_string())
		.begin("stats")
		.begin("1")
		.int32("type_int", 4)
		.begin("bits");
	for (idx, name) in names.iter().enumerate() {
		out = out.begin(&idx.to_string()).string("name", name).int32("bit", idx as i32).end();
	}
	out.end().end().end().end().end().build()
}

/// Scratch Steam installation tree on disk, removed on drop.
pub struct SteamLayout {
	dir: TempDir,
}

impl SteamLayout {
	/// Create an empty installation root.
	pub fn new() -> Self {
		Self {
			dir: tempfile::tempdir().expect("temp steam root"),
		}
	}

	/// Installation root path.
	pub fn root(&self) -> &Path {
		self.dir.path()
	}

	/// Write `appcache/stats/UserGameStats_<app_id>.bin`.
	pub fn write_cache_stats(&self, app_id: u32, bytes: &[u8]) -> PathBuf {
		let path = self.root().join("appcache").join("stats").join(format!("UserGameStats_{app_id}.bin"));
		write_file(&path, bytes)
	}

	/// Write `userdata/<user_id>/<app_id>/remote/UserGameStats_<app_id>.bin`.
	pub fn write_remote_stats(&self, user_id: u64, app_id: u32, bytes: &[u8]) -> PathBuf {
		let path = self
			.root()
			.join("userdata")
			.join(user_id.to_string())
			.join(app_id.to_string())
			.join("remote")
			.join(format!("UserGameStats_{app_id}.bin"));
		write_file(&path, bytes)
	}

	/// Write `appcache/stats/UserGameStatsSchema_<app_id>.bin`.
	pub fn write_schema(&self, app_id: u32, bytes: &[u8]) -> PathBuf {
		let path = self.root().join("appcache").join("stats").join(format!("UserGameStatsSchema_{app_id}.bin"));
		write_file(&path, bytes)
	}
}

impl Default for SteamLayout {
	fn default() -> Self {
		Self::new()
	}
}

fn write_file(path: &Path, bytes: &[u8]) -> PathBuf {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent).expect("create fixture dirs");
	}
	fs::write(path, bytes).expect("write fixture file");
	path.to_path_buf()
}

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::kv::bytes::Cursor;
use crate::kv::{KvError, KvNode, KvValue, NodeKind, Result};

/// Runtime limits for keyed value decoding.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
	/// Maximum container nesting depth.
	pub max_depth: u32,
}

impl Default for DecodeOptions {
	fn default() -> Self {
		Self { max_depth: 256 }
	}
}

/// Decode a byte stream into a forest wrapped in a `<root>` container.
pub fn decode(bytes: &[u8]) -> Result<KvNode> {
	decode_with(bytes, &DecodeOptions::default())
}

/// Decode a byte stream with explicit limits.
///
/// The forest ends at EOF or at a top-level `End` byte; anything after that
/// byte is ignored. Errors are all-or-nothing: no partial tree is returned.
pub fn decode_with(bytes: &[u8], opt: &DecodeOptions) -> Result<KvNode> {
	let mut cursor = Cursor::new(bytes);
	let mut forest = Vec::new();

	while !cursor.is_empty() {
		match read_node(&mut cursor, opt, 0)? {
			Some(node) => forest.push(node),
			None => {
				if !cursor.is_empty() {
					debug!(at = cursor.pos(), trailing = cursor.remaining(), "ignoring bytes after top-level end");
				}
				break;
			}
		}
	}

	Ok(KvNode::root(forest))
}

/// Keyed value tree decoded from a file on disk.
#[derive(Debug, Clone)]
pub struct KvFile {
	/// Source path.
	pub path: PathBuf,
	/// Size of the source file in bytes.
	pub byte_len: usize,
	/// Decoded `<root>` container.
	pub root: KvNode,
}

impl KvFile {
	/// Read and decode a file with default limits.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		Self::open_with(path, &DecodeOptions::default())
	}

	/// Read and decode a file with explicit limits.
	pub fn open_with(path: impl AsRef<Path>, opt: &DecodeOptions) -> Result<Self> {
		let path = path.as_ref();
		let raw = fs::read(path)?;
		let root = decode_with(&raw, opt)?;
		debug!(path = %path.display(), bytes = raw.len(), nodes = root.node_count(), "decoded keyed value file");

		Ok(Self {
			path: path.to_path_buf(),
			byte_len: raw.len(),
			root,
		})
	}
}

/// Read one node, or `None` when the kind byte is `End`.
fn read_node(cursor: &mut Cursor<'_>, opt: &DecodeOptions, depth: u32) -> Result<Option<KvNode>> {
	let at = cursor.pos();
	let byte = cursor.read_u8()?;
	let kind = NodeKind::from_byte(byte).ok_or(KvError::UnknownKind { kind: byte, at })?;
	if kind == NodeKind::End {
		return Ok(None);
	}

	let name = cursor.read_cstring()?;
	let value = match kind {
		NodeKind::Container => {
			if depth >= opt.max_depth {
				return Err(KvError::DecodeDepthExceeded { max_depth: opt.max_depth });
			}
			KvValue::Container(read_children(cursor, opt, depth + 1)?)
		}
		NodeKind::String => KvValue::String(cursor.read_cstring()?),
		NodeKind::Int32 => KvValue::Int32(cursor.read_i32_le()?),
		NodeKind::Float32 => KvValue::Float32(cursor.read_f32_le()?),
		NodeKind::Pointer => KvValue::Pointer(cursor.read_i32_le()?),
		NodeKind::WideString => KvValue::WideString(cursor.read_wide_cstring()?),
		NodeKind::Color => KvValue::Color(cursor.read_u32_le()?),
		NodeKind::UInt64 => KvValue::UInt64(cursor.read_u64_le()?),
		NodeKind::End => return Ok(None),
	};

	Ok(Some(KvNode::new(name, value)))
}

fn read_children(cursor: &mut Cursor<'_>, opt: &DecodeOptions, depth: u32) -> Result<Vec<KvNode>> {
	let mut children = Vec::new();
	while let Some(child) = read_node(cursor, opt, depth)? {
		children.push(child);
	}
	Ok(children)
}

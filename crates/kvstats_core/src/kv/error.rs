use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, KvError>;

/// Errors produced while reading and decoding keyed value trees.
#[derive(Debug, Error)]
pub enum KvError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Kind byte outside the known table.
	#[error("unknown node kind {kind} at offset {at}")]
	UnknownKind {
		/// Offending kind byte.
		kind: u8,
		/// Byte offset of the kind byte.
		at: usize,
	},
	/// Container nesting exceeded configured limit.
	#[error("decode depth exceeded (max={max_depth})")]
	DecodeDepthExceeded {
		/// Configured depth ceiling.
		max_depth: u32,
	},
	/// App id argument was not a decimal `u32`.
	#[error("invalid app id: {value}")]
	InvalidAppId {
		/// User-provided value.
		value: String,
	},
	/// Node path expression was empty or had empty segments.
	#[error("invalid node path: {path}")]
	InvalidNodePath {
		/// Original user-provided path string.
		path: String,
	},
}

impl KvError {
	/// Whether this error means the stream ended inside a node.
	pub fn is_truncated(&self) -> bool {
		matches!(self, Self::UnexpectedEof { .. })
	}

	/// Whether this error means the stream is not a well-formed tree.
	pub fn is_malformed(&self) -> bool {
		matches!(self, Self::UnknownKind { .. } | Self::DecodeDepthExceeded { .. })
	}
}

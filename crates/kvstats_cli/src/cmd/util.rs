use kvstats::kv::{KvError, KvNode, Result};
use serde::Serialize;

/// Parse a decimal Steam app id.
pub(crate) fn parse_app_id(value: &str) -> Result<u32> {
	value.trim().parse::<u32>().map_err(|_| KvError::InvalidAppId { value: value.to_owned() })
}

/// Split a `/`-separated node path into lookup keys.
pub(crate) fn parse_node_path(path: &str) -> Result<Vec<String>> {
	let keys: Vec<String> = path.trim_matches('/').split('/').map(str::to_owned).collect();
	if keys.iter().any(String::is_empty) {
		return Err(KvError::InvalidNodePath { path: path.to_owned() });
	}
	Ok(keys)
}

/// Kind label for a node, `missing` for the sentinel.
pub(crate) fn kind_label(node: &KvNode) -> &'static str {
	node.kind().map_or("missing", |kind| kind.as_str())
}

/// Print a value as pretty JSON on stdout.
pub(crate) fn emit_json<T: Serialize>(value: &T) {
	match serde_json::to_string_pretty(value) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: json encode failed: {err}"),
	}
}

use std::path::PathBuf;

use kvstats::kv::{KvFile, Result};

use crate::cmd::util::{emit_json, kind_label, parse_node_path};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// `/`-separated keys, matched case-insensitively.
	pub node_path: String,
	#[arg(long)]
	pub json: bool,
}

/// Look up a node by path and print its coercions.
pub fn run(args: Args) -> Result<()> {
	let Args { path, node_path, json } = args;

	let keys = parse_node_path(&node_path)?;
	let file = KvFile::open(&path)?;
	let node = file.root.get_path(&keys);

	if json {
		let payload = GetJson {
			path: path.display().to_string(),
			node_path,
			found: node.is_valid(),
			kind: kind_label(node),
			children: node.children().len(),
			as_string: node.is_valid().then(|| node.as_string("")),
			as_int: node.is_valid().then(|| node.as_i32(0)),
			as_float: node.is_valid().then(|| node.as_f32(0.0)),
			as_bool: node.is_valid().then(|| node.as_bool(false)),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("node: {node_path}");
	println!("found: {}", node.is_valid());
	if node.is_missing() {
		return Ok(());
	}
	println!("kind: {}", kind_label(node));
	println!("children: {}", node.children().len());
	println!("as_string: {:?}", node.as_string(""));
	println!("as_int: {}", node.as_i32(0));
	println!("as_float: {}", node.as_f32(0.0));
	println!("as_bool: {}", node.as_bool(false));

	Ok(())
}

#[derive(serde::Serialize)]
struct GetJson {
	path: String,
	node_path: String,
	found: bool,
	kind: &'static str,
	children: usize,
	as_string: Option<String>,
	as_int: Option<i32>,
	as_float: Option<f32>,
	as_bool: Option<bool>,
}

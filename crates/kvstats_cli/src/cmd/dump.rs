use std::path::PathBuf;

use kvstats::kv::{DecodeOptions, KvFile, KvNode, KvValue, Result};

use crate::cmd::util::{emit_json, kind_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Stop printing below this many container levels.
	#[arg(long)]
	pub depth: Option<u32>,
	/// Reject files nested deeper than this.
	#[arg(long = "max-depth")]
	pub max_depth: Option<u32>,
	#[arg(long)]
	pub json: bool,
}

/// Decode a file and print its tree.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		depth,
		max_depth,
		json,
	} = args;

	let mut decode = DecodeOptions::default();
	if let Some(max_depth) = max_depth {
		decode.max_depth = max_depth;
	}
	let file = KvFile::open_with(&path, &decode)?;
	let depth = depth.unwrap_or(u32::MAX);
	let nodes: usize = file.root.children().iter().map(KvNode::node_count).sum();

	if json {
		let payload = DumpJson {
			path: path.display().to_string(),
			bytes: file.byte_len,
			nodes,
			roots: file.root.children().iter().map(|node| node_json(node, depth)).collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("bytes: {}", file.byte_len);
	println!("nodes: {nodes}");
	for node in file.root.children() {
		print_node(node, 0, depth);
	}

	Ok(())
}

fn print_node(node: &KvNode, indent: usize, depth_left: u32) {
	let pad = " ".repeat(indent);
	match node.value() {
		Some(KvValue::Container(children)) => {
			if depth_left == 0 {
				println!("{pad}{} {{ ... {} children }}", node.name(), children.len());
				return;
			}
			println!("{pad}{} {{", node.name());
			for child in children {
				print_node(child, indent + 2, depth_left - 1);
			}
			println!("{pad}}}");
		}
		Some(KvValue::String(text) | KvValue::WideString(text)) => {
			println!("{pad}{} [{}] = {:?}", node.name(), kind_label(node), text);
		}
		_ => println!("{pad}{} [{}] = {}", node.name(), kind_label(node), node.as_string("")),
	}
}

fn node_json(node: &KvNode, depth_left: u32) -> NodeJson {
	let (value, children) = match node.value() {
		Some(KvValue::Container(children)) if depth_left == 0 => (Some(serde_json::Value::from(children.len())), None),
		Some(KvValue::Container(children)) => (None, Some(children.iter().map(|child| node_json(child, depth_left - 1)).collect())),
		Some(KvValue::String(text) | KvValue::WideString(text)) => (Some(serde_json::Value::from(text.as_str())), None),
		Some(KvValue::Int32(value) | KvValue::Pointer(value)) => (Some(serde_json::Value::from(*value)), None),
		Some(KvValue::Float32(value)) => (Some(serde_json::Value::from(f64::from(*value))), None),
		Some(KvValue::Color(value)) => (Some(serde_json::Value::from(*value)), None),
		Some(KvValue::UInt64(value)) => (Some(serde_json::Value::from(*value)), None),
		None => (None, None),
	};

	NodeJson {
		name: node.name().to_owned(),
		kind: kind_label(node),
		value,
		children,
	}
}

#[derive(serde::Serialize)]
struct NodeJson {
	name: String,
	kind: &'static str,
	#[serde(skip_serializing_if = "Option::is_none")]
	value: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	children: Option<Vec<NodeJson>>,
}

#[derive(serde::Serialize)]
struct DumpJson {
	path: String,
	bytes: usize,
	nodes: usize,
	roots: Vec<NodeJson>,
}

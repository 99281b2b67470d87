use std::ops::Index;

use crate::kv::{KvNode, KvValue};

impl KvNode {
	/// Look up the single immediate child whose name matches `key` ignoring ASCII case.
	///
	/// Zero or several matches both yield [`KvNode::missing`].
	pub fn get(&self, key: &str) -> &KvNode {
		let mut matches = self.children_named(key);
		match (matches.next(), matches.next()) {
			(Some(child), None) => child,
			_ => KvNode::missing(),
		}
	}

	/// Every immediate child whose name matches `key` ignoring ASCII case, in file order.
	pub fn children_named<'a>(&'a self, key: &str) -> impl Iterator<Item = &'a KvNode> {
		self.children().iter().filter(move |child| child.name().eq_ignore_ascii_case(key))
	}

	/// Chain [`KvNode::get`] across `keys`.
	pub fn get_path<S: AsRef<str>>(&self, keys: &[S]) -> &KvNode {
		keys.iter().fold(self, |node, key| node.get(key.as_ref()))
	}

	/// First node in depth-first pre-order (starting with `self`) matching `predicate`.
	pub fn find_first(&self, mut predicate: impl FnMut(&KvNode) -> bool) -> &KvNode {
		let mut stack = vec![self];
		while let Some(node) = stack.pop() {
			if node.is_valid() && predicate(node) {
				return node;
			}
			stack.extend(node.children().iter().rev());
		}
		KvNode::missing()
	}

	/// Textual rendering of the payload, or `default` for containers and the sentinel.
	pub fn as_string(&self, default: &str) -> String {
		match self.value() {
			None | Some(KvValue::Container(_)) => default.to_owned(),
			Some(KvValue::String(text) | KvValue::WideString(text)) => text.clone(),
			Some(KvValue::Int32(value) | KvValue::Pointer(value)) => value.to_string(),
			Some(KvValue::Float32(value)) => value.to_string(),
			Some(KvValue::Color(value)) => value.to_string(),
			Some(KvValue::UInt64(value)) => value.to_string(),
		}
	}

	/// Integer view of the payload.
	///
	/// Text is parsed, floats truncate toward zero and `u64` keeps only its low
	/// 32 bits reinterpreted as signed. Everything else yields `default`.
	pub fn as_i32(&self, default: i32) -> i32 {
		match self.value() {
			Some(KvValue::String(text) | KvValue::WideString(text)) => parse_i32(text).unwrap_or(default),
			Some(KvValue::Int32(value)) => *value,
			Some(KvValue::Float32(value)) => *value as i32,
			Some(KvValue::UInt64(value)) => (*value & 0xffff_ffff) as u32 as i32,
			_ => default,
		}
	}

	/// Float view of the payload.
	///
	/// `u64` widens its low 32 bits as unsigned, unlike [`KvNode::as_i32`].
	pub fn as_f32(&self, default: f32) -> f32 {
		match self.value() {
			Some(KvValue::String(text) | KvValue::WideString(text)) => text.trim().parse::<f32>().unwrap_or(default),
			Some(KvValue::Int32(value)) => *value as f32,
			Some(KvValue::Float32(value)) => *value,
			Some(KvValue::UInt64(value)) => (*value & 0xffff_ffff) as u32 as f32,
			_ => default,
		}
	}

	/// Boolean view of the payload: nonzero is true.
	///
	/// `u64` is tested across all 64 bits, so `0x1_0000_0000` is true here while
	/// [`KvNode::as_i32`] maps it to `0`.
	pub fn as_bool(&self, default: bool) -> bool {
		match self.value() {
			Some(KvValue::String(text) | KvValue::WideString(text)) => parse_i32(text).map_or(default, |value| value != 0),
			Some(KvValue::Int32(value)) => *value != 0,
			Some(KvValue::Float32(value)) => (*value as i32) != 0,
			Some(KvValue::UInt64(value)) => *value != 0,
			_ => default,
		}
	}
}

impl Index<&str> for KvNode {
	type Output = KvNode;

	fn index(&self, key: &str) -> &KvNode {
		self.get(key)
	}
}

fn parse_i32(text: &str) -> Option<i32> {
	text.trim().parse::<i32>().ok()
}

#[cfg(test)]
mod tests;

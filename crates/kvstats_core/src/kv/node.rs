use crate::kv::NodeKind;

/// Name given to the synthetic container that holds a decoded forest.
pub const ROOT_NAME: &str = "<root>";

static MISSING: KvNode = KvNode {
	name: String::new(),
	value: None,
};

/// Typed payload of one node. Containers own their children instead of a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum KvValue {
	/// Ordered child nodes, in file order.
	Container(Vec<KvNode>),
	/// Narrow text.
	String(String),
	/// Signed 32-bit integer.
	Int32(i32),
	/// 32-bit float.
	Float32(f32),
	/// Signed 32-bit integer tagged as a pointer.
	Pointer(i32),
	/// Text decoded from 2-byte code units.
	WideString(String),
	/// Unsigned 32-bit color.
	Color(u32),
	/// Unsigned 64-bit integer.
	UInt64(u64),
}

impl KvValue {
	/// Kind tag matching this payload.
	pub fn kind(&self) -> NodeKind {
		match self {
			Self::Container(_) => NodeKind::Container,
			Self::String(_) => NodeKind::String,
			Self::Int32(_) => NodeKind::Int32,
			Self::Float32(_) => NodeKind::Float32,
			Self::Pointer(_) => NodeKind::Pointer,
			Self::WideString(_) => NodeKind::WideString,
			Self::Color(_) => NodeKind::Color,
			Self::UInt64(_) => NodeKind::UInt64,
		}
	}
}

/// One named entry of a keyed value tree.
///
/// Every node built by decoding or by the constructors is valid. The only
/// invalid node is the shared [`KvNode::missing`] sentinel, which failed
/// lookups return so that lookups can be chained without checks.
#[derive(Debug, Clone, PartialEq)]
pub struct KvNode {
	name: String,
	value: Option<KvValue>,
}

impl KvNode {
	/// Build a valid node from a name and payload.
	pub fn new(name: impl Into<String>, value: KvValue) -> Self {
		Self {
			name: name.into(),
			value: Some(value),
		}
	}

	/// Build a valid container node.
	pub fn container(name: impl Into<String>, children: Vec<KvNode>) -> Self {
		Self::new(name, KvValue::Container(children))
	}

	/// Build the synthetic root container around a decoded forest.
	pub fn root(children: Vec<KvNode>) -> Self {
		Self::container(ROOT_NAME, children)
	}

	/// Shared invalid sentinel returned by failed lookups.
	///
	/// Cloning it yields another invalid node that is not this instance; test
	/// for absence with [`KvNode::is_missing`] rather than pointer identity.
	pub fn missing() -> &'static KvNode {
		&MISSING
	}

	/// Node name as stored (case preserved).
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Payload, absent only on the missing sentinel.
	pub fn value(&self) -> Option<&KvValue> {
		self.value.as_ref()
	}

	/// Kind tag, absent only on the missing sentinel.
	pub fn kind(&self) -> Option<NodeKind> {
		self.value.as_ref().map(KvValue::kind)
	}

	/// Whether this node came from decoding or construction.
	pub fn is_valid(&self) -> bool {
		self.value.is_some()
	}

	/// Whether this node is the missing sentinel.
	pub fn is_missing(&self) -> bool {
		!self.is_valid()
	}

	/// Immediate children; empty for leaves and the sentinel.
	pub fn children(&self) -> &[KvNode] {
		match &self.value {
			Some(KvValue::Container(children)) => children,
			_ => &[],
		}
	}

	/// Count valid nodes in this subtree, including `self`.
	pub fn node_count(&self) -> usize {
		if self.is_missing() {
			return 0;
		}
		1 + self.children().iter().map(KvNode::node_count).sum::<usize>()
	}
}

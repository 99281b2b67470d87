/// Kind tag stored in the first byte of every encoded node.
///
/// Codes follow the binary KeyValues table: `None` marks a container, `End`
/// closes the current container and never becomes a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NodeKind {
	/// Named container of child nodes.
	Container = 0,
	/// Zero-terminated narrow text.
	String = 1,
	/// Little-endian `i32`.
	Int32 = 2,
	/// Little-endian `f32`.
	Float32 = 3,
	/// Little-endian `i32` tagged as a pointer.
	Pointer = 4,
	/// Zero-terminated 2-byte code units.
	WideString = 5,
	/// Little-endian `u32` color.
	Color = 6,
	/// Little-endian `u64`.
	UInt64 = 7,
	/// Stream sentinel ending a child list.
	End = 8,
}

impl NodeKind {
	/// Map a wire byte to its kind.
	pub fn from_byte(byte: u8) -> Option<Self> {
		Some(match byte {
			0 => Self::Container,
			1 => Self::String,
			2 => Self::Int32,
			3 => Self::Float32,
			4 => Self::Pointer,
			5 => Self::WideString,
			6 => Self::Color,
			7 => Self::UInt64,
			8 => Self::End,
			_ => return None,
		})
	}

	/// Wire byte for this kind.
	pub fn as_byte(self) -> u8 {
		self as u8
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Container => "container",
			Self::String => "string",
			Self::Int32 => "int32",
			Self::Float32 => "float32",
			Self::Pointer => "pointer",
			Self::WideString => "wstring",
			Self::Color => "color",
			Self::UInt64 => "uint64",
			Self::End => "end",
		}
	}
}

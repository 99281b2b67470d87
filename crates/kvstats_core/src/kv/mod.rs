mod access;
mod achievements;
mod bytes;
mod error;
mod kind;
mod node;
mod reader;
mod steam;

/// Achievement completion resolution types and entry points.
pub use achievements::{
	AchievementReport, AchievementTally, Completion, StatType, Strategy, resolve_completion, resolve_report, schema_achievement_names, tally_bit_records,
	tally_schema_records,
};
/// Error and result aliases.
pub use error::{KvError, Result};
/// Wire kind table.
pub use kind::NodeKind;
/// In-memory tree node and payload types.
pub use node::{KvNode, KvValue, ROOT_NAME};
/// Byte stream decoding entry points and options.
pub use reader::{DecodeOptions, KvFile, decode, decode_with};
/// Steam installation layout and per-app completion checks.
pub use steam::{SteamLocator, default_install_root};

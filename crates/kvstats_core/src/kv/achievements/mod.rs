use std::collections::HashSet;

use tracing::debug;

use crate::kv::KvNode;

/// Tri-state completion outcome. `Unknown` never means "not complete".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
	/// No achievement records were found.
	Unknown,
	/// Records were found; `true` when every one is achieved.
	Completed(bool),
}

impl Completion {
	/// Whether a definite answer was reached.
	pub fn is_known(self) -> bool {
		matches!(self, Self::Completed(_))
	}

	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Unknown => "unknown",
			Self::Completed(true) => "complete",
			Self::Completed(false) => "incomplete",
		}
	}
}

/// Which layout produced an [`AchievementTally`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
	/// Counted from `bits` children of achievement stats.
	BitArray,
	/// Names enumerated from the schema and searched for in the stats tree.
	Schema,
}

impl Strategy {
	/// Stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::BitArray => "bit_array",
			Self::Schema => "schema",
		}
	}
}

/// Declared type of one stat entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatType {
	/// Unset or unrecognized.
	Invalid = 0,
	/// Integer counter.
	Integer = 1,
	/// Float counter.
	Float = 2,
	/// Average rate.
	AverageRate = 3,
	/// Achievement bit block.
	Achievements = 4,
	/// Grouped achievement bit block.
	GroupAchievements = 5,
}

impl StatType {
	/// Map a raw type code.
	pub fn from_code(code: i32) -> Option<Self> {
		Some(match code {
			0 => Self::Invalid,
			1 => Self::Integer,
			2 => Self::Float,
			3 => Self::AverageRate,
			4 => Self::Achievements,
			5 => Self::GroupAchievements,
			_ => return None,
		})
	}

	/// Read a stat's type from `type_int`, falling back to `type`.
	pub fn of(stat: &KvNode) -> Option<Self> {
		let type_int = stat.get("type_int");
		let raw = if type_int.is_valid() { type_int } else { stat.get("type") };
		Self::from_code(raw.as_i32(0))
	}

	/// Whether entries of this type carry achievement bits.
	pub fn has_achievements(self) -> bool {
		matches!(self, Self::Achievements | Self::GroupAchievements)
	}
}

/// Counts of achievement records seen and achieved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AchievementTally {
	/// Records found.
	pub total: usize,
	/// Records counted as achieved.
	pub achieved: usize,
}

impl AchievementTally {
	/// Whether no records were found.
	pub fn is_empty(self) -> bool {
		self.total == 0
	}

	/// Completion implied by these counts.
	pub fn completion(self) -> Completion {
		if self.is_empty() {
			Completion::Unknown
		} else {
			Completion::Completed(self.achieved == self.total)
		}
	}

	fn record(&mut self, achieved: bool) {
		self.total += 1;
		if achieved {
			self.achieved += 1;
		}
	}
}

/// Resolution outcome together with the counts behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AchievementReport {
	/// Final completion state.
	pub completion: Completion,
	/// Counts from the strategy that ran last.
	pub tally: AchievementTally,
	/// Strategy that produced `tally`, if any ran.
	pub strategy: Option<Strategy>,
}

impl AchievementReport {
	/// Report for a query that found no records.
	pub fn unknown() -> Self {
		Self {
			completion: Completion::Unknown,
			tally: AchievementTally::default(),
			strategy: None,
		}
	}

	fn from_tally(tally: AchievementTally, strategy: Strategy) -> Self {
		Self {
			completion: tally.completion(),
			tally,
			strategy: Some(strategy),
		}
	}
}

/// Decide whether every tracked achievement of `app_id` is unlocked.
///
/// `schema` is only invoked when the stats tree has no countable bit records.
pub fn resolve_completion<'s>(stats_root: &KvNode, schema: impl FnOnce() -> Option<&'s KvNode>, app_id: u32) -> Completion {
	resolve_report(stats_root, schema, app_id).completion
}

/// Like [`resolve_completion`], keeping the tally and strategy.
pub fn resolve_report<'s>(stats_root: &KvNode, schema: impl FnOnce() -> Option<&'s KvNode>, app_id: u32) -> AchievementReport {
	let stats = stats_container(stats_root, app_id);
	if stats.children().is_empty() {
		debug!(app_id, "no stats entries");
		return AchievementReport::unknown();
	}

	let tally = tally_bit_records(stats_root, app_id);
	if !tally.is_empty() {
		return AchievementReport::from_tally(tally, Strategy::BitArray);
	}

	debug!(app_id, "no achievement bits in stats; using schema");
	let Some(schema_root) = schema() else {
		debug!(app_id, "schema unavailable");
		return AchievementReport::unknown();
	};

	AchievementReport::from_tally(tally_schema_records(stats_root, schema_root, app_id), Strategy::Schema)
}

/// Count achievement bit records stored directly under achievement stats.
pub fn tally_bit_records(stats_root: &KvNode, app_id: u32) -> AchievementTally {
	let mut tally = AchievementTally::default();
	for record in achievement_bits(stats_container(stats_root, app_id)) {
		tally.record(is_achieved(record));
	}
	tally
}

/// Count schema-listed achievements, looking up each one's state anywhere in the stats tree.
///
/// A name with no matching state node still counts toward the total.
pub fn tally_schema_records(stats_root: &KvNode, schema_root: &KvNode, app_id: u32) -> AchievementTally {
	let mut tally = AchievementTally::default();
	for name in schema_achievement_names(schema_root, app_id) {
		let state = find_state_node(stats_root, &name);
		if state.is_missing() {
			debug!(app_id, achievement = %name, "no state node for schema achievement");
		}
		tally.record(state.is_valid() && is_achieved(state));
	}
	tally
}

/// Distinct non-empty achievement names listed in a schema tree, in file order.
///
/// Names differing only in ASCII case count once; the first spelling is kept.
pub fn schema_achievement_names(schema_root: &KvNode, app_id: u32) -> Vec<String> {
	let mut seen = HashSet::new();
	achievement_bits(stats_container(schema_root, app_id))
		.map(|bit| bit.get("name").as_string(""))
		.filter(|name| !name.is_empty() && seen.insert(name.to_ascii_lowercase()))
		.collect()
}

fn stats_container(root: &KvNode, app_id: u32) -> &KvNode {
	let keyed = root.get(&app_id.to_string()).get("stats");
	if keyed.is_valid() { keyed } else { root.get("stats") }
}

fn achievement_bits(stats: &KvNode) -> impl Iterator<Item = &KvNode> {
	stats
		.children()
		.iter()
		.filter(|stat| StatType::of(stat).is_some_and(StatType::has_achievements))
		.flat_map(|stat| stat.children_named("bits"))
		.flat_map(KvNode::children)
}

fn is_achieved(record: &KvNode) -> bool {
	record.get("achieved").as_bool(false) || record.get("value").as_bool(false) || record.get("unlock_time").as_i32(0) > 0
}

fn find_state_node<'a>(stats_root: &'a KvNode, name: &str) -> &'a KvNode {
	stats_root.find_first(|node| {
		let named = node.name().eq_ignore_ascii_case(name) || node.get("name").as_string("").eq_ignore_ascii_case(name);
		named && ["achieved", "value", "unlock_time"].iter().any(|field| node.get(field).is_valid())
	})
}

#[cfg(test)]
mod tests;

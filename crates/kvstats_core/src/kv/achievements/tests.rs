use std::cell::Cell;

use kvstats_testkit::{KvBytes, achievement_schema, achievement_stats};

use crate::kv::{
	AchievementTally, Completion, KvNode, StatType, Strategy, decode, resolve_completion, resolve_report, schema_achievement_names, tally_bit_records,
	tally_schema_records,
};

const APP: u32 = 440;

fn tree(bytes: &[u8]) -> KvNode {
	decode(bytes).expect("fixture decodes")
}

fn no_schema<'a>() -> Option<&'a KvNode> {
	None
}

#[test]
fn all_bits_achieved_is_complete() {
	let stats = tree(&achievement_stats(APP, &[&[true; 4], &[true; 3], &[true; 3]]));
	let report = resolve_report(&stats, no_schema, APP);

	assert_eq!(report.completion, Completion::Completed(true));
	assert_eq!(report.tally, AchievementTally { total: 10, achieved: 10 });
	assert_eq!(report.strategy, Some(Strategy::BitArray));
}

#[test]
fn partial_bits_are_incomplete() {
	let stats = tree(&achievement_stats(
		APP,
		&[&[true, true, false, true], &[true, false, true], &[false, true, true]],
	));
	let report = resolve_report(&stats, no_schema, APP);

	assert_eq!(report.completion, Completion::Completed(false));
	assert_eq!(report.tally, AchievementTally { total: 10, achieved: 7 });
}

#[test]
fn schema_is_not_loaded_when_bits_exist() {
	let stats = tree(&achievement_stats(APP, &[&[true]]));
	let called = Cell::new(false);
	let completion = resolve_completion(
		&stats,
		|| {
			called.set(true);
			None
		},
		APP,
	);

	assert_eq!(completion, Completion::Completed(true));
	assert!(!called.get());
}

fn named_state_stats(entries: &[(&str, i32)]) -> Vec<u8> {
	let mut out = KvBytes::new()
		.begin(&APP.to_string())
		.begin("stats")
		.begin("7")
		.int32("type_int", 1)
		.int32("data", 12)
		.end()
		.end()
		.begin("achievements");
	for (name, unlock_time) in entries {
		out = out.begin(name).int32("unlock_time", *unlock_time).end();
	}
	out.end().end().end().build()
}

#[test]
fn schema_fallback_finds_named_state_nodes() {
	let names = ["ACH_A", "ACH_B", "ACH_C", "ACH_D", "ACH_E"];
	let stats = tree(&named_state_stats(&names.map(|name| (name, 1_650_000_000))));
	let schema = tree(&achievement_schema(APP, &names));

	let report = resolve_report(&stats, || Some(&schema), APP);
	assert_eq!(report.completion, Completion::Completed(true));
	assert_eq!(report.tally, AchievementTally { total: 5, achieved: 5 });
	assert_eq!(report.strategy, Some(Strategy::Schema));
}

#[test]
fn schema_fallback_counts_missing_state_as_locked() {
	let stats = tree(&named_state_stats(&[("ach_a", 5), ("ACH_B", 0)]));
	let schema = tree(&achievement_schema(APP, &["ACH_A", "ACH_B", "ACH_C"]));

	let tally = tally_schema_records(&stats, &schema, APP);
	assert_eq!(tally, AchievementTally { total: 3, achieved: 1 });
	assert_eq!(tally.completion(), Completion::Completed(false));
}

#[test]
fn schema_search_requires_a_state_field() {
	// The first "ACH_X" node has no state; the later one does.
	let stats = tree(
		&KvBytes::new()
			.begin(&APP.to_string())
			.begin("stats")
			.begin("9")
			.int32("type_int", 1)
			.end()
			.end()
			.begin("labels")
			.string("ACH_X", "shiny")
			.end()
			.begin("state")
			.begin("0")
			.string("name", "ach_x")
			.int32("achieved", 1)
			.end()
			.end()
			.end()
			.build(),
	);
	let schema = tree(&achievement_schema(APP, &["ACH_X"]));

	assert_eq!(resolve_completion(&stats, || Some(&schema), APP), Completion::Completed(true));
}

#[test]
fn schema_search_uses_first_depth_first_match() {
	let stats = tree(
		&KvBytes::new()
			.begin("stats")
			.begin("1")
			.int32("type_int", 2)
			.end()
			.end()
			.begin("a")
			.begin("ACH")
			.int32("achieved", 0)
			.end()
			.end()
			.begin("ACH")
			.int32("achieved", 1)
			.end()
			.build(),
	);
	let schema = tree(&achievement_schema(APP, &["ACH"]));

	assert_eq!(resolve_completion(&stats, || Some(&schema), APP), Completion::Completed(false));
}

#[test]
fn missing_stats_and_schema_is_unknown() {
	let empty = tree(&[]);
	assert_eq!(resolve_completion(&empty, no_schema, APP), Completion::Unknown);

	let stats = tree(&named_state_stats(&[]));
	assert_eq!(resolve_completion(&stats, no_schema, APP), Completion::Unknown);
}

#[test]
fn empty_schema_is_unknown_not_incomplete() {
	let stats = tree(&named_state_stats(&[("ACH_A", 1)]));
	let schema = tree(&achievement_schema(APP, &[]));

	let report = resolve_report(&stats, || Some(&schema), APP);
	assert_eq!(report.completion, Completion::Unknown);
	assert_eq!(report.strategy, Some(Strategy::Schema));
	assert!(!report.completion.is_known());
}

#[test]
fn flat_layout_and_type_fallback() {
	let stats = tree(
		&KvBytes::new()
			.begin("Stats")
			.begin("1")
			.string("type", "5")
			.begin("Bits")
			.begin("0")
			.int32("value", 1)
			.end()
			.end()
			.begin("bits")
			.begin("0")
			.uint64("unlock_time", 3)
			.end()
			.begin("1")
			.float32("achieved", 1.0)
			.end()
			.end()
			.end()
			.begin("2")
			.int32("type_int", 1)
			.string("type", "4")
			.begin("bits")
			.begin("0")
			.end()
			.end()
			.end()
			.end()
			.build(),
	);

	let tally = tally_bit_records(&stats, APP);
	assert_eq!(tally, AchievementTally { total: 3, achieved: 3 });
}

#[test]
fn app_keyed_layout_wins_over_flat() {
	let stats = tree(
		&KvBytes::new()
			.begin(&APP.to_string())
			.begin("stats")
			.begin("1")
			.int32("type_int", 4)
			.begin("bits")
			.begin("0")
			.int32("achieved", 0)
			.end()
			.end()
			.end()
			.end()
			.end()
			.begin("stats")
			.begin("1")
			.int32("type_int", 4)
			.begin("bits")
			.begin("0")
			.int32("achieved", 1)
			.end()
			.end()
			.end()
			.end()
			.build(),
	);

	assert_eq!(resolve_completion(&stats, no_schema, APP), Completion::Completed(false));
	assert_eq!(resolve_completion(&stats, no_schema, APP + 1), Completion::Completed(true));
}

#[test]
fn schema_names_skip_empty_entries() {
	let schema = tree(&achievement_schema(APP, &["ONE", "", "TWO"]));
	assert_eq!(schema_achievement_names(&schema, APP), ["ONE", "TWO"]);
}

#[test]
fn stat_type_reads_type_int_then_type() {
	let with_int = KvNode::container("s", vec![KvNode::new("type_int", crate::kv::KvValue::Int32(4))]);
	let with_text = KvNode::container("s", vec![KvNode::new("type", crate::kv::KvValue::String("5".to_owned()))]);
	let without = KvNode::container("s", vec![]);

	assert_eq!(StatType::of(&with_int), Some(StatType::Achievements));
	assert_eq!(StatType::of(&with_text), Some(StatType::GroupAchievements));
	assert_eq!(StatType::of(&without), Some(StatType::Invalid));
	assert_eq!(Completion::Completed(true).as_str(), "complete");
	assert_eq!(Strategy::Schema.as_str(), "schema");
}

#[test]
fn schema_names_are_distinct_ignoring_case() {
	let stats = tree(&named_state_stats(&[("ACH_A", 5), ("ACH_B", 0)]));
	let schema = tree(&achievement_schema(APP, &["ACH_A", "ACH_A", "ach_a", "ACH_B"]));

	assert_eq!(schema_achievement_names(&schema, APP), ["ACH_A", "ACH_B"]);
	assert_eq!(tally_schema_records(&stats, &schema, APP), AchievementTally { total: 2, achieved: 1 });
}

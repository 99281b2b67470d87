use crate::kv::{KvNode, KvValue};

fn leaf(name: &str, value: KvValue) -> KvNode {
	KvNode::new(name, value)
}

fn sample() -> KvNode {
	KvNode::root(vec![
		KvNode::container(
			"Stats",
			vec![
				leaf("count", KvValue::Int32(3)),
				leaf("ratio", KvValue::Float32(2.75)),
				leaf("label", KvValue::String("hello".to_owned())),
			],
		),
		leaf("dup", KvValue::Int32(1)),
		leaf("DUP", KvValue::Int32(2)),
	])
}

#[test]
fn lookup_is_case_insensitive_on_immediate_children() {
	let root = sample();
	assert_eq!(root.get("stats").name(), "Stats");
	assert_eq!(root["STATS"]["Count"].as_i32(-1), 3);
	assert!(root.get("count").is_missing(), "lookup must not recurse");
}

#[test]
fn ambiguous_lookup_fails_closed() {
	let root = sample();
	assert!(std::ptr::eq(root.get("dup"), KvNode::missing()));
	assert_eq!(root.children_named("Dup").count(), 2);
}

#[test]
fn missing_chains_and_coerces_to_defaults() {
	let root = sample();
	let node = &root["nope"]["deeper"]["deepest"];
	assert!(std::ptr::eq(node, KvNode::missing()));
	assert_eq!(node.as_string("dflt"), "dflt");
	assert_eq!(node.as_i32(42), 42);
	assert_eq!(node.as_f32(0.5), 0.5);
	assert!(node.as_bool(true));
	assert!(!node.as_bool(false));
	assert!(root.get_path(&["stats", "nope", "x"]).is_missing());
	assert_eq!(root.get_path(&["stats", "label"]).as_string(""), "hello");
}

#[test]
fn container_coerces_to_defaults() {
	let root = sample();
	let stats = &root["stats"];
	assert_eq!(stats.as_string("d"), "d");
	assert_eq!(stats.as_i32(-9), -9);
	assert_eq!(stats.as_f32(-1.0), -1.0);
	assert!(stats.as_bool(true));
}

#[test]
fn uint64_integer_masks_but_boolean_does_not() {
	let node = leaf("v", KvValue::UInt64(0x1_0000_0005));
	assert_eq!(node.as_i32(-1), 5);
	assert!(node.as_bool(false));

	let high_only = leaf("v", KvValue::UInt64(0x1_0000_0000));
	assert_eq!(high_only.as_i32(-1), 0);
	assert!(high_only.as_bool(false));

	let sign = leaf("v", KvValue::UInt64(0xffff_ffff));
	assert_eq!(sign.as_i32(0), -1);
	assert_eq!(sign.as_f32(0.0), 4_294_967_295_f32);
}

#[test]
fn text_parses_with_fallback() {
	assert_eq!(leaf("v", KvValue::String(" 17 ".to_owned())).as_i32(0), 17);
	assert_eq!(leaf("v", KvValue::WideString("-4".to_owned())).as_i32(0), -4);
	assert_eq!(leaf("v", KvValue::String("abc".to_owned())).as_i32(8), 8);
	assert_eq!(leaf("v", KvValue::String("1.25".to_owned())).as_f32(0.0), 1.25);
	assert!(leaf("v", KvValue::String("1".to_owned())).as_bool(false));
	assert!(!leaf("v", KvValue::String("0".to_owned())).as_bool(true));
	assert!(leaf("v", KvValue::String("yes".to_owned())).as_bool(true));
}

#[test]
fn float_truncates_toward_zero() {
	assert_eq!(leaf("v", KvValue::Float32(-2.9)).as_i32(0), -2);
	assert!(!leaf("v", KvValue::Float32(0.9)).as_bool(true));
	assert!(leaf("v", KvValue::Float32(1.1)).as_bool(false));
}

#[test]
fn pointer_and_color_render_but_do_not_coerce() {
	let pointer = leaf("p", KvValue::Pointer(12));
	let color = leaf("c", KvValue::Color(0xff00ff));
	assert_eq!(pointer.as_string(""), "12");
	assert_eq!(color.as_string(""), "16711935");
	assert_eq!(pointer.as_i32(-1), -1);
	assert_eq!(color.as_f32(-1.0), -1.0);
	assert!(!color.as_bool(false));
}

#[test]
fn numeric_kinds_render_as_text() {
	assert_eq!(leaf("v", KvValue::Int32(-3)).as_string(""), "-3");
	assert_eq!(leaf("v", KvValue::Float32(1.5)).as_string(""), "1.5");
	assert_eq!(leaf("v", KvValue::UInt64(u64::MAX)).as_string(""), "18446744073709551615");
}

#[test]
fn find_first_is_depth_first_preorder() {
	let root = KvNode::root(vec![
		KvNode::container("a", vec![KvNode::container("target", vec![leaf("id", KvValue::Int32(1))])]),
		KvNode::container("target", vec![leaf("id", KvValue::Int32(2))]),
	]);

	let found = root.find_first(|node| node.name() == "target");
	assert_eq!(found["id"].as_i32(0), 1);
	assert!(root.find_first(|node| node.name() == "absent").is_missing());
}

#![allow(missing_docs)]

use std::collections::HashSet;
use std::sync::Arc;

use rbxdoc::rbx::{ModelFile, PropertyValue, RbxError};

/// Full pipeline over compressed chunks: header, block decompression,
/// column decoding, and tree resolution through the public API only.
#[test]
fn compressed_place_round_trip() {
	let file = ModelFile::parse(build_place()).expect("place parses");

	assert_eq!(file.header.version, 0);
	assert_eq!(file.header.class_count, 2);
	assert_eq!(file.header.instance_count, 3);
	assert_eq!(file.model.len(), 3);

	let workspace = file
		.model
		.find_first_child(None, "Workspace", false)
		.expect("workspace at root");
	assert!(file.model.get(workspace).is_service());
	assert_eq!(file.model.get(workspace).children().len(), 2);

	let left = file.model.find_first_child(Some(workspace), "Left", false).expect("left part");
	let right = file.model.find_first_child(Some(workspace), "Right", false).expect("right part");
	assert_eq!(file.model.get(left).class_name(), "Part");
	assert_eq!(file.model.full_name(right), "Workspace.Right");

	let Some(PropertyValue::SharedString(first)) = file.model.get(left).property("Tags") else {
		panic!("left tags should be shared");
	};
	let Some(PropertyValue::SharedString(second)) = file.model.get(right).property("Tags") else {
		panic!("right tags should be shared");
	};
	assert_eq!(&**first, b"physics".as_slice());
	assert!(Arc::ptr_eq(first, second), "one table index should alias one blob");
}

/// Every instance sits in exactly one children list, root included.
#[test]
fn every_instance_has_one_parent_slot() {
	let file = ModelFile::parse(build_place()).expect("place parses");

	let mut seen = HashSet::new();
	for id in file.model.root_children() {
		assert!(seen.insert(*id), "duplicate root attachment");
	}
	for (_, instance) in file.model.instances() {
		for child in instance.children() {
			assert!(seen.insert(*child), "instance attached twice");
		}
	}
	assert_eq!(seen.len(), file.model.len(), "every instance should be attached");
}

#[test]
fn truncated_stream_is_rejected() {
	// Cutting into the terminal chunk's payload leaves its declared length
	// unsatisfiable.
	let bytes = build_place();
	let err = ModelFile::parse(&bytes[..bytes.len() - 4]).expect_err("truncated stream");
	assert!(
		matches!(err, RbxError::TruncatedChunk { ref tag, .. } if tag == "END"),
		"got {err:?}"
	);
}

#[test]
fn meta_pairs_survive_the_parse() {
	let file = ModelFile::parse(build_place()).expect("place parses");
	assert_eq!(file.meta.len(), 1);
	assert_eq!(&*file.meta[0].0, "ExplicitAutoJoints");
	assert_eq!(&*file.meta[0].1, "true");
}

/// A place with one Workspace service holding two Parts, each tagged with
/// the same shared string. All payload chunks are compressed.
fn build_place() -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(b"<roblox!");
	out.push(0x89);
	out.extend_from_slice(&0_u16.to_le_bytes());
	out.extend_from_slice(&2_i32.to_le_bytes());
	out.extend_from_slice(&3_i32.to_le_bytes());
	out.extend_from_slice(&[0_u8; 8]);

	let mut inst_workspace = Vec::new();
	push_string(&mut inst_workspace, "Workspace");
	inst_workspace.push(1);
	inst_workspace.extend_from_slice(&1_u32.to_le_bytes());
	inst_workspace.extend_from_slice(&referent_column(&[0]));
	push_chunk(&mut out, b"INST", &inst_workspace, true);

	let mut inst_part = Vec::new();
	push_string(&mut inst_part, "Part");
	inst_part.push(0);
	inst_part.extend_from_slice(&2_u32.to_le_bytes());
	inst_part.extend_from_slice(&referent_column(&[1, 2]));
	push_chunk(&mut out, b"INST", &inst_part, true);

	let mut name_workspace = Vec::new();
	push_string(&mut name_workspace, "Workspace");
	push_string(&mut name_workspace, "Name");
	name_workspace.push(0x01);
	push_string(&mut name_workspace, "Workspace");
	push_chunk(&mut out, b"PROP", &name_workspace, true);

	let mut name_part = Vec::new();
	push_string(&mut name_part, "Part");
	push_string(&mut name_part, "Name");
	name_part.push(0x01);
	push_string(&mut name_part, "Left");
	push_string(&mut name_part, "Right");
	push_chunk(&mut out, b"PROP", &name_part, true);

	let mut tags = Vec::new();
	push_string(&mut tags, "Part");
	push_string(&mut tags, "Tags");
	tags.push(0x1A);
	tags.extend_from_slice(&0_u32.to_le_bytes());
	tags.extend_from_slice(&0_u32.to_le_bytes());
	push_chunk(&mut out, b"PROP", &tags, true);

	let mut sstr = Vec::new();
	sstr.extend_from_slice(&1_u32.to_le_bytes());
	sstr.extend_from_slice(&[0xAB_u8; 16]);
	sstr.extend_from_slice(&7_u32.to_le_bytes());
	sstr.extend_from_slice(b"physics");
	push_chunk(&mut out, b"SSTR", &sstr, true);

	let mut meta = Vec::new();
	meta.extend_from_slice(&1_u32.to_le_bytes());
	push_string(&mut meta, "ExplicitAutoJoints");
	push_string(&mut meta, "true");
	push_chunk(&mut out, b"META", &meta, true);

	let mut prnt = Vec::new();
	prnt.push(0);
	prnt.extend_from_slice(&3_u32.to_le_bytes());
	prnt.extend_from_slice(&referent_column(&[1, 2, 0]));
	prnt.extend_from_slice(&referent_column(&[0, 0, -1]));
	push_chunk(&mut out, b"PRNT", &prnt, true);

	push_chunk(&mut out, b"END\0", b"</roblox>", false);
	out
}

fn push_chunk(out: &mut Vec<u8>, tag: &[u8; 4], payload: &[u8], compress: bool) {
	out.extend_from_slice(tag);
	if compress {
		let body = lz4_flex::block::compress(payload);
		out.extend_from_slice(&(body.len() as u32).to_le_bytes());
		out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
		out.extend_from_slice(&[0_u8; 4]);
		out.extend_from_slice(&body);
	} else {
		out.extend_from_slice(&0_u32.to_le_bytes());
		out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
		out.extend_from_slice(&[0_u8; 4]);
		out.extend_from_slice(payload);
	}
}

fn push_string(out: &mut Vec<u8>, text: &str) {
	out.extend_from_slice(&(text.len() as u32).to_le_bytes());
	out.extend_from_slice(text.as_bytes());
}

fn encode_zigzag32(value: i32) -> u32 {
	((value << 1) ^ (value >> 31)) as u32
}

/// Delta-encode, zigzag, and byte-interleave a referent column.
fn referent_column(referents: &[i32]) -> Vec<u8> {
	let mut previous = 0_i32;
	let deltas: Vec<u32> = referents
		.iter()
		.map(|referent| {
			let delta = referent.wrapping_sub(previous);
			previous = *referent;
			encode_zigzag32(delta)
		})
		.collect();

	let mut out = Vec::with_capacity(deltas.len() * 4);
	for plane in 0..4 {
		for value in &deltas {
			out.push((value >> (24 - 8 * plane)) as u8);
		}
	}
	out
}

use crate::rbx::RbxError;
use crate::rbx::bytes::ByteReader;
use crate::rbx::chunk::{ChunkTag, read_chunk, scan_chunk_stats, tag_label};

fn raw_chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(tag);
	out.extend_from_slice(&0_u32.to_le_bytes());
	out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
	out.extend_from_slice(&[0_u8; 4]);
	out.extend_from_slice(payload);
	out
}

fn compressed_chunk(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
	let body = lz4_flex::block::compress(payload);
	let mut out = Vec::new();
	out.extend_from_slice(tag);
	out.extend_from_slice(&(body.len() as u32).to_le_bytes());
	out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
	out.extend_from_slice(&[0_u8; 4]);
	out.extend_from_slice(&body);
	out
}

#[test]
fn tag_mapping_is_closed() {
	assert_eq!(ChunkTag::from_raw(*b"INST"), ChunkTag::Instance);
	assert_eq!(ChunkTag::from_raw(*b"PROP"), ChunkTag::Property);
	assert_eq!(ChunkTag::from_raw(*b"PRNT"), ChunkTag::Parent);
	assert_eq!(ChunkTag::from_raw(*b"SSTR"), ChunkTag::SharedStrings);
	assert_eq!(ChunkTag::from_raw(*b"META"), ChunkTag::Meta);
	assert_eq!(ChunkTag::from_raw(*b"END\0"), ChunkTag::End);
	assert_eq!(ChunkTag::from_raw(*b"WHAT"), ChunkTag::Unknown(*b"WHAT"));
}

#[test]
fn raw_passthrough_payload() {
	let bytes = raw_chunk(b"META", b"side map data");
	let mut reader = ByteReader::new(&bytes);
	let mut scratch = Vec::new();
	let header = read_chunk(&mut reader, &mut scratch).expect("chunk reads");
	assert_eq!(header.tag, ChunkTag::Meta);
	assert_eq!(header.compressed_len, 0);
	assert_eq!(&scratch[..header.decompressed_len], b"side map data");
}

#[test]
fn compressed_payload_roundtrips() {
	let payload: Vec<u8> = b"repeat repeat repeat repeat repeat ".repeat(20);
	let bytes = compressed_chunk(b"PROP", &payload);
	let mut reader = ByteReader::new(&bytes);
	let mut scratch = Vec::new();
	let header = read_chunk(&mut reader, &mut scratch).expect("chunk reads");
	assert_eq!(header.tag, ChunkTag::Property);
	assert_eq!(scratch, payload);
	assert_eq!(reader.remaining(), 0);
}

#[test]
fn truncated_chunk_is_fatal() {
	let mut bytes = raw_chunk(b"INST", b"0123456789");
	bytes.truncate(bytes.len() - 4);
	let mut reader = ByteReader::new(&bytes);
	let mut scratch = Vec::new();
	let err = read_chunk(&mut reader, &mut scratch).expect_err("truncated");
	assert!(
		matches!(err, RbxError::TruncatedChunk { ref tag, need: 10, rem: 6 } if tag == "INST"),
		"got {err:?}"
	);
}

#[test]
fn stats_walk_counts_tags() {
	let mut bytes = raw_chunk(b"INST", b"a");
	bytes.extend(raw_chunk(b"PROP", b"bb"));
	bytes.extend(raw_chunk(b"PROP", b"cc"));
	bytes.extend(raw_chunk(b"END\0", b""));
	let stats = scan_chunk_stats(&mut ByteReader::new(&bytes)).expect("stats");
	assert_eq!(stats.chunk_count, 4);
	assert!(stats.has_end);
	assert_eq!(stats.tags[b"PROP"], 2);
	assert_eq!(stats.last_tag, *b"END\0");
}

#[test]
fn stats_walk_requires_terminal_chunk() {
	let bytes = raw_chunk(b"INST", b"a");
	let err = scan_chunk_stats(&mut ByteReader::new(&bytes)).expect_err("no END");
	assert!(matches!(err, RbxError::MissingTerminalChunk), "got {err:?}");
}

#[test]
fn labels_render_printable_tags() {
	assert_eq!(tag_label(*b"INST"), "INST");
	assert_eq!(tag_label(*b"END\0"), "END");
	assert_eq!(tag_label([0x01, 0x02, 0x00, 0x00]), "..");
}

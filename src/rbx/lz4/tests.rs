use crate::rbx::RbxError;
use crate::rbx::lz4::decompress;

#[test]
fn literal_only_block() {
	// Token 0x50: five literals, no match (final token).
	let src = [0x50, b'h', b'e', b'l', b'l', b'o'];
	let mut out = Vec::new();
	decompress(&src, 5, &mut out).expect("decompress");
	assert_eq!(out, b"hello");
}

#[test]
fn overlapping_match_is_run_length() {
	// One literal 'a', then a match of 7 at distance 1: replays the byte
	// just written, classic RLE.
	let src = [0x13, b'a', 0x01, 0x00];
	let mut out = Vec::new();
	decompress(&src, 8, &mut out).expect("decompress");
	assert_eq!(out, b"aaaaaaaa");
}

#[test]
fn extended_literal_length() {
	// 15 + 255 + 3 = 273 literals in one token.
	let mut src = vec![0xF0, 0xFF, 0x03];
	src.extend(std::iter::repeat_n(0x7A, 273));
	let mut out = Vec::new();
	decompress(&src, 273, &mut out).expect("decompress");
	assert_eq!(out.len(), 273);
	assert!(out.iter().all(|byte| *byte == 0x7A));
}

#[test]
fn extended_match_length() {
	// 4 literals, then distance 4 with match field 15 + 1 => 20 copied bytes.
	let src = [0x4F, b'a', b'b', b'c', b'd', 0x04, 0x00, 0x01];
	let mut out = Vec::new();
	decompress(&src, 24, &mut out).expect("decompress");
	assert_eq!(out, b"abcdabcdabcdabcdabcdabcd");
}

#[test]
fn declared_output_too_small_is_mismatch() {
	let src = [0x50, b'h', b'e', b'l', b'l', b'o'];
	let mut out = Vec::new();
	let err = decompress(&src, 3, &mut out).expect_err("should mismatch");
	assert!(
		matches!(err, RbxError::DecompressionMismatch { kind: "output", declared: 3, .. }),
		"got {err:?}"
	);
}

#[test]
fn declared_output_too_large_is_mismatch() {
	let src = [0x50, b'h', b'e', b'l', b'l', b'o'];
	let mut out = Vec::new();
	let err = decompress(&src, 9, &mut out).expect_err("should mismatch");
	assert!(
		matches!(err, RbxError::DecompressionMismatch { kind: "output", declared: 9, actual: 5 }),
		"got {err:?}"
	);
}

#[test]
fn truncated_input_is_mismatch() {
	// Token promises five literals but only three follow.
	let src = [0x50, b'h', b'e', b'l'];
	let mut out = Vec::new();
	let err = decompress(&src, 5, &mut out).expect_err("should mismatch");
	assert!(matches!(err, RbxError::DecompressionMismatch { kind: "input", .. }), "got {err:?}");
}

#[test]
fn backref_before_block_start_is_fatal() {
	let src = [0x10, b'a', 0x05, 0x00];
	let mut out = Vec::new();
	let err = decompress(&src, 6, &mut out).expect_err("should fail");
	assert!(matches!(err, RbxError::DecompressionBadBackref { distance: 5, produced: 1 }), "got {err:?}");
}

#[test]
fn output_buffer_is_reused() {
	let mut out = Vec::new();
	decompress(&[0x30, b'a', b'b', b'c'], 3, &mut out).expect("first block");
	decompress(&[0x20, b'x', b'y'], 2, &mut out).expect("second block");
	assert_eq!(out, b"xy");
}

#[test]
fn roundtrip_against_reference_encoder() {
	for len in [0_usize, 1, 7, 64, 300, 1024, 4096] {
		let data = pseudo_random(len, 0x9E37_79B9 ^ len as u32);
		let compressed = lz4_flex::block::compress(&data);
		let mut out = Vec::new();
		decompress(&compressed, data.len(), &mut out).expect("decompress");
		assert_eq!(out, data, "len {len}");
	}
}

#[test]
fn roundtrip_compressible_data() {
	let mut data = Vec::new();
	for i in 0_u32..600 {
		data.extend_from_slice(b"pattern-");
		data.push((i % 7) as u8);
	}
	let compressed = lz4_flex::block::compress(&data);
	assert!(compressed.len() < data.len(), "encoder should find matches");
	let mut out = Vec::new();
	decompress(&compressed, data.len(), &mut out).expect("decompress");
	assert_eq!(out, data);
}

#[test]
fn truncated_reference_stream_never_silently_truncates() {
	let data = pseudo_random(512, 42);
	let compressed = lz4_flex::block::compress(&data);
	let cut = &compressed[..compressed.len() - 3];
	let mut out = Vec::new();
	decompress(cut, data.len(), &mut out).expect_err("must fail");
}

fn pseudo_random(len: usize, seed: u32) -> Vec<u8> {
	let mut state = seed | 1;
	let mut out = Vec::with_capacity(len);
	for _ in 0..len {
		state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
		out.push((state >> 24) as u8);
	}
	out
}

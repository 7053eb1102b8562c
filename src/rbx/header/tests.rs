use crate::rbx::RbxError;
use crate::rbx::bytes::ByteReader;
use crate::rbx::header::{BINARY_MARKER, FileHeader, MAGIC};

fn header_bytes(marker: u8, version: u16, class_count: i32, instance_count: i32) -> Vec<u8> {
	let mut out = Vec::new();
	out.extend_from_slice(&MAGIC);
	out.push(marker);
	out.extend_from_slice(&version.to_le_bytes());
	out.extend_from_slice(&class_count.to_le_bytes());
	out.extend_from_slice(&instance_count.to_le_bytes());
	out.extend_from_slice(&[0_u8; 8]);
	out
}

#[test]
fn parses_valid_header() {
	let bytes = header_bytes(BINARY_MARKER, 0, 2, 5);
	let mut reader = ByteReader::new(&bytes);
	let header = FileHeader::parse(&mut reader).expect("header parses");
	assert_eq!(header.version, 0);
	assert_eq!(header.class_count, 2);
	assert_eq!(header.instance_count, 5);
	assert_eq!(reader.pos(), FileHeader::SIZE);
}

#[test]
fn rejects_bad_magic() {
	let mut bytes = header_bytes(BINARY_MARKER, 0, 0, 0);
	bytes[0] = b'X';
	let err = FileHeader::parse(&mut ByteReader::new(&bytes)).expect_err("bad magic");
	assert!(matches!(err, RbxError::UnknownMagic { .. }), "got {err:?}");
}

#[test]
fn non_binary_marker_routes_to_textual_decoder() {
	let bytes = header_bytes(b'<', 0, 0, 0);
	let err = FileHeader::parse(&mut ByteReader::new(&bytes)).expect_err("markup marker");
	assert!(matches!(err, RbxError::NotBinaryFormat { marker } if marker == b'<'), "got {err:?}");
}

#[test]
fn rejects_negative_counts() {
	let bytes = header_bytes(BINARY_MARKER, 0, -1, 0);
	let err = FileHeader::parse(&mut ByteReader::new(&bytes)).expect_err("negative class count");
	assert!(matches!(err, RbxError::NegativeCount { field: "class", value: -1 }), "got {err:?}");

	let bytes = header_bytes(BINARY_MARKER, 0, 0, -7);
	let err = FileHeader::parse(&mut ByteReader::new(&bytes)).expect_err("negative instance count");
	assert!(matches!(err, RbxError::NegativeCount { field: "instance", value: -7 }), "got {err:?}");
}

#[test]
fn rejects_truncated_header() {
	let bytes = &header_bytes(BINARY_MARKER, 0, 0, 0)[..12];
	let err = FileHeader::parse(&mut ByteReader::new(bytes)).expect_err("truncated");
	assert!(matches!(err, RbxError::UnexpectedEof { .. }), "got {err:?}");
}

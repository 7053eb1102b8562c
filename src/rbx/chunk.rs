use std::collections::HashMap;

use crate::rbx::bytes::ByteReader;
use crate::rbx::lz4;
use crate::rbx::{RbxError, Result};

/// Closed set of recognized chunk tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkTag {
	/// Class declaration (`INST`).
	Instance,
	/// Property column (`PROP`).
	Property,
	/// Parent links (`PRNT`).
	Parent,
	/// Shared string table (`SSTR`).
	SharedStrings,
	/// Metadata side map (`META`).
	Meta,
	/// Terminal chunk (`END\0`).
	End,
	/// Anything else; skipped with a warning.
	Unknown([u8; 4]),
}

impl ChunkTag {
	/// Map the raw 4-byte tag onto the closed enumeration.
	pub fn from_raw(raw: [u8; 4]) -> Self {
		match &raw {
			b"INST" => Self::Instance,
			b"PROP" => Self::Property,
			b"PRNT" => Self::Parent,
			b"SSTR" => Self::SharedStrings,
			b"META" => Self::Meta,
			b"END\0" => Self::End,
			_ => Self::Unknown(raw),
		}
	}
}

/// Render a raw tag as a printable label.
pub fn tag_label(raw: [u8; 4]) -> String {
	let mut out = String::new();
	for byte in raw {
		if byte == 0 {
			continue;
		}
		if byte.is_ascii_graphic() || byte == b' ' {
			out.push(char::from(byte));
		} else {
			out.push('.');
		}
	}
	if out.is_empty() { "....".to_owned() } else { out }
}

/// One decoded chunk header; the payload lands in the caller's scratch buffer.
#[derive(Debug, Clone, Copy)]
pub struct ChunkHeader {
	/// Dispatch tag.
	pub tag: ChunkTag,
	/// Raw tag bytes.
	pub raw: [u8; 4],
	/// Declared compressed length; zero means raw passthrough.
	pub compressed_len: usize,
	/// Declared decompressed payload length.
	pub decompressed_len: usize,
}

/// Read one chunk: framing, then payload into `scratch`.
///
/// After a successful return, `scratch` holds exactly the decompressed
/// payload. The buffer is reused across chunks within one parse.
pub fn read_chunk(reader: &mut ByteReader, scratch: &mut Vec<u8>) -> Result<ChunkHeader> {
	let raw = reader.read_code4()?;
	let compressed_len = reader.read_u32_le()? as usize;
	let decompressed_len = reader.read_u32_le()? as usize;
	let _ = reader.read_exact(4)?;

	let body_len = if compressed_len == 0 { decompressed_len } else { compressed_len };
	if body_len > reader.remaining() {
		return Err(RbxError::TruncatedChunk {
			tag: tag_label(raw),
			need: body_len,
			rem: reader.remaining(),
		});
	}

	let body = reader.read_exact(body_len)?.to_vec();
	if compressed_len == 0 {
		scratch.clear();
		scratch.extend_from_slice(&body);
	} else {
		lz4::decompress(&body, decompressed_len, scratch)?;
	}

	Ok(ChunkHeader {
		tag: ChunkTag::from_raw(raw),
		raw,
		compressed_len,
		decompressed_len,
	})
}

/// Framing-level statistics over one chunk stream, payloads untouched.
#[derive(Debug)]
pub struct ChunkStats {
	/// Total chunks seen, terminal included.
	pub chunk_count: u32,
	/// Whether the terminal chunk was present.
	pub has_end: bool,
	/// Raw tag of the last chunk read.
	pub last_tag: [u8; 4],
	/// Chunk count per raw tag.
	pub tags: HashMap<[u8; 4], u32>,
}

/// Walk chunk framing without decompressing payloads.
pub fn scan_chunk_stats(reader: &mut ByteReader) -> Result<ChunkStats> {
	let mut stats = ChunkStats {
		chunk_count: 0,
		has_end: false,
		last_tag: [0_u8; 4],
		tags: HashMap::new(),
	};

	loop {
		if stats.has_end {
			return Ok(stats);
		}
		if reader.remaining() == 0 {
			return Err(RbxError::MissingTerminalChunk);
		}

		let raw = reader.read_code4()?;
		let compressed_len = reader.read_u32_le()? as usize;
		let decompressed_len = reader.read_u32_le()? as usize;
		let _ = reader.read_exact(4)?;

		let body_len = if compressed_len == 0 { decompressed_len } else { compressed_len };
		if body_len > reader.remaining() {
			return Err(RbxError::TruncatedChunk {
				tag: tag_label(raw),
				need: body_len,
				rem: reader.remaining(),
			});
		}
		reader.jump(body_len);

		stats.chunk_count += 1;
		stats.last_tag = raw;
		*stats.tags.entry(raw).or_insert(0) += 1;
		if ChunkTag::from_raw(raw) == ChunkTag::End {
			stats.has_end = true;
		}
	}
}

#[cfg(test)]
mod tests;

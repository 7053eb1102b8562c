use crate::rbx::{RbxError, Result};

/// Decode one LZ4-style block from exactly the bytes of `src`.
///
/// `out` is cleared and reused as the output buffer; callers may hand the
/// same buffer back across blocks, previous contents are not preserved.
/// Consuming fewer or more bytes than `src` holds, or producing a byte count
/// different from `decompressed_len`, is a fatal mismatch.
pub fn decompress(src: &[u8], decompressed_len: usize, out: &mut Vec<u8>) -> Result<()> {
	out.clear();
	out.reserve(decompressed_len);

	let mut pos = 0_usize;
	while pos < src.len() {
		let token = src[pos];
		pos += 1;

		let mut literal_len = usize::from(token >> 4);
		if literal_len == 0xF {
			literal_len += read_extension(src, &mut pos)?;
		}

		let literals = src.get(pos..pos + literal_len).ok_or(RbxError::DecompressionMismatch {
			kind: "input",
			declared: src.len(),
			actual: pos + literal_len,
		})?;
		if out.len() + literal_len > decompressed_len {
			return Err(RbxError::DecompressionMismatch {
				kind: "output",
				declared: decompressed_len,
				actual: out.len() + literal_len,
			});
		}
		out.extend_from_slice(literals);
		pos += literal_len;

		// The final token carries literals only.
		if pos >= src.len() {
			break;
		}

		let distance_bytes = src.get(pos..pos + 2).ok_or(RbxError::DecompressionMismatch {
			kind: "input",
			declared: src.len(),
			actual: pos + 2,
		})?;
		let distance = usize::from(u16::from_le_bytes([distance_bytes[0], distance_bytes[1]]));
		pos += 2;

		let mut match_len = usize::from(token & 0xF);
		if match_len == 0xF {
			match_len += read_extension(src, &mut pos)?;
		}
		match_len += 4;

		let start = out.len().checked_sub(distance).ok_or(RbxError::DecompressionBadBackref {
			distance,
			produced: out.len(),
		})?;
		if distance == 0 {
			return Err(RbxError::DecompressionBadBackref { distance, produced: out.len() });
		}
		if out.len() + match_len > decompressed_len {
			return Err(RbxError::DecompressionMismatch {
				kind: "output",
				declared: decompressed_len,
				actual: out.len() + match_len,
			});
		}

		// Byte-by-byte so a short distance replays freshly written bytes.
		for offset in 0..match_len {
			let byte = out[start + offset];
			out.push(byte);
		}
	}

	if out.len() != decompressed_len {
		return Err(RbxError::DecompressionMismatch {
			kind: "output",
			declared: decompressed_len,
			actual: out.len(),
		});
	}

	Ok(())
}

fn read_extension(src: &[u8], pos: &mut usize) -> Result<usize> {
	let mut total = 0_usize;
	loop {
		let byte = *src.get(*pos).ok_or(RbxError::DecompressionMismatch {
			kind: "input",
			declared: src.len(),
			actual: *pos + 1,
		})?;
		*pos += 1;
		total += usize::from(byte);
		if byte != 0xFF {
			return Ok(total);
		}
	}
}

#[cfg(test)]
mod tests;

use crate::rbx::{RbxError, Result};

/// Bounded cursor over a private copy of the input bytes.
///
/// The reader never aliases caller memory; construction copies, so the caller
/// may reuse or drop its buffer while the reader is alive.
pub struct ByteReader {
	bytes: Vec<u8>,
	pos: usize,
}

impl ByteReader {
	/// Create a reader at position 0 over a copy of `bytes`.
	pub fn new(bytes: impl AsRef<[u8]>) -> Self {
		Self {
			bytes: bytes.as_ref().to_vec(),
			pos: 0,
		}
	}

	/// Return current byte offset.
	pub fn pos(&self) -> usize {
		self.pos
	}

	/// Move to an absolute byte offset.
	pub fn set_pos(&mut self, pos: usize) {
		self.pos = pos;
	}

	/// Advance the position by `n` bytes without reading.
	pub fn jump(&mut self, n: usize) {
		self.pos += n;
	}

	/// Return total input length.
	pub fn len(&self) -> usize {
		self.bytes.len()
	}

	/// Return whether the input is empty.
	pub fn is_empty(&self) -> bool {
		self.bytes.is_empty()
	}

	/// Return remaining unread bytes.
	pub fn remaining(&self) -> usize {
		self.bytes.len().saturating_sub(self.pos)
	}

	/// Read exactly `n` bytes and advance the cursor.
	pub fn read_exact(&mut self, n: usize) -> Result<&[u8]> {
		if n > self.remaining() {
			return Err(RbxError::UnexpectedEof {
				at: self.pos,
				need: n,
				rem: self.remaining(),
			});
		}

		let start = self.pos;
		self.pos += n;
		Ok(&self.bytes[start..self.pos])
	}

	/// Read a four-byte tag.
	pub fn read_code4(&mut self) -> Result<[u8; 4]> {
		let raw = self.read_exact(4)?;
		let mut out = [0_u8; 4];
		out.copy_from_slice(raw);
		Ok(out)
	}

	/// Read one byte.
	pub fn read_u8(&mut self) -> Result<u8> {
		Ok(self.read_exact(1)?[0])
	}

	/// Read one signed byte.
	pub fn read_i8(&mut self) -> Result<i8> {
		Ok(self.read_u8()? as i8)
	}

	/// Read a little-endian `u16` composed byte-at-a-time.
	pub fn read_u16_le(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		Ok(u16::from(raw[0]) + u16::from(raw[1]) * 256)
	}

	/// Read a big-endian `u16`.
	pub fn read_u16_be(&mut self) -> Result<u16> {
		let raw = self.read_exact(2)?;
		Ok(u16::from(raw[0]) * 256 + u16::from(raw[1]))
	}

	/// Read a little-endian `i16`.
	pub fn read_i16_le(&mut self) -> Result<i16> {
		Ok(self.read_u16_le()? as i16)
	}

	/// Read a little-endian `u32` composed byte-at-a-time.
	pub fn read_u32_le(&mut self) -> Result<u32> {
		let raw = self.read_exact(4)?;
		Ok(u32::from(raw[0]) + u32::from(raw[1]) * 0x100 + u32::from(raw[2]) * 0x1_0000 + u32::from(raw[3]) * 0x100_0000)
	}

	/// Read a big-endian `u32`.
	pub fn read_u32_be(&mut self) -> Result<u32> {
		let raw = self.read_exact(4)?;
		Ok(u32::from(raw[0]) * 0x100_0000 + u32::from(raw[1]) * 0x1_0000 + u32::from(raw[2]) * 0x100 + u32::from(raw[3]))
	}

	/// Read a little-endian `i32`.
	pub fn read_i32_le(&mut self) -> Result<i32> {
		Ok(self.read_u32_le()? as i32)
	}

	/// Read a big-endian `i32`.
	pub fn read_i32_be(&mut self) -> Result<i32> {
		Ok(self.read_u32_be()? as i32)
	}

	/// Read a standard-layout little-endian `f32`.
	pub fn read_f32_le(&mut self) -> Result<f32> {
		Ok(decode_f32(self.read_u32_le()?))
	}

	/// Read a standard-layout little-endian `f64`.
	pub fn read_f64_le(&mut self) -> Result<f64> {
		let lo = self.read_u32_le()?;
		let hi = self.read_u32_le()?;
		Ok(decode_f64(u64::from(hi) << 32 | u64::from(lo)))
	}

	/// Read a format-native little-endian `f32` (sign in the low bit).
	pub fn read_rbx_f32_le(&mut self) -> Result<f32> {
		Ok(decode_rbx_f32(self.read_u32_le()?))
	}

	/// Read a `u32`-length-prefixed byte string.
	pub fn read_len_bytes(&mut self) -> Result<&[u8]> {
		let len = self.read_u32_le()? as usize;
		self.read_exact(len)
	}

	/// Read a `u32`-length-prefixed string, replacing invalid UTF-8.
	pub fn read_string(&mut self) -> Result<Box<str>> {
		let bytes = self.read_len_bytes()?;
		Ok(String::from_utf8_lossy(bytes).into_owned().into_boxed_str())
	}

	/// Run one read and restore the prior position, leaving state unchanged.
	pub fn peek<T>(&mut self, read: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
		let saved = self.pos;
		let result = read(self);
		self.pos = saved;
		result
	}
}

/// Decode a standard IEEE-754 single from its raw 32-bit word.
///
/// Subnormals flush to zero; an all-ones exponent yields infinity or NaN.
pub fn decode_f32(bits: u32) -> f32 {
	let exp = ((bits >> 23) & 0xFF) as i32;
	let mantissa = bits & 0x7F_FFFF;
	let negative = bits & 0x8000_0000 != 0;

	if exp == 0 {
		return 0.0;
	}
	if exp == 0xFF {
		if mantissa != 0 {
			return f32::NAN;
		}
		return if negative { f32::NEG_INFINITY } else { f32::INFINITY };
	}

	let magnitude = (1.0 + mantissa as f32 / (1 << 23) as f32) * 2_f32.powi(exp - 127);
	if negative { -magnitude } else { magnitude }
}

/// Decode a standard IEEE-754 double from its raw 64-bit word.
pub fn decode_f64(bits: u64) -> f64 {
	let exp = ((bits >> 52) & 0x7FF) as i32;
	let mantissa = bits & 0xF_FFFF_FFFF_FFFF;
	let negative = bits & 0x8000_0000_0000_0000 != 0;

	if exp == 0 {
		return 0.0;
	}
	if exp == 0x7FF {
		if mantissa != 0 {
			return f64::NAN;
		}
		return if negative { f64::NEG_INFINITY } else { f64::INFINITY };
	}

	let magnitude = (1.0 + mantissa as f64 / (1_u64 << 52) as f64) * 2_f64.powi(exp - 1023);
	if negative { -magnitude } else { magnitude }
}

/// Decode the format-native single layout: exponent in the top 8 bits,
/// mantissa in bits 1..=23, sign in the lowest bit.
pub fn decode_rbx_f32(bits: u32) -> f32 {
	let exp = (bits >> 24) as i32;
	if exp == 0 {
		return 0.0;
	}

	let mantissa = (bits >> 1) & 0x7F_FFFF;
	let magnitude = (1.0 + mantissa as f32 / (1 << 23) as f32) * 2_f32.powi(exp - 127);
	if bits & 1 != 0 { -magnitude } else { magnitude }
}

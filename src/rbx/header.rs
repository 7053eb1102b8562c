use crate::rbx::bytes::ByteReader;
use crate::rbx::{RbxError, Result};

/// Eight-byte container signature.
pub const MAGIC: [u8; 8] = *b"<roblox!";
/// Format marker selecting the binary sub-format.
pub const BINARY_MARKER: u8 = 0x89;

/// Parsed fixed file header fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
	/// Container format version.
	pub version: u16,
	/// Declared class count; a capacity hint, not validated against content.
	pub class_count: i32,
	/// Declared total instance count; a capacity hint as well.
	pub instance_count: i32,
}

impl FileHeader {
	/// Total fixed header size, including reserved padding.
	pub const SIZE: usize = 27;

	/// Parse the fixed header from the start of the stream.
	///
	/// A matching magic with a non-binary marker yields [`RbxError::NotBinaryFormat`]
	/// so the caller can route the input to a markup-variant decoder.
	pub fn parse(reader: &mut ByteReader) -> Result<Self> {
		let raw = reader.read_exact(8)?;
		if raw != MAGIC {
			let mut magic = [0_u8; 8];
			magic.copy_from_slice(raw);
			return Err(RbxError::UnknownMagic { magic });
		}

		let marker = reader.read_u8()?;
		if marker != BINARY_MARKER {
			return Err(RbxError::NotBinaryFormat { marker });
		}

		let version = reader.read_u16_le()?;

		let class_count = reader.read_i32_le()?;
		if class_count < 0 {
			return Err(RbxError::NegativeCount {
				field: "class",
				value: class_count,
			});
		}

		let instance_count = reader.read_i32_le()?;
		if instance_count < 0 {
			return Err(RbxError::NegativeCount {
				field: "instance",
				value: instance_count,
			});
		}

		let _ = reader.read_exact(8)?;

		Ok(Self {
			version,
			class_count,
			instance_count,
		})
	}
}

#[cfg(test)]
mod tests;

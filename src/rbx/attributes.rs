use crate::rbx::bytes::ByteReader;
use crate::rbx::prop::{CFrame, Color3, UDim, UDim2, Vector2, Vector3, rotation_from_id};
use crate::rbx::{RbxError, Result};

/// One keypoint of a numeric sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberKeypoint {
	/// Position along the sequence, 0..=1.
	pub time: f32,
	/// Value at this keypoint.
	pub value: f32,
	/// Random deviation envelope.
	pub envelope: f32,
}

/// One keypoint of a color sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorKeypoint {
	/// Position along the sequence, 0..=1.
	pub time: f32,
	/// Color at this keypoint.
	pub color: Color3,
	/// Random deviation envelope.
	pub envelope: f32,
}

/// Closed set of attribute value kinds.
///
/// Scalars in this nested format are plain little-endian, never interleaved;
/// interleaving is a property-column concern only.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
	/// Boolean flag.
	Bool(bool),
	/// Raw binary string.
	BinaryString(Vec<u8>),
	/// 64-bit float.
	Float64(f64),
	/// Single scale/offset pair.
	UDim(UDim),
	/// Two-axis scale/offset pair.
	UDim2(UDim2),
	/// Palette color index.
	BrickColor(u32),
	/// RGB color.
	Color3(Color3),
	/// Two-component vector.
	Vector2(Vector2),
	/// Three-component vector.
	Vector3(Vector3),
	/// Pose/transform composite.
	CFrame(CFrame),
	/// Numeric sequence keypoints.
	NumberSequence(Vec<NumberKeypoint>),
	/// Color sequence keypoints.
	ColorSequence(Vec<ColorKeypoint>),
	/// Numeric min/max range.
	NumberRange {
		/// Lower bound.
		min: f32,
		/// Upper bound.
		max: f32,
	},
	/// Rectangle as two corner vectors.
	Rect {
		/// Minimum corner.
		min: Vector2,
		/// Maximum corner.
		max: Vector2,
	},
}

/// Decode a raw attribute blob into an ordered name/value list.
///
/// An empty blob is a valid empty attribute set.
pub fn decode(blob: &[u8]) -> Result<Vec<(Box<str>, AttributeValue)>> {
	if blob.is_empty() {
		return Ok(Vec::new());
	}

	let mut reader = ByteReader::new(blob);
	let count = reader.read_u32_le()?;
	// The count is untrusted; capacity is capped by the bytes that exist.
	let mut out = Vec::with_capacity((count as usize).min(reader.remaining()));
	for _ in 0..count {
		let name = reader.read_string()?;
		let type_id = reader.read_u8()?;
		let value = decode_value(&mut reader, &name, type_id)?;
		out.push((name, value));
	}
	Ok(out)
}

fn decode_value(reader: &mut ByteReader, name: &str, type_id: u8) -> Result<AttributeValue> {
	Ok(match type_id {
		0x03 => AttributeValue::Bool(reader.read_u8()? != 0),
		0x05 => AttributeValue::BinaryString(reader.read_len_bytes()?.to_vec()),
		0x06 => AttributeValue::Float64(reader.read_f64_le()?),
		0x09 => AttributeValue::UDim(read_udim(reader)?),
		0x0A => AttributeValue::UDim2(UDim2 {
			x: read_udim(reader)?,
			y: read_udim(reader)?,
		}),
		0x0E => AttributeValue::BrickColor(reader.read_u32_le()?),
		0x0F => AttributeValue::Color3(read_color3(reader)?),
		0x10 => AttributeValue::Vector2(read_vector2(reader)?),
		0x11 => AttributeValue::Vector3(read_vector3(reader)?),
		0x14 => {
			let position = read_vector3(reader)?;
			let id = reader.read_u8()?;
			let rotation = if id == 0 {
				let mut matrix = [0.0_f32; 9];
				for cell in &mut matrix {
					*cell = reader.read_f32_le()?;
				}
				matrix
			} else {
				rotation_from_id(id)?
			};
			AttributeValue::CFrame(CFrame { position, rotation })
		}
		0x17 => {
			let count = reader.read_u32_le()?;
			let mut keypoints = Vec::with_capacity((count as usize).min(reader.remaining()));
			for _ in 0..count {
				keypoints.push(NumberKeypoint {
					time: reader.read_f32_le()?,
					value: reader.read_f32_le()?,
					envelope: reader.read_f32_le()?,
				});
			}
			AttributeValue::NumberSequence(keypoints)
		}
		0x19 => {
			let count = reader.read_u32_le()?;
			let mut keypoints = Vec::with_capacity((count as usize).min(reader.remaining()));
			for _ in 0..count {
				keypoints.push(ColorKeypoint {
					time: reader.read_f32_le()?,
					color: read_color3(reader)?,
					envelope: reader.read_f32_le()?,
				});
			}
			AttributeValue::ColorSequence(keypoints)
		}
		0x1B => AttributeValue::NumberRange {
			min: reader.read_f32_le()?,
			max: reader.read_f32_le()?,
		},
		0x1C => AttributeValue::Rect {
			min: read_vector2(reader)?,
			max: read_vector2(reader)?,
		},
		_ => {
			return Err(RbxError::UnknownAttributeType {
				name: name.to_owned(),
				type_id,
			});
		}
	})
}

fn read_udim(reader: &mut ByteReader) -> Result<UDim> {
	Ok(UDim {
		scale: reader.read_f32_le()?,
		offset: reader.read_i32_le()?,
	})
}

fn read_vector2(reader: &mut ByteReader) -> Result<Vector2> {
	Ok(Vector2 {
		x: reader.read_f32_le()?,
		y: reader.read_f32_le()?,
	})
}

fn read_vector3(reader: &mut ByteReader) -> Result<Vector3> {
	Ok(Vector3 {
		x: reader.read_f32_le()?,
		y: reader.read_f32_le()?,
		z: reader.read_f32_le()?,
	})
}

fn read_color3(reader: &mut ByteReader) -> Result<Color3> {
	Ok(Color3 {
		r: reader.read_f32_le()?,
		g: reader.read_f32_le()?,
		b: reader.read_f32_le()?,
	})
}

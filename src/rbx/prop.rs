use std::sync::Arc;

use crate::rbx::bytes::{ByteReader, decode_f64, decode_rbx_f32};
use crate::rbx::instance::InstanceId;
use crate::rbx::{RbxError, Result};

/// Closed enumeration of property type tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
	/// Length-prefixed byte string.
	String,
	/// One byte per value.
	Bool,
	/// Interleaved zigzag `i32`.
	Int32,
	/// Interleaved format-native float.
	Float32,
	/// Interleaved standard double.
	Float64,
	/// Scale/offset pair.
	UDim,
	/// Two-axis scale/offset pair.
	UDim2,
	/// RGB color, three native-float columns.
	Color3,
	/// Two-component vector.
	Vector2,
	/// Three-component vector.
	Vector3,
	/// Rotation/position composite.
	CFrame,
	/// Interleaved `u32`, no zigzag.
	Enum,
	/// Instance reference, zigzag-delta referent column.
	Ref,
	/// Index into the shared string table.
	SharedString,
}

impl PropertyType {
	/// Map a raw tag byte onto the closed set.
	pub fn from_tag(tag: u8) -> Option<Self> {
		Some(match tag {
			0x01 => Self::String,
			0x02 => Self::Bool,
			0x03 => Self::Int32,
			0x04 => Self::Float32,
			0x05 => Self::Float64,
			0x06 => Self::UDim,
			0x07 => Self::UDim2,
			0x0C => Self::Color3,
			0x0D => Self::Vector2,
			0x0E => Self::Vector3,
			0x10 => Self::CFrame,
			0x12 => Self::Enum,
			0x13 => Self::Ref,
			0x1A => Self::SharedString,
			_ => return None,
		})
	}

	/// Return the wire tag byte.
	pub fn tag(self) -> u8 {
		match self {
			Self::String => 0x01,
			Self::Bool => 0x02,
			Self::Int32 => 0x03,
			Self::Float32 => 0x04,
			Self::Float64 => 0x05,
			Self::UDim => 0x06,
			Self::UDim2 => 0x07,
			Self::Color3 => 0x0C,
			Self::Vector2 => 0x0D,
			Self::Vector3 => 0x0E,
			Self::CFrame => 0x10,
			Self::Enum => 0x12,
			Self::Ref => 0x13,
			Self::SharedString => 0x1A,
		}
	}

	/// Render the type as a stable label.
	pub fn label(self) -> &'static str {
		match self {
			Self::String => "String",
			Self::Bool => "Bool",
			Self::Int32 => "Int32",
			Self::Float32 => "Float32",
			Self::Float64 => "Float64",
			Self::UDim => "UDim",
			Self::UDim2 => "UDim2",
			Self::Color3 => "Color3",
			Self::Vector2 => "Vector2",
			Self::Vector3 => "Vector3",
			Self::CFrame => "CFrame",
			Self::Enum => "Enum",
			Self::Ref => "Ref",
			Self::SharedString => "SharedString",
		}
	}
}

/// Two-component vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector2 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
}

/// Three-component vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vector3 {
	/// X component.
	pub x: f32,
	/// Y component.
	pub y: f32,
	/// Z component.
	pub z: f32,
}

/// RGB color with unit-range components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color3 {
	/// Red component.
	pub r: f32,
	/// Green component.
	pub g: f32,
	/// Blue component.
	pub b: f32,
}

/// Scale/offset pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UDim {
	/// Relative scale.
	pub scale: f32,
	/// Absolute pixel offset.
	pub offset: i32,
}

/// Two-axis scale/offset pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UDim2 {
	/// Horizontal axis.
	pub x: UDim,
	/// Vertical axis.
	pub y: UDim,
}

/// Rotation/position composite; rotation is a row-major 3x3 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CFrame {
	/// Translation component.
	pub position: Vector3,
	/// Row-major rotation matrix.
	pub rotation: [f32; 9],
}

/// One decoded, fully typed property value.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
	/// Raw string bytes; not guaranteed UTF-8.
	String(Vec<u8>),
	/// Boolean flag.
	Bool(bool),
	/// Signed integer.
	Int32(i32),
	/// Format-native single.
	Float32(f32),
	/// Standard double.
	Float64(f64),
	/// Scale/offset pair.
	UDim(UDim),
	/// Two-axis scale/offset pair.
	UDim2(UDim2),
	/// RGB color.
	Color3(Color3),
	/// Two-component vector.
	Vector2(Vector2),
	/// Three-component vector.
	Vector3(Vector3),
	/// Rotation/position composite.
	CFrame(CFrame),
	/// Enumeration ordinal.
	Enum(u32),
	/// Reference to another instance; `None` is the no-value sentinel.
	Ref(Option<InstanceId>),
	/// Shared string content, resolved against the table after the stream.
	SharedString(Arc<[u8]>),
}

/// Output of one property column decode.
///
/// Shared strings and instance references come back as raw indices/ids; their
/// targets may not exist yet while the chunk stream is still running, so the
/// parser records them as pending and resolves them in the final pass.
#[derive(Debug)]
pub enum PropertyColumn {
	/// Fully decoded values, one per instance.
	Values(Vec<PropertyValue>),
	/// Shared-string table indices awaiting resolution.
	SharedStrings(Vec<u32>),
	/// Referent ids awaiting resolution.
	Refs(Vec<i32>),
}

/// Decode a column of `count` values of type `ty` from a property payload.
pub fn decode_column(reader: &mut ByteReader, ty: PropertyType, count: usize) -> Result<PropertyColumn> {
	let values = match ty {
		PropertyType::String => {
			let mut out = Vec::with_capacity(count);
			for _ in 0..count {
				out.push(PropertyValue::String(reader.read_len_bytes()?.to_vec()));
			}
			out
		}
		PropertyType::Bool => {
			let mut out = Vec::with_capacity(count);
			for _ in 0..count {
				out.push(PropertyValue::Bool(reader.read_u8()? != 0));
			}
			out
		}
		PropertyType::Int32 => read_interleaved_i32(reader, count)?.into_iter().map(PropertyValue::Int32).collect(),
		PropertyType::Float32 => read_interleaved_rbx_f32(reader, count)?
			.into_iter()
			.map(PropertyValue::Float32)
			.collect(),
		PropertyType::Float64 => read_interleaved_u64(reader, count)?
			.into_iter()
			.map(|bits| PropertyValue::Float64(decode_f64(bits)))
			.collect(),
		PropertyType::UDim => {
			let scales = read_interleaved_rbx_f32(reader, count)?;
			let offsets = read_interleaved_i32(reader, count)?;
			zip2(scales, offsets, |scale, offset| PropertyValue::UDim(UDim { scale, offset }))
		}
		PropertyType::UDim2 => {
			let scale_x = read_interleaved_rbx_f32(reader, count)?;
			let scale_y = read_interleaved_rbx_f32(reader, count)?;
			let offset_x = read_interleaved_i32(reader, count)?;
			let offset_y = read_interleaved_i32(reader, count)?;
			let mut out = Vec::with_capacity(count);
			for i in 0..count {
				out.push(PropertyValue::UDim2(UDim2 {
					x: UDim {
						scale: scale_x[i],
						offset: offset_x[i],
					},
					y: UDim {
						scale: scale_y[i],
						offset: offset_y[i],
					},
				}));
			}
			out
		}
		PropertyType::Color3 => {
			let r = read_interleaved_rbx_f32(reader, count)?;
			let g = read_interleaved_rbx_f32(reader, count)?;
			let b = read_interleaved_rbx_f32(reader, count)?;
			let mut out = Vec::with_capacity(count);
			for i in 0..count {
				out.push(PropertyValue::Color3(Color3 {
					r: r[i],
					g: g[i],
					b: b[i],
				}));
			}
			out
		}
		PropertyType::Vector2 => {
			let x = read_interleaved_rbx_f32(reader, count)?;
			let y = read_interleaved_rbx_f32(reader, count)?;
			zip2(x, y, |x, y| PropertyValue::Vector2(Vector2 { x, y }))
		}
		PropertyType::Vector3 => read_vector3_columns(reader, count)?
			.into_iter()
			.map(PropertyValue::Vector3)
			.collect(),
		PropertyType::CFrame => {
			let mut rotations = Vec::with_capacity(count);
			for _ in 0..count {
				let id = reader.read_u8()?;
				if id == 0 {
					let mut matrix = [0.0_f32; 9];
					for cell in &mut matrix {
						*cell = reader.read_f32_le()?;
					}
					rotations.push(matrix);
				} else {
					rotations.push(rotation_from_id(id)?);
				}
			}
			let positions = read_vector3_columns(reader, count)?;
			let mut out = Vec::with_capacity(count);
			for (rotation, position) in rotations.into_iter().zip(positions) {
				out.push(PropertyValue::CFrame(CFrame { position, rotation }));
			}
			out
		}
		PropertyType::Enum => read_interleaved_u32(reader, count)?.into_iter().map(PropertyValue::Enum).collect(),
		PropertyType::Ref => return Ok(PropertyColumn::Refs(read_referents(reader, count)?)),
		PropertyType::SharedString => {
			let mut out = Vec::with_capacity(count);
			for _ in 0..count {
				out.push(reader.read_u32_le()?);
			}
			return Ok(PropertyColumn::SharedStrings(out));
		}
	};

	Ok(PropertyColumn::Values(values))
}

/// De-interleave a column of `count` 32-bit words, most significant plane first.
pub fn read_interleaved_u32(reader: &mut ByteReader, count: usize) -> Result<Vec<u32>> {
	let bytes = reader.read_exact(count.saturating_mul(4))?;
	let mut out = Vec::with_capacity(count);
	for i in 0..count {
		out.push(
			u32::from(bytes[i]) << 24
				| u32::from(bytes[i + count]) << 16
				| u32::from(bytes[i + count * 2]) << 8
				| u32::from(bytes[i + count * 3]),
		);
	}
	Ok(out)
}

/// De-interleave a column of 64-bit words, eight byte planes.
pub fn read_interleaved_u64(reader: &mut ByteReader, count: usize) -> Result<Vec<u64>> {
	let bytes = reader.read_exact(count.saturating_mul(8))?;
	let mut out = Vec::with_capacity(count);
	for i in 0..count {
		let mut word = 0_u64;
		for plane in 0..8 {
			word = word << 8 | u64::from(bytes[i + count * plane]);
		}
		out.push(word);
	}
	Ok(out)
}

/// De-interleave and zigzag-decode a column of signed 32-bit values.
pub fn read_interleaved_i32(reader: &mut ByteReader, count: usize) -> Result<Vec<i32>> {
	Ok(read_interleaved_u32(reader, count)?.into_iter().map(decode_zigzag32).collect())
}

/// De-interleave a column of format-native floats.
pub fn read_interleaved_rbx_f32(reader: &mut ByteReader, count: usize) -> Result<Vec<f32>> {
	Ok(read_interleaved_u32(reader, count)?.into_iter().map(decode_rbx_f32).collect())
}

/// Decode a referent-id column: interleaved, zigzag, delta-from-previous.
///
/// The accumulator starts at zero for every column.
pub fn read_referents(reader: &mut ByteReader, count: usize) -> Result<Vec<i32>> {
	let deltas = read_interleaved_i32(reader, count)?;
	let mut out = Vec::with_capacity(count);
	let mut previous = 0_i32;
	for delta in deltas {
		previous = previous.wrapping_add(delta);
		out.push(previous);
	}
	Ok(out)
}

/// Map an unsigned zigzag word back to its signed value.
pub fn decode_zigzag32(value: u32) -> i32 {
	((value >> 1) as i32) ^ -((value & 1) as i32)
}

fn read_vector3_columns(reader: &mut ByteReader, count: usize) -> Result<Vec<Vector3>> {
	let x = read_interleaved_rbx_f32(reader, count)?;
	let y = read_interleaved_rbx_f32(reader, count)?;
	let z = read_interleaved_rbx_f32(reader, count)?;
	let mut out = Vec::with_capacity(count);
	for i in 0..count {
		out.push(Vector3 {
			x: x[i],
			y: y[i],
			z: z[i],
		});
	}
	Ok(out)
}

fn zip2<A, B>(left: Vec<A>, right: Vec<B>, mut make: impl FnMut(A, B) -> PropertyValue) -> Vec<PropertyValue> {
	left.into_iter().zip(right).map(|(a, b)| make(a, b)).collect()
}

/// Reconstruct a canonical axis-aligned rotation matrix from its id byte.
///
/// Ids 1..=36 encode a (right, up) axis pair; the third column is their
/// cross product. Id 0 never reaches here, it selects an inline matrix.
pub fn rotation_from_id(id: u8) -> Result<[f32; 9]> {
	let orient = u32::from(id).wrapping_sub(1);
	if orient >= 36 {
		return Err(RbxError::UnknownRotationId { id });
	}

	let right = axis_vector(orient / 6);
	let up = axis_vector(orient % 6);
	if orient / 6 % 3 == orient % 6 % 3 {
		return Err(RbxError::UnknownRotationId { id });
	}
	let back = cross(right, up);

	Ok([
		right[0], up[0], back[0], right[1], up[1], back[1], right[2], up[2], back[2],
	])
}

fn axis_vector(n: u32) -> [f32; 3] {
	let mut out = [0.0_f32; 3];
	out[(n % 3) as usize] = if n < 3 { 1.0 } else { -1.0 };
	out
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
	[
		a[1] * b[2] - a[2] * b[1],
		a[2] * b[0] - a[0] * b[2],
		a[0] * b[1] - a[1] * b[0],
	]
}

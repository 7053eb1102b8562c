mod attributes;
mod bytes;
mod chunk;
mod error;
mod file;
mod header;
mod instance;
mod lz4;
mod prop;
mod sstr;

/// Attribute blob sub-decoder types and entry point.
pub use attributes::{AttributeValue, ColorKeypoint, NumberKeypoint, decode as decode_attributes};
/// Byte cursor and bit-exact numeric decoders.
pub use bytes::{ByteReader, decode_f32, decode_f64, decode_rbx_f32};
/// Chunk framing types and statistics scan.
pub use chunk::{ChunkHeader, ChunkStats, ChunkTag, read_chunk, scan_chunk_stats, tag_label};
/// Error and result aliases.
pub use error::{RbxError, Result};
/// Parsed file abstraction.
pub use file::ModelFile;
/// File header representation and signature constants.
pub use header::{BINARY_MARKER, FileHeader, MAGIC};
/// Instance tree types.
pub use instance::{Instance, InstanceId, Model, Property};
/// Embedded block decompressor.
pub use lz4::decompress;
/// Property type tags, values, and column decoders.
pub use prop::{
	CFrame, Color3, PropertyColumn, PropertyType, PropertyValue, UDim, UDim2, Vector2, Vector3, decode_column,
	decode_zigzag32, read_interleaved_i32, read_interleaved_rbx_f32, read_interleaved_u32, read_interleaved_u64,
	read_referents, rotation_from_id,
};
/// Shared string side table.
pub use sstr::{SharedStringEntry, SharedStringTable};

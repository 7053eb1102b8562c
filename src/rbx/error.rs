use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, RbxError>;

/// Errors produced while decoding binary model/place data.
#[derive(Debug, Error)]
pub enum RbxError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Leading file magic did not match the container signature.
	#[error("not a model/place file (magic={magic:?})")]
	UnknownMagic {
		/// First 8 bytes of the stream.
		magic: [u8; 8],
	},
	/// Signature matched but the format marker selects a non-binary sub-format.
	#[error("not the binary sub-format (marker=0x{marker:02x}); input is likely the markup variant")]
	NotBinaryFormat {
		/// Format marker byte at offset 8.
		marker: u8,
	},
	/// Not enough bytes remained for a requested read.
	#[error("unexpected eof at offset {at}, need {need} bytes, remaining {rem}")]
	UnexpectedEof {
		/// Byte offset where the read was attempted.
		at: usize,
		/// Requested bytes.
		need: usize,
		/// Bytes still available.
		rem: usize,
	},
	/// Header declared a negative count field.
	#[error("negative {field} count {value} in header")]
	NegativeCount {
		/// Logical name of the count field.
		field: &'static str,
		/// Parsed signed value.
		value: i32,
	},
	/// Chunk payload length exceeds remaining file data.
	#[error("chunk {tag} truncated: need {need} bytes, remaining {rem}")]
	TruncatedChunk {
		/// Printable chunk tag.
		tag: String,
		/// Declared payload length.
		need: usize,
		/// Remaining bytes in the stream.
		rem: usize,
	},
	/// Decompressor consumed or produced a byte count different from declared.
	#[error("lz4 {kind} size mismatch: declared {declared}, actual {actual}")]
	DecompressionMismatch {
		/// Which side mismatched, `"input"` or `"output"`.
		kind: &'static str,
		/// Declared byte count.
		declared: usize,
		/// Actual byte count consumed or produced.
		actual: usize,
	},
	/// Match back-distance points before the start of the output block.
	#[error("lz4 back-reference out of range: distance={distance}, produced={produced}")]
	DecompressionBadBackref {
		/// Declared back-distance.
		distance: usize,
		/// Bytes produced so far.
		produced: usize,
	},
	/// Property type tag outside the closed enumeration.
	#[error("unknown property type 0x{tag:02x} for {class}.{prop}")]
	UnknownPropertyType {
		/// Offending type tag byte.
		tag: u8,
		/// Class name from the property chunk.
		class: String,
		/// Property name from the property chunk.
		prop: String,
	},
	/// Property chunk referenced a class with no declaration chunk.
	#[error("property chunk for undeclared class {class}")]
	UndeclaredClass {
		/// Class name from the property chunk.
		class: String,
	},
	/// Referent id declared more than once within one file.
	#[error("duplicate referent id {id}")]
	DuplicateReferent {
		/// Offending referent id.
		id: i32,
	},
	/// Referent id with no matching skeleton instance.
	#[error("unresolved referent id {id}")]
	UnknownReferent {
		/// Offending referent id.
		id: i32,
	},
	/// Shared-string index past the end of the table.
	#[error("shared string index {index} out of range (table has {len} entries)")]
	SharedStringOutOfRange {
		/// Offending table index.
		index: u32,
		/// Number of table entries.
		len: usize,
	},
	/// Buffer exhausted before the terminal chunk.
	#[error("missing terminal chunk")]
	MissingTerminalChunk,
	/// Property name re-declared with a different type tag on one instance.
	#[error("property type conflict on {name}: {expected} != {got}")]
	PropertyTypeConflict {
		/// Property name.
		name: String,
		/// Type recorded on first assignment.
		expected: &'static str,
		/// Conflicting type of the new assignment.
		got: &'static str,
	},
	/// Rotation id outside the canonical orientation set.
	#[error("unknown rotation id {id}")]
	UnknownRotationId {
		/// Offending rotation id byte.
		id: u8,
	},
	/// Attribute entry carried a type id outside the closed set.
	#[error("unknown attribute type 0x{type_id:02x} for {name}")]
	UnknownAttributeType {
		/// Attribute name.
		name: String,
		/// Offending type id byte.
		type_id: u8,
	},
	/// CLI instance selector matched nothing.
	#[error("instance not found: {selector}")]
	InstanceNotFound {
		/// User-provided selector string.
		selector: String,
	},
}

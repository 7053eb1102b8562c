use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::rbx::bytes::ByteReader;
use crate::rbx::chunk::{ChunkTag, read_chunk, tag_label};
use crate::rbx::header::FileHeader;
use crate::rbx::instance::{InstanceId, Model};
use crate::rbx::prop::{PropertyColumn, PropertyType, PropertyValue, decode_column, read_referents};
use crate::rbx::sstr::SharedStringTable;
use crate::rbx::{RbxError, Result};

/// A fully parsed model/place file.
///
/// Parsing is atomic: either every chunk decoded and every reference
/// resolved, or an error and nothing.
#[derive(Debug)]
pub struct ModelFile {
	/// Fixed header fields.
	pub header: FileHeader,
	/// The reconstructed instance tree.
	pub model: Model,
	/// Shared string side table.
	pub shared_strings: SharedStringTable,
	/// Metadata key/value side map in chunk order.
	pub meta: Vec<(Box<str>, Box<str>)>,
}

impl ModelFile {
	/// Read and parse a file from disk.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let raw = fs::read(path)?;
		Self::parse(&raw)
	}

	/// Parse a complete in-memory buffer.
	pub fn parse(bytes: impl AsRef<[u8]>) -> Result<Self> {
		let mut reader = ByteReader::new(bytes);
		let header = FileHeader::parse(&mut reader)?;
		Parser::new(header).run(&mut reader)
	}
}

struct ClassBucket {
	referents: Vec<i32>,
}

/// Streaming state for one parse.
///
/// The chunk stream is column-oriented and full of forward references, so
/// the parser accumulates skeletons, pending reference slots, and raw parent
/// links first, then resolves everything once the terminal chunk is seen.
struct Parser {
	header: FileHeader,
	model: Model,
	by_referent: HashMap<i32, InstanceId>,
	buckets: HashMap<Box<str>, ClassBucket>,
	shared_strings: SharedStringTable,
	meta: Vec<(Box<str>, Box<str>)>,
	pending_shared: Vec<(InstanceId, usize, u32)>,
	pending_refs: Vec<(InstanceId, usize, i32)>,
	links: Vec<(i32, i32)>,
}

impl Parser {
	fn new(header: FileHeader) -> Self {
		Self {
			header,
			model: Model::new(),
			by_referent: HashMap::new(),
			buckets: HashMap::new(),
			shared_strings: SharedStringTable::new(),
			meta: Vec::new(),
			pending_shared: Vec::new(),
			pending_refs: Vec::new(),
			links: Vec::new(),
		}
	}

	fn run(mut self, reader: &mut ByteReader) -> Result<ModelFile> {
		let mut scratch = Vec::new();

		loop {
			if reader.remaining() == 0 {
				return Err(RbxError::MissingTerminalChunk);
			}

			let chunk = read_chunk(reader, &mut scratch)?;
			let mut payload = ByteReader::new(&scratch[..chunk.decompressed_len]);

			match chunk.tag {
				ChunkTag::Instance => self.read_class_chunk(&mut payload)?,
				ChunkTag::Property => self.read_property_chunk(&mut payload)?,
				ChunkTag::Parent => self.read_parent_chunk(&mut payload)?,
				ChunkTag::SharedStrings => self.read_shared_string_chunk(&mut payload)?,
				ChunkTag::Meta => self.read_meta_chunk(&mut payload)?,
				ChunkTag::End => break,
				ChunkTag::Unknown(raw) => {
					tracing::warn!(tag = %tag_label(raw), len = chunk.decompressed_len, "skipping unknown chunk");
				}
			}
		}

		self.resolve()
	}

	/// `INST`: declare a class and its skeleton instances.
	fn read_class_chunk(&mut self, payload: &mut ByteReader) -> Result<()> {
		let class_name = payload.read_string()?;
		let is_service = payload.read_u8()? != 0;
		let count = payload.read_u32_le()? as usize;
		let referents = read_referents(payload, count)?;

		for referent in &referents {
			let id = self.model.new_instance(&class_name, is_service);
			if self.by_referent.insert(*referent, id).is_some() {
				return Err(RbxError::DuplicateReferent { id: *referent });
			}
		}

		self.buckets
			.entry(class_name)
			.or_insert_with(|| ClassBucket { referents: Vec::new() })
			.referents
			.extend(referents);
		Ok(())
	}

	/// `PROP`: one property column for every instance of a class.
	fn read_property_chunk(&mut self, payload: &mut ByteReader) -> Result<()> {
		let class_name = payload.read_string()?;
		let prop_name = payload.read_string()?;
		let tag = payload.read_u8()?;

		let bucket = self.buckets.get(&class_name).ok_or_else(|| RbxError::UndeclaredClass {
			class: class_name.to_string(),
		})?;
		let ty = PropertyType::from_tag(tag).ok_or_else(|| RbxError::UnknownPropertyType {
			tag,
			class: class_name.to_string(),
			prop: prop_name.to_string(),
		})?;

		let ids: Vec<InstanceId> = bucket.referents.iter().map(|referent| self.by_referent[referent]).collect();

		match decode_column(payload, ty, ids.len())? {
			PropertyColumn::Values(values) => {
				for (id, value) in ids.into_iter().zip(values) {
					self.model.set_property(id, &prop_name, ty, value)?;
				}
			}
			PropertyColumn::SharedStrings(indices) => {
				for (id, index) in ids.into_iter().zip(indices) {
					let slot = self
						.model
						.set_property(id, &prop_name, ty, PropertyValue::SharedString(Arc::from(&[][..])))?;
					self.pending_shared.push((id, slot, index));
				}
			}
			PropertyColumn::Refs(referents) => {
				for (id, referent) in ids.into_iter().zip(referents) {
					let slot = self.model.set_property(id, &prop_name, ty, PropertyValue::Ref(None))?;
					if referent != -1 {
						self.pending_refs.push((id, slot, referent));
					}
				}
			}
		}
		Ok(())
	}

	/// `PRNT`: raw (child, parent) id pairs, resolved after the stream.
	fn read_parent_chunk(&mut self, payload: &mut ByteReader) -> Result<()> {
		let _version = payload.read_u8()?;
		let count = payload.read_u32_le()? as usize;
		let children = read_referents(payload, count)?;
		let parents = read_referents(payload, count)?;
		self.links.extend(children.into_iter().zip(parents));
		Ok(())
	}

	/// `SSTR`: append hash + blob entries in table order.
	fn read_shared_string_chunk(&mut self, payload: &mut ByteReader) -> Result<()> {
		let count = payload.read_u32_le()?;
		for _ in 0..count {
			let mut hash = [0_u8; 16];
			hash.copy_from_slice(payload.read_exact(16)?);
			let data = payload.read_len_bytes()?.to_vec();
			self.shared_strings.push(hash, data);
		}
		Ok(())
	}

	/// `META`: key/value side map, no effect on tree shape.
	fn read_meta_chunk(&mut self, payload: &mut ByteReader) -> Result<()> {
		let count = payload.read_u32_le()?;
		for _ in 0..count {
			let key = payload.read_string()?;
			let value = payload.read_string()?;
			self.meta.push((key, value));
		}
		Ok(())
	}

	/// Second phase: patch deferred references, then build the tree.
	fn resolve(mut self) -> Result<ModelFile> {
		for (id, slot, index) in std::mem::take(&mut self.pending_shared) {
			let data = self.shared_strings.get(index).ok_or(RbxError::SharedStringOutOfRange {
				index,
				len: self.shared_strings.len(),
			})?;
			self.model.patch_property(id, slot, PropertyValue::SharedString(Arc::clone(data)));
		}

		for (id, slot, referent) in std::mem::take(&mut self.pending_refs) {
			let target = *self.by_referent.get(&referent).ok_or(RbxError::UnknownReferent { id: referent })?;
			self.model.patch_property(id, slot, PropertyValue::Ref(Some(target)));
		}

		let mut linked: HashSet<InstanceId> = HashSet::new();
		for (child_referent, parent_referent) in std::mem::take(&mut self.links) {
			let child = *self
				.by_referent
				.get(&child_referent)
				.ok_or(RbxError::UnknownReferent { id: child_referent })?;
			linked.insert(child);

			if parent_referent == -1 {
				self.model.set_parent(child, None);
			} else {
				let parent = *self
					.by_referent
					.get(&parent_referent)
					.ok_or(RbxError::UnknownReferent { id: parent_referent })?;
				self.model.set_parent(child, Some(parent));
			}
		}

		// Skeletons no parent-link pair mentions hang off the root.
		let unlinked: Vec<InstanceId> = self.model.instances().map(|(id, _)| id).filter(|id| !linked.contains(id)).collect();
		for id in unlinked {
			self.model.set_parent(id, None);
		}

		Ok(ModelFile {
			header: self.header,
			model: self.model,
			shared_strings: self.shared_strings,
			meta: self.meta,
		})
	}
}

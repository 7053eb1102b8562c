use std::sync::Arc;

/// One deduplicated string blob with its content hash.
#[derive(Debug, Clone)]
pub struct SharedStringEntry {
	/// 16-byte content hash as stored on the wire.
	pub hash: [u8; 16],
	/// Raw blob bytes; shared so every referencing property aliases one copy.
	pub data: Arc<[u8]>,
}

/// Side table of shared string blobs addressed by insertion index.
#[derive(Debug, Default)]
pub struct SharedStringTable {
	entries: Vec<SharedStringEntry>,
}

impl SharedStringTable {
	/// Create an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Return whether the table is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Append one entry; its index is the insertion order.
	pub fn push(&mut self, hash: [u8; 16], data: Vec<u8>) {
		self.entries.push(SharedStringEntry {
			hash,
			data: data.into(),
		});
	}

	/// Look up the blob for a table index.
	pub fn get(&self, index: u32) -> Option<&Arc<[u8]>> {
		self.entries.get(index as usize).map(|entry| &entry.data)
	}

	/// Iterate entries in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &SharedStringEntry> {
		self.entries.iter()
	}
}

use std::path::PathBuf;

use rbxdoc::rbx::{ModelFile, Result};

use crate::cmd::util::{byte_preview, emit_json, hash_hex};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// List the shared string table in insertion order.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = ModelFile::open(&path)?;

	if json {
		let entries: Vec<EntryJson> = file
			.shared_strings
			.iter()
			.enumerate()
			.map(|(index, entry)| EntryJson {
				index,
				len: entry.data.len(),
				hash: hash_hex(&entry.hash),
				preview: byte_preview(&entry.data, 48),
			})
			.collect();
		emit_json(&entries);
		return Ok(());
	}

	println!("shared_strings: {}", file.shared_strings.len());
	for (index, entry) in file.shared_strings.iter().enumerate() {
		println!(
			"  [{index}] len={} hash={} \"{}\"",
			entry.data.len(),
			hash_hex(&entry.hash),
			byte_preview(&entry.data, 48)
		);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct EntryJson {
	index: usize,
	len: usize,
	hash: String,
	preview: String,
}

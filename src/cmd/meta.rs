use std::path::PathBuf;

use rbxdoc::rbx::{ModelFile, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// List the metadata side map in chunk order.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let file = ModelFile::open(&path)?;

	if json {
		let entries: Vec<EntryJson> = file
			.meta
			.iter()
			.map(|(key, value)| EntryJson {
				key: key.to_string(),
				value: value.to_string(),
			})
			.collect();
		emit_json(&entries);
		return Ok(());
	}

	println!("meta_entries: {}", file.meta.len());
	for (key, value) in &file.meta {
		println!("  {key} = {value}");
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct EntryJson {
	key: String,
	value: String,
}

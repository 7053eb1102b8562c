use std::fs;
use std::path::PathBuf;

use rbxdoc::rbx::{ByteReader, FileHeader, ModelFile, Result, scan_chunk_stats, tag_label};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print high-level file and chunk statistics.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let raw = fs::read(&path)?;
	let mut reader = ByteReader::new(&raw);
	let header = FileHeader::parse(&mut reader)?;
	let stats = scan_chunk_stats(&mut reader)?;
	let file = ModelFile::parse(&raw)?;

	let mut entries: Vec<_> = stats.tags.into_iter().collect();
	entries.sort_by(|left, right| right.1.cmp(&left.1).then_with(|| left.0.cmp(&right.0)));

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			version: header.version,
			declared_classes: header.class_count,
			declared_instances: header.instance_count,
			parsed_instances: file.model.len(),
			root_children: file.model.root_children().len(),
			shared_strings: file.shared_strings.len(),
			meta_entries: file.meta.len(),
			chunk_count: stats.chunk_count,
			has_end: stats.has_end,
			last_tag: tag_label(stats.last_tag),
			tags: entries
				.iter()
				.map(|(tag, count)| TagCountJson {
					tag: tag_label(*tag),
					count: *count,
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("version: {}", header.version);
	println!("declared_classes: {}", header.class_count);
	println!("declared_instances: {}", header.instance_count);
	println!("parsed_instances: {}", file.model.len());
	println!("root_children: {}", file.model.root_children().len());
	println!("shared_strings: {}", file.shared_strings.len());
	println!("meta_entries: {}", file.meta.len());
	println!("chunk_count: {}", stats.chunk_count);
	println!("has_end: {}", stats.has_end);
	println!("last_tag: {}", tag_label(stats.last_tag));

	println!("tags:");
	for (tag, count) in entries {
		println!("  {}: {}", tag_label(tag), count);
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct TagCountJson {
	tag: String,
	count: u32,
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	version: u16,
	declared_classes: i32,
	declared_instances: i32,
	parsed_instances: usize,
	root_children: usize,
	shared_strings: usize,
	meta_entries: usize,
	chunk_count: u32,
	has_end: bool,
	last_tag: String,
	tags: Vec<TagCountJson>,
}

use std::path::PathBuf;

use rbxdoc::rbx::{ModelFile, Result};

use crate::cmd::util::{emit_json, find_instance, value_json, value_label};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Instance selector: a `/`-separated path from the root, or a bare
	/// name searched depth-first.
	pub selector: String,
	#[arg(long)]
	pub json: bool,
}

/// List every property of one instance.
pub fn run(args: Args) -> Result<()> {
	let Args { path, selector, json } = args;

	let file = ModelFile::open(&path)?;
	let id = find_instance(&file.model, &selector)?;
	let instance = file.model.get(id);

	if json {
		let payload = PropsJson {
			path: file.model.full_name(id),
			class: instance.class_name().to_owned(),
			is_service: instance.is_service(),
			properties: instance
				.properties()
				.iter()
				.map(|slot| PropertyJson {
					name: slot.name.to_string(),
					r#type: slot.ty.label(),
					value: value_json(&file.model, &slot.value),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", file.model.full_name(id));
	println!("class: {}", instance.class_name());
	println!("is_service: {}", instance.is_service());
	println!("properties:");
	for slot in instance.properties() {
		println!("  {} [{}] = {}", slot.name, slot.ty.label(), value_label(&file.model, &slot.value));
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct PropertyJson {
	name: String,
	r#type: &'static str,
	value: serde_json::Value,
}

#[derive(serde::Serialize)]
struct PropsJson {
	path: String,
	class: String,
	is_service: bool,
	properties: Vec<PropertyJson>,
}

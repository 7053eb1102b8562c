use std::path::PathBuf;

use rbxdoc::rbx::{InstanceId, Model, ModelFile, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub depth: Option<usize>,
	#[arg(long)]
	pub json: bool,
}

/// Render the instance hierarchy as an indented tree.
pub fn run(args: Args) -> Result<()> {
	let Args { path, depth, json } = args;

	let file = ModelFile::open(&path)?;
	let limit = depth.unwrap_or(usize::MAX);

	if json {
		let nodes: Vec<NodeJson> = file
			.model
			.root_children()
			.iter()
			.map(|id| collect_node(&file.model, *id, limit))
			.collect();
		emit_json(&nodes);
		return Ok(());
	}

	for id in file.model.root_children() {
		print_node(&file.model, *id, 0, limit);
	}
	Ok(())
}

fn print_node(model: &Model, id: InstanceId, indent: usize, limit: usize) {
	let instance = model.get(id);
	let marker = if instance.is_service() { " [service]" } else { "" };
	println!("{}{} ({}){}", "  ".repeat(indent), instance.name(), instance.class_name(), marker);

	if indent + 1 >= limit {
		if !instance.children().is_empty() {
			println!("{}...", "  ".repeat(indent + 1));
		}
		return;
	}
	for child in instance.children() {
		print_node(model, *child, indent + 1, limit);
	}
}

#[derive(serde::Serialize)]
struct NodeJson {
	name: String,
	class: String,
	is_service: bool,
	children: Vec<NodeJson>,
}

fn collect_node(model: &Model, id: InstanceId, limit: usize) -> NodeJson {
	let instance = model.get(id);
	let children = if limit <= 1 {
		Vec::new()
	} else {
		instance
			.children()
			.iter()
			.map(|child| collect_node(model, *child, limit - 1))
			.collect()
	};

	NodeJson {
		name: instance.name().to_owned(),
		class: instance.class_name().to_owned(),
		is_service: instance.is_service(),
		children,
	}
}

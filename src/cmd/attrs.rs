use std::path::PathBuf;

use rbxdoc::rbx::{AttributeValue, ModelFile, PropertyValue, Result, decode_attributes};

use crate::cmd::util::{byte_preview, emit_json, find_instance};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	/// Instance selector: a `/`-separated path from the root, or a bare
	/// name searched depth-first.
	pub selector: String,
	/// Property holding the attribute blob.
	#[arg(long, default_value = "AttributesSerialize")]
	pub prop: String,
	#[arg(long)]
	pub json: bool,
}

/// Decode and print an instance's attribute blob.
pub fn run(args: Args) -> Result<()> {
	let Args { path, selector, prop, json } = args;

	let file = ModelFile::open(&path)?;
	let id = find_instance(&file.model, &selector)?;
	let instance = file.model.get(id);

	// A missing blob property is an empty attribute set.
	let attributes = match instance.property(&prop) {
		Some(PropertyValue::String(bytes)) => decode_attributes(bytes)?,
		Some(PropertyValue::SharedString(data)) => decode_attributes(data)?,
		_ => Vec::new(),
	};

	if json {
		let payload = AttrsJson {
			path: file.model.full_name(id),
			attributes: attributes
				.iter()
				.map(|(name, value)| AttributeJson {
					name: name.to_string(),
					kind: kind_label(value),
					value: attribute_json(value),
				})
				.collect(),
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", file.model.full_name(id));
	println!("attributes: {}", attributes.len());
	for (name, value) in &attributes {
		println!("  {} [{}] = {}", name, kind_label(value), attribute_label(value));
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct AttributeJson {
	name: String,
	kind: &'static str,
	value: serde_json::Value,
}

#[derive(serde::Serialize)]
struct AttrsJson {
	path: String,
	attributes: Vec<AttributeJson>,
}

fn kind_label(value: &AttributeValue) -> &'static str {
	match value {
		AttributeValue::Bool(_) => "Bool",
		AttributeValue::BinaryString(_) => "BinaryString",
		AttributeValue::Float64(_) => "Float64",
		AttributeValue::UDim(_) => "UDim",
		AttributeValue::UDim2(_) => "UDim2",
		AttributeValue::BrickColor(_) => "BrickColor",
		AttributeValue::Color3(_) => "Color3",
		AttributeValue::Vector2(_) => "Vector2",
		AttributeValue::Vector3(_) => "Vector3",
		AttributeValue::CFrame(_) => "CFrame",
		AttributeValue::NumberSequence(_) => "NumberSequence",
		AttributeValue::ColorSequence(_) => "ColorSequence",
		AttributeValue::NumberRange { .. } => "NumberRange",
		AttributeValue::Rect { .. } => "Rect",
	}
}

fn attribute_label(value: &AttributeValue) -> String {
	match value {
		AttributeValue::Bool(flag) => flag.to_string(),
		AttributeValue::BinaryString(bytes) => format!("[{}] \"{}\"", bytes.len(), byte_preview(bytes, 48)),
		AttributeValue::Float64(number) => number.to_string(),
		AttributeValue::UDim(udim) => format!("({}, {})", udim.scale, udim.offset),
		AttributeValue::UDim2(udim2) => format!(
			"({}, {}, {}, {})",
			udim2.x.scale, udim2.x.offset, udim2.y.scale, udim2.y.offset
		),
		AttributeValue::BrickColor(number) => number.to_string(),
		AttributeValue::Color3(color) => format!("({}, {}, {})", color.r, color.g, color.b),
		AttributeValue::Vector2(vector) => format!("({}, {})", vector.x, vector.y),
		AttributeValue::Vector3(vector) => format!("({}, {}, {})", vector.x, vector.y, vector.z),
		AttributeValue::CFrame(cframe) => format!(
			"pos ({}, {}, {}) rot {:?}",
			cframe.position.x, cframe.position.y, cframe.position.z, cframe.rotation
		),
		AttributeValue::NumberSequence(keypoints) => format!("{} keypoints", keypoints.len()),
		AttributeValue::ColorSequence(keypoints) => format!("{} keypoints", keypoints.len()),
		AttributeValue::NumberRange { min, max } => format!("{min}..{max}"),
		AttributeValue::Rect { min, max } => format!("({}, {})..({}, {})", min.x, min.y, max.x, max.y),
	}
}

fn attribute_json(value: &AttributeValue) -> serde_json::Value {
	match value {
		AttributeValue::Bool(flag) => serde_json::json!(flag),
		AttributeValue::BinaryString(bytes) => serde_json::json!({
			"len": bytes.len(),
			"preview": byte_preview(bytes, 48),
		}),
		AttributeValue::Float64(number) => serde_json::json!(number),
		AttributeValue::UDim(udim) => serde_json::json!({ "scale": udim.scale, "offset": udim.offset }),
		AttributeValue::UDim2(udim2) => serde_json::json!({
			"x": { "scale": udim2.x.scale, "offset": udim2.x.offset },
			"y": { "scale": udim2.y.scale, "offset": udim2.y.offset },
		}),
		AttributeValue::BrickColor(number) => serde_json::json!(number),
		AttributeValue::Color3(color) => serde_json::json!({ "r": color.r, "g": color.g, "b": color.b }),
		AttributeValue::Vector2(vector) => serde_json::json!({ "x": vector.x, "y": vector.y }),
		AttributeValue::Vector3(vector) => serde_json::json!({ "x": vector.x, "y": vector.y, "z": vector.z }),
		AttributeValue::CFrame(cframe) => serde_json::json!({
			"position": { "x": cframe.position.x, "y": cframe.position.y, "z": cframe.position.z },
			"rotation": cframe.rotation,
		}),
		AttributeValue::NumberSequence(keypoints) => serde_json::json!(
			keypoints
				.iter()
				.map(|keypoint| serde_json::json!({
					"time": keypoint.time,
					"value": keypoint.value,
					"envelope": keypoint.envelope,
				}))
				.collect::<Vec<_>>()
		),
		AttributeValue::ColorSequence(keypoints) => serde_json::json!(
			keypoints
				.iter()
				.map(|keypoint| serde_json::json!({
					"time": keypoint.time,
					"color": { "r": keypoint.color.r, "g": keypoint.color.g, "b": keypoint.color.b },
					"envelope": keypoint.envelope,
				}))
				.collect::<Vec<_>>()
		),
		AttributeValue::NumberRange { min, max } => serde_json::json!({ "min": min, "max": max }),
		AttributeValue::Rect { min, max } => serde_json::json!({
			"min": { "x": min.x, "y": min.y },
			"max": { "x": max.x, "y": max.y },
		}),
	}
}

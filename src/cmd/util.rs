use rbxdoc::rbx::{InstanceId, Model, PropertyValue, RbxError, Result};

/// Print a serializable payload as pretty JSON on stdout.
pub(crate) fn emit_json(payload: &impl serde::Serialize) {
	match serde_json::to_string_pretty(payload) {
		Ok(text) => println!("{text}"),
		Err(err) => eprintln!("error: {err}"),
	}
}

/// Render a 16-byte hash as lowercase hex.
pub(crate) fn hash_hex(hash: &[u8; 16]) -> String {
	let mut out = String::with_capacity(32);
	for byte in hash {
		out.push_str(&format!("{byte:02x}"));
	}
	out
}

/// Render the printable prefix of a byte blob, `.` for non-printables.
pub(crate) fn byte_preview(data: &[u8], limit: usize) -> String {
	let mut out = String::new();
	for byte in data.iter().take(limit) {
		if byte.is_ascii_graphic() || *byte == b' ' {
			out.push(char::from(*byte));
		} else {
			out.push('.');
		}
	}
	if data.len() > limit {
		out.push_str("...");
	}
	out
}

/// Resolve an instance selector against the tree.
///
/// A selector with `/` separators walks named children down from the root;
/// a bare name searches the whole tree depth-first.
pub(crate) fn find_instance(model: &Model, selector: &str) -> Result<InstanceId> {
	let not_found = || RbxError::InstanceNotFound {
		selector: selector.to_owned(),
	};

	if !selector.contains('/') {
		return model.find_first_child(None, selector, true).ok_or_else(not_found);
	}

	let mut current = None;
	for segment in selector.split('/') {
		current = Some(model.find_first_child(current, segment, false).ok_or_else(not_found)?);
	}
	current.ok_or_else(not_found)
}

/// Render a property value as a one-line label.
pub(crate) fn value_label(model: &Model, value: &PropertyValue) -> String {
	match value {
		PropertyValue::String(bytes) => format!("\"{}\"", byte_preview(bytes, 64)),
		PropertyValue::Bool(flag) => flag.to_string(),
		PropertyValue::Int32(number) => number.to_string(),
		PropertyValue::Float32(number) => number.to_string(),
		PropertyValue::Float64(number) => number.to_string(),
		PropertyValue::UDim(udim) => format!("({}, {})", udim.scale, udim.offset),
		PropertyValue::UDim2(udim2) => format!(
			"({}, {}, {}, {})",
			udim2.x.scale, udim2.x.offset, udim2.y.scale, udim2.y.offset
		),
		PropertyValue::Color3(color) => format!("({}, {}, {})", color.r, color.g, color.b),
		PropertyValue::Vector2(vector) => format!("({}, {})", vector.x, vector.y),
		PropertyValue::Vector3(vector) => format!("({}, {}, {})", vector.x, vector.y, vector.z),
		PropertyValue::CFrame(cframe) => format!(
			"pos ({}, {}, {}) rot {:?}",
			cframe.position.x, cframe.position.y, cframe.position.z, cframe.rotation
		),
		PropertyValue::Enum(number) => number.to_string(),
		PropertyValue::Ref(None) => "nil".to_owned(),
		PropertyValue::Ref(Some(target)) => model.full_name(*target),
		PropertyValue::SharedString(data) => format!("shared[{}] \"{}\"", data.len(), byte_preview(data, 32)),
	}
}

/// Render a property value as a JSON value.
pub(crate) fn value_json(model: &Model, value: &PropertyValue) -> serde_json::Value {
	match value {
		PropertyValue::String(bytes) => serde_json::json!(String::from_utf8_lossy(bytes)),
		PropertyValue::Bool(flag) => serde_json::json!(flag),
		PropertyValue::Int32(number) => serde_json::json!(number),
		PropertyValue::Float32(number) => serde_json::json!(number),
		PropertyValue::Float64(number) => serde_json::json!(number),
		PropertyValue::UDim(udim) => serde_json::json!({ "scale": udim.scale, "offset": udim.offset }),
		PropertyValue::UDim2(udim2) => serde_json::json!({
			"x": { "scale": udim2.x.scale, "offset": udim2.x.offset },
			"y": { "scale": udim2.y.scale, "offset": udim2.y.offset },
		}),
		PropertyValue::Color3(color) => serde_json::json!({ "r": color.r, "g": color.g, "b": color.b }),
		PropertyValue::Vector2(vector) => serde_json::json!({ "x": vector.x, "y": vector.y }),
		PropertyValue::Vector3(vector) => serde_json::json!({ "x": vector.x, "y": vector.y, "z": vector.z }),
		PropertyValue::CFrame(cframe) => serde_json::json!({
			"position": { "x": cframe.position.x, "y": cframe.position.y, "z": cframe.position.z },
			"rotation": cframe.rotation,
		}),
		PropertyValue::Enum(number) => serde_json::json!(number),
		PropertyValue::Ref(None) => serde_json::Value::Null,
		PropertyValue::Ref(Some(target)) => serde_json::json!(model.full_name(*target)),
		PropertyValue::SharedString(data) => serde_json::json!({
			"len": data.len(),
			"preview": byte_preview(data, 32),
		}),
	}
}

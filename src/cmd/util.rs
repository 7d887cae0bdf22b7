use tracedoc::trace::Value;

/// Emit one pretty-printed JSON document on stdout.
pub(crate) fn emit_json(payload: &impl serde::Serialize) {
	println!("{}", serde_json::to_string_pretty(payload).expect("payload serializes"));
}

/// Render a decoded value tree as JSON.
pub(crate) fn value_to_json(value: &Value) -> serde_json::Value {
	match value {
		Value::Null => serde_json::Value::Null,
		Value::Bool(v) => serde_json::json!(v),
		Value::SInt(v) => serde_json::json!(v),
		Value::UInt(v) => serde_json::json!(v),
		Value::Float(v) => serde_json::json!(v),
		Value::String(v) => serde_json::json!(v.as_ref()),
		Value::Enum(sig) => serde_json::json!({
			"enum": sig.name.as_ref(),
			"value": sig.value,
		}),
		Value::Bitmask(_, bits) => serde_json::json!({
			"bitmask": value.to_string(),
			"value": bits,
		}),
		Value::Array(items) => serde_json::Value::Array(items.iter().map(value_to_json).collect()),
		Value::Struct(sig, members) => {
			let mut out = serde_json::Map::new();
			for (index, member) in members.iter().enumerate() {
				let name = sig
					.member_names
					.get(index)
					.map_or_else(|| index.to_string(), |name| name.to_string());
				out.insert(name, value_to_json(member));
			}
			serde_json::Value::Object(out)
		}
		Value::Blob(bytes) => serde_json::json!({ "blob": bytes.len() }),
		Value::Pointer(addr) => serde_json::json!(format!("0x{addr:x}")),
	}
}

use std::path::PathBuf;

use tracedoc::trace::{Call, Mode, Parser, Result};

use crate::cmd::util::{emit_json, value_to_json};

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub limit: Option<u64>,
	#[arg(long)]
	pub skeleton: bool,
	#[arg(long)]
	pub json: bool,
}

/// Print calls in leave order, one line per call.
pub fn run(args: Args) -> Result<()> {
	let Args {
		path,
		limit,
		skeleton,
		json,
	} = args;

	let mut parser = Parser::open(path)?;
	let mode = if skeleton { Mode::Skeleton } else { Mode::Full };
	let limit = limit.unwrap_or(u64::MAX);

	let mut calls = Vec::new();
	let mut printed = 0_u64;
	while printed < limit {
		let Some(call) = parser.parse_call(mode) else { break };
		printed += 1;
		if json {
			calls.push(call_json(&call));
		} else {
			println!("{}", render_call(&call));
		}
	}

	if json {
		emit_json(&DumpJson { calls });
	}

	Ok(())
}

fn render_call(call: &Call) -> String {
	let mut out = format!("{} {}(", call.no, call.name());
	for (index, slot) in call.args.iter().enumerate() {
		if index > 0 {
			out.push_str(", ");
		}
		match call.sig.arg_names.get(index) {
			Some(name) => out.push_str(&format!("{name} = ")),
			None => out.push_str(&format!("{index} = ")),
		}
		match slot {
			Some(value) => out.push_str(&value.to_string()),
			None => out.push('-'),
		}
	}
	out.push(')');
	if let Some(ret) = &call.ret {
		out.push_str(&format!(" = {ret}"));
	}
	out
}

fn call_json(call: &Call) -> CallJson {
	CallJson {
		no: call.no,
		name: call.name().to_owned(),
		args: call
			.args
			.iter()
			.enumerate()
			.map(|(index, slot)| ArgJson {
				name: call
					.sig
					.arg_names
					.get(index)
					.map_or_else(|| index.to_string(), |name| name.to_string()),
				value: slot.as_ref().map(value_to_json),
			})
			.collect(),
		ret: call.ret.as_ref().map(value_to_json),
	}
}

#[derive(serde::Serialize)]
struct DumpJson {
	calls: Vec<CallJson>,
}

#[derive(serde::Serialize)]
struct CallJson {
	no: u32,
	name: String,
	args: Vec<ArgJson>,
	ret: Option<serde_json::Value>,
}

#[derive(serde::Serialize)]
struct ArgJson {
	name: String,
	value: Option<serde_json::Value>,
}

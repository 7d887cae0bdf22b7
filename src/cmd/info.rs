use std::path::PathBuf;

use tracedoc::trace::{Mode, Parser, Result};

use crate::cmd::util::emit_json;

#[derive(clap::Args)]
pub struct Args {
	pub path: PathBuf,
	#[arg(long)]
	pub json: bool,
}

/// Print container, version, and call statistics for a trace.
pub fn run(args: Args) -> Result<()> {
	let Args { path, json } = args;

	let mut parser = Parser::open(&path)?;
	let container = parser.container();
	let version = parser.version();

	let mut call_count = 0_u64;
	let mut last_call_no = None;
	while let Some(call) = parser.parse_call(Mode::Skeleton) {
		call_count += 1;
		last_call_no = Some(call.no);
	}

	if json {
		let payload = InfoJson {
			path: path.display().to_string(),
			container: container.as_str(),
			version,
			call_count,
			last_call_no,
		};
		emit_json(&payload);
		return Ok(());
	}

	println!("path: {}", path.display());
	println!("container: {}", container.as_str());
	println!("version: {version}");
	println!("call_count: {call_count}");
	match last_call_no {
		Some(no) => println!("last_call_no: {no}"),
		None => println!("last_call_no: -"),
	}

	Ok(())
}

#[derive(serde::Serialize)]
struct InfoJson {
	path: String,
	container: &'static str,
	version: u32,
	call_count: u64,
	last_call_no: Option<u32>,
}

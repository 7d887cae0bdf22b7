//! Shared helpers for CLI integration tests: a minimal trace encoder and
//! binary invocation wrappers.
#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracedoc::trace::format::{CALL_ARG, CALL_END, CALL_RET, EVENT_ENTER, EVENT_LEAVE, TRACE_VERSION, TYPE_UINT};

pub struct TraceBuilder {
	buf: Vec<u8>,
}

impl TraceBuilder {
	pub fn new() -> Self {
		let mut builder = Self { buf: Vec::new() };
		builder.uint(u64::from(TRACE_VERSION));
		builder
	}

	pub fn uint(&mut self, mut value: u64) -> &mut Self {
		loop {
			let mut byte = (value & 0x7F) as u8;
			value >>= 7;
			if value != 0 {
				byte |= 0x80;
			}
			self.buf.push(byte);
			if value == 0 {
				break;
			}
		}
		self
	}

	pub fn string(&mut self, text: &str) -> &mut Self {
		self.uint(text.len() as u64);
		self.buf.extend_from_slice(text.as_bytes());
		self
	}

	pub fn enter_new_func(&mut self, id: u64, name: &str, arg_names: &[&str]) -> &mut Self {
		self.buf.push(EVENT_ENTER);
		self.uint(id).string(name).uint(arg_names.len() as u64);
		for arg in arg_names {
			self.string(arg);
		}
		self.buf.push(CALL_END);
		self
	}

	pub fn leave_with_uints(&mut self, call_no: u64, args: &[(u64, u64)], ret: Option<u64>) -> &mut Self {
		self.buf.push(EVENT_LEAVE);
		self.uint(call_no);
		for (index, value) in args {
			self.buf.push(CALL_ARG);
			self.uint(*index);
			self.buf.push(TYPE_UINT);
			self.uint(*value);
		}
		if let Some(value) = ret {
			self.buf.push(CALL_RET);
			self.buf.push(TYPE_UINT);
			self.uint(value);
		}
		self.buf.push(CALL_END);
		self
	}

	pub fn write_snappy(&self, dir: &Path, name: &str) -> PathBuf {
		let mut out = vec![b'a', b't'];
		let compressed = snap::raw::Encoder::new().compress_vec(&self.buf).expect("snappy chunk compresses");
		out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
		out.extend_from_slice(&compressed);

		let path = dir.join(name);
		std::fs::write(&path, out).expect("fixture writes");
		path
	}

	pub fn write_gzip(&self, dir: &Path, name: &str) -> PathBuf {
		let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
		encoder.write_all(&self.buf).expect("gzip body writes");
		let out = encoder.finish().expect("gzip stream finishes");

		let path = dir.join(name);
		std::fs::write(&path, out).expect("fixture writes");
		path
	}
}

pub fn run_tracedoc(args: &[&str]) -> Output {
	Command::new(env!("CARGO_BIN_EXE_tracedoc")).args(args).output().expect("tracedoc command executes")
}

pub fn run_tracedoc_json(args: &[&str]) -> serde_json::Value {
	let output = run_tracedoc(args);
	assert!(
		output.status.success(),
		"tracedoc command failed with status={}: {}",
		output.status,
		String::from_utf8_lossy(&output.stderr)
	);
	serde_json::from_slice(&output.stdout).expect("stdout should be valid json")
}

//! Synthetic trace encoding helpers for tests.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::trace::file::SNAPPY_MAGIC;
use crate::trace::format::{CALL_ARG, CALL_END, CALL_RET, EVENT_ENTER, EVENT_LEAVE, TYPE_UINT};
use crate::trace::snappy::CHUNK_SIZE;
use crate::trace::TraceFile;

/// Builds a trace body byte-by-byte, mirroring the recorder's encoding.
pub(crate) struct TraceWriter {
	buf: Vec<u8>,
}

impl TraceWriter {
	pub fn new(version: u64) -> Self {
		let mut writer = Self { buf: Vec::new() };
		writer.uint(version);
		writer
	}

	pub fn byte(&mut self, byte: u8) -> &mut Self {
		self.buf.push(byte);
		self
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

	pub fn raw(&mut self, bytes: &[u8]) -> &mut Self {
		self.buf.extend_from_slice(bytes);
		self
	}

	/// Enter event carrying a full function descriptor.
	pub fn enter_new_func(&mut self, id: u64, name: &str, arg_names: &[&str]) -> &mut Self {
		self.byte(EVENT_ENTER).uint(id).string(name).uint(arg_names.len() as u64);
		for arg in arg_names {
			self.string(arg);
		}
		self
	}

	/// Enter event citing an already-defined function id.
	pub fn enter_ref(&mut self, id: u64) -> &mut Self {
		self.byte(EVENT_ENTER).uint(id)
	}

	pub fn leave(&mut self, call_no: u64) -> &mut Self {
		self.byte(EVENT_LEAVE).uint(call_no)
	}

	pub fn end(&mut self) -> &mut Self {
		self.byte(CALL_END)
	}

	pub fn arg_uint(&mut self, index: u64, value: u64) -> &mut Self {
		self.byte(CALL_ARG).uint(index).byte(TYPE_UINT).uint(value)
	}

	/// Detail header for an argument; the caller appends the value bytes.
	pub fn arg_start(&mut self, index: u64) -> &mut Self {
		self.byte(CALL_ARG).uint(index)
	}

	pub fn ret_uint(&mut self, value: u64) -> &mut Self {
		self.byte(CALL_RET).byte(TYPE_UINT).uint(value)
	}

	pub fn ret_start(&mut self) -> &mut Self {
		self.byte(CALL_RET)
	}

	pub fn bytes(&self) -> &[u8] {
		&self.buf
	}
}

/// Encode one value as a LEB128 unsigned varint.
pub(crate) fn encode_uint(mut value: u64) -> Vec<u8> {
	let mut out = Vec::new();
	loop {
		let mut byte = (value & 0x7F) as u8;
		value >>= 7;
		if value != 0 {
			byte |= 0x80;
		}
		out.push(byte);
		if value == 0 {
			break;
		}
	}
	out
}

/// Write `body` as a Snappy-framed container under `dir`.
pub(crate) fn write_snappy(dir: &Path, name: &str, body: &[u8]) -> PathBuf {
	write_snappy_chunked(dir, name, body, CHUNK_SIZE)
}

/// Write `body` as a Snappy-framed container with a custom chunk size, so
/// tests can force chunk boundaries.
pub(crate) fn write_snappy_chunked(dir: &Path, name: &str, body: &[u8], chunk_size: usize) -> PathBuf {
	let mut out = Vec::from(SNAPPY_MAGIC);
	for chunk in body.chunks(chunk_size.max(1)) {
		let compressed = snap::raw::Encoder::new().compress_vec(chunk).expect("snappy chunk compresses");
		out.extend_from_slice(&(compressed.len() as u32).to_le_bytes());
		out.extend_from_slice(&compressed);
	}

	let path = dir.join(name);
	std::fs::write(&path, out).expect("fixture writes");
	path
}

/// Write `body` as a gzip member under `dir`.
pub(crate) fn write_gzip(dir: &Path, name: &str, body: &[u8]) -> PathBuf {
	let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
	encoder.write_all(body).expect("gzip body writes");
	let out = encoder.finish().expect("gzip stream finishes");

	let path = dir.join(name);
	std::fs::write(&path, out).expect("fixture writes");
	path
}

/// In-memory byte source for primitive decoder tests.
#[derive(Debug)]
pub(crate) struct MemFile {
	bytes: Vec<u8>,
	pos: usize,
}

impl MemFile {
	pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
		Self {
			bytes: bytes.into(),
			pos: 0,
		}
	}

	pub fn pos(&self) -> usize {
		self.pos
	}
}

impl TraceFile for MemFile {
	fn getc(&mut self) -> Option<u8> {
		let byte = *self.bytes.get(self.pos)?;
		self.pos += 1;
		Some(byte)
	}

	fn read(&mut self, buf: &mut [u8]) -> usize {
		let take = buf.len().min(self.bytes.len() - self.pos);
		buf[..take].copy_from_slice(&self.bytes[self.pos..self.pos + take]);
		self.pos += take;
		take
	}

	fn skip(&mut self, n: u64) {
		let take = (self.bytes.len() - self.pos).min(usize::try_from(n).unwrap_or(usize::MAX));
		self.pos += take;
	}

	fn current_offset(&self) -> u64 {
		self.pos as u64
	}

	fn set_current_offset(&mut self, offset: u64) -> bool {
		self.pos = (offset as usize).min(self.bytes.len());
		true
	}

	fn supports_offsets(&self) -> bool {
		true
	}

	fn percent_read(&self) -> u8 {
		if self.bytes.is_empty() {
			return 100;
		}
		((self.pos * 100) / self.bytes.len()) as u8
	}
}

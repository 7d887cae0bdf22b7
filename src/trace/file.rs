use std::fs::File;
use std::io::{Read, Seek, SeekFrom};
use std::path::Path;

use crate::trace::gzip::GzipFile;
use crate::trace::snappy::SnappyFile;
use crate::trace::{Result, TraceError};

/// gzip member magic.
const GZIP_MAGIC: [u8; 2] = [0x1F, 0x8B];
/// Snappy container magic.
pub(crate) const SNAPPY_MAGIC: [u8; 2] = [b'a', b't'];

/// Compression container detected for a trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
	/// gzip-style deflate stream.
	Gzip,
	/// Block-framed Snappy container.
	Snappy,
}

impl Container {
	/// Render container kind as a stable lowercase label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Gzip => "gzip",
			Self::Snappy => "snappy",
		}
	}
}

/// Forward byte stream over a decompressed trace body.
///
/// Mid-stream IO errors surface as EOF (`getc` returns `None`, `read`
/// returns short) so parsing truncates gracefully instead of failing.
pub trait TraceFile: std::fmt::Debug {
	/// Read one byte, `None` at EOF.
	fn getc(&mut self) -> Option<u8>;
	/// Read up to `buf.len()` bytes; short reads happen at EOF.
	fn read(&mut self, buf: &mut [u8]) -> usize;
	/// Consume and discard `n` bytes.
	fn skip(&mut self, n: u64);
	/// Monotonic position token. Restorable only when `supports_offsets`.
	fn current_offset(&self) -> u64;
	/// Reposition to a token from `current_offset`. Returns `false` when the
	/// stream cannot seek.
	fn set_current_offset(&mut self, offset: u64) -> bool;
	/// Whether `set_current_offset` can restore positions.
	fn supports_offsets(&self) -> bool;
	/// Advisory progress over the compressed input, `0..=100`.
	fn percent_read(&self) -> u8;
}

/// Open a trace file, detecting the container by its leading magic bytes.
pub fn open_stream(path: impl AsRef<Path>) -> Result<(Container, Box<dyn TraceFile>)> {
	let mut file = File::open(path)?;
	let file_size = file.metadata()?.len();

	let mut magic = [0_u8; 2];
	let got = read_full(&mut file, &mut magic);

	if got == 2 && magic == GZIP_MAGIC {
		file.seek(SeekFrom::Start(0))?;
		return Ok((Container::Gzip, Box::new(GzipFile::new(file, file_size))));
	}

	if got == 2 && magic == SNAPPY_MAGIC {
		return Ok((Container::Snappy, Box::new(SnappyFile::new(file, file_size))));
	}

	Err(TraceError::UnknownMagic { magic })
}

pub(crate) fn read_full(file: &mut File, buf: &mut [u8]) -> usize {
	let mut filled = 0;
	while filled < buf.len() {
		match file.read(&mut buf[filled..]) {
			Ok(0) | Err(_) => break,
			Ok(n) => filled += n,
		}
	}
	filled
}

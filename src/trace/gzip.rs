use std::fs::File;
use std::io::Read;

use flate2::read::GzDecoder;

use crate::trace::TraceFile;

/// Counts compressed bytes handed to the decoder, for progress reporting.
#[derive(Debug)]
struct CountingReader {
	inner: File,
	consumed: u64,
}

impl Read for CountingReader {
	fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
		let n = self.inner.read(buf)?;
		self.consumed += n as u64;
		Ok(n)
	}
}

/// Deflate-stream trace source.
///
/// Forward-only: `current_offset` reports the uncompressed position so the
/// parser's signature bookkeeping stays monotonic, but positions cannot be
/// restored.
#[derive(Debug)]
pub struct GzipFile {
	decoder: GzDecoder<CountingReader>,
	file_size: u64,
	position: u64,
}

impl GzipFile {
	pub(crate) fn new(file: File, file_size: u64) -> Self {
		Self {
			decoder: GzDecoder::new(CountingReader { inner: file, consumed: 0 }),
			file_size,
			position: 0,
		}
	}
}

impl TraceFile for GzipFile {
	fn getc(&mut self) -> Option<u8> {
		let mut byte = [0_u8; 1];
		match self.decoder.read(&mut byte) {
			Ok(1) => {
				self.position += 1;
				Some(byte[0])
			}
			_ => None,
		}
	}

	fn read(&mut self, buf: &mut [u8]) -> usize {
		let mut filled = 0;
		while filled < buf.len() {
			match self.decoder.read(&mut buf[filled..]) {
				Ok(0) | Err(_) => break,
				Ok(n) => filled += n,
			}
		}
		self.position += filled as u64;
		filled
	}

	fn skip(&mut self, n: u64) {
		let mut scratch = [0_u8; 4096];
		let mut left = n;
		while left > 0 {
			let take = scratch.len().min(usize::try_from(left).unwrap_or(scratch.len()));
			let got = self.read(&mut scratch[..take]);
			if got == 0 {
				break;
			}
			left -= got as u64;
		}
	}

	fn current_offset(&self) -> u64 {
		self.position
	}

	fn set_current_offset(&mut self, _offset: u64) -> bool {
		false
	}

	fn supports_offsets(&self) -> bool {
		false
	}

	fn percent_read(&self) -> u8 {
		if self.file_size == 0 {
			return 100;
		}
		let consumed = self.decoder.get_ref().consumed.min(self.file_size);
		((consumed * 100) / self.file_size) as u8
	}
}

use std::fs::File;
use std::io::{Seek, SeekFrom};

use crate::trace::file::{read_full, SNAPPY_MAGIC};
use crate::trace::TraceFile;

/// Largest uncompressed chunk the recorder emits.
pub(crate) const CHUNK_SIZE: usize = 1 << 20;
/// Low bits of a packed offset hold the intra-chunk index.
const OFFSET_SHIFT: u32 = 24;
const INTRA_MASK: u64 = (1 << OFFSET_SHIFT) - 1;

/// Block-framed Snappy trace source with restorable offsets.
///
/// Framing: two magic bytes, then chunks of `<u32 le compressed length>
/// <compressed bytes>`. A position token packs the chunk's container offset
/// into the high bits and the index inside the decoded chunk into the low
/// [`OFFSET_SHIFT`] bits, so restore is a chunk reload plus an index.
#[derive(Debug)]
pub struct SnappyFile {
	file: File,
	file_size: u64,
	cache: Vec<u8>,
	cache_pos: usize,
	/// Container offset of the cached chunk's length prefix.
	chunk_offset: u64,
	/// Container offset one past the cached chunk.
	next_chunk_offset: u64,
}

impl SnappyFile {
	pub(crate) fn new(file: File, file_size: u64) -> Self {
		let start = SNAPPY_MAGIC.len() as u64;
		let mut out = Self {
			file,
			file_size,
			cache: Vec::new(),
			cache_pos: 0,
			chunk_offset: start,
			next_chunk_offset: start,
		};
		out.load_chunk(start);
		out
	}

	/// Decode the chunk whose length prefix sits at `offset`. On failure the
	/// cache is left empty and reads report EOF.
	fn load_chunk(&mut self, offset: u64) -> bool {
		self.chunk_offset = offset;
		self.next_chunk_offset = offset;
		self.cache.clear();
		self.cache_pos = 0;

		if self.file.seek(SeekFrom::Start(offset)).is_err() {
			return false;
		}

		let mut len_raw = [0_u8; 4];
		if read_full(&mut self.file, &mut len_raw) != len_raw.len() {
			return false;
		}
		let compressed_len = u32::from_le_bytes(len_raw) as usize;
		if compressed_len == 0 {
			return false;
		}

		let mut compressed = vec![0_u8; compressed_len];
		if read_full(&mut self.file, &mut compressed) != compressed_len {
			return false;
		}

		match snap::raw::Decoder::new().decompress_vec(&compressed) {
			Ok(decoded) => {
				self.cache = decoded;
				self.next_chunk_offset = offset + 4 + compressed_len as u64;
				true
			}
			Err(_) => false,
		}
	}

	fn cached(&self) -> usize {
		self.cache.len().saturating_sub(self.cache_pos)
	}
}

impl TraceFile for SnappyFile {
	fn getc(&mut self) -> Option<u8> {
		while self.cache_pos >= self.cache.len() {
			if !self.load_chunk(self.next_chunk_offset) {
				return None;
			}
		}
		let byte = self.cache[self.cache_pos];
		self.cache_pos += 1;
		Some(byte)
	}

	fn read(&mut self, buf: &mut [u8]) -> usize {
		let mut filled = 0;
		while filled < buf.len() {
			if self.cache_pos >= self.cache.len() {
				if !self.load_chunk(self.next_chunk_offset) {
					break;
				}
				continue;
			}
			let take = (buf.len() - filled).min(self.cached());
			buf[filled..filled + take].copy_from_slice(&self.cache[self.cache_pos..self.cache_pos + take]);
			self.cache_pos += take;
			filled += take;
		}
		filled
	}

	fn skip(&mut self, n: u64) {
		let mut left = n;
		while left > 0 {
			if self.cache_pos >= self.cache.len() {
				if !self.load_chunk(self.next_chunk_offset) {
					return;
				}
				continue;
			}
			let take = (self.cached() as u64).min(left);
			self.cache_pos += take as usize;
			left -= take;
		}
	}

	fn current_offset(&self) -> u64 {
		(self.chunk_offset << OFFSET_SHIFT) | self.cache_pos as u64
	}

	fn set_current_offset(&mut self, offset: u64) -> bool {
		let chunk = offset >> OFFSET_SHIFT;
		let intra = (offset & INTRA_MASK) as usize;
		self.load_chunk(chunk);
		self.cache_pos = intra.min(self.cache.len());
		true
	}

	fn supports_offsets(&self) -> bool {
		true
	}

	fn percent_read(&self) -> u8 {
		if self.file_size == 0 {
			return 100;
		}
		let consumed = self.next_chunk_offset.min(self.file_size);
		((consumed * 100) / self.file_size) as u8
	}
}

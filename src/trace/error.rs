use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, TraceError>;

/// Errors produced while opening and positioning trace streams.
///
/// Mid-stream corruption is handled elsewhere: truncation degrades into a
/// shortened call sequence, and unknown tag bytes are fatal because the
/// format cannot resynchronize past them.
#[derive(Debug, Error)]
pub enum TraceError {
	/// Filesystem or stream IO failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Unknown leading file magic.
	#[error("unsupported compression or not a trace (magic={magic:?})")]
	UnknownMagic {
		/// First up-to-2 bytes of the stream.
		magic: [u8; 2],
	},
	/// Trace format version newer than this reader understands.
	#[error("unsupported trace format version {version} (expected <= {supported})")]
	UnsupportedVersion {
		/// Version read from the trace header.
		version: u32,
		/// Highest version this reader accepts.
		supported: u32,
	},
	/// Bookmark operation on a stream without offset support.
	#[error("stream does not support offset restore")]
	BookmarksUnsupported,
}

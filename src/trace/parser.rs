use std::collections::VecDeque;
use std::path::Path;
use std::rc::Rc;

use crate::trace::call::Call;
use crate::trace::diag;
use crate::trace::file::{open_stream, Container, TraceFile};
use crate::trace::format::{
	CALL_ARG, CALL_END, CALL_RET, EVENT_ENTER, EVENT_LEAVE, TRACE_VERSION, TYPE_ARRAY, TYPE_BITMASK, TYPE_BLOB,
	TYPE_DOUBLE, TYPE_ENUM, TYPE_FALSE, TYPE_FLOAT, TYPE_NULL, TYPE_OPAQUE, TYPE_SINT, TYPE_STRING, TYPE_STRUCT,
	TYPE_TRUE, TYPE_UINT,
};
use crate::trace::read::{read_f32, read_f64, read_string, read_uint, skip_string, skip_uint};
use crate::trace::sig::{BitmaskFlag, BitmaskSig, EnumSig, FunctionSig, SigTable, StructSig};
use crate::trace::value::Value;
use crate::trace::{Result, TraceError};

/// Detail level threaded through call parsing.
///
/// Framing is identical in both modes; `Skeleton` consumes argument and
/// return payloads without materializing them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
	/// Materialize arguments and return values.
	Full,
	/// Keep call numbers and signatures only.
	Skeleton,
}

/// Saved parse position: a stream offset plus the call counter to resume
/// with. Only meaningful against streams that support offset restore.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseBookmark {
	/// Byte source position token.
	pub offset: u64,
	/// Call number the next enter event will receive.
	pub next_call_no: u32,
}

/// Whether the value walker builds a tree or only consumes bytes.
#[derive(Clone, Copy)]
enum ValueEffect {
	Materialize,
	Discard,
}

/// Streaming reader over one trace capture.
///
/// The parser owns the byte source and the four signature tables for its
/// lifetime. It is single-threaded and non-suspending; stopping is simply
/// not calling [`Parser::parse_call`] again. Calls still pending at drop
/// time are released with the parser.
#[derive(Debug)]
pub struct Parser {
	file: Box<dyn TraceFile>,
	container: Container,
	version: u32,
	next_call_no: u32,
	pending: VecDeque<Call>,
	functions: SigTable<FunctionSig>,
	structs: SigTable<StructSig>,
	enums: SigTable<EnumSig>,
	bitmasks: SigTable<BitmaskSig>,
}

impl Parser {
	/// Open a trace file, detect its container, and gate on the header
	/// version.
	pub fn open(path: impl AsRef<Path>) -> Result<Self> {
		let (container, mut file) = open_stream(path)?;

		let version = read_uint(file.as_mut()) as u32;
		if version > TRACE_VERSION {
			log::error!("unsupported trace format version {version}");
			return Err(TraceError::UnsupportedVersion {
				version,
				supported: TRACE_VERSION,
			});
		}

		Ok(Self {
			file,
			container,
			version,
			next_call_no: 0,
			pending: VecDeque::new(),
			functions: SigTable::default(),
			structs: SigTable::default(),
			enums: SigTable::default(),
			bitmasks: SigTable::default(),
		})
	}

	/// Trace format version from the header.
	pub fn version(&self) -> u32 {
		self.version
	}

	/// Detected compression container.
	pub fn container(&self) -> Container {
		self.container
	}

	/// Advisory progress over the compressed input, `0..=100`.
	pub fn percent_read(&self) -> u8 {
		self.file.percent_read()
	}

	/// Parse forward until the next completed call.
	///
	/// Calls are emitted in leave order. At EOF, calls whose leave event
	/// never arrived are flushed in enter order with an `incomplete call`
	/// warning; after that `None` means the stream is exhausted.
	pub fn parse_call(&mut self, mode: Mode) -> Option<Call> {
		loop {
			match self.file.getc() {
				Some(EVENT_ENTER) => self.parse_enter(mode),
				Some(EVENT_LEAVE) => return self.parse_leave(mode),
				Some(event) => diag::fatal(format_args!("unknown event {event}")),
				None => {
					let call = self.pending.pop_front()?;
					log::warn!("{}: incomplete call {}", call.no, call.name());
					return Some(call);
				}
			}
		}
	}

	/// Record the current stream position and call counter.
	pub fn get_bookmark(&self) -> Result<ParseBookmark> {
		if !self.file.supports_offsets() {
			return Err(TraceError::BookmarksUnsupported);
		}
		Ok(ParseBookmark {
			offset: self.file.current_offset(),
			next_call_no: self.next_call_no,
		})
	}

	/// Return to a previously recorded position.
	///
	/// Pending calls belong to the future the stream just abandoned and are
	/// dropped. Fails without seeking on streams that cannot restore
	/// offsets.
	pub fn set_bookmark(&mut self, bookmark: &ParseBookmark) -> Result<()> {
		if !self.file.set_current_offset(bookmark.offset) {
			return Err(TraceError::BookmarksUnsupported);
		}
		self.next_call_no = bookmark.next_call_no;
		self.pending.clear();
		Ok(())
	}

	fn parse_enter(&mut self, mode: Mode) {
		let sig = self.parse_function_sig();
		let mut call = Call::new(sig, self.next_call_no);
		self.next_call_no += 1;
		if self.parse_call_details(&mut call, mode) {
			self.pending.push_back(call);
		}
	}

	fn parse_leave(&mut self, mode: Mode) -> Option<Call> {
		let call_no = read_uint(self.file.as_mut()) as u32;
		let index = self.pending.iter().position(|call| call.no == call_no)?;
		let mut call = self.pending.remove(index)?;
		if self.parse_call_details(&mut call, mode) {
			Some(call)
		} else {
			None
		}
	}

	/// Consume tagged detail records until `CALL_END`. Returns `false` when
	/// the stream truncated mid-call; the caller drops the call.
	fn parse_call_details(&mut self, call: &mut Call, mode: Mode) -> bool {
		loop {
			match self.file.getc() {
				Some(CALL_END) => return true,
				Some(CALL_ARG) => self.parse_arg(call, mode),
				Some(CALL_RET) => match mode {
					Mode::Full => call.ret = self.parse_value(),
					Mode::Skeleton => self.scan_value(),
				},
				Some(detail) => diag::fatal(format_args!("({}) unknown call detail {detail}", call.name())),
				None => return false,
			}
		}
	}

	fn parse_arg(&mut self, call: &mut Call, mode: Mode) {
		let index = read_uint(self.file.as_mut()) as usize;
		match mode {
			Mode::Skeleton => self.scan_value(),
			Mode::Full => {
				if let Some(value) = self.parse_value() {
					if index >= call.args.len() {
						call.args.resize_with(index + 1, || None);
					}
					call.args[index] = Some(value);
				}
			}
		}
	}

	fn parse_value(&mut self) -> Option<Value> {
		self.read_value(ValueEffect::Materialize)
	}

	fn scan_value(&mut self) {
		let _ = self.read_value(ValueEffect::Discard);
	}

	/// One decoder for both the materializing and scanning paths, so the two
	/// cannot diverge in the bytes they consume. `None` means the stream
	/// ended inside the value.
	fn read_value(&mut self, effect: ValueEffect) -> Option<Value> {
		let tag = self.file.getc()?;
		let value = match tag {
			TYPE_NULL => Value::Null,
			TYPE_FALSE => Value::Bool(false),
			TYPE_TRUE => Value::Bool(true),
			TYPE_SINT => Value::SInt((read_uint(self.file.as_mut()) as i64).wrapping_neg()),
			TYPE_UINT => Value::UInt(read_uint(self.file.as_mut())),
			TYPE_FLOAT => Value::Float(f64::from(read_f32(self.file.as_mut()))),
			TYPE_DOUBLE => Value::Float(read_f64(self.file.as_mut())),
			TYPE_STRING => match effect {
				ValueEffect::Materialize => Value::String(read_string(self.file.as_mut())),
				ValueEffect::Discard => {
					skip_string(self.file.as_mut());
					Value::Null
				}
			},
			TYPE_BLOB => {
				let size = read_uint(self.file.as_mut()) as usize;
				match effect {
					ValueEffect::Materialize => {
						let mut bytes = vec![0_u8; size];
						if size > 0 {
							let _ = self.file.read(&mut bytes);
						}
						Value::Blob(bytes)
					}
					ValueEffect::Discard => {
						self.file.skip(size as u64);
						Value::Null
					}
				}
			}
			TYPE_ENUM => Value::Enum(self.parse_enum_sig()),
			TYPE_BITMASK => {
				let sig = self.parse_bitmask_sig();
				let value = read_uint(self.file.as_mut());
				Value::Bitmask(sig, value)
			}
			TYPE_ARRAY => {
				let len = read_uint(self.file.as_mut()) as usize;
				let mut items = Vec::new();
				for _ in 0..len {
					let Some(item) = self.read_value(effect) else { break };
					if matches!(effect, ValueEffect::Materialize) {
						items.push(item);
					}
				}
				Value::Array(items)
			}
			TYPE_STRUCT => {
				let sig = self.parse_struct_sig();
				let mut members = Vec::new();
				for _ in 0..sig.member_names.len() {
					let Some(member) = self.read_value(effect) else { break };
					if matches!(effect, ValueEffect::Materialize) {
						members.push(member);
					}
				}
				Value::Struct(sig, members)
			}
			TYPE_OPAQUE => Value::Pointer(read_uint(self.file.as_mut())),
			other => diag::fatal(format_args!("unknown type {other}")),
		};
		Some(value)
	}

	/// Resolve one signature reference against its interning table.
	///
	/// First occurrence parses and installs the descriptor. A cached entry
	/// re-encountered *before* its defining site (after a backward bookmark)
	/// scan-skips the descriptor bytes; the stored signature is never
	/// replaced.
	fn parse_function_sig(&mut self) -> Rc<FunctionSig> {
		let id = read_uint(self.file.as_mut()) as u32;
		match self.functions.lookup(id) {
			None => {
				let name = read_string(self.file.as_mut());
				let num_args = read_uint(self.file.as_mut()) as usize;
				let mut arg_names = Vec::with_capacity(num_args);
				for _ in 0..num_args {
					arg_names.push(read_string(self.file.as_mut()));
				}
				let sig = Rc::new(FunctionSig {
					id,
					name,
					arg_names,
					offset: self.file.current_offset(),
				});
				self.functions.install(id, Rc::clone(&sig));
				sig
			}
			Some(sig) => {
				if self.file.current_offset() < sig.offset {
					skip_string(self.file.as_mut());
					let num_args = read_uint(self.file.as_mut());
					for _ in 0..num_args {
						skip_string(self.file.as_mut());
					}
				}
				sig
			}
		}
	}

	fn parse_struct_sig(&mut self) -> Rc<StructSig> {
		let id = read_uint(self.file.as_mut()) as u32;
		match self.structs.lookup(id) {
			None => {
				let name = read_string(self.file.as_mut());
				let num_members = read_uint(self.file.as_mut()) as usize;
				let mut member_names = Vec::with_capacity(num_members);
				for _ in 0..num_members {
					member_names.push(read_string(self.file.as_mut()));
				}
				let sig = Rc::new(StructSig {
					id,
					name,
					member_names,
					offset: self.file.current_offset(),
				});
				self.structs.install(id, Rc::clone(&sig));
				sig
			}
			Some(sig) => {
				if self.file.current_offset() < sig.offset {
					skip_string(self.file.as_mut());
					let num_members = read_uint(self.file.as_mut());
					for _ in 0..num_members {
						skip_string(self.file.as_mut());
					}
				}
				sig
			}
		}
	}

	fn parse_enum_sig(&mut self) -> Rc<EnumSig> {
		let id = read_uint(self.file.as_mut()) as u32;
		match self.enums.lookup(id) {
			None => {
				let name = read_string(self.file.as_mut());
				let value = self.parse_value().unwrap_or(Value::Null).to_sint();
				let sig = Rc::new(EnumSig {
					id,
					name,
					value,
					offset: self.file.current_offset(),
				});
				self.enums.install(id, Rc::clone(&sig));
				sig
			}
			Some(sig) => {
				if self.file.current_offset() < sig.offset {
					skip_string(self.file.as_mut());
					self.scan_value();
				}
				sig
			}
		}
	}

	fn parse_bitmask_sig(&mut self) -> Rc<BitmaskSig> {
		let id = read_uint(self.file.as_mut()) as u32;
		match self.bitmasks.lookup(id) {
			None => {
				let num_flags = read_uint(self.file.as_mut()) as usize;
				let mut flags = Vec::with_capacity(num_flags);
				for index in 0..num_flags {
					let name = read_string(self.file.as_mut());
					let value = read_uint(self.file.as_mut());
					if value == 0 && index != 0 {
						log::warn!("bitmask flag {name} is zero but not first");
					}
					flags.push(BitmaskFlag { name, value });
				}
				let sig = Rc::new(BitmaskSig {
					id,
					flags,
					offset: self.file.current_offset(),
				});
				self.bitmasks.install(id, Rc::clone(&sig));
				sig
			}
			Some(sig) => {
				if self.file.current_offset() < sig.offset {
					let num_flags = read_uint(self.file.as_mut());
					for _ in 0..num_flags {
						skip_string(self.file.as_mut());
						skip_uint(self.file.as_mut());
					}
				}
				sig
			}
		}
	}
}

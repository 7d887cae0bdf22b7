use std::fmt;
use std::rc::Rc;

use crate::trace::sig::{BitmaskSig, EnumSig, StructSig};

/// One decoded trace value. Containers own their elements; signatures are
/// shared with the parser's interning tables.
#[derive(Debug, Clone)]
pub enum Value {
	Null,
	Bool(bool),
	SInt(i64),
	UInt(u64),
	Float(f64),
	String(Box<str>),
	Enum(Rc<EnumSig>),
	Bitmask(Rc<BitmaskSig>, u64),
	Array(Vec<Value>),
	Struct(Rc<StructSig>, Vec<Value>),
	Blob(Vec<u8>),
	Pointer(u64),
}

impl Value {
	/// Coerce to a signed integer, as used when interning enum constants.
	pub fn to_sint(&self) -> i64 {
		match self {
			Self::SInt(v) => *v,
			Self::UInt(v) => *v as i64,
			Self::Bool(v) => i64::from(*v),
			Self::Float(v) => *v as i64,
			_ => 0,
		}
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Null => write!(f, "NULL"),
			Self::Bool(v) => write!(f, "{v}"),
			Self::SInt(v) => write!(f, "{v}"),
			Self::UInt(v) => write!(f, "{v}"),
			Self::Float(v) => write!(f, "{v}"),
			Self::String(v) => write!(f, "\"{v}\""),
			Self::Enum(sig) => write!(f, "{}", sig.name),
			Self::Bitmask(sig, value) => fmt_bitmask(f, sig, *value),
			Self::Array(items) => {
				write!(f, "{{")?;
				for (index, item) in items.iter().enumerate() {
					if index > 0 {
						write!(f, ", ")?;
					}
					write!(f, "{item}")?;
				}
				write!(f, "}}")
			}
			Self::Struct(sig, members) => {
				write!(f, "{{")?;
				for (index, member) in members.iter().enumerate() {
					if index > 0 {
						write!(f, ", ")?;
					}
					match sig.member_names.get(index) {
						Some(name) => write!(f, "{name} = {member}")?,
						None => write!(f, "{member}")?,
					}
				}
				write!(f, "}}")
			}
			Self::Blob(bytes) => write!(f, "blob({})", bytes.len()),
			Self::Pointer(addr) => write!(f, "0x{addr:x}"),
		}
	}
}

/// Render a bitmask as `FLAG_A | FLAG_B`, with unmatched bits in hex.
fn fmt_bitmask(f: &mut fmt::Formatter<'_>, sig: &BitmaskSig, value: u64) -> fmt::Result {
	if value == 0 {
		return match sig.flags.first() {
			Some(flag) if flag.value == 0 => write!(f, "{}", flag.name),
			_ => write!(f, "0"),
		};
	}

	let mut remaining = value;
	let mut first = true;
	for flag in &sig.flags {
		if flag.value != 0 && remaining & flag.value == flag.value {
			if !first {
				write!(f, " | ")?;
			}
			write!(f, "{}", flag.name)?;
			remaining &= !flag.value;
			first = false;
		}
	}

	if remaining != 0 {
		if !first {
			write!(f, " | ")?;
		}
		write!(f, "0x{remaining:x}")?;
	}
	Ok(())
}

#[cfg(test)]
mod tests;

use std::rc::Rc;

use crate::trace::sig::{BitmaskFlag, BitmaskSig, EnumSig, StructSig};
use crate::trace::Value;

fn bitmask_sig(flags: &[(&str, u64)]) -> Rc<BitmaskSig> {
	Rc::new(BitmaskSig {
		id: 0,
		flags: flags
			.iter()
			.map(|(name, value)| BitmaskFlag {
				name: (*name).into(),
				value: *value,
			})
			.collect(),
		offset: 0,
	})
}

#[test]
fn scalar_display() {
	assert_eq!(Value::Null.to_string(), "NULL");
	assert_eq!(Value::Bool(true).to_string(), "true");
	assert_eq!(Value::SInt(-7).to_string(), "-7");
	assert_eq!(Value::UInt(42).to_string(), "42");
	assert_eq!(Value::Float(1.5).to_string(), "1.5");
	assert_eq!(Value::String("hi".into()).to_string(), "\"hi\"");
	assert_eq!(Value::Pointer(0xDEAD).to_string(), "0xdead");
	assert_eq!(Value::Blob(vec![0; 16]).to_string(), "blob(16)");
}

#[test]
fn array_display_braces_elements() {
	let value = Value::Array(vec![Value::UInt(1), Value::UInt(2), Value::Null]);
	assert_eq!(value.to_string(), "{1, 2, NULL}");
}

#[test]
fn struct_display_names_members() {
	let sig = Rc::new(StructSig {
		id: 0,
		name: "rect".into(),
		member_names: vec!["w".into(), "h".into()],
		offset: 0,
	});
	let value = Value::Struct(sig, vec![Value::UInt(640), Value::UInt(480)]);
	assert_eq!(value.to_string(), "{w = 640, h = 480}");
}

#[test]
fn enum_display_uses_constant_name() {
	let sig = Rc::new(EnumSig {
		id: 0,
		name: "GL_TRIANGLES".into(),
		value: 4,
		offset: 0,
	});
	assert_eq!(Value::Enum(sig).to_string(), "GL_TRIANGLES");
}

#[test]
fn bitmask_display_joins_flags() {
	let sig = bitmask_sig(&[("COLOR", 0x1), ("DEPTH", 0x2), ("STENCIL", 0x4)]);
	assert_eq!(Value::Bitmask(Rc::clone(&sig), 0x3).to_string(), "COLOR | DEPTH");
	assert_eq!(Value::Bitmask(Rc::clone(&sig), 0x4).to_string(), "STENCIL");
	assert_eq!(Value::Bitmask(sig, 0).to_string(), "0");
}

#[test]
fn bitmask_display_keeps_unmatched_bits() {
	let sig = bitmask_sig(&[("COLOR", 0x1)]);
	assert_eq!(Value::Bitmask(sig, 0x11).to_string(), "COLOR | 0x10");
}

#[test]
fn bitmask_display_zero_uses_leading_zero_flag() {
	let sig = bitmask_sig(&[("NONE", 0x0), ("COLOR", 0x1)]);
	assert_eq!(Value::Bitmask(sig, 0).to_string(), "NONE");
}

#[test]
fn to_sint_coerces_integers() {
	assert_eq!(Value::SInt(-3).to_sint(), -3);
	assert_eq!(Value::UInt(9).to_sint(), 9);
	assert_eq!(Value::Bool(true).to_sint(), 1);
	assert_eq!(Value::Null.to_sint(), 0);
	assert_eq!(Value::String("x".into()).to_sint(), 0);
}

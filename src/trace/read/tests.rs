use crate::trace::read::{read_f32, read_f64, read_string, read_uint, skip_string, skip_uint};
use crate::trace::testkit::{encode_uint, MemFile};

#[test]
fn uvarint_single_byte() {
	let mut file = MemFile::new(vec![0x00]);
	assert_eq!(read_uint(&mut file), 0);

	let mut file = MemFile::new(vec![0x7F]);
	assert_eq!(read_uint(&mut file), 127);
}

#[test]
fn uvarint_multi_byte() {
	let mut file = MemFile::new(vec![0x80, 0x01]);
	assert_eq!(read_uint(&mut file), 128);

	let mut file = MemFile::new(vec![0xAC, 0x02]);
	assert_eq!(read_uint(&mut file), 300);
}

#[test]
fn uvarint_stops_at_clear_continuation_bit() {
	let mut file = MemFile::new(vec![0x2A, 0xFF, 0xFF]);
	assert_eq!(read_uint(&mut file), 42);
	assert_eq!(file.pos(), 1, "trailing bytes must stay unread");
}

#[test]
fn uvarint_max_value() {
	let bytes = encode_uint(u64::MAX);
	assert_eq!(bytes.len(), 10);
	let mut file = MemFile::new(bytes);
	assert_eq!(read_uint(&mut file), u64::MAX);
}

#[test]
fn uvarint_eof_yields_accumulated_bits() {
	let mut file = MemFile::new(vec![0xFF]);
	assert_eq!(read_uint(&mut file), 0x7F);

	let mut file = MemFile::new(Vec::new());
	assert_eq!(read_uint(&mut file), 0);
}

#[test]
fn uvarint_overlong_encoding_does_not_panic() {
	let mut bytes = vec![0x81_u8; 12];
	bytes.push(0x01);
	let mut file = MemFile::new(bytes);
	let _ = read_uint(&mut file);
}

#[test]
fn skip_uint_consumes_same_bytes_as_read() {
	for value in [0_u64, 1, 127, 128, 300, 1 << 20, u64::MAX] {
		let bytes = encode_uint(value);
		let mut reader = MemFile::new(bytes.clone());
		let mut skipper = MemFile::new(bytes);
		let _ = read_uint(&mut reader);
		skip_uint(&mut skipper);
		assert_eq!(reader.pos(), skipper.pos(), "value {value}");
	}
}

#[test]
fn string_roundtrip() {
	let mut bytes = encode_uint("glClear".len() as u64);
	bytes.extend_from_slice(b"glClear");
	let mut file = MemFile::new(bytes);
	assert_eq!(read_string(&mut file).as_ref(), "glClear");
}

#[test]
fn zero_length_string_is_valid() {
	let mut file = MemFile::new(vec![0x00]);
	assert_eq!(read_string(&mut file).as_ref(), "");
	assert_eq!(file.pos(), 1);
}

#[test]
fn truncated_string_pads_with_zero_bytes() {
	let mut file = MemFile::new(vec![0x05, b'a', b'b']);
	let text = read_string(&mut file);
	assert!(text.starts_with("ab"));
	assert_eq!(text.len(), 5);
}

#[test]
fn skip_string_consumes_same_bytes_as_read() {
	let mut body = encode_uint("member_name".len() as u64);
	body.extend_from_slice(b"member_name");
	let mut reader = MemFile::new(body.clone());
	let mut skipper = MemFile::new(body);
	let _ = read_string(&mut reader);
	skip_string(&mut skipper);
	assert_eq!(reader.pos(), skipper.pos());
}

#[test]
fn fixed_width_floats_roundtrip() {
	let mut bytes = 1.5_f32.to_ne_bytes().to_vec();
	bytes.extend_from_slice(&(-2.25_f64).to_ne_bytes());
	let mut file = MemFile::new(bytes);
	assert_eq!(read_f32(&mut file), 1.5);
	assert_eq!(read_f64(&mut file), -2.25);
}

#[test]
fn float_at_eof_reads_zero() {
	let mut file = MemFile::new(Vec::new());
	assert_eq!(read_f32(&mut file), 0.0);
	assert_eq!(read_f64(&mut file), 0.0);
}

mod props {
	use proptest::prelude::*;

	use crate::trace::read::read_uint;
	use crate::trace::testkit::{encode_uint, MemFile};

	proptest! {
		#[test]
		fn uvarint_roundtrip(value in any::<u64>()) {
			let bytes = encode_uint(value);
			let mut file = MemFile::new(bytes.clone());
			prop_assert_eq!(read_uint(&mut file), value);
			prop_assert_eq!(file.pos(), bytes.len());
		}

		#[test]
		fn uvarint_decode_ignores_trailing_bytes(value in any::<u64>(), trailer in proptest::collection::vec(any::<u8>(), 0..8)) {
			let mut bytes = encode_uint(value);
			let encoded_len = bytes.len();
			bytes.extend_from_slice(&trailer);
			let mut file = MemFile::new(bytes);
			prop_assert_eq!(read_uint(&mut file), value);
			prop_assert_eq!(file.pos(), encoded_len);
		}
	}
}

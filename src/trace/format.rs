//! Byte-level constants of the trace wire format.
//!
//! A trace body is a sequence of events, each introduced by a single tag
//! byte. Value payloads carry their own tag namespace; the two never mix
//! because value tags only appear after a `CALL_ARG` index or `CALL_RET`
//! marker.

/// Highest trace format version this reader understands.
pub const TRACE_VERSION: u32 = 4;

/// Opens a call: function signature reference plus call details.
pub const EVENT_ENTER: u8 = 0;
/// Closes a call: call number plus call details.
pub const EVENT_LEAVE: u8 = 1;

/// Call detail: uvarint argument index followed by one value.
pub const CALL_ARG: u8 = 2;
/// Call detail: one return value.
pub const CALL_RET: u8 = 3;
/// Terminates the call detail list.
pub const CALL_END: u8 = 4;

/// Null value, no payload.
pub const TYPE_NULL: u8 = 1;
/// Boolean false, no payload.
pub const TYPE_FALSE: u8 = 2;
/// Boolean true, no payload.
pub const TYPE_TRUE: u8 = 3;
/// Negative integer: uvarint magnitude, negated on decode.
pub const TYPE_SINT: u8 = 4;
/// Unsigned integer: uvarint.
pub const TYPE_UINT: u8 = 5;
/// 32-bit float, raw bytes in the recorder's byte order.
pub const TYPE_FLOAT: u8 = 6;
/// 64-bit float, raw bytes in the recorder's byte order.
pub const TYPE_DOUBLE: u8 = 7;
/// Length-prefixed string bytes.
pub const TYPE_STRING: u8 = 8;
/// Length-prefixed opaque bytes.
pub const TYPE_BLOB: u8 = 9;
/// Enum signature reference.
pub const TYPE_ENUM: u8 = 10;
/// Bitmask signature reference plus uvarint value.
pub const TYPE_BITMASK: u8 = 11;
/// uvarint length plus that many recursive values.
pub const TYPE_ARRAY: u8 = 12;
/// Struct signature reference plus one value per declared member.
pub const TYPE_STRUCT: u8 = 13;
/// Opaque pointer: uvarint address.
pub const TYPE_OPAQUE: u8 = 14;

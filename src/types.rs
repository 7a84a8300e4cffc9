// ─── Field Type Codes ───────────────────────────────────────────────────────
//
// Wire codes for the schema index. Codes 0 and 5 are reserved.

pub const TYPE_VAR_STR: usize = 1;
pub const TYPE_FIXED_STR: usize = 2;
pub const TYPE_BOOL: usize = 3;
pub const TYPE_ARRAY: usize = 4;
pub const TYPE_FLOAT: usize = 6;
pub const TYPE_INT64: usize = 7;

// ─── Element / Key Kind Codes ───────────────────────────────────────────────
//
// Version-2 indexes record the element kind of every array and the key kind
// of every keyed array. The numbering is sparse but fixed; it is part of the
// wire format and cannot be renumbered.

pub const KIND_BOOL: usize = 1;
pub const KIND_INT64: usize = 6;
pub const KIND_FLOAT: usize = 14;
pub const KIND_ARRAY: usize = 23;
pub const KIND_STR: usize = 24;
pub const KIND_STRUCT: usize = 25;

// ─── Fixed Widths ───────────────────────────────────────────────────────────

/// Every size, length, and type-code field is a 4-byte little-endian u32.
pub const SIZE_FIELD_LEN: usize = 4;
/// An int64 is a zig-zag varint zero-padded to the maximum varint width,
/// so it can be skipped without decoding.
pub const SIZE_INT64: usize = 10;
/// A float is an IEEE-754 double, little-endian.
pub const SIZE_FLOAT: usize = 8;

// ─── Stream Versions ────────────────────────────────────────────────────────

pub const VERSION1: u32 = 1;
pub const VERSION2: u32 = 2;

/// Three-byte preamble marking a version-2 stream: NUL, backspace, ASCII '2'.
/// A version-1 stream begins directly with the 4-byte index size, whose third
/// byte is only nonzero for indexes past 16 MiB, so the preamble is
/// unambiguous in practice.
pub const INDEX_VERSION_2: [u8; 3] = [0x00, 0x08, 0x32];

// ─── Stream Layout ──────────────────────────────────────────────────────────
//
//  scalar/array stream:
//  ┌──────────────────────────────────────────────┐
//  │ [4B frame size][frame size − 4 bytes payload]│ × N
//  └──────────────────────────────────────────────┘
//
//  composite stream:
//  ┌──────────────────────────────────────────────┐
//  │ 0x00 0x08 0x32          (version 2 only)     │
//  │ index size: u32 (LE, includes these 4 bytes) │
//  │ index entries, preorder                      │
//  ├──────────────────────────────────────────────┤
//  │ [4B record size][record body]                │ × N
//  └──────────────────────────────────────────────┘
//
//  array payload:
//  ┌──────────────────────────────────────────────┐
//  │ total size: u32         count: u32           │
//  │ key table: count × (key, elem size)  if keyed│
//  │ element bodies, in order                     │
//  └──────────────────────────────────────────────┘

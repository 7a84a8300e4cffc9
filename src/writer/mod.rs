use crate::codec;
use crate::error::RsfError;
use crate::schema::{ArrayDef, FieldDef, FieldKind, Schema};
use crate::types::*;
use crate::value::Value;
use std::io::Write;

mod index;


// ─── Writer ─────────────────────────────────────────────────────────────────

/// Schema-driven stream writer.
///
/// The first [`write_object`](RsfWriter::write_object) call on a composite
/// schema emits the schema index; every call emits one size-prefixed record
/// frame. Records are composed in memory first so each frame's size prefix
/// can be written ahead of its body.
pub struct RsfWriter<W: Write> {
    sink: W,
    version: u32,
    pos: usize,
    objects: u64,
}

impl<W: Write> RsfWriter<W> {
    /// A version-1 writer: no magic preamble, arrays carry no element or key
    /// metadata in the index.
    pub fn new(sink: W) -> Self {
        Self::with_version(sink, VERSION1)
    }

    pub fn with_version(sink: W, version: u32) -> Self {
        RsfWriter {
            sink,
            version,
            pos: 0,
            objects: 0,
        }
    }

    /// Current byte offset into the stream.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Serialize one record. Returns the total bytes written by this call,
    /// including the index block and version preamble when they are emitted.
    pub fn write_object(&mut self, schema: &Schema, value: &Value) -> Result<usize, RsfError> {
        let mut total = 0;

        if self.objects == 0 && schema.is_composite() {
            if self.version > VERSION1 {
                self.sink.write_all(&INDEX_VERSION_2)?;
                total += INDEX_VERSION_2.len();
            }

            let mut index_buf = Vec::new();
            if let FieldKind::Struct(fields) = schema.root() {
                index::write_struct_entries(fields, self.version, &mut index_buf)?;
            }

            // The index size counts itself but not the version preamble.
            total = codec::write_size(total, index_buf.len() + SIZE_FIELD_LEN, &mut self.sink)?;
            self.sink.write_all(&index_buf)?;
            total += index_buf.len();
            tracing::debug!(
                version = self.version,
                size = index_buf.len() + SIZE_FIELD_LEN,
                "wrote schema index"
            );
        }

        let mut buf = Vec::new();
        let body = write_value(schema.root(), value, &mut buf)?;
        debug_assert_eq!(body, buf.len());

        total = codec::write_size(total, body + SIZE_FIELD_LEN, &mut self.sink)?;
        self.sink.write_all(&buf)?;
        total += buf.len();

        // Increment once per object; gates the index to the first call.
        self.objects += 1;
        self.pos += total;

        Ok(total)
    }
}

// ─── Record body ────────────────────────────────────────────────────────────

fn write_value(kind: &FieldKind, value: &Value, buf: &mut Vec<u8>) -> Result<usize, RsfError> {
    match kind {
        FieldKind::VarStr => codec::write_string(0, expect_str(value)?, buf),
        FieldKind::FixedStr(sz) => codec::write_fixed_string(0, *sz, expect_str(value)?, buf),
        FieldKind::Bool => {
            let b = value
                .as_bool()
                .ok_or_else(|| mismatch("bool", value))?;
            codec::write_bool(0, b, buf)
        }
        FieldKind::Int => {
            let i = value.as_int().ok_or_else(|| mismatch("int64", value))?;
            codec::write_int64(0, i, buf)
        }
        FieldKind::Float => {
            let f = value
                .as_float()
                .ok_or_else(|| mismatch("float", value))?;
            codec::write_float(0, f, buf)
        }
        FieldKind::Struct(fields) => write_struct(fields, value, buf),
        FieldKind::Array(def) => write_array(def, value, buf),
    }
}

fn write_struct(fields: &[FieldDef], value: &Value, buf: &mut Vec<u8>) -> Result<usize, RsfError> {
    if !value.is_struct() {
        return Err(mismatch("struct", value));
    }
    let mut total = 0;
    for def in fields {
        if def.ignore || def.skip {
            continue;
        }
        let field_val = value
            .get(&def.name)
            .ok_or_else(|| RsfError::InvalidValue(format!("missing field {}", def.name)))?;
        total += write_value(&def.kind, field_val, buf)?;
    }
    Ok(total)
}

fn write_array(def: &ArrayDef, value: &Value, buf: &mut Vec<u8>) -> Result<usize, RsfError> {
    let items = value.as_array().ok_or_else(|| mismatch("array", value))?;

    // Elements and the key table accumulate in side buffers; the array's
    // total size must precede both.
    let mut elem_buf = Vec::new();
    let mut key_table = Vec::new();
    let mut last_len = 0;
    for item in items {
        write_value(&def.element, item, &mut elem_buf)?;
        if let Some(key) = &def.key {
            write_key(def, key, item, elem_buf.len() - last_len, &mut key_table)?;
            last_len = elem_buf.len();
        }
    }

    let total = 2 * SIZE_FIELD_LEN + key_table.len() + elem_buf.len();
    codec::write_size(0, total, buf)?;
    codec::write_size(0, items.len(), buf)?;
    buf.extend_from_slice(&key_table);
    buf.extend_from_slice(&elem_buf);
    Ok(total)
}

/// Append one `(key, element size)` entry to an array's key table. The key
/// value comes from the element itself, whether or not the key field is
/// serialized in the element body.
fn write_key(
    def: &ArrayDef,
    key: &str,
    item: &Value,
    elem_size: usize,
    table: &mut Vec<u8>,
) -> Result<(), RsfError> {
    let key_def = key_field(def, key)?;
    let key_val = item
        .get(key)
        .ok_or_else(|| RsfError::InvalidValue(format!("missing key field {}", key)))?;
    match &key_def.kind {
        FieldKind::FixedStr(sz) => {
            codec::write_fixed_string(0, *sz, expect_str(key_val)?, table)?;
        }
        FieldKind::Int => {
            let i = key_val
                .as_int()
                .ok_or_else(|| mismatch("int64", key_val))?;
            codec::write_int64(0, i, table)?;
        }
        _ => return Err(RsfError::InvalidIndexKeyType),
    }
    codec::write_size(0, elem_size, table)?;
    Ok(())
}

/// Resolve the element field that keys an array. Only fixed strings and
/// int64s have the fixed width the key table requires.
pub(crate) fn key_field<'a>(def: &'a ArrayDef, key: &str) -> Result<&'a FieldDef, RsfError> {
    let FieldKind::Struct(fields) = &def.element else {
        return Err(RsfError::InvalidIndexKeyType);
    };
    fields
        .iter()
        .find(|f| f.name == key && !f.ignore)
        .ok_or(RsfError::InvalidIndexKeyType)
}

fn expect_str(value: &Value) -> Result<&str, RsfError> {
    value.as_str().ok_or_else(|| mismatch("string", value))
}

fn mismatch(expected: &str, actual: &Value) -> RsfError {
    RsfError::InvalidValue(format!("expected {}, got {:?}", expected, actual))
}

use super::key_field;
use crate::codec;
use crate::error::RsfError;
use crate::schema::{FieldDef, FieldKind};
use crate::types::*;

// ─── Schema index emission ──────────────────────────────────────────────────
//
// The index is a preorder walk of the declared schema. Per field:
//
//   [name: var string][type code: size]
//
// followed by type-specific extras:
//
//   FIXED_STR          [width: size]
//   ARRAY (v2)         [keyed: bool]
//                      [key type: size][key width: size]   if keyed
//                      [element kind: size]
//                      [subfield count: size] + subfield entries
//   ARRAY (v1)         [subfield count: size] + subfield entries
//
// Skip and ignore fields never appear: a skip field lives only in the
// enclosing array's key table, which the key type/width above describe.

/// Write the entries for a struct's fields. Returns the number of entries
/// written, which for a nested struct is its flattened field count.
pub(super) fn write_struct_entries(
    fields: &[FieldDef],
    version: u32,
    buf: &mut Vec<u8>,
) -> Result<usize, RsfError> {
    let mut count = 0;
    for def in fields {
        if def.ignore || def.skip {
            continue;
        }
        count += write_entry(def, version, buf)?;
    }
    Ok(count)
}

fn write_entry(def: &FieldDef, version: u32, buf: &mut Vec<u8>) -> Result<usize, RsfError> {
    match &def.kind {
        // A struct directly inside a struct flattens into its parent, in the
        // index just as in the record body.
        FieldKind::Struct(fields) => write_struct_entries(fields, version, buf),
        FieldKind::VarStr => write_scalar_entry(&def.name, TYPE_VAR_STR, buf),
        FieldKind::Bool => write_scalar_entry(&def.name, TYPE_BOOL, buf),
        FieldKind::Int => write_scalar_entry(&def.name, TYPE_INT64, buf),
        FieldKind::Float => write_scalar_entry(&def.name, TYPE_FLOAT, buf),
        FieldKind::FixedStr(sz) => {
            write_scalar_entry(&def.name, TYPE_FIXED_STR, buf)?;
            codec::write_size(0, *sz, buf)?;
            Ok(1)
        }
        FieldKind::Array(adef) => {
            codec::write_string(0, &def.name, buf)?;
            codec::write_size(0, TYPE_ARRAY, buf)?;

            if version >= VERSION2 {
                codec::write_bool(0, adef.key.is_some(), buf)?;
                if let Some(key) = &adef.key {
                    let key_def = key_field(adef, key)?;
                    let (code, width) = match &key_def.kind {
                        FieldKind::FixedStr(n) => (KIND_STR, *n),
                        FieldKind::Int => (KIND_INT64, SIZE_INT64),
                        _ => return Err(RsfError::InvalidIndexKeyType),
                    };
                    codec::write_size(0, code, buf)?;
                    codec::write_size(0, width, buf)?;
                }
                codec::write_size(0, adef.element.kind_code(), buf)?;
            }

            // Subfields go to a side buffer so their count can precede them.
            let mut sub = Vec::new();
            let subfields = match &adef.element {
                FieldKind::Struct(fields) => write_struct_entries(fields, version, &mut sub)?,
                _ => 0,
            };
            codec::write_size(0, subfields, buf)?;
            buf.extend_from_slice(&sub);
            Ok(1)
        }
    }
}

fn write_scalar_entry(name: &str, code: usize, buf: &mut Vec<u8>) -> Result<usize, RsfError> {
    codec::write_string(0, name, buf)?;
    codec::write_size(0, code, buf)?;
    Ok(1)
}

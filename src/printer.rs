use crate::error::RsfError;
use crate::reader::{IndexEntry, RsfReader};
use crate::types::*;
use std::io::{Read, Write};

// ─── Printer ────────────────────────────────────────────────────────────────

/// Dump every record of a composite stream as indented text.
///
/// Consumes the stream through the reader API only: the schema index drives
/// which scalar read happens where. Arrays of arrays (and version-1 scalar
/// arrays, whose element kind the index does not record) cannot be rendered
/// and fall back to a fixed message, skipping the array body.
pub fn print<W: Write, R: Read>(out: &mut W, r: &mut R) -> Result<(), RsfError> {
    let mut reader = RsfReader::new();
    let idx = reader.read_index(r)?;

    let mut i = 0;
    loop {
        i += 1;

        // Each record opens with its frame size; a clean end of stream here
        // means we are done.
        match reader.read_size(r) {
            Err(RsfError::EndOfStream) => return Ok(()),
            Err(err) => return Err(err),
            Ok(_) => {}
        }

        if i > 1 {
            writeln!(out)?;
        }

        let pad = " ".repeat(16);
        let header = format!("{pad}Object[{i}]{pad}");
        let line = "-".repeat(header.len());
        writeln!(out, "{line}\n{header}\n{line}")?;

        for f in &idx {
            print_field(f, out, r, &mut reader, 0)?;
        }
    }
}

fn print_field<W: Write, R: Read>(
    f: &IndexEntry,
    out: &mut W,
    r: &mut R,
    reader: &mut RsfReader,
    indent: usize,
) -> Result<(), RsfError> {
    let pad = "    ".repeat(indent);
    match f.field_type {
        TYPE_BOOL => {
            let b = reader.read_bool(r)?;
            writeln!(out, "{pad}{} (bool): {b}", f.name)?;
        }
        TYPE_INT64 => {
            let i = reader.read_int(r)?;
            writeln!(out, "{pad}{} (int): {i}", f.name)?;
        }
        TYPE_FLOAT => {
            let fl = reader.read_float(r)?;
            writeln!(out, "{pad}{} (float): {fl:.6}", f.name)?;
        }
        TYPE_FIXED_STR => {
            let s = reader.read_fixed_string(f.field_size, r)?;
            writeln!(out, "{pad}{} (string({})): {s}", f.name, f.field_size)?;
        }
        TYPE_VAR_STR => {
            let s = reader.read_string(r)?;
            writeln!(out, "{pad}{} (string): {s}", f.name)?;
        }
        TYPE_ARRAY => print_array(f, out, r, reader, indent)?,
        other => return Err(RsfError::UnknownFieldType(other)),
    }
    Ok(())
}

fn print_array<W: Write, R: Read>(
    f: &IndexEntry,
    out: &mut W,
    r: &mut R,
    reader: &mut RsfReader,
    indent: usize,
) -> Result<(), RsfError> {
    let pad = "    ".repeat(indent);
    let sz = reader.read_size(r)?;
    let count = reader.read_size(r)?;

    // Pull the element keys out of the key table first.
    let mut keys = Vec::new();
    if f.indexed {
        for _ in 0..count {
            match f.index_type {
                KIND_STR => keys.push(reader.read_fixed_string(f.index_size, r)?),
                KIND_INT64 => keys.push(reader.read_int(r)?.to_string()),
                other => return Err(RsfError::UnknownFieldType(other)),
            }
            // Element size; only needed for seeking, not for a full dump.
            reader.discard(SIZE_FIELD_LEN, r)?;
        }
    }

    if keys.is_empty() {
        writeln!(out, "{pad}{} (array({count})):", f.name)?;
    } else {
        writeln!(out, "{pad}{} (indexed array({count})):", f.name)?;
    }

    let elem_pad = format!("{pad}    ");
    for i in 0..count {
        if !f.subfields.is_empty() {
            match keys.get(i) {
                Some(key) => writeln!(out, "{elem_pad}- {key}")?,
                None => writeln!(out, "{elem_pad}-")?,
            }
            for subfield in &f.subfields {
                print_field(subfield, out, r, reader, indent + 1)?;
            }
        } else {
            write!(out, "{elem_pad}-")?;
            match f.elem_type {
                KIND_STR => {
                    let s = reader.read_string(r)?;
                    writeln!(out, "{s}")?;
                }
                KIND_BOOL => {
                    let b = reader.read_bool(r)?;
                    writeln!(out, "{b}")?;
                }
                // The producer's int kinds all land on the same 10-byte field.
                2..=6 => {
                    let d = reader.read_int(r)?;
                    writeln!(out, "{d}")?;
                }
                13 | 14 => {
                    let fl = reader.read_float(r)?;
                    writeln!(out, "{fl:.6}")?;
                }
                _ => {
                    writeln!(out, " cannot print data for arrays of arrays")?;
                    let rest = sz.checked_sub(2 * SIZE_FIELD_LEN).ok_or(
                        RsfError::SizeMismatch {
                            expected: 2 * SIZE_FIELD_LEN,
                            actual: sz,
                        },
                    )?;
                    reader.discard(rest, r)?;
                    break;
                }
            }
        }
    }
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

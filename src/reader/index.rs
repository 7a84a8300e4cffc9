use super::{fill, RsfReader};
use crate::error::RsfError;
use crate::types::*;
use smol_str::SmolStr;
use std::io::Read;

// ─── Schema index ───────────────────────────────────────────────────────────

/// The parsed schema index: one entry per top-level field, in declaration
/// order, with array subfields nested beneath their array entry.
pub type Index = Vec<IndexEntry>;

/// Path component naming the start of a field list, before its first entry.
pub const TOP: &str = "";

/// One node of the schema index. `field_type` and the kind codes are kept as
/// raw wire values: an unknown code is only an error once something tries to
/// skip or print the field, which keeps index parsing tolerant of newer
/// producers.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexEntry {
    pub name: SmolStr,
    pub field_type: usize,
    /// Byte width, for fixed-length strings.
    pub field_size: usize,
    /// Whether the array carries a key table (version 2 only; version-1
    /// indexes cannot represent this).
    pub indexed: bool,
    pub index_type: usize,
    pub index_size: usize,
    pub elem_type: usize,
    pub subfields: Index,
}

impl RsfReader {
    /// Read and cache the schema index. Must be the first read on a
    /// composite stream.
    ///
    /// The first three bytes distinguish the versions: a version-2 stream
    /// opens with the magic preamble, a version-1 stream opens directly with
    /// its index size, whose fourth byte is fetched separately once the
    /// preamble test fails.
    pub fn read_index<R: Read>(&mut self, r: &mut R) -> Result<Index, RsfError> {
        let mut header = [0u8; 3];
        fill(r, &mut header)?;

        let sz;
        if header == INDEX_VERSION_2 {
            self.index_version = VERSION2;
            self.pos += 3;
            sz = self.read_size(r)?;
        } else {
            self.index_version = VERSION1;
            let mut last = [0u8; 1];
            fill(r, &mut last)?;
            self.pos += 4;
            sz = u32::from_le_bytes([header[0], header[1], header[2], last[0]]) as usize;
        }

        // The index size includes its own size field, which is already
        // consumed either way.
        let final_pos = self.pos + sz - SIZE_FIELD_LEN;
        self.index = self.read_index_entries(r, final_pos, 0)?;
        tracing::debug!(
            version = self.index_version,
            entries = self.index.len(),
            "read schema index"
        );
        Ok(self.index.clone())
    }

    /// `limit` bounds the recursion for array subfields; zero means read
    /// until the index size is exhausted.
    fn read_index_entries<R: Read>(
        &mut self,
        r: &mut R,
        final_pos: usize,
        limit: usize,
    ) -> Result<Index, RsfError> {
        let mut entries = Vec::new();
        let mut pass = 0;
        loop {
            if limit != 0 && pass == limit {
                break;
            }
            pass += 1;

            if self.pos == final_pos {
                break;
            }

            let name = self.read_string(r)?;
            let field_type = self.read_size(r)?;

            let mut indexed = false;
            let mut index_type = 0;
            let mut index_size = 0;
            let mut elem_type = 0;
            let mut subfield_count = 0;
            if field_type == TYPE_ARRAY {
                // Version-1 indexes carry none of the array metadata.
                if self.index_version >= VERSION2 {
                    indexed = self.read_bool(r)?;
                    if indexed {
                        index_type = self.read_size(r)?;
                        index_size = self.read_size(r)?;
                    }
                    elem_type = self.read_size(r)?;
                }
                subfield_count = self.read_size(r)?;
            }

            let mut field_size = 0;
            if field_type == TYPE_FIXED_STR {
                field_size = self.read_size(r)?;
            }

            // A bad index can run the cursor past the declared size.
            if self.pos > final_pos {
                return Err(RsfError::IndexOverrun {
                    pos: self.pos,
                    limit: final_pos,
                });
            }

            let subfields = if subfield_count > 0 {
                self.read_index_entries(r, final_pos, subfield_count)?
            } else {
                Vec::new()
            };

            entries.push(IndexEntry {
                name: SmolStr::from(name),
                field_type,
                field_size,
                indexed,
                index_type,
                index_size,
                elem_type,
                subfields,
            });
        }
        Ok(entries)
    }

    // ─── Navigation ─────────────────────────────────────────────────────────

    /// Reposition the cursor so the next read starts on the field at `path`,
    /// skipping every sibling between the current logical position and the
    /// target. The target must be in the same field list as (or an ancestor
    /// list of) the current position; entering an array element is done by
    /// naming the array and a subfield.
    ///
    /// An unknown path fails with [`RsfError::NoSuchField`] before any byte
    /// is consumed, which is what makes probing for newer-schema fields
    /// safe.
    pub fn advance_to<R: Read>(&mut self, r: &mut R, path: &[&str]) -> Result<(), RsfError> {
        let mut at: Vec<SmolStr> = self.at.clone();
        if path.len() < at.len() {
            at.truncate(path.len());
        } else if at.len() < path.len() {
            at.push(SmolStr::from(TOP));
        }

        let steps = {
            let at_names: Vec<&str> = at.iter().map(|s| s.as_str()).collect();
            let (from, from_pos) = entry_set(&self.index, &at_names)?;
            let (_, to_pos) = entry_set(&self.index, path)?;

            let start = from_pos.map_or(0, |p| p + 1);
            match to_pos {
                Some(to) if start < to => from[start..to]
                    .iter()
                    .map(|e| (e.field_type, e.field_size))
                    .collect(),
                _ => Vec::new(),
            }
        };
        for (field_type, field_size) in steps {
            self.advance_one(field_type, field_size, r)?;
        }

        self.at = path.iter().map(|s| SmolStr::from(*s)).collect();
        Ok(())
    }

    /// Skip the remainder of the current field list, parking the cursor at
    /// the end of the enclosing element or frame. With an empty `path`, the
    /// logical position pops to the parent's top so the next
    /// [`advance_to`](RsfReader::advance_to) enters the next array element;
    /// otherwise the position is set to `path`.
    pub fn advance_to_next_element<R: Read>(
        &mut self,
        r: &mut R,
        path: &[&str],
    ) -> Result<(), RsfError> {
        let steps = {
            let at_names: Vec<&str> = self.at.iter().map(|s| s.as_str()).collect();
            let (from, from_pos) = entry_set(&self.index, &at_names)?;
            let start = from_pos.map_or(0, |p| p + 1);
            from[start..]
                .iter()
                .map(|e| (e.field_type, e.field_size))
                .collect::<Vec<_>>()
        };
        for (field_type, field_size) in steps {
            self.advance_one(field_type, field_size, r)?;
        }

        if !path.is_empty() {
            self.at = path.iter().map(|s| SmolStr::from(*s)).collect();
        } else if self.at.is_empty() {
            self.at = vec![SmolStr::from(TOP)];
        } else {
            self.at.pop();
            self.at.push(SmolStr::from(TOP));
        }
        Ok(())
    }

    /// Skip one field without parsing its contents. Fixed fields discard
    /// their known width; var strings and arrays read their size prefix and
    /// discard the rest.
    fn advance_one<R: Read>(
        &mut self,
        field_type: usize,
        field_size: usize,
        r: &mut R,
    ) -> Result<(), RsfError> {
        match field_type {
            TYPE_FIXED_STR => self.discard(field_size, r),
            TYPE_ARRAY => {
                let sz = self.read_size(r)?;
                // The declared size includes the size field itself.
                let rest = sz.checked_sub(SIZE_FIELD_LEN).ok_or(RsfError::SizeMismatch {
                    expected: SIZE_FIELD_LEN,
                    actual: sz,
                })?;
                self.discard(rest, r)
            }
            TYPE_VAR_STR => {
                let sz = self.read_size(r)?;
                self.discard(sz, r)
            }
            TYPE_BOOL => self.discard(1, r),
            TYPE_INT64 => self.discard(SIZE_INT64, r),
            TYPE_FLOAT => self.discard(SIZE_FLOAT, r),
            other => Err(RsfError::UnknownFieldType(other)),
        }
    }
}

/// Resolve a path to the field list containing its last component, plus that
/// component's position within the list (`None` for [`TOP`]).
fn entry_set<'a>(
    index: &'a [IndexEntry],
    path: &[&str],
) -> Result<(&'a [IndexEntry], Option<usize>), RsfError> {
    let path: &[&str] = if path.is_empty() { &[TOP] } else { path };

    let mut at = index;
    let mut next = index;
    let mut at_pos = None;
    for field in path {
        let mut found = false;
        for (pos, entry) in next.iter().enumerate() {
            if entry.name == *field || *field == TOP {
                found = true;
                at = next;
                at_pos = if *field == TOP { None } else { Some(pos) };
                next = &entry.subfields;
                break;
            }
        }
        if !found {
            return Err(RsfError::NoSuchField);
        }
    }
    Ok((at, at_pos))
}

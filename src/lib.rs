//! Repository Snapshot Format (RSF).
//!
//! A compact, self-describing binary format for streaming large sequences of
//! structured records, built for package-repository snapshots. A composite
//! stream opens with a schema index describing every field of every record
//! that follows; records themselves are size-prefixed frames. Because every
//! field is either fixed-width or size-prefixed, a reader can skip to any
//! field or array element in O(size) without parsing what it skips, and
//! producers and consumers whose schemas have drifted apart remain
//! compatible as long as the drift is additive: unknown fields are skipped,
//! missing fields surface as [`RsfError::NoSuchField`].
//!
//! Writing is schema-driven: the caller declares a [`Schema`] carrying the
//! per-field metadata (`fixed` widths, `skip`, `ignore`, array keys) and
//! hands [`RsfWriter::write_object`] a matching [`Value`] per record.
//! Reading is navigational: [`RsfReader::read_index`] caches the schema
//! index, then [`RsfReader::advance_to`] repositions the byte cursor over
//! arbitrary fields.

mod codec;
mod error;
mod printer;
mod reader;
mod schema;
mod types;
mod value;
mod writer;

pub use codec::{write_bool, write_fixed_string, write_float, write_int64, write_size, write_string};
pub use error::RsfError;
pub use printer::print;
pub use reader::{Index, IndexEntry, RsfReader, TOP};
pub use schema::{ArrayDef, FieldDef, FieldKind, Schema};
pub use types::*;
pub use value::Value;
pub use writer::RsfWriter;

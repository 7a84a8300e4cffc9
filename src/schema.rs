use crate::types::*;
use smol_str::SmolStr;

// ─── Schema ─────────────────────────────────────────────────────────────────

/// The caller-declared shape of every record in a stream.
///
/// A schema plays the role struct annotations play in a statically-reflected
/// producer: it names each field, fixes declaration order, and carries the
/// per-field metadata the codec needs (`fixed` width, `skip`, `ignore`, and
/// the array key). The writer validates the supplied
/// [`Value`](crate::value::Value) against it while serializing.
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    root: FieldKind,
}

impl Schema {
    /// A record schema: an ordered list of named fields.
    pub fn record(fields: Vec<FieldDef>) -> Self {
        Schema {
            root: FieldKind::Struct(fields),
        }
    }

    /// A bare scalar or array stream (no schema index is written).
    pub fn bare(kind: FieldKind) -> Self {
        Schema { root: kind }
    }

    #[inline]
    pub fn root(&self) -> &FieldKind {
        &self.root
    }

    /// Whether streams of this schema carry a schema index.
    #[inline]
    pub fn is_composite(&self) -> bool {
        matches!(self.root, FieldKind::Struct(_))
    }
}

// ─── Field definitions ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    pub name: SmolStr,
    pub kind: FieldKind,
    /// Present in the declared schema but never serialized; a skip field's
    /// value is only consulted when it keys an enclosing array.
    pub skip: bool,
    /// Invisible to the codec entirely.
    pub ignore: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    VarStr,
    /// A string of exactly the declared byte width; no size header on disk.
    FixedStr(usize),
    Bool,
    Int,
    Float,
    Struct(Vec<FieldDef>),
    Array(Box<ArrayDef>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayDef {
    /// Name of the element field whose value keys the array's key table,
    /// or `None` for an unkeyed array.
    pub key: Option<SmolStr>,
    pub element: FieldKind,
}

impl FieldDef {
    fn new(name: impl Into<SmolStr>, kind: FieldKind) -> Self {
        FieldDef {
            name: name.into(),
            kind,
            skip: false,
            ignore: false,
        }
    }

    pub fn string(name: impl Into<SmolStr>) -> Self {
        Self::new(name, FieldKind::VarStr)
    }

    pub fn fixed_string(name: impl Into<SmolStr>, size: usize) -> Self {
        Self::new(name, FieldKind::FixedStr(size))
    }

    pub fn boolean(name: impl Into<SmolStr>) -> Self {
        Self::new(name, FieldKind::Bool)
    }

    pub fn int(name: impl Into<SmolStr>) -> Self {
        Self::new(name, FieldKind::Int)
    }

    pub fn float(name: impl Into<SmolStr>) -> Self {
        Self::new(name, FieldKind::Float)
    }

    pub fn array(name: impl Into<SmolStr>, element: FieldKind) -> Self {
        Self::new(
            name,
            FieldKind::Array(Box::new(ArrayDef {
                key: None,
                element,
            })),
        )
    }

    /// An array keyed by the named element field. The key field must be a
    /// fixed string or an int64 so the key table has a fixed stride.
    pub fn keyed_array(
        name: impl Into<SmolStr>,
        key: impl Into<SmolStr>,
        element: FieldKind,
    ) -> Self {
        Self::new(
            name,
            FieldKind::Array(Box::new(ArrayDef {
                key: Some(key.into()),
                element,
            })),
        )
    }

    pub fn skip(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn ignore(mut self) -> Self {
        self.ignore = true;
        self
    }
}

impl FieldKind {
    /// Element struct shorthand for array definitions.
    pub fn record(fields: Vec<FieldDef>) -> Self {
        FieldKind::Struct(fields)
    }

    /// The element/key kind code recorded in version-2 indexes.
    pub(crate) fn kind_code(&self) -> usize {
        match self {
            FieldKind::VarStr | FieldKind::FixedStr(_) => KIND_STR,
            FieldKind::Bool => KIND_BOOL,
            FieldKind::Int => KIND_INT64,
            FieldKind::Float => KIND_FLOAT,
            FieldKind::Struct(_) => KIND_STRUCT,
            FieldKind::Array(_) => KIND_ARRAY,
        }
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders() {
        let schema = Schema::record(vec![
            FieldDef::string("company"),
            FieldDef::boolean("ready"),
            FieldDef::keyed_array(
                "list",
                "date",
                FieldKind::record(vec![
                    FieldDef::fixed_string("date", 10).skip(),
                    FieldDef::string("name"),
                    FieldDef::boolean("verified"),
                ]),
            ),
        ]);
        assert!(schema.is_composite());

        let FieldKind::Struct(fields) = schema.root() else {
            panic!("expected struct root");
        };
        assert_eq!(fields.len(), 3);
        assert!(fields[0].name == "company");
        let FieldKind::Array(def) = &fields[2].kind else {
            panic!("expected array");
        };
        assert_eq!(def.key.as_deref(), Some("date"));

        let bare = Schema::bare(FieldKind::VarStr);
        assert!(!bare.is_composite());
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!(FieldKind::VarStr.kind_code(), KIND_STR);
        assert_eq!(FieldKind::FixedStr(8).kind_code(), KIND_STR);
        assert_eq!(FieldKind::Bool.kind_code(), KIND_BOOL);
        assert_eq!(FieldKind::Int.kind_code(), KIND_INT64);
        assert_eq!(FieldKind::Float.kind_code(), KIND_FLOAT);
        assert_eq!(FieldKind::record(vec![]).kind_code(), KIND_STRUCT);
    }
}

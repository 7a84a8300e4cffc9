// ─── Error ──────────────────────────────────────────────────────────────────

/// Errors surfaced by the codec.
///
/// `NoSuchField` is the only variant ordinary callers are expected to branch
/// on: it is how a consumer discovers that the producer's schema predates a
/// field it asked for. `EndOfStream` terminates record iteration and is only
/// returned when the stream ends exactly on a frame boundary; truncation
/// inside a field surfaces as `Io`.
#[derive(Debug)]
pub enum RsfError {
    Io(std::io::Error),
    SizeMismatch { expected: usize, actual: usize },
    UnknownFieldType(usize),
    InvalidIndexKeyType,
    IndexOverrun { pos: usize, limit: usize },
    NoSuchField,
    EndOfStream,
    InvalidValue(String),
}

impl std::fmt::Display for RsfError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RsfError::Io(err) => write!(f, "i/o error: {}", err),
            RsfError::SizeMismatch { expected, actual } => {
                write!(f, "size {} does not match expected size {}", actual, expected)
            }
            RsfError::UnknownFieldType(code) => {
                write!(f, "unexpected index field type {}", code)
            }
            RsfError::InvalidIndexKeyType => write!(f, "invalid index field type"),
            RsfError::IndexOverrun { pos, limit } => {
                write!(
                    f,
                    "unexpected index position {}; index max pos reported is {}",
                    pos, limit
                )
            }
            RsfError::NoSuchField => write!(f, "field not found"),
            RsfError::EndOfStream => write!(f, "end of stream"),
            RsfError::InvalidValue(msg) => write!(f, "invalid value: {}", msg),
        }
    }
}

impl std::error::Error for RsfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RsfError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RsfError {
    fn from(err: std::io::Error) -> Self {
        RsfError::Io(err)
    }
}

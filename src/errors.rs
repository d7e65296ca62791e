use thiserror::Error;

/// Errors that can occur when reading, building, or writing PLY documents.
///
/// Every failure is surfaced to the immediate caller as one of these variants;
/// the codec performs no silent recovery (the single exception is the signed
/// retry in [`Element::get_list_indices`](crate::ply::Element::get_list_indices),
/// which is documented there).
#[derive(Debug, Error)]
pub enum PlyError {
    /// An I/O error occurred on the underlying stream.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The first line of the input was not `ply`.
    #[error("not a PLY file: the first line must be exactly 'ply'")]
    MalformedMagic,
    /// The format line declared an unknown encoding.
    #[error(
        "unsupported encoding '{0}' (expected ascii, binary_little_endian or binary_big_endian)"
    )]
    UnsupportedEncoding(String),
    /// A header line could not be matched against the header grammar.
    #[error("line {line}: unrecognized header line '{content}'")]
    UnrecognizedHeaderLine { line: usize, content: String },
    /// A property declaration named a type this codec does not know.
    #[error("line {line}: unrecognized type '{token}'")]
    UnrecognizedType { line: usize, token: String },
    /// A property line appeared before any element line.
    #[error("line {line}: property declared before any element")]
    NoOpenElement { line: usize },
    /// Data attached to an element does not match its declared instance count.
    #[error("property '{property}' has {actual} values but its element declares {expected}")]
    SizeMismatch {
        property: String,
        expected: usize,
        actual: usize,
    },
    /// Two elements, or two properties of one element, share a name.
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: &'static str, name: String },
    /// An element or property name contains whitespace.
    #[error("illegal whitespace in {kind} name '{name}'")]
    WhitespaceInName { kind: &'static str, name: String },
    /// No element with the given name exists in the document.
    #[error("no element named '{0}'")]
    ElementNotFound(String),
    /// The element has no property with the given name.
    #[error("element '{element}' has no property named '{property}'")]
    PropertyNotFound { element: String, property: String },
    /// The stored type cannot be widened to the requested type.
    #[error("property '{property}' is stored as {stored} and cannot be read as {requested}")]
    TypeMismatch {
        property: String,
        requested: &'static str,
        stored: String,
    },
    /// A list value or list length does not fit the bounded on-disk type.
    #[error("value {value} in list property '{property}' does not fit the on-disk type")]
    ListValueOverflow { property: String, value: u64 },
    /// The input ended before all declared data was read.
    #[error("unexpected end of input while {0}")]
    TruncatedInput(String),
    /// A payload token could not be parsed as the declared type.
    #[error("line {line}: invalid token '{token}' for type {ty}")]
    InvalidToken {
        line: usize,
        token: String,
        ty: &'static str,
    },
}

/// A specialized `Result` type for PLY operations.
pub type PlyResult<T> = Result<T, PlyError>;

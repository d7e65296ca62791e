//! The primitive type lattice.
//!
//! PLY payloads are built from eight scalar types. [`ScalarType`] tags them and
//! carries the metadata the codecs need: the canonical header spelling, the
//! wire width, and the signed/unsigned/float family. [`RequestType`] extends
//! the lattice with the 64-bit integer rungs that callers may request through
//! the typed getters even though PLY cannot store them on disk.

/// Scalar type used to encode properties in the payload.
///
/// For the translation to rust types, see individual documentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarType {
    /// Signed 8 bit integer, rust: `i8`.
    Char,
    /// Unsigned 8 bit integer, rust: `u8`.
    UChar,
    /// Signed 16 bit integer, rust: `i16`.
    Short,
    /// Unsigned 16 bit integer, rust: `u16`.
    UShort,
    /// Signed 32 bit integer, rust: `i32`.
    Int,
    /// Unsigned 32 bit integer, rust: `u32`.
    UInt,
    /// 32 bit floating point number, rust: `f32`.
    Float,
    /// 64 bit floating point number, rust: `f64`.
    Double,
}

impl ScalarType {
    /// Resolves a type token as spelled in a header.
    ///
    /// Both the classic names (`char`, `uchar`, ...) and the sized aliases
    /// (`int8`, `uint8`, ...) are accepted.
    pub fn from_token(token: &str) -> Option<ScalarType> {
        match token {
            "char" | "int8" => Some(ScalarType::Char),
            "uchar" | "uint8" => Some(ScalarType::UChar),
            "short" | "int16" => Some(ScalarType::Short),
            "ushort" | "uint16" => Some(ScalarType::UShort),
            "int" | "int32" => Some(ScalarType::Int),
            "uint" | "uint32" => Some(ScalarType::UInt),
            "float" | "float32" => Some(ScalarType::Float),
            "double" | "float64" => Some(ScalarType::Double),
            _ => None,
        }
    }

    /// The canonical name, as emitted into headers.
    pub fn name(self) -> &'static str {
        match self {
            ScalarType::Char => "char",
            ScalarType::UChar => "uchar",
            ScalarType::Short => "short",
            ScalarType::UShort => "ushort",
            ScalarType::Int => "int",
            ScalarType::UInt => "uint",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
        }
    }

    /// Number of bytes one value of this type occupies on disk.
    pub fn width(self) -> usize {
        match self {
            ScalarType::Char | ScalarType::UChar => 1,
            ScalarType::Short | ScalarType::UShort => 2,
            ScalarType::Int | ScalarType::UInt | ScalarType::Float => 4,
            ScalarType::Double => 8,
        }
    }

    /// Returns `true` for `char`, `short` and `int`.
    pub fn is_signed_integer(self) -> bool {
        matches!(self, ScalarType::Char | ScalarType::Short | ScalarType::Int)
    }

    /// Returns `true` for `uchar`, `ushort` and `uint`.
    pub fn is_unsigned_integer(self) -> bool {
        matches!(self, ScalarType::UChar | ScalarType::UShort | ScalarType::UInt)
    }

    /// Returns `true` for `float` and `double`.
    pub fn is_float(self) -> bool {
        matches!(self, ScalarType::Float | ScalarType::Double)
    }

    /// Width of the list count field a declaration with this count type uses.
    ///
    /// Only integer types can carry a count; `float`/`double` return `None`.
    /// The count field is read as unsigned even when a signed count type was
    /// declared.
    pub fn count_width(self) -> Option<CountWidth> {
        match self {
            ScalarType::Char | ScalarType::UChar => Some(CountWidth::One),
            ScalarType::Short | ScalarType::UShort => Some(CountWidth::Two),
            ScalarType::Int | ScalarType::UInt => Some(CountWidth::Four),
            ScalarType::Float | ScalarType::Double => None,
        }
    }
}

/// On-disk width of the count field preceding each binary list entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountWidth {
    /// One byte (`char`/`uchar` count types).
    One,
    /// Two bytes (`short`/`ushort`).
    Two,
    /// Four bytes (`int`/`uint`); also the width every write uses.
    Four,
}

/// Type tags for the request side of the promotion walk.
///
/// These mirror [`ScalarType`] plus the two 64-bit integer rungs. A request
/// for type `D` succeeds against data stored as `S` exactly when `S` is
/// reachable from `D` by repeatedly stepping to [`RequestType::narrower`]:
/// equal-or-smaller width within the same family, never across signedness.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
}

impl RequestType {
    /// Name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            RequestType::Int8 => "int8",
            RequestType::Int16 => "int16",
            RequestType::Int32 => "int32",
            RequestType::Int64 => "int64",
            RequestType::UInt8 => "uint8",
            RequestType::UInt16 => "uint16",
            RequestType::UInt32 => "uint32",
            RequestType::UInt64 => "uint64",
            RequestType::Float32 => "float32",
            RequestType::Float64 => "float64",
        }
    }

    /// The next-narrower type in the same family, the chain the promotion
    /// walk steps down.
    pub fn narrower(self) -> Option<RequestType> {
        match self {
            RequestType::Int64 => Some(RequestType::Int32),
            RequestType::Int32 => Some(RequestType::Int16),
            RequestType::Int16 => Some(RequestType::Int8),
            RequestType::Int8 => None,
            RequestType::UInt64 => Some(RequestType::UInt32),
            RequestType::UInt32 => Some(RequestType::UInt16),
            RequestType::UInt16 => Some(RequestType::UInt8),
            RequestType::UInt8 => None,
            RequestType::Float64 => Some(RequestType::Float32),
            RequestType::Float32 => None,
        }
    }

    /// The stored type occupying the same rung as this request type, if any.
    ///
    /// The 64-bit integer rungs have no stored counterpart.
    pub fn stored_rung(self) -> Option<ScalarType> {
        match self {
            RequestType::Int8 => Some(ScalarType::Char),
            RequestType::Int16 => Some(ScalarType::Short),
            RequestType::Int32 => Some(ScalarType::Int),
            RequestType::UInt8 => Some(ScalarType::UChar),
            RequestType::UInt16 => Some(ScalarType::UShort),
            RequestType::UInt32 => Some(ScalarType::UInt),
            RequestType::Float32 => Some(ScalarType::Float),
            RequestType::Float64 => Some(ScalarType::Double),
            RequestType::Int64 | RequestType::UInt64 => None,
        }
    }

    /// Whether data stored as `stored` may be read out as `self`.
    ///
    /// Walks down the narrowing chain from `self` until it reaches the rung
    /// holding `stored`, or runs out of rungs.
    pub fn promotes_from(self, stored: ScalarType) -> bool {
        let mut rung = self;
        loop {
            if rung.stored_rung() == Some(stored) {
                return true;
            }
            match rung.narrower() {
                Some(narrower) => rung = narrower,
                None => return false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_aliases_resolve() {
        assert_eq!(ScalarType::from_token("char"), Some(ScalarType::Char));
        assert_eq!(ScalarType::from_token("int8"), Some(ScalarType::Char));
        assert_eq!(ScalarType::from_token("uint16"), Some(ScalarType::UShort));
        assert_eq!(ScalarType::from_token("float64"), Some(ScalarType::Double));
        assert_eq!(ScalarType::from_token("int64"), None);
        assert_eq!(ScalarType::from_token(""), None);
    }

    #[test]
    fn widths_match_wire_format() {
        assert_eq!(ScalarType::Char.width(), 1);
        assert_eq!(ScalarType::UShort.width(), 2);
        assert_eq!(ScalarType::Float.width(), 4);
        assert_eq!(ScalarType::Double.width(), 8);
    }

    #[test]
    fn family_predicates_partition_the_types() {
        let all = [
            ScalarType::Char,
            ScalarType::UChar,
            ScalarType::Short,
            ScalarType::UShort,
            ScalarType::Int,
            ScalarType::UInt,
            ScalarType::Float,
            ScalarType::Double,
        ];
        for ty in all {
            let families = [
                ty.is_signed_integer(),
                ty.is_unsigned_integer(),
                ty.is_float(),
            ];
            assert_eq!(families.iter().filter(|&&f| f).count(), 1, "{}", ty.name());
        }
        assert!(ScalarType::Char.is_signed_integer());
        assert!(ScalarType::UShort.is_unsigned_integer());
        assert!(ScalarType::Double.is_float());
    }

    #[test]
    fn count_widths() {
        assert_eq!(ScalarType::UChar.count_width(), Some(CountWidth::One));
        assert_eq!(ScalarType::Char.count_width(), Some(CountWidth::One));
        assert_eq!(ScalarType::Short.count_width(), Some(CountWidth::Two));
        assert_eq!(ScalarType::UInt.count_width(), Some(CountWidth::Four));
        assert_eq!(ScalarType::Float.count_width(), None);
        assert_eq!(ScalarType::Double.count_width(), None);
    }

    #[test]
    fn promotion_stays_in_family() {
        assert!(RequestType::Float64.promotes_from(ScalarType::Float));
        assert!(!RequestType::Float32.promotes_from(ScalarType::Double));
        assert!(RequestType::Int64.promotes_from(ScalarType::Char));
        assert!(RequestType::UInt64.promotes_from(ScalarType::UChar));
        assert!(!RequestType::UInt64.promotes_from(ScalarType::Int));
        assert!(!RequestType::Int64.promotes_from(ScalarType::UChar));
        assert!(!RequestType::Int8.promotes_from(ScalarType::Short));
        assert!(RequestType::Int32.promotes_from(ScalarType::Int));
    }
}

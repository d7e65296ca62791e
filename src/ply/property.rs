//! Property columns and typed access.
//!
//! PLY payload values are dynamically typed according to the header. This
//! module provides:
//! - [`PropertyData`], a closed tagged union over the eight scalar types
//!   crossed with the scalar/list shapes, holding one column of values.
//! - [`Property`], a named column together with its read-time list metadata.
//! - [`PlyScalar`] / [`PlyStorable`], the traits behind the typed getters and
//!   the programmatic add path.

use std::fmt::Display;
use std::io::{Read, Write};
use std::str::FromStr;

use byteorder::{ByteOrder, ReadBytesExt, WriteBytesExt};

use crate::errors::{PlyError, PlyResult};

use super::scalar::{CountWidth, RequestType, ScalarType};

/// Column storage for one property: one scalar per instance, or one
/// variable-length list per instance.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyData {
    /// Signed 8-bit scalars.
    Char(Vec<i8>),
    /// Unsigned 8-bit scalars.
    UChar(Vec<u8>),
    /// Signed 16-bit scalars.
    Short(Vec<i16>),
    /// Unsigned 16-bit scalars.
    UShort(Vec<u16>),
    /// Signed 32-bit scalars.
    Int(Vec<i32>),
    /// Unsigned 32-bit scalars.
    UInt(Vec<u32>),
    /// 32-bit floating point scalars.
    Float(Vec<f32>),
    /// 64-bit floating point scalars.
    Double(Vec<f64>),
    /// Lists of signed 8-bit integers.
    ListChar(Vec<Vec<i8>>),
    /// Lists of unsigned 8-bit integers.
    ListUChar(Vec<Vec<u8>>),
    /// Lists of signed 16-bit integers.
    ListShort(Vec<Vec<i16>>),
    /// Lists of unsigned 16-bit integers.
    ListUShort(Vec<Vec<u16>>),
    /// Lists of signed 32-bit integers.
    ListInt(Vec<Vec<i32>>),
    /// Lists of unsigned 32-bit integers.
    ListUInt(Vec<Vec<u32>>),
    /// Lists of 32-bit floating point values.
    ListFloat(Vec<Vec<f32>>),
    /// Lists of 64-bit floating point values.
    ListDouble(Vec<Vec<f64>>),
}

impl PropertyData {
    /// Empty storage for a freshly declared property.
    pub(crate) fn empty(ty: ScalarType, list: bool) -> PropertyData {
        if list {
            match ty {
                ScalarType::Char => PropertyData::ListChar(Vec::new()),
                ScalarType::UChar => PropertyData::ListUChar(Vec::new()),
                ScalarType::Short => PropertyData::ListShort(Vec::new()),
                ScalarType::UShort => PropertyData::ListUShort(Vec::new()),
                ScalarType::Int => PropertyData::ListInt(Vec::new()),
                ScalarType::UInt => PropertyData::ListUInt(Vec::new()),
                ScalarType::Float => PropertyData::ListFloat(Vec::new()),
                ScalarType::Double => PropertyData::ListDouble(Vec::new()),
            }
        } else {
            match ty {
                ScalarType::Char => PropertyData::Char(Vec::new()),
                ScalarType::UChar => PropertyData::UChar(Vec::new()),
                ScalarType::Short => PropertyData::Short(Vec::new()),
                ScalarType::UShort => PropertyData::UShort(Vec::new()),
                ScalarType::Int => PropertyData::Int(Vec::new()),
                ScalarType::UInt => PropertyData::UInt(Vec::new()),
                ScalarType::Float => PropertyData::Float(Vec::new()),
                ScalarType::Double => PropertyData::Double(Vec::new()),
            }
        }
    }

    /// The scalar type of the stored values (for lists, of the list entries).
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            PropertyData::Char(_) | PropertyData::ListChar(_) => ScalarType::Char,
            PropertyData::UChar(_) | PropertyData::ListUChar(_) => ScalarType::UChar,
            PropertyData::Short(_) | PropertyData::ListShort(_) => ScalarType::Short,
            PropertyData::UShort(_) | PropertyData::ListUShort(_) => ScalarType::UShort,
            PropertyData::Int(_) | PropertyData::ListInt(_) => ScalarType::Int,
            PropertyData::UInt(_) | PropertyData::ListUInt(_) => ScalarType::UInt,
            PropertyData::Float(_) | PropertyData::ListFloat(_) => ScalarType::Float,
            PropertyData::Double(_) | PropertyData::ListDouble(_) => ScalarType::Double,
        }
    }

    /// Whether this column holds lists rather than scalars.
    pub fn is_list(&self) -> bool {
        matches!(
            self,
            PropertyData::ListChar(_)
                | PropertyData::ListUChar(_)
                | PropertyData::ListShort(_)
                | PropertyData::ListUShort(_)
                | PropertyData::ListInt(_)
                | PropertyData::ListUInt(_)
                | PropertyData::ListFloat(_)
                | PropertyData::ListDouble(_)
        )
    }

    /// Number of instances stored in this column.
    pub fn len(&self) -> usize {
        match self {
            PropertyData::Char(v) => v.len(),
            PropertyData::UChar(v) => v.len(),
            PropertyData::Short(v) => v.len(),
            PropertyData::UShort(v) => v.len(),
            PropertyData::Int(v) => v.len(),
            PropertyData::UInt(v) => v.len(),
            PropertyData::Float(v) => v.len(),
            PropertyData::Double(v) => v.len(),
            PropertyData::ListChar(v) => v.len(),
            PropertyData::ListUChar(v) => v.len(),
            PropertyData::ListShort(v) => v.len(),
            PropertyData::ListUShort(v) => v.len(),
            PropertyData::ListInt(v) => v.len(),
            PropertyData::ListUInt(v) => v.len(),
            PropertyData::ListFloat(v) => v.len(),
            PropertyData::ListDouble(v) => v.len(),
        }
    }

    /// Returns `true` if the column holds no instances.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Human-readable type description used in error messages.
    pub(crate) fn type_description(&self) -> String {
        if self.is_list() {
            format!("list of {}", self.scalar_type().name())
        } else {
            self.scalar_type().name().to_string()
        }
    }
}

/// One named column of a PLY element.
///
/// A property exclusively owns its data; re-adding a property with the same
/// name replaces the column wholesale.
#[derive(Debug, Clone)]
pub struct Property {
    /// Name as declared in the header; unique within its element.
    pub name: String,
    /// The column payload.
    pub data: PropertyData,
    /// On-disk width of the list count field, as declared in the header.
    /// Only consulted while reading a binary payload; writes always emit a
    /// four-byte unsigned count.
    pub(crate) count_width: CountWidth,
}

/// Equality ignores the read-time count width: two documents that hold the
/// same values compare equal even if one was read from a file declaring a
/// narrower count type.
impl PartialEq for Property {
    fn eq(&self, other: &Property) -> bool {
        self.name == other.name && self.data == other.data
    }
}

impl Property {
    pub(crate) fn new(name: String, data: PropertyData) -> Property {
        Property {
            name,
            data,
            count_width: CountWidth::Four,
        }
    }

    /// A property as declared in a header line, with empty storage.
    /// `count_width` is `Some` exactly for list declarations.
    pub(crate) fn declared(
        name: String,
        ty: ScalarType,
        count_width: Option<CountWidth>,
    ) -> Property {
        Property {
            name,
            data: PropertyData::empty(ty, count_width.is_some()),
            count_width: count_width.unwrap_or(CountWidth::Four),
        }
    }

    /// The scalar type of the stored values.
    pub fn scalar_type(&self) -> ScalarType {
        self.data.scalar_type()
    }

    /// Whether this is a list property.
    pub fn is_list(&self) -> bool {
        self.data.is_list()
    }

    /// Number of instances stored.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if no instances are stored.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Emits this property's header declaration line.
    ///
    /// List counts are always declared as `uint`, whatever width the property
    /// was read with.
    pub(crate) fn write_declaration<W: Write>(&self, out: &mut W) -> PlyResult<()> {
        if self.is_list() {
            writeln!(out, "property list uint {} {}", self.scalar_type().name(), self.name)?;
        } else {
            writeln!(out, "property {} {}", self.scalar_type().name(), self.name)?;
        }
        Ok(())
    }

    /// Consumes this property's tokens for one instance from a shared data
    /// line cursor: one token for a scalar, a count token plus `count` value
    /// tokens for a list.
    pub(crate) fn read_ascii<'a, I>(&mut self, tokens: &mut I, line: usize) -> PlyResult<()>
    where
        I: Iterator<Item = &'a str>,
    {
        match &mut self.data {
            PropertyData::Char(v) => v.push(parse_token(tokens, "char", line)?),
            PropertyData::UChar(v) => v.push(parse_token(tokens, "uchar", line)?),
            PropertyData::Short(v) => v.push(parse_token(tokens, "short", line)?),
            PropertyData::UShort(v) => v.push(parse_token(tokens, "ushort", line)?),
            PropertyData::Int(v) => v.push(parse_token(tokens, "int", line)?),
            PropertyData::UInt(v) => v.push(parse_token(tokens, "uint", line)?),
            PropertyData::Float(v) => v.push(parse_token(tokens, "float", line)?),
            PropertyData::Double(v) => v.push(parse_token(tokens, "double", line)?),
            PropertyData::ListChar(rows) => rows.push(parse_list_tokens(tokens, "char", line)?),
            PropertyData::ListUChar(rows) => rows.push(parse_list_tokens(tokens, "uchar", line)?),
            PropertyData::ListShort(rows) => rows.push(parse_list_tokens(tokens, "short", line)?),
            PropertyData::ListUShort(rows) => rows.push(parse_list_tokens(tokens, "ushort", line)?),
            PropertyData::ListInt(rows) => rows.push(parse_list_tokens(tokens, "int", line)?),
            PropertyData::ListUInt(rows) => rows.push(parse_list_tokens(tokens, "uint", line)?),
            PropertyData::ListFloat(rows) => rows.push(parse_list_tokens(tokens, "float", line)?),
            PropertyData::ListDouble(rows) => rows.push(parse_list_tokens(tokens, "double", line)?),
        }
        Ok(())
    }

    /// Reads this property's raw bytes for one instance: `width` bytes for a
    /// scalar, a count field of the declared width (always interpreted as
    /// unsigned) followed by `count` values for a list.
    pub(crate) fn read_binary<R: Read, B: ByteOrder>(&mut self, reader: &mut R) -> PlyResult<()> {
        let width = self.count_width;
        match &mut self.data {
            PropertyData::Char(v) => v.push(reader.read_i8()?),
            PropertyData::UChar(v) => v.push(reader.read_u8()?),
            PropertyData::Short(v) => v.push(reader.read_i16::<B>()?),
            PropertyData::UShort(v) => v.push(reader.read_u16::<B>()?),
            PropertyData::Int(v) => v.push(reader.read_i32::<B>()?),
            PropertyData::UInt(v) => v.push(reader.read_u32::<B>()?),
            PropertyData::Float(v) => v.push(reader.read_f32::<B>()?),
            PropertyData::Double(v) => v.push(reader.read_f64::<B>()?),
            PropertyData::ListChar(rows) => {
                let count = read_count::<R, B>(reader, width)?;
                rows.push(read_binary_list(reader, count, |r| r.read_i8())?);
            }
            PropertyData::ListUChar(rows) => {
                let count = read_count::<R, B>(reader, width)?;
                rows.push(read_binary_list(reader, count, |r| r.read_u8())?);
            }
            PropertyData::ListShort(rows) => {
                let count = read_count::<R, B>(reader, width)?;
                rows.push(read_binary_list(reader, count, |r| r.read_i16::<B>())?);
            }
            PropertyData::ListUShort(rows) => {
                let count = read_count::<R, B>(reader, width)?;
                rows.push(read_binary_list(reader, count, |r| r.read_u16::<B>())?);
            }
            PropertyData::ListInt(rows) => {
                let count = read_count::<R, B>(reader, width)?;
                rows.push(read_binary_list(reader, count, |r| r.read_i32::<B>())?);
            }
            PropertyData::ListUInt(rows) => {
                let count = read_count::<R, B>(reader, width)?;
                rows.push(read_binary_list(reader, count, |r| r.read_u32::<B>())?);
            }
            PropertyData::ListFloat(rows) => {
                let count = read_count::<R, B>(reader, width)?;
                rows.push(read_binary_list(reader, count, |r| r.read_f32::<B>())?);
            }
            PropertyData::ListDouble(rows) => {
                let count = read_count::<R, B>(reader, width)?;
                rows.push(read_binary_list(reader, count, |r| r.read_f64::<B>())?);
            }
        }
        Ok(())
    }

    /// Renders the value at `index` in ascii: the plain number for a scalar,
    /// the count followed by each entry for a list. 8-bit types render as
    /// numbers, not characters.
    pub(crate) fn write_ascii<W: Write>(&self, out: &mut W, index: usize) -> PlyResult<()> {
        match &self.data {
            PropertyData::Char(v) => write!(out, "{}", v[index])?,
            PropertyData::UChar(v) => write!(out, "{}", v[index])?,
            PropertyData::Short(v) => write!(out, "{}", v[index])?,
            PropertyData::UShort(v) => write!(out, "{}", v[index])?,
            PropertyData::Int(v) => write!(out, "{}", v[index])?,
            PropertyData::UInt(v) => write!(out, "{}", v[index])?,
            PropertyData::Float(v) => write!(out, "{}", v[index])?,
            PropertyData::Double(v) => write!(out, "{}", v[index])?,
            PropertyData::ListChar(rows) => write_ascii_list(out, &rows[index])?,
            PropertyData::ListUChar(rows) => write_ascii_list(out, &rows[index])?,
            PropertyData::ListShort(rows) => write_ascii_list(out, &rows[index])?,
            PropertyData::ListUShort(rows) => write_ascii_list(out, &rows[index])?,
            PropertyData::ListInt(rows) => write_ascii_list(out, &rows[index])?,
            PropertyData::ListUInt(rows) => write_ascii_list(out, &rows[index])?,
            PropertyData::ListFloat(rows) => write_ascii_list(out, &rows[index])?,
            PropertyData::ListDouble(rows) => write_ascii_list(out, &rows[index])?,
        }
        Ok(())
    }

    /// Writes the raw bytes of the value at `index`. List counts go out as a
    /// four-byte unsigned integer regardless of the width used on read.
    pub(crate) fn write_binary<W: Write, B: ByteOrder>(
        &self,
        out: &mut W,
        index: usize,
    ) -> PlyResult<()> {
        match &self.data {
            PropertyData::Char(v) => out.write_i8(v[index])?,
            PropertyData::UChar(v) => out.write_u8(v[index])?,
            PropertyData::Short(v) => out.write_i16::<B>(v[index])?,
            PropertyData::UShort(v) => out.write_u16::<B>(v[index])?,
            PropertyData::Int(v) => out.write_i32::<B>(v[index])?,
            PropertyData::UInt(v) => out.write_u32::<B>(v[index])?,
            PropertyData::Float(v) => out.write_f32::<B>(v[index])?,
            PropertyData::Double(v) => out.write_f64::<B>(v[index])?,
            PropertyData::ListChar(rows) => {
                let row = &rows[index];
                write_count::<W, B>(out, &self.name, row.len())?;
                for &value in row {
                    out.write_i8(value)?;
                }
            }
            PropertyData::ListUChar(rows) => {
                let row = &rows[index];
                write_count::<W, B>(out, &self.name, row.len())?;
                for &value in row {
                    out.write_u8(value)?;
                }
            }
            PropertyData::ListShort(rows) => {
                let row = &rows[index];
                write_count::<W, B>(out, &self.name, row.len())?;
                for &value in row {
                    out.write_i16::<B>(value)?;
                }
            }
            PropertyData::ListUShort(rows) => {
                let row = &rows[index];
                write_count::<W, B>(out, &self.name, row.len())?;
                for &value in row {
                    out.write_u16::<B>(value)?;
                }
            }
            PropertyData::ListInt(rows) => {
                let row = &rows[index];
                write_count::<W, B>(out, &self.name, row.len())?;
                for &value in row {
                    out.write_i32::<B>(value)?;
                }
            }
            PropertyData::ListUInt(rows) => {
                let row = &rows[index];
                write_count::<W, B>(out, &self.name, row.len())?;
                for &value in row {
                    out.write_u32::<B>(value)?;
                }
            }
            PropertyData::ListFloat(rows) => {
                let row = &rows[index];
                write_count::<W, B>(out, &self.name, row.len())?;
                for &value in row {
                    out.write_f32::<B>(value)?;
                }
            }
            PropertyData::ListDouble(rows) => {
                let row = &rows[index];
                write_count::<W, B>(out, &self.name, row.len())?;
                for &value in row {
                    out.write_f64::<B>(value)?;
                }
            }
        }
        Ok(())
    }
}

fn next_token<'a, I>(tokens: &mut I, line: usize) -> PlyResult<&'a str>
where
    I: Iterator<Item = &'a str>,
{
    tokens.next().ok_or_else(|| {
        PlyError::TruncatedInput(format!(
            "reading values on line {line} (ran out of tokens)"
        ))
    })
}

fn parse_token<'a, I, T>(tokens: &mut I, ty: &'static str, line: usize) -> PlyResult<T>
where
    I: Iterator<Item = &'a str>,
    T: FromStr,
{
    let token = next_token(tokens, line)?;
    token.parse().map_err(|_| PlyError::InvalidToken {
        line,
        token: token.to_string(),
        ty,
    })
}

fn parse_list_tokens<'a, I, T>(tokens: &mut I, ty: &'static str, line: usize) -> PlyResult<Vec<T>>
where
    I: Iterator<Item = &'a str>,
    T: FromStr,
{
    let count: usize = parse_token(tokens, "uint", line)?;
    let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        values.push(parse_token(tokens, ty, line)?);
    }
    Ok(values)
}

fn read_count<R: Read, B: ByteOrder>(reader: &mut R, width: CountWidth) -> PlyResult<usize> {
    let count = match width {
        CountWidth::One => usize::from(reader.read_u8()?),
        CountWidth::Two => usize::from(reader.read_u16::<B>()?),
        CountWidth::Four => reader.read_u32::<B>()? as usize,
    };
    Ok(count)
}

// Counts come straight off the wire; a hostile file can declare billions of
// entries, so allocation must not trust them.
const MAX_PREALLOC: usize = 1 << 10;

fn read_binary_list<R, T>(
    reader: &mut R,
    count: usize,
    read_one: impl Fn(&mut R) -> std::io::Result<T>,
) -> PlyResult<Vec<T>>
where
    R: Read,
{
    let mut values = Vec::with_capacity(count.min(MAX_PREALLOC));
    for _ in 0..count {
        values.push(read_one(reader)?);
    }
    Ok(values)
}

fn write_ascii_list<W: Write, T: Display>(out: &mut W, row: &[T]) -> std::io::Result<()> {
    write!(out, "{}", row.len())?;
    for value in row {
        write!(out, " {}", value)?;
    }
    Ok(())
}

fn write_count<W: Write, B: ByteOrder>(out: &mut W, property: &str, count: usize) -> PlyResult<()> {
    let count = u32::try_from(count).map_err(|_| PlyError::ListValueOverflow {
        property: property.to_string(),
        value: count as u64,
    })?;
    out.write_u32::<B>(count)?;
    Ok(())
}

mod sealed {
    pub trait Sealed {}
}

/// Rust types that property data can be requested as.
///
/// The implementors are the eight storable types plus `i64`/`u64`; each knows
/// its rung on the widening chain and how to copy a compatible column into
/// itself. Copying is always exact: smaller signed into larger signed, smaller
/// unsigned into larger unsigned, `f32` into `f64`.
pub trait PlyScalar: Copy + sealed::Sealed {
    /// Tag driving the widening walk and error messages.
    const REQUEST: RequestType;

    /// Copies a scalar column out as `Self` when the stored type lies on this
    /// type's widening chain; `None` otherwise (including for list columns).
    fn extract_scalars(data: &PropertyData) -> Option<Vec<Self>>;

    /// List counterpart of [`PlyScalar::extract_scalars`].
    fn extract_lists(data: &PropertyData) -> Option<Vec<Vec<Self>>>;
}

/// The subset of [`PlyScalar`] types that PLY can store on disk.
///
/// `i64` and `u64` can be requested but not stored; everything else can do
/// both.
pub trait PlyStorable: PlyScalar {
    /// The on-disk type tag for this Rust type.
    const SCALAR: ScalarType;

    /// Wraps owned values into a scalar column.
    fn scalar_column(values: Vec<Self>) -> PropertyData;

    /// Wraps owned rows into a list column.
    fn list_column(rows: Vec<Vec<Self>>) -> PropertyData;
}

macro_rules! ply_scalar {
    ($ty:ty, $request:ident, [$($scalar:ident),+], [$($list:ident),+]) => {
        impl sealed::Sealed for $ty {}

        impl PlyScalar for $ty {
            const REQUEST: RequestType = RequestType::$request;

            fn extract_scalars(data: &PropertyData) -> Option<Vec<$ty>> {
                match data {
                    $(PropertyData::$scalar(values) => {
                        Some(values.iter().map(|&v| v as $ty).collect())
                    })+
                    _ => None,
                }
            }

            fn extract_lists(data: &PropertyData) -> Option<Vec<Vec<$ty>>> {
                match data {
                    $(PropertyData::$list(rows) => Some(
                        rows.iter()
                            .map(|row| row.iter().map(|&v| v as $ty).collect())
                            .collect(),
                    ),)+
                    _ => None,
                }
            }
        }
    };
}

macro_rules! ply_storable {
    ($ty:ty, $scalar:ident, $list:ident) => {
        impl PlyStorable for $ty {
            const SCALAR: ScalarType = ScalarType::$scalar;

            fn scalar_column(values: Vec<$ty>) -> PropertyData {
                PropertyData::$scalar(values)
            }

            fn list_column(rows: Vec<Vec<$ty>>) -> PropertyData {
                PropertyData::$list(rows)
            }
        }
    };
}

ply_scalar!(i8, Int8, [Char], [ListChar]);
ply_scalar!(i16, Int16, [Char, Short], [ListChar, ListShort]);
ply_scalar!(i32, Int32, [Char, Short, Int], [ListChar, ListShort, ListInt]);
ply_scalar!(i64, Int64, [Char, Short, Int], [ListChar, ListShort, ListInt]);
ply_scalar!(u8, UInt8, [UChar], [ListUChar]);
ply_scalar!(u16, UInt16, [UChar, UShort], [ListUChar, ListUShort]);
ply_scalar!(u32, UInt32, [UChar, UShort, UInt], [ListUChar, ListUShort, ListUInt]);
ply_scalar!(u64, UInt64, [UChar, UShort, UInt], [ListUChar, ListUShort, ListUInt]);
ply_scalar!(f32, Float32, [Float], [ListFloat]);
ply_scalar!(f64, Float64, [Float, Double], [ListFloat, ListDouble]);

ply_storable!(i8, Char, ListChar);
ply_storable!(u8, UChar, ListUChar);
ply_storable!(i16, Short, ListShort);
ply_storable!(u16, UShort, ListUShort);
ply_storable!(i32, Int, ListInt);
ply_storable!(u32, UInt, ListUInt);
ply_storable!(f32, Float, ListFloat);
ply_storable!(f64, Double, ListDouble);

#[cfg(test)]
mod tests {
    use super::*;
    use byteorder::{BigEndian, LittleEndian};

    #[test]
    fn empty_storage_matches_declaration() {
        let data = PropertyData::empty(ScalarType::Short, false);
        assert_eq!(data.scalar_type(), ScalarType::Short);
        assert!(!data.is_list());
        assert!(data.is_empty());

        let data = PropertyData::empty(ScalarType::Float, true);
        assert_eq!(data.scalar_type(), ScalarType::Float);
        assert!(data.is_list());
    }

    #[test]
    fn ascii_scalar_and_list_tokens() {
        let mut prop = Property::declared("v".to_string(), ScalarType::Char, None);
        let mut tokens = ["-3", "4"].into_iter();
        prop.read_ascii(&mut tokens, 1).unwrap();
        prop.read_ascii(&mut tokens, 1).unwrap();
        assert_eq!(prop.data, PropertyData::Char(vec![-3, 4]));

        let mut prop =
            Property::declared("r".to_string(), ScalarType::Int, Some(CountWidth::One));
        let mut tokens = ["3", "7", "-1", "0"].into_iter();
        prop.read_ascii(&mut tokens, 1).unwrap();
        assert_eq!(prop.data, PropertyData::ListInt(vec![vec![7, -1, 0]]));
    }

    #[test]
    fn ascii_out_of_range_token_is_rejected() {
        let mut prop = Property::declared("v".to_string(), ScalarType::UChar, None);
        let mut tokens = ["300"].into_iter();
        let err = prop.read_ascii(&mut tokens, 4).unwrap_err();
        assert!(matches!(err, PlyError::InvalidToken { line: 4, .. }));
    }

    #[test]
    fn ascii_exhausted_line_is_truncation() {
        let mut prop =
            Property::declared("r".to_string(), ScalarType::Int, Some(CountWidth::One));
        let mut tokens = ["3", "7"].into_iter();
        let err = prop.read_ascii(&mut tokens, 2).unwrap_err();
        assert!(matches!(err, PlyError::TruncatedInput(_)));
    }

    #[test]
    fn binary_count_width_is_honored() {
        // 2-byte count of 3 in big endian, then three shorts.
        let bytes = [0x00, 0x03, 0x00, 0x01, 0x00, 0x02, 0xff, 0xff];
        let mut prop =
            Property::declared("r".to_string(), ScalarType::Short, Some(CountWidth::Two));
        prop.read_binary::<_, BigEndian>(&mut &bytes[..]).unwrap();
        assert_eq!(prop.data, PropertyData::ListShort(vec![vec![1, 2, -1]]));
    }

    #[test]
    fn binary_write_uses_four_byte_count() {
        let mut prop =
            Property::declared("r".to_string(), ScalarType::UChar, Some(CountWidth::One));
        if let PropertyData::ListUChar(rows) = &mut prop.data {
            rows.push(vec![9, 8]);
        }
        let mut out = Vec::new();
        prop.write_binary::<_, LittleEndian>(&mut out, 0).unwrap();
        assert_eq!(out, [2, 0, 0, 0, 9, 8]);
    }

    #[test]
    fn widening_is_exact_and_family_bound() {
        let data = PropertyData::Char(vec![-3, 4]);
        assert_eq!(i64::extract_scalars(&data), Some(vec![-3i64, 4]));
        assert_eq!(u8::extract_scalars(&data), None);

        let data = PropertyData::Float(vec![1.5]);
        assert_eq!(f64::extract_scalars(&data), Some(vec![1.5f64]));

        let lists = PropertyData::ListUShort(vec![vec![], vec![9]]);
        assert_eq!(u64::extract_lists(&lists), Some(vec![vec![], vec![9u64]]));
        assert_eq!(u8::extract_lists(&lists), None);
        // Shape mismatch: a list column never satisfies a scalar request.
        assert_eq!(u16::extract_scalars(&lists), None);
    }
}

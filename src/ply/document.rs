//! The owning document: elements, comments, format, and the read/write
//! entry points.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::errors::{PlyError, PlyResult};
use crate::{parser, writer};

use super::element::Element;
use super::property::PlyScalar;

/// Models possible encoding standards for the payload.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Encoding {
    /// Write numbers in their ascii representation (e.g. -13, 6.28, etc.).
    /// Properties are separated by spaces and elements are separated by line
    /// breaks.
    Ascii,
    /// Encode payload using little endian.
    BinaryLittleEndian,
    /// Encode payload using big endian.
    BinaryBigEndian,
}

impl Encoding {
    /// Resolves the token used on the format line.
    pub(crate) fn from_token(token: &str) -> Option<Encoding> {
        match token {
            "ascii" => Some(Encoding::Ascii),
            "binary_little_endian" => Some(Encoding::BinaryLittleEndian),
            "binary_big_endian" => Some(Encoding::BinaryBigEndian),
            _ => None,
        }
    }
}

impl Display for Encoding {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str(match *self {
            Encoding::Ascii => "ascii",
            Encoding::BinaryLittleEndian => "binary_little_endian",
            Encoding::BinaryBigEndian => "binary_big_endian",
        })
    }
}

/// An in-memory PLY document: ordered elements, comments, and the format
/// information from (or for) the wire.
///
/// Element order is the declaration order and is preserved through the
/// header; payload data follows the same order. Duplicate or malformed names
/// are representable while building a document and are reported by
/// [`PlyDocument::validate`], which also runs at the start of every write.
///
/// # Examples
///
/// ```
/// use ply_doc::{Encoding, PlyDocument};
///
/// let mut doc = PlyDocument::new();
/// let vertex = doc.add_element("vertex", 3);
/// vertex.add_property("x", vec![0.0f32, 1.0, 0.0])?;
/// vertex.add_property("y", vec![0.0f32, 0.0, 1.0])?;
///
/// let mut buffer = Vec::new();
/// doc.write(&mut buffer, Encoding::Ascii)?;
///
/// let parsed = PlyDocument::read(&mut buffer.as_slice())?;
/// assert_eq!(parsed.element("vertex")?.get::<f32>("x")?, vec![0.0, 1.0, 0.0]);
/// # Ok::<(), ply_doc::PlyError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PlyDocument {
    /// Elements in declaration order.
    pub elements: Vec<Element>,
    /// Free-text comments, emitted between the format line and the first
    /// element declaration.
    pub comments: Vec<String>,
    /// Version token from the format line, kept verbatim.
    pub(crate) version: String,
    /// Encoding of the most recent read, or the one selected by the most
    /// recent write.
    pub(crate) encoding: Encoding,
}

impl Default for PlyDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PlyDocument {
    /// Creates an empty ascii document with version `1.0`.
    pub fn new() -> PlyDocument {
        PlyDocument {
            elements: Vec::new(),
            comments: Vec::new(),
            version: "1.0".to_string(),
            encoding: Encoding::Ascii,
        }
    }

    /// Parses a complete PLY document (header and payload) from `source`.
    pub fn read<R: Read>(source: &mut R) -> PlyResult<PlyDocument> {
        let mut reader = BufReader::new(source);
        parser::read_document(&mut reader)
    }

    /// Opens `path` and parses it as a PLY document. The file is closed on
    /// every exit path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> PlyResult<PlyDocument> {
        let mut file = File::open(path)?;
        PlyDocument::read(&mut file)
    }

    /// The encoding of the most recent read or write.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// The version token from the format line.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns `true` if an element with this name exists.
    pub fn has_element(&self, name: &str) -> bool {
        self.elements.iter().any(|e| e.name == name)
    }

    /// Looks up an element by name.
    pub fn element(&self, name: &str) -> PlyResult<&Element> {
        self.elements
            .iter()
            .find(|e| e.name == name)
            .ok_or_else(|| PlyError::ElementNotFound(name.to_string()))
    }

    /// Mutable counterpart of [`PlyDocument::element`].
    pub fn element_mut(&mut self, name: &str) -> PlyResult<&mut Element> {
        self.elements
            .iter_mut()
            .find(|e| e.name == name)
            .ok_or_else(|| PlyError::ElementNotFound(name.to_string()))
    }

    /// Appends a new element declaration and returns it for population.
    ///
    /// No uniqueness check happens here; a clashing name is reported by
    /// [`PlyDocument::validate`].
    pub fn add_element(&mut self, name: impl Into<String>, count: usize) -> &mut Element {
        self.elements.push(Element::new(name, count));
        let last = self.elements.len() - 1;
        &mut self.elements[last]
    }

    /// Removes the element with this name, if present.
    pub fn remove_element(&mut self, name: &str) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.name != name);
        self.elements.len() != before
    }

    /// Fetches a scalar property from a named element; see [`Element::get`].
    pub fn get<T: PlyScalar>(&self, element: &str, property: &str) -> PlyResult<Vec<T>> {
        self.element(element)?.get(property)
    }

    /// Fetches a list property from a named element; see
    /// [`Element::get_list`].
    pub fn get_list<T: PlyScalar>(&self, element: &str, property: &str) -> PlyResult<Vec<Vec<T>>> {
        self.element(element)?.get_list(property)
    }

    /// Checks the structural invariants of the whole document: element names
    /// without whitespace and unique, property names without whitespace and
    /// unique within their element, and every column holding exactly its
    /// element's declared count. The first violation found is returned.
    pub fn validate(&self) -> PlyResult<()> {
        for (i, element) in self.elements.iter().enumerate() {
            if element.name.chars().any(char::is_whitespace) {
                return Err(PlyError::WhitespaceInName {
                    kind: "element",
                    name: element.name.clone(),
                });
            }
            for other in &self.elements[i + 1..] {
                if other.name == element.name {
                    return Err(PlyError::DuplicateName {
                        kind: "element",
                        name: element.name.clone(),
                    });
                }
            }
        }
        for element in &self.elements {
            element.validate()?;
        }
        Ok(())
    }

    /// Serializes the document to `dest` in the given encoding.
    ///
    /// Validation runs first; on a validation failure nothing is written. An
    /// I/O failure after validation can leave a partially written stream.
    pub fn write<W: Write>(&mut self, dest: &mut W, encoding: Encoding) -> PlyResult<()> {
        self.encoding = encoding;
        self.validate()?;
        self.emit(dest)
    }

    /// Validates, then creates `path` and writes the document into it.
    ///
    /// The file is only created once validation has passed, so a document
    /// that fails validation never leaves a partial file behind.
    pub fn write_to_path<P: AsRef<Path>>(&mut self, path: P, encoding: Encoding) -> PlyResult<()> {
        self.encoding = encoding;
        self.validate()?;
        let mut file = File::create(path)?;
        self.emit(&mut file)
    }

    fn emit<W: Write>(&self, dest: &mut W) -> PlyResult<()> {
        let mut out = BufWriter::new(dest);
        writer::write_header(&mut out, self)?;
        writer::write_payload(&mut out, self)?;
        out.flush()?;
        Ok(())
    }

    /// Reads the conventional `vertex` element's `x`/`y`/`z` columns as
    /// double-precision positions.
    pub fn vertex_positions(&self) -> PlyResult<Vec<[f64; 3]>> {
        let vertex = self.element("vertex")?;
        let xs = vertex.get::<f64>("x")?;
        let ys = vertex.get::<f64>("y")?;
        let zs = vertex.get::<f64>("z")?;
        Ok(xs
            .iter()
            .zip(&ys)
            .zip(&zs)
            .map(|((&x, &y), &z)| [x, y, z])
            .collect())
    }

    /// Reads the conventional `vertex` element's `red`/`green`/`blue` columns
    /// as 8-bit colors.
    pub fn vertex_colors(&self) -> PlyResult<Vec<[u8; 3]>> {
        let vertex = self.element("vertex")?;
        let reds = vertex.get::<u8>("red")?;
        let greens = vertex.get::<u8>("green")?;
        let blues = vertex.get::<u8>("blue")?;
        Ok(reds
            .iter()
            .zip(&greens)
            .zip(&blues)
            .map(|((&r, &g), &b)| [r, g, b])
            .collect())
    }

    /// Reads the conventional `face` element's index lists, accepting both
    /// common property names and files that declare indices as `int`.
    pub fn face_indices(&self) -> PlyResult<Vec<Vec<u64>>> {
        let face = self.element("face")?;
        for name in ["vertex_indices", "vertex_index"] {
            if face.has_property(name) {
                return face.get_list_indices(name);
            }
        }
        Err(PlyError::PropertyNotFound {
            element: "face".to_string(),
            property: "vertex_indices".to_string(),
        })
    }

    /// Creates the `vertex` element if needed and stores positions as
    /// double-precision `x`/`y`/`z` columns.
    pub fn add_vertex_positions(&mut self, positions: &[[f64; 3]]) -> PlyResult<()> {
        if !self.has_element("vertex") {
            self.add_element("vertex", positions.len());
        }
        let vertex = self.element_mut("vertex")?;
        vertex.add_property("x", positions.iter().map(|p| p[0]).collect())?;
        vertex.add_property("y", positions.iter().map(|p| p[1]).collect())?;
        vertex.add_property("z", positions.iter().map(|p| p[2]).collect())?;
        Ok(())
    }

    /// Creates the `vertex` element if needed and stores colors given in the
    /// unit interval as 8-bit `red`/`green`/`blue` columns (clamped, scaled
    /// by 255).
    pub fn add_vertex_colors(&mut self, colors: &[[f64; 3]]) -> PlyResult<()> {
        fn to_byte(v: f64) -> u8 {
            (v.clamp(0.0, 1.0) * 255.0) as u8
        }
        if !self.has_element("vertex") {
            self.add_element("vertex", colors.len());
        }
        let vertex = self.element_mut("vertex")?;
        vertex.add_property("red", colors.iter().map(|c| to_byte(c[0])).collect())?;
        vertex.add_property("green", colors.iter().map(|c| to_byte(c[1])).collect())?;
        vertex.add_property("blue", colors.iter().map(|c| to_byte(c[2])).collect())?;
        Ok(())
    }

    /// Creates the `face` element if needed and stores index lists as a
    /// `vertex_indices` list property, declared as `int` for compatibility
    /// with common readers. An index above `i32::MAX` does not fit that type
    /// and is rejected.
    pub fn add_face_indices(&mut self, indices: &[Vec<u64>]) -> PlyResult<()> {
        let mut rows = Vec::with_capacity(indices.len());
        for row in indices {
            let mut converted = Vec::with_capacity(row.len());
            for &index in row {
                let index = i32::try_from(index).map_err(|_| PlyError::ListValueOverflow {
                    property: "vertex_indices".to_string(),
                    value: index,
                })?;
                converted.push(index);
            }
            rows.push(converted);
        }
        if !self.has_element("face") {
            self.add_element("face", rows.len());
        }
        self.element_mut("face")?
            .add_list_property("vertex_indices", rows)
    }
}

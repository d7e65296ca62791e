//! Reads ascii or binary PLY data into a [`PlyDocument`].
//!
//! The header is consumed line by line against the grammar in [`header`];
//! the payload reader is then chosen from the declared encoding. All loops
//! are bounded by declared counts, and a stream that ends early fails with a
//! typed error naming the element being read.

mod header;

use std::io::{BufRead, ErrorKind, Read};

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::errors::{PlyError, PlyResult};
use crate::ply::{Element, Encoding, PlyDocument, Property, ScalarType};

use self::header::{HeaderLine, TypeToken, grammar};

/// Tracks the current 1-based line number, for error context.
#[derive(Debug, Clone, Copy)]
struct LocationTracker {
    line_index: usize,
}

impl LocationTracker {
    fn new() -> Self {
        LocationTracker { line_index: 0 }
    }

    fn next_line(&mut self) {
        self.line_index += 1;
    }
}

/// Parses a complete document: header, then payload in the declared encoding.
///
/// The reader is left positioned directly after the declared payload; trailing
/// bytes are not touched.
pub(crate) fn read_document<R: BufRead>(reader: &mut R) -> PlyResult<PlyDocument> {
    let mut location = LocationTracker::new();
    let mut doc = read_header(reader, &mut location)?;
    read_payload(reader, &mut location, &mut doc)?;
    Ok(doc)
}

fn read_header<R: BufRead>(
    reader: &mut R,
    location: &mut LocationTracker,
) -> PlyResult<PlyDocument> {
    let mut line_str = String::new();

    location.next_line();
    if reader.read_line(&mut line_str)? == 0 {
        return Err(PlyError::TruncatedInput(
            "reading the header (no magic line)".to_string(),
        ));
    }
    match grammar::line(&line_str) {
        Ok(HeaderLine::Magic) => {}
        _ => return Err(PlyError::MalformedMagic),
    }

    location.next_line();
    line_str.clear();
    if reader.read_line(&mut line_str)? == 0 {
        return Err(PlyError::TruncatedInput(
            "reading the header (no format line)".to_string(),
        ));
    }
    let (encoding, version) = match grammar::line(&line_str) {
        Ok(HeaderLine::Format { encoding, version }) => {
            match Encoding::from_token(&encoding) {
                Some(encoding) => (encoding, version),
                None => return Err(PlyError::UnsupportedEncoding(encoding)),
            }
        }
        _ => return Err(unrecognized(location, &line_str)),
    };

    let mut doc = PlyDocument::new();
    doc.encoding = encoding;
    doc.version = version;

    loop {
        location.next_line();
        line_str.clear();
        if reader.read_line(&mut line_str)? == 0 {
            return Err(PlyError::TruncatedInput(
                "reading the header (missing 'end_header')".to_string(),
            ));
        }
        match grammar::line(&line_str) {
            Err(_) => return Err(unrecognized(location, &line_str)),
            // A second magic or format line is as foreign as an unknown
            // keyword at this point.
            Ok(HeaderLine::Magic) | Ok(HeaderLine::Format { .. }) => {
                return Err(unrecognized(location, &line_str));
            }
            Ok(HeaderLine::Comment(text)) => doc.comments.push(text),
            Ok(HeaderLine::Element { name, count }) => {
                let Some(count) = count else {
                    return Err(unrecognized(location, &line_str));
                };
                doc.add_element(name, count);
            }
            Ok(HeaderLine::Property { ty, name }) => {
                let ty = known_type(ty, location)?;
                attach(&mut doc, Property::declared(name, ty, None), location)?;
            }
            Ok(HeaderLine::ListProperty { count_ty, value_ty, name }) => {
                let count_ty = known_type(count_ty, location)?;
                let value_ty = known_type(value_ty, location)?;
                let Some(width) = count_ty.count_width() else {
                    return Err(PlyError::UnrecognizedType {
                        line: location.line_index,
                        token: count_ty.name().to_string(),
                    });
                };
                attach(&mut doc, Property::declared(name, value_ty, Some(width)), location)?;
            }
            Ok(HeaderLine::EndHeader) => break,
        }
    }
    Ok(doc)
}

fn unrecognized(location: &LocationTracker, line_str: &str) -> PlyError {
    PlyError::UnrecognizedHeaderLine {
        line: location.line_index,
        content: line_str.trim_end().to_string(),
    }
}

fn known_type(token: TypeToken, location: &LocationTracker) -> PlyResult<ScalarType> {
    token.map_err(|raw| PlyError::UnrecognizedType {
        line: location.line_index,
        token: raw,
    })
}

fn attach(
    doc: &mut PlyDocument,
    property: Property,
    location: &LocationTracker,
) -> PlyResult<()> {
    match doc.elements.last_mut() {
        Some(element) => {
            element.properties.push(property);
            Ok(())
        }
        None => Err(PlyError::NoOpenElement {
            line: location.line_index,
        }),
    }
}

fn read_payload<R: BufRead>(
    reader: &mut R,
    location: &mut LocationTracker,
    doc: &mut PlyDocument,
) -> PlyResult<()> {
    match doc.encoding {
        Encoding::Ascii => read_ascii_payload(reader, location, &mut doc.elements),
        Encoding::BinaryLittleEndian => {
            read_binary_payload::<R, LittleEndian>(reader, &mut doc.elements)
        }
        Encoding::BinaryBigEndian => {
            read_binary_payload::<R, BigEndian>(reader, &mut doc.elements)
        }
    }
}

fn read_ascii_payload<R: BufRead>(
    reader: &mut R,
    location: &mut LocationTracker,
    elements: &mut [Element],
) -> PlyResult<()> {
    let mut line_str = String::with_capacity(128);
    for element in elements {
        // One line per instance, even for elements without properties.
        for instance in 0..element.count {
            location.next_line();
            line_str.clear();
            if reader.read_line(&mut line_str)? == 0 {
                return Err(truncated_element(&element.name, instance, element.count));
            }
            let mut tokens = line_str.split_whitespace();
            for property in &mut element.properties {
                property.read_ascii(&mut tokens, location.line_index)?;
            }
        }
    }
    Ok(())
}

fn read_binary_payload<R: Read, B: ByteOrder>(
    reader: &mut R,
    elements: &mut [Element],
) -> PlyResult<()> {
    for element in elements {
        for instance in 0..element.count {
            for property in &mut element.properties {
                if let Err(err) = property.read_binary::<R, B>(reader) {
                    return Err(element_read_error(err, &element.name, instance, element.count));
                }
            }
        }
    }
    Ok(())
}

/// An unexpected EOF inside a binary element is reported with the element
/// context instead of a bare I/O error.
fn element_read_error(err: PlyError, name: &str, instance: usize, count: usize) -> PlyError {
    match err {
        PlyError::Io(io_err) if io_err.kind() == ErrorKind::UnexpectedEof => {
            truncated_element(name, instance, count)
        }
        other => other,
    }
}

fn truncated_element(name: &str, instance: usize, count: usize) -> PlyError {
    PlyError::TruncatedInput(format!(
        "reading element '{name}' (instance {instance} of {count})"
    ))
}

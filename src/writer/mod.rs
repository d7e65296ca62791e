//! Writes a [`PlyDocument`] back out as ascii or binary PLY.
//!
//! Driven by [`PlyDocument::write`], which validates the document before any
//! byte is emitted. The header always declares list counts as `uint`,
//! whatever width the data was read with.

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, LittleEndian};

use crate::errors::PlyResult;
use crate::ply::{Element, Encoding, PlyDocument};

pub(crate) fn write_header<W: Write>(out: &mut W, doc: &PlyDocument) -> PlyResult<()> {
    writeln!(out, "ply")?;
    writeln!(out, "format {} {}", doc.encoding, doc.version)?;
    for comment in &doc.comments {
        writeln!(out, "comment {}", comment)?;
    }
    for element in &doc.elements {
        writeln!(out, "element {} {}", element.name, element.count)?;
        for property in &element.properties {
            property.write_declaration(out)?;
        }
    }
    writeln!(out, "end_header")?;
    Ok(())
}

pub(crate) fn write_payload<W: Write>(out: &mut W, doc: &PlyDocument) -> PlyResult<()> {
    match doc.encoding {
        Encoding::Ascii => write_ascii(out, &doc.elements),
        Encoding::BinaryLittleEndian => write_binary::<W, LittleEndian>(out, &doc.elements),
        Encoding::BinaryBigEndian => write_binary::<W, BigEndian>(out, &doc.elements),
    }
}

fn write_ascii<W: Write>(out: &mut W, elements: &[Element]) -> PlyResult<()> {
    for element in elements {
        // One line per instance; an element without properties still
        // contributes blank lines so the instance count survives the trip.
        for index in 0..element.count {
            for (i, property) in element.properties.iter().enumerate() {
                if i > 0 {
                    write!(out, " ")?;
                }
                property.write_ascii(out, index)?;
            }
            writeln!(out)?;
        }
    }
    Ok(())
}

fn write_binary<W: Write, B: ByteOrder>(out: &mut W, elements: &[Element]) -> PlyResult<()> {
    for element in elements {
        for index in 0..element.count {
            for property in &element.properties {
                property.write_binary::<W, B>(out, index)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_doc() -> PlyDocument {
        let mut doc = PlyDocument::new();
        doc.comments.push("made by hand".to_string());
        let point = doc.add_element("point", 2);
        point.add_property("x", vec![-7i32, 2]).unwrap();
        point.add_property("y", vec![5u32, 4]).unwrap();
        doc
    }

    #[test]
    fn header_layout() {
        let doc = sample_doc();
        let mut out = Vec::new();
        write_header(&mut out, &doc).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "ply\n\
format ascii 1.0\n\
comment made by hand\n\
element point 2\n\
property int x\n\
property uint y\n\
end_header\n"
        );
    }

    #[test]
    fn ascii_payload_layout() {
        let doc = sample_doc();
        let mut out = Vec::new();
        write_payload(&mut out, &doc).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "-7 5\n2 4\n");
    }

    #[test]
    fn list_declarations_always_say_uint() {
        let mut doc = PlyDocument::new();
        let face = doc.add_element("face", 1);
        face.add_list_property("vertex_indices", vec![vec![0i32, 1, 2]])
            .unwrap();
        let mut out = Vec::new();
        write_header(&mut out, &doc).unwrap();
        let header = String::from_utf8(out).unwrap();
        assert!(header.contains("property list uint int vertex_indices\n"));
    }

    #[test]
    fn zero_property_element_still_writes_lines() {
        let mut doc = PlyDocument::new();
        doc.add_element("marker", 3);
        let mut out = Vec::new();
        write_payload(&mut out, &doc).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\n\n\n");
    }
}

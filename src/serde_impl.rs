//! `serde::Serialize` implementations for the document model.
//!
//! The PLY model is schema-dynamic, so there is no natural target type for a
//! `Deserialize` round trip; this module only provides the outbound view. A
//! document serializes as a map of format/version/comments/elements, each
//! property as a map carrying its name, type tags and column data. Handy for
//! JSON dumps when inspecting a file:
//!
//! ```
//! use ply_doc::PlyDocument;
//!
//! let mut doc = PlyDocument::new();
//! doc.add_element("vertex", 1).add_property("x", vec![1.5f32])?;
//! let json = serde_json::to_value(&doc).unwrap();
//! assert_eq!(json["elements"][0]["name"], "vertex");
//! # Ok::<(), ply_doc::PlyError>(())
//! ```

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::ply::{Element, PlyDocument, Property, PropertyData};

impl Serialize for PlyDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("format", &self.encoding().to_string())?;
        map.serialize_entry("version", self.version())?;
        map.serialize_entry("comments", &self.comments)?;
        map.serialize_entry("elements", &self.elements)?;
        map.end()
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("count", &self.count)?;
        map.serialize_entry("properties", &self.properties)?;
        map.end()
    }
}

impl Serialize for Property {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        map.serialize_entry("name", &self.name)?;
        map.serialize_entry("type", self.scalar_type().name())?;
        map.serialize_entry("list", &self.is_list())?;
        map.serialize_entry("data", &self.data)?;
        map.end()
    }
}

impl Serialize for PropertyData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PropertyData::Char(v) => v.serialize(serializer),
            PropertyData::UChar(v) => v.serialize(serializer),
            PropertyData::Short(v) => v.serialize(serializer),
            PropertyData::UShort(v) => v.serialize(serializer),
            PropertyData::Int(v) => v.serialize(serializer),
            PropertyData::UInt(v) => v.serialize(serializer),
            PropertyData::Float(v) => v.serialize(serializer),
            PropertyData::Double(v) => v.serialize(serializer),
            PropertyData::ListChar(v) => v.serialize(serializer),
            PropertyData::ListUChar(v) => v.serialize(serializer),
            PropertyData::ListShort(v) => v.serialize(serializer),
            PropertyData::ListUShort(v) => v.serialize(serializer),
            PropertyData::ListInt(v) => v.serialize(serializer),
            PropertyData::ListUInt(v) => v.serialize(serializer),
            PropertyData::ListFloat(v) => v.serialize(serializer),
            PropertyData::ListDouble(v) => v.serialize(serializer),
        }
    }
}

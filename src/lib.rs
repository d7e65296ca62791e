//! A document-model codec for the PLY ("Polygon File Format") geometry
//! interchange format.
//!
//! PLY files declare their own schema in a textual header: a sequence of
//! named elements ("vertex", "face", ...), each with typed scalar or list
//! properties, followed by the payload in ascii, binary little endian, or
//! binary big endian form. This crate parses any such file into an owned
//! [`PlyDocument`] without knowing the schema ahead of time, lets you build
//! or modify documents programmatically, and writes them back out in any of
//! the three encodings.
//!
//! # Reading
//!
//! ```no_run
//! use ply_doc::PlyDocument;
//!
//! let doc = PlyDocument::from_path("bunny.ply")?;
//! let positions = doc.vertex_positions()?;
//! let faces = doc.face_indices()?;
//! println!("{} vertices, {} faces", positions.len(), faces.len());
//! # Ok::<(), ply_doc::PlyError>(())
//! ```
//!
//! Beyond the mesh helpers, any column is reachable generically. A request
//! may use a type wider than the stored one within the same family: data
//! stored as `float` can be read as `f64`, data stored as `char` as any wider
//! signed integer, and so on. It never succeeds across signedness and never
//! narrows.
//!
//! ```
//! use ply_doc::PlyDocument;
//!
//! let bytes = b"ply\nformat ascii 1.0\nelement vertex 2\nproperty float x\nend_header\n1.5\n-2\n";
//! let doc = PlyDocument::read(&mut &bytes[..])?;
//! let xs = doc.get::<f64>("vertex", "x")?; // stored as float, widened
//! assert_eq!(xs, vec![1.5, -2.0]);
//! assert!(doc.get::<i32>("vertex", "x").is_err());
//! # Ok::<(), ply_doc::PlyError>(())
//! ```
//!
//! # Writing
//!
//! ```
//! use ply_doc::{Encoding, PlyDocument};
//!
//! let mut doc = PlyDocument::new();
//! doc.add_vertex_positions(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]])?;
//! doc.add_face_indices(&[vec![0, 1, 2]])?;
//!
//! let mut buffer = Vec::new();
//! doc.write(&mut buffer, Encoding::BinaryLittleEndian)?;
//! # Ok::<(), ply_doc::PlyError>(())
//! ```
//!
//! Writing validates the document first (unique, whitespace-free names and
//! column lengths matching each element's declared count) and emits nothing
//! when validation fails.

pub mod errors;
pub mod ply;

mod parser;
mod serde_impl;
mod writer;

pub use crate::errors::{PlyError, PlyResult};
pub use crate::ply::{
    CountWidth, Element, Encoding, PlyDocument, PlyScalar, PlyStorable, Property, PropertyData,
    RequestType, ScalarType,
};

#[cfg(doctest)]
doc_comment::doctest!("../README.md");

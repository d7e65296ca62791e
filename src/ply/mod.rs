//! The document model: the type lattice, property columns, elements, and the
//! owning [`PlyDocument`].

mod document;
mod element;
mod property;
mod scalar;

pub use self::document::{Encoding, PlyDocument};
pub use self::element::Element;
pub use self::property::{PlyScalar, PlyStorable, Property, PropertyData};
pub use self::scalar::{CountWidth, RequestType, ScalarType};

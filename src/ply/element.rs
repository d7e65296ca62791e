//! Elements: named groups of property columns with a declared instance count.

use crate::errors::{PlyError, PlyResult};

use super::property::{PlyScalar, PlyStorable, Property};

/// One record type of a PLY document ("vertex", "face", ...).
///
/// An element owns its property columns in declaration order. The invariant
/// that every column holds exactly [`Element::count`] instances is enforced by
/// [`PlyDocument::validate`](crate::ply::PlyDocument::validate), not
/// continuously, so partially built elements are representable.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Unique name within the document; must not contain whitespace.
    pub name: String,
    /// Declared number of instances.
    pub count: usize,
    /// Ordered property columns.
    pub properties: Vec<Property>,
}

impl Element {
    /// Creates an element with no properties.
    pub fn new(name: impl Into<String>, count: usize) -> Element {
        Element {
            name: name.into(),
            count,
            properties: Vec::new(),
        }
    }

    /// Returns `true` if a property with this name exists.
    pub fn has_property(&self, name: &str) -> bool {
        self.properties.iter().any(|p| p.name == name)
    }

    /// Looks up a property column by name.
    pub fn property(&self, name: &str) -> PlyResult<&Property> {
        self.properties
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PlyError::PropertyNotFound {
                element: self.name.clone(),
                property: name.to_string(),
            })
    }

    /// Fetches a scalar property as `T`, widening from a narrower stored type
    /// of the same family where needed (`float` data can be read as `f64`,
    /// `char` data as any wider signed integer, and so on).
    pub fn get<T: PlyScalar>(&self, property: &str) -> PlyResult<Vec<T>> {
        let prop = self.property(property)?;
        T::extract_scalars(&prop.data).ok_or_else(|| self.type_mismatch::<T>(prop))
    }

    /// Fetches a list property as rows of `T`, with the same widening rule as
    /// [`Element::get`].
    pub fn get_list<T: PlyScalar>(&self, property: &str) -> PlyResult<Vec<Vec<T>>> {
        let prop = self.property(property)?;
        T::extract_lists(&prop.data).ok_or_else(|| self.type_mismatch::<T>(prop))
    }

    /// Fetches a list property as unsigned indices.
    ///
    /// Requests the data as `u64` first, which covers every unsigned stored
    /// width. Some writers declare index lists as `int`; on a type mismatch
    /// this retries once as `i32` and reinterprets the values as unsigned if
    /// every one is non-negative. Any negative value propagates the original
    /// mismatch error.
    pub fn get_list_indices(&self, property: &str) -> PlyResult<Vec<Vec<u64>>> {
        let original = match self.get_list::<u64>(property) {
            Ok(rows) => return Ok(rows),
            Err(err) => err,
        };
        let Ok(signed) = self.get_list::<i32>(property) else {
            return Err(original);
        };
        let mut rows = Vec::with_capacity(signed.len());
        for row in signed {
            let mut indices = Vec::with_capacity(row.len());
            for value in row {
                if value < 0 {
                    return Err(original);
                }
                indices.push(value as u64);
            }
            rows.push(indices);
        }
        Ok(rows)
    }

    /// Attaches a scalar property column, replacing any same-named column.
    ///
    /// `values.len()` must equal the element's declared count.
    pub fn add_property<T: PlyStorable>(
        &mut self,
        name: impl Into<String>,
        values: Vec<T>,
    ) -> PlyResult<()> {
        let name = name.into();
        if values.len() != self.count {
            return Err(PlyError::SizeMismatch {
                property: name,
                expected: self.count,
                actual: values.len(),
            });
        }
        self.replace(Property::new(name, T::scalar_column(values)));
        Ok(())
    }

    /// Attaches a list property column, replacing any same-named column.
    ///
    /// `rows.len()` must equal the element's declared count; individual rows
    /// may have any length, including zero.
    pub fn add_list_property<T: PlyStorable>(
        &mut self,
        name: impl Into<String>,
        rows: Vec<Vec<T>>,
    ) -> PlyResult<()> {
        let name = name.into();
        if rows.len() != self.count {
            return Err(PlyError::SizeMismatch {
                property: name,
                expected: self.count,
                actual: rows.len(),
            });
        }
        self.replace(Property::new(name, T::list_column(rows)));
        Ok(())
    }

    /// Removes the property with this name, if present.
    pub fn remove_property(&mut self, name: &str) -> bool {
        let before = self.properties.len();
        self.properties.retain(|p| p.name != name);
        self.properties.len() != before
    }

    fn replace(&mut self, property: Property) {
        self.properties.retain(|p| p.name != property.name);
        self.properties.push(property);
    }

    fn type_mismatch<T: PlyScalar>(&self, prop: &Property) -> PlyError {
        PlyError::TypeMismatch {
            property: prop.name.clone(),
            requested: T::REQUEST.name(),
            stored: prop.data.type_description(),
        }
    }

    /// Name and length checks for this element's columns; the first violation
    /// found wins.
    pub(crate) fn validate(&self) -> PlyResult<()> {
        for (i, prop) in self.properties.iter().enumerate() {
            if prop.name.chars().any(char::is_whitespace) {
                return Err(PlyError::WhitespaceInName {
                    kind: "property",
                    name: prop.name.clone(),
                });
            }
            for other in &self.properties[i + 1..] {
                if other.name == prop.name {
                    return Err(PlyError::DuplicateName {
                        kind: "property",
                        name: prop.name.clone(),
                    });
                }
            }
        }
        for prop in &self.properties {
            if prop.len() != self.count {
                return Err(PlyError::SizeMismatch {
                    property: prop.name.clone(),
                    expected: self.count,
                    actual: prop.len(),
                });
            }
        }
        Ok(())
    }
}

//! Pore network property map
//!
//! A [`Network`] is a map from `"<entity>.<attribute>"` keys (for example
//! `pore.coords`, `throat.conns`, `pore.boundary`) to typed arrays. Row `i`
//! of every `pore.*` property describes pore `i`; row `t` of every
//! `throat.*` property describes throat `t`.

use crate::error::{Error, Result};
use ndarray::{Array1, Array2};
use std::collections::BTreeMap;
use std::collections::btree_map;

/// Well-known property keys.
pub mod keys {
    pub const PORE_ALL: &str = "pore.all";
    pub const PORE_COORDS: &str = "pore.coords";
    pub const PORE_CENTROID: &str = "pore.centroid";
    pub const PORE_LABEL: &str = "pore.label";
    pub const PORE_VOLUME: &str = "pore.volume";
    pub const PORE_DIAMETER: &str = "pore.diameter";
    pub const PORE_INSCRIBED_DIAMETER: &str = "pore.inscribed_diameter";
    pub const PORE_EQUIVALENT_DIAMETER: &str = "pore.equivalent_diameter";
    pub const PORE_EXTENDED_DIAMETER: &str = "pore.extended_diameter";
    pub const PORE_SURFACE_AREA: &str = "pore.surface_area";
    pub const PORE_BOUNDARY: &str = "pore.boundary";
    pub const PORE_PHASE: &str = "pore.phase";

    pub const THROAT_ALL: &str = "throat.all";
    pub const THROAT_CONNS: &str = "throat.conns";
    pub const THROAT_CENTROID: &str = "throat.centroid";
    pub const THROAT_VOLUME: &str = "throat.volume";
    pub const THROAT_DIAMETER: &str = "throat.diameter";
    pub const THROAT_INSCRIBED_DIAMETER: &str = "throat.inscribed_diameter";
    pub const THROAT_EQUIVALENT_DIAMETER: &str = "throat.equivalent_diameter";
    pub const THROAT_AREA: &str = "throat.area";
    pub const THROAT_PERIMETER: &str = "throat.perimeter";
    pub const THROAT_TOTAL_LENGTH: &str = "throat.total_length";
    pub const THROAT_LENGTH: &str = "throat.length";
    pub const THROAT_DIRECT_LENGTH: &str = "throat.direct_length";
    pub const THROAT_BOUNDARY: &str = "throat.boundary";
    pub const THROAT_PHASE: &str = "throat.phase";

    /// Key of the face-membership flags of `face`, e.g. `pore.left`.
    pub fn face(face: crate::face::Face) -> String {
        super::Entity::Pore.key(face.as_str())
    }
}

/// Network entity a property describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Pore,
    Throat,
}

impl Entity {
    /// Key prefix, without the dot.
    pub fn prefix(self) -> &'static str {
        match self {
            Entity::Pore => "pore",
            Entity::Throat => "throat",
        }
    }

    /// Full property key for an attribute of this entity.
    pub fn key(self, attribute: &str) -> String {
        format!("{}.{}", self.prefix(), attribute)
    }

    /// Entity named by a key's prefix, if any.
    pub fn of_key(key: &str) -> Option<Self> {
        match key.split_once('.')?.0 {
            "pore" => Some(Entity::Pore),
            "throat" => Some(Entity::Throat),
            _ => None,
        }
    }
}

/// Typed property array.
#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    /// One boolean per row
    Flags(Array1<bool>),
    /// One region label per row
    Labels(Array1<u32>),
    /// One real value per row
    Scalars(Array1<f64>),
    /// One real vector per row (N×D)
    Vectors(Array2<f64>),
    /// One pore-index pair per row (M×2)
    Conns(Array2<usize>),
}

impl Property {
    /// Human-readable kind, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Property::Flags(_) => "flags",
            Property::Labels(_) => "labels",
            Property::Scalars(_) => "scalars",
            Property::Vectors(_) => "vectors",
            Property::Conns(_) => "conns",
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Property::Flags(a) => a.len(),
            Property::Labels(a) => a.len(),
            Property::Scalars(a) => a.len(),
            Property::Vectors(a) => a.nrows(),
            Property::Conns(a) => a.nrows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Array1<bool>> for Property {
    fn from(a: Array1<bool>) -> Self {
        Property::Flags(a)
    }
}

impl From<Array1<u32>> for Property {
    fn from(a: Array1<u32>) -> Self {
        Property::Labels(a)
    }
}

impl From<Array1<f64>> for Property {
    fn from(a: Array1<f64>) -> Self {
        Property::Scalars(a)
    }
}

impl From<Array2<f64>> for Property {
    fn from(a: Array2<f64>) -> Self {
        Property::Vectors(a)
    }
}

impl From<Array2<usize>> for Property {
    fn from(a: Array2<usize>) -> Self {
        Property::Conns(a)
    }
}

/// Pore network as a property map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Network {
    props: BTreeMap<String, Property>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a property, returning the previous value under that key.
    pub fn insert(&mut self, key: impl Into<String>, prop: impl Into<Property>) -> Option<Property> {
        self.props.insert(key.into(), prop.into())
    }

    pub fn get(&self, key: &str) -> Option<&Property> {
        self.props.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.props.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<Property> {
        self.props.remove(key)
    }

    /// Keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Property> {
        self.props.iter()
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    /// Merge another network's properties, overwriting shared keys.
    pub fn update(&mut self, other: Network) {
        self.props.extend(other.props);
    }

    /// Number of pores, taken from `pore.label` or `pore.coords`.
    pub fn num_pores(&self) -> usize {
        self.get(keys::PORE_LABEL)
            .or_else(|| self.get(keys::PORE_COORDS))
            .map_or(0, Property::len)
    }

    /// Number of throats, taken from `throat.conns`.
    pub fn num_throats(&self) -> usize {
        self.get(keys::THROAT_CONNS).map_or(0, Property::len)
    }

    fn require(&self, key: &str) -> Result<&Property> {
        self.get(key)
            .ok_or_else(|| Error::MissingProperty(key.to_string()))
    }

    fn kind_error(key: &str, expected: &'static str, actual: &Property) -> Error {
        Error::PropertyKind {
            key: key.to_string(),
            expected,
            actual: actual.kind(),
        }
    }

    /// Boolean property.
    pub fn flags(&self, key: &str) -> Result<&Array1<bool>> {
        match self.require(key)? {
            Property::Flags(a) => Ok(a),
            other => Err(Self::kind_error(key, "flags", other)),
        }
    }

    /// Label property.
    pub fn labels(&self, key: &str) -> Result<&Array1<u32>> {
        match self.require(key)? {
            Property::Labels(a) => Ok(a),
            other => Err(Self::kind_error(key, "labels", other)),
        }
    }

    /// Scalar property.
    pub fn scalars(&self, key: &str) -> Result<&Array1<f64>> {
        match self.require(key)? {
            Property::Scalars(a) => Ok(a),
            other => Err(Self::kind_error(key, "scalars", other)),
        }
    }

    /// Vector property.
    pub fn vectors(&self, key: &str) -> Result<&Array2<f64>> {
        match self.require(key)? {
            Property::Vectors(a) => Ok(a),
            other => Err(Self::kind_error(key, "vectors", other)),
        }
    }

    /// Connection property.
    pub fn conns(&self, key: &str) -> Result<&Array2<usize>> {
        match self.require(key)? {
            Property::Conns(a) => Ok(a),
            other => Err(Self::kind_error(key, "conns", other)),
        }
    }

    /// Check row counts and connection indices.
    ///
    /// Every `pore.*` property must have [`Network::num_pores`] rows, every
    /// `throat.*` property [`Network::num_throats`] rows, `throat.conns`
    /// must have two columns and reference existing pores.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PropertyLength`] or [`Error::IndexOutOfBounds`] on
    /// the first inconsistency.
    pub fn validate(&self) -> Result<()> {
        let num_pores = self.num_pores();
        let num_throats = self.num_throats();
        for (key, prop) in &self.props {
            let expected = match Entity::of_key(key) {
                Some(Entity::Pore) => num_pores,
                Some(Entity::Throat) => num_throats,
                None => continue,
            };
            if prop.len() != expected {
                return Err(Error::PropertyLength {
                    key: key.clone(),
                    expected,
                    actual: prop.len(),
                });
            }
        }

        if let Some(prop) = self.get(keys::THROAT_CONNS) {
            let conns = match prop {
                Property::Conns(a) => a,
                other => return Err(Self::kind_error(keys::THROAT_CONNS, "conns", other)),
            };
            if conns.ncols() != 2 {
                return Err(Error::PropertyLength {
                    key: keys::THROAT_CONNS.to_string(),
                    expected: 2,
                    actual: conns.ncols(),
                });
            }
            if let Some(&index) = conns.iter().find(|&&p| p >= num_pores) {
                return Err(Error::IndexOutOfBounds {
                    index,
                    len: num_pores,
                });
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Network {
    type Item = (&'a String, &'a Property);
    type IntoIter = btree_map::Iter<'a, String, Property>;

    fn into_iter(self) -> Self::IntoIter {
        self.props.iter()
    }
}

//! Domain faces and face selections
//!
//! A face names one side of the image domain. Faces drive two separate
//! axis mappings, kept here as constant tables:
//!
//! - the padding table, pairing a low and a high face per image axis
//! - the labeling table, giving the coordinate column compared when
//!   flagging pores that sit on a face
//!
//! The two tables intentionally disagree for 3-D images (top/bottom pads
//! axis 1 but labels on coordinate column 2).

use crate::error::{Error, Result};
use crate::image::Dimensionality;
use std::fmt;
use std::str::FromStr;

/// One of the six canonical domain faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    Top,
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

impl Face {
    /// All faces in canonical order.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::Left,
        Face::Right,
        Face::Front,
        Face::Back,
    ];

    /// Lower-case face name, also used as the `pore.<name>` property suffix.
    pub fn as_str(self) -> &'static str {
        match self {
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::Left => "left",
            Face::Right => "right",
            Face::Front => "front",
            Face::Back => "back",
        }
    }

    /// Position of the face in [`Face::ALL`].
    pub fn index(self) -> usize {
        match self {
            Face::Top => 0,
            Face::Bottom => 1,
            Face::Left => 2,
            Face::Right => 3,
            Face::Front => 4,
            Face::Back => 5,
        }
    }

    /// Whether the face sits on the low-coordinate side of its axis.
    pub fn is_low_side(self) -> bool {
        matches!(self, Face::Top | Face::Left | Face::Front)
    }

    /// Whether the face has an axis on an image of this dimensionality.
    pub fn applies_to(self, dim: Dimensionality) -> bool {
        dim == Dimensionality::Three || !matches!(self, Face::Front | Face::Back)
    }

    /// Coordinate column compared when labeling pores on this face.
    pub fn label_axis(self, dim: Dimensionality) -> usize {
        match dim {
            Dimensionality::Two => LABEL_AXES_2D[self.index()],
            Dimensionality::Three => LABEL_AXES_3D[self.index()],
        }
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Face {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Face::ALL
            .into_iter()
            .find(|face| face.as_str() == s)
            .ok_or_else(|| Error::UnknownFace(s.to_string()))
    }
}

/// (low face, high face) per image axis, 3-D.
pub const PAD_AXES_3D: [(Face, Face); 3] = [
    (Face::Front, Face::Back),
    (Face::Top, Face::Bottom),
    (Face::Left, Face::Right),
];

/// (low face, high face) per image axis, 2-D.
pub const PAD_AXES_2D: [(Face, Face); 2] = [(Face::Top, Face::Bottom), (Face::Left, Face::Right)];

/// Labeling coordinate column per face (indexed by [`Face::index`]), 3-D.
pub const LABEL_AXES_3D: [usize; 6] = [2, 2, 1, 1, 0, 0];

/// Labeling coordinate column per face (indexed by [`Face::index`]), 2-D.
///
/// Front/back map past the last column of 2-D coordinates; they are
/// rejected before labeling.
pub const LABEL_AXES_2D: [usize; 6] = [0, 0, 1, 1, 2, 2];

impl Dimensionality {
    /// Face pairs padded along each image axis, in axis order.
    pub fn pad_axes(self) -> &'static [(Face, Face)] {
        match self {
            Dimensionality::Two => &PAD_AXES_2D,
            Dimensionality::Three => &PAD_AXES_3D,
        }
    }
}

/// Ordered, duplicate-free set of faces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FaceSet {
    faces: Vec<Face>,
}

impl FaceSet {
    /// Create an empty face set.
    pub fn new() -> Self {
        Self::default()
    }

    /// All six faces.
    pub fn all() -> Self {
        Face::ALL.into_iter().collect()
    }

    /// Every face that has an axis at this dimensionality.
    pub fn for_dimensionality(dim: Dimensionality) -> Self {
        Face::ALL
            .into_iter()
            .filter(|face| face.applies_to(dim))
            .collect()
    }

    /// Parse face names.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownFace`] on the first unrecognized name.
    pub fn parse<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for name in names {
            set.insert(name.as_ref().parse()?);
        }
        Ok(set)
    }

    /// Add a face; returns `false` if it was already present.
    pub fn insert(&mut self, face: Face) -> bool {
        if self.contains(face) {
            return false;
        }
        self.faces.push(face);
        true
    }

    /// Builder form of [`FaceSet::insert`].
    pub fn with(mut self, face: Face) -> Self {
        self.insert(face);
        self
    }

    pub fn contains(&self, face: Face) -> bool {
        self.faces.contains(&face)
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Faces in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = Face> + '_ {
        self.faces.iter().copied()
    }

    /// Check every face has an axis at this dimensionality.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FaceNotApplicable`] for front/back on a 2-D image.
    pub fn validate(&self, dim: Dimensionality) -> Result<()> {
        match self.iter().find(|face| !face.applies_to(dim)) {
            Some(face) => Err(Error::FaceNotApplicable {
                face,
                ndim: dim.ndim(),
            }),
            None => Ok(()),
        }
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<T: IntoIterator<Item = Face>>(iter: T) -> Self {
        let mut set = Self::new();
        for face in iter {
            set.insert(face);
        }
        set
    }
}

/// Caller's choice of boundary faces.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FaceSelection {
    /// Every face meaningful for the image dimensionality
    #[default]
    AllFaces,
    /// No boundary faces: padding, injection and face labeling are skipped
    NoFaces,
    /// An explicit set; an empty set behaves like [`FaceSelection::NoFaces`]
    Faces(FaceSet),
}

impl FaceSelection {
    /// Resolve the selection for an image, `None` meaning no boundaries.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FaceNotApplicable`] when an explicit set names a
    /// face the image has no axis for.
    pub fn resolve(&self, dim: Dimensionality) -> Result<Option<FaceSet>> {
        match self {
            FaceSelection::AllFaces => Ok(Some(FaceSet::for_dimensionality(dim))),
            FaceSelection::NoFaces => Ok(None),
            FaceSelection::Faces(set) if set.is_empty() => Ok(None),
            FaceSelection::Faces(set) => {
                set.validate(dim)?;
                Ok(Some(set.clone()))
            }
        }
    }
}

impl From<FaceSet> for FaceSelection {
    fn from(set: FaceSet) -> Self {
        FaceSelection::Faces(set)
    }
}

//! Field paths for locating values inside a bid request.
//!
//! A [`FieldPath`] addresses one value in the request tree, for example
//! `imp[0].video.protocols[1]`. Paths are built by appending segments while the
//! engine descends, and are rendered with dots between field names and
//! brackets around array indices.

use std::fmt::{self, Display};

use serde::{Serialize, Serializer};

/// One step in a [`FieldPath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Access to a named member of an object (e.g. `device`).
    Field(String),
    /// Access to a position inside an array (e.g. `[2]`).
    Index(usize),
}

/// A dotted/indexed address of a value in the request tree.
///
/// Appending never mutates the receiver, so a parent path can be reused for
/// every sibling the engine visits.
///
/// ```rust
/// use bidcheck::FieldPath;
///
/// let path = FieldPath::root()
///     .push_field("imp")
///     .push_index(0)
///     .push_field("bidfloor");
///
/// assert_eq!(path.to_string(), "imp[0].bidfloor");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct FieldPath {
    segments: Vec<PathSegment>,
}

impl FieldPath {
    /// The path of the request itself.
    pub fn root() -> Self {
        Self::default()
    }

    /// Returns a copy of this path extended by a field name.
    pub fn push_field(&self, name: impl Into<String>) -> Self {
        self.extended(PathSegment::Field(name.into()))
    }

    /// Returns a copy of this path extended by an array index.
    pub fn push_index(&self, index: usize) -> Self {
        self.extended(PathSegment::Index(index))
    }

    fn extended(&self, segment: PathSegment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments; also the nesting depth of the addressed value.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> impl Iterator<Item = &PathSegment> {
        self.segments.iter()
    }

    /// Returns the enclosing path, or `None` at the root.
    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    pub fn last(&self) -> Option<&PathSegment> {
        self.segments.last()
    }

    /// Parses the rendered form back into a path.
    ///
    /// Used by report lookups so callers can write `report.at_path("device.make")`.
    /// Returns `None` for malformed input such as an unclosed bracket.
    pub fn parse(rendered: &str) -> Option<Self> {
        let mut segments = Vec::new();
        for part in rendered.split('.').filter(|p| !p.is_empty()) {
            let (name, mut indices) = match part.find('[') {
                Some(pos) => (&part[..pos], &part[pos..]),
                None => (part, ""),
            };
            if !name.is_empty() {
                segments.push(PathSegment::Field(name.to_string()));
            }
            while let Some(rest) = indices.strip_prefix('[') {
                let close = rest.find(']')?;
                let index = rest[..close].parse().ok()?;
                segments.push(PathSegment::Index(index));
                indices = &rest[close + 1..];
            }
            if !indices.is_empty() {
                return None;
            }
        }
        Some(Self { segments })
    }
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{}", name)?,
                PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
            }
        }
        Ok(())
    }
}

impl Serialize for FieldPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

use std::fmt::{Display, Formatter};
use std::sync::Arc;

/// One path component of a compiled route.
///
/// A dynamic segment captures whatever the request carries at its position,
/// a literal segment is expected to match `name` verbatim.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct Segment {
    name: Arc<str>,
    is_dynamic: bool,
}

impl Segment {
    pub fn literal(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            is_dynamic: false,
        }
    }

    pub fn dynamic(name: impl Into<Arc<str>>) -> Self {
        Self {
            name: name.into(),
            is_dynamic: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_dynamic(&self) -> bool {
        self.is_dynamic
    }
}

impl Display for Segment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_dynamic {
            write!(f, "[{}]", self.name)
        } else {
            f.write_str(&self.name)
        }
    }
}

/// Ordered segment sequence of an already-selected route.
///
/// Order is significant: the n-th segment corresponds to the n-th path
/// component of the request URL.
#[derive(Debug, Clone, Default, Hash, Eq, PartialEq)]
pub struct RouteDescriptor {
    segments: Vec<Segment>,
}

impl RouteDescriptor {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Parses a route template such as `/users/[id]/posts`.
    ///
    /// Empty components are skipped, so `/`, `` and `//` all yield the root route.
    pub fn parse(template: &str) -> Self {
        let segments = template
            .split('/')
            .filter(|component| !component.is_empty())
            .map(|component| {
                match component
                    .strip_prefix('[')
                    .and_then(|inner| inner.strip_suffix(']'))
                {
                    Some(name) if !name.is_empty() => Segment::dynamic(name),
                    _ => Segment::literal(component),
                }
            })
            .collect();

        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn dynamic_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.is_dynamic())
    }
}

impl From<Vec<Segment>> for RouteDescriptor {
    fn from(segments: Vec<Segment>) -> Self {
        Self::new(segments)
    }
}

impl Display for RouteDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return f.write_str("/");
        }

        for segment in &self.segments {
            write!(f, "/{segment}")?;
        }

        Ok(())
    }
}

/// One step from an owner to one of its members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// Named member of a record.
    Field(String),
    /// Position inside an array or ordered collection.
    Index(usize),
    /// Entry of a key-value map, identified by its rendered key.
    Key(String),
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Segment::Field(name) => write!(f, ".{}", name),
            Segment::Index(i) => write!(f, "[{}]", i),
            Segment::Key(key) => write!(f, "{{{}}}", key),
        }
    }
}

/// Route from the root value to some value in the graph, e.g. `root.owner.pets[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Hash)]
pub struct MemberPath {
    /// The name the root is known by.
    pub root: String,
    /// Steps taken from the root, outermost first.
    pub segments: Vec<Segment>,
}

impl MemberPath {
    /// Creates a new `MemberPath` at the root.
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            segments: Vec::new(),
        }
    }

    pub fn push(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    pub fn pop(&mut self) -> Option<Segment> {
        self.segments.pop()
    }

}

impl std::fmt::Display for MemberPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)?;
        for segment in &self.segments {
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_each_segment_kind() {
        let mut path = MemberPath::new("root");
        path.push(Segment::Field("owner".to_string()));
        path.push(Segment::Index(2));
        path.push(Segment::Key("\"k\"".to_string()));
        assert_eq!(path.to_string(), "root.owner[2]{\"k\"}");
        assert_eq!(path.segments.len(), 3);

        path.pop();
        path.pop();
        assert_eq!(path.to_string(), "root.owner");
    }
}

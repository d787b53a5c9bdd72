use crate::component::Component;
use std::cell::RefCell;

/// One step of the path from the root of a response to a component.
#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(untagged)]
pub enum PathSegment {
    Index(usize),
    Name(String),
}
impl std::fmt::Display for PathSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Name(name) => f.write_str(name),
        }
    }
}
impl std::convert::From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}
impl std::convert::From<String> for PathSegment {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}
impl std::convert::From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// The chain of components currently being resolved by one task.
///
/// A stack belongs to a single thread of resolution (it is not
/// `Sync`); concurrent strategies keep one per task. Every push returns a
/// [`StackGuard`] which pops the entry again when dropped, so pushes and pops
/// stay paired on early returns and unwinding alike.
#[derive(Debug, Default)]
pub struct ComponentStack {
    segments: RefCell<Vec<PathSegment>>,
}
impl ComponentStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.segments.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.borrow().is_empty()
    }

    pub fn current(&self) -> Option<PathSegment> {
        self.segments.borrow().last().cloned()
    }

    #[must_use = "the segment is popped as soon as the guard is dropped"]
    pub fn push(&self, segment: impl Into<PathSegment>) -> StackGuard<'_> {
        let mut segments = self.segments.borrow_mut();
        let depth = segments.len();
        segments.push(segment.into());
        StackGuard {
            depth,
            stack: self,
        }
    }

    /// Runs `block` with `component` on top of the stack. Components without
    /// a name (inline fragments, anonymous operations) add no path segment.
    pub fn stacked<R>(&self, component: &Component<'_>, block: impl FnOnce() -> R) -> R {
        let _guard = component.name().map(|name| self.push(name));
        block()
    }

    /// The path from the root to the top of the stack.
    pub fn to_path(&self) -> Vec<PathSegment> {
        self.segments.borrow().clone()
    }
}

/// Pops its [`ComponentStack`] entry (and anything pushed above it) on drop.
#[derive(Debug)]
pub struct StackGuard<'a> {
    depth: usize,
    stack: &'a ComponentStack,
}
impl std::ops::Drop for StackGuard<'_> {
    fn drop(&mut self) {
        self.stack.segments.borrow_mut().truncate(self.depth);
    }
}

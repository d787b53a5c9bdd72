use crate::directives::DirectiveLocation;
use crate::directives::DirectiveOwner;
use crate::directives::DirectiveSet;
use crate::directives::EventSource;
use crate::directives::FilterArg;

/// A bare directive owner sitting at a fixed location.
#[derive(Debug)]
pub(super) struct TestOwner {
    directives: DirectiveSet,
    location: DirectiveLocation,
    name: String,
    namespaces: Vec<String>,
    owning_directive: Option<String>,
}
impl TestOwner {
    pub(super) fn new(name: &str, location: DirectiveLocation) -> Self {
        Self {
            directives: DirectiveSet::new(),
            location,
            name: name.to_string(),
            namespaces: vec![],
            owning_directive: None,
        }
    }

    pub(super) fn in_namespace(mut self, namespace: &str) -> Self {
        self.namespaces.push(namespace.to_string());
        self
    }

    pub(super) fn owned_by(mut self, directive_name: &str) -> Self {
        self.owning_directive = Some(directive_name.to_string());
        self
    }
}
impl DirectiveOwner for TestOwner {
    fn directive_location(&self) -> DirectiveLocation {
        self.location
    }

    fn directive_owner_name(&self) -> String {
        self.name.to_owned()
    }

    fn directive_set(&self) -> &DirectiveSet {
        &self.directives
    }

    fn directive_set_mut(&mut self) -> &mut DirectiveSet {
        &mut self.directives
    }

    fn directive_namespaces(&self) -> Vec<String> {
        self.namespaces.clone()
    }

    fn owning_directive(&self) -> Option<&str> {
        self.owning_directive.as_deref()
    }
}

/// An event source answering to a fixed list of type names.
#[derive(Debug)]
pub(super) struct TestSource(pub(super) Vec<&'static str>);
impl EventSource for TestSource {
    fn of_type(&self, type_name: &str) -> bool {
        self.0.iter().any(|name| *name == type_name)
    }
}

pub(super) fn no_filters() -> Vec<(&'static str, FilterArg)> {
    vec![]
}

use crate::directives::DirectiveLocation;
use std::panic::Location;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum DirectiveUsageError {
    #[error("The {directive} directive is abstract and cannot be instantiated")]
    AbstractDirective {
        directive: String,
    },

    #[error("Directive `@{name}` was not found in namespaces {}", format_namespaces(.namespaces))]
    DirectiveNotFound {
        name: String,
        namespaces: Vec<String>,
    },

    #[error("Cannot add directives to {owner}: its directives were already validated")]
    DirectivesFrozen {
        owner: String,
    },

    #[error("Invalid directive global id `{global_id}`: {reason}")]
    InvalidGlobalId {
        global_id: String,
        reason: String,
    },

    #[error(
        "The {directive} directive cannot be used on {owner} ({location}); it \
        may only be used on: {}",
        format_locations(.allowed_locations)
    )]
    LocationMismatch {
        allowed_locations: Vec<DirectiveLocation>,
        directive: String,
        location: DirectiveLocation,
        owner: String,
    },

    #[error(
        "This {directive} directive already belongs to {current_owner} and \
        cannot also be assigned to {rejected_owner}"
    )]
    OwnerAlreadyAssigned {
        current_owner: String,
        directive: String,
        rejected_owner: String,
    },

    #[error("The {directive} directive cannot be used on an element of its own definition")]
    SelfReferentialDirective {
        directive: String,
    },
}

/// A [`DirectiveUsageError`] together with the source location of the call
/// which attached the directive.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{error} (at {call_site})")]
pub struct DirectiveUseError {
    pub call_site: &'static Location<'static>,
    #[source]
    pub error: DirectiveUsageError,
}
impl DirectiveUseError {
    #[track_caller]
    pub fn here(error: DirectiveUsageError) -> Self {
        Self {
            call_site: Location::caller(),
            error,
        }
    }

    pub fn error(&self) -> &DirectiveUsageError {
        &self.error
    }
}

fn format_locations(locations: &[DirectiveLocation]) -> String {
    if locations.is_empty() {
        return "(no locations)".to_string();
    }
    locations.iter()
        .map(DirectiveLocation::name)
        .collect::<Vec<_>>()
        .join(" | ")
}

fn format_namespaces(namespaces: &[String]) -> String {
    namespaces.iter()
        .map(|namespace| format!("`{namespace}`"))
        .collect::<Vec<_>>()
        .join(", ")
}

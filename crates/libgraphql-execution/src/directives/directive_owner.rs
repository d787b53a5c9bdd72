use crate::directives::BoundListener;
use crate::directives::DirectiveDefinition;
use crate::directives::DirectiveInstance;
use crate::directives::DirectiveLocation;
use crate::directives::DirectiveUsageError;
use crate::directives::DirectiveUseError;
use crate::directives::DirectiveValidationError;
use crate::directives::Event;
use crate::directives::ListenerError;
use crate::directives::TypeMap;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde_json::Value;
use std::sync::Arc;
use std::sync::OnceLock;

type EventMap = IndexMap<String, Vec<BoundListener>>;

/// Identifies the element a [`DirectiveInstance`] is attached to.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct DirectiveOwnerRef {
    pub location: DirectiveLocation,
    pub name: String,
}
impl std::fmt::Display for DirectiveOwnerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} `{}`", self.location, self.name)
    }
}

/// The directive instances attached to one owner.
///
/// Instances are unique by identity: the same instance is never held twice,
/// but two instances of the same directive kind may coexist. Once
/// [frozen](Self::is_frozen) the set never changes again.
#[derive(Debug, Default)]
pub struct DirectiveSet {
    events: OnceLock<EventMap>,
    frozen: bool,
    instances: Vec<Arc<DirectiveInstance>>,
}
impl DirectiveSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, instance: &Arc<DirectiveInstance>) -> bool {
        self.instances.iter().any(|held| Arc::ptr_eq(held, instance))
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<DirectiveInstance>> {
        self.instances.iter()
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    /// Adds `instance` on behalf of `owner`. Every check runs before the set
    /// is touched. Returns `false` if the instance was already held.
    fn insert(
        &mut self,
        owner: DirectiveOwnerRef,
        instance: Arc<DirectiveInstance>,
    ) -> Result<bool, DirectiveUsageError> {
        self.check_open(&owner)?;
        check_location(&owner, &instance)?;
        if self.contains(&instance) {
            return Ok(false);
        }

        instance.assign_owner(owner)?;
        self.instances.push(instance);
        self.events = OnceLock::new();
        Ok(true)
    }

    /// Adds every instance in `instances` on behalf of `owner`, or none of
    /// them. Returns how many instances were not already held.
    fn insert_all(
        &mut self,
        owner: DirectiveOwnerRef,
        instances: impl IntoIterator<Item = Arc<DirectiveInstance>>,
    ) -> Result<usize, DirectiveUsageError> {
        self.check_open(&owner)?;
        let mut pending: Vec<Arc<DirectiveInstance>> = vec![];
        for instance in instances {
            check_location(&owner, &instance)?;
            if self.contains(&instance)
                || pending.iter().any(|held| Arc::ptr_eq(held, &instance)) {
                continue;
            }
            if let Some(current_owner) = instance.owner() {
                return Err(DirectiveUsageError::OwnerAlreadyAssigned {
                    current_owner: current_owner.to_string(),
                    directive: instance.definition().display_name(),
                    rejected_owner: owner.to_string(),
                });
            }
            pending.push(instance);
        }

        for instance in &pending {
            instance.assign_owner(owner.clone())?;
        }
        let added = pending.len();
        if added > 0 {
            self.instances.append(&mut pending);
            self.events = OnceLock::new();
        }
        Ok(added)
    }

    fn check_open(&self, owner: &DirectiveOwnerRef) -> Result<(), DirectiveUsageError> {
        if self.frozen {
            return Err(DirectiveUsageError::DirectivesFrozen {
                owner: owner.to_string(),
            });
        }
        Ok(())
    }

    fn events(&self) -> &EventMap {
        self.events.get_or_init(|| {
            let mut events = EventMap::new();
            for instance in &self.instances {
                for (event_name, mut listeners) in instance.all_events() {
                    events.entry(event_name)
                        .or_default()
                        .append(&mut listeners);
                }
            }
            events
        })
    }
}

fn check_location(
    owner: &DirectiveOwnerRef,
    instance: &DirectiveInstance,
) -> Result<(), DirectiveUsageError> {
    let definition = instance.definition();
    if !definition.allows_location(owner.location) {
        return Err(DirectiveUsageError::LocationMismatch {
            allowed_locations: definition.locations().iter().copied().collect(),
            directive: definition.display_name(),
            location: owner.location,
            owner: owner.name.to_owned(),
        });
    }
    Ok(())
}

/// The capability of holding directives, granted to any schema or query
/// element.
///
/// Implementors provide their [`directive_location`](Self::directive_location)
/// (fixed per kind of element) and storage for a [`DirectiveSet`]; all other
/// behavior is provided.
pub trait DirectiveOwner {
    /// The location this kind of element occupies. Every directive attached
    /// to it must allow this location.
    fn directive_location(&self) -> DirectiveLocation;

    /// A name for this element, used in diagnostics.
    fn directive_owner_name(&self) -> String;

    fn directive_set(&self) -> &DirectiveSet;

    fn directive_set_mut(&mut self) -> &mut DirectiveSet;

    /// The namespaces searched first when resolving directives by name.
    fn directive_namespaces(&self) -> Vec<String> {
        vec![]
    }

    /// The directive kind this element is part of, if any (e.g. for the
    /// arguments of a directive definition). Such an element may not use
    /// that same directive.
    fn owning_directive(&self) -> Option<&str> {
        None
    }

    fn directive_owner_ref(&self) -> DirectiveOwnerRef {
        DirectiveOwnerRef {
            location: self.directive_location(),
            name: self.directive_owner_name(),
        }
    }

    fn directives(&self) -> &[Arc<DirectiveInstance>] {
        &self.directive_set().instances
    }

    /// Attaches a ready-made instance.
    ///
    /// Fails without modifying this element if its directives are frozen, if
    /// the directive does not allow this element's location, or if the
    /// instance already belongs to another element.
    #[track_caller]
    fn use_directive(
        &mut self,
        instance: Arc<DirectiveInstance>,
    ) -> Result<Arc<DirectiveInstance>, DirectiveUseError> {
        let owner = self.directive_owner_ref();
        let owner_desc = owner.to_string();
        match self.directive_set_mut().insert(owner, Arc::clone(&instance)) {
            Ok(inserted) => {
                if inserted {
                    log::trace!(
                        "Attached {} to {owner_desc}.",
                        instance.definition().display_name(),
                    );
                }
                Ok(instance)
            },
            Err(error) => Err(DirectiveUseError::here(error)),
        }
    }

    /// Attaches several ready-made instances in one step. Every instance is
    /// checked before any is attached, so on failure this element is left
    /// unchanged. Returns how many instances were newly attached.
    #[track_caller]
    fn use_directives<I>(&mut self, instances: I) -> Result<usize, DirectiveUseError>
    where
        Self: Sized,
        I: IntoIterator<Item = Arc<DirectiveInstance>>,
    {
        let owner = self.directive_owner_ref();
        let owner_desc = owner.to_string();
        match self.directive_set_mut().insert_all(owner, instances) {
            Ok(added) => {
                log::trace!("Attached {added} directive(s) to {owner_desc}.");
                Ok(added)
            },
            Err(error) => Err(DirectiveUseError::here(error)),
        }
    }

    /// Resolves the directive kind called `name` through `type_map`, builds
    /// an instance from `args` and attaches it. Several instances can be
    /// attached at once with [`use_directives`](Self::use_directives).
    #[track_caller]
    fn use_directive_named<K, I>(
        &mut self,
        type_map: &dyn TypeMap,
        name: &str,
        args: I,
    ) -> Result<Arc<DirectiveInstance>, DirectiveUseError>
    where
        Self: Sized,
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let instance = type_map
            .fetch_directive(name, &self.directive_namespaces(), self.owning_directive())
            .and_then(|definition| definition.build(args));
        match instance {
            Ok(instance) => self.use_directive(instance),
            Err(error) => Err(DirectiveUseError::here(error)),
        }
    }

    /// Whether an instance of exactly `definition` is attached.
    fn is_using(&self, definition: &DirectiveDefinition) -> bool {
        self.directives().iter()
            .any(|instance| instance.is_instance_of(definition))
    }

    fn has_directive(&self, definition: &DirectiveDefinition) -> bool {
        self.is_using(definition)
    }

    /// Like [`is_using`](Self::is_using), resolving the directive kind by
    /// name first. Unknown names are never in use.
    fn is_using_named(&self, type_map: &dyn TypeMap, name: &str) -> bool {
        type_map.fetch_directive(name, &self.directive_namespaces(), None)
            .is_ok_and(|definition| self.is_using(&definition))
    }

    /// Every event name some attached directive listens to.
    fn all_directive_listeners(&self) -> IndexSet<String> {
        self.directives().iter()
            .flat_map(|instance| {
                instance.listener_event_names()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// The listeners of every attached directive, merged by event name and
    /// bound to their instances. Computed once and cached until the set of
    /// directives changes.
    fn all_directive_events(&self) -> &IndexMap<String, Vec<BoundListener>> {
        self.directive_set().events()
    }

    /// Dispatches `event` to every attached listener that accepts it, in
    /// attachment order. Returns how many listeners ran; the first listener
    /// error stops the dispatch.
    fn trigger_directive_event(&self, event: &Event<'_>) -> Result<usize, ListenerError> {
        let Some(listeners) = self.all_directive_events().get(event.name()) else {
            return Ok(0);
        };

        let mut fired = 0;
        for listener in listeners.iter().filter(|listener| listener.accepts(event)) {
            listener.call(event)?;
            fired += 1;
        }
        log::trace!(
            "Event `{}` on {} fired {fired} of {} listeners.",
            event.name(),
            self.directive_owner_name(),
            listeners.len(),
        );
        Ok(fired)
    }

    /// Validates every attached directive and, if all are valid, freezes
    /// this element's directives.
    fn validate_directives(&mut self) -> Result<(), Vec<DirectiveValidationError>> {
        let errors: Vec<_> = self.directives().iter()
            .filter_map(|instance| instance.validate().err())
            .collect();
        if !errors.is_empty() {
            return Err(errors);
        }

        let directives = self.directive_set_mut();
        if !directives.frozen {
            log::debug!("Freezing {} directive(s).", directives.len());
            directives.frozen = true;
        }
        Ok(())
    }
}

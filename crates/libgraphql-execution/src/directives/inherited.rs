use indexmap::IndexMap;
use indexmap::IndexSet;
use std::hash::Hash;
use std::sync::OnceLock;

/// A collection type that knows how to layer its own entries over the
/// composed collection of a parent definition.
pub(crate) trait Compose: Clone {
    fn compose(parent: &Self, local: &Self) -> Self;
}

/// Sets compose by union. Parent entries keep their position.
impl<T: Clone + Eq + Hash> Compose for IndexSet<T> {
    fn compose(parent: &Self, local: &Self) -> Self {
        parent.iter().chain(local.iter()).cloned().collect()
    }
}

/// Maps of lists compose by appending: a local entry for an existing key is
/// added after the parent's entries rather than replacing them.
impl<K: Clone + Eq + Hash, V: Clone> Compose for IndexMap<K, Vec<V>> {
    fn compose(parent: &Self, local: &Self) -> Self {
        let mut composed = parent.clone();
        for (key, values) in local {
            composed.entry(key.clone())
                .or_default()
                .extend(values.iter().cloned());
        }
        composed
    }
}

/// An ordered map composed by overlay: local entries replace parent entries
/// of the same key in place, new keys are appended.
#[derive(Clone, Debug, Default)]
pub(crate) struct Overlay<K: Eq + Hash, V>(pub(crate) IndexMap<K, V>);
impl<K: Clone + Eq + Hash, V: Clone> Compose for Overlay<K, V> {
    fn compose(parent: &Self, local: &Self) -> Self {
        let mut composed = parent.0.clone();
        for (key, value) in &local.0 {
            composed.insert(key.clone(), value.clone());
        }
        Overlay(composed)
    }
}

/// A collection declared on a definition which, when read, composes its
/// locally-declared entries with the composed collection of the parent
/// definition. Composition happens once, on first read.
#[derive(Debug)]
pub(crate) struct Inherited<C: Compose> {
    composed: OnceLock<C>,
    local: C,
    replaces_parent: bool,
}
impl<C: Compose> Inherited<C> {
    pub(crate) fn new(local: C, replaces_parent: bool) -> Self {
        Self {
            composed: OnceLock::new(),
            local,
            replaces_parent,
        }
    }

    pub(crate) fn local(&self) -> &C {
        &self.local
    }

    pub(crate) fn replaces_parent(&self) -> bool {
        self.replaces_parent
    }

    /// The composed collection. `parent` is only consulted on the first call.
    pub(crate) fn get(&self, parent: Option<&C>) -> &C {
        self.composed.get_or_init(|| match parent {
            Some(parent) if !self.replaces_parent => C::compose(parent, &self.local),
            _ => self.local.clone(),
        })
    }
}

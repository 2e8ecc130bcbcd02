/*!
The maintainer registry: one [Maintainer] aggregate per normalized maintainer name.

A registry is an ordinary value. Every build stage receives it as `&mut`, so a
registry can only be mutated by one build at a time.
*/
use crate::models::{normalize_name, Maintainer, Organisation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaintainerRegistry {
    maintainers: BTreeMap<String, Maintainer>,
}

impl MaintainerRegistry {
    pub fn new() -> MaintainerRegistry {
        MaintainerRegistry::default()
    }

    /// Returns the maintainer for `name`, creating an empty one on first use.
    ///
    /// Names that only differ in case or surrounding whitespace resolve to the same
    /// maintainer.
    pub fn get_or_create(&mut self, name: &str) -> &mut Maintainer {
        let key = normalize_name(name);
        self.maintainers
            .entry(key)
            .or_insert_with_key(|key| Maintainer::new(key))
    }

    pub fn get(&self, name: &str) -> Option<&Maintainer> {
        self.maintainers.get(&normalize_name(name))
    }

    pub fn len(&self) -> usize {
        self.maintainers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maintainers.is_empty()
    }

    /// All maintainers, ordered by name.
    pub fn maintainers(&self) -> impl Iterator<Item = &Maintainer> {
        self.maintainers.values()
    }

    /// All organisations of all maintainers, flattened in maintainer order.
    pub fn organisations(&self) -> impl Iterator<Item = &Organisation> {
        self.maintainers().flat_map(|m| m.organisations.iter())
    }

    /// Folds another registry into this one: counters are summed and organisation
    /// lists appended per maintainer.
    pub fn merge(&mut self, other: MaintainerRegistry) {
        for (name, maintainer) in other.maintainers {
            match self.maintainers.get_mut(&name) {
                Some(existing) => existing.merge(maintainer),
                None => {
                    self.maintainers.insert(name, maintainer);
                }
            }
        }
    }
}

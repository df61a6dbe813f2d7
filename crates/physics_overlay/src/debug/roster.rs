//! Body-to-visual registry reconciled once per frame

use std::collections::HashMap;

use super::filter::{admits, DebugFilter};
use crate::foundation::collections::BodyId;

/// Registry mapping live bodies to their debug entries
///
/// [`Roster::reconcile`] runs a reuse-or-create pass over the live bodies
/// before anything is retired, so a body that stays live keeps its entry.
#[derive(Debug)]
pub struct Roster<E> {
    entries: HashMap<BodyId, E>,
}

impl<E> Default for Roster<E> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<E> Roster<E> {
    /// Create an empty roster
    pub fn new() -> Self {
        Self::default()
    }

    /// Bring the registry in line with `live`
    ///
    /// Admitted bodies keep their entry or get one from `create` (a `None`
    /// result leaves the body without an entry this frame). Entries for bodies
    /// that are gone or filtered out are returned for the caller to dispose of.
    pub fn reconcile<F>(
        &mut self,
        live: &[BodyId],
        filter: Option<&dyn DebugFilter>,
        mut create: F,
    ) -> Vec<(BodyId, E)>
    where
        F: FnMut(BodyId) -> Option<E>,
    {
        let mut current = HashMap::with_capacity(live.len());
        for &id in live {
            if !admits(filter, id) {
                continue;
            }
            let entry = match self.entries.remove(&id) {
                Some(entry) => Some(entry),
                None => create(id),
            };
            if let Some(entry) = entry {
                current.insert(id, entry);
            }
        }

        let retired = std::mem::replace(&mut self.entries, current);
        retired.into_iter().collect()
    }

    /// Entry for a body
    pub fn get(&self, id: BodyId) -> Option<&E> {
        self.entries.get(&id)
    }

    /// Mutable entry for a body
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut E> {
        self.entries.get_mut(&id)
    }

    /// Iterate over entries
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyId, &mut E)> {
        self.entries.iter_mut().map(|(id, entry)| (*id, entry))
    }

    /// Remove every entry
    pub fn drain(&mut self) -> Vec<(BodyId, E)> {
        self.entries.drain().collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the roster is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

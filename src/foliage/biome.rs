//! Biomes: ordered foliage sets.

use serde::{Deserialize, Serialize};

use super::{DetailPrototype, Foliage};

/// Named, ordered list of foliage types.
///
/// Every edit goes through `edit()` or `push()` and bumps the revision, so
/// owners can tell a stale biome from a fresh one without polling contents.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Biome {
    pub name: String,
    foliage: Vec<Foliage>,
    #[serde(skip)]
    revision: u64,
}

impl Biome {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    pub fn with_foliage(mut self, foliage: Foliage) -> Self {
        self.push(foliage);
        self
    }

    pub fn foliage(&self) -> &[Foliage] {
        &self.foliage
    }

    pub fn push(&mut self, foliage: Foliage) {
        self.foliage.push(foliage);
        self.revision += 1;
    }

    /// Mutate the foliage list and bump the revision.
    pub fn edit<R>(&mut self, f: impl FnOnce(&mut Vec<Foliage>) -> R) -> R {
        let result = f(&mut self.foliage);
        self.revision += 1;
        result
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// First foliage whose asset maps to `prototype`.
    pub fn foliage_for(&self, prototype: &DetailPrototype) -> Option<&Foliage> {
        self.foliage.iter().find(|f| f.asset.prototype() == *prototype)
    }

    /// Distinct prototypes in first-seen order.
    pub fn prototypes(&self) -> Vec<DetailPrototype> {
        let mut out: Vec<DetailPrototype> = Vec::with_capacity(self.foliage.len());
        for f in &self.foliage {
            let proto = f.asset.prototype();
            if !out.contains(&proto) {
                out.push(proto);
            }
        }
        out
    }
}

use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Directory interning pool: each unique directory gets a u32 ID and remembers its parent's ID,
/// so rolling a size up to every ancestor is a walk over IDs instead of repeated path hashing.
pub struct PathPool {
    paths: Vec<PathBuf>,
    parents: Vec<Option<u32>>,
    index: HashMap<PathBuf, u32>,
}

impl PathPool {
    pub fn new() -> Self {
        Self {
            paths: Vec::new(),
            parents: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Look up the ID of an already interned path.
    pub fn id(&self, path: &Path) -> Option<u32> {
        self.index.get(path).copied()
    }

    /// Intern a directory under `parent` and return its ID.
    /// An already known path keeps its original ID and parent.
    pub fn intern(&mut self, path: &Path, parent: Option<u32>) -> u32 {
        if let Some(id) = self.id(path) {
            return id;
        }

        let id = self.paths.len() as u32;
        let path_buf = path.to_path_buf();
        self.paths.push(path_buf.clone());
        self.parents.push(parent);
        self.index.insert(path_buf, id);
        id
    }

    pub fn parent(&self, id: u32) -> Option<u32> {
        self.parents.get(id as usize).copied().flatten()
    }

    /// The ID itself followed by every ancestor ID up to the top of the pool.
    pub fn ancestors(&self, id: u32) -> Ancestors<'_> {
        Ancestors {
            pool: self,
            next: Some(id),
        }
    }

    /// All interned paths with their IDs, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &Path)> {
        self.paths
            .iter()
            .enumerate()
            .map(|(id, path)| (id as u32, path.as_path()))
    }

    /// Get the number of unique paths stored.
    pub fn len(&self) -> usize {
        self.paths.len()
    }
}

pub struct Ancestors<'a> {
    pool: &'a PathPool,
    next: Option<u32>,
}

impl Iterator for Ancestors<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.next?;
        self.next = self.pool.parent(current);
        Some(current)
    }
}

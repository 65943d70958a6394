use std::path::{Path, PathBuf};

/// Ordered, owned list of track paths. Insertion order is play order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaylistStore {
    paths: Vec<PathBuf>,
}

impl PlaylistStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Releases the previous playlist, then installs copies of `paths`.
    pub fn replace<P: AsRef<Path>>(&mut self, paths: &[P]) {
        self.paths.clear();
        self.paths
            .extend(paths.iter().map(|p| p.as_ref().to_path_buf()));
    }

    pub fn clear(&mut self) {
        self.paths = Vec::new();
    }

    pub fn get(&self, index: usize) -> Option<&Path> {
        self.paths.get(index).map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

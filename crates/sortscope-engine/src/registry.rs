//! Name → algorithm registry.

use crate::algorithms::{self, AlgorithmInfo, SortAlgorithm};

/// Ordered set of available algorithms.
///
/// The session only talks to algorithms through this registry, so new
/// algorithms can be added with [`AlgorithmRegistry::register`].
pub struct AlgorithmRegistry {
    algorithms: Vec<Box<dyn SortAlgorithm>>,
}

impl AlgorithmRegistry {
    /// An empty registry.
    pub fn empty() -> Self {
        Self {
            algorithms: Vec::new(),
        }
    }

    /// Add an algorithm. An existing entry with the same name is replaced.
    pub fn register(&mut self, algorithm: Box<dyn SortAlgorithm>) {
        let name = algorithm.info().name;
        match self.algorithms.iter().position(|a| a.info().name == name) {
            Some(idx) => self.algorithms[idx] = algorithm,
            None => self.algorithms.push(algorithm),
        }
    }

    /// Look up by display name or short key, ignoring case.
    pub fn get(&self, name: &str) -> Option<&dyn SortAlgorithm> {
        let name = name.trim();
        self.algorithms
            .iter()
            .find(|a| {
                let info = a.info();
                info.name.eq_ignore_ascii_case(name) || info.key.eq_ignore_ascii_case(name)
            })
            .map(|a| &**a)
    }

    /// Metadata for every registered algorithm, in registration order.
    pub fn infos(&self) -> Vec<AlgorithmInfo> {
        self.algorithms.iter().map(|a| a.info()).collect()
    }

    pub fn len(&self) -> usize {
        self.algorithms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.algorithms.is_empty()
    }
}

impl Default for AlgorithmRegistry {
    /// Registry holding the bundled bubble, insertion, selection and heap sorts.
    fn default() -> Self {
        Self {
            algorithms: algorithms::builtin(),
        }
    }
}

impl std::fmt::Debug for AlgorithmRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.algorithms.iter().map(|a| a.info().name))
            .finish()
    }
}

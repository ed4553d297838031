//! Transitive exclusion computation.
//!
//! Dependencies in the "provided" scope are supplied by the host platform at
//! runtime, so neither they nor anything they pull in may end up in a bundled
//! artifact. Given the resolved provided dependencies, this module collects
//! every module coordinate reachable from them.
//!
//! The resolved tree comes from an external resolver and may repeat nodes
//! (diamonds) or, in pathological setups, contain cycles. The walk keeps a
//! visited set keyed by coordinate and never expands a coordinate twice.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Coordinates of a resolved module.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coordinate {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl Coordinate {
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}

/// A node of a resolved dependency tree.
pub trait DependencyNode: Sized {
    fn coordinate(&self) -> Coordinate;
    fn children(&self) -> Vec<Self>;
}

/// Deduplicated set of coordinates to exclude from a bundled artifact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    coordinates: HashSet<Coordinate>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a coordinate. Returns `false` if it was already present.
    pub fn insert(&mut self, coordinate: Coordinate) -> bool {
        self.coordinates.insert(coordinate)
    }

    pub fn contains(&self, coordinate: &Coordinate) -> bool {
        self.coordinates.contains(coordinate)
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Iterate in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Coordinate> {
        self.coordinates.iter()
    }

    /// The coordinates sorted by group, name, then version.
    pub fn to_sorted_vec(&self) -> Vec<Coordinate> {
        let mut sorted: Vec<Coordinate> = self.coordinates.iter().cloned().collect();
        sorted.sort();
        sorted
    }
}

/// Collect every coordinate reachable from `roots`, roots included.
pub fn compute_exclusions<N, I>(roots: I) -> ExclusionSet
where
    N: DependencyNode,
    I: IntoIterator<Item = N>,
{
    let mut excluded = ExclusionSet::new();
    let mut stack: Vec<N> = roots.into_iter().collect();
    stack.reverse();

    while let Some(node) = stack.pop() {
        let coordinate = node.coordinate();
        if excluded.contains(&coordinate) {
            tracing::debug!("{} already excluded; not expanding again", coordinate);
            continue;
        }
        excluded.insert(coordinate);

        let mut children = node.children();
        children.reverse();
        stack.extend(children);
    }

    excluded
}

/// A resolved module inside a [`ResolvedGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedModule {
    #[serde(flatten)]
    pub coordinate: Coordinate,
    /// Indices of child modules in the graph.
    #[serde(default)]
    pub children: Vec<usize>,
}

/// Arena representation of a resolved dependency graph.
///
/// Modules refer to their children by index, so repeated nodes and cycles
/// are representable. This is the JSON shape handed over by the build glue:
///
/// ```json
/// {
///   "modules": [
///     { "group": "org.slf4j", "name": "slf4j-api", "version": "1.7.36", "children": [] }
///   ],
///   "roots": [0]
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedGraph {
    #[serde(default)]
    pub modules: Vec<ResolvedModule>,
    /// Indices of the provided (first-level) dependencies.
    #[serde(default)]
    pub roots: Vec<usize>,
}

impl ResolvedGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module and return its index.
    pub fn add_module(&mut self, coordinate: Coordinate) -> usize {
        self.modules.push(ResolvedModule {
            coordinate,
            children: Vec::new(),
        });
        self.modules.len() - 1
    }

    /// Declare `child` a dependency of `parent`. Unknown parents are ignored.
    pub fn add_child(&mut self, parent: usize, child: usize) {
        if let Some(module) = self.modules.get_mut(parent) {
            module.children.push(child);
        }
    }

    /// Mark `id` as a provided dependency.
    pub fn add_root(&mut self, id: usize) {
        self.roots.push(id);
    }

    pub fn node(&self, id: usize) -> Option<ModuleRef<'_>> {
        if id < self.modules.len() {
            Some(ModuleRef { graph: self, id })
        } else {
            tracing::warn!("Resolved graph refers to unknown module #{}; skipping", id);
            None
        }
    }

    pub fn root_nodes(&self) -> Vec<ModuleRef<'_>> {
        self.roots.iter().filter_map(|&id| self.node(id)).collect()
    }

    /// Every coordinate reachable from the roots.
    pub fn exclusions(&self) -> ExclusionSet {
        compute_exclusions(self.root_nodes())
    }
}

/// Borrowed handle to a module of a [`ResolvedGraph`].
#[derive(Debug, Clone, Copy)]
pub struct ModuleRef<'a> {
    graph: &'a ResolvedGraph,
    id: usize,
}

impl<'a> ModuleRef<'a> {
    pub fn module(&self) -> &'a ResolvedModule {
        &self.graph.modules[self.id]
    }
}

impl DependencyNode for ModuleRef<'_> {
    fn coordinate(&self) -> Coordinate {
        self.module().coordinate.clone()
    }

    fn children(&self) -> Vec<Self> {
        self.module()
            .children
            .iter()
            .filter_map(|&id| self.graph.node(id))
            .collect()
    }
}

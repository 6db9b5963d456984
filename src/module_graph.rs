//! Module dependency graph: topological ordering and cycle detection (spec
//! §4.5).
//!
//! Grounded in `src/syntax/module_graph/module_order.rs`'s `topo_order`: the
//! same White/Gray/Black depth-first coloring, generalized from that file's
//! `ModuleId`/`ModuleNode` (a file-path-keyed, import-resolution-specific
//! graph) down to an abstract handle type `H`, since this crate's module
//! graph only needs to order already-resolved modules, not discover them
//! from disk.

use std::collections::HashMap;
use std::hash::Hash;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Color {
    White,
    Gray,
    Black,
}

/// A dependency edge revisited while still in-progress: `from` depends
/// (transitively) on `to`, and `to` depends back on `from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle<H> {
    pub from: H,
    pub to: H,
}

/// A directed graph over module handles. `add_node`/`add_edge` are
/// idempotent; edges create their endpoints on demand.
#[derive(Debug, Default)]
pub struct ModuleGraph<H: Eq + Hash + Clone> {
    nodes: Vec<H>,
    edges: HashMap<H, Vec<H>>,
}

impl<H: Eq + Hash + Clone> ModuleGraph<H> {
    pub fn new() -> Self {
        ModuleGraph {
            nodes: Vec::new(),
            edges: HashMap::new(),
        }
    }

    /// Registers `node` if it is not already present. No-op otherwise.
    pub fn add_node(&mut self, node: H) {
        if !self.edges.contains_key(&node) {
            self.edges.insert(node.clone(), Vec::new());
            self.nodes.push(node);
        }
    }

    /// Registers a dependency edge `from -> to` (`from` depends on `to`).
    /// Both endpoints are created if missing; adding the same edge twice has
    /// no additional effect.
    pub fn add_edge(&mut self, from: H, to: H) {
        self.add_node(from.clone());
        self.add_node(to.clone());
        let targets = self.edges.get_mut(&from).expect("add_node just inserted this key");
        if !targets.contains(&to) {
            targets.push(to);
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Runs depth-first resolution over every registered node, producing an
    /// order in which every dependency appears before its dependent. Returns
    /// the first cycle encountered, described by the back-edge that closed
    /// it, if the graph is not a DAG.
    pub fn ordered_elements(&self) -> Result<Vec<H>, Cycle<H>> {
        let mut colors: HashMap<H, Color> = HashMap::new();
        let mut order: Vec<H> = Vec::new();

        for start in &self.nodes {
            if colors.get(start).copied().unwrap_or(Color::White) == Color::White {
                self.visit(start, &mut colors, &mut order)?;
            }
        }

        Ok(order)
    }

    fn visit(&self, node: &H, colors: &mut HashMap<H, Color>, order: &mut Vec<H>) -> Result<(), Cycle<H>> {
        colors.insert(node.clone(), Color::Gray);

        if let Some(deps) = self.edges.get(node) {
            for dep in deps {
                match colors.get(dep).copied().unwrap_or(Color::White) {
                    Color::White => self.visit(dep, colors, order)?,
                    Color::Gray => {
                        return Err(Cycle {
                            from: node.clone(),
                            to: dep.clone(),
                        });
                    }
                    Color::Black => {}
                }
            }
        }

        colors.insert(node.clone(), Color::Black);
        order.push(node.clone());
        Ok(())
    }
}

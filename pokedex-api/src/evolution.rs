//! Evolution chain resolution.
//!
//! The API nests a chain as a tree of `ChainLink`s. It is first copied into
//! an owned arena ([`EvolutionTree`]) and then walked to produce flat
//! parent -> child edges.
//!
//! The walk emits an edge for every child of the current node but only
//! descends into the *first* child. Linear chains (the large majority) come
//! out complete. For branching chains, grandchildren reachable only through
//! a later sibling are never visited, so those edges are missing from the
//! Evolutions sheet.

use std::collections::VecDeque;

use pokedex_core::format::format_id;
use pokedex_core::{EvolutionLevel, EvolutionRecord};

use crate::client::{Fetch, fetch_typed};
use crate::error::ApiError;
use crate::types::{ChainLink, EvolutionChainPayload, SpeciesPayload};

/// One species in an evolution chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvolutionNode {
    pub species: String,
    pub species_id: u32,
    /// `min_level` of the first evolution detail leading into this species
    pub min_level: Option<u32>,
    /// Arena indices of the species this one evolves into, in API order
    pub children: Vec<usize>,
}

/// Owned arena copy of an evolution chain. Index 0 is the chain root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EvolutionTree {
    nodes: Vec<EvolutionNode>,
}

impl EvolutionTree {
    /// Copy a nested chain into the arena, breadth-first so that siblings
    /// keep their API order.
    pub fn from_chain(root: &ChainLink) -> Result<Self, ApiError> {
        let mut nodes: Vec<EvolutionNode> = Vec::new();
        let mut queue: VecDeque<(&ChainLink, Option<usize>)> = VecDeque::new();
        queue.push_back((root, None));

        while let Some((link, parent)) = queue.pop_front() {
            let index = nodes.len();
            nodes.push(EvolutionNode {
                species: link.species.name.clone(),
                species_id: link.species.id()?,
                min_level: link.evolution_details.first().and_then(|d| d.min_level),
                children: Vec::with_capacity(link.evolves_to.len()),
            });
            if let Some(parent) = parent {
                nodes[parent].children.push(index);
            }
            for child in &link.evolves_to {
                queue.push_back((child, Some(index)));
            }
        }

        Ok(Self { nodes })
    }

    pub fn root(&self) -> Option<&EvolutionNode> {
        self.nodes.first()
    }

    pub fn node(&self, index: usize) -> Option<&EvolutionNode> {
        self.nodes.get(index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walk the chain from the root, following only the first child.
    ///
    /// At each node with children, one edge is emitted per child; the walk
    /// then continues at `children[0]` and stops at the first leaf.
    pub fn edges(&self) -> Vec<EvolutionRecord> {
        let mut edges = Vec::new();
        let mut current = match self.root() {
            Some(root) => root,
            None => return edges,
        };

        while let Some(&first) = current.children.first() {
            for &child_index in &current.children {
                let child = &self.nodes[child_index];
                edges.push(EvolutionRecord {
                    parent: current.species.clone(),
                    parent_id: format_id(current.species_id),
                    child: child.species.clone(),
                    child_id: format_id(child.species_id),
                    level: EvolutionLevel::from(child.min_level),
                });
            }
            current = &self.nodes[first];
        }

        edges
    }
}

/// Resolve the evolution edges for a species: fetch the species payload to
/// find its chain, fetch the chain, and walk it.
pub async fn resolve_species<F: Fetch>(
    fetcher: &F,
    species_url: &str,
) -> Result<Vec<EvolutionRecord>, ApiError> {
    let species: SpeciesPayload = fetch_typed(fetcher, species_url).await?;
    resolve_from_species(fetcher, &species).await
}

/// Resolve the evolution edges from an already fetched species payload.
/// Species without a chain reference have no edges.
pub async fn resolve_from_species<F: Fetch>(
    fetcher: &F,
    species: &SpeciesPayload,
) -> Result<Vec<EvolutionRecord>, ApiError> {
    let Some(chain_ref) = &species.evolution_chain else {
        return Ok(Vec::new());
    };
    let chain: EvolutionChainPayload = fetch_typed(fetcher, &chain_ref.url).await?;
    let tree = EvolutionTree::from_chain(&chain.chain)?;
    Ok(tree.edges())
}

#[cfg(test)]
#[path = "tests/evolution_tests.rs"]
mod tests;

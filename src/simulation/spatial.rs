//! Spatial indexing for efficient neighbor queries.
//!
//! Rebuilt once per sub-step: one KD-tree over mobile cells, one over debris.
//! Mobile cells are flattened into lightweight views so AI perception reads
//! positions without borrowing the live collections.

use kdtree::KdTree;
use kdtree::distance::squared_euclidean;

use super::agent::Agent;
use super::food::Food;
use super::player::PlayerCell;
use super::vec2::Vec2;

/// Type alias for 2D spatial KD-tree used for efficient neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// Result of a spatial radius query: (`distance_squared`, index) pairs.
pub type SpatialQueryResult = Vec<(f32, usize)>;

/// Lightweight copy of a mobile cell used for perception queries.
///
/// The player is represented by its largest cell only; AI perception treats
/// that cell as "the player".
#[derive(Debug, Clone, Copy)]
pub struct CellView {
    /// Center position.
    pub pos: Vec2,
    /// Mass-derived radius.
    pub radius: f32,
    /// True when this view is the player's representative cell.
    pub is_player: bool,
    /// Index into the owning collection (players or agents).
    pub index: usize,
}

/// Spatial index over the current world state.
pub struct SpatialIndex {
    cells: Tree2D,
    food: Tree2D,
    views: Vec<CellView>,
}

impl SpatialIndex {
    /// Builds the index from the current collections.
    pub fn build(players: &[PlayerCell], agents: &[Agent], food: &[Food]) -> Self {
        let mut views = Vec::with_capacity(agents.len() + 1);

        let largest = players
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.body.mass().total_cmp(&b.1.body.mass()));
        if let Some((i, cell)) = largest {
            views.push(CellView {
                pos: cell.body.pos,
                radius: cell.body.radius(),
                is_player: true,
                index: i,
            });
        }
        for (i, agent) in agents.iter().enumerate() {
            views.push(CellView {
                pos: agent.body.pos,
                radius: agent.body.radius(),
                is_player: false,
                index: i,
            });
        }

        let cells = build_tree(&views, |v| vec![v.pos.x, v.pos.y]);
        let food_tree = build_tree(food, |f| vec![f.pos.x, f.pos.y]);

        Self {
            cells,
            food: food_tree,
            views,
        }
    }

    /// Views backing the cell tree, indexed by the cell query results.
    pub fn views(&self) -> &[CellView] {
        &self.views
    }

    /// Query mobile cells within a radius of `pos`.
    pub fn query_cells(&self, pos: Vec2, radius: f32) -> SpatialQueryResult {
        self.cells
            .within(&[pos.x, pos.y], radius * radius, &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist, &idx)| (dist, idx))
            .collect()
    }

    /// Query debris within a radius of `pos`.
    pub fn query_food(&self, pos: Vec2, radius: f32) -> SpatialQueryResult {
        self.food
            .within(&[pos.x, pos.y], radius * radius, &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist, &idx)| (dist, idx))
            .collect()
    }
}

/// Helper function to build a KD-tree from a collection of items.
fn build_tree<T>(items: &[T], get_pos: impl Fn(&T) -> Vec<f32>) -> Tree2D {
    let mut tree = KdTree::with_capacity(2, items.len().max(1));
    for (i, item) in items.iter().enumerate() {
        // Positions are finite by stepper invariant; a rejected point only
        // drops itself from queries.
        let _ = tree.add(get_pos(item), i);
    }
    tree
}

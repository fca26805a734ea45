use itertools::iproduct;
use smallvec::SmallVec;

use crate::movement::{Configuration, Direction, Move, Path};
use crate::puzzle::Puzzle;

/// Position of a node in the solver's arena.
pub type NodeId = usize;

/// How a node was reached: the parent node and the move taken from it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Link {
    pub parent: NodeId,
    pub mv: Move,
}

/// A vertex of the search graph.
///
/// The paths known to reach a node are all walks back through its links to
/// the root, which keeps tied paths shared instead of copied.
#[derive(Clone, Debug)]
pub struct SearchNode<'p> {
    puzzle: &'p Puzzle,
    config: Configuration,
    depth: u32,
    links: SmallVec<[Link; 1]>,
}

impl<'p> SearchNode<'p> {
    pub fn root(puzzle: &'p Puzzle) -> SearchNode<'p> {
        SearchNode::new(puzzle, puzzle.initial_configuration(), 0)
    }

    pub fn new(puzzle: &'p Puzzle, config: Configuration, depth: u32) -> SearchNode<'p> {
        SearchNode {
            puzzle,
            config,
            depth,
            links: SmallVec::new(),
        }
    }

    /// The node one move further on, reached from node `parent`.
    pub fn child(&self, parent: NodeId, mv: Move, config: Configuration) -> SearchNode<'p> {
        let mut links = SmallVec::new();
        links.push(Link { parent, mv });
        SearchNode {
            puzzle: self.puzzle,
            config,
            depth: self.depth + 1,
            links,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Number of moves from the initial configuration.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn wins(&self) -> bool {
        self.puzzle.goal().is_met(&self.config)
    }

    /// Every configuration one slide away, labelled with its move. Moves that
    /// leave the robot in place are dropped.
    pub fn neighbors(&self) -> SmallVec<[(Move, Configuration); 16]> {
        let board = self.puzzle.board();
        iproduct!(0..self.puzzle.robot_count(), Direction::ALL)
            .filter_map(|(robot, direction)| {
                let name = self.puzzle.robot_name(robot)?;
                let next = self.config.apply(board, robot, direction)?;
                Some((Move::new(name, direction), next))
            })
            .collect()
    }

    /// Adds the paths of `other`, a node for the same configuration at the
    /// same depth.
    pub fn merge_paths(&mut self, other: &SearchNode<'p>) {
        debug_assert_eq!(self.config, other.config);
        debug_assert_eq!(self.depth, other.depth);
        for link in &other.links {
            if !self.links.contains(link) {
                self.links.push(*link);
            }
        }
    }
}

/// One shortest path to `id`, following the first link of every node.
pub fn first_path(arena: &[SearchNode<'_>], id: NodeId) -> Path {
    let mut path = Path::new();
    let mut current = id;
    while let Some(link) = arena[current].links.first() {
        path.push(link.mv);
        current = link.parent;
    }
    path.reverse();
    path
}

/// Every path to `id` recorded in the arena.
pub fn all_paths(arena: &[SearchNode<'_>], id: NodeId) -> Vec<Path> {
    let node = &arena[id];
    if node.links.is_empty() {
        return vec![Path::new()];
    }

    node.links
        .iter()
        .flat_map(|link| {
            all_paths(arena, link.parent).into_iter().map(move |mut path| {
                path.push(link.mv);
                path
            })
        })
        .collect()
}

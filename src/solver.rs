//! Breadth-first search over robot configurations.
//!
//! Every search walks the configuration graph one layer (move count) at a
//! time, so the first winning node dequeued is a shortest solution. Nodes live
//! in an arena indexed by [`NodeId`]; the visited index maps each
//! configuration to the node that first reached it.

use std::collections::VecDeque;

use log::{debug, info, trace};
use pathfinding::matrix::Matrix;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Cell;
use crate::error::ReplayError;
use crate::movement::{Configuration, Move, Path};
use crate::puzzle::Puzzle;
use crate::state::{all_paths, first_path, NodeId, SearchNode};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// One or more shortest solutions, all of the same length.
    Solved(Vec<Path>),
    /// Every reachable configuration was visited without reaching the goal.
    /// A budgeted search reports this too when the reachable space ran out
    /// before the budget did.
    Unsolvable,
    /// No solution within `max_moves`; longer ones may exist.
    OutOfMoves { max_moves: u32 },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes whose neighbours were generated.
    pub expanded: usize,
    /// Neighbours generated, duplicates included.
    pub generated: usize,
    /// Depth of the last node dequeued.
    pub depth: u32,
    /// Nodes dequeued per run of equal depth. While the queue stays in layer
    /// order there is exactly one run per depth, so `layers[d]` counts the
    /// nodes dequeued at depth `d`.
    pub layers: Vec<usize>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Search {
    pub outcome: Outcome,
    pub stats: SearchStats,
}

impl Search {
    pub fn paths(&self) -> &[Path] {
        match &self.outcome {
            Outcome::Solved(paths) => paths,
            _ => &[],
        }
    }

    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, Outcome::Solved(_))
    }
}

/// Minimum number of moves for any robot to stand on each cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReachabilityMap {
    distances: Matrix<Option<u32>>,
}

impl ReachabilityMap {
    fn new(rows: usize, cols: usize) -> ReachabilityMap {
        ReachabilityMap {
            distances: Matrix::new(rows, cols, None),
        }
    }

    pub fn rows(&self) -> usize {
        self.distances.rows
    }

    pub fn cols(&self) -> usize {
        self.distances.columns
    }

    /// `None` when no robot reaches `cell`, or `cell` is off the board.
    pub fn get(&self, cell: Cell) -> Option<u32> {
        if !cell.is_valid() || cell.row > self.rows() || cell.col > self.cols() {
            return None;
        }
        self.distances[(cell.row - 1, cell.col - 1)]
    }

    fn lower(&mut self, cell: Cell, depth: u32) {
        let slot = &mut self.distances[(cell.row - 1, cell.col - 1)];
        if slot.map_or(true, |d| depth < d) {
            *slot = Some(depth);
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    First,
    AllTies,
}

#[derive(Clone, Copy, Debug)]
pub struct Solver<'p> {
    puzzle: &'p Puzzle,
    max_moves: Option<u32>,
}

impl<'p> Solver<'p> {
    pub fn new(puzzle: &'p Puzzle) -> Solver<'p> {
        Solver {
            puzzle,
            max_moves: None,
        }
    }

    /// Caps the length of the solutions considered. `None` searches the
    /// whole configuration space.
    pub fn max_moves(mut self, max_moves: Option<u32>) -> Solver<'p> {
        self.max_moves = max_moves;
        self
    }

    pub fn shortest_solution(&self) -> Search {
        self.search(Mode::First)
    }

    pub fn all_shortest_solutions(&self) -> Search {
        self.search(Mode::AllTies)
    }

    fn out_of_budget(&self, depth: u32) -> bool {
        self.max_moves.map_or(false, |max| depth >= max)
    }

    fn search(&self, mode: Mode) -> Search {
        let root = SearchNode::root(self.puzzle);
        let mut visited: FxHashMap<Configuration, NodeId> = FxHashMap::default();
        visited.insert(root.config().clone(), 0);
        let mut arena = vec![root];
        let mut queue = VecDeque::from([0]);

        let mut stats = SearchStats::default();
        let mut cutoff: Option<u32> = None;
        let mut winners: Vec<NodeId> = Vec::new();
        let mut pruned = false;

        while let Some(id) = queue.pop_front() {
            let depth = arena[id].depth();
            debug_assert!(depth >= stats.depth, "queue out of layer order");
            // every remaining node is deeper than the winning layer
            if cutoff.map_or(false, |c| depth > c) {
                break;
            }
            if stats.layers.is_empty() || depth != stats.depth {
                debug!(
                    "layer {}: {} queued, {} visited",
                    depth,
                    queue.len() + 1,
                    visited.len()
                );
                stats.depth = depth;
                stats.layers.push(0);
            }
            if let Some(dequeued) = stats.layers.last_mut() {
                *dequeued += 1;
            }

            if arena[id].wins() {
                winners.push(id);
                if mode == Mode::First {
                    break;
                }
                cutoff = Some(depth);
                continue;
            }
            // children would be longer than a known solution
            if cutoff.is_some() {
                continue;
            }
            if self.out_of_budget(depth) {
                pruned = true;
                continue;
            }

            stats.expanded += 1;
            for (mv, config) in arena[id].neighbors() {
                stats.generated += 1;
                match visited.get(&config).copied() {
                    None => {
                        let child = arena[id].child(id, mv, config.clone());
                        let child_id = arena.len();
                        arena.push(child);
                        visited.insert(config, child_id);
                        queue.push_back(child_id);
                    }
                    Some(existing)
                        if mode == Mode::AllTies && arena[existing].depth() == depth + 1 =>
                    {
                        let tie = arena[id].child(id, mv, config);
                        trace!("merging {} into node {}", mv, existing);
                        arena[existing].merge_paths(&tie);
                    }
                    Some(_) => {}
                }
            }
        }

        let outcome = if winners.is_empty() {
            match self.max_moves {
                Some(max_moves) if pruned => Outcome::OutOfMoves { max_moves },
                _ => Outcome::Unsolvable,
            }
        } else {
            let paths = match mode {
                Mode::First => vec![first_path(&arena, winners[0])],
                Mode::AllTies => winners
                    .iter()
                    .flat_map(|&id| all_paths(&arena, id))
                    .collect(),
            };
            Outcome::Solved(paths)
        };

        info!(
            "search finished at depth {}: {} expanded, {} generated, {} configurations, {} solution(s)",
            stats.depth,
            stats.expanded,
            stats.generated,
            visited.len(),
            match &outcome {
                Outcome::Solved(paths) => paths.len(),
                _ => 0,
            }
        );

        Search { outcome, stats }
    }

    /// The fewest moves after which some robot stands on each cell.
    pub fn reachability(&self) -> ReachabilityMap {
        let puzzle = self.puzzle;
        let mut map = ReachabilityMap::new(puzzle.rows(), puzzle.cols());
        let root = SearchNode::root(puzzle);
        for &cell in root.config().positions() {
            map.lower(cell, 0);
        }

        let mut visited: FxHashSet<Configuration> = FxHashSet::default();
        visited.insert(root.config().clone());
        let mut queue = VecDeque::from([root]);

        while let Some(node) = queue.pop_front() {
            if self.out_of_budget(node.depth()) {
                continue;
            }
            let depth = node.depth() + 1;
            for (_, config) in node.neighbors() {
                if !visited.insert(config.clone()) {
                    continue;
                }
                for &cell in config.positions() {
                    map.lower(cell, depth);
                }
                queue.push_back(SearchNode::new(puzzle, config, depth));
            }
        }

        info!("reachability visited {} configurations", visited.len());
        map
    }
}

pub fn find_shortest_solution(puzzle: &Puzzle, max_moves: Option<u32>) -> Search {
    Solver::new(puzzle).max_moves(max_moves).shortest_solution()
}

pub fn find_all_shortest_solutions(puzzle: &Puzzle, max_moves: Option<u32>) -> Search {
    Solver::new(puzzle).max_moves(max_moves).all_shortest_solutions()
}

pub fn compute_reachability(puzzle: &Puzzle, max_moves: Option<u32>) -> ReachabilityMap {
    Solver::new(puzzle).max_moves(max_moves).reachability()
}

/// Applies `path` to the puzzle's initial configuration, returning the
/// configuration after each move.
pub fn replay(puzzle: &Puzzle, path: &[Move]) -> Result<Vec<Configuration>, ReplayError> {
    let mut current = puzzle.initial_configuration();
    let mut steps = Vec::with_capacity(path.len());
    for (step, &mv) in path.iter().enumerate() {
        let robot = puzzle
            .robot_index(mv.robot)
            .ok_or(ReplayError::UnknownRobot { step, name: mv.robot })?;
        current = current
            .apply(puzzle.board(), robot, mv.direction)
            .ok_or(ReplayError::Blocked { step, mv })?;
        steps.push(current.clone());
    }
    Ok(steps)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::board::Edge;
    use crate::movement::Direction;
    use crate::puzzle::{GoalSelector, PuzzleBuilder};

    use Direction::*;

    fn open_board(robots: &[(char, usize, usize)], goal: GoalSelector, at: (usize, usize)) -> Puzzle {
        let mut b = PuzzleBuilder::new(5, 5).unwrap();
        for &(name, row, col) in robots {
            b.place_robot(Cell::new(row, col), name).unwrap();
        }
        b.set_goal(goal, Cell::new(at.0, at.1)).unwrap();
        b.build().unwrap()
    }

    #[test]
    fn corner_to_corner_takes_two_moves() {
        let puzzle = open_board(&[('A', 1, 1)], GoalSelector::Any, (5, 5));

        let search = find_shortest_solution(&puzzle, None);
        assert_eq!(search.paths().len(), 1);
        assert_eq!(search.paths()[0].len(), 2);
        assert_eq!(search.stats.depth, 2);
        assert_eq!(search.stats.layers.len(), 3);
        assert_eq!(search.stats.layers[..2], [1, 2]);

        let all = find_all_shortest_solutions(&puzzle, None);
        let mut paths = all.paths().to_vec();
        paths.sort_by_key(|p| p.iter().map(|m| m.direction).collect::<Vec<_>>());
        assert_eq!(
            paths,
            vec![
                vec![Move::new('A', East), Move::new('A', South)],
                vec![Move::new('A', South), Move::new('A', East)],
            ]
        );
    }

    #[test]
    fn blocker_changes_the_route() {
        let puzzle = open_board(
            &[('A', 1, 1), ('B', 1, 5)],
            GoalSelector::Named('A'),
            (5, 5),
        );

        let root = SearchNode::root(&puzzle);
        let east = root
            .neighbors()
            .into_iter()
            .find(|(mv, _)| *mv == Move::new('A', East))
            .map(|(_, config)| config[0]);
        assert_eq!(east, Some(Cell::new(1, 4)));

        let search = find_shortest_solution(&puzzle, None);
        let path = &search.paths()[0];
        let steps = replay(&puzzle, path).unwrap();
        assert!(puzzle.goal().is_met(steps.last().unwrap()));
        assert!(steps[..steps.len() - 1]
            .iter()
            .all(|c| !puzzle.goal().is_met(c)));
    }

    #[test]
    fn budget_limits_the_search() {
        let puzzle = open_board(&[('A', 1, 1)], GoalSelector::Any, (5, 5));

        assert_eq!(
            find_shortest_solution(&puzzle, Some(1)).outcome,
            Outcome::OutOfMoves { max_moves: 1 }
        );
        assert_eq!(
            find_all_shortest_solutions(&puzzle, Some(1)).outcome,
            Outcome::OutOfMoves { max_moves: 1 }
        );
        assert!(find_shortest_solution(&puzzle, Some(2)).is_solved());
        assert_eq!(find_all_shortest_solutions(&puzzle, Some(2)).paths().len(), 2);
    }

    #[test]
    fn walled_off_goal_is_unsolvable() {
        let mut b = PuzzleBuilder::new(3, 3).unwrap();
        b.place_robot(Cell::new(1, 1), 'A').unwrap();
        // a closed box around the centre cell
        b.add_horizontal_wall(Edge::after(1), 2).unwrap();
        b.add_horizontal_wall(Edge::after(2), 2).unwrap();
        b.add_vertical_wall(2, Edge::after(1)).unwrap();
        b.add_vertical_wall(2, Edge::after(2)).unwrap();
        b.set_goal(GoalSelector::Any, Cell::new(2, 2)).unwrap();
        let puzzle = b.build().unwrap();

        assert_eq!(find_shortest_solution(&puzzle, None).outcome, Outcome::Unsolvable);
        assert_eq!(
            find_all_shortest_solutions(&puzzle, None).outcome,
            Outcome::Unsolvable
        );
        // the reachable space is tiny, so a generous budget is never hit
        assert_eq!(
            find_shortest_solution(&puzzle, Some(50)).outcome,
            Outcome::Unsolvable
        );
    }

    #[test]
    fn reachability_from_the_centre() {
        let mut b = PuzzleBuilder::new(3, 3).unwrap();
        b.place_robot(Cell::new(2, 2), 'A').unwrap();
        b.set_goal(GoalSelector::Any, Cell::new(1, 1)).unwrap();
        let puzzle = b.build().unwrap();

        let map = compute_reachability(&puzzle, None);
        assert_eq!(map.get(Cell::new(2, 2)), Some(0));
        for cell in [(1, 2), (2, 1), (2, 3), (3, 2)] {
            assert_eq!(map.get(Cell::new(cell.0, cell.1)), Some(1));
        }
        for cell in [(1, 1), (1, 3), (3, 1), (3, 3)] {
            assert_eq!(map.get(Cell::new(cell.0, cell.1)), Some(2));
        }

        let shallow = compute_reachability(&puzzle, Some(1));
        assert_eq!(shallow.get(Cell::new(1, 2)), Some(1));
        assert_eq!(shallow.get(Cell::new(1, 1)), None);
        assert_eq!(shallow.get(Cell::INVALID), None);
    }

    #[test]
    fn layers_are_dequeued_in_order() {
        let puzzle = open_board(
            &[('A', 1, 1), ('B', 3, 3), ('C', 5, 2)],
            GoalSelector::Named('A'),
            (4, 4),
        );
        for search in [
            find_shortest_solution(&puzzle, None),
            find_all_shortest_solutions(&puzzle, None),
            find_shortest_solution(&puzzle, Some(2)),
        ] {
            let stats = &search.stats;
            // one run per depth means depth never went backwards
            assert_eq!(stats.layers.len(), stats.depth as usize + 1, "{stats:?}");
            assert_eq!(stats.layers[0], 1);
            assert!(stats.layers.iter().all(|&n| n > 0));
            assert!(stats.layers.iter().sum::<usize>() <= stats.generated + 1);
        }
    }

    #[test]
    fn replay_rejects_impossible_moves() {
        let puzzle = open_board(&[('A', 1, 1)], GoalSelector::Any, (5, 5));
        assert_eq!(
            replay(&puzzle, &[Move::new('A', North)]),
            Err(ReplayError::Blocked { step: 0, mv: Move::new('A', North) })
        );
        assert_eq!(
            replay(&puzzle, &[Move::new('A', East), Move::new('Q', West)]),
            Err(ReplayError::UnknownRobot { step: 1, name: 'Q' })
        );
    }
}

//! Search strategies over [`Puzzle`] states.
//!
//! All three solvers take a start state and a goal of the same size and return
//! the goal as reached by the search, with its parent chain leading back to
//! `start`, or `None` when no solution was found within their bound. Every
//! depth-first traversal uses an explicit stack, so the host call stack does
//! not limit how deep a search can go.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};
use std::rc::Rc;

use clap::ValueEnum;
use tracing::{debug, info, trace};

use crate::puzzle::Puzzle;

/// Counters collected while a search runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// States whose children were generated.
    pub expanded: usize,
    /// Children generated across all expansions.
    pub generated: usize,
    /// IDDFS depth limits tried, IDA* probes run, or 1 for A*.
    pub iterations: usize,
    /// IDA* cutoffs in the order they were used.
    pub cutoffs: Vec<u32>,
}

impl SearchStats {
    fn expand(&mut self, children: &[Rc<Puzzle>]) {
        self.expanded += 1;
        self.generated += children.len();
    }
}

/// Tunables for the bounded solvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Deepest limit IDDFS tries before giving up.
    pub max_depth: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_depth: 15 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum Algorithm {
    /// Iterative-deepening depth-first search, bounded by `max_depth`
    Iddfs,
    /// Best-first search ordered by score
    AStar,
    /// Iterative-deepening A*
    IdaStar,
}

impl Algorithm {
    /// The order in which the solvers are run when none is selected.
    pub const ALL: [Algorithm; 3] = [Algorithm::Iddfs, Algorithm::AStar, Algorithm::IdaStar];

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::Iddfs => "Iterative depth first search",
            Algorithm::AStar => "A*",
            Algorithm::IdaStar => "Iterative deepening A*",
        }
    }

    pub fn run(
        &self,
        start: &Rc<Puzzle>,
        goal: &Puzzle,
        config: &SearchConfig,
    ) -> (Option<Rc<Puzzle>>, SearchStats) {
        match self {
            Algorithm::Iddfs => iddfs_with_stats(start, goal, config.max_depth),
            Algorithm::AStar => a_star_with_stats(start, goal),
            Algorithm::IdaStar => ida_star_with_stats(start, goal),
        }
    }
}

fn check_sizes(start: &Puzzle, goal: &Puzzle) {
    assert_eq!(
        start.size(),
        goal.size(),
        "start and goal boards must have the same size"
    );
}

/// Iterative-deepening DFS: depth-limited searches with limits `0..=max_depth`,
/// each with a fresh visited set. The first limit that reaches `goal` wins.
pub fn iddfs(start: &Rc<Puzzle>, goal: &Puzzle, max_depth: u32) -> Option<Rc<Puzzle>> {
    iddfs_with_stats(start, goal, max_depth).0
}

pub fn iddfs_with_stats(
    start: &Rc<Puzzle>,
    goal: &Puzzle,
    max_depth: u32,
) -> (Option<Rc<Puzzle>>, SearchStats) {
    check_sizes(start, goal);
    let mut stats = SearchStats::default();

    for limit in 0..=max_depth {
        stats.iterations += 1;
        let mut visited = HashSet::new();
        let found = depth_limited(start, goal, limit, &mut visited, &mut stats);
        debug!(limit, visited = visited.len(), expanded = stats.expanded, "iddfs iteration");
        if let Some(solution) = found {
            info!(depth = solution.depth(), expanded = stats.expanded, "iddfs found a solution");
            return (Some(solution), stats);
        }
    }

    info!(max_depth, expanded = stats.expanded, "iddfs exhausted its depth budget");
    (None, stats)
}

struct Frame {
    children: Vec<Rc<Puzzle>>,
    next: usize,
}

impl Frame {
    fn new(node: &Rc<Puzzle>, stats: &mut SearchStats) -> Self {
        let children = node.available_moves();
        stats.expand(&children);
        Self { children, next: 0 }
    }

    fn next_child(&mut self) -> Option<Rc<Puzzle>> {
        let child = self.children.get(self.next).cloned();
        self.next += 1;
        child
    }
}

/// Depth-limited DFS. A vertex equal to `goal` is returned whatever the
/// remaining limit; otherwise a vertex with limit 0 is a dead end. Expanded
/// vertices go into `visited`, and children already in it are skipped at the
/// moment they would be entered.
fn depth_limited(
    start: &Rc<Puzzle>,
    goal: &Puzzle,
    limit: u32,
    visited: &mut HashSet<Rc<Puzzle>>,
    stats: &mut SearchStats,
) -> Option<Rc<Puzzle>> {
    if **start == *goal {
        return Some(Rc::clone(start));
    }
    if limit == 0 {
        return None;
    }
    visited.insert(Rc::clone(start));

    // Entry i holds the children of a vertex whose remaining limit is `limit - i`.
    let mut stack = vec![Frame::new(start, stats)];

    while let Some(frame) = stack.last_mut() {
        let Some(child) = frame.next_child() else {
            stack.pop();
            continue;
        };
        if visited.contains(&child) {
            continue;
        }
        if *child == *goal {
            return Some(child);
        }
        let remaining = limit - stack.len() as u32;
        if remaining == 0 {
            continue;
        }
        visited.insert(Rc::clone(&child));
        stack.push(Frame::new(&child, stats));
    }
    None
}

/// Min-heap entry: lowest score first, then earliest insertion.
struct Queued {
    score: u32,
    seq: u64,
    state: Rc<Puzzle>,
}

impl PartialEq for Queued {
    fn eq(&self, other: &Self) -> bool {
        self.score == other.score && self.seq == other.seq
    }
}

impl Eq for Queued {}

impl PartialOrd for Queued {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Queued {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A* ordered by `score`, ties broken first-in first-out.
///
/// The visited map keeps the best score each board was queued with; a child
/// is skipped when the map already holds a score no greater than its own.
/// Returns `None` only once every reachable board has been dequeued, which
/// requires an unsolvable start on a board small enough to enumerate.
pub fn a_star(start: &Rc<Puzzle>, goal: &Puzzle) -> Option<Rc<Puzzle>> {
    a_star_with_stats(start, goal).0
}

pub fn a_star_with_stats(start: &Rc<Puzzle>, goal: &Puzzle) -> (Option<Rc<Puzzle>>, SearchStats) {
    check_sizes(start, goal);
    let mut stats = SearchStats {
        iterations: 1,
        ..SearchStats::default()
    };

    let mut seq = 0u64;
    let mut queue = BinaryHeap::new();
    let mut visited: HashMap<Rc<Puzzle>, u32> = HashMap::new();

    queue.push(Queued {
        score: start.score(),
        seq,
        state: Rc::clone(start),
    });
    visited.insert(Rc::clone(start), start.score());

    while let Some(Queued { state: current, .. }) = queue.pop() {
        if *current == *goal {
            info!(
                depth = current.depth(),
                expanded = stats.expanded,
                queued = queue.len(),
                "a* found a solution"
            );
            return (Some(current), stats);
        }

        let children = current.available_moves();
        stats.expand(&children);
        if stats.expanded % 100_000 == 0 {
            trace!(expanded = stats.expanded, queued = queue.len(), visited = visited.len(), "a* progress");
        }

        for child in children {
            if visited.get(&child).is_some_and(|&best| best <= child.score()) {
                continue;
            }
            visited.insert(Rc::clone(&child), child.score());
            seq += 1;
            queue.push(Queued {
                score: child.score(),
                seq,
                state: child,
            });
        }
    }

    info!(expanded = stats.expanded, visited = visited.len(), "a* exhausted the reachable boards");
    (None, stats)
}

/// Outcome of one IDA* probe.
#[derive(Debug)]
pub enum Probe {
    Found(Rc<Puzzle>),
    /// Smallest score above the cutoff that was seen, `None` if nothing
    /// exceeded it.
    Exceeded(Option<u32>),
}

/// Iterative-deepening A*. The first cutoff is `start.score()`; each probe
/// that fails raises it to the smallest score that went past it.
///
/// Cycle avoidance only looks at the current path, so boards may be expanded
/// again by later branches. Unbounded for unsolvable boards unless a probe
/// exceeds nothing, which means the reachable space is exhausted and `None`
/// is returned.
pub fn ida_star(start: &Rc<Puzzle>, goal: &Puzzle) -> Option<Rc<Puzzle>> {
    ida_star_with_stats(start, goal).0
}

pub fn ida_star_with_stats(start: &Rc<Puzzle>, goal: &Puzzle) -> (Option<Rc<Puzzle>>, SearchStats) {
    check_sizes(start, goal);
    let mut stats = SearchStats::default();
    let mut cutoff = start.score();
    let mut path = vec![Rc::clone(start)];

    loop {
        stats.iterations += 1;
        stats.cutoffs.push(cutoff);
        debug!(cutoff, expanded = stats.expanded, "ida* probe");

        match probe(goal, &mut path, cutoff, &mut stats) {
            Probe::Found(solution) => {
                info!(
                    depth = solution.depth(),
                    cutoff,
                    expanded = stats.expanded,
                    "ida* found a solution"
                );
                return (Some(solution), stats);
            }
            Probe::Exceeded(Some(next)) => cutoff = next,
            Probe::Exceeded(None) => {
                info!(cutoff, expanded = stats.expanded, "ida* exhausted the reachable boards");
                return (None, stats);
            }
        }
    }
}

fn lowest(a: Option<u32>, b: Option<u32>) -> Option<u32> {
    match (a, b) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    }
}

struct ProbeFrame {
    frame: Frame,
    min: Option<u32>,
}

/// Bounded depth-first probe from the last state on `path`.
///
/// On return `path` holds exactly what it held on entry. Children already on
/// `path` are skipped; a child scoring above `cutoff` is not entered and its
/// score is folded into the parent's minimum.
pub fn probe(goal: &Puzzle, path: &mut Vec<Rc<Puzzle>>, cutoff: u32, stats: &mut SearchStats) -> Probe {
    let Some(root) = path.last().cloned() else {
        return Probe::Exceeded(None);
    };
    if root.score() > cutoff {
        return Probe::Exceeded(Some(root.score()));
    }
    if *root == *goal {
        return Probe::Found(root);
    }

    let base = path.len();
    let mut stack = vec![ProbeFrame {
        frame: Frame::new(&root, stats),
        min: None,
    }];

    while let Some(top) = stack.last_mut() {
        let Some(child) = top.frame.next_child() else {
            let done = stack.pop().and_then(|f| f.min);
            match stack.last_mut() {
                Some(parent) => {
                    path.pop();
                    parent.min = lowest(parent.min, done);
                    continue;
                }
                None => return Probe::Exceeded(done),
            }
        };

        if path.contains(&child) {
            continue;
        }
        if child.score() > cutoff {
            top.min = lowest(top.min, Some(child.score()));
            continue;
        }
        if *child == *goal {
            path.truncate(base);
            return Probe::Found(child);
        }
        stack.push(ProbeFrame {
            frame: Frame::new(&child, stats),
            min: None,
        });
        path.push(child);
    }
    Probe::Exceeded(None)
}

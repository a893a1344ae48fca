// src/graph/cycles.rs
//! Simple-cycle enumeration (Johnson).
//!
//! Every elementary cycle is reported exactly once, rooted at its smallest
//! node. For each root the search stays inside the root's strongly connected
//! component among nodes `>= root`, and a blocked set keeps it from
//! re-exploring dead ends, so the cost is bounded by the number of cycles
//! rather than the number of paths. Iteration is sorted, so output is
//! deterministic.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

pub type Adjacency = BTreeMap<String, BTreeSet<String>>;

/// Returns every simple cycle as its node sequence (not closed).
#[must_use]
pub fn simple_cycles(adjacency: &Adjacency) -> Vec<Vec<String>> {
    let reverse = reversed(adjacency);
    let mut cycles = Vec::new();

    for start in adjacency.keys() {
        let component = component_of(start, adjacency, &reverse);
        let mut state = CircuitState {
            component: &component,
            blocked: HashSet::new(),
            blocked_by: HashMap::new(),
            path_stack: Vec::new(),
            cycles: &mut cycles,
        };
        circuit(start, start, adjacency, &mut state);
    }

    cycles
}

fn reversed(adjacency: &Adjacency) -> BTreeMap<&str, Vec<&str>> {
    let mut reverse: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (from, targets) in adjacency {
        for to in targets {
            reverse.entry(to.as_str()).or_default().push(from.as_str());
        }
    }
    reverse
}

/// Nodes `>= start` that `start` reaches and that reach `start` back.
fn component_of<'a>(
    start: &'a str,
    adjacency: &'a Adjacency,
    reverse: &BTreeMap<&'a str, Vec<&'a str>>,
) -> HashSet<&'a str> {
    let forward = reach(start, |n| {
        adjacency
            .get(n)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    });
    let backward = reach(start, |n| reverse.get(n).cloned().unwrap_or_default());
    forward.intersection(&backward).copied().collect()
}

fn reach<'a, F>(start: &'a str, next: F) -> HashSet<&'a str>
where
    F: Fn(&'a str) -> Vec<&'a str>,
{
    let mut seen = HashSet::from([start]);
    let mut stack = vec![start];
    while let Some(node) = stack.pop() {
        for n in next(node) {
            if n >= start && seen.insert(n) {
                stack.push(n);
            }
        }
    }
    seen
}

struct CircuitState<'a, 'c> {
    component: &'c HashSet<&'a str>,
    blocked: HashSet<&'a str>,
    blocked_by: HashMap<&'a str, HashSet<&'a str>>,
    path_stack: Vec<&'a str>,
    cycles: &'c mut Vec<Vec<String>>,
}

fn neighbors<'a>(
    node: &str,
    adjacency: &'a Adjacency,
    component: &HashSet<&str>,
) -> Vec<&'a str> {
    adjacency
        .get(node)
        .into_iter()
        .flatten()
        .map(String::as_str)
        .filter(|n| component.contains(n))
        .collect()
}

/// Returns true when some cycle through `node` closed back at `start`.
fn circuit<'a>(
    start: &'a str,
    node: &'a str,
    adjacency: &'a Adjacency,
    state: &mut CircuitState<'a, '_>,
) -> bool {
    let mut closed = false;
    state.path_stack.push(node);
    state.blocked.insert(node);

    let next = neighbors(node, adjacency, state.component);
    for &neighbor in &next {
        if neighbor == start {
            record_cycle(state);
            closed = true;
        } else if !state.blocked.contains(neighbor) && circuit(start, neighbor, adjacency, state) {
            closed = true;
        }
    }

    if closed {
        unblock(node, state);
    } else {
        for neighbor in next {
            state.blocked_by.entry(neighbor).or_default().insert(node);
        }
    }

    state.path_stack.pop();
    closed
}

fn unblock<'a>(node: &'a str, state: &mut CircuitState<'a, '_>) {
    state.blocked.remove(node);
    if let Some(waiting) = state.blocked_by.remove(node) {
        for w in waiting {
            if state.blocked.contains(w) {
                unblock(w, state);
            }
        }
    }
}

fn record_cycle(state: &mut CircuitState<'_, '_>) {
    let cycle = state.path_stack.iter().map(|s| (*s).to_string()).collect();
    state.cycles.push(cycle);
}

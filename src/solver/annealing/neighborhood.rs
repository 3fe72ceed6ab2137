use rand::Rng;

use crate::domain::{Solution, UnassignedReason};

/// The four neighborhood operators, drawn uniformly each iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    SwapBetweenRoutes,
    MoveBetweenRoutes,
    SwapWithinRoute,
    InsertUnassigned,
}

impl Move {
    pub fn draw(rng: &mut impl Rng) -> Move {
        match rng.gen_range(0..4) {
            0 => Move::SwapBetweenRoutes,
            1 => Move::MoveBetweenRoutes,
            2 => Move::SwapWithinRoute,
            _ => Move::InsertUnassigned,
        }
    }
}

/// Apply one operator to a cloned solution. Returns `None` when the draw
/// cannot apply to the current state (too few routes, nothing unassigned,
/// ...): a no-op iteration, never a panic. The candidate's cached cost is
/// stale; the caller re-evaluates it.
pub fn apply(solution: &Solution, mv: Move, rng: &mut impl Rng) -> Option<Solution> {
    match mv {
        Move::SwapBetweenRoutes => swap_between(solution, rng),
        Move::MoveBetweenRoutes => move_between(solution, rng),
        Move::SwapWithinRoute => swap_within(solution, rng),
        Move::InsertUnassigned => insert_unassigned(solution, rng),
    }
}

fn nonempty_routes(solution: &Solution) -> Vec<usize> {
    (0..solution.routes.len())
        .filter(|&v| !solution.routes[v].is_empty())
        .collect()
}

/// Pick two distinct elements of `0..n`.
fn distinct_pair(n: usize, rng: &mut impl Rng) -> (usize, usize) {
    let a = rng.gen_range(0..n);
    let mut b = rng.gen_range(0..n - 1);
    if b >= a {
        b += 1;
    }
    (a, b)
}

fn swap_between(solution: &Solution, rng: &mut impl Rng) -> Option<Solution> {
    let nonempty = nonempty_routes(solution);
    if nonempty.len() < 2 {
        return None;
    }
    let (i, j) = distinct_pair(nonempty.len(), rng);
    let (va, vb) = (nonempty[i], nonempty[j]);
    let pa = rng.gen_range(0..solution.routes[va].len());
    let pb = rng.gen_range(0..solution.routes[vb].len());

    let mut next = solution.clone();
    let tmp = next.routes[va][pa];
    next.routes[va][pa] = next.routes[vb][pb];
    next.routes[vb][pb] = tmp;
    Some(next)
}

fn move_between(solution: &Solution, rng: &mut impl Rng) -> Option<Solution> {
    if solution.routes.len() < 2 {
        return None;
    }
    let nonempty = nonempty_routes(solution);
    if nonempty.is_empty() {
        return None;
    }
    let src = nonempty[rng.gen_range(0..nonempty.len())];
    let mut dst = rng.gen_range(0..solution.routes.len() - 1);
    if dst >= src {
        dst += 1;
    }
    let from_pos = rng.gen_range(0..solution.routes[src].len());

    let mut next = solution.clone();
    let order = next.routes[src].remove(from_pos);
    let to_pos = rng.gen_range(0..=next.routes[dst].len());
    next.routes[dst].insert(to_pos, order);
    Some(next)
}

fn swap_within(solution: &Solution, rng: &mut impl Rng) -> Option<Solution> {
    let swappable: Vec<usize> = (0..solution.routes.len())
        .filter(|&v| solution.routes[v].len() >= 2)
        .collect();
    if swappable.is_empty() {
        return None;
    }
    let v = swappable[rng.gen_range(0..swappable.len())];
    let (i, j) = distinct_pair(solution.routes[v].len(), rng);

    let mut next = solution.clone();
    next.routes[v].swap(i, j);
    Some(next)
}

fn insert_unassigned(solution: &Solution, rng: &mut impl Rng) -> Option<Solution> {
    // Orders heavier than every vehicle can never be rescued; trying them
    // would only burn iterations on guaranteed-infeasible candidates.
    let rescuable: Vec<usize> = solution
        .unassigned
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.1 != UnassignedReason::ExceedsFleetCapacity)
        .map(|(i, _)| i)
        .collect();
    if rescuable.is_empty() {
        return None;
    }
    let slot = rescuable[rng.gen_range(0..rescuable.len())];
    let v = rng.gen_range(0..solution.routes.len());

    let mut next = solution.clone();
    let (order, _) = next.unassigned.remove(slot);
    let pos = rng.gen_range(0..=next.routes[v].len());
    next.routes[v].insert(pos, order);
    Some(next)
}

//! Simple bot crews for the demo game.

use turf_war_core::{
    ActionKind, Cell, Command, GameState, PlayerId, RandomSource, CAPTURE_DAMAGE,
};

/// Pick a command for `player`.
///
/// Bots never act on the patrol's cell. They favour enemy cells (any hit
/// takes them), cells next to their own turf, metro stations and cells that
/// are already close to falling. A busted or broke crew passes.
pub fn choose<R: RandomSource + ?Sized>(
    state: &GameState,
    player: PlayerId,
    rng: &mut R,
) -> Command {
    let Some(crew) = state.get_player(player) else {
        return Command::pass(player);
    };
    if crew.is_penalized() || !crew.can_afford(state.settings.catalog.cheapest_cost()) {
        return Command::pass(player);
    }

    let candidates: Vec<(&Cell, u32)> = state
        .board
        .cells()
        .iter()
        .filter(|cell| cell.owner != Some(player) && !state.board.is_patrolled(&cell.coord))
        .map(|cell| (cell, score(state, player, cell)))
        .collect();
    let Some(best) = candidates.iter().map(|(_, s)| *s).max() else {
        return Command::pass(player);
    };
    let top: Vec<&Cell> = candidates
        .iter()
        .filter(|(_, s)| *s == best)
        .map(|(cell, _)| *cell)
        .collect();
    let target = top[rng.index(top.len())];

    match pick_kind(state, crew.points, target) {
        Some(kind) => Command::act(player, target.coord, kind),
        None => Command::pass(player),
    }
}

fn score(state: &GameState, player: PlayerId, cell: &Cell) -> u32 {
    let adjacent = state
        .board
        .neighbors(&cell.coord)
        .iter()
        .filter_map(|coord| state.board.get(coord))
        .any(|n| n.owner == Some(player));

    let mut score = cell.damage;
    if cell.owner.is_some() {
        score += 8;
    }
    if adjacent {
        score += 6;
    }
    if cell.is_metro {
        score += 4;
    }
    score
}

/// Cheapest affordable kind that captures `target` outright, otherwise the
/// hardest-hitting affordable kind.
fn pick_kind(state: &GameState, points: u32, target: &Cell) -> Option<ActionKind> {
    let remaining = CAPTURE_DAMAGE.saturating_sub(target.damage);
    let affordable: Vec<(ActionKind, u32, u32)> = state
        .settings
        .catalog
        .iter()
        .filter(|(_, spec)| spec.cost <= points)
        .map(|(kind, spec)| (kind, spec.cost, spec.damage))
        .collect();

    affordable
        .iter()
        .filter(|(_, _, damage)| *damage >= remaining)
        .min_by_key(|(_, cost, _)| *cost)
        .or_else(|| affordable.iter().max_by_key(|(_, _, damage)| *damage))
        .map(|(kind, _, _)| *kind)
}

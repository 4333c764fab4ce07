//! Human-readable street feed lines for engine events.

use turf_war_core::{GameEvent, GameState, PlayerId};

fn crew_name(state: &GameState, id: PlayerId) -> String {
    state
        .get_player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("crew {id}"))
}

/// Describe an event, or `None` for events the feed leaves out.
pub fn describe(state: &GameState, event: &GameEvent) -> Option<String> {
    let crew = event
        .player()
        .map(|id| crew_name(state, id))
        .unwrap_or_default();
    let line = match event {
        GameEvent::ActionApplied { kind, target, .. } => {
            format!("{crew} hit {target} with a {kind}")
        }
        GameEvent::CellCaptured {
            coord,
            previous_owner: None,
            ..
        } => format!("{crew} took {coord}"),
        GameEvent::ContestedCapture { victim, coord, .. } => format!(
            "BEEF! {crew} went over {} at {coord}",
            crew_name(state, *victim)
        ),
        GameEvent::PatrolEvaded { .. } => format!("{crew} slipped past the patrol"),
        GameEvent::DetectionTriggered {
            penalty_turns,
            records_reverted,
            cells_lost,
            ..
        } => format!(
            "BUSTED! {crew} is out for {penalty_turns} turns, {records_reverted} pieces buffed, {cells_lost} cells lost"
        ),
        GameEvent::ActionContinues { turns_left, .. } => {
            format!("{crew} keeps working the burner ({turns_left} turn left)")
        }
        GameEvent::PenaltyLifted { .. } => format!("{crew} is back on the street"),
        GameEvent::TurnPassed { .. } => format!("{crew} lays low"),
        GameEvent::GameWon { cells, .. } => {
            format!("{crew} IS ALL CITY KING with {cells} cells!")
        }
        GameEvent::CellCaptured { .. }
        | GameEvent::PatrolMoved { .. }
        | GameEvent::TurnAdvanced { .. } => return None,
    };
    Some(line)
}

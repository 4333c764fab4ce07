//! Integration tests for complete Turf War game flows.
//!
//! These tests verify end-to-end game scenarios including:
//! - Game setup and board generation
//! - Action resolution and captures
//! - Busts and rollback
//! - Turn flow, penalties and multi-turn actions
//! - Victory conditions
//! - Save/load serialization

use turf_war_core::{
    apply_action, create_board,
    engine::{self, Command},
    events::GameEvent,
    game_state::{CrewEntry, GameError, GameState, SetupError},
    hex::HexCoord,
    rng::{ScriptedRandom, SeededRng},
    settings::GameSettings,
    view::{CrewStats, GameSnapshot},
    ActionKind, CAPTURE_DAMAGE,
};

// =============================================================================
// Test Helpers
// =============================================================================

/// A board laid out by always drawing 0.0: metros on (0..10, 0), crews
/// starting at (10,0), (11,0), (0,1)... in roster order, patrol on the next
/// free cell.
fn fixed_game(crews: usize) -> GameState {
    let names: Vec<String> = (0..crews).map(|i| format!("Crew {}", i + 1)).collect();
    create_board(
        12,
        10,
        10,
        CrewEntry::roster(&names),
        &mut ScriptedRandom::constant(0.0),
    )
    .unwrap()
}

/// Never detects and always lets the patrol chase.
fn quiet() -> ScriptedRandom {
    ScriptedRandom::constant(0.99)
}

/// Always detects.
fn caught() -> ScriptedRandom {
    ScriptedRandom::constant(0.0)
}

/// Apply a command in place, panicking if it is refused.
fn step(state: &mut GameState, command: Command, rng: &mut ScriptedRandom) -> Vec<GameEvent> {
    let (next, events) = apply_action(state, &command, rng).unwrap();
    *state = next;
    assert!(state.check_invariants().is_ok());
    events
}

/// Act on `target` with the patrol placed there and detection forced.
fn act_under_patrol(
    state: &mut GameState,
    player: u8,
    target: HexCoord,
    kind: ActionKind,
) -> Vec<GameEvent> {
    state.board.patrol = target;
    step(state, Command::act(player, target, kind), &mut caught())
}

fn detection(events: &[GameEvent]) -> Option<&GameEvent> {
    events
        .iter()
        .find(|e| matches!(e, GameEvent::DetectionTriggered { .. }))
}

// =============================================================================
// 1. Game Setup Flow Tests
// =============================================================================

mod game_setup_flow {
    use super::*;

    #[test]
    fn test_setup_places_everything_apart() {
        let state = GameState::create(
            GameSettings::default(),
            CrewEntry::roster(&["BRONX KINGS", "QUEENS CREW", "BROOKLYN BOMBERS"]),
            &mut SeededRng::new(99),
        )
        .unwrap();

        let metros = state.board.cells().iter().filter(|c| c.is_metro).count();
        assert_eq!(metros, 10);
        assert_eq!(state.board.cell_count(), 120);

        for player in &state.players {
            let starts: Vec<_> = state
                .board
                .cells()
                .iter()
                .filter(|c| c.owner == Some(player.id))
                .collect();
            assert_eq!(starts.len(), 1);
            assert!(!starts[0].is_metro);
            assert_eq!(starts[0].damage, CAPTURE_DAMAGE);
            assert_eq!(player.points, 100);
        }

        let patrol = state.board.get(&state.board.patrol).unwrap();
        assert!(patrol.owner.is_none());
        assert!(!patrol.is_metro);
        assert!(state.check_invariants().is_ok());
    }

    #[test]
    fn test_setup_is_reproducible() {
        let roster = CrewEntry::roster(&["A", "B", "C", "D"]);
        let first =
            GameState::create(GameSettings::default(), roster.clone(), &mut SeededRng::new(5))
                .unwrap();
        let second =
            GameState::create(GameSettings::default(), roster.clone(), &mut SeededRng::new(5))
                .unwrap();
        let other =
            GameState::create(GameSettings::default(), roster, &mut SeededRng::new(6)).unwrap();

        assert_eq!(first, second);
        assert_ne!(first.board, other.board);
    }

    #[test]
    fn test_setup_rejects_bad_rosters() {
        assert_eq!(
            create_board(12, 10, 10, Vec::new(), &mut SeededRng::new(1)),
            Err(SetupError::NotEnoughPlayers { min: 2 })
        );
        assert_eq!(
            create_board(3, 3, 7, CrewEntry::roster(&["A", "B"]), &mut SeededRng::new(1)),
            Err(SetupError::BoardTooSmall {
                cells: 9,
                required: 10
            })
        );
    }

    #[test]
    fn test_partial_settings_file() {
        let settings = GameSettings::from_json(
            r#"{ "width": 8, "height": 6, "metro_count": 4, "winning_cells": 12 }"#,
        )
        .unwrap();
        assert_eq!(settings.cell_count(), 48);
        assert_eq!(settings.catalog.get(ActionKind::Burner).cost, 150);

        let state = GameState::create(
            settings,
            CrewEntry::roster(&["A", "B"]),
            &mut SeededRng::new(3),
        )
        .unwrap();
        assert_eq!(state.board.cells().iter().filter(|c| c.is_metro).count(), 4);
    }
}

// =============================================================================
// 2. Action Flow Tests
// =============================================================================

mod action_flow {
    use super::*;

    #[test]
    fn test_ten_tags_capture_a_fresh_cell() {
        let mut state = fixed_game(2);
        let target = HexCoord::new(6, 6);
        let mut rng = quiet();
        let mut spent = 0;

        for round in 1..=10 {
            let events = step(&mut state, Command::act(0, target, ActionKind::Tag), &mut rng);
            spent += events
                .iter()
                .filter_map(|e| match e {
                    GameEvent::ActionApplied { cost, .. } => Some(*cost),
                    _ => None,
                })
                .sum::<u32>();

            let cell = state.board.get(&target).unwrap();
            if round < 10 {
                assert_eq!(cell.owner, None);
                assert_eq!(cell.damage, round);
            } else {
                assert_eq!(cell.owner, Some(0));
                assert!(events.contains(&GameEvent::CellCaptured {
                    player: 0,
                    coord: target,
                    previous_owner: None,
                }));
            }
            step(&mut state, Command::pass(1), &mut rng);
        }

        assert_eq!(spent, 200);
        assert_eq!(state.players[0].owned_cells, 2);
    }

    #[test]
    fn test_beef_takes_an_enemy_cell() {
        let mut state = fixed_game(2);
        let enemy_start = HexCoord::new(11, 0);
        let events = step(
            &mut state,
            Command::act(0, enemy_start, ActionKind::Tag),
            &mut quiet(),
        );

        assert!(events.contains(&GameEvent::ContestedCapture {
            attacker: 0,
            victim: 1,
            coord: enemy_start,
        }));
        assert_eq!(state.players[0].owned_cells, 2);
        assert_eq!(state.players[1].owned_cells, 0);
        // Crew 1 is left with base income only
        assert!(matches!(
            events.last(),
            Some(GameEvent::TurnAdvanced { player: 1, income: 20, .. })
        ));
    }

    #[test]
    fn test_errors_leave_state_untouched() {
        let state = fixed_game(2);
        let own = HexCoord::new(10, 0);
        let cases = [
            (Command::act(1, own, ActionKind::Tag), GameError::NotYourTurn),
            (Command::act(0, own, ActionKind::Tag), GameError::SelfTarget),
            (
                Command::act(0, HexCoord::new(-1, 4), ActionKind::Tag),
                GameError::InvalidCoordinate(HexCoord::new(-1, 4)),
            ),
            (
                Command::act(0, HexCoord::new(4, 4), ActionKind::Burner),
                GameError::InsufficientFunds {
                    needed: 150,
                    available: 100,
                },
            ),
            (Command::act(9, own, ActionKind::Tag), GameError::UnknownPlayer(9)),
        ];

        for (command, expected) in cases {
            let mut rng = quiet();
            assert_eq!(apply_action(&state, &command, &mut rng), Err(expected));
            assert_eq!(rng.draws(), 0);
        }
    }

    #[test]
    fn test_escaping_the_patrol() {
        let mut state = fixed_game(2);
        let patrol = state.board.patrol;
        let events = step(&mut state, Command::act(0, patrol, ActionKind::Tag), &mut quiet());
        assert!(events.contains(&GameEvent::PatrolEvaded {
            player: 0,
            coord: patrol,
        }));
        assert!(detection(&events).is_none());
        assert_eq!(state.board.get(&patrol).unwrap().damage, 1);
    }
}

// =============================================================================
// 3. Bust Flow Tests
// =============================================================================

mod bust_flow {
    use super::*;

    #[test]
    fn test_rollback_restores_pre_action_board() {
        let initial = fixed_game(2);
        let mut state = initial.clone();
        let mut rng = quiet();

        step(&mut state, Command::act(0, HexCoord::new(5, 5), ActionKind::Tag), &mut rng);
        step(&mut state, Command::act(1, HexCoord::new(6, 6), ActionKind::Tag), &mut rng);
        step(&mut state, Command::act(0, HexCoord::new(5, 5), ActionKind::ThrowUp), &mut rng);
        step(&mut state, Command::pass(1), &mut rng);
        let points_before = state.players[0].points;

        let events = act_under_patrol(&mut state, 0, HexCoord::new(7, 7), ActionKind::Tag);
        assert_eq!(
            detection(&events),
            Some(&GameEvent::DetectionTriggered {
                player: 0,
                coord: HexCoord::new(7, 7),
                penalty_turns: 5,
                records_reverted: 3,
                cells_lost: 0,
            })
        );

        for (after, before) in state.board.cells().iter().zip(initial.board.cells()) {
            if after.coord == HexCoord::new(6, 6) {
                assert_eq!(after.damage, 1);
            } else {
                assert_eq!(after, before);
            }
        }
        let left: Vec<_> = state.history.records().iter().map(|r| r.player).collect();
        assert_eq!(left, vec![1]);
        // Points spent are not refunded
        assert_eq!(state.players[0].points, points_before - 20);
    }

    #[test]
    fn test_old_records_survive_the_window() {
        let mut state = fixed_game(2);
        let mut rng = quiet();
        let old = HexCoord::new(2, 5);

        step(&mut state, Command::act(0, old, ActionKind::Tag), &mut rng);
        for holder in [1, 0, 1, 0, 1] {
            step(&mut state, Command::pass(holder), &mut rng);
        }
        assert_eq!(state.turn, 6);

        let events = act_under_patrol(&mut state, 0, HexCoord::new(8, 3), ActionKind::Tag);
        assert!(matches!(
            detection(&events),
            Some(GameEvent::DetectionTriggered { records_reverted: 1, .. })
        ));
        assert_eq!(state.board.get(&old).unwrap().damage, 1);
        assert_eq!(state.board.get(&HexCoord::new(8, 3)).unwrap().damage, 0);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history.records()[0].turn, 0);
    }

    #[test]
    fn test_rollback_returns_beef_to_victim() {
        let mut state = fixed_game(2);
        let mut rng = quiet();
        let enemy_start = HexCoord::new(11, 0);

        step(&mut state, Command::act(0, enemy_start, ActionKind::Tag), &mut rng);
        step(&mut state, Command::pass(1), &mut rng);
        let events = act_under_patrol(&mut state, 0, HexCoord::new(3, 3), ActionKind::Tag);

        assert!(matches!(
            detection(&events),
            Some(GameEvent::DetectionTriggered {
                records_reverted: 2,
                cells_lost: 1,
                ..
            })
        ));
        let cell = state.board.get(&enemy_start).unwrap();
        assert_eq!(cell.owner, Some(1));
        assert_eq!(cell.damage, CAPTURE_DAMAGE);
        assert_eq!(state.players[0].owned_cells, 1);
        assert_eq!(state.players[1].owned_cells, 1);
    }

    #[test]
    fn test_busted_crew_sits_out_its_penalty() {
        let mut state = fixed_game(2);
        let mut rng = quiet();
        act_under_patrol(&mut state, 0, HexCoord::new(4, 4), ActionKind::Tag);
        assert_eq!(state.current_holder(), 1);
        assert_eq!(state.players[0].penalty_turns, 4);

        let mut lifted = false;
        for _ in 0..4 {
            assert_eq!(
                apply_action(
                    &state,
                    &Command::act(0, HexCoord::new(4, 4), ActionKind::Tag),
                    &mut quiet()
                ),
                Err(GameError::NotYourTurn)
            );
            let events = step(&mut state, Command::pass(1), &mut rng);
            assert_eq!(state.current_holder(), 1);
            lifted |= events.contains(&GameEvent::PenaltyLifted { player: 0 });
        }
        assert!(lifted);
        assert_eq!(state.players[0].penalty_turns, 0);

        step(&mut state, Command::pass(1), &mut rng);
        assert_eq!(state.current_holder(), 0);
    }

    #[test]
    fn test_bust_during_burner_clears_it() {
        let mut state = fixed_game(3);
        state.players[0].points = 400;
        let mut rng = quiet();

        let events = step(
            &mut state,
            Command::act(0, HexCoord::new(5, 5), ActionKind::Burner),
            &mut rng,
        );
        assert!(events.contains(&GameEvent::ActionContinues {
            player: 0,
            turns_left: 1
        }));

        act_under_patrol(&mut state, 0, HexCoord::new(6, 6), ActionKind::Tag);
        assert_eq!(state.players[0].multi_turn_left, 0);
        assert_eq!(state.current_holder(), 1);
        assert_eq!(state.board.get(&HexCoord::new(5, 5)).unwrap().owner, None);
        assert_eq!(state.players[0].owned_cells, 1);
    }
}

// =============================================================================
// 4. Turn Flow Tests
// =============================================================================

mod turn_flow {
    use super::*;

    #[test]
    fn test_rotation_skips_penalized_crew() {
        let mut state = fixed_game(3);
        state.players[1].penalty_turns = 2;
        step(&mut state, Command::pass(0), &mut quiet());
        assert_eq!(state.current_holder(), 2);
        assert_eq!(state.players[1].penalty_turns, 1);
    }

    #[test]
    fn test_income_with_metro_station() {
        let mut state = fixed_game(2);
        // Crew 1 already holds (11,0); add one metro and one standard cell
        state.board.get_mut(&HexCoord::new(0, 0)).unwrap().claim(1);
        state.board.get_mut(&HexCoord::new(5, 5)).unwrap().claim(1);
        state.players[1].owned_cells = 3;
        assert_eq!(engine::income_for(1, &state), Some(45));

        let events = step(&mut state, Command::pass(0), &mut quiet());
        assert!(events.contains(&GameEvent::TurnAdvanced {
            player: 1,
            turn: 1,
            income: 45,
        }));
        assert_eq!(state.players[1].points, 145);
    }

    #[test]
    fn test_all_penalized_still_moves_forward() {
        let mut state = fixed_game(3);
        for player in &mut state.players {
            player.penalty_turns = 5;
        }
        let mut rng = quiet();
        for expected in [1, 2, 0] {
            let holder = state.current_holder();
            step(&mut state, Command::pass(holder), &mut rng);
            assert_eq!(state.current_holder(), expected);
        }
        assert_eq!(state.turn, 3);
    }

    #[test]
    fn test_patrol_moves_one_step_per_turn() {
        let mut state = fixed_game(2);
        let mut rng = SeededRng::new(11);
        for _ in 0..20 {
            let from = state.board.patrol;
            let holder = state.current_holder();
            let (next, events) = apply_action(&state, &Command::pass(holder), &mut rng).unwrap();
            state = next;
            assert!(events.contains(&GameEvent::PatrolMoved {
                from,
                to: state.board.patrol,
            }));
            assert!(state.board.neighbors(&from).contains(&state.board.patrol));
        }
    }
}

// =============================================================================
// 5. Victory Tests
// =============================================================================

mod victory_flow {
    use super::*;

    #[test]
    fn test_fortieth_cell_wins_mid_burner() {
        let mut state = fixed_game(2);
        let mut claimed = 0;
        for cell in 0..state.board.cell_count() as i32 {
            let coord = HexCoord::new(cell % 12, cell / 12);
            if claimed == 38 {
                break;
            }
            if coord.r >= 2 && coord != HexCoord::new(5, 9) {
                state.board.get_mut(&coord).unwrap().claim(0);
                claimed += 1;
            }
        }
        state.players[0].owned_cells = 39;
        state.players[0].points = 150;
        assert!(state.check_invariants().is_ok());

        let events = step(
            &mut state,
            Command::act(0, HexCoord::new(5, 9), ActionKind::Burner),
            &mut quiet(),
        );
        assert_eq!(events.last(), Some(&GameEvent::GameWon { player: 0, cells: 40 }));
        assert!(engine::is_terminal(&state));
        assert_eq!(engine::winner(&state), Some(0));
        assert_eq!(state.turn, 0);

        assert_eq!(
            apply_action(
                &state,
                &Command::act(1, HexCoord::new(2, 1), ActionKind::Tag),
                &mut quiet()
            ),
            Err(GameError::GameAlreadyOver)
        );
    }

    #[test]
    fn test_rollback_can_hand_the_win_to_the_victim() {
        let mut state = fixed_game(2);
        state.settings.winning_cells = 3;
        state.board.get_mut(&HexCoord::new(5, 5)).unwrap().claim(1);
        state.players[1].owned_cells = 2;
        state.players[1].points = 500;
        let mut rng = quiet();

        step(&mut state, Command::act(0, HexCoord::new(5, 5), ActionKind::Tag), &mut rng);
        step(&mut state, Command::act(1, HexCoord::new(6, 6), ActionKind::Burner), &mut rng);
        step(&mut state, Command::act(1, HexCoord::new(7, 7), ActionKind::Tag), &mut rng);
        assert_eq!(state.players[1].owned_cells, 2);
        assert!(!state.is_terminal());

        let events = act_under_patrol(&mut state, 0, HexCoord::new(8, 8), ActionKind::Tag);
        assert_eq!(events.last(), Some(&GameEvent::GameWon { player: 1, cells: 3 }));
        assert_eq!(state.winner(), Some(1));
    }

    #[test]
    fn test_final_stats() {
        let mut state = fixed_game(2);
        state.players[0].points = 1_000;
        let mut rng = quiet();
        step(&mut state, Command::act(0, HexCoord::new(4, 4), ActionKind::Burner), &mut rng);
        step(&mut state, Command::act(0, HexCoord::new(4, 5), ActionKind::Tag), &mut rng);
        step(&mut state, Command::act(1, HexCoord::new(4, 5), ActionKind::ThrowUp), &mut rng);

        let stats = CrewStats::for_player(&state, 0);
        assert_eq!((stats.tags, stats.throw_ups, stats.burners), (1, 0, 1));

        let snapshot = GameSnapshot::capture(&state);
        assert_eq!(snapshot.scoreboard()[0].id, 0);
        assert_eq!(snapshot.scoreboard()[0].owned_cells, 2);
    }
}

// =============================================================================
// 6. Save/Load Tests
// =============================================================================

mod save_load_flow {
    use super::*;

    #[test]
    fn test_state_round_trip_mid_game() {
        let mut state = fixed_game(3);
        let mut rng = SeededRng::new(21);
        let commands = [
            Command::act(0, HexCoord::new(3, 3), ActionKind::Tag),
            Command::act(1, HexCoord::new(3, 3), ActionKind::ThrowUp),
            Command::pass(2),
        ];
        for command in commands {
            state = apply_action(&state, &command, &mut rng).unwrap().0;
        }

        let json = serde_json::to_string(&state).unwrap();
        let restored: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);

        let next = Command::act(0, HexCoord::new(4, 4), ActionKind::Tag);
        let a = apply_action(&state, &next, &mut SeededRng::new(1)).unwrap();
        let b = apply_action(&restored, &next, &mut SeededRng::new(1)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_command_log_replays_identically() {
        let initial = fixed_game(2);
        let commands = vec![
            Command::act(0, HexCoord::new(5, 5), ActionKind::Tag),
            Command::act(1, HexCoord::new(6, 5), ActionKind::Tag),
            Command::act(0, HexCoord::new(5, 5), ActionKind::ThrowUp),
            Command::pass(1),
        ];
        let first = engine::replay(&initial, &commands, &mut SeededRng::new(8)).unwrap();
        let second = engine::replay(&initial, &commands, &mut SeededRng::new(8)).unwrap();
        assert_eq!(first, second);
    }
}

mod common;

use common::{Arena, at, drain_events, soldier};
use tactics_core::{
    Action, ActionKind, AttackStyle, CombatConfig, FixedInitiative, GridDimensions, GridOracle,
    HighlightLayer, Interactable, ScriptedInitiative, Team, TileSprite, TurnPhase, UnitId,
    Waypoint,
};
use tactics_runtime::{
    BfsPathfinder, CombatController, CombatEvent, CursorKind, InMemoryGrid, Intent,
    RecordingEffects, RuntimeConfig, RuntimeError, TickInput, Topic,
};

fn duel() -> Arena {
    let mut arena = Arena::combat(5, 5, vec![soldier(1, Team::Blue, (0, 0), 10)]);
    arena
        .controller
        .load_enemies(&mut arena.grid, [soldier(9, Team::Red, (3, 0), 0)]);
    arena
}

#[test]
fn move_then_attack_merges_into_one_order() {
    let mut arena = Arena::combat(6, 6, vec![soldier(1, Team::Blue, (2, 2), 4)]);
    arena
        .controller
        .load_enemies(&mut arena.grid, [soldier(9, Team::Red, (2, 5), 0)]);
    let mut selection = arena.subscribe(Topic::Selection);

    // Two cells at two points each spend the whole budget of 4.
    arena.commit(at(2, 2), at(2, 4));
    assert_eq!(arena.controller.phase(), TurnPhase::UnitSelected);
    assert_eq!(arena.controller.orders().get(UnitId(1)).unwrap().total_cost(), 4);

    arena.press(at(2, 5), Intent::ConfirmMoveOrAttack);
    assert_eq!(arena.controller.phase(), TurnPhase::Waiting);

    let orders = arena.controller.orders();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders.get(UnitId(1)).unwrap().total_cost(), 7);

    let unit = arena.controller.roster().get(UnitId(1)).unwrap();
    assert_eq!(unit.pending_actions(), 2);
    assert_eq!(unit.action_points(), 4);
    assert_eq!(unit.anchor(), at(2, 4));

    let queued: Vec<_> = drain_events(&mut selection)
        .into_iter()
        .filter_map(|event| match event {
            CombatEvent::ActionQueued {
                kind, total_cost, ..
            } => Some((kind, total_cost)),
            _ => None,
        })
        .collect();
    assert_eq!(
        queued,
        vec![
            (ActionKind::Move, 4),
            (ActionKind::Attack(AttackStyle::Melee), 7)
        ]
    );

    arena.idle();
    arena.end_turn();
    arena.run_ai().unwrap();
    drain_events(&mut selection);
    assert_eq!(arena.drain(), 2);
    assert_eq!(arena.effects.executed_by(), vec![UnitId(1), UnitId(1)]);

    let remaining: Vec<_> = drain_events(&mut selection)
        .into_iter()
        .filter_map(|event| match event {
            CombatEvent::ActionPointsChanged {
                unit: Some(UnitId(1)),
                remaining,
            } => remaining,
            _ => None,
        })
        .collect();
    assert_eq!(remaining, vec![0, 0]);

    let unit = arena.controller.roster().get(UnitId(1)).unwrap();
    assert_eq!(unit.cell(), at(2, 4));
    assert_eq!(unit.action_points(), 4);
}

#[test]
fn a_cell_claimed_by_a_queued_move_is_not_a_target() {
    let mut arena = Arena::combat(
        5,
        5,
        vec![
            soldier(1, Team::Blue, (0, 0), 4),
            soldier(2, Team::Blue, (2, 0), 4),
        ],
    );

    arena.commit(at(0, 0), at(1, 0));
    arena.press(at(2, 0), Intent::Select);
    assert!(!arena.grid.is_valid_move_target(at(1, 0)));
    assert!(arena.grid.is_valid_move_target(at(3, 0)));

    arena.press(at(1, 0), Intent::ConfirmMoveOrAttack);
    assert_eq!(arena.controller.phase(), TurnPhase::UnitSelected);
    assert_eq!(
        arena.controller.roster().get(UnitId(2)).unwrap().pending_actions(),
        0
    );

    let onto_claim = Action::movement(
        UnitId(2),
        Waypoint::new(at(2, 0), arena.grid.center_of(at(2, 0))),
        Waypoint::new(at(1, 0), arena.grid.center_of(at(1, 0))),
        2,
    );
    assert_eq!(
        arena.controller.submit_action(onto_claim),
        Err(RuntimeError::CellClaimed {
            unit: UnitId(2),
            cell: at(1, 0)
        })
    );

    arena.press(at(2, 1), Intent::ConfirmMoveOrAttack);
    arena.idle();
    arena.end_turn();
    arena.run_ai().unwrap();
    assert_eq!(arena.drain(), 2);

    assert_eq!(arena.grid.occupant(at(1, 0)), Some(UnitId(1)));
    assert_eq!(arena.grid.occupant(at(2, 1)), Some(UnitId(2)));
    assert_eq!(arena.grid.occupant(at(0, 0)), None);
    assert_eq!(arena.grid.occupant(at(2, 0)), None);
}

#[test]
fn orders_resolve_by_initiative_and_turn_advances_once() {
    let dims = GridDimensions::new(5, 5);
    let mut arena = Arena::new(
        InMemoryGrid::new(dims),
        BfsPathfinder::open(dims),
        CombatController::builder()
            .policy(ScriptedInitiative::new([5, 2]))
            .party([
                soldier(1, Team::Blue, (0, 0), 4),
                soldier(2, Team::Blue, (0, 2), 4),
            ])
            .initial_phase(TurnPhase::Normal),
    );
    let mut turns = arena.subscribe(Topic::Turn);

    arena.commit(at(0, 0), at(1, 0));
    arena.commit(at(0, 2), at(1, 2));
    assert_eq!(arena.controller.phase(), TurnPhase::UnitSelected);

    arena.end_turn();
    assert_eq!(arena.controller.phase(), TurnPhase::EndingTurn);
    assert_eq!(arena.controller.selected(), None);

    assert_eq!(arena.run_ai().unwrap(), 0);
    assert!(arena.controller.orders().is_sealed());
    assert_eq!(arena.controller.phase(), TurnPhase::Normal);

    assert_eq!(arena.drain(), 2);
    assert_eq!(arena.effects.executed_by(), vec![UnitId(2), UnitId(1)]);
    assert_eq!(arena.controller.turn(), 2);
    assert!(arena.controller.orders().is_empty());
    assert!(!arena.controller.orders().is_sealed());

    let unit = arena.controller.roster().get(UnitId(1)).unwrap();
    assert_eq!(unit.cell(), at(1, 0));
    assert_eq!(unit.action_points(), 4);
    assert_eq!(arena.grid.occupant(at(1, 0)), Some(UnitId(1)));
    assert_eq!(arena.grid.occupant(at(0, 0)), None);

    let turn_ends: Vec<_> = drain_events(&mut turns)
        .into_iter()
        .filter(|event| matches!(event, CombatEvent::TurnEnded { .. }))
        .collect();
    assert_eq!(turn_ends, vec![CombatEvent::TurnEnded { turn: 2 }]);
}

#[test]
fn queue_with_n_actions_drains_in_n_steps() {
    let mut arena = Arena::combat(6, 1, vec![soldier(1, Team::Blue, (0, 0), 12)]);
    arena
        .controller
        .load_enemies(&mut arena.grid, [soldier(9, Team::Red, (3, 0), 0)]);

    arena.commit(at(0, 0), at(1, 0));
    arena.press(at(2, 0), Intent::ConfirmMoveOrAttack);
    arena.idle();
    arena.press(at(3, 0), Intent::ConfirmMoveOrAttack);
    assert_eq!(
        arena.controller.roster().get(UnitId(1)).unwrap().pending_actions(),
        3
    );

    arena.idle();
    arena.end_turn();
    arena.run_ai().unwrap();

    assert_eq!(arena.drain(), 3);
    assert_eq!(arena.controller.turn(), 2);
    assert_eq!(
        arena.controller.roster().get(UnitId(1)).unwrap().cell(),
        at(2, 0)
    );
}

#[test]
fn waiting_settles_to_ending_turn_when_nobody_can_act() {
    let dims = GridDimensions::new(5, 5);
    let combat = CombatConfig {
        min_action_points_to_act: 5,
        ..CombatConfig::default()
    };
    let mut arena = Arena::new(
        InMemoryGrid::new(dims),
        BfsPathfinder::open(dims),
        CombatController::builder()
            .config(RuntimeConfig::new(combat))
            .policy(FixedInitiative(1))
            .party([soldier(1, Team::Blue, (0, 0), 4)])
            .initial_phase(TurnPhase::Normal),
    );
    let mut ai = arena.subscribe(Topic::Ai);

    arena.press(at(0, 0), Intent::Select);
    arena.press(at(1, 0), Intent::ConfirmMoveOrAttack);
    assert_eq!(arena.controller.phase(), TurnPhase::Waiting);

    arena.idle();
    assert_eq!(arena.controller.phase(), TurnPhase::EndingTurn);

    arena.idle();
    arena.idle();
    assert_eq!(
        drain_events(&mut ai),
        vec![CombatEvent::AiTurnRequested { turn: 1 }]
    );
}

#[test]
fn second_acknowledge_is_rejected_while_executing() {
    let mut arena = duel();
    arena.effects = RecordingEffects::deferring_moves();

    arena.commit(at(0, 0), at(1, 0));
    arena.end_turn();
    arena.run_ai().unwrap();

    assert_eq!(
        arena.controller.acknowledge_ai_turn(),
        Err(RuntimeError::ExecutionInFlight)
    );
    let late = Action::movement(
        UnitId(9),
        Waypoint::new(at(3, 0), arena.grid.center_of(at(3, 0))),
        Waypoint::new(at(4, 0), arena.grid.center_of(at(4, 0))),
        2,
    );
    assert_eq!(
        arena.controller.submit_action(late),
        Err(RuntimeError::NotAcceptingOrders {
            phase: TurnPhase::Normal
        })
    );
}

#[test]
fn in_progress_effect_stalls_until_completed() {
    let mut arena = duel();
    arena.effects = RecordingEffects::deferring_moves();

    arena.commit(at(0, 0), at(1, 0));
    arena.end_turn();
    arena.run_ai().unwrap();

    arena.idle();
    arena.idle();
    assert!(arena.controller.is_executing());
    assert_eq!(arena.effects.log().executed.len(), 1);

    // Input is ignored while resolving.
    arena.press(at(0, 0), Intent::Select);
    assert_eq!(arena.controller.selected(), None);

    assert_eq!(
        arena.complete_action(UnitId(9)),
        Err(RuntimeError::NoPendingAction { unit: UnitId(9) })
    );
    arena.complete_action(UnitId(1)).unwrap();
    assert_eq!(
        arena.controller.roster().get(UnitId(1)).unwrap().cell(),
        at(1, 0)
    );

    arena.idle();
    assert!(!arena.controller.is_executing());
    assert_eq!(arena.controller.turn(), 2);
}

#[test]
fn reset_clears_the_queue_and_leaves_an_empty_order() {
    let mut arena = duel();

    arena.commit(at(0, 0), at(2, 0));
    arena.tick(TickInput::idle().with_intent(Intent::ResetUnitActions));

    let unit = arena.controller.roster().get(UnitId(1)).unwrap();
    assert_eq!(unit.action_points(), 10);
    assert_eq!(unit.pending_actions(), 0);
    assert!(arena.controller.orders().contains(UnitId(1)));

    arena.end_turn();
    arena.run_ai().unwrap();
    assert_eq!(arena.drain(), 1);
    assert!(arena.effects.log().executed.is_empty());
    assert_eq!(arena.controller.turn(), 2);
}

#[test]
fn interacting_ends_the_turn() {
    let dims = GridDimensions::new(3, 3);
    let lever = Interactable {
        id: 4,
        cost: 1,
        range: 1,
    };
    let mut arena = Arena::new(
        InMemoryGrid::new(dims).with_interactable(at(1, 0), lever),
        BfsPathfinder::new(dims, [at(1, 0)]),
        CombatController::builder()
            .policy(FixedInitiative(1))
            .party([soldier(1, Team::Blue, (0, 0), 6)])
            .initial_phase(TurnPhase::Normal),
    );

    arena.press(at(0, 0), Intent::Select);
    arena.press(at(1, 0), Intent::ConfirmMoveOrAttack);

    assert_eq!(arena.controller.phase(), TurnPhase::EndingTurn);
    assert_eq!(arena.controller.orders().get(UnitId(1)).unwrap().total_cost(), 1);
    let unit = arena.controller.roster().get(UnitId(1)).unwrap();
    assert_eq!(unit.action_points(), 6);
    assert_eq!(unit.actions().peek_last().map(|a| a.kind()), Some(ActionKind::Interact));
}

#[test]
fn selection_paints_ranges_and_commit_clears_them() {
    let mut arena = duel();

    arena.press(at(0, 0), Intent::Select);
    assert!(!arena.highlights.painted(HighlightLayer::Movement).is_empty());
    assert!(arena.grid.is_valid_move_target(at(2, 0)));
    assert!(!arena.grid.is_valid_move_target(at(3, 0)), "occupied cells are not targets");
    // Sword costs 3, the unit has 10.
    assert_eq!(
        arena.highlights.sprite(HighlightLayer::AttackRange, at(1, 1)),
        TileSprite::Move
    );

    arena.hover(at(2, 0));
    assert_eq!(
        arena.highlights.sprite(HighlightLayer::Arrow, at(2, 0)),
        TileSprite::ArrowEnd
    );
    assert_eq!(arena.highlights.rotation(HighlightLayer::Arrow, at(2, 0)), -90);

    arena.press(at(2, 0), Intent::ConfirmMoveOrAttack);
    assert!(arena.highlights.painted(HighlightLayer::Movement).is_empty());
    assert!(arena.highlights.painted(HighlightLayer::AttackRange).is_empty());
    assert!(arena.grid.valid_move_targets().is_empty());
}

#[test]
fn cursor_follows_what_is_under_the_pointer() {
    let mut arena = duel();
    let mut selection = arena.subscribe(Topic::Selection);
    let cursors = |events: Vec<CombatEvent>| -> Vec<CursorKind> {
        events
            .into_iter()
            .filter_map(|event| match event {
                CombatEvent::CursorChanged { cursor } => Some(cursor),
                _ => None,
            })
            .collect()
    };

    arena.hover(at(0, 0));
    assert_eq!(cursors(drain_events(&mut selection)), vec![CursorKind::Select]);

    arena.hover(at(0, 0));
    assert!(cursors(drain_events(&mut selection)).is_empty());

    arena.commit(at(0, 0), at(2, 0));
    drain_events(&mut selection);

    arena.hover(at(3, 0));
    assert_eq!(cursors(drain_events(&mut selection)), vec![CursorKind::Attack]);

    arena.hover(at(2, 1));
    assert_eq!(cursors(drain_events(&mut selection)), vec![CursorKind::Move]);

    arena.idle();
    assert_eq!(cursors(drain_events(&mut selection)), vec![CursorKind::Arrow]);
}

#[test]
fn intents_outside_combat_phases_are_ignored() {
    let dims = GridDimensions::new(3, 3);
    let mut arena = Arena::new(
        InMemoryGrid::new(dims),
        BfsPathfinder::open(dims),
        CombatController::builder().party([soldier(1, Team::Blue, (0, 0), 6)]),
    );
    assert_eq!(arena.controller.phase(), TurnPhase::OutOfCombat);

    arena.tick(TickInput::idle().with_intent(Intent::EndTurn));
    assert_eq!(arena.controller.phase(), TurnPhase::OutOfCombat);
    assert_eq!(arena.controller.stage_loaded(), Ok(()));
    assert_eq!(arena.controller.phase(), TurnPhase::Normal);
    assert!(matches!(
        arena.controller.stage_loaded(),
        Err(RuntimeError::Phase(_))
    ));
}

#[tokio::test]
async fn ai_is_asked_once_per_turn() {
    let mut arena = Arena::combat(5, 5, vec![soldier(1, Team::Blue, (0, 0), 4)]);
    let mut ai = arena.subscribe(Topic::Ai);

    for turn in 1..=2 {
        arena.end_turn();
        arena.idle();
        let event = ai.recv().await.unwrap();
        assert_eq!(event, CombatEvent::AiTurnRequested { turn });

        arena.run_ai().unwrap();
        assert_eq!(
            ai.recv().await.unwrap(),
            CombatEvent::AiTurnAcknowledged { turn }
        );
        arena.drain();
    }
    assert_eq!(arena.controller.turn(), 3);
    assert!(ai.try_recv().is_err());
}

#[test]
fn merged_subscription_sees_turn_and_ai_events_in_publication_order() {
    let mut arena = Arena::combat(5, 5, vec![soldier(1, Team::Blue, (0, 0), 4)]);
    let mut all = arena.controller.events().subscribe_all();

    arena.end_turn();
    arena.run_ai().unwrap();
    arena.drain();

    let handoff: Vec<_> = drain_events(&mut all)
        .into_iter()
        .filter(|event| {
            matches!(
                event,
                CombatEvent::PhaseChanged {
                    to: TurnPhase::EndingTurn,
                    ..
                } | CombatEvent::AiTurnRequested { .. }
                    | CombatEvent::AiTurnAcknowledged { .. }
                    | CombatEvent::TurnEnded { .. }
            )
        })
        .collect();
    assert_eq!(
        handoff,
        vec![
            CombatEvent::PhaseChanged {
                from: TurnPhase::Normal,
                to: TurnPhase::EndingTurn,
            },
            CombatEvent::AiTurnRequested { turn: 1 },
            CombatEvent::AiTurnAcknowledged { turn: 1 },
            CombatEvent::TurnEnded { turn: 2 },
        ]
    );
}

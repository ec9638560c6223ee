mod common;

use common::{Arena, at, drain_events, soldier};
use tactics_core::{
    FixedInitiative, GridDimensions, GridOracle, ScriptedInitiative, Team, TurnPhase, UnitId,
};
use tactics_runtime::{
    BfsPathfinder, CombatController, CombatEvent, InMemoryGrid, Intent, RecordingEffects,
    RuntimeError, Topic,
};

fn skirmish(phase: TurnPhase, reds: &[(u32, (i32, i32))]) -> Arena {
    let dims = GridDimensions::new(5, 5);
    let mut arena = Arena::new(
        InMemoryGrid::new(dims),
        BfsPathfinder::open(dims),
        CombatController::builder()
            .policy(ScriptedInitiative::new([1, 2]))
            .party([
                soldier(1, Team::Blue, (0, 0), 4),
                soldier(2, Team::Blue, (0, 2), 4),
            ])
            .initial_phase(phase),
    );
    let enemies: Vec<_> = reds
        .iter()
        .map(|(id, cell)| soldier(*id, Team::Red, *cell, 0))
        .collect();
    arena.controller.load_enemies(&mut arena.grid, enemies);
    arena
}

#[test]
fn death_mid_execution_purges_the_order_and_unblocks_stepping() {
    let mut arena = skirmish(TurnPhase::Normal, &[(9, (4, 4))]);
    arena.effects = RecordingEffects::deferring_moves();

    arena.commit(at(0, 0), at(1, 0));
    arena.commit(at(0, 2), at(1, 2));
    arena.end_turn();
    arena.run_ai().unwrap();

    arena.idle();
    assert_eq!(arena.effects.executed_by(), vec![UnitId(1)]);

    arena.unit_died(UnitId(1)).unwrap();
    assert!(!arena.controller.orders().contains(UnitId(1)));
    assert_eq!(arena.controller.orders().len(), 1);
    assert_eq!(arena.grid.occupant(at(0, 0)), None);

    arena.idle();
    assert_eq!(arena.effects.executed_by(), vec![UnitId(1), UnitId(2)]);
    arena.complete_action(UnitId(2)).unwrap();
    arena.idle();

    assert!(!arena.controller.is_executing());
    assert_eq!(arena.controller.turn(), 2);
    assert_eq!(arena.controller.roster().count(Team::Blue), 1);
}

#[test]
fn last_enemy_down_clears_the_encounter() {
    let mut arena = skirmish(TurnPhase::Normal, &[(9, (4, 4))]);
    let mut ai = arena.subscribe(Topic::Ai);
    let mut encounter = arena.subscribe(Topic::Encounter);

    arena.unit_died(UnitId(9)).unwrap();

    assert_eq!(arena.controller.phase(), TurnPhase::OutOfCombat);
    assert_eq!(
        drain_events(&mut ai),
        vec![CombatEvent::AiStageUnloaded { stage: 0 }]
    );
    assert_eq!(
        drain_events(&mut encounter),
        vec![CombatEvent::UnitDied {
            unit: UnitId(9),
            team: Team::Red
        }]
    );
    assert_eq!(arena.grid.occupant(at(4, 4)), None);
}

#[test]
fn party_wipe_ends_the_game() {
    let mut arena = skirmish(TurnPhase::Normal, &[(9, (4, 4))]);
    let mut encounter = arena.subscribe(Topic::Encounter);

    arena.unit_died(UnitId(1)).unwrap();
    assert!(
        !drain_events(&mut encounter).contains(&CombatEvent::GameEnded { won: false })
    );

    arena.unit_died(UnitId(2)).unwrap();
    assert!(drain_events(&mut encounter).contains(&CombatEvent::GameEnded { won: false }));
}

#[test]
fn boss_reenables_with_one_enemy_left_and_never_clears() {
    let mut arena = skirmish(TurnPhase::Boss, &[(8, (4, 3)), (9, (4, 4))]);
    assert!(arena.controller.in_boss_fight());
    let mut encounter = arena.subscribe(Topic::Encounter);
    let mut ai = arena.subscribe(Topic::Ai);

    arena.unit_died(UnitId(8)).unwrap();
    assert!(drain_events(&mut encounter).contains(&CombatEvent::BossReenabled));

    arena.unit_died(UnitId(9)).unwrap();
    assert!(drain_events(&mut ai).is_empty());
    assert_eq!(arena.controller.phase(), TurnPhase::Boss);
}

#[test]
fn selected_unit_death_drops_the_selection() {
    let mut arena = skirmish(TurnPhase::Normal, &[(9, (4, 4))]);
    let mut selection = arena.subscribe(Topic::Selection);

    arena.press(at(0, 0), Intent::Select);
    assert_eq!(arena.controller.selected(), Some(UnitId(1)));
    drain_events(&mut selection);

    arena.unit_died(UnitId(1)).unwrap();
    assert_eq!(arena.controller.selected(), None);
    assert_eq!(arena.controller.phase(), TurnPhase::Normal);
    assert!(drain_events(&mut selection).contains(&CombatEvent::UnitDeselected));
}

#[test]
fn unknown_unit_is_reported() {
    let dims = GridDimensions::new(2, 2);
    let mut arena = Arena::new(
        InMemoryGrid::new(dims),
        BfsPathfinder::open(dims),
        CombatController::builder().policy(FixedInitiative(1)),
    );
    assert_eq!(
        arena.unit_died(UnitId(42)),
        Err(RuntimeError::UnknownUnit(UnitId(42)))
    );
}

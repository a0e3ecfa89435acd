mod common;

use calma_core::keys;
use calma_core::models::mindfulness::{MindfulnessSessionRecord, SessionKind};
use calma_sessions::Tickable;
use calma_sessions::breathing::{BreathingSessionMachine, BreathingState, BreathingTick};
use calma_sessions::error::SessionError;
use calma_sessions::exercises::{BreathingCatalog, BreathingExercise, Phase};
use calma_storage::records::RecordStore;

fn catalog() -> BreathingCatalog {
    BreathingCatalog::builtin().unwrap()
}

fn sessions(store: &RecordStore) -> Vec<MindfulnessSessionRecord> {
    store.load(keys::MINDFULNESS_SESSIONS).unwrap()
}

#[test]
fn catalog_lists_builtin_exercises() {
    let catalog = catalog();
    let ids: Vec<_> = catalog.all().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["4-7-8", "box", "coherent"]);

    let relaxing = catalog.get("4-7-8").unwrap();
    let durations: Vec<_> = relaxing.phases.iter().map(|p| p.duration_seconds).collect();
    assert_eq!(durations, vec![4, 7, 8]);
    assert_eq!(relaxing.cycles, 4);
    assert_eq!(relaxing.total_seconds(), 76);
}

#[test]
fn unknown_exercise_is_reported() {
    assert!(matches!(
        catalog().get("wim-hof"),
        Err(SessionError::UnknownExercise(ref id)) if id == "wim-hof"
    ));
}

#[test]
fn start_enters_first_phase() {
    let mut machine = BreathingSessionMachine::new(RecordStore::in_memory());
    assert_eq!(machine.state(), BreathingState::Idle);
    machine.start(catalog().get("4-7-8").unwrap()).unwrap();
    assert_eq!(
        machine.state(),
        BreathingState::Running {
            phase_index: 0,
            cycle: 0,
            remaining: 4
        }
    );
    assert_eq!(machine.current_phase().unwrap().name, "Inspire");
}

#[test]
fn four_seven_eight_completes_after_exactly_76_ticks() {
    let store = RecordStore::in_memory();
    let mut machine = BreathingSessionMachine::new(store.clone());
    machine.start(catalog().get("4-7-8").unwrap()).unwrap();

    for tick in 1..76 {
        let event = machine.tick().unwrap();
        assert!(
            !matches!(event, BreathingTick::Completed { .. }),
            "completed early at tick {tick}"
        );
        assert!(machine.is_active());
    }
    assert!(sessions(&store).is_empty());
    assert_eq!(
        machine.state(),
        BreathingState::Running {
            phase_index: 2,
            cycle: 3,
            remaining: 1
        }
    );

    let BreathingTick::Completed { record } = machine.tick().unwrap() else {
        panic!("expected completion on tick 76");
    };
    assert_eq!(machine.state(), BreathingState::Completed);
    assert!(!machine.is_active());
    assert_eq!(record.duration_seconds, 76);
    assert_eq!(record.kind, SessionKind::Breathing);
    assert!(record.completed);

    // Further ticks are ignored and record nothing.
    assert_eq!(machine.tick().unwrap(), BreathingTick::Ignored);
    let saved = sessions(&store);
    assert_eq!(saved, vec![record]);
}

#[test]
fn phase_changes_and_cycle_wrap() {
    let mut machine = BreathingSessionMachine::new(RecordStore::in_memory());
    machine.start(catalog().get("coherent").unwrap()).unwrap();

    for _ in 0..4 {
        assert!(matches!(machine.tick().unwrap(), BreathingTick::Counting { .. }));
    }
    assert_eq!(
        machine.tick().unwrap(),
        BreathingTick::PhaseChanged {
            phase_index: 1,
            cycle: 0,
            remaining: 5
        }
    );
    for _ in 0..4 {
        machine.tick().unwrap();
    }
    assert_eq!(
        machine.tick().unwrap(),
        BreathingTick::PhaseChanged {
            phase_index: 0,
            cycle: 1,
            remaining: 5
        }
    );
}

#[test]
fn single_phase_single_cycle_exercise() {
    let exercise = BreathingExercise {
        id: "sigh".to_string(),
        name: "Suspiro".to_string(),
        description: String::new(),
        phases: vec![Phase {
            name: "Expire".to_string(),
            duration_seconds: 1,
            instruction: String::new(),
        }],
        cycles: 1,
        benefits: Vec::new(),
    };
    let mut machine = BreathingSessionMachine::new(RecordStore::in_memory());
    machine.start(&exercise).unwrap();
    assert!(matches!(
        machine.tick().unwrap(),
        BreathingTick::Completed { ref record } if record.duration_seconds == 1
    ));
}

#[test]
fn stop_discards_the_run() {
    let store = RecordStore::in_memory();
    let mut machine = BreathingSessionMachine::new(store.clone());
    machine.start(catalog().get("box").unwrap()).unwrap();
    for _ in 0..10 {
        machine.tick().unwrap();
    }
    machine.stop().unwrap();

    assert_eq!(machine.state(), BreathingState::Stopped);
    assert!(!machine.is_active());
    assert_eq!(machine.tick().unwrap(), BreathingTick::Ignored);
    assert!(sessions(&store).is_empty());
    assert!(machine.stop().is_err());
}

#[test]
fn invalid_exercises_are_rejected() {
    let mut exercise = catalog().get("box").unwrap().clone();
    exercise.phases[1].duration_seconds = 0;
    let mut machine = BreathingSessionMachine::new(RecordStore::in_memory());
    assert!(matches!(
        machine.start(&exercise),
        Err(SessionError::InvalidExercise { .. })
    ));
    assert_eq!(machine.state(), BreathingState::Idle);

    let mut no_cycles = catalog().get("box").unwrap().clone();
    no_cycles.cycles = 0;
    assert!(BreathingCatalog::new(vec![no_cycles]).is_err());

    let duplicate = catalog().get("box").unwrap().clone();
    assert!(BreathingCatalog::new(vec![duplicate.clone(), duplicate]).is_err());
}

#[test]
fn exercises_whose_length_overflows_are_rejected() {
    let mut endless = catalog().get("box").unwrap().clone();
    endless.cycles = u32::MAX;
    assert!(matches!(
        endless.validate(),
        Err(SessionError::InvalidExercise { ref reason, .. }) if reason.contains("overflows")
    ));
    assert_eq!(endless.total_seconds(), u32::MAX);

    let mut machine = BreathingSessionMachine::new(RecordStore::in_memory());
    assert!(machine.start(&endless).is_err());
    assert_eq!(machine.state(), BreathingState::Idle);

    let mut long_phase = catalog().get("box").unwrap().clone();
    long_phase.cycles = 1;
    long_phase.phases[0].duration_seconds = u32::MAX;
    assert!(BreathingCatalog::new(vec![long_phase]).is_err());
}

#[test]
fn failed_save_on_last_tick_can_be_retried() {
    let (backing, store) = common::flaky();
    let mut machine = BreathingSessionMachine::new(store.clone());
    machine.start(catalog().get("coherent").unwrap()).unwrap();
    for _ in 1..60 {
        machine.tick().unwrap();
    }

    backing.set_failing(true);
    assert!(matches!(machine.tick(), Err(SessionError::Storage(_))));
    assert!(machine.is_active());

    backing.set_failing(false);
    assert!(matches!(machine.tick().unwrap(), BreathingTick::Completed { .. }));
    assert_eq!(sessions(&store).len(), 1);
    assert_eq!(sessions(&store)[0].duration_seconds, 60);
}

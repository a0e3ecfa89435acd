mod common;

use calma_core::keys;
use calma_core::models::mindfulness::{MindfulnessSessionRecord, SessionKind};
use calma_sessions::Tickable;
use calma_sessions::error::SessionError;
use calma_sessions::timed::{TimedSessionController, TimedState, TimedTick};
use calma_storage::records::RecordStore;

fn sessions(store: &RecordStore) -> Vec<MindfulnessSessionRecord> {
    store.load(keys::MINDFULNESS_SESSIONS).unwrap()
}

#[test]
fn countdown_completes_and_records_full_duration() {
    let store = RecordStore::in_memory();
    let mut controller = TimedSessionController::new(store.clone());
    controller
        .start(SessionKind::Meditation, "Atenção plena", 3)
        .unwrap();
    assert_eq!(controller.state(), TimedState::Running);

    assert_eq!(controller.tick().unwrap(), TimedTick::Counting { remaining: 2 });
    assert_eq!(controller.tick().unwrap(), TimedTick::Counting { remaining: 1 });
    let TimedTick::Completed { record } = controller.tick().unwrap() else {
        panic!("expected completion");
    };

    assert_eq!(controller.state(), TimedState::Completed);
    assert_eq!(record.duration_seconds, 3);
    assert_eq!(record.elapsed_seconds, Some(3));
    assert!(record.completed);
    assert_eq!(record.title, "Atenção plena");
    assert_eq!(record.description, "Meditação de 3 segundos");
    assert_eq!(sessions(&store), vec![record]);
    assert_eq!(controller.tick().unwrap(), TimedTick::Ignored);
}

#[test]
fn paused_sessions_ignore_ticks() {
    let mut controller = TimedSessionController::new(RecordStore::in_memory());
    controller.start(SessionKind::Sound, "Chuva", 10).unwrap();
    controller.tick().unwrap();
    controller.pause().unwrap();

    for _ in 0..20 {
        assert_eq!(controller.tick().unwrap(), TimedTick::Ignored);
    }
    assert_eq!(controller.remaining_seconds(), 9);
    assert!(controller.is_active());

    controller.resume().unwrap();
    assert_eq!(controller.tick().unwrap(), TimedTick::Counting { remaining: 8 });
}

#[test]
fn pause_and_resume_only_from_matching_state() {
    let mut controller = TimedSessionController::new(RecordStore::in_memory());
    assert!(controller.pause().is_err());
    controller.start(SessionKind::Meditation, "Manhã", 60).unwrap();
    assert!(matches!(
        controller.resume(),
        Err(SessionError::InvalidTransition { operation: "resume", .. })
    ));
    controller.pause().unwrap();
    assert!(controller.pause().is_err());
}

#[test]
fn stop_mid_countdown_records_incomplete_session() {
    let store = RecordStore::in_memory();
    let mut controller = TimedSessionController::new(store.clone());
    controller.start(SessionKind::Meditation, "Noite", 600).unwrap();
    for _ in 0..120 {
        controller.tick().unwrap();
    }

    let record = controller.stop().unwrap();
    assert_eq!(controller.state(), TimedState::Stopped);
    assert!(!controller.is_active());
    assert!(!record.completed);
    assert_eq!(record.duration_seconds, 600);
    assert_eq!(record.elapsed_seconds, Some(120));

    let saved = sessions(&store);
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0], record);
    assert_eq!(controller.tick().unwrap(), TimedTick::Ignored);
    assert!(controller.stop().is_err());
}

#[test]
fn stop_while_paused_is_allowed() {
    let store = RecordStore::in_memory();
    let mut controller = TimedSessionController::new(store.clone());
    controller.start(SessionKind::Sound, "Ondas", 30).unwrap();
    controller.pause().unwrap();
    let record = controller.stop().unwrap();
    assert_eq!(record.elapsed_seconds, Some(0));
    assert_eq!(sessions(&store).len(), 1);
}

#[test]
fn start_validates_request() {
    let mut controller = TimedSessionController::new(RecordStore::in_memory());
    assert!(matches!(
        controller.start(SessionKind::Meditation, "Zero", 0),
        Err(SessionError::InvalidDuration)
    ));
    assert!(matches!(
        controller.start(SessionKind::Breathing, "4-7-8", 76),
        Err(SessionError::UnsupportedKind(SessionKind::Breathing))
    ));
    assert_eq!(controller.state(), TimedState::Idle);

    controller.start(SessionKind::Meditation, "Ok", 5).unwrap();
    assert!(controller.start(SessionKind::Meditation, "Again", 5).is_err());
}

#[test]
fn failed_stop_keeps_session_running() {
    let (backing, store) = common::flaky();
    let mut controller = TimedSessionController::new(store.clone());
    controller.start(SessionKind::Meditation, "Tarde", 60).unwrap();
    controller.tick().unwrap();

    backing.set_failing(true);
    assert!(matches!(controller.stop(), Err(SessionError::Storage(_))));
    assert_eq!(controller.state(), TimedState::Running);
    assert_eq!(controller.remaining_seconds(), 59);

    backing.set_failing(false);
    controller.stop().unwrap();
    assert_eq!(sessions(&store).len(), 1);
}

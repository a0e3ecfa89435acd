use std::sync::Arc;
use std::time::Duration;

use calma_app::config::CalmaConfig;
use calma_app::context::AppContext;
use calma_app::ticker::Ticker;
use calma_core::models::mindfulness::SessionKind;
use calma_sessions::breathing::{BreathingState, BreathingTick};
use calma_sessions::timed::{TimedState, TimedTick};
use calma_storage::records::RecordStore;
use tokio::sync::{Mutex, mpsc};

fn context() -> AppContext {
    AppContext::with_store(CalmaConfig::new("/unused"), RecordStore::in_memory()).unwrap()
}

#[tokio::test(start_paused = true)]
async fn ticker_runs_timed_session_to_completion() {
    let context = context();
    let mut controller = context.timed_controller();
    controller
        .start(SessionKind::Meditation, "Respiro curto", 3)
        .unwrap();
    let controller = Arc::new(Mutex::new(controller));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let ticker = Ticker::spawn(controller.clone(), Duration::from_secs(1), move |event| {
        let _ = tx.send(event);
    });

    tokio::time::sleep(Duration::from_secs(10)).await;

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event.unwrap());
    }
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], TimedTick::Counting { remaining: 2 });
    assert!(matches!(events[2], TimedTick::Completed { .. }));
    assert_eq!(controller.lock().await.state(), TimedState::Completed);
    assert!(ticker.is_finished());
    assert_eq!(context.mindfulness_stats().unwrap().completed_sessions, 1);
}

#[tokio::test(start_paused = true)]
async fn ticker_completes_breathing_exercise() {
    let context = context();
    let machine = Arc::new(Mutex::new(context.breathing("4-7-8").unwrap()));

    let (tx, mut rx) = mpsc::unbounded_channel();
    let _ticker = Ticker::spawn(machine.clone(), Duration::from_secs(1), move |event| {
        let _ = tx.send(event);
    });

    tokio::time::sleep(Duration::from_secs(90)).await;

    let mut ticks = 0;
    let mut completions = 0;
    while let Ok(event) = rx.try_recv() {
        ticks += 1;
        if matches!(event.unwrap(), BreathingTick::Completed { .. }) {
            completions += 1;
        }
    }
    assert_eq!(ticks, 76);
    assert_eq!(completions, 1);
    assert_eq!(machine.lock().await.state(), BreathingState::Completed);
}

#[tokio::test(start_paused = true)]
async fn dropping_ticker_stops_mutation() {
    let context = context();
    let mut controller = context.timed_controller();
    controller.start(SessionKind::Sound, "Chuva", 60).unwrap();
    let controller = Arc::new(Mutex::new(controller));

    let ticker = Ticker::spawn(controller.clone(), Duration::from_secs(1), |_| {});
    tokio::time::sleep(Duration::from_millis(2500)).await;
    drop(ticker);
    tokio::time::sleep(Duration::from_secs(30)).await;

    let guard = controller.lock().await;
    assert_eq!(guard.remaining_seconds(), 58);
    assert_eq!(guard.state(), TimedState::Running);
}

#[tokio::test(start_paused = true)]
async fn paused_session_keeps_ticker_alive_without_counting() {
    let context = context();
    let mut controller = context.timed_controller();
    controller.start(SessionKind::Meditation, "Pausa", 5).unwrap();
    controller.pause().unwrap();
    let controller = Arc::new(Mutex::new(controller));

    let mut ticker = Ticker::spawn(controller.clone(), Duration::from_secs(1), |_| {});
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert!(!ticker.is_finished());
    assert_eq!(controller.lock().await.remaining_seconds(), 5);

    controller.lock().await.resume().unwrap();
    tokio::time::sleep(Duration::from_secs(10)).await;
    assert_eq!(controller.lock().await.state(), TimedState::Completed);
    assert!(ticker.is_finished());
    ticker.cancel();
}

#[tokio::test(start_paused = true)]
async fn context_ticker_uses_configured_interval() {
    let mut config = CalmaConfig::new("/unused");
    config.tick_interval_ms = 10;
    let context = AppContext::with_store(config, RecordStore::in_memory()).unwrap();

    let mut controller = context.timed_controller();
    controller.start(SessionKind::Sound, "Rápido", 3).unwrap();
    let controller = Arc::new(Mutex::new(controller));

    let ticker = context.ticker(controller.clone(), |_| {});
    tokio::time::sleep(Duration::from_millis(25)).await;
    assert_eq!(controller.lock().await.remaining_seconds(), 1);

    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(controller.lock().await.state(), TimedState::Completed);
    assert!(ticker.is_finished());
}

use std::sync::Arc;

use calma_instruments::registry::ScaleRegistry;
use calma_sessions::assessment::AssessmentSession;
use calma_sessions::breathing::BreathingSessionMachine;
use calma_sessions::error::SessionError;
use calma_sessions::exercises::BreathingCatalog;
use calma_sessions::history;
use calma_sessions::stats::MindfulnessStats;
use calma_sessions::timed::TimedSessionController;
use calma_sessions::Tickable;
use calma_storage::records::RecordStore;
use calma_storage::store::FileStore;
use tokio::sync::Mutex;

use crate::config::CalmaConfig;
use crate::ticker::Ticker;

/// Process-lifetime state shared by every view.
///
/// Built once at startup and passed by reference. Holds the validated
/// catalogs and the record store; sessions are created from it on demand.
#[derive(Debug, Clone)]
pub struct AppContext {
    pub config: CalmaConfig,
    pub scales: ScaleRegistry,
    pub exercises: BreathingCatalog,
    pub store: RecordStore,
}

impl AppContext {
    /// Context backed by files under `config.data_dir`.
    pub fn new(config: CalmaConfig) -> eyre::Result<Self> {
        std::fs::create_dir_all(&config.data_dir).map_err(|e| {
            eyre::eyre!(
                "failed to create data directory {}: {e}",
                config.data_dir.display()
            )
        })?;
        let store = RecordStore::new(Arc::new(FileStore::new(config.data_dir.clone())));
        let context = Self::with_store(config, store)?;
        tracing::info!(data_dir = %context.config.data_dir.display(), "context ready");
        Ok(context)
    }

    pub fn with_store(config: CalmaConfig, store: RecordStore) -> eyre::Result<Self> {
        Ok(Self {
            config,
            scales: ScaleRegistry::builtin()?,
            exercises: BreathingCatalog::builtin()?,
            store,
        })
    }

    pub fn assessment(&self, scale_id: &str) -> Result<AssessmentSession, SessionError> {
        let mut session = AssessmentSession::new(self.store.clone());
        session.start(&self.scales, scale_id)?;
        Ok(session)
    }

    pub fn breathing(&self, exercise_id: &str) -> Result<BreathingSessionMachine, SessionError> {
        let exercise = self.exercises.get(exercise_id)?;
        let mut machine = BreathingSessionMachine::new(self.store.clone());
        machine.start(exercise)?;
        Ok(machine)
    }

    pub fn timed_controller(&self) -> TimedSessionController {
        TimedSessionController::new(self.store.clone())
    }

    /// Drive `controller` at the configured tick interval.
    pub fn ticker<T, F>(&self, controller: Arc<Mutex<T>>, on_tick: F) -> Ticker
    where
        T: Tickable + 'static,
        F: FnMut(Result<T::Event, SessionError>) + Send + 'static,
    {
        Ticker::spawn(controller, self.config.tick_interval(), on_tick)
    }

    /// Progress summary as of now in the system time zone.
    pub fn mindfulness_stats(&self) -> Result<MindfulnessStats, SessionError> {
        let records = history::session_history(&self.store)?;
        let now = jiff::Zoned::now();
        Ok(MindfulnessStats::from_records(
            &records,
            now.date(),
            now.time_zone(),
        ))
    }
}

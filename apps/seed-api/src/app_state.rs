use std::sync::Arc;

use crate::{evolution::EvolutionStore, process::ProcessSampler, random::RandomSource};

#[derive(Clone)]
pub(crate) struct AppState {
    evolution: Arc<EvolutionStore>,
    rng: Arc<dyn RandomSource>,
    process: Arc<ProcessSampler>,
    dev_mode: bool,
}

impl AppState {
    pub fn builder(rng: Arc<dyn RandomSource>) -> AppStateBuilder {
        AppStateBuilder {
            rng,
            dev_mode: false,
        }
    }

    pub fn evolution(&self) -> &EvolutionStore {
        &self.evolution
    }

    pub fn rng(&self) -> &dyn RandomSource {
        self.rng.as_ref()
    }

    pub fn process(&self) -> &ProcessSampler {
        &self.process
    }

    /// Whole seconds since startup, for the formatted uptime fields.
    pub fn uptime_secs(&self) -> u64 {
        self.process.uptime_secs() as u64
    }

    pub fn dev_mode(&self) -> bool {
        self.dev_mode
    }
}

pub(crate) struct AppStateBuilder {
    rng: Arc<dyn RandomSource>,
    dev_mode: bool,
}

impl AppStateBuilder {
    pub fn with_dev_mode(mut self, dev_mode: bool) -> Self {
        self.dev_mode = dev_mode;
        self
    }

    pub fn build(self) -> AppState {
        AppState {
            evolution: Arc::new(EvolutionStore::new(chrono::Utc::now())),
            rng: self.rng,
            process: Arc::new(ProcessSampler::new()),
            dev_mode: self.dev_mode,
        }
    }
}

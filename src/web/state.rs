use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::clock::{Clock, SystemClock};
use crate::geometry::GeoPoint;
use crate::predict::{predict_passes, PassRecord};

use super::config::{Config, ConfigError};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub station: Option<GeoPoint>,
    pub clock: Arc<dyn Clock>,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    pub fn with_clock(config: Config, clock: Arc<dyn Clock>) -> Result<Self, ConfigError> {
        let station = config.station()?;
        let rng = match config.predict.seed {
            Some(seed) => {
                log::info!("Using fixed prediction seed {}", seed);
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            config: Arc::new(config),
            station,
            clock,
            rng: Arc::new(Mutex::new(rng)),
        })
    }

    /// Runs the predictor against the shared random source.
    pub fn predict(
        &self,
        observer: Option<&GeoPoint>,
        reference_time: DateTime<Utc>,
        count: usize,
    ) -> Vec<PassRecord> {
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        predict_passes(observer, reference_time, count, &mut *rng)
    }
}

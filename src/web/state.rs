use std::sync::Arc;

use crate::predict::{Predictor, Sgp4Propagator};

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub predictor: Arc<Predictor<Sgp4Propagator>>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let predictor = Predictor::new(Sgp4Propagator, config.policy.clone());
        Self {
            config: Arc::new(config),
            predictor: Arc::new(predictor),
        }
    }
}

use std::sync::Arc;

use aerosearch_engine::FlightAggregator;

#[derive(Clone)]
pub struct AppState {
    pub aggregator: Arc<FlightAggregator>,
}

impl AppState {
    pub fn new(aggregator: FlightAggregator) -> Self {
        Self {
            aggregator: Arc::new(aggregator),
        }
    }
}

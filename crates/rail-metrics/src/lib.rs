mod metrics;


pub use metrics::{MetricsError, RailMetrics};

pub mod config;
pub mod error;
pub mod report;
pub mod survey;


pub use config::{EdgeParams, RailParams, SurveyConfig};
pub use error::SurveyError;
pub use report::{ChartBounds, Edge, EdgeReport, RailReport, SurveyReport};
pub use survey::{run_survey, run_configured_survey};

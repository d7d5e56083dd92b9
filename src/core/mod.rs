// Core algorithm exports
pub mod amount;
pub mod analysis;
pub mod matcher;
pub mod overlap;
pub mod reasons;
pub mod scoring;
pub mod timeline;

pub use amount::extract_max_amount;
pub use analysis::generate_client_analysis;
pub use matcher::Matcher;
pub use overlap::{infer_population, overlap, Overlap};
pub use reasons::generate_match_reasons;
pub use scoring::calculate_match_score;
pub use timeline::{determine_status, generate_action_steps, generate_timeline};

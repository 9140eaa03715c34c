pub mod error;
pub mod ids;
pub mod match_record;
pub mod outcome;
pub mod projection;

pub use error::CoreError;
pub use ids::{MatchId, PlayerId};
pub use match_record::{Match, Team};
pub use outcome::Outcome;
pub use projection::{PlayerMatchRecord, project_match};

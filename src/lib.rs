pub mod cleaning;
pub mod elo;
pub mod features;
pub mod pipeline;
pub mod player_stats;
pub mod raw;
pub mod schema;
pub mod synthetic;

pub mod candidate;
pub mod improvement;
pub mod metadata;
pub mod recommendations;
pub mod redflag;
pub mod response;
pub mod scores;
pub mod strength;

pub mod github;
pub mod job;
pub mod resume;
pub mod score;

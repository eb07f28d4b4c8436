pub mod constant;
pub mod jobs;
pub mod languages;
pub mod params;
pub mod queue;

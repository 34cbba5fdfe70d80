pub mod outcome;
pub mod profile;
pub mod rate;

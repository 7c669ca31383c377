pub mod levels;
pub mod query;
pub mod split;

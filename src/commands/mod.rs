pub mod extract;
pub mod merge;
pub mod schema;
pub mod split;

pub mod discovery;
pub mod recommendations;
pub mod title_search;

pub use recommendations::recommend;

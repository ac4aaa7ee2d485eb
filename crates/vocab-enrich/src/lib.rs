pub mod collocation;
pub mod orchestrator;
pub mod relations;

pub use collocation::{PosClass, find_collocations};
pub use orchestrator::Enricher;
pub use relations::{find_synonyms, verify_candidates};

#[cfg(test)]
mod tests;

pub mod normalizer;
pub mod prompts;
pub mod providers;

pub use normalizer::normalize;
pub use prompts::{build_recommendation_prompt, build_search_prompt};

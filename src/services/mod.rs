pub mod normalizer;
pub mod ordering;
pub mod recommend;
pub mod search;

pub use ordering::ListOrderingManager;
pub use recommend::RecommendationEngine;
pub use search::SearchEngine;

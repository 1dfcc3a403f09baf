pub mod engine;
pub mod matcher;
pub mod scanner;
pub(crate) mod walker;

pub use engine::search;
pub use matcher::PatternMatcher;
pub use scanner::{LineScanner, MAX_LINE_BYTES};

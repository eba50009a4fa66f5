//! Mock implementations for testing

pub mod mock_extractor;

#[allow(unused_imports)]
pub use mock_extractor::{MockBehavior, MockExtractor};

//! ContentDirectory service operations

pub mod browse;

pub use browse::{BrowseFlag, BrowseOperation, BrowseRequest, BrowseResponse};

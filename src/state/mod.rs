//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitState`: lifecycle of one address (in progress, succeeded, failed)
//! - `VisitedSet`: the set of addresses one coordinator has claimed, with an
//!   atomic test-and-set

mod visit_state;
mod visited;

// Re-export main types
pub use visit_state::VisitState;
pub use visited::VisitedSet;

pub mod stats;
pub mod failure;
pub mod verdict;
pub mod outcome;

pub use stats::*;
pub use failure::*;
pub use verdict::*;
pub use outcome::*;

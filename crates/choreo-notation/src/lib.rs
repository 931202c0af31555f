//! Text renderings of a beat.
//!
//! - shorthand: compact, deterministic machine notation
//! - plain English: what the body and the sounds are doing
//! - analysis: stability label, driver and momentum bucket

pub mod analysis;
pub mod english;
pub mod generator;
pub mod labels;
pub mod shorthand;

pub use analysis::analysis_summary;
pub use english::plain_english;
pub use generator::{Notation, NotationGenerator};
pub use labels::{MomentumBucket, StabilityLabel};
pub use shorthand::shorthand;

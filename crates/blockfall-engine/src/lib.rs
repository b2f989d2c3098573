pub use self::{core::*, engine::*, high_score::*};

pub mod core;
pub mod engine;
mod high_score;

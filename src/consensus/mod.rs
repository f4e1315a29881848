//! Conflict detection, weighted consensus and technical validation.

pub mod conflict;
pub mod engine;
pub mod resolver;
pub mod validator;
pub mod weights;

pub use conflict::{group_conflicts, ConflictPartition};
pub use engine::{ConsensusEngine, CycleOutput};
pub use resolver::{promote_winner, resolve};
pub use validator::validate;
pub use weights::WeightTable;

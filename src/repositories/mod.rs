pub mod workout_repo;
pub mod workout_store;

pub use workout_repo::WorkoutRepository;
pub use workout_store::{StoreResult, WorkoutStore};

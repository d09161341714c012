pub mod workout_coordinator;

pub use workout_coordinator::WorkoutCoordinator;

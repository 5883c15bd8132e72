use std::convert::Infallible;

use crate::model::{Exercise, Workout, WorkoutExercise};

/// Something that can hand out the three collections a report is computed
/// over. Implementations must return a consistent snapshot.
pub trait WorkoutSource {
    type Error;

    fn exercises(&self) -> Result<Vec<Exercise>, Self::Error>;
    fn workouts(&self) -> Result<Vec<Workout>, Self::Error>;
    fn workout_exercises(&self) -> Result<Vec<WorkoutExercise>, Self::Error>;
}

/// Collections held in memory
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub exercises: Vec<Exercise>,
    pub workouts: Vec<Workout>,
    pub workout_exercises: Vec<WorkoutExercise>,
}

impl WorkoutSource for Snapshot {
    type Error = Infallible;

    fn exercises(&self) -> Result<Vec<Exercise>, Self::Error> {
        Ok(self.exercises.clone())
    }

    fn workouts(&self) -> Result<Vec<Workout>, Self::Error> {
        Ok(self.workouts.clone())
    }

    fn workout_exercises(&self) -> Result<Vec<WorkoutExercise>, Self::Error> {
        Ok(self.workout_exercises.clone())
    }
}

/// Reads straight from the database. Callers wanting a consistent view should
/// pass a transaction, which derefs to a connection
#[cfg(feature = "backend")]
impl WorkoutSource for rusqlite::Connection {
    type Error = rusqlite::Error;

    fn exercises(&self) -> Result<Vec<Exercise>, Self::Error> {
        Exercise::fetch_all(self)
    }

    fn workouts(&self) -> Result<Vec<Workout>, Self::Error> {
        Workout::fetch_all(self)
    }

    fn workout_exercises(&self) -> Result<Vec<WorkoutExercise>, Self::Error> {
        WorkoutExercise::fetch_all(self)
    }
}

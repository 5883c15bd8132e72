use const_format::concatcp;
pub mod error;
pub mod payloads;
pub mod response_errors;

pub const API_BASE_PATH: &str = "/api/";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Object {
    Index,
    Health,
    Exercise,
    ExerciseId,
    Workout,
    WorkoutId,
    WorkoutExercise,
    WorkoutExerciseId,
    ReportSummary,
    Categories,
    MuscleGroups,
    User,
    UserId,
}

impl Object {
    pub const fn path(&self) -> &str {
        use Object::*;
        match self {
            Index => "/",
            Health => concatcp!(API_BASE_PATH, "health"),
            Exercise => concatcp!(API_BASE_PATH, "exercises"),
            ExerciseId => concatcp!(API_BASE_PATH, "exercises/:id"),
            Workout => concatcp!(API_BASE_PATH, "workouts"),
            WorkoutId => concatcp!(API_BASE_PATH, "workouts/:id"),
            WorkoutExercise => concatcp!(API_BASE_PATH, "workout-exercises"),
            WorkoutExerciseId => concatcp!(API_BASE_PATH, "workout-exercises/:id"),
            ReportSummary => concatcp!(API_BASE_PATH, "reports/summary"),
            Categories => concatcp!(API_BASE_PATH, "categories"),
            MuscleGroups => concatcp!(API_BASE_PATH, "muscle-groups"),
            User => concatcp!(API_BASE_PATH, "users"),
            UserId => concatcp!(API_BASE_PATH, "users/:id"),
        }
    }

    /// Path with the `:id` segment filled in
    pub fn id_path(&self, id: i64) -> String {
        self.path().replace(":id", &id.to_string())
    }
}

//! Demo data for trying the service out locally

use chrono::{Days, NaiveDate};
use exemplar::Model;
use rusqlite::Connection;
use shared::{
    api::error::{Nothing, ServerError},
    model::{Category, Exercise, NewExercise, NewUser, NewWorkout, NewWorkoutExercise, User},
};
use tracing::{info, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub exercises: usize,
    pub workouts: usize,
    pub workout_exercises: usize,
}

const USERS: &[(&str, &str)] = &[
    ("john_doe", "john@example.com"),
    ("jane_smith", "jane@example.com"),
    ("mike_wilson", "mike@example.com"),
];

const EXERCISES: &[(&str, Category, Option<&str>, &str)] = &[
    ("Bench Press", Category::Strength, Some("chest"), "Chest compound exercise"),
    ("Squat", Category::Strength, Some("legs"), "Leg compound exercise"),
    ("Deadlift", Category::Strength, Some("back"), "Back compound exercise"),
    ("Pull-ups", Category::Strength, Some("back"), "Bodyweight back exercise"),
    ("Shoulder Press", Category::Strength, Some("shoulders"), "Shoulder compound exercise"),
    ("Bicep Curls", Category::Strength, Some("arms"), "Isolation arm exercise"),
    ("Tricep Dips", Category::Strength, Some("arms"), "Tricep bodyweight exercise"),
    ("Running", Category::Cardio, None, "Cardio exercise"),
    ("Cycling", Category::Cardio, None, "Low impact cardio"),
    ("Rowing", Category::Cardio, None, "Full body cardio"),
    ("Leg Press", Category::Strength, Some("legs"), "Quad focused exercise"),
    ("Lat Pulldown", Category::Strength, Some("back"), "Back isolation exercise"),
    ("Dumbbell Flyes", Category::Strength, Some("chest"), "Chest isolation exercise"),
    ("Lunges", Category::Strength, Some("legs"), "Unilateral leg exercise"),
    ("Plank", Category::Flexibility, Some("core"), "Core stability exercise"),
];

/// (user index, days before today, duration in minutes, notes)
const WORKOUTS: &[(usize, u64, i64, &str)] = &[
    (0, 7, 60, "Chest and triceps day"),
    (0, 5, 45, "Leg day"),
    (0, 3, 50, "Back and biceps"),
    (0, 1, 40, "Cardio session"),
    (1, 6, 55, "Full body workout"),
    (1, 2, 35, "Light cardio"),
    (0, 10, 65, "Heavy lifting day"),
    (0, 8, 50, "Upper body focus"),
    (1, 9, 45, "Lower body workout"),
    (0, 0, 55, "Shoulders and core"),
];

struct Log {
    workout: usize,
    exercise: usize,
    sets: i64,
    reps: Option<i64>,
    weight_lbs: Option<f64>,
    distance_miles: Option<f64>,
    duration_seconds: Option<i64>,
}

const fn lift(workout: usize, exercise: usize, sets: i64, reps: i64, weight_lbs: Option<f64>) -> Log {
    Log {
        workout,
        exercise,
        sets,
        reps: Some(reps),
        weight_lbs,
        distance_miles: None,
        duration_seconds: None,
    }
}

const fn timed(workout: usize, exercise: usize, sets: i64, distance_miles: Option<f64>, duration_seconds: i64) -> Log {
    Log {
        workout,
        exercise,
        sets,
        reps: None,
        weight_lbs: None,
        distance_miles,
        duration_seconds: Some(duration_seconds),
    }
}

const LOGS: &[Log] = &[
    lift(0, 0, 4, 8, Some(185.0)),
    lift(0, 12, 3, 12, Some(35.0)),
    lift(0, 6, 3, 15, None),
    lift(1, 1, 4, 10, Some(225.0)),
    lift(1, 10, 3, 12, Some(300.0)),
    lift(1, 13, 3, 10, Some(40.0)),
    lift(2, 2, 4, 6, Some(275.0)),
    lift(2, 3, 3, 10, None),
    lift(2, 11, 3, 12, Some(120.0)),
    lift(2, 5, 3, 12, Some(35.0)),
    timed(3, 7, 1, Some(3.5), 1800),
    timed(3, 9, 1, None, 600),
    lift(4, 1, 3, 12, Some(155.0)),
    lift(4, 0, 3, 10, Some(135.0)),
    lift(4, 3, 3, 8, None),
    timed(5, 8, 1, Some(8.0), 1500),
    lift(6, 2, 5, 5, Some(315.0)),
    lift(6, 1, 5, 5, Some(275.0)),
    lift(6, 0, 5, 5, Some(225.0)),
    lift(7, 4, 4, 8, Some(95.0)),
    lift(7, 11, 3, 12, Some(110.0)),
    lift(7, 5, 3, 15, Some(30.0)),
    lift(8, 1, 4, 8, Some(185.0)),
    lift(8, 13, 4, 12, Some(50.0)),
    lift(8, 10, 3, 15, Some(280.0)),
    lift(9, 4, 4, 10, Some(85.0)),
    timed(9, 14, 3, None, 60),
];

/// Inserts the demo data in a single transaction with workout dates relative
/// to `today`. Does nothing and returns `None` if there are already users or
/// exercises
#[instrument(skip(conn))]
pub fn seed_demo_data(
    conn: &mut Connection,
    today: NaiveDate,
) -> Result<Option<SeedSummary>, ServerError<Nothing>> {
    if !User::fetch_all(conn)?.is_empty() || !Exercise::fetch_all(conn)?.is_empty() {
        info!("Database already has data, skipping demo data");
        return Ok(None);
    }

    let tx = conn.transaction()?;

    let mut user_ids = Vec::with_capacity(USERS.len());
    for (username, email) in USERS {
        NewUser::new(*username, *email).insert(&tx)?;
        user_ids.push(tx.last_insert_rowid());
    }

    let mut exercise_ids = Vec::with_capacity(EXERCISES.len());
    for (name, category, muscle_group, description) in EXERCISES {
        let mut new_exercise = NewExercise::new(*name, *category).with_description(*description);
        if let Some(muscle_group) = muscle_group {
            new_exercise = new_exercise.with_muscle_group(*muscle_group);
        }
        new_exercise.insert(&tx)?;
        exercise_ids.push(tx.last_insert_rowid());
    }

    let mut workout_ids = Vec::with_capacity(WORKOUTS.len());
    for (user, days_ago, duration_minutes, notes) in WORKOUTS {
        let workout_date = today
            .checked_sub_days(Days::new(*days_ago))
            .ok_or_else(|| shared::other_error!("{today} - {days_ago} days is out of range"))?;
        NewWorkout {
            user_id: user_ids[*user],
            workout_date,
            duration_minutes: Some(*duration_minutes),
            notes: Some((*notes).to_owned()),
        }
        .insert(&tx)?;
        workout_ids.push(tx.last_insert_rowid());
    }

    for log in LOGS {
        NewWorkoutExercise {
            workout_id: workout_ids[log.workout],
            exercise_id: exercise_ids[log.exercise],
            sets: Some(log.sets),
            reps: log.reps,
            weight_lbs: log.weight_lbs,
            distance_miles: log.distance_miles,
            duration_seconds: log.duration_seconds,
        }
        .insert(&tx)?;
    }

    tx.commit()?;

    let summary = SeedSummary {
        users: USERS.len(),
        exercises: EXERCISES.len(),
        workouts: WORKOUTS.len(),
        workout_exercises: LOGS.len(),
    };
    info!(?summary, "Seeded demo data");

    Ok(Some(summary))
}

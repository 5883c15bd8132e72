//! Workout report aggregation.
//!
//! [`compute_report`] is a pure function over a snapshot of exercises,
//! workouts and exercise logs. Workouts are filtered by date, logs by the
//! surviving workouts and then by exercise category and weight bounds. The
//! summary is computed over the surviving logs, while `totalWorkouts` only
//! depends on the date filter.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{
    Category, Exercise, Workout, WorkoutDetail, WorkoutExercise, WorkoutExerciseDetail,
};

mod source;
pub use source::*;

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportFilter {
    /// Inclusive
    pub start_date: Option<NaiveDate>,
    /// Inclusive
    pub end_date: Option<NaiveDate>,
    /// `None` means every category
    pub category: Option<Category>,
    /// Inclusive. Logs without a weight never satisfy a weight bound
    pub min_weight: Option<f64>,
    /// Inclusive. Logs without a weight never satisfy a weight bound
    pub max_weight: Option<f64>,
}

impl ReportFilter {
    pub fn includes_date(&self, date: NaiveDate) -> bool {
        self.start_date.map_or(true, |start| date >= start)
            && self.end_date.map_or(true, |end| date <= end)
    }

    pub fn includes_weight(&self, weight_lbs: Option<f64>) -> bool {
        if self.min_weight.is_none() && self.max_weight.is_none() {
            return true;
        }
        let Some(weight) = weight_lbs else {
            return false;
        };
        self.min_weight.map_or(true, |min| weight >= min)
            && self.max_weight.map_or(true, |max| weight <= max)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseBreakdown {
    pub count: u64,
    pub total_sets: i64,
    pub total_reps: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_workouts: u64,
    pub total_sets: i64,
    pub total_reps: i64,
    /// Mean weight of the logs that have one, with exactly one fractional digit
    pub avg_weight: String,
    pub exercise_breakdown: BTreeMap<String, ExerciseBreakdown>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub summary: Summary,
    /// Most recent first
    pub workouts: Vec<WorkoutDetail>,
}

impl Report {
    /// Loads the collections from `source` and aggregates them
    pub fn from_source<S: WorkoutSource + ?Sized>(
        filter: &ReportFilter,
        source: &S,
    ) -> Result<Report, S::Error> {
        let exercises = source.exercises()?;
        let workouts = source.workouts()?;
        let logs = source.workout_exercises()?;

        Ok(compute_report(filter, &exercises, &workouts, &logs))
    }
}

pub fn compute_report(
    filter: &ReportFilter,
    exercises: &[Exercise],
    workouts: &[Workout],
    logs: &[WorkoutExercise],
) -> Report {
    let exercises_by_id: HashMap<i64, &Exercise> =
        exercises.iter().map(|e| (e.exercise_id, e)).collect();

    let workouts: Vec<&Workout> = workouts
        .iter()
        .filter(|w| filter.includes_date(w.workout_date))
        .collect();
    let workout_ids: HashSet<i64> = workouts.iter().map(|w| w.workout_id).collect();

    let category_exercise_ids: Option<HashSet<i64>> = filter.category.map(|category| {
        exercises
            .iter()
            .filter(|e| e.category == category)
            .map(|e| e.exercise_id)
            .collect()
    });

    let logs: Vec<&WorkoutExercise> = logs
        .iter()
        .filter(|log| workout_ids.contains(&log.workout_id))
        .filter(|log| {
            category_exercise_ids
                .as_ref()
                .map_or(true, |ids| ids.contains(&log.exercise_id))
        })
        .filter(|log| filter.includes_weight(log.weight_lbs))
        .collect();

    let summary = summarize(workouts.len(), &logs, &exercises_by_id);

    let mut logs_by_workout: HashMap<i64, Vec<&WorkoutExercise>> = HashMap::new();
    for log in &logs {
        logs_by_workout.entry(log.workout_id).or_default().push(log);
    }

    let mut detailed: Vec<WorkoutDetail> = workouts
        .into_iter()
        .map(|workout| WorkoutDetail {
            workout: workout.clone(),
            exercises: logs_by_workout
                .get(&workout.workout_id)
                .map(|logs| {
                    logs.iter()
                        .map(|log| {
                            WorkoutExerciseDetail::new(
                                (*log).clone(),
                                exercises_by_id.get(&log.exercise_id).copied(),
                            )
                        })
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect();
    // Stable, so workouts on the same date keep their input order
    detailed.sort_by(|a, b| b.workout.workout_date.cmp(&a.workout.workout_date));

    Report {
        summary,
        workouts: detailed,
    }
}

fn summarize(
    total_workouts: usize,
    logs: &[&WorkoutExercise],
    exercises_by_id: &HashMap<i64, &Exercise>,
) -> Summary {
    let total_sets = logs
        .iter()
        .fold(0i64, |acc, log| acc.saturating_add(log.sets.unwrap_or(0)));
    let total_reps = logs
        .iter()
        .fold(0i64, |acc, log| acc.saturating_add(log.total_reps()));

    let weights: Vec<f64> = logs.iter().filter_map(|log| log.weight_lbs).collect();
    let avg_weight = if weights.is_empty() {
        0.0
    } else {
        weights.iter().sum::<f64>() / weights.len() as f64
    };

    // Logs whose exercise no longer exists still count towards the totals
    // above but can't be attributed to a name
    let mut exercise_breakdown: BTreeMap<String, ExerciseBreakdown> = BTreeMap::new();
    for log in logs {
        let Some(exercise) = exercises_by_id.get(&log.exercise_id) else {
            continue;
        };
        let entry = exercise_breakdown.entry(exercise.name.clone()).or_default();
        entry.count += 1;
        entry.total_sets = entry.total_sets.saturating_add(log.sets.unwrap_or(0));
        entry.total_reps = entry.total_reps.saturating_add(log.total_reps());
    }

    Summary {
        total_workouts: total_workouts as u64,
        total_sets,
        total_reps,
        avg_weight: format!("{avg_weight:.1}"),
        exercise_breakdown,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn exercise(id: i64, name: &str, category: Category) -> Exercise {
        Exercise {
            exercise_id: id,
            name: name.into(),
            category,
            muscle_group: None,
            description: None,
        }
    }

    fn workout(id: i64, workout_date: &str) -> Workout {
        Workout {
            workout_id: id,
            user_id: 1,
            workout_date: date(workout_date),
            duration_minutes: None,
            notes: None,
        }
    }

    fn log(
        id: i64,
        workout_id: i64,
        exercise_id: i64,
        sets: Option<i64>,
        reps: Option<i64>,
        weight_lbs: Option<f64>,
    ) -> WorkoutExercise {
        WorkoutExercise {
            log_id: id,
            workout_id,
            exercise_id,
            sets,
            reps,
            weight_lbs,
            distance_miles: None,
            duration_seconds: None,
        }
    }

    /// A single bench press session
    #[fixture]
    fn bench_press() -> Snapshot {
        Snapshot {
            exercises: vec![exercise(1, "Bench Press", Category::Strength)],
            workouts: vec![workout(1, "2025-10-28")],
            workout_exercises: vec![log(1, 1, 1, Some(4), Some(8), Some(185.0))],
        }
    }

    /// Several workouts across categories
    #[fixture]
    fn mixed() -> Snapshot {
        Snapshot {
            exercises: vec![
                exercise(1, "Bench Press", Category::Strength),
                exercise(2, "Squat", Category::Strength),
                exercise(3, "Running", Category::Cardio),
                exercise(4, "Pull-ups", Category::Strength),
            ],
            workouts: vec![
                workout(1, "2025-11-01"),
                workout(2, "2025-10-28"),
                workout(3, "2025-11-03"),
            ],
            workout_exercises: vec![
                log(1, 1, 1, Some(4), Some(8), Some(185.0)),
                log(2, 1, 2, Some(4), Some(10), Some(225.0)),
                log(3, 2, 3, Some(1), None, None),
                log(4, 2, 4, Some(3), Some(10), None),
                log(5, 3, 1, Some(5), Some(5), Some(225.0)),
                log(6, 3, 2, Some(3), Some(12), Some(155.0)),
            ],
        }
    }

    fn run_report(filter: &ReportFilter, snapshot: &Snapshot) -> Report {
        compute_report(
            filter,
            &snapshot.exercises,
            &snapshot.workouts,
            &snapshot.workout_exercises,
        )
    }

    fn dates(report: &Report) -> Vec<NaiveDate> {
        report.workouts.iter().map(|w| w.workout.workout_date).collect()
    }

    #[rstest]
    fn unfiltered_bench_press(bench_press: Snapshot) {
        let report = run_report(&ReportFilter::default(), &bench_press);

        assert_eq!(
            report.summary,
            Summary {
                total_workouts: 1,
                total_sets: 4,
                total_reps: 32,
                avg_weight: "185.0".into(),
                exercise_breakdown: BTreeMap::from([(
                    "Bench Press".to_string(),
                    ExerciseBreakdown {
                        count: 1,
                        total_sets: 4,
                        total_reps: 32
                    }
                )]),
            }
        );
        assert_eq!(report.workouts.len(), 1);
        assert_eq!(report.workouts[0].exercises[0].exercise_name.as_deref(), Some("Bench Press"));
        assert_eq!(report.workouts[0].exercises[0].exercise_category, Some(Category::Strength));
    }

    #[rstest]
    fn weight_filter_leaves_workout_count_alone(bench_press: Snapshot) {
        let filter = ReportFilter {
            min_weight: Some(200.0),
            ..Default::default()
        };
        let report = run_report(&filter, &bench_press);

        assert_eq!(report.summary.total_workouts, 1);
        assert_eq!(report.summary.total_sets, 0);
        assert_eq!(report.summary.total_reps, 0);
        assert_eq!(report.summary.avg_weight, "0.0");
        assert!(report.summary.exercise_breakdown.is_empty());
    }

    #[rstest]
    fn category_mismatch_keeps_workouts_without_exercises(bench_press: Snapshot) {
        let filter = ReportFilter {
            category: Some(Category::Cardio),
            ..Default::default()
        };
        let report = run_report(&filter, &bench_press);

        assert_eq!(report.summary.total_workouts, 1);
        assert_eq!(report.summary.total_sets, 0);
        assert_eq!(report.workouts.len(), 1);
        assert!(report.workouts[0].exercises.is_empty());
    }

    #[rstest]
    fn workouts_sorted_most_recent_first(mixed: Snapshot) {
        let report = run_report(&ReportFilter::default(), &mixed);
        assert_eq!(
            dates(&report),
            vec![date("2025-11-03"), date("2025-11-01"), date("2025-10-28")]
        );
    }

    #[test]
    fn same_day_workouts_keep_input_order() {
        let snapshot = Snapshot {
            exercises: vec![],
            workouts: vec![
                workout(1, "2025-10-01"),
                workout(2, "2025-10-05"),
                workout(3, "2025-10-01"),
                workout(4, "2025-10-05"),
            ],
            workout_exercises: vec![],
        };
        let report = run_report(&ReportFilter::default(), &snapshot);
        let ids: Vec<i64> = report.workouts.iter().map(|w| w.workout.workout_id).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[rstest]
    #[case::no_bounds(None, None, 3)]
    #[case::start_inclusive(Some("2025-11-01"), None, 2)]
    #[case::end_inclusive(None, Some("2025-11-01"), 2)]
    #[case::single_day(Some("2025-10-28"), Some("2025-10-28"), 1)]
    #[case::empty_range(Some("2025-11-04"), None, 0)]
    #[case::inverted_range(Some("2025-11-03"), Some("2025-10-28"), 0)]
    fn total_workouts_follows_the_date_range(
        mixed: Snapshot,
        #[case] start: Option<&str>,
        #[case] end: Option<&str>,
        #[case] expected: u64,
    ) {
        let date_only = ReportFilter {
            start_date: start.map(date),
            end_date: end.map(date),
            ..Default::default()
        };
        let with_log_filters = ReportFilter {
            category: Some(Category::Cardio),
            min_weight: Some(1000.0),
            ..date_only.clone()
        };

        assert_eq!(run_report(&date_only, &mixed).summary.total_workouts, expected);
        assert_eq!(run_report(&with_log_filters, &mixed).summary.total_workouts, expected);
        assert_eq!(run_report(&date_only, &mixed).workouts.len() as u64, expected);
    }

    #[rstest]
    fn weightless_logs_vanish_under_weight_bounds(mixed: Snapshot) {
        let unfiltered = run_report(&ReportFilter::default(), &mixed);
        assert_eq!(unfiltered.summary.exercise_breakdown["Running"].count, 1);
        assert_eq!(unfiltered.summary.exercise_breakdown["Pull-ups"].total_sets, 3);
        // Mean over the four weighted logs only
        assert_eq!(unfiltered.summary.avg_weight, "197.5");

        for filter in [
            ReportFilter {
                min_weight: Some(0.0),
                ..Default::default()
            },
            ReportFilter {
                max_weight: Some(10_000.0),
                ..Default::default()
            },
        ] {
            let report = run_report(&filter, &mixed);
            assert!(!report.summary.exercise_breakdown.contains_key("Running"));
            assert!(!report.summary.exercise_breakdown.contains_key("Pull-ups"));
            assert!(report
                .workouts
                .iter()
                .flat_map(|w| &w.exercises)
                .all(|e| e.log.weight_lbs.is_some()));
        }
    }

    #[test]
    fn huge_sets_and_reps_clamp_instead_of_overflowing() {
        let snapshot = Snapshot {
            exercises: vec![exercise(1, "Bench Press", Category::Strength)],
            workouts: vec![workout(1, "2025-11-01")],
            workout_exercises: vec![
                log(1, 1, 1, Some(4_000_000_000), Some(4_000_000_000), Some(185.0)),
                log(2, 1, 1, Some(i64::MAX), Some(2), None),
            ],
        };

        let report = run_report(&ReportFilter::default(), &snapshot);
        assert_eq!(report.summary.total_sets, i64::MAX);
        assert_eq!(report.summary.total_reps, i64::MAX);
        let bench = &report.summary.exercise_breakdown["Bench Press"];
        assert_eq!(bench.count, 2);
        assert_eq!(bench.total_sets, i64::MAX);
        assert_eq!(bench.total_reps, i64::MAX);
    }

    #[rstest]
    fn weight_bounds_are_inclusive_and_intersect(mixed: Snapshot) {
        let filter = ReportFilter {
            min_weight: Some(185.0),
            max_weight: Some(225.0),
            category: Some(Category::Strength),
            ..Default::default()
        };
        let report = run_report(&filter, &mixed);

        // Logs 1, 2 and 5
        assert_eq!(report.summary.total_sets, 4 + 4 + 5);
        assert_eq!(report.summary.total_reps, 32 + 40 + 25);
        assert_eq!(report.summary.avg_weight, "211.7");
        assert_eq!(report.summary.exercise_breakdown["Bench Press"].count, 2);
        assert_eq!(report.summary.exercise_breakdown["Squat"].count, 1);
    }

    #[test]
    fn missing_reps_contribute_zero_reps_but_keep_their_sets() {
        let snapshot = Snapshot {
            exercises: vec![exercise(1, "Plank", Category::Flexibility)],
            workouts: vec![workout(1, "2025-10-28")],
            workout_exercises: vec![log(1, 1, 1, Some(3), None, None)],
        };
        let report = run_report(&ReportFilter::default(), &snapshot);

        assert_eq!(report.summary.total_sets, 3);
        assert_eq!(report.summary.total_reps, 0);
        assert_eq!(
            report.summary.exercise_breakdown["Plank"],
            ExerciseBreakdown {
                count: 1,
                total_sets: 3,
                total_reps: 0
            }
        );
    }

    #[test]
    fn dangling_exercise_counts_in_totals_only() {
        let snapshot = Snapshot {
            exercises: vec![exercise(1, "Squat", Category::Strength)],
            workouts: vec![workout(1, "2025-10-28")],
            workout_exercises: vec![
                log(1, 1, 1, Some(3), Some(5), Some(200.0)),
                log(2, 1, 99, Some(2), Some(10), Some(100.0)),
            ],
        };
        let report = run_report(&ReportFilter::default(), &snapshot);

        assert_eq!(report.summary.total_sets, 5);
        assert_eq!(report.summary.total_reps, 35);
        assert_eq!(report.summary.avg_weight, "150.0");
        assert_eq!(report.summary.exercise_breakdown.len(), 1);
        let dangling = &report.workouts[0].exercises[1];
        assert_eq!(dangling.log.log_id, 2);
        assert_eq!(dangling.exercise_name, None);
        assert_eq!(dangling.exercise_category, None);

        // An unresolvable exercise never matches a category
        let strength = ReportFilter {
            category: Some(Category::Strength),
            ..Default::default()
        };
        assert_eq!(run_report(&strength, &snapshot).summary.total_sets, 3);
    }

    #[test]
    fn zero_weights_count_towards_the_average() {
        let snapshot = Snapshot {
            exercises: vec![exercise(1, "Dips", Category::Strength)],
            workouts: vec![workout(1, "2025-10-28")],
            workout_exercises: vec![
                log(1, 1, 1, Some(3), Some(10), Some(0.0)),
                log(2, 1, 1, Some(3), Some(10), Some(45.0)),
            ],
        };
        let report = run_report(&ReportFilter::default(), &snapshot);
        assert_eq!(report.summary.avg_weight, "22.5");
    }

    #[test]
    fn empty_inputs_produce_an_empty_report() {
        let report = compute_report(&ReportFilter::default(), &[], &[], &[]);
        assert_eq!(report.summary.total_workouts, 0);
        assert_eq!(report.summary.avg_weight, "0.0");
        assert!(report.summary.exercise_breakdown.is_empty());
        assert!(report.workouts.is_empty());
    }

    #[rstest]
    fn serialization_is_deterministic(mixed: Snapshot) {
        let filter = ReportFilter {
            start_date: Some(date("2025-10-30")),
            ..Default::default()
        };
        let first = serde_json::to_string(&run_report(&filter, &mixed)).unwrap();
        let second = serde_json::to_string(&run_report(&filter, &mixed)).unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    fn serializes_with_camel_case_summary(bench_press: Snapshot) {
        let json = serde_json::to_value(run_report(&ReportFilter::default(), &bench_press)).unwrap();

        assert_eq!(
            json["summary"],
            serde_json::json!({
                "totalWorkouts": 1,
                "totalSets": 4,
                "totalReps": 32,
                "avgWeight": "185.0",
                "exerciseBreakdown": {
                    "Bench Press": { "count": 1, "totalSets": 4, "totalReps": 32 }
                }
            })
        );
        assert_eq!(json["workouts"][0]["workout_date"], "2025-10-28");
        assert_eq!(json["workouts"][0]["exercises"][0]["exercise_name"], "Bench Press");
    }

    #[rstest]
    fn from_source_matches_compute_report(mixed: Snapshot) {
        let filter = ReportFilter {
            category: Some(Category::Strength),
            ..Default::default()
        };
        let from_source = Report::from_source(&filter, &mixed).unwrap();
        assert_eq!(from_source, run_report(&filter, &mixed));
    }
}

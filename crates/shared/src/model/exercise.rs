use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    crate::api::{error::ServerError, response_errors::ExerciseError},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
    tracing::instrument,
};

use super::{Category, ValidateModel};
use crate::api::error::ValidationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct Exercise {
    pub exercise_id: i64,
    pub name: String,
    pub category: Category,
    pub muscle_group: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("exercise"))]
pub struct NewExercise {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub muscle_group: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update. Absent fields are left alone, an explicit `null` clears
/// the nullable ones
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExerciseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub muscle_group: Option<Option<String>>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "::serde_with::rust::double_option"
    )]
    pub description: Option<Option<String>>,
}

impl NewExercise {
    pub fn new<N: Into<String>>(name: N, category: Category) -> Self {
        Self {
            name: name.into(),
            category,
            muscle_group: None,
            description: None,
        }
    }

    pub fn with_muscle_group<M: Into<String>>(mut self, muscle_group: M) -> Self {
        self.muscle_group = Some(muscle_group.into());
        self
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ValidateModel for NewExercise {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        if self.name.trim().is_empty() {
            errors.push("Exercise name is required");
        }
        errors.into_result()
    }
}

impl ValidateModel for ExerciseUpdate {
    fn validate(&self) -> Result<(), ValidationError> {
        let mut errors = ValidationError::default();
        if self.name.as_ref().is_some_and(|n| n.trim().is_empty()) {
            errors.push("Exercise name cannot be blank");
        }
        errors.into_result()
    }
}

impl Exercise {
    pub fn apply(&mut self, update: ExerciseUpdate) {
        let ExerciseUpdate {
            name,
            category,
            muscle_group,
            description,
        } = update;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(category) = category {
            self.category = category;
        }
        if let Some(muscle_group) = muscle_group {
            self.muscle_group = muscle_group;
        }
        if let Some(description) = description {
            self.description = description;
        }
    }
}

#[cfg(feature = "backend")]
impl Exercise {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                ExerciseIden::ExerciseId,
                ExerciseIden::Name,
                ExerciseIden::Category,
                ExerciseIden::MuscleGroup,
                ExerciseIden::Description,
            ])
            .from(ExerciseIden::Table)
            .to_owned()
    }

    pub fn fetch_all(conn: &Connection) -> Result<Vec<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .order_by(ExerciseIden::ExerciseId, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), Exercise::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }

    pub fn fetch_maybe(conn: &Connection, id: i64) -> Result<Option<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::ExerciseId).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), Exercise::from_row).optional()
    }

    pub fn fetch_by_name<N: AsRef<str>>(
        conn: &Connection,
        name: N,
    ) -> Result<Option<Exercise>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(ExerciseIden::Name).eq(name.as_ref()))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), Exercise::from_row).optional()
    }

    #[instrument(skip(conn))]
    /// Inserts the exercise. A name clash with an existing exercise comes back
    /// as [`ExerciseError::NameTaken`] even when it is the `UNIQUE` index that
    /// catches it
    pub fn create(
        conn: &mut Connection,
        new_exercise: NewExercise,
    ) -> Result<Exercise, ServerError<ExerciseError>> {
        let tx = conn.transaction()?;
        let exercise = {
            new_exercise
                .insert(&tx)
                .map_err(|err| name_conflict(err, &new_exercise.name, "Exercise::create(insert)"))?;
            Exercise::fetch_maybe(&tx, tx.last_insert_rowid())?
                .ok_or_else(|| crate::other_error!("Exercise::create: inserted exercise not found"))?
        };
        tx.commit()?;

        Ok(exercise)
    }

    #[instrument(skip(conn))]
    pub fn update(&self, conn: &Connection) -> Result<(), ServerError<ExerciseError>> {
        let (sql, values) = Query::update()
            .table(ExerciseIden::Table)
            .values([
                (ExerciseIden::Name, self.name.clone().into()),
                (ExerciseIden::Category, self.category.into()),
                (ExerciseIden::MuscleGroup, self.muscle_group.clone().into()),
                (ExerciseIden::Description, self.description.clone().into()),
            ])
            .and_where(Expr::col(ExerciseIden::ExerciseId).eq(self.exercise_id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.execute(&*values.as_params())
            .map_err(|err| name_conflict(err, &self.name, "Exercise::update"))?;

        Ok(())
    }

    /// Deletes the exercise and, through the foreign key cascade, every log
    /// referencing it. Returns false if there was nothing to delete
    #[instrument(skip(conn))]
    pub fn delete(conn: &Connection, id: i64) -> Result<bool, rusqlite::Error> {
        let (sql, values) = Query::delete()
            .from_table(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::ExerciseId).eq(id))
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        Ok(stmt.execute(&*values.as_params())? > 0)
    }

    /// Distinct categories currently in use
    pub fn categories(conn: &Connection) -> Result<Vec<Category>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .distinct()
            .column(ExerciseIden::Category)
            .from(ExerciseIden::Table)
            .order_by(ExerciseIden::Category, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), |row| row.get::<_, Category>(0))?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }

    /// Distinct non-null muscle groups currently in use
    pub fn muscle_groups(conn: &Connection) -> Result<Vec<String>, rusqlite::Error> {
        let (sql, values) = Query::select()
            .distinct()
            .column(ExerciseIden::MuscleGroup)
            .from(ExerciseIden::Table)
            .and_where(Expr::col(ExerciseIden::MuscleGroup).is_not_null())
            .order_by(ExerciseIden::MuscleGroup, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), |row| row.get::<_, String>(0))?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }
}

/// True when `err` is the `UNIQUE` index on `exercise.name` rejecting a write
#[cfg(feature = "backend")]
fn is_name_conflict(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, Some(message))
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                && message.contains("exercise.name")
    )
}

#[cfg(feature = "backend")]
fn name_conflict(err: rusqlite::Error, name: &str, context: &str) -> ServerError<ExerciseError> {
    if is_name_conflict(&err) {
        ExerciseError::NameTaken { name: name.to_owned() }.into()
    } else {
        ServerError::WithContext {
            context: context.into(),
            inner: Box::new(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn bench_press() -> Exercise {
        Exercise {
            exercise_id: 1,
            name: "Bench Press".into(),
            category: Category::Strength,
            muscle_group: Some("chest".into()),
            description: Some("Chest compound exercise".into()),
        }
    }

    #[test]
    fn update_distinguishes_absent_from_null() {
        let update: ExerciseUpdate =
            serde_json::from_str(r#"{"name": "Incline Bench", "muscle_group": null}"#).unwrap();
        assert_eq!(
            update,
            ExerciseUpdate {
                name: Some("Incline Bench".into()),
                category: None,
                muscle_group: Some(None),
                description: None,
            }
        );

        let mut exercise = bench_press();
        exercise.apply(update);
        assert_eq!(exercise.name, "Incline Bench");
        assert_eq!(exercise.muscle_group, None);
        assert_eq!(exercise.description, Some("Chest compound exercise".into()));
    }

    #[test]
    fn blank_names_are_rejected() {
        assert!(NewExercise::new("  ", Category::Cardio).validate().is_err());
        assert!(NewExercise::new("Rowing", Category::Cardio).validate().is_ok());
        let update = ExerciseUpdate {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn new_exercise_optional_fields_default_to_none() {
        let new: NewExercise =
            serde_json::from_str(r#"{"name": "Plank", "category": "flexibility"}"#).unwrap();
        assert_eq!(new, NewExercise::new("Plank", Category::Flexibility));
    }
}

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "backend")]
use rusqlite::{
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
    ToSql,
};

/// Kind of exercise. Strength exercises usually carry sets/reps/weight,
/// cardio exercises distance/duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Strength,
    Cardio,
    Flexibility,
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Unknown exercise category \"{0}\"")]
pub struct UnknownCategory(pub String);

impl Category {
    pub const ALL: [Category; 3] = [Category::Strength, Category::Cardio, Category::Flexibility];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Strength => "strength",
            Category::Cardio => "cardio",
            Category::Flexibility => "flexibility",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

#[cfg(feature = "backend")]
impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

#[cfg(feature = "backend")]
impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

#[cfg(feature = "backend")]
impl From<Category> for sea_query::Value {
    fn from(value: Category) -> Self {
        value.as_str().into()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("strength", Category::Strength)]
    #[case("Cardio", Category::Cardio)]
    #[case(" flexibility ", Category::Flexibility)]
    fn parses_known_categories(#[case] input: &str, #[case] expected: Category) {
        assert_eq!(input.parse::<Category>(), Ok(expected));
    }

    #[test]
    fn rejects_unknown_categories() {
        assert_eq!("yoga".parse::<Category>(), Err(UnknownCategory("yoga".into())));
        assert_eq!("all".parse::<Category>(), Err(UnknownCategory("all".into())));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Category::Cardio).unwrap(), "\"cardio\"");
        assert_eq!(
            serde_json::from_str::<Category>("\"strength\"").unwrap(),
            Category::Strength
        );
    }
}

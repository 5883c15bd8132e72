use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "backend")]
use {
    crate::api::error::{ServerError, ServerErrorContext},
    exemplar::Model,
    rusqlite::{Connection, OptionalExtension},
    sea_query::{enum_def, Expr, Order, Query, SelectStatement, SqliteQueryBuilder},
    sea_query_rusqlite::RusqliteBinder,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
#[cfg_attr(feature = "backend", enum_def)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "backend", derive(Model))]
#[cfg_attr(feature = "backend", table("user"))]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    pub fn new<U: Into<String>, E: Into<String>>(username: U, email: E) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(feature = "backend")]
impl User {
    fn select_star() -> SelectStatement {
        Query::select()
            .columns([
                UserIden::UserId,
                UserIden::Username,
                UserIden::Email,
                UserIden::CreatedAt,
            ])
            .from(UserIden::Table)
            .to_owned()
    }

    pub fn fetch_all(conn: &Connection) -> Result<Vec<User>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .order_by(UserIden::UserId, Order::Asc)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        let res = stmt
            .query_map(&*values.as_params(), User::from_row)?
            .collect::<Result<_, _>>()?;
        Ok(res)
    }

    pub fn fetch_maybe(conn: &Connection, id: i64) -> Result<Option<User>, rusqlite::Error> {
        let (sql, values) = Self::select_star()
            .and_where(Expr::col(UserIden::UserId).eq(id))
            .limit(1)
            .build_rusqlite(SqliteQueryBuilder);

        let mut stmt = conn.prepare_cached(&sql)?;
        stmt.query_row(&*values.as_params(), User::from_row).optional()
    }

    pub fn exists(conn: &Connection, id: i64) -> Result<bool, rusqlite::Error> {
        Ok(Self::fetch_maybe(conn, id)?.is_some())
    }

    pub fn create<T>(conn: &mut Connection, new_user: NewUser) -> Result<User, ServerError<T>> {
        let tx = conn.transaction()?;
        let user = {
            new_user.insert(&tx).context("User::create(insert)")?;
            User::fetch_maybe(&tx, tx.last_insert_rowid())?
                .ok_or_else(|| crate::other_error!("User::create: inserted user not found"))?
        };
        tx.commit()?;

        Ok(user)
    }
}

use axum::{extract::Query, Json};
use shared::{
    api::{error::ServerError, payloads::ReportQuery, response_errors::ReportError},
    report::{Report, ReportFilter},
};
use tracing::{debug, instrument};

use crate::db::DatabaseConnection;

/// Filtered summary plus the matching workouts. The three tables are read in
/// one transaction so the report never mixes two states of the database
#[instrument(skip(conn))]
pub async fn fetch_report_summary(
    DatabaseConnection(conn): DatabaseConnection,
    Query(query): Query<ReportQuery>,
) -> Result<Json<Report>, ServerError<ReportError>> {
    let filter = ReportFilter::try_from(query)?;
    debug!(?filter);

    let report = conn
        .interact(move |conn| {
            let tx = conn.transaction()?;
            let report = Report::from_source(&filter, &*tx)?;
            tx.commit()?;

            Ok::<_, ServerError<ReportError>>(report)
        })
        .await??;

    Ok(Json(report))
}

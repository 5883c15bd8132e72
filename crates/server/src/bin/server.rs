use std::{
    fs,
    io::ErrorKind,
    net::{IpAddr, SocketAddr},
    str::FromStr,
};

use chrono::Local;
use clap::Parser;
use server::{app, cli::Cli, db, AppState};
use shared::*;
use tokio::net::TcpListener;
use tracing::{debug, info, warn};

/// Removes the database along with the WAL side files
fn delete_database(connection_string: &str) -> Result<(), anyhow::Error> {
    for suffix in ["", "-wal", "-shm"] {
        let path = format!("{connection_string}{suffix}");
        match fs::remove_file(&path) {
            Ok(()) => warn!("Deleted {path}"),
            Err(e) if e.kind() == ErrorKind::NotFound => {},
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    load_dotenv()?;
    configure_tracing();

    let args = Cli::parse();
    debug!(?args);

    if args.debug_delete_database {
        delete_database(&args.sqlite_connection_string)?;
    }

    // Run the migrations synchronously before creating the pool or launching the server
    let ran = db::run_migrations(&args.sqlite_connection_string)?;
    info!("Ran {ran} db migrations");

    let pool = db::create_pool(&args.sqlite_connection_string)?;

    if args.seed_demo_data {
        let today = Local::now().date_naive();
        let conn = pool.get().await?;
        conn.interact(move |conn| db::seed::seed_demo_data(conn, today))
            .await
            .map_err(|e| anyhow::anyhow!("Seeding demo data: {e:?}"))??;
    }

    let socket = SocketAddr::new(IpAddr::from_str(&args.bind_addr)?, args.port);

    let listener = TcpListener::bind(socket).await?;
    info!("listening on {}", listener.local_addr()?);

    let state = AppState { pool };

    axum::serve(listener, app(state, &args.cors_origin)?).await?;

    Ok(())
}

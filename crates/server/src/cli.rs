use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[clap(name = "workout tracker server")]
pub struct Cli {
    #[clap(long, env, default_value = "workout_tracker.sqlite")]
    pub sqlite_connection_string: String,
    #[clap(long, env, default_value = "5000")]
    pub port: u16,
    #[clap(long, env, default_value = "127.0.0.1")]
    pub bind_addr: String,
    /// Origin of the frontend allowed to call the API
    #[arg(long, env, default_value = "http://localhost:5173")]
    pub cors_origin: String,
    /// Populates an empty database with demo users, exercises and workouts
    #[arg(long, env, default_value = "false")]
    pub seed_demo_data: bool,

    /// Deletes the database before starting the main program for debug purposes
    #[arg(long, env, default_value = "false")]
    pub debug_delete_database: bool,
}

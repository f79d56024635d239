use anyhow::Context;
use capstone_users::config::database_path_from_map;
use capstone_users::db::reset_database;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(LevelFilter::INFO.into()),
        )
        .init();

    let db_path = database_path_from_map(&std::env::vars().collect());

    reset_database(&db_path)
        .await
        .with_context(|| format!("failed to initialize database at {}", db_path))?;

    println!("Database initialized with two users.");
    Ok(())
}

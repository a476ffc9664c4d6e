// ABOUTME: Server binary wiring configuration, logging, storage, and the router
// ABOUTME: Serves the goal tracking REST API with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Strive Fitness

//! # Strive Server Binary
//!
//! Starts the goal tracking API over the configured SQLite database.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use strive_server::{
    config::ServerConfig, context::ServerResources, logging, routes,
    storage::SqliteGoalStore,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "strive-server")]
#[command(about = "Strive Fitness Tracker - goal tracking and progress analytics API")]
struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting Strive server");
    info!("{}", config.summary());

    let store = SqliteGoalStore::new(&config.database.url).await?;
    store.migrate().await?;
    info!("Database ready: {}", config.database.url);

    let addr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), config.http_port);
    let resources = Arc::new(ServerResources::new(Arc::new(store), config));
    let app = routes::router(resources);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install ctrl-c handler: {e}");
    }
}

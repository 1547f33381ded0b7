//! This binary crate runs the gesture tree: a decorated tree that explodes and assembles itself
//! as a hand opens and closes in front of the camera.

mod config;
mod drivers;
mod logging;
mod session;

use self::config::AppConfig;
use color_eyre::Result;
use std::future::Future;
use tokio::{
    sync::{mpsc, oneshot},
    task::LocalSet,
    time,
};
use tracing::{info, instrument, warn};
use ww_driver_trait::Driver;

/// Wait until we're interrupted or, if there's a limit, until we've run for long enough.
fn shutdown_signal(config: &AppConfig) -> impl Future<Output = ()> {
    let run_for = config.run_for();

    async move {
        let time_limit = async {
            match run_for {
                Some(duration) => time::sleep(duration).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            result = tokio::signal::ctrl_c() => match result {
                Ok(()) => info!("Interrupted"),
                Err(error) => warn!(%error, "Couldn't listen for Ctrl-C"),
            },
            () = time_limit => info!(?run_for, "Time limit reached"),
        }
    }
}

#[instrument]
fn main() -> Result<()> {
    color_eyre::install()?;

    let filename = AppConfig::filename();
    let config = AppConfig::from_file(&filename);
    let _guard = logging::init_tracing(config.log_dir.as_deref());

    info!(?filename, "Loaded config");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = LocalSet::new();

    // Nothing in here resizes yet, but a windowed driver would hold on to the sender
    let (_resize_tx, resize_rx) = mpsc::unbounded_channel();
    let (stop_tx, stop_rx) = oneshot::channel();

    let report = local.block_on(&runtime, async move {
        let shutdown = shutdown_signal(&config);
        let session = tokio::task::spawn_local(session::run(
            config,
            drivers::Driver::init(),
            resize_rx,
            stop_rx,
        ));

        shutdown.await;
        let _ = stop_tx.send(());
        session.await
    })?;

    info!(?report, "Gesture tree finished");
    Ok(())
}

use anyhow::{Context, Result};

mod config;
mod demo;
mod engine;
mod events;
mod material;
mod math;
mod model;
mod platform;
mod scene_graph;
mod window;

fn main() -> Result<()> {
    pretty_env_logger::init();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .thread_name("spatial-mapping")
        .enable_time()
        .build()
        .context("Failed to build tokio runtime")?;

    window::run(runtime.handle().clone())?;

    Ok(())
}

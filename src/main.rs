mod config;
mod display;
mod input;

use std::path::PathBuf;

use anyhow::Context;
use bytes::Bytes;
use config::Config;
use display::ConsoleObserver;
use pcm_meter::pcm::{AnalyzerConfig, parse_mime_type};
use tokio::signal;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Built-in defaults, optionally overridden by a TOML file
    let config_path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("PCM_METER_CONFIG"))
        .map(PathBuf::from);
    let config = Config::load(config_path.as_deref())?;
    log::info!("{} {} starting", config.app_name, config.app_version);

    let format = parse_mime_type(&config.mime_type)
        .with_context(|| format!("Unusable stream type '{}'", config.mime_type))?;

    let mut analyzer_config = AnalyzerConfig {
        window: config.window,
        observe_every: config.observe_every,
        ..Default::default()
    };
    analyzer_config.apply_format(format);

    let observer = ConsoleObserver::new(
        config.display_format,
        config.bar_scale,
        config.max_bar_width,
        config.observe_peak,
    );
    let mut analyzer = analyzer_config.open(observer)?;

    log::info!(
        "Metering {}Hz/{}ch, window {:?}, report every {:?}",
        format.sample_rate,
        format.channels,
        config.window,
        config.observe_every,
    );

    let (tx_chunk, mut rx_chunk) = mpsc::channel::<Bytes>(100);
    let reader = input::spawn(config.input, config.read_buffer_size, tx_chunk);

    let mut total: u64 = 0;
    let mut interrupted = false;
    loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                log::info!("Received Ctrl+C, shutting down...");
                interrupted = true;
                break;
            }

            chunk = rx_chunk.recv() => {
                match chunk {
                    Some(chunk) => {
                        total += analyzer.write(&chunk) as u64;
                    }
                    // Input exhausted
                    None => break,
                }
            }
        }
    }

    if interrupted {
        reader.abort();
    } else {
        // The sender is gone, so the task has returned or is returning
        reader.await.context("Input task panicked")??;
    }

    if !analyzer.pending().is_empty() {
        log::warn!(
            "Discarding {} trailing bytes that do not form a whole frame",
            analyzer.pending().len()
        );
    }
    log::info!("Processed {} bytes", total);
    Ok(())
}

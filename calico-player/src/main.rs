//! Calico standalone player
//!
//! Drives the built-in demo machine against the system's default audio
//! output, without a display.
//!
//! # Usage
//!
//! ```bash
//! calico-player
//! calico-player --duration 30 --frequency 440
//! calico-player --capture frames/ --capture-every 60
//! ```

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;

use calico_core::{Machine, Pacer, Presenter, SyncConfig, audio_link};

mod audio;
mod demo;
mod present;

use audio::AudioHost;
use demo::DemoMachine;
use present::{CapturePresenter, HeadlessPresenter};

#[derive(Parser)]
#[command(name = "calico-player")]
#[command(author, version, about = "Calico standalone player")]
struct Args {
    /// Playback duration in seconds
    #[arg(long, short = 't', default_value = "10")]
    duration: f64,

    /// Demo tone frequency in Hz
    #[arg(long, short = 'f', default_value = "220")]
    frequency: f32,

    /// Write presented frames as PNG files into this directory
    #[arg(long)]
    capture: Option<PathBuf>,

    /// Capture every Nth presented frame
    #[arg(long, default_value = "60")]
    capture_every: u64,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let machine = DemoMachine::new(args.frequency);
    let config = SyncConfig::for_machine(&machine.specs());

    let presenter: Box<dyn Presenter> = match &args.capture {
        Some(directory) => Box::new(
            CapturePresenter::new(
                directory.clone(),
                args.capture_every,
                demo::WIDTH as u32,
                demo::HEIGHT as u32,
            )
            .with_context(|| format!("creating capture directory {}", directory.display()))?,
        ),
        None => Box::new(HeadlessPresenter),
    };

    let (pacer_link, device_link) = audio_link();
    let audio = AudioHost::new(device_link, &config).map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Audio device ready at {}Hz", audio.sample_rate());

    let start = Instant::now();
    let mut pacer = Pacer::new(machine, presenter, pacer_link, &config, start);

    // Stands in for a display-refresh callback: poll a few times per frame
    // interval so tick timing error stays small.
    let poll = config.frame_interval() / 4;
    let deadline = start + Duration::from_secs_f64(args.duration);

    while Instant::now() < deadline {
        if pacer.overflowed() {
            anyhow::bail!("audio queue overflowed; pacing diverged beyond recovery");
        }
        pacer.tick(Instant::now())?;
        thread::sleep(poll);
    }

    let stats = pacer.stats();
    tracing::info!(
        "Session complete: {} frames, {} underruns",
        stats.frames(),
        stats.underruns()
    );

    Ok(())
}

use std::time::Duration;

use anyhow::{Context, Result};
use bmd_camera::{CameraConfig, CameraControl, GetResponse, HttpCamera, WhiteBalancePreset};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

/// Flags win over `BMD_CAMERA_HOST`, `BMD_CAMERA_SCHEME` and
/// `BMD_CAMERA_TIMEOUT_MS`, which win over the defaults. Blank values count
/// as unset everywhere.
#[derive(Parser)]
#[command(name = "bmd-camera")]
#[command(about = "Control a Blackmagic camera over its REST API")]
struct Cli {
    /// Camera hostname, optionally with a port [env: BMD_CAMERA_HOST]
    #[arg(long)]
    host: Option<String>,

    /// [env: BMD_CAMERA_SCHEME]
    #[arg(long)]
    scheme: Option<String>,

    /// Per-request timeout. Waits indefinitely if not given [env: BMD_CAMERA_TIMEOUT_MS]
    #[arg(long)]
    timeout_ms: Option<u64>,

    #[clap(subcommand)]
    command: Commands,
}

impl Cli {
    fn camera_config(&self) -> Result<CameraConfig> {
        let mut config = CameraConfig::from_env().context("failed to read camera environment")?;
        if let Some(host) = non_blank(&self.host) {
            config.host = host.to_owned();
        }
        if let Some(scheme) = non_blank(&self.scheme) {
            config.scheme = scheme.to_owned();
        }
        if let Some(ms) = self.timeout_ms {
            config.timeout = Some(Duration::from_millis(ms));
        }
        Ok(config)
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Flip the recording state")]
    Toggle {
        #[arg(long, default_value = "")]
        clip_name: String,
    },
    #[command(about = "Start or stop recording")]
    Record { action: RecordAction },
    #[command(about = "Print the recording state")]
    Status,
    #[command(about = "GET an endpoint, e.g. /video/iso")]
    Get { endpoint: String },
    #[command(about = "PUT a JSON body to an endpoint")]
    Put { endpoint: String, body: String },
    #[command(about = "Apply a white balance preset (name or 0-4)")]
    WhiteBalance { preset: WhiteBalancePreset },
    #[command(about = "List event endpoints")]
    Events {
        /// Also read the current value of every endpoint.
        #[arg(long, action)]
        snapshot: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum RecordAction {
    Start,
    Stop,
}

impl RecordAction {
    fn recording(self) -> bool {
        matches!(self, RecordAction::Start)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    run(Cli::parse()).await
}

async fn run(args: Cli) -> Result<()> {
    let camera =
        HttpCamera::new(args.camera_config()?).context("failed to set up camera client")?;

    match args.command {
        Commands::Toggle { clip_name } => {
            let state = camera
                .toggle_record(&clip_name)
                .await
                .context("failed to toggle recording")?;
            print_json(&serde_json::to_value(state)?)?;
        }
        Commands::Record { action } => {
            camera
                .set_recording(action.recording())
                .await
                .context("failed to set recording")?;
        }
        Commands::Status => {
            let state = camera
                .record_state()
                .await
                .context("failed to read recording state")?;
            print_json(&serde_json::to_value(state)?)?;
        }
        Commands::Get { endpoint } => match camera.get(&endpoint).await? {
            GetResponse::Success(value) => print_json(&value)?,
            GetResponse::Failure { status, body } => {
                anyhow::bail!("camera answered {status}: {body}")
            }
        },
        Commands::Put { endpoint, body } => {
            let body: Value = serde_json::from_str(&body).context("body is not valid JSON")?;
            let response = camera.put(&endpoint, &body).await?.error_for_status()?;
            if !response.body.trim().is_empty() {
                println!("{}", response.body);
            }
        }
        Commands::WhiteBalance { preset } => {
            camera
                .set_white_balance_preset(preset)
                .await
                .with_context(|| format!("failed to apply {preset} preset"))?;
        }
        Commands::Events { snapshot } => {
            if snapshot {
                print_json(&serde_json::to_value(camera.snapshot().await?)?)?;
            } else {
                for endpoint in camera.event_list().await? {
                    println!("{endpoint}");
                }
            }
        }
    }

    Ok(())
}

fn print_json(value: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

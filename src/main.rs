use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use factorystatsd::{Flavor, Forwarder, Settings, UdpSink};

#[derive(Parser, Debug)]
#[command(name = "factorystatsd-forwarder")]
#[command(about = "Forwards metrics from Factorio to statsd")]
struct Args {
    /// Path to Factorio's script-output directory (default: ./script-output)
    #[arg(long)]
    factorio_script_output: Option<PathBuf>,

    /// The flavor of statsd to use (default: vanilla)
    #[arg(long, value_enum)]
    statsd_flavor: Option<Flavor>,

    /// The host where statsd is listening (default: 127.0.0.1)
    #[arg(long)]
    statsd_host: Option<String>,

    /// The port where statsd is listening (default: 8125)
    #[arg(long)]
    statsd_port: Option<u16>,

    /// Largest datagram to send, in characters (default: 1432)
    #[arg(long)]
    max_packet_size: Option<usize>,

    /// Optional settings file (TOML, YAML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Logging verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    /// Flags given on the command line win over every other source.
    fn apply(self, settings: &mut Settings) {
        if let Some(dir) = self.factorio_script_output {
            settings.script_output = dir;
        }
        if let Some(flavor) = self.statsd_flavor {
            settings.statsd.flavor = flavor;
        }
        if let Some(host) = self.statsd_host {
            settings.statsd.host = host;
        }
        if let Some(port) = self.statsd_port {
            settings.statsd.port = port;
        }
        if let Some(size) = self.max_packet_size {
            settings.statsd.max_packet_size = size;
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_new(&args.log_level)
        .with_context(|| format!("invalid log level: {}", args.log_level))?;
    fmt().with_env_filter(filter).with_target(false).init();

    let mut settings = Settings::load(args.config.as_deref()).context("loading settings")?;
    args.apply(&mut settings);

    // The directory itself may not exist until the game writes to it, but
    // its parent (the Factorio install) should.
    let install_dir = settings.script_output.parent().filter(|p| !p.as_os_str().is_empty());
    if install_dir.is_some_and(|p| !p.exists()) {
        error!(
            path = %settings.script_output.display(),
            "factorio not found at script output path. please check --factorio-script-output"
        );
    }

    info!(
        "forwarding data from {} to {}:{} ({})",
        settings.script_output.display(),
        settings.statsd.host,
        settings.statsd.port,
        settings.statsd.flavor
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;

    rt.block_on(async {
        let sink = UdpSink::bind(settings.statsd.host.clone(), settings.statsd.port)
            .await
            .context("binding UDP socket")?;

        let mut forwarder = Forwarder::new(
            settings.source_paths(),
            settings.statsd.flavor,
            settings.statsd.max_packet_size,
            sink,
        );
        forwarder.run().await;

        Ok::<(), anyhow::Error>(())
    })
}

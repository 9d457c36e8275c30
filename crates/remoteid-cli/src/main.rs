#![doc = include_str!("../readme.md")]

mod error;
mod mac;
mod sink;
mod telemetry;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use remoteid::error::RemoteIdError;
use remoteid::frame;
use tracing::{info, warn};

use error::CliError;
use mac::{parse_mac, ConfiguredMac, MacProvider, RandomMac};
use sink::{FileSink, FrameSink, UdpSink};
use telemetry::{SyntheticTelemetry, TelemetrySource};

#[derive(Debug, Parser)]
#[command(
    name = "remoteid-cli",
    version,
    author = "remote-id broadcaster contributors",
    about = "Broadcast or monitor OpenDroneID Remote-ID frames"
)]
struct Options {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Periodically build and send Remote-ID frames from synthetic telemetry.
    Broadcast {
        /// Source MAC address embedded in the 802.11 header (random if omitted).
        #[arg(long)]
        mac: Option<String>,

        /// Destination for built frames: a file path, or `udp:HOST:PORT`.
        #[arg(long, default_value = "broadcast.bin")]
        sink: String,

        /// Broadcast cadence in Hz (frames per second).
        #[arg(long, default_value = "1.0")]
        rate: f64,

        /// Number of frames to send before exiting (runs forever if omitted).
        #[arg(long)]
        count: Option<u64>,

        /// Home latitude for the synthetic flight path, in degrees.
        #[arg(long, default_value = "48.8566")]
        lat: f64,

        /// Home longitude for the synthetic flight path, in degrees.
        #[arg(long, default_value = "2.3522")]
        lon: f64,

        /// UAS serial number to broadcast.
        #[arg(long, default_value = "1SZAMZ123A4567890")]
        uas_id: String,
    },

    /// Read and parse previously captured frames from a file.
    Monitor {
        /// File containing one or more fixed-size frames written back to back.
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let options = Options::parse();

    match options.command {
        Command::Broadcast {
            mac,
            sink,
            rate,
            count,
            lat,
            lon,
            uas_id,
        } => broadcast(mac, sink, rate, count, lat, lon, uas_id).await,
        Command::Monitor { path } => monitor(&path),
    }
}

#[allow(clippy::too_many_arguments)]
async fn broadcast(
    mac_arg: Option<String>,
    sink_target: String,
    rate: f64,
    count: Option<u64>,
    lat: f64,
    lon: f64,
    uas_id: String,
) -> Result<(), CliError> {
    let mac = match mac_arg {
        Some(ref s) => {
            let octets =
                parse_mac(s).map_err(|e| CliError::InvalidMac(s.clone(), e))?;
            ConfiguredMac(octets).mac()
        }
        None => RandomMac::generate().mac(),
    };

    let mut sink: Box<dyn FrameSink> =
        if let Some(addr) = sink_target.strip_prefix("udp:") {
            Box::new(UdpSink::connect(addr)?)
        } else {
            Box::new(FileSink::create(std::path::Path::new(&sink_target))?)
        };

    let mut telemetry = SyntheticTelemetry::new(lat, lon, &uas_id);
    let period = Duration::from_secs_f64(1.0 / rate.max(0.01));
    let mut interval = tokio::time::interval(period);

    let mut counter: u8 = 0;
    let mut sent: u64 = 0;

    loop {
        interval.tick().await;

        let snapshot = telemetry.next().await;
        let built = frame::build(mac, counter, &snapshot);
        sink.send(&built)?;

        info!(
            counter,
            bytes = built.len(),
            latitude = snapshot.location.latitude,
            longitude = snapshot.location.longitude,
            "sent Remote-ID frame"
        );

        counter = counter.wrapping_add(1);
        sent += 1;
        if count.is_some_and(|c| sent >= c) {
            break;
        }
    }

    Ok(())
}

fn monitor(path: &std::path::Path) -> Result<(), CliError> {
    let bytes = std::fs::read(path)?;
    let frame_size = frame::CANONICAL_FRAME_SIZE;

    if bytes.len() % frame_size != 0 {
        warn!(
            total = bytes.len(),
            frame_size, "file length is not a whole number of canonical frames; trailing bytes ignored"
        );
    }

    for chunk in bytes.chunks(frame_size) {
        if chunk.len() < frame_size {
            break;
        }
        match frame::parse(chunk) {
            Ok((counter, snapshot)) => {
                info!(
                    counter,
                    uas_type = ?snapshot.basic_id.uas_type,
                    status = ?snapshot.location.status,
                    latitude = snapshot.location.latitude,
                    longitude = snapshot.location.longitude,
                    "parsed Remote-ID frame"
                );
            }
            Err(RemoteIdError::NotOurFrame) => {
                warn!("dropped a frame that is not a Remote-ID NAN action frame");
            }
            Err(err) => {
                warn!(%err, "dropped a malformed frame");
            }
        }
    }

    Ok(())
}

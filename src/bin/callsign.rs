use anyhow::{bail, Context, Result};
use aprs::{Callsign, ADDRESS_LEN};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Encode and decode AX.25 callsign address fields.
#[derive(Parser, Debug)]
#[command(name = "callsign")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log codec activity to stderr (RUST_LOG takes precedence)
    #[arg(short, long, action)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the 7-byte address field for each callsign, e.g. W2GMD-1 or W2GMD*
    Encode {
        #[arg(required = true)]
        callsigns: Vec<String>,
    },
    /// Decode one address field out of a hex-encoded frame
    Decode {
        frame_hex: String,
        /// Byte offset of the address field within the frame
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "aprs=trace" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Encode { callsigns } => {
            for text in callsigns {
                let call = Callsign::from_string(&text)
                    .with_context(|| format!("could not parse \"{}\"", text))?;
                println!("{}\t{}", call, call.to_hex());
            }
        }
        Command::Decode { frame_hex, offset } => {
            let frame = hex::decode(frame_hex.trim())
                .with_context(|| format!("\"{}\" is not valid hex", frame_hex))?;
            debug!(len = frame.len(), offset, "decoding frame");
            if offset > frame.len() {
                bail!(
                    "offset {} is past the end of {} byte frame \"{}\"",
                    offset,
                    frame.len(),
                    frame_hex
                );
            }
            let call = Callsign::from_wire_bytes(&frame[offset..])
                .with_context(|| {
                    format!("could not decode address at offset {} of \"{}\"", offset, frame_hex)
                })?;
            println!("{}", call);
            println!("callsign\t{}", call.callsign());
            println!("ssid\t\t{}", call.ssid());
            println!("digipeat\t{}", call.is_digipeated());
            if frame[offset + ADDRESS_LEN - 1] & 0x01 != 0 {
                println!("end of address");
            }
        }
    }
    Ok(())
}

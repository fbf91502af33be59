use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shamir_engine::{combine, combine_with_len, split_with, Parameters};
use tracing::{error, info};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{filter, layer::SubscriberExt, Layer};

#[derive(Parser)]
#[clap(name = "shamir-engine")]
#[clap(about = "Split a secret into shares with Shamir's scheme, and combine them again. \
    Any threshold-sized subset of the shares reconstructs the secret; \
    fewer shares give back an unrelated value without any error.")]
struct Args {
    /// Log at debug level
    #[clap(long, global = true, default_value_t = false)]
    verbose: bool,
    #[clap(subcommand)]
    mode: Mode,
}

#[derive(Clone, Subcommand)]
enum Mode {
    /// Split a secret, printing one share per line.
    Split {
        /// The secret, taken as its UTF-8 bytes unless `--hex` is given
        #[clap(long)]
        secret: String,
        /// Read the secret as hexadecimal bytes, as `combine` prints binary secrets
        #[clap(long, default_value_t = false)]
        hex: bool,
        /// Total number of shares, overrides the parameters file
        #[clap(long)]
        shares: Option<u32>,
        /// Shares needed to reconstruct, overrides the parameters file
        #[clap(long)]
        threshold: Option<u32>,
        /// JSON file with `total_shares` and `threshold`
        #[clap(long)]
        params: Option<PathBuf>,
        /// Print the shares as a JSON array
        #[clap(long, default_value_t = false)]
        json: bool,
    },
    /// Reconstruct a secret from encoded shares.
    Combine {
        /// Left-pad the secret with zero bytes to this length
        #[clap(long)]
        length: Option<usize>,
        #[clap(required = true)]
        shares: Vec<String>,
    },
}

fn load_parameters(
    path: Option<&PathBuf>,
    shares: Option<u32>,
    threshold: Option<u32>,
) -> Result<Parameters, String> {
    let mut params = match path {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
            serde_json::from_str(&raw)
                .map_err(|e| format!("cannot parse {}: {}", path.display(), e))?
        }
        None => Parameters::default(),
    };
    if let Some(n) = shares {
        params.total_shares = n;
    }
    if let Some(t) = threshold {
        params.threshold = t;
    }
    Ok(params)
}

fn secret_bytes(secret: &str, hex: bool) -> Result<Vec<u8>, String> {
    if hex {
        hex::decode(secret).map_err(|e| format!("secret is not valid hex: {}", e))
    } else {
        Ok(secret.as_bytes().to_vec())
    }
}

fn render_secret(secret: Vec<u8>) -> String {
    match String::from_utf8(secret) {
        Ok(text) => text,
        Err(e) => hex::encode(e.into_bytes()),
    }
}

fn run(mode: Mode) -> Result<(), String> {
    match mode {
        Mode::Split {
            secret,
            hex,
            shares,
            threshold,
            params,
            json,
        } => {
            let params = load_parameters(params.as_ref(), shares, threshold)?;
            let secret = secret_bytes(&secret, hex)?;
            let encoded = split_with(&secret, &params).map_err(|e| e.to_string())?;
            info!(
                total_shares = params.total_shares,
                threshold = params.threshold,
                "secret split"
            );
            if json {
                let out = serde_json::to_string_pretty(&encoded).map_err(|e| e.to_string())?;
                println!("{}", out);
            } else {
                for share in encoded {
                    println!("{}", share);
                }
            }
        }
        Mode::Combine { length, shares } => {
            let secret = match length {
                Some(len) => combine_with_len(shares.as_slice(), len),
                None => combine(shares.as_slice()),
            }
            .map_err(|e| e.to_string())?;
            info!(share_count = shares.len(), "shares combined");
            println!("{}", render_secret(secret));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = if args.verbose {
        filter::LevelFilter::DEBUG
    } else {
        filter::LevelFilter::INFO
    };
    let stderr_log = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(stderr_log.with_filter(level))
        .init();

    match run(args.mode) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

//! Command-line front end for the segwit address codec.
//!
//! ```text
//! cargo run --example segwit_addr -- decode bc1qw508d6qejxtdg4y5r3zarvary0c5xw7kv8f3t4
//! cargo run --example segwit_addr -- encode --hrp tb --version 1 751e
//! ```

extern crate segwit_addr;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use segwit_addr::bitcoin::hex::{DisplayHex, FromHex};
use segwit_addr::{Address, AddressParams, Variant};
use tracing::{debug, info, warn};

#[derive(Parser)]
#[command(name = "segwit_addr")]
#[command(about = "Encode and decode bech32 segwit addresses", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode an address into its witness version and program
    Decode {
        /// The address to decode
        address: String,

        /// Only accept addresses of this network
        #[arg(short, long)]
        network: Option<Network>,

        /// Checksum variant to verify against
        #[arg(long, default_value = "bech32")]
        checksum: Checksum,
    },

    /// Encode a witness program as an address
    Encode {
        /// Human-readable part
        #[arg(long, default_value = "bc")]
        hrp: String,

        /// Witness version, 0 to 16
        #[arg(short, long, default_value = "0")]
        version: u8,

        /// Witness program as hex
        program: String,

        /// Checksum variant to produce
        #[arg(long, default_value = "bech32")]
        checksum: Checksum,
    },
}

#[derive(Copy, Clone, ValueEnum)]
enum Network {
    Bitcoin,
    Testnet,
    Regtest,
}

impl Network {
    fn params(self) -> &'static AddressParams {
        match self {
            Network::Bitcoin => &AddressParams::BITCOIN,
            Network::Testnet => &AddressParams::TESTNET,
            Network::Regtest => &AddressParams::REGTEST,
        }
    }
}

#[derive(Copy, Clone, ValueEnum)]
enum Checksum {
    Bech32,
    Bech32m,
}

impl From<Checksum> for Variant {
    fn from(c: Checksum) -> Variant {
        match c {
            Checksum::Bech32 => Variant::Bech32,
            Checksum::Bech32m => Variant::Bech32m,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { address, network, checksum } => run_decode(&address, network, checksum),
        Commands::Encode { hrp, version, program, checksum } => {
            run_encode(&hrp, version, &program, checksum)
        }
    }
}

fn run_decode(address: &str, network: Option<Network>, checksum: Checksum) -> anyhow::Result<()> {
    debug!(address, "decoding");
    let (hrp, version, program) = segwit_addr::decode_with_variant(address, checksum.into())
        .map_err(|e| {
            warn!(address, error = %e, "rejected address");
            e
        })
        .with_context(|| format!("invalid address {}", address))?;
    info!(hrp = %hrp, version, program_len = program.len(), "decoded address");

    println!("hrp:      {}", hrp);
    println!("version:  {}", version);
    println!("program:  {}", program.to_lower_hex_string());

    if let Some(network) = network {
        let addr = Address::parse_with_params(address, network.params())
            .with_context(|| format!("address {} is not for the requested network", address))?;
        println!("script:   {}", addr.script_pubkey().as_bytes().to_lower_hex_string());
    }
    Ok(())
}

fn run_encode(hrp: &str, version: u8, program: &str, checksum: Checksum) -> anyhow::Result<()> {
    let program = Vec::<u8>::from_hex(program).context("witness program is not valid hex")?;
    debug!(hrp, version, program_len = program.len(), "encoding");

    let address = segwit_addr::encode_with_variant(hrp, version, &program, checksum.into())
        .with_context(|| format!("cannot encode version {} program as {} address", version, hrp))?;
    info!(address = %address, "encoded address");

    println!("{}", address);
    Ok(())
}

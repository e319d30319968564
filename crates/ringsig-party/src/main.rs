//! Ring Signature Party CLI
//!
//! Command-line interface for the ring signature demo:
//! - Signer key generation
//! - Ring composition (signer hidden among random decoys)
//! - Signing and verification

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::rngs::OsRng;
use ringsig_core::{
    keys::{self, KeyPair},
    ring::{self, ComposedRing},
    sign, verify, Identity, RecoveryMode, SignatureArtifact,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

const SIGNER_FILE: &str = "signer.json";
const RING_FILE: &str = "ring.json";
const SIGNATURE_FILE: &str = "signature.json";

/// Ring Signature Party - ring signature demo node
#[derive(Parser)]
#[command(name = "ringsig-party")]
#[command(about = "Ring signatures over secp256k1 account keys")]
#[command(version)]
struct Cli {
    /// Data directory for keys, rings and signatures
    #[arg(short, long, env = "RINGSIG_DATA_DIR", default_value = "./data")]
    dest: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a signer key pair
    Keygen {
        /// Import an existing private key (0x + 64 hex digits) instead
        #[arg(long, env = "RINGSIG_PRIVATE_KEY", hide_env_values = true)]
        private_key: Option<String>,
    },

    /// Build a ring hiding the signer among random decoy addresses
    Ring {
        /// Total number of ring members
        #[arg(short = 'n', long = "ring-size", env = "RINGSIG_RING_SIZE", default_value_t = ring::DEFAULT_RING_SIZE)]
        size: usize,
    },

    /// Sign a message on behalf of the ring
    Sign {
        /// Message to sign
        #[arg(short, long)]
        message: String,
    },

    /// Verify the stored signature
    Verify {
        /// Message to check (defaults to the signed one)
        #[arg(short, long)]
        message: Option<String>,

        /// Recovery discriminant strategy
        #[arg(long, value_enum, default_value_t = Recovery::Embedded)]
        recovery: Recovery,
    },

    /// Show stored signer, ring and signature info
    Info,
}

#[derive(Clone, Copy, ValueEnum)]
enum Recovery {
    /// Use the discriminant stored in the signature
    Embedded,
    /// Try all four discriminants in order
    Probe,
}

impl From<Recovery> for RecoveryMode {
    fn from(recovery: Recovery) -> Self {
        match recovery {
            Recovery::Embedded => RecoveryMode::Embedded,
            Recovery::Probe => RecoveryMode::Probe,
        }
    }
}

/// On-disk signer key material
#[derive(Serialize, Deserialize)]
struct SignerFile {
    private_key: String,
    public_key: String,
    address: Identity,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    // Ensure data directory exists
    std::fs::create_dir_all(&cli.dest)?;

    match cli.command {
        Commands::Keygen { ref private_key } => run_keygen(&cli, private_key.as_deref()),
        Commands::Ring { size } => run_ring(&cli, size),
        Commands::Sign { ref message } => run_sign(&cli, message),
        Commands::Verify {
            ref message,
            recovery,
        } => run_verify(&cli, message.as_deref(), recovery.into()),
        Commands::Info => show_info(&cli),
    }
}

fn run_keygen(cli: &Cli, private_key: Option<&str>) -> Result<()> {
    let key_pair = match private_key {
        Some(text) => KeyPair::from_hex(text)?,
        None => KeyPair::generate(),
    };

    let signer = SignerFile {
        private_key: format!("0x{}", hex::encode(key_pair.secret_bytes())),
        public_key: key_pair.public_key().to_hex(),
        address: key_pair.address(),
    };
    let path = cli.dest.join(SIGNER_FILE);
    write_json(&path, &signer)?;

    info!(address = %signer.address, path = ?path, "Signer key saved");

    println!("Address: {}", signer.address);
    println!("Public Key: {}", signer.public_key);

    Ok(())
}

fn run_ring(cli: &Cli, size: usize) -> Result<()> {
    if size < ring::MIN_RING_SIZE {
        bail!("Ring size must be at least {}", ring::MIN_RING_SIZE);
    }

    let key_pair = load_key_pair(cli)?;
    let signer = key_pair.address();

    let decoys = ring::random_decoys(size - 1, std::slice::from_ref(&signer), &mut OsRng);
    let composed = ring::compose_ring(signer, decoys, &mut OsRng)?;

    let path = cli.dest.join(RING_FILE);
    write_json(&path, &composed)?;

    info!(ring_size = composed.ring.len(), path = ?path, "Ring saved");

    println!("Ring ({} members):", composed.ring.len());
    for member in &composed.ring {
        println!("  {}", member);
    }

    Ok(())
}

fn run_sign(cli: &Cli, message: &str) -> Result<()> {
    if message.trim().is_empty() {
        bail!("Message must not be empty");
    }

    let key_pair = load_key_pair(cli)?;
    let composed: ComposedRing = read_json(&cli.dest.join(RING_FILE))?;

    let artifact = sign::generate(
        message,
        key_pair.secret_bytes(),
        &composed.ring,
        composed.signer_index,
    )?;

    let path = cli.dest.join(SIGNATURE_FILE);
    std::fs::write(&path, artifact.to_json()?)
        .with_context(|| format!("writing {}", path.display()))?;

    info!(path = ?path, "Ring signature saved");

    println!("Ring Signature:");
    println!("  commitment: {}", artifact.ring_commitment.to_hex());
    println!("  r: {}", hex::encode(artifact.signature.r));
    println!("  s: {}", hex::encode(artifact.signature.s));
    println!("  v: {}", artifact.signature.recovery_id);
    println!("  DER: {}", hex::encode(artifact.signature.to_der()?));

    Ok(())
}

fn run_verify(cli: &Cli, message: Option<&str>, mode: RecoveryMode) -> Result<()> {
    let artifact = load_artifact(cli)?;
    let composed: ComposedRing = read_json(&cli.dest.join(RING_FILE))?;
    let message = message.unwrap_or(artifact.message.as_str());

    let result = verify::verify_with_mode(message, &artifact, &composed.ring, mode);

    println!("{}", serde_json::to_string_pretty(&result)?);

    if result.valid {
        println!(
            "Verified: signer is one of {} ring members.",
            composed.ring.len()
        );
        if let Some(key) = &result.recovered_public_key {
            // Recovery exposes the signer's real key
            println!("Note: recovered key {} identifies the signer.", key);
        }
    } else if let Some(error) = result.error {
        println!("Rejected: {}", error);
    } else {
        println!("Rejected: recovered key is not in the ring");
    }

    Ok(())
}

fn show_info(cli: &Cli) -> Result<()> {
    let key_pair = load_key_pair(cli)?;

    println!("Signer Info:");
    println!("  Address: {}", key_pair.address());
    println!("  Public Key: {}", key_pair.public_key());

    if let Ok(composed) = read_json::<ComposedRing>(&cli.dest.join(RING_FILE)) {
        println!("  Ring Size: {}", composed.ring.len());
        println!("  Signer Index: {}", composed.signer_index);
    }

    if let Ok(artifact) = load_artifact(cli) {
        println!("  Signed Message: {}", artifact.message);
        println!("  Commitment: {}", artifact.ring_commitment.to_hex());
        let placeholders = artifact
            .ring
            .iter()
            .filter_map(|member| keys::derive_placeholder_public_key(member).ok())
            .filter(|key| artifact.ring_public_keys.contains(key))
            .count();
        println!("  Placeholder Keys: {}", placeholders);
    }

    Ok(())
}

fn load_key_pair(cli: &Cli) -> Result<KeyPair> {
    let signer: SignerFile = read_json(&cli.dest.join(SIGNER_FILE))?;
    Ok(KeyPair::from_hex(&signer.private_key)?)
}

fn load_artifact(cli: &Cli) -> Result<SignatureArtifact> {
    let path = cli.dest.join(SIGNATURE_FILE);
    let json = std::fs::read_to_string(&path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(SignatureArtifact::from_json(&json)?)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    Ok(serde_json::from_str(&json)?)
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

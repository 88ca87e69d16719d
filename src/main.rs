use anyhow::{anyhow, Context, Result};
use eosio_tx_decoder::{DecoderConfig, HttpAbiProvider, TransactionDecoder};
use eosio_tx_decoder::models::AbiDocument;
use env_logger::Builder;
use log::{info, LevelFilter};
use std::io::{Read, Write};
use std::time::Duration;

fn print_usage(program: &str) {
    println!("EOSIO Transaction Decoder v{}", eosio_tx_decoder::VERSION);
    println!("\nUsage:");
    println!("  {} <HEX|-> [--node URL] [--timeout SECS] [--abi ACCOUNT=FILE]... [--compact]", program);
    println!("  {} --version", program);
    println!("\nOptions:");
    println!("  -                      Read the hex transaction from stdin");
    println!("  --node, -n URL         Node serving contract ABIs (env: EOSIO_NODE_URL)");
    println!("  --timeout, -t SECS     ABI request timeout (env: EOSIO_RPC_TIMEOUT_SECS)");
    println!("  --abi ACCOUNT=FILE     Use the ABI JSON in FILE for ACCOUNT instead of fetching it");
    println!("  --compact              Print JSON on a single line");
    println!("  --version, -v          Show version information");
}

fn load_abi(spec: &str) -> Result<(String, AbiDocument)> {
    let (account, path) = spec
        .split_once('=')
        .ok_or_else(|| anyhow!("--abi expects ACCOUNT=FILE, got '{}'", spec))?;
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ABI file: {}", path))?;

    // Accept either a bare ABI or a saved get_abi response
    let value: serde_json::Value = serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse ABI file: {}", path))?;
    let abi_value = value.get("abi").cloned().unwrap_or(value);
    let abi: AbiDocument = serde_json::from_value(abi_value)
        .with_context(|| format!("Invalid ABI in file: {}", path))?;

    Ok((account.to_string(), abi))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logger
    Builder::new()
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] - {}",
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0),
                record.level(),
                record.args()
            )
        })
        .filter(None, LevelFilter::Info)
        .parse_default_env()
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 && (args[1] == "--version" || args[1] == "-v") {
        println!("EOSIO Transaction Decoder v{}", eosio_tx_decoder::VERSION);
        return Ok(());
    }

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage(&args[0]);
        return Ok(());
    }

    let mut config = DecoderConfig::from_env();
    let mut abi_files = Vec::new();
    let mut compact = false;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--node" | "-n" => {
                let url = args.get(i + 1).ok_or_else(|| anyhow!("Missing value for --node"))?;
                config = config.with_node_url(url.clone());
                i += 2;
            },
            "--timeout" | "-t" => {
                let secs = args.get(i + 1).ok_or_else(|| anyhow!("Missing value for --timeout"))?;
                let secs: u64 = secs.parse().with_context(|| format!("Invalid timeout: {}", secs))?;
                config = config.with_timeout(Duration::from_secs(secs));
                i += 2;
            },
            "--abi" => {
                let spec = args.get(i + 1).ok_or_else(|| anyhow!("Missing value for --abi"))?;
                abi_files.push(load_abi(spec)?);
                i += 2;
            },
            "--compact" => {
                compact = true;
                i += 1;
            },
            other => {
                return Err(anyhow!("Unknown argument: {}", other));
            }
        }
    }

    let hex_trx = if args[1] == "-" {
        let mut input = String::new();
        std::io::stdin()
            .read_to_string(&mut input)
            .context("Failed to read transaction from stdin")?;
        input
    } else {
        args[1].clone()
    };

    let decoder = TransactionDecoder::new(HttpAbiProvider::new(&config)?);
    for (account, abi) in abi_files {
        info!("Using local ABI for {}", account);
        decoder.cache().insert(account, abi);
    }

    info!("Decoding transaction using ABIs from {}", config.node_url);
    let parsed = decoder.parse_transaction(&hex_trx).await?;

    let json = if compact {
        serde_json::to_string(&parsed)?
    } else {
        serde_json::to_string_pretty(&parsed)?
    };
    println!("{}", json);

    Ok(())
}

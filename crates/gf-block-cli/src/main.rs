//! Command-line interface for `gf-block`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use gf_block::{
    blocks_to_text, g, Block, ByteTable, Codec, Field, Identity, Substitution, Trailing,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Binary block and GF(2^8) toolbox.
#[derive(Parser)]
#[command(
    name = "gfblock",
    version,
    author,
    about = "Binary blocks, GF(2^8) arithmetic and the Rijndael g step"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a bit string as hexadecimal and decimal.
    Hex {
        /// Bits, most significant first.
        #[arg(value_name = "BITS")]
        bits: String,
    },
    /// Multiply a field element by x.
    Xtime {
        /// Element as hex.
        #[arg(value_name = "HEX")]
        element: String,
        /// Reduction constant of the degree-8 field.
        #[arg(long, value_name = "HEX", default_value = "1b")]
        poly: String,
    },
    /// Multiply two field elements.
    Mul {
        /// Left operand as hex.
        #[arg(value_name = "HEX")]
        lhs: String,
        /// Right operand as hex.
        #[arg(value_name = "HEX")]
        rhs: String,
        /// Reduction constant of the degree-8 field.
        #[arg(long, value_name = "HEX", default_value = "1b")]
        poly: String,
    },
    /// Split text into blocks and print each block as hex.
    Encode {
        /// Text to encode (characters must fit in one byte).
        text: String,
        /// Bytes per block.
        #[arg(long, default_value_t = 16)]
        block_bytes: usize,
        /// Drop a trailing partial block instead of failing.
        #[arg(long, default_value_t = false)]
        drop_trailing: bool,
    },
    /// Join hex blocks back into text.
    Decode {
        /// Blocks as hex, in order.
        #[arg(value_name = "HEX", required = true)]
        blocks: Vec<String>,
    },
    /// Apply the key-schedule g step to a 32-bit word.
    G {
        /// Input word as 8 hex characters.
        #[arg(long, value_name = "HEX")]
        word: String,
        /// Round constant as 8 hex characters.
        #[arg(long, value_name = "HEX")]
        rcon: String,
        /// 256-byte substitution table; identity when omitted.
        #[arg(long, value_name = "FILE")]
        sbox: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Hex { bits } => cmd_hex(&bits),
        Commands::Xtime { element, poly } => cmd_xtime(&element, &poly),
        Commands::Mul { lhs, rhs, poly } => cmd_mul(&lhs, &rhs, &poly),
        Commands::Encode {
            text,
            block_bytes,
            drop_trailing,
        } => cmd_encode(&text, block_bytes, drop_trailing),
        Commands::Decode { blocks } => cmd_decode(&blocks),
        Commands::G { word, rcon, sbox } => cmd_g(&word, &rcon, sbox.as_ref()),
    }
}

fn cmd_hex(bits: &str) -> Result<()> {
    let block: Block = bits.trim().parse().context("parse bit string")?;
    let hex = block.to_hex_string().context("render hex")?;
    println!("hex: {hex}");
    match block.to_decimal() {
        Ok(value) => println!("decimal: {value}"),
        Err(err) => info!("decimal not shown: {err}"),
    }
    Ok(())
}

fn cmd_xtime(element_hex: &str, poly_hex: &str) -> Result<()> {
    let field = parse_field(poly_hex)?;
    let element = parse_block_hex(element_hex, 1)?;
    let result = field.xtime(&element).context("xtime")?;
    println!("{}", result.to_hex_string()?);
    Ok(())
}

fn cmd_mul(lhs_hex: &str, rhs_hex: &str, poly_hex: &str) -> Result<()> {
    let field = parse_field(poly_hex)?;
    let lhs = parse_block_hex(lhs_hex, 1)?;
    let rhs = parse_block_hex(rhs_hex, 1)?;
    let product = field.multiply(&lhs, &rhs).context("multiply")?;
    println!("{}", product.to_hex_string()?);
    Ok(())
}

fn cmd_encode(text: &str, block_bytes: usize, drop_trailing: bool) -> Result<()> {
    let trailing = if drop_trailing {
        Trailing::Drop
    } else {
        Trailing::Reject
    };
    let codec = Codec::new(block_bytes).with_trailing(trailing);
    let blocks = codec.encode_text(text).context("encode text")?;
    for block in &blocks {
        println!("{}", block.to_hex_string()?);
    }
    Ok(())
}

fn cmd_decode(blocks_hex: &[String]) -> Result<()> {
    let blocks = blocks_hex
        .iter()
        .map(|hex_str| -> Result<Block> {
            let bytes = hex::decode(hex_str.trim())
                .with_context(|| format!("decode block hex {hex_str:?}"))?;
            Ok(Block::from_bytes(&bytes))
        })
        .collect::<Result<Vec<_>>>()?;
    let text = blocks_to_text(&blocks).context("decode blocks")?;
    println!("{text}");
    Ok(())
}

fn cmd_g(word_hex: &str, rcon_hex: &str, sbox_path: Option<&PathBuf>) -> Result<()> {
    let word = parse_block_hex(word_hex, 4)?;
    let rcon = parse_block_hex(rcon_hex, 4)?;
    let table = sbox_path.map(load_table).transpose()?;
    let substitution: &dyn Substitution = match &table {
        Some(table) => table,
        None => &Identity,
    };
    let result = g(&word, substitution, &rcon).context("g step")?;
    println!("{}", result.to_hex_string()?);
    Ok(())
}

fn parse_field(poly_hex: &str) -> Result<Field> {
    let reduction = u32::from_str_radix(poly_hex.trim().trim_start_matches("0x"), 16)
        .context("decode reduction constant")?;
    let field = Field::new(8, reduction).context("field parameters")?;
    debug!(reduction = field.reduction(), "using degree-8 field");
    Ok(field)
}

fn parse_block_hex(hex_str: &str, expected_bytes: usize) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode hex")?;
    if bytes.len() != expected_bytes {
        bail!(
            "expected {expected_bytes} byte(s) ({} hex characters), got {}",
            expected_bytes * 2,
            bytes.len()
        );
    }
    Ok(Block::from_bytes(&bytes))
}

fn load_table(path: &PathBuf) -> Result<ByteTable> {
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    ByteTable::from_slice(&bytes).with_context(|| format!("load table {}", path.display()))
}

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::exit::{CliError, CliResult, USAGE};
use crate::output::OutputFormat;

pub mod character;
pub mod crc;
pub mod frame;
pub mod packet;
pub mod route;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a character and classify how it decodes.
    Char(CharArgs),
    /// Compute the CRC-16-CCITT of a payload.
    Crc(CrcArgs),
    /// Encode or decode a link frame.
    #[command(subcommand)]
    Frame(FrameCommand),
    /// Create or decode a space packet carried in a frame.
    #[command(subcommand)]
    Packet(PacketCommand),
    /// Pick the egress port for a target address.
    Route(RouteArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Char(args) => character::run(args, format),
        Command::Crc(args) => crc::run(args, format),
        Command::Frame(FrameCommand::Encode(args)) => frame::encode(args, format),
        Command::Frame(FrameCommand::Decode(args)) => frame::decode(args, format),
        Command::Packet(PacketCommand::Create(args)) => packet::create(args, format),
        Command::Packet(PacketCommand::Decode(args)) => packet::decode(args, format),
        Command::Route(args) => route::run(args, format),
        Command::Version(args) => version::run(args),
    }
}

#[derive(Subcommand, Debug)]
pub enum FrameCommand {
    /// Encode a payload into a frame.
    Encode(FrameEncodeArgs),
    /// Decode and verify a frame.
    Decode(HexInputArgs),
}

#[derive(Subcommand, Debug)]
pub enum PacketCommand {
    /// Build a telemetry packet and encode it into a frame.
    Create(PacketCreateArgs),
    /// Decode a frame and parse its space packet.
    Decode(PacketDecodeArgs),
}

/// Payload given either as hex digits or as text.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct PayloadArgs {
    /// Payload as hex digits (whitespace ignored).
    #[arg(long)]
    pub hex: Option<String>,
    /// Payload as UTF-8 text.
    #[arg(long)]
    pub text: Option<String>,
}

impl PayloadArgs {
    pub fn bytes(&self) -> CliResult<Vec<u8>> {
        match (&self.hex, &self.text) {
            (Some(hex), _) => parse_hex(hex),
            (None, Some(text)) => Ok(text.as_bytes().to_vec()),
            (None, None) => Err(CliError::new(USAGE, "one of --hex or --text is required")),
        }
    }
}

#[derive(Args, Debug)]
pub struct CharArgs {
    /// Byte value (decimal or 0x-prefixed hex).
    #[arg(value_parser = parse_u8)]
    pub value: u8,
    /// Parity bit to decode with instead of the computed one.
    #[arg(long)]
    pub parity: Option<u8>,
}

#[derive(Args, Debug)]
pub struct CrcArgs {
    #[command(flatten)]
    pub payload: PayloadArgs,
    /// Initial register value.
    #[arg(long, value_parser = parse_u16, default_value = "0xFFFF")]
    pub init: u16,
}

#[derive(Args, Debug)]
pub struct FrameEncodeArgs {
    /// Target logical address.
    #[arg(long, value_parser = parse_u8)]
    pub target: u8,
    /// Protocol identifier.
    #[arg(long, value_parser = parse_u8, default_value = "1")]
    pub protocol: u8,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct HexInputArgs {
    /// Encoded bytes as hex digits.
    pub hex: String,
}

#[derive(Args, Debug)]
pub struct PacketCreateArgs {
    /// Source logical address.
    #[arg(long, value_parser = parse_u8, default_value = "0")]
    pub device: u8,
    /// Target logical address.
    #[arg(long, value_parser = parse_u8)]
    pub target: u8,
    /// Application process identifier (0..=0x7FF).
    #[arg(long, value_parser = parse_u16)]
    pub apid: u16,
    #[command(flatten)]
    pub payload: PayloadArgs,
}

#[derive(Args, Debug)]
pub struct PacketDecodeArgs {
    /// Encoded frame as hex digits.
    pub hex: String,
    /// Secondary header length to split off when the packet flags one.
    #[arg(long, default_value = "0")]
    pub secondary_header_len: usize,
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Target logical address to route.
    #[arg(value_parser = parse_u8)]
    pub target: u8,
    /// Router config file (JSON).
    #[arg(long, value_name = "FILE", conflicts_with_all = ["device", "ports", "routes", "connected", "channels"])]
    pub config: Option<PathBuf>,
    /// Device logical address.
    #[arg(long, value_parser = parse_u8, default_value = "0")]
    pub device: u8,
    /// Active port count.
    #[arg(long, default_value = "8")]
    pub ports: u8,
    /// Static route as DEST:PORT (repeatable).
    #[arg(long = "route", value_name = "DEST:PORT", value_parser = parse_route)]
    pub routes: Vec<(u8, u8)>,
    /// Ports whose links are connected (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub connected: Vec<u8>,
    /// Virtual channels to open (comma-separated).
    #[arg(long, value_delimiter = ',')]
    pub channels: Vec<u8>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

pub fn parse_hex(input: &str) -> CliResult<Vec<u8>> {
    let digits: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let digits = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
        .unwrap_or(&digits);
    hex::decode(digits).map_err(|err| CliError::new(USAGE, format!("invalid hex input: {err}")))
}

fn parse_number(input: &str) -> Result<u64, String> {
    let input = input.trim();
    let parsed = match input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
    {
        Some(hex) => u64::from_str_radix(hex, 16),
        None => input.parse(),
    };
    parsed.map_err(|_| format!("invalid number: {input}"))
}

pub fn parse_u8(input: &str) -> Result<u8, String> {
    let value = parse_number(input)?;
    u8::try_from(value).map_err(|_| format!("{input} does not fit in 8 bits"))
}

pub fn parse_u16(input: &str) -> Result<u16, String> {
    let value = parse_number(input)?;
    u16::try_from(value).map_err(|_| format!("{input} does not fit in 16 bits"))
}

fn parse_route(input: &str) -> Result<(u8, u8), String> {
    let (dest, port) = input
        .split_once(':')
        .ok_or_else(|| format!("expected DEST:PORT, got {input}"))?;
    Ok((parse_u8(dest)?, parse_u8(port)?))
}

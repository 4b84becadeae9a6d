use serde::Serialize;
use swlink_frame::frame_size;
use swlink_packet::{create_packet, PacketFrame, Statistics, StatisticsSnapshot};
use swlink_spacepacket::PRIMARY_HEADER_SIZE;

use crate::cmd::{parse_hex, PacketCreateArgs, PacketDecodeArgs};
use crate::exit::{packet_error, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

#[derive(Serialize)]
struct CreatedOutput {
    size: usize,
    frame: String,
    statistics: StatisticsSnapshot,
}

#[derive(Serialize)]
struct DecodedOutput {
    target_addr: u8,
    protocol_id: u8,
    version: u8,
    packet_type: &'static str,
    apid: u16,
    sequence_flags: &'static str,
    sequence_count: u16,
    secondary_header: Option<String>,
    user_data: String,
    statistics: StatisticsSnapshot,
}

pub fn create(args: PacketCreateArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = args.payload.bytes()?;
    let stats = Statistics::new();

    let mut buf = vec![0u8; frame_size(PRIMARY_HEADER_SIZE + payload.len())];
    let size = create_packet(
        args.device,
        args.target,
        args.apid,
        &payload,
        &mut buf,
        &stats,
    )
    .map_err(|err| packet_error("create", err))?;

    print_record(
        &CreatedOutput {
            size,
            frame: hex::encode(&buf[..size]),
            statistics: stats.snapshot(),
        },
        format,
    );
    Ok(SUCCESS)
}

pub fn decode(args: PacketDecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = parse_hex(&args.hex)?;
    let stats = Statistics::new();

    let pf = PacketFrame::decode_with_secondary_header(&bytes, args.secondary_header_len, &stats)
        .map_err(|err| {
            tracing::debug!(statistics = ?stats.snapshot(), "packet decode failed");
            packet_error("decode", err)
        })?;

    let header = pf.packet.header;
    print_record(
        &DecodedOutput {
            target_addr: pf.target_addr,
            protocol_id: pf.protocol_id,
            version: header.version,
            packet_type: header.packet_type.as_str(),
            apid: header.apid,
            sequence_flags: header.sequence_flags.as_str(),
            sequence_count: header.sequence_count,
            secondary_header: header
                .secondary_header
                .then(|| hex::encode(pf.packet.secondary_header)),
            user_data: hex::encode(pf.packet.user_data),
            statistics: stats.snapshot(),
        },
        format,
    );
    Ok(SUCCESS)
}

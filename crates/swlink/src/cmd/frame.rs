use serde::Serialize;
use swlink_frame::{decode_frame, encode_frame, protocol_name, Frame, CRC_SIZE};

use crate::cmd::{parse_hex, FrameEncodeArgs, HexInputArgs};
use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

#[derive(Serialize)]
struct EncodedOutput {
    size: usize,
    crc: String,
    frame: String,
}

#[derive(Serialize)]
struct DecodedOutput<'a> {
    target_addr: u8,
    protocol_id: u8,
    protocol: &'a str,
    payload_len: usize,
    payload: String,
}

pub fn encode(args: FrameEncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let payload = args.payload.bytes()?;
    let frame = Frame::new(args.target, args.protocol, &payload);

    let mut buf = vec![0u8; frame.size()];
    let size = encode_frame(&frame, &mut buf).map_err(|err| frame_error("encode", err))?;
    let crc = u16::from_be_bytes([buf[size - CRC_SIZE], buf[size - 1]]);

    print_record(
        &EncodedOutput {
            size,
            crc: format!("{crc:#06x}"),
            frame: hex::encode(&buf[..size]),
        },
        format,
    );
    Ok(SUCCESS)
}

pub fn decode(args: HexInputArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = parse_hex(&args.hex)?;
    let frame = decode_frame(&bytes).map_err(|err| frame_error("decode", err))?;

    print_record(
        &DecodedOutput {
            target_addr: frame.target_addr,
            protocol_id: frame.protocol_id,
            protocol: protocol_name(frame.protocol_id),
            payload_len: frame.payload.len(),
            payload: hex::encode(frame.payload),
        },
        format,
    );
    Ok(SUCCESS)
}

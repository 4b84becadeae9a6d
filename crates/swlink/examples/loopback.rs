//! Loopback example: encode telemetry packets, corrupt one on the "wire",
//! decode them all and print the transfer statistics.
//!
//! Run with:
//!   cargo run --example loopback

use swlink::packet::{create_packet, PacketFrame, Statistics};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let stats = Statistics::new();
    let mut wire = Vec::new();

    for (seq, reading) in [b"temp=21.5", b"temp=21.7", b"temp=22.0"].iter().enumerate() {
        let mut buf = [0u8; 64];
        let len = create_packet(0x01, 0x02, 0x0100, *reading, &mut buf, &stats)?;
        let mut frame = buf[..len].to_vec();
        if seq == 1 {
            frame[4] ^= 0x01;
        }
        wire.push(frame);
    }

    for frame in &wire {
        match PacketFrame::decode(frame, &stats) {
            Ok(pf) => println!(
                "apid={:#05x} data={}",
                pf.packet.header.apid,
                String::from_utf8_lossy(pf.packet.user_data)
            ),
            Err(err) if err.is_line_error() => println!("dropped: {err}"),
            Err(err) => return Err(err.into()),
        }
    }

    println!("{:?}", stats.snapshot());
    Ok(())
}

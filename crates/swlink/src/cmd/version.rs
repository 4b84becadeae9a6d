use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("swlink {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: swlink");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!(
        "build_target: {}",
        option_env!("SWLINK_BUILD_TARGET").unwrap_or("unknown")
    );
    println!("target_os: {}", std::env::consts::OS);
    println!("target_arch: {}", std::env::consts::ARCH);
    println!(
        "crc: CRC-16-CCITT poly={:#06x} init={:#06x}",
        swlink_frame::CRC16_POLY,
        swlink_frame::CRC16_INIT
    );
    println!("max_ports: {}", swlink_router::MAX_PORTS);
    println!("max_channels: {}", swlink_router::MAX_CHANNELS);

    Ok(SUCCESS)
}

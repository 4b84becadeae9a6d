use serde::Serialize;
use swlink_frame::crc16_with_init;

use crate::cmd::CrcArgs;
use crate::exit::{CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

#[derive(Serialize)]
struct CrcOutput {
    len: usize,
    init: String,
    crc: String,
}

pub fn run(args: CrcArgs, format: OutputFormat) -> CliResult<i32> {
    let data = args.payload.bytes()?;
    let crc = crc16_with_init(&data, args.init);

    print_record(
        &CrcOutput {
            len: data.len(),
            init: format!("{:#06x}", args.init),
            crc: format!("{crc:#06x}"),
        },
        format,
    );
    Ok(SUCCESS)
}

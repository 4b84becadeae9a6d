use serde::Serialize;
use swlink_frame::{decode_char, encode_char, Character};

use crate::cmd::CharArgs;
use crate::exit::{char_error, CliResult, SUCCESS};
use crate::output::{print_record, OutputFormat};

#[derive(Serialize)]
struct CharOutput {
    byte: String,
    parity: u8,
    kind: &'static str,
    control: Option<&'static str>,
}

pub fn run(args: CharArgs, format: OutputFormat) -> CliResult<i32> {
    let encoded = encode_char(args.value);
    let parity = args.parity.unwrap_or(encoded.parity);
    let decoded = decode_char(encoded.byte, parity).map_err(|err| char_error("decode", err))?;

    let out = match decoded {
        Character::Data(_) => CharOutput {
            byte: format!("{:#04x}", encoded.byte),
            parity,
            kind: "data",
            control: None,
        },
        Character::Control(code) => CharOutput {
            byte: format!("{:#04x}", encoded.byte),
            parity,
            kind: "control",
            control: Some(code.name()),
        },
    };
    print_record(&out, format);
    Ok(SUCCESS)
}

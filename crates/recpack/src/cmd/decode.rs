use recpack_codec::CodecConfig;

use crate::cmd::input::read_input;
use crate::cmd::DecodeArgs;
use crate::exit::{codec_error, CliResult, SUCCESS};
use crate::output::{print_person, OutputFormat};

pub fn run(args: DecodeArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = read_input(&args.input)?;
    let config = if args.strict {
        CodecConfig::strict()
    } else {
        CodecConfig::default()
    };

    let person = recpack_codec::decode_with_config(&bytes, &config)
        .map_err(|err| codec_error("decode failed", err))?;

    let trailing = bytes.len() - person.encoded_len();
    if trailing > 0 {
        tracing::debug!(trailing, "ignored bytes after record");
    }

    print_person(&person, format);
    Ok(SUCCESS)
}

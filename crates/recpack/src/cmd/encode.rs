use std::fs::OpenOptions;
use std::io::Write;

use recpack_codec::Person;

use crate::cmd::EncodeArgs;
use crate::exit::{codec_error, io_error, CliResult, SUCCESS};
use crate::output::{print_encoded, OutputFormat};

pub fn run(args: EncodeArgs, format: OutputFormat) -> CliResult<i32> {
    let person = Person::new(args.age, args.name.into_bytes());
    let encoded =
        recpack_codec::encode(&person).map_err(|err| codec_error("encode failed", err))?;

    let Some(path) = &args.out else {
        print_encoded(&encoded, format);
        return Ok(SUCCESS);
    };

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .append(args.append)
        .truncate(!args.append)
        .open(path)
        .map_err(|err| io_error(&format!("failed opening {}", path.display()), err))?;
    file.write_all(&encoded)
        .map_err(|err| io_error(&format!("failed writing {}", path.display()), err))?;

    tracing::info!(
        path = %path.display(),
        bytes = encoded.len(),
        append = args.append,
        "wrote record"
    );
    Ok(SUCCESS)
}

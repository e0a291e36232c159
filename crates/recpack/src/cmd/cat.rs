use std::fs::File;
use std::io::BufReader;

use recpack_codec::{CodecConfig, RecordReader};

use crate::cmd::CatArgs;
use crate::exit::{codec_error, io_error, CliResult, SUCCESS};
use crate::output::{print_person, OutputFormat};

pub fn run(args: CatArgs, format: OutputFormat) -> CliResult<i32> {
    let file = File::open(&args.file)
        .map_err(|err| io_error(&format!("failed opening {}", args.file.display()), err))?;

    let mut config = CodecConfig::default();
    if let Some(max) = args.max_name_len {
        config.max_name_len = max;
    }

    let mut reader = RecordReader::with_config(BufReader::new(file), config);
    let mut count = 0usize;
    for record in reader.records() {
        let person =
            record.map_err(|err| codec_error(&format!("record {count} unreadable"), err))?;
        print_person(&person, format);
        count += 1;
    }

    tracing::info!(path = %args.file.display(), records = count, "finished reading records");
    Ok(SUCCESS)
}

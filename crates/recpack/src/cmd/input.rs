use std::fs;
use std::io::Read;

use crate::cmd::InputArgs;
use crate::exit::{io_error, CliError, CliResult, USAGE};

pub fn read_input(args: &InputArgs) -> CliResult<Vec<u8>> {
    if let Some(text) = &args.hex {
        return parse_hex(text);
    }
    if let Some(path) = &args.file {
        return fs::read(path)
            .map_err(|err| io_error(&format!("failed reading {}", path.display()), err));
    }

    let mut buf = Vec::new();
    std::io::stdin()
        .read_to_end(&mut buf)
        .map_err(|err| io_error("failed reading stdin", err))?;
    Ok(buf)
}

fn parse_hex(text: &str) -> CliResult<Vec<u8>> {
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(&compact)
        .map_err(|err| CliError::new(USAGE, format!("--hex is not valid hex: {err}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hex_allows_whitespace() {
        assert_eq!(
            parse_hex("E6 FD a8 85\n1e").unwrap(),
            vec![0xE6u8, 0xFD, 0xA8, 0x85, 0x1E]
        );
    }

    #[test]
    fn parse_hex_rejects_odd_length() {
        let err = parse_hex("E6F").unwrap_err();
        assert_eq!(err.code, USAGE);
    }

    #[test]
    fn parse_hex_rejects_non_hex() {
        assert!(parse_hex("zz").is_err());
    }
}

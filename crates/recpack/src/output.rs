use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use recpack_codec::Person;
use serde::Serialize;

pub const PERSON_SCHEMA_ID: &str = "https://schemas.3leaps.dev/recpack/cli/v1/person.schema.json";
pub const ENCODED_SCHEMA_ID: &str =
    "https://schemas.3leaps.dev/recpack/cli/v1/encoded-record.schema.json";

#[derive(Clone, Debug, Copy, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PersonOutput<'a> {
    schema_id: &'a str,
    age: u32,
    name: String,
    name_utf8: bool,
    encoded_len: usize,
}

#[derive(Serialize)]
struct EncodedOutput<'a> {
    schema_id: &'a str,
    len: usize,
    hex: String,
}

pub fn print_person(person: &Person, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = PersonOutput {
                schema_id: PERSON_SCHEMA_ID,
                age: person.age,
                name: name_preview(&person.name),
                name_utf8: person.name_str().is_some(),
                encoded_len: person.encoded_len(),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["AGE", "NAME", "ENCODED SIZE"])
                .add_row(vec![
                    person.age.to_string(),
                    name_preview(&person.name),
                    person.encoded_len().to_string(),
                ]);
            println!("{table}");
        }
        OutputFormat::Pretty => {
            println!(
                "age={} name={} size={}",
                person.age,
                name_preview(&person.name),
                person.encoded_len()
            );
        }
        OutputFormat::Raw => {
            print_raw(&person.name);
        }
    }
}

pub fn print_encoded(bytes: &[u8], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            let out = EncodedOutput {
                schema_id: ENCODED_SCHEMA_ID,
                len: bytes.len(),
                hex: hex::encode(bytes),
            };
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("{}", spaced_hex(bytes));
        }
        OutputFormat::Raw => {
            print_raw(bytes);
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}

/// Upper-case hex, one space between bytes.
pub fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02X}"))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn name_preview(name: &[u8]) -> String {
    match std::str::from_utf8(name) {
        Ok(text) => text.to_string(),
        Err(_) => format!("<binary {} bytes>", name.len()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spaced_hex_formats_bytes() {
        assert_eq!(spaced_hex(&[0xE6, 0x0A, 0x00]), "E6 0A 00");
        assert_eq!(spaced_hex(&[]), "");
    }

    #[test]
    fn name_preview_handles_binary() {
        assert_eq!(name_preview(b"Tom"), "Tom");
        assert_eq!(name_preview(&[0xFF, 0x00]), "<binary 2 bytes>");
    }

    #[test]
    fn person_json_has_schema_id() {
        let out = PersonOutput {
            schema_id: PERSON_SCHEMA_ID,
            age: 30,
            name: "Tom".to_string(),
            name_utf8: true,
            encoded_len: 12,
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("person.schema.json"));
        assert!(json.contains("\"age\":30"));
        assert!(json.contains("\"encoded_len\":12"));
    }
}

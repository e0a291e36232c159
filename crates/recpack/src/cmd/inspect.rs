use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use recpack_codec::{AGE_OFFSET, FIXED_SIZE, NAME_LEN_OFFSET, NAME_OFFSET, SCHEMA_TAG, TAG_SIZE};
use serde::Serialize;

use crate::cmd::input::read_input;
use crate::cmd::InspectArgs;
use crate::exit::{CliResult, DATA_INVALID, SUCCESS};
use crate::output::{name_preview, spaced_hex, OutputFormat};

#[derive(Debug, Serialize)]
struct FieldRow {
    offset: usize,
    size: usize,
    field: &'static str,
    bytes: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct InspectOutput {
    schema_id: &'static str,
    total_len: usize,
    fields: Vec<FieldRow>,
    trailing: usize,
    valid: bool,
    error: Option<String>,
}

pub fn run(args: InspectArgs, format: OutputFormat) -> CliResult<i32> {
    let bytes = read_input(&args.input)?;
    let out = inspect(&bytes);
    print_inspect(&out, format);

    if out.valid {
        Ok(SUCCESS)
    } else {
        Ok(DATA_INVALID)
    }
}

/// Lay out whatever fields are present, even when the record itself is invalid.
fn inspect(bytes: &[u8]) -> InspectOutput {
    let mut fields = Vec::new();

    if let Some(tag) = bytes.get(..TAG_SIZE) {
        let found = u32::from_le_bytes([tag[0], tag[1], tag[2], tag[3]]);
        let verdict = if found == SCHEMA_TAG { "ok" } else { "mismatch" };
        fields.push(FieldRow {
            offset: 0,
            size: TAG_SIZE,
            field: "schema_tag",
            bytes: spaced_hex(tag),
            value: format!("{found} ({verdict})"),
        });
    }

    if let Some(age) = bytes.get(AGE_OFFSET..NAME_LEN_OFFSET) {
        fields.push(FieldRow {
            offset: AGE_OFFSET,
            size: age.len(),
            field: "age",
            bytes: spaced_hex(age),
            value: u32::from_le_bytes([age[0], age[1], age[2], age[3]]).to_string(),
        });
    }

    let mut record_len = bytes.len();
    if let Some(&name_len) = bytes.get(NAME_LEN_OFFSET) {
        fields.push(FieldRow {
            offset: NAME_LEN_OFFSET,
            size: 1,
            field: "name_length",
            bytes: format!("{name_len:02X}"),
            value: name_len.to_string(),
        });

        let end = (FIXED_SIZE + name_len as usize).min(bytes.len());
        let name = &bytes[NAME_OFFSET..end];
        fields.push(FieldRow {
            offset: NAME_OFFSET,
            size: name.len(),
            field: "name",
            bytes: spaced_hex(name),
            value: name_preview(name),
        });
        record_len = end;
    }

    let (valid, error) = match recpack_codec::decode(bytes) {
        Ok(_) => (true, None),
        Err(err) => (false, Some(err.to_string())),
    };

    InspectOutput {
        schema_id: "https://schemas.3leaps.dev/recpack/cli/v1/record-layout.schema.json",
        total_len: bytes.len(),
        fields,
        trailing: bytes.len() - record_len,
        valid,
        error,
    }
}

fn print_inspect(out: &InspectOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["OFFSET", "SIZE", "FIELD", "BYTES", "VALUE"]);
            for row in &out.fields {
                table.add_row(vec![
                    row.offset.to_string(),
                    row.size.to_string(),
                    row.field.to_string(),
                    row.bytes.clone(),
                    row.value.clone(),
                ]);
            }
            println!("{table}");
            print_verdict(out);
        }
        OutputFormat::Pretty => {
            for row in &out.fields {
                println!(
                    "  {:>3} +{:<3} {:<12} {}",
                    row.offset, row.size, row.field, row.value
                );
            }
            print_verdict(out);
        }
        OutputFormat::Raw => {
            println!("{}", if out.valid { "valid" } else { "invalid" });
        }
    }
}

fn print_verdict(out: &InspectOutput) {
    match &out.error {
        None if out.trailing > 0 => {
            println!("valid record, {} trailing bytes ignored", out.trailing)
        }
        None => println!("valid record ({} bytes)", out.total_len),
        Some(err) => println!("invalid record: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOM: [u8; 12] = [
        0xE6, 0xFD, 0xA8, 0x85, 0x1E, 0x00, 0x00, 0x00, 0x03, b'T', b'o', b'm',
    ];

    #[test]
    fn inspect_valid_record() {
        let out = inspect(&TOM);
        assert!(out.valid);
        assert_eq!(out.trailing, 0);

        let fields: Vec<_> = out.fields.iter().map(|f| f.field).collect();
        assert_eq!(fields, vec!["schema_tag", "age", "name_length", "name"]);
        assert_eq!(out.fields[0].value, "2242444774 (ok)");
        assert_eq!(out.fields[1].value, "30");
        assert_eq!(out.fields[3].bytes, "54 6F 6D");
        assert_eq!(out.fields[3].value, "Tom");
    }

    #[test]
    fn inspect_partial_record() {
        let out = inspect(&TOM[..5]);
        assert!(!out.valid);
        assert_eq!(out.fields.len(), 1);
        assert!(out.error.unwrap().contains("truncated"));
    }

    #[test]
    fn inspect_reports_trailing_bytes() {
        let mut bytes = TOM.to_vec();
        bytes.extend_from_slice(&[0, 0]);

        let out = inspect(&bytes);
        assert!(out.valid);
        assert_eq!(out.trailing, 2);
    }

    #[test]
    fn inspect_marks_tag_mismatch() {
        let mut bytes = TOM.to_vec();
        bytes[0] = 0;

        let out = inspect(&bytes);
        assert!(!out.valid);
        assert!(out.fields[0].value.ends_with("(mismatch)"));
    }
}

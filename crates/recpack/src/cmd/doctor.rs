use recpack_codec::{CodecError, Person, SCHEMA_TAG};
use serde::Serialize;

use crate::cmd::DoctorArgs;
use crate::exit::{CliResult, HEALTH_CHECK_FAILED, SUCCESS};
use crate::output::{spaced_hex, OutputFormat};

/// `Person{age: 30, name: "Tom"}` on the wire.
const KNOWN_VECTOR: [u8; 12] = [
    0xE6, 0xFD, 0xA8, 0x85, 0x1E, 0x00, 0x00, 0x00, 0x03, b'T', b'o', b'm',
];

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum CheckStatus {
    Pass,
    Fail,
    Info,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    name: String,
    status: CheckStatus,
    detail: String,
}

#[derive(Debug, Serialize)]
struct DoctorOutput {
    schema_id: &'static str,
    checks: Vec<CheckResult>,
    overall: &'static str,
}

pub fn run(_args: DoctorArgs, format: OutputFormat) -> CliResult<i32> {
    let checks = vec![
        known_vector_encode_check(),
        known_vector_decode_check(),
        schema_rejection_check(),
        host_byte_order_check(),
        compiled_features_check(),
    ];

    let has_fail = checks.iter().any(|c| matches!(c.status, CheckStatus::Fail));
    let overall = if has_fail { "fail" } else { "pass" };

    let output = DoctorOutput {
        schema_id: "https://schemas.3leaps.dev/recpack/cli/v1/doctor-report.schema.json",
        checks,
        overall,
    };

    print_doctor(&output, format);

    if has_fail {
        Ok(HEALTH_CHECK_FAILED)
    } else {
        Ok(SUCCESS)
    }
}

fn print_doctor(output: &DoctorOutput, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string(output).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Table | OutputFormat::Pretty => {
            println!("recpack doctor\n");
            for c in &output.checks {
                println!(
                    "  [{:>4}] {:<22} {}",
                    status_text(c.status),
                    c.name,
                    c.detail
                );
            }
            if output.overall == "pass" {
                println!("\n  Result: all checks passed");
            } else {
                println!("\n  Result: one or more checks failed");
            }
        }
        OutputFormat::Raw => {
            println!("{}", output.overall);
        }
    }
}

fn status_text(status: CheckStatus) -> &'static str {
    match status {
        CheckStatus::Pass => "PASS",
        CheckStatus::Fail => "FAIL",
        CheckStatus::Info => "INFO",
    }
}

fn check(name: &str, ok: bool, detail: String) -> CheckResult {
    CheckResult {
        name: name.to_string(),
        status: if ok {
            CheckStatus::Pass
        } else {
            CheckStatus::Fail
        },
        detail,
    }
}

fn known_vector_encode_check() -> CheckResult {
    match recpack_codec::encode(&Person::new(30, "Tom")) {
        Ok(bytes) if bytes[..] == KNOWN_VECTOR[..] => check(
            "known_vector_encode",
            true,
            format!("{} bytes match", bytes.len()),
        ),
        Ok(bytes) => check(
            "known_vector_encode",
            false,
            format!("got {}", spaced_hex(&bytes)),
        ),
        Err(err) => check("known_vector_encode", false, err.to_string()),
    }
}

fn known_vector_decode_check() -> CheckResult {
    match recpack_codec::decode(&KNOWN_VECTOR) {
        Ok(person) if person == Person::new(30, "Tom") => {
            check("known_vector_decode", true, "age=30 name=Tom".to_string())
        }
        Ok(person) => check(
            "known_vector_decode",
            false,
            format!("decoded {person:?}"),
        ),
        Err(err) => check("known_vector_decode", false, err.to_string()),
    }
}

fn schema_rejection_check() -> CheckResult {
    let mut foreign = KNOWN_VECTOR;
    foreign[..4].copy_from_slice(&[0, 0, 0, 0]);

    match recpack_codec::decode(&foreign) {
        Err(CodecError::SchemaMismatch { .. }) => check(
            "schema_rejection",
            true,
            format!("foreign tag rejected (expected {SCHEMA_TAG:#010x})"),
        ),
        Ok(_) => check(
            "schema_rejection",
            false,
            "foreign tag accepted".to_string(),
        ),
        Err(err) => check("schema_rejection", false, format!("unexpected error: {err}")),
    }
}

fn host_byte_order_check() -> CheckResult {
    let host = if cfg!(target_endian = "little") {
        "little"
    } else {
        "big"
    };
    CheckResult {
        name: "host_byte_order".to_string(),
        status: CheckStatus::Info,
        detail: format!("host is {host}-endian; wire format is always little-endian"),
    }
}

fn compiled_features_check() -> CheckResult {
    let mut features = Vec::new();
    if cfg!(feature = "serde") {
        features.push("serde");
    }
    if cfg!(feature = "cli") {
        features.push("cli");
    }

    CheckResult {
        name: "compiled_features".to_string(),
        status: CheckStatus::Info,
        detail: features.join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codec_checks_pass() {
        for result in [
            known_vector_encode_check(),
            known_vector_decode_check(),
            schema_rejection_check(),
        ] {
            assert!(
                matches!(result.status, CheckStatus::Pass),
                "{} failed: {}",
                result.name,
                result.detail
            );
        }
    }

    #[test]
    fn doctor_json_has_schema_id() {
        let out = DoctorOutput {
            schema_id: "x",
            checks: vec![host_byte_order_check()],
            overall: "pass",
        };
        let json = serde_json::to_string(&out).unwrap();
        assert!(json.contains("\"status\":\"info\""));
        assert!(json.contains("\"overall\":\"pass\""));
    }
}

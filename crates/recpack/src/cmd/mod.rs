use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::exit::CliResult;
use crate::output::OutputFormat;

pub mod cat;
pub mod decode;
pub mod doctor;
pub mod encode;
pub mod input;
pub mod inspect;
pub mod version;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encode a single Person record.
    Encode(EncodeArgs),
    /// Decode a single Person record.
    Decode(DecodeArgs),
    /// Show the field layout of an encoded record.
    Inspect(InspectArgs),
    /// Decode every record in a file of back-to-back records.
    Cat(CatArgs),
    /// Show version information.
    Version(VersionArgs),
    /// Run codec self-checks against the known wire layout.
    Doctor(DoctorArgs),
}

pub fn run(command: Command, format: OutputFormat) -> CliResult<i32> {
    match command {
        Command::Encode(args) => encode::run(args, format),
        Command::Decode(args) => decode::run(args, format),
        Command::Inspect(args) => inspect::run(args, format),
        Command::Cat(args) => cat::run(args, format),
        Command::Version(args) => version::run(args),
        Command::Doctor(args) => doctor::run(args, format),
    }
}

#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Age field (unsigned 32-bit).
    #[arg(long)]
    pub age: u32,
    /// Name field (at most 255 bytes).
    #[arg(long)]
    pub name: String,
    /// Write the encoded record to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE")]
    pub out: Option<PathBuf>,
    /// Append to --out instead of truncating it.
    #[arg(long, requires = "out")]
    pub append: bool,
}

/// Where encoded bytes come from: a file, a hex string, or stdin.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Read the encoded record from a file. Default: stdin.
    #[arg(conflicts_with = "hex")]
    pub file: Option<PathBuf>,
    /// Encoded record as hex (whitespace allowed).
    #[arg(long)]
    pub hex: Option<String>,
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Reject bytes after the record instead of ignoring them.
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct CatArgs {
    /// File of back-to-back encoded records.
    pub file: PathBuf,
    /// Reject records whose declared name is longer than this.
    #[arg(long, value_name = "BYTES")]
    pub max_name_len: Option<usize>,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

#[derive(Args, Debug, Default)]
pub struct DoctorArgs {}

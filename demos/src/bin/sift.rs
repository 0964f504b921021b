// SPDX-License-Identifier: Apache-2.0

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use jsonsift::{Decoder, FieldFilter, Value, ValueBuilder, DEFAULT_MAX_DEPTH};

/// Prints the allow-listed fields of a JSON document's root object.
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Field to keep; repeat to keep several. Replaces the default list.
    #[arg(short, long = "field", value_name = "NAME")]
    fields: Vec<String>,

    /// Hand numbers to the host as text and parse them there
    #[arg(long)]
    raw_numbers: bool,

    /// Limit on nested containers kept in the record
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Bytes read per chunk
    #[arg(long, default_value_t = 4096)]
    chunk_size: usize,

    /// JSON document to read; standard input when absent
    path: Option<PathBuf>,
}

fn run(args: &Args, input: &mut dyn Read) -> Result<Value, String> {
    let filter = if args.fields.is_empty() {
        FieldFilter::default()
    } else {
        args.fields.iter().map(String::as_str).collect()
    };
    let mut decoder = Decoder::new(&filter)
        .max_depth(args.max_depth)
        .raw_numbers(args.raw_numbers);
    log::debug!("keeping {} fields", decoder.filter().len());
    let mut stream = decoder.stream(ValueBuilder);
    let mut buf = vec![0u8; args.chunk_size.max(1)];
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(format!("read failed: {e}")),
        };
        stream.write(&buf[..n]).map_err(|e| e.to_string())?;
    }
    log::debug!("read {} bytes", stream.offset());
    stream.finish().map_err(|e| e.to_string())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let mut input: Box<dyn Read> = match &args.path {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(file),
            Err(e) => {
                eprintln!("Error: Unable to open file '{}': {}", path.display(), e);
                std::process::exit(1);
            }
        },
        None => Box::new(io::stdin().lock()),
    };

    match run(&args, &mut input) {
        Ok(record) => println!("{record}"),
        Err(message) => {
            eprintln!("{message}");
            std::process::exit(1);
        }
    }
}

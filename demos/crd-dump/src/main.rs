//! # crd-dump
//!
//! `crd-dump` prints the contents of Windows Cardfile (`.crd`) files, built on `crd-rs`.
//!
//! ## Usage
//! ```sh
//! cargo run -p crd-dump -- -e Windows-1251 "cards/*.crd"
//! ```
//!
//! In the Windows terminal, set the matching code page (`chcp 65001` for UTF-8 output).
use clap::{Arg, ArgAction, Command};
use crd_rs::text_decoder::TextDecoder;
use crd_rs::{Card, CardBody, CardError, CardFile, DecodeOptions, SourceEncoding};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::exit;

fn main() {
    let matches = Command::new("crd-dump")
        .version("0.1.0")
        .about("Opens Windows CRD (contact card) files")
        .arg(
            Arg::new("encoding")
                .short('e')
                .long("encoding")
                .help("Decode card text from this encoding to UTF-8 (ascii, Windows-1251)")
                .value_parser(|s: &str| s.parse::<SourceEncoding>().map_err(|e| e.to_string()))
                .default_value("ascii")
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("max_text_size")
                .long("max-text-size")
                .help("Upper bound, in bytes, for transcoded text")
                .value_parser(clap::value_parser!(usize))
                .action(ArgAction::Set),
        )
        .arg(
            Arg::new("files")
                .help("Card files or glob patterns")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append),
        )
        .get_matches();

    let mut options = DecodeOptions::default();
    if let Some(encoding) = matches.get_one::<SourceEncoding>("encoding") {
        options = options.with_encoding(*encoding);
    }
    if let Some(max_text_size) = matches.get_one::<usize>("max_text_size") {
        options = options.with_max_text_size(*max_text_size);
    }

    let mut failed = false;
    for pattern in matches.get_many::<String>("files").into_iter().flatten() {
        for path in expand(pattern) {
            println!("\nWindows Card File {}", path.display());
            match CardFile::open(&path, &options) {
                Ok(file) => {
                    if let Err(err) = print_file(&file, &options.text_decoder()) {
                        eprintln!("\n{err}\nError writing output.\n");
                        exit(1);
                    }
                }
                Err(err) => {
                    failed = true;
                    match err {
                        CardError::UnrecognizedSignature(_) => {
                            eprintln!("\n{err}\nNot the Windows Card file.\n")
                        }
                        _ => eprintln!("\n{err}\nError reading file.\n"),
                    }
                }
            }
        }
    }

    if failed {
        exit(1);
    }
}

/// Expands a glob pattern, falling back to the literal path when nothing matches.
fn expand(pattern: &str) -> Vec<PathBuf> {
    let matched: Vec<PathBuf> = match glob::glob(pattern) {
        Ok(paths) => paths.filter_map(|p| p.ok()).collect(),
        Err(_) => Vec::new(),
    };
    if matched.is_empty() {
        vec![PathBuf::from(pattern)]
    } else {
        matched
    }
}

fn print_file(file: &CardFile, decoder: &TextDecoder) -> io::Result<()> {
    let mut out = io::stdout().lock();
    writeln!(
        out,
        "\n{} card file, total cards: {}",
        file.header.file_type.name(),
        file.header.total_cards
    )?;
    for card in file.occupied() {
        print_card(&mut out, card, decoder)?;
    }
    writeln!(out)
}

/// Card text goes out as bytes: in ASCII mode they are the file's own bytes,
/// for the terminal's code page to render.
fn print_card(out: &mut impl Write, card: &Card, decoder: &TextDecoder) -> io::Result<()> {
    // Keep card numbers aligned up to 999.
    let pad = match card.index.number() {
        0..=9 => 2,
        10..=99 => 1,
        _ => 0,
    };
    writeln!(out, "\n{:pad$}Card {}", "", card.index.number())?;
    writeln!(out, "--------")?;
    out.write_all(&decoder.decode_bytes(&card.index.raw))?;
    writeln!(out)?;

    match &card.body {
        Some(CardBody::UnsupportedObject {
            uid,
            format_id,
            class_name_length,
        }) => writeln!(
            out,
            "\n*** OLE object, not supported,\n    \
             UID: {uid}, format ID: {format_id}, class name len: {class_name_length}."
        )?,
        Some(body) => {
            if let Some(raw) = body.raw() {
                writeln!(out)?;
                out.write_all(&decoder.decode_bytes(raw))?;
                writeln!(out)?;
            }
        }
        None => {}
    }
    Ok(())
}

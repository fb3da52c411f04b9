//! This crate prints the channel symbols of a WSPR message. The callsign, grid locator and power
//! level are specified on the command line (defaulting to `AA0NT`, `EM18` and `20` dBm), and
//! additional random messages can be encoded in parallel. Encoding results can optionally be saved
//! to a JSON file.
//!
//! Build the executable with `cargo build --release` and then run `./target/release/wspr -h` for
//! help on the command-line interface.

#![warn(
    clippy::complexity,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_allocation,
    unused_import_braces,
    unused_qualifications
)]

use anyhow::Result;
use clap::{crate_name, crate_version, value_parser, Arg, ArgMatches, Command};
use std::time::Instant;
use wspr::{encode_batch, save_reports, utils, EncodeReport, EncodedMessage, Message};

/// Main function
fn main() -> Result<()> {
    let timer = Instant::now();
    let matches = command_line_parser().get_matches();
    let messages = all_messages(&matches)?;
    let all_encoded = encode_batch(&messages)?;
    for (message, encoded) in messages.iter().zip(all_encoded.iter()) {
        print_message(message, encoded);
    }
    if let Some(json_filename) = json_filename_from_matches(&matches) {
        save_reports(&all_reports(messages, all_encoded), &json_filename)?;
    }
    eprintln!("Elapsed time: {:.3?}", timer.elapsed());
    Ok(())
}

/// Returns command line parser.
fn command_line_parser() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about("Prints the channel symbols of a WSPR message")
        .arg(callsign())
        .arg(locator())
        .arg(power_dbm())
        .arg(num_random_messages())
        .arg(json_filename())
}

/// Returns argument for callsign.
fn callsign() -> Arg {
    Arg::new("callsign")
        .short('c')
        .default_value("AA0NT")
        .help("Callsign")
}

/// Returns argument for grid locator.
fn locator() -> Arg {
    Arg::new("locator")
        .short('l')
        .default_value("EM18")
        .help("Four-character Maidenhead grid locator")
}

/// Returns argument for power level (dBm).
fn power_dbm() -> Arg {
    Arg::new("power_dbm")
        .short('p')
        .value_parser(value_parser!(i32))
        .allow_negative_numbers(true)
        .default_value("20")
        .help("Power level (dBm)")
}

/// Returns argument for number of additional random messages.
fn num_random_messages() -> Arg {
    Arg::new("num_random_messages")
        .short('n')
        .value_parser(value_parser!(u32))
        .default_value("0")
        .help("Number of additional random messages to be encoded")
}

/// Returns argument for name of JSON file to which results must be saved.
fn json_filename() -> Arg {
    Arg::new("json_filename")
        .short('f')
        .help("Name of JSON file to which results must be saved")
}

/// Returns all messages to be encoded based on command-line arguments.
fn all_messages(matches: &ArgMatches) -> Result<Vec<Message>> {
    let mut messages = vec![Message::new(
        &callsign_from_matches(matches),
        &locator_from_matches(matches),
        power_dbm_from_matches(matches),
    )?];
    let num_random_messages = num_random_messages_from_matches(matches);
    messages.extend((0 .. num_random_messages).map(|_| utils::random_message()));
    Ok(messages)
}

/// Returns encode reports pairing messages with their channel symbols.
fn all_reports(messages: Vec<Message>, all_encoded: Vec<EncodedMessage>) -> Vec<EncodeReport> {
    messages
        .into_iter()
        .zip(all_encoded)
        .map(|(message, encoded)| EncodeReport::from_encoded(message, encoded))
        .collect()
}

/// Prints message contents and channel symbols.
fn print_message(message: &Message, encoded: &EncodedMessage) {
    println!("Callsign: {}", message.callsign());
    println!("Location: {}", message.locator());
    println!("Power: {} dBm", message.power_dbm());
    println!("{encoded}");
}

// OK to unwrap in the functions below: All command-line arguments other than the JSON filename
// have default values, so `get_one` cannot return `None`.

/// Returns callsign.
fn callsign_from_matches(matches: &ArgMatches) -> String {
    matches.get_one::<String>("callsign").unwrap().to_string()
}

/// Returns grid locator.
fn locator_from_matches(matches: &ArgMatches) -> String {
    matches.get_one::<String>("locator").unwrap().to_string()
}

/// Returns power level (dBm).
fn power_dbm_from_matches(matches: &ArgMatches) -> i32 {
    *matches.get_one("power_dbm").unwrap()
}

/// Returns number of additional random messages.
fn num_random_messages_from_matches(matches: &ArgMatches) -> u32 {
    *matches.get_one("num_random_messages").unwrap()
}

/// Returns name of JSON file to which results must be saved, if any.
fn json_filename_from_matches(matches: &ArgMatches) -> Option<String> {
    matches.get_one::<String>("json_filename").cloned()
}

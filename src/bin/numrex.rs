//! Command-line inspection tool for numrex
//!
//! Usage:
//!   numrex encode `<pattern>`       - Compile a pattern and print the encoded regex
//!   numrex ast `<pattern>`          - Print the parsed node tree as JSON
//!   numrex zero-status `<pattern>`  - Print the zero-ambiguity classification

use clap::{Arg, Command};

use numrex::numeric::{parser, pipeline};

fn main() {
    let matches = Command::new("numrex")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Inspect and compile numeric regex patterns")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("encode")
                .about("Compile a pattern against encoded values")
                .arg(
                    Arg::new("pattern")
                        .help("The numeric pattern to compile")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("ast")
                .about("Print the parsed node tree as JSON")
                .arg(
                    Arg::new("pattern")
                        .help("The numeric pattern to parse")
                        .required(true)
                        .index(1),
                ),
        )
        .subcommand(
            Command::new("zero-status")
                .about("Classify the pattern's zero ambiguity")
                .arg(
                    Arg::new("pattern")
                        .help("The numeric pattern to classify")
                        .required(true)
                        .index(1),
                ),
        )
        .get_matches();

    let outcome = match matches.subcommand() {
        Some(("encode", sub)) => {
            let pattern = sub.get_one::<String>("pattern").unwrap();
            pipeline::encode_regex(pattern).map(|encoded| println!("{}", encoded))
        }
        Some(("ast", sub)) => {
            let pattern = sub.get_one::<String>("pattern").unwrap();
            parser::parse(pattern).map(|tree| {
                println!(
                    "{}",
                    serde_json::to_string_pretty(&tree).expect("node trees serialize")
                )
            })
        }
        Some(("zero-status", sub)) => {
            let pattern = sub.get_one::<String>("pattern").unwrap();
            pipeline::zero_regex_status(pattern).map(|status| println!("{:?}", status))
        }
        _ => unreachable!(),
    };

    if let Err(err) = outcome {
        eprintln!("error: {}", err);
        std::process::exit(1);
    }
}

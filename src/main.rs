use coelestis::cross::cross_records;
use coelestis::report::reports;
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::{env, fs, process};

fn print_usage() {
    println!(
        r#"cross - offspring probabilities of a Forpus coelestis pairing

Usage:
  cross [--json] <sire.json> <dam.json>

Each file holds one genotype record: a JSON object mapping every locus name
(LinhaBase, Cinza, Americano, Marm1, Marm2, Ino, ArleqDom, ArleqRec,
FatorEscuro, Canela, Fulvo) to a genotype string. Sire sex-linked loci take
a pair ("N/m"), dam sex-linked loci a single allele ("m").

Set RUST_LOG=debug for enumeration statistics.
"#
    );
}

fn read_record(path: &str) -> Result<BTreeMap<String, String>, Box<dyn Error>> {
    let text = fs::read_to_string(path).map_err(|e| format!("{}: {}", path, e))?;
    let record = serde_json::from_str(&text).map_err(|e| format!("{}: {}", path, e))?;
    Ok(record)
}

fn run(json: bool, sire: &str, dam: &str) -> Result<(), Box<dyn Error>> {
    let male = read_record(sire)?;
    let female = read_record(dam)?;
    let result = cross_records(male, female)?;
    info!(
        "{} phenotype categories from {} x {}",
        result.phenotypes.len(),
        sire,
        dam
    );

    let reports = reports(&result);
    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        for report in &reports {
            print!("{}", report);
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let json = args.iter().any(|a| a == "--json");
    let files: Vec<&str> = args
        .iter()
        .filter(|a| *a != "--json")
        .map(String::as_str)
        .collect();

    match files.as_slice() {
        [sire, dam] if !sire.starts_with('-') && !dam.starts_with('-') => {
            if let Err(e) = run(json, sire, dam) {
                eprintln!("error: {}", e);
                process::exit(1);
            }
        }
        [flag] if matches!(*flag, "help" | "--help" | "-h") => print_usage(),
        _ => {
            print_usage();
            process::exit(2);
        }
    }
}

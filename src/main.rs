// vim: set ai et ts=4 sts=4 sw=4:
use std::fs;
use std::io;
use std::process;

use clap::{App, Arg, ArgMatches};
use log::info;
use yaml_rust::YamlLoader;

use picross::puzzle::{Puzzle, SolveResult};
use picross::util::is_a_tty;

fn setup_logging(verbosity: u64) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{:<5}][{}] {}", record.level(), record.target(), message))
        })
        .level(level)
        .chain(io::stderr())
        .apply();
    if let Err(err) = result {
        eprintln!("failed to initialize logging: {}", err);
    }
}

fn main() {
    let matches = App::new("picross")
        .about("Solves picross puzzles from per-row and per-column clues")
        .arg(Arg::with_name("problem_file")
             .help("Path to a problem file")
             .required(true)
             .index(1))
        .arg(Arg::with_name("margin")
             .long("margin")
             .short("m")
             .help("Size of margin between each cell")
             .takes_value(true)
             .default_value("1"))
        .arg(Arg::with_name("max-decisions")
             .long("max-decisions")
             .help("Give up after this many search guesses")
             .takes_value(true))
        .arg(Arg::with_name("verbose")
             .short("v")
             .multiple(true)
             .help("Increase log verbosity (may be repeated)"))
        .get_matches();

    setup_logging(matches.occurrences_of("verbose"));
    process::exit(run(&matches));
}

fn run(matches: &ArgMatches) -> i32 {
    let path = match matches.value_of("problem_file") {
        Some(path) => path,
        None       => return 2,
    };
    let margin: usize = match matches.value_of("margin").unwrap_or("1").parse() {
        Ok(margin) => margin,
        Err(_)     => { eprintln!("--margin must be a non-negative integer"); return 2; }
    };
    let max_decisions: Option<usize> = match matches.value_of("max-decisions") {
        None    => None,
        Some(s) => match s.parse() {
            Ok(n)  => Some(n),
            Err(_) => { eprintln!("--max-decisions must be a non-negative integer"); return 2; }
        },
    };

    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err)   => { eprintln!("cannot read {}: {}", path, err); return 2; }
    };
    let docs = match YamlLoader::load_from_str(&source) {
        Ok(docs) => docs,
        Err(err) => { eprintln!("cannot parse {}: {}", path, err); return 2; }
    };
    let doc = match docs.first() {
        Some(doc) => doc,
        None      => { eprintln!("{}: empty document", path); return 2; }
    };
    let mut puzzle = match Puzzle::from_yaml(doc) {
        Ok(puzzle) => puzzle,
        Err(err)   => { eprintln!("{}: {}", path, err); return 2; }
    };
    info!("loaded a {}x{} puzzle from {}", puzzle.width(), puzzle.height(), path);

    match puzzle.solve(max_decisions) {
        SolveResult::Solved(_) => {
            println!("[+] Successfully solved the problem.");
            print!("{}", puzzle.render(margin, is_a_tty(io::stdout())));
            0
        }
        SolveResult::Unsatisfiable => {
            println!("[!] The puzzle has no solution.");
            1
        }
        SolveResult::Invalid(reason) => {
            println!("[!] Invalid puzzle: {}.", reason);
            1
        }
        SolveResult::Timeout => {
            println!("[!] Gave up: guess budget exhausted.");
            1
        }
    }
}

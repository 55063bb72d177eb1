//! Showcase for the `arena_list` crate.
//!
//! Runs a scripted sequence over a fixed-capacity list: ten insertions
//! fanned out over the first half of the list, three pops from the front,
//! then a linearization, with a full diagnostic dump after every stage.

use std::env;
use std::process::ExitCode;

use arena_list::{ArenaList, ListError};
use tracing::{debug, error, info, Level};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_CAPACITY: u32 = 16;
const NUMBER_OF_OWLS: usize = 10;

const USAGE: &str = "\
usage: showcase [flags]
  -S, --capacity <n>     set the size of the list (default 16)
  -I, --log <filter>     set the log filter (overrides ARENA_LOG)
  -O, --owl              print 10 owls to the screen
  -h, --help             print this message";

struct Flags {
    capacity: u32,
    filter: Option<String>,
    owls: bool,
}

fn parse_flags() -> Result<Option<Flags>, String> {
    let mut flags = Flags {
        capacity: DEFAULT_CAPACITY,
        filter: None,
        owls: false,
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-S" | "--capacity" => {
                let value = args.next().ok_or("missing value for --capacity")?;
                flags.capacity = value
                    .parse()
                    .map_err(|_| format!("invalid capacity {value:?}"))?;
            }
            "-I" | "--log" => {
                flags.filter = Some(args.next().ok_or("missing value for --log")?);
            }
            "-O" | "--owl" => flags.owls = true,
            "-h" | "--help" => return Ok(None),
            other => return Err(format!("unknown flag {other:?}")),
        }
    }

    Ok(Some(flags))
}

fn main() -> ExitCode {
    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            println!("{USAGE}");
            return ExitCode::SUCCESS;
        }
        Err(message) => {
            eprintln!("{message}");
            eprintln!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let filter = match &flags.filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_env("ARENA_LOG")
            .unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    if flags.owls {
        drop_owls();
    }
    print_label();

    let mut list: ArenaList<i64> = match ArenaList::with_capacity(flags.capacity) {
        Ok(list) => list,
        Err(error) => {
            error!(%error, capacity = flags.capacity, "construction failed");
            return ExitCode::FAILURE;
        }
    };

    list.dump(Level::INFO);

    for counter in 0..10_i64 {
        if let Err(error) = scripted_insert(&mut list, counter) {
            return abort(&list, error);
        }
    }
    list.dump(Level::INFO);

    for _ in 0..3 {
        if let Err(error) = scripted_pop(&mut list) {
            return abort(&list, error);
        }
    }
    list.dump(Level::INFO);

    if let Err(error) = list.linearize() {
        return abort(&list, error);
    }
    list.dump(Level::INFO);

    info!(size = list.len(), "showcase finished");
    ExitCode::SUCCESS
}

/// Inserts `counter` right after the element at logical index
/// `counter / 2`, or at the front while the list is still empty.
fn scripted_insert(list: &mut ArenaList<i64>, counter: i64) -> Result<(), ListError> {
    let after = list.resolve_index((counter / 2) as isize)?;
    let at = list.insert(counter, after)?;
    debug!(counter, at, "inserted");
    Ok(())
}

fn scripted_pop(list: &mut ArenaList<i64>) -> Result<(), ListError> {
    let front = list.resolve_index(0)?;
    let value = list.remove(front)?;
    debug!(value, front, "popped");
    Ok(())
}

fn abort(list: &ArenaList<i64>, error: ListError) -> ExitCode {
    error!(%error, "list operation failed");
    list.dump(Level::ERROR);
    ExitCode::FAILURE
}

fn print_label() {
    println!("arena_list showcase.");
    println!("Scripted insert/pop/linearize run over a fixed-capacity list.");
    info!("showcase starting");
}

fn drop_owls() {
    println!("-Owl argument detected, dropping emergency supply of owls.");
    for _ in 0..NUMBER_OF_OWLS {
        println!(r#"    A_,,,_A    "#);
        println!(r#"   ((O)V(O))   "#);
        println!(r#"  ("\"|"|"/")  "#);
        println!(r#"   \"|"|"|"/   "#);
        println!(r#"     "| |"     "#);
        println!(r#"      ^ ^      "#);
    }
}

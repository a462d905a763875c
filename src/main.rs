use anyhow::{Context, Result};
use clap::Parser;
use std::process;
use tracing::Level;

use neo_explorer::config::{Cli, Command, InspectArgs, QueryArgs};
use neo_explorer::{limit, load_approaches, load_neos, write_results, NeoDatabase};

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if let Err(error) = run(cli) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let neos = load_neos(&cli.neofile)
        .with_context(|| format!("Failed to load NEOs from {}", cli.neofile.display()))?;
    let approaches = load_approaches(&cli.cadfile).with_context(|| {
        format!("Failed to load close approaches from {}", cli.cadfile.display())
    })?;

    let db = NeoDatabase::new(neos, approaches);

    match &cli.command {
        Command::Inspect(args) => inspect(&db, args, cli.verbose),
        Command::Query(args) => query(&db, args),
    }
}

fn inspect(db: &NeoDatabase, args: &InspectArgs, verbose: bool) -> Result<()> {
    let neo = match (&args.pdes, &args.name) {
        (Some(pdes), _) => db.get_neo_by_designation(pdes),
        (_, Some(name)) => db.get_neo_by_name(name),
        _ => None,
    };

    let Some(neo) = neo else {
        println!("No matching NEOs exist in the database.");
        return Ok(());
    };

    println!("{}", neo);
    if verbose {
        for approach in db.approaches_for(&neo.designation) {
            println!("- {}", approach);
        }
    }

    Ok(())
}

fn query(db: &NeoDatabase, args: &QueryArgs) -> Result<()> {
    let filter = args.to_filter();
    filter.validate()?;

    let results = limit(db.query(&filter), args.limit);

    match &args.outfile {
        None => {
            for approach in results {
                println!("{}", approach);
            }
        }
        Some(path) => {
            let count = write_results(results, path)
                .with_context(|| format!("Failed to write results to {}", path.display()))?;
            println!("✓ Wrote {} close approaches to {}", count, path.display());
        }
    }

    Ok(())
}

use anyhow::Context;
use clap::Parser;
use gyuu::cli::{run, Args};
use gyuu::constants::{BANNER, DONE_MESSAGE};
use gyuu::{logger, report};

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose, args.quiet);

    if !args.quiet {
        println!("{}\n", BANNER);
    }

    let results = run(&args).with_context(|| format!("Cannot process {}", args.input.display()))?;

    if !args.quiet {
        report::print_results(&results);
        println!("\n{}", DONE_MESSAGE);
    }

    Ok(())
}

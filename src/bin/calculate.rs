use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::anyhow;
use clap::Parser;
use stanza::renderer::console::Console;
use stanza::renderer::Renderer;
use strum::IntoEnumIterator;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crosscheck::evaluate::ProblemSet;
use crosscheck::print::tabulate_evaluations;

#[derive(Debug, Clone)]
struct ProblemSets(Vec<ProblemSet>);

#[derive(Debug, clap::Parser, Clone)]
struct Args {
    /// problem set to evaluate: probability, statistics or all
    #[clap(short = 's', long, value_parser = parse_problem_sets, default_value = "all")]
    set: ProblemSets,
}
fn parse_problem_sets(s: &str) -> anyhow::Result<ProblemSets> {
    match s.to_lowercase().as_str() {
        "all" => Ok(ProblemSets(ProblemSet::iter().collect())),
        "p" | "probability" => Ok(ProblemSets(vec![ProblemSet::ProbabilityTheory])),
        "s" | "statistics" => Ok(ProblemSets(vec![ProblemSet::Statistics])),
        _ => Err(anyhow!("unsupported problem set {s}")),
    }
}

fn main() -> anyhow::Result<ExitCode> {
    if env::var("RUST_BACKTRACE").is_err() {
        env::set_var("RUST_BACKTRACE", "full")
    }
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info")
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    debug!("args: {args:?}");

    let mut evaluated = 0;
    for problem_set in args.set.0 {
        println!("{}", "=".repeat(60));
        println!("{}: calculations", problem_set.title());
        println!("{}", "=".repeat(60));

        let evaluations = problem_set.evaluate()?;
        for evaluation in &evaluations {
            println!("\n{}:", evaluation.label);
            for step in &evaluation.steps {
                println!("  {step}");
            }
            println!("  => {}", evaluation.answer);
        }
        println!("\n{}", Console::default().render(&tabulate_evaluations(&evaluations)));
        evaluated += evaluations.len();
    }
    info!("verified {evaluated} answers");
    Ok(ExitCode::SUCCESS)
}

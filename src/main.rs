use anyhow::{Context, bail};
use rand::prelude::*;
use std::{env, fs};

use cpu_sched_sim::{Job, Outcome, RawInput, Request, TraceOptions, input::parse_algorithm};

const USAGE: &str = "\
usage: cpu-sched-sim --algorithm <fcfs|sjf|sjf-preemptive|round-robin|priority>
                     (--arrivals <a,b,..> --bursts <x,y,..> [--count n]
                      | --random <ticks> [--seed s]
                      | --file <request.json>)
                     [--quantum q] [--priorities p,q,..] [--coalesce] [--json]";

#[derive(Debug, Default)]
struct Args {
    algorithm: Option<String>,
    arrivals: Option<String>,
    bursts: Option<String>,
    count: Option<usize>,
    quantum: Option<String>,
    priorities: Option<String>,
    random: Option<u64>,
    seed: u64,
    file: Option<String>,
    coalesce: bool,
    json: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args::default();
    let mut argv = env::args().skip(1);

    while let Some(flag) = argv.next() {
        let mut value = || {
            argv.next()
                .with_context(|| format!("{flag} expects a value\n{USAGE}"))
        };
        match flag.as_str() {
            "--algorithm" => args.algorithm = Some(value()?),
            "--arrivals" => args.arrivals = Some(value()?),
            "--bursts" => args.bursts = Some(value()?),
            "--count" => args.count = Some(value()?.parse().context("--count")?),
            "--quantum" => args.quantum = Some(value()?),
            "--priorities" => args.priorities = Some(value()?),
            "--random" => args.random = Some(value()?.parse().context("--random")?),
            "--seed" => args.seed = value()?.parse().context("--seed")?,
            "--file" => args.file = Some(value()?),
            "--coalesce" => args.coalesce = true,
            "--json" => args.json = true,
            "-h" | "--help" => {
                println!("{USAGE}");
                std::process::exit(0);
            }
            other => bail!("unknown argument `{other}`\n{USAGE}"),
        }
    }
    Ok(args)
}

fn build_request(args: &Args) -> anyhow::Result<Request> {
    if let Some(path) = &args.file {
        let raw = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
        let request: Request =
            serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;
        request.validate()?;
        return Ok(request);
    }

    let algorithm = args.algorithm.as_deref().context("--algorithm is required")?;

    if let Some(ticks) = args.random {
        let quantum = args
            .quantum
            .as_deref()
            .map(str::parse::<i64>)
            .transpose()
            .context("--quantum")?;
        let algorithm = parse_algorithm(algorithm, quantum)?;
        return Ok(Request {
            jobs: bernoulli_jobs(ticks, 0.3, 0.3, 2, 6, args.seed),
            algorithm,
            options: TraceOptions::default(),
        });
    }

    let raw = RawInput {
        count: args.count,
        arrivals: args.arrivals.as_deref().context("--arrivals is required")?,
        bursts: args.bursts.as_deref().context("--bursts is required")?,
        algorithm,
        quantum: args.quantum.as_deref(),
        priorities: args.priorities.as_deref(),
    };
    Ok(Request::parse(&raw)?)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = parse_args()?;
    let mut request = build_request(&args)?;
    if args.coalesce {
        request.options.coalesce = true;
    }

    let outcome = request
        .run()
        .with_context(|| format!("running {}", request.algorithm))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
    }
    Ok(())
}

fn print_outcome(outcome: &Outcome) {
    println!("Gantt chart ({}):", outcome.algorithm);
    print!("{}", outcome.trace);

    println!();
    println!("{:>8} {:>11} {:>8} {:>11}", "Process", "Completion", "Waiting", "Turnaround");
    for row in &outcome.metrics.processes {
        println!(
            "{:>8} {:>11} {:>8} {:>11}",
            format!("P{}", row.process_id),
            row.completion_time,
            row.waiting_time,
            row.turnaround_time
        );
    }

    println!();
    match outcome.metrics.averages {
        Some(averages) => {
            println!("Average Waiting Time: {:.2}", averages.waiting_time);
            println!("Average Turnaround Time: {:.2}", averages.turnaround_time);
        }
        None => {
            println!("Average Waiting Time: n/a");
            println!("Average Turnaround Time: n/a");
        }
    }
    println!(
        "Idle ticks: {}, context switches: {}",
        outcome.stats.idle_ticks, outcome.stats.context_switches
    );
}

// Each tick spawns a job with probability `p_arrival`; a `p_short` share of them are short.
// Priorities are drawn uniformly from 0..=9 so the batch also works for priority runs.
fn bernoulli_jobs(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Vec<Job> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut jobs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst_time = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };

            jobs.push(
                Job::new(jobs.len() as u64 + 1, t, burst_time)
                    .with_priority(rng.random_range(0..10)),
            );
        }
    }

    jobs
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::Level;

use inequality_quest::{
    by_topic, explain_endpoints, grade, render, solve_line, solve_lines, Topic, Viewport,
};

#[derive(Parser, Debug)]
#[command(
    name = "ineq",
    about = "Solve, grade and plot single-variable inequalities exactly",
    version
)]
struct Ineq {
    /// Log solver steps to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Debug, Subcommand)]
enum Cmd {
    /// Solve one or more inequalities and intersect their solutions.
    Solve {
        #[arg(required = true, allow_hyphen_values = true)]
        lines: Vec<String>,
        #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
        xmin: f64,
        #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
        xmax: f64,
        /// Print solutions, explanations and the plot description as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Check an answer in interval notation, e.g. "(-oo,2] U (5,oo)".
    Grade {
        #[arg(allow_hyphen_values = true)]
        inequality: String,
        #[arg(allow_hyphen_values = true)]
        answer: String,
    },
    /// List the practice exercises.
    Exercises {
        #[arg(long, value_enum)]
        topic: Option<TopicArg>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TopicArg {
    Linear,
    Quadratic,
    Rational,
    Absolute,
}

impl From<TopicArg> for Topic {
    fn from(topic: TopicArg) -> Self {
        match topic {
            TopicArg::Linear => Topic::Linear,
            TopicArg::Quadratic => Topic::Quadratic,
            TopicArg::Rational => Topic::Rational,
            TopicArg::Absolute => Topic::AbsoluteValue,
        }
    }
}

fn main() -> Result<()> {
    let ineq = Ineq::parse();
    tracing_subscriber::fmt()
        .with_max_level(if ineq.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match ineq.cmd {
        Cmd::Solve {
            lines,
            xmin,
            xmax,
            json,
        } => solve(&lines, xmin, xmax, json),
        Cmd::Grade { inequality, answer } => {
            let solution = solve_line(&inequality)?;
            println!("{}", serde_json::to_string(&grade(&answer, &solution))?);
            Ok(())
        }
        Cmd::Exercises { topic } => {
            for exercise in by_topic(topic.map(Topic::from)) {
                println!("{} [{}] {}", exercise.id, exercise.topic, exercise.prompt);
                println!("    {}", exercise.inequality);
                println!("    hint: {}", exercise.hint);
            }
            Ok(())
        }
    }
}

fn solve(lines: &[String], xmin: f64, xmax: f64, json: bool) -> Result<()> {
    let viewport = Viewport::new(xmin, xmax)?;
    let combined = solve_lines(lines).context("failed to solve")?;
    let endpoints = explain_endpoints(&combined.common);
    let plot = render(&combined.common, viewport);

    if json {
        let lines: Vec<_> = combined
            .lines
            .iter()
            .map(|(line, set)| json!({ "line": line, "solution": set.to_string() }))
            .collect();
        let output = json!({
            "lines": lines,
            "common": combined.common.to_string(),
            "endpoints": endpoints,
            "plot": plot,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    for (line, set) in &combined.lines {
        println!("{line}  =>  {set}");
    }
    if combined.lines.len() > 1 {
        println!("common  =>  {}", combined.common);
    }
    for description in endpoints.unwrap_or_default() {
        println!("    {description}");
    }
    Ok(())
}

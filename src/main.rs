//! Dynarc CLI — render the demo song or inspect an envelope.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use dynarc::config::{EventOrder, RenderConfig};
use dynarc::demo::demo_song;
use dynarc::dynamics::{DynamicPoint, Envelope};
use dynarc::engine::Renderer;
use dynarc::error::{Error, Result};
use dynarc::instrument::InstrumentRouter;

#[derive(Parser)]
#[command(name = "dynarc")]
#[command(about = "Dynamics envelopes and score-event rendering", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the built-in demo song and print its events
    Demo {
        /// Render config (default: ~/.dynarc/render.yaml)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Event order, overriding the config
        #[arg(short, long, value_enum)]
        order: Option<OrderArg>,
    },

    /// Normalize an envelope and print its breakpoints
    Envelope {
        /// Points as "level,duration" pairs separated by spaces
        #[arg(short, long, allow_hyphen_values = true)]
        points: String,

        /// Treat levels as absolute rather than relative
        #[arg(short, long)]
        absolute: bool,

        /// Slice the normalized envelope at START for DUR
        #[arg(short, long, num_args = 2, value_names = ["START", "DUR"])]
        slice: Option<Vec<f64>>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OrderArg {
    Emission,
    Time,
}

impl From<OrderArg> for EventOrder {
    fn from(arg: OrderArg) -> Self {
        match arg {
            OrderArg::Emission => EventOrder::Emission,
            OrderArg::Time => EventOrder::Time,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Commands::Demo { config, order } => run_demo(config, order),
        Commands::Envelope {
            points,
            absolute,
            slice,
        } => run_envelope(&points, absolute, slice.as_deref()),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_demo(config: Option<PathBuf>, order: Option<OrderArg>) -> Result<()> {
    let config = match config {
        Some(path) => RenderConfig::load_from(&path)?,
        None => RenderConfig::load(),
    };
    let order = order.map(EventOrder::from).unwrap_or(config.order);
    let router = InstrumentRouter::from_configs(&config.instruments);

    let song = demo_song()?;
    let score = Renderer::new(&router).render_song(&song)?;

    println!("; {} by {}", score.name, score.composer);
    for section in &score.sections {
        println!();
        println!("; {}", section.name);
        let tempo: Vec<String> = section
            .tempo
            .iter()
            .map(|t| format!("{} {}", t.time, t.bpm))
            .collect();
        println!("t {}", tempo.join(" "));
        let events = match order {
            EventOrder::Emission => section.events.clone(),
            EventOrder::Time => section.sorted_events(),
        };
        for event in &events {
            println!("i {event}");
        }
    }
    Ok(())
}

fn run_envelope(points: &str, absolute: bool, slice: Option<&[f64]>) -> Result<()> {
    let points = parse_points(points)?;
    let mut envelope = Envelope::new(points, absolute)?;
    if let Some(&[start, duration]) = slice {
        envelope = envelope.slice(start, duration)?;
    }

    println!("{envelope}");
    for (time, level) in envelope.breakpoints() {
        println!("{time:.4}\t{level:.4}");
    }
    println!("initial {:.4}", envelope.initial_level());
    println!("average {:.4}", envelope.average_level());
    println!("final   {:.4}", envelope.final_level());
    Ok(())
}

fn parse_points(input: &str) -> Result<Vec<DynamicPoint>> {
    input
        .split_whitespace()
        .map(|pair| {
            let (level, duration) = pair
                .split_once(',')
                .ok_or_else(|| Error::InvalidEnvelope(format!("expected level,duration: {pair}")))?;
            let parse = |s: &str| {
                s.trim()
                    .parse::<f64>()
                    .map_err(|e| Error::InvalidEnvelope(format!("{s}: {e}")))
            };
            Ok(DynamicPoint::new(parse(level)?, parse(duration)?))
        })
        .collect()
}

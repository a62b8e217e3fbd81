use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context};
use dotenvy::dotenv;
use tracing::{error, info};

use hair_simulator::catalog::{find_color, find_cut, CutCollection, HairOption, COLOR_OPTIONS};
use hair_simulator::config::Config;
use hair_simulator::error::SimulationError;
use hair_simulator::image_prep::prepare_source_image;
use hair_simulator::llm::GeminiClient;
use hair_simulator::selection::SelectionState;
use hair_simulator::simulation::SimulationOrchestrator;
use hair_simulator::utils::logging::init_logging;

#[derive(Debug, PartialEq)]
enum Command {
    Options,
    Simulate(SimulateArgs),
}

#[derive(Debug, PartialEq)]
struct SimulateArgs {
    image_path: PathBuf,
    cut: Option<&'static HairOption>,
    color: Option<&'static HairOption>,
    detail: String,
    out_path: Option<PathBuf>,
}

fn usage() -> &'static str {
    "Usage:\n  hair-simulator options\n  hair-simulator simulate --image <path> [--cut <id>] [--color <id>] [--detail <text>] [--out <path>]"
}

fn parse_args(args: &[String]) -> anyhow::Result<Command> {
    match args.get(1).map(|value| value.as_str()) {
        Some("options") => Ok(Command::Options),
        Some("simulate") => parse_simulate_args(&args[2..]).map(Command::Simulate),
        Some("--help") | Some("-h") | None => Err(anyhow!(usage())),
        Some(other) => Err(anyhow!("Unknown command: {other}\n{}", usage())),
    }
}

fn parse_simulate_args(args: &[String]) -> anyhow::Result<SimulateArgs> {
    let mut image_path: Option<PathBuf> = None;
    let mut cut = None;
    let mut color = None;
    let mut detail = String::new();
    let mut out_path = None;

    let mut index = 0;
    while index < args.len() {
        let flag = args[index].as_str();
        let value = || {
            args.get(index + 1)
                .ok_or_else(|| anyhow!("Missing value for {flag}"))
        };
        match flag {
            "--image" => image_path = Some(PathBuf::from(value()?)),
            "--cut" => {
                let id = value()?;
                cut = Some(find_cut(id).ok_or_else(|| {
                    anyhow!("Unknown cut id: {id} (run `hair-simulator options`)")
                })?);
            }
            "--color" => {
                let id = value()?;
                color = Some(find_color(id).ok_or_else(|| {
                    anyhow!("Unknown color id: {id} (run `hair-simulator options`)")
                })?);
            }
            "--detail" => detail = value()?.clone(),
            "--out" => out_path = Some(PathBuf::from(value()?)),
            "--help" | "-h" => return Err(anyhow!(usage())),
            other => {
                return Err(anyhow!(
                    "Unknown simulate argument: {other}\n{}",
                    usage()
                ))
            }
        }
        index += 2;
    }

    let image_path = image_path.ok_or_else(|| anyhow!("--image is required\n{}", usage()))?;
    Ok(SimulateArgs {
        image_path,
        cut,
        color,
        detail,
        out_path,
    })
}

fn print_options(title: &str, options: &[HairOption]) {
    println!("{title}");
    for option in options {
        println!(
            "  {:<20} {} {} - {}",
            option.id, option.icon, option.name, option.description
        );
    }
    println!();
}

async fn run_simulation(args: SimulateArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let _guards = init_logging(&config);

    let mut selection = SelectionState::new();
    if let Some(cut) = args.cut {
        selection.toggle_cut(cut);
    }
    if let Some(color) = args.color {
        selection.toggle_color(color);
    }
    selection.set_detail(args.detail);
    if selection.is_empty() {
        return Err(SimulationError::InsufficientInstructions.into());
    }

    let raw = tokio::fs::read(&args.image_path)
        .await
        .with_context(|| format!("Failed to read {}", args.image_path.display()))?;
    let image = prepare_source_image(&raw)?;

    let orchestrator = SimulationOrchestrator::new(GeminiClient::new(config)?);
    info!("Starting simulation for {}", args.image_path.display());
    let result = orchestrator
        .simulate(&selection, &image)
        .await
        .inspect_err(|err| error!("Simulation aborted: {err}"))?;

    match &result.generated_image {
        Some(generated) => {
            let out_path = args
                .out_path
                .unwrap_or_else(|| PathBuf::from(format!("simulation.{}", generated.extension())));
            tokio::fs::write(&out_path, &generated.bytes)
                .await
                .with_context(|| format!("Failed to write {}", out_path.display()))?;
            println!("Generated image: {}", out_path.display());
        }
        None => println!("Generated image: unavailable (the model returned no image)"),
    }
    println!();
    println!("{}", result.advice);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    let args: Vec<String> = std::env::args().collect();
    let command = match parse_args(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::from(2);
        }
    };

    match command {
        Command::Options => {
            print_options("Colors", COLOR_OPTIONS);
            for collection in [CutCollection::Women, CutCollection::Men] {
                print_options(collection.label(), collection.options());
            }
            ExitCode::SUCCESS
        }
        Command::Simulate(simulate_args) => match run_simulation(simulate_args).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err:#}");
                let user_correctable = err
                    .downcast_ref::<SimulationError>()
                    .is_some_and(SimulationError::is_user_correctable);
                if user_correctable {
                    ExitCode::from(2)
                } else {
                    ExitCode::FAILURE
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        std::iter::once("hair-simulator")
            .chain(values.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn parses_full_simulate_invocation() {
        let command = parse_args(&args(&[
            "simulate", "--image", "me.jpg", "--cut", "low-fade", "--color", "copper", "--detail",
            "short sides", "--out", "out.png",
        ]))
        .unwrap();
        let Command::Simulate(parsed) = command else {
            panic!("expected simulate");
        };
        assert_eq!(parsed.image_path, PathBuf::from("me.jpg"));
        assert_eq!(parsed.cut.map(|o| o.id), Some("low-fade"));
        assert_eq!(parsed.color.map(|o| o.id), Some("copper"));
        assert_eq!(parsed.detail, "short sides");
        assert_eq!(parsed.out_path, Some(PathBuf::from("out.png")));
    }

    #[test]
    fn rejects_unknown_ids_and_missing_values() {
        assert!(parse_args(&args(&["simulate", "--image", "a.jpg", "--cut", "mohawk"])).is_err());
        assert!(parse_args(&args(&["simulate", "--image"])).is_err());
        assert!(parse_args(&args(&["simulate", "--cut", "bob"])).is_err());
        assert!(parse_args(&args(&["render"])).is_err());
    }

    #[test]
    fn parses_options_command() {
        assert_eq!(parse_args(&args(&["options"])).unwrap(), Command::Options);
    }
}

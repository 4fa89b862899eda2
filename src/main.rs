use anyhow::Context;
use clap::Parser;
use greenhouse_panel::adapters::command::Command;
use greenhouse_panel::adapters::terminal::TerminalSink;
use greenhouse_panel::app::panel::{Panel, PanelOutcome};
use greenhouse_panel::utils::logger;
use greenhouse_panel::utils::validation::{validate_positive_number, Validate};
use greenhouse_panel::{CliConfig, Greenhouse, GreenhouseConfig, MonitorEngine};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};

// One thread owns every section; ticks and commands take turns on it.
#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("Starting greenhouse panel");
    tracing::debug!("CLI config: {:?}", args);

    let config = match GreenhouseConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let validation = config.validate().and_then(|_| match args.tick_ms {
        Some(ms) => validate_positive_number("--tick-ms", ms, 1),
        None => Ok(()),
    });
    if let Err(e) = validation {
        tracing::error!(
            "Configuration validation failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let greenhouse = Greenhouse::from_config(&config).context("building greenhouse sections")?;

    let tick_interval = args
        .tick_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| config.tick_interval());
    let mut engine = MonitorEngine::new(tick_interval);
    let monitor_enabled = !args.no_monitor && config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("Monitoring every {:?}", engine.tick_interval());
    }

    let mut panel = Panel::new(greenhouse);
    let mut timer = engine.interval();
    let mut sink = TerminalSink::new(std::io::stdout());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    if let PanelOutcome::Continue(out) = panel.execute(Command::List)? {
        print_lines(&out);
    }
    println!("Type 'help' for commands.");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading command")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                let command = match Command::parse(&line) {
                    Ok(command) => command,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };

                match panel.execute(command) {
                    Ok(PanelOutcome::Continue(out)) => print_lines(&out),
                    Ok(PanelOutcome::Quit) => break,
                    Err(e) => {
                        tracing::debug!("Command rejected: {}", e);
                        println!("{}", e.user_friendly_message());
                    }
                }
            }
            _ = timer.tick(), if monitor_enabled => {
                engine.tick(panel.greenhouse(), &mut sink);
            }
        }
    }

    tracing::info!("Panel closed after {} monitoring passes", engine.ticks());
    Ok(())
}

fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

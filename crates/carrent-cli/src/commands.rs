//! Command handlers

use std::io::{self, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::cli::{Cli, Commands, OutputFormat};
use crate::menu;
use crate::output;
use crate::prompt::Prompt;
use carrent_app::app::{fleet_rows, renter_summaries, FleetRow, RentalDesk};
use carrent_app::config::Config;
use carrent_app::seed;
use carrent_types::{ConfigError, RentalPeriod, RenterClass, Result};

pub fn execute(cli: Cli) -> Result<()> {
    // Load config
    let mut config = Config::load()?;

    // Override from CLI args
    if let Some(secs) = cli.period_secs {
        config.rental_period_secs = secs;
    }
    if cli.seed.is_some() {
        config.seed_file = cli.seed.clone();
    }
    if let Some(format) = cli.format {
        config.output_format = format;
    }

    match &cli.command {
        None | Some(Commands::Run) => cmd_run(&config),

        Some(Commands::Fleet { available }) => cmd_fleet(&config, *available),

        Some(Commands::Renters { class }) => cmd_renters(&config, *class),

        Some(Commands::Config {
            show,
            set_period,
            set_output,
            set_seed,
            clear_seed,
            reset,
        }) => cmd_config(
            *show,
            *set_period,
            *set_output,
            set_seed.clone(),
            *clear_seed,
            *reset,
        ),
    }
}

/// Desk on the wall clock, populated from the configured seed
fn open_desk(config: &Config) -> Result<RentalDesk> {
    let period = config.rental_period()?;
    debug!(period_secs = period.secs(), seed = ?config.seed_file, "opening rental desk");

    let mut desk = RentalDesk::with_system_clock(period);
    seed::bootstrap(&mut desk, config.seed_file.as_deref())?;
    Ok(desk)
}

fn cmd_run(config: &Config) -> Result<()> {
    let mut desk = open_desk(config)?;
    let mut prompt = Prompt::stdio();
    menu::run(&mut desk, &mut prompt, config.output_format)?;
    writeln!(prompt.out(), "Thank you for using the system")?;
    Ok(())
}

fn cmd_fleet(config: &Config, available: bool) -> Result<()> {
    let desk = open_desk(config)?;
    let now = desk.now();
    let rows: Vec<FleetRow> = if available {
        desk.registry()
            .available()
            .into_iter()
            .map(|v| FleetRow::from_vehicle(v, now))
            .collect()
    } else {
        fleet_rows(desk.registry(), now)
    };
    output::write_fleet(&mut io::stdout().lock(), &rows, config.output_format)
}

fn cmd_renters(config: &Config, class: Option<RenterClass>) -> Result<()> {
    let desk = open_desk(config)?;
    let classes = match class {
        Some(class) => vec![class],
        None => vec![RenterClass::Client, RenterClass::Staff],
    };

    let mut stdout = io::stdout().lock();
    for class in classes {
        if config.output_format == OutputFormat::Table {
            writeln!(stdout, "{}:", class)?;
        }
        let summaries = renter_summaries(desk.directory(), class);
        output::write_renters(&mut stdout, &summaries, config.output_format)?;
    }
    Ok(())
}

fn cmd_config(
    show: bool,
    set_period: Option<i64>,
    set_output: Option<OutputFormat>,
    set_seed: Option<PathBuf>,
    clear_seed: bool,
    reset: bool,
) -> Result<()> {
    if reset {
        let config = Config::default();
        config.save()?;
        println!("Configuration reset to defaults");
        println!("\n{}", config);
        return Ok(());
    }

    let mut config = Config::load()?;
    let mut modified = false;

    if let Some(secs) = set_period {
        if RentalPeriod::from_secs(secs).is_none() {
            return Err(ConfigError::InvalidValue(format!(
                "rental period must be a positive number of seconds, got {}",
                secs
            ))
            .into());
        }
        config.rental_period_secs = secs;
        modified = true;
    }

    if let Some(output_format) = set_output {
        config.output_format = output_format;
        modified = true;
    }

    if let Some(path) = set_seed {
        config.seed_file = Some(path);
        modified = true;
    }

    if clear_seed {
        config.seed_file = None;
        modified = true;
    }

    if modified {
        config.save()?;
        println!("Configuration updated");
    }

    if show || !modified {
        println!("{}", config);
    }

    Ok(())
}

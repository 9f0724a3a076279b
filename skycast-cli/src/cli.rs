use clap::{Parser, Subcommand};
use inquire::{InquireError, Select, Text};
use skycast_core::{Config, IpLocator, OpenWeatherProvider, RecentSearches};

use crate::{
    app::{App, Dashboard},
    prompt::CitySuggester,
    render,
};

const CHOICE_SEARCH: &str = "Search for a city";
const CHOICE_HERE: &str = "Use my location";
const CHOICE_QUIT: &str = "Quit";

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal weather dashboard")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show current conditions and the 3-day forecast for a city.
    Show {
        /// City name, e.g. "London".
        city: String,
    },

    /// Show weather for the machine's detected location.
    Here,

    /// Interactive dashboard (the default when no subcommand is given).
    Dash,
}

type CliApp = App<OpenWeatherProvider, IpLocator>;

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Dash) {
            Command::Configure => configure(),
            Command::Show { city } => {
                let mut app = build_app()?;
                let dashboard = app.submit(&city).await;
                report(&app, dashboard)
            }
            Command::Here => {
                let mut app = build_app()?;
                let dashboard = app.locate().await;
                report(&app, dashboard)
            }
            Command::Dash => dashboard_loop(build_app()?).await,
        }
    }
}

fn build_app() -> anyhow::Result<CliApp> {
    let config = Config::load()?;
    let api_key = config.api_key()?.to_owned();

    Ok(App::new(
        OpenWeatherProvider::new(api_key),
        IpLocator::new(),
        RecentSearches::open_default()?,
    ))
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let key = Text::new("OpenWeatherMap API key:").prompt()?;
    config.set_api_key(key.trim().to_string());
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

/// One-shot output for `show` and `here`.
fn report(app: &CliApp, dashboard: Option<Dashboard>) -> anyhow::Result<()> {
    match dashboard {
        Some(dash) => {
            println!("{}", render::current_conditions(&dash.current));
            println!("{}", render::forecast(&dash.forecast));
            println!("{}", render::recent_searches(app.recent()));
            Ok(())
        }
        None => {
            let msg = app
                .ui()
                .error
                .clone()
                .unwrap_or_else(|| "Failed to fetch weather data".to_string());
            anyhow::bail!(msg)
        }
    }
}

async fn dashboard_loop(mut app: CliApp) -> anyhow::Result<()> {
    println!("skycast — search for a city or use your location to get started\n");

    loop {
        let mut options = vec![CHOICE_SEARCH.to_string(), CHOICE_HERE.to_string()];
        for entry in app.recent() {
            options.push(format!("{}  ({}°C)", entry.city, entry.temperature_c));
        }
        options.push(CHOICE_QUIT.to_string());

        let choice = match Select::new("What next?", options).prompt() {
            Ok(choice) => choice,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => break,
            Err(e) => return Err(e.into()),
        };

        let dashboard = if choice == CHOICE_QUIT {
            break;
        } else if choice == CHOICE_SEARCH {
            let input = match Text::new("City:")
                .with_autocomplete(CitySuggester::new(app.recent()))
                .prompt()
            {
                Ok(input) => input,
                Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            app.submit(&input).await
        } else if choice == CHOICE_HERE {
            println!("Detecting your location...");
            app.locate().await
        } else {
            // Recent-search shortcut; strip the temperature suffix.
            let city = choice.split("  (").next().unwrap_or(&choice).to_string();
            app.submit(&city).await
        };

        match dashboard {
            Some(dash) => {
                println!();
                println!("{}", render::current_conditions(&dash.current));
                println!("{}", render::forecast(&dash.forecast));
            }
            None => {
                if let Some(msg) = app.ui().error.clone() {
                    println!("⚠ {msg}\n");
                    app.dismiss_error();
                }
            }
        }
    }

    Ok(())
}

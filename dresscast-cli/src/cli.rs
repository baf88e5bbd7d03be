use anyhow::{Context, anyhow, bail};
use clap::{Parser, Subcommand};
use dresscast_core::{
    Config, Key, RequestStatus, SearchController, SearchEvent, backend_from_config,
};
use inquire::{InquireError, Text};
use tracing::{debug, warn};

use crate::render::{render_error, render_weather};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "dresscast", version, about = "Weather and what to wear, by city")]
pub struct Cli {
    /// Log debug output to stderr (ignored when RUST_LOG is set).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Without a subcommand, start an interactive search prompt.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the weather backend URL in the config file.
    Configure {
        /// Backend base URL, e.g. "http://localhost:3002". Prompted for if absent.
        #[arg(long)]
        api_url: Option<String>,
    },

    /// Show weather and clothing suggestions for a city.
    Show {
        /// City name.
        city: String,

        /// Print the backend payload as JSON instead of formatted text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self, mut config: Config) -> anyhow::Result<()> {
        match self.command {
            Some(Command::Configure { api_url }) => configure(&mut config, api_url),
            Some(Command::Show { city, json }) => {
                let controller = SearchController::new(backend_from_config(&config));
                show(controller, city, json).await
            }
            None => {
                let controller = SearchController::new(backend_from_config(&config));
                interactive(controller).await
            }
        }
    }
}

fn configure(config: &mut Config, api_url: Option<String>) -> anyhow::Result<()> {
    let url = match api_url {
        Some(url) => url,
        None => {
            let current = config.resolved_api_url();
            Text::new("Weather backend URL:")
                .with_default(&current)
                .prompt()
                .inspect_err(|e| warn!(error = %e, "backend URL prompt failed"))
                .context("Failed to read backend URL")?
        }
    };

    config.set_api_url(&url)?;
    let path = config.save()?;
    debug!(path = %path.display(), api_url = %url.trim(), "saved config");

    println!("Saved backend URL to {}", path.display());
    Ok(())
}

async fn show(mut controller: SearchController, city: String, json: bool) -> anyhow::Result<()> {
    debug!(%city, json, "one-shot lookup");
    controller.set_query(city);
    controller.submit().await;

    match controller.status() {
        RequestStatus::Succeeded(result) if json => {
            let out = serde_json::to_string_pretty(result.as_ref())
                .context("Failed to serialize weather result")?;
            println!("{out}");
        }
        RequestStatus::Succeeded(_) => {
            if let Some(view) = controller.view() {
                print!("{}", render_weather(&view));
            }
        }
        RequestStatus::Failed(message) => bail!("{message}"),
        RequestStatus::Idle | RequestStatus::Loading => {
            return Err(anyhow!("Weather lookup did not complete"));
        }
    }

    Ok(())
}

/// Prompt loop: the prompt is the query field, Enter submits, Esc or Ctrl-C quits.
async fn interactive(mut controller: SearchController) -> anyhow::Result<()> {
    println!("Enter a city name and press Enter. Esc to quit.");

    loop {
        let input = Text::new("City:")
            .with_initial_value(controller.query())
            .prompt();

        let text = match input {
            Ok(text) => text,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                debug!("search prompt closed");
                break;
            }
            Err(e) => {
                warn!(error = %e, "search prompt failed");
                return Err(e).context("Failed to read city name");
            }
        };

        if !text.trim().is_empty() {
            println!("Looking up {}...", text.trim());
        }

        controller.handle(SearchEvent::QueryChanged(text)).await;
        controller.handle(SearchEvent::KeyPressed(Key::Enter)).await;

        match controller.status() {
            RequestStatus::Succeeded(_) => {
                if let Some(view) = controller.view() {
                    println!("\n{}", render_weather(&view));
                }
            }
            RequestStatus::Failed(message) => eprintln!("{}\n", render_error(message)),
            RequestStatus::Idle | RequestStatus::Loading => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_interactive() {
        let cli = Cli::try_parse_from(["dresscast"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn parses_show_with_json_and_verbose() {
        let cli = Cli::try_parse_from(["dresscast", "show", "New York", "--json", "-v"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Command::Show { city, json }) => {
                assert_eq!(city, "New York");
                assert!(json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_configure_flag() {
        let cli =
            Cli::try_parse_from(["dresscast", "configure", "--api-url", "http://10.0.0.5:8000"])
                .unwrap();
        match cli.command {
            Some(Command::Configure { api_url }) => {
                assert_eq!(api_url.as_deref(), Some("http://10.0.0.5:8000"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn show_requires_a_city() {
        assert!(Cli::try_parse_from(["dresscast", "show"]).is_err());
    }

    #[tokio::test]
    async fn show_with_blank_city_fails_without_backend() {
        let config = Config {
            api_url: Some("http://127.0.0.1:9".into()),
            ..Config::default()
        };
        let controller = SearchController::new(backend_from_config(&config));

        let err = show(controller, "   ".into(), false).await.unwrap_err();
        assert_eq!(err.to_string(), "Please enter a city name");
    }
}

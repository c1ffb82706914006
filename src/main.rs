use chrono::Utc;
use clap::{Parser, Subcommand};
use dashboard_client::charts::{ChartSpec, TOP_CHATTERS, USERS};
use dashboard_client::envelope::UPDATE_TYPE_FIELD;
use dashboard_client::handlers::{export_clicked, form_submitted, switch_toggled};
use dashboard_client::{ClientError, JsonClient, UpdateOutcome, resolve_base_url};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Debug, Parser)]
#[command(name = "dashboard_client", about = "Talk to the bot dashboard JSON API")]
struct Cli {
    /// Dashboard base URL, overrides DASHBOARD_URL.
    #[arg(long, global = true)]
    url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List commands.
    Commands,
    /// Show the editable fields of one command.
    Command { name: String },
    /// Top chatters chart data.
    Chatters,
    /// User roles chart data.
    Users,
    /// Event chart data for one RPG.
    EventsStats { id: String },
    /// Flip a switch control, e.g. `toggle cmd status switch-ping true`.
    Toggle {
        table: String,
        attribute: String,
        switch_id: String,
        #[arg(action = clap::ArgAction::Set)]
        status: bool,
    },
    /// Submit an update form, e.g. `update add_cmd name=ping cost=10`.
    Update {
        update_type: String,
        #[arg(value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Download the events of one RPG as a JSON file.
    Export {
        id: String,
        rpg_name: String,
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base_url = cli.url.unwrap_or_else(resolve_base_url);
    let client = JsonClient::new(&base_url)?;
    info!("using dashboard at {base_url}");

    if let Err(err) = run(&client, cli.command).await {
        error!("{err}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run(client: &JsonClient, command: Command) -> Result<(), ClientError> {
    match command {
        Command::Commands => {
            for row in client.commands().await? {
                println!("{}\t{}", row.name, row.email.unwrap_or_default());
            }
        }
        Command::Command { name } => print_json(&client.command(&name).await?)?,
        Command::Chatters => print_chart(client, &TOP_CHATTERS).await?,
        Command::Users => print_chart(client, &USERS).await?,
        Command::EventsStats { id } => print_json(&client.events_stats(&id).await?)?,
        Command::Toggle {
            table,
            attribute,
            switch_id,
            status,
        } => {
            let action = switch_toggled(&table, &attribute, &switch_id, status)?;
            report(action.run(client).await?)?;
        }
        Command::Update {
            update_type,
            fields,
        } => {
            let fields = std::iter::once((UPDATE_TYPE_FIELD.to_string(), update_type)).chain(fields);
            let action = form_submitted(fields)?;
            report(action.run(client).await?)?;
        }
        Command::Export { id, rpg_name, dir } => {
            let export = export_clicked(&id, &rpg_name, Utc::now()).run(client).await?;
            let path = export.write_to(&dir).await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn report(outcome: UpdateOutcome) -> Result<(), ClientError> {
    match outcome {
        UpdateOutcome::Success(message) => println!("{message}"),
        UpdateOutcome::Failure(message) => {
            warn!("update rejected: {message}");
            println!("error: {message}");
        }
        UpdateOutcome::Unrecognized(value) => print_json(&value)?,
    }
    Ok(())
}

async fn print_chart(client: &JsonClient, spec: &ChartSpec) -> Result<(), ClientError> {
    let series = client.chart(spec).await?;
    print_json(&spec.view(&series))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), ClientError> {
    let text = serde_json::to_string_pretty(value).map_err(ClientError::Encode)?;
    println!("{text}");
    Ok(())
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .ok_or_else(|| format!("expected field=value, got {raw:?}"))?;
    if key == UPDATE_TYPE_FIELD {
        return Err(format!(
            "{UPDATE_TYPE_FIELD} is given as the first argument, not as a field"
        ));
    }
    Ok((key.to_string(), value.to_string()))
}

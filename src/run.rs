//! Application execution logic.
//!
//! This module wires the library components together for one invocation:
//! it bootstraps the token, then either performs a scheduled update run or
//! one of the interactive modes, and reports fatal errors.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use thiserror::Error;

use linode_ddns::api::{
    ApiError, HttpClient, LinodeClient, ReplayClient, ReplayTable, ReqwestClient,
};
use linode_ddns::config::{
    Cli, ConfigError, Mode, RuntimeOptions, Settings, defaults, ensure_folder, last_ip_path,
    settings_path, validate_token,
};
use linode_ddns::discovery::{Discovery, DiscoveryError, HostQuery, find_records, list_domains};
use linode_ddns::event_log::EventLog;
use linode_ddns::host::local_hostname;
use linode_ddns::network::{IpRouteCommand, RouteTable, detect_current_ip};
use linode_ddns::state::{FileLastIp, StateError};
use linode_ddns::update::{UpdateError, UpdateOutcome, Updater};

use crate::app::exit_code;

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for a failed invocation.
///
/// Configuration and lookup problems are shown as is; anything raised while
/// talking to the provider or writing files is prefixed with `FAILED:`.
#[derive(Debug, Error)]
pub enum RunError {
    /// Settings or interactive input are unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Nothing to show for an interactive lookup.
    #[error(transparent)]
    Discovery(DiscoveryError),

    /// A provider call failed.
    #[error("FAILED: {0}")]
    Api(#[from] ApiError),

    /// The last-IP record could not be written.
    #[error("FAILED: {0}")]
    State(#[from] StateError),

    /// Writing to the terminal failed.
    #[error("FAILED: {0}")]
    Output(#[from] io::Error),
}

impl From<DiscoveryError> for RunError {
    fn from(error: DiscoveryError) -> Self {
        match error {
            DiscoveryError::Api(e) => Self::Api(e),
            other => Self::Discovery(other),
        }
    }
}

impl From<UpdateError> for RunError {
    fn from(error: UpdateError) -> Self {
        match error {
            UpdateError::Config(e) => Self::Config(e),
            UpdateError::Api(e) => Self::Api(e),
            UpdateError::State(e) => Self::State(e),
        }
    }
}

/// Everything one invocation needs, with the capabilities already chosen.
pub struct Context<H, R> {
    /// What to do.
    pub mode: Mode,
    /// Save lookup results to the settings file (`--commit`).
    pub save_lookup: bool,
    /// Configuration folder.
    pub folder: PathBuf,
    /// Settings as loaded.
    pub settings: Settings,
    /// Options taken from the execution context.
    pub options: RuntimeOptions,
    /// HTTP transport for the Linode API.
    pub http: H,
    /// Route table source.
    pub routes: R,
    /// Event log sink.
    pub log: EventLog,
}

/// Loads the settings, picks real or replayed capabilities and runs once.
///
/// Fatal errors are printed on stderr and, for scheduled runs, appended to
/// the event log.
///
/// Excluded from coverage - touches the real network and route table
/// unless the settings carry a replay table.
#[cfg(not(tarpaulin_include))]
pub async fn launch(cli: &Cli, options: RuntimeOptions) -> ExitCode {
    let folder = cli.config_folder();
    let mode = cli.mode();
    let settings = Settings::load(&settings_path(&folder));
    let log = event_log(&settings);

    if mode.is_interactive() {
        if let Err(e) = ensure_folder(&folder) {
            return report_failure(&RunError::from(e), &log, &mode);
        }
    }

    let replay = settings.replay.clone();
    let mut out = io::stdout();
    let result = match replay {
        Some(table) => {
            tracing::debug!("Replaying provider and host calls from settings");
            let context = Context {
                mode: mode.clone(),
                save_lookup: cli.commit,
                folder,
                settings,
                options,
                routes: table.routes(),
                http: ReplayClient::new(table),
                log: log.clone(),
            };
            execute(context, &mut out).await
        }
        None => {
            let context = Context {
                mode: mode.clone(),
                save_lookup: cli.commit,
                folder,
                settings,
                options,
                http: ReqwestClient::new(),
                routes: IpRouteCommand::default(),
                log: log.clone(),
            };
            execute(context, &mut out).await
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => report_failure(&e, &log, &mode),
    }
}

/// Builds the event log from the settings, taking the hostname from the
/// replay table when one is configured.
fn event_log(settings: &Settings) -> EventLog {
    let hostname = settings
        .replay
        .as_ref()
        .and_then(ReplayTable::hostname)
        .unwrap_or_else(local_hostname);
    EventLog::new(settings.logfile(), hostname)
}

/// Prints a fatal error and returns the failure exit code.
fn report_failure(error: &RunError, log: &EventLog, mode: &Mode) -> ExitCode {
    let message = error.to_string();
    eprintln!("{message}");
    if !mode.is_interactive() {
        log.append(&message);
    }
    exit_code::FAILURE
}

/// Runs one invocation described by `context`, printing results on `out`.
///
/// # Errors
///
/// Returns the first fatal error; nothing after it is attempted.
pub async fn execute<H, R>(context: Context<H, R>, out: &mut impl Write) -> Result<(), RunError>
where
    H: HttpClient,
    R: RouteTable,
{
    let Context {
        mode,
        save_lookup,
        folder,
        mut settings,
        options,
        http,
        routes,
        log,
    } = context;
    let settings_file = settings_path(&folder);

    if mode.is_interactive() && settings.token().is_none() {
        ask_token(&mut settings, &settings_file, &options).await?;
    }

    let Some(token) = settings.token() else {
        return Err(ConfigError::MissingToken {
            path: settings_file,
        }
        .into());
    };
    let client = LinodeClient::new(http, token, options.commit)?;
    let store = FileLastIp::new(last_ip_path(&folder));

    match mode {
        Mode::Scheduled => {
            let records = settings.records();
            let updater = Updater::new(client, routes, store, log, options.persists_last_ip());
            if let UpdateOutcome::Updated(report) = updater.run(&records, &settings_file).await? {
                for notice in &report.notices {
                    writeln!(out, "{notice}")?;
                }
            }
        }
        Mode::Status => {
            let current = detect_current_ip(&routes).map(|ip| ip.to_string());
            writeln!(
                out,
                "Current IP: {}, Last IP: {}",
                current.unwrap_or_default(),
                store.stored().unwrap_or_default()
            )?;
        }
        Mode::Domains => show_domains(&client, out).await?,
        Mode::Ask => {
            let answer = options
                .answers
                .ask(&format!("Hostname to look up? [{}]:\n", defaults::ASK_HOSTNAME))
                .await
                .map_err(ConfigError::Prompt)?;
            let query = if answer.is_empty() {
                defaults::ASK_HOSTNAME.to_string()
            } else {
                answer
            };
            lookup(&client, &query, &mut settings, &settings_file, save_lookup, out).await?;
        }
        Mode::Lookup(query) => {
            lookup(&client, &query, &mut settings, &settings_file, save_lookup, out).await?;
        }
    }
    Ok(())
}

/// Asks for the API token, checks it and saves it to `settings_file`.
async fn ask_token(
    settings: &mut Settings,
    settings_file: &Path,
    options: &RuntimeOptions,
) -> Result<(), ConfigError> {
    let question = format!(
        "What is your linode token? (will be stored in {}):\n",
        settings_file.display()
    );
    let answer = options
        .answers
        .ask(&question)
        .await
        .map_err(ConfigError::Prompt)?;
    settings.token = Some(validate_token(&answer)?);
    settings.save(settings_file)
}

/// Prints every domain of the account as a table.
async fn show_domains<H: HttpClient>(
    client: &LinodeClient<H>,
    out: &mut impl Write,
) -> Result<(), RunError> {
    let domains = list_domains(client).await?;
    writeln!(out, "{:>10} {:<9} {:<8} {}", "ID", "Status", "Type", "Domain")?;
    for domain in &domains {
        writeln!(
            out,
            "{:>10} {:<9} {:<8} {}",
            domain.id.to_string(),
            domain.status,
            domain.kind,
            domain.name
        )?;
    }
    Ok(())
}

/// Looks up `query`, prints the endpoints found and the resulting settings.
async fn lookup<H: HttpClient>(
    client: &LinodeClient<H>,
    query: &str,
    settings: &mut Settings,
    settings_file: &Path,
    save: bool,
    out: &mut impl Write,
) -> Result<(), RunError> {
    let query = HostQuery::parse(query);
    let domains = list_domains(client).await?;
    let discovery = find_records(client, &domains, &query).await?;

    print_discovery(&discovery, &query.host, out)?;

    settings.records = Some(discovery.records_value());
    let heading = if save {
        settings.save(settings_file)?;
        writeln!(
            out,
            "\n{} saved, you should be good to go!",
            settings_file.display()
        )?;
        format!("Contents of {}", settings_file.display())
    } else {
        format!(
            "Re-run with --commit to save this to '{}':",
            settings_file.display()
        )
    };
    writeln!(out, "\n{heading}\n")?;
    writeln!(out, "{}", settings.to_json()?)?;
    Ok(())
}

/// Prints the endpoint table, domains and endpoints in ascending order.
fn print_discovery(discovery: &Discovery, host: &str, out: &mut impl Write) -> io::Result<()> {
    writeln!(
        out,
        "{} linode DNS records found with hostname '{host}':\n",
        discovery.len()
    )?;
    writeln!(out, "{:<30} {}", "Entry point", "Domain")?;
    for (domain, endpoints) in &discovery.by_domain {
        let mut endpoints = endpoints.clone();
        endpoints.sort();
        for endpoint in endpoints {
            writeln!(out, "{endpoint:<30} {domain}")?;
        }
    }
    Ok(())
}

//! CLI command implementations
//!
//! Both commands resolve their data gateway the same way: a `--data-file`
//! argument wins over the environment, and without any data file the
//! Elasticsearch settings are used.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{load_configuration, Configuration};
use crate::database::create_data_gateway;
use crate::gazettes::{create_gazettes_interface, GatewayResult, GazetteAccessInterface, GazetteItem};
use crate::http_server::{parse_gazette_query, ApiError, HttpServer};
use crate::observability::{Event, Logger};

use super::args::Command;
use super::errors::{CliError, CliResult};
use super::io::{write_json, write_stdout};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { port, data_file } => serve(port, data_file),
        Command::Query {
            data_file,
            territory,
            since,
            until,
            keywords,
            page,
            page_size,
        } => {
            // stdout carries the JSON result only
            Logger::reserve_stdout();

            let mut pairs = Vec::new();
            let scalars = [("since", since), ("until", until), ("page", page), ("page_size", page_size)];
            for (key, value) in scalars {
                if let Some(value) = value {
                    pairs.push((key.to_string(), value));
                }
            }
            pairs.extend(keywords.into_iter().map(|k| ("keywords".to_string(), k)));

            let config = resolve_configuration(None, data_file)?;
            let gazettes = create_gazettes_interface(create_data_gateway(&config)?);
            let items = query(gazettes.as_ref(), territory, &pairs)?;
            write_stdout(&items)
        }
    }
}

/// Load the environment configuration and apply command-line overrides
fn resolve_configuration(port: Option<u16>, data_file: Option<PathBuf>) -> CliResult<Configuration> {
    let mut config = load_configuration()?;
    if port.is_some() {
        config.port = port;
    }
    if data_file.is_some() {
        config.data_file = data_file;
    }

    let backend = match &config.data_file {
        Some(path) => path.display().to_string(),
        None => config.host.clone(),
    };
    Logger::info(Event::ConfigLoaded, &[("backend", &backend)]);
    Ok(config)
}

/// Start the HTTP API and serve until interrupted
pub fn serve(port: Option<u16>, data_file: Option<PathBuf>) -> CliResult<()> {
    let config = resolve_configuration(port, data_file)?;

    // Backends are set up before the runtime starts; the Elasticsearch
    // client is blocking.
    let gateway = create_data_gateway(&config)?;
    Logger::info(Event::GatewayReady, &[]);

    let gazettes = create_gazettes_interface(gateway);
    let server = HttpServer::new(config.http_server_config(), Arc::clone(&gazettes));

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_failed(format!("Failed to create tokio runtime: {}", e)))?;
    let result = rt.block_on(server.start());
    drop(rt);

    // The last handle on the gateway is released outside the runtime.
    drop(gazettes);

    result.map_err(|e| CliError::server_failed(format!("HTTP server failed: {}", e)))
}

/// Run one query through `gazettes`, validating `pairs` like the HTTP layer
pub fn query(
    gazettes: &dyn GazetteAccessInterface,
    territory_id: Option<String>,
    pairs: &[(String, String)],
) -> CliResult<Vec<GazetteItem>> {
    let filter = parse_gazette_query(territory_id, pairs)?;
    let items = gazettes
        .get_gazettes(Some(filter))
        .collect::<GatewayResult<Vec<_>>>()
        .map_err(ApiError::from)?;
    Ok(items)
}

/// Run one query and write the JSON array to `writer`
pub fn query_to_writer<W: Write>(
    gazettes: &dyn GazetteAccessInterface,
    territory_id: Option<String>,
    pairs: &[(String, String)],
    writer: &mut W,
) -> CliResult<()> {
    let items = query(gazettes, territory_id, pairs)?;
    write_json(writer, &items)
}

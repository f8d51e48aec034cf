// FILE: crates/cli/src/main.rs

use anyhow::{Context, Result};
use bookcaster_config::{Config, ConfigManager};
use clap::{Arg, ArgMatches, Command};

mod commands;

fn build_cli() -> Command {
    Command::new("bookcaster")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Bookcaster Contributors")
        .about("Serves an audiobook directory as podcast feeds")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to the configuration file")
                .global(true),
        )
        .subcommand(
            Command::new("serve")
                .about("Start the HTTP server")
                .arg(Arg::new("bind").short('b').long("bind").value_name("ADDR").help("Address to bind (overrides config)"))
                .arg(
                    Arg::new("port")
                        .short('p')
                        .long("port")
                        .value_name("PORT")
                        .help("Port to listen on (overrides config)")
                        .value_parser(clap::value_parser!(u16).range(1..)),
                ),
        )
        .subcommand(Command::new("authors").about("List all authors in the library"))
        .subcommand(
            Command::new("books")
                .about("List the books of an author")
                .arg(Arg::new("author").required(true).value_name("AUTHOR").help("Author directory name")),
        )
        .subcommand(
            Command::new("files")
                .about("List the audio files of a book")
                .arg(Arg::new("author").required(true).value_name("AUTHOR").help("Author directory name"))
                .arg(Arg::new("book").required(true).value_name("BOOK").help("Book directory or file name")),
        )
        .subcommand(
            Command::new("feed")
                .about("Print the podcast feed of a book")
                .arg(Arg::new("author").required(true).value_name("AUTHOR").help("Author directory name"))
                .arg(Arg::new("book").required(true).value_name("BOOK").help("Book directory or file name"))
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_name("URL")
                        .help("Base URL used for audio links"),
                ),
        )
        .subcommand(Command::new("init-config").about("Write a default configuration file"))
}

fn config_manager(matches: &ArgMatches) -> Result<ConfigManager> {
    match matches.get_one::<String>("config") {
        Some(path) => Ok(ConfigManager::with_path(path)),
        None => ConfigManager::new().context("Failed to locate configuration directory"),
    }
}

fn init_logging(config: &Config) {
    let default_filter = if config.server.debug { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .ok_or_else(|| anyhow::anyhow!("{} is required", name))
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = build_cli().get_matches();
    let manager = config_manager(&matches)?;

    if let Some(("init-config", _)) = matches.subcommand() {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
        return commands::init_config(&manager);
    }

    let mut config = manager
        .load_with_env_overrides()
        .with_context(|| format!("Failed to load configuration from {}", manager.config_path().display()))?;
    init_logging(&config);
    log::debug!("Loaded configuration from {}", manager.config_path().display());

    match matches.subcommand() {
        Some(("serve", sub_matches)) => {
            if let Some(bind) = sub_matches.get_one::<String>("bind") {
                config.server.bind_address = bind.clone();
            }
            if let Some(port) = sub_matches.get_one::<u16>("port") {
                config.server.port = *port;
            }
            bookcaster_server::serve(&config)
                .await
                .context("HTTP server failed")
        }
        Some(("authors", _)) => commands::list_authors(&config),
        Some(("books", sub_matches)) => commands::list_books(&config, required(sub_matches, "author")?),
        Some(("files", sub_matches)) => commands::list_files(
            &config,
            required(sub_matches, "author")?,
            required(sub_matches, "book")?,
        ),
        Some(("feed", sub_matches)) => {
            let default_base = format!("http://{}:{}", config.server.bind_address, config.server.port);
            let base_url = sub_matches
                .get_one::<String>("base-url")
                .cloned()
                .unwrap_or(default_base);
            let xml = commands::render_feed(
                &config,
                required(sub_matches, "author")?,
                required(sub_matches, "book")?,
                &base_url,
            )?;
            println!("{}", xml);
            Ok(())
        }
        _ => {
            build_cli().print_help()?;
            Ok(())
        }
    }
}

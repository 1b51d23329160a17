use crate::config::DEFAULT_CONFIG_PATH;
use clap::{ArgAction, Parser};
use tracing::Level;
use tracing_subscriber;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub config_path: String,
    pub directory: Option<String>,
    pub dry_run: bool,
}

pub struct Args {
    pub command: Command,
    pub log_level: Level,
}

#[derive(Debug, Parser)]
#[command(
    name = "relfetch",
    version,
    author = "Nick Guletskii",
    about = "Download and unpack the release archive named in a configuration file"
)]
struct Cli {
    #[arg(
        short = 'v',
        long = "verbose",
        help = "Sets the level of verbosity",
        action = ArgAction::Count
    )]
    verbose: u8,

    #[arg(
        value_name = "CONFIG",
        help = "Configuration file",
        default_value = DEFAULT_CONFIG_PATH
    )]
    config: String,

    #[arg(
        short = 'C',
        long = "directory",
        value_name = "DIR",
        help = "Downloads and unpacks into DIR instead of the current directory"
    )]
    directory: Option<String>,

    #[arg(
        long = "dry-run",
        help = "Prints what would be downloaded and unpacked without doing it"
    )]
    dry_run: bool,
}

impl From<Cli> for Command {
    fn from(cli: Cli) -> Self {
        Command {
            config_path: cli.config,
            directory: cli.directory,
            dry_run: cli.dry_run,
        }
    }
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn parse_args() -> Args {
    let cli = Cli::parse();

    let log_level = log_level(cli.verbose);

    let mut env_filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();
    if let Ok(directive) = "opendal=warn".parse() {
        env_filter = env_filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_env_filter(env_filter)
        .init();

    Args {
        command: Command::from(cli),
        log_level,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_config_yaml() {
        let cli = Cli::try_parse_from(["relfetch"]).unwrap();

        assert_eq!(log_level(cli.verbose), Level::INFO);
        assert_eq!(
            Command::from(cli),
            Command {
                config_path: "config.yaml".to_string(),
                directory: None,
                dry_run: false,
            }
        );
    }

    #[test]
    fn test_positional_config_and_flags() {
        let cli =
            Cli::try_parse_from(["relfetch", "-vv", "--dry-run", "-C", "out", "other.yaml"])
                .unwrap();

        assert_eq!(log_level(cli.verbose), Level::TRACE);
        assert_eq!(
            Command::from(cli),
            Command {
                config_path: "other.yaml".to_string(),
                directory: Some("out".to_string()),
                dry_run: true,
            }
        );
    }

    #[test]
    fn test_rejects_second_positional() {
        assert!(Cli::try_parse_from(["relfetch", "a.yaml", "b.yaml"]).is_err());
    }
}

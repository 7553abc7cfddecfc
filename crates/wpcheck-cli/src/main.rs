//! wpcheck - WordPress-style configuration checker.
//!
//! The entry point for wpcheck, handling:
//! - Loading and validating wp-config.php sources
//! - Redacted configuration display
//! - Audit snapshots
//!
//! stdout is reserved for command payloads (JSON or human output); all
//! logging goes to stderr.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use wpcheck_config::error::format_error_human;
use wpcheck_config::{
    load_from_str, placeholder_secrets, resolve_source, validate_production, ConfigError,
    ConfigSnapshot, ConfigurationSet,
};

mod exit_codes;

use exit_codes::ExitCode;

/// wpcheck - load, validate, and inspect wp-config.php sources
#[derive(Parser)]
#[command(name = "wpcheck")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    global: GlobalOpts,
}

/// Global options available to all commands
#[derive(Args, Debug)]
struct GlobalOpts {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "human")]
    format: OutputFormat,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Decrease verbosity (quiet mode)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,
}

/// Output format for command payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable text
    Human,
    /// Machine-parseable JSON
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a configuration source and report problems
    Check(CheckArgs),

    /// Print the loaded configuration with secrets redacted
    Show(PathArg),

    /// Print an audit snapshot of the configuration
    Snapshot(PathArg),

    /// Print version information
    Version,
}

#[derive(Args)]
struct CheckArgs {
    /// Path to the configuration source (falls back to WPCHECK_CONFIG,
    /// WPCHECK_CONFIG_DIR, XDG, then /etc/wpcheck)
    path: Option<PathBuf>,

    /// Also enforce production requirements (non-empty, distinct secrets)
    #[arg(long)]
    strict: bool,
}

#[derive(Args)]
struct PathArg {
    /// Path to the configuration source (falls back to WPCHECK_CONFIG,
    /// WPCHECK_CONFIG_DIR, XDG, then /etc/wpcheck)
    path: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.global);
    let code = run(cli);
    process::exit(code.as_i32());
}

/// Initialize stderr logging from verbosity flags.
///
/// RUST_LOG takes precedence over the flag-derived filter.
fn init_logging(global: &GlobalOpts) {
    use tracing_subscriber::EnvFilter;

    let level = if global.quiet {
        "error"
    } else {
        match global.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("wpcheck={level},wpcheck_config={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(use_color(global))
        .init();
}

fn use_color(global: &GlobalOpts) -> bool {
    !global.no_color && std::io::stderr().is_terminal()
}

fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Commands::Check(args) => cmd_check(&cli.global, &args),
        Commands::Show(args) => cmd_show(&cli.global, args.path.as_deref()),
        Commands::Snapshot(args) => cmd_snapshot(&cli.global, args.path.as_deref()),
        Commands::Version => {
            println!("wpcheck {}", env!("CARGO_PKG_VERSION"));
            ExitCode::Clean
        }
    }
}

/// Locate the configuration source, or report why none was found.
fn locate(global: &GlobalOpts, cli_path: Option<&Path>) -> Result<PathBuf, ExitCode> {
    let resolved = resolve_source(cli_path);
    match resolved.path {
        Some(path) => {
            tracing::info!(
                "using configuration from {} ({})",
                path.display(),
                resolved.source
            );
            Ok(path)
        }
        None => {
            let err = ConfigError::UnreadableSource {
                path: cli_path
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| PathBuf::from("wp-config.php")),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no configuration source found in any search location",
                ),
            };
            Err(report_error(global, &err))
        }
    }
}

/// Read and load a source, keeping the raw text for snapshots.
fn read_and_load(path: &Path) -> Result<(String, ConfigurationSet), ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::UnreadableSource {
        path: path.to_path_buf(),
        source: e,
    })?;
    let origin = path.parent().unwrap_or_else(|| Path::new("."));
    let config = load_from_str(&raw, origin)?;
    Ok((raw, config))
}

fn cmd_check(global: &GlobalOpts, args: &CheckArgs) -> ExitCode {
    let path = match locate(global, args.path.as_deref()) {
        Ok(path) => path,
        Err(code) => return code,
    };

    let config = match read_and_load(&path) {
        Ok((_, config)) => config,
        Err(err) => return report_error(global, &err),
    };

    if args.strict {
        if let Err(err) = validate_production(&config) {
            return report_error(global, &err);
        }
    }

    let placeholders = placeholder_secrets(&config);

    match global.format {
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "status": "ok",
                "source": path.display().to_string(),
                "strict": args.strict,
                "placeholder_secrets": placeholders,
            });
            println!("{payload}");
        }
        OutputFormat::Human => {
            let (green, yellow, reset) = if use_color(global) {
                ("\x1b[32m", "\x1b[33m", "\x1b[0m")
            } else {
                ("", "", "")
            };
            println!("{green}✓{reset} configuration OK: {}", path.display());
            for name in &placeholders {
                println!("{yellow}!{reset} {name} looks like a fixture placeholder");
            }
        }
    }

    if placeholders.is_empty() {
        ExitCode::Clean
    } else {
        ExitCode::Advisories
    }
}

fn cmd_show(global: &GlobalOpts, cli_path: Option<&Path>) -> ExitCode {
    let path = match locate(global, cli_path) {
        Ok(path) => path,
        Err(code) => return code,
    };

    let config = match read_and_load(&path) {
        Ok((_, config)) => config,
        Err(err) => return report_error(global, &err),
    };

    match global.format {
        OutputFormat::Json => match serde_json::to_string_pretty(&config) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                tracing::error!("failed to serialize configuration: {err}");
                return ExitCode::Internal;
            }
        },
        OutputFormat::Human => print_human_config(&config),
    }

    ExitCode::Clean
}

/// Print the configuration as a human-readable listing.
///
/// Secrets are shown as fingerprints only.
fn print_human_config(config: &ConfigurationSet) {
    println!("database:");
    println!("  name:      {}", config.database.name);
    println!("  user:      {}", config.database.user);
    println!("  password:  {}", config.database.password.fingerprint());
    println!("  host:      {}", config.database.host);
    println!("  charset:   {}", config.database.charset);
    let collation = if config.database.collation.is_empty() {
        "(server default)"
    } else {
        config.database.collation.as_str()
    };
    println!("  collation: {collation}");
    println!("keys:");
    for (name, secret) in config.keys.iter() {
        println!("  {:<17} {}", name, secret.fingerprint());
    }
    println!("table_prefix: {}", config.table_prefix);
    println!("debug_mode:   {}", config.debug_mode);
    println!("base_path:    {}", config.base_path.display());
    if let Some(bootstrap) = &config.bootstrap {
        println!("bootstrap:    {bootstrap} (opaque, not interpreted)");
    }
}

fn cmd_snapshot(global: &GlobalOpts, cli_path: Option<&Path>) -> ExitCode {
    let path = match locate(global, cli_path) {
        Ok(path) => path,
        Err(code) => return code,
    };

    let (raw, config) = match read_and_load(&path) {
        Ok(loaded) => loaded,
        Err(err) => return report_error(global, &err),
    };

    let snapshot = ConfigSnapshot::new(&config, &path, &raw);
    match snapshot.to_json() {
        Ok(json) => {
            println!("{json}");
            ExitCode::Clean
        }
        Err(err) => {
            tracing::error!("failed to serialize snapshot: {err}");
            ExitCode::Internal
        }
    }
}

/// Report an error in the requested format and map it to an exit code.
fn report_error(global: &GlobalOpts, err: &ConfigError) -> ExitCode {
    match global.format {
        OutputFormat::Human => {
            eprintln!("{}", format_error_human(err, use_color(global)));
        }
        OutputFormat::Json => {
            let payload = serde_json::json!({
                "code": err.code(),
                "headline": err.headline(),
                "message": err.to_string(),
                "recoverable": err.is_recoverable(),
                "remediation": err.remediation(),
            });
            println!("{payload}");
        }
    }
    ExitCode::from(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_check_parses_path_and_strict() {
        let cli = Cli::parse_from(["wpcheck", "check", "--strict", "/tmp/wp-config.php"]);
        match cli.command {
            Commands::Check(args) => {
                assert!(args.strict);
                assert_eq!(args.path.as_deref(), Some(Path::new("/tmp/wp-config.php")));
            }
            _ => panic!("expected check subcommand"),
        }
    }

    #[test]
    fn test_format_flag_is_global() {
        let cli = Cli::parse_from(["wpcheck", "show", "--format", "json"]);
        assert_eq!(cli.global.format, OutputFormat::Json);
    }

    #[test]
    fn test_report_error_maps_exit_code() {
        let global = GlobalOpts {
            format: OutputFormat::Json,
            verbose: 0,
            quiet: true,
            no_color: true,
        };
        let err = ConfigError::MissingRequiredKey { key: "DB_NAME" };
        assert_eq!(report_error(&global, &err), ExitCode::MissingKey);
    }
}

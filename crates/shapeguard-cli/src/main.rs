//! CLI entry point for shapeguard.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `shapeguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::error::ErrorKind;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use shapeguard_app::{
    AllowlistInput, CheckInput, ExplainOutput, OutputFormat, SchemaInput, render_diagnostics,
    render_markdown, run_allowlist, run_check, run_explain, run_schema, verdict_exit_code,
    write_report, write_text,
};
use shapeguard_markers::{FeatureSetActivation, MarkerRegistry};
use shapeguard_repo::FsTypeGraphProvider;
use shapeguard_settings::Overrides;
use shapeguard_types::Diagnostic;
use std::ffi::OsString;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "shapeguard.toml";

/// Long options that may also be spelled with a single dash, e.g. `-allowlist`.
const LONG_FLAGS: &[&str] = &[
    "allowlist",
    "excluded",
    "root",
    "config",
    "format",
    "report-out",
    "markdown-out",
    "out",
    "verbose",
    "help",
    "version",
];

#[derive(Parser, Debug)]
#[command(
    name = "shapeguard",
    version,
    about = "Type-policy enforcement for versioned public API types"
)]
struct Cli {
    /// Root directory of the type graph (`<root>/<package>/types.json`).
    #[arg(long, global = true, default_value = ".")]
    root: Utf8PathBuf,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum FormatArg {
    /// One diagnostic message per line.
    #[default]
    Lines,
    /// GitHub Actions annotations.
    Github,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Lines => OutputFormat::Lines,
            FormatArg::Github => OutputFormat::Github,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check field types against an allow-list pattern.
    Allowlist {
        /// Packages to check, in order.
        #[arg(required = true)]
        packages: Vec<String>,

        /// Pattern every field type signature must match somewhere.
        #[arg(long)]
        allowlist: String,

        /// `<package-path>.<TypeName>:<FieldName>` to exempt (repeatable).
        #[arg(long)]
        excluded: Vec<String>,

        #[arg(long, value_enum, default_value_t = FormatArg::Lines)]
        format: FormatArg,
    },

    /// Run every check enabled by the config file.
    Check {
        #[arg(required = true)]
        packages: Vec<String>,

        /// Config TOML (default: ./shapeguard.toml; a missing file means defaults).
        #[arg(long)]
        config: Option<Utf8PathBuf>,

        /// Override the config's allow-list pattern.
        #[arg(long)]
        allowlist: Option<String>,

        /// Additional exclusions on top of the config's (repeatable).
        #[arg(long)]
        excluded: Vec<String>,

        /// Where to write the JSON report.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Where to write a Markdown summary.
        #[arg(long)]
        markdown_out: Option<Utf8PathBuf>,

        #[arg(long, value_enum, default_value_t = FormatArg::Lines)]
        format: FormatArg,
    },

    /// Print generated schemas with markers applied for the active feature sets.
    Schema {
        #[arg(required = true)]
        packages: Vec<String>,

        /// Write to a file instead of stdout.
        #[arg(long)]
        out: Option<Utf8PathBuf>,
    },

    /// Explain a check_id or code with remediation guidance.
    Explain {
        /// The check_id (e.g. "types.allowlist") or code (e.g. "disallowed_type").
        identifier: String,
    },

    /// Print the JSON schema of the config file.
    ConfigSchema,
}

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse_from(normalize_args(std::env::args_os())) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => err.exit(),
            // Usage errors fail like any other error: exit 1.
            _ => {
                eprint!("{}", err.render());
                std::process::exit(1);
            }
        },
    };
    init_tracing(cli.verbose);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("shapeguard error: {err:#}");
            1
        }
    };
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}

fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Rewrite `-name` to `--name` for known long options, up to a `--` separator.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    let mut passthrough = false;
    args.into_iter()
        .enumerate()
        .map(|(idx, arg)| {
            if idx == 0 || passthrough {
                return arg;
            }
            match arg.to_str() {
                Some("--") => {
                    passthrough = true;
                    arg
                }
                Some(s) if is_single_dash_long(s) => OsString::from(format!("-{s}")),
                _ => arg,
            }
        })
        .collect()
}

fn is_single_dash_long(arg: &str) -> bool {
    let Some(rest) = arg.strip_prefix('-') else {
        return false;
    };
    if rest.starts_with('-') {
        return false;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    LONG_FLAGS.contains(&name)
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    // Feature sets are fixed for the rest of the process.
    let active = FeatureSetActivation::from_env()
        .install()
        .context("activate feature sets")?;
    tracing::debug!(feature_sets = ?active.names().collect::<Vec<_>>(), "feature sets");

    let provider = FsTypeGraphProvider::new(cli.root.clone());

    match &cli.cmd {
        Commands::Allowlist {
            packages,
            allowlist,
            excluded,
            format,
        } => {
            let output = run_allowlist(AllowlistInput {
                provider: &provider,
                packages,
                allowlist,
                excluded: excluded.clone(),
            })?;
            emit_diagnostics(&output.report.diagnostics, (*format).into());
            Ok(verdict_exit_code(output.report.verdict))
        }
        Commands::Check {
            packages,
            config,
            allowlist,
            excluded,
            report_out,
            markdown_out,
            format,
        } => {
            let config_text = read_config(config.as_deref())?;
            let output = run_check(CheckInput {
                provider: &provider,
                packages,
                config_text: &config_text,
                overrides: Overrides {
                    allowlist: allowlist.clone(),
                    excluded: excluded.clone(),
                },
            })?;

            if let Some(path) = report_out {
                write_report(path, &output.report).context("write report json")?;
            }
            if let Some(path) = markdown_out {
                write_text(path, &render_markdown(&output.report)).context("write markdown")?;
            }
            emit_diagnostics(&output.report.diagnostics, (*format).into());
            Ok(verdict_exit_code(output.report.verdict))
        }
        Commands::Schema { packages, out } => {
            let registry = MarkerRegistry::builtin();
            let schemas = run_schema(SchemaInput {
                provider: &provider,
                packages,
                registry: &registry,
                active,
            })?;
            let mut text = serde_json::to_string_pretty(&schemas).context("serialize schemas")?;
            text.push('\n');
            match out {
                Some(path) => write_text(path, &text).context("write schemas")?,
                None => print!("{text}"),
            }
            Ok(0)
        }
        Commands::Explain { identifier } => Ok(cmd_explain(identifier)),
        Commands::ConfigSchema => {
            let schema = shapeguard_settings::config_json_schema();
            println!(
                "{}",
                serde_json::to_string_pretty(&schema).context("serialize config schema")?
            );
            Ok(0)
        }
    }
}

/// Load config text. A missing file means defaults.
fn read_config(path: Option<&Utf8Path>) -> anyhow::Result<String> {
    let explicit = path.is_some();
    let path = path.unwrap_or(Utf8Path::new(DEFAULT_CONFIG));
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            if explicit {
                tracing::warn!(%path, "config file not found; using defaults");
            } else {
                tracing::debug!(%path, "no config file; using defaults");
            }
            Ok(String::new())
        }
        Err(err) => Err(err).with_context(|| format!("read config {path}")),
    }
}

fn emit_diagnostics(diagnostics: &[Diagnostic], format: OutputFormat) {
    for line in render_diagnostics(diagnostics, format) {
        eprintln!("{line}");
    }
}

fn cmd_explain(identifier: &str) -> i32 {
    match run_explain(identifier) {
        ExplainOutput::Found(exp) => {
            print!("{}", shapeguard_app::format_explanation(&exp));
            0
        }
        ExplainOutput::NotFound {
            identifier,
            available_check_ids,
            available_codes,
        } => {
            eprint!(
                "{}",
                shapeguard_app::format_not_found(&identifier, available_check_ids, available_codes)
            );
            1
        }
    }
}

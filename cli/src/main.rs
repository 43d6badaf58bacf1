use std::collections::BTreeMap;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use optref_config::{SiteConfig, on_read_the_docs, parse_variable, validate_config};
use optref_core::{
    InheritProgram, LinkProcessor, ProgramSplitting, ReferenceRequest, declare_program,
    parse_option_signatures, scan_document_with,
};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter directive.
const LOG_ENV: &str = "OPTREF_LOG";

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Json,
    Yaml,
    Text,
}

#[derive(Debug, Parser)]
#[command(name = "optref")]
#[command(about = "Option cross-reference resolution for command-line documentation")]
#[command(version)]
struct Cli {
    /// Log resolution decisions to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Resolve a single option reference into program and target.
    Resolve(ResolveArgs),
    /// Parse an option description signature such as "-c, --config <file>".
    ParseOption(ParseOptionArgs),
    /// Find and resolve option references in a reStructuredText file.
    Scan(ScanArgs),
    /// Documentation-site configuration operations.
    Config(ConfigArgs),
}

#[derive(Debug, Args)]
struct ResolveArgs {
    /// Display text of the reference.
    #[arg(long, allow_hyphen_values = true)]
    title: String,
    /// Reference target (defaults to the title).
    #[arg(long, allow_hyphen_values = true)]
    target: Option<String>,
    /// Program declared in scope where the reference occurs.
    #[arg(long)]
    program: Option<String>,
    /// The title is a label distinct from the target.
    #[arg(long)]
    explicit_title: bool,
    /// Never take the program from the reference text.
    #[arg(long)]
    inherit_only: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ParseOptionArgs {
    /// Option description signature.
    #[arg(allow_hyphen_values = true)]
    signature: String,
    /// Fail when any part of the signature is malformed.
    #[arg(long)]
    strict: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ScanArgs {
    /// reStructuredText file, or "-" for stdin.
    input: PathBuf,
    /// Never take the program from the reference text.
    #[arg(long)]
    inherit_only: bool,
    /// Output format.
    #[arg(long, default_value = "json")]
    format: OutputFormat,
}

#[derive(Debug, Args)]
struct ConfigArgs {
    #[command(subcommand)]
    operation: ConfigOperation,
}

#[derive(Debug, Subcommand)]
enum ConfigOperation {
    /// Load, substitute and validate a site configuration.
    Check(ConfigCheckArgs),
    /// List the manual-page catalog.
    ManPages(ConfigManPagesArgs),
}

#[derive(Debug, Args)]
struct ConfigSource {
    /// Site configuration file (YAML, or JSON with a .json extension).
    config: PathBuf,
    /// Placeholder value as NAME=VALUE; repeatable.
    #[arg(long = "var", value_name = "NAME=VALUE")]
    vars: Vec<String>,
}

#[derive(Debug, Args)]
struct ConfigCheckArgs {
    #[command(flatten)]
    source: ConfigSource,
    /// Treat the preferred HTML theme as not installed.
    #[arg(long)]
    without_preferred_theme: bool,
}

#[derive(Debug, Args)]
struct ConfigManPagesArgs {
    #[command(flatten)]
    source: ConfigSource,
    /// Only list pages in this manual section.
    #[arg(long)]
    section: Option<u8>,
    /// Output format.
    #[arg(long, default_value = "text")]
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Resolve(args) => run_resolve(args),
        Command::ParseOption(args) => run_parse_option(args),
        Command::Scan(args) => run_scan(args),
        Command::Config(args) => match args.operation {
            ConfigOperation::Check(args) => run_config_check(args),
            ConfigOperation::ManPages(args) => run_config_man_pages(args),
        },
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn processor(inherit_only: bool) -> &'static dyn LinkProcessor {
    if inherit_only {
        &InheritProgram
    } else {
        &ProgramSplitting
    }
}

fn emit<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> Result<(), String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(value)
            .map_err(|e| format!("JSON serialization failed: {e}"))?,
        OutputFormat::Yaml => {
            serde_yaml::to_string(value).map_err(|e| format!("YAML serialization failed: {e}"))?
        }
        OutputFormat::Text => text(value),
    };
    println!("{}", rendered.trim_end());
    Ok(())
}

// ---------------------------------------------------------------------------
// resolve / parse-option / scan
// ---------------------------------------------------------------------------

fn run_resolve(args: ResolveArgs) -> Result<(), String> {
    let target = args.target.unwrap_or_else(|| args.title.clone());
    let request = ReferenceRequest {
        has_explicit_title: args.explicit_title,
        title: args.title,
        target,
    };
    let context = args.program.as_deref().and_then(declare_program);

    let resolved = processor(args.inherit_only).process_link(context.as_deref(), &request);
    emit(&resolved, args.format, |r| {
        format!("{} {}", r.program.as_deref().unwrap_or("-"), r.target)
    })
}

fn run_parse_option(args: ParseOptionArgs) -> Result<(), String> {
    let parsed = parse_option_signatures(&args.signature);
    if args.strict && !parsed.is_clean() {
        return Err(format!(
            "malformed option description: {}",
            parsed.malformed.join(", ")
        ));
    }

    emit(&parsed, args.format, |p| {
        p.options
            .iter()
            .map(|opt| format!("{}\t{}", opt.name, opt.args))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn run_scan(args: ScanArgs) -> Result<(), String> {
    let text = read_input(&args.input)?;
    let found = scan_document_with(&text, processor(args.inherit_only));
    info!(references = found.len(), "scanned document");

    emit(&found, args.format, |occurrences| {
        occurrences
            .iter()
            .map(|occ| {
                format!(
                    "{}: {} -> {} {}",
                    occ.line,
                    occ.raw,
                    occ.resolved.program.as_deref().unwrap_or("-"),
                    occ.resolved.target
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    })
}

fn read_input(input: &Path) -> Result<String, String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .map_err(|err| format!("Failed to read stdin: {err}"))?;
        return Ok(text);
    }
    fs::read_to_string(input).map_err(|err| format!("Failed to read '{}': {err}", input.display()))
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

fn load_config(source: &ConfigSource) -> Result<SiteConfig, String> {
    let vars = source
        .vars
        .iter()
        .map(|raw| parse_variable(raw))
        .collect::<Result<BTreeMap<_, _>, _>>()
        .map_err(|e| e.to_string())?;

    let template = SiteConfig::load(&source.config)
        .map_err(|e| format!("Failed to load '{}': {e}", source.config.display()))?;
    debug!(vars = vars.len(), "substituting placeholders");
    template.substitute(&vars).map_err(|e| e.to_string())
}

fn run_config_check(args: ConfigCheckArgs) -> Result<(), String> {
    let config = load_config(&args.source)?;

    let errors = validate_config(&config);
    if !errors.is_empty() {
        for err in &errors {
            eprintln!("  - {err}");
        }
        return Err(format!(
            "{} validation error(s) in '{}'",
            errors.len(),
            args.source.config.display()
        ));
    }

    let theme = config
        .html
        .select_theme(on_read_the_docs(), !args.without_preferred_theme);
    println!(
        "Configuration '{}' is valid: {} {}, {} man page(s), {} program(s), html theme '{}'.",
        args.source.config.display(),
        config.project,
        config.release(),
        config.man_pages.len(),
        config.declared_programs().len(),
        theme
    );
    Ok(())
}

fn run_config_man_pages(args: ConfigManPagesArgs) -> Result<(), String> {
    let config = load_config(&args.source)?;
    let pages: Vec<_> = config
        .man_pages
        .iter()
        .filter(|page| args.section.is_none_or(|section| page.section == section))
        .collect();

    emit(&pages, args.format, |pages| {
        pages
            .iter()
            .map(|page| format!("{}\t{}", page.reference(), page.description))
            .collect::<Vec<_>>()
            .join("\n")
    })
}

use std::process;
use std::str::FromStr;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use sansad::candidates::tier_count;
use sansad::config::{BASE_URL, RetryPolicy};
use sansad::resolver::SearchPlan;
use sansad::{HttpFetcher, MemberResolver, NameQuery, ResolverConfig, Role};

#[derive(Parser)]
#[command(name = "sansad")]
#[command(about = "Resolve Indian MPs and MLAs to their PRS tracker profiles", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        global = true,
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(long, default_value = BASE_URL, global = true, help = "Tracker site root")]
    base_url: String,

    #[arg(
        long,
        default_value_t = 30,
        global = true,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Per-request timeout in seconds"
    )]
    timeout_secs: u64,

    #[arg(
        long,
        default_value_t = 2,
        global = true,
        help = "Retries for transient fetch failures"
    )]
    retries: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Find a legislator's profile, falling back to the other role on a miss
    Resolve {
        #[arg(help = "Legislator name as written, honorifics allowed")]
        name: String,

        #[arg(long, value_parser = parse_role, default_value = "mp", help = "Role to search first (mp or mla)")]
        role: Role,

        #[arg(long, help = "Constituency hint, echoed in the result")]
        constituency: Option<String>,

        #[arg(long, help = "State hint, echoed in the result")]
        state: Option<String>,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
    /// Show the slug variants and URL plan for a name without fetching anything
    Candidates {
        #[arg(help = "Legislator name as written, honorifics allowed")]
        name: String,

        #[arg(long, value_parser = parse_role, default_value = "mp", help = "Role to plan for (mp or mla)")]
        role: Role,

        #[arg(long, help = "Use the reduced budget of the fallback pass")]
        reduced: bool,

        #[arg(
            short = 'o',
            long = "output",
            value_enum,
            default_value = "text",
            help = "Output format"
        )]
        format: OutputFormat,
    },
}

fn parse_role(s: &str) -> Result<Role, String> {
    Role::from_str(s).map_err(|e| e.to_string())
}

fn serialize_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Error serializing to JSON: {}", e);
            process::exit(1);
        }
    }
}

fn print_plan(plan: &SearchPlan, tiers: usize) {
    println!(
        "{} plan{} ({} slug(s), {} URL(s), up to {} tier(s))",
        plan.role,
        if plan.reduced { ", reduced" } else { "" },
        plan.slugs.len(),
        plan.candidates.len(),
        tiers
    );
    for slug in &plan.slugs {
        println!("  {:<16} {}", format!("{:?}", slug.kind), slug.slug);
    }
    for candidate in &plan.candidates {
        println!("  {}", candidate);
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let retry = RetryPolicy {
        max_retries: cli.retries,
        ..Default::default()
    };
    let fetcher = HttpFetcher::with_options(Duration::from_secs(cli.timeout_secs), retry)
        .unwrap_or_else(|e| {
            log::error!("Error creating HTTP client: {}", e);
            process::exit(1);
        });
    let resolver =
        MemberResolver::with_fetcher(fetcher, ResolverConfig::default().with_base_url(cli.base_url));

    match cli.command {
        Commands::Resolve {
            name,
            role,
            constituency,
            state,
            format,
        } => {
            let mut query = NameQuery::new(name, role);
            if let Some(constituency) = constituency {
                query = query.with_constituency(constituency);
            }
            if let Some(state) = state {
                query = query.with_state(state);
            }

            let result = resolver.resolve_member(&query).await.unwrap_or_else(|e| {
                log::error!("Error resolving member: {}", e);
                process::exit(1);
            });

            match format {
                OutputFormat::Json => serialize_json(&result),
                OutputFormat::Text => print!("{}", result),
            }
        }

        Commands::Candidates {
            name,
            role,
            reduced,
            format,
        } => {
            let plan = resolver.plan(&name, role, reduced);
            if plan.slugs.is_empty() {
                log::error!("Name '{}' yields no slug candidates", name);
                process::exit(1);
            }

            match format {
                OutputFormat::Json => serialize_json(&plan),
                OutputFormat::Text => print_plan(&plan, tier_count(role, resolver.config())),
            }
        }
    }
}

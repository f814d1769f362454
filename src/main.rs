use anyhow::{Context, Result};
use clap::Parser;
use classpath_dupes::cli::{Cli, Commands, OutputFormat};
use classpath_dupes::config::{ScopeScan, resolve_scan_config};
use classpath_dupes::descriptor::ClasspathDescriptor;
use classpath_dupes::filter::IgnoreFilter;
use classpath_dupes::project::artifacts_by_file;
use classpath_dupes::report::{Report, ScopeReport, render_text, scope_report};

fn main() -> Result<()> {
    let cli = parse_cli()?;
    init_tracing(cli.verbose)?;

    if cli.skip {
        tracing::debug!("Skipping execution!");
        return Ok(());
    }

    let config = resolve_scan_config(&cli)?;
    let filter = IgnoreFilter::new(
        config.use_default_ignores,
        config.ignored_resources.as_slice(),
    )
    .context("Invalid ignored resource pattern")?;

    let mut scopes = Vec::with_capacity(config.scans.len());
    for scan in config.scans.iter() {
        scopes.push(check_classpath(scan, &filter, &cli.command)?);
    }

    write_output(&Report { scopes }, cli.format)
}

fn parse_cli() -> Result<Cli> {
    let args: Vec<String> = std::env::args().collect();
    Ok(Cli::parse_from(rewrite_args_for_implicit_find(args)))
}

fn init_tracing(verbose: bool) -> Result<()> {
    let default_level = if verbose {
        "classpath_dupes=debug"
    } else {
        "classpath_dupes=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.parse()?),
        )
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

/// `classpath-dupes Foo --classpath ...` is shorthand for `classpath-dupes find Foo ...`.
fn rewrite_args_for_implicit_find(mut args: Vec<String>) -> Vec<String> {
    if args.len() <= 1 {
        return args;
    }

    let subcommands = ["find", "duplicates", "list", "help"];
    let valued = ["--classpath", "--project", "--scope", "--ignore", "--format", "-f"];

    let mut idx = 1usize;
    while idx < args.len() {
        let a = args[idx].as_str();
        if a == "--" {
            idx += 1;
            break;
        }

        if valued.contains(&a) {
            idx += 2;
            continue;
        }

        if a.starts_with('-') {
            idx += 1;
            continue;
        }

        break;
    }

    if idx < args.len() {
        let token = args[idx].as_str();
        if !subcommands.contains(&token) {
            args.insert(idx, "find".to_string());
        }
    }

    args
}

/// Accepts `import com.x.Foo;` as pasted from source as well as a bare name.
fn normalize_query(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(rest) = s
        .strip_prefix("import")
        .filter(|r| r.starts_with(char::is_whitespace))
    {
        s = rest.trim();
    }
    if s.ends_with(';') {
        s = s.trim_end_matches(';').trim();
    }
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

fn check_classpath(
    scan: &ScopeScan,
    filter: &IgnoreFilter,
    command: &Commands,
) -> Result<ScopeReport> {
    tracing::info!("Checking {} classpath", scan.label);

    let artifacts = artifacts_by_file(&scan.artifacts, &scan.output_directories)
        .context("Could not resolve dependencies")?;

    let mut descriptor = ClasspathDescriptor::new(filter.clone());
    let outcome = descriptor.add_all_paths(scan.classpath.iter());
    tracing::debug!(
        "indexed {} resources from {} entries ({} skipped)",
        descriptor.len(),
        outcome.added,
        outcome.skipped.len()
    );

    let (query, matches) = match command {
        Commands::Find { class_name } => {
            let query = normalize_query(class_name);
            let matches = descriptor.find_by_query(&query);
            (Some(query), matches)
        }
        Commands::Duplicates => (None, descriptor.duplicates()),
        Commands::List => (None, descriptor.all()),
    };
    for (name, providers) in matches.iter() {
        tracing::debug!("FOUND: {name} ({} sources)", providers.len());
    }

    Ok(scope_report(
        &scan.label,
        query.as_deref(),
        descriptor.len(),
        &matches,
        &artifacts,
        &outcome,
    ))
}

fn write_output(report: &Report, format: OutputFormat) -> Result<()> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Text => render_text(report),
    };

    print!("{content}");
    if !content.ends_with('\n') {
        println!();
    }
    Ok(())
}

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use clap::Parser;
use formats::parse_observations;
use runtime::{Session, SessionConfig, SiteSnapshot};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Command, SiteArgs};

type BoxError = Box<dyn std::error::Error>;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = real_main() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn real_main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let mut session = open_session(cli.command.site())?;
    let snapshot = load_site(&mut session, cli.command.site())?;

    match &cli.command {
        Command::Metrics(_) => print_json(&snapshot.metrics),
        Command::Scene(_) => print_json(&*snapshot),
        Command::Export { out, .. } => {
            let export = session.export()?;
            match out {
                Some(path) => {
                    fs::write(path, &export.contents)
                        .map_err(|e| format!("write {}: {e}", path.display()))?;
                    info!(
                        path = %path.display(),
                        hash = %export.content_hash,
                        "dataset exported"
                    );
                }
                None => {
                    let mut stdout = std::io::stdout().lock();
                    stdout.write_all(export.contents.as_bytes())?;
                    stdout.write_all(b"\n")?;
                }
            }
            Ok(())
        }
    }
}

fn open_session(args: &SiteArgs) -> Result<Session, BoxError> {
    let config = match &args.config {
        Some(path) => SessionConfig::from_path(path)?,
        None => SessionConfig::default(),
    };
    let mut session = Session::new(config);

    if let Some(path) = &args.observations {
        let points = parse_observations(&read_text(path)?)?;
        info!(count = points.len(), "observation points loaded");
        session.set_observation_points(points)?;
    }
    Ok(session)
}

fn load_site(session: &mut Session, args: &SiteArgs) -> Result<Arc<SiteSnapshot>, BoxError> {
    let mut snapshot = match &args.file {
        Some(path) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            session.load_from_source(&read_text(path)?, name)?
        }
        None => session.load_default()?,
    };

    if args.has_parameter_overrides() {
        let params = args.parameters(session.parameters());
        if let Some(updated) = session.update_parameters(params)? {
            snapshot = updated;
        }
    }
    Ok(snapshot)
}

fn read_text(path: &Path) -> Result<String, BoxError> {
    fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()).into())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<(), BoxError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

//! Beloved CLI - Project scaffolding and packaging for LÖVE games

use anyhow::Result;
use beloved_core::config;
use beloved_core::project;
use beloved_core::tui::ConsoleReporter;
use beloved_core::{Error as CoreError, Reporter, Session};
use clap::Parser;
use colored::Colorize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "beloved")]
#[command(about = "CLI for scaffolding, extending and packaging LÖVE projects")]
#[command(version)]
pub struct Args {
    /// Initialize a new project with base structure, with the name provided
    #[arg(short, long, value_name = "PROJECTNAME")]
    pub init: Option<String>,

    /// Add new class(es) to the project
    #[arg(short = 'c', long = "add-class", num_args = 1.., value_name = "CLASSNAME")]
    pub add_class: Vec<String>,

    /// Import the given library(es) to the project
    #[arg(short = 'l', long = "add-library", num_args = 1.., value_name = "LIBRARY")]
    pub add_library: Vec<String>,

    /// List all available libraries (also accepted as -ll)
    #[arg(long = "list-libraries")]
    pub list_libraries: bool,

    /// Create a runnable .love from your project
    #[arg(short = 'z', long = "zip-project")]
    pub zip_project: bool,

    /// Output file name for -z, defaults to the project directory's name
    #[arg(short, long, value_name = "FILENAME")]
    pub output: Option<String>,

    /// Custom parameters for custom templates
    #[arg(short, long, num_args = 0.., value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub parameters: Vec<(String, String)>,

    /// Configuration file to use instead of the one next to the executable
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Only print errors and the final summary
    #[arg(short, long)]
    pub quiet: bool,
}

/// Parse a `KEY=VALUE` pair; the value may itself contain `=`
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("invalid KEY=VALUE: no `=` found in `{}`", s)),
    }
}

/// Accept the two-letter `-ll` short flag, which clap cannot express
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            if arg == "-ll" {
                OsString::from("--list-libraries")
            } else {
                arg
            }
        })
        .collect()
}

fn main() -> ExitCode {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse_from(normalize_args(std::env::args_os()));
    let result = run(args);

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            let _ = cliclack::log::error(format!("{:#}", e));
            let code = e
                .downcast_ref::<CoreError>()
                .map(CoreError::exit_code)
                .unwrap_or(1);
            ExitCode::from(code)
        }
    }
}

/// Load the configuration, dispatch the requested operations and return the exit code
fn run(args: Args) -> Result<u8> {
    cliclack::intro("beloved".magenta().bold())?;

    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => config::default_config_path()?,
    };

    let spinner = cliclack::spinner();
    spinner.start(format!("Reading {}", config_path.display()));
    let loaded = match config::load(&config_path) {
        Ok(loaded) => loaded,
        Err(e) => {
            spinner.stop("Cannot load configuration");
            return Err(e.into());
        }
    };
    spinner.stop(format!("Configuration: {}", config_path.display()));

    for warning in &loaded.warnings {
        cliclack::log::warning(warning)?;
    }

    let mut session = Session::new(std::env::current_dir()?, loaded.config, loaded.registry);
    let mut reporter = ConsoleReporter::new(args.quiet);

    let first_failure = dispatch(&args, &mut session, &mut reporter)?;

    let code = first_failure.unwrap_or(if reporter.failures() > 0 { 1 } else { 0 });
    if code == 0 {
        cliclack::outro("Done!")?;
    } else {
        cliclack::outro(format!("Finished with errors (exit code {})", code).red())?;
    }

    Ok(code)
}

/// Run every requested operation in fixed order
///
/// Parameters are merged first, then init, add-class, list-libraries,
/// add-library and zip-project run regardless of their order on the command
/// line. An operation refused as a whole (not a project, missing library) is
/// reported and the next one still runs. Returns the exit code of the first
/// refused operation. I/O failures of whole operations stop the run.
fn dispatch(
    args: &Args,
    session: &mut Session,
    reporter: &mut impl Reporter,
) -> Result<Option<u8>> {
    let mut first_failure: Option<u8> = None;

    if !args.parameters.is_empty() {
        let shown: Vec<String> = args
            .parameters
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        cliclack::log::info(format!("Parameters: {}", shown.join(", ")))?;
        session.extend_parameters(args.parameters.iter().cloned());
    }

    if let Some(name) = &args.init {
        cliclack::log::step(format!(
            "Creating {} in {}",
            name.magenta().bold(),
            session.root.display().to_string().green()
        ))?;
        project::init(session, name, reporter);
    }

    if !args.add_class.is_empty() {
        let result = project::add_classes(session, &args.add_class, reporter);
        settle(result, &mut first_failure)?;
    }

    if args.list_libraries {
        match project::list_libraries(session) {
            Ok(libraries) => {
                let lines: Vec<String> = libraries.iter().map(|l| l.cyan().to_string()).collect();
                cliclack::log::info(format!(
                    "{}\n{}",
                    "Available libraries:".magenta().bold(),
                    lines.join("\n")
                ))?;
            }
            Err(e) => settle(Err(e), &mut first_failure)?,
        }
    }

    if !args.add_library.is_empty() {
        let result = project::import_libraries(session, &args.add_library, reporter);
        settle(result, &mut first_failure)?;
    }

    if args.zip_project {
        let result = project::package(session, args.output.as_deref(), reporter).map(|_| ());
        settle(result, &mut first_failure)?;
    }

    Ok(first_failure)
}

/// Report a refused operation and remember its exit code; propagate I/O failures
fn settle(result: beloved_core::Result<()>, first_failure: &mut Option<u8>) -> Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e @ CoreError::Io { .. }) => Err(e.into()),
        Err(e) => {
            cliclack::log::error(e.to_string())?;
            first_failure.get_or_insert(e.exit_code());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beloved_core::{Config, Status, TemplateRegistry};
    use std::collections::BTreeMap;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn parse(args: &[&str]) -> Args {
        let args = args.iter().map(OsString::from);
        Args::try_parse_from(normalize_args(args)).unwrap()
    }

    #[test]
    fn test_double_letter_list_flag() {
        let args = parse(&["beloved", "-ll"]);
        assert!(args.list_libraries);
        assert!(args.add_library.is_empty());
    }

    #[test]
    fn test_combined_flags() {
        let args = parse(&[
            "beloved", "-z", "-i", "Foo", "-c", "Player", "Enemy", "-o", "out", "-p", "a=1",
            "b=x=y",
        ]);
        assert_eq!(args.init.as_deref(), Some("Foo"));
        assert_eq!(args.add_class, vec!["Player", "Enemy"]);
        assert!(args.zip_project);
        assert_eq!(args.output.as_deref(), Some("out"));
        assert_eq!(
            args.parameters,
            vec![
                ("a".to_string(), "1".to_string()),
                ("b".to_string(), "x=y".to_string())
            ]
        );
    }

    #[test]
    fn test_parameter_without_equals_is_rejected() {
        let args = ["beloved", "-p", "novalue"].iter().map(OsString::from);
        assert!(Args::try_parse_from(normalize_args(args)).is_err());
        assert!(parse_key_val("=v").is_err());
    }

    #[test]
    fn test_long_flags() {
        let args = parse(&[
            "beloved",
            "--add-library",
            "hump",
            "--list-libraries",
            "--zip-project",
            "--config",
            "/tmp/beloved.conf",
        ]);
        assert_eq!(args.add_library, vec!["hump"]);
        assert!(args.list_libraries);
        assert!(args.zip_project);
        assert_eq!(args.config, Some(PathBuf::from("/tmp/beloved.conf")));
    }

    fn session_in(dir: &Path, libs: &Path) -> Session {
        let config = Config {
            libraries_folder: libs.to_path_buf(),
            ..Config::default()
        };
        Session::new(dir.to_path_buf(), config, TemplateRegistry::builtin())
    }

    #[test]
    fn test_dispatch_runs_init_before_class_and_package() {
        let workspace = TempDir::new().unwrap();
        let libs = TempDir::new().unwrap();
        let mut session = session_in(workspace.path(), libs.path());
        let mut statuses: Vec<Status> = Vec::new();

        let args = parse(&["beloved", "-z", "-c", "Player", "-i", "Foo"]);
        let first_failure = dispatch(&args, &mut session, &mut statuses).unwrap();

        let root = workspace.path().join("Foo");
        assert_eq!(first_failure, None);
        assert_eq!(session.root, root);
        assert!(root.join("Player.lua").is_file());
        assert_eq!(
            fs::read_to_string(root.join("includes.lua")).unwrap(),
            "Player = require 'Player'\n"
        );
        assert!(root.join(".build/love/Foo.love").is_file());
        assert!(!statuses.iter().any(Status::is_failure));
    }

    #[test]
    fn test_dispatch_merges_parameters_before_init() {
        let workspace = TempDir::new().unwrap();
        let libs = TempDir::new().unwrap();
        let mut session = session_in(workspace.path(), libs.path());
        let mut templates = BTreeMap::new();
        templates.insert(
            "main.lua".to_string(),
            "-- {projectname} by {author}".to_string(),
        );
        session.registry = TemplateRegistry::new(templates, Config::default());

        let args = parse(&["beloved", "-i", "Foo", "-p", "author=Ada"]);
        dispatch(&args, &mut session, &mut Vec::<Status>::new()).unwrap();

        assert_eq!(
            fs::read_to_string(workspace.path().join("Foo/main.lua")).unwrap(),
            "-- Foo by Ada"
        );
    }

    #[test]
    fn test_dispatch_missing_library_still_packages() {
        let workspace = TempDir::new().unwrap();
        let libs = TempDir::new().unwrap();
        fs::write(libs.path().join("vector.lua"), "return {}").unwrap();
        let mut session = session_in(workspace.path(), libs.path());

        let args = parse(&["beloved", "-z", "-l", "vector", "missing", "-i", "Foo"]);
        let first_failure = dispatch(&args, &mut session, &mut Vec::<Status>::new()).unwrap();

        let root = workspace.path().join("Foo");
        assert_eq!(first_failure, Some(3));
        assert!(root.join("lib/vector.lua").is_file());
        assert!(root.join(".build/love/Foo.love").is_file());
    }

    #[test]
    fn test_dispatch_outside_project_reports_not_a_project() {
        let workspace = TempDir::new().unwrap();
        let libs = TempDir::new().unwrap();
        let mut session = session_in(workspace.path(), libs.path());

        let args = parse(&["beloved", "-c", "Player", "-z"]);
        let first_failure = dispatch(&args, &mut session, &mut Vec::<Status>::new()).unwrap();

        assert_eq!(first_failure, Some(2));
        assert_eq!(fs::read_dir(workspace.path()).unwrap().count(), 0);
    }
}

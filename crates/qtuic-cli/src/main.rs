mod driver;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use driver::{BuildOptions, DriverError, Outcome};

#[derive(Parser)]
#[command(name = "qtuic")]
#[command(about = "Compile Qt Designer .ui files to Go for therecipe/qt")]
#[command(version)]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Translate a .ui file, or every .ui file in a directory
    Build {
        /// Input .ui file or directory
        path: PathBuf,

        /// Directory for the generated Go files; its name is the package name
        #[arg(long, default_value = "uigen")]
        out_dir: PathBuf,

        /// Also write a main.go that runs the form (single file only)
        #[arg(long)]
        scaffold: Option<PathBuf>,

        /// Import path of the output directory, for the scaffold
        #[arg(long)]
        go_package: Option<String>,

        /// Rebuild even if the output is newer than the input
        #[arg(long)]
        force: bool,
    },

    /// Parse and compile a .ui file without writing anything
    Check {
        /// Input .ui file
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build {
            path,
            out_dir,
            scaffold,
            go_package,
            force,
        } => {
            let options = BuildOptions {
                out_dir,
                scaffold,
                go_package,
                force,
            };
            cmd_build(&path, &options)
        }
        Command::Check { path } => cmd_check(&path),
    }
}

fn init_logging(verbose: bool) {
    let mut builder = env_logger::Builder::new();
    if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }
    builder.init();
}

fn cmd_build(path: &Path, options: &BuildOptions) {
    match driver::build(path, options) {
        Ok(outcomes) => report(&outcomes),
        Err(DriverError::Batch {
            failed,
            total,
            outcomes,
        }) => {
            report(&outcomes);
            eprintln!("Error: {failed} of {total} files failed to build");
            std::process::exit(1);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

fn report(outcomes: &[Outcome]) {
    for outcome in outcomes {
        match outcome {
            Outcome::Written(file) => eprintln!("Built: {}", file.display()),
            Outcome::UpToDate(file) => eprintln!("Up to date: {}", file.display()),
        }
    }
}

fn cmd_check(path: &Path) {
    if !path.is_file() {
        eprintln!("Error: file not found: {}", path.display());
        std::process::exit(1);
    }

    match driver::translate(path, "check") {
        Ok((_, output)) => {
            for diagnostic in &output.diagnostics {
                eprintln!("warning: {diagnostic}");
            }
            eprintln!("OK: {}", path.display());
        }
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

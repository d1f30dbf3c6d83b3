use clap::Parser;
use projanitor::JanitorConfig;
use std::path::PathBuf;

/// Audit a project for duplicate, orphaned, and missing source files.
#[derive(Parser, Debug)]
#[command(name = "projanitor", version, about)]
struct Cli {
    /// Comma-separated file extensions or literal filenames to include
    /// (default: c,h,json,py,cmake,md,sh,CMakeLists.txt)
    #[arg(short, long)]
    extensions: Option<String>,

    /// Comma-separated directory names to exclude (default: .git,build,build_logs,doc)
    #[arg(short = 'd', long)]
    exclude_dirs: Option<String>,

    /// Comma-separated files that must all exist in the project root
    /// (default: LICENSE,sdkconfig,dependencies.lock,CMakeLists.txt)
    #[arg(short, long)]
    marker_files: Option<String>,

    /// Audit this directory instead of searching for the project root
    #[arg(short, long)]
    root: Option<PathBuf>,

    /// Enable detailed diagnostics on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error"));
    if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let mut config = JanitorConfig::esp_idf();
    if let Some(list) = &cli.extensions {
        config = config.with_extensions(list);
    }
    if let Some(list) = &cli.exclude_dirs {
        config = config.with_exclude_dirs(list);
    }
    if let Some(list) = &cli.marker_files {
        config = config.with_root_markers(list);
    }

    if let Err(e) = projanitor::run(&config, cli.root.as_deref()) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

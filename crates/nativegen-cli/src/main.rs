use clap::{Parser, Subcommand};
use miette::Result;
use nativegen_common::SourceFile;
use nativegen_config::OverrideSet;
use nativegen_driver::{Driver, Sources};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "nativegen")]
#[command(author, version, about = "Generate pybind11 bindings from native headers")]
struct Cli {
    /// Log per-declaration decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate binding artifacts
    Generate {
        /// Enum header
        #[arg(long)]
        enums: Option<PathBuf>,

        /// Natives header
        #[arg(long)]
        natives: Option<PathBuf>,

        /// Hand-written sources whose native references are excluded
        #[arg(long)]
        overrides: Vec<PathBuf>,

        /// Generator configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory the artifacts are written to
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Skip enum registration
        #[arg(long)]
        no_enums: bool,

        /// Skip wrapper types and native registration
        #[arg(long)]
        no_natives: bool,

        /// Skip the list of declarations needing manual wrapping
        #[arg(long)]
        no_diagnostics: bool,
    },

    /// Print parsed declarations or classified members
    Dump {
        /// Natives header
        #[arg(long)]
        natives: PathBuf,

        /// Generator configuration (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// What to dump
        #[arg(long, default_value = "declarations")]
        format: DumpFormat,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum DumpFormat {
    /// Declarations as extracted from namespace blocks
    Declarations,
    /// Members grouped by logical type
    Members,
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "info" }));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(3)
                .build(),
        )
    }))?;

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            enums,
            natives,
            overrides,
            config,
            out_dir,
            no_enums,
            no_natives,
            no_diagnostics,
        } => {
            let mut driver = Driver::from_config_file(config.as_deref())?;
            let output = &mut driver.config_mut().output;
            output.enums &= !no_enums;
            output.natives &= !no_natives;
            output.diagnostics &= !no_diagnostics;

            let sources = Sources::load(enums.as_deref(), natives.as_deref(), &overrides)?;
            let artifacts = driver.generate(&sources)?;
            driver.write(&artifacts, &out_dir)?;

            println!("{} declarations need manual wrapping", artifacts.failed().len());
        }

        Commands::Dump {
            natives,
            config,
            format,
        } => {
            let driver = Driver::from_config_file(config.as_deref())?;
            let source = SourceFile::read(&natives)?;
            let mut warnings = Vec::new();
            let decls = driver.parse_natives(&source, &mut warnings);

            match format {
                DumpFormat::Declarations => {
                    for decl in &decls {
                        println!("{:#?}", decl);
                    }
                }
                DumpFormat::Members => {
                    let classification = driver.classify(&decls, &OverrideSet::new());
                    for (ty, bucket) in &classification.buckets {
                        println!("{} ({} members)", ty, bucket.len());
                        for member in bucket.members() {
                            println!(
                                "  {:<7} {:<32} {}",
                                member.kind.to_string(),
                                member.exposed_name,
                                member.decl.qualified_name()
                            );
                        }
                    }
                    for (native, reason) in &classification.skipped {
                        println!("skipped {} ({})", native, reason);
                    }
                }
            }
        }
    }

    Ok(())
}

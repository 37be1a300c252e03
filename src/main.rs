use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use log::{error, info};

mod params;
mod render;
mod request;

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "cbrs-profile")]
#[command(about = "POWDER CBRS rooftop X310 resource request generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bind and validate parameters, then emit the resource request.
    Emit {
        /// JSON parameter file; flags below replace its values.
        #[arg(long)]
        params: Option<String>,

        /// Compute node type paired with each X310 (d740 or d430).
        #[arg(long)]
        nodetype: Option<String>,

        /// Frequency range as <min>:<max>, MHz unless a unit is given. Repeatable.
        #[arg(long = "freq", value_parser = params::RawRange::from_pair)]
        freq_ranges: Vec<params::RawRange>,

        /// Rooftop X310 site id, e.g. cbrssdr1-bes. Repeatable.
        #[arg(long = "radio")]
        radios: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Rspec)]
        format: OutputFormat,

        #[arg(short = 'o', long)]
        out: Option<String>,

        /// Also print the error report as JSON on stdout when parameters are rejected.
        #[arg(long)]
        report_json: bool,
    },

    /// Print the declared parameters as JSON.
    Params,

    /// Print the rooftop radio catalog.
    Catalog,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Rspec,
    Json,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.cmd {
        Commands::Emit {
            params: params_file,
            nodetype,
            freq_ranges,
            radios,
            format,
            out,
            report_json,
        } => {
            // 1) Collect raw values: file first, then command-line overrides.
            let raw = match &params_file {
                Some(path) => params::RawParams::from_file(path)?,
                None => params::RawParams::default(),
            }
            .overlay(nodetype, freq_ranges, radios);

            // 2) Bind + validate. Any error stops the run before assembly.
            let binder = params::Binder::new()?;
            let validated = match binder.bind(&raw).and_then(params::validate) {
                Ok(v) => v,
                Err(report) => {
                    error!(
                        "parameters rejected with {} error(s)",
                        report.errors.len()
                    );
                    if report_json {
                        println!("{}", serde_json::to_string_pretty(&report)?);
                    }
                    return Err(report.into());
                }
            };

            // 3) Assemble.
            let request = request::assemble(&validated);

            // 4) Emit.
            let text = match format {
                OutputFormat::Rspec => render::render_request(&request)?,
                OutputFormat::Json => serde_json::to_string_pretty(&request)?,
            };
            match out {
                Some(path) => {
                    std::fs::write(&path, text).with_context(|| format!("write {}", path))?;
                    info!("Wrote {}", path);
                }
                None => print!("{}", text),
            }
        }
        Commands::Params => {
            let decls = params::decl::declarations();
            println!("{}", serde_json::to_string_pretty(&decls)?);
        }
        Commands::Catalog => {
            for entry in params::catalog::catalog() {
                println!("{}\t{}", entry.id, entry.label);
            }
        }
    }

    Ok(())
}

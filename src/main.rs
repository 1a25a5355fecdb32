use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use procscript::{SectionKey, diagnostics};

pub type Result<T> = anyhow::Result<T>;

#[derive(Parser)]
#[command(name = "procscript")]
#[command(about = "Spectral processing script tool", long_about = None)]
struct Cli {
    /// Default log filter when RUST_LOG is unset.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a script and print its canonical form.
    Format { script: String },

    /// Parse a script and print the model as JSON.
    Dump { script: String },

    /// List operations whose name starts with a fragment, in processing order.
    Complete { fragment: String },

    /// Place an operation in a section and print the resulting script.
    Set {
        script: String,

        /// 1-based dims of the section, comma separated; empty for all dims.
        #[arg(long, default_value = "")]
        dims: String,

        #[arg(long, default_value_t = 0)]
        order: usize,

        /// Operation text, e.g. "APODIZE(lb=1.0)".
        op: String,
    },
}

fn read_script(path: &str) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| diagnostics::error_message(format!("read script file {}", path)))
}

fn parse_dims_arg(dims: &str) -> Result<Vec<usize>> {
    let mut out = Vec::new();
    for part in dims.split(',') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        let d: usize = p
            .parse()
            .with_context(|| diagnostics::error_message(format!("bad dim {:?}", p)))?;
        if d == 0 {
            bail!("{}", diagnostics::error_message("dims are 1-based"));
        }
        out.push(d - 1);
    }
    Ok(out)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    diagnostics::init_logging(&cli.log_level);

    match cli.cmd {
        Commands::Format { script } => {
            let model = procscript::parse(&read_script(&script)?);
            print!("{}", procscript::serialize(&model));
        }
        Commands::Dump { script } => {
            let model = procscript::parse(&read_script(&script)?);
            println!("{}", serde_json::to_string_pretty(&model)?);
        }
        Commands::Complete { fragment } => {
            for name in procscript::match_prefix(&fragment) {
                println!("{}", name);
            }
        }
        Commands::Set {
            script,
            dims,
            order,
            op,
        } => {
            let mut model = procscript::parse(&read_script(&script)?);
            let key = SectionKey::new(parse_dims_arg(&dims)?, order);
            let index = model.set_operation(&key, &op)?;
            tracing::info!(section = %key, index, "operation placed");
            print!("{}", procscript::serialize(&model));
        }
    }

    Ok(())
}

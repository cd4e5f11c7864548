#[macro_use]
extern crate serde_derive;

use std::process;

use console::style;
use structopt::StructOpt;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::{AddOpts, Command, Opt};
use crate::export::read_import_file;
use crate::progress::Indicator;
use crate::retrieve::GetPlan;
use crate::ssm_ops::SsmOps;
use crate::ssm_parameters::{PutRequest, Result, SsmParamsError};

mod args;
mod export;
mod filter;
mod output;
mod progress;
mod retrieve;
mod ssm_ops;
mod ssm_parameters;

fn main() {
    let options = Opt::from_args();
    init_tracing();

    if let Err(err) = run(options) {
        eprintln!("{}", style(format!("Error: {}", err)).red());
        process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("SSM_PARAMS_LOG")
        .unwrap_or_else(|_| EnvFilter::new("ssm_params=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

fn run(options: Opt) -> Result<()> {
    match options.cmd {
        Command::Get(opts) => {
            let plan = GetPlan::from_opts(opts)?;
            if plan.is_empty() {
                // Nothing asked for: behave like --help.
                let mut app = Opt::clap();
                app.print_long_help().ok();
                println!();
                return Ok(());
            }

            let ssm = SsmOps::new(options.profile.as_deref(), options.region.as_deref())?;
            let indicator = Indicator::new(!options.quiet);
            indicator.install_interrupt_handler();
            let results = retrieve::run(&plan, &ssm, &indicator)?;
            indicator.finish();
            if results.is_empty() {
                debug!("no parameters matched");
            } else {
                debug!("{} parameters matched", results.len());
            }
            Ok(())
        }
        Command::Add(opts) => {
            let ssm = SsmOps::new(options.profile.as_deref(), options.region.as_deref())?;
            run_add(&ssm, opts, options.quiet)
        }
    }
}

fn run_add(ssm: &SsmOps, opts: AddOpts, quiet: bool) -> Result<()> {
    if let Some(source) = &opts.json {
        let entries = read_import_file(source)?;
        let indicator = Indicator::new(!quiet);
        indicator.install_interrupt_handler();
        for entry in &entries {
            let name = entry.full_name();
            indicator.set_message(name.clone());
            ssm.put_parameter(&PutRequest {
                name,
                value: entry.value.clone(),
                kind: entry.kind,
                description: None,
                overwrite: opts.overwrite,
            })?;
        }
        indicator.finish();
        debug!("imported {} parameters from {}", entries.len(), source.display());
        return Ok(());
    }

    match (opts.name, opts.value, opts.kind) {
        (Some(name), Some(value), Some(kind)) => ssm.put_parameter(&PutRequest {
            name,
            value,
            kind,
            description: opts.description,
            overwrite: opts.overwrite,
        }),
        _ => Err(SsmParamsError::Usage {
            message: "add needs --name, --value and --type (or --json FILE)".to_string(),
        }),
    }
}

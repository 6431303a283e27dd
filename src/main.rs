use anyhow::Result;
use clap::Parser;

use next_version::cli::orchestration::{parse_follow_symlinks, run_workflow, Environment, RunArgs};
use next_version::config;
use next_version::ui::{self, Reporter};

#[derive(clap::Parser)]
#[command(
    name = "next-version",
    version,
    about = "Compute the next release version of a package from its manifest and branch"
)]
struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, help = "Manifest path relative to the workspace root")]
    path: Option<String>,

    #[arg(
        long,
        value_name = "BOOL",
        help = "Follow symbolic links during manifest discovery (anything but 'false' enables)"
    )]
    follow_symlinks: Option<String>,

    #[arg(long = "ref", value_name = "REF", help = "Ref that triggered the run")]
    git_ref: Option<String>,

    #[arg(long, value_name = "REF", help = "Ref of the stable release branch")]
    stable_ref: Option<String>,

    #[arg(long, value_name = "NAME", help = "Name of the published output")]
    output_name: Option<String>,

    #[arg(long, help = "Compute and log the next version without publishing it")]
    dry_run: bool,

    #[arg(short, long, help = "Only print errors and warnings")]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    let env = Environment::from_process();

    // stdout carries the published line when there is no output file
    let logs_to_stderr = env.output_file.is_none() && !args.dry_run;
    let reporter = Reporter::new(args.quiet).with_stderr(logs_to_stderr);

    let run_args = RunArgs {
        path: args.path,
        follow_symlinks: args.follow_symlinks.as_deref().map(parse_follow_symlinks),
        git_ref: args.git_ref,
        stable_ref: args.stable_ref,
        output_name: args.output_name,
        dry_run: args.dry_run,
    };

    if let Err(e) = run_workflow(&run_args, &config, &env, &reporter) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}

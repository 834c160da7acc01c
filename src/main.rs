use cloud_ipcalc::cli::{self, Opt};
use cloud_ipcalc::logging::init_logging;
use cloud_ipcalc::ProviderRegistry;
use colored::Colorize;
use structopt::StructOpt;

fn main() {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    if let Err(e) = init_logging() {
        eprintln!("{} {e}", "Warning:".yellow());
    }
    log::info!("#Start main()");

    if std::env::args().len() <= 1 {
        if let Err(e) = Opt::clap().print_long_help() {
            eprintln!("{} {e}", "Error:".red());
            std::process::exit(1);
        }
        println!();
        return;
    }

    let opt = Opt::from_args();
    let registry = ProviderRegistry::builtin();
    let result = cli::run(&opt, &registry).and_then(|output| match &opt.file {
        Some(path) => {
            cli::write_output(path, &output)?;
            println!("Output written to: {}", path.display());
            Ok(())
        }
        None => {
            println!("{}", output.trim_end());
            Ok(())
        }
    });

    if let Err(e) = result {
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}

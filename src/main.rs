mod archive;
mod args;
mod config;
mod context;
mod error;
mod request;
mod result;
mod tpl;
mod utils;

use args::Args;
use config::Config;
use context::Context;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> result::Result<()> {
    let args = Args::parse();

    let ctx = Context::new(std::env::current_dir()?, args.verbose);

    cliclack::intro("plugin-zip")?;

    let config = Config::load(&ctx, args.config.as_deref())?;
    let request = config::resolve_request(&ctx, &args, config.as_ref(), utils::home_dir())?;

    cliclack::log::info(format!(
        "Packaging {} into {}",
        request.source_dir().display(),
        request.archive_path().display()
    ))?;

    // Per-entry output would tear through the spinner line
    let spinner = (!ctx.verbose).then(|| {
        let spinner = cliclack::spinner();
        spinner.start("Creating zip archive...");
        spinner
    });

    match archive::create_zip(&ctx, &request) {
        Ok(archive_path) => {
            if let Some(spinner) = spinner {
                spinner.stop("Archive created");
            }
            cliclack::outro(format!("Archive created: {}", archive_path.display()))?;
            Ok(())
        }
        Err(e) => {
            let summary = failure_summary(&e);
            if let Some(spinner) = spinner {
                spinner.error(summary);
            }
            // Full message is printed once, by `main`
            cliclack::outro_cancel(summary)?;
            Err(e)
        }
    }
}

fn failure_summary(err: &error::Error) -> &'static str {
    match err {
        error::Error::SourceNotFound(_) => "Nothing to package",
        e if e.is_io_failure() => "Failed to write archive",
        _ => "Packaging aborted",
    }
}

use anyhow::Result;
use clap::Parser;
use enlace::cli::{Cli, OutputFormat};
use enlace::{json_output, status, text_output};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::TRACE.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

/// Render the snapshot in the requested format
fn print_status(state: status::DeviceState, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text_output::render(&state)),
        OutputFormat::Json => println!("{}", json_output::JsonStatus::new(state).to_json()?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize tracing if --debug flag is set
    init_tracing(args.debug);

    let state = status::query_device_state(args.tenant.as_deref())?;
    print_status(state, args.format)?;

    Ok(())
}

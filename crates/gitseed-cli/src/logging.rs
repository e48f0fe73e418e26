use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

/// Build the log subscriber. `WARN` by default, `DEBUG` when verbose.
/// Lines carry no timestamp and no target, and ANSI styling follows `ansi`.
pub fn subscriber<W>(
    verbose: bool,
    ansi: bool,
    writer: W,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_max_level(if verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(writer)
        .with_target(false)
        .with_ansi(ansi)
        .without_time()
        .finish()
}

pub fn init(verbose: bool, ansi: bool) -> anyhow::Result<()> {
    tracing::subscriber::set_global_default(subscriber(verbose, ansi, std::io::stderr))?;
    Ok(())
}

mod common;

use chan::Chan;
use tracing_subscriber::fmt::format::FmtSpan;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Suggested: RUST_LOG=chan=debug,chan_core=trace
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .try_init();

    let bars = common::get_series();
    let result = Chan::default().analyze(&bars)?;
    println!(
        "{} bars -> {} strokes, {} segments, {} centers, {} warnings",
        bars.len(),
        result.strokes.len(),
        result.segments.len(),
        result.centers.len(),
        result.warnings.len()
    );
    Ok(())
}

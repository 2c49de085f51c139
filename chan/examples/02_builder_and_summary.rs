mod common;

use chan::{Chan, ChanConfig, DivergenceScope, MomentumMeasure};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Start from a JSON document (e.g. a settings file), then override in code.
    let base = ChanConfig::from_json_str(r#"{ "min_stroke_separation": 4, "ema_fast": 12 }"#)?;
    let chan = Chan::builder()
        .config(base)
        .momentum_measure(MomentumMeasure::Peak)
        .divergence_scope(DivergenceScope::All)
        .build()?;

    let bars = common::get_series();
    let summary = chan.summarize(&bars)?;

    if let Some(b) = &summary.bars {
        println!(
            "{} bars from {} to {}, range [{}, {}]",
            b.count, b.first_ts, b.last_ts, b.lowest, b.highest
        );
    }
    println!(
        "fractals: {} peaks / {} troughs (mean strength {:.2})",
        summary.fractals.peaks, summary.fractals.troughs, summary.fractals.mean_strength
    );
    println!(
        "strokes: {} up / {} down, efficiency {:.2}",
        summary.strokes.up, summary.strokes.down, summary.strokes.efficiency
    );
    println!("segments: {}", summary.segment_count);
    for r in &summary.center_relations {
        println!(
            "center {} -> {}: {:?} ({:+.1}%)",
            r.from,
            r.to,
            r.kind,
            r.change_ratio * 100.0
        );
    }
    println!(
        "divergences: {} top / {} bottom",
        summary.divergences.top, summary.divergences.bottom
    );
    Ok(())
}

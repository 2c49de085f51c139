mod common;

use chan::{ChanConfig, analyze};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let bars = common::get_series();
    let result = analyze(&bars, &ChanConfig::default())?;

    println!(
        "{} bars merged into {}",
        bars.len(),
        result.merged_bars.len()
    );
    for s in &result.strokes {
        println!(
            "stroke {:?}: {} @ {} -> {} @ {}",
            s.direction, s.start.price, s.start.ts, s.end.price, s.end.ts
        );
    }
    for (i, seg) in result.segments.iter().enumerate() {
        println!(
            "segment {i}: {:?} [{}, {}] strokes={} confirmed={}",
            seg.direction,
            seg.low,
            seg.high,
            seg.strokes.len(),
            seg.confirmed
        );
    }
    for c in &result.centers {
        println!(
            "center {:?}: [{}, {}] {} -> {} strength={:.2}",
            c.kind, c.low, c.high, c.start_time, c.end_time, c.strength
        );
    }
    for d in &result.divergence_signals {
        println!(
            "{:?} ({:?}) at {} strength={:.2}",
            d.signal_type, d.level, d.signal_time, d.strength
        );
    }
    for w in &result.warnings {
        println!("warning: {w}");
    }
    println!(
        "overall quality {:.2}, hints {:?}",
        result.quality_metrics.overall_score, result.quality_metrics.hints
    );
    Ok(())
}

use chan_core::{
    AnalysisResult, Bar, ChanConfig, ChanError, build_segments, build_strokes, compute_macd,
    detect_divergences, detect_fractals, find_centers, normalize, validate_bars,
};

use crate::{invariants, quality};

/// Keep a stage's output, or record a non-fatal shortfall and continue empty.
fn layer<T: Default>(
    outcome: Result<T, ChanError>,
    warnings: &mut Vec<ChanError>,
) -> Result<T, ChanError> {
    match outcome {
        Ok(v) => Ok(v),
        Err(e) if !e.is_fatal() => {
            #[cfg(feature = "tracing")]
            tracing::debug!(target = "chan::pipeline", error = %e, "stage produced no output");
            warnings.push(e);
            Ok(T::default())
        }
        Err(e) => Err(e),
    }
}

#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan::pipeline::run",
        skip(bars, cfg),
        fields(bars = bars.len()),
        err,
    )
)]
pub(crate) fn run(bars: &[Bar], cfg: &ChanConfig) -> Result<AnalysisResult, ChanError> {
    cfg.validate()?;
    validate_bars(bars)?;

    let mut warnings = Vec::new();

    let merged_bars = normalize(bars);
    invariants::inclusion_free(&merged_bars)?;

    let fractal_scan = layer(detect_fractals(&merged_bars, bars, cfg), &mut warnings)?;
    invariants::fractals_alternate(&fractal_scan.fractals)?;

    let strokes = layer(
        build_strokes(&fractal_scan.fractals, cfg.min_stroke_separation),
        &mut warnings,
    )?;
    invariants::strokes_alternate(&strokes)?;

    let segments = layer(build_segments(&strokes), &mut warnings)?;
    invariants::segments_partition(&strokes, &segments)?;

    let center_scan = layer(find_centers(&segments, cfg.min_center_segments), &mut warnings)?;
    invariants::centers_valid(&center_scan.centers, cfg.min_center_segments)?;

    let indicator_series = compute_macd(bars, cfg.ema_fast, cfg.ema_slow, cfg.ema_signal);

    let divergence_scan = layer(
        detect_divergences(
            &strokes,
            &segments,
            &center_scan.centers,
            &indicator_series,
            cfg,
        ),
        &mut warnings,
    )?;

    let quality_metrics = quality::assess(&quality::Counts {
        bars: bars.len(),
        merged: merged_bars.len(),
        fractal_candidates: fractal_scan.candidates,
        fractals: &fractal_scan.fractals,
        strokes: &strokes,
        segments: &segments,
        center_windows: center_scan.windows,
        centers: &center_scan.centers,
        divergence_pairs: divergence_scan.compared,
        divergences: divergence_scan.signals.len(),
    });

    Ok(AnalysisResult {
        merged_bars,
        fractals: fractal_scan.fractals,
        strokes,
        segments,
        centers: center_scan.centers,
        indicator_series,
        divergence_signals: divergence_scan.signals,
        quality_metrics,
        warnings,
    })
}

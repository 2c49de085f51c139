use chan_types::{Bar, IndicatorPoint};

/// MACD over raw bar closes, one point per bar.
///
/// `dif = ema(close, fast) - ema(close, slow)`, `dea = ema(dif, signal)`,
/// `macd = 2 * (dif - dea)`. See [`ema`] for the warm-up rule. Points carry
/// the raw bar index and timestamp, independent of any inclusion merging.
///
/// Periods of zero are treated as one.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan_core::momentum::compute_macd",
        skip(bars),
        fields(bars = bars.len()),
    )
)]
pub fn compute_macd(bars: &[Bar], fast: usize, slow: usize, signal: usize) -> Vec<IndicatorPoint> {
    let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
    let fast_ema = ema(&closes, fast);
    let slow_ema = ema(&closes, slow);
    let dif: Vec<f64> = fast_ema.iter().zip(&slow_ema).map(|(f, s)| f - s).collect();
    let dea = ema(&dif, signal);

    bars.iter()
        .zip(dif.iter().zip(&dea))
        .enumerate()
        .map(|(index, (bar, (&dif, &dea)))| IndicatorPoint {
            index,
            ts: bar.ts,
            dif,
            dea,
            macd: 2.0 * (dif - dea),
        })
        .collect()
}

/// Exponential moving average with the same length as `values`.
///
/// The first `period` outputs are the running simple average of the values
/// seen so far, updated incrementally so a constant input stays exactly
/// constant; output `period - 1` is the seed. Later outputs follow
/// `prev + alpha * (x - prev)` with `alpha = 2 / (period + 1)`.
#[must_use]
pub fn ema(values: &[f64], period: usize) -> Vec<f64> {
    let period = period.max(1);
    let alpha = 2.0 / (period as f64 + 1.0);

    let mut out: Vec<f64> = Vec::with_capacity(values.len());
    for (i, &x) in values.iter().enumerate() {
        let next = match out.last() {
            None => x,
            Some(&prev) if i < period => prev + (x - prev) / (i + 1) as f64,
            Some(&prev) => prev + alpha * (x - prev),
        };
        out.push(next);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ema_seeds_with_simple_average() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let e = ema(&values, 3);
        assert_eq!(e.len(), values.len());
        assert!((e[0] - 1.0).abs() < 1e-12);
        assert!((e[1] - 1.5).abs() < 1e-12);
        assert!((e[2] - 2.0).abs() < 1e-12);
        // alpha = 0.5
        assert!((e[3] - 3.0).abs() < 1e-12);
        assert!((e[4] - 4.0).abs() < 1e-12);
        assert!((e[5] - 5.0).abs() < 1e-12);
    }

    #[test]
    fn ema_period_one_tracks_input() {
        let values = [3.0, 7.0, 2.0];
        assert_eq!(ema(&values, 1), values.to_vec());
    }

    #[test]
    fn rising_closes_give_positive_dif() {
        let bars: Vec<Bar> = (0..60)
            .map(|i| {
                let p = 100.0 + f64::from(i);
                let ts = chrono::DateTime::from_timestamp(i64::from(i) * 60, 0).unwrap();
                Bar::new(ts, p, p, p, p, 1.0)
            })
            .collect();
        let series = compute_macd(&bars, 12, 26, 9);
        assert_eq!(series.len(), 60);
        assert!(series[59].dif > 0.0);
        assert_eq!(series[10].index, 10);
        assert_eq!(series[10].ts, bars[10].ts);
    }
}

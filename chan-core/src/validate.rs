use chan_types::{Bar, ChanError};

/// Check that a bar series is well formed before analysis.
///
/// Requirements, checked bar by bar in input order:
/// - the series is non-empty;
/// - every price is finite and non-negative;
/// - volume is finite and non-negative;
/// - `low <= open <= high` and `low <= close <= high`;
/// - timestamps are strictly increasing.
///
/// # Errors
/// Returns `ChanError::InvalidInput` for the first violation, carrying the
/// offending bar index when one bar is at fault.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "chan_core::validate::validate_bars",
        skip(bars),
        fields(bars = bars.len()),
        err,
    )
)]
pub fn validate_bars(bars: &[Bar]) -> Result<(), ChanError> {
    if bars.is_empty() {
        return Err(ChanError::invalid_input("empty bar sequence"));
    }

    for (i, bar) in bars.iter().enumerate() {
        for (name, value) in [
            ("open", bar.open),
            ("high", bar.high),
            ("low", bar.low),
            ("close", bar.close),
        ] {
            if !value.is_finite() {
                return Err(ChanError::invalid_bar(i, format!("{name} is not finite")));
            }
            if value < 0.0 {
                return Err(ChanError::invalid_bar(
                    i,
                    format!("{name} is negative ({value})"),
                ));
            }
        }
        if !bar.volume.is_finite() || bar.volume < 0.0 {
            return Err(ChanError::invalid_bar(
                i,
                format!("volume must be finite and non-negative ({})", bar.volume),
            ));
        }
        if bar.low > bar.high {
            return Err(ChanError::invalid_bar(
                i,
                format!("low {} above high {}", bar.low, bar.high),
            ));
        }
        if bar.open < bar.low || bar.open > bar.high {
            return Err(ChanError::invalid_bar(
                i,
                format!("open {} outside [{}, {}]", bar.open, bar.low, bar.high),
            ));
        }
        if bar.close < bar.low || bar.close > bar.high {
            return Err(ChanError::invalid_bar(
                i,
                format!("close {} outside [{}, {}]", bar.close, bar.low, bar.high),
            ));
        }
        if i > 0 && bar.ts <= bars[i - 1].ts {
            return Err(ChanError::invalid_bar(
                i,
                format!(
                    "timestamps not strictly increasing ({} after {})",
                    bar.ts,
                    bars[i - 1].ts
                ),
            ));
        }
    }
    Ok(())
}

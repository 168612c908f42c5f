//! Technical indicator math over close-price series.
//!
//! Every function here is pure and keeps its output aligned with the input:
//! one entry per input bar. Indicators with a lookback window use
//! `Option<f64>` and leave the warm-up positions `None` instead of padding
//! with sentinel numbers. The exponentially weighted family (MACD) has no
//! warm-up; it is seeded from the first value and defined everywhere.

use serde::{Deserialize, Serialize};

/// Default RSI lookback.
pub const RSI_WINDOW: usize = 14;

/// Short simple moving average window.
pub const MA_SHORT_WINDOW: usize = 20;

/// Long simple moving average window.
pub const MA_LONG_WINDOW: usize = 50;

/// Default MACD fast span.
pub const MACD_FAST_SPAN: usize = 12;

/// Default MACD slow span.
pub const MACD_SLOW_SPAN: usize = 26;

/// Default MACD signal span.
pub const MACD_SIGNAL_SPAN: usize = 9;

/// RSI level above which a reading counts as overbought.
pub const RSI_OVERBOUGHT: f64 = 70.0;

/// RSI level below which a reading counts as oversold.
pub const RSI_OVERSOLD: f64 = 30.0;

/// Indicator families a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorRequest {
    /// Both simple moving averages, 20 and 50 bars.
    MovingAverages,
    /// Relative strength index over 14 bars.
    Rsi,
    /// MACD line, signal and histogram with 12/26/9 spans.
    Macd,
}

/// Keys for the computed series in an analysis result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorKind {
    Ma20,
    Ma50,
    Rsi,
    MacdLine,
    MacdSignal,
    MacdHistogram,
}

/// One MACD evaluation. All three series have the input's length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MacdSeries {
    /// Fast EMA minus slow EMA.
    pub line: Vec<f64>,
    /// EMA of the line.
    pub signal: Vec<f64>,
    /// Line minus signal.
    pub histogram: Vec<f64>,
}

/// Reading of an RSI value against the common 70/30 thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

/// Simple moving average.
///
/// The first `window - 1` positions have no full lookback and stay `None`.
/// A window of zero yields all `None`.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                None
            } else {
                let lookback = &values[i + 1 - window..=i];
                Some(lookback.iter().sum::<f64>() / window as f64)
            }
        })
        .collect()
}

/// Exponentially weighted average with smoothing `2 / (span + 1)`.
///
/// The series is seeded from the first value, so the output is defined for
/// every position and an empty input gives an empty output.
pub fn ema(values: &[f64], span: usize) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut level = first;
    out.push(level);
    for &value in &values[1..] {
        level = alpha * value + (1.0 - alpha) * level;
        out.push(level);
    }
    out
}

/// Relative strength index.
///
/// The first bar has no predecessor and contributes neither gain nor loss.
/// Positions without a full lookback stay `None`. A lookback that saw no
/// losses reads as full strength, 100.
pub fn rsi(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if closes.is_empty() {
        return Vec::new();
    }

    let mut gains = Vec::with_capacity(closes.len());
    let mut losses = Vec::with_capacity(closes.len());
    gains.push(0.0);
    losses.push(0.0);
    for pair in closes.windows(2) {
        let delta = pair[1] - pair[0];
        gains.push(delta.max(0.0));
        losses.push((-delta).max(0.0));
    }

    sma(&gains, window)
        .into_iter()
        .zip(sma(&losses, window))
        .map(|means| match means {
            (Some(gain), Some(loss)) => {
                if loss == 0.0 {
                    Some(100.0)
                } else {
                    let rs = gain / loss;
                    Some(100.0 - 100.0 / (1.0 + rs))
                }
            }
            _ => None,
        })
        .collect()
}

/// MACD line, signal and histogram over close prices.
pub fn macd(closes: &[f64], fast: usize, slow: usize, signal_span: usize) -> MacdSeries {
    let fast_ema = ema(closes, fast);
    let slow_ema = ema(closes, slow);
    let line: Vec<f64> = fast_ema
        .iter()
        .zip(&slow_ema)
        .map(|(fast, slow)| fast - slow)
        .collect();
    let signal = ema(&line, signal_span);
    let histogram: Vec<f64> = line
        .iter()
        .zip(&signal)
        .map(|(line, signal)| line - signal)
        .collect();

    MacdSeries {
        line,
        signal,
        histogram,
    }
}

/// Series rebased so the first value reads 100, for cross-symbol overlays.
///
/// Empty when the input is empty or starts at zero; a zero base cannot be
/// rebased.
pub fn normalized_performance(values: &[f64]) -> Vec<f64> {
    match values.first() {
        Some(&first) if first != 0.0 => values.iter().map(|v| v / first * 100.0).collect(),
        _ => Vec::new(),
    }
}

/// Percent change from the first value to the last.
///
/// `None` for an empty series or a zero starting value.
pub fn percent_change(values: &[f64]) -> Option<f64> {
    let first = *values.first()?;
    let last = *values.last()?;
    if first == 0.0 {
        return None;
    }
    Some((last - first) / first * 100.0)
}

/// Classifies an RSI value. Both thresholds are exclusive; readings exactly
/// on 70 or 30 are neutral.
pub fn rsi_zone(value: f64) -> RsiZone {
    if value > RSI_OVERBOUGHT {
        RsiZone::Overbought
    } else if value < RSI_OVERSOLD {
        RsiZone::Oversold
    } else {
        RsiZone::Neutral
    }
}

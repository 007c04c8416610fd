//! Trend-timing forecaster.
//!
//! Fits an additive model — least-squares linear trend plus day-of-week
//! seasonal offsets — over a trend's usage history, projects 7 periods
//! ahead, and discretises the result into an activation window relative to
//! the predicted peak.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use brandlift_common::campaign_config::TrendConfig;
use brandlift_common::{columns, BrandliftError, Frame, Result, TrendSeries};

/// Forecasting knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendParams {
    /// Periods projected beyond observed history.
    pub horizon: usize,
    /// Fewer observations than this and the fit is refused — a forecast
    /// from too little data is worse than no forecast.
    pub min_history: usize,
}

impl Default for TrendParams {
    fn default() -> Self {
        Self {
            horizon: 7,
            min_history: 14,
        }
    }
}

impl TrendParams {
    pub fn from_config(config: &TrendConfig) -> Self {
        Self {
            horizon: config.horizon,
            min_history: config.min_history,
        }
    }
}

/// Recommended campaign-launch timing relative to the predicted peak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationWindow {
    Early,
    Peak,
    Late,
}

impl ActivationWindow {
    /// Three-way discretisation with a symmetric ±2-period band around the
    /// peak. `today` is the observed history length; the Early check runs
    /// before the band check.
    pub fn classify(today: usize, peak_index: usize) -> Self {
        let today = today as i64;
        let peak = peak_index as i64;
        if today < peak - 2 {
            ActivationWindow::Early
        } else if (today - peak).abs() <= 2 {
            ActivationWindow::Peak
        } else {
            ActivationWindow::Late
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivationWindow::Early => "Early",
            ActivationWindow::Peak => "Peak",
            ActivationWindow::Late => "Late",
        }
    }
}

impl std::fmt::Display for ActivationWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named line of the diagnostic chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<(NaiveDate, f64)>,
}

/// Renderable figure contract for the presentation layer: it draws, we
/// supply the numbers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendChart {
    pub title: String,
    pub series: Vec<ChartSeries>,
}

/// Full forecaster output.
#[derive(Debug, Clone)]
pub struct TrendForecast {
    /// `date`, `yhat`, `is_forecast` for history plus horizon.
    pub table: Frame,
    pub window: ActivationWindow,
    pub chart: TrendChart,
    /// Index of the peak predicted value across the full horizon.
    pub peak_index: usize,
}

/// Fit the additive model and project `horizon` periods past the history.
pub fn forecast_trend(series: &TrendSeries, params: &TrendParams) -> Result<TrendForecast> {
    let n = series.len();
    if n < params.min_history {
        return Err(BrandliftError::InsufficientHistory {
            required: params.min_history,
            actual: n,
        });
    }

    let values = series.values();
    let dates = series.dates();
    let (intercept, slope) = linear_fit(&values);

    // Day-of-week seasonal offsets from detrended residuals.
    let mut offset_sum = [0.0f64; 7];
    let mut offset_count = [0usize; 7];
    for (t, (value, date)) in values.iter().zip(dates.iter()).enumerate() {
        let dow = date.weekday().num_days_from_monday() as usize;
        offset_sum[dow] += value - (intercept + slope * t as f64);
        offset_count[dow] += 1;
    }
    let seasonal: [f64; 7] = std::array::from_fn(|d| {
        if offset_count[d] > 0 {
            offset_sum[d] / offset_count[d] as f64
        } else {
            0.0
        }
    });

    // Predict over history plus horizon; future dates continue daily from
    // the last observation.
    let last_date = dates[n - 1];
    let total = n + params.horizon;
    let mut all_dates = Vec::with_capacity(total);
    let mut yhat = Vec::with_capacity(total);
    for t in 0..total {
        let date = if t < n {
            dates[t]
        } else {
            last_date + Duration::days((t - n + 1) as i64)
        };
        let dow = date.weekday().num_days_from_monday() as usize;
        all_dates.push(date);
        yhat.push(intercept + slope * t as f64 + seasonal[dow]);
    }

    // First index of the maximum predicted value.
    let peak_index = yhat
        .iter()
        .enumerate()
        .fold(0usize, |best, (i, &v)| if v > yhat[best] { i } else { best });
    let window = ActivationWindow::classify(n, peak_index);

    let mut table = Frame::new();
    table.insert_str(
        columns::TREND_DATE,
        all_dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect(),
    )?;
    table.insert_float("yhat", yhat.clone())?;
    table.insert_float(
        "is_forecast",
        (0..total).map(|t| f64::from(t >= n)).collect(),
    )?;

    let chart = TrendChart {
        title: "Trend Lifecycle Forecast".to_string(),
        series: vec![
            ChartSeries {
                name: "observed".to_string(),
                points: dates.iter().copied().zip(values.iter().copied()).collect(),
            },
            ChartSeries {
                name: "fitted".to_string(),
                points: all_dates[..n].iter().copied().zip(yhat[..n].iter().copied()).collect(),
            },
            ChartSeries {
                name: "forecast".to_string(),
                points: all_dates[n..].iter().copied().zip(yhat[n..].iter().copied()).collect(),
            },
        ],
    };

    info!(
        observations = n,
        horizon = params.horizon,
        peak_index,
        window = %window,
        "trend forecast complete"
    );

    Ok(TrendForecast {
        table,
        window,
        chart,
        peak_index,
    })
}

/// Ordinary least squares of value against time index: (intercept, slope).
fn linear_fit(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean_t = (n - 1.0) / 2.0;
    let mean_v: f64 = values.iter().sum::<f64>() / n;
    let mut cov = 0.0;
    let mut var = 0.0;
    for (t, &v) in values.iter().enumerate() {
        let dt = t as f64 - mean_t;
        cov += dt * (v - mean_v);
        var += dt * dt;
    }
    let slope = if var > 0.0 { cov / var } else { 0.0 };
    (mean_v - slope * mean_t, slope)
}

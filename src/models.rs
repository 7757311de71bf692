// src/models.rs
use serde::{Deserialize, Serialize};

/// Column names the model artifact was trained on, in feature vector order.
pub const FEATURE_COLUMNS: [&str; 9] = [
    "Prev_Open",
    "Prev_High",
    "Prev_Low",
    "MA50_prev",
    "MA200_prev",
    "Prev_Volume",
    "Year",
    "Month",
    "Day",
];

pub const YEAR_RANGE: (i32, i32) = (1995, 2030);
pub const MONTH_RANGE: (u32, u32) = (1, 12);
pub const DAY_RANGE: (u32, u32) = (1, 31);

/// One submission of the prediction form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub open_price: f64,
    pub high_price: f64,
    pub low_price: f64,
    pub ma50: f64,
    pub ma200: f64,
    pub volume: i64,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl Default for PredictionRequest {
    fn default() -> Self {
        Self {
            open_price: 0.0,
            high_price: 0.0,
            low_price: 0.0,
            ma50: 0.0,
            ma200: 0.0,
            volume: 1_000_000,
            year: 2024,
            month: 6,
            day: 15,
        }
    }
}

impl PredictionRequest {
    /// Single-row model input. The order must match `FEATURE_COLUMNS`.
    pub fn features(&self) -> FeatureVector {
        FeatureVector([
            self.open_price,
            self.high_price,
            self.low_price,
            self.ma50,
            self.ma200,
            self.volume as f64,
            f64::from(self.year),
            f64::from(self.month),
            f64::from(self.day),
        ])
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; 9]);

impl FeatureVector {
    pub fn values(&self) -> &[f64; 9] {
        &self.0
    }

    /// Pairs each value with its column name, for logging.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_COLUMNS.iter().copied().zip(self.0.iter().copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Bullish,
    Bearish,
}

impl Signal {
    // Equal prices fall through to Bearish.
    pub fn from_prices(predicted_price: f64, open_price: f64) -> Self {
        if predicted_price > open_price {
            Signal::Bullish
        } else {
            Signal::Bearish
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_price: f64,
    pub signal: Signal,
}

/// What gets rendered after a successful submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionOutcome {
    pub request: PredictionRequest,
    pub result: PredictionResult,
}

/// Raw form fields as submitted, kept as text so the page can echo them back.
/// Absent fields arrive as empty text and fail in `parse_form`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionForm {
    #[serde(default)]
    pub open_price: String,
    #[serde(default)]
    pub high_price: String,
    #[serde(default)]
    pub low_price: String,
    #[serde(default)]
    pub volume: String,
    #[serde(default)]
    pub ma50: String,
    #[serde(default)]
    pub ma200: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub month: String,
    #[serde(default)]
    pub day: String,
}

impl From<&PredictionRequest> for PredictionForm {
    fn from(request: &PredictionRequest) -> Self {
        Self {
            open_price: format!("{:.2}", request.open_price),
            high_price: format!("{:.2}", request.high_price),
            low_price: format!("{:.2}", request.low_price),
            volume: request.volume.to_string(),
            ma50: format!("{:.2}", request.ma50),
            ma200: format!("{:.2}", request.ma200),
            year: request.year.to_string(),
            month: request.month.to_string(),
            day: request.day.to_string(),
        }
    }
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self::from(&PredictionRequest::default())
    }
}

// src/handler.rs
use crate::error::PredictionError;
use crate::models::{
    PredictionForm, PredictionOutcome, PredictionRequest, PredictionResult, Signal, DAY_RANGE,
    MONTH_RANGE, YEAR_RANGE,
};
use crate::predictor::Predictor;
use log::{debug, error, info, warn};
use std::fmt::Display;
use std::str::FromStr;

/// Validates the request, runs a single-row inference and derives the signal.
pub fn predict(
    request: &PredictionRequest,
    predictor: &dyn Predictor,
) -> Result<PredictionOutcome, PredictionError> {
    if let Err(e) = validate(request) {
        warn!("Rejected prediction request: {}", e);
        return Err(e);
    }

    let features = request.features();
    debug!(
        "Feature vector: {:?}",
        features.named().collect::<Vec<_>>()
    );

    match predictor.predict(&features) {
        Ok(predicted_price) => {
            let signal = Signal::from_prices(predicted_price, request.open_price);
            info!(
                "Predicted price {:.2} against open {:.2}: {:?}",
                predicted_price, request.open_price, signal
            );
            Ok(PredictionOutcome {
                request: request.clone(),
                result: PredictionResult {
                    predicted_price,
                    signal,
                },
            })
        }
        Err(e @ PredictionError::ModelArtifactMissing(_)) => {
            warn!("{}", e);
            Err(e)
        }
        Err(e) => {
            error!("Prediction failed: {}", e);
            Err(e)
        }
    }
}

pub fn validate(request: &PredictionRequest) -> Result<(), PredictionError> {
    let prices = [
        ("Open Price", request.open_price),
        ("High Price", request.high_price),
        ("Low Price", request.low_price),
        ("MA50", request.ma50),
        ("MA200", request.ma200),
    ];
    for (label, value) in prices {
        if !value.is_finite() {
            return Err(PredictionError::InvalidInput(format!(
                "{} must be a finite number",
                label
            )));
        }
    }
    if request.volume < 0 {
        return Err(PredictionError::InvalidInput(format!(
            "Volume must be at least 0, got {}",
            request.volume
        )));
    }
    check_range("Year", request.year, YEAR_RANGE)?;
    check_range("Month", request.month, MONTH_RANGE)?;
    check_range("Day", request.day, DAY_RANGE)?;
    Ok(())
}

fn check_range<T>(label: &str, value: T, (min, max): (T, T)) -> Result<(), PredictionError>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(PredictionError::InvalidInput(format!(
            "{} must be between {} and {}, got {}",
            label, min, max, value
        )));
    }
    Ok(())
}

/// Converts submitted form text into a request. Range checks happen in `validate`.
pub fn parse_form(form: &PredictionForm) -> Result<PredictionRequest, PredictionError> {
    Ok(PredictionRequest {
        open_price: parse_field("Open Price", &form.open_price)?,
        high_price: parse_field("High Price", &form.high_price)?,
        low_price: parse_field("Low Price", &form.low_price)?,
        ma50: parse_field("MA50", &form.ma50)?,
        ma200: parse_field("MA200", &form.ma200)?,
        volume: parse_field("Volume", &form.volume)?,
        year: parse_field("Year", &form.year)?,
        month: parse_field("Month", &form.month)?,
        day: parse_field("Day", &form.day)?,
    })
}

fn parse_field<T: FromStr>(label: &str, raw: &str) -> Result<T, PredictionError> {
    raw.trim().parse().map_err(|_| {
        PredictionError::InvalidInput(format!("{} must be a number, got '{}'", label, raw.trim()))
    })
}

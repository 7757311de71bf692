// src/api.rs
use crate::error::PredictionError;
use crate::handler::{parse_form, predict};
use crate::models::{PredictionForm, PredictionOutcome, PredictionRequest};
use crate::predictor::Predictor;
use crate::view::render_page;
use log::{error, warn};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

pub type SharedPredictor = Arc<dyn Predictor>;

pub fn routes(
    predictor: SharedPredictor,
) -> impl Filter<Extract = impl Reply, Error = Infallible> + Clone {
    let page = warp::path::end()
        .and(warp::get())
        .map(|| warp::reply::html(render_page(&PredictionForm::default(), None)));

    let submit = warp::path("predict")
        .and(warp::path::end())
        .and(warp::post())
        .and(with_predictor(predictor.clone()))
        .and(warp::body::form())
        .and_then(submit_form_handler);

    let api_predict = warp::path!("api" / "predict")
        .and(warp::post())
        .and(with_predictor(predictor))
        .and(warp::body::json())
        .and_then(api_predict_handler);

    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&json!({ "status": "ok" })));

    page.or(submit)
        .or(api_predict)
        .or(health)
        .recover(handle_rejection)
}

fn with_predictor(
    predictor: SharedPredictor,
) -> impl Filter<Extract = (SharedPredictor,), Error = Infallible> + Clone {
    warp::any().map(move || predictor.clone())
}

// The predictor may hit the filesystem, so it runs off the async workers.
async fn run_prediction(
    predictor: SharedPredictor,
    request: PredictionRequest,
) -> Result<PredictionOutcome, PredictionError> {
    tokio::task::spawn_blocking(move || predict(&request, predictor.as_ref()))
        .await
        .unwrap_or_else(|e| {
            error!("Prediction task failed: {}", e);
            Err(PredictionError::InferenceFailure(e.to_string()))
        })
}

async fn submit_form_handler(
    predictor: SharedPredictor,
    form: PredictionForm,
) -> Result<impl Reply, Rejection> {
    let submission = match parse_form(&form) {
        Ok(request) => run_prediction(predictor, request).await,
        Err(e) => {
            warn!("Form submission rejected: {}", e);
            Err(e)
        }
    };
    Ok(warp::reply::html(render_page(&form, Some(&submission))))
}

async fn api_predict_handler(
    predictor: SharedPredictor,
    request: PredictionRequest,
) -> Result<impl Reply, Rejection> {
    match run_prediction(predictor, request).await {
        Ok(outcome) => Ok(warp::reply::json(&outcome)),
        Err(e) => Err(warp::reject::custom(e)),
    }
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, kind, message) = if let Some(e) = err.find::<PredictionError>() {
        (e.status(), e.kind(), e.to_string())
    } else if err.is_not_found() {
        (StatusCode::NOT_FOUND, "not_found", "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, "bad_request", e.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (
            StatusCode::METHOD_NOT_ALLOWED,
            "method_not_allowed",
            "Method not allowed".to_string(),
        )
    } else {
        error!("Unhandled rejection: {:?}", err);
        (
            StatusCode::BAD_REQUEST,
            "bad_request",
            format!("{:?}", err),
        )
    };
    Ok(warp::reply::with_status(
        warp::reply::json(&json!({ "error": kind, "message": message })),
        status,
    ))
}

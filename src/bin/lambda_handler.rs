//! AWS Lambda handler for deal return analysis
//!
//! Accepts deal inputs as JSON (display units: $M and percent) and returns
//! the projection, return metrics and sensitivity table.
//!
//! Supports Lambda Function URLs for direct HTTP access.

use lambda_http::{run, service_fn, Body, Request, Response};
use lambda_runtime::Error;
use return_calculator::{DealAnalysis, DealInputs, ScenarioRunner, SensitivityConfig};
use serde::{Deserialize, Serialize};

/// Request body. Omitted deal fields take their defaults.
#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    #[serde(flatten)]
    pub inputs: DealInputs,

    /// Evaluate the full 27-scenario grid instead of low/base/high
    #[serde(default)]
    pub full_grid: bool,
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse<'a> {
    pub inputs: &'a DealInputs,
    pub analysis: &'a DealAnalysis,
    pub execution_time_ms: u64,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn with_cors(builder: lambda_http::http::response::Builder) -> lambda_http::http::response::Builder {
    builder
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
}

fn json_response<T: Serialize>(status: u16, body: &T) -> Result<Response<Body>, Error> {
    let response = with_cors(Response::builder())
        .status(status)
        .header("Content-Type", "application/json")
        .body(Body::Text(serde_json::to_string(body)?))?;
    Ok(response)
}

fn error_response(status: u16, message: String) -> Result<Response<Body>, Error> {
    json_response(status, &ErrorBody { error: message })
}

/// Lambda handler function
async fn handler(event: Request) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(with_cors(Response::builder()).status(200).body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: AnalysisRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, format!("Invalid JSON: {}", e)),
    };

    let assumptions = match request.inputs.to_assumptions() {
        Ok(a) => a,
        Err(e) => return error_response(400, format!("Invalid inputs: {}", e)),
    };

    let runner = if request.full_grid {
        ScenarioRunner::with_sensitivity(SensitivityConfig::full_grid())
    } else {
        ScenarioRunner::new()
    };

    let analysis = match runner.analyze(&assumptions) {
        Ok(a) => a,
        Err(e) => return error_response(422, e.to_string()),
    };

    let response = AnalysisResponse {
        inputs: &request.inputs,
        analysis: &analysis,
        execution_time_ms: start.elapsed().as_millis() as u64,
    };

    json_response(200, &response)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

//! AWS Lambda handler: payment records in, arrears report out

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use ley4_arrears::{ArrearsEngine, EngineConfig, PaymentRecord, Report, StatutoryTable};
use log::info;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ArrearsRequest {
    records: Vec<PaymentRecord>,
    #[serde(default)]
    config: EngineConfig,
}

async fn handler(event: LambdaEvent<ArrearsRequest>) -> Result<Report, Error> {
    let (request, context) = event.into_parts();
    info!(
        "Request {}: {} payment records",
        context.request_id,
        request.records.len()
    );

    let engine = ArrearsEngine::new(StatutoryTable::default_colombia(), request.config)?;
    let report = engine.generate(request.records)?;
    Ok(report)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

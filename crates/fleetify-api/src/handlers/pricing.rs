//! Pricing handlers
//!
//! HTTP handlers for quoting rentals. Quotes carrying a `company_id` are
//! served through the tenant-scoped quote cache.

use crate::dto::{ApiResponse, QuoteRequest};
use actix_web::{web, HttpResponse};
use fleetify_core::traits::PricingService;
use fleetify_core::AppError;
use fleetify_services::CachedPricingEngine;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Quote a rental
///
/// POST /api/v1/pricing/quote
#[instrument(skip(engine, req), fields(company_id = ?req.company_id))]
pub async fn create_quote(
    engine: web::Data<CachedPricingEngine>,
    req: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Quote validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let request = req.to_pricing_request()?;

    let result = match req.company_id {
        Some(company_id) => engine.price_for(company_id, &request),
        None => engine.price(&request),
    }
    .map_err(|e| {
        warn!(code = e.error_code(), "Quote rejected: {}", e);
        AppError::from(e)
    })?;

    debug!(
        duration_days = result.duration_days,
        granularity = %result.selected_granularity,
        total = %result.total_amount,
        "Quote priced"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

/// JSON extractor configuration rendering malformed bodies as `AppError`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(|err, _req| {
            warn!("Malformed quote body: {}", err);
            AppError::InvalidInput(err.to_string()).into()
        })
}

/// Configure pricing routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/pricing")
            .app_data(json_config())
            .route("/quote", web::post().to(create_quote)),
    );
}

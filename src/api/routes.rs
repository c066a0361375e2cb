use actix_web::{error, web, HttpResponse, Responder};
use log::warn;
use serde_json::json;

use crate::api::handlers::events::{get_events, get_recent, get_statistics};
use crate::models::response::ErrorResponse;

/// Root endpoint to provide information about the API
async fn index() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "name": "SIEM Event Dashboard API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "Read-only access to processed security events",
        "endpoints": [
            {
                "path": "/api/events",
                "method": "GET",
                "description": "List events, filtered by threat_level, source_ip, event_type and limit"
            },
            {
                "path": "/api/events/stats",
                "method": "GET",
                "description": "Get event statistics"
            },
            {
                "path": "/api/events/recent",
                "method": "GET",
                "description": "Get the most recent events"
            }
        ]
    }))
}

/// Malformed query strings answer with the same `success: false` body as
/// every other failure, so clients only need one error path.
fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, req| {
        warn!("Rejected query for {}: {}", req.path(), err);
        let response = HttpResponse::BadRequest()
            .json(ErrorResponse::new(format!("Invalid query: {}", err)));
        error::InternalError::from_response(err, response).into()
    })
}

/// Configure API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .app_data(query_config())
        // Root endpoint
        .route("/", web::get().to(index))
        .service(
            web::scope("/api")
                // Event data
                .service(
                    web::scope("/events")
                        .route("", web::get().to(get_events))
                        .route("/stats", web::get().to(get_statistics))
                        .route("/recent", web::get().to(get_recent))
                )
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn index_lists_endpoints() {
        let app = test::init_service(App::new().configure(configure)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["endpoints"].as_array().map(Vec::len), Some(3));
    }
}

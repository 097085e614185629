use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use sqlx::PgPool;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    message: String,
}

/// Basic health check; verifies database connectivity.
pub async fn health_check(pool: web::Data<PgPool>) -> impl Responder {
    match sqlx::query("SELECT 1").fetch_one(pool.get_ref()).await {
        Ok(_) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            message: "Ripple API is running".to_string(),
        }),
        Err(e) => {
            tracing::error!("Health check database ping failed: {}", e);
            HttpResponse::Ok().json(HealthResponse {
                status: "degraded".to_string(),
                message: "Database connection failed".to_string(),
            })
        }
    }
}

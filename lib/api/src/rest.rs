use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use fitx_core::Error;
use fitx_matching::{SizeEngine, SizeRequest};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

#[derive(Serialize)]
struct BrandList<'a> {
    brands: Vec<&'a str>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(engine: Arc<SizeEngine>, host: &str, port: u16) -> std::io::Result<()> {
        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(web::Data::new(engine.clone()))
                .configure(Self::configure)
        })
        .bind((host, port))?
        .run()
        .await
    }

    /// Register all routes; the engine must be provided as `web::Data<Arc<SizeEngine>>`
    pub fn configure(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/brands", web::get().to(list_brands))
            .route("/brands/{name}", web::get().to(get_brand))
            .route("/size/compare", web::post().to(compare_sizes));
    }
}

async fn health() -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok"
    })))
}

async fn list_brands(engine: web::Data<Arc<SizeEngine>>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(BrandList {
        brands: engine.registry().brands(),
    }))
}

async fn get_brand(
    engine: web::Data<Arc<SizeEngine>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();

    match engine.registry().lookup(&name) {
        Some(chart) => Ok(HttpResponse::Ok().json(chart)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Brand not found: {}", name)
        }))),
    }
}

async fn compare_sizes(
    engine: web::Data<Arc<SizeEngine>>,
    req: web::Json<SizeRequest>,
) -> ActixResult<HttpResponse> {
    let engine = engine.get_ref().clone();
    let request = req.into_inner();

    let result = web::block(move || engine.compare(&request))
        .await
        .map_err(actix_web::error::ErrorInternalServerError)?;

    match result {
        Ok(response) => {
            debug!("Size comparison for {} products", response.comparisons.len());
            Ok(HttpResponse::Ok().json(response))
        }
        Err(e @ Error::Validation(_)) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "error": e.to_string()
        }))),
        Err(e) => {
            error!("Size comparison failed: {}", e);
            Ok(HttpResponse::InternalServerError().json(serde_json::json!({
                "error": e.to_string()
            })))
        }
    }
}

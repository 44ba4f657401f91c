//! HTTP front end over a loaded [`SearchIndex`].
//!
//! The index is loaded once and shared read-only between workers, so
//! requests need no locking.

use actix_cors::Cors;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{Match, SearchIndex};

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub query: String,
    #[serde(default)]
    pub detailed: bool,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    best: Option<String>,
    matches: Vec<Match>,
}

#[get("/")]
async fn hello() -> impl Responder {
    HttpResponse::Ok().body("Keyword Search API")
}

#[post("/search")]
async fn search(query: web::Json<SearchQuery>, index: web::Data<SearchIndex>) -> impl Responder {
    let ranking = index.search(&query.query, query.detailed);
    info!(
        "Query {:?} -> {}",
        query.query,
        ranking.best.as_ref().map_or("[no match]", |m| m.document.as_str())
    );
    HttpResponse::Ok().json(SearchResponse {
        best: ranking.best.map(|m| m.document),
        matches: ranking.matches,
    })
}

#[get("/stats")]
async fn stats(index: web::Data<SearchIndex>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "document_count": index.vectors().len(),
        "vocabulary_size": index.vocabulary().len(),
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(hello).service(search).service(stats);
}

pub async fn serve(index: SearchIndex, bind: &str) -> std::io::Result<()> {
    let index = web::Data::new(index);
    info!("Starting HTTP server at http://{}", bind);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header();
        App::new()
            .wrap(cors)
            .app_data(index.clone())
            .configure(configure)
    })
    .bind(bind)?
    .run()
    .await
}

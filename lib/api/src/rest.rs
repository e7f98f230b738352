use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use schemagraph_core::{BuilderConfig, Error, Graph, SchemaDocument, SchemaGraphBuilder};
use schemagraph_storage::{GraphRecord, GraphStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Shared state of the HTTP handlers
pub struct ApiState {
    pub store: Arc<GraphStore>,
    pub config: BuilderConfig,
}

#[derive(Deserialize)]
struct BuildQuery {
    #[serde(default)]
    render: bool,
}

#[derive(Serialize)]
struct StoredGraphInfo {
    name: String,
    source_digest: String,
    created_at: String,
    nodes: usize,
    edges: usize,
}

impl From<&GraphRecord> for StoredGraphInfo {
    fn from(record: &GraphRecord) -> Self {
        Self {
            name: record.name.clone(),
            source_digest: record.source_digest.clone(),
            created_at: record.created_at.to_rfc3339(),
            nodes: record.graph.nodes.len(),
            edges: record.graph.edges.len(),
        }
    }
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        store: Arc<GraphStore>,
        config: BuilderConfig,
        port: u16,
    ) -> std::io::Result<()> {
        let state = web::Data::new(ApiState { store, config });
        info!("REST API listening on 0.0.0.0:{}", port);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .configure(configure)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }
}

/// Route table, shared by the server and tests
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/graph", web::post().to(build_graph))
        .route("/graphs", web::get().to(list_graphs))
        .route("/graphs/{name}", web::get().to(get_graph))
        .route("/graphs/{name}", web::put().to(store_graph))
        .route("/graphs/{name}", web::delete().to(delete_graph))
        .route("/graphs/{name}/focus/{node}", web::get().to(focus_node));
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::GraphNotFound(_) => HttpResponse::NotFound().json(body),
        Error::Storage(_) | Error::Io(_) => {
            warn!("Request failed: {}", e);
            HttpResponse::InternalServerError().json(body)
        }
        _ => HttpResponse::BadRequest().json(body),
    }
}

fn build_from_body(state: &ApiState, body: &[u8]) -> Result<Graph, Error> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    let document = SchemaDocument::from_value(&value)?;
    SchemaGraphBuilder::new()
        .with_config(state.config)
        .build_document(&document)
}

async fn build_graph(
    state: web::Data<ApiState>,
    query: web::Query<BuildQuery>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    match build_from_body(&state, &body) {
        Ok(graph) => {
            let graph = if query.render { graph.renderable() } else { graph };
            Ok(HttpResponse::Ok().json(graph))
        }
        Err(e) => Ok(error_response(&e)),
    }
}

async fn list_graphs(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.store.list()))
}

async fn get_graph(
    state: web::Data<ApiState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();

    match state.store.get(&name) {
        Some(record) => Ok(HttpResponse::Ok().json(record.as_ref())),
        None => Ok(error_response(&Error::GraphNotFound(name))),
    }
}

async fn store_graph(
    state: web::Data<ApiState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();

    let graph = match build_from_body(&state, &body) {
        Ok(graph) => graph,
        Err(e) => return Ok(error_response(&e)),
    };

    match state.store.save(GraphRecord::new(name, &body, graph)) {
        Ok(record) => Ok(HttpResponse::Ok().json(StoredGraphInfo::from(record.as_ref()))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn delete_graph(
    state: web::Data<ApiState>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let name = path.into_inner();

    match state.store.delete(&name) {
        Ok(true) => Ok(HttpResponse::Ok().json(serde_json::json!({ "result": true }))),
        Ok(false) => Ok(error_response(&Error::GraphNotFound(name))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn focus_node(
    state: web::Data<ApiState>,
    path: web::Path<(String, String)>,
) -> ActixResult<HttpResponse> {
    let (name, node) = path.into_inner();

    let record = match state.store.get(&name) {
        Some(record) => record,
        None => return Ok(error_response(&Error::GraphNotFound(name))),
    };

    match record.graph.focus(&node) {
        Some(view) => Ok(HttpResponse::Ok().json(view)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Node not found: {}", node)
        }))),
    }
}

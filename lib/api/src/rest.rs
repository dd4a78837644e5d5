use actix_cors::Cors;
use actix_web::{web, App, HttpResponse, HttpServer, Result as ActixResult};
use bookrec_core::{EngineConfig, Error, RecommendationEngine};
use bookrec_storage::ArtifactStore;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Shared state handed to every worker
pub struct ApiState {
    store: Arc<ArtifactStore>,
    engine: RecommendationEngine,
}

impl ApiState {
    pub fn new(store: Arc<ArtifactStore>, config: EngineConfig) -> Self {
        let engine = store.engine(config);
        Self { store, engine }
    }
}

#[derive(Deserialize)]
struct RecommendQuery {
    title: String,
    limit: Option<usize>,
}

pub struct RestApi;

impl RestApi {
    pub async fn start(
        store: Arc<ArtifactStore>,
        config: EngineConfig,
        port: u16,
    ) -> std::io::Result<()> {
        let state = web::Data::new(ApiState::new(store, config));

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600);

            App::new()
                .wrap(cors)
                .app_data(state.clone())
                .configure(RestApi::routes)
        })
        .bind(("0.0.0.0", port))?
        .run()
        .await
    }

    pub fn routes(cfg: &mut web::ServiceConfig) {
        cfg.route("/health", web::get().to(health))
            .route("/popular", web::get().to(popular))
            .route("/titles", web::get().to(titles))
            .route("/recommend", web::get().to(recommend));
    }
}

async fn health(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "result": state.store.status()
    })))
}

async fn popular(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    match state.engine.popular_books() {
        Ok(books) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": books
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn titles(state: web::Data<ApiState>) -> ActixResult<HttpResponse> {
    match state.engine.titles() {
        Ok(titles) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": titles
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

async fn recommend(
    state: web::Data<ApiState>,
    query: web::Query<RecommendQuery>,
) -> ActixResult<HttpResponse> {
    debug!("GET /recommend title={:?} limit={:?}", query.title, query.limit);

    let result = match query.limit {
        Some(k) => state.engine.recommend_similar_top(&query.title, k),
        None => state.engine.recommend_similar(&query.title),
    };

    match result {
        Ok(recommendations) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "result": recommendations
        }))),
        Err(e) => Ok(error_response(&e)),
    }
}

fn error_response(e: &Error) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e {
        Error::UnknownTitle(_) => HttpResponse::NotFound().json(body),
        Error::Unavailable { .. } => HttpResponse::ServiceUnavailable().json(body),
        Error::InvalidConfig(_) => HttpResponse::BadRequest().json(body),
        _ => HttpResponse::InternalServerError().json(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test};
    use bookrec_core::MissingMetadataPolicy;
    use bookrec_storage::StoreConfig;
    use serde_json::{json, Value};
    use std::path::Path;

    fn write_json(dir: &Path, name: &str, value: &Value) {
        std::fs::write(dir.join(name), serde_json::to_vec(value).unwrap()).unwrap();
    }

    fn table(rows: &[(&str, f64)]) -> Value {
        json!({
            "columns": ["Book-Title", "Book-Author", "Image-URL-M", "Average_Rating", "Total_number_of_Ratings"],
            "data": rows.iter()
                .map(|(t, r)| json!([t, "Someone", "http://img", r, 10]))
                .collect::<Vec<_>>()
        })
    }

    /// Collaborative artifacts only; the popularity table is missing
    fn create_test_store() -> (tempfile::TempDir, Arc<ArtifactStore>) {
        let dir = tempfile::tempdir().unwrap();
        write_json(dir.path(), "pt.json", &json!({
            "columns": [1, 2],
            "index": ["A", "B", "C"],
            "data": [[1, 0], [0, 1], [1, 1]]
        }));
        write_json(dir.path(), "score.json", &json!([
            [1.0, 0.2, 0.7],
            [0.2, 1.0, 0.5],
            [0.7, 0.5, 1.0]
        ]));
        write_json(dir.path(), "merged.json", &table(&[("A", 4.0), ("B", 3.0), ("C", 2.5)]));
        let store = Arc::new(ArtifactStore::load(StoreConfig::new(dir.path())));
        (dir, store)
    }

    macro_rules! app {
        ($store:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(ApiState::new($store, EngineConfig::default())))
                    .configure(RestApi::routes),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_recommend() {
        let (_dir, store) = create_test_store();
        let app = app!(store);

        let req = test::TestRequest::get().uri("/recommend?title=A").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        let titles: Vec<&str> = body["result"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["record"]["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["C", "B"]);

        let req = test::TestRequest::get().uri("/recommend?title=A&limit=1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"].as_array().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_unknown_title_is_not_found() {
        let (_dir, store) = create_test_store();
        let app = app!(store);

        let req = test::TestRequest::get().uri("/recommend?title=Z").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_missing_group_is_unavailable() {
        let (_dir, store) = create_test_store();
        let app = app!(store);

        let req = test::TestRequest::get().uri("/popular").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"]["popularity"]["ready"], json!(false));
        assert_eq!(body["result"]["collaborative"]["ready"], json!(true));
        assert_eq!(body["result"]["collaborative"]["items"], json!(3));
    }

    #[actix_web::test]
    async fn test_titles() {
        let (_dir, store) = create_test_store();
        let app = app!(store);

        let req = test::TestRequest::get().uri("/titles").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["result"], json!(["A", "B", "C"]));
    }

    #[actix_web::test]
    async fn test_huge_limit_is_bounded_by_catalog() {
        let (_dir, store) = create_test_store();
        let config = EngineConfig {
            on_missing_metadata: MissingMetadataPolicy::Skip,
            ..EngineConfig::default()
        };
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ApiState::new(store, config)))
                .configure(RestApi::routes),
        )
        .await;

        for limit in ["18446744073709551615", "1000000000000"] {
            let uri = format!("/recommend?title=A&limit={}", limit);
            let req = test::TestRequest::get().uri(&uri).to_request();
            let body: Value = test::call_and_read_body_json(&app, req).await;
            assert_eq!(body["result"].as_array().unwrap().len(), 2);
        }
    }
}

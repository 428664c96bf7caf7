use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, put, web};
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use rs_markov_core::io::list_files;
use rs_markov_core::model::{ChainInput, MarkovModel, StartSeed};
use rs_markov_core::text::{WORDS_PER_LINE, format_lines, tokenize};

const DEFAULT_CAPACITY: usize = 10007;
const DEFAULT_PREFIX_LEN: usize = 2;
const DEFAULT_MAX_WORDS: usize = 100;

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_words: Option<usize>,
	seed: Option<String>, // "start" (default), "random" or "custom:<words>"
	rng_seed: Option<u64>,
}

#[derive(Deserialize)]
struct LoadQuery {
	name: Option<String>,
	capacity: Option<usize>,
	prefix_len: Option<usize>,
}

#[derive(Deserialize)]
struct LookupQuery {
	prefix: String,
}

#[derive(Serialize)]
struct LookupResponse<'a> {
	prefix: &'a str,
	suffixes: &'a [String],
}

struct SharedData {
	data_dir: PathBuf,
	corpus: Option<String>,
	model: Option<MarkovModel>,
}

impl GenerateParams {
	/// Determines where the chain starts.
	fn start_seed(&self) -> Result<StartSeed, String> {
		match &self.seed {
			None => Ok(StartSeed::Boundary),
			Some(s) if s.to_lowercase() == "start" => Ok(StartSeed::Boundary),
			Some(s) if s.to_lowercase() == "random" => Ok(StartSeed::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let words = tokenize(&s["custom:".len()..]);
				if words.is_empty() {
					Err("Custom seed cannot be empty".into())
				} else {
					Ok(StartSeed::Custom(words))
				}
			}
			Some(_) => Err("Seed must be 'start', 'random' or start with 'custom:'".into()),
		}
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Walks the loaded model and returns the chain, 10 words per line.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let start_seed = match query.start_seed() {
		Ok(s) => s,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let input = match ChainInput::with_seed(query.max_words.unwrap_or(DEFAULT_MAX_WORDS), start_seed) {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let Some(model) = &shared_data.model else {
		return HttpResponse::Conflict().body("No corpus loaded");
	};

	let chain = match query.rng_seed {
		Some(seed) => model.generate(&input, &mut StdRng::seed_from_u64(seed)),
		None => model.generate(&input, &mut rand::rng()),
	};
	match chain {
		Ok(words) => HttpResponse::Ok().body(format_lines(&words, WORDS_PER_LINE).join("\n")),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let data_dir = match data.lock() {
		Ok(m) => m.data_dir.clone(),
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match list_files(&data_dir, "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.model {
		Some(model) => HttpResponse::Ok().json(model.stats()),
		None => HttpResponse::Conflict().body("No corpus loaded"),
	}
}

#[get("/v1/lookup")]
async fn get_lookup(data: web::Data<Mutex<SharedData>>, query: web::Query<LookupQuery>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let Some(model) = &shared_data.model else {
		return HttpResponse::Conflict().body("No corpus loaded");
	};
	match model.suffixes(&query.prefix) {
		Some(suffixes) => HttpResponse::Ok().json(LookupResponse { prefix: &query.prefix, suffixes }),
		None => HttpResponse::NotFound().body(format!("Unknown prefix '{}'", query.prefix)),
	}
}

#[put("/v1/load_corpus")]
async fn put_corpus(data: web::Data<Mutex<SharedData>>, query: web::Query<LoadQuery>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim().to_owned(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};
	let capacity = query.capacity.unwrap_or(DEFAULT_CAPACITY);
	let prefix_len = query.prefix_len.unwrap_or(DEFAULT_PREFIX_LEN);

	let corpus_path = shared_data.data_dir.join(format!("{}.txt", name));
	match MarkovModel::from_file(&corpus_path, prefix_len, capacity) {
		Ok(model) => {
			info!("loaded corpus '{}': {:?}", name, model.stats());
			shared_data.model = Some(model);
			shared_data.corpus = Some(name);
			HttpResponse::Ok().body("Corpus loaded successfully")
		}
		Err(e) => HttpResponse::UnprocessableEntity().body(format!("Failed to load corpus: {e}")),
	}
}

#[get("/v1/loaded_corpus")]
async fn get_loaded_corpus(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.corpus.clone().unwrap_or_default())
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_corpora)
		.service(get_stats)
		.service(get_lookup)
		.service(put_corpus)
		.service(get_loaded_corpus);
}

/// Main entry point for the server.
///
/// Corpora are read from `./data/<name>.txt`. The model starts empty and
/// is replaced on each `/v1/load_corpus` call.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - `RUST_LOG=info` shows the request log.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let shared_data = SharedData {
		data_dir: PathBuf::from("./data"),
		corpus: None,
		model: None,
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.configure(configure)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	fn shared(data_dir: PathBuf) -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData { data_dir, corpus: None, model: None }))
	}

	#[actix_web::test]
	async fn generate_needs_a_corpus() {
		let tmp = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared(tmp.path().to_path_buf())).configure(configure)).await;

		let req = test::TestRequest::get().uri("/v1/generate").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::CONFLICT);
	}

	#[actix_web::test]
	async fn load_then_generate_and_lookup() {
		let tmp = tempfile::tempdir().unwrap();
		std::fs::write(tmp.path().join("cat.txt"), "the cat sat on the mat").unwrap();
		let app = test::init_service(App::new().app_data(shared(tmp.path().to_path_buf())).configure(configure)).await;

		let req = test::TestRequest::put().uri("/v1/load_corpus?name=cat&capacity=101&prefix_len=2").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/generate?rng_seed=8").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "the cat sat on the mat");

		let req = test::TestRequest::get().uri("/v1/generate?seed=custom:on%20the&max_words=3").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "on the mat");

		let req = test::TestRequest::get().uri("/v1/lookup?prefix=the%20cat").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, r#"{"prefix":"the cat","suffixes":["sat"]}"#);

		let req = test::TestRequest::get().uri("/v1/lookup?prefix=cat%20mat").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

		let req = test::TestRequest::get().uri("/v1/corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "cat");
	}

	#[actix_web::test]
	async fn undersized_capacity_is_rejected() {
		let tmp = tempfile::tempdir().unwrap();
		std::fs::write(tmp.path().join("big.txt"), "a b c d e f g h").unwrap();
		let app = test::init_service(App::new().app_data(shared(tmp.path().to_path_buf())).configure(configure)).await;

		let req = test::TestRequest::put().uri("/v1/load_corpus?name=big&capacity=2&prefix_len=1").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNPROCESSABLE_ENTITY);

		let req = test::TestRequest::get().uri("/v1/loaded_corpus").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "");
	}

	#[actix_web::test]
	async fn bad_seed_is_a_bad_request() {
		let tmp = tempfile::tempdir().unwrap();
		let app = test::init_service(App::new().app_data(shared(tmp.path().to_path_buf())).configure(configure)).await;

		let req = test::TestRequest::get().uri("/v1/generate?seed=whatever").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
	}
}

use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use anyhow::Context;
use log::{error, info};
use serde::Deserialize;

use hl_gen_core::corpus::{Archive, DEFAULT_ARCHIVE_PATH};
use hl_gen_core::model::generation_input::{DEFAULT_MAX_WORDS, DEFAULT_PREFIX_LEN};
use hl_gen_core::model::{Chain, GenerationInput, Generator};

const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Largest `words` accepted by `/v1/generate`.
const MAX_WORDS_LIMIT: usize = 200;

/// Largest `tries` accepted by `/v1/generate`.
const MAX_TRIES_LIMIT: usize = 100;

/// Response header telling whether the generated text is absent from the archive.
const NEW_HEADLINE_HEADER: &str = "X-New-Headline";

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	words: Option<usize>,
	tries: Option<usize>,
}

/// Query parameters for the `/v1/reload` endpoint
#[derive(Deserialize)]
struct ReloadParams {
	prefix: Option<usize>,
}

/// Archive and the chain trained from it, always replaced together.
struct SharedData {
	archive_path: PathBuf,
	archive: Archive,
	chain: Chain,
}

impl SharedData {
	/// Reads the archive at `archive_path` and trains a fresh chain on it.
	fn load(archive_path: PathBuf, prefix_len: usize) -> hl_gen_core::Result<Self> {
		let archive = Archive::load(&archive_path)?;
		let mut chain = Chain::new(prefix_len)?;
		chain.train_all(archive.titles());
		info!("chain ready: {} prefixes from {} titles", chain.len(), archive.len());
		Ok(Self { archive_path, archive, chain })
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns one generated headline as the response body.
/// `words` above `MAX_WORDS_LIMIT` or `tries` above `MAX_TRIES_LIMIT` are
/// rejected with 400, the walk runs while the model lock is held.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let words = query.words.unwrap_or(DEFAULT_MAX_WORDS);
	let tries = query.tries.unwrap_or(0);

	if words > MAX_WORDS_LIMIT {
		return HttpResponse::BadRequest().body(format!("words must be <= {}", MAX_WORDS_LIMIT));
	}
	if tries > MAX_TRIES_LIMIT {
		return HttpResponse::BadRequest().body(format!("tries must be <= {}", MAX_TRIES_LIMIT));
	}

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let mut input = GenerationInput::default();
	input.max_words = words;
	input.nb_try = tries;
	let archive = &shared_data.archive;
	let text = Generator::new(&shared_data.chain).generate_from_input(&input, |t| archive.contains(t));
	let is_new = !archive.contains(&text);

	HttpResponse::Ok()
		.insert_header((NEW_HEADLINE_HEADER, is_new.to_string()))
		.body(text)
}

#[get("/v1/titles")]
async fn get_titles(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.archive.titles().collect::<Vec<_>>().join("\n"))
}

#[put("/v1/reload")]
async fn put_reload(data: web::Data<Mutex<SharedData>>, query: web::Query<ReloadParams>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let prefix_len = query.prefix.unwrap_or(shared_data.chain.prefix_len());
	match SharedData::load(shared_data.archive_path.clone(), prefix_len) {
		Ok(reloaded) => {
			*shared_data = reloaded;
			HttpResponse::Ok().body(format!("Reloaded {} titles", shared_data.archive.len()))
		}
		Err(e @ hl_gen_core::Error::InvalidConfiguration(_)) => HttpResponse::BadRequest().body(e.to_string()),
		Err(e) => {
			error!("reload failed: {}", e);
			HttpResponse::InternalServerError().body(format!("Failed to reload archive: {e}"))
		}
	}
}

/// Reads `key` from the environment, falling back to `default`.
fn env_or<T: std::str::FromStr>(key: &str, default: T) -> anyhow::Result<T>
where
	T::Err: std::error::Error + Send + Sync + 'static,
{
	match env::var(key) {
		Ok(value) => value.parse().with_context(|| format!("invalid {}", key)),
		Err(_) => Ok(default),
	}
}

/// Main entry point for the server.
///
/// Trains the chain from the archive, wraps it in a `Mutex`,
/// and starts an Actix-web HTTP server.
///
/// # Configuration
/// - `HL_GEN_ARCHIVE`: archive path (default `titles.json`)
/// - `HL_GEN_BIND`: listen address (default `127.0.0.1:5000`)
/// - `HL_GEN_PREFIX`: prefix length (default 2)
#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let archive_path: PathBuf = env_or("HL_GEN_ARCHIVE", PathBuf::from(DEFAULT_ARCHIVE_PATH))?;
	let bind: String = env_or("HL_GEN_BIND", DEFAULT_BIND.to_owned())?;
	let prefix_len: usize = env_or("HL_GEN_PREFIX", DEFAULT_PREFIX_LEN)?;

	let shared_data = SharedData::load(archive_path.clone(), prefix_len)
		.with_context(|| format!("failed to load archive {}", archive_path.display()))?;
	let shared_model = web::Data::new(Mutex::new(shared_data));

	info!("listening on {}", bind);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(get_titles)
			.service(put_reload)
	})
		.bind(bind.as_str())?
		.run()
		.await?;

	Ok(())
}

use std::env;
use std::sync::Mutex;

use actix_web::{App, HttpResponse, HttpServer, Responder, get, middleware, put, web};
use log::{info, warn};
use serde::Deserialize;

use viet_aug_core::augment::Augmenter;
use viet_aug_core::config::AugmentationConfig;

/// Upper bound on `count` for a single request.
const MAX_COUNT: usize = 100;

/// Query parameters of the `/v1/augment` endpoint
#[derive(Deserialize)]
struct AugmentParams {
	text: Option<String>,
	count: Option<usize>,
}

struct SharedData {
	augmenter: Augmenter,
}

/// HTTP GET endpoint `/v1/augment`
///
/// Returns `count` augmented variants of `text`, one per line.
#[get("/v1/augment")]
async fn get_augmented(data: web::Data<Mutex<SharedData>>, query: web::Query<AugmentParams>) -> impl Responder {
	let text = match &query.text {
		Some(t) => t,
		None => return HttpResponse::BadRequest().body("Missing text"),
	};
	let count = query.count.unwrap_or(1);
	if count == 0 || count > MAX_COUNT {
		return HttpResponse::BadRequest().body(format!("count must be between 1 and {MAX_COUNT}"));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Augmenter lock failed"),
	};

	let variants: Vec<String> = (0..count).map(|_| shared_data.augmenter.augment(text)).collect();
	HttpResponse::Ok().body(variants.join("\n"))
}

#[get("/v1/config")]
async fn get_config(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Augmenter lock failed"),
	};
	HttpResponse::Ok().json(shared_data.augmenter.config())
}

/// HTTP PUT endpoint `/v1/config`
///
/// Replaces the active configuration. Options missing from the body take
/// their default value.
#[put("/v1/config")]
async fn put_config(data: web::Data<Mutex<SharedData>>, config: web::Json<AugmentationConfig>) -> impl Responder {
	let augmenter = match Augmenter::new(config.into_inner()) {
		Ok(a) => a,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Augmenter lock failed"),
	};
	shared_data.augmenter = augmenter;
	info!("configuration replaced");

	HttpResponse::Ok().json(shared_data.augmenter.config())
}

/// Reads the configuration named by `VIET_AUG_CONFIG`, or the defaults.
fn load_config() -> Result<AugmentationConfig, Box<dyn std::error::Error>> {
	match env::var("VIET_AUG_CONFIG") {
		Ok(path) => Ok(AugmentationConfig::from_json_file(path)?),
		Err(_) => Ok(AugmentationConfig::default()),
	}
}

fn configure(cfg: &mut web::ServiceConfig) {
	cfg.service(get_augmented).service(get_config).service(put_config);
}

/// Main entry point for the server.
///
/// Builds one `Augmenter`, wraps it in a `Mutex` (every request advances
/// its random source) and serves it on `VIET_AUG_BIND`
/// (default `127.0.0.1:5000`).
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = load_config()?;
	let shared_data = SharedData {
		augmenter: Augmenter::new(config)?,
	};
	let shared_augmenter = web::Data::new(Mutex::new(shared_data));

	let bind = env::var("VIET_AUG_BIND").unwrap_or_else(|_| {
		warn!("VIET_AUG_BIND not set, using 127.0.0.1:5000");
		"127.0.0.1:5000".to_owned()
	});

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.app_data(shared_augmenter.clone())
			.configure(configure)
	})
		.bind(bind)?
		.run()
		.await?;

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test};

	fn silent_data() -> web::Data<Mutex<SharedData>> {
		let config = AugmentationConfig {
			augmentation_probability: 0.0,
			char_delete_percentage: 0.0,
			lower_case_words_probability: 0.0,
			nl_swap_probability: 0.0,
			replace_accent_chars_ratio: 0.0,
			remove_random_accent_ratio: 0.0,
			..AugmentationConfig::default()
		};
		web::Data::new(Mutex::new(SharedData {
			augmenter: Augmenter::with_seed(config, 1).unwrap(),
		}))
	}

	#[actix_web::test]
	async fn augment_returns_one_line_per_variant() {
		let app = test::init_service(App::new().app_data(silent_data()).configure(configure)).await;
		let req = test::TestRequest::get()
			.uri("/v1/augment?text=Xin%20ch%C3%A0o%21&count=3")
			.to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body, "Xin chào\nXin chào\nXin chào");
	}

	#[actix_web::test]
	async fn augment_requires_text() {
		let app = test::init_service(App::new().app_data(silent_data()).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/augment").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn augment_rejects_large_count() {
		let app = test::init_service(App::new().app_data(silent_data()).configure(configure)).await;
		let req = test::TestRequest::get().uri("/v1/augment?text=a&count=1000").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn config_can_be_replaced() {
		let app = test::init_service(App::new().app_data(silent_data()).configure(configure)).await;

		let req = test::TestRequest::put()
			.uri("/v1/config")
			.set_json(serde_json::json!({"AUGMENTATION_PROBABILITY": 0.9}))
			.to_request();
		let config: AugmentationConfig = test::call_and_read_body_json(&app, req).await;
		assert_eq!(config.augmentation_probability, 0.9);

		let req = test::TestRequest::get().uri("/v1/config").to_request();
		let config: AugmentationConfig = test::call_and_read_body_json(&app, req).await;
		assert_eq!(config.augmentation_probability, 0.9);
	}

	#[actix_web::test]
	async fn invalid_config_is_rejected() {
		let app = test::init_service(App::new().app_data(silent_data()).configure(configure)).await;
		let req = test::TestRequest::put()
			.uri("/v1/config")
			.set_json(serde_json::json!({"NL_SWAP_PROBABILITY": 2.0}))
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}
}

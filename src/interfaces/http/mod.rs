use actix_cors::Cors;
use actix_multipart::Multipart;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::application::ComparisonUseCase;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::ServerConfig;
use crate::infrastructure::spreadsheet::{read_workbook, write_table};
use crate::infrastructure::storage::{ensure_output_dir, timestamped_output_path};

const FILE_PART_ONE: &str = "input_file1";
const FILE_PART_TWO: &str = "input_file2";
const NO_FILES_MESSAGE: &str = "No files provided";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub config: ServerConfig,
    pub comparison: ComparisonUseCase,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Serialize, Deserialize)]
struct MessageResponse {
    message: String,
}

#[derive(Serialize, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// Drain every multipart part into owned bytes, keyed by part name.
/// Parts without a name are skipped; a repeated name keeps the last part.
async fn collect_file_parts(mut payload: Multipart) -> Result<HashMap<String, Vec<u8>>> {
    let mut parts = HashMap::new();

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::ParseError(format!("Invalid multipart payload: {}", e)))?
    {
        let Some(name) = field.content_disposition().get_name().map(str::to_string) else {
            continue;
        };

        let mut data = Vec::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::ParseError(format!("Failed to read upload: {}", e)))?
        {
            data.extend_from_slice(&chunk);
        }

        parts.insert(name, data);
    }

    Ok(parts)
}

/// Parse, merge, and persist. Returns the output file path.
fn run_comparison(data: &HttpState, file1: &[u8], file2: &[u8]) -> Result<PathBuf> {
    let table1 = read_workbook(file1)?;
    let table2 = read_workbook(file2)?;

    let merged = data.comparison.execute(table1, table2)?;

    ensure_output_dir(&data.config.output_dir)?;
    let output_path = timestamped_output_path(&data.config.output_dir);
    write_table(&merged, &output_path)?;

    Ok(output_path)
}

fn error_response(logs: &Mutex<Vec<LogEntry>>, err: AppError) -> HttpResponse {
    match err {
        AppError::ValidationError(message) => {
            add_log(logs, "WARN", "HttpApi", &message);
            HttpResponse::BadRequest().json(ErrorResponse { error: message })
        }
        other => {
            let message = other.to_string();
            add_log(logs, "ERROR", "HttpApi", &message);
            HttpResponse::InternalServerError().json(ErrorResponse { error: message })
        }
    }
}

#[post("/compare")]
async fn compare(data: web::Data<HttpState>, payload: Multipart) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "HttpApi",
        "Comparing uploaded spreadsheets",
    );

    let parts = match collect_file_parts(payload).await {
        Ok(parts) => parts,
        Err(e) => return error_response(&data.logs, e),
    };

    let (Some(file1), Some(file2)) = (parts.get(FILE_PART_ONE), parts.get(FILE_PART_TWO)) else {
        add_log(&data.logs, "WARN", "HttpApi", "Upload missing file part(s)");
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: NO_FILES_MESSAGE.to_string(),
        });
    };

    match run_comparison(&data, file1, file2) {
        Ok(output_path) => {
            let message = format!("Comparison file saved to {}", output_path.display());
            add_log(&data.logs, "INFO", "HttpApi", &message);
            HttpResponse::Ok().json(MessageResponse { message })
        }
        Err(e) => error_response(&data.logs, e),
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn start_server(
    config: ServerConfig,
    logs: Arc<Mutex<Vec<LogEntry>>>,
) -> std::io::Result<Server> {
    let bind_addr = (config.host.clone(), config.port);
    let state = web::Data::new(HttpState {
        config,
        comparison: ComparisonUseCase::new(),
        logs,
    });

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new()
            .wrap(cors)
            .app_data(state.clone())
            .service(compare)
            .service(get_logs)
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}

use std::{io, path::PathBuf};

use actix_cors::Cors;
use actix_web::{
    HttpResponse, get,
    http::header::{
        Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
    },
    web,
};
use serde_json::json;
use tokio::{fs, task};
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::{
    AppState, catalog,
    error::AppError,
    models::files::FileListResponse,
    paths,
};

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(list_files).service(download_file);
}

/// Any origin, method and header, with credentials. Narrow before exposing
/// the service publicly.
pub fn cors() -> Cors {
    Cors::permissive()
}

#[get("/healthz")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "arquivos-backend",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[get("/files")]
async fn list_files(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let root = state.root.clone();
    let files = run_blocking(move || catalog::list_all(&root)).await?;

    debug!(count = files.len(), "listed served files");
    Ok(HttpResponse::Ok().json(FileListResponse { files }))
}

#[get("/files/{file_path:.*}")]
async fn download_file(
    path: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let requested = path.into_inner();
    let root = state.root.clone();
    let resolved: PathBuf =
        run_blocking(move || paths::resolve_for_download(&root, &requested)).await?;

    let file = fs::File::open(&resolved).await.map_err(io_error)?;
    let size = file.metadata().await.map_err(io_error)?.len();
    let file_name = resolved
        .file_name()
        .map(|value| value.to_string_lossy().into_owned())
        .unwrap_or_default();

    debug!(path = %resolved.display(), size, "streaming file");
    Ok(HttpResponse::Ok()
        .content_type("application/octet-stream")
        .insert_header(attachment(file_name))
        .no_chunking(size)
        .streaming(ReaderStream::new(file)))
}

fn attachment(file_name: String) -> ContentDisposition {
    let parameter = if file_name.is_ascii() {
        DispositionParam::Filename(file_name)
    } else {
        DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".into()),
            language_tag: None,
            value: file_name.into_bytes(),
        })
    };

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters: vec![parameter],
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(work)
        .await
        .map_err(|err| io_error(io::Error::other(err.to_string())))?
}

fn io_error(err: io::Error) -> AppError {
    AppError::Io(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names_use_plain_filename() {
        let header = attachment("report.pdf".into());

        assert!(header.is_attachment());
        assert_eq!(header.get_filename(), Some("report.pdf"));
    }

    #[test]
    fn non_ascii_names_use_extended_filename() {
        let header = attachment("relatório.pdf".into());

        let ext = header.get_filename_ext().unwrap();
        assert_eq!(ext.value, "relatório.pdf".as_bytes());
    }
}

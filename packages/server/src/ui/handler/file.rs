//! File upload / download handlers.

use std::sync::Arc;

use axum::{
    Json,
    body::Body,
    extract::{Multipart, Path, State},
    http::{HeaderMap, header},
    response::{IntoResponse, Response},
};
use futures_util::{StreamExt, TryStreamExt};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tokio_util::io::ReaderStream;

use crate::{
    infrastructure::dto::http::UploadResponseDto,
    ui::state::{AppState, ServerSettings},
    usecase::{DownloadError, StoredUpload, UploadError, UploadFileUseCase, UploadKind},
};

/// RFC 5987 `attr-char` minus the few symbols some clients mishandle
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// `POST /upload` (multipart: `file`, `username`)
pub async fn upload_file(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UploadResponseDto>, UploadError> {
    handle_upload(&state, UploadKind::File, &headers, multipart).await
}

/// `POST /upload-voice` (multipart: `file`, `username`, `duration`)
pub async fn upload_voice(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Result<Json<UploadResponseDto>, UploadError> {
    handle_upload(&state, UploadKind::Voice, &headers, multipart).await
}

/// `GET /download/{filename}`
pub async fn download_file(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, DownloadError> {
    let file = state.download_file_usecase.execute(filename).await?;

    let disposition = content_disposition(&file.original_name);
    let name = file.original_name;
    // Headers are already committed when the body fails, so only log it
    let body = ReaderStream::new(file.reader)
        .inspect_err(move |e| tracing::error!("File transfer of '{}' failed: {}", name, e));

    Ok((
        [
            (header::CONTENT_TYPE, file.content_type),
            (header::CONTENT_LENGTH, file.len.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        Body::from_stream(body),
    )
        .into_response())
}

/// Form fields collected so far; fields may arrive in any order
#[derive(Default)]
struct UploadForm {
    stored: Option<StoredUpload>,
    username: Option<String>,
    duration: Option<String>,
}

async fn handle_upload(
    state: &AppState,
    kind: UploadKind,
    headers: &HeaderMap,
    mut multipart: Multipart,
) -> Result<Json<UploadResponseDto>, UploadError> {
    let usecase = &state.upload_file_usecase;

    let mut form = UploadForm::default();
    if let Err(e) = read_form(usecase, kind, &mut multipart, &mut form).await {
        if let Some(upload) = &form.stored {
            usecase.discard(upload).await;
        }
        return Err(e);
    }

    let base_url = base_url(&state.settings, headers);
    let receipt = usecase
        .complete(form.stored, form.username, form.duration, &base_url)
        .await?;

    Ok(Json(UploadResponseDto {
        message: receipt.message.to_string(),
        filename: receipt.filename,
    }))
}

async fn read_form(
    usecase: &UploadFileUseCase,
    kind: UploadKind,
    multipart: &mut Multipart,
    form: &mut UploadForm,
) -> Result<(), UploadError> {
    // A file part that failed before any username arrived is reported only
    // once the username is known to be valid
    let mut store_error = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| UploadError::InvalidForm(e.body_text()))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            // Only the first file part is stored; later ones are skipped
            Some("file") if form.stored.is_none() && store_error.is_none() => {
                let original_name = field.file_name().map(str::to_string);
                let body = field.map_err(std::io::Error::other).boxed();
                match usecase.store(kind, original_name.as_deref(), body).await {
                    Ok(stored) => form.stored = Some(stored),
                    Err(e) if form.username.is_some() => return Err(e),
                    Err(e) => store_error = Some(e),
                }
            }
            Some("username") => {
                let username = field
                    .text()
                    .await
                    .map_err(|e| UploadError::InvalidForm(e.body_text()))?;
                let username = UploadFileUseCase::validate_username(Some(username))?;
                form.username = Some(username.into_string());
                if let Some(e) = store_error.take() {
                    return Err(e);
                }
            }
            Some("duration") if kind == UploadKind::Voice => {
                form.duration = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| UploadError::InvalidForm(e.body_text()))?,
                );
            }
            _ => {}
        }
    }

    match store_error {
        Some(_) => Err(UploadError::MissingUsername),
        None => Ok(()),
    }
}

/// `scheme://host` as seen by the client, for download links
fn base_url(settings: &ServerSettings, headers: &HeaderMap) -> String {
    let authority = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .unwrap_or_else(|| settings.authority());
    format!("{}://{}", settings.scheme(), authority)
}

/// `attachment` disposition carrying both an ASCII fallback and the
/// percent-encoded UTF-8 name
fn content_disposition(original_name: &str) -> String {
    let ascii_name: String = original_name
        .chars()
        .map(|c| {
            if c.is_ascii() && !c.is_ascii_control() && c != '"' && c != '\\' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let encoded = utf8_percent_encode(original_name, FILENAME_ENCODE_SET);

    format!("attachment; filename=\"{ascii_name}\"; filename*=UTF-8''{encoded}")
}

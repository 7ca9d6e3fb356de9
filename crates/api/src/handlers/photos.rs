//! Handlers for the `/photos` resource: photo sections and the photos
//! uploaded into them.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;
use sideludi_core::content::{validate_optional_title, validate_title};
use sideludi_core::error::{CoreError, UploadError};
use sideludi_core::types::DbId;
use sideludi_core::upload::{validate_content_type, validate_size, MAX_UPLOAD_BYTES, UPLOAD_FIELD};
use sideludi_db::models::photo::{
    CreatePhoto, CreatePhotoSection, Photo, PhotoSection, PhotoSectionWithPhotos,
    UpdatePhotoSection,
};
use sideludi_db::repositories::{PhotoRepo, PhotoSectionRepo};

use crate::error::{AppError, AppResult};
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

fn section_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "PhotoSection",
        id,
    })
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// GET /api/photos
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<PhotoSectionWithPhotos>>> {
    let sections = PhotoSectionRepo::list_with_photos(&state.pool).await?;
    Ok(Json(sections))
}

/// GET /api/photos/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<PhotoSectionWithPhotos>> {
    let section = PhotoSectionRepo::find_with_photos(&state.pool, id)
        .await?
        .ok_or_else(|| section_not_found(id))?;
    Ok(Json(section))
}

/// POST /api/photos
pub async fn create(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreatePhotoSection>,
) -> AppResult<(StatusCode, Json<PhotoSection>)> {
    validate_title(&input.title)?;

    let section = PhotoSectionRepo::create(&state.pool, &input).await?;
    tracing::info!(section_id = section.id, user_id = auth.user_id, "Photo section created");
    Ok((StatusCode::CREATED, Json(section)))
}

/// PUT /api/photos/{id}
pub async fn update(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<UpdatePhotoSection>,
) -> AppResult<Json<PhotoSection>> {
    validate_optional_title(input.title.as_deref())?;

    let section = PhotoSectionRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| section_not_found(id))?;
    Ok(Json(section))
}

/// DELETE /api/photos/{id}
///
/// Photo rows go with the section; their files stay on disk.
pub async fn delete(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if PhotoSectionRepo::delete(&state.pool, id).await? {
        tracing::info!(section_id = id, user_id = auth.user_id, "Photo section deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(section_not_found(id))
    }
}

// ---------------------------------------------------------------------------
// Photos
// ---------------------------------------------------------------------------

/// A validated file pulled out of the multipart body.
struct UploadedFile {
    file_name: String,
    data: Vec<u8>,
}

/// POST /api/photos/{id}/photos
///
/// Multipart upload with the image under the `photo` field. The file is
/// validated, then the section is checked, and only then written to disk.
pub async fn add_photo(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(section_id): AppPath<DbId>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<(StatusCode, Json<Photo>)> {
    let file = read_photo_field(multipart?).await?;

    if !PhotoSectionRepo::exists(&state.pool, section_id).await? {
        return Err(section_not_found(section_id));
    }

    let url = state.uploads.persist(&file.file_name, &file.data).await?;

    let input = CreatePhoto {
        url,
        photo_section_id: section_id,
    };
    let photo = match PhotoRepo::create(&state.pool, &input).await {
        Ok(photo) => photo,
        Err(e) => {
            // The section can vanish between the existence check and the insert.
            state.uploads.discard(&input.url).await;
            return Err(e.into());
        }
    };

    tracing::info!(
        photo_id = photo.id,
        section_id,
        user_id = auth.user_id,
        "Photo uploaded"
    );
    Ok((StatusCode::CREATED, Json(photo)))
}

/// DELETE /api/photos/photos/{id}
///
/// Removes the row only. The stored file is left in place.
pub async fn delete_photo(
    _auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<StatusCode> {
    if PhotoRepo::delete(&state.pool, id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Photo",
            id,
        }))
    }
}

/// Pull the single `photo` file out of the body and validate it.
///
/// Other text fields are ignored. A second `photo` part is rejected.
async fn read_photo_field(mut multipart: Multipart) -> AppResult<UploadedFile> {
    let mut found: Option<UploadedFile> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        if found.is_some() {
            return Err(AppError::BadRequest(format!(
                "Only one file may be sent in the '{UPLOAD_FIELD}' field"
            )));
        }

        validate_content_type(field.content_type())?;
        let file_name = field.file_name().unwrap_or_default().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        validate_size(data.len())?;

        found = Some(UploadedFile {
            file_name,
            data: data.to_vec(),
        });
    }

    found.ok_or_else(|| UploadError::MissingFile.into())
}

/// Body-limit overruns surface from the multipart stream as 413.
fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::PayloadTooLarge {
            limit: MAX_UPLOAD_BYTES,
        }
        .into()
    } else {
        AppError::BadRequest(err.body_text())
    }
}

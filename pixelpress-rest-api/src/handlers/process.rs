//! Batch image processing endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use pixelpress_execution::{BatchOutcome, ImageUpload};
use pixelpress_imaging::FilterKind;
use tracing::{debug, info};

use crate::{context::ProcessingContext, errors::RestResult};

const IMAGES_FIELD: &str = "images";
const FILTER_FIELD: &str = "filter";

/// Process every `images` file part with the `filter` field's filter.
///
/// A missing or empty `filter` means grayscale. Images that fail to decode
/// are reported under `failures` and do not fail the request.
pub async fn process_images(
    State(ctx): State<ProcessingContext>,
    mut multipart: Multipart,
) -> RestResult<Json<BatchOutcome>> {
    let mut uploads = Vec::new();
    let mut filter_name: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(IMAGES_FIELD) => {
                let filename = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                uploads.push(ImageUpload::new(filename, bytes.to_vec()));
            }
            Some(FILTER_FIELD) => {
                filter_name = Some(field.text().await?);
            }
            other => {
                debug!("Ignoring multipart field {:?}", other);
            }
        }
    }

    let filter = match filter_name.as_deref().map(str::trim) {
        None | Some("") => FilterKind::Grayscale,
        Some(name) => name.parse::<FilterKind>()?,
    };

    info!("Processing {} images with filter {}", uploads.len(), filter);
    let outcome = ctx.pool.submit_batch(uploads, filter).await?;

    Ok(Json(outcome))
}

use axum::extract::Multipart;
use bytes::Bytes;

use crate::error::ShopServiceError;

/// Image part plus the optional `id` text part of an upload form.
pub struct ImageForm {
    pub file_name: String,
    pub bytes: Bytes,
    pub id: Option<i32>,
}

/// Read a `multipart/form-data` body carrying a `file` part (or `image`, as
/// older clients send) and an optional numeric `id`.
pub async fn read_image_form(mut multipart: Multipart) -> Result<ImageForm, ShopServiceError> {
    let mut file = None;
    let mut id = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| ShopServiceError::InvalidUpload)?
    {
        match field.name() {
            Some("file" | "image") => {
                let file_name = field.file_name().unwrap_or_default().to_owned();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|_| ShopServiceError::InvalidUpload)?;
                file = Some((file_name, bytes));
            }
            Some("id") => {
                let text = field
                    .text()
                    .await
                    .map_err(|_| ShopServiceError::InvalidUpload)?;
                let text = text.trim();
                if !text.is_empty() {
                    id = Some(text.parse().map_err(|_| ShopServiceError::MissingData)?);
                }
            }
            _ => {}
        }
    }
    let (file_name, bytes) = file.ok_or(ShopServiceError::InvalidUpload)?;
    Ok(ImageForm {
        file_name,
        bytes,
        id,
    })
}

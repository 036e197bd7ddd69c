//! Object storage for progress photos, `{account_id}/{photo_id}.jpg`.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use gymtrack_core::backend::{BackendResult, BlobStoreTrait};

use crate::http::{expect_success, transport};

use super::RelationalBackend;

impl RelationalBackend {
    fn object_path(account_id: &str, photo_id: &str) -> String {
        format!("{account_id}/{photo_id}.jpg")
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url(),
            self.config.photo_bucket,
            path
        )
    }

    fn public_object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url(),
            self.config.photo_bucket,
            path
        )
    }
}

#[async_trait]
impl BlobStoreTrait for RelationalBackend {
    async fn upload_photo(&self, account_id: &str, bytes: Vec<u8>, photo_id: &str) -> BackendResult<String> {
        let path = Self::object_path(account_id, photo_id);
        let response = self
            .client
            .post(self.object_url(&path))
            .headers(self.headers()?)
            .header(CONTENT_TYPE, "image/jpeg")
            .header("x-upsert", "true")
            .body(bytes)
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await?;
        Ok(self.public_object_url(&path))
    }

    async fn delete_photo(&self, account_id: &str, photo_id: &str) -> BackendResult<()> {
        let path = Self::object_path(account_id, photo_id);
        let response = self
            .client
            .delete(self.object_url(&path))
            .headers(self.headers()?)
            .send()
            .await
            .map_err(transport)?;
        expect_success(response).await
    }
}

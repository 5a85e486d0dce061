//! Sighting log endpoints

use serde::{Deserialize, Serialize};

use fieldfare_domain::{
    NearbyQuery, NearbySighting, NewSighting, PresignedUpload, RequestBody, RequestSpec,
    SightingDetail, SightingEdit, SightingImage, SightingPatch, SightingSummary,
};

use crate::client::AuthClient;
use crate::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedSighting {
    sighting_id: i64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PresignRequest<'a> {
    content_type: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterImageRequest<'a> {
    object_key: &'a str,
    content_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ItemsEnvelope<T> {
    items: Vec<T>,
}

/// The whole sighting-log surface needs the session.
#[derive(Clone)]
pub struct SightingService {
    private: AuthClient,
}

impl SightingService {
    /// Creates the service.
    #[must_use]
    pub const fn new(private: AuthClient) -> Self {
        Self { private }
    }

    /// Logs a new sighting and returns its id.
    ///
    /// # Errors
    ///
    /// Rejects locally invalid input as `ApiError::Domain` before
    /// dispatch; otherwise propagates request-pipeline errors.
    pub async fn create(&self, sighting: &NewSighting) -> ApiResult<i64> {
        sighting.validate()?;
        let body = RequestBody::json(sighting).map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self
            .private
            .send(RequestSpec::post("/sightings/").with_body(body))
            .await?;
        let created: CreatedSighting = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(created.sighting_id)
    }

    /// Requests a presigned upload slot for one image.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn presign_image(
        &self,
        sighting_id: i64,
        content_type: &str,
    ) -> ApiResult<PresignedUpload> {
        let body = RequestBody::json(&PresignRequest { content_type })
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self
            .private
            .send(RequestSpec::post(format!("/sightings/{sighting_id}/images/presign")).with_body(body))
            .await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Registers an uploaded image with the sighting.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn register_image(
        &self,
        sighting_id: i64,
        object_key: &str,
        content_type: &str,
    ) -> ApiResult<SightingImage> {
        let body = RequestBody::json(&RegisterImageRequest {
            object_key,
            content_type,
        })
        .map_err(|e| ApiError::Decode(e.to_string()))?;
        let response = self
            .private
            .send(RequestSpec::post(format!("/sightings/{sighting_id}/images")).with_body(body))
            .await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Detaches and deletes an image.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn delete_image(&self, sighting_id: i64, image_id: i64) -> ApiResult<()> {
        self.private
            .send(RequestSpec::delete(format!(
                "/sightings/{sighting_id}/images/{image_id}"
            )))
            .await?;
        Ok(())
    }

    /// Lists the caller's sightings.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn list_mine(&self) -> ApiResult<Vec<SightingSummary>> {
        let response = self.private.send(RequestSpec::get("/sightings/me")).await?;
        let envelope: ItemsEnvelope<SightingSummary> = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.items)
    }

    /// Fetches one sighting in full.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn detail(&self, sighting_id: i64) -> ApiResult<SightingDetail> {
        let response = self
            .private
            .send(RequestSpec::get(format!("/sightings/{sighting_id}")))
            .await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Fetches the editable view of one sighting.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn edit_detail(&self, sighting_id: i64) -> ApiResult<SightingEdit> {
        let response = self
            .private
            .send(RequestSpec::get(format!("/sightings/{sighting_id}/edit")))
            .await?;
        response.json().map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn update(&self, sighting_id: i64, patch: &SightingPatch) -> ApiResult<()> {
        let body = RequestBody::json(patch).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.private
            .send(RequestSpec::patch(format!("/sightings/{sighting_id}/edit")).with_body(body))
            .await?;
        Ok(())
    }

    /// Deletes a sighting.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn delete(&self, sighting_id: i64) -> ApiResult<()> {
        self.private
            .send(RequestSpec::delete(format!("/sightings/{sighting_id}")))
            .await?;
        Ok(())
    }

    /// Fetches sightings around a map position.
    ///
    /// # Errors
    ///
    /// Propagates request-pipeline errors.
    pub async fn nearby(&self, query: &NearbyQuery) -> ApiResult<Vec<NearbySighting>> {
        let response = self
            .private
            .send(RequestSpec::get("/sightings/nearby").with_query(query.to_params()))
            .await?;
        let envelope: ItemsEnvelope<NearbySighting> = response
            .json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.items)
    }
}

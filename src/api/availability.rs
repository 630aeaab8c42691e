//! Availability endpoints.

use super::{ApiClient, AvailabilityApi};
use crate::errors::AppError;
use crate::models::{AvailabilitySlot, CreateAvailabilityRequest, DeleteAvailabilityRequest};

impl AvailabilityApi for ApiClient {
    async fn list_availability(
        &self,
        professional_id: &str,
    ) -> Result<Vec<AvailabilitySlot>, AppError> {
        let request = self
            .http()
            .get(self.url(&["availability"]))
            .query(&[("professionalId", professional_id)]);
        self.send(request).await
    }

    async fn create_availability(
        &self,
        request: &CreateAvailabilityRequest,
    ) -> Result<Vec<AvailabilitySlot>, AppError> {
        let request = self.http().post(self.url(&["availability"])).json(request);
        self.send(request).await
    }

    async fn delete_availability(&self, id: &str) -> Result<(), AppError> {
        let request = self.http().delete(self.url(&["availability", id]));
        self.send_empty(request).await
    }

    async fn delete_availability_many(&self, ids: &[String]) -> Result<(), AppError> {
        let body = DeleteAvailabilityRequest { ids: ids.to_vec() };
        let request = self
            .http()
            .post(self.url(&["availability", "bulk-delete"]))
            .json(&body);
        self.send_empty(request).await
    }
}

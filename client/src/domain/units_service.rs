//! Unit records service.
//!
//! Each operation is one request against the injected [`ApiClient`]; errors
//! come back exactly as the port reported them.

use std::sync::Arc;

use crate::domain::ports::{ApiClient, ApiClientError, ApiClientExt, QueryParams};
use crate::domain::{BuildingId, NewUnit, Unit, UnitChanges, UnitId};

const UNITS_PATH: &str = "/units";

/// Typed facade over the `/units` endpoints.
pub struct UnitsService<C: ?Sized> {
    client: Arc<C>,
}

impl<C: ?Sized> Clone for UnitsService<C> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
        }
    }
}

impl<C: ?Sized> UnitsService<C> {
    /// Create a service backed by `client`.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }
}

impl<C> UnitsService<C>
where
    C: ApiClient + ?Sized,
{
    /// List units, restricted to one building when `building_id` is given.
    pub async fn get_units(
        &self,
        building_id: Option<&BuildingId>,
    ) -> Result<Vec<Unit>, ApiClientError> {
        let mut params = QueryParams::new();
        if let Some(id) = building_id {
            params.insert("building_id".to_owned(), id.to_string());
        }
        self.client.get(UNITS_PATH, params).await
    }

    /// Fetch one unit by identifier.
    pub async fn get_unit(&self, unit_id: &UnitId) -> Result<Unit, ApiClientError> {
        self.client
            .get(&unit_path(unit_id), QueryParams::new())
            .await
    }

    /// Create a unit and return the stored record.
    pub async fn create_unit(&self, new_unit: &NewUnit) -> Result<Unit, ApiClientError> {
        self.client.post(UNITS_PATH, new_unit).await
    }

    /// Apply `changes` to a unit and return the updated record.
    pub async fn update_unit(
        &self,
        unit_id: &UnitId,
        changes: &UnitChanges,
    ) -> Result<Unit, ApiClientError> {
        self.client.put(&unit_path(unit_id), changes).await
    }

    /// Delete a unit.
    pub async fn delete_unit(&self, unit_id: &UnitId) -> Result<(), ApiClientError> {
        self.client.delete(&unit_path(unit_id)).await
    }
}

fn unit_path(unit_id: &UnitId) -> String {
    format!("{UNITS_PATH}/{unit_id}")
}

#[cfg(test)]
#[path = "units_service_tests.rs"]
mod tests;

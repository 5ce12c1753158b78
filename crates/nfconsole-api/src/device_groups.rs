// Device group endpoints (configuration API)
//
// `GET /device-group` answers with names on some servers and full records
// on others; both are standardized to names here.

use tracing::debug;

use crate::client::{ApiClient, ApiSurface};
use crate::error::Error;
use crate::models::{DeviceGroup, NameOrRecord};

const RESOURCE: &str = "device-group";

impl ApiClient {
    /// List device group names.
    ///
    /// `GET /device-group`
    pub async fn list_device_groups(&self) -> Result<Vec<String>, Error> {
        debug!("listing device groups");
        let entries: Vec<NameOrRecord> = self.get(ApiSurface::Config, &[RESOURCE]).await?;
        Ok(entries.into_iter().map(NameOrRecord::into_name).collect())
    }

    /// `GET /device-group/{name}`
    pub async fn get_device_group(&self, name: &str) -> Result<DeviceGroup, Error> {
        self.get(ApiSurface::Config, &[RESOURCE, name]).await
    }

    /// `POST /device-group/{name}`
    pub async fn create_device_group(&self, group: &DeviceGroup) -> Result<(), Error> {
        self.post_no_response(ApiSurface::Config, &[RESOURCE, &group.group_name], group)
            .await
    }

    /// `PUT /device-group/{name}`
    pub async fn update_device_group(&self, name: &str, group: &DeviceGroup) -> Result<(), Error> {
        self.put_no_response(ApiSurface::Config, &[RESOURCE, name], group)
            .await
    }

    /// `DELETE /device-group/{name}`
    pub async fn delete_device_group(&self, name: &str) -> Result<(), Error> {
        self.delete_no_response(ApiSurface::Config, &[RESOURCE, name])
            .await
    }
}

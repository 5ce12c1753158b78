// Network slice endpoints (configuration API)

use tracing::debug;

use crate::client::{ApiClient, ApiSurface};
use crate::error::Error;
use crate::models::{NameOrRecord, NetworkSlice};

const RESOURCE: &str = "network-slice";

impl ApiClient {
    /// List network slice names.
    ///
    /// `GET /network-slice`
    pub async fn list_network_slices(&self) -> Result<Vec<String>, Error> {
        debug!("listing network slices");
        let entries: Vec<NameOrRecord> = self.get(ApiSurface::Config, &[RESOURCE]).await?;
        Ok(entries.into_iter().map(NameOrRecord::into_name).collect())
    }

    /// `GET /network-slice/{name}`
    pub async fn get_network_slice(&self, name: &str) -> Result<NetworkSlice, Error> {
        self.get(ApiSurface::Config, &[RESOURCE, name]).await
    }

    /// `POST /network-slice/{name}`
    pub async fn create_network_slice(&self, slice: &NetworkSlice) -> Result<(), Error> {
        self.post_no_response(ApiSurface::Config, &[RESOURCE, &slice.slice_name], slice)
            .await
    }

    /// `PUT /network-slice/{name}`
    pub async fn update_network_slice(&self, name: &str, slice: &NetworkSlice) -> Result<(), Error> {
        self.put_no_response(ApiSurface::Config, &[RESOURCE, name], slice)
            .await
    }

    /// `DELETE /network-slice/{name}`
    pub async fn delete_network_slice(&self, name: &str) -> Result<(), Error> {
        self.delete_no_response(ApiSurface::Config, &[RESOURCE, name])
            .await
    }
}

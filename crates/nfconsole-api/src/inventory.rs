// Inventory endpoints (configuration API)
//
// gNBs and UPFs share the `/inventory/{kind}` collection layout. Creation
// posts to the collection; the server derives the key from the body.

use crate::client::{ApiClient, ApiSurface};
use crate::error::Error;
use crate::models::{Gnb, Upf};

const INVENTORY: &str = "inventory";
const GNB: &str = "gnb";
const UPF: &str = "upf";

impl ApiClient {
    // ── gNB ──────────────────────────────────────────────────────────

    /// `GET /inventory/gnb`
    pub async fn list_gnbs(&self) -> Result<Vec<Gnb>, Error> {
        self.get(ApiSurface::Config, &[INVENTORY, GNB]).await
    }

    /// `GET /inventory/gnb/{name}`
    pub async fn get_gnb(&self, name: &str) -> Result<Gnb, Error> {
        self.get(ApiSurface::Config, &[INVENTORY, GNB, name]).await
    }

    /// `POST /inventory/gnb`
    pub async fn create_gnb(&self, gnb: &Gnb) -> Result<(), Error> {
        self.post_no_response(ApiSurface::Config, &[INVENTORY, GNB], gnb)
            .await
    }

    /// `PUT /inventory/gnb/{name}`
    pub async fn update_gnb(&self, name: &str, gnb: &Gnb) -> Result<(), Error> {
        self.put_no_response(ApiSurface::Config, &[INVENTORY, GNB, name], gnb)
            .await
    }

    /// `DELETE /inventory/gnb/{name}`
    pub async fn delete_gnb(&self, name: &str) -> Result<(), Error> {
        self.delete_no_response(ApiSurface::Config, &[INVENTORY, GNB, name])
            .await
    }

    // ── UPF ──────────────────────────────────────────────────────────

    /// `GET /inventory/upf`
    pub async fn list_upfs(&self) -> Result<Vec<Upf>, Error> {
        self.get(ApiSurface::Config, &[INVENTORY, UPF]).await
    }

    /// `GET /inventory/upf/{hostname}`
    pub async fn get_upf(&self, hostname: &str) -> Result<Upf, Error> {
        self.get(ApiSurface::Config, &[INVENTORY, UPF, hostname])
            .await
    }

    /// `POST /inventory/upf`
    pub async fn create_upf(&self, upf: &Upf) -> Result<(), Error> {
        self.post_no_response(ApiSurface::Config, &[INVENTORY, UPF], upf)
            .await
    }

    /// `PUT /inventory/upf/{hostname}`
    pub async fn update_upf(&self, hostname: &str, upf: &Upf) -> Result<(), Error> {
        self.put_no_response(ApiSurface::Config, &[INVENTORY, UPF, hostname], upf)
            .await
    }

    /// `DELETE /inventory/upf/{hostname}`
    pub async fn delete_upf(&self, hostname: &str) -> Result<(), Error> {
        self.delete_no_response(ApiSurface::Config, &[INVENTORY, UPF, hostname])
            .await
    }
}

// K4 key endpoints (subscriber API)
//
// Keys are addressed by their serial number. Labelled keys live in an
// external key store, which needs the label on delete as well.

use crate::client::{ApiClient, ApiSurface};
use crate::error::Error;
use crate::models::K4Key;

const RESOURCE: &str = "k4opt";

impl ApiClient {
    /// `GET /k4opt`
    pub async fn list_k4_keys(&self) -> Result<Vec<K4Key>, Error> {
        self.get(ApiSurface::Subscriber, &[RESOURCE]).await
    }

    /// `GET /k4opt/{sno}`
    pub async fn get_k4_key(&self, sno: u8) -> Result<K4Key, Error> {
        let sno = sno.to_string();
        self.get(ApiSurface::Subscriber, &[RESOURCE, &sno]).await
    }

    /// `POST /k4opt`
    pub async fn create_k4_key(&self, key: &K4Key) -> Result<(), Error> {
        self.post_no_response(ApiSurface::Subscriber, &[RESOURCE], key)
            .await
    }

    /// `PUT /k4opt/{sno}`
    pub async fn update_k4_key(&self, sno: u8, key: &K4Key) -> Result<(), Error> {
        let sno = sno.to_string();
        self.put_no_response(ApiSurface::Subscriber, &[RESOURCE, &sno], key)
            .await
    }

    /// `DELETE /k4opt/{sno}`, or `DELETE /k4opt/{sno}/{label}` for labelled keys.
    pub async fn delete_k4_key(&self, sno: u8, label: Option<&str>) -> Result<(), Error> {
        let sno = sno.to_string();
        match label {
            Some(label) => {
                self.delete_no_response(ApiSurface::Subscriber, &[RESOURCE, &sno, label])
                    .await
            }
            None => {
                self.delete_no_response(ApiSurface::Subscriber, &[RESOURCE, &sno])
                    .await
            }
        }
    }
}

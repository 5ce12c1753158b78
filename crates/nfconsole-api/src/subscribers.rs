// Subscriber endpoints (subscriber API)
//
// The collection lists identifiers only (`"001010000000001"` or
// `{"ueId": "imsi-001010000000001"}`), so a full listing costs one extra
// request per subscriber. Details come back flat or nested; both are
// folded into `SubscriberAuth`.

use tracing::{debug, warn};

use crate::client::{ApiClient, ApiSurface};
use crate::error::Error;
use crate::models::{NameOrRecord, Subscriber, SubscriberAuth, SubscriberRecord, bare_imsi};

const RESOURCE: &str = "subscriber";

impl ApiClient {
    /// List subscriber IMSIs.
    ///
    /// `GET /subscriber`
    pub async fn list_subscriber_imsis(&self) -> Result<Vec<String>, Error> {
        let entries: Vec<NameOrRecord> = self.get(ApiSurface::Subscriber, &[RESOURCE]).await?;
        Ok(entries
            .into_iter()
            .map(|e| bare_imsi(&e.into_name()).to_owned())
            .collect())
    }

    /// List every subscriber with its credentials.
    ///
    /// Subscribers whose detail request fails are skipped and logged;
    /// only a failure of the collection request itself is an error.
    pub async fn list_subscribers(&self) -> Result<Vec<Subscriber>, Error> {
        let imsis = self.list_subscriber_imsis().await?;
        debug!(count = imsis.len(), "fetching subscriber details");

        let mut subscribers = Vec::with_capacity(imsis.len());
        for imsi in imsis {
            match self.get_subscriber(&imsi).await {
                Ok(sub) => subscribers.push(sub),
                Err(e) => warn!(imsi = %imsi, error = %e, "skipping subscriber"),
            }
        }
        Ok(subscribers)
    }

    /// `GET /subscriber/{imsi}`
    pub async fn get_subscriber(&self, imsi: &str) -> Result<Subscriber, Error> {
        let record: SubscriberRecord = self.get(ApiSurface::Subscriber, &[RESOURCE, imsi]).await?;
        Ok(Subscriber {
            imsi: imsi.to_owned(),
            auth: record.into_auth(),
        })
    }

    /// `POST /subscriber/{imsi}`
    pub async fn create_subscriber(&self, imsi: &str, auth: &SubscriberAuth) -> Result<(), Error> {
        self.post_no_response(ApiSurface::Subscriber, &[RESOURCE, imsi], auth)
            .await
    }

    /// `PUT /subscriber/{imsi}`
    pub async fn update_subscriber(&self, imsi: &str, auth: &SubscriberAuth) -> Result<(), Error> {
        self.put_no_response(ApiSurface::Subscriber, &[RESOURCE, imsi], auth)
            .await
    }

    /// `DELETE /subscriber/{imsi}`
    pub async fn delete_subscriber(&self, imsi: &str) -> Result<(), Error> {
        self.delete_no_response(ApiSurface::Subscriber, &[RESOURCE, imsi])
            .await
    }
}

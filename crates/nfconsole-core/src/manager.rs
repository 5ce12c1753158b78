// ── Generic resource manager ──
//
// `Manager<R>` runs the list / mutate flow shared by every entity:
// validate locally, send, then re-fetch so the cache always mirrors the
// server after a successful change. Failed calls leave the cache alone.

use std::marker::PhantomData;

use tracing::{info, warn};

use nfconsole_api::ApiClient;

use crate::error::CoreError;
use crate::form::FormValues;
use crate::resource::{Resource, detail_view, key_field_id, list_view};
use crate::validate::Validation;
use crate::view::{DetailView, ListState, ListView};

pub struct Manager<R: Resource> {
    /// What the list area shows: the last records, or the last failure.
    display: ListState<R::Record>,
    /// The most recent successfully fetched list.
    cache: Vec<R::Record>,
    _resource: PhantomData<R>,
}

impl<R: Resource> Default for Manager<R> {
    fn default() -> Self {
        Self {
            display: ListState::Idle,
            cache: Vec::new(),
            _resource: PhantomData,
        }
    }
}

impl<R: Resource> std::fmt::Debug for Manager<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Manager")
            .field("kind", &R::KIND)
            .field("cached", &self.cache.len())
            .field("error", &self.display.error())
            .finish()
    }
}

impl<R: Resource> Manager<R> {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Fetch every record into the display area.
    ///
    /// A failure is not returned as an error: it becomes the display
    /// state (the message shown in place of the list).
    pub async fn list(&mut self, api: &ApiClient) -> ListView {
        let result = R::fetch_all(api).await;
        self.apply_list(result);
        self.view()
    }

    /// Like [`list`](Self::list), but a failure is also returned, with
    /// its error class intact.
    pub async fn fetch(&mut self, api: &ApiClient) -> Result<ListView, CoreError> {
        match R::fetch_all(api).await {
            Ok(records) => {
                self.apply_list(Ok(records));
                Ok(self.view())
            }
            Err(e) => {
                warn!(kind = %R::KIND, error = %e, "list failed");
                self.display = ListState::Failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Store the outcome of a list fetch.
    pub fn apply_list(&mut self, result: Result<Vec<R::Record>, CoreError>) {
        match result {
            Ok(records) => {
                self.cache.clone_from(&records);
                self.display = ListState::Loaded(records);
            }
            Err(e) => {
                warn!(kind = %R::KIND, error = %e, "list failed");
                self.display = ListState::Failed(e.to_string());
            }
        }
    }

    pub async fn get(&self, api: &ApiClient, key: &str) -> Result<R::Record, CoreError> {
        R::fetch_one(api, key).await
    }

    pub async fn detail(&self, api: &ApiClient, key: &str) -> Result<(DetailView, FormValues), CoreError> {
        let record = self.get(api, key).await?;
        Ok((detail_view::<R>(&record), R::from_payload(&record)))
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Validate and create. Returns the new record's key.
    pub async fn create(&mut self, api: &ApiClient, form: &FormValues) -> Result<String, CoreError> {
        R::validate(form).into_result()?;
        let record = R::to_payload(form)?;
        let key = R::key(&record);

        R::create(api, &record).await?;
        info!(kind = %R::KIND, key = %key, "created");
        self.list(api).await;
        Ok(key)
    }

    /// Validate and replace the record stored under `key`.
    ///
    /// The key field of `form` is ignored: updates always target `key`.
    pub async fn update(&mut self, api: &ApiClient, key: &str, form: &FormValues) -> Result<(), CoreError> {
        let mut form = form.clone();
        form.set(key_field_id::<R>(), key);

        R::validate(&form).into_result()?;
        let record = R::to_payload(&form)?;

        R::update(api, key, &record).await?;
        info!(kind = %R::KIND, key, "updated");
        self.list(api).await;
        Ok(())
    }

    pub async fn delete(&mut self, api: &ApiClient, key: &str) -> Result<(), CoreError> {
        R::delete(api, key).await?;
        info!(kind = %R::KIND, key, "deleted");
        self.list(api).await;
        Ok(())
    }

    // ── Pure delegates ───────────────────────────────────────────────

    pub fn validate(&self, form: &FormValues) -> Validation {
        R::validate(form)
    }

    pub fn to_payload(&self, form: &FormValues) -> Result<R::Record, CoreError> {
        R::to_payload(form)
    }

    pub fn from_payload(&self, record: &R::Record) -> FormValues {
        R::from_payload(record)
    }

    // ── State ────────────────────────────────────────────────────────

    /// Render the display area.
    pub fn view(&self) -> ListView {
        list_view::<R>(self.display.records(), self.display.error())
    }

    pub fn display(&self) -> &ListState<R::Record> {
        &self.display
    }

    pub fn cached(&self) -> &[R::Record] {
        &self.cache
    }

    pub fn cached_keys(&self) -> Vec<String> {
        self.cache.iter().map(R::key).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resource::Gnbs;
    use nfconsole_api::Gnb;

    fn gnb(name: &str) -> Gnb {
        Gnb {
            name: name.into(),
            tac: Some(1),
        }
    }

    #[test]
    fn failed_list_keeps_cache() {
        let mut manager = Manager::<Gnbs>::new();
        manager.apply_list(Ok(vec![gnb("gnb1")]));
        manager.apply_list(Err(CoreError::Connection {
            message: "refused".into(),
        }));

        assert_eq!(manager.cached_keys(), ["gnb1"]);
        let view = manager.view();
        assert!(view.is_empty());
        assert!(view.error.as_deref().is_some_and(|e| e.contains("refused")));
    }

    #[test]
    fn idle_manager_shows_empty_state() {
        let manager = Manager::<Gnbs>::new();
        assert_eq!(manager.view().placeholder(), Some("No gNBs found"));
    }
}

use nfconsole_api::{ApiClient, Gnb};

use super::{Resource, parse_opt_field};
use crate::error::CoreError;
use crate::form::{FieldSpec, FormValues};
use crate::kind::ResourceKind;
use crate::validate::{self, TAC_MAX, Validation};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("name", "gNB Name").key().placeholder("gnb1"),
    FieldSpec::integer("tac", "TAC", Some(1), Some(16_777_215)).placeholder("1"),
];

/// gNB inventory entries.
pub struct Gnbs;

impl Resource for Gnbs {
    type Record = Gnb;

    const KIND: ResourceKind = ResourceKind::Gnb;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn key(record: &Gnb) -> String {
        record.name.clone()
    }

    fn validate(form: &FormValues) -> Validation {
        let mut v = Validation::new();
        v.require(form.get("name"), "gNB name is required");
        if let Some(tac) = form.opt("tac") {
            v.check(
                validate::is_tac(tac),
                format!("TAC must be between 1 and {TAC_MAX}"),
            );
        }
        v
    }

    fn to_payload(form: &FormValues) -> Result<Gnb, CoreError> {
        Ok(Gnb {
            name: form.get("name").to_owned(),
            tac: parse_opt_field(form, "tac", "TAC")?,
        })
    }

    fn from_payload(record: &Gnb) -> FormValues {
        let mut form = FormValues::new();
        form.set("name", record.name.as_str());
        form.set_opt("tac", record.tac.map(|t| t.to_string()));
        form
    }

    fn columns() -> &'static [&'static str] {
        &["Name", "TAC"]
    }

    fn row(record: &Gnb) -> Vec<String> {
        vec![
            record.name.clone(),
            record.tac.map_or_else(|| "N/A".to_owned(), |t| t.to_string()),
        ]
    }

    fn detail(record: &Gnb) -> Vec<(&'static str, String)> {
        Self::columns().iter().copied().zip(Self::row(record)).collect()
    }

    async fn fetch_all(api: &ApiClient) -> Result<Vec<Gnb>, CoreError> {
        Ok(api.list_gnbs().await?)
    }

    async fn fetch_one(api: &ApiClient, key: &str) -> Result<Gnb, CoreError> {
        Ok(api.get_gnb(key).await?)
    }

    async fn create(api: &ApiClient, record: &Gnb) -> Result<(), CoreError> {
        Ok(api.create_gnb(record).await?)
    }

    async fn update(api: &ApiClient, key: &str, record: &Gnb) -> Result<(), CoreError> {
        Ok(api.update_gnb(key, record).await?)
    }

    async fn delete(api: &ApiClient, key: &str) -> Result<(), CoreError> {
        Ok(api.delete_gnb(key).await?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::resource::test_support::form;

    #[test]
    fn tac_out_of_range_is_rejected() {
        let v = Gnbs::validate(&form(&[("name", "gnb1"), ("tac", "16777216")]));
        assert_eq!(v.errors, ["TAC must be between 1 and 16777215"]);
        let v = Gnbs::validate(&form(&[("name", "gnb1"), ("tac", "0")]));
        assert!(!v.is_valid());
    }

    #[test]
    fn tac_is_optional() {
        let input = form(&[("name", "gnb1")]);
        assert!(Gnbs::validate(&input).is_valid());
        assert_eq!(
            serde_json::to_value(Gnbs::to_payload(&input).unwrap()).unwrap(),
            json!({"name": "gnb1"})
        );
    }

    #[test]
    fn name_is_required() {
        let v = Gnbs::validate(&form(&[("tac", "1")]));
        assert_eq!(v.errors, ["gNB name is required"]);
    }

    #[test]
    fn round_trip() {
        let input = form(&[("name", "gnb1"), ("tac", "16777215")]);
        let record = Gnbs::to_payload(&input).unwrap();
        assert_eq!(record.tac, Some(16_777_215));
        assert_eq!(Gnbs::from_payload(&record), input);
        assert_eq!(Gnbs::detail(&record), [("Name", "gnb1".to_owned()), ("TAC", "16777215".to_owned())]);
    }
}

use nfconsole_api::{ApiClient, K4Key};
use tracing::debug;

use super::{Resource, parse_field};
use crate::error::CoreError;
use crate::form::{FieldSpec, FormValues};
use crate::kind::ResourceKind;
use crate::validate::{self, Validation};

const FIELDS: &[FieldSpec] = &[
    FieldSpec::integer("k4_sno", "K4 Serial Number (SNO)", Some(0), Some(255))
        .key()
        .placeholder("1"),
    FieldSpec::text("k4", "K4 Key")
        .required()
        .placeholder("00112233445566778899aabbccddeeff")
        .help("32 hex characters"),
    FieldSpec::text("label", "Key Label").help("Optional key store label"),
];

/// K4 transport keys, keyed by serial number.
pub struct K4Keys;

impl Resource for K4Keys {
    type Record = K4Key;

    const KIND: ResourceKind = ResourceKind::K4Key;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn key(record: &K4Key) -> String {
        record.k4_sno.to_string()
    }

    fn validate(form: &FormValues) -> Validation {
        let mut v = Validation::new();
        let sno = form.get("k4_sno");
        if !validate::is_non_negative(sno) {
            v.push("K4 SNO is required and must be a non-negative number.");
        } else if validate::parse_in_range(sno, 0..=255).is_none() {
            v.push("K4 SNO must be between 0 and 255.");
        }
        v.check(
            validate::is_hex_key(form.get("k4")),
            "K4 Key must be exactly 32 hexadecimal characters.",
        );
        v
    }

    fn to_payload(form: &FormValues) -> Result<K4Key, CoreError> {
        Ok(K4Key {
            k4_sno: parse_field(form, "k4_sno", "K4 SNO")?,
            k4: form.get("k4").to_ascii_lowercase(),
            label: form.opt("label").map(str::to_owned),
        })
    }

    fn from_payload(record: &K4Key) -> FormValues {
        let mut form = FormValues::new();
        form.set("k4_sno", record.k4_sno.to_string());
        form.set("k4", record.k4.as_str());
        form.set_opt("label", record.label.as_deref());
        form
    }

    fn columns() -> &'static [&'static str] {
        &["Serial Number (SNO)", "K4 Key"]
    }

    fn row(record: &K4Key) -> Vec<String> {
        vec![record.k4_sno.to_string(), record.k4.clone()]
    }

    fn detail(record: &K4Key) -> Vec<(&'static str, String)> {
        vec![
            ("Serial Number (SNO)", record.k4_sno.to_string()),
            ("K4 Key", record.k4.clone()),
            ("Key Label", crate::view::or_na(record.label.as_deref())),
        ]
    }

    async fn fetch_all(api: &ApiClient) -> Result<Vec<K4Key>, CoreError> {
        Ok(api.list_k4_keys().await?)
    }

    async fn fetch_one(api: &ApiClient, key: &str) -> Result<K4Key, CoreError> {
        Ok(api.get_k4_key(parse_sno(key)?).await?)
    }

    async fn create(api: &ApiClient, record: &K4Key) -> Result<(), CoreError> {
        Ok(api.create_k4_key(record).await?)
    }

    async fn update(api: &ApiClient, key: &str, record: &K4Key) -> Result<(), CoreError> {
        Ok(api.update_k4_key(parse_sno(key)?, record).await?)
    }

    async fn delete(api: &ApiClient, key: &str) -> Result<(), CoreError> {
        let sno = parse_sno(key)?;
        // Labelled keys are deleted through /{sno}/{label}.
        let label = api.get_k4_key(sno).await?.label;
        debug!(sno, label = label.as_deref(), "deleting k4 key");
        Ok(api.delete_k4_key(sno, label.as_deref()).await?)
    }
}

fn parse_sno(key: &str) -> Result<u8, CoreError> {
    key.trim()
        .parse()
        .map_err(|_| CoreError::invalid(format!("Invalid K4 serial number: {key}")))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::resource::test_support::form;

    #[test]
    fn valid_key_passes_and_is_lowercased() {
        let input = form(&[("k4_sno", "5"), ("k4", "00112233445566778899AABBCCDDEEFF")]);
        assert!(K4Keys::validate(&input).is_valid());
        assert_eq!(
            serde_json::to_value(K4Keys::to_payload(&input).unwrap()).unwrap(),
            json!({"k4_sno": 5, "k4": "00112233445566778899aabbccddeeff"})
        );
    }

    #[test]
    fn non_hex_digit_is_rejected() {
        let input = form(&[("k4_sno", "5"), ("k4", "00112233445566778899aabbccddeefg")]);
        let v = K4Keys::validate(&input);
        assert_eq!(v.errors, ["K4 Key must be exactly 32 hexadecimal characters."]);
    }

    #[test]
    fn serial_number_bounds() {
        let key = ("k4", "00112233445566778899aabbccddeeff");
        assert!(K4Keys::validate(&form(&[("k4_sno", "0"), key])).is_valid());
        assert_eq!(
            K4Keys::validate(&form(&[("k4_sno", "-1"), key])).errors,
            ["K4 SNO is required and must be a non-negative number."]
        );
        assert_eq!(
            K4Keys::validate(&form(&[("k4_sno", "256"), key])).errors,
            ["K4 SNO must be between 0 and 255."]
        );
    }

    #[test]
    fn label_round_trips() {
        let input = form(&[
            ("k4_sno", "2"),
            ("k4", "00112233445566778899aabbccddeeff"),
            ("label", "K4_AES_2"),
        ]);
        let record = K4Keys::to_payload(&input).unwrap();
        assert_eq!(record.label.as_deref(), Some("K4_AES_2"));
        assert_eq!(K4Keys::from_payload(&record), input);
        assert_eq!(K4Keys::key(&record), "2");
    }
}

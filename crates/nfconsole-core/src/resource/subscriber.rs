use nfconsole_api::{ApiClient, Subscriber, SubscriberAuth};

use super::{Resource, parse_field};
use crate::error::CoreError;
use crate::form::{FieldSpec, FormValues};
use crate::kind::ResourceKind;
use crate::validate::{self, Validation};
use crate::view::or_na;

pub const DEFAULT_ENCRYPTION_ALGORITHM: u32 = 2;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("imsi", "IMSI").key().placeholder("001010000000001"),
    FieldSpec::text("plmn_id", "PLMN ID").required().placeholder("00101"),
    FieldSpec::text("key", "Key (Ki)")
        .required()
        .placeholder("465b5ce8b199b49faa5f0a2ee238a6bc")
        .help("32 hex characters"),
    FieldSpec::text("opc", "OPc")
        .required()
        .placeholder("cd63cb71954a9f4e48a5994e37a02baf")
        .help("32 hex characters"),
    FieldSpec::text("sequence_number", "Sequence Number")
        .required()
        .placeholder("16f3b3f70fc2"),
    FieldSpec::reference("k4_sno", "K4 SNO", ResourceKind::K4Key).single().required(),
    FieldSpec::integer("encryption_algorithm", "Encryption Algorithm", Some(0), None)
        .required()
        .placeholder("2"),
];

/// Subscriber authentication data, keyed by IMSI.
pub struct Subscribers;

impl Resource for Subscribers {
    type Record = Subscriber;

    const KIND: ResourceKind = ResourceKind::Subscriber;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn key(record: &Subscriber) -> String {
        record.imsi.clone()
    }

    fn validate(form: &FormValues) -> Validation {
        let mut v = Validation::new();
        v.check(validate::is_imsi(form.get("imsi")), "IMSI must be exactly 15 digits");
        v.check(validate::is_plmn_id(form.get("plmn_id")), "PLMN ID must be 5 or 6 digits");
        v.check(
            validate::is_hex_key(form.get("key")),
            "Key (Ki) must be exactly 32 hexadecimal characters",
        );
        v.check(
            validate::is_hex_key(form.get("opc")),
            "OPc must be exactly 32 hexadecimal characters",
        );
        v.require(form.get("sequence_number"), "Sequence Number is required");
        if v.require(form.get("k4_sno"), "K4 SNO is required") {
            v.check(
                validate::parse_in_range(form.get("k4_sno"), 0..=255).is_some(),
                "K4 SNO must be between 0 and 255",
            );
        }
        if let Some(alg) = form.opt("encryption_algorithm") {
            v.check(
                validate::is_non_negative(alg),
                "Encryption Algorithm must be a non-negative number",
            );
        }
        v
    }

    fn to_payload(form: &FormValues) -> Result<Subscriber, CoreError> {
        let encryption_algorithm = match form.opt("encryption_algorithm") {
            Some(_) => parse_field(form, "encryption_algorithm", "Encryption Algorithm")?,
            None => DEFAULT_ENCRYPTION_ALGORITHM,
        };
        Ok(Subscriber {
            imsi: form.get("imsi").to_owned(),
            auth: SubscriberAuth {
                plmn_id: form.get("plmn_id").to_owned(),
                opc: form.get("opc").to_ascii_lowercase(),
                key: form.get("key").to_ascii_lowercase(),
                sequence_number: form.get("sequence_number").to_owned(),
                k4_sno: parse_field(form, "k4_sno", "K4 SNO")?,
                encryption_algorithm,
            },
        })
    }

    fn from_payload(record: &Subscriber) -> FormValues {
        let auth = &record.auth;
        let mut form = FormValues::new();
        form.set("imsi", record.imsi.as_str());
        form.set("plmn_id", auth.plmn_id.as_str());
        form.set("key", auth.key.as_str());
        form.set("opc", auth.opc.as_str());
        form.set("sequence_number", auth.sequence_number.as_str());
        form.set("k4_sno", auth.k4_sno.to_string());
        form.set("encryption_algorithm", auth.encryption_algorithm.to_string());
        form
    }

    fn columns() -> &'static [&'static str] {
        &["IMSI", "PLMN ID", "K4 SNO", "Encryption Algorithm"]
    }

    fn row(record: &Subscriber) -> Vec<String> {
        vec![
            record.imsi.clone(),
            or_na(Some(&record.auth.plmn_id)),
            record.auth.k4_sno.to_string(),
            record.auth.encryption_algorithm.to_string(),
        ]
    }

    fn detail(record: &Subscriber) -> Vec<(&'static str, String)> {
        let auth = &record.auth;
        vec![
            ("IMSI", record.imsi.clone()),
            ("PLMN ID", or_na(Some(&auth.plmn_id))),
            ("Key (Ki)", or_na(Some(&auth.key))),
            ("OPc", or_na(Some(&auth.opc))),
            ("Sequence Number", or_na(Some(&auth.sequence_number))),
            ("K4 SNO", auth.k4_sno.to_string()),
            ("Encryption Algorithm", auth.encryption_algorithm.to_string()),
        ]
    }

    async fn fetch_all(api: &ApiClient) -> Result<Vec<Subscriber>, CoreError> {
        Ok(api.list_subscribers().await?)
    }

    async fn fetch_one(api: &ApiClient, key: &str) -> Result<Subscriber, CoreError> {
        Ok(api.get_subscriber(key).await?)
    }

    async fn create(api: &ApiClient, record: &Subscriber) -> Result<(), CoreError> {
        Ok(api.create_subscriber(&record.imsi, &record.auth).await?)
    }

    async fn update(api: &ApiClient, key: &str, record: &Subscriber) -> Result<(), CoreError> {
        Ok(api.update_subscriber(key, &record.auth).await?)
    }

    async fn delete(api: &ApiClient, key: &str) -> Result<(), CoreError> {
        Ok(api.delete_subscriber(key).await?)
    }
}

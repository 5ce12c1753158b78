use nfconsole_api::{ApiClient, Upf};

use super::{Resource, parse_field};
use crate::error::CoreError;
use crate::form::{FieldSpec, FormValues};
use crate::kind::ResourceKind;
use crate::validate::{self, Validation};
use crate::view::or_na;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("hostname", "Hostname").key().placeholder("upf.lab"),
    FieldSpec::text("ip", "IP Address").required().placeholder("192.168.1.200"),
    FieldSpec::integer("port", "Port", Some(1), Some(65_535)).required().placeholder("8805"),
    FieldSpec::text("dnn", "DNN").required().placeholder("internet"),
    FieldSpec::text("description", "Description"),
];

/// UPF inventory entries.
pub struct Upfs;

impl Resource for Upfs {
    type Record = Upf;

    const KIND: ResourceKind = ResourceKind::Upf;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn key(record: &Upf) -> String {
        record.hostname.clone()
    }

    fn validate(form: &FormValues) -> Validation {
        let mut v = Validation::new();
        v.require(form.get("hostname"), "UPF hostname is required");
        if v.require(form.get("ip"), "IP address is required") {
            v.check(validate::is_ipv4(form.get("ip")), "Invalid IP address format");
        }
        if v.require(form.get("port"), "Port is required") {
            v.check(validate::is_port(form.get("port")), "Port must be between 1 and 65535");
        }
        v.require(form.get("dnn"), "DNN is required");
        v
    }

    fn to_payload(form: &FormValues) -> Result<Upf, CoreError> {
        Ok(Upf {
            hostname: form.get("hostname").to_owned(),
            ip: form.get("ip").to_owned(),
            port: parse_field(form, "port", "Port")?,
            dnn: form.get("dnn").to_owned(),
            description: form.get("description").to_owned(),
        })
    }

    fn from_payload(record: &Upf) -> FormValues {
        let mut form = FormValues::new();
        form.set("hostname", record.hostname.as_str());
        form.set("ip", record.ip.as_str());
        form.set("port", record.port.to_string());
        form.set("dnn", record.dnn.as_str());
        form.set("description", record.description.as_str());
        form
    }

    fn columns() -> &'static [&'static str] {
        &["Hostname", "IP Address", "Port", "DNN"]
    }

    fn row(record: &Upf) -> Vec<String> {
        vec![
            record.hostname.clone(),
            or_na(Some(&record.ip)),
            record.port.to_string(),
            or_na(Some(&record.dnn)),
        ]
    }

    fn detail(record: &Upf) -> Vec<(&'static str, String)> {
        let mut fields: Vec<_> = Self::columns().iter().copied().zip(Self::row(record)).collect();
        fields.push(("Description", or_na(Some(&record.description))));
        fields
    }

    async fn fetch_all(api: &ApiClient) -> Result<Vec<Upf>, CoreError> {
        Ok(api.list_upfs().await?)
    }

    async fn fetch_one(api: &ApiClient, key: &str) -> Result<Upf, CoreError> {
        Ok(api.get_upf(key).await?)
    }

    async fn create(api: &ApiClient, record: &Upf) -> Result<(), CoreError> {
        Ok(api.create_upf(record).await?)
    }

    async fn update(api: &ApiClient, key: &str, record: &Upf) -> Result<(), CoreError> {
        Ok(api.update_upf(key, record).await?)
    }

    async fn delete(api: &ApiClient, key: &str) -> Result<(), CoreError> {
        Ok(api.delete_upf(key).await?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use serde_json::json;

    use super::*;
    use crate::resource::test_support::form;

    #[test]
    fn payload_uses_upf_hostname() {
        let input = form(&[
            ("hostname", "upf.lab"),
            ("ip", "192.168.1.200"),
            ("port", "8805"),
            ("dnn", "internet"),
        ]);
        assert!(Upfs::validate(&input).is_valid());
        assert_eq!(
            serde_json::to_value(Upfs::to_payload(&input).unwrap()).unwrap(),
            json!({
                "upf-hostname": "upf.lab",
                "ip": "192.168.1.200",
                "port": 8805,
                "dnn": "internet",
                "description": ""
            })
        );
    }

    #[test]
    fn each_rule_reports_once() {
        let v = Upfs::validate(&form(&[("ip", "300.1.1.1"), ("port", "70000")]));
        assert_eq!(
            v.errors,
            [
                "UPF hostname is required",
                "Invalid IP address format",
                "Port must be between 1 and 65535",
                "DNN is required",
            ]
        );
        let v = Upfs::validate(&form(&[("hostname", "u")]));
        assert_eq!(
            v.errors,
            ["IP address is required", "Port is required", "DNN is required"]
        );
    }
}

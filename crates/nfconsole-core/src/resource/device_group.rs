use nfconsole_api::{ApiClient, DeviceGroup, IpDomainExpanded, UeDnnQos};

use super::{Resource, parse_opt_field};
use crate::error::CoreError;
use crate::form::{FieldSpec, FormValues};
use crate::kind::ResourceKind;
use crate::validate::{self, Validation};
use crate::view::or_na;

pub const BITRATE_UNITS: &[&str] = &["bps", "Kbps", "Mbps", "Gbps"];

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("group_name", "Group Name").key().placeholder("site1"),
    FieldSpec::lines("imsis", "IMSIs").help("15-digit IMSIs"),
    FieldSpec::text("site_info", "Site Info").placeholder("site1"),
    FieldSpec::text("ip_domain_name", "IP Domain Name").placeholder("pool1"),
    FieldSpec::text("dnn", "DNN").placeholder("internet"),
    FieldSpec::text("ue_ip_pool", "UE IP Pool").placeholder("172.250.0.0/16"),
    FieldSpec::text("dns_primary", "Primary DNS").placeholder("8.8.8.8"),
    FieldSpec::text("dns_secondary", "Secondary DNS").placeholder("8.8.4.4"),
    FieldSpec::integer("mtu", "MTU", Some(1200), Some(9000)).placeholder("1460"),
    FieldSpec::integer("dnn_mbr_uplink", "DNN MBR Uplink", Some(0), None),
    FieldSpec::integer("dnn_mbr_downlink", "DNN MBR Downlink", Some(0), None),
    FieldSpec::choice("bitrate_unit", "Bitrate Unit", BITRATE_UNITS),
];

/// Device groups: a named set of IMSIs plus the IP domain they attach to.
pub struct DeviceGroups;

impl Resource for DeviceGroups {
    type Record = DeviceGroup;

    const KIND: ResourceKind = ResourceKind::DeviceGroup;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn key(record: &DeviceGroup) -> String {
        record.group_name.clone()
    }

    fn validate(form: &FormValues) -> Validation {
        let mut v = Validation::new();
        v.require(form.get("group_name"), "Group name is required");

        for imsi in form.lines("imsis") {
            v.check(
                validate::is_imsi(&imsi),
                format!("Invalid IMSI format: {imsi}. IMSIs must be exactly 15 digits"),
            );
        }
        if let Some(pool) = form.opt("ue_ip_pool") {
            v.check(
                validate::is_cidr(pool),
                "UE IP Pool must be in CIDR format (e.g., 172.250.0.0/16)",
            );
        }
        if let Some(dns) = form.opt("dns_primary") {
            v.check(validate::is_ipv4(dns), "Primary DNS must be a valid IP address");
        }
        if let Some(dns) = form.opt("dns_secondary") {
            v.check(validate::is_ipv4(dns), "Secondary DNS must be a valid IP address");
        }
        if let Some(mtu) = form.opt("mtu") {
            v.check(validate::is_mtu(mtu), "MTU must be between 1200 and 9000");
        }
        if let Some(up) = form.opt("dnn_mbr_uplink") {
            v.check(
                validate::is_non_negative(up),
                "DNN MBR uplink must be a non-negative number",
            );
        }
        if let Some(down) = form.opt("dnn_mbr_downlink") {
            v.check(
                validate::is_non_negative(down),
                "DNN MBR downlink must be a non-negative number",
            );
        }
        if let Some(unit) = form.opt("bitrate_unit") {
            v.check(
                BITRATE_UNITS.contains(&unit),
                format!("Bitrate unit must be one of {}", BITRATE_UNITS.join(", ")),
            );
        }
        v
    }

    fn to_payload(form: &FormValues) -> Result<DeviceGroup, CoreError> {
        let qos = UeDnnQos {
            dnn_mbr_uplink: parse_opt_field(form, "dnn_mbr_uplink", "DNN MBR uplink")?,
            dnn_mbr_downlink: parse_opt_field(form, "dnn_mbr_downlink", "DNN MBR downlink")?,
            bitrate_unit: form.opt("bitrate_unit").map(str::to_owned),
        };
        let expanded = IpDomainExpanded {
            dnn: form.opt("dnn").map(str::to_owned),
            ue_ip_pool: form.opt("ue_ip_pool").map(str::to_owned),
            dns_primary: form.opt("dns_primary").map(str::to_owned),
            dns_secondary: form.opt("dns_secondary").map(str::to_owned),
            mtu: parse_opt_field(form, "mtu", "MTU")?,
            ue_dnn_qos: Some(qos).filter(|q| !q.is_empty()),
        };

        Ok(DeviceGroup {
            group_name: form.get("group_name").to_owned(),
            imsis: form.lines("imsis"),
            site_info: form.opt("site_info").map(str::to_owned),
            ip_domain_name: form.opt("ip_domain_name").map(str::to_owned),
            ip_domain_expanded: Some(expanded).filter(|e| !e.is_empty()),
        })
    }

    fn from_payload(record: &DeviceGroup) -> FormValues {
        let mut form = FormValues::new();
        form.set("group_name", record.group_name.as_str());
        form.set_lines("imsis", &record.imsis);
        form.set_opt("site_info", record.site_info.as_deref());
        form.set_opt("ip_domain_name", record.ip_domain_name.as_deref());

        if let Some(ex) = &record.ip_domain_expanded {
            form.set_opt("dnn", ex.dnn.as_deref());
            form.set_opt("ue_ip_pool", ex.ue_ip_pool.as_deref());
            form.set_opt("dns_primary", ex.dns_primary.as_deref());
            form.set_opt("dns_secondary", ex.dns_secondary.as_deref());
            form.set_opt("mtu", ex.mtu.map(|m| m.to_string()));
            if let Some(qos) = &ex.ue_dnn_qos {
                form.set_opt("dnn_mbr_uplink", qos.dnn_mbr_uplink.map(|n| n.to_string()));
                form.set_opt("dnn_mbr_downlink", qos.dnn_mbr_downlink.map(|n| n.to_string()));
                form.set_opt("bitrate_unit", qos.bitrate_unit.as_deref());
            }
        }
        form
    }

    fn columns() -> &'static [&'static str] {
        &["Group Name", "IMSIs", "Site Info", "IP Domain"]
    }

    fn row(record: &DeviceGroup) -> Vec<String> {
        vec![
            record.group_name.clone(),
            imsi_summary(&record.imsis),
            or_na(record.site_info.as_deref()),
            or_na(record.ip_domain_name.as_deref()),
        ]
    }

    fn detail(record: &DeviceGroup) -> Vec<(&'static str, String)> {
        let ex = record.ip_domain_expanded.clone().unwrap_or_default();
        let qos = ex.ue_dnn_qos.clone().unwrap_or_default();
        let unit = qos.bitrate_unit.as_deref().unwrap_or("");
        let rate = |n: Option<u64>| n.map_or_else(|| "N/A".to_owned(), |n| format!("{n} {unit}").trim_end().to_owned());

        vec![
            ("Group Name", record.group_name.clone()),
            ("IMSIs", or_na(Some(&record.imsis.join(", ")))),
            ("Site Info", or_na(record.site_info.as_deref())),
            ("IP Domain Name", or_na(record.ip_domain_name.as_deref())),
            ("DNN", or_na(ex.dnn.as_deref())),
            ("UE IP Pool", or_na(ex.ue_ip_pool.as_deref())),
            ("Primary DNS", or_na(ex.dns_primary.as_deref())),
            ("Secondary DNS", or_na(ex.dns_secondary.as_deref())),
            ("MTU", ex.mtu.map_or_else(|| "N/A".to_owned(), |m| m.to_string())),
            ("MBR Uplink", rate(qos.dnn_mbr_uplink)),
            ("MBR Downlink", rate(qos.dnn_mbr_downlink)),
        ]
    }

    async fn fetch_all(api: &ApiClient) -> Result<Vec<DeviceGroup>, CoreError> {
        let names = api.list_device_groups().await?;
        let mut groups = Vec::with_capacity(names.len());
        for name in names {
            groups.push(api.get_device_group(&name).await?);
        }
        Ok(groups)
    }

    async fn fetch_one(api: &ApiClient, key: &str) -> Result<DeviceGroup, CoreError> {
        Ok(api.get_device_group(key).await?)
    }

    async fn create(api: &ApiClient, record: &DeviceGroup) -> Result<(), CoreError> {
        Ok(api.create_device_group(record).await?)
    }

    async fn update(api: &ApiClient, key: &str, record: &DeviceGroup) -> Result<(), CoreError> {
        Ok(api.update_device_group(key, record).await?)
    }

    async fn delete(api: &ApiClient, key: &str) -> Result<(), CoreError> {
        Ok(api.delete_device_group(key).await?)
    }
}

/// "3 IMSIs: a, b, c..." style summary for the list view.
fn imsi_summary(imsis: &[String]) -> String {
    match imsis.len() {
        0 => "0 IMSIs".into(),
        n => {
            let shown = imsis.iter().take(3).cloned().collect::<Vec<_>>().join(", ");
            let more = if n > 3 { "..." } else { "" };
            format!("{n} IMSIs: {shown}{more}")
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::resource::test_support::form;

    #[test]
    fn minimal_group_payload_has_no_ip_domain() {
        let input = form(&[
            ("group_name", "site1"),
            ("imsis", "001010000000001\n001010000000002"),
        ]);
        assert!(DeviceGroups::validate(&input).is_valid());

        let payload = DeviceGroups::to_payload(&input).unwrap();
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            json!({"group-name": "site1", "imsis": ["001010000000001", "001010000000002"]})
        );
    }

    #[test]
    fn ip_domain_fields_nest_under_expanded() {
        let input = form(&[
            ("group_name", "site1"),
            ("dnn", "internet"),
            ("ue_ip_pool", "172.250.0.0/16"),
            ("dns_primary", "8.8.8.8"),
            ("mtu", "1460"),
            ("dnn_mbr_uplink", "200"),
            ("bitrate_unit", "Mbps"),
        ]);
        let payload = DeviceGroups::to_payload(&input).unwrap();
        insta::assert_json_snapshot!(payload, @r#"
        {
          "group-name": "site1",
          "imsis": [],
          "ip-domain-expanded": {
            "dnn": "internet",
            "ue-ip-pool": "172.250.0.0/16",
            "dns-primary": "8.8.8.8",
            "mtu": 1460,
            "ue-dnn-qos": {
              "dnn-mbr-uplink": 200,
              "bitrate-unit": "Mbps"
            }
          }
        }
        "#);
    }

    #[test]
    fn validation_reports_each_bad_field() {
        let input = form(&[
            ("imsis", "001010000000001\n12345"),
            ("ue_ip_pool", "172.250.0.0"),
            ("dns_primary", "8.8.8"),
            ("mtu", "100"),
        ]);
        let v = DeviceGroups::validate(&input);
        assert_eq!(
            v.errors,
            [
                "Group name is required",
                "Invalid IMSI format: 12345. IMSIs must be exactly 15 digits",
                "UE IP Pool must be in CIDR format (e.g., 172.250.0.0/16)",
                "Primary DNS must be a valid IP address",
                "MTU must be between 1200 and 9000",
            ]
        );
    }

    #[test]
    fn round_trip_preserves_entered_values() {
        let input = form(&[
            ("group_name", "site1"),
            ("imsis", "001010000000001\n001010000000002"),
            ("site_info", "lab"),
            ("ip_domain_name", "pool1"),
            ("dnn", "internet"),
            ("ue_ip_pool", "172.250.0.0/16"),
            ("dns_primary", "8.8.8.8"),
            ("dns_secondary", "8.8.4.4"),
            ("mtu", "1460"),
            ("dnn_mbr_uplink", "200"),
            ("dnn_mbr_downlink", "100"),
            ("bitrate_unit", "Mbps"),
        ]);
        let back = DeviceGroups::from_payload(&DeviceGroups::to_payload(&input).unwrap());
        for (id, value) in input.iter() {
            assert_eq!(back.get(id), value, "field {id}");
        }
    }

    #[test]
    fn list_row_summarizes_imsis() {
        let group = DeviceGroup {
            group_name: "site1".into(),
            imsis: (1..=4).map(|i| format!("00101000000000{i}")).collect(),
            ..DeviceGroup::default()
        };
        let row = DeviceGroups::row(&group);
        assert_eq!(row[1], "4 IMSIs: 001010000000001, 001010000000002, 001010000000003...");
        assert_eq!(row[2], "N/A");
    }
}

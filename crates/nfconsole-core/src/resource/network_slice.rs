use indexmap::IndexMap;
use nfconsole_api::{ApiClient, GNodeB, NetworkSlice, Plmn, SiteInfo, SliceId};

use super::Resource;
use crate::error::CoreError;
use crate::form::{FieldSpec, FormValues};
use crate::kind::ResourceKind;
use crate::validate::{self, TAC_MAX, Validation};
use crate::view::or_na;

/// Hidden form entry carrying the record's filtering rules across an edit.
pub const FILTERING_RULES_FIELD: &str = "application_filtering_rules";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::text("slice_name", "Slice Name").key().placeholder("slice-1"),
    FieldSpec::integer("sst", "SST", Some(0), Some(255)).required().placeholder("1"),
    FieldSpec::text("sd", "SD").placeholder("010203").help("6 hex digits, or blank"),
    FieldSpec::reference("device_groups", "Device Groups", ResourceKind::DeviceGroup),
    FieldSpec::text("site_name", "Site Name").required().placeholder("site1"),
    FieldSpec::text("mcc", "MCC").required().placeholder("001"),
    FieldSpec::text("mnc", "MNC").required().placeholder("01"),
    FieldSpec::text("tac", "TAC").required().placeholder("1"),
    FieldSpec::lines("gnodebs", "gNodeBs").help("Entries as name:tac; TAC defaults to 1"),
    FieldSpec::lines("upfs", "UPFs").help("UPF hostnames"),
];

/// Network slices: S-NSSAI plus the site (PLMN, radios, gateways) it serves.
pub struct NetworkSlices;

impl Resource for NetworkSlices {
    type Record = NetworkSlice;

    const KIND: ResourceKind = ResourceKind::NetworkSlice;

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn key(record: &NetworkSlice) -> String {
        record.slice_name.clone()
    }

    fn validate(form: &FormValues) -> Validation {
        let mut v = Validation::new();
        v.require(form.get("slice_name"), "Slice name is required");
        if v.require(form.get("sst"), "SST (Slice Service Type) is required") {
            v.check(
                validate::is_sst(form.get("sst")),
                "SST must be a number between 0 and 255",
            );
        }
        v.check(
            validate::is_sd(form.get("sd")),
            "SD must be exactly 6 hexadecimal digits (e.g., 000001)",
        );
        v.require(form.get("site_name"), "Site name is required");
        v.check(validate::is_mcc(form.get("mcc")), "MCC must be exactly 3 digits");
        v.check(validate::is_mnc(form.get("mnc")), "MNC must be 2 or 3 digits");
        v.require(form.get("tac"), "TAC (Tracking Area Code) is required");

        for line in form.lines("gnodebs") {
            match split_gnodeb(&line) {
                Some((_, tac)) if validate::is_tac(tac) => {}
                Some((name, _)) => v.push(format!(
                    "gNodeB {name}: TAC must be between 1 and {TAC_MAX}"
                )),
                None => v.push(format!("Invalid gNodeB entry: {line}. Use name:tac")),
            }
        }
        if let Some(rules) = form.opt(FILTERING_RULES_FIELD) {
            v.check(
                serde_json::from_str::<Vec<serde_json::Value>>(rules).is_ok(),
                "Application filtering rules must be a JSON array",
            );
        }
        v
    }

    fn to_payload(form: &FormValues) -> Result<NetworkSlice, CoreError> {
        let gnodebs = form
            .lines("gnodebs")
            .iter()
            .map(|line| {
                let (name, tac) = split_gnodeb(line)
                    .ok_or_else(|| CoreError::invalid(format!("Invalid gNodeB entry: {line}")))?;
                let tac = tac
                    .parse()
                    .map_err(|_| CoreError::invalid(format!("gNodeB {name}: TAC must be a number")))?;
                Ok(GNodeB {
                    name: name.to_owned(),
                    tac,
                })
            })
            .collect::<Result<Vec<_>, CoreError>>()?;

        let upf: IndexMap<String, serde_json::Value> = form
            .lines("upfs")
            .into_iter()
            .map(|host| (host, serde_json::json!({})))
            .collect();

        let application_filtering_rules = match form.opt(FILTERING_RULES_FIELD) {
            Some(raw) => serde_json::from_str(raw).map_err(|e| CoreError::Payload {
                message: format!("application filtering rules: {e}"),
            })?,
            None => Vec::new(),
        };

        Ok(NetworkSlice {
            slice_name: form.get("slice_name").to_owned(),
            slice_id: SliceId {
                sst: form.get("sst").to_owned(),
                sd: form.get("sd").to_owned(),
            },
            site_device_group: form.lines("device_groups"),
            site_info: SiteInfo {
                site_name: form.get("site_name").to_owned(),
                plmn: Plmn {
                    mcc: form.get("mcc").to_owned(),
                    mnc: form.get("mnc").to_owned(),
                    tac: form.opt("tac").map(str::to_owned),
                },
                gnodebs,
                upf,
            },
            application_filtering_rules,
        })
    }

    fn from_payload(record: &NetworkSlice) -> FormValues {
        let site = &record.site_info;
        let mut form = FormValues::new();
        form.set("slice_name", record.slice_name.as_str());
        form.set("sst", record.slice_id.sst.as_str());
        form.set("sd", record.slice_id.sd.as_str());
        form.set_lines("device_groups", &record.site_device_group);
        form.set("site_name", site.site_name.as_str());
        form.set("mcc", site.plmn.mcc.as_str());
        form.set("mnc", site.plmn.mnc.as_str());
        form.set_opt("tac", site.plmn.tac.as_deref());
        form.set_lines(
            "gnodebs",
            site.gnodebs.iter().map(|g| format!("{}:{}", g.name, g.tac)),
        );
        form.set_lines("upfs", site.upf.keys());
        if !record.application_filtering_rules.is_empty() {
            form.set(
                FILTERING_RULES_FIELD,
                serde_json::Value::Array(record.application_filtering_rules.clone()).to_string(),
            );
        }
        form
    }

    fn columns() -> &'static [&'static str] {
        &["Slice Name", "SST", "SD", "Site", "Device Groups"]
    }

    fn row(record: &NetworkSlice) -> Vec<String> {
        vec![
            record.slice_name.clone(),
            or_na(Some(&record.slice_id.sst)),
            or_na(Some(&record.slice_id.sd)),
            or_na(Some(&record.site_info.site_name)),
            or_na(Some(&record.site_device_group.join(", "))),
        ]
    }

    fn detail(record: &NetworkSlice) -> Vec<(&'static str, String)> {
        let site = &record.site_info;
        let gnbs = site
            .gnodebs
            .iter()
            .map(|g| format!("{} (TAC {})", g.name, g.tac))
            .collect::<Vec<_>>()
            .join(", ");
        let upfs = site.upf.keys().cloned().collect::<Vec<_>>().join(", ");

        vec![
            ("Slice Name", record.slice_name.clone()),
            ("SST", or_na(Some(&record.slice_id.sst))),
            ("SD", or_na(Some(&record.slice_id.sd))),
            ("Device Groups", or_na(Some(&record.site_device_group.join(", ")))),
            ("Site Name", or_na(Some(&site.site_name))),
            ("MCC", or_na(Some(&site.plmn.mcc))),
            ("MNC", or_na(Some(&site.plmn.mnc))),
            ("TAC", or_na(site.plmn.tac.as_deref())),
            ("gNodeBs", or_na(Some(&gnbs))),
            ("UPFs", or_na(Some(&upfs))),
            (
                "Filtering Rules",
                record.application_filtering_rules.len().to_string(),
            ),
        ]
    }

    async fn fetch_all(api: &ApiClient) -> Result<Vec<NetworkSlice>, CoreError> {
        let names = api.list_network_slices().await?;
        let mut slices = Vec::with_capacity(names.len());
        for name in names {
            slices.push(api.get_network_slice(&name).await?);
        }
        Ok(slices)
    }

    async fn fetch_one(api: &ApiClient, key: &str) -> Result<NetworkSlice, CoreError> {
        Ok(api.get_network_slice(key).await?)
    }

    async fn create(api: &ApiClient, record: &NetworkSlice) -> Result<(), CoreError> {
        Ok(api.create_network_slice(record).await?)
    }

    async fn update(api: &ApiClient, key: &str, record: &NetworkSlice) -> Result<(), CoreError> {
        Ok(api.update_network_slice(key, record).await?)
    }

    async fn delete(api: &ApiClient, key: &str) -> Result<(), CoreError> {
        Ok(api.delete_network_slice(key).await?)
    }
}

/// TAC given to a gNodeB entered without one. The form reads it back as
/// `name:1`, so a bare name comes back in its explicit form.
const DEFAULT_GNODEB_TAC: &str = "1";

/// Split a `name:tac` gNodeB line; a bare name gets [`DEFAULT_GNODEB_TAC`].
fn split_gnodeb(line: &str) -> Option<(&str, &str)> {
    let (name, tac) = match line.split_once(':') {
        Some((name, tac)) => (name.trim(), tac.trim()),
        None => (line.trim(), DEFAULT_GNODEB_TAC),
    };
    (!name.is_empty()).then_some((name, tac))
}

// Wire models for the configuration and subscriber APIs.
//
// Field names follow the server's JSON exactly (kebab-case on the config
// API, camelCase / snake_case on the subscriber API). Optional members are
// skipped when absent so payloads only carry what the user entered.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

// ── Device groups ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceGroup {
    #[serde(rename = "group-name")]
    pub group_name: String,
    #[serde(default)]
    pub imsis: Vec<String>,
    #[serde(rename = "site-info", default, skip_serializing_if = "Option::is_none")]
    pub site_info: Option<String>,
    #[serde(rename = "ip-domain-name", default, skip_serializing_if = "Option::is_none")]
    pub ip_domain_name: Option<String>,
    #[serde(rename = "ip-domain-expanded", default, skip_serializing_if = "Option::is_none")]
    pub ip_domain_expanded: Option<IpDomainExpanded>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct IpDomainExpanded {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ue_ip_pool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_primary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_secondary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtu: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ue_dnn_qos: Option<UeDnnQos>,
}

impl IpDomainExpanded {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UeDnnQos {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnn_mbr_uplink: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dnn_mbr_downlink: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bitrate_unit: Option<String>,
}

impl UeDnnQos {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

// ── Network slices ───────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkSlice {
    pub slice_name: String,
    #[serde(default)]
    pub slice_id: SliceId,
    #[serde(default)]
    pub site_device_group: Vec<String>,
    #[serde(default)]
    pub site_info: SiteInfo,
    /// Opaque to the console; preserved across edits.
    #[serde(default)]
    pub application_filtering_rules: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceId {
    /// The server stores SST as a string; numbers are accepted on read.
    #[serde(default, deserialize_with = "string_or_number")]
    pub sst: String,
    #[serde(default)]
    pub sd: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SiteInfo {
    #[serde(rename = "site-name", default)]
    pub site_name: String,
    #[serde(default)]
    pub plmn: Plmn,
    #[serde(rename = "gNodeBs", default)]
    pub gnodebs: Vec<GNodeB>,
    /// UPF hostname → UPF attributes (usually an empty object).
    #[serde(default)]
    pub upf: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plmn {
    #[serde(default)]
    pub mcc: String,
    #[serde(default)]
    pub mnc: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_string_or_number")]
    pub tac: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GNodeB {
    pub name: String,
    #[serde(deserialize_with = "number_or_string")]
    pub tac: u32,
}

// ── Inventory ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gnb {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "opt_number_or_string")]
    pub tac: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upf {
    #[serde(rename = "upf-hostname", alias = "hostname")]
    pub hostname: String,
    #[serde(default)]
    pub ip: String,
    #[serde(default, deserialize_with = "number_or_string")]
    pub port: u16,
    #[serde(default)]
    pub dnn: String,
    #[serde(default)]
    pub description: String,
}

// ── K4 keys ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct K4Key {
    pub k4_sno: u8,
    pub k4: String,
    /// Key label used by the key store; part of the delete route when set.
    #[serde(rename = "identifier", default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

// ── Subscribers ──────────────────────────────────────────────────────

/// Flat subscriber payload, the shape written on create/update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriberAuth {
    #[serde(rename = "plmnID")]
    pub plmn_id: String,
    pub opc: String,
    pub key: String,
    #[serde(rename = "sequenceNumber")]
    pub sequence_number: String,
    pub k4_sno: u8,
    #[serde(rename = "encryptionAlgorithm")]
    pub encryption_algorithm: u32,
}

/// A subscriber as held by the console: the IMSI plus its credentials.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub imsi: String,
    #[serde(flatten)]
    pub auth: SubscriberAuth,
}

/// Either subscriber shape the server has been seen to return.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum SubscriberRecord {
    Nested(NestedSubscriber),
    Flat(FlatSubscriber),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct FlatSubscriber {
    #[serde(rename = "plmnID", default)]
    plmn_id: String,
    #[serde(default)]
    opc: String,
    #[serde(default)]
    key: String,
    #[serde(rename = "sequenceNumber", default, deserialize_with = "string_or_number")]
    sequence_number: String,
    #[serde(default)]
    k4_sno: u8,
    #[serde(rename = "encryptionAlgorithm", default)]
    encryption_algorithm: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NestedSubscriber {
    #[serde(rename = "plmnID", default)]
    plmn_id: String,
    #[serde(rename = "authenticationSubscription", alias = "AuthenticationSubscription")]
    auth: AuthenticationSubscription,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthenticationSubscription {
    #[serde(default)]
    permanent_key: PermanentKey,
    #[serde(default)]
    opc: Opc,
    #[serde(default, deserialize_with = "string_or_number")]
    sequence_number: String,
    #[serde(rename = "k4_sno", default)]
    k4_sno: u8,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PermanentKey {
    #[serde(default)]
    permanent_key_value: String,
    #[serde(default)]
    encryption_algorithm: u32,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Opc {
    #[serde(default)]
    opc_value: String,
}

impl SubscriberRecord {
    pub(crate) fn into_auth(self) -> SubscriberAuth {
        match self {
            Self::Flat(f) => SubscriberAuth {
                plmn_id: f.plmn_id,
                opc: f.opc,
                key: f.key,
                sequence_number: f.sequence_number,
                k4_sno: f.k4_sno,
                encryption_algorithm: f.encryption_algorithm,
            },
            Self::Nested(n) => SubscriberAuth {
                plmn_id: n.plmn_id,
                opc: n.auth.opc.opc_value,
                key: n.auth.permanent_key.permanent_key_value,
                sequence_number: n.auth.sequence_number,
                k4_sno: n.auth.k4_sno,
                encryption_algorithm: n.auth.permanent_key.encryption_algorithm,
            },
        }
    }
}

// ── List entries ─────────────────────────────────────────────────────

/// A collection entry that is either a bare key or a full record.
///
/// Older servers list names only; newer ones return whole records.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum NameOrRecord {
    Name(String),
    Record(NamedRecord),
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct NamedRecord {
    #[serde(alias = "group-name", alias = "slice-name", alias = "ueId", alias = "imsi")]
    name: String,
}

impl NameOrRecord {
    pub(crate) fn into_name(self) -> String {
        match self {
            Self::Name(name) => name,
            Self::Record(record) => record.name,
        }
    }
}

/// Strip the `imsi-` prefix some servers put on subscriber ids.
pub(crate) fn bare_imsi(ue_id: &str) -> &str {
    ue_id.strip_prefix("imsi-").unwrap_or(ue_id)
}

// ── Lenient number / string decoding ────────────────────────────────

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Number(serde_json::Number),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

fn string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    StringOrNumber::deserialize(de).map(StringOrNumber::into_string)
}

fn opt_string_or_number<'de, D: Deserializer<'de>>(de: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<StringOrNumber>::deserialize(de)?.map(StringOrNumber::into_string))
}

fn number_or_string<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = StringOrNumber::deserialize(de)?.into_string();
    raw.trim().parse().map_err(serde::de::Error::custom)
}

fn opt_number_or_string<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match Option::<StringOrNumber>::deserialize(de)? {
        None => Ok(None),
        Some(v) => {
            let raw = v.into_string();
            if raw.trim().is_empty() {
                Ok(None)
            } else {
                raw.trim().parse().map(Some).map_err(serde::de::Error::custom)
            }
        }
    }
}

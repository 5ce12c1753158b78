// ── Resource kinds ──
//
// The closed set of entity types the console manages. Every command,
// row action and navigation target is tagged with one of these.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ResourceKind {
    #[default]
    DeviceGroup,
    NetworkSlice,
    Gnb,
    Upf,
    K4Key,
    Subscriber,
}

impl ResourceKind {
    /// All kinds in navigation order.
    pub const ALL: [Self; 6] = [
        Self::DeviceGroup,
        Self::NetworkSlice,
        Self::Gnb,
        Self::Upf,
        Self::K4Key,
        Self::Subscriber,
    ];

    /// Human label for a single entity ("Device Group").
    pub fn label(self) -> &'static str {
        match self {
            Self::DeviceGroup => "Device Group",
            Self::NetworkSlice => "Network Slice",
            Self::Gnb => "gNB",
            Self::Upf => "UPF",
            Self::K4Key => "K4 Key",
            Self::Subscriber => "Subscriber",
        }
    }

    /// Section title shown in navigation ("Device Groups").
    pub fn title(self) -> &'static str {
        match self {
            Self::DeviceGroup => "Device Groups",
            Self::NetworkSlice => "Network Slices",
            Self::Gnb => "gNB Inventory",
            Self::Upf => "UPF Inventory",
            Self::K4Key => "K4 Keys",
            Self::Subscriber => "Subscribers",
        }
    }

    /// Message shown when a section's list is empty.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::DeviceGroup => "No device groups found",
            Self::NetworkSlice => "No network slices found",
            Self::Gnb => "No gNBs found",
            Self::Upf => "No UPFs found",
            Self::K4Key => "No K4 keys found",
            Self::Subscriber => "No subscribers found",
        }
    }

    /// Next kind in navigation order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous kind in navigation order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&k| k == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn tags_are_kebab_case() {
        assert_eq!(ResourceKind::NetworkSlice.to_string(), "network-slice");
        assert_eq!(ResourceKind::from_str("k4-key").ok(), Some(ResourceKind::K4Key));
        assert!(ResourceKind::from_str("router").is_err());
    }

    #[test]
    fn navigation_wraps() {
        assert_eq!(ResourceKind::Subscriber.next(), ResourceKind::DeviceGroup);
        assert_eq!(ResourceKind::DeviceGroup.prev(), ResourceKind::Subscriber);
    }
}

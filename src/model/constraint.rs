//! Plan constraint value objects.
//!
//! A `Constraints` value is an immutable named set of plan limitations
//! attached to a plan or space. Sets are compared by value; an absent limit
//! means the resource is unrestricted and the capability guard abstains.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::capability::CapabilityError;

/// Names of the supported constraints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Total storage quota of the space, in bytes.
    StorageQuota,
    /// Monthly traffic quota, in GiB.
    MonthlyTraffic,
    /// Maximum number of mailboxes.
    MailboxCount,
    /// Maximum number of mail forwards.
    MailForwardCount,
    /// Maximum number of FTP users.
    FtpUserCount,
    /// Maximum number of sub-domains.
    SubDomainCount,
}

impl ConstraintKind {
    pub const ALL: [ConstraintKind; 6] = [
        ConstraintKind::StorageQuota,
        ConstraintKind::MonthlyTraffic,
        ConstraintKind::MailboxCount,
        ConstraintKind::MailForwardCount,
        ConstraintKind::FtpUserCount,
        ConstraintKind::SubDomainCount,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StorageQuota => "storage_quota",
            Self::MonthlyTraffic => "monthly_traffic",
            Self::MailboxCount => "mailbox_count",
            Self::MailForwardCount => "mail_forward_count",
            Self::FtpUserCount => "ftp_user_count",
            Self::SubDomainCount => "sub_domain_count",
        }
    }
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConstraintKind {
    type Err = CapabilityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| CapabilityError::UnknownConstraint {
                name: s.to_string(),
            })
    }
}

/// Immutable set of plan limits, compared by value.
///
/// Serialized as the JSON `constraints` column of plans and spaces; absent
/// fields are omitted so that an empty object means "no limits".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(default)]
pub struct Constraints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_quota: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_traffic: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mailbox_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mail_forward_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ftp_user_count: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub_domain_count: Option<i64>,
}

impl Constraints {
    /// Looks up the configured limit for a constraint, `None` when absent.
    pub fn get(&self, kind: ConstraintKind) -> Option<i64> {
        match kind {
            ConstraintKind::StorageQuota => self.storage_quota,
            ConstraintKind::MonthlyTraffic => self.monthly_traffic,
            ConstraintKind::MailboxCount => self.mailbox_count,
            ConstraintKind::MailForwardCount => self.mail_forward_count,
            ConstraintKind::FtpUserCount => self.ftp_user_count,
            ConstraintKind::SubDomainCount => self.sub_domain_count,
        }
    }

    /// Returns a copy with the given limit set. Builder-style, mainly for
    /// plan construction and tests.
    pub fn with(mut self, kind: ConstraintKind, limit: i64) -> Self {
        match kind {
            ConstraintKind::StorageQuota => self.storage_quota = Some(limit),
            ConstraintKind::MonthlyTraffic => self.monthly_traffic = Some(limit),
            ConstraintKind::MailboxCount => self.mailbox_count = Some(limit),
            ConstraintKind::MailForwardCount => self.mail_forward_count = Some(limit),
            ConstraintKind::FtpUserCount => self.ftp_user_count = Some(limit),
            ConstraintKind::SubDomainCount => self.sub_domain_count = Some(limit),
        }
        self
    }

    /// True when no limit is configured at all.
    pub fn is_unrestricted(&self) -> bool {
        ConstraintKind::ALL.iter().all(|kind| self.get(*kind).is_none())
    }

    /// Deserializes the JSON column value stored on a plan or space.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    /// Serializes into the JSON column value. A constraint set always
    /// serializes to a plain object, so this cannot fail.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_else(|_| serde_json::json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compares_by_value() {
        let a = Constraints::default()
            .with(ConstraintKind::MailboxCount, 10)
            .with(ConstraintKind::StorageQuota, 1024);
        let b = Constraints::default()
            .with(ConstraintKind::StorageQuota, 1024)
            .with(ConstraintKind::MailboxCount, 10);

        assert_eq!(a, b);
        assert_ne!(a, b.clone().with(ConstraintKind::MailboxCount, 11));
    }

    #[test]
    fn absent_limits_are_unrestricted() {
        let constraints = Constraints::default();

        assert!(constraints.is_unrestricted());
        assert_eq!(constraints.get(ConstraintKind::MailboxCount), None);
    }

    #[test]
    fn json_round_trip_omits_absent_fields() {
        let constraints = Constraints::default().with(ConstraintKind::FtpUserCount, 5);
        let json = constraints.to_json();

        assert_eq!(json, serde_json::json!({ "ftp_user_count": 5 }));
        assert_eq!(Constraints::from_json(&json).unwrap(), constraints);
    }

    #[test]
    fn unknown_constraint_name_is_rejected() {
        let err = "disk_platter_count".parse::<ConstraintKind>().unwrap_err();

        assert_eq!(
            err,
            CapabilityError::UnknownConstraint {
                name: "disk_platter_count".to_string()
            }
        );
    }

    #[test]
    fn parses_known_constraint_names() {
        for kind in ConstraintKind::ALL {
            assert_eq!(kind.as_str().parse::<ConstraintKind>().unwrap(), kind);
        }
    }
}

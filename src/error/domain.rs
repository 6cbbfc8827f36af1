//! Domain invariant violations.
//!
//! Every variant carries a stable translator message id plus structured
//! arguments so the client can render a localized message; the `Display`
//! implementation is the English fallback used in logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::dto::api::DomainErrorDto;

/// Entity blocking an organization removal or a domain-name transfer,
/// reported back to the client by kind and id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockingEntity {
    /// Entity kind, e.g. `space`, `domain_name`, `mailbox`.
    pub kind: String,
    pub id: Uuid,
    /// Human-readable label, e.g. the domain name or mailbox address.
    pub label: String,
}

impl BlockingEntity {
    pub fn new(kind: impl Into<String>, id: Uuid, label: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            id,
            label: label.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    /// Another user already registered with this email address.
    #[error("email address {email} is already in use by user {user_id}")]
    EmailAddressAlreadyInUse { email: String, user_id: Uuid },

    /// Reserved system/admin organizations can never be removed.
    #[error("organization {organization_id} is internal and cannot be removed")]
    CannotRemoveInternalOrganization { organization_id: Uuid },

    /// The organization still owns spaces or domain names.
    #[error("organization {organization_id} still owns {} active resource(s)", blocking.len())]
    CannotRemoveActiveOrganization {
        organization_id: Uuid,
        blocking: Vec<BlockingEntity>,
    },

    /// A primary domain name cannot move to another space while primary.
    #[error("domain name {domain_name_id} is primary for space {space_id} and cannot be transferred")]
    CannotTransferPrimaryDomainName { domain_name_id: Uuid, space_id: Uuid },

    /// A primary domain name cannot be removed while primary.
    #[error("domain name {domain_name_id} is primary for space {space_id} and cannot be removed")]
    CannotRemovePrimaryDomainName { domain_name_id: Uuid, space_id: Uuid },

    /// Dependent entities still reference the domain name under its current
    /// space. The list is capped for display; `truncated` marks the cap.
    #[error("domain name {domain_name_id} is still in use and cannot be transferred")]
    CannotTransferInUseDomainName {
        domain_name_id: Uuid,
        usages: Vec<BlockingEntity>,
        truncated: bool,
    },

    /// Same payload as the transfer variant, raised when the triggering
    /// operation was a removal.
    #[error("domain name {domain_name_id} is still in use and cannot be removed")]
    CannotRemoveInUseDomainName {
        domain_name_id: Uuid,
        usages: Vec<BlockingEntity>,
        truncated: bool,
    },

    /// The name/TLD pair is already registered.
    #[error("domain name {name}.{tld} is already registered")]
    DomainNameAlreadyRegistered { name: String, tld: String },

    /// The TLD does not appear on the public-suffix list.
    #[error("{tld} is not a known public suffix")]
    UnknownPublicSuffix { tld: String },

    /// The domain name is not assigned to the given space.
    #[error("domain name {domain_name_id} is not assigned to space {space_id}")]
    DomainNameNotAssignedToSpace { domain_name_id: Uuid, space_id: Uuid },

    /// The space was marked for removal and no longer accepts changes.
    #[error("space {space_id} is marked for removal")]
    SpaceMarkedForRemoval { space_id: Uuid },

    /// Mailbox or forward address already taken on this domain name.
    #[error("address {address}@{domain} already exists")]
    AddressAlreadyExists { address: String, domain: String },

    /// FTP username already taken on this domain name.
    #[error("FTP username {username} already exists on {domain}")]
    FtpUsernameAlreadyExists { username: String, domain: String },

    /// Sub-domain host label already taken on this domain name.
    #[error("sub-domain {host}.{domain} already exists")]
    SubDomainAlreadyExists { host: String, domain: String },

    /// The cron expression could not be parsed.
    #[error("invalid cron expression: {expression}")]
    InvalidCronExpression { expression: String },

    /// A space must be owned by exactly one user or organization.
    #[error("space owner must be exactly one of user or organization")]
    InvalidOwner,
}

impl DomainError {
    /// Stable message id for client-side translation.
    pub fn message_id(&self) -> &'static str {
        match self {
            Self::EmailAddressAlreadyInUse { .. } => "user.email_address_already_in_use",
            Self::CannotRemoveInternalOrganization { .. } => {
                "organization.cannot_remove_internal"
            }
            Self::CannotRemoveActiveOrganization { .. } => "organization.cannot_remove_active",
            Self::CannotTransferPrimaryDomainName { .. } => {
                "domain_name.cannot_transfer_primary"
            }
            Self::CannotRemovePrimaryDomainName { .. } => "domain_name.cannot_remove_primary",
            Self::CannotTransferInUseDomainName { .. } => "domain_name.cannot_transfer_in_use",
            Self::CannotRemoveInUseDomainName { .. } => "domain_name.cannot_remove_in_use",
            Self::DomainNameAlreadyRegistered { .. } => "domain_name.already_registered",
            Self::UnknownPublicSuffix { .. } => "domain_name.unknown_public_suffix",
            Self::DomainNameNotAssignedToSpace { .. } => "domain_name.not_assigned_to_space",
            Self::SpaceMarkedForRemoval { .. } => "space.marked_for_removal",
            Self::AddressAlreadyExists { .. } => "mailbox.address_already_exists",
            Self::FtpUsernameAlreadyExists { .. } => "ftp_user.username_already_exists",
            Self::SubDomainAlreadyExists { .. } => "sub_domain.already_exists",
            Self::InvalidCronExpression { .. } => "scheduled_task.invalid_cron_expression",
            Self::InvalidOwner => "space.invalid_owner",
        }
    }

    /// Structured arguments for the translated message.
    pub fn arguments(&self) -> serde_json::Value {
        match self {
            Self::EmailAddressAlreadyInUse { email, user_id } => {
                json!({ "email": email, "user_id": user_id })
            }
            Self::CannotRemoveInternalOrganization { organization_id } => {
                json!({ "organization_id": organization_id })
            }
            Self::CannotRemoveActiveOrganization {
                organization_id,
                blocking,
            } => json!({ "organization_id": organization_id, "blocking": blocking }),
            Self::CannotTransferPrimaryDomainName {
                domain_name_id,
                space_id,
            }
            | Self::CannotRemovePrimaryDomainName {
                domain_name_id,
                space_id,
            } => json!({ "domain_name_id": domain_name_id, "space_id": space_id }),
            Self::CannotTransferInUseDomainName {
                domain_name_id,
                usages,
                truncated,
            }
            | Self::CannotRemoveInUseDomainName {
                domain_name_id,
                usages,
                truncated,
            } => json!({
                "domain_name_id": domain_name_id,
                "usages": usages,
                "truncated": truncated,
            }),
            Self::DomainNameAlreadyRegistered { name, tld } => {
                json!({ "name": name, "tld": tld })
            }
            Self::UnknownPublicSuffix { tld } => json!({ "tld": tld }),
            Self::DomainNameNotAssignedToSpace {
                domain_name_id,
                space_id,
            } => json!({ "domain_name_id": domain_name_id, "space_id": space_id }),
            Self::SpaceMarkedForRemoval { space_id } => json!({ "space_id": space_id }),
            Self::AddressAlreadyExists { address, domain } => {
                json!({ "address": address, "domain": domain })
            }
            Self::FtpUsernameAlreadyExists { username, domain } => {
                json!({ "username": username, "domain": domain })
            }
            Self::SubDomainAlreadyExists { host, domain } => {
                json!({ "host": host, "domain": domain })
            }
            Self::InvalidCronExpression { expression } => json!({ "expression": expression }),
            Self::InvalidOwner => json!({}),
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Self::UnknownPublicSuffix { .. }
            | Self::InvalidCronExpression { .. }
            | Self::InvalidOwner => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::CONFLICT,
        }
    }
}

/// Maps domain errors to 409 Conflict (invariant violations) or 422
/// Unprocessable Entity (invalid input), with the translator payload in the
/// body.
impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = DomainErrorDto {
            error: self.to_string(),
            message_id: self.message_id().to_string(),
            arguments: self.arguments(),
        };

        (status, Json(body)).into_response()
    }
}

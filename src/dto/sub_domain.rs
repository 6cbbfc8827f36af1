use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SubDomainDto {
    pub id: Uuid,
    pub space_id: Uuid,
    pub domain_name_id: Uuid,
    pub host: String,
    pub document_root: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterSubDomainDto {
    pub domain_name_id: Uuid,
    pub host: String,
    pub document_root: Option<String>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScheduledTaskDto {
    pub id: Uuid,
    pub space_id: Uuid,
    pub schedule: String,
    pub command: String,
    pub enabled: bool,
    pub last_run_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct RegisterScheduledTaskDto {
    /// Five-field cron expression in UTC.
    pub schedule: String,
    pub command: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UpdateScheduledTaskDto {
    pub schedule: String,
    pub command: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SetEnabledDto {
    pub enabled: bool,
}

mod domain_name;
mod organization;
mod plan;
mod scheduled_task;
mod space;
mod user;

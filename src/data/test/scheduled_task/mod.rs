mod find_enabled;

use test_utils::builder::TestBuilder;
use test_utils::factory::{
    scheduled_task::ScheduledTaskFactory, space::create_space_for_user, user::create_user,
};

use crate::{data::scheduled_task::ScheduledTaskRepository, error::AppError};

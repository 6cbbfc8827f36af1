mod find_marked_before;
mod insert_find;

use test_utils::builder::TestBuilder;
use test_utils::factory::{
    organization::create_organization, plan::create_plan, space::SpaceFactory, user::create_user,
};

use crate::{data::space::SpaceRepository, error::AppError, model::owner::Owner};

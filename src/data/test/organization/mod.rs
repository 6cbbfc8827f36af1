mod find_internal;
mod upsert_member;

use test_utils::builder::TestBuilder;
use test_utils::factory::{organization::OrganizationFactory, user::create_user};

use crate::{
    data::organization::OrganizationRepository,
    error::AppError,
    model::organization::{AccessLevel, AddMemberParam},
};

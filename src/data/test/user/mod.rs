mod admin;
mod find_by_email;
mod insert;

use test_utils::builder::TestBuilder;

use crate::{
    data::user::UserRepository,
    error::AppError,
    model::user::User,
    util::hash::TestHashStrategy,
};

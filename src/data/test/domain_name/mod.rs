mod insert_find;

use test_utils::builder::TestBuilder;
use test_utils::factory::{
    domain_name::DomainNameFactory, space::create_space_for_user, user::create_user,
};

use crate::{data::domain_name::DomainNameRepository, error::AppError};

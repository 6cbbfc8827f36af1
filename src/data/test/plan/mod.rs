mod insert_update;

use test_utils::builder::TestBuilder;

use crate::{
    data::plan::PlanRepository,
    error::AppError,
    model::{
        constraint::{ConstraintKind, Constraints},
        plan::Plan,
    },
};

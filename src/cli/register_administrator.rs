//! Interactive administrator registration.
//!
//! Prompts for display name, email, and password on the terminal and runs
//! the same registration path as the HTTP API.

use std::io::{self, BufRead, Write};

use uuid::Uuid;

use crate::{
    error::AppError,
    model::user::RegisterUserParam,
    service::user::UserService,
    state::AppState,
};

pub async fn run(state: &AppState) -> Result<(), AppError> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let display_name = prompt(&mut lines, "Display name")?;
    let email = prompt(&mut lines, "Email address")?;
    let password = prompt(&mut lines, "Password")?;

    let user = UserService::new(state)
        .register(RegisterUserParam {
            id: Uuid::new_v4(),
            display_name,
            email,
            password,
            admin: true,
        })
        .await?;

    println!("Administrator registered with id {}", user.id);

    Ok(())
}

fn prompt(
    lines: &mut io::Lines<io::StdinLock<'_>>,
    label: &str,
) -> Result<String, AppError> {
    loop {
        print!("{label}: ");
        io::stdout()
            .flush()
            .map_err(|e| AppError::InternalError(format!("Failed to flush stdout: {e}")))?;

        let line = lines
            .next()
            .transpose()
            .map_err(|e| AppError::InternalError(format!("Failed to read input: {e}")))?
            .unwrap_or_default();

        let value = line.trim().to_string();
        if !value.is_empty() {
            return Ok(value);
        }

        println!("A value is required.");
    }
}

//! FTP user service.

use uuid::Uuid;

use crate::{
    data::{domain_name::DomainNameRepository, ftp_user::FtpUserRepository, space::SpaceRepository},
    error::{domain::DomainError, AppError},
    model::{
        constraint::ConstraintKind,
        ftp_user::{FtpUser, RegisterFtpUserParam},
        space::Space,
    },
    service::capability::GuardContext,
    state::AppState,
    util::password,
};

pub struct FtpUserService<'a> {
    state: &'a AppState,
}

impl<'a> FtpUserService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Registers an FTP user on one of the space's domain names.
    ///
    /// Capability-guarded against `ftp_user_count`; the username must be
    /// unique per domain name.
    pub async fn register(&self, param: RegisterFtpUserParam) -> Result<FtpUser, AppError> {
        let space = load_active_space(self.state, param.space_id).await?;
        let domain_name =
            ensure_domain_in_space(self.state, param.domain_name_id, param.space_id).await?;

        let ftp_users = FtpUserRepository::new(&self.state.db);
        if ftp_users
            .username_exists(param.domain_name_id, &param.username)
            .await?
        {
            return Err(DomainError::FtpUsernameAlreadyExists {
                username: param.username,
                domain: domain_name,
            }
            .into());
        }

        self.state
            .capability_guards
            .allows(
                &self.state.db,
                &space,
                ConstraintKind::FtpUserCount,
                &GuardContext::new(),
            )
            .await?;

        let ftp_user = FtpUser::register(
            param.id,
            param.space_id,
            param.domain_name_id,
            param.username,
            password::hash_password(&param.password)?,
        );
        ftp_users.insert(&ftp_user).await?;

        Ok(ftp_user)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<FtpUser>, AppError> {
        FtpUserRepository::new(&self.state.db).find_by_id(id).await
    }

    pub async fn list_by_space(&self, space_id: Uuid) -> Result<Vec<FtpUser>, AppError> {
        FtpUserRepository::new(&self.state.db)
            .find_by_space(space_id)
            .await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let ftp_users = FtpUserRepository::new(&self.state.db);

        if ftp_users.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("FTP user not found".to_string()));
        }

        ftp_users.delete(id).await
    }
}

/// Loads a space that still accepts changes.
pub(crate) async fn load_active_space(state: &AppState, space_id: Uuid) -> Result<Space, AppError> {
    let Some(space) = SpaceRepository::new(&state.db).find_by_id(space_id).await? else {
        return Err(AppError::NotFound("Space not found".to_string()));
    };

    space.ensure_active()?;

    Ok(space)
}

/// Verifies the domain name is assigned to the space; returns its FQDN for
/// error messages.
pub(crate) async fn ensure_domain_in_space(
    state: &AppState,
    domain_name_id: Uuid,
    space_id: Uuid,
) -> Result<String, AppError> {
    let Some(domain_name) = DomainNameRepository::new(&state.db)
        .find_by_id(domain_name_id)
        .await?
    else {
        return Err(AppError::NotFound("Domain name not found".to_string()));
    };

    if domain_name.space_id != Some(space_id) {
        return Err(DomainError::DomainNameNotAssignedToSpace {
            domain_name_id,
            space_id,
        }
        .into());
    }

    Ok(domain_name.fqdn())
}

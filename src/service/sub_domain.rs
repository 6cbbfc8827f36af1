//! Sub-domain service.

use uuid::Uuid;

use crate::{
    data::sub_domain::SubDomainRepository,
    error::{domain::DomainError, AppError},
    model::{
        constraint::ConstraintKind,
        sub_domain::{RegisterSubDomainParam, SubDomain},
    },
    service::{
        capability::GuardContext,
        ftp_user::{ensure_domain_in_space, load_active_space},
    },
    state::AppState,
};

pub struct SubDomainService<'a> {
    state: &'a AppState,
}

impl<'a> SubDomainService<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    /// Registers a sub-domain, capability-guarded against
    /// `sub_domain_count`; the host label must be unique per domain name.
    pub async fn register(&self, param: RegisterSubDomainParam) -> Result<SubDomain, AppError> {
        let space = load_active_space(self.state, param.space_id).await?;
        let domain =
            ensure_domain_in_space(self.state, param.domain_name_id, param.space_id).await?;

        let sub_domains = SubDomainRepository::new(&self.state.db);
        if sub_domains
            .host_exists(param.domain_name_id, &param.host)
            .await?
        {
            return Err(DomainError::SubDomainAlreadyExists {
                host: param.host,
                domain,
            }
            .into());
        }

        self.state
            .capability_guards
            .allows(
                &self.state.db,
                &space,
                ConstraintKind::SubDomainCount,
                &GuardContext::new(),
            )
            .await?;

        let sub_domain = SubDomain::register(
            param.id,
            param.space_id,
            param.domain_name_id,
            param.host,
            param.document_root,
        );
        sub_domains.insert(&sub_domain).await?;

        Ok(sub_domain)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<SubDomain>, AppError> {
        SubDomainRepository::new(&self.state.db).find_by_id(id).await
    }

    pub async fn list_by_space(&self, space_id: Uuid) -> Result<Vec<SubDomain>, AppError> {
        SubDomainRepository::new(&self.state.db)
            .find_by_space(space_id)
            .await
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        let sub_domains = SubDomainRepository::new(&self.state.db);

        if sub_domains.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound("Sub-domain not found".to_string()));
        }

        sub_domains.delete(id).await
    }
}

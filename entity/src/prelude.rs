pub use super::domain_name::Entity as DomainName;
pub use super::ftp_user::Entity as FtpUser;
pub use super::mail_forward::Entity as MailForward;
pub use super::mailbox::Entity as Mailbox;
pub use super::organization::Entity as Organization;
pub use super::organization_member::Entity as OrganizationMember;
pub use super::plan::Entity as Plan;
pub use super::scheduled_task::Entity as ScheduledTask;
pub use super::space::Entity as Space;
pub use super::sub_domain::Entity as SubDomain;
pub use super::user::Entity as User;
pub use super::user_token::Entity as UserToken;

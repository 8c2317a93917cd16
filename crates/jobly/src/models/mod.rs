//! Entity models. Every function takes `&impl GenericClient`, so it works on a
//! plain connection, a pooled connection or inside a transaction.

pub mod application;
pub mod company;
pub mod job;
pub mod user;

pub use application::Application;
pub use company::{Company, CompanyDetail, CompanyPatch, NewCompany};
pub use job::{Job, JobPatch, NewJob};
pub use user::{User, UserDetail, UserPatch};

//! Stateless authorization predicates composed by the job and response
//! lifecycles. Ownership is always decided against a freshly loaded row,
//! never a cached relation.

use crate::pkg::internal::{adaptors::jobs::spec::JobEntry, auth::User};

pub fn can_create_job(caller: &User) -> bool {
    caller.role.is_company()
}

pub fn can_mutate_job(caller: &User, job: &JobEntry) -> bool {
    caller.role.is_company() && caller.user_id == job.owner_user_id
}

pub fn can_submit_response(caller: &User) -> bool {
    !caller.role.is_company()
}

pub fn can_list_responses(caller: &User, job: &JobEntry) -> bool {
    caller.role.is_company() && caller.user_id == job.owner_user_id
}

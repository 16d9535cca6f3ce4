//! Job lifecycle: creation, listing, update and soft deactivation.
//!
//! Jobs are never physically deleted. Deactivation is a one-way transition;
//! an inactive job rejects every further mutation with a conflict.

use sqlx::PgConnection;

use crate::{
    errors::Error,
    pkg::{
        internal::{
            adaptors::jobs::{mutators::JobMutator, selectors::JobSelector, spec::JobEntry},
            auth::User,
            policy,
        },
        server::handlers::jobs::{CreateJobInput, UpdateJobInput},
    },
    prelude::Result,
};

pub fn validate_salary_range(salary_from: Option<f64>, salary_to: Option<f64>) -> Result<()> {
    for bound in [salary_from, salary_to].into_iter().flatten() {
        if bound < 0.0 {
            return Err(Error::Validation("salary bounds must be non-negative".into()));
        }
    }
    if let (Some(from), Some(to)) = (salary_from, salary_to) {
        if to < from {
            return Err(Error::Validation(format!(
                "salary_to {to} is below salary_from {from}"
            )));
        }
    }
    Ok(())
}

fn ensure_can_mutate(caller: &User, job: &JobEntry) -> Result<()> {
    if !policy::can_mutate_job(caller, job) {
        return Err(Error::Forbidden("caller does not own this job"));
    }
    if !job.is_active {
        return Err(Error::Conflict("job is not active"));
    }
    Ok(())
}

pub async fn create(
    conn: &mut PgConnection,
    caller: &User,
    input: &CreateJobInput,
) -> Result<JobEntry> {
    if !policy::can_create_job(caller) {
        return Err(Error::Forbidden("only companies can create jobs"));
    }
    validate_salary_range(input.salary_from, input.salary_to)?;
    let job = JobMutator::new(conn).create(&caller.user_id, input).await?;
    tracing::info!(job_id = job.id, owner = %job.owner_user_id, "created job");
    Ok(job)
}

pub async fn list(conn: &mut PgConnection, limit: i64, offset: i64) -> Result<Vec<JobEntry>> {
    JobSelector::new(conn).get_page(limit, offset).await
}

pub async fn get(conn: &mut PgConnection, id: i32) -> Result<JobEntry> {
    JobSelector::new(conn)
        .get_by_id(id)
        .await?
        .ok_or(Error::NotFound("job"))
}

pub async fn update(
    conn: &mut PgConnection,
    caller: &User,
    input: &UpdateJobInput,
) -> Result<JobEntry> {
    validate_salary_range(input.salary_from, input.salary_to)?;
    let job = get(&mut *conn, input.id).await?;
    ensure_can_mutate(caller, &job)?;
    JobMutator::new(conn)
        .update(input)
        .await?
        .ok_or(Error::NotFound("job"))
}

pub async fn deactivate(conn: &mut PgConnection, caller: &User, job_id: i32) -> Result<JobEntry> {
    let job = get(&mut *conn, job_id).await?;
    ensure_can_mutate(caller, &job)?;
    let job = JobMutator::new(conn)
        .deactivate(job_id)
        .await?
        // the row passed the check above but lost a race to another caller
        .ok_or(Error::Conflict("job is not active"))?;
    tracing::info!(job_id = job.id, "deactivated job");
    Ok(job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pkg::internal::{
        auth::Role,
        policy::fixtures::{job, user},
    };

    #[test]
    fn salary_range_accepts_missing_bounds() {
        assert!(validate_salary_range(None, None).is_ok());
        assert!(validate_salary_range(Some(1000.0), None).is_ok());
        assert!(validate_salary_range(None, Some(30000.0)).is_ok());
    }

    #[test]
    fn salary_range_accepts_ordered_bounds() {
        assert!(validate_salary_range(Some(1000.0), Some(30000.0)).is_ok());
        assert!(validate_salary_range(Some(1000.0), Some(1000.0)).is_ok());
    }

    #[test]
    fn inverted_salary_range_is_a_validation_error() {
        let err = validate_salary_range(Some(1000.0), Some(0.0)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn negative_salary_is_a_validation_error() {
        let err = validate_salary_range(Some(-1.0), None).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        let err = validate_salary_range(None, Some(-0.5)).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn owner_of_active_job_may_mutate() {
        let caller = user("c", Role::Company);
        assert!(ensure_can_mutate(&caller, &job(1, "c", true)).is_ok());
    }

    #[test]
    fn non_owner_mutation_is_forbidden() {
        let caller = user("other", Role::Company);
        let err = ensure_can_mutate(&caller, &job(1, "c", true)).unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[test]
    fn individual_mutation_is_forbidden_even_with_matching_id() {
        let caller = user("c", Role::Individual);
        let err = ensure_can_mutate(&caller, &job(1, "c", true)).unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }

    #[test]
    fn inactive_job_mutation_is_a_conflict() {
        let caller = user("c", Role::Company);
        let err = ensure_can_mutate(&caller, &job(1, "c", false)).unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn ownership_is_checked_before_state() {
        // a non-owner poking an inactive job learns nothing about its state
        let caller = user("other", Role::Company);
        let err = ensure_can_mutate(&caller, &job(1, "c", false)).unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
    }
}

//! Response lifecycle: submission, listing for a job's owner, withdrawal.
//!
//! Unlike jobs, responses are physically deleted on withdrawal. A caller may
//! hold at most one response per job; the unique index on
//! `(responder_user_id, job_id)` is the authoritative guard and the lookup
//! here is only an early reject.

use sqlx::PgConnection;

use crate::{
    errors::Error,
    pkg::internal::{
        adaptors::{
            jobs::spec::JobEntry,
            responses::{
                mutators::ResponseMutator, selectors::ResponseSelector, spec::ResponseEntry,
            },
        },
        auth::User,
        jobs,
        policy,
    },
    prelude::Result,
};

fn ensure_can_submit(caller: &User) -> Result<()> {
    if !policy::can_submit_response(caller) {
        return Err(Error::Forbidden("companies cannot respond to jobs"));
    }
    Ok(())
}

fn ensure_job_accepts_responses(job: &JobEntry) -> Result<()> {
    if !job.is_active {
        return Err(Error::Conflict("job is not active"));
    }
    Ok(())
}

pub async fn submit(
    conn: &mut PgConnection,
    caller: &User,
    job_id: i32,
    message: Option<&str>,
) -> Result<ResponseEntry> {
    // role first: a company learns nothing about the job, not even absence
    ensure_can_submit(caller)?;
    let job = jobs::get(&mut *conn, job_id).await?;
    ensure_job_accepts_responses(&job)?;
    if ResponseSelector::new(&mut *conn)
        .get_by_responder_and_job(&caller.user_id, job_id)
        .await?
        .is_some()
    {
        return Err(Error::Conflict("response already exists"));
    }
    let response = ResponseMutator::new(conn)
        .create(&caller.user_id, job_id, message)
        .await?;
    tracing::info!(response_id = response.id, job_id, "submitted response");
    Ok(response)
}

pub async fn list_for_job(
    conn: &mut PgConnection,
    caller: &User,
    job_id: i32,
) -> Result<Vec<ResponseEntry>> {
    let job = jobs::get(&mut *conn, job_id).await?;
    if !policy::can_list_responses(caller, &job) {
        return Err(Error::Forbidden("caller does not own this job"));
    }
    ResponseSelector::new(conn).get_for_job(job_id).await
}

pub async fn withdraw(
    conn: &mut PgConnection,
    caller: &User,
    job_id: i32,
) -> Result<ResponseEntry> {
    if !policy::can_submit_response(caller) {
        return Err(Error::Forbidden("companies cannot withdraw responses"));
    }
    let existing = ResponseSelector::new(&mut *conn)
        .get_by_responder_and_job(&caller.user_id, job_id)
        .await?
        .ok_or(Error::Conflict("response does not exist"))?;
    let deleted = ResponseMutator::new(conn)
        .delete(existing.id)
        .await?
        // gone between lookup and delete; same outcome as never existing
        .ok_or(Error::Conflict("response does not exist"))?;
    tracing::info!(response_id = deleted.id, job_id, "withdrew response");
    Ok(deleted)
}


#[cfg(test)]
mod db_tests {
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::pkg::{
        internal::auth::{Role, User},
        server::{
            handlers::jobs::CreateJobInput,
            state::AppState,
        },
    };
    use crate::prelude::Result;

    async fn register(state: &AppState, name: &str, role: Role) -> Result<User> {
        let email = format!("{}@{}.test", Uuid::new_v4(), name);
        User::create(&state.db_pool, name, &email, "password123", role).await
    }

    // Full company/individual flow: create, respond, list, deactivate,
    // duplicate rejections, withdrawal.
    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a running Postgres with migrations applied (DATABASE_URL)"]
    async fn response_lifecycle_end_to_end() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let company = register(&state, "acme", Role::Company).await?;
        let seeker = register(&state, "ivan", Role::Individual).await?;

        let input = CreateJobInput {
            title: "Work".into(),
            description: "Working".into(),
            salary_from: Some(1000.0),
            salary_to: Some(30000.0),
            is_active: true,
        };
        let posting = jobs::create(&mut conn, &company, &input).await?;
        assert!(posting.is_active);

        let response = submit(&mut conn, &seeker, posting.id, Some("Text")).await?;
        assert_eq!(response.responder_user_id, seeker.user_id);

        let listed = list_for_job(&mut conn, &company, posting.id).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].responder_user_id, seeker.user_id);

        let err = submit(&mut conn, &seeker, posting.id, Some("Again")).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        // another individual has no response to this job; the seeker's stays put
        let rival = register(&state, "pyotr", Role::Individual).await?;
        let err = withdraw(&mut conn, &rival, posting.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        let err = withdraw(&mut conn, &company, posting.id).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        let listed = list_for_job(&mut conn, &company, posting.id).await?;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, response.id);

        let deactivated = jobs::deactivate(&mut conn, &company, posting.id).await?;
        assert!(!deactivated.is_active);
        let err = jobs::deactivate(&mut conn, &company, posting.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));

        let withdrawn = withdraw(&mut conn, &seeker, posting.id).await?;
        assert_eq!(withdrawn.id, response.id);
        let err = withdraw(&mut conn, &seeker, posting.id).await.unwrap_err();
        assert!(matches!(err, Error::Conflict(_)));
        Ok(())
    }

    // serial job ids start at 1, so 0 never exists
    #[tokio::test]
    #[traced_test]
    #[ignore = "needs a running Postgres with migrations applied (DATABASE_URL)"]
    async fn company_submission_is_forbidden_before_job_lookup() -> Result<()> {
        let state = AppState::new().await?;
        let mut conn = state.db_pool.acquire().await?;
        let company = register(&state, "acme", Role::Company).await?;
        let err = submit(&mut conn, &company, 0, Some("Text")).await.unwrap_err();
        assert!(matches!(err, Error::Forbidden(_)));
        Ok(())
    }
}

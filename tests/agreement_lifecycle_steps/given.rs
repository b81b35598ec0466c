//! Given steps for agreement lifecycle BDD scenarios.

use super::world::{COMPANY, LifecycleWorld, STUDENT, parse_role};
use chrono::Utc;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use stagedesk::agreement::{
    domain::{Agreement, AgreementId, AgreementStatus},
    services::ListScope,
};

#[given("agreement {id:u64} is awaiting faculty validation with the student signature")]
fn agreement_awaiting_faculty(world: &mut LifecycleWorld, id: u64) -> Result<(), eyre::Report> {
    let agreement_id = AgreementId::new(id).wrap_err("scenario agreement id")?;
    let agreement = Agreement::new(
        agreement_id,
        AgreementStatus::PendingFacultyValidation,
        "Distributed systems internship",
        "Camille Roux",
        "Ferrous Networks",
    )
    .with_parties(STUDENT, COMPANY)
    .with_student_signature(Utc::now())
    .with_created_at(Utc::now());
    world
        .backend
        .insert(agreement)
        .wrap_err("seed in-memory backend")
}

#[given(r#"a "{role}" view of its agreements"#)]
fn actor_view(world: &mut LifecycleWorld, role: String) -> Result<(), eyre::Report> {
    world.mount(parse_role(&role)?, ListScope::Actor);
    Ok(())
}

#[given(r#"a "{role}" view of its pending queue"#)]
fn pending_view(world: &mut LifecycleWorld, role: String) -> Result<(), eyre::Report> {
    world.mount(parse_role(&role)?, ListScope::Pending);
    Ok(())
}

//! Then steps for agreement lifecycle BDD scenarios.

use super::world::LifecycleWorld;
use rstest_bdd_macros::then;
use stagedesk::agreement::{
    adapters::memory::GatewayOperation,
    domain::{AgreementAction, AgreementId, AgreementStatus, project},
    ports::NoticeLevel,
    services::{ControllerError, FailureKind},
};

fn agreement_id(id: u64) -> Result<AgreementId, eyre::Report> {
    AgreementId::new(id).map_err(|err| eyre::eyre!("{err}"))
}

#[then(r#"the actions offered on agreement {id:u64} are "{actions}""#)]
fn offered_actions(world: &LifecycleWorld, id: u64, actions: String) -> Result<(), eyre::Report> {
    let target = agreement_id(id)?;
    let rows = world
        .controller()?
        .projections()
        .map_err(|err| eyre::eyre!("projections unavailable: {err}"))?;
    let row = rows
        .iter()
        .find(|row| row.id == target)
        .ok_or_else(|| eyre::eyre!("agreement {id} is not listed"))?;
    let offered: Vec<&str> = row.actions.iter().map(AgreementAction::as_str).collect();
    let expected: Vec<&str> = actions.split(',').map(str::trim).collect();
    eyre::ensure!(
        offered == expected,
        "expected actions {expected:?}, found {offered:?}"
    );
    Ok(())
}

#[then("the action is refused as invalid")]
fn action_refused(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let outcome = world
        .last_action
        .as_ref()
        .ok_or_else(|| eyre::eyre!("no action attempted in scenario world"))?;
    match outcome {
        Err(ControllerError::Domain(_)) => Ok(()),
        other => Err(eyre::eyre!("expected a local validation refusal, found {other:?}")),
    }
}

#[then("no mutation reached the backend")]
fn no_mutation(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let calls = world.backend.call_count(GatewayOperation::Mutate);
    eyre::ensure!(calls == 0, "expected no mutation call, found {calls}");
    Ok(())
}

#[then(r#"the backend reports agreement {id:u64} as "{status}""#)]
fn backend_status(world: &LifecycleWorld, id: u64, status: String) -> Result<(), eyre::Report> {
    let stored = world
        .backend
        .get(agreement_id(id)?)
        .ok_or_else(|| eyre::eyre!("agreement {id} missing from backend"))?;
    let expected = AgreementStatus::from(status.as_str());
    eyre::ensure!(
        stored.status() == &expected,
        "expected {expected}, found {}",
        stored.status()
    );
    Ok(())
}

#[then("every party check of agreement {id:u64} is complete")]
fn every_party_checked(world: &LifecycleWorld, id: u64) -> Result<(), eyre::Report> {
    let stored = world
        .backend
        .get(agreement_id(id)?)
        .ok_or_else(|| eyre::eyre!("agreement {id} missing from backend"))?;
    let checks = project(&stored).party_checks;
    eyre::ensure!(
        checks.student && checks.company && checks.faculty && checks.admin,
        "incomplete party checks: {checks:?}"
    );
    Ok(())
}

#[then("the list still shows agreement {id:u64}")]
fn list_still_shows(world: &LifecycleWorld, id: u64) -> Result<(), eyre::Report> {
    let target = agreement_id(id)?;
    let snapshot = world
        .controller()?
        .snapshot()
        .map_err(|err| eyre::eyre!("snapshot unavailable: {err}"))?;
    eyre::ensure!(
        snapshot.agreements.iter().any(|agreement| agreement.id() == target),
        "agreement {id} vanished from the list"
    );
    eyre::ensure!(
        snapshot.last_failure == Some(FailureKind::Network),
        "expected a recorded network failure, found {:?}",
        snapshot.last_failure
    );
    Ok(())
}

#[then("an error notice is shown")]
fn error_notice(world: &LifecycleWorld) -> Result<(), eyre::Report> {
    let errors = world.notifier.count(NoticeLevel::Error);
    eyre::ensure!(errors == 1, "expected one error notice, found {errors}");
    Ok(())
}

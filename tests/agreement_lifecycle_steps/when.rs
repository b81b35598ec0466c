//! When steps for agreement lifecycle BDD scenarios.

use super::world::{LifecycleWorld, parse_role, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use stagedesk::agreement::{
    adapters::memory::GatewayOperation,
    domain::{AgreementAction, AgreementId},
    ports::GatewayError,
    services::{AgreementCommand, ListScope},
};
use std::io;

#[when("the list is loaded")]
fn load_list(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    run_async(world.controller()?.load()).wrap_err("initial load")
}

#[when("the list is refreshed")]
fn refresh_list(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    // Failure is recorded on the view; the then-steps inspect it.
    let _outcome = run_async(world.controller()?.refresh());
    Ok(())
}

#[when(r#"a "{role}" view of its pending queue is loaded"#)]
fn switch_to_pending_view(world: &mut LifecycleWorld, role: String) -> Result<(), eyre::Report> {
    world.mount(parse_role(&role)?, ListScope::Pending);
    run_async(world.controller()?.load()).wrap_err("pending queue load")
}

#[when(r#"agreement {id:u64} receives the "{action}" action"#)]
fn perform_action(world: &mut LifecycleWorld, id: u64, action: String) -> Result<(), eyre::Report> {
    let agreement_id = AgreementId::new(id).wrap_err("scenario agreement id")?;
    let command = match AgreementAction::try_from(action.as_str())
        .map_err(|err| eyre::eyre!("{err}"))?
    {
        AgreementAction::Sign => AgreementCommand::Sign,
        AgreementAction::SignCompany => AgreementCommand::SignCompany,
        AgreementAction::Validate => AgreementCommand::validate(),
        AgreementAction::Approve => AgreementCommand::Approve,
        AgreementAction::Reject => AgreementCommand::reject("Rejected in scenario"),
    };
    run_async(world.controller()?.perform(agreement_id, &command))
        .wrap_err_with(|| format!("perform {action} on agreement {id}"))?;
    Ok(())
}

#[when("agreement {id:u64} is rejected without a reason")]
fn reject_without_reason(world: &mut LifecycleWorld, id: u64) -> Result<(), eyre::Report> {
    let agreement_id = AgreementId::new(id).wrap_err("scenario agreement id")?;
    let command = AgreementCommand::Validate {
        validated: false,
        reason: None,
    };
    let outcome = run_async(world.controller()?.perform(agreement_id, &command));
    world.last_action = Some(outcome.map(|_| ()));
    Ok(())
}

#[when("the backend becomes unreachable")]
fn backend_unreachable(world: &mut LifecycleWorld) -> Result<(), eyre::Report> {
    // One failure for the fetch and one for its retry.
    for _ in 0..2 {
        world
            .backend
            .fail_next(
                GatewayOperation::Fetch,
                GatewayError::network(io::Error::other("connection refused")),
            )
            .wrap_err("script network failure")?;
    }
    Ok(())
}

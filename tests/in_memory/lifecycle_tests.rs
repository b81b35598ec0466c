//! In-memory integration tests for the multi-party agreement workflow.

use super::helpers::{Backend, agreement_id, backend};
use rstest::rstest;
use stagedesk::agreement::{
    adapters::memory::GatewayOperation,
    domain::{ActionSet, ActorId, ActorRole, AgreementAction, AgreementStatus, MutationRequest},
    ports::{AgreementGateway, GatewayError, NoticeLevel},
    services::{AgreementCommand, ListScope, ViewState},
};
use stagedesk::session::Session;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn four_party_ratification_through_views(backend: Backend) -> Result<(), eyre::Report> {
    let id = agreement_id(1);

    let student = backend.view(ActorRole::Student, ListScope::Actor);
    student.load().await?;
    student.perform(id, &AgreementCommand::Sign).await?;
    student.unmount();

    let company = backend.view(ActorRole::Company, ListScope::Actor);
    company.load().await?;
    let offered = company
        .projections()?
        .into_iter()
        .find(|row| row.id == id)
        .map(|row| row.actions);
    eyre::ensure!(
        offered == Some(ActionSet::only(AgreementAction::SignCompany)),
        "company should be offered its signature, found {offered:?}"
    );
    company.perform(id, &AgreementCommand::SignCompany).await?;

    let faculty = backend.view(ActorRole::Faculty, ListScope::Pending);
    faculty.load().await?;
    faculty.perform(id, &AgreementCommand::validate()).await?;
    eyre::ensure!(
        faculty.agreements()?.iter().all(|agreement| agreement.id() != id),
        "validated agreement should leave the faculty queue"
    );

    let admin = backend.view(ActorRole::Admin, ListScope::Pending);
    admin.load().await?;
    let approved = admin.perform(id, &AgreementCommand::Approve).await?;

    eyre::ensure!(
        approved.status() == &AgreementStatus::Signed,
        "expected SIGNED, found {}",
        approved.status()
    );
    eyre::ensure!(backend.notifier.count(NoticeLevel::Success) == 4, "one success per action");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_agreement_offers_nothing_to_anyone(backend: Backend) -> Result<(), eyre::Report> {
    let id = agreement_id(2);
    let student = backend.view(ActorRole::Student, ListScope::Actor);
    student.load().await?;
    student.perform(id, &AgreementCommand::Sign).await?;
    let company = backend.view(ActorRole::Company, ListScope::Actor);
    company.load().await?;
    company.perform(id, &AgreementCommand::SignCompany).await?;
    let faculty = backend.view(ActorRole::Faculty, ListScope::Pending);
    faculty.load().await?;
    faculty
        .perform(id, &AgreementCommand::faculty_reject("Tasks do not match the curriculum"))
        .await?;

    for role in [ActorRole::Student, ActorRole::Company, ActorRole::Admin] {
        let view = backend.view(role, ListScope::Actor);
        view.load().await?;
        let row = view
            .projections()?
            .into_iter()
            .find(|row| row.id == id)
            .ok_or_else(|| eyre::eyre!("agreement 2 should be listed"))?;
        eyre::ensure!(row.projection.label == "Rejected", "label was {}", row.projection.label);
        eyre::ensure!(row.actions.is_empty(), "{role} was offered {:?}", row.actions);
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_listing_covers_every_agreement(backend: Backend) -> Result<(), eyre::Report> {
    let admin = backend.view(ActorRole::Admin, ListScope::All);
    admin.load().await?;
    let snapshot = admin.snapshot()?;

    eyre::ensure!(snapshot.state == ViewState::Loaded, "state was {:?}", snapshot.state);
    eyre::ensure!(snapshot.total_elements == 2, "total was {}", snapshot.total_elements);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_listing_is_refused_to_students(backend: Backend) {
    let student = backend.view(ActorRole::Student, ListScope::All);

    assert!(student.load().await.is_err());
    assert_eq!(student.state().expect("state readable"), ViewState::Failed);
    assert_eq!(backend.gateway.call_count(GatewayOperation::Fetch), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn document_download_passes_through(backend: Backend) -> Result<(), eyre::Report> {
    backend
        .gateway
        .attach_document(agreement_id(1), b"%PDF-1.4 agreement".to_vec())?;
    let student = backend.view(ActorRole::Student, ListScope::Actor);

    let document = student.download_pdf(agreement_id(1)).await?;

    eyre::ensure!(document.file_name == "convention-stage-1.pdf", "file name was {}", document.file_name);
    eyre::ensure!(document.content_type == "application/pdf", "content type was {}", document.content_type);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_students_neither_see_nor_sign(backend: Backend) -> Result<(), eyre::Report> {
    let outsider = Session::new(
        "token-outsider",
        ActorId::new(999),
        "outsider@univ.example",
        ActorRole::Student,
    );
    let view = backend.view_for(outsider.clone(), ListScope::Actor);
    view.load().await?;
    eyre::ensure!(view.agreements()?.is_empty(), "outsider listed foreign agreements");

    let outcome = backend
        .gateway
        .mutate(&outsider, agreement_id(1), &MutationRequest::sign())
        .await;

    eyre::ensure!(
        matches!(outcome, Err(GatewayError::Authorization { status: 403, .. })),
        "outsider signature should be refused, got {outcome:?}"
    );
    let stored = backend
        .gateway
        .get(agreement_id(1))
        .ok_or_else(|| eyre::eyre!("agreement 1 should be stored"))?;
    eyre::ensure!(!stored.signed_by_student(), "foreign signature was recorded");
    Ok(())
}

//! Session context integration tests with a scripted authenticator.

use async_trait::async_trait;
use rstest::{fixture, rstest};
use stagedesk::agreement::domain::{ActorId, ActorRole};
use stagedesk::agreement::ports::{GatewayError, GatewayResult};
use stagedesk::session::{AuthGateway, Credentials, Session, SessionContext, SessionError};

/// Accepts one email/password pair.
struct SingleUserAuth;

#[async_trait]
impl AuthGateway for SingleUserAuth {
    async fn login(&self, credentials: &Credentials) -> GatewayResult<Session> {
        if credentials.email() == "faculty@univ.example" {
            return Ok(Session::new(
                "faculty-token",
                ActorId::new(17),
                credentials.email(),
                ActorRole::Faculty,
            ));
        }
        Err(GatewayError::from_status(401, "bad credentials"))
    }
}

#[fixture]
fn context() -> SessionContext {
    SessionContext::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn login_stores_session_until_logout(context: SessionContext) {
    let session = context
        .login(&SingleUserAuth, &Credentials::new("faculty@univ.example", "secret"))
        .await
        .expect("login succeeds");

    assert_eq!(session.role(), ActorRole::Faculty);
    assert_eq!(context.current().expect("session present"), session);

    context.logout().expect("logout succeeds");
    assert!(!context.is_authenticated());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_login_leaves_context_empty(context: SessionContext) {
    let result = context
        .login(&SingleUserAuth, &Credentials::new("intruder@example.org", "guess"))
        .await;

    assert!(matches!(
        result,
        Err(SessionError::Login(GatewayError::Authorization { status: 401, .. }))
    ));
    assert!(matches!(context.current(), Err(SessionError::NotAuthenticated)));
}

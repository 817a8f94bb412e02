//! Test Credentials Use Case
//!
//! Validates an API key with `GET /getUserInfo`.

use std::sync::Arc;

use crate::application::dto::CredentialTestOutcome;
use crate::application::errors::NodeError;
use crate::application::ports::AlphaInsiderPort;
use crate::domain::shared::ApiCredentials;

/// Use case for the credential connectivity test.
pub struct TestCredentialsUseCase<A>
where
    A: AlphaInsiderPort,
{
    api: Arc<A>,
}

impl<A> TestCredentialsUseCase<A>
where
    A: AlphaInsiderPort,
{
    /// Create a new TestCredentialsUseCase.
    pub const fn new(api: Arc<A>) -> Self {
        Self { api }
    }

    /// Execute the use case. Any successful response passes.
    pub async fn execute(&self, credentials: &ApiCredentials) -> CredentialTestOutcome {
        match self.api.get_user_info(credentials).await {
            Ok(_) => CredentialTestOutcome::ok(),
            Err(error) => {
                tracing::warn!(error = %error, "Credential test failed");
                CredentialTestOutcome::error(&NodeError::Api(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::CredentialTestStatus;
    use crate::application::ports::ApiError;
    use crate::application::use_cases::testing::MockAlphaInsider;

    #[tokio::test]
    async fn success_response_passes() {
        let use_case = TestCredentialsUseCase::new(Arc::new(MockAlphaInsider::default()));
        let outcome = use_case.execute(&ApiCredentials::new("key").unwrap()).await;
        assert!(outcome.is_ok());
    }

    #[tokio::test]
    async fn http_error_is_surfaced() {
        let use_case = TestCredentialsUseCase::new(Arc::new(MockAlphaInsider {
            user_info: Err(ApiError::Http {
                status: 401,
                message: "Unauthorized".to_string(),
            }),
            ..MockAlphaInsider::default()
        }));

        let outcome = use_case.execute(&ApiCredentials::new("bad").unwrap()).await;

        assert_eq!(outcome.status, CredentialTestStatus::Error);
        assert!(outcome.message.contains("401"));
    }
}

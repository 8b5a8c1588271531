use clap::Args;
use warden_app::{
    auth::{AuthService, AuthServiceError},
    config::{DatabaseConfig, TokenArgs},
};

use super::{context, timestamp};

#[derive(Debug, Args)]
pub(crate) struct VerifyTokenArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    token_args: TokenArgs,

    /// Token to verify
    #[arg(long, env = "WARDEN_TOKEN", hide_env_values = true)]
    token: String,
}

pub(crate) async fn run(args: VerifyTokenArgs) -> Result<(), String> {
    let context = context(&args.database, &args.token_args).await?;

    println!("{}", verify(context.auth.as_ref(), &args.token).await?);

    Ok(())
}

async fn verify(auth: &dyn AuthService, token: &str) -> Result<String, String> {
    let verified = auth
        .verify_token(token)
        .await
        .map_err(|error| match error {
            AuthServiceError::Token(reason) => format!("token rejected: {reason}"),
            error => format!("failed to verify token: {error}"),
        })?;

    Ok(format!(
        "subject: {}\ntoken_id: {}\nexpires_at: {}",
        verified.subject,
        verified.token_id,
        timestamp(verified.expires_at),
    ))
}

#[cfg(test)]
mod tests {
    use warden::token::{TokenError, VerifiedToken};
    use warden_app::auth::MockAuthService;

    use super::*;

    #[tokio::test]
    async fn prints_verified_identity() {
        let mut auth = MockAuthService::new();

        auth.expect_verify_token().returning(|_| {
            Ok(VerifiedToken {
                subject: "user-42".to_string(),
                token_id: "jti".to_string(),
                expires_at: 1_700_003_600,
            })
        });

        let output = verify(&auth, "a.b.c").await.expect("token verified");

        assert_eq!(
            output,
            "subject: user-42\ntoken_id: jti\nexpires_at: 2023-11-14T23:13:20Z"
        );
    }

    #[tokio::test]
    async fn names_the_rejection_reason() {
        let mut auth = MockAuthService::new();

        auth.expect_verify_token()
            .returning(|_| Err(AuthServiceError::Token(TokenError::Expired)));

        let error = verify(&auth, "a.b.c").await.expect_err("token rejected");

        assert_eq!(error, "token rejected: token has expired");
    }
}

use clap::Args;
use warden_app::{
    auth::AuthService,
    config::{DatabaseConfig, TokenArgs},
};

use super::{context, timestamp};

#[derive(Debug, Args)]
pub(crate) struct IssueTokenArgs {
    #[command(flatten)]
    database: DatabaseConfig,

    #[command(flatten)]
    token_args: TokenArgs,

    /// Principal the token is issued for
    #[arg(long)]
    subject: String,
}

pub(crate) async fn run(args: IssueTokenArgs) -> Result<(), String> {
    let context = context(&args.database, &args.token_args).await?;

    println!("{}", issue(context.auth.as_ref(), &args.subject).await?);

    Ok(())
}

async fn issue(auth: &dyn AuthService, subject: &str) -> Result<String, String> {
    let issued = auth
        .issue_token(subject)
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    Ok(format!(
        "token: {}\ntoken_id: {}\nkey_id: {}\nexpires_at: {}",
        issued.token,
        issued.token_id,
        issued.key_id,
        timestamp(issued.expires_at),
    ))
}

#[cfg(test)]
mod tests {
    use warden::token::{IssuedToken, TokenError};
    use warden_app::auth::{AuthServiceError, MockAuthService};

    use super::*;

    #[tokio::test]
    async fn prints_issued_token() {
        let mut auth = MockAuthService::new();

        auth.expect_issue_token().times(1).returning(|subject| {
            Ok(IssuedToken {
                token: format!("token-for-{subject}"),
                token_id: "jti".to_string(),
                key_id: "kid".to_string(),
                expires_at: 1_700_003_600,
            })
        });

        let output = issue(&auth, "user-42").await.expect("token issued");

        assert_eq!(
            output,
            "token: token-for-user-42\ntoken_id: jti\nkey_id: kid\nexpires_at: 2023-11-14T23:13:20Z"
        );
    }

    #[tokio::test]
    async fn reports_failures() {
        let mut auth = MockAuthService::new();

        auth.expect_issue_token()
            .returning(|_| Err(AuthServiceError::Token(TokenError::InvalidSubject)));

        let error = issue(&auth, "").await.expect_err("issue fails");

        assert!(error.starts_with("failed to issue token"), "{error}");
    }
}

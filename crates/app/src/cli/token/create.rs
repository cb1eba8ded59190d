use clap::Args;
use uuid::Uuid;

use storefront_app::{auth::PgAuthService, database};

#[derive(Debug, Args)]
pub(crate) struct CreateTokenArgs {
    /// UUID of the user the token authenticates
    #[arg(long)]
    user_uuid: Uuid,

    /// PostgreSQL connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,
}

pub(crate) async fn run(args: CreateTokenArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    let service = PgAuthService::new(pool);

    let token = service
        .issue_api_token(args.user_uuid.into())
        .await
        .map_err(|error| format!("failed to issue token: {error}"))?;

    println!("api_token: {token}");
    println!("store this token now; it is only shown once");

    Ok(())
}

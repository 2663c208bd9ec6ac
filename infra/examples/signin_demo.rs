//! Sign-in demo
//!
//! Runs the debug strategy end to end against an in-memory SQLite store:
//! request a token, read it back from the logged sign-in link, then verify
//! it as a user would type it.
//!
//! ```text
//! cargo run -p pwl_infra --example signin_demo
//! ```

use pwl_core::{RequestContext, VerifyOutcome};
use pwl_infra::bootstrap::{build_passwordless, DEBUG_STRATEGY};
use pwl_infra::telemetry::init_tracing;
use pwl_shared::config::{AppConfig, DatabaseConfig, Environment};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = AppConfig::from_env();
    config.environment = Environment::Development;
    config.mail = None;
    config.database = DatabaseConfig::default();

    init_tracing(&config.logging)?;

    println!("=== Passwordless Sign-in Demo ===\n");

    let bootstrap = build_passwordless(&config).await?;
    let passwordless = bootstrap.passwordless;
    let transport = bootstrap
        .debug_transport
        .ok_or_else(|| anyhow::anyhow!("debug strategy was not registered"))?;

    let ctx = RequestContext::new(Environment::Development)
        .with_timeout(std::time::Duration::from_secs(10));
    let uid = "alice@example.com";

    passwordless
        .request_token(&ctx, DEBUG_STRATEGY, uid, uid)
        .await?;

    let message = transport
        .last_message()
        .ok_or_else(|| anyhow::anyhow!("no sign-in message was produced"))?;
    println!("Delivered: {}\n", message);

    let token = message
        .split(['?', '&'])
        .find_map(|part| part.strip_prefix("token="))
        .ok_or_else(|| anyhow::anyhow!("sign-in link has no token"))?
        .to_string();

    let (exists, expires) = passwordless.token_exists(&ctx, uid).await?;
    println!("Token stored: {} (expires {:?})", exists, expires);

    let outcome = passwordless
        .verify_strategy_token(&ctx, DEBUG_STRATEGY, uid, "WRONG")
        .await?;
    println!("Wrong token accepted: {}", outcome.is_valid());

    // Users tend to type codes in lower case.
    let typed = token.to_lowercase();
    match passwordless
        .verify_strategy_token(&ctx, DEBUG_STRATEGY, uid, &typed)
        .await?
    {
        VerifyOutcome::Valid => println!("Signed in as {}", uid),
        VerifyOutcome::ValidUnconsumed(e) => {
            println!("Signed in as {}, but the token could not be consumed: {}", uid, e)
        }
        VerifyOutcome::Invalid => println!("Token rejected"),
    }

    match passwordless.verify_token(&ctx, uid, &token).await {
        Ok(outcome) => println!("Replay accepted: {}", outcome.is_valid()),
        Err(e) => println!("Replay rejected: {}", e),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}

use snafu::prelude::*;
use uma_grant::{
    grant::{ClaimToken, NeedInfo, TokenRequest, UmaClient},
    prelude::*,
};

#[snafu::report]
#[tokio::main]
pub async fn main() -> Result<(), snafu::Whatever> {
    let authorization_server = std::env::var("AUTHORIZATION_SERVER")
        .whatever_context("Failed to get AUTHORIZATION_SERVER")?
        .into_endpoint_url()
        .whatever_context("AUTHORIZATION_SERVER is not a valid URL")?;
    let ticket = std::env::var("TICKET").whatever_context("Failed to get TICKET")?;
    let id_token = std::env::var("ID_TOKEN").ok();

    let http_client = reqwest::Client::new();
    let client = UmaClient::new();

    let metadata = client
        .metadata(&http_client, &authorization_server)
        .await
        .whatever_context("Failed to get UMA configuration")?;

    let request = TokenRequest::builder()
        .ticket(ticket)
        .scopes(["read"])
        .build();

    let claims = |need_info: NeedInfo| {
        let id_token = id_token.clone();
        async move {
            if let Some(redirect_user) = need_info.redirect_user() {
                println!("Claims can also be gathered at: {redirect_user}");
            }
            id_token.map(ClaimToken::id_token)
        }
    };

    let token_response = client
        .negotiate(&http_client, &metadata.token_endpoint, request, &claims)
        .await
        .whatever_context("Token negotiation failed")?;

    println!(
        "Requesting party token: {}",
        token_response.access_token.expose_token()
    );
    if let Some(pct) = &token_response.pct {
        println!("Persisted claim token: {}", pct.expose_token());
    }

    Ok(())
}

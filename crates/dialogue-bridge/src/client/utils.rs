use crate::client::config::Config;
use crate::client::consts::AUTHORIZATION_HEADER;
use secrecy::ExposeSecret;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::handshake::client::Request;

pub fn build_request(config: &Config) -> tokio_tungstenite::tungstenite::Result<Request> {
    let mut request = config.url().into_client_request()?;
    let token = config.token().expose_secret();
    if !token.is_empty() {
        request
            .headers_mut()
            .insert(AUTHORIZATION_HEADER, format!("Bearer {}", token).parse()?);
    }
    Ok(request)
}

use crate::{config::Settings, error, spotify, success};

pub async fn auth(settings: &Settings) {
    match spotify::auth::authorize(settings).await {
        Ok(_) => success!("Authentication successful!"),
        Err(e) => error!("{}", e),
    }
}

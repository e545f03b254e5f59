use chrono::Utc;

use crate::{
    management::{CacheCategory, CacheManager},
    spotify,
    types::ClientCredentials,
};

pub fn is_expired(expire_time: u64, now: u64) -> bool {
    now >= expire_time
}

pub struct CredentialsManager {
    client_id: String,
    client_secret: String,
    cache: CacheManager,
    credentials: Option<ClientCredentials>,
}

impl CredentialsManager {
    pub fn new(client_id: String, client_secret: String) -> Self {
        Self {
            client_id,
            client_secret,
            cache: CacheManager::new(),
            credentials: None,
        }
    }

    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.credentials.is_none() {
            self.credentials = self
                .cache
                .retrieve(CacheCategory::Token, &self.client_id)
                .await;
        }

        match &self.credentials {
            Some(credentials)
                if !is_expired(credentials.expire_time, Utc::now().timestamp() as u64) =>
            {
                Ok(credentials.access_token.clone())
            }
            _ => self.refresh().await,
        }
    }

    async fn refresh(&mut self) -> Result<String, String> {
        let credentials =
            spotify::auth::request_client_credentials(&self.client_id, &self.client_secret)
                .await?;

        let _ = self
            .cache
            .store(CacheCategory::Token, &self.client_id, &credentials)
            .await;

        let token = credentials.access_token.clone();
        self.credentials = Some(credentials);
        Ok(token)
    }
}

//! GCP Authentication
//!
//! Google Cloud Platform認証機能

use anyhow::{Context, Result};
use google_cloud_auth::credentials::{service_account, Credentials};
use google_cloud_bigquery::client::{Client, ClientConfig};
use log::debug;

/// Expands tilde in path and returns the full path
pub fn expand_key_path(key_path: &str) -> String {
    shellexpand::tilde(key_path).to_string()
}

/// Creates a BigQuery client
///
/// With a key path the service account key is exported through
/// `GOOGLE_APPLICATION_CREDENTIALS`; otherwise Application Default
/// Credentials are used. Returns the project id found in the credentials.
pub async fn create_bigquery_client(key_path: Option<&str>) -> Result<(Client, Option<String>)> {
    if let Some(key_path) = key_path {
        let expanded_path = expand_key_path(key_path);
        debug!("Using service account key {}", expanded_path);
        std::env::set_var("GOOGLE_APPLICATION_CREDENTIALS", &expanded_path);
    }

    let (config, project_id) = ClientConfig::new_with_auth()
        .await
        .context("Failed to authenticate BigQuery client")?;

    let client = Client::new(config)
        .await
        .context("Failed to create BigQuery client")?;

    Ok((client, project_id))
}

/// Loads service account credentials for the Compute and Workflows clients
///
/// Returns `None` without a key path so the client builders fall back to
/// Application Default Credentials.
pub fn load_credentials(key_path: Option<&str>) -> Result<Option<Credentials>> {
    let Some(key_path) = key_path else {
        return Ok(None);
    };

    let expanded_path = expand_key_path(key_path);
    let contents = std::fs::read_to_string(&expanded_path)
        .with_context(|| format!("Failed to read service account key {}", expanded_path))?;
    let key: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("Invalid service account key {}", expanded_path))?;

    let credentials = service_account::Builder::new(key)
        .build()
        .context("Failed to build service account credentials")?;

    Ok(Some(credentials))
}

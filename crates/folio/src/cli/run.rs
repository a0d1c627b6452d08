//! Command execution.

use super::Commands;
use folio::{FolioClient, FolioResult, Params};
use serde_json::Value;
use tracing::instrument;

/// Run `command` against `client` and return the JSON to print.
#[instrument(skip(client))]
pub async fn run_command(client: &FolioClient, command: Commands) -> FolioResult<Value> {
    match command {
        Commands::Get { path, params } => {
            let response = client.get(&path, to_params(params)).await?;
            Ok(response.data)
        }
        Commands::All { path, key, params } => {
            let entities = client
                .get_all(&path, to_params(params), key.as_deref())
                .await?;
            Ok(Value::Array(entities))
        }
        Commands::Story { slug, params } => {
            let response = client.get_story(&slug, to_params(params)).await?;
            Ok(response.data)
        }
    }
}

fn to_params(pairs: Vec<(String, String)>) -> Params {
    pairs.into_iter().collect()
}

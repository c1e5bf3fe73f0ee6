use crate::utils::config::AppConfig;
use log::{error, info};
use mongodb::bson::doc;
use mongodb::{Client, options::ClientOptions};

pub struct Database {
    pub client: Client,
}

impl Database {
    pub async fn init(config: &AppConfig) -> Result<Self, mongodb::error::Error> {
        let mut client_options = ClientOptions::parse(&config.mongodb_uri).await?;
        client_options.app_name = Some(config.service_name.clone());

        let client = Client::with_options(client_options)?;

        // Fail at startup rather than on the first request.
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await?;

        info!("Connected successfully to MongoDB");

        Ok(Self { client })
    }
}

pub async fn connect_to_mongo(config: &AppConfig) -> Result<Client, mongodb::error::Error> {
    let database = Database::init(config).await.map_err(|e| {
        error!("Failed to initialize database: {}", e);
        e
    })?;
    Ok(database.client)
}

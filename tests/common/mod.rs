use relay_service::config::RelayConfig;
use relay_service::services::providers::TextProvider;
use relay_service::startup::Application;
use std::sync::Arc;
use std::time::Duration;

pub struct TestApp {
    pub address: String,
    pub port: u16,
}

impl TestApp {
    /// Spawn the application on a random port with the given provider.
    pub async fn spawn(provider: Arc<dyn TextProvider>) -> Self {
        std::env::set_var("APP__PORT", "0");
        std::env::set_var("GOOGLE_API_KEY", "test-api-key");

        let config = RelayConfig::load().expect("Failed to load configuration");

        let app = Application::build_with_provider(config, provider)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }

        TestApp { address, port }
    }
}

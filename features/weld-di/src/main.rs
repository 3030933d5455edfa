use std::sync::Arc;

use tracing_subscriber::EnvFilter;
use weld_di::{Component, DiBuilder, DiError};

fn main() {
    let filter = EnvFilter::try_from_env("WELD_LOG").unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    if let Err(e) = run() {
        tracing::error!("Application failed to start: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), DiError> {
    let mut builder = DiBuilder::new();

    // Registered root first, wiring sorts out the order
    builder
        .add_component(Component::builder::<Service>().constructor(
            |repository: Arc<Repository>, logger: Arc<dyn Logger>| Service { repository, logger },
        ))?
        .add_component(
            Component::builder::<Repository>()
                .constructor(|logger: Arc<dyn Logger>| Repository { logger }),
        )?
        .add_component(
            Component::builder::<ConsoleLogger>()
                .constructor(|| ConsoleLogger)
                .provides::<dyn Logger>(|logger| logger),
        )?;

    let app = builder.build()?;
    println!("{:?}", app);

    let service = app.require::<Service>()?;
    service.greet("weld");
    Ok(())
}

trait Logger: Send + Sync {
    fn log(&self, message: &str);
}

struct ConsoleLogger;
impl Logger for ConsoleLogger {
    fn log(&self, message: &str) {
        tracing::info!("{message}");
    }
}

struct Repository {
    logger: Arc<dyn Logger>,
}
impl Repository {
    fn find_name(&self, id: &str) -> String {
        self.logger.log(&format!("looking up {id}"));
        id.to_uppercase()
    }
}

struct Service {
    repository: Arc<Repository>,
    logger: Arc<dyn Logger>,
}
impl Service {
    fn greet(&self, id: &str) {
        let name = self.repository.find_name(id);
        self.logger.log(&format!("Hello, {name}"));
    }
}

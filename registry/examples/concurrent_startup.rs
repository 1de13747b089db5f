use fibre_registry::{Inject, Lifecycle, Registry, RegistryError};
use std::sync::Arc;
use std::thread;

trait Greeter: Send + Sync {
  fn greet(&self) -> String;
}

trait Clock: Send + Sync {
  fn current_time(&self) -> String;
}

struct HelloGreeter;
impl Greeter for HelloGreeter {
  fn greet(&self) -> String {
    "Hello World".to_string()
  }
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
    )
    .init();

  let registry = Arc::new(Registry::new());
  registry.register_trait::<dyn Greeter>(Lifecycle::Singleton, || Arc::new(HelloGreeter));

  // Two startup tasks resolve the same service in parallel.
  let tasks: Vec<_> = (1..=2)
    .map(|task| {
      let registry = Arc::clone(&registry);
      thread::spawn(move || match Inject::<dyn Greeter>::try_from_registry(&registry) {
        Ok(greeter) => println!("Task {}: {}", task, greeter.greet()),
        Err(err) => println!("Task {} - registry error: {}", task, err),
      })
    })
    .collect();

  for task in tasks {
    task.join().expect("startup task panicked");
  }

  // A type that was never registered.
  match registry.resolve::<dyn Clock>() {
    Ok(clock) => println!("{}", clock.current_time()),
    Err(err @ RegistryError::DependencyNotFound { .. }) => println!("Registry error: {}", err),
  }

  // The second singleton registration is ignored and logged at WARN.
  registry.register_trait::<dyn Greeter>(Lifecycle::Singleton, || Arc::new(HelloGreeter));
}

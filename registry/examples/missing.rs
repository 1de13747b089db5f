use fibre_registry::{global, resolve};
use std::panic;

struct UnregisteredService;

fn main() {
  // --- Using the recoverable `resolve()` method ---
  println!("Attempting to resolve a service that was never registered...");

  match global().resolve::<UnregisteredService>() {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err) => println!("Correctly received an error: {}", err),
  }

  // --- Using the panicking `resolve!` macro ---
  println!("\nNow, attempting to resolve using the `resolve!` macro...");

  let result = panic::catch_unwind(|| {
    let _service = resolve!(UnregisteredService);
  });

  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Caught the expected panic from resolve!.");
}

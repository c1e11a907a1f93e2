//! Basic usage example for Mailgate
//!
//! This example validates a sender address and a newsletter payload the way
//! a mail pipeline would before handing them to its transport.

use mailgate::{EmailPayload, validate_email_address};

fn main() {
    println!("Mailgate Basic Usage Example");
    println!("============================");

    let payload = EmailPayload::new(
        "John Doe",
        "john.doe@example.com",
        "Jane Smith",
        "jane.smith@example.com",
        "Hello {name}! Thank you for subscribing to our newsletter.",
    )
    .with_replacement("name", "Jane");

    match validate_email_address(&payload.sender_addr) {
        Ok(()) => println!("Email address is valid."),
        Err(e) => println!("Email address failed: {e}"),
    }

    match payload.validate() {
        Ok(()) => println!("Email payload is valid."),
        Err(e) => println!("Email payload validation failed: {e}"),
    }

    println!("\nSome addresses that are turned away:");
    for addr in [
        ".john@example.com",
        "john@example.co",
        "local@sub.example.com",
        "john_doe@example.com",
        "john@@example.com",
    ] {
        if let Err(e) = validate_email_address(addr) {
            println!("  {addr}: {e} [{}]", e.code());
        }
    }

    println!("\nA payload whose template and replacements disagree:");
    let broken = EmailPayload::new(
        "John Doe",
        "john.doe@example.com",
        "Jane Smith",
        "jane.smith@example.com",
        "Hello {name}, your order {order_id} has shipped.",
    )
    .with_replacement("name", "Jane");
    if let Err(e) = broken.validate() {
        println!("  {} -> {e}", e.field());
    }
}

//! Continuous scan against a serial-attached W-Yuan reader

use rfscan::{Scanner, aggregate};

#[tokio::main]
async fn main() -> rfscan::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    // Change to your serial port
    let port = std::env::var("READER_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());

    println!("Connecting to {port}...");

    let mut scanner = Scanner::w_yuan_serial(port);
    scanner.connect().await?;
    println!("✓ Connected!");

    // Ctrl-C stops the poll loop cooperatively
    let session = scanner.session();
    tokio::spawn(async move {
        let _ = tokio::signal::ctrl_c().await;
        println!("stopping...");
        session.cancel();
    });

    scanner
        .start_scan(
            |update| {
                if update.finished {
                    for tag in aggregate(&update.batches) {
                        println!("✓ {tag}");
                    }
                }
            },
            |fault| eprintln!("✗ {fault}"),
        )
        .await?;

    scanner.close().await?;
    println!("✓ Disconnected");

    Ok(())
}

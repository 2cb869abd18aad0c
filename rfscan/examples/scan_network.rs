//! Scan with the reader family chosen at runtime
//!
//! ```bash
//! READER_FAMILY=hf READER_HOST=192.168.1.50 cargo run --example scan_network
//! READER_FAMILY=w-yuan READER_PORT=/dev/ttyUSB0 cargo run --example scan_network
//! ```

use rfscan::{Dialect, ReaderFamily, Scanner, aggregate};

#[tokio::main]
async fn main() -> rfscan::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let family: ReaderFamily = std::env::var("READER_FAMILY")
        .unwrap_or_else(|_| "hf".to_string())
        .parse()?;

    match family {
        ReaderFamily::Hf => {
            let host = std::env::var("READER_HOST").unwrap_or_else(|_| "192.168.1.50".to_string());
            run(Scanner::hf_tcp(host)).await
        }
        ReaderFamily::WYuan => {
            let port = std::env::var("READER_PORT").unwrap_or_else(|_| "/dev/ttyUSB0".to_string());
            run(Scanner::w_yuan_serial(port)).await
        }
    }
}

async fn run<D: Dialect>(mut scanner: Scanner<D>) -> rfscan::Result<()> {
    scanner.connect().await?;
    println!("✓ Connected!");

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

//! CLI whiteboard client for Kokuban.
//!
//! Connects to a whiteboard meeting server, creates or joins meetings, draws
//! on the shared board, and chats. Drawing and chat from other participants
//! are applied to a local board copy that supports undo/redo and export.
//! Automatically reconnects on disconnection (max 5 attempts with 5 second
//! interval), except when removed by the host.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kokuban-client -- --name Alice
//! cargo run --bin kokuban-client -- -n Bob -u ws://127.0.0.1:8080/ws
//! ```

use clap::Parser;

use kokuban_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "kokuban-client")]
#[command(about = "CLI whiteboard client for Kokuban meetings", long_about = None)]
struct Args {
    /// Display name used in meetings (must be unique within a meeting)
    #[arg(short = 'n', long)]
    name: String,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    // Run the client
    if let Err(e) = kokuban_client::run_client(args.url, args.name).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}

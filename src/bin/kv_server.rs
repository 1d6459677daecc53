use anyhow::Result;
use clap::Parser;
use tracing::info;
use ycsb_client::database::{DatabaseType, get_db};
use ycsb_client::init_tracing;
use ycsb_client::server::Server;

#[derive(Parser)]
#[command(version, about = "Reference key-value server for ycsb-client", long_about = None)]
struct Cli {
    /// Listen address
    #[arg(long, default_value = "localhost:7000")]
    addr: String,

    #[arg(long, value_enum, default_value_t = DatabaseType::MemBtree)]
    database: DatabaseType,

    #[arg(long)]
    debug: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let db = get_db(cli.database)?;
    let server = Server::bind(&cli.addr, db)?;
    info!(addr = %server.local_addr()?, database = ?cli.database, "kv-server listening");
    server.serve()
}

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use pustaka::commands::ls::LsOptions;
use pustaka::commands::{
    build_cache, cmd_config_set, cmd_config_show, cmd_create, cmd_delete, cmd_ls, cmd_pay,
    cmd_photo_rm, cmd_photo_upload, cmd_show, cmd_status, cmd_update,
};
use pustaka::types::{Resource, TransactionStatus, VALID_STATUSES};

#[derive(Parser)]
#[command(name = "pustaka")]
#[command(about = "Bookstore back-office administration")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List records as a table
    Ls {
        /// Resource: books, publishers, curricula, cities, expeditions,
        /// users, sales, purchases
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Filter, e.g. title=matematika, price=10000..50000,
        /// jenis_buku.code==LKS (repeatable)
        #[arg(short, long = "filter")]
        filters: Vec<String>,

        /// Sort column
        #[arg(short, long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long, requires = "sort")]
        desc: bool,

        /// Page number (1-indexed)
        #[arg(short, long, default_value = "1")]
        page: u32,

        /// Rows per page
        #[arg(short, long, default_value = "10")]
        limit: u32,

        /// Bypass the query cache
        #[arg(long)]
        refresh: bool,
    },

    /// Display a single record
    Show {
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        id: u64,
    },

    /// Create a record from a JSON body
    Create {
        #[arg(value_parser = parse_resource)]
        resource: Resource,

        /// Record fields as a JSON object
        body: String,
    },

    /// Update a record with a partial JSON body
    Update {
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        id: u64,

        /// Fields to change, as a JSON object
        body: String,
    },

    /// Delete a record (with confirmation)
    Delete {
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        id: u64,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Set a transaction's status (pending, invoiced, completed)
    Status {
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        id: u64,

        #[arg(value_parser = parse_status)]
        status: TransactionStatus,
    },

    /// Record an installment payment against a credit sale
    Pay {
        /// Sale transaction id
        sale_id: u64,

        /// Amount in whole rupiah
        amount: i64,
    },

    /// Manage record photos
    Photo {
        #[command(subcommand)]
        action: PhotoAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum PhotoAction {
    /// Upload a photo from a local file
    Upload {
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        id: u64,
        file: PathBuf,
    },
    /// Remove a record's photo
    Rm {
        #[arg(value_parser = parse_resource)]
        resource: Resource,
        id: u64,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the effective configuration
    Show,
    /// Set a key (base_url, token, timeout_secs)
    Set { key: String, value: String },
}

fn parse_resource(s: &str) -> Result<Resource, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid resource. Must be one of: {}",
            Resource::ALL
                .iter()
                .map(|r| r.path())
                .collect::<Vec<_>>()
                .join(", ")
        )
    })
}

fn parse_status(s: &str) -> Result<TransactionStatus, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid status. Must be one of: {}",
            VALID_STATUSES.join(", ")
        )
    })
}

#[tokio::main]
async fn main() -> ExitCode {
    let result = run().await;

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> pustaka::Result<()> {
    let cli = Cli::parse();

    // Config commands never touch the backend.
    if let Commands::Config { action } = &cli.command {
        return match action {
            ConfigAction::Show => cmd_config_show(),
            ConfigAction::Set { key, value } => cmd_config_set(key, value),
        };
    }

    let cache = build_cache()?;

    match cli.command {
        Commands::Ls {
            resource,
            filters,
            sort,
            desc,
            page,
            limit,
            refresh,
        } => {
            cmd_ls(
                &cache,
                LsOptions {
                    resource,
                    filters,
                    sort,
                    desc,
                    page,
                    limit,
                    refresh,
                },
            )
            .await
        }

        Commands::Show { resource, id } => cmd_show(&cache, resource, id).await,
        Commands::Create { resource, body } => cmd_create(&cache, resource, &body).await,
        Commands::Update { resource, id, body } => cmd_update(&cache, resource, id, &body).await,
        Commands::Delete { resource, id, yes } => cmd_delete(&cache, resource, id, yes).await,
        Commands::Status {
            resource,
            id,
            status,
        } => cmd_status(&cache, resource, id, status).await,

        Commands::Pay { sale_id, amount } => cmd_pay(&cache, sale_id, amount).await,

        Commands::Photo { action } => match action {
            PhotoAction::Upload { resource, id, file } => {
                cmd_photo_upload(&cache, resource, id, &file).await
            }
            PhotoAction::Rm { resource, id } => cmd_photo_rm(&cache, resource, id).await,
        },

        Commands::Config { .. } => unreachable!(),
    }
}

use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::corpus::{ingest, read_documents};
use search_core::{paginate, DocId, DocumentStatus, SearchServer};
use tracing_subscriber::{fmt, EnvFilter};

mod input;
mod interactive;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Rank documents against queries with an in-memory TF-IDF index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load documents and print the best matches for a query
    Query {
        /// Input path (JSON/JSONL file or directory)
        #[arg(long)]
        input: String,
        /// Space-separated stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Only return documents with this status
        #[arg(long, default_value = "actual")]
        status: DocumentStatus,
        /// Results per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
    /// Show which query words one document contains
    Match {
        /// Input path (JSON/JSONL file or directory)
        #[arg(long)]
        input: String,
        /// Space-separated stop words
        #[arg(long, default_value = "")]
        stop_words: String,
        /// Document id
        #[arg(long, allow_hyphen_values = true)]
        id: DocId,
        #[arg(allow_hyphen_values = true)]
        query: String,
    },
    /// Read stop words, documents and queries line by line from stdin
    Interactive {
        /// Results per printed page
        #[arg(long, default_value_t = 2)]
        page_size: usize,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Query { input, stop_words, status, page_size, query } => {
            let server = load_server(&input, &stop_words)?;
            let docs = server.find_top_documents_by_status(&query, status)?;
            tracing::info!(hits = docs.len(), "query complete");
            for page in &paginate(&docs, page_size)? {
                println!("{page}");
                println!("Page break");
            }
            Ok(())
        }
        Commands::Match { input, stop_words, id, query } => {
            let server = load_server(&input, &stop_words)?;
            let (words, status) = server.match_document(&query, id)?;
            println!("{{ document_id = {id}, status = {status}, words = {} }}", words.join(" "));
            Ok(())
        }
        Commands::Interactive { page_size } => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            interactive::run(&mut stdin.lock(), &mut stdout.lock(), page_size)?;
            Ok(())
        }
    }
}

fn load_server(input: &str, stop_words: &str) -> Result<SearchServer> {
    let mut server = SearchServer::with_stop_words(stop_words)?;
    ingest(&mut server, read_documents(input)?);
    Ok(server)
}

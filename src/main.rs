use anyhow::Result;
use clap::{Parser, Subcommand};
use quality_rag::commands::{
    analyze, ask, chat, clear_index, ingest, knowledge, list_tools, plan, recommend, show_status,
};
use quality_rag::config::{Config, resolve_config_dir, run_interactive_config, show_config};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quality-rag")]
#[command(about = "Question answering over quality-management documents, with a curated knowledge base and tool recommender")]
#[command(version)]
struct Cli {
    /// Directory holding config.toml and the vector index
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Configure embedding and answer generation settings
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
    /// Load documents and add them to the vector index
    Ingest {
        /// Files or directories to ingest
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Discard the existing index before ingesting
        #[arg(long)]
        rebuild: bool,
        /// Only read the top level of each directory
        #[arg(long)]
        no_recursive: bool,
    },
    /// Answer a question from the indexed documents
    Ask {
        query: String,
        /// Number of chunks to retrieve
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// Show how a query is understood: intent, topics and confidence
    Analyze { query: String },
    /// Answer from the built-in quality knowledge base
    Knowledge {
        query: String,
        /// Use plain pattern matching instead of the scored matcher
        #[arg(long)]
        basic: bool,
    },
    /// Recommend quality tools for a problem description
    Recommend {
        query: String,
        /// Extra context about the problem
        #[arg(long)]
        context: Option<String>,
        #[arg(long, default_value_t = 5)]
        top_k: usize,
    },
    /// Build a phased implementation plan for the given tool ids
    Plan {
        #[arg(required = true)]
        tools: Vec<String>,
    },
    /// List or search the quality tool catalog
    Tools {
        #[arg(long)]
        category: Option<String>,
        #[arg(long, conflicts_with = "category")]
        search: Option<String>,
    },
    /// Layered reply combining documents, knowledge base and tools
    Chat { query: String },
    /// Show index and answer generation status
    Status,
    /// Delete the vector index
    Clear,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config_dir = resolve_config_dir(cli.config_dir.as_deref())?;

    if let Commands::Config { show: false } = cli.command {
        return run_interactive_config(&config_dir);
    }

    let config = Config::load(&config_dir)?;

    match cli.command {
        Commands::Config { .. } => show_config(&config)?,
        Commands::Ingest {
            paths,
            rebuild,
            no_recursive,
        } => ingest(&config, &paths, rebuild, !no_recursive)?,
        Commands::Ask { query, top_k } => ask(&config, &query, top_k)?,
        Commands::Analyze { query } => analyze(&config, &query)?,
        Commands::Knowledge { query, basic } => knowledge(&config, &query, basic)?,
        Commands::Recommend {
            query,
            context,
            top_k,
        } => recommend(&query, context.as_deref(), top_k)?,
        Commands::Plan { tools } => plan(&tools)?,
        Commands::Tools { category, search } => {
            list_tools(category.as_deref(), search.as_deref())?;
        }
        Commands::Chat { query } => chat(&config, &query)?,
        Commands::Status => show_status(&config)?,
        Commands::Clear => clear_index(&config)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn cli_parsing() {
        let cli = Cli::try_parse_from(["quality-rag", "status"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            assert!(matches!(parsed.command, Commands::Status));
            assert_eq!(parsed.config_dir, None);
        }
    }

    #[test]
    fn ingest_command_with_flags() {
        let cli = Cli::try_parse_from([
            "quality-rag",
            "ingest",
            "docs",
            "notes/spc.md",
            "--rebuild",
            "--no-recursive",
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Ingest {
                paths,
                rebuild,
                no_recursive,
            } = parsed.command
            {
                assert_eq!(
                    paths,
                    vec![PathBuf::from("docs"), PathBuf::from("notes/spc.md")]
                );
                assert!(rebuild);
                assert!(no_recursive);
            }
        }
    }

    #[test]
    fn ingest_requires_a_path() {
        let cli = Cli::try_parse_from(["quality-rag", "ingest"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
        }
    }

    #[test]
    fn ask_command_with_top_k() {
        let cli = Cli::try_parse_from(["quality-rag", "ask", "What is SPC?", "--top-k", "3"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Ask { query, top_k } = parsed.command {
                assert_eq!(query, "What is SPC?");
                assert_eq!(top_k, Some(3));
            }
        }
    }

    #[test]
    fn recommend_defaults_to_five() {
        let cli = Cli::try_parse_from([
            "quality-rag",
            "recommend",
            "too many assembly mistakes",
            "--context",
            "manual line",
        ]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Recommend {
                context, top_k, ..
            } = parsed.command
            {
                assert_eq!(context.as_deref(), Some("manual line"));
                assert_eq!(top_k, 5);
            }
        }
    }

    #[test]
    fn global_config_dir_after_subcommand() {
        let cli = Cli::try_parse_from(["quality-rag", "clear", "--config-dir", "/tmp/qr"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            assert_eq!(parsed.config_dir, Some(PathBuf::from("/tmp/qr")));
            assert!(matches!(parsed.command, Commands::Clear));
        }
    }

    #[test]
    fn tools_search_conflicts_with_category() {
        let cli = Cli::try_parse_from([
            "quality-rag",
            "tools",
            "--category",
            "7QC",
            "--search",
            "pareto",
        ]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
        }
    }

    #[test]
    fn config_show_flag() {
        let cli = Cli::try_parse_from(["quality-rag", "config", "--show"]);
        assert!(cli.is_ok());

        if let Ok(parsed) = cli {
            if let Commands::Config { show } = parsed.command {
                assert!(show);
            }
        }
    }

    #[test]
    fn invalid_command() {
        let cli = Cli::try_parse_from(["quality-rag", "serve"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::InvalidSubcommand);
        }
    }

    #[test]
    fn help_message() {
        let cli = Cli::try_parse_from(["quality-rag", "--help"]);
        assert!(cli.is_err());

        if let Err(err) = cli {
            assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        }
    }
}

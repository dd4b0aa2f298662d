//! `savepoint` command-line tool.
//!
//! Thin wrapper over the `savepoint` crate: each subcommand loads a document
//! file, runs one library operation, and writes the result back or prints it.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde_json::Value;

use savepoint::{
    branch_to_file, checksum_file, export_to_file, load_savepoint, render_pretty, save_savepoint,
    validate_file, ContentBlock, ExportOptions, ExportTarget, Savepoint, Schema,
};

#[derive(Parser)]
#[command(name = "savepoint", version, about = "Portable AI session save points")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create a new empty savepoint file.
    Init {
        /// Output file path.
        out: PathBuf,
        #[arg(long)]
        app: String,
        #[arg(long, default_value = "0.0.0")]
        app_version: String,
        #[arg(long)]
        engine: String,
        #[arg(long, default_value = "llm")]
        engine_type: String,
        #[arg(long)]
        protocol_version: Option<String>,
        #[arg(long)]
        schema_version: Option<String>,
    },
    /// Append a message to a savepoint file.
    Append {
        file: PathBuf,
        #[arg(long)]
        role: String,
        #[arg(long)]
        content: String,
        /// Content block type tag.
        #[arg(long, default_value = "text")]
        content_type: String,
    },
    /// Add an attachment reference to a savepoint file.
    Attach {
        file: PathBuf,
        #[arg(long)]
        uri: String,
        #[arg(long)]
        mime: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        hash: Option<String>,
    },
    /// Recompute and store the file's checksum.
    Checksum { file: PathBuf },
    /// Validate the file against the savepoint schema.
    Validate { file: PathBuf },
    /// Pretty-print the document.
    Show { file: PathBuf },
    /// Export a rehydration prompt or message feed.
    Export {
        file: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// What to export: `prompt` or `messages`.
        #[arg(long, default_value = "prompt")]
        what: String,
        /// Output format: `md`/`text` for prompts, `jsonl`/`md`/`text` for feeds.
        #[arg(long, default_value = "md")]
        format: String,
        /// Keep only the most recent N messages; 0 keeps all.
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },
    /// Fork the document into a new branched file.
    Branch {
        file: PathBuf,
        #[arg(long)]
        out: PathBuf,
        /// Branch label; generated from the current time when omitted.
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Command::Init {
            out,
            app,
            app_version,
            engine,
            engine_type,
            protocol_version,
            schema_version,
        } => {
            let mut builder =
                Savepoint::builder(&app, &app_version, &engine).engine_type(&engine_type);
            if let Some(v) = &protocol_version {
                builder = builder.protocol_version(v);
            }
            if let Some(v) = &schema_version {
                builder = builder.schema_version(v);
            }
            let doc = builder.build();
            save_savepoint(&out, &doc)?;
            println!("Created {}", out.display());
        }
        Command::Append {
            file,
            role,
            content,
            content_type,
        } => {
            let mut doc = load_savepoint(&file)?;
            let block = if content_type == "text" {
                ContentBlock::text(content)
            } else {
                ContentBlock::other(content_type, Value::String(content))
            };
            let id = doc.append_message(&role, vec![block]);
            save_savepoint(&file, &doc)?;
            println!("Appended message {id}");
        }
        Command::Attach {
            file,
            uri,
            mime,
            description,
            hash,
        } => {
            let mut doc = load_savepoint(&file)?;
            let id = doc.add_attachment_with(
                &uri,
                mime.as_deref(),
                description.as_deref(),
                hash.as_deref(),
            );
            save_savepoint(&file, &doc)?;
            println!("Attached {id}");
        }
        Command::Checksum { file } => {
            let digest = checksum_file(&file)?;
            println!("Checksum (sha256): {digest}");
        }
        Command::Validate { file } => {
            let violations = validate_file(&Schema::savepoint(), &file)?;
            if violations.is_empty() {
                println!("OK");
            } else {
                for violation in &violations {
                    println!("{violation}");
                }
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Show { file } => {
            let doc = load_savepoint(&file)?;
            print!("{}", render_pretty(&doc)?);
        }
        Command::Export {
            file,
            out,
            what,
            format,
            limit,
        } => {
            let target: ExportTarget = what
                .parse()
                .with_context(|| format!("unsupported export target '{what}'"))?;
            let options = ExportOptions {
                target,
                format,
                limit: Some(limit),
                ..ExportOptions::default()
            };
            export_to_file(&Schema::savepoint(), &file, &out, &options)?;
            println!("Exported {} to {}", target, out.display());
        }
        Command::Branch { file, out, name } => {
            branch_to_file(&Schema::savepoint(), &file, &out, name.as_deref())?;
            println!("Branched to {}", out.display());
        }
    }
    Ok(ExitCode::SUCCESS)
}

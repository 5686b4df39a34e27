use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docsync", version)]
#[command(about = "Manage document metadata for a blob-backed sync server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $DOCSYNC_HOME, then the platform data dir)
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create the data directory and default config
    Init,

    /// Create a folder
    Mkdir {
        /// Display name of the folder
        name: String,

        /// Parent folder (index or ID); root when omitted
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// Stage an upload and print the request payloads
    #[command(alias = "up")]
    Upload {
        /// Display name of the entry
        name: String,

        /// Reuse an existing ID (re-upload)
        #[arg(long)]
        id: Option<String>,

        /// Entry type
        #[arg(short = 't', long = "type", value_enum, default_value_t = EntryKind::Document)]
        kind: EntryKind,

        /// Parent folder (index or ID); root when omitted
        #[arg(short, long)]
        parent: Option<String>,
    },

    /// List entries as a tree
    #[command(alias = "ls")]
    List,

    /// Show entries with their wire payloads
    #[command(alias = "v")]
    Show {
        /// Indexes, ranges (2-4) or IDs
        #[arg(required = true, num_args = 1..)]
        entries: Vec<String>,
    },

    /// Delete entries and print the delete requests
    #[command(alias = "rm")]
    Delete {
        /// Indexes, ranges (2-4) or IDs
        #[arg(required = true, num_args = 1..)]
        entries: Vec<String>,

        /// Also delete the contents of folders
        #[arg(short, long)]
        recursive: bool,
    },

    /// Build blob storage slot requests
    Blob {
        #[command(subcommand)]
        action: BlobCommand,
    },

    /// Close a sync cycle and print the completion request
    SyncComplete {
        /// Generation reported by the server
        #[arg(short, long)]
        generation: Option<i64>,
    },

    /// Get or set configuration (keys: root-schema, pretty-json)
    Config {
        key: Option<String>,
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum BlobCommand {
    /// Request a download slot for a document blob
    Get(BlobArgs),

    /// Request an upload slot for a document blob
    Put(BlobArgs),

    /// Request a slot for the root manifest
    Root {
        #[arg(value_enum)]
        direction: Direction,

        /// Relative path of the root manifest
        #[arg(long, default_value = "root")]
        path: String,

        /// Mark this as the first sync
        #[arg(long)]
        initial: bool,
    },
}

#[derive(clap::Args, Debug)]
pub struct BlobArgs {
    /// Relative path of the blob
    pub path: String,

    /// Parent path
    #[arg(long)]
    pub parent: Option<String>,

    /// Mark this as the first sync
    #[arg(long)]
    pub initial: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntryKind {
    Document,
    Collection,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Get,
    Put,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_upload_with_options() {
        let cli = Cli::try_parse_from([
            "docsync", "upload", "Paper", "--id", "abc", "-t", "collection", "-p", "2",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Upload {
                name,
                id,
                kind,
                parent,
            }) => {
                assert_eq!(name, "Paper");
                assert_eq!(id.as_deref(), Some("abc"));
                assert_eq!(kind, EntryKind::Collection);
                assert_eq!(parent.as_deref(), Some("2"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn upload_defaults_to_document() {
        let cli = Cli::try_parse_from(["docsync", "up", "Paper"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Upload {
                kind: EntryKind::Document,
                ..
            })
        ));
    }

    #[test]
    fn delete_requires_entries() {
        assert!(Cli::try_parse_from(["docsync", "delete"]).is_err());
        let cli = Cli::try_parse_from(["docsync", "rm", "1-3", "-r"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Delete {
                recursive: true,
                ..
            })
        ));
    }

    #[test]
    fn parses_blob_root() {
        let cli = Cli::try_parse_from(["docsync", "blob", "root", "put", "--initial"]).unwrap();
        match cli.command {
            Some(Commands::Blob {
                action:
                    BlobCommand::Root {
                        direction,
                        path,
                        initial,
                    },
            }) => {
                assert_eq!(direction, Direction::Put);
                assert_eq!(path, "root");
                assert!(initial);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn global_flags_anywhere() {
        let cli = Cli::try_parse_from(["docsync", "list", "--home", "/tmp/x", "-v"]).unwrap();
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/x")));
        assert!(cli.verbose);
    }
}

//! Console command parsing

use shared::{CategoryFilter, ListingStatus};

use crate::error::AppError;

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Public listing: approved entries filtered by name and category
    List {
        search: String,
        category: CategoryFilter,
    },
    Show {
        id: String,
    },
    /// Admin panel, optionally opened on one moderation tab
    Admin {
        tab: ListingStatus,
    },
    Add,
    Approve {
        id: String,
    },
    Reject {
        id: String,
    },
    Delete {
        id: String,
    },
    Help,
    Quit,
}

pub const HELP: &str = "\
Perintah:
  list [--category <kategori>] [kata kunci]   daftar UMKM yang disetujui
  show <id>                                   detail UMKM
  admin [pending|approved|rejected]           panel admin
  add                                         tambah UMKM baru
  approve <id>                                setujui UMKM
  reject <id>                                 tolak UMKM
  delete <id>                                 hapus UMKM
  help                                        tampilkan bantuan ini
  quit                                        keluar";

impl std::str::FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let (name, rest) = split_word(line.trim());
        if name.is_empty() {
            return Err(AppError::UnknownCommand(String::new()));
        }
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name.to_ascii_lowercase().as_str() {
            "list" | "ls" => parse_list(rest),
            "show" => Ok(Command::Show {
                id: single_id(name, &args)?,
            }),
            "admin" => {
                let tab = match args.as_slice() {
                    [] => ListingStatus::Pending,
                    [tab] => tab.parse().map_err(AppError::InvalidArgument)?,
                    _ => return Err(usage("admin [pending|approved|rejected]")),
                };
                Ok(Command::Admin { tab })
            }
            "add" => Ok(Command::Add),
            "approve" => Ok(Command::Approve {
                id: single_id(name, &args)?,
            }),
            "reject" => Ok(Command::Reject {
                id: single_id(name, &args)?,
            }),
            "delete" | "rm" => Ok(Command::Delete {
                id: single_id(name, &args)?,
            }),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(AppError::UnknownCommand(name.to_string())),
        }
    }
}

/// Leading options, then the rest of the line verbatim as search text
fn parse_list(mut args: &str) -> Result<Command, AppError> {
    let mut category = CategoryFilter::All;

    loop {
        let (option, rest) = split_word(args.trim_start());
        if option != "--category" && option != "-c" {
            break;
        }
        let (value, rest) = split_word(rest.trim_start());
        if value.is_empty() {
            return Err(usage("list [--category <kategori>] [kata kunci]"));
        }
        category = value.parse().map_err(AppError::InvalidArgument)?;
        args = rest;
    }

    Ok(Command::List {
        search: args.trim().to_string(),
        category,
    })
}

fn split_word(text: &str) -> (&str, &str) {
    text.split_once(char::is_whitespace).unwrap_or((text, ""))
}

fn single_id(command: &str, args: &[&str]) -> Result<String, AppError> {
    match args {
        [id] => Ok(id.to_string()),
        _ => Err(usage(&format!("{} <id>", command))),
    }
}

fn usage(text: &str) -> AppError {
    AppError::InvalidArgument(format!("usage: {}", text))
}

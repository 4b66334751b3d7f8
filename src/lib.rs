#[macro_use]
mod macros;

pub mod access;
pub mod analytics;
pub mod assist;
pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod desk;
pub mod detail;
pub mod display;
pub mod error;
pub mod paths;
pub mod query;
pub mod session;
pub mod sla;
pub mod types;
pub mod utils;

pub use access::Capability;
pub use assist::{Assistant, MockAssistant, TicketContext};
pub use backend::{Backend, FsBackend, MemoryBackend};
pub use config::Config;
pub use desk::{Desk, NewTicket, StatusUpdate};
pub use detail::{DetailHandle, TicketDetail, load_detail, open_detail};
pub use error::{HelpdeskError, Result};
pub use query::{ListQuery, ListView, Page, Selection, SortOrder};
pub use session::{Session, SessionState};
pub use sla::{SlaProgress, SlaTier, sla_progress};
pub use types::{
    Comment, Profile, Role, Ticket, TicketId, TicketPriority, TicketStatus, User, UserId,
};

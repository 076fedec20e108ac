use clap::{Parser, Subcommand};
use hostelease_shared::uac::Role;

/// Talks to the HostelEase API from the command line
///
/// Login tokens are kept in the token file from the configuration so later
/// commands run as the same user until `logout`. Results are printed as JSON.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[arg(
        short = 's',
        long = "stdout",
        action,
        help = "Controls if it logs to stderr instead of to a file"
    )]
    pub is_to_std_out: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Logs in and keeps the tokens for the following commands
    Login {
        #[arg(long)]
        username: String,
        #[arg(long, env = "HOSTELEASE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forgets the stored tokens
    Logout,
    /// Shows the logged in user
    Whoami,
    /// Creates a new account (does not log in)
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "HOSTELEASE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Defaults to the same value as the password
        #[arg(long)]
        password_confirm: Option<String>,
        #[arg(long, default_value = "")]
        first_name: String,
        #[arg(long, default_value = "")]
        last_name: String,
        #[arg(long, default_value = "")]
        phone_number: String,
        #[arg(long, default_value_t = Role::Student)]
        role: Role,
    },
    /// Available rooms and active allocations
    Rooms,
    /// All students (wardens and admins only)
    Students,
    Notices,
    Complaints,
    Visitors,
    Maintenance,
    Attendance,
    Payments,
    /// Summary statistics
    Dashboard,
}

impl Command {
    /// Commands that need a logged in user before they are sent
    pub fn requires_login(&self) -> bool {
        !matches!(
            self,
            Command::Login { .. } | Command::Logout | Command::Register { .. }
        )
    }
}

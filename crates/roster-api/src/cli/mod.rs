//! CLI command definitions for the `roster` binary.
//!
//! Verb-noun layout: `roster create race`, `roster list players --guild Fellowship`.
//! Entities are addressed by their natural key (`name`, or `nickname` for players).

pub mod guild;
pub mod player;
pub mod race;
pub mod render;
pub mod skill;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Manage races, skills, guilds and players.
#[derive(Parser)]
#[command(name = "roster", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// SQLite URL to use instead of the one in the data directory.
    #[arg(long, global = true, env = "ROSTER_DATABASE_URL")]
    pub database_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new record.
    Create {
        #[command(subcommand)]
        resource: CreateResource,
    },

    /// List records.
    #[command(alias = "ls")]
    List {
        #[command(subcommand)]
        resource: ListResource,
    },

    /// Show one record.
    Show {
        #[command(subcommand)]
        resource: ShowResource,
    },

    /// Change fields of an existing record.
    Update {
        #[command(subcommand)]
        resource: UpdateResource,
    },

    /// Delete a record and everything that depends on it.
    #[command(alias = "rm")]
    Delete {
        #[command(subcommand)]
        resource: DeleteResource,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum CreateResource {
    /// Create a race.
    Race {
        /// Unique race name.
        name: String,

        /// Free-form description (empty when omitted).
        #[arg(long)]
        description: Option<String>,
    },

    /// Create a skill belonging to a race.
    Skill {
        /// Unique skill name.
        name: String,

        /// What the skill grants.
        #[arg(long)]
        bonus: String,

        /// Name of the owning race.
        #[arg(long)]
        race: String,
    },

    /// Create a guild.
    Guild {
        /// Unique guild name.
        name: String,

        #[arg(long)]
        description: Option<String>,
    },

    /// Create a player.
    Player {
        /// Unique nickname.
        nickname: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        bio: String,

        /// Name of the player's race.
        #[arg(long)]
        race: String,

        /// Name of the guild to join.
        #[arg(long)]
        guild: Option<String>,
    },
}

/// Paging shared by every list command.
#[derive(clap::Args, Clone, Default)]
pub struct PageArgs {
    /// Sort descending by name instead of ascending.
    #[arg(long)]
    pub desc: bool,

    /// Maximum number of rows.
    #[arg(long)]
    pub limit: Option<i64>,

    /// Rows to skip.
    #[arg(long)]
    pub offset: Option<i64>,
}

#[derive(Subcommand)]
pub enum ListResource {
    /// List races.
    Races {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List skills.
    Skills {
        /// Only skills of this race.
        #[arg(long)]
        race: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },

    /// List guilds.
    Guilds {
        #[command(flatten)]
        page: PageArgs,
    },

    /// List players.
    Players {
        /// Only players of this race.
        #[arg(long)]
        race: Option<String>,

        /// Only members of this guild.
        #[arg(long)]
        guild: Option<String>,

        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Subcommand)]
pub enum ShowResource {
    /// Show a race with its skills and players.
    Race { name: String },

    /// Show a skill.
    Skill { name: String },

    /// Show a guild with its members.
    Guild { name: String },

    /// Show a player.
    Player { nickname: String },
}

#[derive(Subcommand)]
pub enum UpdateResource {
    /// Update a race.
    Race {
        /// Current race name.
        name: String,

        /// New name.
        #[arg(long)]
        rename: Option<String>,

        #[arg(long)]
        description: Option<String>,
    },

    /// Update a skill.
    Skill {
        /// Current skill name.
        name: String,

        #[arg(long)]
        rename: Option<String>,

        #[arg(long)]
        bonus: Option<String>,

        /// Move the skill to another race.
        #[arg(long)]
        race: Option<String>,
    },

    /// Update a guild.
    Guild {
        /// Current guild name.
        name: String,

        #[arg(long)]
        rename: Option<String>,

        #[arg(long, conflicts_with = "clear_description")]
        description: Option<String>,

        /// Remove the description entirely.
        #[arg(long)]
        clear_description: bool,
    },

    /// Update a player.
    Player {
        /// Current nickname.
        nickname: String,

        #[arg(long)]
        rename: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        #[arg(long)]
        race: Option<String>,

        /// Join this guild.
        #[arg(long, conflicts_with = "no_guild")]
        guild: Option<String>,

        /// Leave the current guild.
        #[arg(long)]
        no_guild: bool,
    },
}

#[derive(Subcommand)]
pub enum DeleteResource {
    /// Delete a race, its skills and its players.
    Race {
        name: String,

        /// Skip confirmation prompt.
        #[arg(long)]
        force: bool,
    },

    /// Delete a skill.
    Skill {
        name: String,

        #[arg(long)]
        force: bool,
    },

    /// Delete a guild; its members stay without a guild.
    Guild {
        name: String,

        #[arg(long)]
        force: bool,
    },

    /// Delete a player.
    Player {
        nickname: String,

        #[arg(long)]
        force: bool,
    },
}

//! CLI structure and command definitions

use clap::{Args, Parser, Subcommand};
use snipctl_core::texttospeech::AudioEncoding;

/// Single-call recipes for managed cloud services
#[derive(Parser, Debug)]
#[command(name = "snipctl")]
#[command(version, about = "Single-call recipes for managed cloud services")]
#[command(long_about = "
Single-call recipes for managed cloud services

Each command builds one request, sends it, waits for the result when the
service answers with a long-running operation, and prints what matters.

EXAMPLES:
    # Set up a profile
    snipctl profile set dev --project-id my-project --zone us-central1-a --location us-central1

    # Create a hyperdisk inside a storage pool
    snipctl disk create-from-pool --zone us-central1-a --name test-disk --storage-pool my-pool

    # Create a secret with one annotation
    snipctl secret create-with-annotations my-project my-secret env prod

    # Get JSON output for scripting, filtered with JMESPath
    snipctl entry-type create --id my-entry-type -o json -q name

Access tokens come from the profile or GOOGLE_OAUTH_ACCESS_TOKEN, e.g.
    export GOOGLE_OAUTH_ACCESS_TOKEN=$(gcloud auth print-access-token)
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "SNIPCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "SNIPCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Project that owns created resources (overrides the profile)
    #[arg(long, global = true, env = "GOOGLE_CLOUD_PROJECT")]
    pub project: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// JMESPath query to filter output
    #[arg(long, short = 'q', global = true)]
    pub query: Option<String>,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable summary lines
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Two-column table
    Table,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute Engine disks
    #[command(subcommand)]
    Disk(DiskCommands),

    /// Dataplex catalog entry types
    #[command(subcommand)]
    EntryType(EntryTypeCommands),

    /// Secret Manager secrets
    #[command(subcommand)]
    Secret(SecretCommands),

    /// Vertex AI prompt templates
    #[command(subcommand)]
    Prompt(PromptCommands),

    /// Text-to-Speech synthesis
    #[command(subcommand)]
    Tts(TtsCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    Profile(ProfileCommands),

    /// Show version information
    #[command(visible_alias = "ver")]
    Version,
}

/// Wait budget for commands that start a long-running operation
#[derive(Args, Debug, Clone, Default)]
pub struct WaitArgs {
    /// Maximum time to wait in seconds
    #[arg(long)]
    pub wait_timeout: Option<u64>,

    /// Polling interval in seconds
    #[arg(long)]
    pub wait_interval: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum DiskCommands {
    /// Create a hyperdisk provisioned from a storage pool
    #[command(after_help = "EXAMPLES:
    snipctl disk create-from-pool --zone us-central1-a --name test-disk --storage-pool my-pool

    # Throughput-optimized disk with explicit performance
    snipctl disk create-from-pool --zone us-central1-a --name logs --storage-pool tp-pool \\
        --disk-type hyperdisk-throughput --size-gb 2048 --provisioned-throughput 200
")]
    CreateFromPool {
        /// Zone of the disk and the pool (defaults to the profile zone)
        #[arg(long)]
        zone: Option<String>,

        /// Disk name
        #[arg(long)]
        name: String,

        /// Storage pool name in the same zone
        #[arg(long)]
        storage_pool: String,

        /// Size in GB
        #[arg(long, default_value_t = snipctl_core::compute::params::DEFAULT_SIZE_GB)]
        size_gb: i64,

        /// Disk type short name
        #[arg(long, default_value = snipctl_core::compute::params::DEFAULT_DISK_TYPE)]
        disk_type: String,

        /// Provisioned IOPS
        #[arg(long)]
        provisioned_iops: Option<i64>,

        /// Provisioned throughput in MiB/s
        #[arg(long)]
        provisioned_throughput: Option<i64>,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum EntryTypeCommands {
    /// Create an entry type
    #[command(after_help = "EXAMPLES:
    snipctl entry-type create --location us-central1 --id my-entry-type

    # Require a custom aspect in addition to the generic one
    snipctl entry-type create --id table-type \\
        --required-aspect projects/dataplex-types/locations/global/aspectTypes/generic \\
        --required-aspect projects/my-project/locations/us-central1/aspectTypes/schema
")]
    Create {
        /// Location (defaults to the profile location)
        #[arg(long)]
        location: Option<String>,

        /// Entry type id
        #[arg(long)]
        id: String,

        /// Description
        #[arg(long)]
        description: Option<String>,

        /// Display name
        #[arg(long)]
        display_name: Option<String>,

        /// Required aspect type (repeatable; defaults to the generic aspect)
        #[arg(long = "required-aspect")]
        required_aspects: Vec<String>,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum SecretCommands {
    /// Create a secret with one annotation
    #[command(after_help = "EXAMPLES:
    snipctl secret create-with-annotations my-project my-secret env prod
")]
    CreateWithAnnotations {
        /// Project id
        project_id: String,

        /// Secret id
        secret_id: String,

        /// Annotation key
        annotation_key: String,

        /// Annotation value
        annotation_value: String,

        /// Replica location for user-managed replication (repeatable)
        #[arg(long = "replica-location")]
        replica_locations: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum PromptCommands {
    /// Generate content for each variable set, then save a prompt version
    #[command(after_help = "EXAMPLES:
    # The movie critic prompt with its two built-in variable sets
    snipctl prompt generate

    # Custom template and bindings, without saving
    snipctl prompt generate --template 'Summarize {topic} in one line.' \\
        --vars topic=Rust --vars topic=Go --no-save
")]
    Generate {
        /// Location (defaults to the profile location, then us-central1)
        #[arg(long)]
        location: Option<String>,

        /// Prompt name
        #[arg(long)]
        name: Option<String>,

        /// Template text with {variable} placeholders
        #[arg(long)]
        template: Option<String>,

        /// Variable set as key=value,key=value (repeatable)
        #[arg(long = "vars")]
        vars: Vec<String>,

        /// Model id
        #[arg(long)]
        model: Option<String>,

        /// System instruction
        #[arg(long)]
        system_instruction: Option<String>,

        /// Skip saving a prompt version
        #[arg(long)]
        no_save: bool,

        #[command(flatten)]
        wait: WaitArgs,
    },
}

#[derive(Subcommand, Debug)]
pub enum TtsCommands {
    /// Synthesize a multi-speaker dialogue to an audio file
    #[command(after_help = "EXAMPLES:
    # The built-in two-speaker dialogue
    snipctl tts multi-speaker

    snipctl tts multi-speaker --turn 'R=Hello there' --turn 'S=Hi!' --output hello.mp3
")]
    MultiSpeaker {
        /// Dialogue turn as SPEAKER=TEXT (repeatable; defaults to a sample dialogue)
        #[arg(long = "turn")]
        turns: Vec<String>,

        /// Output file [default: output.<ext> for the chosen encoding]
        #[arg(long)]
        output: Option<String>,

        /// Audio encoding
        #[arg(long, value_enum, default_value = "mp3")]
        encoding: AudioEncoding,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all configured profiles
    #[command(visible_alias = "ls")]
    List,

    /// Show the path to the configuration file
    Path,

    /// Show details of a specific profile
    #[command(visible_alias = "get")]
    Show {
        /// Profile name (defaults to the active profile)
        name: Option<String>,
    },

    /// Set or create a profile
    #[command(visible_alias = "add")]
    #[command(after_help = "EXAMPLES:
    snipctl profile set dev --project-id my-project --zone us-central1-a --location us-central1

    # Prompt for an access token instead of passing it on the command line
    snipctl profile set dev --project-id my-project --prompt-token

    # Point a service at a local emulator
    snipctl profile set local --project-id test --secret-manager-endpoint http://localhost:8085/v1
")]
    Set {
        /// Profile name
        name: String,

        /// Project id
        #[arg(long = "project-id")]
        project_id: Option<String>,

        /// Default location
        #[arg(long)]
        location: Option<String>,

        /// Default zone
        #[arg(long)]
        zone: Option<String>,

        /// Access token
        #[arg(long, conflicts_with = "prompt_token")]
        access_token: Option<String>,

        /// Read the access token from the terminal
        #[arg(long)]
        prompt_token: bool,

        /// Store the access token in the OS keyring
        #[cfg(feature = "secure-storage")]
        #[arg(long)]
        use_keyring: bool,

        /// Default wait timeout in seconds
        #[arg(long)]
        wait_timeout: Option<u64>,

        /// Default polling interval in seconds (at least 1)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        poll_interval: Option<u64>,

        /// Base URL override for Compute Engine
        #[arg(long)]
        compute_endpoint: Option<String>,

        /// Base URL override for Dataplex
        #[arg(long)]
        dataplex_endpoint: Option<String>,

        /// Base URL override for Secret Manager
        #[arg(long)]
        secret_manager_endpoint: Option<String>,

        /// Base URL override for Text-to-Speech
        #[arg(long)]
        text_to_speech_endpoint: Option<String>,

        /// Base URL override for Vertex AI
        #[arg(long)]
        aiplatform_endpoint: Option<String>,
    },

    /// Remove a profile
    #[command(visible_alias = "rm")]
    Remove {
        /// Profile name
        name: String,
    },

    /// Set the default profile
    Default {
        /// Profile name
        name: String,
    },
}

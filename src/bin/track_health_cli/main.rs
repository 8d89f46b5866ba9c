// ABOUTME: Track to Health CLI - command-line front end for the nutrition client
// ABOUTME: Drives account, profile, favorites and nutrition operations against the backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # Create an account, then log in
//! track-health register --username amina --email amina@example.com --password s3cret --password2 s3cret
//! track-health login --username amina --password s3cret
//!
//! # Complete the profile
//! track-health profile update --age 29 --weight 61.5 --height 168
//!
//! # Favorites are stored on this device only
//! track-health favorites toggle --id 3 --name "Lentil soup"
//! track-health favorites list
//!
//! # Analyze a fruit photo
//! track-health analyze ./banana.jpg
//! ```

mod commands;
mod helpers;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use track_health::config::environment::ClientConfig;
use track_health::favorites::FavoritesCache;
use track_health::http::{ApiClient, AuthEvent};
use track_health::logging::LoggingConfig;
use track_health::session::SessionManager;
use track_health::storage::file::JsonFileStore;
use track_health::storage::KeyValueStore;
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "track-health",
    about = "Track to Health nutrition client",
    long_about = "Command-line front end for Track to Health: account, profile, favorites and the fruit analyzer."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory holding the persisted session and favorites
    #[arg(long, global = true, env = "TRACK_HEALTH_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Log in with username and password
    Login {
        /// Account username
        #[arg(long)]
        username: String,

        /// Account password
        #[arg(long, env = "TRACK_HEALTH_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Create an account and log it in
    Register {
        /// Account username
        #[arg(long)]
        username: String,

        /// Email address
        #[arg(long)]
        email: String,

        /// First name
        #[arg(long, default_value = "")]
        first_name: String,

        /// Last name
        #[arg(long, default_value = "")]
        last_name: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Password confirmation
        #[arg(long)]
        password2: String,
    },

    /// Forget the stored session
    Logout,

    /// Profile commands
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Change the account password
    Password {
        /// Current password
        #[arg(long)]
        old: String,

        /// New password
        #[arg(long)]
        new: String,

        /// New password confirmation
        #[arg(long)]
        confirm: String,
    },

    /// Favorite meals stored on this device
    Favorites {
        #[command(subcommand)]
        action: FavoritesCommand,
    },

    /// Analyze a fruit photo
    Analyze {
        /// Image file (jpg, png, webp, heic)
        image: PathBuf,
    },

    /// Show today's message
    DailyMessage,

    /// Estimate the daily calorie need
    Calories {
        /// Age in years
        #[arg(long)]
        age: u32,

        /// Weight in kg
        #[arg(long)]
        weight: f64,

        /// Height in cm
        #[arg(long)]
        height: f64,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum ProfileCommand {
    /// Show the logged-in profile
    Show,

    /// Complete or update the nutrition profile
    Update {
        /// Age in years
        #[arg(long)]
        age: Option<u32>,

        /// Weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Height in cm
        #[arg(long)]
        height: Option<f64>,

        /// Allergies
        #[arg(long)]
        allergies: Option<String>,

        /// Dietary preference
        #[arg(long)]
        preference: Option<String>,

        /// Daily calorie need; estimated from age, weight and height when omitted
        #[arg(long)]
        calories: Option<f64>,

        /// Profile photo
        #[arg(long)]
        photo: Option<PathBuf>,
    },

    /// Update name, username and email
    PersonalInfo {
        /// First name
        #[arg(long)]
        first_name: String,

        /// Last name
        #[arg(long)]
        last_name: String,

        /// Username
        #[arg(long)]
        username: String,

        /// Email address
        #[arg(long)]
        email: String,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum FavoritesCommand {
    /// List favorite meals
    List,

    /// Add the meal, or remove it if already a favorite
    Toggle {
        /// Meal id
        #[arg(long)]
        id: u64,

        /// Meal name
        #[arg(long)]
        name: String,

        /// Short description
        #[arg(long)]
        description: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = LoggingConfig::from_env();
    let logging = if cli.verbose { logging.verbose() } else { logging };
    logging.init()?;

    let mut config = ClientConfig::from_env().context("Invalid client configuration")?;
    if let Some(data_dir) = cli.data_dir {
        config = config.with_data_dir(data_dir);
    }
    debug!("{}", config.summary());

    let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::new(config.store_path()));
    let api = ApiClient::new(&config, Arc::clone(&store))?;
    let mut auth_events = api.events().subscribe();
    let session = SessionManager::new(api.clone(), Arc::clone(&store), &config);

    let outcome = match cli.command {
        Command::Login { username, password } => {
            commands::account::login(&session, username, password).await
        }
        Command::Register {
            username,
            email,
            first_name,
            last_name,
            password,
            password2,
        } => {
            commands::account::register(
                &session, username, email, first_name, last_name, password, password2,
            )
            .await
        }
        Command::Logout => commands::account::logout(&session).await,
        Command::Password { old, new, confirm } => {
            commands::account::change_password(&session, old, new, confirm).await
        }
        Command::Profile { action } => match action {
            ProfileCommand::Show => commands::profile::show(&session).await,
            ProfileCommand::Update {
                age,
                weight,
                height,
                allergies,
                preference,
                calories,
                photo,
            } => {
                let form = commands::profile::ProfileForm {
                    age,
                    weight_kg: weight,
                    height_cm: height,
                    allergies,
                    dietary_preference: preference,
                    daily_calorie_need: calories,
                    photo,
                };
                commands::profile::update(&session, form).await
            }
            ProfileCommand::PersonalInfo {
                first_name,
                last_name,
                username,
                email,
            } => {
                commands::profile::personal_info(
                    &session, first_name, last_name, username, email,
                )
                .await
            }
        },
        Command::Favorites { action } => {
            let favorites = FavoritesCache::new(Arc::clone(&store));
            match action {
                FavoritesCommand::List => commands::favorites::list(&favorites).await,
                FavoritesCommand::Toggle {
                    id,
                    name,
                    description,
                } => commands::favorites::toggle(&favorites, id, name, description).await,
            }
        }
        Command::Analyze { image } => commands::nutrition::analyze(&api, &image).await,
        Command::DailyMessage => commands::nutrition::daily_message(&api).await,
        Command::Calories {
            age,
            weight,
            height,
        } => commands::nutrition::calories(age, weight, height),
    };

    // Apply any 401 seen during the command before the process exits
    while let Ok(AuthEvent::Unauthorized {
        rejected_token,
        path,
    }) = auth_events.try_recv()
    {
        session
            .handle_unauthorized(rejected_token.as_deref(), &path)
            .await;
    }

    outcome
}

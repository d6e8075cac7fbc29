// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rideshare CLI
//!
//! Command-line front end for the ride-sharing backend: sign in, search and
//! request rides, manage recurring rides, and exchange messages.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use rideshare_client::{
    config::Config,
    models::{NewRecurringRide, Ride, RecurringRide},
    notify::LogNotifier,
    services::assistant::FALLBACK_REPLY,
    session::{FileKeyValueStore, Session},
    stores::rides::DEFAULT_SEARCH_LIMIT,
    stores::ConversationEntry,
    time_utils::{format_conversation_time, format_date_time, format_message_time, time_until_ride},
    RideShareApp,
};
use std::sync::Arc;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "rideshare")]
#[command(version)]
#[command(about = "Find, offer and coordinate shared rides")]
#[command(long_about = "\
rideshare - command-line client for the ride-sharing backend

CONFIGURATION:
    RIDESHARE_API_URL       REST base URL (default http://localhost:8000/api)
    RIDESHARE_DATA_SOURCE   live | fixtures (serve reads from demo data)
    RIDESHARE_SESSION_FILE  where the auth token is kept
    RIDESHARE_LOG_JSON      set to 1 for JSON logs on stderr
    RUST_LOG                log filter (default rideshare_client=debug,info)

A .env file in the working directory is honored.
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Sign in with email and password
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long, env = "RIDESHARE_PASSWORD")]
        password: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in user
    Whoami,

    /// One-off rides
    #[command(subcommand)]
    Rides(RideCommands),

    /// Recurring (weekly) rides
    #[command(subcommand)]
    Recurring(RecurringCommands),

    /// Direct messages
    #[command(subcommand)]
    Messages(MessageCommands),

    /// List your cars
    Cars,

    /// Ask the ride assistant a question
    Ask {
        /// Question text
        message: String,
    },

    /// Check that the backend is reachable
    Health,
}

#[derive(Subcommand, Debug)]
enum RideCommands {
    /// List open rides
    Search {
        #[arg(short, long, default_value_t = DEFAULT_SEARCH_LIMIT)]
        limit: u32,
    },

    /// Rides you offer, and the requests you sent
    Mine,

    /// Ask to join a ride
    Request {
        ride_id: i64,

        /// Note for the driver
        #[arg(short, long)]
        message: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
enum RecurringCommands {
    /// Search active recurring rides
    Search {
        /// 0 = Monday ... 6 = Sunday
        #[arg(short, long)]
        day: Option<u8>,
    },

    /// Your recurring rides
    Mine,

    /// Offer a new recurring ride
    Create {
        #[arg(long)]
        car_id: i64,

        #[arg(long)]
        from: String,

        #[arg(long)]
        to: String,

        /// 0 = Monday ... 6 = Sunday
        #[arg(long)]
        day: u8,

        /// Departure time, HH:MM
        #[arg(long)]
        time: String,

        #[arg(long)]
        seats: u32,

        #[arg(long)]
        fare: f64,

        #[arg(long)]
        schedule_type: Option<String>,
    },

    /// Pause a recurring ride
    Pause { id: i64 },

    /// Resume a paused recurring ride
    Resume { id: i64 },

    /// Cancel a recurring ride (kept on record)
    Cancel { id: i64 },

    /// Delete a recurring ride
    Delete { id: i64 },
}

#[derive(Subcommand, Debug)]
enum MessageCommands {
    /// List conversations
    Conversations,

    /// Show the thread with one user
    Thread { user_id: i64 },

    /// Send a message
    Send {
        user_id: i64,

        content: String,

        /// Ride the message is about
        #[arg(long)]
        ride: Option<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::debug!(
        api = %config.api_base_url,
        data_source = ?config.data_source,
        "Configuration loaded"
    );

    let store = FileKeyValueStore::new(&config.session_file);
    let session = Arc::new(Session::restore(Box::new(store)));
    let app = RideShareApp::new(config, session, Arc::new(LogNotifier));

    run(&app, cli.command).await
}

async fn run(app: &RideShareApp, command: Commands) -> Result<()> {
    match command {
        Commands::Login { email, password } => {
            let outcome = app.auth.login(&email, &password).await?;
            println!("Signed in as {}", outcome.user.name);
            if outcome.needs_profile_setup {
                println!("Your profile is incomplete; add your preferences to finish setup.");
            }
        }
        Commands::Logout => {
            app.auth.logout().context("Failed to clear stored session")?;
            println!("Signed out");
        }
        Commands::Whoami => match app.auth.check_auth_status().await? {
            Some(user) => {
                println!("{} (id {})", user.name, user.id);
                if let Some(email) = &user.email {
                    println!("  email: {}", email);
                }
                let roles: Vec<&str> = [(user.is_driver, "driver"), (user.is_rider, "rider")]
                    .into_iter()
                    .filter_map(|(on, role)| on.then_some(role))
                    .collect();
                if !roles.is_empty() {
                    println!("  roles: {}", roles.join(", "));
                }
            }
            None => println!("Not signed in"),
        },
        Commands::Rides(cmd) => run_rides(app, cmd).await?,
        Commands::Recurring(cmd) => run_recurring(app, cmd).await?,
        Commands::Messages(cmd) => run_messages(app, cmd).await?,
        Commands::Cars => {
            let cars = app.cars.mine().await.context("Failed to load cars")?;
            if cars.is_empty() {
                println!("No cars registered");
            }
            for car in cars {
                println!("#{:<4} {}  [{}]", car.id, car.label(), car.license_plate);
            }
        }
        Commands::Ask { message } => match app.assistant.chat(&message).await {
            Ok(reply) => println!("{}", reply),
            Err(e) => {
                tracing::warn!(error = %e, "Assistant unavailable");
                println!("{}", FALLBACK_REPLY);
            }
        },
        Commands::Health => {
            let health = app
                .client
                .health()
                .await
                .with_context(|| format!("Backend at {} is unreachable", app.client.base_url()))?;
            println!("health: {}", health);
            let root = app.client.ping_root().await?;
            println!("root: {}", root);
        }
    }
    Ok(())
}

async fn run_rides(app: &RideShareApp, cmd: RideCommands) -> Result<()> {
    match cmd {
        RideCommands::Search { limit } => {
            let rides = app.rides.search_rides(limit).await?;
            if rides.is_empty() {
                println!("No open rides");
            }
            for ride in &rides {
                print_ride(ride);
            }
        }
        RideCommands::Mine => {
            let rides = app.rides.get_my_rides().await?;
            println!("Rides you offer:");
            for ride in &rides {
                print_ride(ride);
            }
            let requests = app.rides.get_my_requests().await?;
            println!("Requests you sent:");
            for request in &requests {
                println!(
                    "  request #{} for ride #{}: {:?}",
                    request.id, request.ride_id, request.status
                );
            }
        }
        RideCommands::Request { ride_id, message } => {
            let request = app
                .rides
                .request_ride(ride_id, message.as_deref())
                .await?;
            println!("Request #{} sent ({:?})", request.id, request.status);
        }
    }
    Ok(())
}

async fn run_recurring(app: &RideShareApp, cmd: RecurringCommands) -> Result<()> {
    let store = &app.recurring_rides;
    if let Err(e) = store.load_options().await {
        tracing::warn!(error = %e, "Day and schedule labels unavailable");
    }

    match cmd {
        RecurringCommands::Search { day } => {
            let rides = store.search_recurring_rides(day).await?;
            if rides.is_empty() {
                println!("No recurring rides found");
            }
            for ride in &rides {
                print_recurring(app, ride);
            }
        }
        RecurringCommands::Mine => {
            for ride in &store.get_my_recurring_rides().await? {
                print_recurring(app, ride);
            }
        }
        RecurringCommands::Create {
            car_id,
            from,
            to,
            day,
            time,
            seats,
            fare,
            schedule_type,
        } => {
            let car = match app.cars.mine().await {
                Ok(cars) => cars.into_iter().find(|c| c.id == car_id),
                Err(e) => {
                    tracing::warn!(error = %e, "Could not load cars, skipping seat check");
                    None
                }
            };
            let data = NewRecurringRide {
                car_id,
                start_location: from,
                end_location: to,
                day_of_week: day,
                start_time: time,
                seats_available: seats,
                total_fare: fare,
                schedule_type,
            };
            let ride = store.create_recurring_ride(&data, car.as_ref()).await?;
            println!("Created recurring ride #{}", ride.id);
            print_recurring(app, &ride);
        }
        RecurringCommands::Pause { id } => {
            print_recurring(app, &store.pause_recurring_ride(id).await?);
        }
        RecurringCommands::Resume { id } => {
            print_recurring(app, &store.resume_recurring_ride(id).await?);
        }
        RecurringCommands::Cancel { id } => {
            print_recurring(app, &store.cancel_recurring_ride(id).await?);
        }
        RecurringCommands::Delete { id } => {
            store.delete_recurring_ride(id).await?;
            println!("Deleted recurring ride #{}", id);
        }
    }
    Ok(())
}

async fn run_messages(app: &RideShareApp, cmd: MessageCommands) -> Result<()> {
    let now = Utc::now();
    match cmd {
        MessageCommands::Conversations => {
            let conversations = app.messages.get_conversations().await?;
            for conv in &conversations {
                let unread = match conv.unread_count {
                    0 => String::new(),
                    n => format!(" ({} unread)", n),
                };
                println!(
                    "{:<20} {:>8}  {}{}",
                    conv.user.name,
                    format_conversation_time(&conv.last_message.created_at, now),
                    conv.last_message.content,
                    unread
                );
            }
            println!("Total unread: {}", app.messages.total_unread_count());
        }
        MessageCommands::Thread { user_id } => {
            app.messages.open_conversation(user_id).await?;
            for entry in app.messages.current_conversation() {
                print_entry(&entry, user_id, now);
            }
        }
        MessageCommands::Send {
            user_id,
            content,
            ride,
        } => {
            let message = app.messages.send_message(user_id, &content, ride).await?;
            println!("Sent message #{}", message.id);
        }
    }
    Ok(())
}

fn print_ride(ride: &Ride) {
    let when = format_date_time(&ride.start_time)
        .map(|parts| parts.full)
        .unwrap_or_else(|| ride.start_time.clone());
    println!(
        "#{:<4} {} -> {}  {} (in {})  {} seats  ${:.2}",
        ride.id,
        ride.start_location,
        ride.end_location,
        when,
        time_until_ride(&ride.start_time, Utc::now()),
        ride.seats_available,
        ride.total_fare
    );
}

fn print_recurring(app: &RideShareApp, ride: &RecurringRide) {
    let store = &app.recurring_rides;
    println!(
        "#{:<4} {} -> {}  {} {} ({})  {} seats  ${:.2}  [{}]",
        ride.id,
        ride.start_location,
        ride.end_location,
        store.get_day_label(ride.day_of_week),
        ride.start_time,
        store.get_schedule_type_label(&ride.schedule_type),
        ride.seats_available,
        ride.total_fare,
        ride.status
    );
}

fn print_entry(entry: &ConversationEntry, peer_id: i64, now: chrono::DateTime<Utc>) {
    let who = match entry.message() {
        Some(msg) if msg.sender_id == peer_id => msg
            .sender
            .as_ref()
            .map(|s| s.name.clone())
            .unwrap_or_else(|| format!("User {}", peer_id)),
        _ => "You".to_string(),
    };
    let marker = if entry.is_pending() { " (sending)" } else { "" };
    println!(
        "[{}] {}: {}{}",
        format_message_time(entry.created_at(), now),
        who,
        entry.content(),
        marker
    );
}

/// Initialize logging on stderr: compact text, or JSON when
/// `RIDESHARE_LOG_JSON=1`.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("rideshare_client=debug,info"));
    let json = std::env::var("RIDESHARE_LOG_JSON")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(false)
                    .with_current_span(true)
                    .flatten_event(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init();
    }
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use sqlx::Row;
use taskboard_auth::NewAccount;
use taskboard_config::load as load_config;
use taskboard_gateway::{create_router, GatewayState};
use taskboard_profiles::{Profile, ProfileTo};
use taskboard_runtime::{telemetry, BackendServices};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "taskboard-backend")]
#[command(about = "Taskboard backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Dump users and profiles from the database
    DumpData,
    /// Clear all users, profiles, and sessions from the database
    ClearData,
    /// Seed the database with test accounts
    SeedData,
    /// Start interactive console
    Console,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::DumpData => dump_data().await,
        Commands::ClearData => clear_data().await,
        Commands::SeedData => seed_data().await,
        Commands::Console => run_console().await,
    }
}

async fn run_server() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting Taskboard backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let state = GatewayState::new(services.authenticator.clone(), services.profiles.clone());
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(taskboard_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("dumping users and profiles from database");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    dump_tables(&services.db_pool).await
}

async fn dump_tables(pool: &sqlx::SqlitePool) -> anyhow::Result<()> {
    let users = sqlx::query(
        r#"
        SELECT id, public_id, email, display_name, role, created_at
        FROM users
        ORDER BY id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch users")?;

    println!("=== USERS ===");
    if users.is_empty() {
        println!("No users found in database");
    } else {
        println!("Found {} users:", users.len());
        println!(
            "{:<5} {:<26} {:<30} {:<20} {:<8} {:<25}",
            "ID", "Public ID", "Email", "Display Name", "Role", "Created At"
        );
        println!("{}", "-".repeat(120));

        for user in &users {
            let id: i64 = user.get("id");
            let public_id: String = user.get("public_id");
            let email: String = user.get("email");
            let display_name: String = user.get("display_name");
            let role: String = user.get("role");
            let created_at: String = user.get("created_at");

            println!(
                "{:<5} {:<26} {:<30} {:<20} {:<8} {:<25}",
                id, public_id, email, display_name, role, created_at
            );
        }
    }

    println!("\n=== PROFILES ===");
    let profiles = sqlx::query(
        r#"
        SELECT user_id, last_login, mail_notifications, updated_at
        FROM profiles
        ORDER BY user_id ASC
        "#,
    )
    .fetch_all(pool)
    .await
    .context("failed to fetch profiles")?;

    if profiles.is_empty() {
        println!("No profiles found in database");
    } else {
        println!("Found {} profiles:", profiles.len());
        for row in &profiles {
            let profile = Profile {
                user_id: row.get("user_id"),
                last_login: row.get("last_login"),
                mail_notifications: row.get("mail_notifications"),
                updated_at: row.get("updated_at"),
            };
            let transfer = ProfileTo::from(&profile);
            let rendered = serde_json::to_string(&transfer)
                .context("failed to render profile as JSON")?;
            println!("  user {}: {}", profile.user_id, rendered);
        }
    }

    Ok(())
}

async fn clear_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("clearing all data from database");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    // Clear dependent tables first (due to foreign key constraints)
    let sessions_deleted = sqlx::query("DELETE FROM sessions")
        .execute(&services.db_pool)
        .await
        .context("failed to delete sessions")?;

    let profiles_deleted = sqlx::query("DELETE FROM profiles")
        .execute(&services.db_pool)
        .await
        .context("failed to delete profiles")?;

    let users_deleted = sqlx::query("DELETE FROM users")
        .execute(&services.db_pool)
        .await
        .context("failed to delete users")?;

    println!("Database cleared:");
    println!("- {} sessions deleted", sessions_deleted.rows_affected());
    println!("- {} profiles deleted", profiles_deleted.rows_affected());
    println!("- {} users deleted", users_deleted.rows_affected());

    Ok(())
}

async fn seed_data() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("seeding database with test accounts");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let alice = services
        .authenticator
        .register_with_password(NewAccount {
            email: "alice@example.com".to_string(),
            password: "Password123".to_string(),
            first_name: Some("Alice".to_string()),
            last_name: Some("Archer".to_string()),
            display_name: Some("alice".to_string()),
        })
        .await
        .context("failed to register test user alice")?;

    let bob = services
        .authenticator
        .register_with_password(NewAccount {
            email: "bob@example.com".to_string(),
            password: "Password123".to_string(),
            display_name: Some("bob".to_string()),
            ..Default::default()
        })
        .await
        .context("failed to register test user bob")?;

    // alice has logged in before and subscribed to two categories
    services
        .profiles
        .record_login(alice.id)
        .await
        .context("failed to stamp login for alice")?;

    let preferences = ProfileTo {
        id: Some(alice.id),
        mail_notifications: ["NEWS".to_string(), "OVERDUE".to_string()]
            .into_iter()
            .collect(),
        disabled_notifications: Default::default(),
        last_login: None,
    };
    services
        .profiles
        .update_profile(alice.id, &preferences)
        .await
        .context("failed to seed preferences for alice")?;

    println!("Database seeded with test accounts:");
    println!("- {} (id {}) with saved preferences", alice.email, alice.id);
    println!("- {} (id {}) with no profile yet", bob.email, bob.id);
    println!("Run 'dump-data' to see the inserted data");

    Ok(())
}

async fn run_console() -> anyhow::Result<()> {
    telemetry::init_tracing().context("failed to initialise tracing")?;

    info!("starting interactive console");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    println!("Taskboard Interactive Console");
    println!("Type commands like '/help', '/users', '/profiles', '/clear', '/seed', '/quit'");
    println!("Use Ctrl+C or '/quit' to exit");
    println!("---");

    let stdin = tokio::io::stdin();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::Write::flush(&mut std::io::stdout())?;

        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;
        if bytes_read == 0 {
            break; // EOF
        }

        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        match command {
            "/quit" | "/exit" | "/q" => {
                println!("Goodbye!");
                break;
            }
            "/help" | "/h" => {
                println!("Available commands:");
                println!("  /help, /h          - Show this help");
                println!("  /users, /u         - List all users");
                println!("  /profiles, /p      - List all profiles");
                println!("  /sessions, /se     - Count active sessions");
                println!("  /clear, /cl        - Clear all data");
                println!("  /seed, /s          - Seed with test accounts");
                println!("  /dump, /d          - Dump all data");
                println!("  /quit, /exit, /q   - Exit console");
            }
            "/users" | "/u" => {
                let users = sqlx::query(
                    r#"
                    SELECT id, email, display_name, role
                    FROM users
                    ORDER BY id ASC
                    "#,
                )
                .fetch_all(&services.db_pool)
                .await
                .context("failed to fetch users")?;

                if users.is_empty() {
                    println!("No users found");
                } else {
                    println!("Users:");
                    for user in users {
                        let id: i64 = user.get("id");
                        let email: String = user.get("email");
                        let display_name: String = user.get("display_name");
                        let role: String = user.get("role");
                        println!("  {}: {} <{}> ({})", id, display_name, email, role);
                    }
                }
            }
            "/profiles" | "/p" => {
                let profiles = sqlx::query(
                    r#"
                    SELECT user_id, last_login, mail_notifications
                    FROM profiles
                    ORDER BY user_id ASC
                    "#,
                )
                .fetch_all(&services.db_pool)
                .await
                .context("failed to fetch profiles")?;

                if profiles.is_empty() {
                    println!("No profiles found");
                } else {
                    println!("Profiles:");
                    for row in profiles {
                        let user_id: i64 = row.get("user_id");
                        let last_login: Option<String> = row.get("last_login");
                        let mask: i64 = row.get("mail_notifications");
                        println!(
                            "  user {}: mask {:#07b}, last login {}",
                            user_id,
                            mask,
                            last_login.unwrap_or_else(|| "never".to_string())
                        );
                    }
                }
            }
            "/sessions" | "/se" => {
                let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions")
                    .fetch_one(&services.db_pool)
                    .await
                    .context("failed to count sessions")?;
                println!("{count} stored sessions");
            }
            "/clear" | "/cl" => {
                let sessions_deleted = sqlx::query("DELETE FROM sessions")
                    .execute(&services.db_pool)
                    .await
                    .context("failed to delete sessions")?;

                let profiles_deleted = sqlx::query("DELETE FROM profiles")
                    .execute(&services.db_pool)
                    .await
                    .context("failed to delete profiles")?;

                let users_deleted = sqlx::query("DELETE FROM users")
                    .execute(&services.db_pool)
                    .await
                    .context("failed to delete users")?;

                println!(
                    "Cleared {} sessions, {} profiles, and {} users",
                    sessions_deleted.rows_affected(),
                    profiles_deleted.rows_affected(),
                    users_deleted.rows_affected()
                );
            }
            "/seed" | "/s" => {
                match services
                    .authenticator
                    .register_with_password(NewAccount {
                        email: "console@example.com".to_string(),
                        password: "Password123".to_string(),
                        display_name: Some("console".to_string()),
                        ..Default::default()
                    })
                    .await
                {
                    Ok(user) => {
                        services
                            .profiles
                            .record_login(user.id)
                            .await
                            .context("failed to stamp login for console user")?;
                        println!("Seeded {} (id {})", user.email, user.id);
                    }
                    Err(taskboard_auth::AuthError::UserExists) => {
                        println!("Console user already seeded");
                    }
                    Err(error) => {
                        return Err(error).context("failed to seed console user");
                    }
                }
            }
            "/dump" | "/d" => {
                dump_tables(&services.db_pool).await?;
            }
            _ => {
                println!("Unknown command: {}", command);
                println!("Type '/help' for available commands");
            }
        }
    }

    Ok(())
}

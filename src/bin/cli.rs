use anyhow::Context;
use clap::{Parser, Subcommand};
use kanban::{
    db,
    repositories::{SqliteCategoryRepository, SqliteTaskRepository, SqliteUserRepository},
    services::{CategoryService, RegisterRequest, UserService},
};
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "kanban-cli")]
#[command(about = "CLI tool for managing kanban users and boards", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// User management commands
    User {
        #[command(subcommand)]
        command: UserCommands,
    },

    /// Board inspection commands
    Board {
        #[command(subcommand)]
        command: BoardCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Create a new user with the default categories
    Create {
        /// Full name
        #[arg(short, long)]
        fullname: String,

        /// Email address
        #[arg(short, long)]
        email: String,

        /// Password (will prompt if not provided)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// List all users
    List {
        /// Maximum number of users to display
        #[arg(short, long, default_value_t = 100)]
        limit: i64,

        /// Offset for pagination
        #[arg(short = 'o', long, default_value_t = 0)]
        offset: i64,
    },

    /// Delete a user (categories and tasks are kept)
    Delete {
        /// Email address of the user to delete
        #[arg(short, long)]
        email: String,
    },
}

#[derive(Subcommand)]
enum BoardCommands {
    /// Print a user's categories and their tasks
    Show {
        /// Email address of the board owner
        #[arg(short, long)]
        email: String,
    },
}

fn get_password(prompt: &str) -> anyhow::Result<String> {
    use std::io::{self, Write};
    print!("{}: ", prompt);
    io::stdout().flush()?;

    Ok(rpassword::read_password()?)
}

fn prompt_new_password() -> anyhow::Result<String> {
    let password = get_password("Password")?;
    let confirm = get_password("Confirm password")?;
    if password != confirm {
        anyhow::bail!("Passwords do not match");
    }
    Ok(password)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    // Connect to database
    let pool = db::create_pool(&database_url).await?;

    // Run migrations
    sqlx::migrate!("./migrations").run(&pool).await?;

    // Initialize services
    let user_repository = Arc::new(SqliteUserRepository::new(pool.clone()));
    let category_repository = Arc::new(SqliteCategoryRepository::new(pool.clone()));
    let task_repository = Arc::new(SqliteTaskRepository::new(pool.clone()));
    let user_service = UserService::new(user_repository, category_repository.clone());
    let category_service = CategoryService::new(category_repository, task_repository);

    // Parse CLI arguments
    let cli = Cli::parse();

    match cli.command {
        Commands::User { command } => match command {
            UserCommands::Create {
                fullname,
                email,
                password,
            } => {
                let password = match password {
                    Some(pw) => pw,
                    None => prompt_new_password()?,
                };

                let request = RegisterRequest {
                    fullname,
                    email,
                    password,
                };

                let user = user_service
                    .register(request)
                    .await
                    .context("Failed to create user")?;
                println!("✅ User created successfully!");
                println!("  ID: {}", user.id);
                println!("  Name: {}", user.fullname);
                println!("  Email: {}", user.email);
            }

            UserCommands::List { limit, offset } => {
                let users = user_service
                    .list_users(Some(limit), Some(offset))
                    .await
                    .context("Failed to list users")?;

                if users.is_empty() {
                    println!("No users found.");
                } else {
                    println!(
                        "{:<5} {:<25} {:<35} {:<20}",
                        "ID", "Name", "Email", "Created"
                    );
                    println!("{}", "-".repeat(85));
                    for user in users {
                        println!(
                            "{:<5} {:<25} {:<35} {:<20}",
                            user.id,
                            user.fullname,
                            user.email,
                            user.created_at.format("%Y-%m-%d %H:%M:%S")
                        );
                    }
                }
            }

            UserCommands::Delete { email } => {
                let user = user_service
                    .find_user_by_email(&email)
                    .await
                    .context("Failed to find user")?
                    .with_context(|| format!("User '{}' not found", email))?;

                user_service
                    .delete_user(user.id)
                    .await
                    .context("Failed to delete user")?;
                println!("✅ User '{}' deleted successfully!", email);
            }
        },

        Commands::Board { command } => match command {
            BoardCommands::Show { email } => {
                let user = user_service
                    .find_user_by_email(&email)
                    .await
                    .context("Failed to find user")?
                    .with_context(|| format!("User '{}' not found", email))?;

                let board = category_service
                    .get_categories_with_tasks(user.id)
                    .await
                    .context("Failed to load board")?;

                println!("Board of {} <{}>", user.fullname, user.email);
                for column in board {
                    println!();
                    println!("[{}] {} ({} task(s))", column.id, column.kind, column.tasks.len());
                    for task in column.tasks {
                        if task.description.is_empty() {
                            println!("  - #{} {}", task.id, task.title);
                        } else {
                            println!("  - #{} {}: {}", task.id, task.title, task.description);
                        }
                    }
                }
            }
        },
    }

    Ok(())
}

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use tubeshelf::config::Config;
use tubeshelf::storage::{Database, StorageError};
use tubeshelf::store::{AddVideoError, AssumeYes, Category, CategoryStore, Confirm, StoreError};

/// Maximum size of a file accepted by `import` (8 MB).
const MAX_IMPORT_SIZE: u64 = 8 * 1_048_576;

/// Get the config directory path (~/.config/tubeshelf/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("tubeshelf"))
}

/// Create the config directory if needed and restrict it to the current user.
fn ensure_config_dir(config_dir: &Path) -> Result<()> {
    if !config_dir.exists() {
        std::fs::create_dir_all(config_dir).context("Failed to create config directory")?;
        tracing::info!(path = %config_dir.display(), "Created config directory");
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o700);
        if let Err(e) = std::fs::set_permissions(config_dir, perms) {
            tracing::warn!(
                path = %config_dir.display(),
                error = %e,
                "Failed to set config directory permissions to 0700"
            );
        }
    }

    Ok(())
}

/// Write `content` to `dst` via write-to-temp-then-rename, so `dst` is never
/// left half-written.
fn atomic_write(dst: &Path, content: &[u8]) -> Result<()> {
    // Unpredictable temp name: nobody can pre-plant a symlink there.
    use std::time::{SystemTime, UNIX_EPOCH};
    let random_suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);
    let temp_path = dst.with_extension(format!("tmp.{:016x}", random_suffix));

    let mut temp_file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&temp_path)
        .with_context(|| {
            format!(
                "Failed to create temporary file '{}': check directory permissions or disk space",
                temp_path.display()
            )
        })?;

    temp_file
        .write_all(content)
        .and_then(|()| temp_file.sync_all())
        .with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!(
                "Failed to write temporary file '{}': disk may be full",
                temp_path.display()
            )
        })?;
    drop(temp_file);

    // On Windows, rename fails if destination exists
    #[cfg(windows)]
    if dst.exists() {
        std::fs::remove_file(dst).with_context(|| {
            let _ = std::fs::remove_file(&temp_path);
            format!("Failed to remove existing '{}' before replace", dst.display())
        })?;
    }

    std::fs::rename(&temp_path, dst).with_context(|| {
        let _ = std::fs::remove_file(&temp_path);
        format!(
            "Failed to rename '{}' to '{}': check permissions",
            temp_path.display(),
            dst.display()
        )
    })?;

    Ok(())
}

/// Reads y/n from stdin.
struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "tubeshelf", about = "Bookmark YouTube videos into categories")]
struct Args {
    /// Config file (default: ~/.config/tubeshelf/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the config file
    #[arg(long, value_name = "FILE", global = true)]
    db: Option<PathBuf>,

    /// Don't ask before deleting
    #[arg(short = 'y', long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List category names
    Categories,
    /// Create a category (stored lowercase)
    AddCategory { name: String },
    /// Delete a category and its videos
    DeleteCategory { name: String },
    /// Save a video URL into a category
    AddVideo { category: String, url: String },
    /// List the video ids of a category
    Videos { category: String },
    /// Remove a video id from a category
    DeleteVideo { category: String, id: String },
    /// Print the stored category document
    Export {
        /// Write to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Replace all categories with the contents of a JSON file
    Import { file: PathBuf },
}

/// Exit with a user-facing message, without the anyhow error chain.
fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

async fn run(
    command: Command,
    store: &CategoryStore<Database>,
    confirm: &dyn Confirm,
    config_dir: &Path,
) -> Result<()> {
    match command {
        Command::Categories => {
            for name in store.category_names().await? {
                println!("{name}");
            }
        }
        Command::AddCategory { name } => match store.add_category(&name).await {
            Ok(true) => println!("Added category '{}'", name.trim().to_lowercase()),
            Ok(false) => fail(format!("Category '{name}' already exists")),
            Err(StoreError::InvalidName) => fail(StoreError::InvalidName),
            Err(e) => return Err(e).context("Failed to add category"),
        },
        Command::DeleteCategory { name } => {
            if !store.delete_category(&name).await {
                fail(format!("Failed to delete category '{name}'"));
            }
            println!("Deleted category '{name}'");
        }
        Command::AddVideo { category, url } => match store.add_video(&category, &url).await {
            Ok(id) => println!("Added video '{id}' to '{category}'"),
            Err(AddVideoError::Store(e)) => return Err(e).context("Failed to add video"),
            Err(e) => fail(e),
        },
        Command::Videos { category } => {
            for id in store.videos_for_category(&category).await? {
                println!("{id}");
            }
        }
        Command::DeleteVideo { category, id } => {
            let deleted = store
                .delete_video(&category, &id, confirm)
                .await
                .context("Failed to delete video")?;
            if deleted {
                println!("Deleted video '{id}' from '{category}'");
            } else {
                println!("Nothing deleted");
            }
        }
        Command::Export { output } => {
            let raw = store
                .categories_raw()
                .await?
                .unwrap_or_else(|| "[]".to_string());
            match output {
                Some(path) => {
                    atomic_write(&path, raw.as_bytes())?;
                    println!("Exported categories to: {}", path.display());
                }
                None => println!("{raw}"),
            }
        }
        Command::Import { file } => import(store, &file, config_dir).await?,
    }
    Ok(())
}

async fn import(store: &CategoryStore<Database>, file: &Path, config_dir: &Path) -> Result<()> {
    let metadata = std::fs::metadata(file)
        .with_context(|| format!("Failed to read import file: {}", file.display()))?;
    if !metadata.is_file() {
        anyhow::bail!("Import path must be a regular file");
    }
    if metadata.len() > MAX_IMPORT_SIZE {
        anyhow::bail!(
            "Import file is {} bytes (max {} bytes)",
            metadata.len(),
            MAX_IMPORT_SIZE
        );
    }

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read import file: {}", file.display()))?;
    let categories: Vec<Category> = serde_json::from_str(&content)
        .context("Import file is not a JSON array of {name, videos} objects")?;

    // Back up FIRST; if that fails the stored document is untouched.
    if let Some(current) = store.categories_raw().await? {
        let backup_name = format!(
            "categories.backup.{}.json",
            Utc::now().format("%Y%m%d_%H%M%S")
        );
        let backup_path = config_dir.join(backup_name);
        atomic_write(&backup_path, current.as_bytes()).with_context(|| {
            format!(
                "Failed to create backup at '{}'. Stored categories are unchanged.",
                backup_path.display()
            )
        })?;
        println!("Backed up existing categories to: {}", backup_path.display());
    }

    store
        .set_categories(&categories)
        .await
        .context("Failed to store imported categories")?;
    tracing::info!(categories = categories.len(), "Imported categories");
    println!("Imported {} categories from {}", categories.len(), file.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_dir = get_config_dir()?;
    ensure_config_dir(&config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let config = Config::load(&config_path).context("Failed to load configuration")?;

    let db_path = args
        .db
        .clone()
        .unwrap_or_else(|| config.database_path_in(&config_dir));
    let db_path_str = db_path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid UTF-8 in database path"))?;

    let db = match Database::open(db_path_str).await {
        Ok(db) => db,
        Err(e @ StorageError::InstanceLocked) => fail(e),
        Err(e) => return Err(anyhow::anyhow!("Failed to open database: {}", e)),
    };

    let store = CategoryStore::with_key(db.clone(), config.storage_key.clone());
    let confirm: &dyn Confirm = if args.yes || !config.confirm_deletes {
        &AssumeYes
    } else {
        &TerminalConfirm
    };

    let result = run(args.command, &store, confirm, &config_dir).await;
    db.close().await;
    result
}
